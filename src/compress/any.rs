use std::borrow::Cow;
use std::io::Read;

use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;

/// Compression of a byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Bzip2,
}

impl Compression {
    /// Detects compression from the file name suffix.
    ///
    /// Returns the compression and the name with the compression suffix removed.
    /// Short tarball suffixes (`.tgz`, `.tbz`, `.tbz2`) become `.tar`.
    pub fn from_name(name: &str) -> (Self, Cow<'_, str>) {
        for (suffix, compression, replacement) in SUFFIXES {
            if let Some(stem) = strip_suffix_ignore_ascii_case(name, suffix) {
                let logical = if replacement.is_empty() {
                    Cow::Borrowed(stem)
                } else {
                    Cow::Owned(format!("{stem}{replacement}"))
                };
                return (compression, logical);
            }
        }
        (Self::None, Cow::Borrowed(name))
    }

    /// Detects compression from the leading bytes of the stream.
    pub fn from_magic(data: &[u8]) -> Self {
        match data {
            // RFC1952
            [0x1f, 0x8b, 0x08, ..] => Self::Gzip,
            // https://sourceware.org/bzip2/manual/manual.html
            [b'B', b'Z', b'h', b'1'..=b'9', ..] => Self::Bzip2,
            _ => Self::None,
        }
    }

    pub fn decoder<'a, R: Read + 'a>(self, reader: R) -> Box<dyn Read + 'a> {
        match self {
            Self::None => Box::new(reader),
            Self::Gzip => Box::new(MultiGzDecoder::new(reader)),
            Self::Bzip2 => Box::new(MultiBzDecoder::new(reader)),
        }
    }
}

pub(crate) fn strip_suffix_ignore_ascii_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let n = name.len().checked_sub(suffix.len())?;
    if !name.is_char_boundary(n) {
        return None;
    }
    let (stem, tail) = name.split_at(n);
    tail.eq_ignore_ascii_case(suffix).then_some(stem)
}

// Longer suffixes go first: `.tbz2` must not be matched as `.bz2`.
const SUFFIXES: [(&str, Compression, &str); 6] = [
    (".tgz", Compression::Gzip, ".tar"),
    (".tbz2", Compression::Bzip2, ".tar"),
    (".tbz", Compression::Bzip2, ".tar"),
    (".gz", Compression::Gzip, ""),
    (".bz2", Compression::Bzip2, ""),
    (".bz", Compression::Bzip2, ""),
];

/// The number of leading bytes that [`Compression::from_magic`] looks at.
pub const MAGIC_LEN: usize = 4;
