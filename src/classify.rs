use std::io::Error;
use std::io::ErrorKind;
use std::io::Read;

use crate::compress::strip_suffix_ignore_ascii_case;
use crate::compress::Compression;
use crate::compress::MAGIC_LEN;
use crate::EntryKind;

/// A stream ready to be dispatched.
pub(crate) struct Classified<'a> {
    /// The name with the compression suffix removed.
    pub name: String,
    pub kind: EntryKind,
    /// Decompressed contents starting at offset zero.
    pub reader: Box<dyn Read + 'a>,
}

/// Decides whether `reader` is a plain file or a tarball, decompressing it if needed.
///
/// Without `probe` only the name is looked at and nothing is read from the stream.
/// With `probe` the leading bytes are inspected as well; they are replayed
/// to whoever reads the resulting stream.
pub(crate) fn classify<'a>(
    name: &str,
    reader: &'a mut dyn Read,
    probe: bool,
) -> Result<Classified<'a>, Error> {
    let (compression, logical) = Compression::from_name(name);
    let logical = logical.into_owned();
    if !probe {
        let kind = if is_tarball_name(&logical) {
            EntryKind::Container
        } else {
            EntryKind::RegularFile
        };
        return Ok(Classified {
            name: logical,
            kind,
            reader: compression.decoder(reader),
        });
    }
    let reader: Box<dyn Read + 'a> = match compression {
        Compression::None => {
            let mut peek = PeekReader::new(reader);
            let compression = Compression::from_magic(peek.peek(MAGIC_LEN)?);
            compression.decoder(peek)
        }
        other => other.decoder(reader),
    };
    let mut peek = PeekReader::new(reader);
    let kind = if is_tarball_name(&logical) || is_tar_header(peek.peek(BLOCK_LEN)?) {
        EntryKind::Container
    } else {
        EntryKind::RegularFile
    };
    Ok(Classified {
        name: logical,
        kind,
        reader: Box::new(peek),
    })
}

/// Checks the name with the compression suffix already removed.
pub(crate) fn is_tarball_name(name: &str) -> bool {
    strip_suffix_ignore_ascii_case(name, ".tar").is_some()
}

/// Checks for the `ustar` magic or, for old v7 archives, a valid header checksum.
pub(crate) fn is_tar_header(block: &[u8]) -> bool {
    if block.len() < BLOCK_LEN {
        return false;
    }
    if &block[MAGIC_OFFSET..MAGIC_OFFSET + USTAR.len()] == USTAR {
        return true;
    }
    if block.iter().all(|b| *b == 0) {
        return false;
    }
    let Some(expected) = parse_octal(&block[CKSUM_OFFSET..CKSUM_OFFSET + CKSUM_LEN]) else {
        return false;
    };
    let actual: u32 = block[..BLOCK_LEN]
        .iter()
        .enumerate()
        .map(|(i, b)| {
            if (CKSUM_OFFSET..CKSUM_OFFSET + CKSUM_LEN).contains(&i) {
                u32::from(b' ')
            } else {
                u32::from(*b)
            }
        })
        .sum();
    expected == actual
}

fn parse_octal(field: &[u8]) -> Option<u32> {
    let field = field
        .split(|b| *b == 0 || *b == b' ')
        .find(|s| !s.is_empty())?;
    let s = std::str::from_utf8(field).ok()?;
    u32::from_str_radix(s, 8).ok()
}

/// A reader that can look ahead without losing the bytes it looked at.
pub(crate) struct PeekReader<R: Read> {
    inner: R,
    buf: Vec<u8>,
    pos: usize,
}

impl<R: Read> PeekReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            pos: 0,
        }
    }

    /// Returns up to `n` leading bytes; fewer only at the end of the stream.
    pub fn peek(&mut self, n: usize) -> Result<&[u8], Error> {
        let mut chunk = [0_u8; BLOCK_LEN];
        while self.buf.len() - self.pos < n {
            let want = (n - (self.buf.len() - self.pos)).min(chunk.len());
            match self.inner.read(&mut chunk[..want]) {
                Ok(0) => break,
                Ok(m) => self.buf.extend_from_slice(&chunk[..m]),
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        let end = self.buf.len().min(self.pos + n);
        Ok(&self.buf[self.pos..end])
    }
}

impl<R: Read> Read for PeekReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        if self.pos < self.buf.len() {
            let n = buf.len().min(self.buf.len() - self.pos);
            buf[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
            self.pos += n;
            if self.pos == self.buf.len() {
                self.buf.clear();
                self.pos = 0;
            }
            return Ok(n);
        }
        self.inner.read(buf)
    }
}

const BLOCK_LEN: usize = 512;
const MAGIC_OFFSET: usize = 257;
const USTAR: &[u8] = b"ustar";
const CKSUM_OFFSET: usize = 148;
const CKSUM_LEN: usize = 8;
