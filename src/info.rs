use std::fmt::Display;
use std::fmt::Formatter;
use std::fs::Metadata;
use std::io::Read;

/// Metadata of a file found in a directory or in a tarball.
///
/// Fields that are missing or malformed in a tar header are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryInfo {
    pub size: u64,
    pub uid: u64,
    pub gid: u64,
    pub mode: u32,
    /// Modification time in seconds since the Unix epoch.
    pub mtime: u64,
}

impl<'a, R: Read> From<&tar::Entry<'a, R>> for EntryInfo {
    fn from(entry: &tar::Entry<'a, R>) -> Self {
        let header = entry.header();
        Self {
            size: entry.size(),
            uid: header.uid().unwrap_or(0),
            gid: header.gid().unwrap_or(0),
            mode: header.mode().unwrap_or(0),
            mtime: header.mtime().unwrap_or(0),
        }
    }
}

impl From<&Metadata> for EntryInfo {
    #[cfg(unix)]
    fn from(metadata: &Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;
        Self {
            size: metadata.len(),
            uid: metadata.uid().into(),
            gid: metadata.gid().into(),
            mode: metadata.mode(),
            mtime: metadata.mtime().try_into().unwrap_or(0),
        }
    }

    #[cfg(not(unix))]
    fn from(metadata: &Metadata) -> Self {
        use std::time::UNIX_EPOCH;
        let mtime = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            size: metadata.len(),
            mtime,
            ..Default::default()
        }
    }
}

impl Display for EntryInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "sz={} uid/gid={}/{} mode={:05o} mt={}",
            self.size, self.uid, self.gid, self.mode, self.mtime
        )
    }
}

/// How an entry is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Passed to the handler.
    RegularFile,
    /// A tarball that is walked recursively.
    Container,
}
