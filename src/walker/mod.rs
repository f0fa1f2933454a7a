mod archive;
mod directory;

use std::fmt::Debug;
use std::fmt::Formatter;
use std::io::ErrorKind;
use std::io::Read;
use std::path::Path;

use crate::ArchiveChain;
use crate::EntryInfo;
use crate::Error;
use crate::FileMatcher;
use crate::Matcher;
use crate::NameMatcher;

/// Called for each matched file.
///
/// Receives the file contents, the path, the archive chain (empty when the file is not in a tarball),
/// the metadata, and the value returned by the matcher.
pub type FileHandler<'a, M> =
    Box<dyn FnMut(&mut dyn Read, &str, &str, &EntryInfo, &M) -> Result<(), Error> + 'a>;

/// Called on entering (`true`) and leaving (`false`) a nested tarball.
///
/// Receives the archive chain of the enclosing tarball, the name of the nested one, and its metadata.
pub type RecursionObserver<'a> = Box<dyn FnMut(bool, &str, &str, &EntryInfo) + 'a>;

/// Walks directories and tarballs as a single tree of files.
pub struct Walker<'a, M> {
    handler: FileHandler<'a, M>,
    matcher: Matcher<'a, M>,
    observer: Option<RecursionObserver<'a>>,
    enable: bool,
    probe: bool,
}

impl<'a, M: Default> Walker<'a, M> {
    pub fn builder<H>(handler: H) -> WalkerBuilder<'a, M>
    where
        H: FnMut(&mut dyn Read, &str, &str, &EntryInfo, &M) -> Result<(), Error> + 'a,
    {
        WalkerBuilder::new(handler)
    }

    pub fn matcher(&self) -> &Matcher<'a, M> {
        &self.matcher
    }

    /// Walks a directory, a file or a tarball.
    ///
    /// Returns `None` if the path does not exist or is neither a file nor a directory.
    pub fn handle_path<P: AsRef<Path>>(&mut self, path: P) -> Result<Option<Stats>, Error> {
        let path = path.as_ref();
        let metadata = match fs_err::metadata(path) {
            Ok(metadata) => metadata,
            Err(ref e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Nothing to walk at {:?}", path);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let mut stats = Stats::default();
        if metadata.is_dir() {
            self.walk_directory(path, &mut stats)?;
        } else if metadata.is_file() {
            let mut file = fs_err::File::open(path)?;
            let name = path.to_string_lossy();
            self.walk_top_level(&mut file, &name, &EntryInfo::from(&metadata), &mut stats)?;
        } else {
            log::debug!("Neither a file nor a directory: {:?}", path);
            return Ok(None);
        }
        Ok(Some(stats))
    }

    /// Walks an already opened file or tarball.
    ///
    /// The `name` decides how the stream is decompressed and whether it is a tarball.
    pub fn handle_stream<R: Read>(&mut self, mut reader: R, name: &str) -> Result<Stats, Error> {
        let mut stats = Stats::default();
        self.walk_top_level(&mut reader, name, &EntryInfo::default(), &mut stats)?;
        Ok(stats)
    }

    /// Dispatches a file that is not inside any tarball.
    ///
    /// Behaves as a tarball with a single entry, so that [`Error::Stop`] never escapes.
    fn walk_top_level(
        &mut self,
        reader: &mut dyn Read,
        name: &str,
        info: &EntryInfo,
        stats: &mut Stats,
    ) -> Result<(), Error> {
        let mut chain = ArchiveChain::new();
        match self.dispatch(reader, name, info, &mut chain, stats) {
            Err(Error::Stop) => {
                log::debug!("Stopped at {:?}", name);
                stats.aborted += 1;
                Ok(())
            }
            other => other,
        }
    }

    fn notify(&mut self, enter: bool, parent: &ArchiveChain, child: &str, info: &EntryInfo) {
        if let Some(observer) = self.observer.as_mut() {
            observer(enter, &parent.to_string(), child, info);
        }
    }
}

impl<M> Debug for Walker<'_, M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Walker")
            .field("matcher", &self.matcher)
            .field("observer", &self.observer.is_some())
            .field("enable", &self.enable)
            .field("probe", &self.probe)
            .finish()
    }
}

pub struct WalkerBuilder<'a, M> {
    handler: FileHandler<'a, M>,
    name_matcher: Option<NameMatcher<'a, M>>,
    file_matcher: Option<FileMatcher<'a, M>>,
    observer: Option<RecursionObserver<'a>>,
    enable: bool,
    probe: bool,
}

impl<'a, M: Default> WalkerBuilder<'a, M> {
    pub fn new<H>(handler: H) -> Self
    where
        H: FnMut(&mut dyn Read, &str, &str, &EntryInfo, &M) -> Result<(), Error> + 'a,
    {
        Self {
            handler: Box::new(handler),
            name_matcher: None,
            file_matcher: None,
            observer: None,
            enable: true,
            probe: false,
        }
    }

    /// Match files by name. Conflicts with [`file_matcher`](Self::file_matcher).
    pub fn name_matcher<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Option<M> + 'a,
    {
        self.name_matcher = Some(Box::new(f));
        self
    }

    /// Match files by name and metadata. Conflicts with [`name_matcher`](Self::name_matcher).
    pub fn file_matcher<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &EntryInfo) -> Option<M> + 'a,
    {
        self.file_matcher = Some(Box::new(f));
        self
    }

    /// Observe entering and leaving nested tarballs.
    pub fn recurse<F>(mut self, f: F) -> Self
    where
        F: FnMut(bool, &str, &str, &EntryInfo) + 'a,
    {
        self.observer = Some(Box::new(f));
        self
    }

    /// Descend into nested tarballs. Enabled by default.
    ///
    /// When disabled, tarballs inside tarballs are passed to the handler as regular files.
    pub fn enable(mut self, enable: bool) -> Self {
        self.enable = enable;
        self
    }

    /// Recognize tarballs and compressed files by their contents as well as by their names.
    pub fn probe(mut self, probe: bool) -> Self {
        self.probe = probe;
        self
    }

    pub fn build(self) -> Result<Walker<'a, M>, Error> {
        Ok(Walker {
            handler: self.handler,
            matcher: Matcher::new(self.name_matcher, self.file_matcher)?,
            observer: self.observer,
            enable: self.enable,
            probe: self.probe,
        })
    }
}

/// Counters of a single walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Files passed to the handler.
    pub files: usize,
    /// Files rejected by the matcher.
    pub skipped: usize,
    /// Tarballs walked, top-level ones included.
    pub containers: usize,
    /// Levels aborted with [`Error::Stop`].
    pub aborted: usize,
}
