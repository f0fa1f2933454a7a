use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::test::md5_hex;
use crate::EntryInfo;
use crate::Error;
use crate::WalkerBuilder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handled {
    pub md5: String,
    pub lines: usize,
    pub archive: String,
    pub matched: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Abort {
    Stop,
    Fatal,
}

/// Records everything the walker reports.
///
/// Paths under `basedir` are recorded relative to it.
#[derive(Default)]
pub struct Recorder {
    pub handled: BTreeMap<String, Handled>,
    pub order: Vec<String>,
    pub recursed: Vec<(bool, String, String)>,
    pub aborted: Vec<(String, String)>,
    abort: Option<(String, Abort)>,
    basedir: Option<String>,
    prefix: String,
}

impl Recorder {
    /// Matches files which names start with `prefix`.
    pub fn new(basedir: &Path, prefix: &str) -> Self {
        Self {
            basedir: Some(basedir.to_string_lossy().into_owned()),
            prefix: prefix.into(),
            ..Default::default()
        }
    }

    /// Fail on the first file which path contains `name`.
    pub fn abort_on(mut self, name: &str, abort: Abort) -> Self {
        self.abort = Some((name.into(), abort));
        self
    }

    pub fn matcher(&self, path: &str) -> Option<String> {
        let base = basename(path);
        base.starts_with(&self.prefix).then(|| base.to_string())
    }

    pub fn recurse(&mut self, enter: bool, parent: &str, child: &str, _info: &EntryInfo) {
        let parent = self.trim(parent);
        self.recursed.push((enter, parent, child.to_string()));
    }

    pub fn handle(
        &mut self,
        reader: &mut dyn Read,
        path: &str,
        archive: &str,
        _info: &EntryInfo,
        matched: &String,
    ) -> Result<(), Error> {
        let archive = self.trim(archive);
        let path = self.trim(path);
        if let Some((name, abort)) = self.abort.clone() {
            if path.contains(name.as_str()) {
                self.aborted.push((archive.clone(), path.clone()));
                return Err(match abort {
                    Abort::Stop => Error::Stop,
                    Abort::Fatal => Error::other(format!("Giving up on {archive}:{path}")),
                });
            }
        }
        assert!(
            archive.is_empty() || self.aborted.iter().all(|(a, _)| a != &archive),
            "{archive}:{path} is handled after its archive was aborted"
        );
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        let lines = data.split_inclusive(|b| *b == b'\n').count();
        let key = if archive.is_empty() {
            path
        } else {
            format!("{archive}:{path}")
        };
        self.order.push(key.clone());
        self.handled.insert(
            key,
            Handled {
                md5: md5_hex(&data),
                lines,
                archive,
                matched: matched.clone(),
            },
        );
        Ok(())
    }

    /// Content hashes and line counts by the full key.
    pub fn sums(&self) -> BTreeMap<String, (String, usize)> {
        self.handled
            .iter()
            .map(|(key, handled)| (key.clone(), (handled.md5.clone(), handled.lines)))
            .collect()
    }

    fn trim(&self, path: &str) -> String {
        if let Some(basedir) = self.basedir.as_ref() {
            if let Some(relative) = path
                .strip_prefix(basedir.as_str())
                .and_then(|p| p.strip_prefix('/'))
            {
                return relative.to_string();
            }
        }
        path.to_string()
    }
}

pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// A walker that reports to `recorder`.
pub fn recording_walker(recorder: &RefCell<Recorder>) -> WalkerBuilder<'_, String> {
    WalkerBuilder::new(
        move |reader: &mut dyn Read,
              path: &str,
              archive: &str,
              info: &EntryInfo,
              matched: &String| {
            recorder
                .borrow_mut()
                .handle(reader, path, archive, info, matched)
        },
    )
    .name_matcher(move |path| recorder.borrow().matcher(path))
    .recurse(move |enter, parent, child, info| {
        recorder.borrow_mut().recurse(enter, parent, child, info)
    })
}
