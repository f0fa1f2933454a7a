use std::io::Read;

use crate::classify::classify;
use crate::classify::Classified;
use crate::walker::Stats;
use crate::walker::Walker;
use crate::ArchiveChain;
use crate::EntryInfo;
use crate::EntryKind;
use crate::Error;

impl<M: Default> Walker<'_, M> {
    /// Classifies a single file and either walks it as a tarball or passes it to the handler.
    ///
    /// An empty `chain` means that the file is not inside any tarball.
    pub(super) fn dispatch(
        &mut self,
        reader: &mut dyn Read,
        name: &str,
        info: &EntryInfo,
        chain: &mut ArchiveChain,
        stats: &mut Stats,
    ) -> Result<(), Error> {
        let Classified {
            name: logical,
            kind,
            mut reader,
        } = classify(name, reader, self.probe)?;
        let top_level = chain.is_empty();
        match kind {
            EntryKind::Container if top_level || self.enable => {
                self.enter_container(&mut reader, name, info, chain, stats)
            }
            _ => {
                // Top-level files keep their names as given by the caller.
                let name = if top_level { name } else { logical.as_str() };
                self.invoke_handler(&mut reader, name, info, chain, stats)
            }
        }
    }

    fn enter_container(
        &mut self,
        reader: &mut dyn Read,
        name: &str,
        info: &EntryInfo,
        chain: &mut ArchiveChain,
        stats: &mut Stats,
    ) -> Result<(), Error> {
        let nested = !chain.is_empty();
        if nested {
            self.notify(true, chain, name, info);
        }
        chain.push(name);
        stats.containers += 1;
        log::debug!("Entering {:?}", chain.to_string());
        let result = self.walk_archive(reader, chain, stats);
        log::debug!("Leaving {:?}", chain.to_string());
        chain.pop();
        if nested {
            self.notify(false, chain, name, info);
        }
        result
    }

    /// Dispatches every regular file of the tarball in archive order.
    ///
    /// [`Error::Stop`] raised for any of the entries ends this tarball only.
    fn walk_archive(
        &mut self,
        reader: &mut dyn Read,
        chain: &mut ArchiveChain,
        stats: &mut Stats,
    ) -> Result<(), Error> {
        let mut archive = tar::Archive::new(reader);
        for entry in archive.entries()? {
            let mut entry = entry?;
            let entry_type = entry.header().entry_type();
            if !entry_type.is_file() {
                log::trace!("Skipping {:?} entry in {}", entry_type, chain);
                continue;
            }
            let name = entry.path()?.to_string_lossy().into_owned();
            let info = EntryInfo::from(&entry);
            if info.size == 0 {
                log::trace!("Skipping empty file {}:{}", chain, name);
                continue;
            }
            match self.dispatch(&mut entry, &name, &info, chain, stats) {
                Ok(()) => {}
                Err(Error::Stop) => {
                    log::debug!("Stopped at {}:{}", chain, name);
                    stats.aborted += 1;
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    fn invoke_handler(
        &mut self,
        reader: &mut dyn Read,
        name: &str,
        info: &EntryInfo,
        chain: &ArchiveChain,
        stats: &mut Stats,
    ) -> Result<(), Error> {
        let Some(matched) = self.matcher.matches(name, info) else {
            log::trace!("No match for {:?}", name);
            stats.skipped += 1;
            return Ok(());
        };
        stats.files += 1;
        (self.handler)(reader, name, &chain.to_string(), info, &matched)
    }
}
