use std::path::Path;

use walkdir::WalkDir;

use crate::walker::Stats;
use crate::walker::Walker;
use crate::EntryInfo;
use crate::Error;

impl<M: Default> Walker<'_, M> {
    /// Walks regular files of the directory in lexicographic order.
    ///
    /// Each file is named by its path relative to `root`.
    pub(super) fn walk_directory(&mut self, root: &Path, stats: &mut Stats) -> Result<(), Error> {
        for entry in WalkDir::new(root).sort_by_file_name().into_iter() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative_path = entry
                .path()
                .strip_prefix(root)
                .map_err(std::io::Error::other)?;
            let name = relative_path.to_string_lossy();
            let metadata = entry.metadata()?;
            let mut file = fs_err::File::open(entry.path())?;
            self.walk_top_level(&mut file, &name, &EntryInfo::from(&metadata), stats)?;
        }
        Ok(())
    }
}
