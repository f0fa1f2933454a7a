mod recorder;
mod tarball;

pub use self::archive_repo::*;
pub use self::recorder::*;
pub use self::tarball::*;
pub use self::tree::*;
