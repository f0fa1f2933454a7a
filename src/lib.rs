//! Walk directory trees and tarballs as a single tree of files.
//!
//! Tarballs are recognized by their names (`.tar`, `.tgz`, `.tbz`, `.tar.gz`, `.tar.bz2`, ...)
//! and are descended into recursively, including tarballs inside tarballs.
//! Compressed files are decompressed transparently.

mod chain;
mod classify;
pub mod compress;
mod error;
mod info;
mod matcher;
#[cfg(test)]
pub mod test;
mod walker;

pub use self::chain::*;
pub use self::error::*;
pub use self::info::*;
pub use self::matcher::*;
pub use self::walker::*;
