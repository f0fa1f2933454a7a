use std::fmt::Debug;
use std::fmt::Formatter;

use crate::EntryInfo;
use crate::Error;

pub type NameMatcher<'a, M> = Box<dyn Fn(&str) -> Option<M> + 'a>;
pub type FileMatcher<'a, M> = Box<dyn Fn(&str, &EntryInfo) -> Option<M> + 'a>;

/// Decides which files are passed to the handler.
///
/// The value returned on a match is passed to the handler as is.
pub enum Matcher<'a, M> {
    /// Matches every file.
    Any,
    /// Looks at the file name only.
    Name(NameMatcher<'a, M>),
    /// Looks at the file name and its metadata.
    File(FileMatcher<'a, M>),
}

impl<'a, M: Default> Matcher<'a, M> {
    pub fn new(
        name_matcher: Option<NameMatcher<'a, M>>,
        file_matcher: Option<FileMatcher<'a, M>>,
    ) -> Result<Self, Error> {
        match (name_matcher, file_matcher) {
            (Some(_), Some(_)) => Err(Error::Config(
                "Do not provide both `name_matcher` and `file_matcher`".into(),
            )),
            (Some(f), None) => Ok(Self::Name(f)),
            (None, Some(f)) => Ok(Self::File(f)),
            (None, None) => Ok(Self::Any),
        }
    }

    pub fn matches(&self, name: &str, info: &EntryInfo) -> Option<M> {
        match self {
            Self::Any => Some(M::default()),
            Self::Name(f) => f(name),
            Self::File(f) => f(name, info),
        }
    }
}

impl<M> Debug for Matcher<'_, M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Name(..) => f.write_str("Name"),
            Self::File(..) => f.write_str("File"),
        }
    }
}
