use std::fmt::Display;
use std::fmt::Formatter;

/// Names of the containers enclosing the current file, outermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveChain {
    names: Vec<String>,
}

impl ArchiveChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<S: Into<String>>(&mut self, name: S) {
        self.names.push(name.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.names.pop()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names[..]
    }
}

impl Display for ArchiveChain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut iter = self.names.iter();
        if let Some(first) = iter.next() {
            f.write_str(first)?;
        }
        for name in iter {
            write!(f, "{SEPARATOR}{name}")?;
        }
        Ok(())
    }
}

pub const SEPARATOR: char = ':';

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let mut chain = ArchiveChain::new();
        assert_eq!("", chain.to_string());
        chain.push("outer.tar");
        assert_eq!("outer.tar", chain.to_string());
        chain.push("inner.tgz");
        chain.push("innermost.tbz");
        assert_eq!("outer.tar:inner.tgz:innermost.tbz", chain.to_string());
        assert_eq!(3, chain.len());
        assert_eq!(Some("innermost.tbz".into()), chain.pop());
        assert_eq!("outer.tar:inner.tgz", chain.to_string());
        assert_eq!(["outer.tar", "inner.tgz"], chain.names());
    }
}
