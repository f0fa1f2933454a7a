mod any;

pub use self::any::*;
