//! Domain logic - version arithmetic and tag rendering, free of any I/O

pub mod tag;
pub mod version;

pub use tag::{render_alternate, TagTemplate};
pub use version::Version;
