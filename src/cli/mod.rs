//! Command implementations behind the `dove` binary

pub mod orchestration;

pub use orchestration::{BuildOptions, Session};
