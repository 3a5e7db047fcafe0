pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod process;
pub mod ui;

pub use error::{DoveError, Result};
