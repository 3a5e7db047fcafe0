//! User interface module - console output for the `dove` binary.
//!
//! Status lines and errors are styled with `console`, which drops the styling
//! when the stream is not a terminal. Values meant for scripts (tags, versions)
//! are printed bare.

pub mod formatter;

pub use formatter::{
    display_alternates, display_config, display_error, display_status, display_success,
    display_value, format_alternates,
};
