//! Common utilities for the slim reducers.
//!
//! This crate provides shared infrastructure used by the HTML and CSS reducers:
//! - **Error type** - [`ReduceError`], the single error surfaced by every reduction
//! - **I/O helpers** - reading a whole source and writing to a sink
//! - **Warning System** - colored terminal output for recoverable input oddities

pub mod error;
pub mod warning;

pub use error::{ReduceError, read_source, write_str};
