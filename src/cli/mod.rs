//! Command line interface of posting-index.

pub mod args;
pub mod commands;

pub use args::*;
pub use commands::*;
