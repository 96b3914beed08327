//! Kiln CLI - assemble production build configurations from project settings.
//!
//! The CLI is a thin layer over `kiln-config`:
//!
//! - [`cli`] - Argument definitions
//! - [`commands`] - `config`, `check` and `compress`
//! - [`error`] - CLI errors and their miette rendering
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Terminal status messages and formatting
//!
//! # Example
//!
//! ```rust,no_run
//! use kiln_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
