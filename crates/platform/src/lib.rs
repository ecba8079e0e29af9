//! Platform abstraction for running external tools.
//!
//! This crate provides:
//! - A command builder that keeps program, argv, working directory and
//!   environment explicit (no shell strings)
//! - Process execution that streams every output line as an event while the
//!   child is still running
//!
//! The abstraction integrates with the event system and the error taxonomy
//! used by the rest of the workspace.

pub mod core;
pub mod implementations;
pub mod process;

pub use core::{Platform, PlatformContext};
pub use implementations::native::NativePlatform;

/// Re-export commonly used types
pub use process::{CommandOutput, PlatformCommand, ProcessOperations};
