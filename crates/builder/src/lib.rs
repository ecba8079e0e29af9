#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]
//! Example dataset builder for lcdb-test-data
//!
//! Prepares a dataset directory with a content-addressed conda environment
//! and runs the bundled Snakemake workflow inside it.

mod assets;
mod builder;
mod environment;
mod types;

pub use assets::Assets;
pub use builder::Builder;
pub use environment::CondaEnvironment;
pub use types::{BuildReport, EnvironmentStatus};
