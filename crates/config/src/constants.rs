//! Fixed names of everything written into a dataset directory
//!
//! These names are deliberately not exposed via TOML configuration: the
//! Snakefile and the reuse check both depend on them being stable.

/// Copy of the bundled dependency manifest
pub const MANIFEST_FILE: &str = "requirements.txt";

/// Copy of the bundled workflow description
pub const WORKFLOW_FILE: &str = "Snakefile";

/// Parent of all content-addressed environments
pub const ENV_ROOT_DIR: &str = ".conda-env";

/// Sentinel written once an environment has been created successfully
pub const SUCCESS_MARKER: &str = ".success";

/// Directory name used under the platform config dir
pub const APP_NAME: &str = "lcdb-test-data";
