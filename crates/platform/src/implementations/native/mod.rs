//! Implementation backed by `tokio::process`, used on every supported host

pub mod process;

pub use process::NativeProcessOperations;

/// Zero-sized handle naming the native platform
pub struct NativePlatform;

impl NativePlatform {
    /// Build a [`crate::Platform`] wired to the native implementations
    #[must_use]
    pub fn platform() -> crate::Platform {
        crate::Platform::new(Box::new(NativeProcessOperations::new()))
    }
}
