//! Bundled package manifest and workflow description

use lcdb_config::AssetConfig;
use lcdb_errors::{ConfigError, Error};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tokio::fs;

const BUNDLED_MANIFEST: &[u8] = include_bytes!("../assets/requirements.txt");
const BUNDLED_SNAKEFILE: &[u8] = include_bytes!("../assets/Snakefile");

/// The two resource files copied into every dataset directory
///
/// Both are held as raw bytes. The manifest bytes are written to disk and
/// fingerprinted as-is, so no newline or encoding normalisation happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assets {
    manifest: Cow<'static, [u8]>,
    snakefile: Cow<'static, [u8]>,
    manifest_source: Option<PathBuf>,
    snakefile_source: Option<PathBuf>,
}

impl Assets {
    /// Assets compiled into the binary
    #[must_use]
    pub fn bundled() -> Self {
        Self {
            manifest: Cow::Borrowed(BUNDLED_MANIFEST),
            snakefile: Cow::Borrowed(BUNDLED_SNAKEFILE),
            manifest_source: None,
            snakefile_source: None,
        }
    }

    /// Assets from explicit contents
    #[must_use]
    pub fn new(
        manifest: impl Into<Cow<'static, [u8]>>,
        snakefile: impl Into<Cow<'static, [u8]>>,
    ) -> Self {
        Self {
            manifest: manifest.into(),
            snakefile: snakefile.into(),
            manifest_source: None,
            snakefile_source: None,
        }
    }

    /// Bundled assets with any configured overrides read from disk
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if an override path cannot be read.
    pub async fn resolve(config: &AssetConfig) -> Result<Self, Error> {
        let mut assets = Self::bundled();
        if let Some(path) = &config.manifest {
            assets.manifest = Cow::Owned(read_override(path).await?);
            assets.manifest_source = Some(path.clone());
        }
        if let Some(path) = &config.snakefile {
            assets.snakefile = Cow::Owned(read_override(path).await?);
            assets.snakefile_source = Some(path.clone());
        }
        Ok(assets)
    }

    #[must_use]
    pub fn manifest(&self) -> &[u8] {
        &self.manifest
    }

    #[must_use]
    pub fn snakefile(&self) -> &[u8] {
        &self.snakefile
    }

    /// File the manifest was read from, `None` when bundled
    #[must_use]
    pub fn manifest_source(&self) -> Option<&Path> {
        self.manifest_source.as_deref()
    }

    /// File the Snakefile was read from, `None` when bundled
    #[must_use]
    pub fn snakefile_source(&self) -> Option<&Path> {
        self.snakefile_source.as_deref()
    }
}

impl Default for Assets {
    fn default() -> Self {
        Self::bundled()
    }
}

async fn read_override(path: &Path) -> Result<Vec<u8>, Error> {
    fs::read(path).await.map_err(|_| {
        ConfigError::NotFound {
            path: path.display().to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_bundled_assets_are_present() {
        let assets = Assets::bundled();
        assert!(!assets.manifest().is_empty());
        assert!(assets.manifest().ends_with(b"\n"));
        assert!(std::str::from_utf8(assets.snakefile())
            .unwrap()
            .contains("rule all"));
    }

    #[tokio::test]
    async fn test_resolve_without_overrides() {
        let assets = Assets::resolve(&AssetConfig::default()).await.unwrap();
        assert_eq!(assets, Assets::bundled());
    }

    #[tokio::test]
    async fn test_resolve_reads_manifest_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requirements.txt");
        std::fs::write(&path, b"packageA\npackageB\n").unwrap();

        let config = AssetConfig {
            manifest: Some(path.clone()),
            snakefile: None,
        };
        let assets = Assets::resolve(&config).await.unwrap();
        assert_eq!(assets.manifest(), b"packageA\npackageB\n");
        assert_eq!(assets.manifest_source(), Some(path.as_path()));
        assert_eq!(assets.snakefile(), Assets::bundled().snakefile());
        assert_eq!(assets.snakefile_source(), None);
    }

    #[tokio::test]
    async fn test_missing_override_is_config_error() {
        let config = AssetConfig {
            manifest: None,
            snakefile: Some(PathBuf::from("/nonexistent/Snakefile")),
        };
        let err = Assets::resolve(&config).await.unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::NotFound { .. })));
    }
}
