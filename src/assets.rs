//! Declared asset manifest.
//!
//! Each game folder carries a `manifest.json` mapping logical roles such as
//! `"player"` or `"foe"` to file paths relative to the manifest. Nothing is
//! discovered by scanning file names.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Manifest file name inside a game's asset folder.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Role of the player's shooter sprite.
pub const ROLE_PLAYER: &str = "player";
/// Role of the tower sprite.
pub const ROLE_TOWER: &str = "tower";
/// Role of the foe sprite.
pub const ROLE_FOE: &str = "foe";
/// Role of the broken-foe sprite.
pub const ROLE_FOE_BROKEN: &str = "foe_broken";
/// Role of the projectile sprite.
pub const ROLE_PROJECTILE: &str = "projectile";
/// Role of the background image.
pub const ROLE_BACKGROUND: &str = "background";
/// Role of the goal sprite.
pub const ROLE_GOAL: &str = "goal";

/// Map from logical asset role to file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
    /// Role to path entries.
    pub assets: BTreeMap<String, PathBuf>,
}

impl AssetManifest {
    /// Reads a manifest; relative paths resolve against its directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut manifest: Self = serde_json::from_str(&json).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        manifest.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        log::debug!("asset manifest {} declares {} roles", path.display(), manifest.assets.len());
        Ok(manifest)
    }

    /// Builds a manifest from in-memory entries.
    pub fn from_entries<I, K, P>(base_dir: impl Into<PathBuf>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<PathBuf>,
    {
        Self {
            base_dir: base_dir.into(),
            assets: entries
                .into_iter()
                .map(|(k, p)| (k.into(), p.into()))
                .collect(),
        }
    }

    /// Path declared for `role`, resolved against the base directory.
    pub fn resolve(&self, role: &str) -> Option<PathBuf> {
        self.assets.get(role).map(|p| self.base_dir.join(p))
    }

    /// Like [`AssetManifest::resolve`], but also checks that the file exists.
    pub fn require(&self, role: &str) -> Result<PathBuf> {
        let path = self
            .resolve(role)
            .ok_or_else(|| Error::UnknownAssetRole(role.to_string()))?;
        if path.exists() {
            Ok(path)
        } else {
            Err(Error::MissingAsset {
                role: role.to_string(),
                path,
            })
        }
    }
}
