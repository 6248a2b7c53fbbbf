use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub tree: TreeSettings,
    #[serde(default)]
    pub scene: SceneSettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct TreeSettings {
    pub level: Option<u32>,  // Starting recursion level, clamped to 0-10
}

#[derive(Debug, Default, Deserialize)]
pub struct SceneSettings {
    pub sky: Option<[u8; 3]>,  // Background colour as [r, g, b]
    pub fps: Option<u32>,
}

impl Settings {
    /// Read settings from `explicit` if given, else from the user config
    /// directory. Only an explicitly requested file is allowed to fail.
    pub fn load(explicit: Option<&Path>) -> io::Result<Self> {
        if let Some(path) = explicit {
            let settings = Self::read(path)?;
            info!(path = %path.display(), "settings loaded");
            return Ok(settings);
        }

        let path = Self::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }

        match Self::read(&path) {
            Ok(settings) => {
                info!(path = %path.display(), "settings loaded");
                Ok(settings)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
                Ok(Self::default())
            }
        }
    }

    pub fn parse(content: &str) -> io::Result<Self> {
        toml::from_str(content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn read(path: &Path) -> io::Result<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("blossom")
            .join("config.toml")
    }
}
