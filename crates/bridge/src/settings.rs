use crate::types::DeviceDescriptor;
use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEVICE_DEFAULT_HOST: &str = "ws://127.0.0.1";
pub const DEVICE_DEFAULT_PORT: &str = "12345";
pub const MODEL_DEFAULT_HOST: &str = "http://localhost";
pub const MODEL_DEFAULT_PORT: &str = "11434";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub device: DeviceServerSettings,
    pub model: ModelServerSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceServerSettings {
    pub server_connected: bool,
    pub device_connected: bool,
    pub host: String,
    pub port: String,
    pub selected_device: Option<DeviceDescriptor>,
    pub devices: Vec<DeviceDescriptor>,
}

impl Default for DeviceServerSettings {
    fn default() -> Self {
        Self {
            server_connected: false,
            device_connected: false,
            host: DEVICE_DEFAULT_HOST.to_string(),
            port: DEVICE_DEFAULT_PORT.to_string(),
            selected_device: None,
            devices: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelServerSettings {
    pub connected: bool,
    pub host: String,
    pub port: String,
    pub api_key: String,
}

impl Default for ModelServerSettings {
    fn default() -> Self {
        Self {
            connected: false,
            host: MODEL_DEFAULT_HOST.to_string(),
            port: MODEL_DEFAULT_PORT.to_string(),
            api_key: String::new(),
        }
    }
}

impl Settings {
    pub fn default_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "haptic-chat", "haptic-chat")
            .ok_or_else(|| anyhow!("Could not determine project directories"))?;
        Ok(proj_dirs.data_dir().join("settings.json"))
    }

    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read(path)?;
        let mut settings: Settings = serde_json::from_slice(&raw)?;
        settings.normalize();
        Ok(Some(settings))
    }

    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(Some(settings)) => settings,
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::debug!("ignoring unreadable settings at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(self)?;
        Self::write_secure_file(path, &json)
    }

    // deviceConnected never survives without serverConnected
    pub fn normalize(&mut self) {
        if !self.device.server_connected {
            self.device.device_connected = false;
            self.device.selected_device = None;
        }
    }

    fn write_secure_file(path: &Path, bytes: &[u8]) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(bytes)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = file.metadata()?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms)?;
        }
        Ok(())
    }
}
