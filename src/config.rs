use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::APP_ID;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub app_id: String,
    pub display_name: String,
    pub exec: String,
    pub icon: String,
    pub setup_script: PathBuf,
    /// Command that prompts for administrator rights before running its arguments.
    pub elevation: Vec<String>,
    /// Prefix that runs a command in the host namespace. `None` detects it at startup.
    pub host_bridge: Option<Vec<String>>,
    pub window_width: i32,
    pub window_height: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_id: APP_ID.into(),
            display_name: "ZephyrOS Hello".into(),
            exec: APP_ID.into(),
            icon: APP_ID.into(),
            setup_script: PathBuf::from("/usr/bin/setupHibernate.sh"),
            elevation: vec!["pkexec".into()],
            host_bridge: None,
            window_width: 480,
            window_height: 420,
        }
    }
}

impl Config {
    /// Read the optional config file. Never written back.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(_) => return Config::default(),
        };
        match serde_json::from_str(&data) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring malformed config {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    /// The host user's autostart directory. Inside a sandbox `XDG_CONFIG_HOME`
    /// points into the app's private data, so this is built from the home dir.
    pub fn host_autostart_dir(&self) -> PathBuf {
        home_dir().join(".config").join("autostart")
    }

    pub fn marker_path(&self) -> PathBuf {
        local_config_dir()
            .join(&self.app_id)
            .join("autostart-initialized")
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from(std::env::var("HOME").unwrap_or_default()))
}

fn local_config_dir() -> PathBuf {
    config_dir_or_home(dirs::config_dir(), home_dir())
}

fn config_dir_or_home(config_dir: Option<PathBuf>, home: PathBuf) -> PathBuf {
    config_dir.unwrap_or_else(|| home.join(".config"))
}

fn config_path() -> PathBuf {
    local_config_dir().join(APP_ID).join("config.json")
}
