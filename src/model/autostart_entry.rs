use std::path::{Path, PathBuf};

use crate::config::Config;

/// The `.desktop` file that asks the host session to launch us at login.
#[derive(Debug, Clone)]
pub struct AutostartDescriptor {
    pub app_id: String,
    pub name: String,
    pub exec: String,
    pub icon: String,
    pub dir: PathBuf,
}

impl AutostartDescriptor {
    pub fn from_config(config: &Config) -> Self {
        Self {
            app_id: config.app_id.clone(),
            name: config.display_name.clone(),
            exec: config.exec.clone(),
            icon: config.icon.clone(),
            dir: config.host_autostart_dir(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.desktop", self.app_id))
    }

    pub fn content(&self) -> String {
        format!(
            "[Desktop Entry]\n\
             Type=Application\n\
             Name={}\n\
             Exec={}\n\
             Icon={}\n\
             X-GNOME-Autostart-enabled=true\n",
            self.name, self.exec, self.icon
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutostartState {
    /// Whether the host descriptor exists, or is about to.
    pub enabled: bool,
    /// Whether the first-run default has been applied (marker file exists).
    pub initialized: bool,
}
