use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::backend::host_bridge::HostBridge;
use crate::config::Config;
use crate::model::{AutostartDescriptor, AutostartState};

/// Zero-length file whose existence records that the first-run default ran.
#[derive(Debug, Clone)]
pub struct Marker {
    path: PathBuf,
}

impl Marker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create the marker. Losing a race to another instance is fine.
    pub fn create(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        match OpenOptions::new().write(true).create_new(true).open(&self.path) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Keeps the autostart switch and the host `.desktop` file in step.
///
/// The switch is the source of truth. Writes are fire-and-forget, so a failed
/// host command leaves `state.enabled` out of sync until the next startup probe.
pub struct AutostartController<B: HostBridge> {
    bridge: B,
    descriptor: AutostartDescriptor,
    marker: Marker,
    state: AutostartState,
}

impl<B: HostBridge> AutostartController<B> {
    pub fn from_config(bridge: B, config: &Config) -> Self {
        Self::init(
            bridge,
            AutostartDescriptor::from_config(config),
            Marker::new(config.marker_path()),
        )
    }

    /// Probe the host, then apply the first-run default if it has not run yet.
    pub fn init(bridge: B, descriptor: AutostartDescriptor, marker: Marker) -> Self {
        let mut controller = Self {
            bridge,
            descriptor,
            marker,
            state: AutostartState::default(),
        };
        controller.state.enabled = controller.probe_host_autostart();
        controller.ensure_first_run_default();
        controller
    }

    pub fn state(&self) -> AutostartState {
        self.state
    }

    /// Whether the descriptor exists on the host. Any failure reads as disabled.
    pub fn probe_host_autostart(&self) -> bool {
        let argv = vec![
            "test".to_string(),
            "-f".to_string(),
            path_arg(&self.descriptor.path()),
        ];
        match self.bridge.status(&argv) {
            Ok(exists) => exists,
            Err(e) => {
                log::error!("Failed to check autostart status on host: {}", e);
                false
            }
        }
    }

    pub fn ensure_first_run_default(&mut self) {
        if self.marker.exists() {
            self.state.initialized = true;
            return;
        }

        log::info!("First run, enabling autostart by default");
        self.set_autostart(true);

        match self.marker.create() {
            Ok(()) => self.state.initialized = true,
            Err(e) => log::warn!(
                "Failed to record first-run marker {}: {}",
                self.marker.path().display(),
                e
            ),
        }
    }

    /// Write or remove the host descriptor without waiting for the result.
    pub fn set_autostart(&mut self, enabled: bool) {
        self.state.enabled = enabled;

        let (argv, verb) = if enabled {
            let script = write_script(&self.descriptor);
            (vec!["sh".to_string(), "-c".to_string(), script], "enable")
        } else {
            let argv = vec![
                "rm".to_string(),
                "-f".to_string(),
                path_arg(&self.descriptor.path()),
            ];
            (argv, "disable")
        };

        match self.bridge.spawn(&argv) {
            Ok(_) => log::info!(
                "Requested autostart {} ({})",
                verb,
                self.descriptor.path().display()
            ),
            Err(e) => log::error!("Failed to {} autostart on host: {}", verb, e),
        }
    }

    /// Switch handler. Never reverts the switch, even if the host command fails.
    pub fn on_toggled(&mut self, active: bool) {
        log::debug!("Autostart switch set to {}", active);
        self.set_autostart(active);
    }
}

/// Shell command that writes the descriptor via a temp file and rename.
fn write_script(descriptor: &AutostartDescriptor) -> String {
    let path = path_arg(&descriptor.path());
    let tmp = format!("{}.tmp", path);
    format!(
        "mkdir -p {} && printf '%s' {} > {} && mv -f {} {}",
        shell_quote(&path_arg(descriptor.dir())),
        shell_quote(&descriptor.content()),
        shell_quote(&tmp),
        shell_quote(&tmp),
        shell_quote(&path),
    )
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
