use crate::backend::host_bridge::{Completion, HostBridge, Outcome};
use crate::config::Config;
use crate::model::ActionPhase;

/// Runs the host setup script with elevated rights, one attempt at a time.
///
/// `Idle -> Running -> Succeeded` is final. `Running -> Failed -> Running`
/// repeats for as long as the user retries.
pub struct PrivilegedRunner<B: HostBridge> {
    bridge: B,
    argv: Vec<String>,
    phase: ActionPhase,
}

impl<B: HostBridge> PrivilegedRunner<B> {
    pub fn new(bridge: B, argv: Vec<String>) -> Self {
        Self {
            bridge,
            argv,
            phase: ActionPhase::Idle,
        }
    }

    pub fn from_config(bridge: B, config: &Config) -> Self {
        let mut argv = config.elevation.clone();
        argv.push("sh".into());
        argv.push("-c".into());
        argv.push(config.setup_script.to_string_lossy().into_owned());
        Self::new(bridge, argv)
    }

    pub fn phase(&self) -> ActionPhase {
        self.phase
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    /// Launch the action. Returns the pending completion, or `None` when the
    /// trigger is not allowed or the process could not be started.
    pub fn trigger(&mut self) -> Option<Completion> {
        if !self.phase.can_trigger() {
            log::debug!("Ignoring privileged action trigger while {}", self.phase);
            return None;
        }

        log::info!("Launching privileged action: {}", self.argv().join(" "));
        match self.bridge.spawn(&self.argv) {
            Ok(completion) => {
                self.phase = ActionPhase::Running;
                Some(completion)
            }
            Err(e) => {
                log::error!("Failed to launch privileged action: {}", e);
                None
            }
        }
    }

    /// Apply the outcome of the running attempt. Returns the new phase.
    pub fn complete(&mut self, outcome: Outcome) -> ActionPhase {
        if self.phase != ActionPhase::Running {
            log::warn!("Ignoring privileged action result while {}", self.phase);
            return self.phase;
        }

        self.phase = match outcome {
            Ok(()) => {
                log::info!("Privileged action succeeded");
                ActionPhase::Succeeded
            }
            Err(e) => {
                log::error!("Privileged action failed: {}", e);
                ActionPhase::Failed
            }
        };
        self.phase
    }
}
