use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

use crate::config::Config;

const FLATPAK_INFO: &str = "/.flatpak-info";

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("empty host command")]
    EmptyCommand,
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} exited with {}", describe_exit(.code))]
    Exit { program: String, code: Option<i32> },
    #[error("failed to wait for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("host command finished without reporting a result")]
    Disconnected,
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

pub type Outcome = Result<(), BridgeError>;

/// Receiving end of a host process that is still running.
pub struct Completion {
    rx: flume::Receiver<Outcome>,
}

pub struct CompletionSender {
    tx: flume::Sender<Outcome>,
}

impl Completion {
    pub fn channel() -> (CompletionSender, Completion) {
        let (tx, rx) = flume::bounded(1);
        (CompletionSender { tx }, Completion { rx })
    }

    /// Non-blocking. `None` while the process is still running.
    pub fn poll(&self) -> Option<Outcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(flume::TryRecvError::Empty) => None,
            Err(flume::TryRecvError::Disconnected) => Some(Err(BridgeError::Disconnected)),
        }
    }

    /// Block until the process has exited.
    pub fn wait(self) -> Outcome {
        self.rx.recv().unwrap_or(Err(BridgeError::Disconnected))
    }
}

impl CompletionSender {
    pub fn send(self, outcome: Outcome) {
        // Receiver may be gone for fire-and-forget commands.
        let _ = self.tx.send(outcome);
    }
}

/// Runs commands in the host namespace.
pub trait HostBridge {
    /// Run to completion, blocking. `Ok(true)` iff the command exited successfully.
    fn status(&self, argv: &[String]) -> Result<bool, BridgeError>;

    /// Start the command and return immediately.
    fn spawn(&self, argv: &[String]) -> Result<Completion, BridgeError>;
}

/// Host bridge that prefixes commands with an escape hatch such as
/// `flatpak-spawn --host`, or runs them directly when the prefix is empty.
#[derive(Debug, Clone)]
pub struct SandboxBridge {
    prefix: Vec<String>,
}

impl SandboxBridge {
    pub fn new(prefix: Vec<String>) -> Self {
        Self { prefix }
    }

    pub fn from_config(config: &Config) -> Self {
        match &config.host_bridge {
            Some(prefix) => Self::new(prefix.clone()),
            None => Self::detect(),
        }
    }

    pub fn detect() -> Self {
        if Path::new(FLATPAK_INFO).exists() {
            log::info!("Running inside Flatpak, host commands go through flatpak-spawn");
            Self::new(vec!["flatpak-spawn".into(), "--host".into()])
        } else {
            log::info!("No sandbox detected, running host commands directly");
            Self::new(Vec::new())
        }
    }

    fn command(&self, argv: &[String]) -> Result<(Command, String), BridgeError> {
        if argv.is_empty() {
            return Err(BridgeError::EmptyCommand);
        }
        let mut full = self.prefix.iter().chain(argv.iter());
        let program = full.next().ok_or(BridgeError::EmptyCommand)?;
        let mut cmd = Command::new(program);
        cmd.args(full).stdin(Stdio::null());
        Ok((cmd, program.clone()))
    }
}

impl HostBridge for SandboxBridge {
    fn status(&self, argv: &[String]) -> Result<bool, BridgeError> {
        let (mut cmd, program) = self.command(argv)?;
        let status = cmd
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| BridgeError::Spawn { program, source })?;
        Ok(status.success())
    }

    fn spawn(&self, argv: &[String]) -> Result<Completion, BridgeError> {
        self.spawn_with(argv, |waiter| {
            thread::Builder::new()
                .name("host-wait".into())
                .spawn(waiter)
                .map(|_| ())
        })
    }
}

type Waiter = Box<dyn FnOnce() + Send + 'static>;

impl SandboxBridge {
    /// The child is started on the waiter thread itself, so a waiter that
    /// cannot be started never leaves an unreaped process behind.
    fn spawn_with<F>(&self, argv: &[String], start_waiter: F) -> Result<Completion, BridgeError>
    where
        F: FnOnce(Waiter) -> io::Result<()>,
    {
        let (mut cmd, program) = self.command(argv)?;
        let host_program = argv[0].clone();
        let (tx, completion) = Completion::channel();
        let (started_tx, started_rx) = flume::bounded::<io::Result<()>>(1);

        let waiter: Waiter = Box::new(move || {
            let mut child = match cmd.spawn() {
                Ok(child) => {
                    let _ = started_tx.send(Ok(()));
                    child
                }
                Err(e) => {
                    let _ = started_tx.send(Err(e));
                    return;
                }
            };

            let outcome = match child.wait() {
                Ok(status) if status.success() => Ok(()),
                Ok(status) => {
                    log::warn!("Host command {} exited with {}", host_program, status);
                    Err(BridgeError::Exit {
                        program: host_program,
                        code: status.code(),
                    })
                }
                Err(source) => {
                    log::warn!("Failed to wait for host command {}: {}", host_program, source);
                    Err(BridgeError::Wait {
                        program: host_program,
                        source,
                    })
                }
            };
            tx.send(outcome);
        });

        start_waiter(waiter).map_err(|source| BridgeError::Spawn {
            program: program.clone(),
            source,
        })?;

        match started_rx.recv() {
            Ok(Ok(())) => Ok(completion),
            Ok(Err(source)) => Err(BridgeError::Spawn { program, source }),
            Err(_) => Err(BridgeError::Disconnected),
        }
    }
}
