use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use super::host_bridge::{BridgeError, Completion, CompletionSender, HostBridge, Outcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Status(Vec<String>),
    Spawn(Vec<String>),
}

#[derive(Default)]
struct Inner {
    calls: Vec<Call>,
    host_status: bool,
    status_fails: bool,
    spawn_failures: usize,
    pending: VecDeque<CompletionSender>,
}

/// Records every host command and lets tests finish spawned ones by hand.
#[derive(Clone, Default)]
pub struct RecordingBridge {
    inner: Rc<RefCell<Inner>>,
}

impl RecordingBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_host_status(&self, ok: bool) {
        self.inner.borrow_mut().host_status = ok;
    }

    pub fn set_status_fails(&self, fails: bool) {
        self.inner.borrow_mut().status_fails = fails;
    }

    pub fn fail_next_spawns(&self, count: usize) {
        self.inner.borrow_mut().spawn_failures = count;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.borrow().calls.clone()
    }

    pub fn spawned(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Spawn(argv) => Some(argv),
                Call::Status(_) => None,
            })
            .collect()
    }

    /// Deliver the outcome of the oldest running spawn.
    pub fn finish_next(&self, outcome: Outcome) {
        let sender = self
            .inner
            .borrow_mut()
            .pending
            .pop_front()
            .expect("no spawned command is running");
        sender.send(outcome);
    }

    /// Drop the oldest running spawn's sender without a result.
    pub fn abandon_next(&self) {
        self.inner.borrow_mut().pending.pop_front();
    }
}

impl HostBridge for RecordingBridge {
    fn status(&self, argv: &[String]) -> Result<bool, BridgeError> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(Call::Status(argv.to_vec()));
        if inner.status_fails {
            return Err(BridgeError::Spawn {
                program: "flatpak-spawn".into(),
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }
        Ok(inner.host_status)
    }

    fn spawn(&self, argv: &[String]) -> Result<Completion, BridgeError> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(Call::Spawn(argv.to_vec()));
        if inner.spawn_failures > 0 {
            inner.spawn_failures -= 1;
            return Err(BridgeError::Spawn {
                program: argv[0].clone(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            });
        }
        let (tx, completion) = Completion::channel();
        inner.pending.push_back(tx);
        Ok(completion)
    }
}

pub fn exit_failure(program: &str) -> Outcome {
    Err(BridgeError::Exit {
        program: program.into(),
        code: Some(1),
    })
}
