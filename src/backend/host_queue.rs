use std::thread;

use crate::backend::host_bridge::{BridgeError, Completion, CompletionSender, HostBridge};

struct Job {
    argv: Vec<String>,
    done: CompletionSender,
}

/// Runs spawned host commands one after another on a single worker thread.
///
/// `spawn` still returns immediately, but a command only starts once the one
/// queued before it has exited. Status checks go straight to the inner bridge.
#[derive(Clone)]
pub struct HostQueue<B> {
    inner: B,
    tx: flume::Sender<Job>,
}

impl<B: HostBridge + Clone + Send + 'static> HostQueue<B> {
    pub fn new(inner: B) -> Self {
        let (tx, rx) = flume::unbounded::<Job>();
        let worker_bridge = inner.clone();
        let started = thread::Builder::new()
            .name("host-queue".into())
            .spawn(move || run(worker_bridge, rx));
        if let Err(e) = started {
            // rx went down with the closure, so every spawn reports Disconnected.
            log::error!("Failed to start host command queue: {}", e);
        }
        Self { inner, tx }
    }
}

fn run<B: HostBridge>(bridge: B, rx: flume::Receiver<Job>) {
    for job in rx.iter() {
        let outcome = match bridge.spawn(&job.argv) {
            Ok(completion) => completion.wait(),
            Err(e) => {
                log::error!("Failed to start queued host command {}: {}", job.argv[0], e);
                Err(e)
            }
        };
        job.done.send(outcome);
    }
    log::debug!("Host command queue closed, shutting down");
}

impl<B: HostBridge> HostBridge for HostQueue<B> {
    fn status(&self, argv: &[String]) -> Result<bool, BridgeError> {
        self.inner.status(argv)
    }

    fn spawn(&self, argv: &[String]) -> Result<Completion, BridgeError> {
        if argv.is_empty() {
            return Err(BridgeError::EmptyCommand);
        }
        let (done, completion) = Completion::channel();
        self.tx
            .send(Job {
                argv: argv.to_vec(),
                done,
            })
            .map_err(|_| BridgeError::Disconnected)?;
        Ok(completion)
    }
}
