pub mod autostart;
pub mod host_bridge;
pub mod host_queue;
pub mod privileged;

#[cfg(test)]
mod test_bridge;

pub use autostart::AutostartController;
pub use host_bridge::{HostBridge, SandboxBridge};
pub use host_queue::HostQueue;
pub use privileged::PrivilegedRunner;
