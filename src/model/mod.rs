mod action_phase;
mod autostart_entry;

pub use action_phase::*;
pub use autostart_entry::{AutostartDescriptor, AutostartState};
