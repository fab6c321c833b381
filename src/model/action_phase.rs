/// Status of the one privileged action. Never returns to `Idle` once left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActionPhase {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

pub const SUGGESTED_CLASS: &str = "suggested-action";
pub const DESTRUCTIVE_CLASS: &str = "destructive-action";

/// What the trigger button should look like for a given phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonView {
    pub label: &'static str,
    pub sensitive: bool,
    pub css_class: Option<&'static str>,
}

impl ActionPhase {
    pub fn can_trigger(self) -> bool {
        matches!(self, ActionPhase::Idle | ActionPhase::Failed)
    }

    pub fn view(self) -> ButtonView {
        match self {
            ActionPhase::Idle => ButtonView {
                label: "Set Up Hibernation",
                sensitive: true,
                css_class: Some(SUGGESTED_CLASS),
            },
            ActionPhase::Running => ButtonView {
                label: "Setting up...",
                sensitive: false,
                css_class: Some(SUGGESTED_CLASS),
            },
            ActionPhase::Succeeded => ButtonView {
                label: "Setup Complete ✅",
                sensitive: false,
                css_class: None,
            },
            ActionPhase::Failed => ButtonView {
                label: "Setup Failed ❌",
                sensitive: true,
                css_class: Some(DESTRUCTIVE_CLASS),
            },
        }
    }
}

impl std::fmt::Display for ActionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionPhase::Idle => write!(f, "idle"),
            ActionPhase::Running => write!(f, "running"),
            ActionPhase::Succeeded => write!(f, "succeeded"),
            ActionPhase::Failed => write!(f, "failed"),
        }
    }
}
