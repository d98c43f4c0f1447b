//! User controls: the inference-mode toggle and the assistant button.
//!
//! Neither control changes any generator. Each only yields a notification
//! for the display to show.

use serde::Serialize;

/// Fixed reply of the assistant button.
pub const ASSISTANT_MESSAGE: &str =
    "AstroAI: All systems are optimal. I am analyzing the environmental data.";

/// Where forecasts are nominally computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InferenceMode {
    #[default]
    LocalEdge,
    Cloud,
}

impl InferenceMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::LocalEdge => Self::Cloud,
            Self::Cloud => Self::LocalEdge,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::LocalEdge => "Local Edge",
            Self::Cloud => "Cloud Inference",
        }
    }

    /// Notification text announcing a switch into this mode.
    pub fn switch_message(self) -> String {
        format!("Switched to {} Model.", self.label())
    }
}

impl std::fmt::Display for InferenceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
