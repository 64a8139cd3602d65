use serde::{Deserialize, Serialize};

/// How far a session has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No evidence yet.
    Initial,
    /// Evidence present, no candidate above the confidence threshold.
    Investigating,
    /// Top candidate at or above the confidence threshold.
    Confident,
    /// Closed; evidence is rejected and the diagnosis is frozen.
    Concluded,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Investigating => "investigating",
            Self::Confident => "confident",
            Self::Concluded => "concluded",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Concluded)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
