//! Reasoning modes.
//!
//! A mode picks the persona and rule set used to build the prompt. It has
//! no other effect on request handling.

use serde::{Deserialize, Serialize};

/// The closed set of recognized reasoning profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// General-purpose assistant
    #[default]
    General,
    /// Financial reasoning over masked payment data
    PrivateFinance,
    /// Step-by-step tutoring
    Learning,
}

impl Mode {
    /// Every mode, in registry order.
    pub const ALL: [Mode; 3] = [Mode::General, Mode::PrivateFinance, Mode::Learning];

    /// The wire identifier for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::General => "general",
            Mode::PrivateFinance => "private_finance",
            Mode::Learning => "learning",
        }
    }

    /// Exact, case-sensitive lookup of a wire identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
