use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Locally tracked guess state for one entity.
///
/// `revealed` and `correctly_guessed` are independent flags. Both only ever
/// move from false to true.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessState {
    pub revealed: bool,
    pub correctly_guessed: bool,
    pub hint_shown: bool,
    pub favorite: bool,
    pub watchlist: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_viewed_at: Option<DateTime<Utc>>,
}

impl GuessState {
    pub fn status(&self) -> GuessStatus {
        GuessStatus::from_flags(self.revealed, self.correctly_guessed)
    }

    /// Whether the answer may be shown without censoring.
    pub fn answer_visible(&self) -> bool {
        self.revealed || self.correctly_guessed
    }
}

/// Three-valued status shown on grid cells and detail screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuessStatus {
    #[default]
    Hidden,
    Revealed,
    Guessed,
}

impl GuessStatus {
    pub fn from_flags(revealed: bool, correctly_guessed: bool) -> Self {
        if correctly_guessed {
            GuessStatus::Guessed
        } else if revealed {
            GuessStatus::Revealed
        } else {
            GuessStatus::Hidden
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GuessStatus::Hidden => "hidden",
            GuessStatus::Revealed => "revealed",
            GuessStatus::Guessed => "guessed",
        }
    }
}

impl std::fmt::Display for GuessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
