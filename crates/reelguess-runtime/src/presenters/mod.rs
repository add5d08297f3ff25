//! Screen presenters. Each one owns a [`CancelScope`](reelguess_client::CancelScope)
//! so dismissing the screen (dropping or closing the presenter) cancels
//! whatever it still has in flight.

mod detail;
mod genre;
mod grid;
mod person;

pub use detail::{DetailPresenter, TitleCredits, TitleDetail};
pub use genre::GenrePresenter;
pub use grid::{Category, GridItem, GridOptions, GridPage, GridPresenter};
pub use person::{PersonCreditsView, PersonDetail, PersonPresenter};

use reelguess_engine::{hint_mask, is_correct_guess};
use reelguess_types::{EntityKey, GuessState, GuessStatus};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::Result;
use crate::services::Services;

/// Result of one guess attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessOutcome {
    pub correct: bool,
    pub status: GuessStatus,
    /// The answer, once it may be shown
    pub answer: Option<String>,
}

/// Guess actions shared by the title and person screens.
struct GuessActions {
    services: Services,
    key: EntityKey,
    answer: String,
}

impl GuessActions {
    fn state(&self) -> Result<GuessState> {
        self.services.store.state(self.key)
    }

    fn reveal(&self) -> Result<GuessStatus> {
        let record = self.services.store.mark_revealed(self.key)?;
        tracing::info!(key = %self.key, "answer revealed");
        Ok(record.state.status())
    }

    fn show_hint(&self) -> Result<String> {
        self.services.entitlements().require_upgrade()?;
        self.services.store.mark_hint_shown(self.key)?;
        Ok(hint_mask(&self.answer))
    }

    fn guess(&self, text: &str) -> Result<GuessOutcome> {
        let correct = is_correct_guess(text, &self.answer);
        let state = if correct {
            self.services.store.mark_correctly_guessed(self.key)?.state
        } else {
            self.state()?
        };
        tracing::debug!(key = %self.key, correct, "guess");
        Ok(GuessOutcome {
            correct,
            status: state.status(),
            answer: state.answer_visible().then(|| self.answer.clone()),
        })
    }

    fn toggle_favorite(&self) -> Result<bool> {
        self.services.store.toggle_favorite(self.key)
    }

    fn toggle_watchlist(&self) -> Result<bool> {
        self.services.store.toggle_watchlist(self.key)
    }
}

/// The answer as the screen may show it: plain once visible, `?` per
/// character before that.
fn shown_answer(answer: &str, state: &GuessState) -> String {
    if state.answer_visible() {
        answer.to_string()
    } else {
        reelguess_engine::censor_title(answer, answer)
    }
}

fn as_display<T, S>(value: &T, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    T: fmt::Display,
    S: Serializer,
{
    serializer.collect_str(value)
}
