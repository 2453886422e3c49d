use std::sync::Arc;
use tracing::debug;

use atlas_core::model::{Country, CountryCode};
use atlas_core::quiz::{self, QuizQuestion};
use source::repository::CountrySource;

use crate::error::GuessError;

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Deals rounds of the guess-the-flag game from an injected country source.
#[derive(Clone)]
pub struct GuessFlagService {
    source: Arc<dyn CountrySource>,
}

impl GuessFlagService {
    #[must_use]
    pub fn new(source: Arc<dyn CountrySource>) -> Self {
        Self { source }
    }

    /// Deal a fresh round.
    ///
    /// # Errors
    ///
    /// Returns `GuessError::Source` when the snapshot fetch fails, or
    /// `GuessError::Quiz` when the collection is too small for a question.
    /// Neither is retried here; the caller decides whether to refetch or
    /// disable the game.
    pub async fn next_round(&self) -> Result<GuessRound, GuessError> {
        let countries = self.source.list_all().await?;
        let question = quiz::draw_question(&countries)?;
        debug!(correct = %question.correct().code(), "dealt guess-the-flag round");
        Ok(GuessRound::new(question))
    }
}

//
// ─── ROUND STATE ───────────────────────────────────────────────────────────────
//

/// Result of an answered round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Incorrect { correct: CountryCode },
}

/// One round of the game: the dealt question plus the player's selection.
///
/// Transitions are pure and return a new round, so the UI can diff states.
/// A round answers at most once; after that, selections are ignored until
/// [`GuessRound::try_again`] clears the slate for another attempt at the
/// same question.
#[derive(Debug, Clone, PartialEq)]
pub struct GuessRound {
    question: QuizQuestion<Country>,
    selected: Option<CountryCode>,
}

impl GuessRound {
    #[must_use]
    pub fn new(question: QuizQuestion<Country>) -> Self {
        Self {
            question,
            selected: None,
        }
    }

    #[must_use]
    pub fn question(&self) -> &QuizQuestion<Country> {
        &self.question
    }

    #[must_use]
    pub fn selected(&self) -> Option<&CountryCode> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.selected.is_some()
    }

    /// Select an answer. Ignored when the round is already answered or the
    /// code is not one of the offered options.
    #[must_use]
    pub fn select(&self, answer: CountryCode) -> Self {
        if self.selected.is_some() {
            return self.clone();
        }
        let offered = self
            .question
            .options()
            .iter()
            .any(|option| option.code() == &answer);
        if !offered {
            return self.clone();
        }
        Self {
            question: self.question.clone(),
            selected: Some(answer),
        }
    }

    /// Clear the selection for another attempt at the same question.
    #[must_use]
    pub fn try_again(&self) -> Self {
        Self {
            question: self.question.clone(),
            selected: None,
        }
    }

    /// The outcome, once answered.
    #[must_use]
    pub fn outcome(&self) -> Option<GuessOutcome> {
        let selected = self.selected.as_ref()?;
        if self.question.is_correct(selected) {
            Some(GuessOutcome::Correct)
        } else {
            Some(GuessOutcome::Incorrect {
                correct: self.question.correct().code().clone(),
            })
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
