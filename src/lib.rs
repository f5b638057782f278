#![warn(clippy::all, rust_2018_idioms)]

mod generation;
pub mod history;
pub mod inventory;
pub mod language;
mod raw_data;
pub mod sound_change;
pub mod sounds;
mod utils;
pub mod word;

pub use generation::{GenerationSettings, WordGen};
pub use history::History;
pub use inventory::Inventory;
pub use language::{Language, Phonology, Phonotactics, Stress};
pub use sound_change::{change, Change};
pub use utils::{oxford_comma, weighted_choices};
pub use word::{Position, Root, Syllable};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiachronError {
    #[error("unrecognized IPA sequence at the start of {remainder:?} in {word}")]
    Decode { word: String, remainder: String },
    #[error("{value:?} is not a valid {feature}. Choose one of: {choices}")]
    InvalidFeature {
        feature: &'static str,
        value: String,
        choices: String,
    },
    #[error("malformed phoneme table: {0}")]
    Table(String),
    #[error("the phonotactics have no nucleus to build a syllable around")]
    EmptyNucleus,
    #[error("no new word found after {0} attempts")]
    GenerationExhausted(usize),
    #[error("invalid generation settings: {0}")]
    InvalidSettings(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DiachronError {
    /// Points a decode failure at the whole transcription it came from.
    pub(crate) fn in_word(self, word: &str) -> Self {
        match self {
            DiachronError::Decode { remainder, .. } => DiachronError::Decode {
                word: word.to_string(),
                remainder,
            },
            other => other,
        }
    }
}

pub type DiachronResult<T> = Result<T, DiachronError>;

#[cfg(test)]
pub(crate) mod testing {
    use crate::{Language, Phonology, Phonotactics};

    pub(crate) fn language(
        onset: &[(&str, usize)],
        nucleus: &[(&str, usize)],
        coda: &[(&str, usize)],
        words: &[&str],
    ) -> Language {
        Language::new(
            Phonotactics::new(onset, nucleus, coda),
            Phonology::default(),
            words.iter().map(|w| w.to_string()).collect(),
        )
    }

    pub(crate) fn words(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }
}
