use crate::sound_change::{change, Change};
use crate::{DiachronError, DiachronResult, Language};
use rand::RngCore;
use std::io;

/// A simulation run: the language it started from, what each step did, and the words after each
/// step. `stages[0]` holds the original words.
#[derive(Debug, Clone)]
pub struct History {
    pub language: Language,
    current: Language,
    pub log: Vec<String>,
    pub stages: Vec<Vec<String>>,
}

impl History {
    pub fn new(language: Language) -> Self {
        Self {
            current: language.clone(),
            log: vec![],
            stages: vec![language.words.clone()],
            language,
        }
    }

    /// The language as it stands after the latest step.
    pub fn current(&self) -> &Language {
        &self.current
    }

    /// Applies one random change to the current language and records it.
    pub fn step(&mut self, rng: &mut dyn RngCore) -> DiachronResult<Change> {
        let change = change(&self.current, rng)?;
        let next = Language::from_words(change.words.clone())?;
        log::debug!("step {}: {}", self.log.len() + 1, change.description);
        self.current = next;
        self.log.push(change.description.clone());
        self.stages.push(change.words.clone());
        Ok(change)
    }

    pub fn steps(&mut self, count: usize, rng: &mut dyn RngCore) -> DiachronResult<Language> {
        for _ in 0..count {
            self.step(rng)?;
        }
        Ok(self.current.clone())
    }

    /// One column per stage, one row per word.
    pub fn to_csv(&self) -> DiachronResult<String> {
        let mut writer = csv::Writer::from_writer(vec![]);
        let headers = std::iter::once("Original".to_string())
            .chain((1..self.stages.len()).map(|i| format!("Change {}", i)));
        writer.write_record(headers)?;
        let rows = self.stages.first().map(Vec::len).unwrap_or(0);
        for row in 0..rows {
            writer.write_record(
                self.stages
                    .iter()
                    .map(|stage| stage.get(row).map(String::as_str).unwrap_or("")),
            )?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| DiachronError::Io(e.into_error()))?;
        String::from_utf8(bytes)
            .map_err(|e| DiachronError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    pub fn to_markdown(&self) -> String {
        self.log
            .iter()
            .map(|description| format!("- {}\n", description))
            .collect()
    }
}
