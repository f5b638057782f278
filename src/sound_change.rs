//! Sound changes over a whole word list.
//!
//! Positional rules implement [`PositionalChange`]: every phoneme of a word is visited left to
//! right, and the ones that pass are replaced by zero or more phonemes. Each test sees the word
//! with the replacements made so far in the same pass. Once every position is visited,
//! [`Root::rebuild`] repairs the syllable structure.

use crate::sounds::Phoneme;
use crate::utils::weighted_choices;
use crate::word::{Position, Root};
use crate::{DiachronResult, Language};
use rand::prelude::SliceRandom;
use rand::RngCore;
use smallvec::SmallVec;

pub use consonants::*;
pub use erosion::*;
pub use syllables::*;
pub use vowels::*;

mod consonants;
mod erosion;
mod syllables;
mod vowels;

/// What a phoneme turns into. Empty deletes it.
pub type Replacement = SmallVec<[&'static Phoneme; 2]>;

pub type RuleFn = fn(&Language, &mut dyn RngCore) -> DiachronResult<Change>;

pub const NO_CHANGE: &str = "No change.";

/// The outcome of one rule: what happened, and the new word list in the original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub description: String,
    pub words: Vec<String>,
}

impl Change {
    pub fn new(description: impl Into<String>, words: Vec<String>) -> Self {
        Self {
            description: description.into(),
            words,
        }
    }

    pub fn unchanged(language: &Language) -> Self {
        Self::new(NO_CHANGE, language.words.clone())
    }
}

pub trait PositionalChange {
    fn evaluate(&self, root: &Root, at: Position, phoneme: &'static Phoneme) -> bool;

    fn transform(&self, root: &Root, at: Position, phoneme: &'static Phoneme) -> Replacement;
}

/// A positional rule made of two closures.
pub struct FnChange<E, T> {
    evaluator: E,
    transformer: T,
}

impl<E, T> FnChange<E, T>
where
    E: Fn(&Root, Position, &'static Phoneme) -> bool,
    T: Fn(&Root, Position, &'static Phoneme) -> Replacement,
{
    pub fn new(evaluator: E, transformer: T) -> Self {
        Self {
            evaluator,
            transformer,
        }
    }
}

impl<E, T> PositionalChange for FnChange<E, T>
where
    E: Fn(&Root, Position, &'static Phoneme) -> bool,
    T: Fn(&Root, Position, &'static Phoneme) -> Replacement,
{
    fn evaluate(&self, root: &Root, at: Position, phoneme: &'static Phoneme) -> bool {
        (self.evaluator)(root, at, phoneme)
    }

    fn transform(&self, root: &Root, at: Position, phoneme: &'static Phoneme) -> Replacement {
        (self.transformer)(root, at, phoneme)
    }
}

pub fn apply_change<E, T>(
    language: &Language,
    evaluator: E,
    transformer: T,
) -> DiachronResult<Vec<String>>
where
    E: Fn(&Root, Position, &'static Phoneme) -> bool,
    T: Fn(&Root, Position, &'static Phoneme) -> Replacement,
{
    apply_positional(language, &FnChange::new(evaluator, transformer))
}

pub fn apply_positional<C: PositionalChange + ?Sized>(
    language: &Language,
    rule: &C,
) -> DiachronResult<Vec<String>> {
    language
        .words
        .iter()
        .map(|word| transform_word(word, rule))
        .collect()
}

pub fn transform_word<C: PositionalChange + ?Sized>(
    word: &str,
    rule: &C,
) -> DiachronResult<String> {
    let mut root = Root::parse(word)?;
    for si in 0..root.syllables.len() {
        let parsed = std::mem::take(&mut root.syllables[si].phonemes);
        let mut rewritten: Vec<&'static Phoneme> = Vec::with_capacity(parsed.len());
        for (pi, &phoneme) in parsed.iter().enumerate() {
            // Already rewritten phonemes, then the rest of the syllable as parsed.
            root.syllables[si].phonemes = rewritten.iter().chain(&parsed[pi..]).copied().collect();
            let at = Position::new(si, rewritten.len());
            if rule.evaluate(&root, at, phoneme) {
                rewritten.extend(rule.transform(&root, at, phoneme));
            } else {
                rewritten.push(phoneme);
            }
        }
        root.syllables[si].phonemes = rewritten;
    }
    let rebuilt = root.rebuild();
    if rebuilt != word {
        log::trace!("{} > {}", word, rebuilt);
    }
    Ok(rebuilt)
}

#[derive(Clone, Copy)]
pub struct WeightedRule {
    pub name: &'static str,
    pub weight: usize,
    pub rule: RuleFn,
}

impl std::fmt::Debug for WeightedRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.weight)
    }
}

/// Draws one rule, each as likely as its weight, and applies it.
pub fn apply_random_change(
    language: &Language,
    choices: &[WeightedRule],
    rng: &mut dyn RngCore,
) -> DiachronResult<Change> {
    let weighted = weighted_choices(choices.iter().map(|c| (c, c.weight)));
    match weighted.choose(rng) {
        Some(choice) => {
            log::debug!("applying {}", choice.name);
            (choice.rule)(language, rng)
        }
        None => Ok(Change::unchanged(language)),
    }
}

pub const RULES: &[WeightedRule] = &[
    WeightedRule {
        name: "devoicing",
        weight: 8,
        rule: devoicing,
    },
    WeightedRule {
        name: "devoicing_assimilation",
        weight: 6,
        rule: devoicing_assimilation,
    },
    WeightedRule {
        name: "haplology",
        weight: 2,
        rule: haplology,
    },
    WeightedRule {
        name: "labial_assimilation",
        weight: 4,
        rule: labial_assimilation,
    },
    WeightedRule {
        name: "metathesis",
        weight: 2,
        rule: metathesis,
    },
    WeightedRule {
        name: "nasal_assimilation",
        weight: 4,
        rule: nasal_assimilation,
    },
    WeightedRule {
        name: "palatalization",
        weight: 5,
        rule: palatalization,
    },
    WeightedRule {
        name: "phonetic_erosion",
        weight: 12,
        rule: phonetic_erosion,
    },
    WeightedRule {
        name: "velar_assimilation",
        weight: 4,
        rule: velar_assimilation,
    },
    WeightedRule {
        name: "voicing",
        weight: 6,
        rule: voicing,
    },
    WeightedRule {
        name: "voicing_assimilation",
        weight: 6,
        rule: voicing_assimilation,
    },
    WeightedRule {
        name: "vowel_backing",
        weight: 6,
        rule: vowel_backing,
    },
    WeightedRule {
        name: "vowel_fronting",
        weight: 6,
        rule: vowel_fronting,
    },
    WeightedRule {
        name: "vowel_lengthening",
        weight: 8,
        rule: vowel_lengthening,
    },
    WeightedRule {
        name: "vowel_lowering",
        weight: 7,
        rule: vowel_lowering,
    },
    WeightedRule {
        name: "vowel_raising",
        weight: 7,
        rule: vowel_raising,
    },
    WeightedRule {
        name: "vowel_shortening",
        weight: 8,
        rule: vowel_shortening,
    },
    WeightedRule {
        name: "vowel_splitting",
        weight: 8,
        rule: vowel_splitting,
    },
];

/// One generation of drift: a single rule drawn from the full registry.
pub fn change(language: &Language, rng: &mut dyn RngCore) -> DiachronResult<Change> {
    apply_random_change(language, RULES, rng)
}
