use super::consonants::replace_with;
use super::{
    apply_positional, apply_random_change, Change, PositionalChange, Replacement, WeightedRule,
};
use crate::inventory::{Inventory, Overrides};
use crate::sounds::Phoneme;
use crate::word::{Position, Root};
use crate::{DiachronResult, Language};
use rand::RngCore;
use smallvec::smallvec;
use strum_macros::EnumIter;

/// The ways sounds wear away at the edges of syllables and words.
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter)]
pub enum Erosion {
    /// Stops closing a syllable disappear before another consonant.
    CodaStops,
    IntervocalicH,
    /// [i] and [u] turn into glides before a vowel.
    GlideFormation,
    VoicelessObstruentVowels,
    /// Two vowels ending a word collapse into the long form of the first.
    FinalDiphthongs,
    FinalShortVowels,
    FinalShortening,
    FinalDevoicing,
}

impl Erosion {
    pub fn description(self) -> &'static str {
        match self {
            Erosion::CodaStops => "**Phonetic Erosion:** Coda stops were dropped when they were followed by a consonant.",
            Erosion::IntervocalicH => "**Phonetic Erosion:** [h] was dropped between vowels.",
            Erosion::GlideFormation => "**Phonetic Erosion:** [i] > [j] and [u] > [w] when followed by another vowel.",
            Erosion::VoicelessObstruentVowels => "**Phonetic Erosion:** Vowels were dropped between voiceless obstruents in unstressed syllables.",
            Erosion::FinalDiphthongs => "**Phonetic Erosion:** Diphthongs that occurred at the end of a word were simplified into the long-vowel form of the first vowel in the original diphthong.",
            Erosion::FinalShortVowels => "**Phonetic Erosion:** Short vowels that occurred as the last sound in a word were dropped.",
            Erosion::FinalShortening => "**Phonetic Erosion:** Long vowels that occurred as the last sound in a word became short vowels.",
            Erosion::FinalDevoicing => "**Phonetic Erosion:** Voiced consonants at the end of words became voiceless.",
        }
    }
}

/// Whether `at` sits `from_end` phonemes before the last phoneme of the word.
fn from_word_end(root: &Root, at: Position, from_end: usize) -> bool {
    let index = root.phoneme_index();
    index.len() > from_end && index[index.len() - 1 - from_end].0 == at
}

fn glide(phoneme: &'static Phoneme) -> &'static Phoneme {
    let symbol = match phoneme.symbol() {
        "i" => "j",
        "u" => "w",
        _ => return phoneme,
    };
    Inventory::global().lookup(symbol).unwrap_or(phoneme)
}

impl PositionalChange for Erosion {
    fn evaluate(&self, root: &Root, at: Position, phoneme: &'static Phoneme) -> bool {
        let [before, after] = root.neighbors(at);
        let vowel_before = before.is_some_and(|p| p.is_vowel());
        let vowel_after = after.is_some_and(|p| p.is_vowel());
        match self {
            Erosion::CodaStops => {
                phoneme.consonant().is_some_and(|c| c.is_stop())
                    && root
                        .syllables
                        .get(at.syllable)
                        .is_some_and(|s| s.in_coda(at.phoneme))
                    && after.is_some_and(|p| p.is_consonant())
            }
            Erosion::IntervocalicH => phoneme.symbol() == "h" && vowel_before && vowel_after,
            Erosion::GlideFormation => matches!(phoneme.symbol(), "i" | "u") && vowel_after,
            Erosion::VoicelessObstruentVowels => {
                phoneme.is_vowel()
                    && !root.stresses(at.syllable)
                    && before.is_some_and(|p| p.is_voiceless_obstruent())
                    && after.is_some_and(|p| p.is_voiceless_obstruent())
            }
            Erosion::FinalDiphthongs => {
                phoneme.is_vowel()
                    && ((from_word_end(root, at, 1) && vowel_after)
                        || (from_word_end(root, at, 0) && vowel_before))
            }
            Erosion::FinalShortVowels => {
                phoneme.is_vowel() && !phoneme.is_long_vowel() && root.is_word_final(at)
            }
            Erosion::FinalShortening => phoneme.is_long_vowel() && root.is_word_final(at),
            Erosion::FinalDevoicing => phoneme.is_voiced_consonant() && root.is_word_final(at),
        }
    }

    fn transform(&self, root: &Root, at: Position, phoneme: &'static Phoneme) -> Replacement {
        match self {
            Erosion::CodaStops
            | Erosion::IntervocalicH
            | Erosion::VoicelessObstruentVowels
            | Erosion::FinalShortVowels => smallvec![],
            Erosion::GlideFormation => smallvec![glide(phoneme)],
            Erosion::FinalDiphthongs if root.is_word_final(at) => smallvec![],
            Erosion::FinalDiphthongs => replace_with(phoneme, Overrides::long(true)),
            Erosion::FinalShortening => replace_with(phoneme, Overrides::long(false)),
            Erosion::FinalDevoicing => replace_with(phoneme, Overrides::voiced(false)),
        }
    }
}

pub fn erode(language: &Language, erosion: Erosion) -> DiachronResult<Change> {
    Ok(Change::new(
        erosion.description(),
        apply_positional(language, &erosion)?,
    ))
}

pub fn erosion_coda_stops(language: &Language, _: &mut dyn RngCore) -> DiachronResult<Change> {
    erode(language, Erosion::CodaStops)
}

pub fn erosion_intervocalic_h(language: &Language, _: &mut dyn RngCore) -> DiachronResult<Change> {
    erode(language, Erosion::IntervocalicH)
}

pub fn erosion_glide_formation(language: &Language, _: &mut dyn RngCore) -> DiachronResult<Change> {
    erode(language, Erosion::GlideFormation)
}

pub fn erosion_voiceless_obstruents(
    language: &Language,
    _: &mut dyn RngCore,
) -> DiachronResult<Change> {
    erode(language, Erosion::VoicelessObstruentVowels)
}

pub fn erosion_final_diphthongs(
    language: &Language,
    _: &mut dyn RngCore,
) -> DiachronResult<Change> {
    erode(language, Erosion::FinalDiphthongs)
}

pub fn erosion_final_short_vowels(
    language: &Language,
    _: &mut dyn RngCore,
) -> DiachronResult<Change> {
    erode(language, Erosion::FinalShortVowels)
}

pub fn erosion_final_shortening(
    language: &Language,
    _: &mut dyn RngCore,
) -> DiachronResult<Change> {
    erode(language, Erosion::FinalShortening)
}

pub fn erosion_final_devoicing(language: &Language, _: &mut dyn RngCore) -> DiachronResult<Change> {
    erode(language, Erosion::FinalDevoicing)
}

pub const EROSION: &[WeightedRule] = &[
    WeightedRule {
        name: "coda_stops",
        weight: 3,
        rule: erosion_coda_stops,
    },
    WeightedRule {
        name: "intervocalic_h",
        weight: 2,
        rule: erosion_intervocalic_h,
    },
    WeightedRule {
        name: "glide_formation",
        weight: 3,
        rule: erosion_glide_formation,
    },
    WeightedRule {
        name: "voiceless_obstruents",
        weight: 2,
        rule: erosion_voiceless_obstruents,
    },
    WeightedRule {
        name: "final_diphthongs",
        weight: 2,
        rule: erosion_final_diphthongs,
    },
    WeightedRule {
        name: "final_short_vowels",
        weight: 3,
        rule: erosion_final_short_vowels,
    },
    WeightedRule {
        name: "final_shortening",
        weight: 3,
        rule: erosion_final_shortening,
    },
    WeightedRule {
        name: "final_devoicing",
        weight: 3,
        rule: erosion_final_devoicing,
    },
];

pub fn phonetic_erosion(language: &Language, rng: &mut dyn RngCore) -> DiachronResult<Change> {
    apply_random_change(language, EROSION, rng)
}
