use super::{apply_positional, Change, PositionalChange, Replacement};
use crate::inventory::{Inventory, Overrides};
use crate::sounds::{Manner, Phoneme, Place};
use crate::utils::oxford_comma;
use crate::word::{Position, Root};
use crate::{DiachronResult, Language};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use smallvec::smallvec;

pub const DEVOICING: &str =
    "**Devoicing:** Voiced consonants became voiceless at the end of words or next to voiceless consonants.";
pub const DEVOICING_ASSIMILATION: &str =
    "**Devoicing Assimilation:** Voiced consonants became voiceless when they occurred next to voiceless consonants.";
pub const VOICING_ASSIMILATION: &str =
    "**Voicing Assimilation:** Voiceless consonants became voiced when they occurred next to voiced consonants.";
pub const VOICING: &str = "**Voicing:** Unvoiced consonants became voiced between vowels.";
pub const METATHESIS: &str =
    "**Metathesis:** Adjacent sibilant and stop consonants swapped positions in stressed syllables when they were preceded by a vowel.";

/// Places that front vowels can pull toward the palate, in description order.
pub const PALATALIZATION_PLACES: [Place; 3] = [Place::Dental, Place::AlveolarCentral, Place::Velar];

pub(super) fn counterpart(
    phoneme: &'static Phoneme,
    overrides: Overrides,
) -> Option<&'static Phoneme> {
    Inventory::global().find_similar(phoneme, overrides)
}

pub(super) fn replace_with(phoneme: &'static Phoneme, overrides: Overrides) -> Replacement {
    smallvec![counterpart(phoneme, overrides).unwrap_or(phoneme)]
}

fn next_to(root: &Root, at: Position, test: impl Fn(&Phoneme) -> bool) -> bool {
    root.neighbors(at).into_iter().flatten().any(test)
}

fn title(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Voiced consonants lose their voicing word-finally and beside voiceless consonants.
pub struct Devoicing;

impl PositionalChange for Devoicing {
    fn evaluate(&self, root: &Root, at: Position, phoneme: &'static Phoneme) -> bool {
        phoneme.is_voiced_consonant()
            && (root.is_word_final(at) || next_to(root, at, Phoneme::is_voiceless_consonant))
    }

    fn transform(&self, _: &Root, _: Position, phoneme: &'static Phoneme) -> Replacement {
        replace_with(phoneme, Overrides::voiced(false))
    }
}

pub fn devoicing(language: &Language, _: &mut dyn RngCore) -> DiachronResult<Change> {
    Ok(Change::new(DEVOICING, apply_positional(language, &Devoicing)?))
}

/// A consonant takes the voicing of a neighboring consonant, if the language already has the
/// result.
pub struct VoicingAssimilation {
    pub voiced: bool,
    pub inventory: Vec<&'static Phoneme>,
}

impl VoicingAssimilation {
    pub fn for_language(language: &Language, voiced: bool) -> DiachronResult<Self> {
        let (inventory, _) = language.take_inventory()?;
        Ok(Self { voiced, inventory })
    }

    fn target(&self, phoneme: &'static Phoneme) -> Option<&'static Phoneme> {
        counterpart(phoneme, Overrides::voiced(self.voiced)).filter(|p| self.inventory.contains(p))
    }
}

impl PositionalChange for VoicingAssimilation {
    fn evaluate(&self, root: &Root, at: Position, phoneme: &'static Phoneme) -> bool {
        let Some(consonant) = phoneme.consonant() else {
            return false;
        };
        consonant.voiced != self.voiced
            && next_to(root, at, |p| {
                p.consonant().is_some_and(|c| c.voiced == self.voiced)
            })
            && self.target(phoneme).is_some()
    }

    fn transform(&self, _: &Root, _: Position, phoneme: &'static Phoneme) -> Replacement {
        smallvec![self.target(phoneme).unwrap_or(phoneme)]
    }
}

pub fn devoicing_assimilation(language: &Language, _: &mut dyn RngCore) -> DiachronResult<Change> {
    let rule = VoicingAssimilation::for_language(language, false)?;
    Ok(Change::new(DEVOICING_ASSIMILATION, apply_positional(language, &rule)?))
}

pub fn voicing_assimilation(language: &Language, _: &mut dyn RngCore) -> DiachronResult<Change> {
    let rule = VoicingAssimilation::for_language(language, true)?;
    Ok(Change::new(VOICING_ASSIMILATION, apply_positional(language, &rule)?))
}

/// Voiceless consonants between two vowels become voiced.
pub struct Voicing;

impl PositionalChange for Voicing {
    fn evaluate(&self, root: &Root, at: Position, phoneme: &'static Phoneme) -> bool {
        let [before, after] = root.neighbors(at);
        phoneme.is_voiceless_consonant()
            && before.is_some_and(|p| p.is_vowel())
            && after.is_some_and(|p| p.is_vowel())
    }

    fn transform(&self, _: &Root, _: Position, phoneme: &'static Phoneme) -> Replacement {
        replace_with(phoneme, Overrides::voiced(true))
    }
}

pub fn voicing(language: &Language, _: &mut dyn RngCore) -> DiachronResult<Change> {
    Ok(Change::new(VOICING, apply_positional(language, &Voicing)?))
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Feature {
    Place(Place),
    Manner(Manner),
}

impl Feature {
    fn holds(self, phoneme: &Phoneme) -> bool {
        match (self, phoneme.consonant()) {
            (Feature::Place(place), Some(c)) => c.place == place,
            (Feature::Manner(manner), Some(c)) => c.manner == manner,
            _ => false,
        }
    }

    fn overrides(self) -> Overrides {
        match self {
            Feature::Place(place) => Overrides::place(place),
            Feature::Manner(manner) => Overrides::manner(manner),
        }
    }

    fn name(self) -> String {
        match self {
            Feature::Place(place) => place.to_string(),
            Feature::Manner(manner) => manner.to_string(),
        }
    }
}

/// A consonant takes a place or manner from a neighboring consonant, if the language already
/// has the result.
pub struct Assimilation {
    pub feature: Feature,
    pub inventory: Vec<&'static Phoneme>,
}

impl Assimilation {
    pub fn for_language(language: &Language, feature: Feature) -> DiachronResult<Self> {
        let (inventory, _) = language.take_inventory()?;
        Ok(Self { feature, inventory })
    }

    fn target(&self, phoneme: &'static Phoneme) -> Option<&'static Phoneme> {
        counterpart(phoneme, self.feature.overrides()).filter(|p| self.inventory.contains(p))
    }

    pub fn description(&self) -> String {
        let name = self.feature.name();
        format!(
            "**{} Assimilation:** Non-{name} consonants became {name} consonants when they occurred next to {name} consonants.",
            title(&name),
            name = name
        )
    }
}

impl PositionalChange for Assimilation {
    fn evaluate(&self, root: &Root, at: Position, phoneme: &'static Phoneme) -> bool {
        phoneme.is_consonant()
            && !self.feature.holds(phoneme)
            && next_to(root, at, |p| self.feature.holds(p))
            && self.target(phoneme).is_some()
    }

    fn transform(&self, _: &Root, _: Position, phoneme: &'static Phoneme) -> Replacement {
        smallvec![self.target(phoneme).unwrap_or(phoneme)]
    }
}

pub fn assimilation(language: &Language, feature: Feature) -> DiachronResult<Change> {
    let rule = Assimilation::for_language(language, feature)?;
    Ok(Change::new(rule.description(), apply_positional(language, &rule)?))
}

pub fn labial_assimilation(language: &Language, _: &mut dyn RngCore) -> DiachronResult<Change> {
    assimilation(language, Feature::Place(Place::Labial))
}

pub fn nasal_assimilation(language: &Language, _: &mut dyn RngCore) -> DiachronResult<Change> {
    assimilation(language, Feature::Manner(Manner::Nasal))
}

pub fn velar_assimilation(language: &Language, _: &mut dyn RngCore) -> DiachronResult<Change> {
    assimilation(language, Feature::Place(Place::Velar))
}

/// A stop and a sibilant next to each other in a stressed syllable trade places when a vowel
/// comes right before the pair.
pub struct Metathesis;

impl Metathesis {
    fn swappable(first: &Phoneme, second: &Phoneme) -> bool {
        match (first.consonant(), second.consonant()) {
            (Some(a), Some(b)) => {
                (a.is_stop() && b.is_sibilant()) || (a.is_sibilant() && b.is_stop())
            }
            _ => false,
        }
    }

    /// The second phoneme of a pair starting at `at`, if the pair swaps.
    fn pair_from(root: &Root, at: Position) -> Option<&'static Phoneme> {
        if !root.stresses(at.syllable) {
            return None;
        }
        let syllable = root.syllables.get(at.syllable)?;
        let first = *syllable.phonemes.get(at.phoneme)?;
        let second = *syllable.phonemes.get(at.phoneme + 1)?;
        let after_vowel = root.preceding(at).is_some_and(|p| p.is_vowel());
        (after_vowel && Self::swappable(first, second)).then_some(second)
    }

    /// Whether `phoneme` was already moved in front of its partner, two places back.
    fn closes_pair(root: &Root, at: Position, phoneme: &'static Phoneme) -> bool {
        let Some(moved) = at.phoneme.checked_sub(2) else {
            return false;
        };
        let moved = Position::new(at.syllable, moved);
        root.phoneme_at(moved) == Some(phoneme) && Self::pair_from(root, moved).is_some()
    }
}

impl PositionalChange for Metathesis {
    fn evaluate(&self, root: &Root, at: Position, phoneme: &'static Phoneme) -> bool {
        Self::pair_from(root, at).is_some() || Self::closes_pair(root, at, phoneme)
    }

    fn transform(&self, root: &Root, at: Position, phoneme: &'static Phoneme) -> Replacement {
        match Self::pair_from(root, at) {
            Some(second) => smallvec![second, phoneme],
            None => smallvec![],
        }
    }
}

pub fn metathesis(language: &Language, _: &mut dyn RngCore) -> DiachronResult<Change> {
    Ok(Change::new(METATHESIS, apply_positional(language, &Metathesis)?))
}

/// Consonants at the given places move to the palate after a front vowel.
pub struct Palatalization {
    places: Vec<Place>,
}

impl Palatalization {
    /// Places other than dental, alveolar-central and velar are ignored.
    pub fn new(places: &[Place]) -> Self {
        Self {
            places: PALATALIZATION_PLACES
                .iter()
                .copied()
                .filter(|p| places.contains(p))
                .collect(),
        }
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn description(&self) -> String {
        if self.places.is_empty() {
            return "**Palatalization:** No changes.".to_string();
        }
        let names = self
            .places
            .iter()
            .map(|p| match p {
                Place::AlveolarCentral => "alveolar".to_string(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>();
        format!(
            "**Palatalization:** Front vowels turned {} consonants that followed them into palatal consonants.",
            oxford_comma(&names)
        )
    }
}

impl PositionalChange for Palatalization {
    fn evaluate(&self, root: &Root, at: Position, phoneme: &'static Phoneme) -> bool {
        phoneme
            .consonant()
            .is_some_and(|c| self.places.contains(&c.place))
            && root
                .preceding(at)
                .and_then(|p| p.vowel())
                .is_some_and(|v| v.is_front())
    }

    fn transform(&self, _: &Root, _: Position, phoneme: &'static Phoneme) -> Replacement {
        replace_with(phoneme, Overrides::place(Place::Palatal))
    }
}

pub fn palatalize(language: &Language, places: &[Place]) -> DiachronResult<Change> {
    let rule = Palatalization::new(places);
    Ok(Change::new(rule.description(), apply_positional(language, &rule)?))
}

pub fn palatalization(language: &Language, rng: &mut dyn RngCore) -> DiachronResult<Change> {
    let count = rng.gen_range(1..=PALATALIZATION_PLACES.len());
    let places = PALATALIZATION_PLACES
        .choose_multiple(rng, count)
        .copied()
        .collect::<Vec<_>>();
    palatalize(language, &places)
}
