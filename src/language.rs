use crate::inventory::Inventory;
use crate::sounds::{Phoneme, PhonemeKind, Scale, Vowel};
use crate::utils::weighted_choices;
use crate::word::{tokenize, unmark, Root};
use crate::DiachronResult;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::io;

pub use stress::Stress;

mod stress;

/// Cluster → weight, in the order the clusters were first seen.
pub type Weights = Vec<(String, usize)>;

/// Vowel → the vowel it shifts to, in description order.
pub type VowelMapping = Vec<(&'static Phoneme, &'static Phoneme)>;

const DEFAULT_OPENNESS: f64 = 0.5;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SyllablePart {
    Onset,
    Nucleus,
    Coda,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VowelCriterion {
    Height,
    Location,
}

impl VowelCriterion {
    fn rank(self, vowel: &Vowel) -> usize {
        match self {
            VowelCriterion::Height => vowel.openness.rank(),
            VowelCriterion::Location => vowel.location.rank(),
        }
    }

    /// Moves one step along the axis. Raising and fronting move toward the start of the scale.
    fn step(self, vowel: Vowel, toward_start: bool) -> Vowel {
        match self {
            VowelCriterion::Height => vowel.with_openness(vowel.openness.adjacent(toward_start)),
            VowelCriterion::Location => {
                vowel.with_location(vowel.location.adjacent(toward_start))
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Phonotactics {
    pub onset: Weights,
    pub nucleus: Weights,
    pub coda: Weights,
}

impl Phonotactics {
    pub fn new(onset: &[(&str, usize)], nucleus: &[(&str, usize)], coda: &[(&str, usize)]) -> Self {
        let owned = |part: &[(&str, usize)]| {
            part.iter()
                .map(|(cluster, weight)| (cluster.to_string(), *weight))
                .collect::<Weights>()
        };
        Self {
            onset: owned(onset),
            nucleus: owned(nucleus),
            coda: owned(coda),
        }
    }

    pub fn from_words(words: &[String]) -> DiachronResult<Self> {
        let roots = parse_all(words)?;
        Ok(Self::from_roots(&roots))
    }

    /// Counts the clusters each syllable part takes. A syllable without a vowel counts as coda.
    pub fn from_roots(roots: &[Root]) -> Self {
        let mut phonotactics = Self::default();
        for syllable in roots.iter().flat_map(|r| &r.syllables) {
            tally(&mut phonotactics.onset, syllable.onset());
            tally(&mut phonotactics.nucleus, syllable.nucleus());
            tally(&mut phonotactics.coda, syllable.coda());
        }
        phonotactics
    }

    pub fn part(&self, part: SyllablePart) -> &Weights {
        match part {
            SyllablePart::Onset => &self.onset,
            SyllablePart::Nucleus => &self.nucleus,
            SyllablePart::Coda => &self.coda,
        }
    }

    /// Every cluster of the part repeated by its weight.
    pub fn choices(&self, part: SyllablePart) -> Vec<&str> {
        weighted_choices(
            self.part(part)
                .iter()
                .map(|(cluster, weight)| (cluster.as_str(), *weight)),
        )
    }

    fn clusters(&self) -> impl Iterator<Item = &str> {
        self.onset
            .iter()
            .chain(&self.nucleus)
            .chain(&self.coda)
            .map(|(cluster, _)| cluster.as_str())
    }
}

fn tally(weights: &mut Weights, phonemes: &[&Phoneme]) {
    if phonemes.is_empty() {
        return;
    }
    let cluster = phonemes.iter().map(|p| p.symbol()).join("");
    match weights.iter_mut().find(|(c, _)| *c == cluster) {
        Some((_, weight)) => *weight += 1,
        None => weights.push((cluster, 1)),
    }
}

fn parse_all(words: &[String]) -> DiachronResult<Vec<Root>> {
    words.iter().map(|w| Root::parse(w)).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Phonology {
    pub stress: Stress,
    pub openness: f64,
}

impl Default for Phonology {
    fn default() -> Self {
        Self {
            stress: Stress::default(),
            openness: DEFAULT_OPENNESS,
        }
    }
}

impl Phonology {
    pub fn from_words(words: &[String]) -> DiachronResult<Self> {
        let roots = parse_all(words)?;
        Ok(Self::from_roots(&roots))
    }

    pub fn from_roots(roots: &[Root]) -> Self {
        Self {
            stress: Stress::poll(roots),
            openness: Self::calculate_openness(roots),
        }
    }

    /// The share of open syllables.
    pub fn calculate_openness(roots: &[Root]) -> f64 {
        let (open, total) = roots
            .iter()
            .flat_map(|r| &r.syllables)
            .fold((0usize, 0usize), |(open, total), s| {
                (open + usize::from(s.is_open()), total + 1)
            });
        if total == 0 {
            DEFAULT_OPENNESS
        } else {
            open as f64 / total as f64
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    pub phonotactics: Phonotactics,
    pub phonology: Phonology,
    pub words: Vec<String>,
}

impl Language {
    pub fn new(phonotactics: Phonotactics, phonology: Phonology, words: Vec<String>) -> Self {
        Self {
            phonotactics,
            phonology,
            words,
        }
    }

    /// Reconstructs a language from nothing but its words.
    pub fn from_words(words: Vec<String>) -> DiachronResult<Self> {
        let roots = parse_all(&words)?;
        Ok(Self {
            phonotactics: Phonotactics::from_roots(&roots),
            phonology: Phonology::from_roots(&roots),
            words,
        })
    }

    pub fn load<R: io::Read>(reader: R) -> DiachronResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn save<W: io::Write>(&self, writer: W) -> DiachronResult<()> {
        Ok(serde_json::to_writer_pretty(writer, self)?)
    }

    /// The distinct consonants and vowels the phonotactics use, in order of appearance.
    pub fn take_inventory(&self) -> DiachronResult<(Vec<&'static Phoneme>, Vec<&'static Phoneme>)> {
        let mut phonemes = vec![];
        for cluster in self.phonotactics.clusters() {
            phonemes.extend(tokenize(&unmark(cluster))?);
        }
        Ok(phonemes
            .into_iter()
            .unique()
            .partition(|p| p.is_consonant()))
    }

    /// Maps each vowel of the language to the nearest vowel of the language one step along the
    /// axis. `reverse` moves toward the close/front end. Vowels with nowhere to go map to
    /// themselves.
    pub fn vowel_mapping(
        &self,
        criterion: VowelCriterion,
        reverse: bool,
    ) -> DiachronResult<VowelMapping> {
        let (_, vowels) = self.take_inventory()?;
        let mut mapping = vowels
            .iter()
            .map(|&vowel| (vowel, next_vowel(vowel, criterion, reverse, &vowels)))
            .collect::<VowelMapping>();
        let rank = |p: &Phoneme| p.vowel().map(|v| criterion.rank(v)).unwrap_or(0);
        mapping.sort_by(|(a, _), (b, _)| {
            let ordering = rank(a).cmp(&rank(b));
            if reverse {
                ordering.reverse()
            } else {
                ordering
            }
        });
        Ok(mapping)
    }
}

fn next_vowel(
    vowel: &'static Phoneme,
    criterion: VowelCriterion,
    toward_start: bool,
    within: &[&'static Phoneme],
) -> &'static Phoneme {
    let Some(&features) = vowel.vowel() else {
        return vowel;
    };
    let inventory = Inventory::global();
    let mut current = features;
    loop {
        let next = criterion.step(current, toward_start);
        if next == current {
            return vowel;
        }
        current = next;
        if let Some(candidate) = inventory.find(&PhonemeKind::Vowel(current)) {
            if within.contains(&candidate) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::{language, words};

    fn mapped(mapping: &VowelMapping) -> Vec<(&str, &str)> {
        mapping
            .iter()
            .map(|(from, to)| (from.symbol(), to.symbol()))
            .collect()
    }

    #[test]
    fn t_take_inventory() {
        let lang = language(&[("bb", 2)], &[("a", 1)], &[], &[]);
        let (consonants, vowels) = lang.take_inventory().unwrap();
        assert_eq!(consonants.len(), 1);
        assert_eq!(consonants[0].symbol(), "b");
        assert_eq!(vowels.len(), 1);

        let lang = language(&[("p", 1), ("bl", 1)], &[("a:", 1), ("ai", 1)], &[("p", 1)], &[]);
        let (consonants, vowels) = lang.take_inventory().unwrap();
        assert_eq!(
            consonants.iter().map(|p| p.symbol()).collect::<Vec<_>>(),
            vec!["p", "b", "l"]
        );
        assert_eq!(
            vowels.iter().map(|p| p.symbol()).collect::<Vec<_>>(),
            vec!["a:", "a", "i"]
        );
    }

    #[test]
    fn t_height_mapping() {
        let nucleus = [("a", 1), ("e", 1), ("i", 1), ("o", 1), ("u", 1)];
        let lang = language(&[], &nucleus, &[], &[]);
        let raise = lang.vowel_mapping(VowelCriterion::Height, true).unwrap();
        assert_eq!(
            mapped(&raise),
            vec![("a", "e"), ("e", "i"), ("o", "u"), ("i", "i"), ("u", "u")]
        );
        let lower = lang.vowel_mapping(VowelCriterion::Height, false).unwrap();
        assert_eq!(
            mapped(&lower),
            vec![("i", "e"), ("u", "o"), ("e", "a"), ("o", "o"), ("a", "a")]
        );
    }

    #[test]
    fn t_location_mapping() {
        let nucleus = [("a", 1), ("ø", 1), ("y", 1), ("o", 1), ("u", 1)];
        let lang = language(&[], &nucleus, &[], &[]);
        let front = lang.vowel_mapping(VowelCriterion::Location, true).unwrap();
        assert_eq!(
            mapped(&front),
            vec![("o", "ø"), ("u", "y"), ("a", "a"), ("ø", "ø"), ("y", "y")]
        );
        let back = lang.vowel_mapping(VowelCriterion::Location, false).unwrap();
        assert_eq!(
            mapped(&back),
            vec![("a", "a"), ("ø", "o"), ("y", "u"), ("o", "o"), ("u", "u")]
        );
    }

    #[test]
    fn t_from_words() {
        let lang = Language::from_words(words(&["/ba/", "/ˈba.ba/", "/bab/"])).unwrap();
        assert_eq!(lang.phonology.openness, 0.75);
        assert_eq!(lang.phonology.stress, Stress::Initial);
        assert_eq!(lang.phonotactics.onset, vec![("b".to_string(), 4)]);
        assert_eq!(lang.phonotactics.nucleus, vec![("a".to_string(), 4)]);
        assert_eq!(lang.phonotactics.coda, vec![("b".to_string(), 1)]);
        assert_eq!(lang.words, words(&["/ba/", "/ˈba.ba/", "/bab/"]));
    }

    #[test]
    fn t_from_words_rejects_bad_ipa() {
        assert!(Language::from_words(words(&["/ba/", "/b?/"])).is_err());
    }

    #[test]
    fn t_openness() {
        let roots = parse_all(&words(&["/ba/", "/bab/", "/bwa/", "/ˈbwa.ma/"])).unwrap();
        assert_eq!(Phonology::calculate_openness(&roots), 0.8);
        assert_eq!(Phonology::calculate_openness(&[]), DEFAULT_OPENNESS);
    }

    #[test]
    fn t_choices() {
        let lang = language(&[("b", 2), ("p", 1)], &[("a", 1)], &[], &[]);
        assert_eq!(
            lang.phonotactics.choices(SyllablePart::Onset),
            vec!["b", "b", "p"]
        );
        assert!(lang.phonotactics.choices(SyllablePart::Coda).is_empty());
    }

    #[test]
    fn t_json() {
        let lang = language(&[("b", 2)], &[("a", 1)], &[("n", 1)], &["/ban/"]);
        let mut buffer = vec![];
        lang.save(&mut buffer).unwrap();
        let loaded = Language::load(buffer.as_slice()).unwrap();
        assert_eq!(loaded, lang);

        let sparse = r#"{"words": ["/ba/"], "phonology": {"stress": "final"}}"#;
        let loaded = Language::load(sparse.as_bytes()).unwrap();
        assert_eq!(loaded.phonology.stress, Stress::Final);
        assert_eq!(loaded.phonology.openness, DEFAULT_OPENNESS);
        assert!(loaded.phonotactics.onset.is_empty());

        let invalid = r#"{"phonology": {"stress": "second"}}"#;
        assert!(Language::load(invalid.as_bytes()).is_err());
    }
}
