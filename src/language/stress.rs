use crate::sounds::parse_feature;
use crate::word::Root;
use crate::DiachronError;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Where a word puts its primary stress.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    strum_macros::Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Stress {
    #[default]
    Initial,
    Final,
    Penultimate,
    Antepenultimate,
    Heavy,
    Random,
}

impl TryFrom<&str> for Stress {
    type Error = DiachronError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse_feature("stress", value)
    }
}

impl Stress {
    /// Which syllable of `weights.len()` syllables takes the stress, for every type but random.
    pub fn target(self, weights: &[usize]) -> Option<usize> {
        let count = weights.len();
        match self {
            Stress::Initial => Some(0),
            Stress::Final => Some(count.saturating_sub(1)),
            Stress::Penultimate => Some(count.saturating_sub(2)),
            Stress::Antepenultimate => Some(count.saturating_sub(3)),
            Stress::Heavy => {
                let heaviest = weights.iter().max()?;
                weights.iter().position(|w| w == heaviest)
            }
            Stress::Random => None,
        }
    }

    /// Whether the word's stress follows this type. Monosyllables follow every type.
    pub fn matches(self, root: &Root) -> bool {
        let count = root.syllables.len();
        if count < 2 {
            return true;
        }
        let Some(stressed) = root.stressed_syllable() else {
            return false;
        };
        match self {
            Stress::Heavy => {
                let weights = root.syllables.iter().map(|s| s.weight()).collect::<Vec<_>>();
                weights.iter().max() == Some(&weights[stressed])
            }
            Stress::Random => true,
            fixed => {
                let weights = vec![0; count];
                fixed.target(&weights) == Some(stressed)
            }
        }
    }

    pub fn analyze(root: &Root) -> Vec<(Stress, bool)> {
        Stress::iter()
            .filter(|s| *s != Stress::Random)
            .map(|s| (s, s.matches(root)))
            .collect()
    }

    /// The type followed by most words. Ties go to the type declared first, and a type followed
    /// by no more than half the words means there is no rule at all.
    pub fn poll(roots: &[Root]) -> Stress {
        if roots.is_empty() {
            return Stress::default();
        }
        let best = Stress::iter()
            .filter(|s| *s != Stress::Random)
            .map(|s| (s, roots.iter().filter(|r| s.matches(r)).count()))
            .fold(None, |best: Option<(Stress, usize)>, (stress, count)| match best {
                Some((_, top)) if top >= count => best,
                _ => Some((stress, count)),
            });
        match best {
            Some((stress, count)) if count * 2 > roots.len() => stress,
            _ => Stress::Random,
        }
    }
}
