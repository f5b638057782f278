use crate::language::{Stress, SyllablePart};
use crate::word::{Syllable, STRESS_MARK};
use crate::{DiachronError, DiachronResult, Language};
use rand::prelude::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, Normal};

#[derive(Copy, Clone, Debug)]
pub struct GenerationSettings {
    /// Spread of the extra syllables drawn on top of the first one.
    pub deviation: f32,
    pub max_attempts: usize,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            deviation: 1.,
            max_attempts: 100,
        }
    }
}

impl Language {
    pub fn generate_syllable<R: Rng + ?Sized>(&self, rng: &mut R) -> DiachronResult<String> {
        let onset = self
            .phonotactics
            .choices(SyllablePart::Onset)
            .choose(rng)
            .copied()
            .unwrap_or_default();
        let nucleus = self
            .phonotactics
            .choices(SyllablePart::Nucleus)
            .choose(rng)
            .copied()
            .ok_or(DiachronError::EmptyNucleus)?;
        let closed = rng.gen_bool((1. - self.phonology.openness).clamp(0., 1.));
        let coda = if closed {
            self.phonotactics
                .choices(SyllablePart::Coda)
                .choose(rng)
                .copied()
                .unwrap_or_default()
        } else {
            ""
        };
        Ok(format!("{}{}{}", onset, nucleus, coda))
    }

    /// Marks the syllable the language's stress type picks. Monosyllables stay unmarked.
    pub fn apply_stress<R: Rng + ?Sized>(
        &self,
        mut syllables: Vec<String>,
        rng: &mut R,
    ) -> DiachronResult<Vec<String>> {
        if syllables.len() < 2 {
            return Ok(syllables);
        }
        let index = match self.phonology.stress {
            Stress::Random => rng.gen_range(0..syllables.len()),
            Stress::Heavy => {
                let weights = syllables
                    .iter()
                    .map(|s| Syllable::parse(s).map(|s| s.weight()))
                    .collect::<DiachronResult<Vec<_>>>()?;
                Stress::Heavy.target(&weights).unwrap_or(0)
            }
            fixed => fixed.target(&vec![0; syllables.len()]).unwrap_or(0),
        };
        syllables[index].insert(0, STRESS_MARK);
        Ok(syllables)
    }

    pub fn generate_word<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        num_syllables: usize,
    ) -> DiachronResult<String> {
        let syllables = (0..num_syllables.max(1))
            .map(|_| self.generate_syllable(rng))
            .collect::<DiachronResult<Vec<_>>>()?;
        Ok(format!("/{}/", self.apply_stress(syllables, rng)?.join(".")))
    }
}

/// Generates words a language does not have yet, never repeating itself.
pub struct WordGen<'a> {
    language: &'a Language,
    settings: GenerationSettings,
    generated: Vec<String>,
}

impl<'a> WordGen<'a> {
    pub fn new(language: &'a Language) -> Self {
        Self::with_settings(language, GenerationSettings::default())
    }

    pub fn with_settings(language: &'a Language, settings: GenerationSettings) -> Self {
        Self {
            language,
            settings,
            generated: vec![],
        }
    }

    pub fn generated(&self) -> &[String] {
        &self.generated
    }

    pub fn generate_new_word<R: Rng + ?Sized>(&mut self, rng: &mut R) -> DiachronResult<String> {
        let spread = Normal::new(0., self.settings.deviation)
            .map_err(|e| DiachronError::InvalidSettings(e.to_string()))?;
        for _ in 0..self.settings.max_attempts {
            let extra: f32 = spread.sample(rng);
            let word = self
                .language
                .generate_word(rng, 1 + extra.abs() as usize)?;
            if !self.language.words.contains(&word) && !self.generated.contains(&word) {
                self.generated.push(word.clone());
                return Ok(word);
            }
        }
        log::warn!(
            "gave up looking for a new word after {} attempts",
            self.settings.max_attempts
        );
        Err(DiachronError::GenerationExhausted(self.settings.max_attempts))
    }

    pub fn generate_new_words<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        rng: &mut R,
    ) -> DiachronResult<Vec<String>> {
        (0..count).map(|_| self.generate_new_word(rng)).collect()
    }
}
