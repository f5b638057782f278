use crate::inventory::Inventory;
use crate::sounds::Phoneme;
use crate::{DiachronError, DiachronResult};
use itertools::Itertools;
use std::fmt::{Display, Formatter};
use std::ops::Range;

pub const STRESS_MARK: char = 'ˈ';
pub const SYLLABLE_DELIMITER: char = '.';
const BRACKETS: [char; 3] = ['/', '[', ']'];

/// Strips the outer `/…/` or `[…]`.
pub fn unbracket(ipa: &str) -> &str {
    ipa.trim_matches(|c| BRACKETS.contains(&c))
}

pub fn unmark(ipa: &str) -> String {
    unbracket(ipa)
        .chars()
        .filter(|&c| c != STRESS_MARK && c != SYLLABLE_DELIMITER)
        .collect()
}

/// Greedy longest-match tokenization against the inventory.
pub fn tokenize(unmarked: &str) -> DiachronResult<Vec<&'static Phoneme>> {
    let inventory = Inventory::global();
    let mut rest = unmarked;
    let mut phonemes = vec![];
    while !rest.is_empty() {
        let phoneme = inventory
            .longest_prefix(rest)
            .ok_or_else(|| DiachronError::Decode {
                word: unmarked.to_string(),
                remainder: rest.to_string(),
            })?;
        rest = &rest[phoneme.symbol().len()..];
        phonemes.push(phoneme);
    }
    Ok(phonemes)
}

pub fn symbols(phonemes: &[&Phoneme]) -> String {
    phonemes.iter().map(|p| p.symbol()).join("")
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub syllable: usize,
    pub phoneme: usize,
}

impl Position {
    pub fn new(syllable: usize, phoneme: usize) -> Self {
        Self { syllable, phoneme }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syllable {
    pub(crate) ipa: String,
    pub stressed: bool,
    pub phonemes: Vec<&'static Phoneme>,
}

impl Syllable {
    pub fn parse(ipa: &str) -> DiachronResult<Self> {
        let stressed = unbracket(ipa).starts_with(STRESS_MARK);
        let phonemes = tokenize(&unmark(ipa)).map_err(|e| e.in_word(ipa))?;
        Ok(Self {
            ipa: unbracket(ipa).to_string(),
            stressed,
            phonemes,
        })
    }

    pub fn ipa(&self) -> &str {
        self.ipa.as_str()
    }

    pub fn unmarked(&self) -> String {
        unmark(&self.ipa)
    }

    pub fn has_vowel(&self) -> bool {
        self.phonemes.iter().any(|p| p.is_vowel())
    }

    /// Positions of the first run of vowels.
    pub fn nucleus_range(&self) -> Option<Range<usize>> {
        let start = self.phonemes.iter().position(|p| p.is_vowel())?;
        let len = self.phonemes[start..]
            .iter()
            .take_while(|p| p.is_vowel())
            .count();
        Some(start..start + len)
    }

    pub fn onset(&self) -> &[&'static Phoneme] {
        match self.nucleus_range() {
            Some(nucleus) => &self.phonemes[..nucleus.start],
            None => &[],
        }
    }

    pub fn nucleus(&self) -> &[&'static Phoneme] {
        match self.nucleus_range() {
            Some(nucleus) => &self.phonemes[nucleus],
            None => &[],
        }
    }

    pub fn coda(&self) -> &[&'static Phoneme] {
        match self.nucleus_range() {
            Some(nucleus) => &self.phonemes[nucleus.end..],
            None => &self.phonemes,
        }
    }

    pub fn is_open(&self) -> bool {
        self.nucleus_range()
            .map(|n| n.end == self.phonemes.len())
            .unwrap_or(false)
    }

    pub fn in_coda(&self, phoneme: usize) -> bool {
        self.nucleus_range()
            .map(|n| phoneme >= n.end)
            .unwrap_or(false)
    }

    /// One point for a long vowel, one for a closing consonant.
    pub fn weight(&self) -> usize {
        let long = self.phonemes.iter().any(|p| p.is_long_vowel());
        let closed = self.phonemes.last().is_some_and(|p| p.is_consonant());
        usize::from(long) + usize::from(closed)
    }

    pub fn rebuild(&mut self) {
        let prefix = if self.stressed {
            STRESS_MARK.to_string()
        } else {
            String::new()
        };
        self.ipa = format!("{}{}", prefix, symbols(&self.phonemes));
    }
}

impl Display for Syllable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ipa)
    }
}

/// A word broken into syllables and phonemes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    pub syllables: Vec<Syllable>,
}

impl Root {
    pub fn parse(ipa: &str) -> DiachronResult<Self> {
        let syllables = unbracket(ipa)
            .split(SYLLABLE_DELIMITER)
            .map(Syllable::parse)
            .collect::<DiachronResult<Vec<_>>>()
            .map_err(|e| e.in_word(ipa))?;
        Ok(Self { syllables })
    }

    pub fn phonemes(&self) -> impl Iterator<Item = &'static Phoneme> + '_ {
        self.syllables
            .iter()
            .flat_map(|s| s.phonemes.iter().copied())
    }

    pub fn phoneme_index(&self) -> Vec<(Position, &'static Phoneme)> {
        self.syllables
            .iter()
            .enumerate()
            .flat_map(|(si, s)| {
                s.phonemes
                    .iter()
                    .enumerate()
                    .map(move |(pi, &p)| (Position::new(si, pi), p))
            })
            .collect()
    }

    pub fn phoneme_at(&self, at: Position) -> Option<&'static Phoneme> {
        self.syllables
            .get(at.syllable)
            .and_then(|s| s.phonemes.get(at.phoneme))
            .copied()
    }

    /// Monosyllables count as stressed.
    pub fn stresses(&self, syllable: usize) -> bool {
        self.syllables.len() < 2 || self.syllables.get(syllable).is_some_and(|s| s.stressed)
    }

    pub fn stressed_syllable(&self) -> Option<usize> {
        if self.syllables.len() < 2 {
            return Some(0);
        }
        self.syllables.iter().position(|s| s.stressed)
    }

    fn flat_index(&self, at: Position) -> Option<usize> {
        let syllable = self.syllables.get(at.syllable)?;
        if at.phoneme >= syllable.phonemes.len() {
            return None;
        }
        let before = self.syllables[..at.syllable]
            .iter()
            .map(|s| s.phonemes.len())
            .sum::<usize>();
        Some(before + at.phoneme)
    }

    pub fn preceding(&self, at: Position) -> Option<&'static Phoneme> {
        let index = self.flat_index(at)?.checked_sub(1)?;
        self.phonemes().nth(index)
    }

    pub fn following(&self, at: Position) -> Option<&'static Phoneme> {
        let index = self.flat_index(at)? + 1;
        self.phonemes().nth(index)
    }

    pub fn neighbors(&self, at: Position) -> [Option<&'static Phoneme>; 2] {
        [self.preceding(at), self.following(at)]
    }

    pub fn is_word_final(&self, at: Position) -> bool {
        self.flat_index(at).is_some() && self.following(at).is_none()
    }

    /// Repairs the syllable structure and serializes it back to `/…/`.
    ///
    /// Syllables without a vowel are folded into the syllable before them, carrying any stress
    /// mark along. Syllable 0 is never folded backwards. Once fewer than two syllables remain the
    /// stress mark is dropped.
    pub fn rebuild(&mut self) -> String {
        let mut index = 1;
        while index < self.syllables.len() {
            if self.syllables[index].has_vowel() {
                index += 1;
                continue;
            }
            let orphan = self.syllables.remove(index);
            let previous = &mut self.syllables[index - 1];
            previous.phonemes.extend(orphan.phonemes);
            previous.stressed |= orphan.stressed;
        }
        if self.syllables.len() > 1 && self.syllables[0].phonemes.is_empty() {
            let empty = self.syllables.remove(0);
            self.syllables[0].stressed |= empty.stressed;
        }
        if self.syllables.len() < 2 {
            for syllable in &mut self.syllables {
                syllable.stressed = false;
            }
        }
        for syllable in &mut self.syllables {
            syllable.rebuild();
        }
        self.to_string()
    }
}

impl Display for Root {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "/{}/",
            self.syllables.iter().map(Syllable::ipa).join(".")
        )
    }
}
