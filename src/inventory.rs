use crate::raw_data::{CONSONANTS, VOWELS};
use crate::sounds::{
    parse_consonants, parse_vowels, Consonant, Location, Manner, Openness, Phoneme, PhonemeKind,
    Place, Vowel, LENGTH_MARK,
};
use crate::DiachronResult;
use std::sync::OnceLock;

/// Features to replace when asking for a sibling of a phoneme. Unset fields keep their value.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Overrides {
    pub manner: Option<Manner>,
    pub place: Option<Place>,
    pub voiced: Option<bool>,
    pub openness: Option<Openness>,
    pub location: Option<Location>,
    pub rounded: Option<bool>,
    pub long: Option<bool>,
}

impl Overrides {
    pub fn voiced(voiced: bool) -> Self {
        Self {
            voiced: Some(voiced),
            ..Default::default()
        }
    }

    pub fn place(place: Place) -> Self {
        Self {
            place: Some(place),
            ..Default::default()
        }
    }

    pub fn manner(manner: Manner) -> Self {
        Self {
            manner: Some(manner),
            ..Default::default()
        }
    }

    pub fn long(long: bool) -> Self {
        Self {
            long: Some(long),
            ..Default::default()
        }
    }

    fn apply(&self, kind: &PhonemeKind) -> PhonemeKind {
        match *kind {
            PhonemeKind::Consonant(mut c) => {
                if let Some(manner) = self.manner {
                    c = c.with_manner(manner);
                }
                if let Some(place) = self.place {
                    c = c.with_place(place);
                }
                if let Some(voiced) = self.voiced {
                    c = c.with_voiced(voiced);
                }
                PhonemeKind::Consonant(c)
            }
            PhonemeKind::Vowel(mut v) => {
                if let Some(openness) = self.openness {
                    v = v.with_openness(openness);
                }
                if let Some(location) = self.location {
                    v = v.with_location(location);
                }
                if let Some(rounded) = self.rounded {
                    v = v.with_rounded(rounded);
                }
                if let Some(long) = self.long {
                    v = v.with_long(long);
                }
                PhonemeKind::Vowel(v)
            }
        }
    }
}

/// The fixed catalog every transcription is tokenized against.
#[derive(Debug)]
pub struct Inventory {
    phonemes: Vec<Phoneme>,
    consonant_count: usize,
    by_length: Vec<usize>,
}

impl Inventory {
    /// The built-in catalog, parsed on first use.
    pub fn global() -> &'static Inventory {
        static INVENTORY: OnceLock<Inventory> = OnceLock::new();
        INVENTORY.get_or_init(|| {
            Inventory::from_tables(CONSONANTS, VOWELS)
                .unwrap_or_else(|e| panic!("built-in phoneme tables are malformed: {}", e))
        })
    }

    /// Builds a catalog from CSV tables. Every vowel also gets a long form marked with `:`.
    pub fn from_tables(consonants: &str, vowels: &str) -> DiachronResult<Self> {
        let mut phonemes = parse_consonants(consonants.as_bytes())?;
        let consonant_count = phonemes.len();
        let short = parse_vowels(vowels.as_bytes())?;
        let long = short
            .iter()
            .filter_map(|p| {
                p.vowel().map(|v| {
                    Phoneme::new(
                        format!("{}{}", p.symbol(), LENGTH_MARK),
                        PhonemeKind::Vowel(v.with_long(true)),
                    )
                })
            })
            .collect::<Vec<_>>();
        phonemes.extend(long);
        phonemes.extend(short);

        let mut by_length = (0..phonemes.len()).collect::<Vec<_>>();
        by_length.sort_by_key(|&i| std::cmp::Reverse(phonemes[i].symbol().chars().count()));
        Ok(Self {
            phonemes,
            consonant_count,
            by_length,
        })
    }

    pub fn phonemes(&self) -> &[Phoneme] {
        &self.phonemes
    }

    pub fn consonants(&self) -> &[Phoneme] {
        &self.phonemes[..self.consonant_count]
    }

    pub fn vowels(&self) -> &[Phoneme] {
        &self.phonemes[self.consonant_count..]
    }

    pub fn lookup(&self, symbol: &str) -> Option<&Phoneme> {
        self.phonemes.iter().find(|p| p.symbol() == symbol)
    }

    /// The longest symbol that `text` starts with.
    pub fn longest_prefix(&self, text: &str) -> Option<&Phoneme> {
        self.by_length
            .iter()
            .map(|&i| &self.phonemes[i])
            .find(|p| text.starts_with(p.symbol()))
    }

    /// The first phoneme carrying exactly these features.
    pub fn find(&self, kind: &PhonemeKind) -> Option<&Phoneme> {
        self.phonemes.iter().find(|p| p.kind() == kind)
    }

    pub fn find_consonant(&self, consonant: &Consonant) -> Option<&Phoneme> {
        self.find(&PhonemeKind::Consonant(*consonant))
    }

    pub fn find_vowel(&self, vowel: &Vowel) -> Option<&Phoneme> {
        self.find(&PhonemeKind::Vowel(*vowel))
    }

    /// The phoneme sharing every feature of `phoneme` except the overridden ones.
    pub fn find_similar(&self, phoneme: &Phoneme, overrides: Overrides) -> Option<&Phoneme> {
        self.find(&overrides.apply(phoneme.kind()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn t_global() {
        let inventory = Inventory::global();
        assert!(inventory.consonants().iter().all(Phoneme::is_consonant));
        assert!(inventory.vowels().iter().all(Phoneme::is_vowel));
        assert_eq!(
            inventory.vowels().iter().filter(|v| v.is_long_vowel()).count(),
            inventory.vowels().len() / 2
        );
    }

    #[test]
    fn t_lookup() {
        let inventory = Inventory::global();
        let long = inventory.lookup("a:").unwrap();
        assert_eq!(
            long.vowel(),
            Some(&Vowel::new(Openness::Open, Location::Front, false).with_long(true))
        );
        assert!(inventory.lookup("ʙ").is_none());
    }

    #[test]
    fn t_longest_prefix() {
        let inventory = Inventory::global();
        assert_eq!(inventory.longest_prefix("a:b").unwrap().symbol(), "a:");
        assert_eq!(inventory.longest_prefix("t̪θa").unwrap().symbol(), "t̪θ");
        assert_eq!(inventory.longest_prefix("t͡sa").unwrap().symbol(), "t͡s");
        assert_eq!(inventory.longest_prefix("tsa").unwrap().symbol(), "t");
        assert!(inventory.longest_prefix("!").is_none());
    }

    #[test]
    fn t_find_similar() {
        let inventory = Inventory::global();
        let b = inventory.lookup("b").unwrap();
        assert_eq!(
            inventory.find_similar(b, Overrides::voiced(false)).unwrap().symbol(),
            "p"
        );
        assert_eq!(
            inventory.find_similar(b, Overrides::manner(Manner::Nasal)).unwrap().symbol(),
            "m"
        );
        let l = inventory.lookup("l").unwrap();
        assert!(inventory.find_similar(l, Overrides::voiced(false)).is_none());
        let a = inventory.lookup("a").unwrap();
        assert_eq!(
            inventory.find_similar(a, Overrides::long(true)).unwrap().symbol(),
            "a:"
        );
        let glottal_stop = inventory.lookup("ʔ").unwrap();
        assert!(inventory
            .find_similar(glottal_stop, Overrides::voiced(true))
            .is_none());
    }

    #[test]
    fn t_find() {
        let inventory = Inventory::global();
        let ch = inventory
            .find_consonant(&Consonant::new(Manner::Affricate, Place::Palatal, false))
            .unwrap();
        assert_eq!(ch.symbol(), "ʧ");
        let close_back = inventory
            .find_vowel(&Vowel::new(Openness::Close, Location::Back, true))
            .unwrap();
        assert_eq!(close_back.symbol(), "u");
    }

    #[test]
    fn t_bad_tables() {
        let consonants = "symbol,manner,place,voice\nx,stop,nowhere,voiced";
        assert!(Inventory::from_tables(consonants, VOWELS).is_err());
    }
}
