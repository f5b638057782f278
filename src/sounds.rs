use crate::{DiachronError, DiachronResult};
use itertools::Itertools;
use std::collections::HashMap;
use std::fmt::Formatter;
use std::hash::{Hash, Hasher};
use std::io;
use strum::IntoEnumIterator;

pub use consonants::*;
pub use vowels::*;

/// A sound from the inventory. Two phonemes are the same phoneme when their symbols match.
#[derive(Debug, Clone)]
pub struct Phoneme {
    pub(crate) symbol: String,
    pub(crate) kind: PhonemeKind,
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum PhonemeKind {
    Consonant(Consonant),
    Vowel(Vowel),
}

impl Phoneme {
    pub(crate) fn new(symbol: impl Into<String>, kind: PhonemeKind) -> Self {
        Self {
            symbol: symbol.into(),
            kind,
        }
    }

    pub fn symbol(&self) -> &str {
        self.symbol.as_str()
    }

    pub fn kind(&self) -> &PhonemeKind {
        &self.kind
    }

    pub fn consonant(&self) -> Option<&Consonant> {
        match &self.kind {
            PhonemeKind::Consonant(c) => Some(c),
            PhonemeKind::Vowel(_) => None,
        }
    }

    pub fn vowel(&self) -> Option<&Vowel> {
        match &self.kind {
            PhonemeKind::Vowel(v) => Some(v),
            PhonemeKind::Consonant(_) => None,
        }
    }

    pub fn is_consonant(&self) -> bool {
        matches!(self.kind, PhonemeKind::Consonant(_))
    }

    pub fn is_vowel(&self) -> bool {
        matches!(self.kind, PhonemeKind::Vowel(_))
    }

    pub fn is_long_vowel(&self) -> bool {
        self.vowel().map(|v| v.long).unwrap_or(false)
    }

    pub fn is_voiced_consonant(&self) -> bool {
        self.consonant().map(|c| c.voiced).unwrap_or(false)
    }

    pub fn is_voiceless_consonant(&self) -> bool {
        self.consonant().map(|c| !c.voiced).unwrap_or(false)
    }

    pub fn is_voiceless_obstruent(&self) -> bool {
        self.consonant()
            .map(|c| !c.voiced && c.category() == Category::Obstruent)
            .unwrap_or(false)
    }
}

impl PartialEq for Phoneme {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl Eq for Phoneme {}

impl Hash for Phoneme {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
    }
}

impl std::fmt::Display for Phoneme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

pub fn parse_csv_to_map<R: io::Read>(reader: R) -> DiachronResult<Vec<HashMap<String, String>>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = vec![];
    let headers = rdr.headers()?.clone();
    for result in rdr.records() {
        let record = result?;
        let mut map = HashMap::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            map.insert(header.to_string(), value.trim().to_string());
        }
        records.push(map);
    }
    Ok(records)
}

fn field<'a>(map: &'a HashMap<String, String>, key: &str) -> DiachronResult<&'a str> {
    map.get(key)
        .map(String::as_str)
        .ok_or_else(|| DiachronError::Table(format!("no {} defined", key)))
}

/// Parses one of the closed feature enumerations, naming every valid choice on failure.
pub(crate) fn parse_feature<T>(feature: &'static str, value: &str) -> DiachronResult<T>
where
    T: IntoEnumIterator + std::fmt::Display,
{
    let wanted = value.trim().to_ascii_lowercase();
    T::iter()
        .find(|v| v.to_string() == wanted)
        .ok_or_else(|| DiachronError::InvalidFeature {
            feature,
            value: value.to_string(),
            choices: T::iter().join(", "),
        })
}

fn parse_binary(value: &str, yes: &str, no: &str) -> DiachronResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        v if v == yes => Ok(true),
        v if v == no => Ok(false),
        _ => Err(DiachronError::Table(format!(
            "{:?} is neither {} nor {}",
            value, yes, no
        ))),
    }
}

/// An ordered feature axis. Stepping past either end stays at the end.
pub trait Scale: IntoEnumIterator + PartialEq + Copy {
    fn rank(self) -> usize {
        Self::iter().position(|v| v == self).unwrap_or(0)
    }

    fn adjacent(self, toward_start: bool) -> Self {
        let rank = self.rank();
        let target = if toward_start {
            match rank.checked_sub(1) {
                Some(r) => r,
                None => return self,
            }
        } else {
            rank + 1
        };
        Self::iter().nth(target).unwrap_or(self)
    }
}

mod vowels {
    use super::{field, parse_binary, parse_feature, Phoneme, PhonemeKind, Scale};
    use crate::DiachronResult;
    use std::collections::HashMap;
    use std::fmt::Formatter;
    use std::io;
    use strum_macros::EnumIter;

    pub const LENGTH_MARK: char = ':';

    pub fn parse_vowels<R: io::Read>(input: R) -> DiachronResult<Vec<Phoneme>> {
        super::parse_csv_to_map(input)?
            .iter()
            .map(Vowel::try_from_map)
            .collect()
    }

    #[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
    pub struct Vowel {
        pub openness: Openness,
        pub location: Location,
        pub rounded: bool,
        pub long: bool,
    }

    impl Vowel {
        pub fn new(openness: Openness, location: Location, rounded: bool) -> Self {
            Self {
                openness,
                location,
                rounded,
                long: false,
            }
        }

        pub fn with_openness(mut self, openness: Openness) -> Self {
            self.openness = openness;
            self
        }

        pub fn with_location(mut self, location: Location) -> Self {
            self.location = location;
            self
        }

        pub fn with_rounded(mut self, rounded: bool) -> Self {
            self.rounded = rounded;
            self
        }

        pub fn with_long(mut self, long: bool) -> Self {
            self.long = long;
            self
        }

        pub fn is_front(&self) -> bool {
            self.location == Location::Front
        }

        /// Reads one short vowel from a table row.
        pub fn try_from_map(map: &HashMap<String, String>) -> DiachronResult<Phoneme> {
            let openness = Openness::try_from(field(map, "openness")?)?;
            let location = Location::try_from(field(map, "location")?)?;
            let rounded = parse_binary(field(map, "roundedness")?, "rounded", "unrounded")?;
            Ok(Phoneme::new(
                field(map, "symbol")?,
                PhonemeKind::Vowel(Vowel::new(openness, location, rounded)),
            ))
        }
    }

    impl std::fmt::Display for Vowel {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(
                f,
                "{}{} {} {}",
                if self.long { "long " } else { "" },
                self.openness,
                self.location,
                if self.rounded { "rounded" } else { "unrounded" }
            )
        }
    }

    #[derive(
        Debug,
        Eq,
        PartialEq,
        Ord,
        PartialOrd,
        Copy,
        Clone,
        Hash,
        EnumIter,
        strum_macros::Display,
    )]
    #[strum(serialize_all = "kebab-case")]
    pub enum Openness {
        Close,
        NearClose,
        CloseMid,
        Mid,
        OpenMid,
        NearOpen,
        Open,
    }

    impl Scale for Openness {}

    impl TryFrom<&str> for Openness {
        type Error = crate::DiachronError;

        fn try_from(value: &str) -> Result<Self, Self::Error> {
            parse_feature("openness", value)
        }
    }

    #[derive(
        Debug,
        Eq,
        PartialEq,
        Ord,
        PartialOrd,
        Copy,
        Clone,
        Hash,
        EnumIter,
        strum_macros::Display,
    )]
    #[strum(serialize_all = "kebab-case")]
    pub enum Location {
        Front,
        Central,
        Back,
    }

    impl Scale for Location {}

    impl TryFrom<&str> for Location {
        type Error = crate::DiachronError;

        fn try_from(value: &str) -> Result<Self, Self::Error> {
            parse_feature("location", value)
        }
    }
}

mod consonants {
    use super::{field, parse_binary, parse_feature, Phoneme, PhonemeKind};
    use crate::DiachronResult;
    use std::collections::HashMap;
    use std::fmt::Formatter;
    use std::io;
    use strum_macros::EnumIter;

    pub fn parse_consonants<R: io::Read>(input: R) -> DiachronResult<Vec<Phoneme>> {
        super::parse_csv_to_map(input)?
            .iter()
            .map(Consonant::try_from_map)
            .collect()
    }

    #[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
    pub struct Consonant {
        pub manner: Manner,
        pub place: Place,
        pub voiced: bool,
    }

    impl Consonant {
        pub fn new(manner: Manner, place: Place, voiced: bool) -> Self {
            Self {
                manner,
                place,
                voiced,
            }
        }

        pub fn with_manner(mut self, manner: Manner) -> Self {
            self.manner = manner;
            self
        }

        pub fn with_place(mut self, place: Place) -> Self {
            self.place = place;
            self
        }

        pub fn with_voiced(mut self, voiced: bool) -> Self {
            self.voiced = voiced;
            self
        }

        pub fn category(&self) -> Category {
            match self.manner {
                Manner::Stop | Manner::Fricative | Manner::Affricate => Category::Obstruent,
                Manner::Nasal | Manner::Liquid => Category::Resonant,
            }
        }

        pub fn is_stop(&self) -> bool {
            self.manner == Manner::Stop
        }

        pub fn is_sibilant(&self) -> bool {
            matches!(self.manner, Manner::Fricative | Manner::Affricate)
                && matches!(
                    self.place,
                    Place::Dental | Place::AlveolarCentral | Place::PostAlveolar
                )
        }

        pub fn try_from_map(map: &HashMap<String, String>) -> DiachronResult<Phoneme> {
            let manner = Manner::try_from(field(map, "manner")?)?;
            let place = Place::try_from(field(map, "place")?)?;
            let voiced = parse_binary(field(map, "voice")?, "voiced", "voiceless")?;
            Ok(Phoneme::new(
                field(map, "symbol")?,
                PhonemeKind::Consonant(Consonant::new(manner, place, voiced)),
            ))
        }
    }

    impl std::fmt::Display for Consonant {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(
                f,
                "{} {} {}",
                if self.voiced { "voiced" } else { "voiceless" },
                self.place,
                self.manner
            )
        }
    }

    #[derive(
        Debug,
        Eq,
        PartialEq,
        Ord,
        PartialOrd,
        Copy,
        Clone,
        Hash,
        EnumIter,
        strum_macros::Display,
    )]
    #[strum(serialize_all = "kebab-case")]
    pub enum Manner {
        Stop,
        Fricative,
        Affricate,
        Nasal,
        Liquid,
    }

    impl TryFrom<&str> for Manner {
        type Error = crate::DiachronError;

        fn try_from(value: &str) -> Result<Self, Self::Error> {
            parse_feature("manner", value)
        }
    }

    #[derive(
        Debug,
        Eq,
        PartialEq,
        Ord,
        PartialOrd,
        Copy,
        Clone,
        Hash,
        EnumIter,
        strum_macros::Display,
    )]
    #[strum(serialize_all = "kebab-case")]
    pub enum Place {
        Labial,
        Dental,
        AlveolarCentral,
        AlveolarLateral,
        Retroflex,
        Palatal,
        PostAlveolar,
        Velar,
        Uvular,
        Pharyngeal,
        Glottal,
    }

    impl TryFrom<&str> for Place {
        type Error = crate::DiachronError;

        fn try_from(value: &str) -> Result<Self, Self::Error> {
            parse_feature("place", value)
        }
    }

    #[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, EnumIter, strum_macros::Display)]
    #[strum(serialize_all = "kebab-case")]
    pub enum Category {
        Obstruent,
        Resonant,
    }
}
