use super::{
    apply_positional, apply_random_change, Change, PositionalChange, Replacement, WeightedRule,
};
use crate::inventory::{Inventory, Overrides};
use crate::language::{VowelCriterion, VowelMapping};
use crate::sounds::{Phoneme, Place};
use crate::utils::oxford_comma;
use crate::word::{tokenize, Position, Root};
use crate::{DiachronError, DiachronResult, Language};
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use smallvec::smallvec;
use strum_macros::EnumIter;

/// How often a vowel change reaches every syllable instead of only the stressed ones.
pub const ALL_SYLLABLES_PROBABILITY: f64 = 0.1;

pub const SPLITTING_PALATALIZATION: &str =
    "**Vowel Splitting:** [a] > [æ] when followed by a palatal consonant.";

/// The diphthongs each vowel may break into under stress.
pub const DIPHTHONG_OPTIONS: &[(&str, &[&str])] = &[
    ("a", &["ai", "au"]),
    ("e", &["ei"]),
    ("i", &["ie", "ia"]),
    ("o", &["ou"]),
    ("u", &["ue", "uo"]),
];

#[derive(Debug, Copy, Clone, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SyllableScope {
    All,
    Stressed,
}

impl SyllableScope {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(ALL_SYLLABLES_PROBABILITY) {
            SyllableScope::All
        } else {
            SyllableScope::Stressed
        }
    }

    pub fn includes(self, root: &Root, syllable: usize) -> bool {
        match self {
            SyllableScope::All => true,
            SyllableScope::Stressed => root.stresses(syllable),
        }
    }
}

/// Replaces vowels by what a mapping pairs them with, inside a scope.
pub struct VowelChange {
    mapping: VowelMapping,
    scope: SyllableScope,
}

impl VowelChange {
    pub fn new(mut mapping: VowelMapping, scope: SyllableScope) -> Self {
        mapping.retain(|(from, to)| from != to);
        Self { mapping, scope }
    }

    fn target(&self, phoneme: &'static Phoneme) -> Option<&'static Phoneme> {
        self.mapping
            .iter()
            .find(|(from, _)| *from == phoneme)
            .map(|(_, to)| *to)
    }
}

impl PositionalChange for VowelChange {
    fn evaluate(&self, root: &Root, at: Position, phoneme: &'static Phoneme) -> bool {
        self.scope.includes(root, at.syllable) && self.target(phoneme).is_some()
    }

    fn transform(&self, _: &Root, _: Position, phoneme: &'static Phoneme) -> Replacement {
        smallvec![self.target(phoneme).unwrap_or(phoneme)]
    }
}

/// The description of a mapped vowel change, plus the vowels it actually moves.
pub fn describe_vowel_change(
    mapping: &VowelMapping,
    name: &str,
    scope: SyllableScope,
) -> (String, Vec<&'static Phoneme>) {
    let moved = mapping
        .iter()
        .filter(|(from, to)| from != to)
        .collect::<Vec<_>>();
    let description = if moved.is_empty() {
        format!("**Vowel {}:** No changes.", name)
    } else {
        let changes = moved
            .iter()
            .map(|(from, to)| format!("[{}] > [{}]", from, to))
            .collect::<Vec<_>>();
        format!(
            "**Vowel {}:** {} in {} syllables.",
            name,
            oxford_comma(&changes),
            scope
        )
    };
    (description, moved.into_iter().map(|(from, _)| *from).collect())
}

pub fn apply_vowel_change(
    language: &Language,
    mapping: VowelMapping,
    name: &str,
    scope: SyllableScope,
) -> DiachronResult<Change> {
    let (description, moved) = describe_vowel_change(&mapping, name, scope);
    log::debug!("vowel {} moves {}", name.to_lowercase(), moved.iter().join(" "));
    let rule = VowelChange::new(mapping, scope);
    Ok(Change::new(description, apply_positional(language, &rule)?))
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, strum_macros::Display)]
pub enum VowelShift {
    Raising,
    Lowering,
    Fronting,
    Backing,
}

impl VowelShift {
    /// The axis to move along, and whether the move heads for the close or front end.
    fn axis(self) -> (VowelCriterion, bool) {
        match self {
            VowelShift::Raising => (VowelCriterion::Height, true),
            VowelShift::Lowering => (VowelCriterion::Height, false),
            VowelShift::Fronting => (VowelCriterion::Location, true),
            VowelShift::Backing => (VowelCriterion::Location, false),
        }
    }
}

pub fn shift_vowels(
    language: &Language,
    shift: VowelShift,
    scope: SyllableScope,
) -> DiachronResult<Change> {
    let (criterion, reverse) = shift.axis();
    let mapping = language.vowel_mapping(criterion, reverse)?;
    apply_vowel_change(language, mapping, &shift.to_string(), scope)
}

pub fn vowel_raising(language: &Language, rng: &mut dyn RngCore) -> DiachronResult<Change> {
    shift_vowels(language, VowelShift::Raising, SyllableScope::random(rng))
}

pub fn vowel_lowering(language: &Language, rng: &mut dyn RngCore) -> DiachronResult<Change> {
    shift_vowels(language, VowelShift::Lowering, SyllableScope::random(rng))
}

pub fn vowel_fronting(language: &Language, rng: &mut dyn RngCore) -> DiachronResult<Change> {
    shift_vowels(language, VowelShift::Fronting, SyllableScope::random(rng))
}

pub fn vowel_backing(language: &Language, rng: &mut dyn RngCore) -> DiachronResult<Change> {
    shift_vowels(language, VowelShift::Backing, SyllableScope::random(rng))
}

/// Pairs every vowel of the language with its long or short form. Vowels without one stay put.
pub fn length_mapping(language: &Language, long: bool) -> DiachronResult<VowelMapping> {
    let inventory = Inventory::global();
    let (_, vowels) = language.take_inventory()?;
    Ok(vowels
        .into_iter()
        .map(|v| (v, inventory.find_similar(v, Overrides::long(long)).unwrap_or(v)))
        .collect())
}

pub fn change_vowel_length(
    language: &Language,
    long: bool,
    scope: SyllableScope,
) -> DiachronResult<Change> {
    let name = if long { "Lengthening" } else { "Shortening" };
    apply_vowel_change(language, length_mapping(language, long)?, name, scope)
}

pub fn vowel_lengthening(language: &Language, rng: &mut dyn RngCore) -> DiachronResult<Change> {
    change_vowel_length(language, true, SyllableScope::random(rng))
}

pub fn vowel_shortening(language: &Language, rng: &mut dyn RngCore) -> DiachronResult<Change> {
    change_vowel_length(language, false, SyllableScope::random(rng))
}

/// [a] fronts to [æ] before a palatal consonant.
pub struct SplittingPalatalization;

impl PositionalChange for SplittingPalatalization {
    fn evaluate(&self, root: &Root, at: Position, phoneme: &'static Phoneme) -> bool {
        phoneme.symbol() == "a"
            && root
                .following(at)
                .and_then(|p| p.consonant())
                .is_some_and(|c| c.place == Place::Palatal)
    }

    fn transform(&self, _: &Root, _: Position, phoneme: &'static Phoneme) -> Replacement {
        smallvec![Inventory::global().lookup("æ").unwrap_or(phoneme)]
    }
}

pub fn splitting_palatalization(
    language: &Language,
    _: &mut dyn RngCore,
) -> DiachronResult<Change> {
    Ok(Change::new(
        SPLITTING_PALATALIZATION,
        apply_positional(language, &SplittingPalatalization)?,
    ))
}

/// One vowel breaks into a sequence of vowels in stressed syllables.
pub struct Diphthongization {
    original: &'static Phoneme,
    target: Replacement,
}

impl Diphthongization {
    pub fn new(original: &str, target: &str) -> DiachronResult<Self> {
        let original = Inventory::global()
            .lookup(original)
            .filter(|p| p.is_vowel())
            .ok_or_else(|| DiachronError::InvalidFeature {
                feature: "vowel",
                value: original.to_string(),
                choices: DIPHTHONG_OPTIONS.iter().map(|(v, _)| v).join(", "),
            })?;
        let target = tokenize(target)?.into_iter().collect();
        Ok(Self { original, target })
    }
}

impl PositionalChange for Diphthongization {
    fn evaluate(&self, root: &Root, at: Position, phoneme: &'static Phoneme) -> bool {
        root.stresses(at.syllable) && phoneme == self.original
    }

    fn transform(&self, _: &Root, _: Position, _: &'static Phoneme) -> Replacement {
        self.target.clone()
    }
}

pub fn stress_diphthongization(
    language: &Language,
    original: &str,
    target: &str,
) -> DiachronResult<Change> {
    let rule = Diphthongization::new(original, target)?;
    Ok(Change::new(
        format!(
            "**Vowel Splitting:** [{}] > [{}] in stressed syllables.",
            original, target
        ),
        apply_positional(language, &rule)?,
    ))
}

pub fn splitting_diphthongization(
    language: &Language,
    rng: &mut dyn RngCore,
) -> DiachronResult<Change> {
    let Some((original, targets)) = DIPHTHONG_OPTIONS.choose(rng) else {
        return Ok(Change::unchanged(language));
    };
    let target = targets.choose(rng).copied().unwrap_or(*original);
    stress_diphthongization(language, original, target)
}

pub const SPLITTING: &[WeightedRule] = &[
    WeightedRule {
        name: "palatalization",
        weight: 1,
        rule: splitting_palatalization,
    },
    WeightedRule {
        name: "diphthongization",
        weight: 3,
        rule: splitting_diphthongization,
    },
];

pub fn vowel_splitting(language: &Language, rng: &mut dyn RngCore) -> DiachronResult<Change> {
    apply_random_change(language, SPLITTING, rng)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::{language, words};
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn shifted(
        shift: VowelShift,
        scope: SyllableScope,
        nucleus: &[(&str, usize)],
        input: &[&str],
    ) -> Change {
        let lang = language(&[("b", 1)], nucleus, &[], input);
        shift_vowels(&lang, shift, scope).unwrap()
    }

    #[test]
    fn t_scope() {
        assert_eq!(SyllableScope::random(&mut StepRng::new(0, 0)), SyllableScope::All);
        assert_eq!(
            SyllableScope::random(&mut StepRng::new(u64::MAX, 0)),
            SyllableScope::Stressed
        );
        assert_eq!(SyllableScope::All.to_string(), "all");
        assert_eq!(SyllableScope::Stressed.to_string(), "stressed");

        let root = Root::parse("/ba.ˈba/").unwrap();
        assert!(!SyllableScope::Stressed.includes(&root, 0));
        assert!(SyllableScope::Stressed.includes(&root, 1));
        assert!(SyllableScope::All.includes(&root, 0));
    }

    #[test]
    fn t_describe_vowel_change() {
        let lang = language(&[("b", 1)], &[("a", 1), ("e", 1)], &[], &["/ba/"]);
        let mapping = lang.vowel_mapping(VowelCriterion::Height, true).unwrap();
        let (description, moved) = describe_vowel_change(&mapping, "Lowering", SyllableScope::All);
        assert_eq!(description, "**Vowel Lowering:** [a] > [e] in all syllables.");
        assert_eq!(moved.iter().map(|p| p.symbol()).collect::<Vec<_>>(), vec!["a"]);

        let (description, _) = describe_vowel_change(&mapping, "Lowering", SyllableScope::Stressed);
        assert_eq!(description, "**Vowel Lowering:** [a] > [e] in stressed syllables.");

        let still = language(&[], &[("a", 1)], &[], &[]);
        let mapping = still.vowel_mapping(VowelCriterion::Height, false).unwrap();
        let (description, moved) = describe_vowel_change(&mapping, "Lowering", SyllableScope::All);
        assert_eq!(description, "**Vowel Lowering:** No changes.");
        assert!(moved.is_empty());
    }

    #[test]
    fn t_vowel_backing() {
        let nucleus = [("a", 1), ("ɑ", 1), ("i", 1), ("u", 1)];
        let input = ["/ˈba.ba/", "/ˈbɑ.ba/", "/ba/"];
        let all = shifted(VowelShift::Backing, SyllableScope::All, &nucleus, &input);
        assert_eq!(all.description, "**Vowel Backing:** [a] > [ɑ] in all syllables.");
        assert_eq!(all.words, words(&["/ˈbɑ.bɑ/", "/ˈbɑ.bɑ/", "/bɑ/"]));

        let stressed = shifted(VowelShift::Backing, SyllableScope::Stressed, &nucleus, &input);
        assert_eq!(stressed.description, "**Vowel Backing:** [a] > [ɑ] in stressed syllables.");
        assert_eq!(stressed.words, words(&["/ˈbɑ.ba/", "/ˈbɑ.ba/", "/bɑ/"]));
    }

    #[test]
    fn t_vowel_fronting() {
        let nucleus = [("a", 1), ("ɑ", 1), ("i", 1), ("u", 1)];
        let input = ["/ˈbɑ.bɑ/", "/ˈba.ba/", "/bɑ/"];
        let all = shifted(VowelShift::Fronting, SyllableScope::All, &nucleus, &input);
        assert_eq!(all.description, "**Vowel Fronting:** [ɑ] > [a] in all syllables.");
        assert_eq!(all.words, words(&["/ˈba.ba/", "/ˈba.ba/", "/ba/"]));

        let stressed = shifted(VowelShift::Fronting, SyllableScope::Stressed, &nucleus, &input);
        assert_eq!(stressed.words, words(&["/ˈba.bɑ/", "/ˈba.ba/", "/ba/"]));
    }

    #[test]
    fn t_vowel_lowering() {
        let nucleus = [("a", 1), ("e", 1), ("i", 1)];
        let input = ["/ˈba.be/", "/ˈbe.bi/", "/be/"];
        let all = shifted(VowelShift::Lowering, SyllableScope::All, &nucleus, &input);
        assert_eq!(
            all.description,
            "**Vowel Lowering:** [i] > [e] and [e] > [a] in all syllables."
        );
        assert_eq!(all.words, words(&["/ˈba.ba/", "/ˈba.be/", "/ba/"]));

        let stressed = shifted(VowelShift::Lowering, SyllableScope::Stressed, &nucleus, &input);
        assert_eq!(
            stressed.description,
            "**Vowel Lowering:** [i] > [e] and [e] > [a] in stressed syllables."
        );
        assert_eq!(stressed.words, words(&["/ˈba.be/", "/ˈba.bi/", "/ba/"]));
    }

    #[test]
    fn t_vowel_raising() {
        let nucleus = [("a", 1), ("e", 1), ("i", 1)];
        let input = ["/ˈba.be/", "/ˈbe.bi/", "/be/"];
        let all = shifted(VowelShift::Raising, SyllableScope::All, &nucleus, &input);
        assert_eq!(
            all.description,
            "**Vowel Raising:** [a] > [e] and [e] > [i] in all syllables."
        );
        assert_eq!(all.words, words(&["/ˈbe.bi/", "/ˈbi.bi/", "/bi/"]));

        let stressed = shifted(VowelShift::Raising, SyllableScope::Stressed, &nucleus, &input);
        assert_eq!(stressed.words, words(&["/ˈbe.be/", "/ˈbi.bi/", "/bi/"]));
    }

    #[test]
    fn t_random_scope() {
        let lang = language(&[("b", 1)], &[("a", 1), ("e", 1)], &[], &["/ˈba.be/"]);
        let mut rng = StdRng::seed_from_u64(2);
        let rules: [super::super::RuleFn; 6] = [
            vowel_raising,
            vowel_lowering,
            vowel_fronting,
            vowel_backing,
            vowel_lengthening,
            vowel_shortening,
        ];
        for rule in rules {
            let change = rule(&lang, &mut rng).unwrap();
            assert!(
                change.description.ends_with("in all syllables.")
                    || change.description.ends_with("in stressed syllables.")
                    || change.description.ends_with("No changes."),
                "{}",
                change.description
            );
        }
    }

    #[test]
    fn t_vowel_lengthening() {
        let lang = language(&[("b", 1)], &[("a:", 1), ("a", 1)], &[], &["/ˈba.ba/", "/ba/"]);
        let all = change_vowel_length(&lang, true, SyllableScope::All).unwrap();
        assert_eq!(all.description, "**Vowel Lengthening:** [a] > [a:] in all syllables.");
        assert_eq!(all.words, words(&["/ˈba:.ba:/", "/ba:/"]));

        let stressed = change_vowel_length(&lang, true, SyllableScope::Stressed).unwrap();
        assert_eq!(
            stressed.description,
            "**Vowel Lengthening:** [a] > [a:] in stressed syllables."
        );
        assert_eq!(stressed.words, words(&["/ˈba:.ba/", "/ba:/"]));
    }

    #[test]
    fn t_vowel_shortening() {
        let lang = language(&[("b", 1)], &[("a:", 1), ("a", 1)], &[], &["/ˈba:.ba:/", "/ba:/"]);
        let all = change_vowel_length(&lang, false, SyllableScope::All).unwrap();
        assert_eq!(all.description, "**Vowel Shortening:** [a:] > [a] in all syllables.");
        assert_eq!(all.words, words(&["/ˈba.ba/", "/ba/"]));

        let stressed = change_vowel_length(&lang, false, SyllableScope::Stressed).unwrap();
        assert_eq!(stressed.words, words(&["/ˈba.ba:/", "/ba/"]));
    }

    #[test]
    fn t_splitting_palatalization() {
        let lang = language(&[("b", 1)], &[("a:", 1)], &[], &["/baʧ/", "/baʃ/"]);
        let change = splitting_palatalization(&lang, &mut StepRng::new(0, 0)).unwrap();
        assert_eq!(change.description, SPLITTING_PALATALIZATION);
        assert_eq!(change.words, words(&["/bæʧ/", "/baʃ/"]));
    }

    #[test]
    fn t_stress_diphthongization() {
        let lang = language(
            &[("b", 1)],
            &[("a", 1), ("e", 1), ("i", 1), ("o", 1), ("u", 1)],
            &[],
            &["/ˈban.pan/", "/ˈben.pen/", "/ˈbin.pin/", "/ˈbon.pon/", "/ˈbun.pun/"],
        );
        let cases = [
            ("a", "au", 0, "/ˈbaun.pan/"),
            ("a", "ai", 0, "/ˈbain.pan/"),
            ("e", "ei", 1, "/ˈbein.pen/"),
            ("i", "ie", 2, "/ˈbien.pin/"),
            ("i", "ia", 2, "/ˈbian.pin/"),
            ("o", "ou", 3, "/ˈboun.pon/"),
            ("u", "ue", 4, "/ˈbuen.pun/"),
            ("u", "uo", 4, "/ˈbuon.pun/"),
        ];
        for (original, target, index, expected) in cases {
            let change = stress_diphthongization(&lang, original, target).unwrap();
            assert_eq!(
                change.description,
                format!("**Vowel Splitting:** [{}] > [{}] in stressed syllables.", original, target)
            );
            for (i, word) in change.words.iter().enumerate() {
                if i == index {
                    assert_eq!(word, expected);
                } else {
                    assert_eq!(word, &lang.words[i]);
                }
            }
        }
    }

    #[test]
    fn t_diphthongization_rejects_consonants() {
        let lang = language(&[], &[], &[], &["/ba/"]);
        assert!(matches!(
            stress_diphthongization(&lang, "b", "ai"),
            Err(DiachronError::InvalidFeature { feature: "vowel", .. })
        ));
    }

    #[test]
    fn t_vowel_splitting() {
        let lang = language(&[("b", 1)], &[("a:", 1)], &[], &["/baʧ/", "/baʃ/"]);
        let first = vowel_splitting(&lang, &mut StepRng::new(0, 0)).unwrap();
        assert_eq!(first.description, SPLITTING_PALATALIZATION);

        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..10 {
            let change = vowel_splitting(&lang, &mut rng).unwrap();
            assert!(change.description.starts_with("**Vowel Splitting:**"));
            assert_eq!(change.words.len(), 2);
        }
    }
}
