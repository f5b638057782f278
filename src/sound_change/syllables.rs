use super::Change;
use crate::word::Root;
use crate::{DiachronResult, Language};
use rand::RngCore;

pub const HAPLOLOGY: &str =
    "**Haplology:** Repeated syllables are reduced to just one instance of that syllable.";

/// Collapses each run of identical syllables into its first one, which keeps any stress the run
/// carried.
pub fn reduce_repeats(word: &str) -> DiachronResult<String> {
    let mut root = Root::parse(word)?;
    root.syllables.dedup_by(|later, earlier| {
        let repeated = later.phonemes == earlier.phonemes;
        if repeated {
            earlier.stressed |= later.stressed;
        }
        repeated
    });
    let rebuilt = root.rebuild();
    if rebuilt != word {
        log::trace!("{} > {}", word, rebuilt);
    }
    Ok(rebuilt)
}

pub fn haplology(language: &Language, _: &mut dyn RngCore) -> DiachronResult<Change> {
    let words = language
        .words
        .iter()
        .map(|w| reduce_repeats(w))
        .collect::<DiachronResult<Vec<_>>>()?;
    Ok(Change::new(HAPLOLOGY, words))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::{language, words};
    use rand::rngs::mock::StepRng;

    #[test]
    fn t_haplology() {
        let lang = language(
            &[("b", 1)],
            &[("a", 1)],
            &[("b", 1)],
            &["/ˈba.ba/", "/ba/", "/ba.ˈba.ba.di/", "/ˈba.bab/"],
        );
        let change = haplology(&lang, &mut StepRng::new(0, 0)).unwrap();
        assert_eq!(change.description, HAPLOLOGY);
        assert_eq!(change.words, words(&["/ba/", "/ba/", "/ˈba.di/", "/ˈba.bab/"]));
    }

    #[test]
    fn t_only_adjacent_repeats() {
        assert_eq!(reduce_repeats("/ˈba.di.ba/").unwrap(), "/ˈba.di.ba/");
        assert_eq!(reduce_repeats("/ba.ˈdi.di.ba.ba/").unwrap(), "/ba.ˈdi.ba/");
    }

    #[test]
    fn t_whole_run_collapses() {
        assert_eq!(reduce_repeats("/ˈba.ba.ba.di/").unwrap(), "/ˈba.di/");
        assert_eq!(reduce_repeats("/di.ba.ba.ˈba/").unwrap(), "/di.ˈba/");
        assert_eq!(reduce_repeats("/ba.ba.ba/").unwrap(), "/ba/");
    }
}
