//! End-to-end pun generation against a small cmudict-formatted dictionary.

use pun_core::core::loader::parse_dictionary;
use pun_core::{PunConfig, PunEngine, PunError, PunGenerator};
use std::sync::Arc;

const DICT: &str = ";;; toy dictionary in cmudict-0.7b layout\n\
CAT  K AE1 T\n\
KAT  K AE1 T\n\
DOG  D AA1 G\n\
ICE  AY1 S\n\
I  AY1\n\
EYE  AY1\n\
SCREAM  S K R IY1 M\n\
CREAM  K R IY1 M\n\
ICE-CREAM  AY1 S K R IY2 M\n";

fn engine() -> PunEngine {
    let store = parse_dictionary(DICT.as_bytes(), true).unwrap();
    PunEngine::new(store, &PunConfig::default())
}

#[test]
fn toy_dictionary_homophones() {
    let mut engine = engine();
    let cat = engine.generate_puns("CAT").unwrap();
    assert!(cat.contains("CAT") && cat.contains("KAT"));

    let dog = engine.generate_puns("DOG").unwrap();
    assert!(dog.contains("DOG"));
    assert!(!dog.contains("CAT"));
}

#[test]
fn classic_ice_cream_pun() {
    let mut engine = engine();
    let puns = engine.ranked_puns("ice cream").unwrap();
    for expected in ["EYE SCREAM", "I SCREAM", "ICE CREAM", "ICECREAM"] {
        assert!(puns.iter().any(|p| p == expected), "missing {expected} in {puns:?}");
    }
    let mut sorted = puns.clone();
    sorted.sort();
    assert_eq!(puns, sorted);
}

#[test]
fn memoized_entries_never_change() {
    let store = Arc::new(parse_dictionary(DICT.as_bytes(), true).unwrap());
    let mut generator = PunGenerator::new(store);
    let first = generator.generate_puns("ice cream").unwrap();
    let snapshot = generator.memoized("S K R IY M").cloned().unwrap();

    generator.generate_puns("scream").unwrap();
    generator.generate_puns("eye").unwrap();
    let again = generator.generate_puns("ice cream").unwrap();

    assert_eq!(first, again);
    assert_eq!(generator.memoized("S K R IY M"), Some(&snapshot));
}

#[test]
fn absent_word_is_reported() {
    let mut engine = engine();
    match engine.generate_puns("ice cold") {
        Err(PunError::WordNotFound(word)) => assert_eq!(word, "COLD"),
        other => panic!("expected WordNotFound, got {other:?}"),
    }
}

#[test]
fn punctuation_in_phrase_is_normalized() {
    let mut engine = engine();
    let puns = engine.generate_puns("ice-cream").unwrap();
    assert!(puns.contains("I SCREAM"));
}
