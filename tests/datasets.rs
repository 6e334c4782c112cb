// Integration tests for the built-in datasets.
// Native-only; nothing here touches wasm or browser APIs.

use std::collections::HashSet;

use vowel_quest::levels::{level4, level5, level6};
use vowel_quest::{CHARACTERS, CREDENTIALS, GIFT_ITEMS, SEED_ROSTERS, Vowel};

#[test]
fn gift_catalog_has_three_per_vowel_and_unique_ids() {
    let mut seen = HashSet::new();
    for g in GIFT_ITEMS {
        assert!(seen.insert(g.id), "duplicate gift id '{}'", g.id);
        assert!(g.id.starts_with(g.vowel.lower()), "gift '{}' filed under '{}'", g.id, g.vowel);
        assert!(!g.icon.is_empty(), "gift '{}' has no icon", g.id);
    }
    for v in Vowel::ALL {
        let n = GIFT_ITEMS.iter().filter(|g| g.vowel == v).count();
        assert_eq!(n, 3, "vowel {v} has {n} gifts");
    }
}

#[test]
fn characters_are_unique() {
    let ids: HashSet<&str> = CHARACTERS.iter().map(|c| c.id).collect();
    assert_eq!(ids.len(), CHARACTERS.len());
    assert!(CHARACTERS.iter().any(|c| c.id == "sparky"));
}

#[test]
fn every_seeded_roster_has_an_account_and_ids_are_unique() {
    let emails: HashSet<&str> = CREDENTIALS.iter().map(|c| c.email).collect();
    assert_eq!(emails.len(), CREDENTIALS.len(), "duplicate account email");
    let mut ids = HashSet::new();
    for account in SEED_ROSTERS {
        assert!(emails.contains(account.email), "roster for unknown account '{}'", account.email);
        for s in account.students {
            assert!(ids.insert(s.id), "student id {} seeded twice", s.id);
            assert!(!s.name.trim().is_empty());
        }
    }
}

#[test]
fn meteor_words_spell_out_with_their_answers() {
    for w in &level4::WORDS {
        let spelled: String = w
            .segments
            .iter()
            .map(|s| match s {
                level4::Segment::Fixed(t) => (*t).to_string(),
                level4::Segment::Blank(v) => v.upper().to_string(),
            })
            .collect();
        assert_eq!(spelled, w.word.to_uppercase());
        assert!(w.blank_count() > 0, "'{}' has nothing to fill", w.word);
    }
}

#[test]
fn syllable_buttons_cover_every_challenge() {
    for c in &level5::CHALLENGES {
        assert!(level5::SYLLABLES.contains(&c.syllable), "no button for {}", c.syllable);
    }
}

#[test]
fn sentence_cards_match_target_words() {
    let cards: HashSet<&str> = level6::CARDS.iter().map(|c| c.word).collect();
    let target: HashSet<&str> = level6::TARGET.iter().copied().collect();
    assert_eq!(cards, target);
}
