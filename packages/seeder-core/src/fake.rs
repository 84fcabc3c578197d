//! Lorem ipsum text and identifier generation for seed notifications.

use crate::NotificationSeed;
use rand::Rng;
use rand::seq::SliceRandom;
use uuid::{Builder, Uuid};

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in",
    "reprehenderit", "voluptate", "velit", "esse", "cillum", "fugiat", "nulla", "pariatur",
    "excepteur", "sint", "occaecat", "cupidatat", "non", "proident", "sunt", "culpa", "qui",
    "officia", "deserunt", "mollit", "anim", "id", "est", "laborum",
];

const TITLE_WORDS: usize = 4;
const ORDER_ID_BOUND: i32 = 100;

/// `n` lowercase words separated by single spaces.
pub fn lorem_words<R: Rng>(rng: &mut R, n: usize) -> String {
    (0..n)
        .map(|_| WORDS.choose(rng).copied().unwrap_or("lorem"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One capitalized sentence of 3 to 10 words ending in a period.
pub fn lorem_sentence<R: Rng>(rng: &mut R) -> String {
    let count = rng.gen_range(3..=10);
    format!("{}.", capitalize_first(&lorem_words(rng, count)))
}

/// 2 to 6 sentences joined by a space.
pub fn lorem_sentences<R: Rng>(rng: &mut R) -> String {
    let count = rng.gen_range(2..=6);
    (0..count)
        .map(|_| lorem_sentence(rng))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Random v4 uuid drawn from `rng` rather than the OS source.
pub fn uuid_v4<R: Rng>(rng: &mut R) -> Uuid {
    Builder::from_random_bytes(rng.r#gen()).into_uuid()
}

impl NotificationSeed {
    pub fn fake<R: Rng>(rng: &mut R) -> Self {
        Self {
            title: capitalize_first(&lorem_words(rng, TITLE_WORDS)),
            content: lorem_sentences(rng),
            user_id: uuid_v4(rng),
            order_id: rng.gen_range(0..ORDER_ID_BOUND),
        }
    }
}
