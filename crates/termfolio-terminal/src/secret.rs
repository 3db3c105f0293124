//! The per-session Easter-egg secret.
//!
//! A random word is picked at startup and shown, Caesar-shifted, somewhere in
//! the background. Typing `echo <word>` in the terminal is the answer.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use termfolio_types::error::Result;

use crate::cipher;

/// Shortest word the secret may be.
pub const MIN_LEN: usize = 5;
/// Longest word the secret may be.
pub const MAX_LEN: usize = 12;

const WORDS: &[&str] = &[
    "anchor", "balloon", "blanket", "bridge", "butterfly", "cabinet", "camera", "candle",
    "canyon", "captain", "carpet", "castle", "chimney", "circle", "climate", "cobweb",
    "compass", "cottage", "crystal", "daughter", "desert", "diamond", "dolphin", "dragon",
    "eclipse", "elephant", "engine", "feather", "festival", "forest", "fountain", "galaxy",
    "garden", "giraffe", "glacier", "guitar", "hammock", "harbor", "harvest", "helmet",
    "horizon", "island", "jacket", "journey", "jungle", "kettle", "kingdom", "lantern",
    "library", "lighthouse", "magnet", "marble", "meadow", "mirror", "monster", "mountain",
    "notebook", "ocean", "orchard", "oxygen", "paddle", "palace", "parrot", "pebble",
    "pepper", "pillow", "planet", "pocket", "puzzle", "pyramid", "rabbit", "rainbow",
    "rocket", "saddle", "sandwich", "satellite", "shadow", "silver", "spider", "squirrel",
    "station", "summer", "sunflower", "teapot", "thunder", "tiger", "tornado", "trumpet",
    "tunnel", "umbrella", "valley", "velvet", "village", "violin", "volcano", "wagon",
    "walrus", "whisper", "window", "winter", "wizard", "yellow", "zipper",
];

/// A random word paired with the shift used to hide it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secret {
    plaintext: String,
    shift: u8,
}

#[derive(Serialize)]
struct Banner<'a> {
    secret_message: &'a str,
    #[serde(rename = "ceaser")]
    shift: u8,
}

impl Secret {
    /// Build a secret from a known word. `shift` is reduced mod 26.
    pub fn new(plaintext: impl Into<String>, shift: u8) -> Self {
        Self {
            plaintext: plaintext.into(),
            shift: shift % 26,
        }
    }

    /// Pick a random word and shift.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let candidates: Vec<&str> = WORDS
            .iter()
            .copied()
            .filter(|w| (MIN_LEN..=MAX_LEN).contains(&w.len()))
            .collect();
        let word = candidates.choose(rng).copied().unwrap_or("termfolio");
        let shift = rng.gen_range(0..26);
        log::debug!("Generated session secret ({} letters, shift {shift})", word.len());
        log::trace!("Session secret: {word}");
        Self::new(word, shift)
    }

    pub fn plaintext(&self) -> &str {
        &self.plaintext
    }

    pub fn shift(&self) -> u8 {
        self.shift
    }

    pub fn ciphertext(&self) -> String {
        cipher::encode(&self.plaintext, self.shift)
    }

    /// The one-line JSON clue hidden in the background, e.g.
    /// `{ "secret_message": "khoor", "ceaser": 3 }`.
    pub fn banner(&self) -> String {
        match self.banner_json() {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to encode secret banner: {e}");
                self.ciphertext()
            },
        }
    }

    /// The banner as single-line JSON.
    pub fn banner_json(&self) -> Result<String> {
        let ciphertext = self.ciphertext();
        let banner = Banner {
            secret_message: &ciphertext,
            shift: self.shift,
        };
        let json = serde_json::to_string_pretty(&banner)?;
        Ok(json.split_whitespace().collect::<Vec<_>>().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generated_word_is_lowercase_and_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let s = Secret::generate(&mut rng);
            assert!((MIN_LEN..=MAX_LEN).contains(&s.plaintext().len()));
            assert!(s.plaintext().chars().all(|c| c.is_ascii_lowercase()));
            assert!(s.shift() < 26);
        }
    }

    #[test]
    fn same_seed_same_secret() {
        let a = Secret::generate(&mut StdRng::seed_from_u64(42));
        let b = Secret::generate(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn ciphertext_decodes_to_plaintext() {
        let s = Secret::new("hello", 3);
        assert_eq!(s.ciphertext(), "khoor");
        assert_eq!(cipher::decode(&s.ciphertext(), s.shift()), "hello");
    }

    #[test]
    fn shift_is_reduced() {
        assert_eq!(Secret::new("abcde", 29).shift(), 3);
    }

    #[test]
    fn banner_is_single_line_json() {
        let s = Secret::new("hello", 3);
        assert_eq!(s.banner(), r#"{ "secret_message": "khoor", "ceaser": 3 }"#);
    }

    #[test]
    fn banner_json_parses_back() {
        let s = Secret::new("lantern", 4);
        let json = s.banner_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["secret_message"], s.ciphertext());
        assert_eq!(value["ceaser"], 4);
    }

    #[test]
    fn word_list_has_only_valid_words() {
        assert!(WORDS.iter().all(|w| w.chars().all(|c| c.is_ascii_lowercase())));
        assert!(WORDS.iter().all(|w| (MIN_LEN..=MAX_LEN).contains(&w.len())));
    }
}
