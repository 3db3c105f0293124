//! Caesar shift over the lowercase ASCII alphabet.

const ALPHABET_LEN: u8 = 26;

/// Shift every `a`-`z` character of `message` forward by `shift` (mod 26).
///
/// Callers are expected to pass lowercase alphabetic text. Any other
/// character is copied through unchanged.
pub fn encode(message: &str, shift: u8) -> String {
    let shift = shift % ALPHABET_LEN;
    message
        .chars()
        .map(|ch| {
            if ch.is_ascii_lowercase() {
                let index = ch as u8 - b'a';
                char::from(b'a' + (index + shift) % ALPHABET_LEN)
            } else {
                ch
            }
        })
        .collect()
}

/// Undo [`encode`] with the same `shift`.
pub fn decode(message: &str, shift: u8) -> String {
    encode(message, (ALPHABET_LEN - shift % ALPHABET_LEN) % ALPHABET_LEN)
}
