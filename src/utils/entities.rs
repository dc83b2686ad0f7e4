//! Decoding of HTML character references embedded in trivia payloads.

use html_escape::decode_html_entities;

/// Decode every HTML character reference (`&amp;`, `&#039;`, `&#x27;`, ...) in `raw`.
///
/// Unknown references are left untouched, so the function never fails.
pub fn decode_entities(raw: &str) -> String {
    decode_html_entities(raw).into_owned()
}
