// Quick Define URL builder
// Turns a dictionary URL template and a selected word into a lookup URL.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::types::dictionary::WORD_PLACEHOLDER;

/// Characters left as-is when encoding a URI component: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes `value` as a single URI component.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Builds the lookup URL for `word`.
///
/// The word is trimmed, percent-encoded and substituted for the first `{word}`
/// in `template`. A template without a placeholder is returned unchanged.
pub fn build_search_url(template: &str, word: &str) -> String {
    let encoded = encode_component(word.trim());
    template.replacen(WORD_PLACEHOLDER, &encoded, 1)
}

/// Number of `{word}` occurrences in `template`.
pub fn placeholder_count(template: &str) -> usize {
    template.matches(WORD_PLACEHOLDER).count()
}
