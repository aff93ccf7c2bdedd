//! Plain-English word substitution applied to every displayed item.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Word → simpler replacement.
pub const SIMPLER_WORDS: &[(&str, &str)] = &[
    ("utilize", "use"),
    ("demonstrate", "show"),
    ("implement", "put in place"),
    ("facilitate", "help"),
    ("commence", "start"),
    ("terminate", "end"),
    ("subsequently", "then"),
    ("furthermore", "also"),
    ("nevertheless", "however"),
    ("accordingly", "so"),
    ("therefore", "so"),
    ("consequently", "as a result"),
    ("approximately", "about"),
    ("sufficient", "enough"),
    ("numerous", "many"),
    ("acquire", "get"),
    ("assist", "help"),
    ("attempt", "try"),
    ("construct", "build"),
    ("examine", "look at"),
    ("indicate", "show"),
    ("maintain", "keep"),
    ("obtain", "get"),
    ("previous", "earlier"),
    ("require", "need"),
    ("significant", "important"),
];

static REPLACEMENTS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| SIMPLER_WORDS.iter().copied().collect());

/// Replace difficult words token by token.
///
/// A replaced token keeps its leading and trailing punctuation, and a
/// capitalized token yields a capitalized replacement. Tokens are re-joined
/// with single spaces.
pub fn simplify(sentence: &str) -> String {
    sentence
        .split_whitespace()
        .map(simplify_token)
        .collect::<Vec<_>>()
        .join(" ")
}

fn simplify_token(token: &str) -> String {
    let core_start = token
        .char_indices()
        .find(|(_, c)| c.is_alphanumeric())
        .map(|(i, _)| i);
    let Some(core_start) = core_start else {
        return token.to_string();
    };
    let core_end = token
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_alphanumeric())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(token.len());

    let core = &token[core_start..core_end];
    let Some(replacement) = REPLACEMENTS.get(core.to_lowercase().as_str()) else {
        return token.to_string();
    };

    let starts_upper = core.chars().next().map(char::is_uppercase).unwrap_or(false);
    let replacement = if starts_upper {
        capitalize(replacement)
    } else {
        replacement.to_string()
    };

    format!("{}{}{}", &token[..core_start], replacement, &token[core_end..])
}

/// Upper-case the first character, leave the rest untouched.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
