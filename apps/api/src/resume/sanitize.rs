//! Typographic cleanup applied to generated text before it reaches the PDF layer.
//!
//! The PDF is set in the standard Type1 Helvetica faces, so everything is
//! folded down to printable ASCII. Known typographic characters get a plain
//! equivalent; anything else becomes [`PLACEHOLDER`].

/// Replacement for characters with no ASCII equivalent.
pub const PLACEHOLDER: char = '?';

/// Typographic characters and their ASCII stand-ins.
const SUBSTITUTIONS: &[(char, &str)] = &[
    ('\u{2013}', "-"),    // en dash
    ('\u{2014}', "-"),    // em dash
    ('\u{2018}', "'"),    // left single quote
    ('\u{2019}', "'"),    // right single quote
    ('\u{201C}', "\""),   // left double quote
    ('\u{201D}', "\""),   // right double quote
    ('\u{2022}', "*"),    // bullet
    ('\u{2026}', "..."),  // ellipsis
    ('\u{2028}', "\n"),   // line separator
    ('\u{2029}', "\n\n"), // paragraph separator
];

/// Returns `text` with the substitution table applied and every remaining
/// non-ASCII character replaced by [`PLACEHOLDER`].
///
/// The output is pure ASCII, so applying this twice is a no-op.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii() {
            out.push(c);
            continue;
        }
        match SUBSTITUTIONS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => out.push_str(to),
            None => out.push(PLACEHOLDER),
        }
    }
    out
}
