//! Reply post-processing: markdown-ish symbols become plain text, known
//! banking terms get an emoji prefix.
//!
//! Each step is a pure `&str -> String` function and [`format`] runs them in a
//! fixed order. The order matters: bold spans must be consumed before single
//! emphasis, and both before stray asterisks are stripped.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^\n]+?)\*\*").unwrap());
static EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*\n]+)\*").unwrap());
static ASTERISKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*+").unwrap());
static NUMBERED_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(\d+\.[ \t].*)$").unwrap());
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").unwrap());

pub const LIST_MARKER: &str = "📋 ";

/// Domain terms and the emoji that precedes them. Matching is exact and case-sensitive.
pub const VOCABULARY: &[(&str, &str)] = &[
    ("Cuenta de Ahorro", "💰"),
    ("Cuenta Corriente", "🏦"),
    ("Tarjeta de Crédito", "💳"),
    ("Tarjeta de Débito", "💳"),
    ("Préstamo", "🤝"),
    ("Inversión", "📈"),
    ("Transferencia", "💸"),
    ("Presupuesto", "📊"),
    ("Frecuencias altas", "🔁"),
    ("Movimientos grandes", "⚠️"),
];

type Step = fn(&str) -> String;

const PIPELINE: &[Step] = &[
    unify_line_endings,
    shout_bold,
    bullet_emphasis,
    strip_asterisks,
    mark_numbered_lines,
    decorate_vocabulary,
    collapse_blank_lines,
];

pub fn format(raw: &str) -> String {
    let out = PIPELINE
        .iter()
        .fold(raw.to_string(), |text, step| step(&text));
    out.trim().to_string()
}

/// CRLF becomes LF so the line-based steps see one kind of ending.
pub fn unify_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// `**x**` -> `X`. The span may contain single emphasis, which step two turns into a bullet.
pub fn shout_bold(text: &str) -> String {
    BOLD.replace_all(text, |caps: &Captures| caps[1].to_uppercase())
        .into_owned()
}

/// `*x*` -> `• x`
pub fn bullet_emphasis(text: &str) -> String {
    EMPHASIS.replace_all(text, "• $1").into_owned()
}

pub fn strip_asterisks(text: &str) -> String {
    ASTERISKS.replace_all(text, "").into_owned()
}

/// Lines like `2. Deposit` get a marker and a blank line on each side.
pub fn mark_numbered_lines(text: &str) -> String {
    NUMBERED_LINE
        .replace_all(text, |caps: &Captures| format!("\n{LIST_MARKER}{}\n", &caps[1]))
        .into_owned()
}

/// Prefix every vocabulary term with its emoji, inside bullets and list lines too.
/// A term already preceded by its own prefix is left alone, so running this
/// twice changes nothing; text from the server that is already decorated is
/// not decorated a second time.
pub fn decorate_vocabulary(text: &str) -> String {
    VOCABULARY.iter().fold(text.to_string(), |acc, (term, emoji)| {
        let prefix = format!("{emoji} ");
        let mut out = String::with_capacity(acc.len());
        let mut last = 0;
        for (idx, _) in acc.match_indices(term) {
            out.push_str(&acc[last..idx]);
            if !out.ends_with(&prefix) {
                out.push_str(&prefix);
            }
            out.push_str(term);
            last = idx + term.len();
        }
        out.push_str(&acc[last..]);
        out
    })
}

/// Two or more consecutive blank lines become one.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN.replace_all(text, "\n\n").into_owned()
}
