//! Per-record text normalization.
//!
//! Three steps, in fixed order: markup stripping, stopword removal, stray
//! asterisk removal. The composed transformation is pure and deterministic;
//! the only side effect is a `tracing` warning when markup parsing fails and
//! the salvaged-text substitute kicks in.

use std::collections::HashSet;
use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;
use tracing::warn;

use crate::constants::normalize::{ENTITY_MAX_LEN, STRAY_CHAR, STRIPPED_CHARS};
use crate::stopwords::Language;
use crate::types::NormalizedText;

/// Markup stripping failure. Always recovered locally: the visible text
/// accumulated before the failure point is kept and the run continues.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MarkupError {
    /// Input ended inside an unterminated tag; the dangling fragment was
    /// dropped.
    #[error("markup ended inside an unterminated tag")]
    UnterminatedTag,
}

/// Result of markup stripping, distinguishing fully cleaned text from the
/// salvaged substitute installed after a parse failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CleanOutcome {
    /// Markup parsed; visible text extracted and normalized.
    Cleaned(NormalizedText),
    /// Parsing failed; the carried reason was logged and the text is
    /// substituted with whatever visible text preceded the failure
    /// (empty when nothing did).
    Recovered {
        /// Visible text salvaged before the failure point, normalized.
        text: NormalizedText,
        /// The failure carried for logging.
        reason: MarkupError,
    },
}

impl CleanOutcome {
    /// The text this outcome contributes downstream.
    pub fn into_text(self) -> NormalizedText {
        match self {
            CleanOutcome::Cleaned(text) => text,
            CleanOutcome::Recovered { text, .. } => text,
        }
    }

    /// Whether the salvaged substitute was installed.
    pub fn is_recovered(&self) -> bool {
        matches!(self, CleanOutcome::Recovered { .. })
    }
}

/// Strip markup from a raw text field and normalize the visible text.
///
/// `None` (a missing field) coerces to the empty string before processing.
/// Visible text nodes are joined with single spaces, literal `?` and U+FFFD
/// are removed, and whitespace runs collapse to one space. A parse failure is
/// reported here and recovered to the visible text accumulated before the
/// failure point; it never aborts the run and never drops the record.
pub fn clean_markup(raw: Option<&str>) -> CleanOutcome {
    let text = raw.unwrap_or("");
    let (visible, dangling) = extract_visible_text(text);
    let kept: String = visible
        .chars()
        .filter(|ch| !STRIPPED_CHARS.contains(ch))
        .collect();
    let normalized = collapse_whitespace(&kept);
    match dangling {
        None => CleanOutcome::Cleaned(normalized),
        Some(reason) => {
            warn!(error = %reason, "text cleaning failed; keeping text before the failure point");
            CleanOutcome::Recovered {
                text: normalized,
                reason,
            }
        }
    }
}

/// Remove stopword tokens, preserving the casing and relative order of the
/// surviving tokens.
pub fn remove_stopwords(text: &str, stopwords: &HashSet<&str>) -> String {
    text.split_whitespace()
        .filter(|token| !stopwords.contains(token.to_lowercase().as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove every literal `*`, with no other effect.
pub fn remove_asterisks(text: &str) -> String {
    text.replace(STRAY_CHAR, "")
}

/// Composed per-record normalization pipeline.
#[derive(Clone, Copy, Debug)]
pub struct TextNormalizer {
    stopwords: &'static HashSet<&'static str>,
}

impl TextNormalizer {
    /// Build a normalizer with the fixed stopword set for `language`.
    pub fn new(language: Language) -> Self {
        Self {
            stopwords: language.stopwords(),
        }
    }

    /// Apply markup stripping, stopword removal, and asterisk removal.
    pub fn normalize(&self, raw: Option<&str>) -> NormalizedText {
        let text = clean_markup(raw).into_text();
        let text = remove_stopwords(&text, self.stopwords);
        remove_asterisks(&text)
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(Language::English)
    }
}

/// Extract visible text nodes from possibly-marked-up input, joining them
/// with single spaces. State machine, no regex.
///
/// Input ending inside a tag keeps the text accumulated so far and reports
/// the dangling fragment, which is dropped.
fn extract_visible_text(text: &str) -> (String, Option<MarkupError>) {
    let mut result = String::with_capacity(text.len());
    let mut in_tag = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                // Separator between adjacent text nodes.
                result.push(' ');
            }
            '&' if !in_tag => result.push_str(&decode_entity(&mut chars)),
            _ if !in_tag => result.push(ch),
            _ => {}
        }
    }

    let dangling = in_tag.then_some(MarkupError::UnterminatedTag);
    (result, dangling)
}

/// Decode one HTML entity starting after the `&`. Unknown entities are kept
/// verbatim.
fn decode_entity(chars: &mut Peekable<Chars>) -> String {
    let mut entity = String::new();
    let mut terminated = false;

    for _ in 0..ENTITY_MAX_LEN {
        match chars.peek() {
            Some(&';') => {
                chars.next();
                terminated = true;
                break;
            }
            Some(&c) if c.is_alphanumeric() || c == '#' => {
                entity.push(c);
                chars.next();
            }
            _ => break,
        }
    }

    if !terminated {
        return format!("&{entity}");
    }

    match entity.as_str() {
        "amp" => "&".to_string(),
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "quot" => "\"".to_string(),
        "apos" => "'".to_string(),
        "nbsp" => " ".to_string(),
        numeric if numeric.starts_with('#') => {
            let body = &numeric[1..];
            let code_point = if let Some(hex) = body.strip_prefix(['x', 'X']) {
                u32::from_str_radix(hex, 16).ok()
            } else {
                body.parse::<u32>().ok()
            };
            match code_point.and_then(char::from_u32) {
                Some(c) => c.to_string(),
                None => format!("&{entity};"),
            }
        }
        _ => format!("&{entity};"),
    }
}

/// Collapse runs of whitespace into single spaces and trim.
fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut seen_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !seen_space {
                normalized.push(' ');
                seen_space = true;
            }
        } else {
            normalized.push(ch);
            seen_space = false;
        }
    }
    normalized.trim().to_string()
}
