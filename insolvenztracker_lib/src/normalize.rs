//! Company name normalization.
//!
//! Names from the announcement portal and from the client registry disagree on
//! case, punctuation, and how the legal form is spelled out. [`normalize`]
//! reduces both to the same lower-case token string so they can be compared
//! directly or scored by [`crate::similarity`].

use std::sync::LazyLock;

use regex::Regex;

/// Anything that is not a letter, a number, or whitespace.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s]").expect("static pattern compiles"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static pattern compiles"));

/// Long-form legal designations and their canonical abbreviation.
///
/// Phrases are spelled the way they look after punctuation stripping, so
/// "UG (haftungsbeschränkt)" appears as "ug haftungsbeschränkt". Sorted by
/// length descending so a phrase is collapsed before any shorter phrase it
/// contains gets a chance to clobber it.
pub const LEGAL_FORMS: &[(&str, &str)] = &[
    ("gesellschaft mit beschränkter haftung", "gmbh"),
    ("gesellschaft bürgerlichen rechts", "gbr"),
    ("offene handelsgesellschaft", "ohg"),
    ("unternehmergesellschaft", "ug"),
    ("ug haftungsbeschränkt", "ug"),
    ("kommanditgesellschaft", "kg"),
    ("eingetragener verein", "ev"),
    ("haftungsbeschränkt", "ltd"),
    ("aktiengesellschaft", "ag"),
    ("gmbh und co kg", "gmbh co kg"),
    ("limited", "ltd"),
];

/// Normalize a company name for comparison.
///
/// Steps:
/// 1. Convert to lowercase
/// 2. Replace every character that is not a letter, digit or whitespace with a space
/// 3. Collapse whitespace runs to a single space and trim
/// 4. Collapse legal-form phrases anywhere in the name via [`LEGAL_FORMS`]
///
/// Returns empty string for empty input. Idempotent:
/// `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(name: &str) -> String {
    if name.trim().is_empty() {
        return String::new();
    }

    let lowered = name.to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, " ");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");

    collapse_legal_forms(collapsed.trim()).trim().to_string()
}

/// Normalize a possibly absent name. `None` yields an empty string.
pub fn normalize_opt(name: Option<&str>) -> String {
    name.map(normalize).unwrap_or_default()
}

/// Apply the legal-form table until nothing changes.
///
/// Every replacement is shorter than its phrase, so the loop terminates.
/// Running to a fixpoint keeps [`normalize`] idempotent when a replacement
/// exposes a phrase that was not there before.
fn collapse_legal_forms(name: &str) -> String {
    let mut current = name.to_string();
    loop {
        let mut next = current.clone();
        for (phrase, abbreviation) in LEGAL_FORMS {
            if next.contains(phrase) {
                next = next.replace(phrase, abbreviation);
            }
        }
        if next == current {
            return current;
        }
        current = next;
    }
}
