//! Token-based similarity between normalized company names.
//!
//! All scores are on a 0-100 scale and symmetric in their arguments. Inputs
//! are expected to be normalized already; nothing here re-normalizes.
//!
//! The building block is the normalized Indel similarity ([`ratio`]): the
//! share of characters that survive when one string is turned into the other
//! using only insertions and deletions.

use std::collections::BTreeSet;

use rapidfuzz::distance::indel;

/// Weight of the unpenalized token score in [`hybrid_score`].
const TOKEN_WEIGHT: f64 = 0.85;
/// Weight of the length-damped token score in [`hybrid_score`].
const LENGTH_WEIGHT: f64 = 0.15;

/// Normalized Indel similarity of two strings, in [0, 100].
///
/// Two empty strings are identical and score 100.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    norm_distance(indel_distance(&a, &b), a.len() + b.len())
}

/// Similarity after sorting the whitespace tokens of each side.
///
/// Insensitive to word order, sensitive to every token's exact content.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Set-based token similarity.
///
/// Compares the shared tokens plus each side's leftovers, so reordering and
/// one name being a token subset of the other both score high. Returns 0 when
/// either side has no tokens and 100 when one token set contains the other.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let diff_ab: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let diff_ba: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    if !intersection.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let diff_ab_joined: Vec<char> = diff_ab.join(" ").chars().collect();
    let diff_ba_joined: Vec<char> = diff_ba.join(" ").chars().collect();
    let ab_len = diff_ab_joined.len();
    let ba_len = diff_ba_joined.len();
    let sect_len = intersection.join(" ").chars().count();

    // Lengths of "sect ab" and "sect ba" as whole strings; the separator only
    // exists when there is an intersection.
    let separator = usize::from(sect_len != 0);
    let sect_ab_len = sect_len + separator + ab_len;
    let sect_ba_len = sect_len + separator + ba_len;

    // The shared prefix contributes nothing to the distance between the two
    // reconstructed strings, only to their length.
    let dist = indel_distance(&diff_ab_joined, &diff_ba_joined);
    let result = norm_distance(dist, sect_ab_len + sect_ba_len);

    if sect_len == 0 {
        return result;
    }

    // "sect" against "sect ab" differs by exactly the appended part.
    let sect_ab_ratio = norm_distance(separator + ab_len, sect_len + sect_ab_len);
    let sect_ba_ratio = norm_distance(separator + ba_len, sect_len + sect_ba_len);

    result.max(sect_ab_ratio).max(sect_ba_ratio)
}

/// Character-length disparity `min / max`, defined as 0 when either side is empty.
pub fn length_ratio(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }
    len_a.min(len_b) as f64 / len_a.max(len_b) as f64
}

/// Hybrid similarity used for soft matching, in [0, 100].
///
/// Averages [`token_set_ratio`] and [`token_sort_ratio`], then damps the
/// result by the [`length_ratio`] so a bare legal-form token cannot score
/// high against a long unrelated name:
///
/// `combined * 0.85 + combined * length_ratio * 0.15`
///
/// Empty input on either side scores 0, including two empty names.
pub fn hybrid_score(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let combined = (token_set_ratio(a, b) + token_sort_ratio(a, b)) / 2.0;
    let penalized =
        combined * TOKEN_WEIGHT + combined * length_ratio(a, b) * LENGTH_WEIGHT;

    penalized.clamp(0.0, 100.0)
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn norm_distance(dist: usize, len_sum: usize) -> f64 {
    if len_sum == 0 {
        return 100.0;
    }
    100.0 - 100.0 * dist as f64 / len_sum as f64
}

/// Insertions plus deletions needed to turn `a` into `b`.
fn indel_distance(a: &[char], b: &[char]) -> usize {
    indel::distance(a.iter().copied(), b.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_ratio_identical() {
        assert_eq!(ratio("musterbau", "musterbau"), 100.0);
    }

    #[test]
    fn test_ratio_both_empty() {
        assert_eq!(ratio("", ""), 100.0);
    }

    #[test]
    fn test_indel_distance_counts_edits() {
        let a: Vec<char> = "lewenstein".chars().collect();
        let b: Vec<char> = "levenshtein".chars().collect();
        assert_eq!(indel_distance(&a, &b), 3);
    }

    #[test]
    fn test_ratio_one_empty() {
        assert_eq!(ratio("", "abc"), 0.0);
    }

    #[test]
    fn test_ratio_single_insertion() {
        // LCS 6 of 6 + 7 characters, one insertion
        assert_close(ratio("handel", "handels"), 100.0 - 100.0 / 13.0);
    }

    #[test]
    fn test_ratio_counts_chars_not_bytes() {
        assert_close(ratio("müller", "muller"), 100.0 - 200.0 / 12.0);
    }

    #[test]
    fn test_token_sort_ignores_order() {
        assert_eq!(
            token_sort_ratio("schmidt logistik gmbh", "logistik schmidt gmbh"),
            100.0
        );
    }

    #[test]
    fn test_token_set_subset_is_perfect() {
        assert_eq!(token_set_ratio("meier gmbh", "meier"), 100.0);
        assert_eq!(token_set_ratio("meier", "meier gmbh"), 100.0);
    }

    #[test]
    fn test_token_set_empty_side_is_zero() {
        assert_eq!(token_set_ratio("", "meier"), 0.0);
        assert_eq!(token_set_ratio("", ""), 0.0);
    }

    #[test]
    fn test_token_set_near_miss() {
        assert_close(
            token_set_ratio("baumueller handel gmbh", "baumueller handels gmbh"),
            100.0 - 100.0 / 45.0,
        );
    }

    #[test]
    fn test_token_set_disjoint() {
        // No shared tokens: plain ratio of the sorted token strings
        assert_close(
            token_set_ratio("nordlicht energie gmbh", "suedwind bau ag"),
            ratio("energie gmbh nordlicht", "ag bau suedwind"),
        );
    }

    #[test]
    fn test_length_ratio() {
        assert_eq!(length_ratio("", ""), 0.0);
        assert_eq!(length_ratio("abcd", ""), 0.0);
        assert_close(length_ratio("ab", "abcd"), 0.5);
    }

    #[test]
    fn test_hybrid_identical_is_100() {
        assert_eq!(hybrid_score("musterbau gmbh", "musterbau gmbh"), 100.0);
        assert_eq!(hybrid_score("a", "a"), 100.0);
    }

    #[test]
    fn test_hybrid_empty_is_zero() {
        assert_eq!(hybrid_score("", ""), 0.0);
        assert_eq!(hybrid_score("", "musterbau gmbh"), 0.0);
        assert_eq!(hybrid_score("musterbau gmbh", ""), 0.0);
    }

    #[test]
    fn test_hybrid_near_miss_spelling() {
        let score = hybrid_score("baumueller handel gmbh", "baumueller handels gmbh");
        assert!(score >= 80.0);
        assert!(score < 99.0);
        assert_close(score, 97.14009661835748);
    }

    #[test]
    fn test_hybrid_reordered_tokens() {
        assert_eq!(
            hybrid_score("schmidt logistik gmbh", "logistik schmidt gmbh"),
            100.0
        );
    }

    #[test]
    fn test_hybrid_length_penalty() {
        // Token subset scores 100 on the set measure, the length ratio pulls it down
        let score = hybrid_score("gmbh", "musterbau elektro gmbh");
        assert!(score < 60.0, "score was {score}");

        let score = hybrid_score("meier gmbh", "meier");
        assert!(score < 80.0, "score was {score}");
    }

    #[test]
    fn test_hybrid_unrelated_is_low() {
        assert!(hybrid_score("nordlicht energie gmbh", "suedwind bau ag") < 40.0);
    }

    #[test]
    fn test_hybrid_is_symmetric() {
        let names = [
            "baumueller handel gmbh",
            "baumueller handels gmbh",
            "gmbh",
            "musterbau elektro gmbh",
            "bau ag",
            "holz ag",
            "meier",
            "müller söhne gmbh co kg",
            "",
        ];
        for a in names {
            for b in names {
                assert_eq!(hybrid_score(a, b), hybrid_score(b, a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_hybrid_bounded() {
        let names = ["a", "ab cd", "x y z", "gmbh co kg", "müller"];
        for a in names {
            for b in names {
                let score = hybrid_score(a, b);
                assert!((0.0..=100.0).contains(&score));
            }
        }
    }
}
