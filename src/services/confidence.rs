//! Shared confidence heuristic.
//!
//! A deterministic, pure function of the response text, used by every agent.
//! It is a quality proxy derived from length and keyword presence, independent
//! of correctness. The word lists, thresholds, and clamp bounds are fixed
//! contract values; downstream scoring depends on them exactly.

/// Words whose presence nudges confidence up.
const CONFIDENCE_KEYWORDS: [&str; 5] = ["likely", "evidence", "data", "research", "analysis"];

/// Words whose presence nudges confidence down.
const UNCERTAINTY_KEYWORDS: [&str; 4] = ["unclear", "uncertain", "difficult", "limited"];

/// Score a response text into [0.1, 0.9].
///
/// Texts shorter than 50 characters score a flat 0.3. Otherwise the base is
/// `min(0.9, len / 300)`, adjusted by 0.1 per confidence keyword minus 0.1 per
/// uncertainty keyword (case-insensitive substring match), clamped to
/// [0.1, 0.9].
///
/// The 0.0 confidence seen on failed calls is NOT produced here: it is an
/// out-of-band sentinel set by the failure path, deliberately outside the
/// heuristic's range.
pub fn confidence_score(text: &str) -> f64 {
    let length = text.chars().count();
    if length < 50 {
        return 0.3;
    }

    let lower = text.to_lowercase();

    let confidence_hits = CONFIDENCE_KEYWORDS
        .iter()
        .filter(|word| lower.contains(**word))
        .count() as f64;
    let uncertainty_hits = UNCERTAINTY_KEYWORDS
        .iter()
        .filter(|word| lower.contains(**word))
        .count() as f64;

    let base = (length as f64 / 300.0).min(0.9);
    let adjustment = (confidence_hits - uncertainty_hits) * 0.1;

    (base + adjustment).clamp(0.1, 0.9)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_short_text_scores_flat() {
        assert_eq!(confidence_score(""), 0.3);
        assert_eq!(confidence_score("too short"), 0.3);
        // 49 chars: still below the threshold
        assert_eq!(confidence_score(&"x".repeat(49)), 0.3);
    }

    #[test]
    fn test_base_scales_with_length() {
        // 150 neutral chars: base 0.5, no keyword hits
        let text = "z".repeat(150);
        assert!((confidence_score(&text) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_base_saturates_at_long_text() {
        let text = "z".repeat(1000);
        assert!((confidence_score(&text) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_keywords_raise_score() {
        let neutral = "z".repeat(150);
        let boosted = format!("{}likely evidence", "z".repeat(135));
        assert!(confidence_score(&boosted) > confidence_score(&neutral));
    }

    #[test]
    fn test_uncertainty_keywords_lower_score() {
        let neutral = "z".repeat(150);
        let hedged = format!("{}unclear limited", "z".repeat(135));
        assert!(confidence_score(&hedged) < confidence_score(&neutral));
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let upper = format!("{}LIKELY", "z".repeat(144));
        let lower = format!("{}likely", "z".repeat(144));
        assert_eq!(confidence_score(&upper), confidence_score(&lower));
    }

    #[test]
    fn test_clamped_to_lower_bound() {
        // Short-ish text stuffed with uncertainty: base ~0.17, -0.4 adjustment
        let text = format!("{} unclear uncertain difficult limited", "z".repeat(20));
        assert_eq!(confidence_score(&text), 0.1);
    }

    proptest! {
        #[test]
        fn prop_score_always_in_range(text in ".*") {
            let score = confidence_score(&text);
            prop_assert!((0.1..=0.9).contains(&score));
        }
    }
}
