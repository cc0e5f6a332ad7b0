//! Natural-language filter extractor for Titanic passenger searches.
//!
//! Turns free text such as "여자 승객 중 나이 많은 2명 보여줘" into a
//! [`SearchFilter`]. Extraction is a fixed sequence of stages; each stage
//! writes one field and may read fields set by earlier stages. Nothing here
//! fails: a stage that finds nothing leaves its field unset.

use std::sync::LazyLock;

use regex::Regex;

use kroaddy_core::types::{SearchFilter, Sex, SortKey, SortOrder, DEFAULT_SEARCH_LIMIT};

// =============================================================================
// Compiled patterns (compiled once, reused across calls)
// =============================================================================

static CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)(?:st|nd|rd|th)?\s*(?:등급|등|class|클래스)").unwrap());

static COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(?:명의|명만|명|개)").unwrap());

static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

static PUNCT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Titanic trigger words, shared with the intent router.
pub(crate) const TITANIC_WORDS: &[&str] = &["titanic", "타이타닉", "승객", "passenger"];

const YOUNGER_PHRASES: &[&str] = &[
    "나이어린",
    "나이가어린",
    "나이가 어린",
    "나이 어린",
    "어린",
    "젊은",
    "youngest",
    "young",
];

const OLDER_PHRASES: &[&str] = &[
    "나이많은",
    "나이가많은",
    "나이가 많은",
    "나이 많은",
    "나이든",
    "늙은",
    "oldest",
    "old",
];

const SURVIVED_WORDS: &[&str] = &["생존", "생존한", "살아남은", "survived"];
const DIED_WORDS: &[&str] = &["사망", "사망한", "죽은", "died"];

const FEMALE_WORDS: &[&str] = &["여자", "여성", "female"];
const MALE_WORDS: &[&str] = &["남자", "남성", "male"];

// Words consumed by the stages above plus command verbs and fillers.
const FILLER_WORDS: &[&str] = &[
    "여자", "여성", "남자", "남성", "female", "male", "여", "남", "여들", "남들",
    "나이",
    "생존한", "생존", "살아남은", "사망한", "사망", "죽은", "survived", "died",
    "등급", "등", "class", "클래스",
    "명", "개", "명의", "명만", "명중", "중", "만", "들",
    "출력", "보여", "보여줘", "보여줘요", "보여줄래", "보여주세요", "보줘",
    "찾아", "찾아줘", "찾아주세요", "검색", "해줘", "해주세요", "알려줘", "또는",
    "가장",
    "passengers", "classes", "1st", "2nd", "3rd",
];

/// English words dropped from the leftover keyword. Matched per word, not as
/// substrings, so names containing them survive.
const ENGLISH_FILLERS: &[&str] = &[
    "show", "list", "find", "search", "me", "all", "the", "in", "of", "on", "with", "and",
    "who", "were", "was", "please", "aboard",
];

/// Single characters that are not worth searching for on their own.
const STOP_SINGLES: &[&str] = &["중", "만", "들", "한"];
/// Whole leftovers that carry no search meaning.
const STOP_WORDS: &[&str] = &["사람", "승객"];

/// One alternation over every excluded token, longest first so that
/// "보여줘" is removed whole instead of leaving "줘" behind.
static EXCLUSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    let mut tokens: Vec<&str> = TITANIC_WORDS
        .iter()
        .chain(YOUNGER_PHRASES)
        .chain(OLDER_PHRASES)
        .chain(FILLER_WORDS)
        .copied()
        .collect();
    tokens.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    tokens.dedup();
    let alts: Vec<String> = tokens.iter().map(|t| regex::escape(t)).collect();
    Regex::new(&format!("(?i)(?:{})", alts.join("|"))).unwrap()
});

// =============================================================================
// Normalized input
// =============================================================================

/// The three views of the input every stage works from.
struct NormalizedText<'a> {
    raw: &'a str,
    lower: String,
    /// Lowercase with all whitespace removed, to tolerate spacing variants.
    compact: String,
}

impl<'a> NormalizedText<'a> {
    fn new(raw: &'a str) -> Self {
        let lower = raw.to_lowercase();
        let compact = lower.chars().filter(|c| !c.is_whitespace()).collect();
        Self {
            raw,
            lower,
            compact,
        }
    }

    fn contains(&self, needle: &str) -> bool {
        self.lower.contains(needle)
    }

    fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.lower.contains(n))
    }

    /// Match a phrase against the text with and without whitespace.
    fn contains_phrase(&self, phrase: &str) -> bool {
        if self.lower.contains(phrase) {
            return true;
        }
        let compact_phrase: String = phrase.chars().filter(|c| !c.is_whitespace()).collect();
        self.compact.contains(&compact_phrase)
    }

    /// Whether a whitespace-separated token equals one of `tokens`.
    fn has_token(&self, tokens: &[&str]) -> bool {
        self.lower
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .any(|w| tokens.contains(&w))
    }
}

// =============================================================================
// FilterExtractor
// =============================================================================

/// Rule-based extractor producing a [`SearchFilter`] from free text.
#[derive(Debug, Default, Clone, Copy)]
pub struct FilterExtractor;

impl FilterExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Run every stage in order and assemble the filter.
    pub fn extract(&self, text: &str) -> SearchFilter {
        let input = NormalizedText::new(text);
        let mut filter = SearchFilter::default();

        filter.pclass = self.extract_class(&input);
        filter.limit = self.extract_limit(&input, filter.pclass);
        filter.sex = self.extract_sex(&input);
        if let Some(order) = self.extract_age_order(&input) {
            filter.sort_by = Some(SortKey::Age);
            filter.sort_order = Some(order);
        }
        filter.survived = self.extract_survival(&input);
        filter.keyword = self.extract_keyword(&input);

        tracing::debug!(text, filter = ?filter, "Extracted passenger filter");
        filter
    }

    // -----------------------------------------------------------------
    // Stages
    // -----------------------------------------------------------------

    /// Passenger class: an integer 1-3 followed by a grade marker.
    fn extract_class(&self, input: &NormalizedText<'_>) -> Option<u8> {
        let caps = CLASS_RE.captures(&input.lower)?;
        let value: u8 = caps.get(1)?.as_str().parse().ok()?;
        (1..=3).contains(&value).then_some(value)
    }

    /// Result count: the last "<n>명"-style match, unless it is the class number.
    fn extract_limit(&self, input: &NormalizedText<'_>, pclass: Option<u8>) -> u32 {
        let last = COUNT_RE
            .captures_iter(input.raw)
            .last()
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok());

        match last {
            Some(n) if pclass.is_some_and(|p| u32::from(p) == n) => DEFAULT_SEARCH_LIMIT,
            Some(n) if n > 0 => n,
            _ => DEFAULT_SEARCH_LIMIT,
        }
    }

    fn extract_sex(&self, input: &NormalizedText<'_>) -> Option<Sex> {
        let female = input.contains_any(FEMALE_WORDS)
            || (input.has_token(&["여", "여들"])
                && (input.contains("승객") || input.contains("여자")));
        if female {
            return Some(Sex::Female);
        }

        let male = input.contains_any(MALE_WORDS)
            || (input.has_token(&["남", "남들"])
                && (input.contains("승객") || input.contains("남자")));
        male.then_some(Sex::Male)
    }

    /// Younger phrases sort ascending, older phrases descending.
    ///
    /// When both sets match, the younger reading wins.
    fn extract_age_order(&self, input: &NormalizedText<'_>) -> Option<SortOrder> {
        let superlative = input.contains("가장");

        let younger = YOUNGER_PHRASES.iter().any(|p| input.contains_phrase(p))
            || (superlative && (input.contains("어린") || input.contains("젊은")));
        let older = OLDER_PHRASES.iter().any(|p| input.contains_phrase(p))
            || (superlative
                && (input.compact.contains("나이많은")
                    || input.contains("나이든")
                    || input.contains("늙은")));

        match (younger, older) {
            (true, true) => {
                tracing::debug!(text = input.raw, "Both younger and older phrases matched");
                Some(SortOrder::Asc)
            }
            (true, false) => Some(SortOrder::Asc),
            (false, true) => Some(SortOrder::Desc),
            (false, false) => None,
        }
    }

    fn extract_survival(&self, input: &NormalizedText<'_>) -> Option<u8> {
        if input.contains_any(SURVIVED_WORDS) {
            Some(1)
        } else if input.contains_any(DIED_WORDS) {
            Some(0)
        } else {
            None
        }
    }

    /// Whatever text is left once every recognised token is removed.
    fn extract_keyword(&self, input: &NormalizedText<'_>) -> String {
        let stripped = EXCLUSION_RE.replace_all(input.raw, " ");
        let stripped = DIGITS_RE.replace_all(&stripped, "");
        let stripped = PUNCT_RE.replace_all(&stripped, "");
        let keyword = stripped
            .split_whitespace()
            .filter(|word| !ENGLISH_FILLERS.contains(&word.to_lowercase().as_str()))
            .collect::<Vec<_>>()
            .join(" ");

        if keyword.is_empty()
            || STOP_SINGLES.contains(&keyword.as_str())
            || STOP_WORDS.contains(&keyword.as_str())
        {
            return String::new();
        }
        keyword
    }
}

/// Extract a passenger search filter from free text.
pub fn extract_filters(text: &str) -> SearchFilter {
    FilterExtractor.extract(text)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_json(filter: &SearchFilter) -> serde_json::Value {
        serde_json::to_value(filter).unwrap()
    }

    // ---- Documented examples ----

    #[test]
    fn test_female_older_with_count() {
        let f = extract_filters("여자 승객 중 나이 많은 2명 보여줘");
        assert_eq!(
            as_json(&f),
            json!({
                "keyword": "",
                "limit": 2,
                "sex": "female",
                "sort_by": "age",
                "sort_order": "desc"
            })
        );
    }

    #[test]
    fn test_class_number_is_not_a_limit() {
        let f = extract_filters("3등급 타이타닉 승객 5명");
        assert_eq!(as_json(&f), json!({"keyword": "", "limit": 5, "pclass": 3}));
    }

    #[test]
    fn test_surviving_male() {
        let f = extract_filters("생존한 남자 승객");
        assert_eq!(
            as_json(&f),
            json!({"keyword": "", "limit": 10, "sex": "male", "survived": 1})
        );
    }

    // ---- Class ----

    #[test]
    fn test_class_variants() {
        assert_eq!(extract_filters("1등 승객").pclass, Some(1));
        assert_eq!(extract_filters("2 class passengers").pclass, Some(2));
        assert_eq!(extract_filters("3 클래스").pclass, Some(3));
        assert_eq!(extract_filters("2CLASS").pclass, Some(2));
    }

    #[test]
    fn test_class_out_of_range_ignored() {
        assert_eq!(extract_filters("4등급 승객").pclass, None);
        assert_eq!(extract_filters("0등급 승객").pclass, None);
        assert_eq!(extract_filters("99999999999등급").pclass, None);
    }

    // ---- Limit ----

    #[test]
    fn test_last_count_wins() {
        assert_eq!(extract_filters("승객 3명 말고 7명").limit, 7);
    }

    #[test]
    fn test_count_equal_to_class_is_skipped() {
        let f = extract_filters("2등급 승객 2명");
        assert_eq!(f.pclass, Some(2));
        assert_eq!(f.limit, DEFAULT_SEARCH_LIMIT);
    }

    #[test]
    fn test_count_markers() {
        assert_eq!(extract_filters("승객 4개").limit, 4);
        assert_eq!(extract_filters("승객 6명만").limit, 6);
        assert_eq!(extract_filters("승객 8 명의 이름").limit, 8);
    }

    #[test]
    fn test_zero_or_missing_count_uses_default() {
        assert_eq!(extract_filters("승객 0명").limit, DEFAULT_SEARCH_LIMIT);
        assert_eq!(extract_filters("타이타닉").limit, DEFAULT_SEARCH_LIMIT);
    }

    // ---- Sex ----

    #[test]
    fn test_sex_words() {
        assert_eq!(extract_filters("여성 승객").sex, Some(Sex::Female));
        assert_eq!(extract_filters("female passengers").sex, Some(Sex::Female));
        assert_eq!(extract_filters("남성 승객").sex, Some(Sex::Male));
        assert_eq!(extract_filters("male passengers").sex, Some(Sex::Male));
    }

    #[test]
    fn test_single_char_sex_token_needs_companion() {
        assert_eq!(extract_filters("여 승객").sex, Some(Sex::Female));
        assert_eq!(extract_filters("남 승객").sex, Some(Sex::Male));
        assert_eq!(extract_filters("여 목록").sex, None);
    }

    #[test]
    fn test_verb_containing_yeo_is_not_female() {
        // "보여줘" contains the syllable 여 but is not a sex token.
        let f = extract_filters("남자 승객 보여줘");
        assert_eq!(f.sex, Some(Sex::Male));
        assert_eq!(extract_filters("승객 보여줘").sex, None);
    }

    // ---- Age ----

    #[test]
    fn test_younger_phrases() {
        for text in ["나이 어린 승객", "나이어린 승객", "젊은 승객", "youngest passenger", "가장 어린"] {
            let f = extract_filters(text);
            assert_eq!(f.sort_by, Some(SortKey::Age), "{}", text);
            assert_eq!(f.sort_order, Some(SortOrder::Asc), "{}", text);
        }
    }

    #[test]
    fn test_older_phrases_with_spacing_variants() {
        for text in ["나이가 많은 승객", "나이 가 많은 승객", "나이든 승객", "oldest passenger"] {
            let f = extract_filters(text);
            assert_eq!(f.sort_order, Some(SortOrder::Desc), "{}", text);
        }
    }

    #[test]
    fn test_conflicting_age_phrases_prefer_younger() {
        let f = extract_filters("가장 어린 승객과 나이든 승객");
        assert_eq!(f.sort_order, Some(SortOrder::Asc));
    }

    #[test]
    fn test_no_age_phrase_leaves_sort_unset() {
        let f = extract_filters("3등급 승객");
        assert!(f.sort_by.is_none());
        assert!(f.sort_order.is_none());
        assert_eq!(f.effective_sort_order(), SortOrder::Asc);
    }

    // ---- Survival ----

    #[test]
    fn test_survival_words() {
        assert_eq!(extract_filters("살아남은 승객").survived, Some(1));
        assert_eq!(extract_filters("survived passengers").survived, Some(1));
        assert_eq!(extract_filters("사망한 승객").survived, Some(0));
        assert_eq!(extract_filters("죽은 승객").survived, Some(0));
        assert_eq!(extract_filters("승객").survived, None);
    }

    // ---- Keyword ----

    #[test]
    fn test_keyword_residue_kept() {
        let f = extract_filters("타이타닉 승객 중 smith 검색");
        assert_eq!(f.keyword, "smith");
    }

    #[test]
    fn test_keyword_keeps_original_case() {
        let f = extract_filters("Titanic passenger Allison 찾아줘");
        assert_eq!(f.keyword, "Allison");
    }

    #[test]
    fn test_keyword_strips_punctuation_and_digits() {
        let f = extract_filters("타이타닉 승객 'Braund', 3명!");
        assert_eq!(f.keyword, "Braund");
        assert_eq!(f.limit, 3);
    }

    #[test]
    fn test_keyword_stop_words_discarded() {
        assert_eq!(extract_filters("나이 어린 사람 3명").keyword, "");
        assert_eq!(extract_filters("승객 중").keyword, "");
        assert_eq!(extract_filters("타이타닉 한").keyword, "");
    }

    #[test]
    fn test_keyword_multiple_words_collapsed() {
        let f = extract_filters("타이타닉   john    smith   보여줘");
        assert_eq!(f.keyword, "john smith");
    }

    #[test]
    fn test_keyword_drops_english_plurals_and_fillers() {
        let f = extract_filters("show female passengers");
        assert_eq!(f.sex, Some(Sex::Female));
        assert_eq!(f.keyword, "");

        let f = extract_filters("survived passengers in 1st class");
        assert_eq!(f.survived, Some(1));
        assert_eq!(f.pclass, Some(1));
        assert_eq!(f.keyword, "");
    }

    #[test]
    fn test_english_fillers_only_drop_whole_words() {
        let f = extract_filters("titanic passenger Thelma Andersson");
        assert_eq!(f.keyword, "Thelma Andersson");
    }

    // ---- Robustness ----

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_filters(""), SearchFilter::default());
    }

    #[test]
    fn test_deterministic() {
        let text = "1등급 생존한 여자 승객 중 가장 젊은 3명";
        assert_eq!(extract_filters(text), extract_filters(text));
    }

    #[test]
    fn test_combined_filters() {
        let f = extract_filters("1등급 생존한 여자 승객 중 가장 젊은 3명");
        assert_eq!(f.pclass, Some(1));
        assert_eq!(f.limit, 3);
        assert_eq!(f.sex, Some(Sex::Female));
        assert_eq!(f.survived, Some(1));
        assert_eq!(f.sort_order, Some(SortOrder::Asc));
        assert_eq!(f.keyword, "");
    }
}
