//! Intent classification for home-screen utterances.
//!
//! Classification is an ordered table of `(Intent, predicate)` rows; the
//! first row whose predicate holds wins, so row order is part of the
//! contract.

use std::fmt;

use crate::parser::TITANIC_WORDS;

/// Handling path selected for an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Titanic passenger search.
    Titanic,
    /// Places worth visiting near the user.
    Nearby,
    Museum,
    FoodRecommendation,
    /// "yes"/"ok"/"응": confirm the proposed route.
    Affirmation,
    /// Demo recommendation of historic sites.
    HistoricSites,
    /// "/keyword": raw map search.
    SlashSearch,
    /// Anything else goes to the chatbot backend.
    Chat,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intent::Titanic => "titanic",
            Intent::Nearby => "nearby",
            Intent::Museum => "museum",
            Intent::FoodRecommendation => "food_recommendation",
            Intent::Affirmation => "affirmation",
            Intent::HistoricSites => "historic_sites",
            Intent::SlashSearch => "slash_search",
            Intent::Chat => "chat",
        };
        f.write_str(s)
    }
}

/// The utterance plus its lowercase form, computed once per classification.
pub struct Utterance<'a> {
    pub raw: &'a str,
    pub lower: String,
}

impl<'a> Utterance<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            lower: raw.trim().to_lowercase(),
        }
    }
}

type Predicate = fn(&Utterance<'_>) -> bool;

const AGE_WORDS: &[&str] = &["나이", "어린", "젊은", "나이든", "늙은"];
const GRADE_WORDS: &[&str] = &["등급", "등"];
const GENDER_WORDS: &[&str] = &["여자", "남자"];
const GENDER_COMPANIONS: &[&str] = &["나이", "등급", "승객"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Titanic context: trigger words, age or grade words, or a gender word
/// together with an age/grade/passenger word.
///
/// An isolated gender word alone does not count.
pub fn is_titanic_context(u: &Utterance<'_>) -> bool {
    let l = &u.lower;
    contains_any(l, TITANIC_WORDS)
        || contains_any(l, AGE_WORDS)
        || contains_any(l, GRADE_WORDS)
        || (contains_any(l, GENDER_WORDS) && contains_any(l, GENDER_COMPANIONS))
}

fn is_nearby(u: &Utterance<'_>) -> bool {
    u.raw.contains("있을까?") || u.lower.contains("nearby")
}

fn is_museum(u: &Utterance<'_>) -> bool {
    u.raw.contains("박물관") || u.lower.contains("museum")
}

fn is_food(u: &Utterance<'_>) -> bool {
    u.raw.contains("밥집") || u.lower.contains("recommend")
}

fn is_affirmation(u: &Utterance<'_>) -> bool {
    u.raw.contains('응') || u.lower.contains("yes") || u.lower.contains("ok")
}

fn is_historic(u: &Utterance<'_>) -> bool {
    u.lower.contains("historic") && (u.lower.contains("recommend") || u.lower.contains("suggest"))
}

fn is_slash_search(u: &Utterance<'_>) -> bool {
    slash_keyword(u.raw).is_some()
}

fn always(_: &Utterance<'_>) -> bool {
    true
}

/// Keyword of a "/keyword" utterance, if the remainder is non-empty.
pub fn slash_keyword(raw: &str) -> Option<&str> {
    let rest = raw.trim().strip_prefix('/')?.trim();
    (!rest.is_empty()).then_some(rest)
}

/// Dispatch table, evaluated top to bottom.
const ROUTES: &[(Intent, Predicate)] = &[
    (Intent::Titanic, is_titanic_context),
    (Intent::Nearby, is_nearby),
    (Intent::Museum, is_museum),
    (Intent::FoodRecommendation, is_food),
    (Intent::Affirmation, is_affirmation),
    (Intent::HistoricSites, is_historic),
    (Intent::SlashSearch, is_slash_search),
    (Intent::Chat, always),
];

/// Stateless classifier over the dispatch table.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntentRouter;

impl IntentRouter {
    pub fn new() -> Self {
        Self
    }

    /// Classify an utterance. Always yields an intent; `Chat` is the fallback.
    pub fn classify(&self, raw: &str) -> Intent {
        let utterance = Utterance::new(raw);
        ROUTES
            .iter()
            .find(|(_, matches)| matches(&utterance))
            .map(|(intent, _)| *intent)
            .unwrap_or(Intent::Chat)
    }

    /// Every intent whose predicate holds, in table order.
    ///
    /// Useful for explaining why a later branch did not fire.
    pub fn candidates(&self, raw: &str) -> Vec<Intent> {
        let utterance = Utterance::new(raw);
        ROUTES
            .iter()
            .filter(|(_, matches)| matches(&utterance))
            .map(|(intent, _)| *intent)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Intent {
        IntentRouter::new().classify(text)
    }

    // ---- Titanic context ----

    #[test]
    fn test_titanic_trigger_words() {
        assert_eq!(classify("Titanic survivors"), Intent::Titanic);
        assert_eq!(classify("타이타닉 정보"), Intent::Titanic);
        assert_eq!(classify("승객 목록"), Intent::Titanic);
        assert_eq!(classify("show PASSENGER list"), Intent::Titanic);
    }

    #[test]
    fn test_titanic_age_and_grade_words() {
        assert_eq!(classify("나이 많은 사람"), Intent::Titanic);
        assert_eq!(classify("젊은 사람들"), Intent::Titanic);
        assert_eq!(classify("1등급은?"), Intent::Titanic);
    }

    #[test]
    fn test_gender_alone_is_not_titanic() {
        assert_ne!(classify("여자친구랑 갈 곳"), Intent::Titanic);
        assert_ne!(classify("남자 혼자 여행"), Intent::Titanic);
    }

    #[test]
    fn test_gender_with_companion_is_titanic() {
        assert_eq!(classify("여자 승객 중 나이 많은 사람은?"), Intent::Titanic);
        assert_eq!(classify("남자 중에 등급 높은"), Intent::Titanic);
    }

    // ---- Canned branches ----

    #[test]
    fn test_nearby() {
        assert_eq!(classify("근처에 갈 만한 곳 있을까?"), Intent::Nearby);
        assert_eq!(classify("Anything NEARBY?"), Intent::Nearby);
        // Without the question mark the literal does not match.
        assert_eq!(classify("갈 곳 있을까"), Intent::Chat);
    }

    #[test]
    fn test_museum_regardless_of_surrounding_text() {
        for text in ["박물관", "서울 박물관 알려줘", "여기 근처박물관!!", "MUSEUM please", "a Museum trip"] {
            assert_eq!(classify(text), Intent::Museum, "{}", text);
        }
    }

    #[test]
    fn test_museum_loses_to_earlier_rows() {
        assert_eq!(classify("박물관 있을까?"), Intent::Nearby);
        assert_eq!(classify("타이타닉 박물관"), Intent::Titanic);
        let candidates = IntentRouter::new().candidates("타이타닉 박물관");
        assert_eq!(candidates[0], Intent::Titanic);
        assert!(candidates.contains(&Intent::Museum));
    }

    #[test]
    fn test_food() {
        assert_eq!(classify("근처 밥집"), Intent::FoodRecommendation);
        assert_eq!(classify("Recommend a restaurant"), Intent::FoodRecommendation);
    }

    #[test]
    fn test_affirmation() {
        assert_eq!(classify("응"), Intent::Affirmation);
        assert_eq!(classify("응 좋아"), Intent::Affirmation);
        assert_eq!(classify("Yes"), Intent::Affirmation);
        assert_eq!(classify("ok!"), Intent::Affirmation);
        // Substring match, as in "book".
        assert_eq!(classify("book"), Intent::Affirmation);
    }

    #[test]
    fn test_historic_requires_suggest() {
        assert_eq!(classify("Suggest historic sites"), Intent::HistoricSites);
        assert_eq!(classify("historic places?"), Intent::Chat);
    }

    #[test]
    fn test_historic_recommend_is_shadowed_by_food() {
        // "recommend" hits the food row first.
        assert_eq!(classify("recommend historic sites"), Intent::FoodRecommendation);
    }

    // ---- Slash search ----

    #[test]
    fn test_slash_search() {
        assert_eq!(classify("/경복궁"), Intent::SlashSearch);
        assert_eq!(classify("   /  cafe  "), Intent::SlashSearch);
        assert_eq!(slash_keyword("   /  cafe  "), Some("cafe"));
    }

    #[test]
    fn test_empty_slash_falls_through_to_chat() {
        assert_eq!(classify("/"), Intent::Chat);
        assert_eq!(classify("  /   "), Intent::Chat);
        assert_eq!(slash_keyword("/"), None);
    }

    // ---- Fallback ----

    #[test]
    fn test_fallback_chat() {
        assert_eq!(classify("What's the weather like?"), Intent::Chat);
        assert_eq!(classify("안녕하세요"), Intent::Chat);
    }

    #[test]
    fn test_intent_display() {
        assert_eq!(Intent::FoodRecommendation.to_string(), "food_recommendation");
        assert_eq!(Intent::Chat.to_string(), "chat");
    }
}
