//! Localized phrase table for every short user-facing string.

use crate::types::Language;

/// A localized UI phrase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phrase {
    /// Transient placeholder shown while a reply is pending.
    Typing,
    NearbyIntro,
    NearbySelectRoute,
    MuseumReply,
    FoodReply,
    AffirmationReply,
    /// The chatbot answered with a body carrying no reply text.
    NoReply,
    /// A chat request was cancelled or ran past its deadline.
    RequestTimeout,
    /// A chat request failed for any other reason.
    RequestFailed,
    TitanicTitle,
    TitanicNoResults,
    Survived,
    Deceased,
    LoginFailed,
    ServerUnreachable,
}

impl Phrase {
    /// Text of this phrase in `lang`.
    pub fn text(self, lang: Language) -> &'static str {
        match (self, lang) {
            (Phrase::Typing, Language::Ko) => "답변을 작성하고 있어요...",
            (Phrase::Typing, Language::En) => "Typing...",

            (Phrase::NearbyIntro, Language::Ko) => {
                "근처에 가볼 만한 곳들을 골라봤어! 전통과 현대가 어우러진 코스야.\n\n"
            }
            (Phrase::NearbyIntro, Language::En) => {
                "Here are some places nearby worth visiting, mixing tradition and modern Seoul.\n\n"
            }

            (Phrase::NearbySelectRoute, Language::Ko) => "이 장소들로 경로를 만들어 줄까?",
            (Phrase::NearbySelectRoute, Language::En) => {
                "Shall I build a route through these places?"
            }

            (Phrase::MuseumReply, Language::Ko) => {
                "근처 박물관을 찾아봤어. 국립중앙박물관, 국립민속박물관, 국립고궁박물관을 \
                 지도에 표시해 둘게. 경로로 이어 볼까?"
            }
            (Phrase::MuseumReply, Language::En) => {
                "I found museums nearby: the National Museum of Korea, the National Folk \
                 Museum and the National Palace Museum are on the map. Want a route?"
            }

            (Phrase::FoodReply, Language::Ko) => {
                "비건 식당 대신 꽃밥에 피다를 넣어서 코스를 다시 짜 봤어. 이 경로 어때?"
            }
            (Phrase::FoodReply, Language::En) => {
                "I reworked the course around Kkotbap e Pida instead of the vegan stops. \
                 How does this route look?"
            }

            (Phrase::AffirmationReply, Language::Ko) => "좋아! 지도에 경로를 그려 줄게.",
            (Phrase::AffirmationReply, Language::En) => "Great! Drawing the route on the map.",

            (Phrase::NoReply, Language::Ko) => "응답을 받을 수 없습니다.",
            (Phrase::NoReply, Language::En) => "Unable to receive response.",

            (Phrase::RequestTimeout, Language::Ko) => {
                "응답 시간이 초과되었습니다. 잠시 후 다시 시도해주세요."
            }
            (Phrase::RequestTimeout, Language::En) => "Request timeout. Please try again later.",

            (Phrase::RequestFailed, Language::Ko) => {
                "죄송합니다. 오류가 발생했습니다. 잠시 후 다시 시도해주세요."
            }
            (Phrase::RequestFailed, Language::En) => {
                "Sorry, an error occurred. Please try again later."
            }

            (Phrase::TitanicTitle, Language::Ko) => "🚢 **Titanic 승객 검색 결과**",
            (Phrase::TitanicTitle, Language::En) => "🚢 **Titanic Passenger Search Results**",

            (Phrase::TitanicNoResults, Language::Ko) => {
                "검색 조건에 맞는 결과가 없습니다.\n\n다른 조건으로 검색해보세요."
            }
            (Phrase::TitanicNoResults, Language::En) => {
                "No results found for your search criteria.\n\nTry different search conditions."
            }

            (Phrase::Survived, Language::Ko) => "✅ 생존",
            (Phrase::Survived, Language::En) => "✅ Survived",
            (Phrase::Deceased, Language::Ko) => "❌ 사망",
            (Phrase::Deceased, Language::En) => "❌ Deceased",

            (Phrase::LoginFailed, Language::Ko) => "로그인에 실패했습니다.",
            (Phrase::LoginFailed, Language::En) => "Login failed.",
            (Phrase::ServerUnreachable, Language::Ko) => "서버 연결에 실패했습니다.",
            (Phrase::ServerUnreachable, Language::En) => "Could not connect to the server.",
        }
    }
}
