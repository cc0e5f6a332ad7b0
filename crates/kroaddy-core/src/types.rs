use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KroaddyError;

// =============================================================================
// Conversation
// =============================================================================

/// Author of a conversation message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single entry in the conversation log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Language used for every user-facing reply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ko,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = KroaddyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" | "kr" | "korean" => Ok(Language::Ko),
            "en" | "english" => Ok(Language::En),
            other => Err(KroaddyError::UnsupportedLanguage(other.to_string())),
        }
    }
}

// =============================================================================
// Places
// =============================================================================

/// A place shown on the map and used as a route stop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

/// A latitude/longitude pair reported by the client.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Current weather at the user's location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub temp: f64,
    pub description: String,
    pub city: String,
}

/// Location and weather forwarded to the chatbot when known.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,
}

impl ContextInfo {
    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.weather.is_none()
    }
}

// =============================================================================
// Titanic search
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Age,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Default number of passengers requested when the text names no count.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// Structured query for the Titanic passenger search service.
///
/// Unset optional fields are omitted from the JSON body so the service can
/// apply its own defaults. `sort_order` is only carried alongside `sort_by`;
/// when it is absent the service treats the order as ascending.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilter {
    pub keyword: String,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    /// 1 = survived, 0 = died.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub survived: Option<u8>,
    /// Passenger class, 1 through 3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pclass: Option<u8>,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            limit: DEFAULT_SEARCH_LIMIT,
            sex: None,
            age_min: None,
            age_max: None,
            sort_by: None,
            sort_order: None,
            survived: None,
            pclass: None,
        }
    }
}

impl SearchFilter {
    /// Effective sort order, ascending unless stated otherwise.
    pub fn effective_sort_order(&self) -> SortOrder {
        self.sort_order.unwrap_or_default()
    }
}

/// One row of the passenger dataset, as returned by the search service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Survived")]
    pub survived: u8,
    #[serde(rename = "Pclass")]
    pub pclass: u8,
    #[serde(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "Age", default)]
    pub age: Option<f64>,
    #[serde(rename = "Ticket")]
    pub ticket: String,
    #[serde(rename = "Fare", default)]
    pub fare: Option<f64>,
    #[serde(rename = "Cabin", default)]
    pub cabin: Option<String>,
    #[serde(rename = "Embarked", default)]
    pub embarked: Option<String>,
}

/// Body of a successful `/search` response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PassengerSearchResponse {
    pub total_results: u64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub results: Vec<Passenger>,
}

// =============================================================================
// Chatbot
// =============================================================================

/// Body of a freeform chat request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatbotRequest {
    pub message: String,
    pub conversation_history: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_profile: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_info: Option<ContextInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_constructors() {
        let m = Message::user("hi");
        assert_eq!(m.role, Role::User);
        assert_eq!(m.content, "hi");
        assert_eq!(Message::assistant("yo").role, Role::Assistant);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let v = serde_json::to_value(Message::assistant("x")).unwrap();
        assert_eq!(v, json!({"role": "assistant", "content": "x"}));
    }

    #[test]
    fn test_language_parse() {
        assert_eq!("ko".parse::<Language>().unwrap(), Language::Ko);
        assert_eq!(" EN ".parse::<Language>().unwrap(), Language::En);
        assert!("fr".parse::<Language>().is_err());
        assert_eq!(Language::default(), Language::Ko);
        assert_eq!(Language::En.to_string(), "en");
    }

    #[test]
    fn test_default_filter_serializes_only_required_fields() {
        let v = serde_json::to_value(SearchFilter::default()).unwrap();
        assert_eq!(v, json!({"keyword": "", "limit": 10}));
    }

    #[test]
    fn test_full_filter_serialization() {
        let filter = SearchFilter {
            keyword: "smith".to_string(),
            limit: 3,
            sex: Some(Sex::Female),
            age_min: Some(20),
            age_max: Some(40),
            sort_by: Some(SortKey::Age),
            sort_order: Some(SortOrder::Desc),
            survived: Some(0),
            pclass: Some(2),
        };
        let v = serde_json::to_value(&filter).unwrap();
        assert_eq!(
            v,
            json!({
                "keyword": "smith",
                "limit": 3,
                "sex": "female",
                "age_min": 20,
                "age_max": 40,
                "sort_by": "age",
                "sort_order": "desc",
                "survived": 0,
                "pclass": 2
            })
        );
    }

    #[test]
    fn test_effective_sort_order_defaults_to_asc() {
        assert_eq!(SearchFilter::default().effective_sort_order(), SortOrder::Asc);
    }

    #[test]
    fn test_passenger_response_deserializes_optional_fields() {
        let body = json!({
            "total_results": 1,
            "results": [{
                "Name": "Braund, Mr. Owen Harris",
                "Survived": 0,
                "Pclass": 3,
                "Sex": "male",
                "Age": 22.0,
                "Ticket": "A/5 21171",
                "Fare": 7.25,
                "Cabin": null
            }]
        });
        let resp: PassengerSearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.total_results, 1);
        assert!(resp.message.is_none());
        let p = &resp.results[0];
        assert_eq!(p.pclass, 3);
        assert_eq!(p.age, Some(22.0));
        assert!(p.cabin.is_none());
        assert!(p.embarked.is_none());
    }

    #[test]
    fn test_chatbot_request_omits_empty_optionals() {
        let req = ChatbotRequest {
            message: "hello".to_string(),
            conversation_history: vec![Message::user("earlier")],
            user_profile: None,
            context_info: None,
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(
            v,
            json!({
                "message": "hello",
                "conversation_history": [{"role": "user", "content": "earlier"}]
            })
        );
    }

    #[test]
    fn test_context_info_is_empty() {
        let mut ctx = ContextInfo::default();
        assert!(ctx.is_empty());
        ctx.location = Some(GeoPoint { lat: 37.5, lng: 127.0 });
        assert!(!ctx.is_empty());
        let v = serde_json::to_value(&ctx).unwrap();
        assert_eq!(v, json!({"location": {"lat": 37.5, "lng": 127.0}}));
    }
}
