//! Reply text for every branch: canned replies, Titanic result rendering and
//! failure messages.

use std::fmt::Write as _;

use kroaddy_core::i18n::Phrase;
use kroaddy_core::types::{Language, Passenger, PassengerSearchResponse};

use crate::error::ChatError;
use crate::intent::Intent;

/// Fixed reply of the historic-sites demo. English only.
pub const HISTORIC_REPLY: &str =
    "I recommend Gyeongbokgung Palace, Seodaemun Prison History Hall, and Changdeokgung Palace";

const NEARBY_WRITEUP_KO: &str = "---

## 🏛️ 경복궁 (Gyeongbokgung Palace)

서울에서 한국 전통 문화를 가장 제대로 볼 수 있는 궁궐이야. 큰 궁문이랑 왕이 쓰던 건물들이 정말 멋지고, 경회루라는 연못도 예뻐서 사진 찍기 좋아. 한국 역사나 전통 건축에 관심 있으면 꼭 가봐야 해!

---

## 🌊 청계천 (Cheonggyecheon Stream)

도시 한가운데에 있는 산책로인데, 물 흐르는 소리 들으면서 걸을 수 있어서 정말 편안해. 곳곳에 예쁜 다리랑 조형물도 있어. 특히 밤에는 조명이 예뻐서 분위기가 좋아.

---

## 🏪 광장시장 (Gwangjang Market)

서울에서 가장 오래된 전통시장 중 하나로, 요즘 외국인들이 한국 로컬 분위기 제대로 느끼고 싶을 때 꼭 찾는 곳이야. 한복, 원단, 빈티지 상점도 많아서 음식만 즐기는 곳이 아니라 \"한국 일상 속 시장 문화\"를 통째로 경험할 수 있는 공간이야.

---

## ⛪ 명동대성당 (Myeongdong Cathedral)

한국에서 가장 유명한 가톨릭 성당 중 하나야. 건물이 고딕 스타일이라 굉장히 아름답고, 주변이 명동이라 쇼핑하다가 잠깐 들르기 딱 좋아. 역사적으로도 의미 있는 장소야.

---

## 🥗 비건 인사 채식당 (Vegan Insa Restaurant)

인사동 근처에 있는 비건 레스토랑이야. 한국 전통 스타일을 살린 비건 요리를 맛볼 수 있어서, 비건이 아니라도 경험해보기 좋아. 외국인 여행자들도 많이 가!

---

## 🍽️ 오세계향 (Osegyehyang)

인사동에서 가장 유명한 비건 레스토랑 중 하나. 사찰음식 스타일의 요리를 현대적으로 만들어서 맛도 좋고 건강한 느낌이야. 비건 친구가 있다면 특히 추천하고 싶어.

---

## ☕ 카페 수달 (Cafe Soodal)

조용하고 편안한 분위기에 한국식 디저트도 있는 카페야. 한옥 감성도 느껴져서 서울의 전통적인 분위기를 좀 더 편하게 즐길 수 있어.

---

## 🍵 청수당 (Cheongsudang)

한옥 스타일의 카페로 요즘 정말 인기 많아. 동양적인 인테리어가 예쁘고, 디저트도 정교하게 잘 만들어져 있어. 한국 전통 분위기 + 현대 감성 모두 즐길 수 있어서 외국인들이 좋아하는 곳이야.

---";

const NEARBY_WRITEUP_EN: &str = "---

## 🏛️ Gyeongbokgung Palace

The best palace in Seoul to experience Korean traditional culture. The grand palace gates and buildings used by kings are truly magnificent, and the Gyeonghoeru pond is beautiful for photos. A must-visit if you're interested in Korean history or traditional architecture!

---

## 🌊 Cheonggyecheon Stream

A walking path in the middle of the city where you can walk while listening to the sound of flowing water. There are beautiful bridges and sculptures throughout. Especially beautiful at night with lighting.

---

## 🏪 Gwangjang Market

One of Seoul's oldest traditional markets, a place foreigners visit to truly experience Korean local atmosphere. Not just for food, but a space where you can experience \"Korean daily market culture\" with hanbok, fabric, and vintage shops.

---

## ⛪ Myeongdong Cathedral

One of Korea's most famous Catholic cathedrals. The Gothic-style building is very beautiful, and it's perfect for a quick visit while shopping in Myeongdong. A historically significant place.

---

## 🥗 Vegan Insa Restaurant

A vegan restaurant near Insadong. You can try vegan dishes in Korean traditional style, great even if you're not vegan. Popular with foreign travelers!

---

## 🍽️ Osegyehyang

One of the most famous vegan restaurants in Insadong. Modern temple food-style dishes that are tasty and healthy. Highly recommended if you have vegan friends.

---

## ☕ Cafe Soodal

A quiet and comfortable cafe with Korean-style desserts. You can feel the hanok sensibility and enjoy Seoul's traditional atmosphere more comfortably.

---

## 🍵 Cheongsudang

A hanok-style cafe that's very popular these days. Beautiful Eastern interior and well-crafted desserts. A place foreigners love for both Korean traditional atmosphere and modern sensibility.

---";

/// Full nearby-places reply: intro, per-place write-up, route prompt.
pub fn nearby_reply(lang: Language) -> String {
    let writeup = match lang {
        Language::Ko => NEARBY_WRITEUP_KO,
        Language::En => NEARBY_WRITEUP_EN,
    };
    format!(
        "{}{}\n\n**{}**",
        Phrase::NearbyIntro.text(lang),
        writeup,
        Phrase::NearbySelectRoute.text(lang)
    )
}

/// Final content for a timer-driven branch, or `None` for branches that
/// are answered by a backend or the slash acknowledgement.
pub fn canned_reply(intent: Intent, lang: Language) -> Option<String> {
    let text = match intent {
        Intent::Nearby => return Some(nearby_reply(lang)),
        Intent::Museum => Phrase::MuseumReply.text(lang),
        Intent::FoodRecommendation => Phrase::FoodReply.text(lang),
        Intent::Affirmation => Phrase::AffirmationReply.text(lang),
        Intent::HistoricSites => HISTORIC_REPLY,
        Intent::Titanic | Intent::SlashSearch | Intent::Chat => return None,
    };
    Some(text.to_string())
}

/// Acknowledgement appended after a slash search.
pub fn searching_text(keyword: &str, lang: Language) -> String {
    match lang {
        Language::Ko => format!("\"{}\" 검색 중...", keyword),
        Language::En => format!("Searching for \"{}\"...", keyword),
    }
}

/// Timeout text for cancellations, generic apology otherwise.
pub fn failure_text(err: &ChatError, lang: Language) -> &'static str {
    if err.is_cancellation() {
        Phrase::RequestTimeout.text(lang)
    } else {
        Phrase::RequestFailed.text(lang)
    }
}

/// Apology for a failed Titanic search, carrying the error text.
pub fn titanic_error_text(err: &ChatError, lang: Language) -> String {
    if err.is_cancellation() {
        return Phrase::RequestTimeout.text(lang).to_string();
    }
    match lang {
        Language::Ko => format!(
            "🚢 Titanic 검색 중 오류가 발생했습니다.\n\n오류: {}\n\n잠시 후 다시 시도해주세요.",
            err
        ),
        Language::En => format!(
            "🚢 An error occurred while searching Titanic passengers.\n\nError: {}\n\nPlease try again later.",
            err
        ),
    }
}

struct Labels {
    survival: &'static str,
    class: &'static str,
    class_suffix: &'static str,
    sex: &'static str,
    age: &'static str,
    age_suffix: &'static str,
    ticket: &'static str,
    fare: &'static str,
    cabin: &'static str,
    embarked: &'static str,
}

const LABELS_KO: Labels = Labels {
    survival: "생존 여부",
    class: "등급",
    class_suffix: "등급",
    sex: "성별",
    age: "나이",
    age_suffix: "세",
    ticket: "티켓",
    fare: "요금",
    cabin: "선실",
    embarked: "승선지",
};

const LABELS_EN: Labels = Labels {
    survival: "Survival",
    class: "Class",
    class_suffix: "",
    sex: "Sex",
    age: "Age",
    age_suffix: "",
    ticket: "Ticket",
    fare: "Fare",
    cabin: "Cabin",
    embarked: "Embarked",
};

fn found_text(total: u64, lang: Language) -> String {
    match lang {
        Language::Ko => format!("{}명의 승객을 찾았습니다.", total),
        Language::En => format!("Found {} passengers.", total),
    }
}

/// Render a Titanic search response as a markdown message.
pub fn render_titanic(response: &PassengerSearchResponse, lang: Language) -> String {
    let title = Phrase::TitanicTitle.text(lang);
    if response.total_results == 0 {
        return format!("{}\n\n{}", title, Phrase::TitanicNoResults.text(lang));
    }

    let summary = response
        .message
        .as_deref()
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| found_text(response.total_results, lang));

    let mut out = format!("{}\n\n{}\n\n", title, summary);
    for (index, passenger) in response.results.iter().enumerate() {
        push_passenger(&mut out, index + 1, passenger, lang);
    }
    out
}

fn push_passenger(out: &mut String, position: usize, p: &Passenger, lang: Language) {
    let labels = match lang {
        Language::Ko => &LABELS_KO,
        Language::En => &LABELS_EN,
    };
    let survived = if p.survived == 1 {
        Phrase::Survived.text(lang)
    } else {
        Phrase::Deceased.text(lang)
    };
    let age = match p.age {
        Some(age) if age > 0.0 => format!("{}{}", age, labels.age_suffix),
        _ => "N/A".to_string(),
    };
    let fare = match p.fare {
        Some(fare) if fare > 0.0 => format!("${:.2}", fare),
        _ => "N/A".to_string(),
    };

    // Writing to a String cannot fail.
    let _ = write!(out, "---\n\n**{}. {}**\n\n", position, p.name);
    let _ = writeln!(out, "- {}: {}", labels.survival, survived);
    let _ = writeln!(out, "- {}: {}{}", labels.class, p.pclass, labels.class_suffix);
    let _ = writeln!(out, "- {}: {}", labels.sex, p.sex);
    let _ = writeln!(out, "- {}: {}", labels.age, age);
    let _ = writeln!(out, "- {}: {}", labels.ticket, p.ticket);
    let _ = writeln!(out, "- {}: {}", labels.fare, fare);
    if let Some(cabin) = p.cabin.as_deref().filter(|c| !c.is_empty()) {
        let _ = writeln!(out, "- {}: {}", labels.cabin, cabin);
    }
    if let Some(embarked) = p.embarked.as_deref().filter(|e| !e.is_empty()) {
        let _ = writeln!(out, "- {}: {}", labels.embarked, embarked);
    }
    out.push('\n');
}
