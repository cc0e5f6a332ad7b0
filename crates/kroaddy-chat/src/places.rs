//! Fixed place catalogues used by the canned route branches.

use kroaddy_core::types::Location;

struct PlaceSeed {
    id: &'static str,
    name: &'static str,
    address: &'static str,
    lat: f64,
    lng: f64,
}

impl PlaceSeed {
    fn to_location(&self) -> Location {
        Location {
            id: self.id.to_string(),
            name: self.name.to_string(),
            address: self.address.to_string(),
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// Id of the featured restaurant promoted by the food route.
pub const FEATURED_RESTAURANT_ID: &str = "place4";

/// Vegan stops dropped from the food route.
const FOOD_ROUTE_EXCLUDED: &[&str] = &["place5", "place6", "place7"];

const NEARBY: &[PlaceSeed] = &[
    PlaceSeed {
        id: "place1",
        name: "경복궁",
        address: "서울특별시 종로구 사직로 161",
        lat: 37.5796,
        lng: 126.9770,
    },
    PlaceSeed {
        id: "place2",
        name: "청계천",
        address: "서울특별시 종로구 청계천로 1",
        lat: 37.5696,
        lng: 126.9784,
    },
    PlaceSeed {
        id: "place3",
        name: "광장시장",
        address: "서울특별시 종로구 창경궁로 88",
        lat: 37.5700,
        lng: 126.9996,
    },
    PlaceSeed {
        id: "place4",
        name: "꽃밥에 피다",
        address: "서울특별시 종로구 북촌로 11",
        lat: 37.5800,
        lng: 126.9855,
    },
    PlaceSeed {
        id: "place5",
        name: "비건 인사 채식당",
        address: "서울특별시 종로구 인사동길 30",
        lat: 37.5740,
        lng: 126.9856,
    },
    PlaceSeed {
        id: "place6",
        name: "오세계향",
        address: "서울특별시 종로구 인사동12길 14-5",
        lat: 37.5748,
        lng: 126.9853,
    },
    PlaceSeed {
        id: "place7",
        name: "카페 수달",
        address: "서울특별시 종로구 북촌로5길 20",
        lat: 37.5790,
        lng: 126.9840,
    },
    PlaceSeed {
        id: "place8",
        name: "청수당",
        address: "서울특별시 종로구 돈화문로11나길 26-24",
        lat: 37.5713,
        lng: 126.9912,
    },
];

const MUSEUMS: &[PlaceSeed] = &[
    PlaceSeed {
        id: "museum1",
        name: "국립중앙박물관",
        address: "서울특별시 용산구 서빙고로 137",
        lat: 37.5240,
        lng: 126.9803,
    },
    PlaceSeed {
        id: "museum2",
        name: "국립민속박물관",
        address: "서울특별시 종로구 삼청로 37",
        lat: 37.5818,
        lng: 126.9790,
    },
    PlaceSeed {
        id: "museum3",
        name: "국립고궁박물관",
        address: "서울특별시 종로구 효자로 12",
        lat: 37.5766,
        lng: 126.9750,
    },
];

const HISTORIC: &[PlaceSeed] = &[
    PlaceSeed {
        id: "1",
        name: "Changdeokgung",
        address: "서울특별시 종로구 율곡로 99",
        lat: 37.5794,
        lng: 126.9910,
    },
    PlaceSeed {
        id: "2",
        name: "Gyeongbokgung",
        address: "서울특별시 종로구 사직로 161",
        lat: 37.5796,
        lng: 126.9770,
    },
    PlaceSeed {
        id: "3",
        name: "Seodaemun Prison",
        address: "서울특별시 서대문구 통일로 251",
        lat: 37.5744,
        lng: 126.9587,
    },
];

fn materialize(seeds: &[PlaceSeed]) -> Vec<Location> {
    seeds.iter().map(PlaceSeed::to_location).collect()
}

/// Places shown for a "what's nearby" question.
pub fn nearby_route() -> Vec<Location> {
    materialize(NEARBY)
}

pub fn museum_route() -> Vec<Location> {
    materialize(MUSEUMS)
}

/// Nearby route without the vegan stops, ending at the featured restaurant.
pub fn food_route() -> Vec<Location> {
    let mut route: Vec<Location> = NEARBY
        .iter()
        .filter(|seed| !FOOD_ROUTE_EXCLUDED.contains(&seed.id))
        .map(PlaceSeed::to_location)
        .collect();

    if let Some(pos) = route.iter().position(|p| p.id == FEATURED_RESTAURANT_ID) {
        let featured = route.remove(pos);
        route.push(featured);
    }
    route
}

pub fn historic_route() -> Vec<Location> {
    materialize(HISTORIC)
}

/// Look up a catalogue place by id across every catalogue.
pub fn find_place(id: &str) -> Option<Location> {
    NEARBY
        .iter()
        .chain(MUSEUMS)
        .chain(HISTORIC)
        .find(|seed| seed.id == id)
        .map(PlaceSeed::to_location)
}
