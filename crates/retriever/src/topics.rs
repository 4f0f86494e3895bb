//! Query → topic taxonomy used to pick the target document.

/// Topic used when no keyword in the query is recognised.
pub const DEFAULT_TOPIC: &str = "speed_limit";

/// Ordered keyword table. The first keyword contained in the query wins.
const TOPIC_KEYWORDS: &[(&str, &str)] = &[
    ("speed", "speed_limit"),
    ("limit", "speed_limit"),
    ("autobahn", "autobahn"),
    ("highway", "autobahn"),
    ("park", "parking"),
    ("parking", "parking"),
    ("right", "right_of_way"),
    ("way", "right_of_way"),
    ("priority", "right_of_way"),
    ("sign", "traffic_signs"),
    ("traffic", "traffic_signs"),
    ("alcohol", "alcohol_limit"),
    ("drink", "alcohol_limit"),
    ("license", "license"),
    ("licence", "license"),
    ("safety", "safety"),
    ("seatbelt", "safety"),
    ("accident", "accident"),
    ("insurance", "insurance"),
    ("fine", "fines"),
    ("penalty", "fines"),
    ("tire", "tires"),
    ("winter", "tires"),
    ("environmental", "environmental"),
];

/// Map a free-text query to a topic key.
pub fn topic_for_query(query: &str) -> &'static str {
    let lower = query.to_lowercase();
    TOPIC_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, topic)| *topic)
        .unwrap_or(DEFAULT_TOPIC)
}
