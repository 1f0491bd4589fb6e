//! Level badges shown on certification cards.

/// Map a catalog level onto the Beginner/Intermediate/Advanced scale.
///
/// Matching is a case-insensitive substring check. Unrecognised levels are
/// passed through unchanged; an absent level yields an empty label.
pub fn level_label(level: Option<&str>) -> String {
    let Some(level) = level else {
        return String::new();
    };
    let lower = level.to_lowercase();
    if lower.contains("fundamentals") {
        "Beginner".to_string()
    } else if lower.contains("associate") {
        "Intermediate".to_string()
    } else if lower.contains("expert") {
        "Advanced".to_string()
    } else {
        level.to_string()
    }
}
