//! Tutor payload types.
//!
//! These mirror the JSON returned by the tutor endpoint: a per-skill mastery
//! mapping, the labs attached to the current topic and an optional micro-drill.
//!
//! With the `typescript` feature enabled, these types can be exported to
//! TypeScript using ts-rs.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Assessed proficiency on one skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct MasteryEntry {
    /// Score in [0, 100], supplied by the scoring service
    pub mastery_score: f64,
    /// Confidence bucket, passed through verbatim ("High", "Medium", "Low", ...)
    #[serde(default)]
    pub confidence: String,
    /// Informational only. Timestamps without an offset are read as UTC and
    /// unparseable values decode as `None`.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_assessed_at: Option<DateTime<Utc>>,
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    let raw = match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(raw)) => raw,
        None | Some(serde_json::Value::Null) => return Ok(None),
        Some(other) => {
            tracing::warn!(value = %other, "Ignoring non-string assessment timestamp");
            return Ok(None);
        }
    };

    if let Ok(at) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(at.with_timezone(&Utc)));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Some(Utc.from_utc_datetime(&naive)));
    }

    tracing::warn!(value = %raw, "Ignoring unparseable assessment timestamp");
    Ok(None)
}

impl MasteryEntry {
    pub fn new(mastery_score: f64, confidence: impl Into<String>) -> Self {
        Self {
            mastery_score,
            confidence: confidence.into(),
            last_assessed_at: None,
        }
    }

    /// Builder: set the assessment timestamp.
    pub fn assessed_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_assessed_at = Some(at);
        self
    }
}

/// Skill id → mastery entry, in insertion order.
///
/// Ranking ties and the confidence label both depend on this order, so the
/// mapping keeps the order in which skills were inserted (or appeared in the
/// decoded JSON object). Re-inserting a skill replaces its entry in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MasteryMap {
    entries: Vec<(String, MasteryEntry)>,
}

impl MasteryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert or replace. Returns the previous entry for `skill_id`, if any.
    pub fn insert(&mut self, skill_id: impl Into<String>, entry: MasteryEntry) -> Option<MasteryEntry> {
        let skill_id = skill_id.into();
        if let Some(index) = self.entries.iter().position(|(id, _)| *id == skill_id) {
            return Some(std::mem::replace(&mut self.entries[index].1, entry));
        }
        self.entries.push((skill_id, entry));
        None
    }

    pub fn get(&self, skill_id: &str) -> Option<&MasteryEntry> {
        self.entries
            .iter()
            .find(|(id, _)| id == skill_id)
            .map(|(_, entry)| entry)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MasteryEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    /// The first entry in insertion order.
    pub fn first(&self) -> Option<(&str, &MasteryEntry)> {
        self.entries.first().map(|(id, entry)| (id.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, MasteryEntry)> for MasteryMap {
    fn from_iter<I: IntoIterator<Item = (K, MasteryEntry)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (skill_id, entry) in iter {
            map.insert(skill_id, entry);
        }
        map
    }
}

impl Serialize for MasteryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (skill_id, entry) in &self.entries {
            map.serialize_entry(skill_id, entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MasteryMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MasteryMapVisitor;

        impl<'de> Visitor<'de> for MasteryMapVisitor {
            type Value = MasteryMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of skill ids to mastery entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<MasteryMap, A::Error> {
                let mut map = MasteryMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((skill_id, entry)) = access.next_entry::<String, MasteryEntry>()? {
                    map.insert(skill_id, entry);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(MasteryMapVisitor)
    }
}

/// One step of a hands-on lab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase", default)]
pub struct LabStep {
    pub id: String,
    pub title: String,
    pub description: String,
    pub checklist: Vec<String>,
}

/// A hands-on lab attached to a topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct LabDescriptor {
    pub lab_id: String,
    pub title: String,
    #[serde(default)]
    pub steps: Vec<LabStep>,
    #[serde(default)]
    pub checklist: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl LabDescriptor {
    pub fn new(lab_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            lab_id: lab_id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Builder: append a step with the given id and title.
    pub fn with_step(mut self, id: impl Into<String>, title: impl Into<String>) -> Self {
        self.steps.push(LabStep {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        });
        self
    }
}

/// One answer option of a drill question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(default)]
pub struct DrillOption {
    pub id: String,
    pub text: String,
}

/// A multiple-choice drill question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase", default)]
pub struct DrillQuestion {
    pub id: String,
    pub question_text: String,
    pub options: Vec<DrillOption>,
}

/// A short quiz targeting the current topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct MicroDrill {
    pub drill_id: String,
    #[serde(default)]
    pub questions: Vec<DrillQuestion>,
}

impl MicroDrill {
    pub fn new(drill_id: impl Into<String>) -> Self {
        Self {
            drill_id: drill_id.into(),
            questions: Vec::new(),
        }
    }

    /// Builder: append a question with option ids only.
    pub fn with_question<I, S>(mut self, id: impl Into<String>, option_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.questions.push(DrillQuestion {
            id: id.into(),
            question_text: String::new(),
            options: option_ids
                .into_iter()
                .map(|option_id| DrillOption {
                    id: option_id.into(),
                    text: String::new(),
                })
                .collect(),
        });
        self
    }
}

/// The coaching-relevant part of the tutor endpoint response.
///
/// `mastery` is `None` when the learner has not been assessed yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct TutorPayload {
    #[serde(default)]
    #[cfg_attr(feature = "typescript", ts(type = "Record<string, MasteryEntry> | null"))]
    pub mastery: Option<MasteryMap>,
    #[serde(default)]
    pub labs: Vec<LabDescriptor>,
    #[serde(default)]
    pub drill: Option<MicroDrill>,
}

impl TutorPayload {
    /// Decode a tutor payload from JSON. Unknown fields are ignored.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
