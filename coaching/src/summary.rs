//! Coach summary: aggregate mastery, weakest skills and next-best-actions.
//!
//! The summary is derived from its inputs on every render and has no
//! lifecycle of its own. Next actions follow a fixed priority and are gated
//! only on availability (a lab exists, a drill exists), never on scores.

use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::types::{LabDescriptor, MasteryEntry, MasteryMap, MicroDrill};

/// Confidence label shown before any assessment exists.
pub const DEFAULT_CONFIDENCE: &str = "Low";

/// Number of weakest skills surfaced by default.
pub const DEFAULT_WEAKEST_LIMIT: usize = 3;

/// A low-scoring skill surfaced in the "Your Gap" list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct WeakSkill {
    pub skill_id: String,
    pub mastery_score: f64,
    pub confidence: String,
}

impl WeakSkill {
    fn from_entry(skill_id: &str, entry: &MasteryEntry) -> Self {
        Self {
            skill_id: skill_id.to_string(),
            mastery_score: entry.mastery_score,
            confidence: entry.confidence.clone(),
        }
    }

    /// Score rounded for display.
    pub fn rounded_score(&self) -> i64 {
        self.mastery_score.round() as i64
    }
}

/// A recommended next step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NextAction {
    /// Re-watch the current clip or a related one
    RevisitClip,
    /// Work through the first available lab
    CompleteLab {
        #[serde(rename = "labId")]
        lab_id: String,
        title: String,
    },
    /// Take the topic's micro-drill
    TakeMicroDrill {
        #[serde(rename = "drillId")]
        drill_id: String,
    },
}

impl fmt::Display for NextAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RevisitClip => f.write_str("Watch this clip again or related clip"),
            Self::CompleteLab { title, .. } => write!(f, "Do lab: {title}"),
            Self::TakeMicroDrill { .. } => f.write_str("Take micro-drill"),
        }
    }
}

/// Derived coach panel contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct CoachingSummary {
    /// Mean mastery score, 0 when nothing has been assessed
    pub average_mastery: f64,
    /// Lowest-scoring skills, weakest first
    pub weakest_skills: Vec<WeakSkill>,
    pub next_actions: Vec<NextAction>,
    /// Confidence of the first assessed skill, in mapping order
    pub confidence_label: String,
}

impl CoachingSummary {
    /// Average mastery rounded for the percentage badge.
    pub fn mastery_percent(&self) -> i64 {
        self.average_mastery.round() as i64
    }

    /// Next actions rendered as display strings.
    pub fn action_labels(&self) -> Vec<String> {
        self.next_actions.iter().map(ToString::to_string).collect()
    }
}

/// Builds [`CoachingSummary`] values.
#[derive(Debug, Clone)]
pub struct Summarizer {
    weakest_limit: usize,
}

impl Summarizer {
    /// Create a summarizer with default settings.
    pub fn new() -> Self {
        Self {
            weakest_limit: DEFAULT_WEAKEST_LIMIT,
        }
    }

    /// Create a summarizer surfacing up to `weakest_limit` skills.
    pub fn with_weakest_limit(weakest_limit: usize) -> Self {
        Self { weakest_limit }
    }

    pub fn weakest_limit(&self) -> usize {
        self.weakest_limit
    }

    /// Summarize a learner's mastery for the coach panel.
    ///
    /// An absent mapping behaves exactly like an empty one.
    pub fn summarize(
        &self,
        mastery: Option<&MasteryMap>,
        labs: &[LabDescriptor],
        drill: Option<&MicroDrill>,
    ) -> CoachingSummary {
        let empty = MasteryMap::new();
        let mastery = mastery.unwrap_or(&empty);

        CoachingSummary {
            average_mastery: average_mastery(mastery),
            weakest_skills: self.weakest_skills(mastery),
            next_actions: next_actions(labs, drill),
            confidence_label: confidence_label(mastery),
        }
    }

    /// Skills ordered by ascending score, truncated to the limit.
    ///
    /// The sort is stable: equal scores keep mapping order. Scores are compared
    /// with [`f64::total_cmp`], so a positive NaN score ranks after every number and
    /// never reorders the rest.
    pub fn weakest_skills(&self, mastery: &MasteryMap) -> Vec<WeakSkill> {
        let mut ranked: Vec<(&str, &MasteryEntry)> = mastery.iter().collect();
        ranked.sort_by(|a, b| a.1.mastery_score.total_cmp(&b.1.mastery_score));

        ranked
            .into_iter()
            .take(self.weakest_limit)
            .map(|(skill_id, entry)| WeakSkill::from_entry(skill_id, entry))
            .collect()
    }
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Summarize with default settings.
pub fn summarize_coaching(
    mastery: Option<&MasteryMap>,
    labs: &[LabDescriptor],
    drill: Option<&MicroDrill>,
) -> CoachingSummary {
    Summarizer::new().summarize(mastery, labs, drill)
}

/// Arithmetic mean of all scores, 0 for an empty mapping.
pub fn average_mastery(mastery: &MasteryMap) -> f64 {
    if mastery.is_empty() {
        return 0.0;
    }
    let total: f64 = mastery.iter().map(|(_, entry)| entry.mastery_score).sum();
    total / mastery.len() as f64
}

/// Confidence of the first entry in mapping order.
///
/// This deliberately ignores scores: the label follows insertion order, not
/// the weakest skill. Empty mappings and blank confidences fall back to "Low".
pub fn confidence_label(mastery: &MasteryMap) -> String {
    mastery
        .first()
        .map(|(_, entry)| entry.confidence.as_str())
        .filter(|confidence| !confidence.is_empty())
        .unwrap_or(DEFAULT_CONFIDENCE)
        .to_string()
}

/// Fixed-priority action list: revisit, then first lab, then drill.
pub fn next_actions(labs: &[LabDescriptor], drill: Option<&MicroDrill>) -> Vec<NextAction> {
    let mut actions = vec![NextAction::RevisitClip];

    if let Some(lab) = labs.first() {
        actions.push(NextAction::CompleteLab {
            lab_id: lab.lab_id.clone(),
            title: lab.title.clone(),
        });
    }

    if let Some(drill) = drill {
        actions.push(NextAction::TakeMicroDrill {
            drill_id: drill.drill_id.clone(),
        });
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mastery(entries: &[(&str, f64, &str)]) -> MasteryMap {
        entries
            .iter()
            .map(|(id, score, confidence)| (*id, MasteryEntry::new(*score, *confidence)))
            .collect()
    }

    #[test]
    fn test_no_assessment_yet() {
        let summary = summarize_coaching(None, &[], None);

        assert_eq!(summary.average_mastery, 0.0);
        assert!(summary.weakest_skills.is_empty());
        assert_eq!(summary.next_actions, vec![NextAction::RevisitClip]);
        assert_eq!(summary.confidence_label, "Low");
    }

    #[test]
    fn test_empty_mapping_matches_absent_mapping() {
        let empty = MasteryMap::new();
        assert_eq!(
            summarize_coaching(Some(&empty), &[], None),
            summarize_coaching(None, &[], None)
        );
    }

    #[test]
    fn test_average_mastery() {
        let map = mastery(&[("a", 90.0, "High"), ("b", 40.0, "Low"), ("c", 41.0, "Low")]);
        let summary = summarize_coaching(Some(&map), &[], None);
        assert!((summary.average_mastery - 57.0).abs() < 1e-9);
        assert_eq!(summary.mastery_percent(), 57);
    }

    #[test]
    fn test_weakest_ties_keep_insertion_order() {
        let map = mastery(&[
            ("a", 90.0, "High"),
            ("b", 40.0, "Low"),
            ("c", 40.0, "Medium"),
            ("d", 95.0, "High"),
        ]);
        let summary = summarize_coaching(Some(&map), &[], None);

        let ids: Vec<&str> = summary.weakest_skills.iter().map(|s| s.skill_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert_eq!(summary.weakest_skills[0].mastery_score, 40.0);
        assert_eq!(summary.weakest_skills[1].confidence, "Medium");
    }

    #[test]
    fn test_ties_not_resorted_by_id() {
        let map = mastery(&[("zeta", 10.0, "Low"), ("alpha", 10.0, "Low")]);
        let weakest = Summarizer::new().weakest_skills(&map);
        assert_eq!(weakest[0].skill_id, "zeta");
        assert_eq!(weakest[1].skill_id, "alpha");
    }

    #[test]
    fn test_nan_score_ranks_last() {
        let map = mastery(&[("broken", f64::NAN, "Low"), ("b", 10.0, "Low"), ("c", 5.0, "Low"), ("d", 5.0, "High")]);
        let weakest = Summarizer::with_weakest_limit(4).weakest_skills(&map);

        let ids: Vec<&str> = weakest.iter().map(|s| s.skill_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "d", "b", "broken"]);
    }

    #[test]
    fn test_fewer_than_limit_is_not_padded() {
        let map = mastery(&[("only", 12.0, "Low")]);
        let summary = summarize_coaching(Some(&map), &[], None);
        assert_eq!(summary.weakest_skills.len(), 1);
    }

    #[test]
    fn test_custom_weakest_limit() {
        let map = mastery(&[("a", 1.0, "Low"), ("b", 2.0, "Low"), ("c", 3.0, "Low")]);
        let weakest = Summarizer::with_weakest_limit(2).weakest_skills(&map);
        assert_eq!(weakest.len(), 2);
        assert_eq!(weakest[1].skill_id, "b");
    }

    #[test]
    fn test_confidence_comes_from_first_entry_not_weakest() {
        let map = mastery(&[("strong", 95.0, "High"), ("weak", 5.0, "Low")]);
        let summary = summarize_coaching(Some(&map), &[], None);
        assert_eq!(summary.confidence_label, "High");
        assert_eq!(summary.weakest_skills[0].skill_id, "weak");
    }

    #[test]
    fn test_blank_confidence_falls_back() {
        let map = mastery(&[("a", 50.0, ""), ("b", 60.0, "High")]);
        assert_eq!(confidence_label(&map), "Low");
    }

    #[test]
    fn test_next_actions_full_order() {
        let labs = vec![
            LabDescriptor::new("lab-1", "Configure endpoint"),
            LabDescriptor::new("lab-2", "Harden storage"),
        ];
        let drill = MicroDrill::new("drill-1");
        let summary = summarize_coaching(None, &labs, Some(&drill));

        assert_eq!(
            summary.next_actions,
            vec![
                NextAction::RevisitClip,
                NextAction::CompleteLab {
                    lab_id: "lab-1".to_string(),
                    title: "Configure endpoint".to_string(),
                },
                NextAction::TakeMicroDrill {
                    drill_id: "drill-1".to_string(),
                },
            ]
        );
        assert_eq!(
            summary.action_labels(),
            vec![
                "Watch this clip again or related clip",
                "Do lab: Configure endpoint",
                "Take micro-drill",
            ]
        );
    }

    #[test]
    fn test_drill_without_labs() {
        let drill = MicroDrill::new("d");
        let actions = next_actions(&[], Some(&drill));
        assert_eq!(actions.len(), 2);
        assert!(matches!(actions[1], NextAction::TakeMicroDrill { .. }));
    }

    #[test]
    fn test_actions_ignore_mastery() {
        let low = mastery(&[("a", 1.0, "Low")]);
        let high = mastery(&[("a", 99.0, "High")]);
        let labs = vec![LabDescriptor::new("lab", "Lab")];
        assert_eq!(
            summarize_coaching(Some(&low), &labs, None).next_actions,
            summarize_coaching(Some(&high), &labs, None).next_actions
        );
    }

    #[test]
    fn test_next_action_serialization() {
        let action = NextAction::CompleteLab {
            lab_id: "lab-1".to_string(),
            title: "Configure endpoint".to_string(),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["kind"], "completeLab");
        assert_eq!(json["labId"], "lab-1");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        let map = mastery(&[("a", 52.0, "Low"), ("b", 53.0, "Low")]);
        let summary = summarize_coaching(Some(&map), &[], None);
        assert_eq!(summary.mastery_percent(), 53);
        assert_eq!(summary.weakest_skills[0].rounded_score(), 52);
    }
}
