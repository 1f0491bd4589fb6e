//! Mastery coaching for the certification tutor.
//!
//! Consumes the per-skill mastery scores produced by the scoring service and
//! derives what the coach panel shows:
//!
//! - **Average mastery**: mean score, 0 before any assessment
//! - **Weakest skills**: stable ascending ranking, top three
//! - **Confidence label**: confidence of the first assessed skill
//! - **Next-best-actions**: revisit clip, first lab, micro-drill, in that order
//!
//! It also tracks lab step completion ([`LabProgress`]) and grades
//! micro-drills ([`grade_drill`]). Scores are consumed, never computed here.
//!
//! # Example
//!
//! ```
//! use coaching::{summarize_coaching, LabDescriptor, MasteryEntry, MasteryMap};
//!
//! let mut mastery = MasteryMap::new();
//! mastery.insert("networking", MasteryEntry::new(40.0, "Low"));
//! mastery.insert("identity", MasteryEntry::new(80.0, "High"));
//!
//! let labs = vec![LabDescriptor::new("lab-1", "Configure endpoint")];
//! let summary = summarize_coaching(Some(&mastery), &labs, None);
//!
//! assert_eq!(summary.mastery_percent(), 60);
//! assert_eq!(summary.weakest_skills[0].skill_id, "networking");
//! assert_eq!(summary.next_actions.len(), 2);
//! ```

pub mod drill;
pub mod labs;
pub mod summary;
pub mod types;

// Re-export main types
pub use drill::{grade_drill, AnswerKey, DrillAnswers, DrillError, DrillResult, QuestionOutcome};
pub use labs::LabProgress;
pub use summary::{
    average_mastery, confidence_label, next_actions, summarize_coaching, CoachingSummary,
    NextAction, Summarizer, WeakSkill, DEFAULT_CONFIDENCE, DEFAULT_WEAKEST_LIMIT,
};
pub use types::*;
