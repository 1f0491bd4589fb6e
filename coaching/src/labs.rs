//! Lab step completion tracking.
//!
//! Progress is an immutable value owned by the caller. Toggling a step returns
//! a new [`LabProgress`]; nothing is shared between labs panels.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::types::LabDescriptor;

/// Completed step ids, per lab id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabProgress {
    completed: BTreeMap<String, BTreeSet<String>>,
}

impl LabProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with `step_id` of `lab_id` flipped between done and not done.
    pub fn toggle_step(&self, lab_id: &str, step_id: &str) -> Self {
        let mut next = self.clone();
        let steps = next.completed.entry(lab_id.to_string()).or_default();
        if !steps.remove(step_id) {
            steps.insert(step_id.to_string());
        }
        if steps.is_empty() {
            next.completed.remove(lab_id);
        }
        next
    }

    pub fn is_step_complete(&self, lab_id: &str, step_id: &str) -> bool {
        self.completed
            .get(lab_id)
            .is_some_and(|steps| steps.contains(step_id))
    }

    /// Completed step ids for a lab, in id order.
    pub fn completed_steps(&self, lab_id: &str) -> Vec<&str> {
        self.completed
            .get(lab_id)
            .map(|steps| steps.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether every step of `lab` is done. A lab without steps is complete.
    ///
    /// Completed ids that no longer belong to the lab are ignored.
    pub fn is_lab_complete(&self, lab: &LabDescriptor) -> bool {
        lab.steps
            .iter()
            .all(|step| self.is_step_complete(&lab.lab_id, &step.id))
    }

    /// Number of the lab's current steps that are done.
    pub fn completed_count(&self, lab: &LabDescriptor) -> usize {
        lab.steps
            .iter()
            .filter(|step| self.is_step_complete(&lab.lab_id, &step.id))
            .count()
    }
}
