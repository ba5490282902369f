//! One-shot interstitial triggers.

use std::collections::HashSet;

use crate::config::InterruptionEntry;
use crate::moment::Interruption;

/// Ordered `(trigger_index, interstitial)` pairs with a fired set.
///
/// A trigger is due once the reader has reached or passed its index, and
/// fires at most once per session, keyed by the interstitial's identity.
/// Revisiting the index later never re-fires it.
#[derive(Debug, Clone, Default)]
pub struct InterruptionSchedule {
    triggers: Vec<(usize, Interruption)>,
    fired: HashSet<String>,
}

impl InterruptionSchedule {
    pub fn new(mut triggers: Vec<(usize, Interruption)>) -> Self {
        triggers.sort_by_key(|(index, _)| *index);
        Self {
            triggers,
            fired: HashSet::new(),
        }
    }

    /// Build a schedule from configuration entries, minting ids.
    pub fn from_entries(entries: &[InterruptionEntry]) -> Self {
        Self::new(
            entries
                .iter()
                .map(|e| (e.index, Interruption::new(&e.heading, &e.body)))
                .collect(),
        )
    }

    /// The lowest unfired trigger at or below `index`, marked fired.
    ///
    /// Returns the trigger position along with the interstitial so the
    /// caller can splice it where it belongs.
    pub fn due(&mut self, index: usize) -> Option<(usize, Interruption)> {
        for (trigger_index, interruption) in &self.triggers {
            if *trigger_index <= index && !self.fired.contains(&interruption.id) {
                self.fired.insert(interruption.id.clone());
                return Some((*trigger_index, interruption.clone()));
            }
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}
