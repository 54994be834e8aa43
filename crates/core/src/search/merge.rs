use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::debug;

use crate::provider::RawCandidate;

/// Deduplicate candidates by provider id.
///
/// When several strategies find the same recipe, the copy from the
/// lowest layer priority wins and the others are discarded whole.
/// Field values are never merged across duplicates. Output order is
/// unspecified; the scorer re-orders downstream.
pub fn merge_candidates(raw: Vec<RawCandidate>) -> Vec<RawCandidate> {
    let total = raw.len();
    let mut by_id: HashMap<u64, RawCandidate> = HashMap::with_capacity(total);

    for candidate in raw {
        match by_id.entry(candidate.id) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
            Entry::Occupied(mut slot) => {
                if candidate.layer_priority < slot.get().layer_priority {
                    slot.insert(candidate);
                }
            }
        }
    }

    if by_id.len() < total {
        debug!(
            total = total,
            unique = by_id.len(),
            "Merged duplicate candidates"
        );
    }
    by_id.into_values().collect()
}
