//! Note list pipeline
//!
//! Turns the server's note list plus the client's local preferences into the
//! sequence that gets rendered:
//!
//! 1. tag filter ([`TagFilter::matches`])
//! 2. manual order: ids from the persisted order first, the rest in server order
//! 3. stable partition moving pinned notes ahead of unpinned ones
//!
//! Everything here is pure; persistence lives in `infrastructure::store`.

use crate::domain::note::Note;
use crate::domain::tags::{TagFilter, TagMode};
use std::collections::{BTreeSet, HashMap};

/// Keep notes passing the tag filter, in input order
pub fn filter_by_tags(notes: Vec<Note>, filter: &TagFilter, mode: TagMode) -> Vec<Note> {
    notes
        .into_iter()
        .filter(|n| filter.matches(&n.tags, mode))
        .collect()
}

/// Apply the persisted manual order.
///
/// Ids in `order` that are not among `notes` are skipped, and an id listed
/// twice is emitted once. Notes missing from `order` follow in their
/// incoming order.
pub fn apply_order(notes: Vec<Note>, order: &[i64]) -> Vec<Note> {
    if order.is_empty() {
        return notes;
    }

    let mut remaining: Vec<Option<Note>> = notes.into_iter().map(Some).collect();
    let index: HashMap<i64, usize> = remaining
        .iter()
        .enumerate()
        .filter_map(|(i, n)| n.as_ref().map(|n| (n.id, i)))
        .collect();

    let mut result = Vec::with_capacity(remaining.len());
    for id in order {
        if let Some(&i) = index.get(id) {
            if let Some(note) = remaining[i].take() {
                result.push(note);
            }
        }
    }
    result.extend(remaining.into_iter().flatten());
    result
}

/// Stable partition: pinned notes first, relative order kept on both sides
pub fn pin_first(notes: Vec<Note>, pinned: &BTreeSet<i64>) -> Vec<Note> {
    let (mut head, tail): (Vec<Note>, Vec<Note>) =
        notes.into_iter().partition(|n| pinned.contains(&n.id));
    head.extend(tail);
    head
}

/// Full pipeline: filter, order, pin
pub fn arrange(
    notes: Vec<Note>,
    filter: &TagFilter,
    mode: TagMode,
    order: &[i64],
    pinned: &BTreeSet<i64>,
) -> Vec<Note> {
    let filtered = filter_by_tags(notes, filter, mode);
    let ordered = apply_order(filtered, order);
    pin_first(ordered, pinned)
}

/// Move `dragged` to the slot `target` occupied in `rendered`.
///
/// Returns the full new sequence to persist as the manual order, or `None`
/// when the move is a no-op (same id, or either id not rendered).
pub fn reorder(rendered: &[i64], dragged: i64, target: i64) -> Option<Vec<i64>> {
    if dragged == target {
        return None;
    }
    let from = rendered.iter().position(|&id| id == dragged)?;
    let to = rendered.iter().position(|&id| id == target)?;

    let mut ids = rendered.to_vec();
    let moved = ids.remove(from);
    ids.insert(to, moved);
    Some(ids)
}

/// Flip membership of `id` in the pinned set; returns whether it is now pinned
pub fn toggle_pin(pinned: &mut BTreeSet<i64>, id: i64) -> bool {
    if pinned.remove(&id) {
        false
    } else {
        pinned.insert(id);
        true
    }
}

/// Ids of a rendered list, in order
pub fn ids_of(notes: &[Note]) -> Vec<i64> {
    notes.iter().map(|n| n.id).collect()
}
