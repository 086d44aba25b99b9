//! Combine per-file documents into one tree.
//!
//! API mockups spread a class over several files (a base element in one,
//! its specializations in others), so classes are merged by name rather
//! than replaced.

use crate::model::*;
use std::collections::btree_map::Entry;

/// Merge documents in input order. Later files win per method/event name
/// and for a class's parent, earlier entries are otherwise kept.
pub fn merge(docs: Vec<(String, Document)>) -> Document {
    let mut merged = Document::default();

    for (source_file, doc) in docs {
        log::debug!(
            "merging {} class(es) from {}",
            doc.classes.len(),
            source_file
        );

        for (name, class) in doc.classes {
            match merged.classes.entry(name) {
                Entry::Vacant(slot) => {
                    slot.insert(class);
                }
                Entry::Occupied(slot) => merge_class(slot.into_mut(), class),
            }
        }
        merged.advisories.extend(doc.advisories);
    }

    merged
}

fn merge_class(existing: &mut ClassEntry, incoming: ClassEntry) {
    if incoming.parent.is_some() {
        existing.parent = incoming.parent;
    }
    existing.methods.extend(incoming.methods);
    existing.events.extend(incoming.events);
}
