//! Cross-document alignment by section key

use std::collections::{BTreeMap, BTreeSet};

use super::models::{AggregatedView, ContentRecord, ContentTree};

/// Line up several content trees by section key
///
/// Every key seen in any tree gets one record per input tree, in input order;
/// a tree lacking the key contributes an empty record. Keys iterate in
/// lexicographic order.
pub fn aggregate(trees: &[ContentTree]) -> AggregatedView {
    let all_keys: BTreeSet<&str> = trees.iter().flat_map(|tree| tree.keys()).collect();

    let sections: BTreeMap<String, Vec<ContentRecord>> = all_keys
        .into_iter()
        .map(|key| {
            let records = trees
                .iter()
                .map(|tree| tree.get(key).cloned().unwrap_or_default())
                .collect();
            (key.to_string(), records)
        })
        .collect();

    tracing::info!(
        documents = trees.len(),
        sections = sections.len(),
        "aggregated sections"
    );

    AggregatedView::new(trees.len(), sections)
}
