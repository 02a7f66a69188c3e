use crate::graph::Graph;

use super::SubtreeSums;

/// An FCP sum next to the brute-force reachable weight of the same vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedSum {
    pub name: String,
    pub reported: i64,
    pub exact: u64,
}

impl VerifiedSum {
    pub fn matches(&self) -> bool {
        u64::try_from(self.reported).map_or(false, |reported| reported == self.exact)
    }
}

/// Compares every reached vertex of an FCP result against a reachable-set walk.
///
/// Unreached vertices are skipped; their sums were never computed.
pub fn verify_subtree_sums(graph: &Graph, sums: &SubtreeSums) -> Vec<VerifiedSum> {
    sums.entries()
        .iter()
        .filter(|entry| entry.reached)
        .filter_map(|entry| {
            let id = graph.vertex_id(&entry.name).ok()?;
            Some(VerifiedSum {
                name: entry.name.clone(),
                reported: entry.sum,
                exact: graph.reachable_weight(id),
            })
        })
        .collect()
}
