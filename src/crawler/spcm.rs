// spcm.rs
// ──────────────────────────────────────────────────────────────────────────────
// Path-count-multiple subtraction. A plain DFS that re-enters shared
// descendants on every path computes a sum in which each vertex appears once
// per distinct source-to-vertex path, and counts those paths along the way.
// Removing (paths - 1) copies of every reached vertex's weight leaves the
// deduplicated weight of the source.
//
// The correction only holds for the source the DFS started from. It does not
// give per-vertex sums; a per-vertex answer would need one run per vertex or
// an artificial super-source, and the formula is not established for that.
// ──────────────────────────────────────────────────────────────────────────────
use crate::graph::{Graph, VertexId};
use crate::traversal::{Color, TraversalError, TraversalState};

use super::{DfsMode, SubtreeCrawler};

/// One row of the path-count table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathCount {
    pub name: String,
    pub weight: u64,
    /// Distinct paths from the source to this vertex; 0 when unreachable.
    pub paths: u64,
    /// Sum below this vertex with every shared descendant repeated per path.
    pub duplicated_sum: u64,
}

/// Result of an SPCM run.
///
/// `corrected_sum` is the deduplicated weight of `source` only. The table is
/// the data the correction was computed from and is not a per-vertex answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathCountReport {
    pub source: String,
    pub duplicated_sum: u64,
    pub corrected_sum: u64,
    pub path_counts: Vec<PathCount>,
}

impl PathCountReport {
    pub fn paths_to(&self, name: &str) -> Option<u64> {
        self.path_counts
            .iter()
            .find(|row| row.name == name)
            .map(|row| row.paths)
    }
}

/// SPCM crawler. Valid for the designated source vertex only.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathCountSubtraction {
    mode: DfsMode,
}

impl PathCountSubtraction {
    pub fn new(mode: DfsMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> DfsMode {
        self.mode
    }
}

impl SubtreeCrawler for PathCountSubtraction {
    type Output = PathCountReport;

    fn calculate_subtree_sums(
        &self,
        graph: &Graph,
        source: &str,
    ) -> Result<PathCountReport, TraversalError> {
        let source_id = graph.vertex_id(source)?;
        let mut state = TraversalState::new(graph);
        let mut duplicated = vec![0u64; graph.len()];

        let duplicated_sum = match self.mode {
            DfsMode::Recursive => duplicated_sum_recursive(&mut state, &mut duplicated, source_id)?,
            DfsMode::Iterative => duplicated_sum_iterative(&mut state, &mut duplicated, source_id)?,
        };

        let tables = state.into_tables();
        let path_counts: Vec<PathCount> = graph
            .get_vertices()
            .iter()
            .zip(tables.paths_from_source_count)
            .zip(duplicated)
            .map(|((vertex, paths), duplicated_sum)| PathCount {
                name: vertex.name().to_string(),
                weight: vertex.weight(),
                paths,
                duplicated_sum,
            })
            .collect();

        let corrected_sum = subtract_path_multiples(duplicated_sum, &path_counts)
            .ok_or_else(|| TraversalError::Overflow(source.to_string()))?;

        Ok(PathCountReport {
            source: source.to_string(),
            duplicated_sum,
            corrected_sum,
            path_counts,
        })
    }
}

/// `duplicated_sum - Σ (paths - 1) * weight` over every reached vertex.
fn subtract_path_multiples(duplicated_sum: u64, path_counts: &[PathCount]) -> Option<u64> {
    let excess = path_counts
        .iter()
        .filter(|row| row.paths > 0)
        .try_fold(0u64, |acc, row| {
            (row.paths - 1)
                .checked_mul(row.weight)
                .and_then(|copies| acc.checked_add(copies))
        })?;
    duplicated_sum.checked_sub(excess)
}

fn duplicated_sum_recursive(
    state: &mut TraversalState<'_>,
    duplicated: &mut [u64],
    vertex: VertexId,
) -> Result<u64, TraversalError> {
    let graph = state.graph();
    let overflow = || TraversalError::Overflow(graph.name_of(vertex).to_string());

    state.enter(vertex);
    let mut sum = graph.weight_of(vertex);
    for &child in graph.children_of(vertex) {
        if state.color(child) == Color::InProgress {
            return Err(state.cycle_error(vertex, child));
        }
        let below = duplicated_sum_recursive(state, duplicated, child)?;
        sum = sum.checked_add(below).ok_or_else(overflow)?;
    }
    state.finish(vertex);

    if let Some(slot) = duplicated.get_mut(vertex) {
        *slot = sum;
    }
    Ok(sum)
}

struct Frame {
    vertex: VertexId,
    next_child: usize,
    sum: u64,
}

fn duplicated_sum_iterative(
    state: &mut TraversalState<'_>,
    duplicated: &mut [u64],
    source: VertexId,
) -> Result<u64, TraversalError> {
    let graph = state.graph();
    state.enter(source);
    let mut stack = vec![Frame {
        vertex: source,
        next_child: 0,
        sum: graph.weight_of(source),
    }];

    while let Some(frame) = stack.last_mut() {
        let vertex = frame.vertex;
        if let Some(&child) = graph.children_of(vertex).get(frame.next_child) {
            if state.color(child) == Color::InProgress {
                return Err(state.cycle_error(vertex, child));
            }
            frame.next_child += 1;
            state.enter(child);
            stack.push(Frame {
                vertex: child,
                next_child: 0,
                sum: graph.weight_of(child),
            });
            continue;
        }

        let sum = frame.sum;
        stack.pop();
        state.finish(vertex);
        if let Some(slot) = duplicated.get_mut(vertex) {
            *slot = sum;
        }
        match stack.last_mut() {
            Some(parent) => {
                parent.sum = parent
                    .sum
                    .checked_add(sum)
                    .ok_or_else(|| TraversalError::Overflow(graph.name_of(parent.vertex).to_string()))?;
            }
            None => return Ok(sum),
        }
    }
    Ok(0)
}
