// fcp.rs
// ──────────────────────────────────────────────────────────────────────────────
// First-common-predecessor correction. A single post-order DFS from the source
// sums child subtrees into their parents. When a child is met that some other
// path already finished, its sum is about to be counted a second time; the
// duplicate is cancelled at the lowest ancestor still on the active path that
// both paths share, found by walking `last_finished_parent` back-pointers past
// every finished vertex.
// ──────────────────────────────────────────────────────────────────────────────
use std::collections::HashMap;

use crate::graph::{Graph, VertexId};
use crate::traversal::{Color, TraversalError, TraversalState};

use super::{DfsMode, SubtreeCrawler};

/// Subtree sum of one vertex after an FCP run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubtreeSum {
    pub name: String,
    pub sum: i64,
    /// `false` for vertices the source cannot reach; their sum stays 0.
    pub reached: bool,
}

/// Per-vertex result of an FCP run, in declaration order.
///
/// The source's sum is always the exact deduplicated weight. Another vertex's
/// sum is exact unless a shared descendant of it had its correction charged to
/// a higher ancestor; run the crawler from that vertex to get its exact value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubtreeSums {
    source: String,
    entries: Vec<SubtreeSum>,
    visit_order: Vec<String>,
}

impl SubtreeSums {
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Deduplicated subtree weight of the source.
    pub fn source_sum(&self) -> i64 {
        self.get(&self.source).unwrap_or(0)
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.sum)
    }

    pub fn entries(&self) -> &[SubtreeSum] {
        &self.entries
    }

    /// Vertex names in the order the DFS entered them.
    pub fn visit_order(&self) -> &[String] {
        &self.visit_order
    }

    pub fn to_map(&self) -> HashMap<String, i64> {
        self.entries
            .iter()
            .map(|entry| (entry.name.clone(), entry.sum))
            .collect()
    }
}

/// FCP crawler. Produces a sum for every vertex reached from the source.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstCommonPredecessor {
    mode: DfsMode,
}

impl FirstCommonPredecessor {
    pub fn new(mode: DfsMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> DfsMode {
        self.mode
    }
}

impl SubtreeCrawler for FirstCommonPredecessor {
    type Output = SubtreeSums;

    fn calculate_subtree_sums(
        &self,
        graph: &Graph,
        source: &str,
    ) -> Result<SubtreeSums, TraversalError> {
        let source_id = graph.vertex_id(source)?;
        let mut state = TraversalState::new(graph);
        match self.mode {
            DfsMode::Recursive => crawl_recursive(&mut state, source_id)?,
            DfsMode::Iterative => crawl_iterative(&mut state, source_id)?,
        }
        Ok(collect_sums(graph, source, state))
    }
}

fn crawl_recursive(state: &mut TraversalState<'_>, vertex: VertexId) -> Result<(), TraversalError> {
    state.enter(vertex);
    let graph = state.graph();

    for &child in graph.children_of(vertex) {
        match state.color(child) {
            Color::InProgress => return Err(state.cycle_error(vertex, child)),
            Color::Unvisited => crawl_recursive(state, child)?,
            Color::Finished => cancel_duplicate(state, child)?,
        }
        absorb_child(state, vertex, child)?;
    }

    state.add_own_weight(vertex)?;
    state.finish(vertex);
    Ok(())
}

struct Frame {
    vertex: VertexId,
    next_child: usize,
}

fn crawl_iterative(state: &mut TraversalState<'_>, source: VertexId) -> Result<(), TraversalError> {
    let graph = state.graph();
    state.enter(source);
    let mut stack = vec![Frame {
        vertex: source,
        next_child: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let vertex = frame.vertex;
        match graph.children_of(vertex).get(frame.next_child).copied() {
            Some(child) => match state.color(child) {
                Color::InProgress => return Err(state.cycle_error(vertex, child)),
                Color::Unvisited => {
                    // The parent absorbs `child` once its frame pops.
                    state.enter(child);
                    stack.push(Frame {
                        vertex: child,
                        next_child: 0,
                    });
                }
                Color::Finished => {
                    cancel_duplicate(state, child)?;
                    absorb_child(state, vertex, child)?;
                    frame.next_child += 1;
                }
            },
            None => {
                stack.pop();
                state.add_own_weight(vertex)?;
                state.finish(vertex);
                if let Some(parent) = stack.last_mut() {
                    absorb_child(state, parent.vertex, vertex)?;
                    parent.next_child += 1;
                }
            }
        }
    }
    Ok(())
}

/// Adds the child's sum into the parent and repoints the child's back-pointer.
/// Must run after `cancel_duplicate`, which reads the previous back-pointer.
fn absorb_child(
    state: &mut TraversalState<'_>,
    parent: VertexId,
    child: VertexId,
) -> Result<(), TraversalError> {
    state.add_to_sum(parent, state.subtree_sum(child))?;
    state.set_last_finished_parent(child, parent);
    Ok(())
}

/// Removes the sum of an already finished `child` from its first common
/// predecessor, so the copy about to flow up through the current path is
/// the only one that reaches it.
fn cancel_duplicate(state: &mut TraversalState<'_>, child: VertexId) -> Result<(), TraversalError> {
    let predecessor = first_common_predecessor(state, child)?;
    let correction = state
        .subtree_sum(child)
        .checked_neg()
        .ok_or_else(|| TraversalError::Overflow(state.graph().name_of(child).to_string()))?;
    state.add_to_sum(predecessor, correction)
}

/// Follows `last_finished_parent` from `from` until it leaves the finished
/// region. The vertex found is still in progress, hence on the active path.
fn first_common_predecessor(
    state: &TraversalState<'_>,
    from: VertexId,
) -> Result<VertexId, TraversalError> {
    let parent_of = |id: VertexId| {
        state
            .last_finished_parent(id)
            .ok_or_else(|| TraversalError::MissingParent(state.graph().name_of(id).to_string()))
    };

    let mut temp = parent_of(from)?;
    while state.color(temp) == Color::Finished {
        temp = parent_of(temp)?;
    }
    Ok(temp)
}

fn collect_sums(graph: &Graph, source: &str, state: TraversalState<'_>) -> SubtreeSums {
    let tables = state.into_tables();
    let entries = graph
        .get_vertices()
        .iter()
        .zip(tables.subtree_sum)
        .zip(tables.color)
        .map(|((vertex, sum), color)| SubtreeSum {
            name: vertex.name().to_string(),
            sum,
            reached: color == Color::Finished,
        })
        .collect();
    let visit_order = tables
        .visit_order
        .iter()
        .map(|&id| graph.name_of(id).to_string())
        .collect();

    SubtreeSums {
        source: source.to_string(),
        entries,
        visit_order,
    }
}
