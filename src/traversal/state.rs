// state.rs
// ──────────────────────────────────────────────────────────────────────────────
// Per-run traversal state kept beside an immutable `Graph`. Each algorithm run
// builds a fresh `TraversalState`, so colors, sums, back-pointers and path
// counts never carry over from one run to the next.
// ──────────────────────────────────────────────────────────────────────────────
use crate::graph::{Graph, VertexId};

use super::error::TraversalError;

/// Tri-color marking used by both crawlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Color {
    /// Not entered yet.
    #[default]
    Unvisited,
    /// On the active DFS path.
    InProgress,
    /// Fully processed.
    Finished,
}

/// Mutable per-vertex fields for one algorithm run.
#[derive(Debug)]
pub struct TraversalState<'g> {
    graph: &'g Graph,
    color: Vec<Color>,
    subtree_sum: Vec<i64>,
    last_finished_parent: Vec<Option<VertexId>>,
    paths_from_source_count: Vec<u64>,
    visit_order: Vec<VertexId>,
}

impl<'g> TraversalState<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        let n = graph.len();
        Self {
            graph,
            color: vec![Color::Unvisited; n],
            subtree_sum: vec![0; n],
            last_finished_parent: vec![None; n],
            paths_from_source_count: vec![0; n],
            visit_order: Vec::with_capacity(n),
        }
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn color(&self, id: VertexId) -> Color {
        self.color.get(id).copied().unwrap_or_default()
    }

    /// Moves `id` onto the active path and counts one more path to it.
    ///
    /// Valid from `Unvisited`, and from `Finished` for crawlers that revisit
    /// shared descendants once per path.
    pub fn enter(&mut self, id: VertexId) {
        debug_assert_ne!(self.color(id), Color::InProgress);
        if let Some(color) = self.color.get_mut(id) {
            *color = Color::InProgress;
        }
        if let Some(count) = self.paths_from_source_count.get_mut(id) {
            *count = count.saturating_add(1);
        }
        self.visit_order.push(id);
    }

    /// Takes `id` off the active path.
    pub fn finish(&mut self, id: VertexId) {
        debug_assert_eq!(self.color(id), Color::InProgress);
        if let Some(color) = self.color.get_mut(id) {
            *color = Color::Finished;
        }
    }

    /// Error for the back edge `parent -> child` onto an in-progress vertex.
    pub fn cycle_error(&self, parent: VertexId, child: VertexId) -> TraversalError {
        TraversalError::CycleDetected {
            from: self.graph.name_of(parent).to_string(),
            to: self.graph.name_of(child).to_string(),
        }
    }

    pub fn subtree_sum(&self, id: VertexId) -> i64 {
        self.subtree_sum.get(id).copied().unwrap_or(0)
    }

    /// Adds `delta` (possibly negative) to the accumulator of `id`.
    pub fn add_to_sum(&mut self, id: VertexId, delta: i64) -> Result<(), TraversalError> {
        let graph = self.graph;
        let overflow = || TraversalError::Overflow(graph.name_of(id).to_string());
        let slot = self.subtree_sum.get_mut(id).ok_or_else(overflow)?;
        *slot = slot.checked_add(delta).ok_or_else(overflow)?;
        Ok(())
    }

    /// Adds the vertex's own weight to its accumulator.
    pub fn add_own_weight(&mut self, id: VertexId) -> Result<(), TraversalError> {
        let weight = i64::try_from(self.graph.weight_of(id))
            .map_err(|_| TraversalError::Overflow(self.graph.name_of(id).to_string()))?;
        self.add_to_sum(id, weight)
    }

    pub fn last_finished_parent(&self, id: VertexId) -> Option<VertexId> {
        self.last_finished_parent.get(id).copied().flatten()
    }

    pub fn set_last_finished_parent(&mut self, id: VertexId, parent: VertexId) {
        if let Some(slot) = self.last_finished_parent.get_mut(id) {
            *slot = Some(parent);
        }
    }

    pub fn paths_from_source_count(&self, id: VertexId) -> u64 {
        self.paths_from_source_count.get(id).copied().unwrap_or(0)
    }

    /// Vertices in the order they were entered, repeats included.
    pub fn visit_order(&self) -> &[VertexId] {
        &self.visit_order
    }

    /// Splits the state into its per-vertex tables once a run completes.
    pub fn into_tables(self) -> RunTables {
        RunTables {
            color: self.color,
            subtree_sum: self.subtree_sum,
            paths_from_source_count: self.paths_from_source_count,
            visit_order: self.visit_order,
        }
    }
}

/// Final per-vertex tables of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTables {
    pub color: Vec<Color>,
    pub subtree_sum: Vec<i64>,
    pub paths_from_source_count: Vec<u64>,
    pub visit_order: Vec<VertexId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> Graph {
        Graph::build(vec![("a", vec!["b"]), ("b", vec![])]).expect("builds")
    }

    #[test]
    fn fresh_state_is_unvisited_and_zeroed() {
        let graph = pair();
        let state = TraversalState::new(&graph);
        assert_eq!(state.color(0), Color::Unvisited);
        assert_eq!(state.subtree_sum(1), 0);
        assert_eq!(state.last_finished_parent(1), None);
        assert_eq!(state.paths_from_source_count(0), 0);
    }

    #[test]
    fn enter_and_finish_walk_the_three_colors() {
        let graph = pair();
        let mut state = TraversalState::new(&graph);
        state.enter(0);
        assert_eq!(state.color(0), Color::InProgress);
        state.finish(0);
        assert_eq!(state.color(0), Color::Finished);
        assert_eq!(state.paths_from_source_count(0), 1);
        assert_eq!(state.visit_order(), &[0]);
    }

    #[test]
    fn cycle_error_names_the_back_edge() {
        let graph = pair();
        let state = TraversalState::new(&graph);
        assert_eq!(
            state.cycle_error(1, 0),
            TraversalError::CycleDetected {
                from: "b".into(),
                to: "a".into()
            }
        );
    }

    #[test]
    fn sums_accept_negative_corrections() {
        let graph = pair();
        let mut state = TraversalState::new(&graph);
        state.add_to_sum(0, -3).expect("in range");
        state.add_own_weight(0).expect("in range");
        assert_eq!(state.subtree_sum(0), -2);
    }

    #[test]
    fn overflow_is_reported_with_vertex_name() {
        let graph = pair();
        let mut state = TraversalState::new(&graph);
        state.add_to_sum(1, i64::MAX).expect("in range");
        assert_eq!(
            state.add_to_sum(1, 1),
            Err(TraversalError::Overflow("b".into()))
        );
    }
}
