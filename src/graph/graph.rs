// graph.rs
// ──────────────────────────────────────────────────────────────────────────────
// Weighted DAG with named vertices. Vertices live in an arena addressed by
// `VertexId` (declaration order); children are stored as ids resolved once at
// construction time. The graph is immutable after `build`; everything a
// traversal mutates lives in `traversal::TraversalState`.
// ──────────────────────────────────────────────────────────────────────────────
use std::collections::HashMap;

use super::error::GraphError;

/// Index of a vertex in the graph arena.
pub type VertexId = usize;

/// Construction input for one vertex: name, weight and child names in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexSpec {
    pub name: String,
    pub weight: u64,
    pub children: Vec<String>,
}

impl VertexSpec {
    /// A unit-weight vertex.
    pub fn new<N, C, S>(name: N, children: C) -> Self
    where
        N: Into<String>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::weighted(name, 1, children)
    }

    pub fn weighted<N, C, S>(name: N, weight: u64, children: C) -> Self
    where
        N: Into<String>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            weight,
            children: children.into_iter().map(Into::into).collect(),
        }
    }
}

/// A vertex record. Children are shared; the graph owns every vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vertex {
    name: String,
    weight: u64,
    children: Vec<VertexId>,
}

impl Vertex {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Child ids in edge-list order.
    pub fn children(&self) -> &[VertexId] {
        &self.children
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    vertices: Vec<Vertex>,
    index: HashMap<String, VertexId>,
}

impl Graph {
    /// Builds a unit-weight graph from `(name, child names)` pairs.
    ///
    /// # Errors
    /// Fails with `GraphError::UnresolvedChild` when a child name has no vertex,
    /// and `GraphError::DuplicateVertex` when a name is declared twice. No graph
    /// is produced on failure.
    pub fn build<I, N, C, S>(edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build_weighted(
            edges
                .into_iter()
                .map(|(name, children)| VertexSpec::new(name, children)),
        )
    }

    /// Builds a graph from explicit vertex specs, weights included.
    ///
    /// Two passes: every name is declared first so that children may refer to
    /// vertices declared later in the list, then child names are resolved.
    pub fn build_weighted<I>(specs: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = VertexSpec>,
    {
        let specs: Vec<VertexSpec> = specs.into_iter().collect();
        let mut index: HashMap<String, VertexId> = HashMap::with_capacity(specs.len());

        for (id, spec) in specs.iter().enumerate() {
            if spec.weight == 0 {
                return Err(GraphError::ZeroWeight(spec.name.clone()));
            }
            if index.insert(spec.name.clone(), id).is_some() {
                return Err(GraphError::DuplicateVertex(spec.name.clone()));
            }
        }

        let vertices = specs
            .into_iter()
            .map(|spec| -> Result<Vertex, GraphError> {
                let children = spec
                    .children
                    .iter()
                    .map(|child| {
                        index
                            .get(child)
                            .copied()
                            .ok_or_else(|| GraphError::UnresolvedChild {
                                parent: spec.name.clone(),
                                child: child.clone(),
                            })
                    })
                    .collect::<Result<Vec<VertexId>, GraphError>>()?;
                Ok(Vertex {
                    name: spec.name,
                    weight: spec.weight,
                    children,
                })
            })
            .collect::<Result<Vec<Vertex>, GraphError>>()?;

        Ok(Self { vertices, index })
    }

    /// Resolves a vertex name to its id.
    pub fn vertex_id(&self, name: &str) -> Result<VertexId, GraphError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::UnknownVertex(name.to_string()))
    }

    pub fn get_vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    /// Vertices in declaration order.
    pub fn get_vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(|v| v.children.len()).sum()
    }

    /// Child ids of `id`; empty for an id outside the arena.
    pub fn children_of(&self, id: VertexId) -> &[VertexId] {
        self.vertices
            .get(id)
            .map(|v| v.children.as_slice())
            .unwrap_or(&[])
    }

    /// Weight of `id`; zero for an id outside the arena.
    pub fn weight_of(&self, id: VertexId) -> u64 {
        self.vertices.get(id).map_or(0, |v| v.weight)
    }

    /// Name of `id`; empty for an id outside the arena.
    pub fn name_of(&self, id: VertexId) -> &str {
        self.vertices.get(id).map_or("", |v| v.name.as_str())
    }

    /// Marks every vertex reachable from `from`, `from` included.
    ///
    /// Plain iterative DFS over a visited set. Tolerates cycles, so it is safe
    /// to call on graphs that failed a traversal.
    pub fn reachable_set(&self, from: VertexId) -> Vec<bool> {
        let mut seen = vec![false; self.vertices.len()];
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            match seen.get_mut(id) {
                Some(flag) if !*flag => *flag = true,
                _ => continue,
            }
            stack.extend(self.children_of(id).iter().copied());
        }
        seen
    }

    /// Brute-force deduplicated subtree weight of `from`.
    pub fn reachable_weight(&self, from: VertexId) -> u64 {
        self.reachable_set(from)
            .iter()
            .enumerate()
            .filter(|(_, reached)| **reached)
            .map(|(id, _)| self.weight_of(id))
            .fold(0u64, u64::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Graph {
        Graph::build(vec![
            ("top", vec!["left", "right"]),
            ("left", vec!["bottom"]),
            ("right", vec!["bottom"]),
            ("bottom", vec![]),
        ])
        .expect("diamond builds")
    }

    #[test]
    fn children_keep_edge_list_order() {
        let graph = diamond();
        let top = graph.vertex_id("top").expect("top exists");
        let names: Vec<&str> = graph
            .children_of(top)
            .iter()
            .map(|&c| graph.name_of(c))
            .collect();
        assert_eq!(names, vec!["left", "right"]);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn forward_references_resolve() {
        let graph = Graph::build(vec![("a", vec!["b"]), ("b", vec![])]).expect("builds");
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.weight_of(0), 1);
    }

    #[test]
    fn unresolved_child_is_rejected() {
        let err = Graph::build(vec![("a", vec!["ghost"])]).unwrap_err();
        assert_eq!(
            err,
            GraphError::UnresolvedChild {
                parent: "a".into(),
                child: "ghost".into()
            }
        );
    }

    #[test]
    fn duplicate_vertex_is_rejected() {
        let err = Graph::build(vec![("a", Vec::<&str>::new()), ("a", Vec::new())]).unwrap_err();
        assert_eq!(err, GraphError::DuplicateVertex("a".into()));
    }

    #[test]
    fn zero_weight_is_rejected() {
        let err = Graph::build_weighted(vec![VertexSpec::weighted("a", 0, Vec::<String>::new())])
            .unwrap_err();
        assert_eq!(err, GraphError::ZeroWeight("a".into()));
    }

    #[test]
    fn unknown_name_lookup_fails() {
        let graph = diamond();
        assert_eq!(
            graph.vertex_id("nowhere"),
            Err(GraphError::UnknownVertex("nowhere".into()))
        );
    }

    #[test]
    fn reachable_weight_counts_shared_vertex_once() {
        let graph = diamond();
        let top = graph.vertex_id("top").expect("top exists");
        let left = graph.vertex_id("left").expect("left exists");
        assert_eq!(graph.reachable_weight(top), 4);
        assert_eq!(graph.reachable_weight(left), 2);
    }

    #[test]
    fn reachable_set_survives_cycles() {
        let graph = Graph::build(vec![("a", vec!["b"]), ("b", vec!["a"])]).expect("builds");
        assert_eq!(graph.reachable_set(0), vec![true, true]);
        assert_eq!(graph.reachable_weight(1), 2);
    }
}
