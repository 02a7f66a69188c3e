//! Deduplicated subtree weights over a single-source DAG.
//!
//! Two interchangeable crawlers share one immutable [`graph::Graph`] and the
//! tri-color [`traversal::TraversalState`]:
//! - [`crawler::FirstCommonPredecessor`] corrects double counting in place
//!   with back-pointers and yields a sum for every reached vertex.
//! - [`crawler::PathCountSubtraction`] sums with duplicates, counts paths, and
//!   subtracts the surplus; the result holds for the source only.

pub mod app;
pub mod crawler;
pub mod graph;
pub mod graph_loader;
pub mod traversal;
