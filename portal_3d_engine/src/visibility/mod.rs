//! Visibility module — per-frame recursive portal graph.

mod visibility_graph;

pub use visibility_graph::{GraphStats, RecursionNode, VisibilityGraph, NEAR_CLIP_LIMIT};
