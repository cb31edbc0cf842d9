use serde::Serialize;

use crate::node::{Distance, NodeData, NodeIndex};

/// One node of a [`ListGraph`](super::ListGraph) with its outgoing edges
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeListing {
    pub index: NodeIndex,
    pub data: NodeData,
    /// Edge targets, most recently inserted first
    pub edges: Vec<NodeIndex>,
}

/// Shortest-path results rooted at one source of a [`MatrixGraph`](super::MatrixGraph)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub source: NodeIndex,
    pub data: NodeData,
    pub rows: Vec<PathRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathRow {
    pub from: NodeIndex,
    pub to: NodeIndex,
    /// `None` when `to` is unreachable
    pub distance: Distance,
    pub path: Option<Vec<NodeIndex>>,
}

/// Answer to a single `(from, to)` query
///
/// Indices are kept raw since queries accept values outside the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathQuery {
    pub from: usize,
    pub to: usize,
    /// Both indices lie in `[0, size]`
    pub in_range: bool,
    pub route: Option<Route>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub distance: u64,
    pub path: Vec<NodeIndex>,
    /// Payloads of every node on `path`, in the same order
    pub data: Vec<NodeData>,
}
