use std::io::BufRead;

use super::report::NodeListing;
use crate::description::DescriptionReader;
use crate::node::{NodeData, NodeIndex};
use crate::GraphResult;

#[derive(Debug, Clone)]
struct NodeSlot {
    data: NodeData,
    visited: bool,
    /// Targets in insertion order; the list head is the last element
    edges: Vec<NodeIndex>,
}

impl NodeSlot {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            visited: false,
            edges: Vec::new(),
        }
    }

    /// Edge targets from head to tail
    fn edges_from_head(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.edges.iter().rev().copied()
    }

    /// The `position`-th edge counting from the head
    fn edge_at(&self, position: usize) -> Option<NodeIndex> {
        let len = self.edges.len();
        len.checked_sub(position + 1).map(|i| self.edges[i])
    }
}

/// Sparse directed graph stored as per-node adjacency lists
///
/// New edges are pushed to the head of their source's list, so traversal
/// and display see the most recently inserted edge first.
#[derive(Debug, Clone, Default)]
pub struct ListGraph {
    nodes: Vec<NodeSlot>,
}

impl ListGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Replace this graph with the next description read from `reader`
    ///
    /// Reads the node count, one payload per node, then `<src> <dst>` pairs
    /// until a pair holding a 0. Duplicate edges and self loops are kept.
    /// On error the graph is left unchanged.
    pub fn build<R: BufRead>(&mut self, reader: &mut DescriptionReader<R>) -> GraphResult<()> {
        let count = reader.read_node_count()?;
        let payloads = reader.read_payloads(count)?;

        let mut graph = Self {
            nodes: payloads.into_iter().map(NodeSlot::new).collect(),
        };

        while let Some((source, target)) = reader.read_pair()? {
            let source = NodeIndex::checked(source, count)?;
            let target = NodeIndex::checked(target, count)?;
            graph.push_edge(source, target);
        }

        tracing::debug!(
            nodes = graph.size(),
            edges = graph.edge_count(),
            "Built list graph"
        );
        *self = graph;
        Ok(())
    }

    /// Insert an edge at the head of `from`'s list
    pub fn add_edge(&mut self, from: i64, to: i64) -> GraphResult<()> {
        let size = self.size();
        let from = NodeIndex::checked(from, size)?;
        let to = NodeIndex::checked(to, size)?;
        self.push_edge(from, to);
        Ok(())
    }

    fn push_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        self.nodes[from.slot()].edges.push(to);
    }

    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|slot| slot.edges.len()).sum()
    }

    pub fn node(&self, index: NodeIndex) -> Option<&NodeData> {
        self.nodes.get(index.slot()).map(|slot| &slot.data)
    }

    /// Outgoing edges of `index`, head first
    pub fn edges(&self, index: NodeIndex) -> Vec<NodeIndex> {
        self.nodes
            .get(index.slot())
            .map(|slot| slot.edges_from_head().collect())
            .unwrap_or_default()
    }

    pub fn is_visited(&self, index: NodeIndex) -> bool {
        self.nodes
            .get(index.slot())
            .is_some_and(|slot| slot.visited)
    }

    /// Every node in index order with its edges in list order
    pub fn display(&self) -> Vec<NodeListing> {
        NodeIndex::all(self.size())
            .zip(&self.nodes)
            .map(|(index, slot)| NodeListing {
                index,
                data: slot.data.clone(),
                edges: slot.edges_from_head().collect(),
            })
            .collect()
    }

    /// Depth-first traversal of the whole forest
    ///
    /// Walks start from each unvisited node in ascending index order and
    /// descend into edges head first. Visited flags stay set afterwards, so a
    /// repeated call returns an empty order until [`ListGraph::reset_visited`].
    pub fn depth_first_search(&mut self) -> Vec<NodeIndex> {
        let mut order = Vec::with_capacity(self.size());

        for start in NodeIndex::all(self.size()) {
            if !self.nodes[start.slot()].visited {
                self.walk_from(start, &mut order);
            }
        }

        tracing::debug!(visited = order.len(), "Depth-first search finished");
        order
    }

    /// Clear every visited flag
    pub fn reset_visited(&mut self) {
        for slot in &mut self.nodes {
            slot.visited = false;
        }
    }

    fn walk_from(&mut self, start: NodeIndex, order: &mut Vec<NodeIndex>) {
        // (node, edges of node already scanned)
        let mut stack = vec![(start, 0usize)];
        self.visit(start, order);

        while let Some((node, scanned)) = stack.last_mut() {
            match self.nodes[node.slot()].edge_at(*scanned) {
                Some(target) => {
                    *scanned += 1;
                    if !self.nodes[target.slot()].visited {
                        self.visit(target, order);
                        stack.push((target, 0));
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    fn visit(&mut self, index: NodeIndex, order: &mut Vec<NodeIndex>) {
        self.nodes[index.slot()].visited = true;
        order.push(index);
    }
}
