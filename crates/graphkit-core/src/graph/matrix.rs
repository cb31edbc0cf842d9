use std::io::BufRead;

use serde::Serialize;

use super::report::{PathQuery, PathRow, Route, SourceReport};
use crate::description::DescriptionReader;
use crate::node::{Distance, NodeData, NodeIndex, Weight};
use crate::GraphResult;

/// Search state for one `(source, destination)` pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PathCell {
    /// Destination finalized by the search rooted at the source
    pub visited: bool,
    pub dist: Distance,
    /// Node preceding the destination on the best known path
    pub path: Option<NodeIndex>,
}

/// Dense weighted directed graph backed by an adjacency matrix
///
/// Alongside the cost matrix it keeps a result table with one [`PathCell`]
/// per ordered pair. Only [`MatrixGraph::find_shortest_path`] fills the
/// table; edge mutations leave it stale until the next run.
#[derive(Debug, Clone, Default)]
pub struct MatrixGraph {
    pub(super) data: Vec<NodeData>,
    pub(super) cost: Vec<Vec<Option<Weight>>>,
    pub(super) table: Vec<Vec<PathCell>>,
}

impl MatrixGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::with_nodes(Vec::new())
    }

    /// Graph over `data` with no edges and an untouched result table
    pub fn with_nodes(data: Vec<NodeData>) -> Self {
        let size = data.len();
        Self {
            data,
            cost: vec![vec![None; size]; size],
            table: vec![vec![PathCell::default(); size]; size],
        }
    }

    /// Replace this graph with the next description read from `reader`
    ///
    /// A node count of 0 yields an empty graph and nothing further is read.
    /// Otherwise payloads follow, then `<src> <dst> <weight>` triples until a
    /// triple holding a 0 index. A repeated pair overwrites the earlier weight.
    /// On error the graph is left unchanged.
    pub fn build<R: BufRead>(&mut self, reader: &mut DescriptionReader<R>) -> GraphResult<()> {
        let count = reader.read_node_count()?;
        if count == 0 {
            *self = Self::new();
            return Ok(());
        }

        let mut graph = Self::with_nodes(reader.read_payloads(count)?);

        while let Some((source, target, weight)) = reader.read_triple()? {
            let source = NodeIndex::checked(source, count)?;
            let target = NodeIndex::checked(target, count)?;
            let weight = Weight::new(weight)?;
            graph.cost[source.slot()][target.slot()] = Some(weight);
        }

        tracing::debug!(
            nodes = graph.size(),
            edges = graph.edge_count(),
            "Built matrix graph"
        );
        *self = graph;
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn edge_count(&self) -> usize {
        self.cost.iter().flatten().filter(|c| c.is_some()).count()
    }

    pub fn node(&self, index: NodeIndex) -> Option<&NodeData> {
        self.data.get(index.slot())
    }

    /// Set the cost of `from -> to` and reset that pair's result cell
    ///
    /// Indices outside `[1, size]` make this a no-op. Returns whether the
    /// edge was written. Shortest paths are not recomputed.
    pub fn insert_edge(&mut self, from: usize, to: usize, weight: Weight) -> bool {
        let Some((from, to)) = self.pair(from, to) else {
            tracing::trace!(from, to, "Ignoring edge insertion outside the graph");
            return false;
        };
        self.cost[from.slot()][to.slot()] = Some(weight);
        self.table[from.slot()][to.slot()] = PathCell::default();
        true
    }

    /// Clear the cost of `from -> to`
    ///
    /// Same bounds rule as [`MatrixGraph::insert_edge`]. The result table is
    /// left as is.
    pub fn remove_edge(&mut self, from: usize, to: usize) -> bool {
        let Some((from, to)) = self.pair(from, to) else {
            tracing::trace!(from, to, "Ignoring edge removal outside the graph");
            return false;
        };
        self.cost[from.slot()][to.slot()] = None;
        true
    }

    pub fn cost(&self, from: NodeIndex, to: NodeIndex) -> Option<Weight> {
        self.cost
            .get(from.slot())
            .and_then(|row| row.get(to.slot()))
            .copied()
            .flatten()
    }

    pub fn cell(&self, from: NodeIndex, to: NodeIndex) -> Option<&PathCell> {
        self.table.get(from.slot()).and_then(|row| row.get(to.slot()))
    }

    /// Shortest known distance, `None` when unreachable or not yet computed
    pub fn distance(&self, from: NodeIndex, to: NodeIndex) -> Distance {
        self.cell(from, to).and_then(|cell| cell.dist)
    }

    /// Results for every source in index order
    ///
    /// Rows are listed for each destination whose recorded distance is not
    /// zero: unreachable destinations appear with no path, while the source
    /// itself and anything reached at zero cost are left out.
    pub fn display_all(&self) -> Vec<SourceReport> {
        let size = self.size();
        NodeIndex::all(size)
            .map(|source| {
                let rows = NodeIndex::all(size)
                    .filter_map(|to| {
                        let dist = self.table[source.slot()][to.slot()].dist;
                        (dist != Some(0)).then(|| PathRow {
                            from: source,
                            to,
                            distance: dist,
                            path: dist.and_then(|_| self.path(source, to)),
                        })
                    })
                    .collect();

                SourceReport {
                    source,
                    data: self.data[source.slot()].clone(),
                    rows,
                }
            })
            .collect()
    }

    /// Query a single pair
    ///
    /// Raw indices are accepted in `[0, size]`; index 0 never has a path.
    /// Anything else outside the graph also answers with no path.
    pub fn display(&self, from: usize, to: usize) -> PathQuery {
        let route = self.pair(from, to).and_then(|(source, target)| {
            let distance = self.distance(source, target)?;
            let path = self.path(source, target)?;
            let data = path
                .iter()
                .map(|&index| self.data[index.slot()].clone())
                .collect();
            Some(Route {
                distance,
                path,
                data,
            })
        });

        let in_range = from <= self.size() && to <= self.size();
        if !in_range {
            tracing::trace!(from, to, size = self.size(), "Path query outside the graph");
        }

        PathQuery {
            from,
            to,
            in_range,
            route,
        }
    }

    fn pair(&self, from: usize, to: usize) -> Option<(NodeIndex, NodeIndex)> {
        let size = self.size();
        Some((NodeIndex::within(from, size)?, NodeIndex::within(to, size)?))
    }
}
