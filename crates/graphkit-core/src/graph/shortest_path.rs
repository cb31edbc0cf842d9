use super::matrix::{MatrixGraph, PathCell};
use crate::node::{NodeData, NodeIndex, Weight};

impl MatrixGraph {
    /// Run Dijkstra from every source, rewriting the whole result table
    ///
    /// Edge weights are non-negative by construction, which the greedy
    /// finalisation order relies on.
    pub fn find_shortest_path(&mut self) {
        let size = self.size();
        for source in NodeIndex::all(size) {
            dijkstra_row(&self.cost, &mut self.table[source.slot()], source);
        }
        tracing::debug!(sources = size, "Computed shortest paths");
    }

    /// Nodes on the shortest path from `from` to `to`, source first
    ///
    /// `None` when `to` is unreachable from `from` or no search has run yet.
    pub fn path(&self, from: NodeIndex, to: NodeIndex) -> Option<Vec<NodeIndex>> {
        let row = self.table.get(from.slot())?;
        if row.get(to.slot())?.dist.is_none() {
            return None;
        }

        let mut path = vec![to];
        let mut current = to;
        while current != from {
            let cell = row.get(current.slot())?;
            if cell.dist.is_none() {
                return None;
            }
            current = cell.path?;
            path.push(current);

            if path.len() > self.size() {
                tracing::warn!(%from, %to, "Predecessor chain does not reach its source");
                return None;
            }
        }

        path.reverse();
        Some(path)
    }

    /// Payloads of the nodes on the shortest path from `from` to `to`
    pub fn path_data(&self, from: NodeIndex, to: NodeIndex) -> Option<Vec<&NodeData>> {
        let path = self.path(from, to)?;
        Some(path.iter().map(|index| &self.data[index.slot()]).collect())
    }
}

/// Single-source pass writing into the result row of `source`
fn dijkstra_row(cost: &[Vec<Option<Weight>>], row: &mut [PathCell], source: NodeIndex) {
    let s = source.slot();

    row.fill(PathCell::default());
    row[s] = PathCell {
        visited: true,
        dist: Some(0),
        path: None,
    };

    for (n, weight) in cost[s].iter().enumerate() {
        if n == s {
            continue;
        }
        if let Some(weight) = weight {
            row[n].dist = Some(u64::from(weight.get()));
            row[n].path = Some(source);
        }
    }

    for _ in 1..row.len() {
        let Some(current) = closest_unvisited(row) else {
            break;
        };
        row[current].visited = true;

        let Some(base) = row[current].dist else {
            continue;
        };
        let via = Some(NodeIndex::from_slot(current));

        for (adjacent, weight) in cost[current].iter().enumerate() {
            let Some(weight) = weight else { continue };
            if row[adjacent].visited {
                continue;
            }

            let candidate = base + u64::from(weight.get());
            if row[adjacent].dist.map_or(true, |known| candidate < known) {
                row[adjacent].dist = Some(candidate);
                row[adjacent].path = via;
            }
        }
    }
}

/// Unvisited slot with the smallest finite distance, lowest index on ties
fn closest_unvisited(row: &[PathCell]) -> Option<usize> {
    row.iter()
        .enumerate()
        .filter(|(_, cell)| !cell.visited)
        .filter_map(|(slot, cell)| cell.dist.map(|dist| (slot, dist)))
        .min_by_key(|&(_, dist)| dist)
        .map(|(slot, _)| slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::DescriptionReader;

    fn build(text: &str) -> MatrixGraph {
        let mut reader = DescriptionReader::new(text.as_bytes());
        let mut graph = MatrixGraph::new();
        graph.build(&mut reader).unwrap();
        graph.find_shortest_path();
        graph
    }

    fn idx(raw: i64, size: usize) -> NodeIndex {
        NodeIndex::checked(raw, size).unwrap()
    }

    fn path(graph: &MatrixGraph, from: i64, to: i64) -> Option<Vec<usize>> {
        let size = graph.size();
        graph
            .path(idx(from, size), idx(to, size))
            .map(|p| p.into_iter().map(NodeIndex::get).collect())
    }

    #[test]
    fn test_prefers_cheaper_indirect_route() {
        let graph = build("4\na\nb\nc\nd\n1 2 5\n2 3 3\n1 3 10\n0 0 0\n");
        assert_eq!(graph.distance(idx(1, 4), idx(3, 4)), Some(8));
        assert_eq!(path(&graph, 1, 3), Some(vec![1, 2, 3]));
        assert_eq!(graph.cell(idx(1, 4), idx(3, 4)).unwrap().path, Some(idx(2, 4)));
    }

    #[test]
    fn test_source_distance_is_zero() {
        let graph = build("3\na\nb\nc\n1 1 7\n1 2 1\n2 3 1\n0 0 0\n");
        for s in NodeIndex::all(3) {
            assert_eq!(graph.distance(s, s), Some(0));
            assert!(graph.cell(s, s).unwrap().visited);
        }
        assert_eq!(path(&graph, 2, 2), Some(vec![2]));
    }

    #[test]
    fn test_unreachable_stays_infinite() {
        let graph = build("3\na\nb\nc\n1 2 4\n0 0 0\n");
        let cell = graph.cell(idx(2, 3), idx(1, 3)).unwrap();
        assert_eq!(cell.dist, None);
        assert_eq!(cell.path, None);
        assert_eq!(path(&graph, 2, 1), None);
        assert_eq!(path(&graph, 1, 3), None);
        assert!(graph.path_data(idx(1, 3), idx(3, 3)).is_none());
    }

    #[test]
    fn test_ties_prefer_lowest_index() {
        // 1 -> 2 and 1 -> 3 both cost 2; both reach 4 at total 3
        let graph = build("4\na\nb\nc\nd\n1 2 2\n1 3 2\n2 4 1\n3 4 1\n0 0 0\n");
        assert_eq!(graph.distance(idx(1, 4), idx(4, 4)), Some(3));
        assert_eq!(path(&graph, 1, 4), Some(vec![1, 2, 4]));
    }

    #[test]
    fn test_triangle_inequality_holds() {
        let text = "5\na\nb\nc\nd\ne\n\
                    1 2 7\n1 3 9\n1 5 14\n2 3 10\n2 4 15\n3 4 11\n3 5 2\n4 5 6\n5 4 9\n4 1 3\n\
                    0 0 0\n";
        let graph = build(text);

        for s in NodeIndex::all(5) {
            for u in NodeIndex::all(5) {
                let Some(du) = graph.distance(s, u) else { continue };
                for a in NodeIndex::all(5) {
                    if let Some(w) = graph.cost(u, a) {
                        let da = graph.distance(s, a).expect("neighbour of reachable node");
                        assert!(da <= du + u64::from(w.get()), "{s}->{a} via {u}");
                    }
                }
            }
        }
        assert_eq!(graph.distance(idx(1, 5), idx(4, 5)), Some(20));
        assert_eq!(path(&graph, 1, 4), Some(vec![1, 3, 4]));
        assert_eq!(graph.distance(idx(1, 5), idx(5, 5)), Some(11));
    }

    #[test]
    fn test_predecessor_chains_match_distances() {
        let graph = build("4\na\nb\nc\nd\n1 2 1\n2 3 1\n3 4 1\n4 1 1\n1 4 5\n0 0 0\n");
        for s in NodeIndex::all(4) {
            for t in NodeIndex::all(4) {
                let nodes = graph.path(s, t).unwrap();
                assert_eq!(nodes.first(), Some(&s));
                assert_eq!(nodes.last(), Some(&t));
                let total: u64 = nodes
                    .windows(2)
                    .map(|w| u64::from(graph.cost(w[0], w[1]).unwrap().get()))
                    .sum();
                assert_eq!(Some(total), graph.distance(s, t));
            }
        }
    }

    #[test]
    fn test_insert_edge_then_recompute() {
        let mut graph = build("3\na\nb\nc\n1 2 10\n2 3 10\n0 0 0\n");
        assert_eq!(graph.distance(idx(1, 3), idx(3, 3)), Some(20));

        graph.insert_edge(1, 3, Weight::from(4));
        graph.find_shortest_path();
        assert!(graph.distance(idx(1, 3), idx(3, 3)).unwrap() <= 4);
        assert_eq!(path(&graph, 1, 3), Some(vec![1, 3]));
    }

    #[test]
    fn test_remove_edge_then_recompute() {
        let mut graph = build("3\na\nb\nc\n1 2 1\n2 3 1\n1 3 5\n0 0 0\n");
        assert_eq!(path(&graph, 1, 3), Some(vec![1, 2, 3]));

        graph.remove_edge(2, 3);
        graph.find_shortest_path();
        assert_eq!(path(&graph, 1, 3), Some(vec![1, 3]));
        assert_eq!(graph.distance(idx(1, 3), idx(3, 3)), Some(5));
        assert_eq!(path(&graph, 2, 3), None);
    }

    #[test]
    fn test_path_data_follows_path() {
        let graph = build("3\nAurora\nGreen Lake\nWoodland Park\n1 2 2\n2 3 2\n0 0 0\n");
        let data = graph.path_data(idx(1, 3), idx(3, 3)).unwrap();
        let names: Vec<&str> = data.into_iter().map(NodeData::as_str).collect();
        assert_eq!(names, vec!["Aurora", "Green Lake", "Woodland Park"]);
    }

    #[test]
    fn test_no_paths_before_first_run() {
        let mut reader = DescriptionReader::new("2\na\nb\n1 2 1\n0 0 0\n".as_bytes());
        let mut graph = MatrixGraph::new();
        graph.build(&mut reader).unwrap();
        assert_eq!(graph.path(idx(1, 2), idx(2, 2)), None);
        assert_eq!(graph.distance(idx(1, 2), idx(1, 2)), None);
    }
}
