//! Column-aligned text layouts for graph reports.
//!
//! Field order, labels and spacing are part of the output contract.

use graphkit_core::{NodeIndex, NodeListing, PathQuery, Route, SourceReport};
use std::fmt::Write;

const NO_PATH: &str = "----";

/// Structure dump of a list graph followed by its depth-first ordering
pub fn list_graph(listing: &[NodeListing], order: &[NodeIndex]) -> String {
    let mut out = String::from("Graph:\n");
    for node in listing {
        let _ = write!(out, "Node{}      {}\n\n", node.index, node.data);
        for target in &node.edges {
            let _ = writeln!(out, "  edge  {}  {}", node.index, target);
        }
    }

    out.push_str("Depth-first ordering:");
    for index in order {
        let _ = write!(out, "  {}", index);
    }
    out.push_str("\n\n");
    out
}

/// Every source's shortest-path table
pub fn shortest_paths(reports: &[SourceReport]) -> String {
    let mut out = String::from("Description             From node   To node   Dijkstra's     Path\n");
    for report in reports {
        let _ = write!(out, "{}\n\n", report.data);
        for row in &report.rows {
            let _ = write!(out, "{}{}{}{}", " ".repeat(27), row.from, " ".repeat(10), row.to);
            match (row.distance, &row.path) {
                (Some(distance), Some(path)) => {
                    let _ = writeln!(
                        out,
                        "{}{}{}{}",
                        " ".repeat(12),
                        distance,
                        " ".repeat(10),
                        path_indices(path)
                    );
                }
                _ => {
                    let _ = writeln!(out, "{}{}", " ".repeat(12), NO_PATH);
                }
            }
        }
    }
    out
}

/// A single pair query with the payloads along its path
pub fn path_query(query: &PathQuery) -> String {
    let mut out = format!("       {}       {}", query.from, query.to);
    if !query.in_range {
        let _ = writeln!(out, "            {}", NO_PATH);
        return out;
    }

    match &query.route {
        None => {
            let _ = writeln!(out, "            {}", NO_PATH);
        }
        Some(route) => {
            let _ = writeln!(
                out,
                "            {}            {}",
                route.distance,
                path_indices(&route.path)
            );
            route_data(&mut out, route);
        }
    }
    out.push('\n');
    out
}

/// Source payload on its own line, each later payload followed by a blank line
fn route_data(out: &mut String, route: &Route) {
    for (position, data) in route.data.iter().enumerate() {
        if position == 0 {
            let _ = writeln!(out, "{}", data);
        } else {
            let _ = write!(out, "{}\n\n", data);
        }
    }
}

fn path_indices(path: &[NodeIndex]) -> String {
    path.iter().map(|index| format!("{} ", index)).collect()
}
