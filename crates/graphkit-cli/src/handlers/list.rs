use crate::cli::ListArgs;
use crate::context::CliContext;
use crate::{output, render};
use graphkit_core::{ListGraph, NodeIndex, NodeListing};
use serde::Serialize;

#[derive(Serialize)]
pub struct ListGraphReport {
    pub nodes: Vec<NodeListing>,
    pub depth_first: Vec<NodeIndex>,
}

/// Dump and traverse every list graph in the file, in order
pub fn handle(ctx: &CliContext, args: ListArgs) -> anyhow::Result<()> {
    let mut reader = ctx.open(&args.file)?;
    let mut reports = Vec::new();

    while !reader.at_end()? {
        let mut graph = ListGraph::new();
        graph.build(&mut reader)?;

        let nodes = graph.display();
        let depth_first = graph.depth_first_search();

        if ctx.is_json() {
            reports.push(ListGraphReport { nodes, depth_first });
        } else {
            print!("{}", render::list_graph(&nodes, &depth_first));
        }
    }

    if ctx.is_json() {
        output::output_list(reports)?;
    }
    Ok(())
}
