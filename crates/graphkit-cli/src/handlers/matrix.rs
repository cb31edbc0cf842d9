use crate::cli::{EdgeArg, MatrixArgs};
use crate::context::CliContext;
use crate::{output, render};
use graphkit_core::{MatrixGraph, PathQuery, SourceReport, Weight};
use serde::Serialize;

#[derive(Serialize)]
pub struct MatrixGraphReport {
    pub edits: Vec<EdgeEdit>,
    pub sources: Vec<SourceReport>,
    pub queries: Vec<PathQuery>,
}

#[derive(Serialize)]
pub struct EdgeEdit {
    pub action: EditAction,
    pub from: usize,
    pub to: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
    /// False when an index fell outside the graph and the edit was ignored
    pub applied: bool,
}

#[derive(Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditAction {
    Insert,
    Remove,
}

/// Solve every matrix graph in the file, applying the requested edits first
pub fn handle(ctx: &CliContext, args: MatrixArgs) -> anyhow::Result<()> {
    let mut reader = ctx.open(&args.file)?;
    let mut reports = Vec::new();

    while !reader.at_end()? {
        let mut graph = MatrixGraph::new();
        graph.build(&mut reader)?;

        let edits = apply_edits(&mut graph, &args)?;
        graph.find_shortest_path();

        let sources = graph.display_all();
        let queries: Vec<PathQuery> = args
            .pairs
            .iter()
            .map(|&EdgeArg { from, to }| graph.display(from, to))
            .collect();

        if ctx.is_json() {
            reports.push(MatrixGraphReport {
                edits,
                sources,
                queries,
            });
        } else {
            print!("{}", render::shortest_paths(&sources));
            println!();
            for query in &queries {
                print!("{}", render::path_query(query));
            }
        }
    }

    if ctx.is_json() {
        output::output_list(reports)?;
    }
    Ok(())
}

fn apply_edits(graph: &mut MatrixGraph, args: &MatrixArgs) -> anyhow::Result<Vec<EdgeEdit>> {
    let mut edits = Vec::with_capacity(args.inserts.len() + args.removals.len());

    for insert in &args.inserts {
        let weight = Weight::new(insert.weight)?;
        let applied = graph.insert_edge(insert.from, insert.to, weight);
        if !applied {
            tracing::warn!(
                "Skipped --insert {},{},{}: graph has {} nodes",
                insert.from,
                insert.to,
                insert.weight,
                graph.size()
            );
        }
        edits.push(EdgeEdit {
            action: EditAction::Insert,
            from: insert.from,
            to: insert.to,
            weight: Some(weight),
            applied,
        });
    }

    for removal in &args.removals {
        let applied = graph.remove_edge(removal.from, removal.to);
        if !applied {
            tracing::warn!(
                "Skipped --remove {},{}: graph has {} nodes",
                removal.from,
                removal.to,
                graph.size()
            );
        }
        edits.push(EdgeEdit {
            action: EditAction::Remove,
            from: removal.from,
            to: removal.to,
            weight: None,
            applied,
        });
    }

    Ok(edits)
}
