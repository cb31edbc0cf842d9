use clap::{Args, Parser, Subcommand, ValueEnum};
use graphkit_core::OutputFormat;
use std::path::PathBuf;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT_HASH"),
    ")"
);

#[derive(Parser)]
#[command(name = "graphkit")]
#[command(about = "Depth-first traversal and shortest paths over graph description files", long_about = None)]
#[command(version = VERSION)]
pub struct Cli {
    /// Output format (overrides the config file)
    #[arg(long, value_enum, global = true, env = "GRAPHKIT_FORMAT")]
    pub format: Option<FormatArg>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build adjacency-list graphs, dump them and run a depth-first search
    List(ListArgs),
    /// Build adjacency-matrix graphs and report shortest paths
    Matrix(MatrixArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Args)]
pub struct ListArgs {
    /// Graph description file (pairs of node indices per edge)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct MatrixArgs {
    /// Graph description file (index pairs plus a weight per edge)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Add or overwrite an edge before computing paths, as FROM,TO,WEIGHT
    #[arg(long = "insert", value_name = "FROM,TO,WEIGHT", value_parser = parse_weighted_edge)]
    pub inserts: Vec<WeightedEdgeArg>,

    /// Remove an edge before computing paths, as FROM,TO
    #[arg(long = "remove", value_name = "FROM,TO", value_parser = parse_edge)]
    pub removals: Vec<EdgeArg>,

    /// Report the shortest path for a pair, as FROM,TO
    #[arg(long = "pair", value_name = "FROM,TO", value_parser = parse_edge)]
    pub pairs: Vec<EdgeArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeArg {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedEdgeArg {
    pub from: usize,
    pub to: usize,
    /// Checked with `Weight::new` when applied
    pub weight: i64,
}

fn parse_edge(value: &str) -> Result<EdgeArg, String> {
    match split_fields(value)?.as_slice() {
        [from, to] => Ok(EdgeArg {
            from: parse_index(from)?,
            to: parse_index(to)?,
        }),
        _ => Err(format!("expected FROM,TO, got '{}'", value)),
    }
}

fn parse_weighted_edge(value: &str) -> Result<WeightedEdgeArg, String> {
    match split_fields(value)?.as_slice() {
        [from, to, weight] => Ok(WeightedEdgeArg {
            from: parse_index(from)?,
            to: parse_index(to)?,
            weight: weight
                .parse()
                .map_err(|_| format!("invalid weight '{}'", weight))?,
        }),
        _ => Err(format!("expected FROM,TO,WEIGHT, got '{}'", value)),
    }
}

fn split_fields(value: &str) -> Result<Vec<&str>, String> {
    let fields: Vec<&str> = value.split(',').map(str::trim).collect();
    if fields.iter().any(|f| f.is_empty()) {
        return Err(format!("empty field in '{}'", value));
    }
    Ok(fields)
}

fn parse_index(value: &str) -> Result<usize, String> {
    value
        .parse()
        .map_err(|_| format!("invalid node index '{}'", value))
}
