use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Unexpected end of input on line {line}: expected {expected}")]
    UnexpectedEof { line: usize, expected: &'static str },

    #[error("Invalid node index {index}: graph has {size} nodes")]
    InvalidNodeIndex { index: i64, size: usize },

    #[error("Invalid edge weight {0}: weights must be non-negative")]
    InvalidWeight(i64),

    #[error("Graph of {requested} nodes exceeds the node limit of {limit}")]
    CapacityExceeded { requested: usize, limit: usize },

    #[error("Config error: {0}")]
    Config(String),
}
