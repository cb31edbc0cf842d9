pub mod config;
pub mod description;
pub mod error;
pub mod graph;
pub mod node;
pub mod result;

pub use config::{AppConfig, OutputFormat};
pub use description::DescriptionReader;
pub use error::GraphError;
pub use graph::{
    ListGraph, MatrixGraph, NodeListing, PathCell, PathQuery, PathRow, Route, SourceReport,
};
pub use node::{Distance, NodeData, NodeIndex, Weight};
pub use result::GraphResult;
