pub mod list;
pub mod matrix;
pub mod report;
mod shortest_path;

pub use list::ListGraph;
pub use matrix::{MatrixGraph, PathCell};
pub use report::{NodeListing, PathQuery, PathRow, Route, SourceReport};
