pub mod list;
pub mod matrix;
