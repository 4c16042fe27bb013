pub mod nested;
pub mod path;

pub use nested::NestedStore;
pub use path::ItemPath;
