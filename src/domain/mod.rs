pub mod category;
pub mod tree;
pub mod types;
