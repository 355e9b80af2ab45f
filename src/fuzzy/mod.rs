pub mod alignment;
pub mod similarity;
