pub mod dictionary;
pub mod engine;
pub mod generator;
pub mod loader;
pub mod types;
