// Library exports for the generator binary and integration tests
pub mod config;
pub mod constants;
pub mod draw;
pub mod export;
pub mod geometry;
pub mod pipeline;
pub mod render;
