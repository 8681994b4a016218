//! Custom extractors for Axum handlers.

pub mod matrix;

pub use matrix::MatrixParams;
