//! Text rendering module
//!
//! Rasterizes simulation snapshots into a character grid for terminals
//! and logs.

pub mod text;

pub use text::TextFrame;
