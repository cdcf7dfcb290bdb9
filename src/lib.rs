//! blocknotes - Local notes made of typed blocks
//!
//! Notes hold an ordered list of text, image and audio items, persisted in a
//! local SQLite database with one table per record kind.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::BlocknotesError;
