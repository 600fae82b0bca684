//! The directory-tree representation: reading an existing tree and building
//! a new one from flat listings.

pub mod builder;
pub mod reader;
