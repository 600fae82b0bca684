//! The flat-format representation: streaming lff/dff text in, writing sorted
//! lff/dff text out.

pub mod reader;
pub mod writer;
