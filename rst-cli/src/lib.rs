//! Library half of the `md2rst` binary, shared with its integration tests.

pub mod transforms;
