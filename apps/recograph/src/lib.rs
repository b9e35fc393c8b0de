//! # Recograph - THE BINARY
//!
//! Interactive front end for the recograph-core engine.
//!
//! The library half of this crate hosts the command loop so that
//! integration tests can drive it line by line; the binary half wires it to
//! stdin, clap and tracing.

pub mod repl;
