//! # recograph-core
//!
//! The deterministic recommendation-graph engine for Recograph - THE LOGIC.
//!
//! This crate maintains a small typed graph of category and product entities
//! connected by symmetric relationship pairs, and answers recommendation
//! queries expressed in a bracketed boolean set-algebra language over that
//! graph.
//!
//! ## Architectural Constraints
//!
//! - The core is pure: no I/O, no printing, no async
//! - Every failure is a typed value; the core never panics
//! - All graph state lives in `BTreeSet`/`BTreeMap`, and presentation
//!   orderings are computed freshly at every enumeration call, so output is
//!   deterministic under any mutation history
//!
//! ## Data Flow
//!
//! raw text → token/expression parsers → structured values ([`Edge`],
//! [`Term`]) → [`Graph`] (for edges) or [`Term::evaluate`] (for queries,
//! which itself reads the graph) → result set → caller-side formatting.

// =============================================================================
// MODULES
// =============================================================================

pub mod graph;
pub mod parse;
pub mod relation;
pub mod term;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use types::{Edge, Node, ProductId, RecographError};

// =============================================================================
// RE-EXPORTS: Graph Engine
// =============================================================================

pub use graph::{Collision, Graph};
pub use relation::Relation;

// =============================================================================
// RE-EXPORTS: Parsing & Evaluation
// =============================================================================

pub use parse::{parse_edge, parse_expression, parse_node};
pub use term::{Strategy, Term};
