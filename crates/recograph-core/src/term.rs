//! # Term Evaluation
//!
//! The recommendation expression tree and its evaluation against the graph.
//!
//! Every node evaluates to a set of products. Traversal is iterative
//! (explicit work stack) with a visited set, so cyclic successor or
//! predecessor chains terminate and cannot exhaust the call stack.

use crate::graph::Graph;
use crate::{Node, ProductId, RecographError, Relation};
use std::collections::BTreeSet;

// =============================================================================
// STRATEGY
// =============================================================================

/// The three traversal strategies a recommendation leaf can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// `S1`: products sharing a category with the reference product.
    SameCategory,
    /// `S2`: transitive closure over `predecessor-of` edges.
    Predecessors,
    /// `S3`: transitive closure over `successor-of` edges.
    Successors,
}

// =============================================================================
// TERM
// =============================================================================

/// A recommendation expression tree, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// Set union of both children's evaluations.
    Union(Box<Term>, Box<Term>),
    /// Set intersection of both children's evaluations.
    Intersection(Box<Term>, Box<Term>),
    /// A traversal strategy rooted at a product id.
    Final {
        /// The traversal strategy.
        strategy: Strategy,
        /// The reference product.
        product: ProductId,
    },
}

impl Term {
    /// Evaluate the term against a graph.
    ///
    /// The result contains only product nodes; the reference product of a
    /// leaf is excluded even when reachable through a cycle. A leaf whose id
    /// is not registered fails with [`RecographError::ProductNotFound`].
    pub fn evaluate(&self, graph: &Graph) -> Result<BTreeSet<Node>, RecographError> {
        match self {
            Self::Union(left, right) => {
                let mut result = left.evaluate(graph)?;
                result.extend(right.evaluate(graph)?);
                Ok(result)
            }
            Self::Intersection(left, right) => {
                let mut result = left.evaluate(graph)?;
                let right = right.evaluate(graph)?;
                result.retain(|node| right.contains(node));
                Ok(result)
            }
            Self::Final { strategy, product } => {
                let reference = graph
                    .product_by_id(*product)
                    .cloned()
                    .ok_or(RecographError::ProductNotFound(*product))?;
                let mut result = match strategy {
                    Strategy::SameCategory => same_category(graph, &reference),
                    Strategy::Predecessors => closure(graph, &reference, Relation::PredecessorOf),
                    Strategy::Successors => closure(graph, &reference, Relation::SuccessorOf),
                };
                result.remove(&reference);
                Ok(result)
            }
        }
    }
}

/// Two-hop traversal: categories holding the reference, then their products.
fn same_category(graph: &Graph, reference: &Node) -> BTreeSet<Node> {
    let mut result = BTreeSet::new();
    for membership in graph.outgoing_edges_with(reference, Relation::ContainedIn) {
        for holding in graph.outgoing_edges_with(&membership.target, Relation::Contains) {
            if holding.target.is_product() {
                result.insert(holding.target.clone());
            }
        }
    }
    result
}

/// Transitive closure over one relation kind, cycle-safe.
fn closure(graph: &Graph, start: &Node, relation: Relation) -> BTreeSet<Node> {
    let mut result = BTreeSet::new();
    let mut visited = BTreeSet::new();
    let mut stack = vec![start.clone()];

    while let Some(current) = stack.pop() {
        if !visited.insert(current.clone()) {
            continue;
        }
        for edge in graph.outgoing_edges_with(&current, relation) {
            if edge.target.is_product() {
                result.insert(edge.target.clone());
                if !visited.contains(&edge.target) {
                    stack.push(edge.target.clone());
                }
            }
        }
    }
    result
}

// =============================================================================
// TESTS
// =============================================================================
