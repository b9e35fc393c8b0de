//! # Core Type Definitions
//!
//! This module contains the value types shared across the Recograph engine:
//! - Node identity (`ProductId`, `Node`)
//! - Edge representation (`Edge`)
//! - Error types (`RecographError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`
//! - Normalize names to lower case at construction, so equality, ordering
//!   and display never disagree about case

use crate::relation::Relation;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Numeric identifier of a product.
///
/// Product identity is the pair (name, id); the id alone keys the store's
/// secondary index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// NODE
// =============================================================================

/// A node in the recommendation graph.
///
/// Names are folded to lower case on construction. Category identity is the
/// name alone; product identity is name plus id. A category never equals a
/// product, even under the same name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Node {
    /// A named grouping of products.
    Category {
        /// Lower-cased category name.
        name: String,
    },
    /// A concrete product.
    Product {
        /// Lower-cased product name.
        name: String,
        /// Numeric product identifier.
        id: ProductId,
    },
}

impl Node {
    /// Create a category node. The name is folded to lower case.
    #[must_use]
    pub fn category(name: impl AsRef<str>) -> Self {
        Self::Category {
            name: name.as_ref().to_lowercase(),
        }
    }

    /// Create a product node. The name is folded to lower case.
    #[must_use]
    pub fn product(name: impl AsRef<str>, id: ProductId) -> Self {
        Self::Product {
            name: name.as_ref().to_lowercase(),
            id,
        }
    }

    /// The (lower-cased) node name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Category { name } | Self::Product { name, .. } => name,
        }
    }

    /// Display form: the bare name for categories, `name:id` for products.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Category { name } => name.clone(),
            Self::Product { name, id } => format!("{name}:{id}"),
        }
    }

    /// Ordering key for edge enumeration: products append the id zero-padded
    /// to 4 digits so that name comparison dominates id comparison.
    #[must_use]
    pub fn sort_key(&self) -> String {
        match self {
            Self::Category { name } => name.clone(),
            Self::Product { name, id } => format!("{name} {:04}", id.0),
        }
    }

    /// Whether this node is a product.
    #[must_use]
    pub fn is_product(&self) -> bool {
        matches!(self, Self::Product { .. })
    }

    /// Whether this node is a category.
    #[must_use]
    pub fn is_category(&self) -> bool {
        matches!(self, Self::Category { .. })
    }

    /// The product id, if this node is a product.
    #[must_use]
    pub fn product_id(&self) -> Option<ProductId> {
        match self {
            Self::Product { id, .. } => Some(*id),
            Self::Category { .. } => None,
        }
    }
}

// =============================================================================
// EDGE
// =============================================================================

/// A directed edge: (source node, relation, target node).
///
/// Equality is component-wise. Edges hold node values, not references into
/// the store; the store compares by logical equality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// The source node.
    pub source: Node,
    /// The relation kind.
    pub relation: Relation,
    /// The target node.
    pub target: Node,
}

impl Edge {
    /// Create an edge.
    #[must_use]
    pub fn new(source: Node, relation: Relation, target: Node) -> Self {
        Self {
            source,
            relation,
            target,
        }
    }

    /// The automatically-maintained reverse-direction edge: endpoints
    /// swapped, relation inverted.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            source: self.target.clone(),
            relation: self.relation.inverse(),
            target: self.source.clone(),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors produced by the Recograph engine.
///
/// Every failure is a typed value returned to the caller; the binary maps
/// them to user-facing text. The core never panics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecographError {
    /// Self-loop, or the relation's endpoint-kind rule rejects the pair.
    #[error("specified edge has an invalid relationship")]
    InvalidRelationship,

    /// A relation name did not match any of the six canonical names.
    #[error("unknown predicate {0}")]
    UnknownRelation(String),

    /// A recommendation leaf referenced a product id not present in the store.
    #[error("Product id {0} not found")]
    ProductNotFound(ProductId),

    /// Input remained after a complete expression parse.
    #[error("Extra characters at end of input")]
    TrailingInput,

    /// A grammar keyword was expected at the cursor.
    #[error("Expected {0}")]
    ExpectedKeyword(&'static str),

    /// A literal token (parenthesis) was expected at the cursor.
    #[error("Expected \"{0}\"")]
    ExpectedLiteral(&'static str),

    /// A strategy token was expected at the cursor.
    #[error("Expected strategy S1, S2, or S3")]
    ExpectedStrategy,

    /// A product id was expected at the cursor.
    #[error("Expected product id")]
    ExpectedProductId,

    /// A digit run was present but does not fit a product id.
    #[error("Invalid product id")]
    InvalidProductId,

    /// A comma separator was expected at the cursor.
    #[error("Expected comma")]
    ExpectedComma,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_name_is_lowercased() {
        let node = Node::category("Electronics");
        assert_eq!(node.name(), "electronics");
        assert_eq!(node.display_name(), "electronics");
        assert_eq!(node.sort_key(), "electronics");
    }

    #[test]
    fn product_display_and_sort_key() {
        let node = Node::product("Widget", ProductId(7));
        assert_eq!(node.display_name(), "widget:7");
        assert_eq!(node.sort_key(), "widget 0007");
    }

    #[test]
    fn equality_is_case_insensitive() {
        assert_eq!(Node::category("Phones"), Node::category("phones"));
        assert_eq!(
            Node::product("Widget", ProductId(1)),
            Node::product("widget", ProductId(1))
        );
    }

    #[test]
    fn product_identity_includes_id() {
        assert_ne!(
            Node::product("widget", ProductId(1)),
            Node::product("widget", ProductId(2))
        );
    }

    #[test]
    fn category_never_equals_product() {
        assert_ne!(Node::category("widget"), Node::product("widget", ProductId(1)));
    }

    #[test]
    fn sort_key_orders_same_name_products_by_id() {
        let a = Node::product("widget", ProductId(7));
        let b = Node::product("widget", ProductId(12));
        assert!(a.sort_key() < b.sort_key());
    }

    #[test]
    fn edge_inverse_swaps_endpoints_and_relation() {
        let edge = Edge::new(
            Node::category("tools"),
            Relation::Contains,
            Node::product("hammer", ProductId(3)),
        );
        let inverse = edge.inverse();
        assert_eq!(inverse.source, edge.target);
        assert_eq!(inverse.target, edge.source);
        assert_eq!(inverse.relation, Relation::ContainedIn);
        assert_eq!(inverse.inverse(), edge);
    }

    #[test]
    fn edge_equality_is_component_wise() {
        let a = Edge::new(
            Node::product("a", ProductId(1)),
            Relation::PartOf,
            Node::product("b", ProductId(2)),
        );
        let b = Edge::new(
            Node::product("a", ProductId(1)),
            Relation::HasPart,
            Node::product("b", ProductId(2)),
        );
        assert_ne!(a, b);
    }
}
