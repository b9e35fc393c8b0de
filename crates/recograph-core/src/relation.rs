//! # Relation Catalog
//!
//! The fixed set of relationship kinds connecting categories and products.
//!
//! Every kind has a canonical name, a display label, an inverse and a
//! validity rule over its endpoint kinds. The catalog is pure data — no
//! mutable state — and dispatch is explicit `match` arms on the enum.

use crate::{Node, RecographError};
use serde::{Deserialize, Serialize};

/// The six relationship kinds.
///
/// Declaration order defines the 1-based [`order`](Relation::order) used for
/// deterministic edge enumeration. The kinds form three inverse pairs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Relation {
    /// A category contains a node.
    Contains,
    /// A node is contained in a category.
    ContainedIn,
    /// A product is part of another product.
    PartOf,
    /// A product has another product as a part.
    HasPart,
    /// A product succeeds another product.
    SuccessorOf,
    /// A product precedes another product.
    PredecessorOf,
}

impl Relation {
    /// All kinds in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Contains,
        Self::ContainedIn,
        Self::PartOf,
        Self::HasPart,
        Self::SuccessorOf,
        Self::PredecessorOf,
    ];

    /// Resolve a canonical name to a kind.
    ///
    /// The match is exact; anything else is the unknown-relationship error.
    pub fn from_name(name: &str) -> Result<Self, RecographError> {
        Self::ALL
            .into_iter()
            .find(|relation| relation.name() == name)
            .ok_or_else(|| RecographError::UnknownRelation(name.to_string()))
    }

    /// The canonical (hyphenated) name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::ContainedIn => "contained-in",
            Self::PartOf => "part-of",
            Self::HasPart => "has-part",
            Self::SuccessorOf => "successor-of",
            Self::PredecessorOf => "predecessor-of",
        }
    }

    /// Display label: the canonical name with hyphens removed.
    #[must_use]
    pub fn label(self) -> String {
        self.name().replace('-', "")
    }

    /// The inverse kind. Total over all six kinds.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Contains => Self::ContainedIn,
            Self::ContainedIn => Self::Contains,
            Self::PartOf => Self::HasPart,
            Self::HasPart => Self::PartOf,
            Self::SuccessorOf => Self::PredecessorOf,
            Self::PredecessorOf => Self::SuccessorOf,
        }
    }

    /// 1-based declaration ordinal, used only for deterministic output
    /// ordering of edges.
    #[must_use]
    pub const fn order(self) -> u8 {
        match self {
            Self::Contains => 1,
            Self::ContainedIn => 2,
            Self::PartOf => 3,
            Self::HasPart => 4,
            Self::SuccessorOf => 5,
            Self::PredecessorOf => 6,
        }
    }

    /// Validity rule over the endpoint kinds.
    ///
    /// `contains` requires a category source, `contained-in` a category
    /// target; the four product relations require products on both ends.
    #[must_use]
    pub fn is_valid(self, source: &Node, target: &Node) -> bool {
        match self {
            Self::Contains => source.is_category(),
            Self::ContainedIn => target.is_category(),
            Self::PartOf | Self::HasPart | Self::SuccessorOf | Self::PredecessorOf => {
                source.is_product() && target.is_product()
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
