//! # Graph Store
//!
//! The mutable store of nodes and directed edges.
//!
//! The store derives inverse edges automatically, enforces the
//! relationship-validity and name/id-collision invariants, and prunes nodes
//! that lose their last edge. All state lives in `BTreeSet`/`BTreeMap` for
//! deterministic iteration; presentation orderings are computed freshly at
//! every enumeration call.

use crate::{Edge, Node, ProductId, RecographError, Relation};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// COLLISION REPORTS
// =============================================================================

/// A non-fatal entity-registration conflict observed during [`Graph::add_edge`].
///
/// Collisions are reports, not errors: the offending registration is skipped
/// but the edge insertion itself continues. The caller decides how to
/// surface them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collision {
    /// A product id is already registered under a different name.
    IdReused {
        /// The contested id.
        id: ProductId,
    },
    /// A name is already registered to a product with a different id.
    NameReused {
        /// The contested (lower-cased) name.
        name: String,
    },
}

// =============================================================================
// GRAPH
// =============================================================================

/// The recommendation graph.
///
/// Nodes are value-identified; edges hold node values and are matched by
/// logical equality. A secondary index maps product ids to their node for
/// direct lookup.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: BTreeSet<Node>,
    edges: BTreeSet<Edge>,
    products_by_id: BTreeMap<ProductId, Node>,
}

impl Graph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge, deriving and inserting its inverse.
    ///
    /// Fails without mutation on a self-loop or when the relation's validity
    /// rule rejects the endpoint kinds. Otherwise both endpoints are
    /// registered (collision rules may skip a registration — see
    /// [`Collision`]) and the edge plus its inverse are inserted. Re-adding
    /// an existing edge is a no-op success.
    ///
    /// A skipped registration does not abort the edge insertion; the edge
    /// then references an entity value absent from the node set. Removing
    /// such an edge later behaves as for any other edge.
    pub fn add_edge(&mut self, edge: Edge) -> Result<Vec<Collision>, RecographError> {
        if edge.source == edge.target || !edge.relation.is_valid(&edge.source, &edge.target) {
            return Err(RecographError::InvalidRelationship);
        }

        let mut collisions = Vec::new();
        self.register(&edge.source, &mut collisions);
        self.register(&edge.target, &mut collisions);

        if self.edges.contains(&edge) {
            return Ok(collisions);
        }

        let inverse = edge.inverse();
        self.edges.insert(edge);
        self.edges.insert(inverse);
        Ok(collisions)
    }

    /// Remove an edge and its inverse, pruning endpoints left without edges.
    ///
    /// Inverse absence is not an error. Returns whether the originally
    /// requested edge was present before removal.
    pub fn remove_edge(&mut self, edge: &Edge) -> bool {
        let removed = self.edges.remove(edge);
        self.edges.remove(&edge.inverse());
        self.prune_if_isolated(&edge.source);
        self.prune_if_isolated(&edge.target);
        removed
    }

    /// Register a node unless identity rules forbid it.
    ///
    /// An id already owned by a different name, or a name already owned by a
    /// different node, keeps its original owner; conflicting product pairs
    /// are reported.
    fn register(&mut self, node: &Node, collisions: &mut Vec<Collision>) {
        if let Some(id) = node.product_id() {
            if let Some(existing) = self.products_by_id.get(&id) {
                if existing.name() != node.name() {
                    collisions.push(Collision::IdReused { id });
                }
                return;
            }
        }

        if let Some(existing) = self.nodes.iter().find(|n| n.name() == node.name()) {
            if let (Some(existing_id), Some(new_id)) = (existing.product_id(), node.product_id()) {
                if existing_id != new_id {
                    collisions.push(Collision::NameReused {
                        name: node.name().to_string(),
                    });
                }
            }
            return;
        }

        if let Some(id) = node.product_id() {
            self.products_by_id.insert(id, node.clone());
        }
        self.nodes.insert(node.clone());
    }

    /// Drop a node (and its id-index entry) once no edge touches it.
    fn prune_if_isolated(&mut self, node: &Node) {
        let has_edge = self
            .edges
            .iter()
            .any(|e| e.source == *node || e.target == *node);
        if !has_edge {
            self.nodes.remove(node);
            if let Some(id) = node.product_id() {
                self.products_by_id.remove(&id);
            }
        }
    }

    /// All stored edges with the given source.
    pub fn outgoing_edges<'a>(&'a self, source: &'a Node) -> impl Iterator<Item = &'a Edge> {
        self.edges.iter().filter(move |e| e.source == *source)
    }

    /// All stored edges with the given source and relation kind.
    pub fn outgoing_edges_with<'a>(
        &'a self,
        source: &'a Node,
        relation: Relation,
    ) -> impl Iterator<Item = &'a Edge> {
        self.outgoing_edges(source)
            .filter(move |e| e.relation == relation)
    }

    /// Look up a product node by id. Absence is a valid non-error outcome.
    #[must_use]
    pub fn product_by_id(&self, id: ProductId) -> Option<&Node> {
        self.products_by_id.get(&id)
    }

    /// Whether the exact edge is stored.
    #[must_use]
    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.edges.contains(edge)
    }

    /// Number of registered nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored edges (inverses included).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Clear nodes, edges and the id index.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.products_by_id.clear();
    }

    /// Snapshot of all nodes ordered by name. Freshly sorted on every call.
    #[must_use]
    pub fn nodes(&self) -> Vec<Node> {
        let mut sorted: Vec<Node> = self.nodes.iter().cloned().collect();
        sorted.sort_by(|a, b| a.name().cmp(b.name()));
        sorted
    }

    /// Snapshot of all edges ordered by (source sort key, target sort key,
    /// relation order). Freshly sorted on every call.
    #[must_use]
    pub fn edges(&self) -> Vec<Edge> {
        let mut sorted: Vec<Edge> = self.edges.iter().cloned().collect();
        sorted.sort_by(|a, b| {
            (a.source.sort_key(), a.target.sort_key(), a.relation.order()).cmp(&(
                b.source.sort_key(),
                b.target.sort_key(),
                b.relation.order(),
            ))
        });
        sorted
    }

    /// Snapshot of all category nodes ordered by name.
    #[must_use]
    pub fn categories(&self) -> Vec<Node> {
        let mut sorted: Vec<Node> = self
            .nodes
            .iter()
            .filter(|n| n.is_category())
            .cloned()
            .collect();
        sorted.sort_by(|a, b| a.name().cmp(b.name()));
        sorted
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, id: u32) -> Node {
        Node::product(name, ProductId(id))
    }

    fn contains(category: &str, name: &str, id: u32) -> Edge {
        Edge::new(Node::category(category), Relation::Contains, product(name, id))
    }

    #[test]
    fn add_edge_registers_endpoints_and_inverse() {
        let mut graph = Graph::new();
        let edge = contains("tools", "hammer", 1);

        let collisions = graph.add_edge(edge.clone()).expect("add");
        assert!(collisions.is_empty());

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.contains_edge(&edge));
        assert!(graph.contains_edge(&edge.inverse()));
    }

    #[test]
    fn add_edge_rejects_self_loop() {
        let mut graph = Graph::new();
        let edge = Edge::new(
            product("a", 1),
            Relation::PartOf,
            product("a", 1),
        );
        assert_eq!(
            graph.add_edge(edge),
            Err(RecographError::InvalidRelationship)
        );
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn add_edge_rejects_invalid_endpoint_kinds() {
        let mut graph = Graph::new();
        // contains with a product source
        let edge = Edge::new(product("a", 1), Relation::Contains, product("b", 2));
        assert_eq!(
            graph.add_edge(edge),
            Err(RecographError::InvalidRelationship)
        );
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn add_edge_is_idempotent() {
        let mut graph = Graph::new();
        let edge = contains("tools", "hammer", 1);

        graph.add_edge(edge.clone()).expect("add");
        let nodes_before = graph.nodes();
        let edges_before = graph.edges();

        graph.add_edge(edge).expect("re-add");
        assert_eq!(graph.nodes(), nodes_before);
        assert_eq!(graph.edges(), edges_before);
    }

    #[test]
    fn adding_the_inverse_explicitly_changes_nothing() {
        let mut graph = Graph::new();
        let edge = contains("tools", "hammer", 1);
        graph.add_edge(edge.clone()).expect("add");

        graph.add_edge(edge.inverse()).expect("add inverse");
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn id_collision_is_reported_and_registration_skipped() {
        let mut graph = Graph::new();
        graph.add_edge(contains("tools", "hammer", 1)).expect("add");

        // Same id, different name. The id keeps its original owner, the
        // colliding node stays unregistered, yet the edge is inserted.
        let edge = contains("tools", "wrench", 1);
        let collisions = graph.add_edge(edge.clone()).expect("add");
        assert_eq!(collisions, vec![Collision::IdReused { id: ProductId(1) }]);

        assert_eq!(
            graph.product_by_id(ProductId(1)),
            Some(&product("hammer", 1))
        );
        assert!(!graph.nodes().contains(&product("wrench", 1)));
        assert!(graph.contains_edge(&edge));
    }

    #[test]
    fn name_collision_is_reported_and_registration_skipped() {
        let mut graph = Graph::new();
        graph.add_edge(contains("tools", "hammer", 1)).expect("add");

        // Same name, different id.
        let collisions = graph
            .add_edge(contains("tools", "hammer", 2))
            .expect("add");
        assert_eq!(
            collisions,
            vec![Collision::NameReused {
                name: "hammer".to_string()
            }]
        );
        assert_eq!(graph.product_by_id(ProductId(2)), None);
        assert!(!graph.nodes().contains(&product("hammer", 2)));
    }

    #[test]
    fn name_collision_across_kinds_is_silent() {
        let mut graph = Graph::new();
        graph.add_edge(contains("tools", "hammer", 1)).expect("add");

        // A category named like an existing product: skipped, not reported.
        let collisions = graph
            .add_edge(contains("hammer", "chisel", 3))
            .expect("add");
        assert!(collisions.is_empty());
        // The name still belongs to the product.
        let named: Vec<Node> = graph
            .nodes()
            .into_iter()
            .filter(|n| n.name() == "hammer")
            .collect();
        assert_eq!(named, vec![product("hammer", 1)]);
    }

    #[test]
    fn collision_case_is_insensitive() {
        let mut graph = Graph::new();
        graph.add_edge(contains("tools", "Hammer", 1)).expect("add");
        let collisions = graph
            .add_edge(contains("tools", "HAMMER", 2))
            .expect("add");
        assert_eq!(
            collisions,
            vec![Collision::NameReused {
                name: "hammer".to_string()
            }]
        );
    }

    #[test]
    fn remove_edge_removes_inverse_and_prunes_isolated_nodes() {
        let mut graph = Graph::new();
        let edge = contains("tools", "hammer", 1);
        graph.add_edge(edge.clone()).expect("add");

        assert!(graph.remove_edge(&edge));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.product_by_id(ProductId(1)), None);
    }

    #[test]
    fn remove_via_the_inverse_direction_also_clears_both() {
        let mut graph = Graph::new();
        let edge = contains("tools", "hammer", 1);
        graph.add_edge(edge.clone()).expect("add");

        assert!(graph.remove_edge(&edge.inverse()));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn remove_edge_keeps_nodes_with_remaining_edges() {
        let mut graph = Graph::new();
        let first = contains("tools", "hammer", 1);
        let second = contains("tools", "wrench", 2);
        graph.add_edge(first.clone()).expect("add");
        graph.add_edge(second).expect("add");

        assert!(graph.remove_edge(&first));
        // The category still touches the second edge.
        assert!(graph.nodes().contains(&Node::category("tools")));
        assert!(!graph.nodes().contains(&product("hammer", 1)));
    }

    #[test]
    fn remove_absent_edge_returns_false() {
        let mut graph = Graph::new();
        assert!(!graph.remove_edge(&contains("tools", "hammer", 1)));
    }

    #[test]
    fn removing_last_edge_of_category_deletes_it_from_enumerations() {
        let mut graph = Graph::new();
        let edge = contains("tools", "hammer", 1);
        graph.add_edge(edge.clone()).expect("add");
        graph.remove_edge(&edge);

        assert!(graph.nodes().is_empty());
        assert!(graph.categories().is_empty());
    }

    #[test]
    fn reset_clears_everything() {
        let mut graph = Graph::new();
        graph.add_edge(contains("tools", "hammer", 1)).expect("add");
        graph.reset();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.product_by_id(ProductId(1)), None);
    }

    #[test]
    fn nodes_are_ordered_by_name() {
        let mut graph = Graph::new();
        graph.add_edge(contains("zoo", "yak", 1)).expect("add");
        graph.add_edge(contains("apes", "bonobo", 2)).expect("add");

        let names: Vec<String> = graph.nodes().iter().map(|n| n.name().to_string()).collect();
        assert_eq!(names, vec!["apes", "bonobo", "yak", "zoo"]);
    }

    #[test]
    fn edges_are_ordered_by_sort_key_then_relation_order() {
        let mut graph = Graph::new();
        graph
            .add_edge(Edge::new(
                product("b", 2),
                Relation::SuccessorOf,
                product("a", 1),
            ))
            .expect("add");
        graph.add_edge(contains("tools", "a", 1)).expect("add");

        let rendered: Vec<(String, String, u8)> = graph
            .edges()
            .iter()
            .map(|e| (e.source.sort_key(), e.target.sort_key(), e.relation.order()))
            .collect();
        let mut expected = rendered.clone();
        expected.sort();
        assert_eq!(rendered, expected);
        assert_eq!(graph.edges().len(), 4);
    }

    #[test]
    fn outgoing_edges_filters_by_source_and_relation() {
        let mut graph = Graph::new();
        let category = Node::category("tools");
        graph.add_edge(contains("tools", "hammer", 1)).expect("add");
        graph.add_edge(contains("tools", "wrench", 2)).expect("add");

        assert_eq!(graph.outgoing_edges(&category).count(), 2);
        assert_eq!(
            graph
                .outgoing_edges_with(&category, Relation::Contains)
                .count(),
            2
        );
        assert_eq!(
            graph
                .outgoing_edges_with(&category, Relation::ContainedIn)
                .count(),
            0
        );
    }
}
