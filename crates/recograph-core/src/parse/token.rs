//! # Token Parsers
//!
//! Entity tokens and edge specifications.
//!
//! Grammar:
//! - category token: `[a-zA-Z0-9]+`
//! - product token: `name ( id = NUMBER )`, whitespace-tolerant around the
//!   parentheses, `id`, `=` and the digits
//! - edge specification: `SUBJECT RELATION-NAME OBJECT`, parts separated by
//!   one-or-more spaces, leading/trailing whitespace insignificant
//!
//! Any mismatch yields `None` — never a partial value.

use crate::{Edge, Node, ProductId, Relation};

/// Parse a single entity token into a node.
///
/// A bare alphanumeric token is a category; `name(id=NUMBER)` is a product.
/// Ids that do not fit a `u32` are no entity.
#[must_use]
pub fn parse_node(token: &str) -> Option<Node> {
    let mut scanner = Scanner::new(token.trim());
    let node = scanner.node_token()?;
    scanner.at_end().then_some(node)
}

/// Parse a full edge specification.
///
/// The relation name must exactly match one of the six canonical names.
/// Failure of the overall shape, or of either entity token, is no edge.
#[must_use]
pub fn parse_edge(input: &str) -> Option<Edge> {
    let mut scanner = Scanner::new(input.trim());
    let source = scanner.node_token()?;
    scanner.whitespace1()?;
    let relation = Relation::from_name(scanner.word(|c| !c.is_whitespace())).ok()?;
    scanner.whitespace1()?;
    let target = scanner.node_token()?;
    scanner.skip_whitespace();
    scanner.at_end().then(|| Edge::new(source, relation, target))
}

// =============================================================================
// SCANNER
// =============================================================================

/// Cursor over an input token stream.
struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos == self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.rest().chars().next() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    /// Require at least one whitespace character, consuming the run.
    fn whitespace1(&mut self) -> Option<()> {
        let before = self.pos;
        self.skip_whitespace();
        (self.pos > before).then_some(())
    }

    /// Consume the maximal run of characters matching `accept`.
    fn word(&mut self, accept: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.rest().chars().next() {
            if !accept(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.input[start..self.pos]
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.rest().starts_with(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, expected: &str) -> bool {
        if self.rest().starts_with(expected) {
            self.pos += expected.len();
            true
        } else {
            false
        }
    }

    /// Parse an entity token at the cursor: a name, optionally followed by a
    /// parenthesized id group. A `(` that does not open a well-formed id
    /// group fails the token; a name with no group is a category.
    fn node_token(&mut self) -> Option<Node> {
        let name = self.word(|c| c.is_ascii_alphanumeric());
        if name.is_empty() {
            return None;
        }

        let after_name = self.pos;
        self.skip_whitespace();
        if !self.eat('(') {
            // Plain category token; whitespace after the name is not ours.
            self.pos = after_name;
            return Some(Node::category(name));
        }

        self.skip_whitespace();
        if !self.eat_str("id") {
            return None;
        }
        self.skip_whitespace();
        if !self.eat('=') {
            return None;
        }
        self.skip_whitespace();
        let digits = self.word(|c| c.is_ascii_digit());
        if digits.is_empty() {
            return None;
        }
        let id: u32 = digits.parse().ok()?;
        self.skip_whitespace();
        if !self.eat(')') {
            return None;
        }
        Some(Node::product(name, ProductId(id)))
    }
}

// =============================================================================
// TESTS
// =============================================================================
