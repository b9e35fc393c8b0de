//! # Recommendation Expression Parser
//!
//! Recursive descent over the bracketed set-algebra grammar:
//!
//! ```text
//! expr         := union | intersection | final
//! union        := "UNION" "(" expr "," expr ")"
//! intersection := "INTERSECTION" "(" expr "," expr ")"
//! final        := strategy productId
//! strategy     := "S1" | "S2" | "S3"
//! productId    := digit+
//! ```
//!
//! Whitespace (including none) is permitted around every token boundary.
//! The three alternatives are distinguished by their first keyword, so the
//! parser commits in the fixed order UNION, INTERSECTION, final term and
//! fails eagerly at the first mismatch with a specific error.

use crate::term::{Strategy, Term};
use crate::{ProductId, RecographError};

const KEYWORD_UNION: &str = "UNION";
const KEYWORD_INTERSECTION: &str = "INTERSECTION";
const OPEN_PAREN: &str = "(";
const CLOSE_PAREN: &str = ")";

/// Parse a complete recommendation expression.
///
/// The entire input must be consumed; trailing characters fail with
/// [`RecographError::TrailingInput`].
pub fn parse_expression(input: &str) -> Result<Term, RecographError> {
    let mut parser = ExprParser { input, pos: 0 };
    let term = parser.term()?;
    parser.skip_whitespace();
    if parser.pos != input.len() {
        return Err(RecographError::TrailingInput);
    }
    Ok(term)
}

struct ExprParser<'a> {
    input: &'a str,
    pos: usize,
}

impl ExprParser<'_> {
    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.rest().chars().next() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    /// Skip whitespace, then test for a keyword without consuming it.
    fn peek(&mut self, keyword: &str) -> bool {
        self.skip_whitespace();
        self.rest().starts_with(keyword)
    }

    fn term(&mut self) -> Result<Term, RecographError> {
        if self.peek(KEYWORD_UNION) {
            let (left, right) = self.pair(KEYWORD_UNION)?;
            Ok(Term::Union(Box::new(left), Box::new(right)))
        } else if self.peek(KEYWORD_INTERSECTION) {
            let (left, right) = self.pair(KEYWORD_INTERSECTION)?;
            Ok(Term::Intersection(Box::new(left), Box::new(right)))
        } else {
            self.final_term()
        }
    }

    /// `KEYWORD "(" expr "," expr ")"`
    fn pair(&mut self, keyword: &'static str) -> Result<(Term, Term), RecographError> {
        self.keyword(keyword)?;
        self.literal(OPEN_PAREN)?;
        let left = self.term()?;
        self.comma()?;
        let right = self.term()?;
        self.literal(CLOSE_PAREN)?;
        Ok((left, right))
    }

    fn keyword(&mut self, keyword: &'static str) -> Result<(), RecographError> {
        self.skip_whitespace();
        if !self.rest().starts_with(keyword) {
            return Err(RecographError::ExpectedKeyword(keyword));
        }
        self.pos += keyword.len();
        Ok(())
    }

    fn literal(&mut self, literal: &'static str) -> Result<(), RecographError> {
        self.skip_whitespace();
        if !self.rest().starts_with(literal) {
            return Err(RecographError::ExpectedLiteral(literal));
        }
        self.pos += literal.len();
        Ok(())
    }

    fn comma(&mut self) -> Result<(), RecographError> {
        self.skip_whitespace();
        if !self.rest().starts_with(',') {
            return Err(RecographError::ExpectedComma);
        }
        self.pos += 1;
        Ok(())
    }

    fn final_term(&mut self) -> Result<Term, RecographError> {
        let strategy = self.strategy()?;
        let product = self.product_id()?;
        Ok(Term::Final { strategy, product })
    }

    fn strategy(&mut self) -> Result<Strategy, RecographError> {
        self.skip_whitespace();
        for (token, strategy) in [
            ("S1", Strategy::SameCategory),
            ("S2", Strategy::Predecessors),
            ("S3", Strategy::Successors),
        ] {
            if self.rest().starts_with(token) {
                self.pos += token.len();
                return Ok(strategy);
            }
        }
        Err(RecographError::ExpectedStrategy)
    }

    fn product_id(&mut self) -> Result<ProductId, RecographError> {
        self.skip_whitespace();
        let start = self.pos;
        while self.rest().starts_with(|c: char| c.is_ascii_digit()) {
            self.pos += 1;
        }
        let digits = &self.input[start..self.pos];
        if digits.is_empty() {
            return Err(RecographError::ExpectedProductId);
        }
        digits
            .parse()
            .map(ProductId)
            .map_err(|_| RecographError::InvalidProductId)
    }
}

// =============================================================================
// TESTS
// =============================================================================
