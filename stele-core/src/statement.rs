//! Statement - the stored unit of data
//!
//! A statement is a subject/predicate/object tuple with an optional graph
//! context and an optional provenance caret. It holds cheap node handles;
//! reference-count bookkeeping against the owning table is the store's
//! job, not the statement's.
//!
//! Structural constraints are enforced by the only constructor:
//! the predicate must not be a literal or blank node, and the subject and
//! graph must not be literals.

use crate::error::{Result, StatementError};
use crate::node::Node;
use crate::order::Field;
use serde::Serialize;
use std::fmt;

/// Provenance of a statement: origin document plus line/column
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Caret {
    document: Node,
    line: u32,
    column: u32,
}

impl Caret {
    /// Create a caret pointing into a source document
    pub fn new(document: Node, line: u32, column: u32) -> Self {
        Caret {
            document,
            line,
            column,
        }
    }

    /// Origin document node
    pub fn document(&self) -> &Node {
        &self.document
    }

    /// 1-based line in the origin document
    pub fn line(&self) -> u32 {
        self.line
    }

    /// 1-based column in the origin document
    pub fn column(&self) -> u32 {
        self.column
    }
}

impl fmt::Display for Caret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.document, self.line, self.column)
    }
}

/// A stored statement: (s, p, o) with optional graph and caret
#[derive(Clone, Debug, Serialize)]
pub struct Statement {
    s: Node,
    p: Node,
    o: Node,
    g: Option<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    caret: Option<Caret>,
}

impl Statement {
    /// Build a statement, enforcing the structural constraints.
    pub fn new(s: Node, p: Node, o: Node, g: Option<Node>) -> Result<Self> {
        Self::check(&s, &p, &o, g.as_ref())?;
        Ok(Statement {
            s,
            p,
            o,
            g,
            caret: None,
        })
    }

    /// Validate the structural constraints without building anything.
    pub fn check(s: &Node, p: &Node, _o: &Node, g: Option<&Node>) -> Result<()> {
        if p.is_literal() {
            return Err(StatementError::LiteralPredicate);
        }
        if p.is_blank() {
            return Err(StatementError::BlankPredicate);
        }
        if s.is_literal() {
            return Err(StatementError::LiteralSubject);
        }
        if g.map_or(false, Node::is_literal) {
            return Err(StatementError::LiteralGraph);
        }
        Ok(())
    }

    /// Attach a provenance caret
    pub fn with_caret(mut self, caret: Caret) -> Self {
        self.caret = Some(caret);
        self
    }

    /// Subject node
    pub fn subject(&self) -> &Node {
        &self.s
    }

    /// Predicate node
    pub fn predicate(&self) -> &Node {
        &self.p
    }

    /// Object node
    pub fn object(&self) -> &Node {
        &self.o
    }

    /// Graph node, if the statement carries one
    pub fn graph(&self) -> Option<&Node> {
        self.g.as_ref()
    }

    /// Provenance caret, if retained
    pub fn caret(&self) -> Option<&Caret> {
        self.caret.as_ref()
    }

    /// Field accessor by position (graph may be absent)
    pub fn field(&self, field: Field) -> Option<&Node> {
        match field {
            Field::Subject => Some(&self.s),
            Field::Predicate => Some(&self.p),
            Field::Object => Some(&self.o),
            Field::Graph => self.g.as_ref(),
        }
    }

    /// Wildcard pattern match: `None` components match anything.
    pub fn matches(
        &self,
        s: Option<&Node>,
        p: Option<&Node>,
        o: Option<&Node>,
        g: Option<&Node>,
    ) -> bool {
        s.map_or(true, |n| *n == self.s)
            && p.map_or(true, |n| *n == self.p)
            && o.map_or(true, |n| *n == self.o)
            && g.map_or(true, |n| self.g.as_ref() == Some(n))
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.g {
            Some(g) => write!(f, "{} {} {} {} .", self.s, self.p, self.o, g),
            None => write!(f, "{} {} {} .", self.s, self.p, self.o),
        }
    }
}
