//! Ingest boundary - the statement-event sink
//!
//! Streaming producers (parsers, translators) hand the store a sequence
//! of statement events, each carrying four term descriptions and an
//! optional origin. The sink interns the terms, applies the structural
//! checks, inserts, and reports one outcome per event; duplicates are a
//! reported outcome, not an error.
//!
//! Terms the store cannot use as-is are rejected with distinguishable
//! errors: an IRI without a scheme is `UnresolvedIri`, and a description
//! carrying both a datatype and a language tag is `InvalidTerm`.
//!
//! The sink also carries the default-graph override applied when an
//! event has no graph in scope.

use crate::error::{Result, StoreError};
use crate::store::Store;
use smallvec::SmallVec;
use stele_core::{Caret, Node, NodeKind, NodeSpec};

/// Owned description of one term, as produced by a streaming source
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TermSpec {
    /// Term kind
    pub kind: NodeKind,
    /// Term text
    pub text: String,
    /// Datatype IRI for typed literals
    pub datatype: Option<String>,
    /// Language tag for tagged literals
    pub language: Option<String>,
}

impl TermSpec {
    /// An IRI term
    pub fn uri(text: impl Into<String>) -> Self {
        TermSpec {
            kind: NodeKind::Uri,
            text: text.into(),
            datatype: None,
            language: None,
        }
    }

    /// A prefixed-name term
    pub fn curie(text: impl Into<String>) -> Self {
        TermSpec {
            kind: NodeKind::Curie,
            text: text.into(),
            datatype: None,
            language: None,
        }
    }

    /// A plain literal term
    pub fn literal(text: impl Into<String>) -> Self {
        TermSpec {
            kind: NodeKind::Literal,
            text: text.into(),
            datatype: None,
            language: None,
        }
    }

    /// A typed literal term
    pub fn typed_literal(text: impl Into<String>, datatype: impl Into<String>) -> Self {
        TermSpec {
            kind: NodeKind::Literal,
            text: text.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    /// A language-tagged literal term
    pub fn tagged_literal(text: impl Into<String>, language: impl Into<String>) -> Self {
        TermSpec {
            kind: NodeKind::Literal,
            text: text.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }

    /// A blank-node term
    pub fn blank(text: impl Into<String>) -> Self {
        TermSpec {
            kind: NodeKind::Blank,
            text: text.into(),
            datatype: None,
            language: None,
        }
    }
}

/// Origin of one event: document identifier plus line/column
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Origin {
    /// Source document IRI
    pub document: String,
    /// 1-based line
    pub line: u32,
    /// 1-based column
    pub column: u32,
}

/// One statement event from a streaming source
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatementEvent {
    /// Subject description
    pub subject: TermSpec,
    /// Predicate description
    pub predicate: TermSpec,
    /// Object description
    pub object: TermSpec,
    /// Graph description, if the source has one in scope
    pub graph: Option<TermSpec>,
    /// Provenance, if the source tracks it
    pub origin: Option<Origin>,
}

/// Per-event result of a successful push
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkOutcome {
    /// The statement was new and is now stored
    Inserted,
    /// The statement was already present; nothing changed
    Duplicate,
}

/// Push-based insertion sink over a mutably borrowed store
#[derive(Debug)]
pub struct StatementSink<'a> {
    store: &'a mut Store,
    default_graph: Option<TermSpec>,
}

impl<'a> StatementSink<'a> {
    /// Create a sink feeding the given store
    pub fn new(store: &'a mut Store) -> Self {
        StatementSink {
            store,
            default_graph: None,
        }
    }

    /// Set the graph applied to events that carry none
    pub fn with_default_graph(mut self, graph: TermSpec) -> Self {
        self.default_graph = Some(graph);
        self
    }

    /// Replace or clear the default-graph override
    pub fn set_default_graph(&mut self, graph: Option<TermSpec>) {
        self.default_graph = graph;
    }

    /// The store behind this sink
    pub fn store(&self) -> &Store {
        self.store
    }

    /// Process one event: intern, validate, insert.
    ///
    /// Returns `Inserted` or `Duplicate`; validation failures come back
    /// as errors and leave the store unchanged.
    pub fn push(&mut self, event: StatementEvent) -> Result<SinkOutcome> {
        let mut scratch: SmallVec<[Node; 6]> = SmallVec::new();
        let result = self.push_inner(&event, &mut scratch);
        for node in &scratch {
            self.store.nodes().release(node);
        }
        result
    }

    fn push_inner(
        &mut self,
        event: &StatementEvent,
        scratch: &mut SmallVec<[Node; 6]>,
    ) -> Result<SinkOutcome> {
        let s = self.resolve(&event.subject, scratch)?;
        let p = self.resolve(&event.predicate, scratch)?;
        let o = self.resolve(&event.object, scratch)?;
        let g = match event.graph.as_ref().or(self.default_graph.as_ref()) {
            Some(spec) => Some(self.resolve(spec, scratch)?),
            None => None,
        };
        let caret = match &event.origin {
            Some(origin) => {
                let doc = self.store.nodes().intern(NodeSpec::uri(&origin.document));
                scratch.push(doc.clone());
                Some(Caret::new(doc, origin.line, origin.column))
            }
            None => None,
        };

        match self.store.insert(s, p, o, g, caret) {
            Ok(()) => Ok(SinkOutcome::Inserted),
            Err(StoreError::Duplicate) => Ok(SinkOutcome::Duplicate),
            Err(e) => Err(e),
        }
    }

    /// Intern one term description, tracking the handle in `scratch` so
    /// the sink's temporary reference is released after the insert.
    fn resolve(&self, spec: &TermSpec, scratch: &mut SmallVec<[Node; 6]>) -> Result<Node> {
        if spec.datatype.is_some() && spec.language.is_some() {
            return Err(StoreError::invalid_term(format!(
                "\"{}\" has both a datatype and a language tag",
                spec.text
            )));
        }
        if (spec.datatype.is_some() || spec.language.is_some()) && spec.kind != NodeKind::Literal
        {
            return Err(StoreError::invalid_term(format!(
                "{} node \"{}\" cannot carry literal meta",
                spec.kind, spec.text
            )));
        }
        if spec.kind == NodeKind::Uri && !has_scheme(&spec.text) {
            return Err(StoreError::unresolved_iri(&spec.text));
        }

        let nodes = self.store.nodes();
        let node = if let Some(datatype) = &spec.datatype {
            if !has_scheme(datatype) {
                return Err(StoreError::unresolved_iri(datatype));
            }
            let dt = nodes.intern(NodeSpec::uri(datatype));
            scratch.push(dt.clone());
            nodes.intern(NodeSpec::typed_literal(&spec.text, &dt))
        } else if let Some(language) = &spec.language {
            let tag = nodes.intern(NodeSpec::literal(language));
            scratch.push(tag.clone());
            nodes.intern(NodeSpec::tagged_literal(&spec.text, &tag))
        } else {
            nodes.intern(NodeSpec {
                kind: spec.kind,
                text: &spec.text,
                meta: None,
            })
        };
        scratch.push(node.clone());
        Ok(node)
    }
}

/// RFC 3986 scheme check: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"
fn has_scheme(text: &str) -> bool {
    let mut bytes = text.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() => {}
        _ => return false,
    }
    for b in bytes {
        match b {
            b':' => return true,
            b if b.is_ascii_alphanumeric() => {}
            b'+' | b'-' | b'.' => {}
            _ => return false,
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreFlags;
    use stele_core::IndexOrder;

    fn event(s: &str, p: &str, o: TermSpec) -> StatementEvent {
        StatementEvent {
            subject: TermSpec::uri(s),
            predicate: TermSpec::uri(p),
            object: o,
            graph: None,
            origin: None,
        }
    }

    #[test]
    fn test_push_inserts_and_reports_duplicates() {
        let mut store = Store::new(IndexOrder::Spo, StoreFlags::new());
        let mut sink = StatementSink::new(&mut store);

        let ev = event(
            "http://example.org/a",
            "http://example.org/b",
            TermSpec::literal("c"),
        );
        assert_eq!(sink.push(ev.clone()).unwrap(), SinkOutcome::Inserted);
        assert_eq!(sink.push(ev).unwrap(), SinkOutcome::Duplicate);

        assert_eq!(store.size(), 1);
    }

    #[test]
    fn test_temporary_references_released() {
        let mut store = Store::new(IndexOrder::Spo, StoreFlags::new());
        let mut sink = StatementSink::new(&mut store);

        sink.push(event(
            "http://example.org/a",
            "http://example.org/b",
            TermSpec::typed_literal("5", "http://www.w3.org/2001/XMLSchema#integer"),
        ))
        .unwrap();

        // Only the statement's own references remain
        let s = store
            .nodes()
            .existing(NodeSpec::uri("http://example.org/a"))
            .unwrap();
        assert_eq!(store.nodes().refs(&s), 1);
    }

    #[test]
    fn test_relative_iri_rejected() {
        let mut store = Store::new(IndexOrder::Spo, StoreFlags::new());
        let mut sink = StatementSink::new(&mut store);

        let err = sink
            .push(event(
                "relative/path",
                "http://example.org/b",
                TermSpec::literal("c"),
            ))
            .unwrap_err();
        assert_eq!(err, StoreError::UnresolvedIri("relative/path".into()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_meta_conflict_rejected() {
        let mut store = Store::new(IndexOrder::Spo, StoreFlags::new());
        let mut sink = StatementSink::new(&mut store);

        let bad = TermSpec {
            kind: NodeKind::Literal,
            text: "x".into(),
            datatype: Some("http://www.w3.org/2001/XMLSchema#string".into()),
            language: Some("en".into()),
        };
        let err = sink
            .push(event("http://example.org/a", "http://example.org/b", bad))
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidTerm(_)));
    }

    #[test]
    fn test_structural_violation_propagates() {
        let mut store = Store::new(IndexOrder::Spo, StoreFlags::new());
        let mut sink = StatementSink::new(&mut store);

        let ev = StatementEvent {
            subject: TermSpec::uri("http://example.org/a"),
            predicate: TermSpec::blank("b0"),
            object: TermSpec::literal("c"),
            graph: None,
            origin: None,
        };
        assert!(matches!(
            sink.push(ev).unwrap_err(),
            StoreError::Statement(_)
        ));
        assert!(store.is_empty());
        assert_eq!(store.nodes().size(), 0);
    }

    #[test]
    fn test_default_graph_override() {
        let mut store = Store::new(IndexOrder::Gspo, StoreFlags::new().with_graphs());
        let mut sink = StatementSink::new(&mut store)
            .with_default_graph(TermSpec::uri("http://example.org/defaults"));

        sink.push(event(
            "http://example.org/a",
            "http://example.org/b",
            TermSpec::literal("c"),
        ))
        .unwrap();

        // Explicit graph wins over the override
        let mut explicit = event(
            "http://example.org/a",
            "http://example.org/b",
            TermSpec::literal("d"),
        );
        explicit.graph = Some(TermSpec::uri("http://example.org/named"));
        sink.push(explicit).unwrap();

        let default_g = store
            .nodes()
            .existing(NodeSpec::uri("http://example.org/defaults"))
            .unwrap();
        let named_g = store
            .nodes()
            .existing(NodeSpec::uri("http://example.org/named"))
            .unwrap();
        assert_eq!(store.count(None, None, None, Some(&default_g)), 1);
        assert_eq!(store.count(None, None, None, Some(&named_g)), 1);
    }

    #[test]
    fn test_origin_becomes_caret() {
        let mut store = Store::new(IndexOrder::Spo, StoreFlags::new().with_carets());
        let mut sink = StatementSink::new(&mut store);

        let mut ev = event(
            "http://example.org/a",
            "http://example.org/b",
            TermSpec::literal("c"),
        );
        ev.origin = Some(Origin {
            document: "file:///data.ttl".into(),
            line: 8,
            column: 2,
        });
        sink.push(ev).unwrap();

        let cursor = store.begin();
        let caret = cursor.get(&store).unwrap().caret().unwrap().clone();
        assert_eq!(caret.document().text(), "file:///data.ttl");
        assert_eq!(caret.line(), 8);
        assert_eq!(caret.column(), 2);
    }

    #[test]
    fn test_has_scheme() {
        assert!(has_scheme("http://example.org/x"));
        assert!(has_scheme("urn:isbn:12345"));
        assert!(has_scheme("file:///tmp/x"));
        assert!(has_scheme("a+b-c.d:rest"));
        assert!(!has_scheme("relative/path"));
        assert!(!has_scheme("#fragment"));
        assert!(!has_scheme("0bad:scheme"));
        assert!(!has_scheme(""));
        assert!(!has_scheme("no-colon"));
    }
}
