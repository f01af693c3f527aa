//! References from use sites to declarations.
//!
//! Every reference-bearing node kind has its own [`ResolveReference`]
//! implementation producing a verbose [`ResolveResult`]. The collapsed
//! [`Reference::resolve`] view is defined once, on the [`Reference`] wrapper,
//! so all callers observe the same collapsing rule.

pub mod member;
pub mod path;
pub mod scope;

use std::cell::OnceCell;

use sextant_source::TextRange;
use sextant_syntax::common::create_span;
use sextant_syntax::{Node, SyntaxKind};

use crate::db::Analysis;
use crate::error::AnalysisError;
pub use member::{FieldReference, MethodCallReference};
pub use path::{PathReference, StructLiteralReference, TypePathReference};

/// Outcome of one resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveResult<'t> {
    Resolved(Node<'t>),
    /// A qualified path whose prefix resolved (to the carried declaration)
    /// but whose last segment did not.
    Partial(Node<'t>),
    /// Several declarations in the same scope match.
    Ambiguous(Vec<Node<'t>>),
    Unresolved,
}

impl<'t> ResolveResult<'t> {
    /// Build a result from the candidates of the nearest scope.
    pub fn from_candidates(mut candidates: Vec<Node<'t>>) -> Self {
        match candidates.len() {
            0 => ResolveResult::Unresolved,
            1 => ResolveResult::Resolved(candidates.remove(0)),
            _ => ResolveResult::Ambiguous(candidates),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolveResult::Resolved(_))
    }
}

/// One kind of named reference.
pub trait ResolveReference<'t> {
    /// The node carrying the reference.
    fn element(&self) -> Node<'t>;

    /// The sub-node naming the target; a direct child of the element, or the
    /// element itself when that is a single token.
    fn anchor(&self) -> Node<'t>;

    fn resolve_verbose(&self, db: &Analysis<'t>) -> ResolveResult<'t>;
}

#[derive(Debug, Clone)]
pub enum ReferenceKind<'t> {
    Path(PathReference<'t>),
    TypePath(TypePathReference<'t>),
    StructLiteral(StructLiteralReference<'t>),
    Field(FieldReference<'t>),
    MethodCall(MethodCallReference<'t>),
}

impl<'t> ReferenceKind<'t> {
    /// The reference carried by `node`, chosen by its syntax kind.
    pub fn of(node: Node<'t>) -> Option<Self> {
        let kind = match SyntaxKind::of(node) {
            SyntaxKind::PathExpr => ReferenceKind::Path(PathReference::new(node)),
            SyntaxKind::PathType => ReferenceKind::TypePath(TypePathReference::new(node)),
            SyntaxKind::StructExpr => ReferenceKind::StructLiteral(StructLiteralReference::new(node)?),
            SyntaxKind::FieldExpr => ReferenceKind::Field(FieldReference::new(node)?),
            SyntaxKind::MethodCallExpr => ReferenceKind::MethodCall(MethodCallReference::new(node)?),
            _ => return None,
        };
        Some(kind)
    }

    fn inner(&self) -> &dyn ResolveReference<'t> {
        match self {
            ReferenceKind::Path(r) => r,
            ReferenceKind::TypePath(r) => r,
            ReferenceKind::StructLiteral(r) => r,
            ReferenceKind::Field(r) => r,
            ReferenceKind::MethodCall(r) => r,
        }
    }
}

impl<'t> ResolveReference<'t> for ReferenceKind<'t> {
    fn element(&self) -> Node<'t> {
        self.inner().element()
    }

    fn anchor(&self) -> Node<'t> {
        self.inner().anchor()
    }

    fn resolve_verbose(&self, db: &Analysis<'t>) -> ResolveResult<'t> {
        self.inner().resolve_verbose(db)
    }
}

/// A reference bound to an analysis context.
///
/// The verbose result is computed on first use and kept for the lifetime of
/// this value only.
pub struct Reference<'a, 't> {
    db: &'a Analysis<'t>,
    kind: ReferenceKind<'t>,
    result: OnceCell<ResolveResult<'t>>,
}

impl<'a, 't> Reference<'a, 't> {
    pub fn new(db: &'a Analysis<'t>, kind: ReferenceKind<'t>) -> Self {
        Self {
            db,
            kind,
            result: OnceCell::new(),
        }
    }

    pub fn of(db: &'a Analysis<'t>, node: Node<'t>) -> Option<Self> {
        ReferenceKind::of(node).map(|kind| Self::new(db, kind))
    }

    pub fn kind(&self) -> &ReferenceKind<'t> {
        &self.kind
    }

    pub fn element(&self) -> Node<'t> {
        self.kind.element()
    }

    pub fn anchor(&self) -> Node<'t> {
        self.kind.anchor()
    }

    pub fn resolve_verbose(&self) -> ResolveResult<'t> {
        self.result
            .get_or_init(|| {
                let result = self.kind.resolve_verbose(self.db);
                match &result {
                    ResolveResult::Resolved(_) => {}
                    ResolveResult::Ambiguous(candidates) => log::debug!(
                        "`{}` at {} is ambiguous between {} declarations",
                        self.db.text(self.anchor()),
                        self.db.tree().describe(self.element()),
                        candidates.len()
                    ),
                    _ => log::debug!(
                        "`{}` at {} does not resolve",
                        self.db.text(self.anchor()),
                        self.db.tree().describe(self.element())
                    ),
                }
                result
            })
            .clone()
    }

    /// The declaration this reference denotes, if resolution succeeded.
    pub fn resolve(&self) -> Option<Node<'t>> {
        match self.resolve_verbose() {
            ResolveResult::Resolved(decl) => Some(decl),
            _ => None,
        }
    }

    /// Range of the anchor, relative to the start of the element.
    pub fn try_range_in_element(&self) -> Result<TextRange, AnalysisError> {
        anchor_range(self.db, self.element(), self.anchor())
    }

    /// Like [`try_range_in_element`](Self::try_range_in_element), but a
    /// detached anchor panics.
    pub fn range_in_element(&self) -> TextRange {
        match self.try_range_in_element() {
            Ok(range) => range,
            Err(defect) => panic!("{defect}"),
        }
    }
}

fn anchor_range<'t>(db: &Analysis<'t>, element: Node<'t>, anchor: Node<'t>) -> Result<TextRange, AnalysisError> {
    let is_leaf = anchor == element && element.named_child_count() == 0;
    if is_leaf || anchor.parent() == Some(element) {
        return Ok(db.tree().range(anchor).relative_to(element.start_byte()));
    }
    Err(AnalysisError::DetachedAnchor {
        element_kind: element.kind().to_string(),
        element_text: db.text(element).to_string(),
        anchor_text: db.text(anchor).to_string(),
        location: db.tree().describe(element),
        span: create_span(&anchor),
    })
}
