use tree_sitter::Node;

use crate::primitive::PrimitiveType;

/// A type read off raw type syntax, before any path in it is resolved.
///
/// The nodes are the original type syntax; turning this into a
/// [`Type`](crate::Type) means resolving them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedType<'t> {
    Unknown,
    /// `()` in type position
    Unit,
    Primitive(PrimitiveType),
    /// Element type nodes of `(A, B, ..)`
    Tuple(Vec<Node<'t>>),
    /// A type path such as `S`, `m::S` or `Self`
    Path(Node<'t>),
    /// `&T` / `&mut T`, with the node of `T`
    Reference {
        mutable: bool,
        referenced: Node<'t>,
    },
}

impl UnresolvedType<'_> {
    pub fn is_unknown(&self) -> bool {
        matches!(self, UnresolvedType::Unknown)
    }
}
