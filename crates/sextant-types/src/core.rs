use std::fmt;

use tree_sitter::Node;

use crate::primitive::PrimitiveType;

/// A type computed by the analysis.
///
/// `PartialEq` is structural identity: nominal types compare their
/// declaration nodes, everything else compares its parts, and
/// `Unknown == Unknown`. Use [`Type::matches`] when the question is whether
/// two types are *known* to be the same.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type<'t> {
    /// Nothing could be determined.
    Unknown,
    /// `()`, also the type of a block without a tail expression.
    Unit,
    Primitive(PrimitiveType),
    /// A tuple of any arity. `Tuple(vec![])` is not `Unit`.
    Tuple(Vec<Type<'t>>),
    /// A struct, identified by its declaration.
    Struct(Node<'t>),
    /// An enum, identified by its declaration.
    Enum(Node<'t>),
    /// Parameter types (without `self`) and return type.
    Function(Vec<Type<'t>>, Box<Type<'t>>),
    /// `&T` or `&mut T`
    Reference {
        mutable: bool,
        referenced: Box<Type<'t>>,
    },
}

impl<'t> Type<'t> {
    pub fn function(params: Vec<Type<'t>>, ret: Type<'t>) -> Self {
        Type::Function(params, Box::new(ret))
    }

    pub fn reference(mutable: bool, referenced: Type<'t>) -> Self {
        Type::Reference {
            mutable,
            referenced: Box::new(referenced),
        }
    }

    /// Whether `self` and `other` are known to be the same type.
    ///
    /// Like `==`, except that `Unknown` matches nothing, not even another
    /// `Unknown`, at any depth.
    pub fn matches(&self, other: &Type<'t>) -> bool {
        match (self, other) {
            (Type::Unknown, _) | (_, Type::Unknown) => false,
            (Type::Unit, Type::Unit) => true,
            (Type::Primitive(a), Type::Primitive(b)) => a == b,
            (Type::Tuple(a), Type::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.matches(y))
            }
            (Type::Struct(a), Type::Struct(b)) | (Type::Enum(a), Type::Enum(b)) => a == b,
            (Type::Function(pa, ra), Type::Function(pb, rb)) => {
                pa.len() == pb.len()
                    && pa.iter().zip(pb).all(|(x, y)| x.matches(y))
                    && ra.matches(rb)
            }
            (
                Type::Reference { mutable: ma, referenced: a },
                Type::Reference { mutable: mb, referenced: b },
            ) => ma == mb && a.matches(b),
            _ => false,
        }
    }

    /// Strip every layer of `&`/`&mut`.
    pub fn auto_deref(&self) -> &Type<'t> {
        let mut current = self;
        while let Type::Reference { referenced, .. } = current {
            current = referenced;
        }
        current
    }

    /// The declaration of a struct or enum type.
    pub fn nominal_decl(&self) -> Option<Node<'t>> {
        match self {
            Type::Struct(decl) | Type::Enum(decl) => Some(*decl),
            _ => None,
        }
    }

    /// Render the type, reading nominal names from `source`.
    pub fn display<'a>(&'a self, source: &'a str) -> TypeDisplay<'a, 't> {
        TypeDisplay { ty: self, source }
    }
}

pub struct TypeDisplay<'a, 't> {
    ty: &'a Type<'t>,
    source: &'a str,
}

impl fmt::Display for TypeDisplay<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = self.source;
        match self.ty {
            Type::Unknown => write!(f, "<unknown>"),
            Type::Unit => write!(f, "()"),
            Type::Primitive(p) => write!(f, "{}", p),
            Type::Tuple(elements) => {
                write!(f, "(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element.display(source))?;
                }
                // A one-element tuple keeps its trailing comma.
                if elements.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Type::Struct(decl) | Type::Enum(decl) => {
                let name = decl
                    .child_by_field_name("name")
                    .and_then(|name| name.utf8_text(source.as_bytes()).ok())
                    .unwrap_or("<anonymous>");
                write!(f, "{}", name)
            }
            Type::Function(params, ret) => {
                write!(f, "fn(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param.display(source))?;
                }
                write!(f, ") -> {}", ret.display(source))
            }
            Type::Reference { mutable, referenced } => {
                let prefix = if *mutable { "&mut " } else { "&" };
                write!(f, "{}{}", prefix, referenced.display(source))
            }
        }
    }
}
