//! Type representation for the Sextant semantic core.
//!
//! [`Type`] is the closed set of types the analysis can compute. Nominal
//! types (`Struct`, `Enum`) point at their declaration node, so every type
//! borrows the syntax tree it was computed from.
//!
//! [`UnresolvedType`] is what raw type syntax turns into before any name in it
//! has been resolved.

mod core;
mod primitive;
mod unresolved;

pub use crate::core::{Type, TypeDisplay};
pub use primitive::PrimitiveType;
pub use unresolved::UnresolvedType;
