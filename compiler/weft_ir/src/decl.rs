//! Type declarations and literal input.
//!
//! A [`TypeDecl`] is the parsed form of a struct or union declaration: its
//! direct fields plus its embedded members. Embedded members are unnamed;
//! their fields become reachable at the enclosing type's level through
//! promotion, optionally under a declared prefix.
//!
//! Declarations are immutable once created. The promotion core treats them
//! as pure data and derives everything else from them.

use crate::{Name, Span};

/// Reference to a type by name.
///
/// Field types are opaque to the promotion core: only embedded members are
/// traversed, so a `TypeRef` on a field never needs resolving here.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub name: Name,
}

impl TypeRef {
    /// Create a reference to the named type.
    #[inline]
    pub const fn new(name: Name) -> Self {
        TypeRef { name }
    }
}

/// A direct, non-embedded field of a struct.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldDecl {
    /// Field name.
    pub name: Name,

    /// Declared field type.
    pub ty: TypeRef,

    /// Source location of the field declaration.
    pub span: Span,
}

/// An embedded (anonymous) member of a struct or union.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EmbedDecl {
    /// The embedded member's type.
    pub member: TypeRef,

    /// Declared alias prepended to every field promoted from the member.
    /// `None` promotes field names unchanged (standard embedding).
    pub prefix: Option<Name>,

    /// Whether this embed was declared inside a `union` type.
    pub union_member: bool,

    /// Source location of the embed declaration.
    pub span: Span,
}

/// The kind of a type declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A struct with direct fields and optional embedded members.
    Struct,

    /// A union: a composition of embedded members and nothing else.
    /// Carries no direct fields; this is enforced at declaration time.
    Union,
}

/// A declared struct or union type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeDecl {
    /// Type name.
    pub name: Name,

    /// Struct or union.
    pub kind: TypeKind,

    /// Direct fields, in declaration order. Always empty for unions.
    pub fields: Vec<FieldDecl>,

    /// Embedded members, in declaration order.
    pub embeds: Vec<EmbedDecl>,

    /// Source location of the declaration.
    pub span: Span,
}

impl TypeDecl {
    /// Whether this declaration is a union.
    #[inline]
    pub fn is_union(&self) -> bool {
        self.kind == TypeKind::Union
    }
}

/// A literal value supplied for one key of a struct literal.
///
/// Scalar payloads are representative, not exhaustive: the binder treats
/// them as opaque except for [`LiteralValue::Struct`], which drives the
/// qualified full-substructure form (`Motor: Motor{..}`).
///
/// Floats are deliberately absent; the promotion core never inspects scalar
/// payloads, and keeping `Eq`/`Hash` derivable keeps plans usable as
/// memoization keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    /// Integer literal.
    Int(i64),

    /// Boolean literal.
    Bool(bool),

    /// String literal (interned).
    Str(Name),

    /// A nested struct literal, e.g. the value in `Motor: Motor{Type:"V8"}`.
    Struct {
        /// The named type of the nested literal.
        ty: Name,
        /// Key/value pairs, in source order.
        fields: Vec<FieldInit>,
    },
}

/// One `key: value` pair of a struct literal, in source order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldInit {
    /// The key as written at the construction site.
    pub name: Name,

    /// The supplied value.
    pub value: LiteralValue,

    /// Source location of the pair.
    pub span: Span,
}
