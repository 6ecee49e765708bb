//! Weft IR - declaration-graph input types.
//!
//! This crate contains the data structures the promotion core consumes:
//! - Spans for source locations
//! - Names for interned identifiers
//! - Type declarations (structs, unions, embedded members)
//! - Literal key/value pairs for struct construction
//!
//! Declarations arrive here already parsed; parsing itself lives in a
//! separate stage. Everything is plain immutable data with Clone, Eq, and
//! Hash, so declarations can serve as memoization keys.
//!
//! Strings are interned (`Name(u32)`) for O(1) equality and compact storage.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod decl;
mod interner;
mod name;
mod span;

pub use decl::{EmbedDecl, FieldDecl, FieldInit, LiteralValue, TypeDecl, TypeKind, TypeRef};
pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
pub use span::Span;
