//! Field promotion and literal resolution for Weft.
//!
//! Embedded (anonymous) members make their fields reachable at the
//! enclosing type's level. This crate computes, for every declared type,
//! the *promoted-field table*: which external name reaches which storage
//! location, at which embedding depth — and then binds struct-literal
//! key/value pairs against that table into an instantiation plan the value
//! constructor can execute.
//!
//! Pipeline: [`TypeGraph`] → [`Resolver`] → [`PromotedTable`] (cached in a
//! [`PromotionCache`]) → [`Binder`] → [`InstantiationPlan`].
//!
//! Tables are pure functions of the immutable declarations, so they are
//! computed once per type and shared. Every failure is a value returned to
//! the caller; nothing here panics on malformed input.

mod bind;
mod error;
mod graph;
mod path;
mod promote;

pub use bind::{Binder, InstantiationPlan, PlanEntry, PlanValue};
pub use error::{BindError, DeclError, PromotionError};
pub use graph::TypeGraph;
pub use path::AccessPath;
pub use promote::{PromotedField, PromotedKind, PromotedTable, PromotionCache, Resolution, Resolver};
