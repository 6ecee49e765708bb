//! Diagnostic system for rich error reporting.
//!
//! Every error the promotion core produces converts into a [`Diagnostic`]:
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Primary span (where it went wrong)
//! - Context labels (why it's wrong)
//! - Suggestions (how to fix)
//!
//! This crate is output-only: diagnostics are plain values handed back to
//! the enclosing type-checker, which owns rendering and emission.

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
