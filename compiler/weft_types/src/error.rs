//! Errors for declaration, promotion, and binding.
//!
//! All errors are values returned to the caller at the point of use:
//! declaration time for [`DeclError`], resolution time for
//! [`PromotionError`], literal-construction time for [`BindError`]. Each
//! converts to a `weft_diagnostic::Diagnostic` for reporting.

use weft_diagnostic::{Diagnostic, ErrorCode};
use weft_ir::{Name, Span, StringInterner};

use crate::AccessPath;

/// Declaration-time error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclError {
    /// A type with this name was already declared.
    DuplicateType {
        name: Name,
        span: Span,
        /// Span of the earlier declaration.
        previous: Span,
    },
    /// A union declared direct fields; unions only compose embeds.
    UnionWithDirectFields {
        name: Name,
        /// The first offending field.
        field: Name,
        span: Span,
    },
    /// Two direct fields of one type share a name, or a field shares its
    /// name with an embedded member's type (which would alias the member's
    /// storage slot).
    DuplicateField {
        type_name: Name,
        field: Name,
        span: Span,
    },
    /// The same member type is embedded twice in one type. Member storage
    /// is addressed by the member's type name, so a second embed would
    /// alias the first.
    DuplicateEmbed {
        type_name: Name,
        member: Name,
        span: Span,
    },
}

impl DeclError {
    /// Convert to a diagnostic.
    pub fn to_diagnostic(&self, interner: &StringInterner) -> Diagnostic {
        match self {
            DeclError::DuplicateType {
                name,
                span,
                previous,
            } => {
                let name_str = interner.lookup(*name);
                Diagnostic::error(ErrorCode::E1001)
                    .with_message(format!("type `{name_str}` is declared twice"))
                    .with_label(*span, "redeclared here")
                    .with_secondary_label(*previous, "first declared here")
            }
            DeclError::UnionWithDirectFields { name, field, span } => {
                let name_str = interner.lookup(*name);
                let field_str = interner.lookup(*field);
                Diagnostic::error(ErrorCode::E1002)
                    .with_message(format!(
                        "union `{name_str}` declares direct field `{field_str}`"
                    ))
                    .with_label(*span, "unions may only embed members")
                    .with_suggestion(format!(
                        "move `{field_str}` into a struct and embed that struct in `{name_str}`"
                    ))
            }
            DeclError::DuplicateField {
                type_name,
                field,
                span,
            } => {
                let type_str = interner.lookup(*type_name);
                let field_str = interner.lookup(*field);
                Diagnostic::error(ErrorCode::E1003)
                    .with_message(format!(
                        "field `{field_str}` is declared twice in `{type_str}`"
                    ))
                    .with_label(*span, "duplicate field")
            }
            DeclError::DuplicateEmbed {
                type_name,
                member,
                span,
            } => {
                let type_str = interner.lookup(*type_name);
                let member_str = interner.lookup(*member);
                Diagnostic::error(ErrorCode::E1004)
                    .with_message(format!(
                        "`{type_str}` embeds `{member_str}` twice"
                    ))
                    .with_label(*span, "duplicate embed")
                    .with_suggestion(format!(
                        "embed `{member_str}` once, or declare a named field of type \
                         `{member_str}` instead"
                    ))
            }
        }
    }
}

/// Promotion-resolution error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromotionError {
    /// The embeds relation revisited a type already on the current path.
    Cycle {
        /// The offending traversal, first repeated type at both ends.
        path: Vec<Name>,
        /// The embed declaration closing the cycle.
        span: Span,
    },
    /// An embedded member's type was never declared.
    UnknownType { name: Name, span: Span },
    /// An external name is reachable via two or more same-depth paths.
    ///
    /// The resolver records ambiguous names in the table rather than
    /// failing; this error exists as a diagnostic for consumers that want
    /// to surface unused ambiguities eagerly.
    AmbiguousName {
        type_name: Name,
        name: Name,
        candidates: Vec<AccessPath>,
    },
}

impl PromotionError {
    /// Convert to a diagnostic.
    pub fn to_diagnostic(&self, interner: &StringInterner) -> Diagnostic {
        match self {
            PromotionError::Cycle { path, span } => {
                let rendered: Vec<&str> = path.iter().map(|&n| interner.lookup(n)).collect();
                Diagnostic::error(ErrorCode::E2001)
                    .with_message(format!("cyclic embedding: {}", rendered.join(" -> ")))
                    .with_label(*span, "this embed closes the cycle")
                    .with_suggestion("break the cycle with a named field instead of an embed")
            }
            PromotionError::UnknownType { name, span } => {
                let name_str = interner.lookup(*name);
                Diagnostic::error(ErrorCode::E2002)
                    .with_message(format!("embedded type `{name_str}` is not declared"))
                    .with_label(*span, "unknown type")
            }
            PromotionError::AmbiguousName {
                type_name,
                name,
                candidates,
            } => {
                let type_str = interner.lookup(*type_name);
                let name_str = interner.lookup(*name);
                let mut diag = Diagnostic::warning(ErrorCode::E2003).with_message(format!(
                    "`{name_str}` is promoted ambiguously on `{type_str}`"
                ));
                for path in candidates {
                    diag = diag.with_note(format!("reachable as `{}`", path.display(interner)));
                }
                diag.with_suggestion(
                    "literals using this name will fail; qualify the member explicitly",
                )
            }
        }
    }
}

/// Literal-binding error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindError {
    /// The key names no promoted field of the target type.
    UnknownField {
        type_name: Name,
        name: Name,
        span: Span,
        /// External names the table does resolve.
        available: Vec<Name>,
    },
    /// The key names an ambiguously promoted field.
    AmbiguousField {
        type_name: Name,
        name: Name,
        span: Span,
        /// Every colliding access path.
        candidates: Vec<AccessPath>,
    },
    /// A key addressing an embedded member carried a value that is not a
    /// struct literal of that member's type.
    InvalidMemberLiteral {
        type_name: Name,
        member: Name,
        name: Name,
        span: Span,
    },
    /// Resolving an embedded member's own table failed.
    Promotion(PromotionError),
}

impl From<PromotionError> for BindError {
    fn from(err: PromotionError) -> Self {
        BindError::Promotion(err)
    }
}

impl BindError {
    /// Convert to a diagnostic with fix suggestions.
    pub fn to_diagnostic(&self, interner: &StringInterner) -> Diagnostic {
        match self {
            BindError::UnknownField {
                type_name,
                name,
                span,
                available,
            } => {
                let type_str = interner.lookup(*type_name);
                let name_str = interner.lookup(*name);
                let mut diag = Diagnostic::error(ErrorCode::E3001)
                    .with_message(format!("unknown field `{name_str}` on `{type_str}`"))
                    .with_label(*span, "not a promoted field");
                if !available.is_empty() {
                    let names: Vec<&str> =
                        available.iter().map(|&n| interner.lookup(n)).collect();
                    diag = diag.with_note(format!("available fields: {}", names.join(", ")));
                }
                diag
            }
            BindError::AmbiguousField {
                type_name,
                name,
                span,
                candidates,
            } => {
                let type_str = interner.lookup(*type_name);
                let name_str = interner.lookup(*name);
                let mut diag = Diagnostic::error(ErrorCode::E3002)
                    .with_message(format!("field `{name_str}` is ambiguous on `{type_str}`"))
                    .with_label(*span, "promoted from more than one member");
                for path in candidates {
                    diag = diag.with_note(format!("candidate: `{}`", path.display(interner)));
                }
                let member = candidates
                    .first()
                    .and_then(|p| p.steps().first())
                    .map_or("Member", |&n| interner.lookup(n));
                diag.with_suggestion(format!(
                    "qualify the member explicitly, e.g. `{member}: {member}{{..}}`"
                ))
            }
            BindError::InvalidMemberLiteral {
                type_name,
                member,
                name,
                span,
            } => {
                let type_str = interner.lookup(*type_name);
                let member_str = interner.lookup(*member);
                let name_str = interner.lookup(*name);
                Diagnostic::error(ErrorCode::E3003)
                    .with_message(format!(
                        "`{name_str}` names the embedded member `{member_str}` of `{type_str}` \
                         and must be assigned a `{member_str}{{..}}` literal"
                    ))
                    .with_label(*span, format!("expected a `{member_str}` literal"))
            }
            BindError::Promotion(err) => err.to_diagnostic(interner),
        }
    }
}

#[cfg(test)]
mod tests {
    use weft_ir::StringInterner;

    use super::*;

    #[test]
    fn unknown_field_diagnostic_lists_available() {
        let interner = StringInterner::new();
        let err = BindError::UnknownField {
            type_name: interner.intern("Auto"),
            name: interner.intern("Wheel"),
            span: Span::new(3, 8),
            available: vec![interner.intern("Category"), interner.intern("Type")],
        };

        let diag = err.to_diagnostic(&interner);
        assert_eq!(diag.code, ErrorCode::E3001);
        assert!(diag.message.contains("Wheel"));
        assert!(diag.notes[0].contains("Category, Type"));
    }

    #[test]
    fn ambiguous_field_diagnostic_suggests_qualified_form() {
        let interner = StringInterner::new();
        let motor = interner.intern("Motor");
        let err = BindError::AmbiguousField {
            type_name: interner.intern("Auto"),
            name: interner.intern("Serial"),
            span: Span::DUMMY,
            candidates: vec![
                AccessPath::from_step(motor).child(interner.intern("Serial")),
                AccessPath::from_step(interner.intern("Chassis")).child(interner.intern("Serial")),
            ],
        };

        let diag = err.to_diagnostic(&interner);
        assert_eq!(diag.code, ErrorCode::E3002);
        assert_eq!(diag.notes.len(), 2);
        assert!(diag.suggestions[0].contains("Motor: Motor{..}"));
    }

    #[test]
    fn cycle_diagnostic_renders_path() {
        let interner = StringInterner::new();
        let err = PromotionError::Cycle {
            path: vec![
                interner.intern("A"),
                interner.intern("B"),
                interner.intern("A"),
            ],
            span: Span::DUMMY,
        };

        let diag = err.to_diagnostic(&interner);
        assert_eq!(diag.code, ErrorCode::E2001);
        assert!(diag.message.contains("A -> B -> A"));
    }
}
