//! The type graph: every declared struct/union type, by name.
//!
//! Pure read-mostly store. Declaration-time validation lives here; the
//! embeds relation itself (cycles, unknown member types, promoted-name
//! collisions) is validated lazily by the resolver, so declaration order
//! between mutually referential types does not matter.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use weft_ir::{Name, TypeDecl};

use crate::DeclError;

/// Store of declared types.
///
/// `BTreeMap` keyed by interned name iterates in intern-index order, which
/// is fixed for a given declaration sequence and so keeps everything
/// derived from the graph (tables, plans) reproducible.
#[derive(Clone, Debug, Default)]
pub struct TypeGraph {
    types: BTreeMap<Name, TypeDecl>,
}

impl TypeGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        TypeGraph {
            types: BTreeMap::new(),
        }
    }

    /// Declare a type.
    ///
    /// Rejects duplicate type names, unions carrying direct fields,
    /// duplicate direct field names, the same member type embedded twice,
    /// and a field named like an embedded member's type. Embedded member
    /// types need not be declared yet.
    pub fn declare(&mut self, decl: TypeDecl) -> Result<(), DeclError> {
        if decl.is_union() {
            if let Some(field) = decl.fields.first() {
                return Err(DeclError::UnionWithDirectFields {
                    name: decl.name,
                    field: field.name,
                    span: field.span,
                });
            }
        }

        // Member storage is addressed by the member's type name, so embeds
        // and direct fields share one namespace of storage slots: a second
        // embed of the same type, or a field named like a member, would
        // alias the member's slot.
        let mut seen = FxHashSet::default();
        for embed in &decl.embeds {
            if !seen.insert(embed.member.name) {
                return Err(DeclError::DuplicateEmbed {
                    type_name: decl.name,
                    member: embed.member.name,
                    span: embed.span,
                });
            }
        }
        for field in &decl.fields {
            if !seen.insert(field.name) {
                return Err(DeclError::DuplicateField {
                    type_name: decl.name,
                    field: field.name,
                    span: field.span,
                });
            }
        }

        if let Some(previous) = self.types.get(&decl.name) {
            return Err(DeclError::DuplicateType {
                name: decl.name,
                span: decl.span,
                previous: previous.span,
            });
        }

        self.types.insert(decl.name, decl);
        Ok(())
    }

    /// Look up a declaration by name.
    pub fn lookup(&self, name: Name) -> Option<&TypeDecl> {
        self.types.get(&name)
    }

    /// Iterate over all declarations, ordered by intern index.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types.values()
    }

    /// Number of declared types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no types are declared.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use weft_ir::{EmbedDecl, FieldDecl, Span, StringInterner, TypeKind, TypeRef};

    use super::*;

    fn struct_decl(interner: &StringInterner, name: &str, fields: &[&str]) -> TypeDecl {
        TypeDecl {
            name: interner.intern(name),
            kind: TypeKind::Struct,
            fields: fields
                .iter()
                .map(|f| FieldDecl {
                    name: interner.intern(f),
                    ty: TypeRef::new(interner.intern("str")),
                    span: Span::DUMMY,
                })
                .collect(),
            embeds: vec![],
            span: Span::DUMMY,
        }
    }

    #[test]
    fn declare_and_lookup() {
        let interner = StringInterner::new();
        let mut graph = TypeGraph::new();

        graph
            .declare(struct_decl(&interner, "Motor", &["Type", "Fuel"]))
            .unwrap();

        let motor = graph.lookup(interner.intern("Motor")).unwrap();
        assert_eq!(motor.fields.len(), 2);
        assert!(graph.lookup(interner.intern("Auto")).is_none());
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn duplicate_type_rejected() {
        let interner = StringInterner::new();
        let mut graph = TypeGraph::new();

        graph.declare(struct_decl(&interner, "Motor", &[])).unwrap();
        let err = graph
            .declare(struct_decl(&interner, "Motor", &[]))
            .unwrap_err();

        assert!(matches!(
            err,
            DeclError::DuplicateType { name, .. } if name == interner.intern("Motor")
        ));
    }

    #[test]
    fn union_with_direct_fields_rejected() {
        let interner = StringInterner::new();
        let mut graph = TypeGraph::new();

        let mut decl = struct_decl(&interner, "AutoOpts", &["Category"]);
        decl.kind = TypeKind::Union;

        let err = graph.declare(decl).unwrap_err();
        assert!(matches!(
            err,
            DeclError::UnionWithDirectFields { field, .. }
                if field == interner.intern("Category")
        ));
    }

    #[test]
    fn empty_union_accepted() {
        let interner = StringInterner::new();
        let mut graph = TypeGraph::new();

        let mut decl = struct_decl(&interner, "AutoOpts", &[]);
        decl.kind = TypeKind::Union;

        graph.declare(decl).unwrap();
        assert!(graph.lookup(interner.intern("AutoOpts")).is_some());
    }

    #[test]
    fn duplicate_direct_field_rejected() {
        let interner = StringInterner::new();
        let mut graph = TypeGraph::new();

        let err = graph
            .declare(struct_decl(&interner, "Motor", &["Type", "Type"]))
            .unwrap_err();

        assert!(matches!(
            err,
            DeclError::DuplicateField { field, .. } if field == interner.intern("Type")
        ));
    }

    #[test]
    fn duplicate_embed_rejected() {
        let interner = StringInterner::new();
        let mut graph = TypeGraph::new();

        let mut decl = struct_decl(&interner, "Auto", &[]);
        let motor = interner.intern("Motor");
        for prefix in [None, Some(interner.intern("Engine"))] {
            decl.embeds.push(EmbedDecl {
                member: TypeRef::new(motor),
                prefix,
                union_member: false,
                span: Span::DUMMY,
            });
        }

        let err = graph.declare(decl).unwrap_err();
        assert!(matches!(
            err,
            DeclError::DuplicateEmbed { member, .. } if member == motor
        ));
    }

    #[test]
    fn field_named_like_embedded_member_rejected() {
        let interner = StringInterner::new();
        let mut graph = TypeGraph::new();

        let motor = interner.intern("Motor");
        let mut decl = struct_decl(&interner, "Holder", &["Motor"]);
        decl.embeds.push(EmbedDecl {
            member: TypeRef::new(motor),
            prefix: None,
            union_member: false,
            span: Span::DUMMY,
        });

        let err = graph.declare(decl).unwrap_err();
        assert!(matches!(
            err,
            DeclError::DuplicateField { field, .. } if field == motor
        ));
    }

    #[test]
    fn iteration_follows_intern_order() {
        let interner = StringInterner::new();
        // Intern in a fixed order so raw indices are predictable.
        let motor = interner.intern("Motor");
        let auto = interner.intern("Auto");

        let mut graph = TypeGraph::new();
        graph.declare(struct_decl(&interner, "Auto", &[])).unwrap();
        graph.declare(struct_decl(&interner, "Motor", &[])).unwrap();

        let names: Vec<Name> = graph.iter().map(|d| d.name).collect();
        assert_eq!(names, vec![motor, auto]);
    }
}
