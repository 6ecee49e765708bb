//! Promotion resolution.
//!
//! Computes, for a declared type, the full promoted-field table: every
//! reachable external name, the access path it stands for, and the
//! embedding depth it was found at. Shallower entries shadow deeper ones,
//! mirroring selector-expression resolution; same-depth collisions are
//! retained as poisoned (ambiguous) entries so that a literal *using* such
//! a name fails deterministically while an unused one stays harmless.
//!
//! Tables are pure functions of the immutable declarations. [`Resolver`]
//! memoizes per traversal; [`PromotionCache`] shares finished tables across
//! threads.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use weft_ir::{Name, Span, StringInterner, TypeDecl, TypeRef};

use crate::{AccessPath, PromotionError, TypeGraph};


/// What a promoted-table entry addresses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PromotedKind {
    /// A leaf field.
    Field,

    /// An embedded member as a whole — the qualified escape hatch
    /// (`Motor: Motor{..}`). A prefix renames a member's promoted fields,
    /// never the member itself.
    Member,
}

/// One reachable field (or member) of a type, under its external name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PromotedField {
    /// The prefixed or unprefixed name visible to literals.
    pub external: Name,

    /// Member traversals from the outer type down to the field.
    pub path: AccessPath,

    /// Embed-traversal steps from the root type (0 = declared directly on
    /// the root type itself).
    pub depth: u32,

    /// The type whose declaration introduced this entry.
    pub declared_in: Name,

    /// The field's declared type; for members, the member type itself.
    pub ty: TypeRef,

    /// Leaf field or whole member.
    pub kind: PromotedKind,
}

/// Table entry for one external name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one minimal-depth candidate; usable in literals.
    Unique(PromotedField),

    /// Two or more candidates at the same minimal depth. Poisoned: any
    /// literal key using this name fails rather than silently picking one.
    Ambiguous(Vec<PromotedField>),
}

impl Resolution {
    /// All minimal-depth candidates for this name.
    pub fn candidates(&self) -> &[PromotedField] {
        match self {
            Resolution::Unique(field) => std::slice::from_ref(field),
            Resolution::Ambiguous(fields) => fields,
        }
    }

    /// Whether this entry is poisoned.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Resolution::Ambiguous(_))
    }
}

/// The promoted-field table of one type.
///
/// Immutable once computed; deterministic for a given declaration graph
/// (entries sit in a `BTreeMap`, leaves in declaration order).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromotedTable {
    type_name: Name,
    entries: BTreeMap<Name, Resolution>,
    /// Every leaf field of the fully expanded type, in declaration order.
    /// Independent of naming: shadowed storage still appears here, because
    /// it still exists and must be zero-initialized.
    leaves: Vec<AccessPath>,
}

impl PromotedTable {
    /// The type this table was resolved for.
    pub fn type_name(&self) -> Name {
        self.type_name
    }

    /// Look up an external name.
    pub fn get(&self, name: Name) -> Option<&Resolution> {
        self.entries.get(&name)
    }

    /// All entries, in deterministic name order.
    pub fn entries(&self) -> impl Iterator<Item = (Name, &Resolution)> + '_ {
        self.entries.iter().map(|(&name, resolution)| (name, resolution))
    }

    /// All uniquely resolved entries.
    pub fn resolved(&self) -> impl Iterator<Item = &PromotedField> + '_ {
        self.entries.values().filter_map(|resolution| match resolution {
            Resolution::Unique(field) => Some(field),
            Resolution::Ambiguous(_) => None,
        })
    }

    /// All poisoned names with their colliding candidates.
    pub fn ambiguous(&self) -> impl Iterator<Item = (Name, &[PromotedField])> + '_ {
        self.entries.iter().filter_map(|(&name, resolution)| match resolution {
            Resolution::Ambiguous(fields) => Some((name, fields.as_slice())),
            Resolution::Unique(_) => None,
        })
    }

    /// External names usable in literals (unique entries only).
    pub fn external_names(&self) -> Vec<Name> {
        self.resolved().map(|field| field.external).collect()
    }

    /// Every leaf field path of the fully expanded type, declaration order.
    pub fn leaves(&self) -> &[AccessPath] {
        &self.leaves
    }

    /// One [`PromotionError::AmbiguousName`] per poisoned entry, for
    /// consumers that want to surface unused ambiguities eagerly.
    pub fn ambiguity_errors(&self) -> Vec<PromotionError> {
        self.ambiguous()
            .map(|(name, candidates)| PromotionError::AmbiguousName {
                type_name: self.type_name,
                name,
                candidates: candidates.iter().map(|field| field.path.clone()).collect(),
            })
            .collect()
    }

    /// Number of external names in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Breadth-first promotion resolver over the embeds relation.
///
/// Memoizes per-type tables for the duration of one traversal and detects
/// cycles along the current resolution path. Reads the graph only; each
/// resolver owns its private accumulator, so independent resolvers can run
/// on parallel threads without coordination.
pub struct Resolver<'a> {
    graph: &'a TypeGraph,
    interner: &'a StringInterner,
    memo: FxHashMap<Name, Arc<PromotedTable>>,
    in_flight: Vec<Name>,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over the given graph.
    pub fn new(graph: &'a TypeGraph, interner: &'a StringInterner) -> Self {
        Resolver {
            graph,
            interner,
            memo: FxHashMap::default(),
            in_flight: Vec::new(),
        }
    }

    /// Resolve the promoted-field table for `type_name`.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn resolve(&mut self, type_name: Name) -> Result<Arc<PromotedTable>, PromotionError> {
        if let Some(table) = self.memo.get(&type_name) {
            return Ok(Arc::clone(table));
        }

        let decl = self.graph.lookup(type_name).ok_or(PromotionError::UnknownType {
            name: type_name,
            span: Span::DUMMY,
        })?;

        self.in_flight.push(type_name);
        let result = self.resolve_decl(decl);
        self.in_flight.pop();

        let table = Arc::new(result?);
        self.memo.insert(type_name, Arc::clone(&table));
        Ok(table)
    }

    /// Tables memoized by this traversal, for seeding a shared cache.
    pub fn into_memo(self) -> FxHashMap<Name, Arc<PromotedTable>> {
        self.memo
    }

    fn resolve_decl(&mut self, decl: &TypeDecl) -> Result<PromotedTable, PromotionError> {
        let mut candidates: BTreeMap<Name, Vec<PromotedField>> = BTreeMap::new();
        let mut leaves: Vec<AccessPath> = Vec::new();

        // Depth 0: the type's own fields.
        for field in &decl.fields {
            candidates.entry(field.name).or_default().push(PromotedField {
                external: field.name,
                path: AccessPath::from_step(field.name),
                depth: 0,
                declared_in: decl.name,
                ty: field.ty,
                kind: PromotedKind::Field,
            });
            leaves.push(AccessPath::from_step(field.name));
        }

        for embed in &decl.embeds {
            let member = embed.member.name;

            if let Some(pos) = self.in_flight.iter().position(|&name| name == member) {
                let mut path = self.in_flight[pos..].to_vec();
                path.push(member);
                return Err(PromotionError::Cycle {
                    path,
                    span: embed.span,
                });
            }
            if self.graph.lookup(member).is_none() {
                return Err(PromotionError::UnknownType {
                    name: member,
                    span: embed.span,
                });
            }

            let member_table = self.resolve(member)?;
            let selector = AccessPath::from_step(member);

            // The member itself stays addressable under its type name —
            // the qualified escape hatch, uniform for prefixed and
            // unprefixed embeds.
            candidates.entry(member).or_default().push(PromotedField {
                external: member,
                path: selector.clone(),
                depth: 0,
                declared_in: decl.name,
                ty: embed.member,
                kind: PromotedKind::Member,
            });

            // Re-derive every minimal-depth entry of the member one level
            // deeper. Entries the member already shadowed stay shadowed:
            // depths shift uniformly, so their relative order is preserved.
            for (inner_name, resolution) in member_table.entries() {
                for inner in resolution.candidates() {
                    let external = match (embed.prefix, inner.kind) {
                        (Some(prefix), PromotedKind::Field) => self.prefixed(prefix, inner_name),
                        _ => inner_name,
                    };
                    candidates.entry(external).or_default().push(PromotedField {
                        external,
                        path: selector.join(&inner.path),
                        depth: inner.depth + 1,
                        declared_in: inner.declared_in,
                        ty: inner.ty,
                        kind: inner.kind,
                    });
                }
            }

            for leaf in member_table.leaves() {
                leaves.push(selector.join(leaf));
            }
        }

        let mut entries = BTreeMap::new();
        for (external, group) in candidates {
            let resolution = tie_break(group);
            if let Resolution::Ambiguous(ref fields) = resolution {
                tracing::debug!(
                    name = ?external,
                    candidates = fields.len(),
                    "same-depth promotion collision"
                );
            }
            entries.insert(external, resolution);
        }

        Ok(PromotedTable {
            type_name: decl.name,
            entries,
            leaves,
        })
    }

    /// Intern `prefix` + `name` concatenated.
    fn prefixed(&self, prefix: Name, name: Name) -> Name {
        let prefix_str = self.interner.lookup(prefix);
        let name_str = self.interner.lookup(name);
        let mut combined = String::with_capacity(prefix_str.len() + name_str.len());
        combined.push_str(prefix_str);
        combined.push_str(name_str);
        self.interner.intern(&combined)
    }
}

/// Smallest depth wins; a still-plural minimal set is poisoned.
fn tie_break(mut group: Vec<PromotedField>) -> Resolution {
    let min_depth = group.iter().map(|field| field.depth).min().unwrap_or(0);
    group.retain(|field| field.depth == min_depth);
    if group.len() == 1 {
        Resolution::Unique(group.remove(0))
    } else {
        Resolution::Ambiguous(group)
    }
}

/// Shared promoted-table cache.
///
/// Concurrent reads; a miss resolves under the write lock after a second
/// check, so each type is computed at most once and every caller observes
/// the same `Arc`, never a partially built table. Invalidate wholesale when
/// the graph changes.
#[derive(Debug, Default)]
pub struct PromotionCache {
    tables: RwLock<FxHashMap<Name, Arc<PromotedTable>>>,
}

impl PromotionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The promoted-field table for `type_name`, computing it on first use.
    pub fn table(
        &self,
        graph: &TypeGraph,
        interner: &StringInterner,
        type_name: Name,
    ) -> Result<Arc<PromotedTable>, PromotionError> {
        if let Some(table) = self.tables.read().get(&type_name) {
            return Ok(Arc::clone(table));
        }

        // Resolve while holding the write lock so concurrent requests for
        // one type compute at most once. Resolution only reads the graph
        // and interner, never this cache, so it cannot deadlock here.
        let mut guard = self.tables.write();
        if let Some(table) = guard.get(&type_name) {
            return Ok(Arc::clone(table));
        }

        let mut resolver = Resolver::new(graph, interner);
        let table = resolver.resolve(type_name)?;
        // Tables resolved transitively along the way are seeded too.
        for (name, memoized) in resolver.into_memo() {
            guard.entry(name).or_insert(memoized);
        }
        Ok(table)
    }

    /// Drop every cached table. Call after re-declaring the graph.
    pub fn invalidate(&self) {
        self.tables.write().clear();
    }

    /// Number of cached tables.
    pub fn len(&self) -> usize {
        self.tables.read().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.tables.read().is_empty()
    }
}
