//! Literal binding.
//!
//! Maps a struct literal's key/value pairs onto a promoted-field table and
//! produces the instantiation plan: one entry per leaf field of the fully
//! expanded type, either a supplied value or a zero marker. The value
//! constructor executes the plan; this module never touches memory layout.

use rustc_hash::FxHashMap;
use weft_ir::{FieldInit, LiteralValue, Name, StringInterner};

use crate::{
    AccessPath, BindError, PromotedKind, PromotedTable, PromotionCache, Resolution, TypeGraph,
};


/// What the constructor writes at one leaf path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlanValue {
    /// A value supplied by the literal.
    Value(LiteralValue),

    /// Zero/default initialization.
    Zero,
}

/// One write of the instantiation plan.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlanEntry {
    /// Leaf field location.
    pub path: AccessPath,

    /// What to write there.
    pub value: PlanValue,
}

/// The ordered instantiation plan for one literal.
///
/// Every reachable leaf field of the root type appears exactly once, in the
/// table's canonical (declaration-order) leaf order. Ephemeral: owned by
/// the calling construction site.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InstantiationPlan {
    type_name: Name,
    entries: Vec<PlanEntry>,
}

impl InstantiationPlan {
    /// The constructed type.
    pub fn type_name(&self) -> Name {
        self.type_name
    }

    /// The writes, in canonical leaf order.
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Number of leaf writes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the plan has no writes (a type with no leaf fields).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Binds literal key/value pairs against promoted-field tables.
///
/// Holds the graph, interner, and table cache so that qualified member
/// literals (`Motor: Motor{..}`) can recursively bind against the member's
/// own table.
pub struct Binder<'a> {
    graph: &'a TypeGraph,
    interner: &'a StringInterner,
    cache: &'a PromotionCache,
}

impl<'a> Binder<'a> {
    /// Create a binder over the given graph and cache.
    pub fn new(
        graph: &'a TypeGraph,
        interner: &'a StringInterner,
        cache: &'a PromotionCache,
    ) -> Self {
        Binder {
            graph,
            interner,
            cache,
        }
    }

    /// Bind `pairs` against `table`, producing the instantiation plan.
    ///
    /// Pairs are processed in source order. When two keys target the same
    /// storage path — only possible through the qualified member form —
    /// the last occurrence wins, matching ordinary field-literal overwrite
    /// semantics. Every leaf no pair targets is scheduled for zero
    /// initialization.
    #[tracing::instrument(level = "trace", skip_all, fields(ty = ?table.type_name()))]
    pub fn bind(
        &self,
        table: &PromotedTable,
        pairs: &[FieldInit],
    ) -> Result<InstantiationPlan, BindError> {
        let mut writes: FxHashMap<AccessPath, PlanValue> = FxHashMap::default();
        self.bind_pairs(table, pairs, &AccessPath::root(), &mut writes)?;

        let entries = table
            .leaves()
            .iter()
            .map(|leaf| PlanEntry {
                path: leaf.clone(),
                value: writes.remove(leaf).unwrap_or(PlanValue::Zero),
            })
            .collect();

        // Every write targets a leaf of the same expansion the leaves came
        // from, so nothing can be left over.
        debug_assert!(writes.is_empty());

        Ok(InstantiationPlan {
            type_name: table.type_name(),
            entries,
        })
    }

    fn bind_pairs(
        &self,
        table: &PromotedTable,
        pairs: &[FieldInit],
        base: &AccessPath,
        writes: &mut FxHashMap<AccessPath, PlanValue>,
    ) -> Result<(), BindError> {
        for pair in pairs {
            let field = match table.get(pair.name) {
                None => {
                    return Err(BindError::UnknownField {
                        type_name: table.type_name(),
                        name: pair.name,
                        span: pair.span,
                        available: table.external_names(),
                    });
                }
                Some(Resolution::Ambiguous(candidates)) => {
                    return Err(BindError::AmbiguousField {
                        type_name: table.type_name(),
                        name: pair.name,
                        span: pair.span,
                        candidates: candidates.iter().map(|c| c.path.clone()).collect(),
                    });
                }
                Some(Resolution::Unique(field)) => field,
            };

            match field.kind {
                PromotedKind::Field => {
                    writes.insert(
                        base.join(&field.path),
                        PlanValue::Value(pair.value.clone()),
                    );
                }
                PromotedKind::Member => {
                    let LiteralValue::Struct { ty, fields } = &pair.value else {
                        return Err(BindError::InvalidMemberLiteral {
                            type_name: table.type_name(),
                            member: field.ty.name,
                            name: pair.name,
                            span: pair.span,
                        });
                    };
                    if *ty != field.ty.name {
                        return Err(BindError::InvalidMemberLiteral {
                            type_name: table.type_name(),
                            member: field.ty.name,
                            name: pair.name,
                            span: pair.span,
                        });
                    }

                    let member_table =
                        self.cache.table(self.graph, self.interner, field.ty.name)?;
                    let member_base = base.join(&field.path);

                    // A qualified literal assigns the whole substructure:
                    // reset every member leaf, then apply its own pairs.
                    for leaf in member_table.leaves() {
                        writes.insert(member_base.join(leaf), PlanValue::Zero);
                    }
                    self.bind_pairs(&member_table, fields, &member_base, writes)?;
                }
            }
        }
        Ok(())
    }
}
