//! Access paths into a fully expanded instance.

use smallvec::SmallVec;
use weft_ir::{Name, StringLookup};

/// Ordered sequence of member-selector steps locating a field within a
/// fully expanded instance, e.g. `Motor.Type`.
///
/// Each step is a member selector: the embedded member's type name for
/// embed traversals, the field's own name for the final step. Paths are
/// short in practice (embedding nests shallowly), hence the inline storage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AccessPath {
    steps: SmallVec<[Name; 4]>,
}

impl AccessPath {
    /// The empty path, addressing the root value itself.
    pub fn root() -> Self {
        AccessPath {
            steps: SmallVec::new(),
        }
    }

    /// A single-step path.
    pub fn from_step(step: Name) -> Self {
        let mut steps = SmallVec::new();
        steps.push(step);
        AccessPath { steps }
    }

    /// The selector steps, outermost first.
    pub fn steps(&self) -> &[Name] {
        &self.steps
    }

    /// Append a step in place.
    pub fn push(&mut self, step: Name) {
        self.steps.push(step);
    }

    /// This path extended by one step.
    #[must_use]
    pub fn child(&self, step: Name) -> Self {
        let mut path = self.clone();
        path.push(step);
        path
    }

    /// This path followed by all of `suffix`'s steps.
    #[must_use]
    pub fn join(&self, suffix: &AccessPath) -> Self {
        let mut path = self.clone();
        path.steps.extend_from_slice(suffix.steps());
        path
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether this is the root path.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Render as dotted selectors, e.g. `"Motor.Type"`.
    pub fn display(&self, lookup: &impl StringLookup) -> String {
        let mut out = String::new();
        for (i, &step) in self.steps.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(lookup.lookup(step));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use weft_ir::StringInterner;

    use super::*;

    #[test]
    fn join_and_child_compose() {
        let interner = StringInterner::new();
        let motor = interner.intern("Motor");
        let ty = interner.intern("Type");

        let path = AccessPath::from_step(motor).join(&AccessPath::from_step(ty));
        assert_eq!(path, AccessPath::from_step(motor).child(ty));
        assert_eq!(path.steps(), &[motor, ty]);
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn root_is_empty() {
        assert!(AccessPath::root().is_empty());
        assert_eq!(AccessPath::root().len(), 0);
    }

    #[test]
    fn display_renders_dotted() {
        let interner = StringInterner::new();
        let path = AccessPath::from_step(interner.intern("Motor")).child(interner.intern("Fuel"));
        assert_eq!(path.display(&interner), "Motor.Fuel");
        assert_eq!(AccessPath::root().display(&interner), "");
    }
}
