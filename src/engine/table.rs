/*!
 * The combinator table: the engine's sole extension point. Dispatch keys are
 * dialect keywords or input-element type tags; entries are combinator
 * definitions or plain data values a keyword has been re-bound to.
 */

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use either::Either::{self, Left, Right};

use crate::engine::matcher::{Matcher, Step};
use crate::engine::state::{ParseState, Pos};
use crate::value::{Symbol, TypeTag, Value};

/// How a combinator's formal parameter interacts with the rule stream during
/// binding.
#[derive(Clone, Debug)]
pub enum ParamKind {
    /// The next rule element, captured verbatim. With `endable`, an absent
    /// element (end of rule or step delimiter) binds an explicit absence
    /// marker instead of failing.
    Quoted { endable: bool },
    /// As `Quoted`, but the element is captured only when its type tag is
    /// listed; otherwise the parameter is left unbound.
    QuotedIf(Vec<TypeTag>),
    /// As `Quoted`, but the element must carry one of the listed type tags;
    /// a mismatch is a structural error at binding time.
    QuotedAs(Vec<TypeTag>),
    /// Recursively compiled into a nested matcher.
    SubRule,
    /// The dispatch-supplied block literal, eagerly compiled into its
    /// alternatives at binding time.
    Alternatives,
    /// Boolean switch; never touches the rule stream.
    Flag,
    /// The dispatch-supplied literal, set when dispatch came from a type-tag
    /// lookup.
    Value,
    /// Reserved slots, filled at matcher invocation rather than at binding.
    State,
    Input,
    Remainder,
    Pending,
}

#[derive(Clone, Debug)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
}

impl Param {
    pub fn quoted(name: &'static str) -> Self {
        Param {
            name,
            kind: ParamKind::Quoted { endable: false },
        }
    }

    pub fn quoted_endable(name: &'static str) -> Self {
        Param {
            name,
            kind: ParamKind::Quoted { endable: true },
        }
    }

    pub fn quoted_if(name: &'static str, tags: impl Into<Vec<TypeTag>>) -> Self {
        Param {
            name,
            kind: ParamKind::QuotedIf(tags.into()),
        }
    }

    pub fn quoted_as(name: &'static str, tags: impl Into<Vec<TypeTag>>) -> Self {
        Param {
            name,
            kind: ParamKind::QuotedAs(tags.into()),
        }
    }

    pub fn sub_rule(name: &'static str) -> Self {
        Param {
            name,
            kind: ParamKind::SubRule,
        }
    }

    pub fn alternatives(name: &'static str) -> Self {
        Param {
            name,
            kind: ParamKind::Alternatives,
        }
    }

    pub fn flag(name: &'static str) -> Self {
        Param {
            name,
            kind: ParamKind::Flag,
        }
    }

    pub fn value(name: &'static str) -> Self {
        Param {
            name,
            kind: ParamKind::Value,
        }
    }
}

/// The behavior body of a combinator. Invoked with the bound matcher, the
/// current input position, and the per-invocation parse state.
pub type Behavior = Arc<dyn Fn(&Matcher, Pos, &mut ParseState<'_>) -> Step + Send + Sync>;

pub struct CombinatorDef {
    pub name: Symbol,
    pub params: Vec<Param>,
    pub behavior: Behavior,
}

impl CombinatorDef {
    pub fn new(name: impl Into<Symbol>, params: Vec<Param>, behavior: Behavior) -> Self {
        CombinatorDef {
            name: name.into(),
            params,
            behavior,
        }
    }
}

impl fmt::Debug for CombinatorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinatorDef")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum DispatchKey {
    Word(Symbol),
    Type(TypeTag),
}

impl DispatchKey {
    pub fn word(name: impl AsRef<str>) -> Self {
        DispatchKey::Word(Symbol::new(name))
    }
}

/// A keyword may be bound to a combinator or to a plain data value; the
/// latter re-dispatches through the value's type at compile time.
pub type Entry = Either<Arc<CombinatorDef>, Value>;

/// Mapping from dispatch key to combinator definition. Tables are
/// copy-on-override: a running parse never mutates one, and per-invocation
/// extension goes through [`CombinatorTable::with`].
#[derive(Clone, Default, Debug)]
pub struct CombinatorTable {
    entries: HashMap<DispatchKey, Entry>,
}

impl CombinatorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: DispatchKey, def: CombinatorDef) {
        self.entries.insert(key, Left(Arc::new(def)));
    }

    pub fn register_shared(&mut self, key: DispatchKey, def: Arc<CombinatorDef>) {
        self.entries.insert(key, Left(def));
    }

    /// Bind a keyword to plain data instead of a combinator.
    pub fn bind(&mut self, name: impl AsRef<str>, value: Value) {
        self.entries
            .insert(DispatchKey::word(name), Right(value));
    }

    pub fn get(&self, key: &DispatchKey) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn word(&self, sym: &Symbol) -> Option<&Entry> {
        self.entries.get(&DispatchKey::Word(sym.clone()))
    }

    pub fn by_type(&self, tag: TypeTag) -> Option<&Entry> {
        self.entries.get(&DispatchKey::Type(tag))
    }

    /// A copy of this table with additional or replacement entries.
    #[must_use]
    pub fn with(&self, extend: impl FnOnce(&mut Self)) -> Self {
        let mut copy = self.clone();
        extend(&mut copy);
        copy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::matcher::Outcome;

    fn noop(_: &Matcher, _: Pos, _: &mut ParseState<'_>) -> Step {
        Ok(Outcome::NoMatch)
    }

    fn noop_def(name: &str) -> CombinatorDef {
        CombinatorDef::new(name, vec![], Arc::new(noop))
    }

    #[test]
    fn with_leaves_the_original_untouched() {
        let mut base = CombinatorTable::new();
        base.register(DispatchKey::word("a"), noop_def("a"));

        let extended = base.with(|t| {
            t.register(DispatchKey::word("b"), noop_def("b"));
            t.bind("a", Value::Int(1));
        });

        assert_eq!(base.len(), 1);
        assert!(matches!(base.word(&Symbol::new("a")), Some(Left(_))));
        assert_eq!(extended.len(), 2);
        assert!(matches!(extended.word(&Symbol::new("a")), Some(Right(_))));
    }
}
