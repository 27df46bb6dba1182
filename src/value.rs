/*!
 * The dynamic value type shared by rule sequences, generic inputs, and
 * synthesized results.
 */

use std::fmt;
use std::sync::Arc;

use crate::host::HostExit;

/// A cheap, clonable, hashable name used for dialect keywords, symbolic
/// input elements, and path segments.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn new(name: impl AsRef<str>) -> Self {
        Symbol(Arc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

/// A structured path-like reference, e.g. `config/limits` or `fn/` in the
/// trailing-marker form that requests an ordinary function call.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PathRef {
    pub segments: Arc<[Symbol]>,
    /// Trailing-marker form: resolve the path to a callable and invoke it
    /// with compiled sub-rules as arguments.
    pub call: bool,
}

impl PathRef {
    /// The first segment, absent only for a degenerate empty path.
    pub fn leading(&self) -> Option<&Symbol> {
        self.segments.first()
    }
}

impl fmt::Display for PathRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{seg}")?;
        }
        if self.call {
            f.write_str("/")?;
        }
        Ok(())
    }
}

impl fmt::Debug for PathRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A host-supplied callable. The `combinator` flag marks functions that may
/// appear in keyword position and consume sub-rules; plain functions may
/// only be invoked through the `path/` call form.
#[derive(Clone)]
pub struct HostFn {
    name: Symbol,
    arity: usize,
    combinator: bool,
    func: Arc<dyn Fn(&[Value]) -> Result<Value, HostExit> + Send + Sync>,
}

impl HostFn {
    pub fn new(
        name: impl Into<Symbol>,
        arity: usize,
        func: impl Fn(&[Value]) -> Result<Value, HostExit> + Send + Sync + 'static,
    ) -> Self {
        HostFn {
            name: name.into(),
            arity,
            combinator: false,
            func: Arc::new(func),
        }
    }

    /// Marks this callable as usable in keyword position.
    pub fn combinator(mut self) -> Self {
        self.combinator = true;
        self
    }

    pub fn name(&self) -> &Symbol {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn is_combinator(&self) -> bool {
        self.combinator
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, HostExit> {
        (self.func)(args)
    }
}

impl PartialEq for HostFn {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl Eq for HostFn {}

impl fmt::Debug for HostFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostFn({}/{})", self.name, self.arity)
    }
}

/// One element of a rule sequence or of a generic input sequence.
#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    /// Explicit null. A legitimate value, distinct from a failed match.
    None,
    /// An explicit "no value" binding, as produced by unsetting a name.
    Unset,
    Logic(bool),
    Int(i64),
    Char(char),
    Text(Arc<str>),
    Word(Symbol),
    Path(PathRef),
    Block(Arc<[Value]>),
    Group(Arc<[Value]>),
    Func(HostFn),
}

/// The closed set of type tags used for type-based combinator dispatch.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TypeTag {
    None,
    Unset,
    Logic,
    Int,
    Char,
    Text,
    Word,
    Path,
    Block,
    Group,
    Func,
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TypeTag::None => "none",
            TypeTag::Unset => "unset",
            TypeTag::Logic => "logic",
            TypeTag::Int => "integer",
            TypeTag::Char => "char",
            TypeTag::Text => "text",
            TypeTag::Word => "word",
            TypeTag::Path => "path",
            TypeTag::Block => "block",
            TypeTag::Group => "group",
            TypeTag::Func => "function",
        })
    }
}

/// The word that separates alternatives at the sequencing level.
pub const STEP_DELIMITER: &str = "|";

impl Value {
    pub fn word(name: impl AsRef<str>) -> Self {
        Value::Word(Symbol::new(name))
    }

    pub fn text(text: impl AsRef<str>) -> Self {
        Value::Text(Arc::from(text.as_ref()))
    }

    pub fn block(items: impl Into<Vec<Value>>) -> Self {
        Value::Block(items.into().into())
    }

    pub fn group(items: impl Into<Vec<Value>>) -> Self {
        Value::Group(items.into().into())
    }

    pub fn path<S: AsRef<str>>(segments: impl IntoIterator<Item = S>, call: bool) -> Self {
        Value::Path(PathRef {
            segments: segments.into_iter().map(Symbol::new).collect(),
            call,
        })
    }

    pub fn delimiter() -> Self {
        Value::word(STEP_DELIMITER)
    }

    pub fn tag(&self) -> TypeTag {
        match self {
            Value::None => TypeTag::None,
            Value::Unset => TypeTag::Unset,
            Value::Logic(_) => TypeTag::Logic,
            Value::Int(_) => TypeTag::Int,
            Value::Char(_) => TypeTag::Char,
            Value::Text(_) => TypeTag::Text,
            Value::Word(_) => TypeTag::Word,
            Value::Path(_) => TypeTag::Path,
            Value::Block(_) => TypeTag::Block,
            Value::Group(_) => TypeTag::Group,
            Value::Func(_) => TypeTag::Func,
        }
    }

    /// True for the bare step delimiter `|`.
    pub fn is_delimiter(&self) -> bool {
        matches!(self, Value::Word(w) if w.as_str() == STEP_DELIMITER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiter_is_a_plain_word() {
        assert!(Value::delimiter().is_delimiter());
        assert!(!Value::word("||").is_delimiter());
        assert_eq!(Value::delimiter().tag(), TypeTag::Word);
    }

    #[test]
    fn host_fn_equality_is_identity() {
        let f = HostFn::new("f", 1, |_| Ok(Value::None));
        let g = HostFn::new("f", 1, |_| Ok(Value::None));
        assert_eq!(f, f.clone());
        assert_ne!(f, g);
    }
}
