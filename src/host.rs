/*!
 * The boundary to the enclosing language: variable resolution for unbound
 * keywords and paths, and evaluation of parenthesized rule groups.
 */

use crate::value::{Symbol, Value};

/// A non-local exit raised by host code. It aborts the whole driver
/// invocation; no combinator may swallow it.
#[derive(Clone, Debug, PartialEq)]
pub enum HostExit {
    Escape(Value),
}

/// Collaborator supplied through [`Options`](crate::Options). The engine
/// calls it synchronously at the point a rule group or unbound name is
/// reached.
pub trait Host {
    /// Resolve a name or path in the host's lexical environment.
    fn get(&self, path: &[Symbol]) -> Option<Value>;

    /// Evaluate a parenthesized rule group.
    fn eval(&self, group: &[Value]) -> Result<Value, HostExit>;
}
