use crate::value::Value;

/// A read-only view over the remaining rule sequence.
///
/// Advancing produces a new cursor value; nested compilation never mutates a
/// caller's cursor, so alternative compilations can restart from the same
/// point.
#[derive(Clone, Copy, Debug)]
pub struct RuleCursor<'r> {
    rules: &'r [Value],
    index: usize,
}

impl<'r> RuleCursor<'r> {
    pub fn new(rules: &'r [Value]) -> Self {
        RuleCursor { rules, index: 0 }
    }

    /// The rule element under the cursor, if any remain.
    pub fn head(&self) -> Option<&'r Value> {
        self.rules.get(self.index)
    }

    /// A cursor past the current element. Advancing at the end is a no-op.
    #[must_use]
    pub fn advance(self) -> Self {
        RuleCursor {
            rules: self.rules,
            index: (self.index + 1).min(self.rules.len()),
        }
    }

    pub fn at_end(&self) -> bool {
        self.index >= self.rules.len()
    }

    pub fn at_delimiter(&self) -> bool {
        matches!(self.head(), Some(v) if v.is_delimiter())
    }

    /// End of the current dialect step: either nothing remains or the next
    /// element is the step delimiter.
    pub fn at_step_end(&self) -> bool {
        self.at_end() || self.at_delimiter()
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn advance_returns_a_fresh_cursor() {
        let rules = [Value::word("a"), Value::delimiter(), Value::Int(3)];
        let cur = RuleCursor::new(&rules);
        let next = cur.advance();

        assert_eq!(cur.index(), 0);
        assert_eq!(next.index(), 1);
        assert!(next.at_delimiter());
        assert!(next.at_step_end());
        assert!(!cur.at_step_end());
    }

    #[test]
    fn advance_saturates_at_end() {
        let rules = [Value::word("a")];
        let cur = RuleCursor::new(&rules).advance().advance();
        assert!(cur.at_end());
        assert_eq!(cur.head(), None);
    }
}
