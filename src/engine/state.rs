/*!
 * Per-invocation shared context: the active combinator table, the input
 * view, case handling, furthest-position tracking, the pending-accumulation
 * buffer, and the iteration-control stack.
 */

use smallvec::SmallVec;

use crate::engine::table::CombinatorTable;
use crate::host::Host;
use crate::utils::default;
use crate::value::Value;

/// A lightweight, comparable cursor into the caller-supplied input sequence.
/// For text input this is a byte offset; for byte and value sequences an
/// element index.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Pos(pub usize);

impl Pos {
    pub const START: Pos = Pos(0);
}

/// The ordered input a compiled rule sequence runs against. The engine never
/// mutates it; positions index into it.
#[derive(Clone, Copy, Debug)]
pub enum Input<'i> {
    Text(&'i str),
    Bytes(&'i [u8]),
    Values(&'i [Value]),
}

impl<'i> Input<'i> {
    pub fn end(&self) -> Pos {
        Pos(match self {
            Input::Text(s) => s.len(),
            Input::Bytes(b) => b.len(),
            Input::Values(v) => v.len(),
        })
    }

    pub fn at_end(&self, pos: Pos) -> bool {
        pos >= self.end()
    }

    /// The element at `pos` as a value, with the position past it.
    pub fn take(&self, pos: Pos) -> Option<(Value, Pos)> {
        match self {
            Input::Text(s) => {
                let ch = s.get(pos.0..)?.chars().next()?;
                Some((Value::Char(ch), Pos(pos.0 + ch.len_utf8())))
            }
            Input::Bytes(b) => {
                let byte = *b.get(pos.0)?;
                Some((Value::Int(byte as i64), Pos(pos.0 + 1)))
            }
            Input::Values(v) => {
                let item = v.get(pos.0)?;
                Some((item.clone(), Pos(pos.0 + 1)))
            }
        }
    }

    /// Match a literal text at `pos`, honoring case sensitivity.
    pub fn match_text(&self, pos: Pos, lit: &str, exact: bool) -> Option<Pos> {
        match self {
            Input::Text(s) => {
                let mut rest = s.get(pos.0..)?.chars();
                let mut end = pos.0;
                for expected in lit.chars() {
                    let actual = rest.next()?;
                    if !chars_eq(expected, actual, exact) {
                        return None;
                    }
                    end += actual.len_utf8();
                }
                Some(Pos(end))
            }
            Input::Bytes(b) => {
                let rest = b.get(pos.0..)?;
                let lit = lit.as_bytes();
                if rest.len() < lit.len() {
                    return None;
                }
                let head = &rest[..lit.len()];
                let hit = if exact {
                    head == lit
                } else {
                    head.eq_ignore_ascii_case(lit)
                };
                hit.then_some(Pos(pos.0 + lit.len()))
            }
            Input::Values(v) => match v.get(pos.0)? {
                Value::Text(t) if text_eq(t, lit, exact) => Some(Pos(pos.0 + 1)),
                _ => None,
            },
        }
    }

    pub fn match_char(&self, pos: Pos, lit: char, exact: bool) -> Option<Pos> {
        match self {
            Input::Text(s) => {
                let actual = s.get(pos.0..)?.chars().next()?;
                chars_eq(lit, actual, exact).then(|| Pos(pos.0 + actual.len_utf8()))
            }
            Input::Bytes(b) => {
                let actual = *b.get(pos.0)? as char;
                chars_eq(lit, actual, exact).then_some(Pos(pos.0 + 1))
            }
            Input::Values(v) => match v.get(pos.0)? {
                Value::Char(c) if chars_eq(lit, *c, exact) => Some(Pos(pos.0 + 1)),
                _ => None,
            },
        }
    }

    /// Match an arbitrary literal value at `pos`. Over text input only
    /// char and text literals can match; over bytes, integers and text.
    pub fn match_value(&self, pos: Pos, lit: &Value, exact: bool) -> Option<Pos> {
        match (self, lit) {
            (_, Value::Char(c)) => self.match_char(pos, *c, exact),
            (_, Value::Text(t)) => self.match_text(pos, t, exact),
            (Input::Bytes(b), Value::Int(n)) => {
                (*b.get(pos.0)? as i64 == *n).then_some(Pos(pos.0 + 1))
            }
            (Input::Values(v), lit) => {
                values_eq(v.get(pos.0)?, lit, exact).then_some(Pos(pos.0 + 1))
            }
            _ => None,
        }
    }
}

pub(crate) fn chars_eq(a: char, b: char, exact: bool) -> bool {
    if exact {
        a == b
    } else {
        a == b || a.to_lowercase().eq(b.to_lowercase())
    }
}

pub(crate) fn text_eq(a: &str, b: &str, exact: bool) -> bool {
    if exact {
        a == b
    } else {
        let mut bs = b.chars();
        for ac in a.chars() {
            match bs.next() {
                Some(bc) if chars_eq(ac, bc, false) => {}
                _ => return false,
            }
        }
        bs.next().is_none()
    }
}

/// Case-aware equality between two values. Case only applies to text and
/// char payloads; everything else compares exactly.
pub(crate) fn values_eq(a: &Value, b: &Value, exact: bool) -> bool {
    match (a, b) {
        (Value::Text(x), Value::Text(y)) => text_eq(x, y, exact),
        (Value::Char(x), Value::Char(y)) => chars_eq(*x, *y, exact),
        _ => a == b,
    }
}

/// Handle to a registered iteration scope, carried by the `break` signal so
/// it unwinds to the correct enclosing loop.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LoopId(u64);

pub struct ParseState<'p> {
    input: Input<'p>,
    table: &'p CombinatorTable,
    host: Option<&'p dyn Host>,
    exact: bool,
    furthest: Option<Pos>,
    pending: Vec<Value>,
    loops: SmallVec<[LoopId; 4]>,
    next_loop: u64,
}

impl<'p> ParseState<'p> {
    pub fn new(
        input: Input<'p>,
        table: &'p CombinatorTable,
        host: Option<&'p dyn Host>,
        case_sensitive: bool,
        track_furthest: bool,
    ) -> Self {
        ParseState {
            input,
            table,
            host,
            exact: case_sensitive,
            furthest: track_furthest.then_some(Pos::START),
            pending: default(),
            loops: default(),
            next_loop: 0,
        }
    }

    pub fn input(&self) -> Input<'p> {
        self.input
    }

    pub fn table(&self) -> &'p CombinatorTable {
        self.table
    }

    pub fn host(&self) -> Option<&'p dyn Host> {
        self.host
    }

    /// Whether literal comparisons distinguish case.
    pub fn is_exact(&self) -> bool {
        self.exact
    }

    /// Record an attempted input position. Monotonic: the tracker only moves
    /// forward, no matter how the attempt turns out.
    pub fn note_position(&mut self, pos: Pos) {
        if let Some(furthest) = &mut self.furthest {
            *furthest = (*furthest).max(pos);
        }
    }

    pub fn furthest(&self) -> Option<Pos> {
        self.furthest
    }

    // -- pending accumulation ------------------------------------------------
    //
    // An append-only log with length checkpoints. Backtracking truncates to
    // the checkpoint taken before the abandoned attempt; see Matcher::run.

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn push_pending(&mut self, value: Value) {
        self.pending.push(value);
    }

    pub fn truncate_pending(&mut self, mark: usize) {
        self.pending.truncate(mark);
    }

    /// Remove and return everything accumulated since `mark`.
    pub fn drain_pending(&mut self, mark: usize) -> Vec<Value> {
        self.pending.split_off(mark)
    }

    pub fn take_pending(&mut self) -> Vec<Value> {
        std::mem::take(&mut self.pending)
    }

    // -- iteration control ---------------------------------------------------

    /// Register an exitable scope for a quantifier/loop combinator. The
    /// matching [`exit_loop`](Self::exit_loop) must run on every path out of
    /// the combinator.
    pub fn enter_loop(&mut self) -> LoopId {
        let id = LoopId(self.next_loop);
        self.next_loop += 1;
        self.loops.push(id);
        id
    }

    pub fn exit_loop(&mut self, id: LoopId) {
        let top = self.loops.pop();
        debug_assert_eq!(top, Some(id), "iteration scopes must unwind in order");
    }

    /// The innermost registered loop scope, if any.
    pub fn current_loop(&self) -> Option<LoopId> {
        self.loops.last().copied()
    }

    pub fn loops_balanced(&self) -> bool {
        self.loops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_input_positions_are_byte_offsets() {
        let input = Input::Text("héllo");
        let (v, p) = input.take(Pos(1)).unwrap();
        assert_eq!(v, Value::Char('é'));
        assert_eq!(p, Pos(3));
        assert!(input.take(input.end()).is_none());
    }

    #[test]
    fn case_folding_applies_to_text_and_chars_only() {
        let input = Input::Values(&[Value::Text("AB".into())]);
        assert!(values_eq(&Value::text("ab"), &Value::text("AB"), false));
        assert!(!values_eq(&Value::text("ab"), &Value::text("AB"), true));
        assert!(!values_eq(&Value::word("ab"), &Value::word("AB"), false));
        assert_eq!(input.match_text(Pos(0), "ab", false), Some(Pos(1)));
        assert_eq!(input.match_text(Pos(0), "ab", true), None);
    }

    #[test]
    fn match_text_over_str_tracks_actual_byte_length() {
        let input = Input::Text("Straße!");
        assert_eq!(input.match_text(Pos(0), "straße", false), Some(Pos(7)));
        assert_eq!(input.match_text(Pos(0), "straße", true), None);
    }
}
