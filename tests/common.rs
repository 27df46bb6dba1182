#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use parlance::{run, Host, HostExit, Input, MatchReport, Options, Symbol, Value};

pub fn w(name: &str) -> Value {
    Value::word(name)
}

pub fn t(text: &str) -> Value {
    Value::text(text)
}

pub fn blk(items: impl Into<Vec<Value>>) -> Value {
    Value::block(items)
}

#[track_caller]
pub fn unwrap_display<T, E: std::fmt::Display>(r: Result<T, E>) -> T {
    match r {
        Ok(v) => v,
        Err(e) => panic!("{}", e),
    }
}

/// Run with default options, treating structural errors as test failures.
#[track_caller]
pub fn parse(input: Input<'_>, rules: &[Value]) -> MatchReport {
    unwrap_display(run(input, rules, &Options::default()))
}

/// A host with a fixed variable environment. Groups evaluate to null and are
/// recorded, except a group whose first element is the word `escape`, which
/// raises a non-local exit with the group's second element.
#[derive(Default)]
pub struct TestHost {
    vars: HashMap<String, Value>,
    pub evaluated: RefCell<Vec<Vec<Value>>>,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: &str, value: Value) -> Self {
        self.vars.insert(name.to_owned(), value);
        self
    }
}

impl Host for TestHost {
    fn get(&self, path: &[Symbol]) -> Option<Value> {
        let key = path
            .iter()
            .map(Symbol::as_str)
            .collect::<Vec<_>>()
            .join("/");
        self.vars.get(&key).cloned()
    }

    fn eval(&self, group: &[Value]) -> Result<Value, HostExit> {
        if let Some(Value::Word(head)) = group.first() {
            if head.as_str() == "escape" {
                let payload = group.get(1).cloned().unwrap_or(Value::None);
                return Err(HostExit::Escape(payload));
            }
        }
        self.evaluated.borrow_mut().push(group.to_vec());
        Ok(Value::None)
    }
}
