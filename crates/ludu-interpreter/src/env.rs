//! Environment and bindings for the LuduScript interpreter.

use std::collections::{HashMap, HashSet};

use crate::record::Record;
use crate::value::Value;
use ludu_syntax::error::{error, Result};

/// The record currently being built by an `obj` statement.
#[derive(Debug)]
struct ObjectBuilder {
    record: Record,
    /// Fields written by a declaration or assignment in the body
    declared: HashSet<String>,
}

/// Runtime state of one program run: the scope stack, the active object and
/// the records emitted so far.
#[derive(Debug)]
pub struct Env {
    /// Innermost scope last; the first scope is global and never popped
    scopes: Vec<HashMap<String, Value>>,
    object: Option<ObjectBuilder>,
    output: Vec<Record>,
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl Env {
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
            object: None,
            output: Vec::new(),
        }
    }

    pub(crate) fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub(crate) fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Looks `name` up from the innermost scope outwards.
    pub fn get_var(&self, name: &str) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Updates the innermost binding of `name`, or creates one in the
    /// innermost scope when no scope binds it.
    pub fn set_var(&mut self, name: &str, val: Value) {
        if !self.assign_existing(name, val.clone()) {
            self.define(name, val);
        }
    }

    /// Binds `name` in the innermost scope, shadowing any outer binding.
    pub(crate) fn define(&mut self, name: &str, val: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), val);
        }
    }

    /// Updates an existing binding in place. Returns false when no scope
    /// binds `name`.
    pub(crate) fn assign_existing(&mut self, name: &str, val: Value) -> bool {
        match self
            .scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.get_mut(name))
        {
            Some(slot) => {
                *slot = val;
                true
            }
            None => false,
        }
    }

    /// Global bindings, e.g. for inspecting a finished run.
    pub fn vars_snapshot(&self) -> Vec<(String, Value)> {
        let mut vars: Vec<(String, Value)> = self.scopes[0]
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        vars.sort_by(|a, b| a.0.cmp(&b.0));
        vars
    }

    pub fn in_object(&self) -> bool {
        self.object.is_some()
    }

    /// Starts a record with `class` set. The id is evaluated afterwards, with
    /// the object active, and stored through [`Env::set_id`].
    pub(crate) fn begin_object(&mut self, class: &str) -> Result<()> {
        if self.object.is_some() {
            return error("Nested obj is not supported");
        }
        self.object = Some(ObjectBuilder {
            record: Record::new(class),
            declared: HashSet::new(),
        });
        Ok(())
    }

    pub(crate) fn set_id(&mut self, id: Value) {
        if let Some(obj) = self.object.as_mut() {
            obj.record.set_id(id);
        }
    }

    /// Current value of a field the active object's body has declared.
    pub(crate) fn declared_field(&self, name: &str) -> Option<Value> {
        let obj = self.object.as_ref()?;
        if !obj.declared.contains(name) {
            return None;
        }
        obj.record.get(name).map(|f| f.to_value())
    }

    /// Writes a field of the active object and marks it declared. Returns
    /// false when no object is active.
    pub(crate) fn write_field(&mut self, name: &str, val: Value) -> bool {
        match self.object.as_mut() {
            Some(obj) => {
                obj.record.set(name, val);
                obj.declared.insert(name.to_string());
                true
            }
            None => false,
        }
    }

    /// Appends the active object to the output and clears it.
    pub(crate) fn finish_object(&mut self) {
        if let Some(obj) = self.object.take() {
            self.output.push(obj.record);
        }
    }

    /// Drops the active object without emitting it.
    pub(crate) fn discard_object(&mut self) {
        self.object = None;
    }

    pub fn output(&self) -> &[Record] {
        &self.output
    }

    pub(crate) fn take_output(&mut self) -> Vec<Record> {
        std::mem::take(&mut self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Field;

    #[test]
    fn test_set_var_updates_innermost_binding() {
        let mut env = Env::new();
        env.set_var("x", Value::int(1));
        env.push_scope();
        env.set_var("x", Value::int(2));
        env.pop_scope();
        assert_eq!(env.get_var("x"), Some(&Value::int(2)));
    }

    #[test]
    fn test_set_var_defines_in_innermost_scope() {
        let mut env = Env::new();
        env.push_scope();
        env.set_var("tmp", Value::str("a"));
        assert_eq!(env.get_var("tmp"), Some(&Value::str("a")));
        env.pop_scope();
        assert_eq!(env.get_var("tmp"), None);
    }

    #[test]
    fn test_object_lifecycle() {
        let mut env = Env::new();
        env.begin_object("Seat").unwrap();
        assert!(env.begin_object("Other").is_err());
        env.set_id(Value::int(4));
        assert!(env.write_field("hp", Value::int(9)));
        assert_eq!(env.declared_field("hp"), Some(Value::int(9)));
        assert_eq!(env.declared_field("class"), None);
        env.finish_object();
        assert!(!env.in_object());
        assert!(!env.write_field("hp", Value::int(1)));
        assert_eq!(env.output()[0].id(), Some(&Field::Int(4)));
    }
}
