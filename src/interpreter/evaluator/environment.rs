use std::collections::HashMap;

use crate::interpreter::value::core::Value;

/// The single variable table of a run.
///
/// There is no scoping: assignments inside `IF` and `FOR` bodies, and loop
/// induction variables, all write to the same table and stay visible after
/// the statement that created them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    variables: HashMap<String, Value>,
}

impl Environment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a variable by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Binds `name` to `value`, overwriting any previous binding.
    pub fn assign(&mut self, name: &str, value: Value) {
        if let Some(slot) = self.variables.get_mut(name) {
            *slot = value;
        } else {
            self.variables.insert(name.to_string(), value);
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
