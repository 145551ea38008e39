// Data types for Parser module

use std::collections::HashMap;

/// Named parameters of a single tool call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolParams {
    values: HashMap<String, String>,
}

impl ToolParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, replacing any earlier value with the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ToolParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = ToolParams::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// One tool call found in a model response.
///
/// `kind` is kept as the raw attribute text; it is only checked against the
/// known tools when the executor dispatches the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRequest {
    pub kind: String,
    pub params: ToolParams,
    /// The matched `<tool_call ...>...</tool_call>` span
    pub raw: String,
}

impl ToolRequest {
    pub fn new(kind: impl Into<String>, params: ToolParams) -> Self {
        let kind = kind.into();
        Self {
            raw: String::new(),
            kind,
            params,
        }
    }
}
