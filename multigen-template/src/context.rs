//! Template contexts.
//!
//! Every template sees one [`TemplateContext`] per element, built from the
//! element itself, task-specific extras and the generator-wide
//! [`GlobalContext`], in that order. Later sources overwrite earlier ones on
//! key collision, so global entries always win.

use std::ops::Index;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Ordered key/value pairs handed to templates.
pub type ContextMap = IndexMap<String, Value>;

/// Key under which the current element is stored.
pub const ELEMENT_KEY: &str = "element";

/// Model-wide generation context, shared read-only by all tasks of a
/// template generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GlobalContext(ContextMap);

impl GlobalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from arbitrary extra entries.
    pub fn from_extras<K, V>(extras: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self(
            extras
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Add an entry, replacing any previous value for `key`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ContextMap> for GlobalContext {
    fn from(map: ContextMap) -> Self {
        Self(map)
    }
}

/// Context for rendering one template for one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TemplateContext(ContextMap);

impl TemplateContext {
    /// Merge `element`, `extra` and `global`, in that order.
    ///
    /// # Errors
    ///
    /// Fails if `element` cannot be serialized.
    pub fn build<E>(
        element: &E,
        extra: ContextMap,
        global: &GlobalContext,
    ) -> Result<Self, serde_json::Error>
    where
        E: Serialize + ?Sized,
    {
        let mut context = ContextMap::with_capacity(1 + extra.len() + global.len());
        context.insert(ELEMENT_KEY.to_string(), serde_json::to_value(element)?);
        context.extend(extra);
        context.extend(global.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(Self(context))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_inner(self) -> ContextMap {
        self.0
    }
}

impl Index<&str> for TemplateContext {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if `key` is not present.
    fn index(&self, key: &str) -> &Value {
        &self.0[key]
    }
}
