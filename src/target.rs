use std::collections::BTreeMap;

use crate::value::RawValue;

/// An element-like object exposing readable/writable named properties.
/// The engine reads current values from it at declaration time and the
/// scheduler applies freshly computed frames back onto it. Read or
/// write failures are the implementation's concern, not the engine's.
pub trait Target {
    /// Current value of a named property, or `None` if the target has
    /// no such property.
    fn read(&self, property: &str) -> Option<RawValue>;

    /// Write a rendered value onto a named property.
    fn write(&mut self, property: &str, value: &str);
}

/// In-memory target backed by a property map. Used by tests and doc
/// examples, and handy as a scratch target for headless runs.
#[derive(Clone, Debug, Default)]
pub struct PropertyMap {
    values: BTreeMap<String, RawValue>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a property, builder style.
    pub fn with(mut self, property: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(property, value);
        self
    }

    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<RawValue>) {
        self.values.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&RawValue> {
        self.values.get(property)
    }
}

impl Target for PropertyMap {
    fn read(&self, property: &str) -> Option<RawValue> {
        self.values.get(property).cloned()
    }

    fn write(&mut self, property: &str, value: &str) {
        self.values
            .insert(property.to_string(), RawValue::Text(value.to_string()));
    }
}

/// Environment-specific property-name normalization (e.g. vendor
/// prefixing). Pure string-to-string, no side effects; applied to every
/// property name entering the engine.
pub trait AliasResolver {
    fn resolve(&self, property: &str) -> String;
}

/// Identity resolver, the default.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAliases;

impl AliasResolver for NoAliases {
    fn resolve(&self, property: &str) -> String {
        property.to_string()
    }
}

/// Table-driven resolver: names with an entry map to their alias,
/// everything else passes through unchanged.
#[derive(Clone, Debug, Default)]
pub struct StaticAliases {
    map: BTreeMap<String, String>,
}

impl StaticAliases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alias(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.map.insert(from.into(), to.into());
        self
    }
}

impl AliasResolver for StaticAliases {
    fn resolve(&self, property: &str) -> String {
        self.map
            .get(property)
            .cloned()
            .unwrap_or_else(|| property.to_string())
    }
}
