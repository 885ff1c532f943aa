//! Binding modes and the default-mode heuristic for native form controls.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Direction of data flow for a property binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BindingMode {
    OneTime,
    OneWay,
    TwoWay,
}

impl BindingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BindingMode::OneTime => "one-time",
            BindingMode::OneWay => "one-way",
            BindingMode::TwoWay => "two-way",
        }
    }
}

impl fmt::Display for BindingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes that native controls write back to, keyed by lower-case tag.
static TWO_WAY_ATTRIBUTES: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
    map.insert("input", &["value", "checked"]);
    map.insert("textarea", &["value"]);
    map.insert("select", &["value"]);
    map
});

/// Mode used by `.bind`: two-way for the value-carrying attributes of
/// `input`, `textarea` and `select`, one-way for everything else.
pub fn determine_default_binding_mode(tag_name: &str, attr_name: &str) -> BindingMode {
    let tag_name = tag_name.to_ascii_lowercase();
    match TWO_WAY_ATTRIBUTES.get(tag_name.as_str()) {
        Some(attrs) if attrs.contains(&attr_name) => BindingMode::TwoWay,
        _ => BindingMode::OneWay,
    }
}
