use crate::foundation::core::Size;
use crate::schema::property::PropertyKey;
use crate::schema::value::{Binding, ConfigValue, Scalar};
use serde::ser::SerializeMap;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Full property snapshot of one element.
///
/// Values returned by the builder are owned copies: mutating them never touches the
/// registry. Every [`PropertyKey`] is present once an element is registered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementConfig {
    values: BTreeMap<PropertyKey, ConfigValue>,
}

impl ElementConfig {
    /// Defaults for a freshly constructed element with the given content size.
    pub(crate) fn defaults(content: Size) -> Self {
        let mut values = BTreeMap::new();
        for key in PropertyKey::ALL {
            let v = match key {
                PropertyKey::Visible => Scalar::Bool(true),
                PropertyKey::ZIndex => Scalar::Int(0),
                PropertyKey::ScaleX | PropertyKey::ScaleY | PropertyKey::Opacity => {
                    Scalar::Number(1.0)
                }
                PropertyKey::Width => Scalar::Number(content.width),
                PropertyKey::Height => Scalar::Number(content.height),
                PropertyKey::OffsetX
                | PropertyKey::OffsetY
                | PropertyKey::Rotation
                | PropertyKey::AnchorX
                | PropertyKey::AnchorY => Scalar::Number(0.0),
            };
            values.insert(key, ConfigValue::Literal(v));
        }
        Self { values }
    }

    /// Stored value of `key`.
    pub fn get(&self, key: PropertyKey) -> Option<&ConfigValue> {
        self.values.get(&key)
    }

    /// Literal value of `key`; `None` when absent or bound.
    pub fn literal(&self, key: PropertyKey) -> Option<Scalar> {
        self.values.get(&key).and_then(ConfigValue::literal)
    }

    /// Numeric literal of `key`.
    pub fn get_f64(&self, key: PropertyKey) -> Option<f64> {
        self.literal(key).and_then(Scalar::as_f64)
    }

    /// Boolean literal of `key`.
    pub fn get_bool(&self, key: PropertyKey) -> Option<bool> {
        self.literal(key).and_then(Scalar::as_bool)
    }

    /// Integer literal of `key`.
    pub fn get_i64(&self, key: PropertyKey) -> Option<i64> {
        match self.literal(key)? {
            Scalar::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Binding stored for `key`, if bound.
    pub fn binding(&self, key: PropertyKey) -> Option<&Binding> {
        self.values.get(&key).and_then(ConfigValue::binding)
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyKey, &ConfigValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Return `true` when no key is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overwrite `key` in this copy. Unvalidated; feed changes back through
    /// [`crate::SceneBuilder::update_element_config`].
    pub fn set(&mut self, key: PropertyKey, value: impl Into<ConfigValue>) {
        self.values.insert(key, value.into());
    }

    /// Keys whose value differs between `self` and `other`.
    pub fn changed_keys(&self, other: &ElementConfig) -> Vec<PropertyKey> {
        PropertyKey::ALL
            .into_iter()
            .filter(|k| self.values.get(k) != other.values.get(k))
            .collect()
    }

    pub(crate) fn merge(&mut self, accepted: impl IntoIterator<Item = (PropertyKey, ConfigValue)>) {
        for (k, v) in accepted {
            self.values.insert(k, v);
        }
    }

    /// JSON object keyed by camelCase property names; bindings as `{"bind", "default"}`.
    pub fn to_json(&self) -> JsonValue {
        let obj = self
            .values
            .iter()
            .map(|(k, v)| (k.name().to_owned(), v.to_json()))
            .collect::<serde_json::Map<_, _>>();
        JsonValue::Object(obj)
    }
}

impl serde::Serialize for ElementConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (k, v) in &self.values {
            map.serialize_entry(k.name(), &v.to_json())?;
        }
        map.end()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/config.rs"]
mod tests;
