use serde_json::Value as JsonValue;

/// A literal property value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalar {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Number(f64),
}

impl Scalar {
    /// Numeric view; `Int` widens, `Bool` has none.
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Scalar::Int(v) => Some(v as f64),
            Scalar::Number(v) => Some(v),
            Scalar::Bool(_) => None,
        }
    }

    /// Boolean view; numbers have none.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Scalar::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// JSON form; non-finite numbers become `null`.
    pub fn to_json(self) -> JsonValue {
        match self {
            Scalar::Bool(v) => JsonValue::Bool(v),
            Scalar::Int(v) => JsonValue::from(v),
            Scalar::Number(v) => serde_json::Number::from_f64(v)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
        }
    }

    /// Parse a JSON scalar without applying any property schema.
    pub fn from_json(v: &JsonValue) -> Option<Self> {
        match v {
            JsonValue::Bool(b) => Some(Scalar::Bool(*b)),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Some(Scalar::Int(i)),
                None => n.as_f64().map(Scalar::Number),
            },
            _ => None,
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(i64::from(v))
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Number(v)
    }
}

/// Reference to external time-indexed data with a static fallback.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    /// Key passed to [`crate::DataProvider::resolve`].
    pub data_key: String,
    /// Value used until data resolves.
    pub default: Scalar,
}

/// A stored configuration value: either a literal or a data binding.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigValue {
    /// Constant value.
    Literal(Scalar),
    /// Value resolved from external data.
    Bound(Binding),
}

impl ConfigValue {
    /// The literal, if not bound.
    pub fn literal(&self) -> Option<Scalar> {
        match self {
            ConfigValue::Literal(s) => Some(*s),
            ConfigValue::Bound(_) => None,
        }
    }

    /// The binding, if bound.
    pub fn binding(&self) -> Option<&Binding> {
        match self {
            ConfigValue::Bound(b) => Some(b),
            ConfigValue::Literal(_) => None,
        }
    }

    /// Value to apply before any data has been resolved.
    pub fn initial(&self) -> Scalar {
        match self {
            ConfigValue::Literal(s) => *s,
            ConfigValue::Bound(b) => b.default,
        }
    }

    /// JSON form as accepted by config objects.
    pub fn to_json(&self) -> JsonValue {
        match self {
            ConfigValue::Literal(s) => s.to_json(),
            ConfigValue::Bound(b) => serde_json::json!({
                "bind": b.data_key,
                "default": b.default.to_json(),
            }),
        }
    }
}

impl From<Scalar> for ConfigValue {
    fn from(v: Scalar) -> Self {
        ConfigValue::Literal(v)
    }
}
