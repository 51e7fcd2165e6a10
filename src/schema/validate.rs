use crate::registry::kind::ElementKind;
use crate::schema::property::{PropertyKey, ValueKind};
use crate::schema::value::{Binding, ConfigValue, Scalar};
use serde_json::Value as JsonValue;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FieldError {
    pub(crate) field: String,
    pub(crate) message: String,
}

impl FieldError {
    fn at(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            return write!(f, "$: {}", self.message);
        }
        write!(f, "$.{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaErrors {
    pub(crate) errors: Vec<FieldError>,
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

/// Fields accepted from one config object, in key order.
#[derive(Debug, Clone, Default)]
pub(crate) struct ValidatedPatch {
    pub(crate) fields: Vec<(PropertyKey, ConfigValue)>,
    pub(crate) ignored: Vec<String>,
}

/// Validate a partial config object for `kind`.
///
/// All fields are checked and every failure is reported; the patch is only returned when
/// no field failed.
pub(crate) fn validate_patch(
    kind: ElementKind,
    patch: &JsonValue,
    strict_keys: bool,
) -> Result<ValidatedPatch, SchemaErrors> {
    let Some(obj) = patch.as_object() else {
        return Err(SchemaErrors {
            errors: vec![FieldError::at("", "config must be a JSON object")],
        });
    };

    let mut errors = Vec::new();
    let mut out = ValidatedPatch::default();

    for (name, raw) in obj {
        let Some(key) = PropertyKey::from_name(name) else {
            if strict_keys {
                errors.push(FieldError::at(name.as_str(), "unknown property"));
            } else {
                out.ignored.push(name.clone());
            }
            continue;
        };

        match validate_field(kind, key, raw) {
            Ok(v) => out.fields.push((key, v)),
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(out)
    } else {
        Err(SchemaErrors { errors })
    }
}

fn validate_field(
    kind: ElementKind,
    key: PropertyKey,
    raw: &JsonValue,
) -> Result<ConfigValue, FieldError> {
    if let JsonValue::Object(obj) = raw {
        if !kind.supports_bindings() {
            return Err(FieldError::at(
                key.name(),
                format!("element type '{}' does not support data bindings", kind.key()),
            ));
        }

        let mut data_key = None;
        let mut default = None;
        for (k, v) in obj {
            match k.as_str() {
                "bind" => data_key = Some(v),
                "default" => default = Some(v),
                other => {
                    return Err(FieldError::at(
                        key.name(),
                        format!("unknown binding field '{other}'"),
                    ));
                }
            }
        }

        let data_key = match data_key {
            Some(JsonValue::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(_) => {
                return Err(FieldError::at(
                    key.name(),
                    "binding 'bind' must be a non-empty string",
                ));
            }
            None => {
                return Err(FieldError::at(
                    key.name(),
                    "binding object requires a 'bind' data key",
                ));
            }
        };
        let Some(default) = default else {
            return Err(FieldError::at(
                key.name(),
                "binding object requires a static 'default'",
            ));
        };
        let default = json_scalar(key, default)
            .and_then(|s| validate_scalar(kind, key, s))
            .map_err(|msg| FieldError::at(key.name(), format!("binding default: {msg}")))?;

        return Ok(ConfigValue::Bound(Binding { data_key, default }));
    }

    json_scalar(key, raw)
        .and_then(|s| validate_scalar(kind, key, s))
        .map(ConfigValue::Literal)
        .map_err(|msg| FieldError::at(key.name(), msg))
}

fn json_scalar(key: PropertyKey, raw: &JsonValue) -> Result<Scalar, String> {
    Scalar::from_json(raw).ok_or_else(|| format!("expected {}", expected_name(key.value_kind())))
}

fn expected_name(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::Bool => "a boolean",
        ValueKind::Int => "an integer",
        ValueKind::Number => "a number",
    }
}

/// Check `value` against the type and range rules of `key` for `kind`, returning the
/// canonical scalar (integers widen to numbers, integral numbers narrow to integers).
pub(crate) fn validate_scalar(
    kind: ElementKind,
    key: PropertyKey,
    value: Scalar,
) -> Result<Scalar, String> {
    match key.value_kind() {
        ValueKind::Bool => match value {
            Scalar::Bool(b) => Ok(Scalar::Bool(b)),
            _ => Err("expected a boolean".to_owned()),
        },
        ValueKind::Int => {
            let v = match value {
                Scalar::Int(v) => v,
                Scalar::Number(v) if v.is_finite() && v.fract() == 0.0 => v as i64,
                _ => return Err("expected an integer".to_owned()),
            };
            if v < i64::from(i32::MIN) || v > i64::from(i32::MAX) {
                return Err("must fit in a 32-bit signed integer".to_owned());
            }
            Ok(Scalar::Int(v))
        }
        ValueKind::Number => {
            let Some(v) = value.as_f64() else {
                return Err("expected a number".to_owned());
            };
            if !v.is_finite() {
                return Err("must be finite".to_owned());
            }
            check_range(kind, key, v)?;
            Ok(Scalar::Number(v))
        }
    }
}

fn check_range(kind: ElementKind, key: PropertyKey, v: f64) -> Result<(), String> {
    match key {
        PropertyKey::AnchorX | PropertyKey::AnchorY | PropertyKey::Opacity => {
            if !(0.0..=1.0).contains(&v) {
                return Err("must be within [0, 1]".to_owned());
            }
        }
        PropertyKey::Width | PropertyKey::Height => {
            if kind.requires_visible_content() {
                if v <= 0.0 {
                    return Err(format!(
                        "must be > 0 for element type '{}'",
                        kind.key()
                    ));
                }
            } else if v < 0.0 {
                return Err("must be >= 0".to_owned());
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/schema/validate.rs"]
mod tests;
