//! Declarative environment-variable binding and string coercion.
//!
//! Replaces runtime field reflection with a schema each config type
//! declares: [`EnvBind::env_fields`] enumerates `(field, env name, typed
//! slot)` tuples in declaration order, and one generic engine walks them
//! depth-first, coercing raw environment strings into place.

use super::duration;
use crate::ConfigError;
use std::time::Duration;

/// Mutable view of a single bindable field.
pub enum EnvSlot<'a> {
    /// Assigned verbatim.
    String(&'a mut String),
    /// Base-10 signed integer at 8-bit width.
    I8(&'a mut i8),
    /// Base-10 signed integer at 16-bit width.
    I16(&'a mut i16),
    /// Base-10 signed integer at 32-bit width.
    I32(&'a mut i32),
    /// Base-10 signed integer at 64-bit width.
    I64(&'a mut i64),
    /// Base-10 unsigned integer at 8-bit width.
    U8(&'a mut u8),
    /// Base-10 unsigned integer at 16-bit width.
    U16(&'a mut u16),
    /// Base-10 unsigned integer at 32-bit width.
    U32(&'a mut u32),
    /// Base-10 unsigned integer at 64-bit width.
    U64(&'a mut u64),
    /// Base-10 float at 32-bit width.
    F32(&'a mut f32),
    /// Base-10 float at 64-bit width.
    F64(&'a mut f64),
    /// Canonical `true`/`false` literals.
    Bool(&'a mut bool),
    /// Duration literal made of integer+unit pairs, e.g. `5m30s`.
    Duration(&'a mut Duration),
    /// Comma-separated list; every element is whitespace-trimmed and empty
    /// elements are preserved.
    StringList(&'a mut Vec<String>),
    /// Nested sub-record resolved recursively.
    Nested(&'a mut dyn EnvBind),
}

/// One entry of a record's binding schema.
pub struct EnvField<'a> {
    /// Field name, used only for error context.
    pub field: &'static str,
    /// Environment-variable suffix; `None` means the field is not bound.
    pub env: Option<&'static str>,
    /// Typed slot written when the variable resolves.
    pub slot: EnvSlot<'a>,
}

impl<'a> EnvField<'a> {
    /// Binding for a field read from `prefix + env`.
    pub fn bound(field: &'static str, env: &'static str, slot: EnvSlot<'a>) -> Self {
        Self {
            field,
            env: Some(env),
            slot,
        }
    }

    /// Nested sub-record, resolved in place of any binding of its own.
    pub fn nested(field: &'static str, sub: &'a mut dyn EnvBind) -> Self {
        Self {
            field,
            env: None,
            slot: EnvSlot::Nested(sub),
        }
    }
}

/// Declares how a record's fields map to environment variables.
///
/// Fields without a binding are simply not enumerated and are never
/// touched by the environment overlay.
pub trait EnvBind {
    /// Enumerate bindings in field declaration order.
    fn env_fields(&mut self) -> Vec<EnvField<'_>>;
}

/// Overlay environment values onto `target`, depth-first in declaration
/// order. The first coercion failure aborts the pass; errors from nested
/// records are wrapped once per level with the nesting field's name.
pub(super) fn apply_env(
    target: &mut dyn EnvBind,
    prefix: &str,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    for binding in target.env_fields() {
        match binding.slot {
            EnvSlot::Nested(sub) => {
                apply_env(sub, prefix, lookup).map_err(|err| ConfigError::Field {
                    field: binding.field,
                    source: Box::new(err),
                })?;
            }
            slot => {
                let Some(name) = binding.env.filter(|name| !name.is_empty()) else {
                    continue;
                };
                let var = format!("{prefix}{name}");
                // Absent and empty are both "source absent": the field keeps
                // whatever value an earlier layer gave it.
                let Some(raw) = lookup(&var).filter(|value| !value.is_empty()) else {
                    continue;
                };
                coerce(slot, &var, &raw)?;
            }
        }
    }
    Ok(())
}

/// Write one raw environment string into a typed slot.
fn coerce(slot: EnvSlot<'_>, var: &str, raw: &str) -> Result<(), ConfigError> {
    macro_rules! parse_into {
        ($dst:expr, $kind:literal) => {{
            *$dst = raw
                .parse()
                .map_err(|err| coercion(var, raw, format!("invalid {} value: {err}", $kind)))?;
        }};
    }

    match slot {
        EnvSlot::String(dst) => *dst = raw.to_string(),
        EnvSlot::I8(dst) => parse_into!(dst, "integer"),
        EnvSlot::I16(dst) => parse_into!(dst, "integer"),
        EnvSlot::I32(dst) => parse_into!(dst, "integer"),
        EnvSlot::I64(dst) => parse_into!(dst, "integer"),
        EnvSlot::U8(dst) => parse_into!(dst, "unsigned integer"),
        EnvSlot::U16(dst) => parse_into!(dst, "unsigned integer"),
        EnvSlot::U32(dst) => parse_into!(dst, "unsigned integer"),
        EnvSlot::U64(dst) => parse_into!(dst, "unsigned integer"),
        EnvSlot::F32(dst) => parse_into!(dst, "float"),
        EnvSlot::F64(dst) => parse_into!(dst, "float"),
        EnvSlot::Bool(dst) => parse_into!(dst, "boolean"),
        EnvSlot::Duration(dst) => {
            *dst = duration::parse_duration(raw)
                .map_err(|reason| coercion(var, raw, format!("invalid duration value: {reason}")))?;
        }
        EnvSlot::StringList(dst) => {
            *dst = raw.split(',').map(|part| part.trim().to_string()).collect();
        }
        // Nested records are handled by the caller before coercion.
        EnvSlot::Nested(_) => {}
    }
    Ok(())
}

fn coercion(var: &str, value: &str, reason: String) -> ConfigError {
    ConfigError::Coercion {
        var: var.to_string(),
        value: value.to_string(),
        reason,
    }
}
