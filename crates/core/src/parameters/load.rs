//! Typed reads with defaults for `*Params::from_store`

use super::storage::{ParamValue, ParameterStore};
use crate::math::clip;

/// Float setting clamped to `[min, max]`; missing, mistyped or NaN → `default`
pub(crate) fn load_float(store: &ParameterStore, name: &str, default: f32, min: f32, max: f32) -> f32 {
    let value = match store.get(name) {
        Some(ParamValue::Float(v)) => *v,
        Some(ParamValue::Int(v)) => *v as f32,
        _ => return default,
    };
    if value.is_nan() {
        return default;
    }
    clip(value, min, max)
}

/// Integer setting clamped to `[min, max]`; missing or mistyped → `default`
pub(crate) fn load_int(store: &ParameterStore, name: &str, default: i32, min: i32, max: i32) -> i32 {
    match store.get(name) {
        Some(ParamValue::Int(v)) => (*v).clamp(min, max),
        _ => default,
    }
}

/// Boolean setting; missing or mistyped → `default`
pub(crate) fn load_bool(store: &ParameterStore, name: &str, default: bool) -> bool {
    match store.get(name) {
        Some(ParamValue::Bool(v)) => *v,
        _ => default,
    }
}
