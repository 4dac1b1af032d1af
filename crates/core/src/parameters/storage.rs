//! Settings Store
//!
//! Provides the setting value types and the `ParameterStore` the planner
//! polls for its toggles. Persistence backends live outside this crate.

use super::error::ParameterError;
use bitflags::bitflags;
use heapless::index_map::FnvIndexMap;
use heapless::String;

/// Maximum setting name length
pub const PARAM_NAME_LEN: usize = 32;

/// Maximum number of settings (power of two)
pub const MAX_PARAMS: usize = 128;

bitflags! {
    /// Setting flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Runtime-only value; writes do not change the store revision
        const VOLATILE = 0b00000001;
        /// Value cannot be changed through `set`
        const READ_ONLY = 0b00000010;
    }
}

/// Setting value types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    /// Toggle
    Bool(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit floating point
    Float(f32),
}

impl ParamValue {
    /// Get type discriminant
    pub fn type_id(&self) -> u8 {
        match self {
            ParamValue::Bool(_) => 0,
            ParamValue::Int(_) => 1,
            ParamValue::Float(_) => 2,
        }
    }

    /// Check if `other` holds the same type
    pub fn same_type(&self, other: &ParamValue) -> bool {
        self.type_id() == other.type_id()
    }
}

/// Setting metadata
#[derive(Debug, Clone)]
pub struct ParamMetadata {
    /// Setting flags
    pub flags: ParamFlags,
}

/// Key-value settings store
///
/// Settings are registered once with a default value and flags. Every
/// change to a non-volatile setting bumps `revision()`, which consumers poll
/// to know when to rebuild their configuration.
pub struct ParameterStore {
    /// Setting values
    parameters: FnvIndexMap<String<PARAM_NAME_LEN>, ParamValue, MAX_PARAMS>,
    /// Setting metadata
    metadata: FnvIndexMap<String<PARAM_NAME_LEN>, ParamMetadata, MAX_PARAMS>,
    /// Change counter for non-volatile settings
    revision: u32,
}

impl ParameterStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            parameters: FnvIndexMap::new(),
            metadata: FnvIndexMap::new(),
            revision: 0,
        }
    }

    /// Get setting value
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        let key = make_key(name).ok()?;
        self.parameters.get(&key)
    }

    /// Get a boolean setting
    pub fn get_bool(&self, name: &str) -> Result<bool, ParameterError> {
        match self.get(name) {
            Some(ParamValue::Bool(v)) => Ok(*v),
            Some(_) => Err(ParameterError::TypeMismatch),
            None => Err(ParameterError::InvalidConfig),
        }
    }

    /// Get an integer setting
    pub fn get_int(&self, name: &str) -> Result<i32, ParameterError> {
        match self.get(name) {
            Some(ParamValue::Int(v)) => Ok(*v),
            Some(_) => Err(ParameterError::TypeMismatch),
            None => Err(ParameterError::InvalidConfig),
        }
    }

    /// Get a float setting (integers are widened)
    pub fn get_float(&self, name: &str) -> Result<f32, ParameterError> {
        match self.get(name) {
            Some(ParamValue::Float(v)) => Ok(*v),
            Some(ParamValue::Int(v)) => Ok(*v as f32),
            Some(_) => Err(ParameterError::TypeMismatch),
            None => Err(ParameterError::InvalidConfig),
        }
    }

    /// Set setting value
    ///
    /// The value must match the registered type. Bumps the revision unless
    /// the setting is volatile.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let key = make_key(name)?;
        let flags = self.flags_of(&key)?;
        if flags.contains(ParamFlags::READ_ONLY) {
            return Err(ParameterError::ReadOnly);
        }
        self.write(key, value, flags)
    }

    /// Set a setting, ignoring `READ_ONLY`
    ///
    /// Used by the planner to publish status values that external writers
    /// must not touch.
    pub fn force_set(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let key = make_key(name)?;
        let flags = self.flags_of(&key)?;
        self.write(key, value, flags)
    }

    /// Register a new setting with default value and flags
    ///
    /// If the setting already exists, this is a no-op (idempotent).
    pub fn register(
        &mut self,
        name: &str,
        default_value: ParamValue,
        flags: ParamFlags,
    ) -> Result<(), ParameterError> {
        let key = make_key(name)?;

        if self.parameters.contains_key(&key) {
            // Already exists, don't overwrite
            return Ok(());
        }

        self.parameters
            .insert(key.clone(), default_value)
            .map_err(|_| ParameterError::StoreFull)?;
        self.metadata
            .insert(key, ParamMetadata { flags })
            .map_err(|_| ParameterError::StoreFull)?;
        if !flags.contains(ParamFlags::VOLATILE) {
            self.bump_revision();
        }
        Ok(())
    }

    /// Change counter of non-volatile settings
    pub fn revision(&self) -> u32 {
        self.revision
    }

    /// Get total setting count
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Iterate over all settings as (name, value) pairs
    pub fn iter_all(&self) -> impl Iterator<Item = (&String<PARAM_NAME_LEN>, &ParamValue)> {
        self.parameters.iter()
    }

    /// Get metadata for a setting by name
    pub fn get_metadata(&self, name: &str) -> Option<&ParamMetadata> {
        let key = make_key(name).ok()?;
        self.metadata.get(&key)
    }

    fn flags_of(&self, key: &String<PARAM_NAME_LEN>) -> Result<ParamFlags, ParameterError> {
        self.metadata
            .get(key)
            .map(|meta| meta.flags)
            .ok_or(ParameterError::InvalidConfig)
    }

    fn write(
        &mut self,
        key: String<PARAM_NAME_LEN>,
        value: ParamValue,
        flags: ParamFlags,
    ) -> Result<(), ParameterError> {
        match self.parameters.get_mut(&key) {
            Some(current) if current.same_type(&value) => {
                let changed = *current != value;
                *current = value;
                if changed && !flags.contains(ParamFlags::VOLATILE) {
                    self.revision = self.revision.wrapping_add(1);
                }
                Ok(())
            }
            Some(_) => Err(ParameterError::TypeMismatch),
            None => Err(ParameterError::InvalidConfig),
        }
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

fn make_key(name: &str) -> Result<String<PARAM_NAME_LEN>, ParameterError> {
    let mut key = String::<PARAM_NAME_LEN>::new();
    key.push_str(name)
        .map_err(|_| ParameterError::InvalidConfig)?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_value_type_id() {
        assert_eq!(ParamValue::Bool(true).type_id(), 0);
        assert_eq!(ParamValue::Int(42).type_id(), 1);
        assert_eq!(ParamValue::Float(1.0).type_id(), 2);
    }

    #[test]
    fn test_parameter_store_new() {
        let store = ParameterStore::new();
        assert!(store.is_empty());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_parameter_store_register_and_get() {
        let mut store = ParameterStore::new();
        store
            .register("CESpeed", ParamValue::Int(20), ParamFlags::empty())
            .unwrap();
        assert_eq!(store.get("CESpeed"), Some(&ParamValue::Int(20)));
        assert_eq!(store.get_int("CESpeed"), Ok(20));
        assert_eq!(store.get_float("CESpeed"), Ok(20.0));
    }

    #[test]
    fn test_parameter_store_set_bumps_revision() {
        let mut store = ParameterStore::new();
        store
            .register("StandardFollow", ParamValue::Float(1.45), ParamFlags::empty())
            .unwrap();
        let before = store.revision();
        store
            .set("StandardFollow", ParamValue::Float(1.6))
            .unwrap();
        assert_eq!(store.get_float("StandardFollow"), Ok(1.6));
        assert_eq!(store.revision(), before + 1);

        // Writing the same value is not a change
        store
            .set("StandardFollow", ParamValue::Float(1.6))
            .unwrap();
        assert_eq!(store.revision(), before + 1);
    }

    #[test]
    fn test_volatile_writes_keep_revision() {
        let mut store = ParameterStore::new();
        store
            .register("SLCConfirmed", ParamValue::Bool(false), ParamFlags::VOLATILE)
            .unwrap();
        let before = store.revision();
        store.set("SLCConfirmed", ParamValue::Bool(true)).unwrap();
        assert_eq!(store.revision(), before);
        assert_eq!(store.get_bool("SLCConfirmed"), Ok(true));
    }

    #[test]
    fn test_parameter_store_set_unknown() {
        let mut store = ParameterStore::new();
        assert_eq!(
            store.set("UNKNOWN", ParamValue::Int(1)),
            Err(ParameterError::InvalidConfig)
        );
    }

    #[test]
    fn test_parameter_store_type_mismatch() {
        let mut store = ParameterStore::new();
        store
            .register("CECurves", ParamValue::Bool(false), ParamFlags::empty())
            .unwrap();
        assert_eq!(
            store.set("CECurves", ParamValue::Int(1)),
            Err(ParameterError::TypeMismatch)
        );
        assert_eq!(store.get_int("CECurves"), Err(ParameterError::TypeMismatch));
    }

    #[test]
    fn test_parameter_store_register_idempotent() {
        let mut store = ParameterStore::new();
        store
            .register("CESpeed", ParamValue::Int(42), ParamFlags::empty())
            .unwrap();
        store.set("CESpeed", ParamValue::Int(100)).unwrap();
        // Re-register should not overwrite
        store
            .register("CESpeed", ParamValue::Int(42), ParamFlags::empty())
            .unwrap();
        assert_eq!(store.get("CESpeed"), Some(&ParamValue::Int(100)));
    }

    #[test]
    fn test_parameter_read_only() {
        let mut store = ParameterStore::new();
        store
            .register(
                "CEStatus",
                ParamValue::Int(0),
                ParamFlags::READ_ONLY | ParamFlags::VOLATILE,
            )
            .unwrap();
        assert_eq!(
            store.set("CEStatus", ParamValue::Int(12)),
            Err(ParameterError::ReadOnly)
        );
        store.force_set("CEStatus", ParamValue::Int(12)).unwrap();
        assert_eq!(store.get_int("CEStatus"), Ok(12));
    }

    #[test]
    fn test_name_too_long_rejected() {
        let mut store = ParameterStore::new();
        let long = "ThisSettingNameIsFarTooLongToBeStored";
        assert_eq!(
            store.register(long, ParamValue::Bool(true), ParamFlags::empty()),
            Err(ParameterError::InvalidConfig)
        );
        assert_eq!(store.get(long), None);
    }
}
