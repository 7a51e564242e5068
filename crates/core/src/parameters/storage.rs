//! Parameter store
//!
//! Named, typed tuning values registered with defaults at start-up and read
//! back into the parameter groups. Names follow the `GROUP_NAME` upper-case
//! convention and are at most [`PARAM_NAME_LEN`] bytes.

use super::error::ParameterError;
use bitflags::bitflags;
use heapless::index_map::FnvIndexMap;
use heapless::String;

/// Maximum parameter name length
pub const PARAM_NAME_LEN: usize = 16;

/// Maximum number of parameters
pub const MAX_PARAMS: usize = 32;

bitflags! {
    /// Parameter flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Not listed by `iter_names`
        const HIDDEN = 0b00000001;
        /// Rejected by `set`
        const READ_ONLY = 0b00000010;
    }
}

/// Parameter value types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit floating point
    Float(f32),
}

impl ParamValue {
    /// Numeric view; booleans read as 0.0 / 1.0
    pub fn as_f32(&self) -> f32 {
        match *self {
            ParamValue::Bool(b) => {
                if b {
                    1.0
                } else {
                    0.0
                }
            }
            ParamValue::Int(v) => v as f32,
            ParamValue::Float(v) => v,
        }
    }

    /// Truthiness; numbers are true when non-zero
    pub fn as_bool(&self) -> bool {
        match *self {
            ParamValue::Bool(b) => b,
            ParamValue::Int(v) => v != 0,
            ParamValue::Float(v) => v != 0.0,
        }
    }
}

/// Parameter metadata
#[derive(Debug, Clone)]
pub struct ParamMetadata {
    pub flags: ParamFlags,
}

/// Key-value parameter store with per-entry flags
pub struct ParameterStore {
    parameters: FnvIndexMap<String<PARAM_NAME_LEN>, ParamValue, MAX_PARAMS>,
    metadata: FnvIndexMap<String<PARAM_NAME_LEN>, ParamMetadata, MAX_PARAMS>,
    /// Set by `register`/`set`, cleared once the caller has persisted
    dirty: bool,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self {
            parameters: FnvIndexMap::new(),
            metadata: FnvIndexMap::new(),
            dirty: false,
        }
    }

    fn key(name: &str) -> Result<String<PARAM_NAME_LEN>, ParameterError> {
        let mut key = String::<PARAM_NAME_LEN>::new();
        key.push_str(name)
            .map_err(|_| ParameterError::InvalidConfig)?;
        Ok(key)
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        let key = Self::key(name).ok()?;
        self.parameters.get(&key)
    }

    /// Numeric value of `name`, if registered
    pub fn get_f32(&self, name: &str) -> Option<f32> {
        self.get(name).map(ParamValue::as_f32)
    }

    /// Boolean value of `name`, if registered
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).map(ParamValue::as_bool)
    }

    /// Set an existing, writable parameter
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let key = Self::key(name)?;

        if !self.parameters.contains_key(&key) {
            return Err(ParameterError::InvalidConfig);
        }

        if let Some(meta) = self.metadata.get(&key) {
            if meta.flags.contains(ParamFlags::READ_ONLY) {
                return Err(ParameterError::ReadOnly);
            }
        }

        self.parameters
            .insert(key, value)
            .map_err(|_| ParameterError::StoreFull)?;
        self.dirty = true;
        Ok(())
    }

    /// Register a parameter with its default.
    ///
    /// Registering an existing name keeps its current value.
    pub fn register(
        &mut self,
        name: &str,
        default_value: ParamValue,
        flags: ParamFlags,
    ) -> Result<(), ParameterError> {
        let key = Self::key(name)?;

        if self.parameters.contains_key(&key) {
            return Ok(());
        }

        self.parameters
            .insert(key.clone(), default_value)
            .map_err(|_| ParameterError::StoreFull)?;
        self.metadata
            .insert(key, ParamMetadata { flags })
            .map_err(|_| ParameterError::StoreFull)?;
        self.dirty = true;
        Ok(())
    }

    pub fn is_hidden(&self, name: &str) -> bool {
        Self::key(name)
            .ok()
            .and_then(|key| self.metadata.get(&key))
            .is_some_and(|meta| meta.flags.contains(ParamFlags::HIDDEN))
    }

    /// Names of all visible parameters
    pub fn iter_names(&self) -> impl Iterator<Item = &String<PARAM_NAME_LEN>> {
        self.parameters
            .keys()
            .filter(|name| !self.is_hidden(name.as_str()))
    }

    /// Visible parameter count
    pub fn count(&self) -> usize {
        self.iter_names().count()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Total parameter count, hidden included
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn get_metadata(&self, name: &str) -> Option<&ParamMetadata> {
        let key = Self::key(name).ok()?;
        self.metadata.get(&key)
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}
