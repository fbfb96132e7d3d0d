//! Typed access to the raw parameter bag.
//!
//! Descriptors carry parameters as arbitrary JSON. Tools get a [`Parameters`]
//! view instead of the raw map so that shape violations surface as one
//! well-defined error at the point of extraction: either per key with
//! [`Parameters::require`], or for the whole bag at once with
//! [`Parameters::deserialize`] against a tool-defined struct.

use crate::error::HarnessError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub struct Parameters {
    values: Map<String, Value>,
}

impl Parameters {
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Extracts one required key, converting it to the requested type.
    pub fn require<T: DeserializeOwned>(&self, key: &str) -> Result<T, HarnessError> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| HarnessError::missing_parameter(key))?;
        serde_json::from_value(value.clone()).map_err(|err| HarnessError::Parameter {
            key: key.to_string(),
            message: format!("unexpected type: {err}"),
        })
    }

    /// Validates the entire bag against a tool-defined schema struct.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, HarnessError> {
        serde_json::from_value(Value::Object(self.values.clone()))
            .map_err(HarnessError::InvalidParameters)
    }
}
