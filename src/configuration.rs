use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{
    Deserialize,
    Serialize
};
use tracing::debug;

use crate::function::function::Function;
use crate::function::functionerror::FunctionError;
use crate::math::integration::integrate;
use crate::tabulated::tabulatedfunction::{
    StorageKind,
    TabulatedFunction
};
use crate::tabulated::tabulatedfunctions::tabulate_into;

/// Engine defaults, usually loaded from a JSON file such as
///
/// ```json
/// { "storage": "LinkedList", "tabulation_points": 201, "integration_step": 0.0005 }
/// ```
///
/// Missing fields fall back to [`Configuration::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    storage: StorageKind,
    tabulation_points: usize,
    integration_step: f64,
}

impl Default for Configuration {
    fn default() -> Configuration {
        Configuration {
            storage: StorageKind::Array,
            tabulation_points: 101,
            integration_step: 1e-3,
        }
    }
}

impl Configuration {
    pub fn new(storage: StorageKind, tabulation_points: usize, integration_step: f64) -> Result<Configuration, FunctionError> {
        let config = Configuration { storage, tabulation_points, integration_step };
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json_value: serde_json::Value) -> Result<Configuration, FunctionError> {
        let config: Configuration = serde_json::from_value(json_value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_reader(file_path: impl AsRef<Path>) -> Result<Configuration, FunctionError> {
        let file = File::open(file_path.as_ref())?;
        let reader = BufReader::new(file);
        let config: Configuration = serde_json::from_reader(reader)?;
        config.validate()?;
        debug!(path = %file_path.as_ref().display(), ?config, "loaded configuration");
        Ok(config)
    }

    fn validate(&self) -> Result<(), FunctionError> {
        if self.tabulation_points < 2 {
            return Err(FunctionError::invalid_argument(format!(
                "tabulation_points must be at least 2, got {}",
                self.tabulation_points
            )));
        }
        if !(self.integration_step > 0.0) {
            return Err(FunctionError::invalid_argument(format!(
                "integration_step must be positive, got {}",
                self.integration_step
            )));
        }
        Ok(())
    }

    pub fn storage(&self) -> StorageKind {
        self.storage
    }

    pub fn tabulation_points(&self) -> usize {
        self.tabulation_points
    }

    pub fn integration_step(&self) -> f64 {
        self.integration_step
    }

    pub fn tabulate(&self, function: &dyn Function, left_x: f64, right_x: f64) -> Result<Box<dyn TabulatedFunction>, FunctionError> {
        tabulate_into(function, left_x, right_x, self.tabulation_points, self.storage)
    }

    pub fn tabulate_values(&self, left_x: f64, right_x: f64, values: &[f64]) -> Result<Box<dyn TabulatedFunction>, FunctionError> {
        self.storage.create_from_values(left_x, right_x, values)
    }

    pub fn integrate(&self, function: &dyn Function, left_x: f64, right_x: f64) -> Result<f64, FunctionError> {
        integrate(function, left_x, right_x, self.integration_step)
    }
}
