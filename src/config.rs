//! Loading scaling configuration from documents
//!
//! The controller accepts any [`ScalingConfig`] as-is. The loaders here read
//! configuration written by operators, so they run [`ScalingConfig::validate`]
//! before handing the config back. Missing keys fall back to the defaults.

#[cfg(feature = "config-toml")]
use std::path::Path;

use crate::error::{ScalerError, ScalerResult};
use crate::types::ScalingConfig;

impl ScalingConfig {
    /// Check the parameters for combinations that produce meaningless targets
    pub fn validate(&self) -> ScalerResult<()> {
        if !self.worker_to_job_ratio.is_finite() || self.worker_to_job_ratio <= 0.0 {
            return Err(ScalerError::config(format!(
                "worker_to_job_ratio must be a positive number, got {}",
                self.worker_to_job_ratio
            )));
        }
        if self.cpu_per_machine == 0 {
            return Err(ScalerError::config("cpu_per_machine must be at least 1"));
        }
        if self.scale_interval_ms == 0 {
            return Err(ScalerError::config("scale_interval_ms must be greater than zero"));
        }
        if self.max_worker < self.min_worker {
            return Err(ScalerError::config(format!(
                "max_worker ({}) must not be below min_worker ({})",
                self.max_worker, self.min_worker
            )));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ScalerResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "config-toml")]
    pub fn from_toml_str(input: &str) -> ScalerResult<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "config-toml")]
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ScalerResult<Self> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }

    /// Parse the first YAML document; an empty input yields the defaults
    #[cfg(feature = "config-yaml")]
    pub fn from_yaml_str(input: &str) -> ScalerResult<Self> {
        let docs = yaml_rust::YamlLoader::load_from_str(input)?;
        let mut config = Self::default();

        if let Some(doc) = docs.first() {
            if let Some(ratio) = yaml::number(doc, "worker_to_job_ratio")? {
                config.worker_to_job_ratio = ratio;
            }
            if let Some(cpus) = yaml::integer(doc, "cpu_per_machine")? {
                config.cpu_per_machine = cpus;
            }
            if let Some(cpus) = yaml::integer(doc, "fix_used_cpu")? {
                config.fix_used_cpu = cpus;
            }
            if let Some(workers) = yaml::integer(doc, "boost_min_worker")? {
                config.boost_min_worker = workers;
            }
            if let Some(workers) = yaml::integer(doc, "min_worker")? {
                config.min_worker = workers;
            }
            if let Some(workers) = yaml::integer(doc, "max_worker")? {
                config.max_worker = workers;
            }
            if let Some(ms) = yaml::integer(doc, "scale_interval_ms")? {
                config.scale_interval_ms = ms;
            }
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(feature = "config-yaml")]
mod yaml {
    use yaml_rust::Yaml;

    use crate::error::{ScalerError, ScalerResult};

    pub(super) fn number(doc: &Yaml, key: &str) -> ScalerResult<Option<f64>> {
        match &doc[key] {
            Yaml::BadValue | Yaml::Null => Ok(None),
            Yaml::Integer(i) => Ok(Some(*i as f64)),
            value @ Yaml::Real(_) => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| ScalerError::config(format!("'{}' is not a valid number", key))),
            _ => Err(ScalerError::config(format!("'{}' must be a number", key))),
        }
    }

    pub(super) fn integer<T: TryFrom<i64>>(doc: &Yaml, key: &str) -> ScalerResult<Option<T>> {
        match &doc[key] {
            Yaml::BadValue | Yaml::Null => Ok(None),
            Yaml::Integer(i) => T::try_from(*i).map(Some).map_err(|_| {
                ScalerError::config(format!("'{}' is out of range: {}", key, i))
            }),
            _ => Err(ScalerError::config(format!("'{}' must be an integer", key))),
        }
    }
}
