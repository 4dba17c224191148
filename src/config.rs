use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::PointVecError;

/// What the points of a set represent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointType {
    #[default]
    Point,
    Station,
}

/// Settings for building a [`PointVec`](crate::PointVec).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointVecConfig {
    /// Name of the point set.
    pub name: String,
    pub point_type: PointType,
    /// Tolerance relative to the bounding-box diagonal of the input.
    pub rel_eps: f64,
}

impl Default for PointVecConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            point_type: PointType::Point,
            rel_eps: f64::EPSILON,
        }
    }
}

impl PointVecConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn with_rel_eps(mut self, rel_eps: f64) -> Self {
        self.rel_eps = rel_eps;
        self
    }

    pub fn with_point_type(mut self, point_type: PointType) -> Self {
        self.point_type = point_type;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), PointVecError> {
        if !self.rel_eps.is_finite() || self.rel_eps < 0.0 {
            return Err(PointVecError::InvalidTolerance(self.rel_eps));
        }
        Ok(())
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(data).context("parse point set config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_json_str(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PointVecConfig::default();
        assert_eq!(config.rel_eps, f64::EPSILON);
        assert_eq!(config.point_type, PointType::Point);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = PointVecConfig::from_json_str(r#"{ "name": "wells", "point_type": "station" }"#).unwrap();
        assert_eq!(config.name, "wells");
        assert_eq!(config.point_type, PointType::Station);
        assert_eq!(config.rel_eps, f64::EPSILON);
    }

    #[test]
    fn negative_rel_eps_is_rejected() {
        assert!(PointVecConfig::from_json_str(r#"{ "rel_eps": -1.0 }"#).is_err());
        assert!(PointVecConfig::default().with_rel_eps(f64::NAN).validate().is_err());
    }
}
