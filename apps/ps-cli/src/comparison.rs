//! YAML description of a tuning comparison.

use std::path::Path;

use ps_controls::PidGains;
use ps_core::{Real, TimeGrid};
use ps_lti::TransferFunction;
use serde::Deserialize;

use crate::error::{CliError, CliResult};

pub const DEFAULT_PLANT_NUM: [Real; 1] = [5.0];
pub const DEFAULT_PLANT_DEN: [Real; 3] = [1.0, 11.0, 10.0];
pub const DEFAULT_T_END: Real = 5.0;
pub const DEFAULT_POINTS: usize = 500;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlantSpec {
    pub num: Vec<Real>,
    pub den: Vec<Real>,
}

impl Default for PlantSpec {
    fn default() -> Self {
        Self {
            num: DEFAULT_PLANT_NUM.to_vec(),
            den: DEFAULT_PLANT_DEN.to_vec(),
        }
    }
}

impl PlantSpec {
    pub fn build(&self) -> CliResult<TransferFunction> {
        Ok(TransferFunction::new(self.num.clone(), self.den.clone())?)
    }
}

/// Uniform grid from zero to `t_end`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub t_end: Real,
    pub points: usize,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            t_end: DEFAULT_T_END,
            points: DEFAULT_POINTS,
        }
    }
}

impl GridSpec {
    pub fn build(&self) -> CliResult<TimeGrid> {
        Ok(TimeGrid::linspace(0.0, self.t_end, self.points)?)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelledGains {
    pub label: String,
    #[serde(flatten)]
    pub gains: PidGains,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Comparison {
    #[serde(default)]
    pub plant: PlantSpec,
    #[serde(default)]
    pub grid: GridSpec,
    pub controllers: Vec<LabelledGains>,
}

impl Comparison {
    pub fn from_yaml(text: &str) -> CliResult<Self> {
        let comparison: Comparison = serde_yaml::from_str(text)?;
        if comparison.controllers.is_empty() {
            return Err(CliError::NoControllers);
        }
        Ok(comparison)
    }

    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// Controllers to run, with the uncontrolled plant first unless already listed.
    pub fn entries(&self) -> Vec<LabelledGains> {
        let mut entries = Vec::with_capacity(self.controllers.len() + 1);
        if !self.controllers.iter().any(|c| c.gains == PidGains::off()) {
            entries.push(LabelledGains {
                label: "uncontrolled".to_string(),
                gains: PidGains::off(),
            });
        }
        entries.extend(self.controllers.iter().cloned());
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_file_with_defaults() {
        let yaml = "controllers:\n  - label: manual\n    kp: 10\n    ki: 40\n    kd: 1.5\n";
        let cmp = Comparison::from_yaml(yaml).unwrap();

        assert_eq!(cmp.plant, PlantSpec::default());
        assert_eq!(cmp.grid, GridSpec::default());
        assert_eq!(cmp.controllers[0].gains, PidGains::new(10.0, 40.0, 1.5));
    }

    #[test]
    fn missing_gains_default_to_zero() {
        let yaml = "controllers:\n  - label: p-only\n    kp: 3\n";
        let cmp = Comparison::from_yaml(yaml).unwrap();
        assert_eq!(cmp.controllers[0].gains, PidGains::p(3.0));
    }

    #[test]
    fn baseline_is_always_included_once() {
        let yaml = "controllers:\n  - label: manual\n    kp: 10\n";
        let entries = Comparison::from_yaml(yaml).unwrap().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].gains, PidGains::off());

        let yaml = "controllers:\n  - label: none\n    kp: 0\n  - label: manual\n    kp: 10\n";
        let entries = Comparison::from_yaml(yaml).unwrap().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].label, "none");
    }

    #[test]
    fn empty_controller_list_is_rejected() {
        assert!(matches!(
            Comparison::from_yaml("controllers: []\n"),
            Err(CliError::NoControllers)
        ));
    }

    #[test]
    fn custom_plant_and_grid() {
        let yaml = "\
plant:
  num: [1]
  den: [1, 1]
grid:
  t_end: 2.0
  points: 21
controllers:
  - label: a
    kp: 1
";
        let cmp = Comparison::from_yaml(yaml).unwrap();
        assert_eq!(cmp.plant.build().unwrap().den(), &[1.0, 1.0]);
        assert_eq!(cmp.grid.build().unwrap().len(), 21);
    }
}
