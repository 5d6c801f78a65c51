/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::Path;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::dispatch::DecisionStrategy;
use crate::shared::ConfigurationError;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub building: BuildingConfig,
    pub elevator: ElevatorConfig,
    pub passengers: PassengerConfig,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SimulationConfig {
    pub duration_minutes: u64,
    pub time_scale: u32,
    #[serde(default)]
    pub strategy: DecisionStrategy,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_grace_period")]
    pub grace_period_secs: u64,
}

#[derive(Deserialize, Clone, Debug)]
pub struct BuildingConfig {
    pub n_floors: u32,
    pub n_elevators: usize,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ElevatorConfig {
    pub capacity: usize,
    pub floor_time_ms: u64,
    pub door_time_ms: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_ms: u64,
    pub default_floors: Vec<u32>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct PassengerConfig {
    pub per_minute: u32,
    pub floor_percentages: Vec<u32>,
}

fn default_idle_timeout() -> u64 {
    3000
}

fn default_grace_period() -> u64 {
    120
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: &Path) -> Result<Config, ConfigurationError> {
    let config_str = fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&config_str)
}

pub fn parse_config(config_str: &str) -> Result<Config, ConfigurationError> {
    let config: Config = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Rejects every setting the simulation cannot start with.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let n_floors = self.building.n_floors;
        let n_elevators = self.building.n_elevators;

        if n_floors < 1 {
            return Err(invalid("building must have at least one floor"));
        }
        if n_elevators < 1 {
            return Err(invalid("building must have at least one elevator"));
        }
        if self.simulation.duration_minutes == 0 {
            return Err(invalid("simulation duration must be positive"));
        }
        if self.simulation.time_scale == 0 {
            return Err(invalid("time scale must be positive"));
        }
        if self.elevator.capacity == 0 {
            return Err(invalid("elevator capacity must be positive"));
        }
        if self.elevator.floor_time_ms == 0 || self.elevator.door_time_ms == 0 {
            return Err(invalid("floor and door times must be positive"));
        }
        if self.elevator.idle_timeout_ms == 0 {
            return Err(invalid("idle timeout must be positive"));
        }
        if self.passengers.per_minute == 0 {
            return Err(invalid("passengers per minute must be positive"));
        }

        if self.elevator.default_floors.len() != n_elevators {
            return Err(invalid(&format!(
                "{} default floors given for {} elevators",
                self.elevator.default_floors.len(),
                n_elevators
            )));
        }
        if let Some(floor) = self
            .elevator
            .default_floors
            .iter()
            .find(|f| **f < 1 || **f > n_floors)
        {
            return Err(invalid(&format!(
                "default floor {} outside of building range [1, {}]",
                floor, n_floors
            )));
        }

        let percentages = &self.passengers.floor_percentages;
        if percentages.len() != n_floors as usize {
            return Err(invalid(&format!(
                "{} floor percentages given for {} floors",
                percentages.len(),
                n_floors
            )));
        }
        let total: u32 = percentages.iter().sum();
        if total != 100 {
            return Err(invalid(&format!(
                "floor percentages add up to {}, not 100",
                total
            )));
        }

        Ok(())
    }

    pub fn duration_secs(&self) -> u64 {
        self.simulation.duration_minutes * 60
    }
}

fn invalid(reason: &str) -> ConfigurationError {
    ConfigurationError::Invalid(reason.to_string())
}
