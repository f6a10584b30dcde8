/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::error::ConfigError;
use crate::shared::Rider;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub elevator: ElevatorConfig,
    #[serde(default)]
    pub scenario: ScenarioConfig,
}

/**
 * Timing and size of the simulated car. All times are in milliseconds.
 *
 * # Fields
 * - `n_floors`:        Number of floors served, numbered `0..n_floors`.
 * - `step_time`:       Travel time for one floor.
 * - `dwell_time`:      Pause after boarding/alighting at a stop.
 * - `idle_poll_time`:  How often an idle car rechecks for requests.
 */
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ElevatorConfig {
    pub n_floors: u8,
    pub step_time: u64,
    pub dwell_time: u64,
    pub idle_poll_time: u64,
}

impl ElevatorConfig {
    pub fn with_floors(n_floors: u8) -> ElevatorConfig {
        ElevatorConfig {
            n_floors,
            ..ElevatorConfig::default()
        }
    }

    pub fn step_duration(&self) -> Duration {
        Duration::from_millis(self.step_time)
    }

    pub fn dwell_duration(&self) -> Duration {
        Duration::from_millis(self.dwell_time)
    }

    pub fn idle_poll_duration(&self) -> Duration {
        Duration::from_millis(self.idle_poll_time)
    }
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        ElevatorConfig {
            n_floors: 10,
            step_time: 1000,
            dwell_time: 1000,
            idle_poll_time: 2000,
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct RiderConfig {
    pub name: String,
    pub origin: u8,
    pub destination: u8,
    // Milliseconds after start before the request is submitted
    #[serde(default)]
    pub delay: u64,
}

impl RiderConfig {
    pub fn to_rider(&self) -> Rider {
        Rider::new(self.name.clone(), self.origin, self.destination)
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub riders: Vec<RiderConfig>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        let rider = |name: &str, origin, destination| RiderConfig {
            name: name.to_string(),
            origin,
            destination,
            delay: 0,
        };

        ScenarioConfig {
            riders: vec![
                rider("user_1", 0, 7),
                rider("user2", 3, 9),
                rider("user_3", 2, 1),
            ],
        }
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&config_str)
}

pub fn parse_config(config_str: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(config_str)?)
}

/***************************************/
/*             Unit tests              */
/***************************************/
