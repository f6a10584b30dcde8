/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "moving")]
    Moving,
    #[serde(rename = "servicing")]
    Servicing,
    #[serde(rename = "terminated")]
    Terminated,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn reversed(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/**
 * A ride request.
 *
 * Built by the caller and handed to the scheduler with `submit`. Only `boarded`
 * changes afterwards, and only from the control thread.
 *
 * # Fields
 * - `name`:        Identity used in events and snapshots.
 * - `origin`:      Floor the rider waits on.
 * - `destination`: Floor the rider leaves the car on.
 * - `boarded`:     Set once the rider has entered the car.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Rider {
    pub name: String,
    pub origin: u8,
    pub destination: u8,
    #[serde(default)]
    pub boarded: bool,
}

impl Rider {
    pub fn new(name: impl Into<String>, origin: u8, destination: u8) -> Rider {
        Rider {
            name: name.into(),
            origin,
            destination,
            boarded: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OnboardRider {
    pub name: String,
    pub destination: u8,
}

/// Read-only copy of the car, taken under the registry lock.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CarSnapshot {
    pub floor: u8,
    pub direction: Direction,
    pub behaviour: Behaviour,
    pub onboard: Vec<OnboardRider>,
    pub waiting: Vec<String>,
    pub stops: Vec<u8>,
}

impl CarSnapshot {
    /// True when nobody is waiting or riding and no stop is pending.
    pub fn is_drained(&self) -> bool {
        self.onboard.is_empty() && self.waiting.is_empty() && self.stops.is_empty()
    }
}
