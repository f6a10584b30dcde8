/***************************************/
/*        3rd party libraries          */
/***************************************/
use thiserror::Error;

/***************************************/
/*             Error types             */
/***************************************/
#[derive(Debug, Error)]
pub enum ElevatorError {
    #[error("an elevator needs at least one floor")]
    InvalidFloorCount,

    #[error("rider {rider} requested floor {floor}, building has floors 0..{n_floors}")]
    FloorOutOfRange {
        rider: String,
        floor: u8,
        n_floors: u8,
    },

    #[error("rider {rider} has origin and destination {floor}")]
    SameFloor { rider: String, floor: u8 },

    #[error("scheduler thread already started")]
    AlreadyStarted,

    #[error("failed to spawn scheduler thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("scheduler thread panicked")]
    Panicked,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type ElevatorResult<T> = Result<T, ElevatorError>;
