/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::path::PathBuf;
use thiserror::Error;

/***************************************/
/*            Error types              */
/***************************************/

/// Fatal problems detected before the simulation starts.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to read configuration file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// A caller passed an elevator id or floor that does not exist.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidRequestError {
    #[error("Floor {floor} outside of building range [1, {n_floors}]")]
    FloorOutOfRange { floor: u32, n_floors: u32 },

    #[error("Elevator {id} outside of range [1, {n_elevators}]")]
    UnknownElevator { id: usize, n_elevators: usize },
}

/// A passenger record that cannot have come from a correct run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Passenger {id} report is invalid: {reason}")]
    InvalidRecord { id: u64, reason: String },
}
