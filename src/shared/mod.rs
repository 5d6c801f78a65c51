pub mod errors;
pub mod macros;
pub mod structs;

pub use errors::ConfigurationError;
pub use errors::InvalidRequestError;
pub use errors::ReportError;
pub use structs::format_destinations;
pub use structs::Direction;
pub use structs::ElevatorSnapshot;
pub use structs::ElevatorStatus;
pub use structs::Request;
