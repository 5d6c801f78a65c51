pub mod generator;
pub mod generator_tests;
pub mod passenger;

pub use generator::PassengerGenerator;
pub use passenger::Passenger;
pub use passenger::PassengerRecord;
pub use passenger::PassengerStatus;
