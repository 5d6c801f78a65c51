pub mod elevator;
pub mod fsm;
pub mod elevator_tests;

pub use elevator::Elevator;
pub use fsm::ElevatorFSM;
