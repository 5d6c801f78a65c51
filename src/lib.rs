/***************************************/
/*              Modules                */
/***************************************/
pub mod building;
pub mod clock;
pub mod config;
pub mod dispatch;
pub mod elevator;
pub mod passenger;
pub mod report;
pub mod shared;

/***************************************/
/*          Public re-exports          */
/***************************************/
pub use building::{Building, Floor, Floors};
pub use clock::SimClock;
pub use config::Config;
pub use dispatch::{DecisionStrategy, DispatchController};
pub use elevator::{Elevator, ElevatorFSM};
pub use passenger::{Passenger, PassengerGenerator, PassengerRecord};
pub use report::ReportCollector;
pub use shared::{Direction, ElevatorSnapshot, ElevatorStatus, Request};
