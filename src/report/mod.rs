pub mod collector;

pub use collector::ReportCollector;
pub use collector::TimeStats;
