pub mod controller;
pub mod strategy;
pub mod strategy_tests;

pub use controller::DispatchController;
pub use strategy::DecisionStrategy;
