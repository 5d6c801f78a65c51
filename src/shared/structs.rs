/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Direction a passenger travels from `source` to reach `destination`.
    pub fn between(source: u32, destination: u32) -> Option<Direction> {
        if destination > source {
            Some(Direction::Up)
        } else if destination < source {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "UP"),
            Direction::Down => write!(f, "DOWN"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElevatorStatus {
    Waiting,
    WaitingDefault,
    MovingUp,
    MovingDown,
    DoorsOpening,
    DoorsOpened,
    DoorsClosing,
}

impl ElevatorStatus {
    pub fn is_idle(&self) -> bool {
        matches!(self, ElevatorStatus::Waiting | ElevatorStatus::WaitingDefault)
    }

    pub fn moving(direction: Direction) -> ElevatorStatus {
        match direction {
            Direction::Up => ElevatorStatus::MovingUp,
            Direction::Down => ElevatorStatus::MovingDown,
        }
    }
}

/// An unassigned hall call waiting in the dispatcher's pending set.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Request {
    pub direction: Direction,
    pub floor: u32,
}

impl Request {
    pub fn new(direction: Direction, floor: u32) -> Request {
        Request { direction, floor }
    }
}

/// Point-in-time copy of an elevator, the only view a decision strategy gets.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ElevatorSnapshot {
    pub id: usize,
    pub current_floor: u32,
    pub status: ElevatorStatus,
    pub remaining_destinations: Vec<u32>,
}

impl ElevatorSnapshot {
    /// Idle and parked exactly at `floor`.
    pub fn is_idle_at(&self, floor: u32) -> bool {
        self.status.is_idle() && self.current_floor == floor
    }

    /// Travelling in `direction` and not yet past `floor`.
    pub fn is_approaching(&self, direction: Direction, floor: u32) -> bool {
        match (self.status, direction) {
            (ElevatorStatus::MovingUp, Direction::Up) => self.current_floor < floor,
            (ElevatorStatus::MovingDown, Direction::Down) => self.current_floor > floor,
            _ => false,
        }
    }
}

/// Formats a destination list the way the log lines print it: `[3, 5, 9]`.
pub fn format_destinations(destinations: &[u32]) -> String {
    let floors: Vec<String> = destinations.iter().map(|f| f.to_string()).collect();
    format!("[{}]", floors.join(", "))
}
