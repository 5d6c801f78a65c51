/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{Direction, ElevatorSnapshot, ElevatorStatus};

/**
 * Picks the elevator that should answer a hall call.
 *
 * Both variants are pure functions of the snapshots they are given. They never
 * touch a live elevator, so the same snapshots always give the same answer.
 * `None` means no elevator fits right now and the call should stay pending.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DecisionStrategy {
    Baseline,
    #[default]
    Improved,
}

impl DecisionStrategy {
    pub fn choose_elevator(
        &self,
        direction: Direction,
        floor: u32,
        snapshots: &[ElevatorSnapshot],
    ) -> Option<usize> {
        match self {
            DecisionStrategy::Baseline => baseline(direction, floor, snapshots),
            DecisionStrategy::Improved => improved(direction, floor, snapshots),
        }
    }
}

/// First match wins: an elevator already on the way (or parked here), then any
/// elevator at its default floor, then any idle elevator.
fn baseline(direction: Direction, floor: u32, snapshots: &[ElevatorSnapshot]) -> Option<usize> {
    for elevator in snapshots {
        if elevator.is_approaching(direction, floor) || elevator.is_idle_at(floor) {
            return Some(elevator.id);
        }
    }

    if let Some(elevator) = snapshots
        .iter()
        .find(|e| e.status == ElevatorStatus::WaitingDefault)
    {
        return Some(elevator.id);
    }

    snapshots
        .iter()
        .find(|e| e.status == ElevatorStatus::Waiting)
        .map(|e| e.id)
}

/// Same first pass as `baseline` (checking a parked elevator before a passing one),
/// then the idle elevator closest to `floor`.
fn improved(direction: Direction, floor: u32, snapshots: &[ElevatorSnapshot]) -> Option<usize> {
    for elevator in snapshots {
        if elevator.is_idle_at(floor) || elevator.is_approaching(direction, floor) {
            return Some(elevator.id);
        }
    }

    // Scans from the highest id down and replaces on ties, so the lowest id at the
    // minimum distance wins.
    let mut closest: Option<(usize, u32)> = None;
    for elevator in snapshots.iter().rev() {
        if !elevator.status.is_idle() {
            continue;
        }
        let distance = elevator.current_floor.abs_diff(floor);
        match closest {
            Some((_, best)) if distance > best => {}
            _ => closest = Some((elevator.id, distance)),
        }
    }
    closest.map(|(id, _)| id)
}

impl fmt::Display for DecisionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionStrategy::Baseline => write!(f, "baseline"),
            DecisionStrategy::Improved => write!(f, "improved"),
        }
    }
}

impl FromStr for DecisionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "baseline" | "simple" | "1" => Ok(DecisionStrategy::Baseline),
            "improved" | "2" => Ok(DecisionStrategy::Improved),
            other => Err(format!("unknown decision strategy '{}'", other)),
        }
    }
}
