/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::Direction;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PassengerStatus {
    WaitingForElevator,
    InElevator,
    ReachedDestination,
}

/**
 * A person travelling from `source` to `destination`.
 *
 * All timestamps are simulated seconds read from the shared clock.
 * The status only ever moves forward: waiting, riding, arrived.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct Passenger {
    id: u64,
    source: u32,
    destination: u32,
    status: PassengerStatus,
    created_at: u64,
    boarded_at: Option<u64>,
    arrived_at: Option<u64>,
}

/// Final record handed to the report collector once a passenger arrives.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PassengerRecord {
    pub id: u64,
    pub source: u32,
    pub destination: u32,
    pub wait_time: u64,
    pub ride_time: u64,
}

impl Passenger {
    /// Returns `None` when source and destination are the same floor.
    pub fn new(id: u64, source: u32, destination: u32, created_at: u64) -> Option<Passenger> {
        if source == destination {
            return None;
        }
        Some(Passenger {
            id,
            source,
            destination,
            status: PassengerStatus::WaitingForElevator,
            created_at,
            boarded_at: None,
            arrived_at: None,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn source(&self) -> u32 {
        self.source
    }

    pub fn destination(&self) -> u32 {
        self.destination
    }

    pub fn status(&self) -> PassengerStatus {
        self.status
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn boarded_at(&self) -> Option<u64> {
        self.boarded_at
    }

    pub fn arrived_at(&self) -> Option<u64> {
        self.arrived_at
    }

    pub fn direction(&self) -> Direction {
        // source != destination is guaranteed by the constructor
        if self.destination > self.source {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    pub(crate) fn board(&mut self, now: u64) {
        if self.status == PassengerStatus::WaitingForElevator {
            self.status = PassengerStatus::InElevator;
            self.boarded_at = Some(now.max(self.created_at));
        }
    }

    /// Marks the passenger as delivered and produces its report record.
    /// Returns `None` if the passenger never boarded or already arrived.
    ///
    /// The clock counts whole seconds, so a ride shorter than one tick is stamped
    /// as arriving one second after boarding.
    pub(crate) fn arrive(&mut self, now: u64) -> Option<PassengerRecord> {
        if self.status != PassengerStatus::InElevator {
            return None;
        }
        let boarded_at = self.boarded_at?;
        let arrived_at = now.max(boarded_at + 1);

        self.status = PassengerStatus::ReachedDestination;
        self.arrived_at = Some(arrived_at);

        Some(PassengerRecord {
            id: self.id,
            source: self.source,
            destination: self.destination,
            wait_time: boarded_at - self.created_at,
            ride_time: arrived_at - boarded_at,
        })
    }
}
