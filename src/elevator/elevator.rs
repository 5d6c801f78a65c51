/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info};
use parking_lot::{Condvar, Mutex, MutexGuard};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::clock::SimClock;
use crate::config::ElevatorConfig;
use crate::passenger::{Passenger, PassengerRecord};
use crate::shared::{
    format_destinations, ConfigurationError, Direction, ElevatorSnapshot, ElevatorStatus,
    InvalidRequestError,
};

/**
 * One elevator car, shared between its actor thread and the rest of the building.
 *
 * All mutable state lives behind a single mutex, so destination insertion, the actor's
 * own queue consumption and boarding never interleave. The condition variable wakes the
 * actor when it is idle and a destination arrives (or the simulation stops).
 *
 * # Fields
 * - `id`:              Stable elevator number in [1, N].
 * - `n_floors`:        Number of floors in the building.
 * - `default_floor`:   Floor the elevator returns to after idling elsewhere.
 * - `capacity`:        Maximum number of passengers in the car.
 * - `floor_time_ms`:   Simulated time to travel one floor.
 * - `door_time_ms`:    Simulated time to open or to close the doors.
 * - `idle_timeout_ms`: Simulated idle time before returning to the default floor.
 * - `state`:           Position, status, queue and manifest.
 * - `wakeup`:          Signalled by `add_destination` and `stop`.
 */
pub struct Elevator {
    id: usize,
    n_floors: u32,
    default_floor: u32,
    capacity: usize,
    floor_time_ms: u64,
    door_time_ms: u64,
    idle_timeout_ms: u64,
    clock: SimClock,
    state: Mutex<ElevatorState>,
    wakeup: Condvar,
}

pub(crate) struct ElevatorState {
    pub(crate) current_floor: u32,
    pub(crate) status: ElevatorStatus,
    /// Committed travel direction. Kept through a door cycle while the queue
    /// still holds stops, cleared once it drains.
    pub(crate) heading: Option<Direction>,
    pub(crate) destinations: Vec<u32>,
    pub(crate) passengers: Vec<Passenger>,
    pub(crate) stopped: bool,
}

impl Elevator {
    pub fn new(
        id: usize,
        default_floor: u32,
        n_floors: u32,
        config: &ElevatorConfig,
        clock: SimClock,
    ) -> Result<Elevator, ConfigurationError> {
        if default_floor < 1 || default_floor > n_floors {
            return Err(ConfigurationError::Invalid(format!(
                "Elevator {} default floor {} outside of building constraints [1, {}]",
                id, default_floor, n_floors
            )));
        }
        if config.capacity == 0 {
            return Err(ConfigurationError::Invalid(format!(
                "Elevator {} cannot hold any people",
                id
            )));
        }

        Ok(Elevator {
            id,
            n_floors,
            default_floor,
            capacity: config.capacity,
            floor_time_ms: config.floor_time_ms,
            door_time_ms: config.door_time_ms,
            idle_timeout_ms: config.idle_timeout_ms,
            clock,
            state: Mutex::new(ElevatorState {
                current_floor: default_floor,
                status: ElevatorStatus::WaitingDefault,
                heading: None,
                destinations: Vec::new(),
                passengers: Vec::new(),
                stopped: false,
            }),
            wakeup: Condvar::new(),
        })
    }

    /***************************************/
    /*             Public API              */
    /***************************************/

    /// Queues `floor` as a stop.
    ///
    /// Returns `Ok(true)` when the floor is in the queue afterwards, `Ok(false)` when the
    /// direction lock dropped it, and an error when the floor is not in the building.
    pub fn add_destination(&self, floor: u32) -> Result<bool, InvalidRequestError> {
        self.check_floor(floor)?;

        let mut state = self.state.lock();
        let accepted = Self::insert_destination(&mut state, floor);
        if accepted {
            debug!(
                "{} Elevator {} destinations now {}",
                self.clock.time_string(),
                self.id,
                format_destinations(&state.destinations)
            );
            self.wakeup.notify_all();
        } else {
            debug!(
                "{} Elevator {} at {} ({:?}) ignoring request for floor {}",
                self.clock.time_string(),
                self.id,
                state.current_floor,
                state.status,
                floor
            );
        }
        Ok(accepted)
    }

    /// Lets `passenger` into the car if its direction fits the committed heading, its
    /// destination can be queued and there is room. The checks, the boarding stamp and
    /// the queue insertion happen under one lock.
    ///
    /// A refused passenger is handed back in `Err` so the floor keeps it.
    pub fn admit(&self, mut passenger: Passenger) -> Result<(), Passenger> {
        let mut state = self.state.lock();
        if state.passengers.len() >= self.capacity {
            return Err(passenger);
        }
        if let Some(heading) = state.heading {
            if heading != passenger.direction() {
                return Err(passenger);
            }
        }

        let destination = passenger.destination();
        if !Self::insert_destination(&mut state, destination) {
            debug!(
                "{} Elevator {} at {} cannot queue floor {}, refusing Person {}",
                self.clock.time_string(),
                self.id,
                state.current_floor,
                destination,
                passenger.id()
            );
            return Err(passenger);
        }

        passenger.board(self.clock.now());
        info!(
            "{} Person {} entered Elevator {} at Floor {} going to {}",
            self.clock.time_string(),
            passenger.id(),
            self.id,
            state.current_floor,
            destination
        );
        state.passengers.push(passenger);
        self.wakeup.notify_all();
        Ok(())
    }

    /// Whether a passenger travelling `direction` fits the car's committed heading.
    /// An elevator with no committed heading takes anyone.
    pub fn accepts_direction(&self, direction: Direction) -> bool {
        match self.state.lock().heading {
            Some(heading) => heading == direction,
            None => true,
        }
    }

    pub fn snapshot(&self) -> ElevatorSnapshot {
        let state = self.state.lock();
        ElevatorSnapshot {
            id: self.id,
            current_floor: state.current_floor,
            status: state.status,
            remaining_destinations: state.destinations.clone(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn current_floor(&self) -> u32 {
        self.state.lock().current_floor
    }

    pub fn status(&self) -> ElevatorStatus {
        self.state.lock().status
    }

    pub fn remaining_destinations(&self) -> Vec<u32> {
        self.state.lock().destinations.clone()
    }

    pub fn passenger_count(&self) -> usize {
        self.state.lock().passengers.len()
    }

    pub fn default_floor(&self) -> u32 {
        self.default_floor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn n_floors(&self) -> u32 {
        self.n_floors
    }

    /// Asks the actor loop to exit at its next suspension point.
    pub fn stop(&self) {
        let mut state = self.state.lock();
        state.stopped = true;
        self.wakeup.notify_all();
    }

    /***************************************/
    /*        Actor-facing internals       */
    /***************************************/
    pub(crate) fn lock(&self) -> MutexGuard<'_, ElevatorState> {
        self.state.lock()
    }

    pub(crate) fn wakeup(&self) -> &Condvar {
        &self.wakeup
    }

    pub(crate) fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub(crate) fn floor_time_ms(&self) -> u64 {
        self.floor_time_ms
    }

    pub(crate) fn door_time_ms(&self) -> u64 {
        self.door_time_ms
    }

    pub(crate) fn idle_timeout_ms(&self) -> u64 {
        self.idle_timeout_ms
    }

    /// Moves every passenger bound for the current floor out of the car.
    pub(crate) fn release_passengers(state: &mut ElevatorState, now: u64) -> Vec<PassengerRecord> {
        let floor = state.current_floor;
        let mut records = Vec::new();
        state.passengers.retain_mut(|p| {
            if p.destination() != floor {
                return true;
            }
            if let Some(record) = p.arrive(now) {
                records.push(record);
            }
            false
        });
        records
    }

    /// Direction lock, insertion and re-sort. Must be called with the state locked.
    pub(crate) fn insert_destination(state: &mut ElevatorState, floor: u32) -> bool {
        let current = state.current_floor;

        match state.heading {
            Some(Direction::Up) if floor <= current => return false,
            Some(Direction::Down) if floor >= current => return false,
            None if floor == current && !state.status.is_idle() => return false,
            _ => {}
        }

        if state.heading.is_none() {
            state.heading = Direction::between(current, floor);
            if let Some(direction) = state.heading {
                if state.status.is_idle() {
                    state.status = ElevatorStatus::moving(direction);
                }
            }
        }

        if !state.destinations.contains(&floor) {
            state.destinations.push(floor);
        }
        match state.heading {
            Some(Direction::Up) => state.destinations.sort_unstable(),
            Some(Direction::Down) => state.destinations.sort_unstable_by(|a, b| b.cmp(a)),
            None => {}
        }
        true
    }

    fn check_floor(&self, floor: u32) -> Result<(), InvalidRequestError> {
        if floor < 1 || floor > self.n_floors {
            return Err(InvalidRequestError::FloorOutOfRange {
                floor,
                n_floors: self.n_floors,
            });
        }
        Ok(())
    }

    /***************************************/
    /*            Test helpers             */
    /***************************************/
    #[cfg(test)]
    pub(crate) fn test_set_state(
        &self,
        floor: u32,
        status: ElevatorStatus,
        heading: Option<Direction>,
    ) {
        let mut state = self.state.lock();
        state.current_floor = floor;
        state.status = status;
        state.heading = heading;
    }
}
