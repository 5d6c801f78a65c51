/***************************************/
/*        3rd party libraries          */
/***************************************/
use indexmap::IndexSet;
use log::{debug, info};
use parking_lot::Mutex;
use std::sync::Arc;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::clock::SimClock;
use crate::dispatch::DecisionStrategy;
use crate::elevator::Elevator;
use crate::shared::{Direction, ElevatorSnapshot, InvalidRequestError, Request};

/**
 * Central dispatcher for hall calls.
 *
 * Every call is offered to the decision strategy straight away. Calls no elevator
 * can take are parked in `pending` (insertion ordered, one entry per floor and
 * direction) and retried once per simulated second by the driving loop.
 *
 * The `pending` mutex is held for the whole of a dispatch, so calls are resolved
 * one at a time. Snapshots are copies taken under each elevator's own lock and
 * never block an elevator for longer than the copy.
 */
pub struct DispatchController {
    elevators: Vec<Arc<Elevator>>,
    n_floors: u32,
    strategy: DecisionStrategy,
    clock: SimClock,
    pending: Mutex<IndexSet<Request>>,
}

impl DispatchController {
    pub fn new(
        elevators: Vec<Arc<Elevator>>,
        n_floors: u32,
        strategy: DecisionStrategy,
        clock: SimClock,
    ) -> DispatchController {
        DispatchController {
            elevators,
            n_floors,
            strategy,
            clock,
            pending: Mutex::new(IndexSet::new()),
        }
    }

    /// Handles a call button press at `floor`.
    ///
    /// Returns `Ok(true)` if an elevator was committed to the call, `Ok(false)` if it
    /// was left pending.
    pub fn send_request(&self, direction: Direction, floor: u32) -> Result<bool, InvalidRequestError> {
        self.check_floor(floor)?;

        let mut pending = self.pending.lock();
        let request = Request::new(direction, floor);
        if self.try_resolve(request)? {
            pending.shift_remove(&request);
            return Ok(true);
        }

        if pending.insert(request) {
            debug!(
                "{} No good fit for {} at Floor {}, request pending",
                self.clock.time_string(),
                direction,
                floor
            );
        }
        Ok(false)
    }

    /// Re-offers every pending call in the order it was raised and drops the
    /// ones that found an elevator.
    pub fn retry_pending(&self) -> usize {
        let mut pending = self.pending.lock();
        let requests: Vec<Request> = pending.iter().copied().collect();

        let mut resolved = 0;
        for request in requests {
            // Pending entries were range-checked when they were queued.
            if let Ok(true) = self.try_resolve(request) {
                pending.shift_remove(&request);
                resolved += 1;
            }
        }
        resolved
    }

    /// Sends elevator `id` to `floor`, bypassing the strategy.
    pub fn send_request_to_elevator(&self, id: usize, floor: u32) -> Result<bool, InvalidRequestError> {
        let elevator = self.elevator(id)?;
        self.check_floor(floor)?;

        info!(
            "{} Sending Elevator {} to Floor {}",
            self.clock.time_string(),
            id,
            floor
        );
        elevator.add_destination(floor)
    }

    /// Copies of every elevator's state, ordered by id.
    pub fn snapshot_all(&self) -> Vec<ElevatorSnapshot> {
        self.elevators.iter().map(|e| e.snapshot()).collect()
    }

    pub fn pending_requests(&self) -> Vec<Request> {
        self.pending.lock().iter().copied().collect()
    }

    pub fn strategy(&self) -> DecisionStrategy {
        self.strategy
    }

    pub fn elevators(&self) -> &[Arc<Elevator>] {
        &self.elevators
    }

    pub fn elevator(&self, id: usize) -> Result<&Arc<Elevator>, InvalidRequestError> {
        if id < 1 || id > self.elevators.len() {
            return Err(InvalidRequestError::UnknownElevator {
                id,
                n_elevators: self.elevators.len(),
            });
        }
        Ok(&self.elevators[id - 1])
    }

    /// Asks the strategy for an elevator and commits the call to it.
    /// Must be called with `pending` locked.
    fn try_resolve(&self, request: Request) -> Result<bool, InvalidRequestError> {
        let snapshots = self.snapshot_all();
        let chosen = self
            .strategy
            .choose_elevator(request.direction, request.floor, &snapshots);

        let id = match chosen {
            Some(id) => id,
            None => return Ok(false),
        };

        let elevator = self.elevator(id)?;
        let accepted = elevator.add_destination(request.floor)?;
        if accepted {
            info!(
                "{} Sending Elevator {} to Floor {} for {} call",
                self.clock.time_string(),
                id,
                request.floor,
                request.direction
            );
        }
        Ok(accepted)
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
}
