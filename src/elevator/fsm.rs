/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Instant;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::building::Floors;
use crate::elevator::Elevator;
use crate::passenger::PassengerRecord;
use crate::shared::{format_destinations, Direction, ElevatorStatus, Request};

/**
 * Drives one elevator.
 *
 * The `ElevatorFSM` owns nothing but handles: the shared `Elevator`, the floor registry
 * used for boarding, and two outgoing channels. It blocks on the elevator's condition
 * variable while idle and on timed sleeps while travelling or operating the doors.
 *
 * # Fields
 * - `elevator`:    The elevator this actor moves.
 * - `floors`:      Floors to board passengers from.
 * - `report_tx`:   Sends a record for every passenger that reaches its destination.
 * - `call_tx`:     Re-presses hall calls for passengers left behind at a stop.
 */
pub struct ElevatorFSM {
    elevator: Arc<Elevator>,
    floors: Arc<Floors>,
    report_tx: cbc::Sender<PassengerRecord>,
    call_tx: cbc::Sender<Request>,
}

enum Event {
    Move(Direction),
    Arrived,
    Stop,
}

/// The elevator's position left the building. The queue logic is broken, so the
/// actor gives up instead of carrying on in an inconsistent state.
#[derive(Debug)]
struct OutOfBounds {
    floor: i64,
}

impl ElevatorFSM {
    pub fn new(
        elevator: Arc<Elevator>,
        floors: Arc<Floors>,
        report_tx: cbc::Sender<PassengerRecord>,
        call_tx: cbc::Sender<Request>,
    ) -> ElevatorFSM {
        ElevatorFSM {
            elevator,
            floors,
            report_tx,
            call_tx,
        }
    }

    pub fn run(self) {
        info!(
            "{} Elevator {} started at Floor {}",
            self.elevator.clock().time_string(),
            self.elevator.id(),
            self.elevator.current_floor()
        );

        // Main loop
        loop {
            match self.wait_for_event() {
                Event::Move(direction) => {
                    if let Err(e) = self.move_one_floor(direction) {
                        error!(
                            "{} Elevator {} left the building (floor {}), stopping elevator",
                            self.elevator.clock().time_string(),
                            self.elevator.id(),
                            e.floor
                        );
                        return;
                    }
                }
                Event::Arrived => self.arrive_at_destination(),
                Event::Stop => {
                    debug!("Elevator {} stopped", self.elevator.id());
                    return;
                }
            }
        }
    }

    /// Blocks until the elevator has somewhere to go.
    ///
    /// Idle at the default floor it waits indefinitely. Idle elsewhere it waits for the
    /// timeout window and then sends itself back to the default floor.
    fn wait_for_event(&self) -> Event {
        let elevator = &self.elevator;
        let clock = elevator.clock();
        let default_floor = elevator.default_floor();
        let mut idle_deadline: Option<Instant> = None;

        let mut state = elevator.lock();
        loop {
            if state.stopped {
                return Event::Stop;
            }

            if let Some(&next) = state.destinations.first() {
                let current = state.current_floor;
                return if next > current {
                    Event::Move(Direction::Up)
                } else if next < current {
                    Event::Move(Direction::Down)
                } else {
                    Event::Arrived
                };
            }

            state.heading = None;

            if state.current_floor == default_floor {
                if state.status != ElevatorStatus::WaitingDefault {
                    state.status = ElevatorStatus::WaitingDefault;
                    info!(
                        "{} Elevator {} waiting for instructions at Floor {}",
                        clock.time_string(),
                        elevator.id(),
                        state.current_floor
                    );
                }
                idle_deadline = None;
                elevator.wakeup().wait(&mut state);
                continue;
            }

            let deadline = match idle_deadline {
                Some(deadline) => deadline,
                None => {
                    state.status = ElevatorStatus::Waiting;
                    info!(
                        "{} Elevator {} waiting for timeout at Floor {}",
                        clock.time_string(),
                        elevator.id(),
                        state.current_floor
                    );
                    let deadline = Instant::now() + clock.scaled(elevator.idle_timeout_ms());
                    idle_deadline = Some(deadline);
                    deadline
                }
            };

            let result = elevator.wakeup().wait_until(&mut state, deadline);
            if result.timed_out() && state.destinations.is_empty() && !state.stopped {
                info!(
                    "{} Elevator {} timed out, returning to default Floor {}",
                    clock.time_string(),
                    elevator.id(),
                    default_floor
                );
                Elevator::insert_destination(&mut state, default_floor);
            }
        }
    }

    /// Travels a single floor towards the head of the queue.
    fn move_one_floor(&self, direction: Direction) -> Result<(), OutOfBounds> {
        let elevator = &self.elevator;
        let clock = elevator.clock();

        {
            let mut state = elevator.lock();
            state.status = ElevatorStatus::moving(direction);
            state.heading = Some(direction);
        }

        clock.sleep(elevator.floor_time_ms());

        let mut state = elevator.lock();
        let next = match direction {
            Direction::Up => state.current_floor as i64 + 1,
            Direction::Down => state.current_floor as i64 - 1,
        };
        if next < 1 || next > elevator.n_floors() as i64 {
            return Err(OutOfBounds { floor: next });
        }
        state.current_floor = next as u32;

        debug!(
            "{} Elevator {} passing Floor {} on way {}. Remaining Destinations: {}",
            clock.time_string(),
            elevator.id(),
            state.current_floor,
            direction,
            format_destinations(&state.destinations)
        );
        Ok(())
    }

    /// Door cycle at the head of the queue: open, let people out, let people in, close.
    fn arrive_at_destination(&self) {
        let elevator = &self.elevator;
        let clock = elevator.clock();

        let floor = {
            let mut state = elevator.lock();
            let floor = state.current_floor;
            state.destinations.retain(|f| *f != floor);
            if state.destinations.is_empty() {
                state.heading = None;
            }
            state.status = ElevatorStatus::DoorsOpening;
            floor
        };

        info!(
            "{} Elevator {} arrived at Floor {}, opening doors",
            clock.time_string(),
            elevator.id(),
            floor
        );
        clock.sleep(elevator.door_time_ms());

        // Let people out
        let records = {
            let mut state = elevator.lock();
            state.status = ElevatorStatus::DoorsOpened;
            Elevator::release_passengers(&mut state, clock.now())
        };
        for record in records {
            info!(
                "{} Person {} left Elevator {} at Floor {}",
                clock.time_string(),
                record.id,
                elevator.id(),
                floor
            );
            if let Err(e) = self.report_tx.send(record) {
                warn!("Failed to send passenger record to report collector: {}", e);
            }
        }

        // Let people in
        match self.floors.board_compatible(floor, elevator) {
            Ok(outcome) => {
                for direction in outcome.left_behind {
                    debug!(
                        "{} Floor {} pressing {} again for people left behind",
                        clock.time_string(),
                        floor,
                        direction
                    );
                    if let Err(e) = self.call_tx.send(Request::new(direction, floor)) {
                        warn!("Failed to re-press hall call: {}", e);
                    }
                }
            }
            Err(e) => error!("Elevator {} cannot board at Floor {}: {}", elevator.id(), floor, e),
        }

        {
            let mut state = elevator.lock();
            state.status = ElevatorStatus::DoorsClosing;
            info!(
                "{} Elevator {} closing doors at Floor {}. Remaining destinations are {}",
                clock.time_string(),
                elevator.id(),
                floor,
                format_destinations(&state.destinations)
            );
        }
        clock.sleep(elevator.door_time_ms());
    }
}
