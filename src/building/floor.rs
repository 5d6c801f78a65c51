/***************************************/
/*        3rd party libraries          */
/***************************************/
use parking_lot::Mutex;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::elevator::Elevator;
use crate::passenger::Passenger;
use crate::shared::{Direction, InvalidRequestError};

/// What happened during one boarding pass.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BoardingOutcome {
    /// Ids of passengers that entered the elevator, in boarding order.
    pub boarded: Vec<u64>,
    /// Directions still wanted by passengers that stayed on the floor.
    pub left_behind: Vec<Direction>,
}

/**
 * One level of the building and the people waiting on it.
 *
 * The waiting list is guarded by the floor's own mutex, which is held for a whole
 * boarding pass so arrivals and boarding never interleave.
 */
pub struct Floor {
    story: u32,
    waiting: Mutex<Vec<Passenger>>,
}

impl Floor {
    pub fn new(story: u32) -> Floor {
        Floor {
            story,
            waiting: Mutex::new(Vec::new()),
        }
    }

    pub fn story(&self) -> u32 {
        self.story
    }

    pub fn add_passenger(&self, passenger: Passenger) {
        self.waiting.lock().push(passenger);
    }

    pub fn waiting_count(&self) -> usize {
        self.waiting.lock().len()
    }

    pub fn waiting_ids(&self) -> Vec<u64> {
        self.waiting.lock().iter().map(|p| p.id()).collect()
    }

    /// Offers waiting passengers to `elevator` in arrival order, skipping those heading
    /// the other way, and stops at the first one the elevator turns away.
    ///
    /// `admit` repeats the direction check under the elevator's lock, so a heading
    /// committed by the dispatcher between the two checks still refuses the passenger.
    pub fn board_compatible(&self, elevator: &Elevator) -> BoardingOutcome {
        let mut waiting = self.waiting.lock();
        let mut outcome = BoardingOutcome::default();
        let mut remaining = Vec::with_capacity(waiting.len());
        let mut full = false;

        for passenger in waiting.drain(..) {
            if full
                || passenger.destination() == self.story
                || !elevator.accepts_direction(passenger.direction())
            {
                remaining.push(passenger);
                continue;
            }

            let id = passenger.id();
            match elevator.admit(passenger) {
                Ok(()) => outcome.boarded.push(id),
                Err(passenger) => {
                    full = true;
                    remaining.push(passenger);
                }
            }
        }

        for passenger in remaining.iter() {
            let direction = passenger.direction();
            if !outcome.left_behind.contains(&direction) {
                outcome.left_behind.push(direction);
            }
        }
        *waiting = remaining;
        outcome
    }
}

/// Every floor of the building, indexed by story number.
pub struct Floors {
    floors: Vec<Floor>,
}

impl Floors {
    pub fn new(n_floors: u32) -> Floors {
        Floors {
            floors: (1..=n_floors).map(Floor::new).collect(),
        }
    }

    pub fn n_floors(&self) -> u32 {
        self.floors.len() as u32
    }

    pub fn floor(&self, story: u32) -> Result<&Floor, InvalidRequestError> {
        if story < 1 || story > self.n_floors() {
            return Err(InvalidRequestError::FloorOutOfRange {
                floor: story,
                n_floors: self.n_floors(),
            });
        }
        Ok(&self.floors[(story - 1) as usize])
    }

    /// Places a passenger on its source floor. Both ends of the trip must exist.
    pub fn add_passenger(&self, passenger: Passenger) -> Result<(), InvalidRequestError> {
        self.floor(passenger.destination())?;
        self.floor(passenger.source())?.add_passenger(passenger);
        Ok(())
    }

    pub fn board_compatible(
        &self,
        story: u32,
        elevator: &Elevator,
    ) -> Result<BoardingOutcome, InvalidRequestError> {
        Ok(self.floor(story)?.board_compatible(elevator))
    }

    pub fn waiting_count(&self) -> usize {
        self.floors.iter().map(|f| f.waiting_count()).sum()
    }
}
