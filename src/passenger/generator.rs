/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info, warn};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::building::Floors;
use crate::clock::SimClock;
use crate::config::PassengerConfig;
use crate::dispatch::DispatchController;
use crate::passenger::Passenger;

/**
 * Produces passenger arrivals.
 *
 * Every simulated second there is a `per_minute / 60` chance that one passenger
 * appears. The source floor is drawn from the configured percentage table. The
 * destination is drawn from the same table with the source's share removed and
 * handed out one point at a time to the other floors.
 */
pub struct PassengerGenerator {
    per_minute: u32,
    percentages: Vec<u32>,
    rng: ChaCha8Rng,
    next_id: u64,
}

impl PassengerGenerator {
    pub fn new(config: &PassengerConfig, seed: Option<u64>) -> PassengerGenerator {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        PassengerGenerator {
            per_minute: config.per_minute,
            percentages: config.floor_percentages.clone(),
            rng,
            next_id: 1,
        }
    }

    /// Number of passengers created so far.
    pub fn generated(&self) -> u64 {
        self.next_id - 1
    }

    /// Maybe creates a passenger for simulated second `now`.
    pub fn generate(&mut self, now: u64) -> Option<Passenger> {
        if self.percentages.len() < 2 {
            return None;
        }
        if self.rng.gen_range(0..60) >= self.per_minute {
            return None;
        }

        let source = self.source_floor();
        let destination = self.destination_floor(source);
        let passenger = Passenger::new(self.next_id, source, destination, now)?;
        self.next_id += 1;
        Some(passenger)
    }

    /// Runs one generation step: places the new passenger on its floor and
    /// presses the call button for its direction.
    pub fn generate_and_add(
        &mut self,
        clock: &SimClock,
        floors: &Floors,
        controller: &DispatchController,
    ) -> Option<u64> {
        let passenger = self.generate(clock.now())?;
        let id = passenger.id();
        let source = passenger.source();
        let direction = passenger.direction();

        info!(
            "{} Person {} added at {} pressed {} to go to {}",
            clock.time_string(),
            id,
            source,
            direction,
            passenger.destination()
        );

        if let Err(e) = floors.add_passenger(passenger) {
            warn!("{} Dropping generated person {}: {}", clock.time_string(), id, e);
            return None;
        }
        match controller.send_request(direction, source) {
            Ok(true) => {}
            Ok(false) => debug!(
                "{} Call {} at {} queued as pending",
                clock.time_string(),
                direction,
                source
            ),
            Err(e) => warn!("{} Call button press rejected: {}", clock.time_string(), e),
        }
        Some(id)
    }

    fn source_floor(&mut self) -> u32 {
        let roll = self.rng.gen_range(1..=100);
        pick_floor(&self.percentages, roll)
    }

    fn destination_floor(&mut self, source: u32) -> u32 {
        let adjusted = spread_source_share(&self.percentages, source);
        let total: u32 = adjusted.iter().sum();
        let roll = self.rng.gen_range(1..=total.max(1));
        pick_floor(&adjusted, roll)
    }
}

/// Floor (1-based) whose cumulative share first reaches `roll`.
pub(crate) fn pick_floor(percentages: &[u32], roll: u32) -> u32 {
    let mut counter = 0;
    for (index, pct) in percentages.iter().enumerate() {
        counter += pct;
        if counter >= roll {
            return index as u32 + 1;
        }
    }
    percentages.len() as u32
}

/// Zeroes the source floor's share and deals it round-robin to the others,
/// so a passenger never picks its own floor as destination.
pub(crate) fn spread_source_share(percentages: &[u32], source: u32) -> Vec<u32> {
    let source_index = (source - 1) as usize;
    let mut adjusted = percentages.to_vec();
    let mut to_spread = adjusted[source_index];
    adjusted[source_index] = 0;

    let mut i = 0;
    while to_spread > 0 {
        if i != source_index {
            adjusted[i] += 1;
            to_spread -= 1;
        }
        i = (i + 1) % adjusted.len();
    }

    // A source holding 100% leaves nothing to draw from.
    if adjusted.iter().all(|pct| *pct == 0) {
        for (index, pct) in adjusted.iter_mut().enumerate() {
            if index != source_index {
                *pct = 1;
            }
        }
    }
    adjusted
}
