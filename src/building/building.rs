/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{error, info, warn};
use std::sync::Arc;
use std::thread::{Builder, JoinHandle};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::building::Floors;
use crate::clock::SimClock;
use crate::config::Config;
use crate::dispatch::{DecisionStrategy, DispatchController};
use crate::elevator::{Elevator, ElevatorFSM};
use crate::passenger::{PassengerGenerator, PassengerRecord};
use crate::report::ReportCollector;
use crate::shared::{ConfigurationError, Request};

/**
 * Owns every part of one simulation run.
 *
 * `Building::new` validates the configuration and builds floors, elevators and the
 * dispatcher. `start` launches one named thread per elevator. The driving loop in
 * `run` ticks the clock once per simulated second, generates arrivals, forwards
 * re-pressed calls and retries pending ones. `shutdown` stops and joins the
 * elevator threads.
 */
pub struct Building {
    config: Config,
    clock: SimClock,
    floors: Arc<Floors>,
    controller: Arc<DispatchController>,
    report_tx: cbc::Sender<PassengerRecord>,
    report_rx: cbc::Receiver<PassengerRecord>,
    call_tx: cbc::Sender<Request>,
    call_rx: cbc::Receiver<Request>,
    collector: ReportCollector,
    elevator_threads: Vec<JoinHandle<()>>,
}

impl Building {
    pub fn new(config: Config, strategy: DecisionStrategy) -> Result<Building, ConfigurationError> {
        config.validate()?;

        let n_floors = config.building.n_floors;
        let clock = SimClock::new(config.simulation.time_scale);
        let floors = Arc::new(Floors::new(n_floors));

        let mut elevators = Vec::with_capacity(config.building.n_elevators);
        for (index, default_floor) in config.elevator.default_floors.iter().enumerate() {
            let elevator = Elevator::new(
                index + 1,
                *default_floor,
                n_floors,
                &config.elevator,
                clock.clone(),
            )?;
            elevators.push(Arc::new(elevator));
        }

        let controller = Arc::new(DispatchController::new(
            elevators,
            n_floors,
            strategy,
            clock.clone(),
        ));

        let (report_tx, report_rx) = cbc::unbounded::<PassengerRecord>();
        let (call_tx, call_rx) = cbc::unbounded::<Request>();

        Ok(Building {
            collector: ReportCollector::new(n_floors),
            config,
            clock,
            floors,
            controller,
            report_tx,
            report_rx,
            call_tx,
            call_rx,
            elevator_threads: Vec::new(),
        })
    }

    /// Starts one actor thread per elevator.
    pub fn start(&mut self) -> std::io::Result<()> {
        for elevator in self.controller.elevators() {
            let fsm = ElevatorFSM::new(
                elevator.clone(),
                self.floors.clone(),
                self.report_tx.clone(),
                self.call_tx.clone(),
            );
            let handle = Builder::new()
                .name(format!("elevator_{}", elevator.id()))
                .spawn(move || fsm.run())?;
            self.elevator_threads.push(handle);
        }
        info!(
            "Started {} elevators over {} floors using the {} strategy",
            self.elevator_threads.len(),
            self.floors.n_floors(),
            self.controller.strategy()
        );
        Ok(())
    }

    /// Runs the driving loop for the configured duration, then keeps ticking without
    /// new arrivals until everyone is delivered or the grace period runs out.
    pub fn run(&mut self, mut generator: Option<&mut PassengerGenerator>) {
        let duration = self.config.duration_secs();
        let deadline = duration + self.config.simulation.grace_period_secs;

        while self.clock.now() < duration {
            self.tick();
            if let Some(generator) = generator.as_deref_mut() {
                generator.generate_and_add(&self.clock, &self.floors, &self.controller);
            }
        }

        info!("{} Passenger generation finished", self.clock.time_string());
        while self.clock.now() < deadline && self.passengers_in_flight() > 0 {
            self.tick();
        }

        let left = self.passengers_in_flight();
        if left > 0 {
            warn!(
                "{} Ending simulation with {} passengers not delivered",
                self.clock.time_string(),
                left
            );
        }
    }

    /// One simulated second of the control thread.
    pub fn tick(&mut self) {
        self.clock.sleep(1000);
        self.clock.advance();

        for request in self.call_rx.try_iter() {
            if let Err(e) = self.controller.send_request(request.direction, request.floor) {
                error!("Re-pressed call rejected: {}", e);
            }
        }
        self.controller.retry_pending();
        self.collector.drain(&self.report_rx);
    }

    /// Stops every elevator thread and waits for it to exit.
    pub fn shutdown(&mut self) {
        for elevator in self.controller.elevators() {
            elevator.stop();
        }
        for handle in self.elevator_threads.drain(..) {
            let name = handle.thread().name().unwrap_or("elevator").to_string();
            if handle.join().is_err() {
                error!("Thread {} panicked", name);
            }
        }
        self.collector.drain(&self.report_rx);
    }

    pub fn passengers_in_flight(&self) -> usize {
        let riding: usize = self
            .controller
            .elevators()
            .iter()
            .map(|e| e.passenger_count())
            .sum();
        self.floors.waiting_count() + riding
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn floors(&self) -> &Arc<Floors> {
        &self.floors
    }

    pub fn controller(&self) -> &Arc<DispatchController> {
        &self.controller
    }

    pub fn collector(&self) -> &ReportCollector {
        &self.collector
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Drop for Building {
    fn drop(&mut self) {
        if !self.elevator_threads.is_empty() {
            self.shutdown();
        }
    }
}
