use crate::config::ElevatorConfig;
use crate::elevator::car::{CarState, Step};
use crate::elevator::events::{ElevatorEvent, EventSink};
use crate::error::{ElevatorError, ElevatorResult};
use crate::shared::{CarSnapshot, Direction, Rider};
use log::{info, trace, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, Builder, JoinHandle};
use std::time::Duration;

/**
 * Runs a single elevator car on its own thread.
 *
 * Callers submit riders from any thread while the control loop moves the car.
 * The car, its stops and its riders sit behind one mutex. Travel and dwell
 * delays are spent with the lock released.
 *
 * A rider submitted after `request_shutdown` is accepted but may never be
 * picked up.
 *
 * # Fields
 * - `car`:         Shared car state, the only mutable data touched by both sides.
 * - `shutdown`:    Set by `request_shutdown`, polled by the control loop.
 * - `config`:      Floor count and timings.
 * - `sink`:        Event sink, handed to the control thread on `start`.
 * - `handle`:      Join handle of the control thread once started.
 */
pub struct ElevatorScheduler {
    car: Arc<Mutex<CarState>>,
    shutdown: Arc<AtomicBool>,
    config: ElevatorConfig,
    sink: Option<Box<dyn EventSink>>,
    handle: Option<JoinHandle<()>>,
}

impl ElevatorScheduler {
    pub fn new<S: EventSink>(config: &ElevatorConfig, sink: S) -> ElevatorResult<ElevatorScheduler> {
        let car = CarState::new(config.n_floors)?;

        Ok(ElevatorScheduler {
            car: Arc::new(Mutex::new(car)),
            shutdown: Arc::new(AtomicBool::new(false)),
            config: config.clone(),
            sink: Some(Box::new(sink)),
            handle: None,
        })
    }

    /// Spawns the control thread.
    pub fn start(&mut self) -> ElevatorResult<()> {
        let sink = self.sink.take().ok_or(ElevatorError::AlreadyStarted)?;

        let control_loop = ControlLoop {
            car: Arc::clone(&self.car),
            shutdown: Arc::clone(&self.shutdown),
            sink,
            step_time: self.config.step_duration(),
            dwell_time: self.config.dwell_duration(),
            idle_poll_time: self.config.idle_poll_duration(),
        };

        let handle = Builder::new()
            .name("elevator_scheduler".into())
            .spawn(move || control_loop.run())?;
        self.handle = Some(handle);

        info!("Elevator scheduler started with {} floors", self.config.n_floors);
        Ok(())
    }

    pub fn submit(&self, rider: Rider) -> ElevatorResult<()> {
        if self.shutdown.load(Ordering::Acquire) {
            warn!("Rider {} submitted after shutdown was requested", rider.name);
        }

        let name = rider.name.clone();
        let (origin, destination) = (rider.origin, rider.destination);
        lock_car(&self.car).submit(rider).map_err(|e| {
            warn!("Rejected rider {}: {}", name, e);
            e
        })?;

        info!("Rider {} requested {} -> {}", name, origin, destination);
        Ok(())
    }

    /// Asks the control loop to stop once the car is at a floor. Idempotent.
    pub fn request_shutdown(&self) {
        if !self.shutdown.swap(true, Ordering::AcqRel) {
            info!("Elevator shutdown requested");
        }
    }

    /// Blocks until the control thread has exited. Returns immediately if it
    /// was never started or has already been joined.
    pub fn join(&mut self) -> ElevatorResult<()> {
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| ElevatorError::Panicked),
            None => Ok(()),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .map_or(true, |handle| handle.is_finished())
    }

    pub fn snapshot(&self) -> CarSnapshot {
        lock_car(&self.car).snapshot()
    }

    pub fn n_floors(&self) -> u8 {
        self.config.n_floors
    }
}

impl Drop for ElevatorScheduler {
    fn drop(&mut self) {
        self.request_shutdown();
        let _ = self.join();
    }
}

/***************************************/
/*            Control loop             */
/***************************************/
struct ControlLoop {
    car: Arc<Mutex<CarState>>,
    shutdown: Arc<AtomicBool>,
    sink: Box<dyn EventSink>,
    step_time: Duration,
    dwell_time: Duration,
    idle_poll_time: Duration,
}

impl ControlLoop {
    fn run(self) {
        // Main loop
        loop {
            if self.shutdown.load(Ordering::Acquire) {
                break;
            }

            let step = lock_car(&self.car).next_step();
            match step {
                Step::Idle => {
                    trace!("Idle, polling again in {:?}", self.idle_poll_time);
                    thread::sleep(self.idle_poll_time);
                }
                Step::Arrived => self.service_floor(),
                Step::Move(direction) => {
                    self.move_one_floor(direction);

                    // Arrival handling belongs to this step, even if shutdown came in meanwhile
                    let at_stop = lock_car(&self.car).is_stop();
                    if at_stop {
                        self.service_floor();
                    }
                }
            }
        }

        let floor = {
            let mut car = lock_car(&self.car);
            car.terminate();
            car.floor()
        };
        info!("Elevator scheduler terminated at floor {}", floor);
    }

    fn move_one_floor(&self, direction: Direction) {
        thread::sleep(self.step_time);
        let floor = lock_car(&self.car).advance(direction);
        self.sink.emit(ElevatorEvent::Moved { floor, direction });
    }

    fn service_floor(&self) {
        let events = lock_car(&self.car).handle_floor();
        for event in events {
            self.sink.emit(event);
        }
        thread::sleep(self.dwell_time);
    }
}

// The guarded state is never left half-updated, so a poisoned lock is still usable
fn lock_car(car: &Mutex<CarState>) -> MutexGuard<'_, CarState> {
    car.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
