/*
 * Single-car elevator simulation.
 *
 * An `ElevatorScheduler` owns the car and runs a SCAN control loop on its own
 * thread. Riders are submitted from any thread; progress is reported through an
 * injected `EventSink`.
 */

/* Modules */
pub mod config;
pub mod elevator;
pub mod error;
pub mod shared;

pub use config::{load_config, Config, ElevatorConfig};
pub use elevator::{ElevatorEvent, ElevatorScheduler, EventSink, LogSink, NoopSink};
pub use error::{ConfigError, ElevatorError};
pub use shared::{Behaviour, CarSnapshot, Direction, Rider};
