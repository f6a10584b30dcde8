use crate::shared::Direction;
use crossbeam_channel as cbc;
use log::info;
use serde::Serialize;
use std::fmt;

/// Progress reported by the control loop.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ElevatorEvent {
    Moved { floor: u8, direction: Direction },
    Stopped { floor: u8 },
    Boarded { rider: String, destination: u8 },
    Alighted { rider: String },
}

impl fmt::Display for ElevatorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElevatorEvent::Moved { floor, direction } => {
                write!(f, "moving {} - floor {}", direction, floor)
            }
            ElevatorEvent::Stopped { floor } => write!(f, "stopped at floor {}", floor),
            ElevatorEvent::Boarded { rider, destination } => {
                write!(f, "{} boarded, destination {}", rider, destination)
            }
            ElevatorEvent::Alighted { rider } => write!(f, "{} left the elevator", rider),
        }
    }
}

/**
 * Receives events from the control thread.
 *
 * Called without the registry lock held, so an implementation may block or
 * call back into the scheduler.
 */
pub trait EventSink: Send + Sync + 'static {
    fn emit(&self, event: ElevatorEvent);
}

// A disconnected receiver only means nobody is listening anymore
impl EventSink for cbc::Sender<ElevatorEvent> {
    fn emit(&self, event: ElevatorEvent) {
        let _ = self.send(event);
    }
}

pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: ElevatorEvent) {
        info!("{}", event);
    }
}

pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: ElevatorEvent) {}
}
