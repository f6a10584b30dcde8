pub mod car;
pub mod events;
pub mod registry;
pub mod scheduler;
pub mod car_tests;

pub use car::{CarState, Step};
pub use events::{ElevatorEvent, EventSink, LogSink, NoopSink};
pub use registry::RequestRegistry;
pub use scheduler::ElevatorScheduler;
