pub mod macros;
pub mod structs;

pub use structs::Behaviour;
pub use structs::CarSnapshot;
pub use structs::Direction;
pub use structs::OnboardRider;
pub use structs::Rider;
