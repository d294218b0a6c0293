pub mod autopilot;
pub mod human;

pub use autopilot::AutopilotMode;
pub use human::HumanMode;
