mod driver;
mod engine;

pub use driver::TickDriver;
pub use engine::{SessionTimer, TimerStatus};
