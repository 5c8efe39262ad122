pub mod session;
pub mod timer;
pub mod touch;

pub use session::{Session, SessionOptions};
pub use timer::TickScheduler;
