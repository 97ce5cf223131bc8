mod controller;
mod ticker;

pub use controller::QuizController;
pub use ticker::{DEFAULT_TICK_PERIOD, SessionTicker, Tick, TickStream, TickerHandle};
