//! Session layer between the pure games and the terminal shell.
//!
//! - [`scheduler`]: delayed tasks on a caller-driven millisecond clock
//! - [`session`]: a live board with its input lock, hint flash and stopwatch

pub mod scheduler;
pub mod session;

pub use scheduler::{Scheduler, TimerId};
pub use session::{HintState, Session};
