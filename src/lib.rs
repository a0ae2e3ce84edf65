pub mod app_state;
pub mod logging;
pub mod store;

pub use app_state::{AppState, StateError, StateSnapshot};
pub use checkers_core;
pub use store::{Subscription, Writable};
