mod writable;

pub use writable::{Subscription, Writable};
