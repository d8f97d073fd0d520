pub mod cycles;
pub mod demo;
pub mod propagate;

pub use propagate::{propagate, propagate_with_cap, Propagation, PropagationStatus, MAX_PASSES};
