pub mod state;

pub use state::{SelectionCounts, SelectionState};
