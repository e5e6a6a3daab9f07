//! Submit callback boundary

mod simulated;
mod traits;

pub use simulated::SimulatedSubmitter;
pub use traits::SubmitHandler;

#[cfg(test)]
pub use traits::MockSubmitHandler;
