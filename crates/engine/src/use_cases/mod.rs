//! Use cases - User story orchestration.
//!
//! Use cases fetch snapshots through the ports, hand them to the pure domain
//! functions together with the viewer and the current instant, and return
//! the evaluated result.

pub mod polls;

pub use polls::PollUseCases;
