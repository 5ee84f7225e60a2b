//! Domain entities - Core business objects with identity

mod poll_option;
mod vote;

pub use poll_option::PollOption;
pub use vote::Vote;
