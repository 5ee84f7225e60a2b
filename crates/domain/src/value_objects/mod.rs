//! Value objects - Immutable objects defined by their attributes

mod names;

pub use names::{
    OptionText, PollDescription, PollTitle, MAX_DESCRIPTION_LENGTH, MAX_OPTION_TEXT_LENGTH,
    MAX_TITLE_LENGTH,
};
