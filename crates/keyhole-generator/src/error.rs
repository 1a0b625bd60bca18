use crate::length_class::LengthClass;
use thiserror::Error;

/// Errors returned by generator construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("length for {class} must be at least 1")]
    EmptyLength { class: LengthClass },
    #[error("lengths must strictly increase: {shorter} is {shorter_len}, {longer} is {longer_len}")]
    NonIncreasingLengths {
        shorter: LengthClass,
        shorter_len: usize,
        longer: LengthClass,
        longer_len: usize,
    },
}
