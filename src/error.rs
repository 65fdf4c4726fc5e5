//! Errors returned by races.

use core::fmt;
use std::error::Error;

/// The ways a race can end without a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum RaceError {
    /// The race was started without any participants.
    Empty,
    /// Every participant closed before delivering a value.
    Closed,
}

impl fmt::Display for RaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaceError::Empty => f.write_str("race has no participants"),
            RaceError::Closed => f.write_str("every channel closed without delivering a value"),
        }
    }
}

impl Error for RaceError {}
