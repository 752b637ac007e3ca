//! Errors raised by profile, ledger and ranking operations

/// Every failure is synchronous and leaves state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaError {
    /// Profile name is empty
    InvalidName,
    /// Profile name exceeds `MAX_NAME_LEN` bytes
    NameTooLong,
    AlreadyRegistered,
    NotRegistered,
    /// Move index outside {0, 1, 2}
    InvalidMove,
    /// History count outside [1, HISTORY_CAPACITY]
    InvalidRange,
    /// Lookup of another player's profile that was never created
    UnknownIdentity,
    Overflow,
}

impl core::fmt::Display for ArenaError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ArenaError::InvalidName => write!(f, "name cannot be empty"),
            ArenaError::NameTooLong => {
                write!(f, "name exceeds {} bytes", crate::MAX_NAME_LEN)
            }
            ArenaError::AlreadyRegistered => write!(f, "profile already exists"),
            ArenaError::NotRegistered => write!(f, "create a profile first"),
            ArenaError::InvalidMove => {
                write!(f, "invalid move (0 = Rock, 1 = Paper, 2 = Scissors)")
            }
            ArenaError::InvalidRange => write!(
                f,
                "history count must be between 1 and {}",
                crate::HISTORY_CAPACITY
            ),
            ArenaError::UnknownIdentity => write!(f, "player does not exist"),
            ArenaError::Overflow => write!(f, "arithmetic overflow"),
        }
    }
}

impl std::error::Error for ArenaError {}
