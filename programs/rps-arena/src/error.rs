//! Custom error codes

use anchor_lang::prelude::*;
use rps_logic::ArenaError;

#[error_code]
pub enum RpsError {
    #[msg("Name cannot be empty")]
    InvalidName = 6000,

    #[msg("Player already has a profile")]
    AlreadyRegistered = 6001,

    #[msg("Create a profile first")]
    NotRegistered = 6002,

    #[msg("Invalid move (0 = Rock, 1 = Paper, 2 = Scissors)")]
    InvalidMove = 6003,

    #[msg("History count must be between 1 and 10")]
    InvalidRange = 6004,

    #[msg("Player does not exist")]
    UnknownIdentity = 6005,

    #[msg("Name exceeds 32 bytes")]
    NameTooLong = 6006,

    #[msg("Profile account does not match the registry")]
    InvalidProfileAccount = 6007,

    #[msg("SlotHashes sysvar unavailable")]
    SlotHashUnavailable = 6008,

    #[msg("Arithmetic overflow")]
    Overflow = 6009,
}

impl From<ArenaError> for RpsError {
    fn from(err: ArenaError) -> Self {
        match err {
            ArenaError::InvalidName => RpsError::InvalidName,
            ArenaError::NameTooLong => RpsError::NameTooLong,
            ArenaError::AlreadyRegistered => RpsError::AlreadyRegistered,
            ArenaError::NotRegistered => RpsError::NotRegistered,
            ArenaError::InvalidMove => RpsError::InvalidMove,
            ArenaError::InvalidRange => RpsError::InvalidRange,
            ArenaError::UnknownIdentity => RpsError::UnknownIdentity,
            ArenaError::Overflow => RpsError::Overflow,
        }
    }
}
