//! Player profile, aggregate statistics and win streaks

use serde::{Deserialize, Serialize};
use crate::error::ArenaError;
use crate::history::{MatchHistory, MatchRecord};
use crate::moves::{Move, Outcome};
use crate::{BPS_DENOMINATOR, MAX_NAME_LEN, PERFECT_STREAK_INTERVAL};

/// Played and won counts per move kind, indexed by `Move::index`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceStats {
    pub played: [u64; 3],
    pub won: [u64; 3],
}

impl ChoiceStats {
    pub fn played_with(&self, m: Move) -> u64 {
        self.played[m.index() as usize]
    }

    pub fn won_with(&self, m: Move) -> u64 {
        self.won[m.index() as usize]
    }

    pub fn total_played(&self) -> u64 {
        self.played.iter().sum()
    }
}

/// Aggregate view returned by stats queries
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub name: String,
    pub wins: u64,
    pub losses: u64,
    pub ties: u64,
    pub total_matches: u64,
    pub win_rate_bps: u64,
    pub current_streak: u64,
    pub best_streak: u64,
}

/// Streak bookkeeping produced by one recorded outcome
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreakUpdate {
    pub current_streak: u64,
    pub best_streak: u64,
    /// The win raised `best_streak`
    pub new_best: bool,
    /// `current_streak` just reached a positive multiple of `PERFECT_STREAK_INTERVAL`
    pub perfect_streak: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub wins: u64,
    pub losses: u64,
    pub ties: u64,
    pub current_streak: u64,
    pub best_streak: u64,
    pub exists: bool,
    pub choice_stats: ChoiceStats,
    pub history: MatchHistory,
}

/// Win rate in basis points, floor division; 0 when no match was played.
pub fn win_rate_bps(wins: u64, total_matches: u64) -> u64 {
    if total_matches == 0 {
        return 0;
    }
    (wins as u128 * BPS_DENOMINATOR as u128 / total_matches as u128) as u64
}

pub fn validate_name(name: &str) -> Result<(), ArenaError> {
    if name.is_empty() {
        return Err(ArenaError::InvalidName);
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ArenaError::NameTooLong);
    }
    Ok(())
}

impl Profile {
    /// Fresh registered profile with all counters at zero
    pub fn new(name: &str) -> Result<Self, ArenaError> {
        validate_name(name)?;
        Ok(Self {
            name: name.to_string(),
            exists: true,
            ..Self::default()
        })
    }

    pub fn total_matches(&self) -> u64 {
        self.wins + self.losses + self.ties
    }

    pub fn win_rate_bps(&self) -> u64 {
        win_rate_bps(self.wins, self.total_matches())
    }

    pub fn stats(&self) -> Result<PlayerStats, ArenaError> {
        if !self.exists {
            return Err(ArenaError::NotRegistered);
        }
        Ok(PlayerStats {
            name: self.name.clone(),
            wins: self.wins,
            losses: self.losses,
            ties: self.ties,
            total_matches: self.total_matches(),
            win_rate_bps: self.win_rate_bps(),
            current_streak: self.current_streak,
            best_streak: self.best_streak,
        })
    }

    /// Update counters, streaks and per-choice stats for one match.
    ///
    /// Every new value is computed before anything is written, so an error
    /// leaves the profile untouched.
    pub fn record_outcome(
        &mut self,
        player_move: Move,
        opponent_move: Move,
        outcome: Outcome,
    ) -> Result<StreakUpdate, ArenaError> {
        debug_assert_eq!(crate::resolve(player_move, opponent_move), outcome);
        if !self.exists {
            return Err(ArenaError::NotRegistered);
        }

        let bump = |n: u64| n.checked_add(1).ok_or(ArenaError::Overflow);
        let slot = player_move.index() as usize;

        let (mut wins, mut losses, mut ties) = (self.wins, self.losses, self.ties);
        let mut choice_stats = self.choice_stats;
        choice_stats.played[slot] = bump(choice_stats.played[slot])?;

        let current_streak;
        match outcome {
            Outcome::Win => {
                wins = bump(wins)?;
                choice_stats.won[slot] = bump(choice_stats.won[slot])?;
                current_streak = bump(self.current_streak)?;
            }
            Outcome::Lose => {
                losses = bump(losses)?;
                current_streak = 0;
            }
            Outcome::Tie => {
                ties = bump(ties)?;
                current_streak = 0;
            }
        }
        // Total must stay representable
        wins.checked_add(losses)
            .and_then(|n| n.checked_add(ties))
            .ok_or(ArenaError::Overflow)?;

        let new_best = current_streak > self.best_streak;
        let best_streak = self.best_streak.max(current_streak);
        let perfect_streak = outcome == Outcome::Win
            && current_streak % PERFECT_STREAK_INTERVAL == 0;

        self.wins = wins;
        self.losses = losses;
        self.ties = ties;
        self.current_streak = current_streak;
        self.best_streak = best_streak;
        self.choice_stats = choice_stats;

        Ok(StreakUpdate {
            current_streak,
            best_streak,
            new_best,
            perfect_streak,
        })
    }

    /// Record the outcome and append the match to the ledger as one step
    pub fn record_match(&mut self, record: MatchRecord) -> Result<StreakUpdate, ArenaError> {
        let update = self.record_outcome(record.player_move, record.opponent_move, record.outcome)?;
        self.history.push(record);
        Ok(update)
    }

    /// Zero every counter and clear the history; name and `exists` survive.
    pub fn reset(&mut self) -> Result<(), ArenaError> {
        if !self.exists {
            return Err(ArenaError::NotRegistered);
        }
        self.wins = 0;
        self.losses = 0;
        self.ties = 0;
        self.current_streak = 0;
        self.best_streak = 0;
        self.choice_stats = ChoiceStats::default();
        self.history.clear();
        Ok(())
    }
}
