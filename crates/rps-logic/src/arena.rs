//! In-memory arena
//!
//! The whole ledger as a sequential state machine: registry, nonce, match
//! resolution and events. Each public call validates everything it needs
//! before its first write, so an `Err` return leaves the arena exactly as it
//! was (no nonce bump, no counters, no ledger entry, no event).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use crate::error::ArenaError;
use crate::history::{MatchHistory, MatchRecord};
use crate::leaderboard::{rank, rank_of, RankingEntry};
use crate::moves::{Move, Outcome};
use crate::profile::{ChoiceStats, PlayerStats, Profile};
use crate::random::{Entropy, MoveSource};
use crate::{resolve, Identity};

/// Chain attributes that feed the opponent move
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChainContext {
    pub timestamp: i64,
    pub slot: u64,
    pub recent_hash: [u8; 32],
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaEvent {
    ProfileCreated {
        identity: Identity,
        name: String,
    },
    MatchPlayed {
        identity: Identity,
        player_move: Move,
        opponent_move: Move,
        outcome: Outcome,
    },
    BestStreakBeaten {
        identity: Identity,
        best_streak: u64,
    },
    PerfectStreak {
        identity: Identity,
        streak: u64,
    },
    StatsReset {
        identity: Identity,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayResult {
    pub opponent_move: Move,
    pub outcome: Outcome,
    pub current_streak: u64,
}

pub struct Arena<S> {
    profiles: HashMap<Identity, Profile>,
    /// Registration order
    order: Vec<Identity>,
    nonce: u64,
    events: Vec<ArenaEvent>,
    source: S,
}

impl<S: MoveSource + Clone> Arena<S> {
    pub fn new(source: S) -> Self {
        Self {
            profiles: HashMap::new(),
            order: Vec::new(),
            nonce: 0,
            events: Vec::new(),
            source,
        }
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn player_count(&self) -> usize {
        self.order.len()
    }

    /// Events emitted so far, oldest first
    pub fn events(&self) -> &[ArenaEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<ArenaEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn create_profile(&mut self, identity: Identity, name: &str) -> Result<(), ArenaError> {
        if self.profiles.get(&identity).is_some_and(|p| p.exists) {
            return Err(ArenaError::AlreadyRegistered);
        }
        let profile = Profile::new(name)?;

        self.profiles.insert(identity, profile);
        self.order.push(identity);
        self.events.push(ArenaEvent::ProfileCreated {
            identity,
            name: name.to_string(),
        });
        Ok(())
    }

    /// Play one match against the pseudo-random opponent.
    pub fn play(
        &mut self,
        identity: Identity,
        choice: u8,
        chain: &ChainContext,
    ) -> Result<PlayResult, ArenaError> {
        let player_move = Move::try_from(choice)?;
        let profile = self
            .profiles
            .get_mut(&identity)
            .filter(|p| p.exists)
            .ok_or(ArenaError::NotRegistered)?;
        let next_nonce = self.nonce.checked_add(1).ok_or(ArenaError::Overflow)?;

        let entropy = Entropy {
            nonce: self.nonce,
            identity,
            timestamp: chain.timestamp,
            slot: chain.slot,
            recent_hash: chain.recent_hash,
        };
        // Draw from a copy; the source only advances once the match is recorded
        let mut source = self.source.clone();
        let opponent_move = source.opponent_move(&entropy);
        let outcome = resolve(player_move, opponent_move);
        let record = MatchRecord {
            player_move,
            opponent_move,
            outcome,
        };
        let update = profile.record_match(record)?;
        self.source = source;
        self.nonce = next_nonce;

        self.events.push(ArenaEvent::MatchPlayed {
            identity,
            player_move,
            opponent_move,
            outcome,
        });
        if update.new_best {
            self.events.push(ArenaEvent::BestStreakBeaten {
                identity,
                best_streak: update.best_streak,
            });
        }
        if update.perfect_streak {
            self.events.push(ArenaEvent::PerfectStreak {
                identity,
                streak: update.current_streak,
            });
        }

        Ok(PlayResult {
            opponent_move,
            outcome,
            current_streak: update.current_streak,
        })
    }

    /// Raw profile; never fails, `exists == false` signals absence
    pub fn profile(&self, identity: &Identity) -> Profile {
        self.profiles.get(identity).cloned().unwrap_or_default()
    }

    /// Stats for a player acting on their own profile
    pub fn stats(&self, identity: &Identity) -> Result<PlayerStats, ArenaError> {
        self.registered(identity)?.stats()
    }

    /// Stats lookup of any player by key
    pub fn player_stats(&self, identity: &Identity) -> Result<PlayerStats, ArenaError> {
        self.registered(identity)
            .map_err(|_| ArenaError::UnknownIdentity)?
            .stats()
    }

    /// The `count` most recent matches, newest first
    pub fn history(&self, identity: &Identity, count: u8) -> Result<Vec<MatchRecord>, ArenaError> {
        match self.profiles.get(identity) {
            Some(p) => p.history.recent(count),
            None => MatchHistory::new().recent(count),
        }
    }

    /// Number of stored history records
    pub fn count(&self, identity: &Identity) -> usize {
        self.profiles.get(identity).map_or(0, |p| p.history.len())
    }

    pub fn choice_stats(&self, identity: &Identity) -> Result<ChoiceStats, ArenaError> {
        Ok(self.registered(identity)?.choice_stats)
    }

    pub fn ranking(&self) -> Vec<RankingEntry> {
        rank(
            self.order
                .iter()
                .filter_map(|id| self.profiles.get(id).map(|p| (id, p))),
        )
    }

    /// 1-based rank
    pub fn rank(&self, identity: &Identity) -> Result<u32, ArenaError> {
        self.registered(identity)?;
        rank_of(&self.ranking(), identity).ok_or(ArenaError::NotRegistered)
    }

    pub fn reset_stats(&mut self, identity: &Identity) -> Result<(), ArenaError> {
        let profile = self
            .profiles
            .get_mut(identity)
            .ok_or(ArenaError::NotRegistered)?;
        profile.reset()?;
        self.events.push(ArenaEvent::StatsReset {
            identity: *identity,
        });
        Ok(())
    }

    fn registered(&self, identity: &Identity) -> Result<&Profile, ArenaError> {
        self.profiles
            .get(identity)
            .filter(|p| p.exists)
            .ok_or(ArenaError::NotRegistered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{MixedEntropy, ScriptedMoves};
    use crate::HISTORY_CAPACITY;
    use proptest::prelude::*;

    const ALICE: Identity = [1u8; 32];
    const BOB: Identity = [2u8; 32];
    const CAROL: Identity = [3u8; 32];

    fn chain(slot: u64) -> ChainContext {
        ChainContext {
            timestamp: 1_700_000_000 + slot as i64,
            slot,
            recent_hash: [9u8; 32],
        }
    }

    /// Opponent always throws Scissors: Rock wins, Paper loses, Scissors ties
    fn scissors_arena() -> Arena<ScriptedMoves> {
        Arena::new(ScriptedMoves::constant(Move::Scissors))
    }

    #[test]
    fn test_create_profile() {
        let mut arena = scissors_arena();
        arena.create_profile(ALICE, "Alice").unwrap();

        let p = arena.profile(&ALICE);
        assert!(p.exists);
        assert_eq!(p.name, "Alice");
        assert_eq!(p.wins, 0);
        assert_eq!(
            arena.events(),
            &[ArenaEvent::ProfileCreated {
                identity: ALICE,
                name: "Alice".to_string(),
            }]
        );
    }

    #[test]
    fn test_create_profile_errors() {
        let mut arena = scissors_arena();
        assert_eq!(arena.create_profile(ALICE, ""), Err(ArenaError::InvalidName));
        assert!(!arena.profile(&ALICE).exists);

        arena.create_profile(ALICE, "Alice").unwrap();
        assert_eq!(
            arena.create_profile(ALICE, "Alice2"),
            Err(ArenaError::AlreadyRegistered)
        );
        assert_eq!(arena.profile(&ALICE).name, "Alice");
        assert_eq!(arena.player_count(), 1);
        assert_eq!(arena.events().len(), 1);
    }

    #[test]
    fn test_raw_profile_of_stranger() {
        let arena = scissors_arena();
        let p = arena.profile(&BOB);
        assert!(!p.exists);
        assert_eq!(p, Profile::default());
    }

    #[test]
    fn test_play_unregistered_leaves_no_trace() {
        let mut arena = scissors_arena();
        assert_eq!(arena.play(ALICE, 0, &chain(1)), Err(ArenaError::NotRegistered));
        assert_eq!(arena.nonce(), 0);
        assert_eq!(arena.count(&ALICE), 0);
        assert!(arena.events().is_empty());
        assert!(!arena.profile(&ALICE).exists);
    }

    #[test]
    fn test_overflowing_play_leaves_no_trace() {
        let mut arena = Arena::new(ScriptedMoves::new(vec![Move::Scissors, Move::Paper]));
        arena.create_profile(ALICE, "Alice").unwrap();
        arena.drain_events();
        if let Some(p) = arena.profiles.get_mut(&ALICE) {
            p.wins = u64::MAX;
        }
        let before = arena.profile(&ALICE);

        assert_eq!(arena.play(ALICE, 0, &chain(1)), Err(ArenaError::Overflow));
        assert_eq!(arena.nonce(), 0);
        assert_eq!(arena.profile(&ALICE), before);
        assert!(arena.events().is_empty());

        // The scripted source was not consumed by the failed call
        if let Some(p) = arena.profiles.get_mut(&ALICE) {
            p.wins = 0;
        }
        let result = arena.play(ALICE, 0, &chain(2)).unwrap();
        assert_eq!(result.opponent_move, Move::Scissors);
        assert_eq!(result.outcome, Outcome::Win);
        assert_eq!(arena.nonce(), 1);
    }

    #[test]
    fn test_play_invalid_move() {
        let mut arena = scissors_arena();
        arena.create_profile(ALICE, "Alice").unwrap();
        arena.drain_events();

        assert_eq!(arena.play(ALICE, 5, &chain(1)), Err(ArenaError::InvalidMove));
        assert_eq!(arena.play(ALICE, 3, &chain(1)), Err(ArenaError::InvalidMove));
        assert_eq!(arena.nonce(), 0);
        assert_eq!(arena.stats(&ALICE).unwrap().total_matches, 0);
        assert!(arena.events().is_empty());
    }

    #[test]
    fn test_play_result_and_events() {
        let mut arena = scissors_arena();
        arena.create_profile(ALICE, "Alice").unwrap();
        arena.drain_events();

        let result = arena.play(ALICE, 0, &chain(1)).unwrap();
        assert_eq!(result.opponent_move, Move::Scissors);
        assert_eq!(result.outcome, Outcome::Win);
        assert_eq!(result.current_streak, 1);
        assert_eq!(arena.nonce(), 1);
        assert_eq!(
            arena.drain_events(),
            vec![
                ArenaEvent::MatchPlayed {
                    identity: ALICE,
                    player_move: Move::Rock,
                    opponent_move: Move::Scissors,
                    outcome: Outcome::Win,
                },
                ArenaEvent::BestStreakBeaten {
                    identity: ALICE,
                    best_streak: 1,
                },
            ]
        );

        let result = arena.play(ALICE, 1, &chain(2)).unwrap();
        assert_eq!(result.outcome, Outcome::Lose);
        assert_eq!(result.current_streak, 0);
        assert_eq!(arena.drain_events().len(), 1);
    }

    #[test]
    fn test_nonce_is_global() {
        let mut arena = scissors_arena();
        arena.create_profile(ALICE, "Alice").unwrap();
        arena.create_profile(BOB, "Bob").unwrap();
        arena.play(ALICE, 0, &chain(1)).unwrap();
        arena.play(BOB, 2, &chain(1)).unwrap();
        arena.play(ALICE, 1, &chain(2)).unwrap();
        assert_eq!(arena.nonce(), 3);

        arena.reset_stats(&ALICE).unwrap();
        assert_eq!(arena.nonce(), 3);
    }

    #[test]
    fn test_perfect_streak_event() {
        let mut arena = scissors_arena();
        arena.create_profile(ALICE, "Alice").unwrap();
        for i in 0..20 {
            arena.play(ALICE, 0, &chain(i)).unwrap();
        }
        let perfect: Vec<u64> = arena
            .events()
            .iter()
            .filter_map(|e| match e {
                ArenaEvent::PerfectStreak { streak, .. } => Some(*streak),
                _ => None,
            })
            .collect();
        assert_eq!(perfect, vec![10, 20]);
    }

    #[test]
    fn test_win_rate_three_of_five() {
        let mut arena = scissors_arena();
        arena.create_profile(ALICE, "Alice").unwrap();
        for choice in [0, 0, 1, 2, 0] {
            arena.play(ALICE, choice, &chain(0)).unwrap();
        }
        let stats = arena.stats(&ALICE).unwrap();
        assert_eq!((stats.wins, stats.losses, stats.ties), (3, 1, 1));
        assert_eq!(stats.total_matches, 5);
        assert_eq!(stats.win_rate_bps, 6000);
    }

    #[test]
    fn test_stats_errors() {
        let mut arena = scissors_arena();
        assert_eq!(arena.stats(&ALICE), Err(ArenaError::NotRegistered));
        assert_eq!(arena.player_stats(&ALICE), Err(ArenaError::UnknownIdentity));
        assert_eq!(arena.choice_stats(&ALICE), Err(ArenaError::NotRegistered));
        assert_eq!(arena.rank(&ALICE), Err(ArenaError::NotRegistered));
        assert_eq!(arena.reset_stats(&ALICE), Err(ArenaError::NotRegistered));
        assert!(arena.events().is_empty());
    }

    #[test]
    fn test_player_stats_of_other_player() {
        let mut arena = scissors_arena();
        arena.create_profile(ALICE, "Alice").unwrap();
        arena.create_profile(BOB, "Bob").unwrap();
        for _ in 0..3 {
            arena.play(ALICE, 0, &chain(0)).unwrap();
        }
        let stats = arena.player_stats(&ALICE).unwrap();
        assert_eq!(stats.name, "Alice");
        assert_eq!(stats.wins, 3);
    }

    #[test]
    fn test_history_newest_first_and_eviction() {
        let mut arena = scissors_arena();
        arena.create_profile(ALICE, "Alice").unwrap();

        // First match is the only Paper played
        arena.play(ALICE, 1, &chain(0)).unwrap();
        for _ in 0..HISTORY_CAPACITY {
            arena.play(ALICE, 0, &chain(0)).unwrap();
        }

        assert_eq!(arena.count(&ALICE), HISTORY_CAPACITY);
        let history = arena.history(&ALICE, 10).unwrap();
        assert_eq!(history.len(), 10);
        assert!(history.iter().all(|r| r.player_move == Move::Rock));

        arena.play(ALICE, 2, &chain(0)).unwrap();
        let newest = arena.history(&ALICE, 1).unwrap();
        assert_eq!(newest[0].player_move, Move::Scissors);
        assert_eq!(newest[0].outcome, Outcome::Tie);
    }

    #[test]
    fn test_history_short_and_range() {
        let mut arena = scissors_arena();
        arena.create_profile(BOB, "Bob").unwrap();
        for choice in [0, 1, 2] {
            arena.play(BOB, choice, &chain(0)).unwrap();
        }
        let history = arena.history(&BOB, 10).unwrap();
        let moves: Vec<_> = history.iter().map(|r| r.player_move).collect();
        assert_eq!(moves, vec![Move::Scissors, Move::Paper, Move::Rock]);

        assert_eq!(arena.history(&BOB, 0), Err(ArenaError::InvalidRange));
        assert_eq!(arena.history(&BOB, 11), Err(ArenaError::InvalidRange));
        assert_eq!(arena.history(&CAROL, 5), Ok(vec![]));
        assert_eq!(arena.history(&CAROL, 0), Err(ArenaError::InvalidRange));
    }

    #[test]
    fn test_reset() {
        let mut arena = scissors_arena();
        arena.create_profile(ALICE, "Alice").unwrap();
        for choice in [0, 0, 1, 2, 0] {
            arena.play(ALICE, choice, &chain(0)).unwrap();
        }
        arena.reset_stats(&ALICE).unwrap();

        let stats = arena.stats(&ALICE).unwrap();
        assert_eq!(stats.name, "Alice");
        assert_eq!(
            (stats.wins, stats.losses, stats.ties, stats.current_streak, stats.best_streak),
            (0, 0, 0, 0, 0)
        );
        assert_eq!(arena.count(&ALICE), 0);
        assert_eq!(arena.choice_stats(&ALICE).unwrap(), ChoiceStats::default());
        assert_eq!(
            arena.events().last(),
            Some(&ArenaEvent::StatsReset { identity: ALICE })
        );

        // Still registered, can play again
        assert!(arena.play(ALICE, 0, &chain(0)).is_ok());
        assert_eq!(arena.create_profile(ALICE, "Again"), Err(ArenaError::AlreadyRegistered));
    }

    #[test]
    fn test_ranking_and_rank() {
        let mut arena = scissors_arena();
        arena.create_profile(BOB, "Bob").unwrap();
        arena.create_profile(ALICE, "Alice").unwrap();
        for _ in 0..3 {
            arena.play(BOB, 0, &chain(0)).unwrap();
        }
        for _ in 0..5 {
            arena.play(ALICE, 0, &chain(0)).unwrap();
        }

        let ranking = arena.ranking();
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].identity, ALICE);
        assert_eq!(ranking[0].wins, 5);
        assert_eq!(ranking[0].best_streak, 5);
        assert_eq!(ranking[1].identity, BOB);
        assert_eq!(arena.rank(&ALICE), Ok(1));
        assert_eq!(arena.rank(&BOB), Ok(2));
    }

    #[test]
    fn test_ranking_ties_by_registration() {
        let mut arena = scissors_arena();
        arena.create_profile(CAROL, "Carol").unwrap();
        arena.create_profile(ALICE, "Alice").unwrap();
        arena.create_profile(BOB, "Bob").unwrap();
        arena.play(BOB, 0, &chain(0)).unwrap();

        let order: Vec<_> = arena.ranking().iter().map(|e| e.identity).collect();
        assert_eq!(order, vec![BOB, CAROL, ALICE]);
        assert_eq!(arena.rank(&CAROL).unwrap() + arena.rank(&ALICE).unwrap(), 5);
    }

    #[test]
    fn test_choice_stats_only_rock() {
        let mut arena = scissors_arena();
        arena.create_profile(ALICE, "Alice").unwrap();
        for _ in 0..5 {
            arena.play(ALICE, 0, &chain(0)).unwrap();
        }
        let cs = arena.choice_stats(&ALICE).unwrap();
        assert_eq!(cs.played, [5, 0, 0]);
        assert_eq!(cs.won, [5, 0, 0]);
    }

    #[test]
    fn test_mixed_entropy_full_scenario() {
        let mut arena = Arena::new(MixedEntropy);
        arena.create_profile(ALICE, "Alice").unwrap();
        arena.create_profile(BOB, "Bob").unwrap();
        for i in 0..20u64 {
            arena.play(ALICE, (i % 3) as u8, &chain(i)).unwrap();
            arena.play(BOB, ((i + 1) % 3) as u8, &chain(i)).unwrap();
        }
        assert_eq!(arena.stats(&ALICE).unwrap().total_matches, 20);
        assert_eq!(arena.stats(&BOB).unwrap().total_matches, 20);
        assert_eq!(arena.history(&ALICE, 10).unwrap().len(), 10);
        assert_eq!(arena.rank(&ALICE).unwrap() + arena.rank(&BOB).unwrap(), 3);
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_after_every_play(
            plays in prop::collection::vec((0u8..3, 0u8..3), 1..60),
        ) {
            let opponents = plays
                .iter()
                .filter_map(|(_, o)| Move::from_index(*o))
                .collect();
            let mut arena = Arena::new(ScriptedMoves::new(opponents));
            arena.create_profile(ALICE, "Alice").unwrap();

            for (n, (choice, _)) in plays.iter().enumerate() {
                let result = arena.play(ALICE, *choice, &chain(n as u64)).unwrap();
                let p = arena.profile(&ALICE);
                let stats = arena.stats(&ALICE).unwrap();

                prop_assert_eq!(p.wins + p.losses + p.ties, n as u64 + 1);
                prop_assert_eq!(stats.total_matches, n as u64 + 1);
                prop_assert!(p.best_streak >= p.current_streak);
                prop_assert_eq!(p.choice_stats.total_played(), stats.total_matches);
                prop_assert!(p.choice_stats.won.iter().zip(p.choice_stats.played.iter()).all(|(w, pl)| w <= pl));
                if result.outcome != Outcome::Win {
                    prop_assert_eq!(p.current_streak, 0);
                }
                prop_assert_eq!(arena.count(&ALICE), (n + 1).min(HISTORY_CAPACITY));
                prop_assert_eq!(arena.nonce(), n as u64 + 1);
            }
        }

        #[test]
        fn prop_history_never_exceeds_request(
            matches in 0usize..25,
            k in 1u8..=10,
        ) {
            let mut arena = Arena::new(MixedEntropy);
            arena.create_profile(ALICE, "Alice").unwrap();
            for i in 0..matches {
                arena.play(ALICE, (i % 3) as u8, &chain(i as u64)).unwrap();
            }
            let history = arena.history(&ALICE, k).unwrap();
            prop_assert_eq!(history.len(), (k as usize).min(arena.count(&ALICE)));

            let full = arena.history(&ALICE, 10).unwrap();
            prop_assert_eq!(&full[..history.len()], &history[..]);
        }

        #[test]
        fn prop_ranking_sorted_descending(
            wins in prop::collection::vec(0usize..8, 1..6),
        ) {
            let mut arena = scissors_arena();
            let ids: Vec<Identity> = (0..wins.len()).map(|i| [i as u8 + 10; 32]).collect();
            for (id, w) in ids.iter().zip(wins.iter()) {
                arena.create_profile(*id, "player").unwrap();
                for _ in 0..*w {
                    arena.play(*id, 0, &chain(0)).unwrap();
                }
            }
            let ranking = arena.ranking();
            prop_assert_eq!(ranking.len(), wins.len());
            for pair in ranking.windows(2) {
                prop_assert!(pair[0].wins >= pair[1].wins);
            }
            for (i, entry) in ranking.iter().enumerate() {
                prop_assert_eq!(arena.rank(&entry.identity).unwrap(), i as u32 + 1);
            }
        }
    }
}
