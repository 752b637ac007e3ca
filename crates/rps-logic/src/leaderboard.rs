//! Leaderboard projection
//!
//! Rankings are derived from the full registry on every call: a linear scan
//! followed by a stable sort. Nothing sorted is persisted, which only stays
//! affordable while the registry is small.

use serde::{Deserialize, Serialize};
use crate::profile::Profile;
use crate::Identity;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry<I = Identity> {
    pub identity: I,
    pub name: String,
    pub wins: u64,
    pub best_streak: u64,
}

/// Rank registered profiles by wins, descending.
///
/// `profiles` must be given in registration order: equal win counts keep
/// that order. Profiles with `exists == false` are skipped.
pub fn rank<'a, I, P>(profiles: P) -> Vec<RankingEntry<I>>
where
    I: Clone + 'a,
    P: IntoIterator<Item = (&'a I, &'a Profile)>,
{
    let mut ranking: Vec<RankingEntry<I>> = profiles
        .into_iter()
        .filter(|(_, p)| p.exists)
        .map(|(identity, p)| RankingEntry {
            identity: identity.clone(),
            name: p.name.clone(),
            wins: p.wins,
            best_streak: p.best_streak,
        })
        .collect();

    // sort_by is stable
    ranking.sort_by(|a, b| b.wins.cmp(&a.wins));
    ranking
}

/// 1-based position of `identity` in a ranking
pub fn rank_of<I: PartialEq>(ranking: &[RankingEntry<I>], identity: &I) -> Option<u32> {
    ranking
        .iter()
        .position(|entry| &entry.identity == identity)
        .map(|i| i as u32 + 1)
}
