//! Opponent move derivation
//!
//! The opponent move comes from public chain inputs (nonce, caller, clock,
//! recent slot hash). Anyone who can influence block production can bias it:
//! this is non-adversarial randomness, not a fairness guarantee.

use crate::moves::Move;
use crate::Identity;

/// Inputs mixed into an opponent move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entropy {
    /// Global nonce before this call's increment
    pub nonce: u64,
    pub identity: Identity,
    pub timestamp: i64,
    pub slot: u64,
    /// Most recent slot hash
    pub recent_hash: [u8; 32],
}

impl Entropy {
    pub const PREIMAGE_LEN: usize = 8 + 32 + 8 + 8 + 32;

    /// `nonce_le || identity || timestamp_le || slot_le || recent_hash`
    pub fn preimage(&self) -> [u8; Self::PREIMAGE_LEN] {
        let mut out = [0u8; Self::PREIMAGE_LEN];
        out[0..8].copy_from_slice(&self.nonce.to_le_bytes());
        out[8..40].copy_from_slice(&self.identity);
        out[40..48].copy_from_slice(&self.timestamp.to_le_bytes());
        out[48..56].copy_from_slice(&self.slot.to_le_bytes());
        out[56..88].copy_from_slice(&self.recent_hash);
        out
    }
}

/// Reduce a 256-bit big-endian digest modulo 3.
pub fn move_from_digest(digest: &[u8; 32]) -> Move {
    // 256 ≡ 1 (mod 3), so the digest and its byte sum agree modulo 3
    let sum: u64 = digest.iter().map(|b| *b as u64).sum();
    Move::from_residue(sum)
}

/// Source of opponent moves for the in-memory arena
pub trait MoveSource {
    fn opponent_move(&mut self, entropy: &Entropy) -> Move;
}

/// Deterministic non-cryptographic mixer over the entropy preimage
#[derive(Clone, Copy, Debug, Default)]
pub struct MixedEntropy;

impl MoveSource for MixedEntropy {
    fn opponent_move(&mut self, entropy: &Entropy) -> Move {
        let mut rng = SeededRng::new(&entropy.preimage());
        Move::from_residue(rng.next_range(3) as u64)
    }
}

/// Replays a fixed list of opponent moves, cycling when exhausted
#[derive(Clone, Debug)]
pub struct ScriptedMoves {
    moves: Vec<Move>,
    cursor: usize,
}

impl ScriptedMoves {
    pub fn new(moves: Vec<Move>) -> Self {
        Self { moves, cursor: 0 }
    }

    /// Always answer with the same move
    pub fn constant(m: Move) -> Self {
        Self::new(vec![m])
    }
}

impl MoveSource for ScriptedMoves {
    fn opponent_move(&mut self, entropy: &Entropy) -> Move {
        if self.moves.is_empty() {
            return MixedEntropy.opponent_move(entropy);
        }
        let m = self.moves[self.cursor % self.moves.len()];
        self.cursor += 1;
        m
    }
}

/// Seeded random number generator
///
/// Deterministic: same seed bytes = same sequence
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from arbitrary seed bytes
    pub fn new(seed: &[u8]) -> Self {
        // Fold seed bytes into initial state
        let mut state = 0u64;
        for (i, chunk) in seed.chunks(8).enumerate() {
            let mut bytes = [0u8; 8];
            bytes[..chunk.len()].copy_from_slice(chunk);
            state ^= u64::from_le_bytes(bytes)
                .wrapping_add(i as u64)
                .wrapping_mul(0x517cc1b727220a95);
            state = state.rotate_left(23);
        }

        // xorshift gets stuck on a zero state
        if state == 0 {
            state = 0x9e3779b97f4a7c15;
        }

        // Warm up the generator
        let mut rng = Self { state };
        for _ in 0..8 {
            rng.next_u64();
        }

        rng
    }

    /// Generate next u64
    pub fn next_u64(&mut self) -> u64 {
        // xorshift64*
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }

    /// Generate next u32
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Generate a value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }
}
