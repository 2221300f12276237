//! Seeded randomness shared by every hazard roll.
//!
//! Fire spread, gas ignition, damage jitter and random disaster placement all
//! draw from one `SimRng`, so a seed fully determines how a disaster unfolds.

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const HAZARD_SEED: u64 = 42;

/// Position of a ChaCha8 stream: key, stream id and word offset.
#[derive(Encode, Decode)]
struct ChaChaState {
    key: [u8; 32],
    stream: u64,
    word_pos: u128,
}

impl From<&ChaCha8Rng> for ChaChaState {
    fn from(rng: &ChaCha8Rng) -> Self {
        Self {
            key: rng.get_seed(),
            stream: rng.get_stream(),
            word_pos: rng.get_word_pos(),
        }
    }
}

impl From<ChaChaState> for ChaCha8Rng {
    fn from(state: ChaChaState) -> Self {
        let mut rng = ChaCha8Rng::from_seed(state.key);
        rng.set_stream(state.stream);
        rng.set_word_pos(state.word_pos);
        rng
    }
}

/// Pass `&mut sim_rng.0` to anything taking a `rand::Rng`.
#[derive(Resource)]
pub struct SimRng(pub ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self::from_seed_u64(HAZARD_SEED)
    }
}

impl SimRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl crate::Saveable for SimRng {
    const SAVE_KEY: &'static str = "sim_rng";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        Some(bitcode::encode(&ChaChaState::from(&self.0)))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        bitcode::decode::<ChaChaState>(bytes)
            .map(|state| Self(state.into()))
            .unwrap_or_else(|e| {
                warn!(
                    "Saveable {}: unreadable RNG state ({} bytes), reseeding: {}",
                    Self::SAVE_KEY,
                    bytes.len(),
                    e
                );
                Self::default()
            })
    }
}
