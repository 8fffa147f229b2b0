use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::error::TableError;

/// Ranks a weighted draw picks from: ten-valued cards appear four times,
/// matching their share of a real deck.
const WEIGHTED_RANKS: [u8; 13] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10, 10];

/// Pull-based producer of card ranks for dealer play.
pub trait CardSource {
    fn next_rank(&mut self) -> u8;
}

/// Repeats a scripted sequence of ranks forever.
#[derive(Clone, Debug)]
pub struct CycleSource {
    ranks: Vec<u8>,
    position: usize,
}

impl CycleSource {
    pub fn new(ranks: Vec<u8>) -> Result<Self, TableError> {
        if ranks.is_empty() {
            return Err(TableError::EmptyDraws);
        }
        Ok(CycleSource { ranks, position: 0 })
    }
}

impl CardSource for CycleSource {
    fn next_rank(&mut self) -> u8 {
        let rank = self.ranks[self.position];
        self.position = (self.position + 1) % self.ranks.len();
        rank
    }
}

pub struct WeightedSource {
    rng: SmallRng,
}

impl WeightedSource {
    pub fn seeded(seed: u64) -> Self {
        WeightedSource {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        WeightedSource {
            rng: SmallRng::from_entropy(),
        }
    }
}

impl CardSource for WeightedSource {
    fn next_rank(&mut self) -> u8 {
        WEIGHTED_RANKS[self.rng.gen_range(0..WEIGHTED_RANKS.len())]
    }
}

/// Source chosen at the request boundary.
pub enum DrawSource {
    Scripted(CycleSource),
    Weighted(WeightedSource),
}

impl DrawSource {
    /// Scripted draws take precedence over a seed; with neither the weighted
    /// source is seeded from entropy.
    pub fn build(draws: Option<Vec<u8>>, seed: Option<u64>) -> Result<Self, TableError> {
        match (draws, seed) {
            (Some(draws), _) => Ok(DrawSource::Scripted(CycleSource::new(draws)?)),
            (None, Some(seed)) => Ok(DrawSource::Weighted(WeightedSource::seeded(seed))),
            (None, None) => Ok(DrawSource::Weighted(WeightedSource::from_entropy())),
        }
    }
}

impl CardSource for DrawSource {
    fn next_rank(&mut self) -> u8 {
        match self {
            DrawSource::Scripted(source) => source.next_rank(),
            DrawSource::Weighted(source) => source.next_rank(),
        }
    }
}
