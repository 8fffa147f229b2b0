use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("card rank {rank} is outside 1..=10")]
    InvalidRank { rank: u8 },

    #[error("hand must contain at least one card")]
    EmptyHand,

    #[error("scripted draws must contain at least one card")]
    EmptyDraws,

    #[error("dealer must stand on a total between 1 and 21, got {0}")]
    InvalidStandThreshold(u32),

    #[error("Invalid input: {0}")]
    Json(#[from] serde_json::Error),
}
