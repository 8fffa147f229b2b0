use serde::Serialize;

pub const ACE: u8 = 1;
pub const TEN: u8 = 10;
pub const BLACKJACK: u32 = 21;

// Counting one ace as 11 instead of 1.
const ACE_BONUS: u32 = 10;

/// One or two valid totals for a hand.
///
/// `Dual` is only produced when the hard total (one ace counted as 11) does
/// not bust, so both of its totals are at most 21. `Single` may exceed 21.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Score {
    Single { total: u32 },
    Dual { hard: u32, soft: u32 },
}

impl Score {
    /// The total used for comparison and for the dealer's stand decision.
    pub fn best(&self) -> u32 {
        match *self {
            Score::Single { total } => total,
            Score::Dual { hard, .. } => hard,
        }
    }

    pub fn lowest(&self) -> u32 {
        match *self {
            Score::Single { total } => total,
            Score::Dual { soft, .. } => soft,
        }
    }

    pub fn totals(&self) -> Vec<u32> {
        match *self {
            Score::Single { total } => vec![total],
            Score::Dual { hard, soft } => vec![hard, soft],
        }
    }

    pub fn is_soft(&self) -> bool {
        matches!(self, Score::Dual { .. })
    }

    pub fn is_bust(&self) -> bool {
        self.best() > BLACKJACK
    }
}

pub fn score(hand: &[u8]) -> Score {
    let soft: u32 = hand.iter().map(|&rank| u32::from(rank)).sum();
    if hand.contains(&ACE) {
        let hard = soft + ACE_BONUS;
        if hard <= BLACKJACK {
            return Score::Dual { hard, soft };
        }
    }
    Score::Single { total: soft }
}

pub fn is_blackjack(hand: &[u8]) -> bool {
    matches!(hand, [ACE, TEN] | [TEN, ACE])
}
