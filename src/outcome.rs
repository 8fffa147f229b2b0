use serde::Serialize;

use crate::hand::{is_blackjack, score, BLACKJACK};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Lose,
    Push,
    Win,
    Blackjack,
}

impl Outcome {
    /// Share of the stake returned to the player.
    pub fn multiplier(&self) -> f64 {
        match self {
            Outcome::Lose => 0.0,
            Outcome::Push => 1.0,
            Outcome::Win => 2.0,
            Outcome::Blackjack => 2.5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Lose => "lose",
            Outcome::Push => "push",
            Outcome::Win => "win",
            Outcome::Blackjack => "blackjack",
        }
    }
}

/// Settles a finished player hand against a finished dealer hand.
///
/// Blackjacks are checked before totals, and a busted player loses even when
/// the dealer busts too. Totals are compared on `Score::best`.
pub fn compare(player: &[u8], dealer: &[u8]) -> Outcome {
    let dealer_blackjack = is_blackjack(dealer);
    if is_blackjack(player) {
        return if dealer_blackjack {
            Outcome::Push
        } else {
            Outcome::Blackjack
        };
    }
    if dealer_blackjack {
        return Outcome::Lose;
    }

    let player_total = score(player).best();
    let dealer_total = score(dealer).best();
    if player_total > BLACKJACK {
        Outcome::Lose
    } else if dealer_total > BLACKJACK || player_total > dealer_total {
        Outcome::Win
    } else if player_total < dealer_total {
        Outcome::Lose
    } else {
        Outcome::Push
    }
}

pub fn score_against(player: &[u8], dealer: &[u8]) -> f64 {
    compare(player, dealer).multiplier()
}
