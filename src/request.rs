use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    dealer::{play_dealer_with_rules, DealerRules},
    error::TableError,
    hand::{is_blackjack, score, Score},
    outcome::{compare, Outcome},
    round::{play_round, RoundResult},
    source::DrawSource,
};

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub hand: Vec<u8>,
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub player_hand: Vec<u8>,
    pub dealer_hand: Vec<u8>,
}

#[derive(Debug, Deserialize)]
pub struct DealerRequest {
    pub up_card: u8,
    #[serde(default)]
    pub draws: Option<Vec<u8>>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub rules: DealerRules,
}

#[derive(Debug, Deserialize)]
pub struct RoundRequest {
    pub player_hand: Vec<u8>,
    pub dealer_up_card: u8,
    #[serde(default)]
    pub draws: Option<Vec<u8>>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub rules: DealerRules,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub totals: Vec<u32>,
    pub best: u32,
    pub soft: bool,
    pub bust: bool,
    pub blackjack: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub outcome: Outcome,
    pub multiplier: f64,
    pub player_score: Score,
    pub dealer_score: Score,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerReport {
    pub cards: Vec<u8>,
    pub score: Score,
}

/// Decodes any request type from a JSON document.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, TableError> {
    Ok(serde_json::from_str(json)?)
}

pub fn validate_rank(rank: u8) -> Result<(), TableError> {
    if (1..=10).contains(&rank) {
        Ok(())
    } else {
        Err(TableError::InvalidRank { rank })
    }
}

pub fn validate_hand(hand: &[u8]) -> Result<(), TableError> {
    if hand.is_empty() {
        return Err(TableError::EmptyHand);
    }
    hand.iter().try_for_each(|&rank| validate_rank(rank))
}

fn validate_draws(draws: Option<&Vec<u8>>) -> Result<(), TableError> {
    match draws {
        Some(draws) if draws.is_empty() => Err(TableError::EmptyDraws),
        Some(draws) => draws.iter().try_for_each(|&rank| validate_rank(rank)),
        None => Ok(()),
    }
}

pub fn handle_score(request: ScoreRequest) -> Result<ScoreReport, TableError> {
    validate_hand(&request.hand)?;
    let result = score(&request.hand);
    Ok(ScoreReport {
        totals: result.totals(),
        best: result.best(),
        soft: result.is_soft(),
        bust: result.is_bust(),
        blackjack: is_blackjack(&request.hand),
    })
}

pub fn handle_compare(request: CompareRequest) -> Result<ComparisonReport, TableError> {
    validate_hand(&request.player_hand)?;
    validate_hand(&request.dealer_hand)?;
    let outcome = compare(&request.player_hand, &request.dealer_hand);
    Ok(ComparisonReport {
        outcome,
        multiplier: outcome.multiplier(),
        player_score: score(&request.player_hand),
        dealer_score: score(&request.dealer_hand),
    })
}

pub fn handle_dealer(request: DealerRequest) -> Result<DealerReport, TableError> {
    validate_rank(request.up_card)?;
    validate_draws(request.draws.as_ref())?;
    request.rules.validate()?;
    let mut source = DrawSource::build(request.draws, request.seed)?;
    let cards = play_dealer_with_rules(request.up_card, &mut source, &request.rules);
    Ok(DealerReport {
        score: score(&cards),
        cards,
    })
}

pub fn handle_round(request: RoundRequest) -> Result<RoundResult, TableError> {
    validate_hand(&request.player_hand)?;
    validate_rank(request.dealer_up_card)?;
    validate_draws(request.draws.as_ref())?;
    request.rules.validate()?;
    let mut source = DrawSource::build(request.draws, request.seed)?;
    Ok(play_round(
        &request.player_hand,
        request.dealer_up_card,
        &mut source,
        &request.rules,
    ))
}
