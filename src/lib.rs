use js_sys::Function;
use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::prelude::*;

pub mod dealer;
pub mod error;
pub mod hand;
pub mod outcome;
pub mod request;
pub mod round;
pub mod sim;
pub mod source;

pub use dealer::{play_dealer, DealerRules};
pub use error::TableError;
pub use hand::{is_blackjack, score, Score};
pub use outcome::{compare, score_against, Outcome};
pub use source::{CardSource, CycleSource, WeightedSource};

fn decode<T: DeserializeOwned>(params: &JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(params.clone()).map_err(|err| fail("Invalid input", err))
}

fn encode<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| fail("Serialization failed", err))
}

fn fail(context: &str, err: impl std::fmt::Display) -> JsValue {
    let message = JsValue::from_str(&format!("{context}: {err}"));
    web_sys::console::error_1(&message);
    message
}

#[wasm_bindgen]
pub fn score_hand(params: &JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: request::ScoreRequest = decode(params)?;
    let report = request::handle_score(input).map_err(|err| fail("Scoring failed", err))?;
    encode(&report)
}

#[wasm_bindgen]
pub fn compare_hands(params: &JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: request::CompareRequest = decode(params)?;
    let report = request::handle_compare(input).map_err(|err| fail("Comparison failed", err))?;
    encode(&report)
}

#[wasm_bindgen]
pub fn play_dealer_hand(params: &JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: request::DealerRequest = decode(params)?;
    let report = request::handle_dealer(input).map_err(|err| fail("Dealer play failed", err))?;
    encode(&report)
}

#[wasm_bindgen]
pub fn play_single_round(params: &JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: request::RoundRequest = decode(params)?;
    let result = request::handle_round(input).map_err(|err| fail("Round failed", err))?;
    encode(&result)
}

#[wasm_bindgen]
pub fn run_dealer_simulation(params: &JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: sim::SimulationInput = decode(params)?;
    let result = sim::run(input).map_err(|err| fail("Simulation failed", err))?;
    encode(&result)
}

#[wasm_bindgen]
pub fn run_dealer_simulation_with_progress(
    params: &JsValue,
    progress_callback: &Function,
) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: sim::SimulationInput = decode(params)?;

    let progress_cb = |current: u32, total: u32| {
        let _ = progress_callback.call2(
            &JsValue::NULL,
            &JsValue::from(current),
            &JsValue::from(total),
        );
    };

    let result =
        sim::run_with_progress(input, progress_cb).map_err(|err| fail("Simulation failed", err))?;
    encode(&result)
}
