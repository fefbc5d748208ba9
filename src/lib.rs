//! Word Dash core crate.
//!
//! Side-scrolling jump game for English vocabulary practice. All gameplay
//! rules live in [`runner::world`] as a plain state machine with no browser
//! types, so they are testable on the host; [`runner`] is the thin wasm shell
//! that drives the simulation at a fixed rate and paints it onto a canvas.

use wasm_bindgen::prelude::*;

pub mod runner;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Vocabulary dataset (English word, Korean meaning)
// Revealed strictly in order, one entry per collected coin.
// -----------------------------------------------------------------------------

pub const WORDS: &[(&str, &str)] = &[
    ("display", "전시하다"), ("stray", "길을 잃다"), ("railway", "철도"),
    ("relay", "중계하다"), ("bail", "보석금을 내다"), ("wailing", "울부짖는"),
    ("frail", "약한"), ("fainting", "기절하는"), ("claimed", "주장한"),
    ("remain", "남다"), ("pale", "창백한"), ("parade", "행진"),
    ("mistake", "실수"), ("ache", "아프다"), ("nickname", "별명"),
    ("break", "부서지다"), ("steak", "스테이크"), ("eighteen", "열여덟"),
    ("obeyed", "복종한"),
];

/// Shown in the word panel once every entry of [`WORDS`] has been revealed.
pub const ALL_WORDS_LEARNED: &str = "모든 단어를 학습하였습니다!";

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    runner::start_runner_mode()
}
