//! Wasm shell for the runner mode: DOM bootstrap, a fixed-rate frame loop on
//! top of `requestAnimationFrame`, keyboard input and canvas rendering. All
//! gameplay rules live in [`world`]; this module owns the loop, feeds the
//! simulation whole frames and paints whatever state comes back. The animation
//! callback keeps rescheduling itself after a run ends, so the game-over screen
//! stays live and Space can start the next run.
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, window};

pub mod world;

use world::{
    FIELD_H, FIELD_W, FrameClock, GROUND_BAND_H, GROUND_Y, Obstacle, ObstacleKind, Phase,
    STEP_HZ, StepEvent, World,
};

/// Runtime shell state: the simulation plus the surfaces it is painted onto.
struct RunnerState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    clock: FrameClock,
    world: World,
}

#[wasm_bindgen]
pub fn start_runner_mode() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Create / reuse the field canvas
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("wd-runner-canvas") {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id("wd-runner-canvas");
        c.set_width(FIELD_W as u32);
        c.set_height(FIELD_H as u32);
        c.set_attribute(
            "style",
            "display:block; margin:24px auto 0; border:2px solid #222; border-radius:8px; background:#f0f8ff;",
        )
        .ok();
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&c)?;
        c
    };
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    ensure_word_panel(&doc)?;

    let now = win.performance().map(|p| p.now()).unwrap_or(0.0);
    let state = RunnerState {
        canvas,
        ctx,
        clock: FrameClock::new(STEP_HZ, now),
        world: World::new(now.to_bits()),
    };
    RUNNER_STATE.with(|cell| cell.replace(Some(state)));

    // Keyboard listener: Space jumps while running and restarts after game over
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if evt.code() != "Space" {
                return;
            }
            RUNNER_STATE.with(|state_cell| {
                if let Some(state) = state_cell.borrow_mut().as_mut() {
                    match state.world.phase {
                        Phase::Running => state.world.jump(),
                        Phase::GameOver => {
                            state.world.reset();
                            // Re-anchor the clock so the pause on the game-over
                            // screen is not replayed as missed frames.
                            let now_ts = window()
                                .and_then(|w| w.performance())
                                .map(|p| p.now())
                                .unwrap_or(0.0);
                            state.clock = FrameClock::new(STEP_HZ, now_ts);
                            if let Some(doc) = window().and_then(|w| w.document()) {
                                if let Some(el) = doc.get_element_by_id("wd-word") {
                                    el.set_text_content(Some(""));
                                }
                            }
                        }
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    start_runner_loop();
    Ok(())
}

/// Text panel under the canvas where collected vocabulary is shown.
fn ensure_word_panel(doc: &Document) -> Result<(), JsValue> {
    if doc.get_element_by_id("wd-word").is_none() {
        if let Some(body) = doc.body() {
            let div = doc.create_element("div")?;
            div.set_id("wd-word");
            div.set_text_content(Some(""));
            div.set_attribute(
                "style",
                "margin:12px auto 0; width:800px; min-height:32px; font-family:sans-serif; font-size:24px; text-align:center; color:#222;",
            )
            .ok();
            body.append_child(&div)?;
        }
    }
    Ok(())
}

thread_local! {
    static RUNNER_STATE: std::cell::RefCell<Option<RunnerState>> = std::cell::RefCell::new(None);
}

type FrameCallback = std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_runner_loop() {
    let f: FrameCallback = std::rc::Rc::new(std::cell::RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        RUNNER_STATE.with(|state_cell| {
            if let Some(state) = state_cell.borrow_mut().as_mut() {
                runner_tick(state, ts);
            }
        });
        if let Some(w) = window() {
            let _ =
                w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

// --- Tick & Rendering ---------------------------------------------------------

/// Consume whole simulation frames owed since the last animation callback,
/// surface pickup events to the word panel, then repaint. Stepping past game
/// over is harmless; the world reports it inert until the player restarts.
fn runner_tick(state: &mut RunnerState, now: f64) {
    for _ in 0..state.clock.pending(now) {
        for event in state.world.step() {
            if let StepEvent::CoinCollected { word, .. } = event {
                show_word(word);
            }
        }
    }
    render(state);
}

/// Update the vocabulary panel after a pickup: the revealed entry, or the
/// completion message once every word has been shown.
fn show_word(entry: Option<(&'static str, &'static str)>) {
    if let Some(doc) = window().and_then(|w| w.document()) {
        if let Some(el) = doc.get_element_by_id("wd-word") {
            match entry {
                Some((word, meaning)) => {
                    el.set_inner_html(&format!("<strong>{word}</strong> - {meaning}"));
                }
                None => {
                    el.set_text_content(Some(crate::ALL_WORDS_LEARNED));
                }
            }
        }
    }
}

fn render(state: &RunnerState) {
    let ctx = &state.ctx;
    let w = state.canvas.width() as f64;
    let h = state.canvas.height() as f64;
    ctx.clear_rect(0.0, 0.0, w, h);

    // Ground band
    ctx.set_fill_style_str("brown");
    ctx.fill_rect(0.0, GROUND_Y, w, GROUND_BAND_H);

    // Player
    let p = state.world.player.rect();
    ctx.set_fill_style_str("green");
    ctx.fill_rect(p.x, p.y, p.w, p.h);

    for obs in &state.world.obstacles {
        draw_obstacle(ctx, obs);
    }

    // Score counter, top-left
    ctx.set_fill_style_str("black");
    ctx.set_font("20px Arial");
    ctx.set_text_align("left");
    ctx.fill_text(&format!("점수: {}", state.world.score), 10.0, 30.0)
        .ok();

    if state.world.phase == Phase::GameOver {
        render_game_over(ctx, w, h, state.world.score);
    }
}

fn draw_obstacle(ctx: &CanvasRenderingContext2d, obs: &Obstacle) {
    match obs.kind {
        ObstacleKind::Enemy => {
            ctx.set_fill_style_str("red");
            ctx.fill_rect(obs.x, obs.y, obs.w, obs.h);
        }
        ObstacleKind::Spike => {
            ctx.set_fill_style_str("gray");
            ctx.begin_path();
            ctx.move_to(obs.x, obs.y + obs.h);
            ctx.line_to(obs.x + obs.w / 2.0, obs.y);
            ctx.line_to(obs.x + obs.w, obs.y + obs.h);
            ctx.close_path();
            ctx.fill();
        }
        ObstacleKind::Coin => {
            ctx.set_fill_style_str("gold");
            ctx.begin_path();
            ctx.arc(
                obs.x + obs.w / 2.0,
                obs.y + obs.h / 2.0,
                obs.w / 2.0,
                0.0,
                std::f64::consts::TAU,
            )
            .ok();
            ctx.fill();
        }
    }
}

/// Dim the field and report the final score with a restart hint.
fn render_game_over(ctx: &CanvasRenderingContext2d, w: f64, h: f64, score: i64) {
    ctx.set_fill_style_str("rgba(0,0,0,0.55)");
    ctx.fill_rect(0.0, 0.0, w, h);
    ctx.set_fill_style_str("#ffffff");
    ctx.set_font("48px Arial");
    ctx.set_text_align("center");
    ctx.fill_text(&format!("게임 오버! 점수: {score}"), w / 2.0, h / 2.0)
        .ok();
    ctx.set_font("20px Arial");
    ctx.fill_text("스페이스 키를 눌러 다시 시작", w / 2.0, h / 2.0 + 44.0)
        .ok();
}
