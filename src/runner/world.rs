//! Pure runner simulation: player physics, obstacle spawning, collision
//! outcomes and the vocabulary cursor. Nothing in this module touches the
//! browser, so the whole state machine runs under plain `cargo test` on the
//! host; the wasm shell in the parent module only drives `World::step` and
//! paints the result.

// --- Field geometry / tuning ------------------------------------------------

pub const FIELD_W: f64 = 800.0;
pub const FIELD_H: f64 = 400.0;
/// Height of the ground band painted along the bottom of the field.
pub const GROUND_BAND_H: f64 = 50.0;
/// Y of the ground line bodies rest on.
pub const GROUND_Y: f64 = FIELD_H - GROUND_BAND_H;

pub const PLAYER_X: f64 = 50.0;
pub const PLAYER_START_Y: f64 = 300.0;
pub const PLAYER_W: f64 = 30.0;
pub const PLAYER_H: f64 = 30.0;

pub const GRAVITY: f64 = 0.5;
pub const JUMP_FORCE: f64 = 15.0;
/// Leftward obstacle speed, identical for every kind.
pub const WORLD_SPEED: f64 = 2.0;
/// The spawner fires once the per-run frame counter exceeds this value.
pub const SPAWN_INTERVAL: u32 = 100;
pub const COIN_SCORE: i64 = 10;

pub const HAZARD_SIZE: f64 = 30.0;
pub const COIN_SIZE: f64 = 20.0;
/// Hazards sit on the ground; their top edge is fixed.
pub const HAZARD_Y: f64 = FIELD_H - 80.0;
/// Coins appear in a vertical band the player can reach with one jump.
pub const COIN_BAND_MIN_Y: f64 = 100.0;
pub const COIN_BAND_SPAN: f64 = FIELD_H - 200.0;

/// Simulated frames per second. All tuning above is per-frame, so the step
/// rate is pinned rather than tied to the display refresh.
pub const STEP_HZ: f64 = 60.0;
/// Upper bound on frames replayed after a long gap between animation callbacks
/// (backgrounded tab); anything older is dropped when the clock resyncs.
pub const MAX_FRAME_CATCHUP: i64 = 30;

// --- Geometry ----------------------------------------------------------------

/// Axis-aligned rectangle in field coordinates.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Strict four-inequality overlap test: rectangles sharing only an edge do
    /// not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

// --- Deterministic randomness -------------------------------------------------

/// Small seedable LCG with an xorshifted output. Not crypto secure; enough to
/// drive spawn rolls reproducibly in tests while the shell seeds it from
/// `performance.now()`.
#[derive(Clone, Debug)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.state >> 33) ^ self.state) as u32
    }

    /// Uniform draw in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }
}

// --- Fixed-step clock ---------------------------------------------------------

/// FrameClock converts wall-clock timestamps into whole simulation frames at a
/// fixed rate, so the run advances identically regardless of display refresh.
#[derive(Clone, Debug)]
pub struct FrameClock {
    step_ms: f64,       // duration of one simulated frame
    start_ms: f64,      // timestamp the clock was anchored at
    last_frame_idx: i64, // index of last consumed whole frame
}

impl FrameClock {
    pub fn new(hz: f64, now: f64) -> Self {
        Self {
            step_ms: 1000.0 / hz,
            start_ms: now,
            last_frame_idx: 0,
        }
    }

    pub fn frame_len_ms(&self) -> f64 {
        self.step_ms
    }

    pub fn current_frame(&self, now: f64) -> f64 {
        (now - self.start_ms) / self.step_ms
    }

    /// Number of whole frames elapsed since the previous call, capped at
    /// [`MAX_FRAME_CATCHUP`]. Frames beyond the cap are dropped, not deferred.
    pub fn pending(&mut self, now: f64) -> u32 {
        let whole = self.current_frame(now).floor() as i64;
        if whole <= self.last_frame_idx {
            return 0;
        }
        let lag = whole - self.last_frame_idx;
        self.last_frame_idx = whole;
        lag.min(MAX_FRAME_CATCHUP) as u32
    }
}

// --- Player -------------------------------------------------------------------

/// Vertical physics body. `x` stays fixed; gravity and the jump impulse only
/// move `y`.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub dy: f64,
    pub grounded: bool,
}

impl Player {
    pub fn new() -> Self {
        Self {
            x: PLAYER_X,
            y: PLAYER_START_Y,
            dy: 0.0,
            grounded: false,
        }
    }

    /// Jump impulse; a no-op while airborne.
    pub fn jump(&mut self) {
        if self.grounded {
            self.dy = -JUMP_FORCE;
            self.grounded = false;
        }
    }

    /// One frame of gravity integration with the ground clamp.
    pub fn update(&mut self) {
        self.dy += GRAVITY;
        self.y += self.dy;
        if self.y + PLAYER_H >= GROUND_Y {
            self.y = GROUND_Y - PLAYER_H;
            self.dy = 0.0;
            self.grounded = true;
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_W, PLAYER_H)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

// --- Obstacles ----------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObstacleKind {
    Enemy,
    Spike,
    Coin,
}

impl ObstacleKind {
    /// Map a uniform roll in `[0, 1)` onto the 30/30/40 variant split.
    pub fn from_roll(r: f64) -> Self {
        if r < 0.3 {
            ObstacleKind::Enemy
        } else if r < 0.6 {
            ObstacleKind::Spike
        } else {
            ObstacleKind::Coin
        }
    }

    pub fn roll(rng: &mut Lcg) -> Self {
        Self::from_roll(rng.next_f64())
    }

    pub fn size(self) -> (f64, f64) {
        match self {
            ObstacleKind::Coin => (COIN_SIZE, COIN_SIZE),
            ObstacleKind::Enemy | ObstacleKind::Spike => (HAZARD_SIZE, HAZARD_SIZE),
        }
    }

    pub fn is_hazard(self) -> bool {
        !matches!(self, ObstacleKind::Coin)
    }
}

#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub kind: ObstacleKind,
}

impl Obstacle {
    /// New obstacle at the right field edge: coins at a random height inside
    /// the reachable band, hazards on the ground.
    pub fn spawn(kind: ObstacleKind, rng: &mut Lcg) -> Self {
        let (w, h) = kind.size();
        let y = match kind {
            ObstacleKind::Coin => COIN_BAND_MIN_Y + rng.next_f64() * COIN_BAND_SPAN,
            ObstacleKind::Enemy | ObstacleKind::Spike => HAZARD_Y,
        };
        Self {
            x: FIELD_W,
            y,
            w,
            h,
            kind,
        }
    }

    pub fn advance(&mut self) {
        self.x -= WORLD_SPEED;
    }

    /// True once the right edge has left the visible field.
    pub fn off_screen(&self) -> bool {
        self.x + self.w < 0.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

// --- Vocabulary cursor --------------------------------------------------------

/// Sequential reveal over a fixed word/meaning deck. The cursor only moves
/// forward; `reset` is the single way back to the start.
#[derive(Clone, Debug)]
pub struct WordCursor {
    deck: &'static [(&'static str, &'static str)],
    next: usize,
}

impl WordCursor {
    pub fn new(deck: &'static [(&'static str, &'static str)]) -> Self {
        Self { deck, next: 0 }
    }

    /// Reveal the next entry, or `None` once every word has been shown.
    pub fn advance(&mut self) -> Option<(&'static str, &'static str)> {
        let entry = self.deck.get(self.next).copied();
        if entry.is_some() {
            self.next += 1;
        }
        entry
    }

    /// How many entries have been revealed so far.
    pub fn revealed(&self) -> usize {
        self.next
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }
}

// --- Run state ----------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Running,
    GameOver,
}

/// Observable outcome of one simulation frame, consumed by the host shell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepEvent {
    /// A coin was picked up. Carries the new score and the vocabulary entry
    /// revealed by this pickup (`None` once the deck is exhausted).
    CoinCollected {
        score: i64,
        word: Option<(&'static str, &'static str)>,
    },
    /// Enemy or spike contact ended the run with the given final score.
    HazardHit { score: i64 },
}

/// Complete game state. One value owns everything a run mutates; update
/// functions take it explicitly and report what happened through
/// [`StepEvent`]s instead of touching any global.
#[derive(Clone, Debug)]
pub struct World {
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub score: i64,
    pub phase: Phase,
    pub words: WordCursor,
    spawn_timer: u32,
    rng: Lcg,
}

impl World {
    /// World over the built-in vocabulary deck.
    pub fn new(seed: u64) -> Self {
        Self::with_deck(seed, crate::WORDS)
    }

    pub fn with_deck(seed: u64, deck: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            player: Player::new(),
            obstacles: Vec::new(),
            score: 0,
            phase: Phase::Running,
            words: WordCursor::new(deck),
            spawn_timer: 0,
            rng: Lcg::new(seed),
        }
    }

    /// Jump input. Ignored after game over; the player decides when to restart.
    pub fn jump(&mut self) {
        if self.phase == Phase::Running {
            self.player.jump();
        }
    }

    /// Advance the simulation by one fixed frame: integrate the player, tick
    /// the spawner, then advance / collide / prune every live obstacle in
    /// spawn order. The first hazard overlap terminates the frame.
    pub fn step(&mut self) -> Vec<StepEvent> {
        let mut events = Vec::new();
        if self.phase == Phase::GameOver {
            return events;
        }

        self.player.update();

        self.spawn_timer += 1;
        if self.spawn_timer > SPAWN_INTERVAL {
            let kind = ObstacleKind::roll(&mut self.rng);
            self.obstacles.push(Obstacle::spawn(kind, &mut self.rng));
            self.spawn_timer = 0;
        }

        let player_rect = self.player.rect();
        let mut i = 0;
        while i < self.obstacles.len() {
            self.obstacles[i].advance();

            if player_rect.overlaps(&self.obstacles[i].rect()) {
                match self.obstacles[i].kind {
                    ObstacleKind::Coin => {
                        self.score += COIN_SCORE;
                        let word = self.words.advance();
                        events.push(StepEvent::CoinCollected {
                            score: self.score,
                            word,
                        });
                        self.obstacles.remove(i);
                        continue;
                    }
                    ObstacleKind::Enemy | ObstacleKind::Spike => {
                        self.phase = Phase::GameOver;
                        events.push(StepEvent::HazardHit { score: self.score });
                        return events;
                    }
                }
            }

            if self.obstacles[i].off_screen() {
                self.obstacles.remove(i);
                continue;
            }
            i += 1;
        }

        events
    }

    /// Full restart: initial player, empty obstacle set, zero score, vocabulary
    /// cursor back to the first word. The RNG keeps its stream so consecutive
    /// runs see different spawns.
    pub fn reset(&mut self) {
        self.player = Player::new();
        self.obstacles.clear();
        self.score = 0;
        self.spawn_timer = 0;
        self.words.reset();
        self.phase = Phase::Running;
    }
}
