// Integration tests (native) for the `word-dash` crate.
// These tests avoid wasm-specific functionality and exercise the pure
// simulation so they can run under `cargo test` on the host.

use word_dash::runner::world::{
    COIN_SCORE, COIN_SIZE, FIELD_W, GROUND_Y, HAZARD_SIZE, HAZARD_Y, Lcg, Obstacle, ObstacleKind,
    PLAYER_H, Phase, SPAWN_INTERVAL, StepEvent, World,
};

// Basic dataset sanity check: ensure the vocabulary deck is non-empty.
#[test]
fn words_dataset_nonempty() {
    assert!(!word_dash::WORDS.is_empty());
}

// A coin released at the right edge at jump height drifts into the grounded
// player, scores and reveals the first vocabulary entry.
#[test]
fn pushed_coin_is_collected_and_reveals_the_first_word() {
    let mut world = World::new(42);
    world.obstacles.push(Obstacle {
        x: FIELD_W,
        y: GROUND_Y - PLAYER_H,
        w: COIN_SIZE,
        h: COIN_SIZE,
        kind: ObstacleKind::Coin,
    });

    let mut pickup = None;
    for _ in 0..400 {
        if let Some(event) = world.step().into_iter().next() {
            pickup = Some(event);
            break;
        }
    }

    assert_eq!(
        pickup,
        Some(StepEvent::CoinCollected {
            score: COIN_SCORE,
            word: Some(word_dash::WORDS[0]),
        })
    );
    assert_eq!(world.score, COIN_SCORE);
    assert_eq!(world.words.revealed(), 1);
    assert_eq!(world.phase, Phase::Running);
}

// Collecting one coin per frame walks the whole deck in order; the pickup after
// the last word still scores but reveals nothing.
#[test]
fn the_deck_exhausts_after_every_word_is_revealed() {
    let mut world = World::new(77);
    world.player.y = GROUND_Y - PLAYER_H;
    world.player.grounded = true;

    let mut revealed = Vec::new();
    for _ in 0..word_dash::WORDS.len() + 1 {
        world.obstacles.push(Obstacle {
            x: world.player.x,
            y: world.player.y,
            w: COIN_SIZE,
            h: COIN_SIZE,
            kind: ObstacleKind::Coin,
        });
        for event in world.step() {
            if let StepEvent::CoinCollected { word, .. } = event {
                revealed.push(word);
            }
        }
    }

    assert_eq!(revealed.len(), word_dash::WORDS.len() + 1);
    for (entry, expected) in revealed.iter().zip(word_dash::WORDS) {
        assert_eq!(*entry, Some(*expected));
    }
    assert_eq!(revealed.last(), Some(&None));
    assert_eq!(
        world.score,
        COIN_SCORE * (word_dash::WORDS.len() as i64 + 1)
    );
}

// A hazard ends the run; a reset brings back a live world whose spawner ticks.
#[test]
fn reset_revives_a_finished_run() {
    let mut world = World::new(9);
    world.obstacles.push(Obstacle {
        x: FIELD_W,
        y: HAZARD_Y,
        w: HAZARD_SIZE,
        h: HAZARD_SIZE,
        kind: ObstacleKind::Spike,
    });

    let mut died = false;
    for _ in 0..400 {
        if world.step().contains(&StepEvent::HazardHit { score: 0 }) {
            died = true;
            break;
        }
    }
    assert!(died);
    assert_eq!(world.phase, Phase::GameOver);

    world.reset();
    assert_eq!(world.phase, Phase::Running);
    for _ in 0..=SPAWN_INTERVAL {
        world.step();
    }
    assert!(!world.obstacles.is_empty());
}

// Two worlds with the same seed and the same scripted inputs replay the same
// run event for event.
#[test]
fn identical_seeds_replay_identical_runs() {
    let mut a = World::new(1234);
    let mut b = World::new(1234);
    let mut events_a = Vec::new();
    let mut events_b = Vec::new();

    for frame in 0..3_000 {
        if frame % 47 == 0 {
            a.jump();
            b.jump();
        }
        events_a.extend(a.step());
        events_b.extend(b.step());
    }

    assert!(!events_a.is_empty());
    assert_eq!(events_a, events_b);
    assert_eq!(a.score, b.score);
    assert_eq!(a.phase, b.phase);
    assert_eq!(a.obstacles.len(), b.obstacles.len());
}

// Long-run spawn kinds should approach the 30% enemy / 30% spike / 40% coin
// split the roll thresholds encode.
#[test]
fn spawn_rolls_follow_the_30_30_40_split() {
    const ROLLS: usize = 60_000;
    let mut rng = Lcg::new(42);
    let mut counts = [0usize; 3];
    for _ in 0..ROLLS {
        match ObstacleKind::roll(&mut rng) {
            ObstacleKind::Enemy => counts[0] += 1,
            ObstacleKind::Spike => counts[1] += 1,
            ObstacleKind::Coin => counts[2] += 1,
        }
    }

    let share = |n: usize| n as f64 / ROLLS as f64;
    assert!(
        (share(counts[0]) - 0.3).abs() < 0.02,
        "enemy share {} too far from 0.3",
        share(counts[0])
    );
    assert!(
        (share(counts[1]) - 0.3).abs() < 0.02,
        "spike share {} too far from 0.3",
        share(counts[1])
    );
    assert!(
        (share(counts[2]) - 0.4).abs() < 0.02,
        "coin share {} too far from 0.4",
        share(counts[2])
    );
}
