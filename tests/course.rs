//! Whole-level runs through the public API

use glam::IVec2;
use proptest::prelude::*;

use pixel_platformer::Settings;
use pixel_platformer::sim::{
    AnimState, Assets, Collidable, Level, LevelLayout, ObjectSpec, TickInput, tick,
};

fn stock_level() -> Level {
    let settings = Settings::default();
    let assets = Assets::placeholder(settings.block_size).unwrap();
    Level::stock(settings, &assets).unwrap()
}

/// Floor from x = 0 to 1056, walls four blocks high at either end and a
/// floating platform in the middle
fn walled_level() -> Level {
    let settings = Settings::default();
    let assets = Assets::placeholder(settings.block_size).unwrap();
    let mut objects: Vec<ObjectSpec> = (0..11)
        .map(|i| ObjectSpec::Block { x: i * 96, y: 704 })
        .collect();
    for row in 1..=4 {
        objects.push(ObjectSpec::Block { x: 0, y: 704 - row * 96 });
        objects.push(ObjectSpec::Block { x: 960, y: 704 - row * 96 });
    }
    objects.push(ObjectSpec::Block { x: 480, y: 500 });
    let layout = LevelLayout {
        spawn: IVec2::new(300, 640),
        objects,
    };
    Level::new(settings, &layout, &assets).unwrap()
}

#[test]
fn test_stock_course_lands_on_fire() {
    let mut level = stock_level();
    let mut first_hit = None;
    for t in 0..200 {
        tick(&mut level, &TickInput::default());
        if level.player.is_hit() {
            first_hit = Some(t);
            break;
        }
    }
    assert!(first_hit.is_some(), "never touched the fire");
    assert!(level.last_contacts.hazard_hit);
    // Standing on the flame, one tile above the floor
    assert_eq!(level.player.rect().bottom(), 640);
    assert_eq!(level.player.jump_count(), 0);

    // The animation catches up on the next update
    tick(&mut level, &TickInput::default());
    assert_eq!(level.player.state(), AnimState::Hit);
    assert_eq!(level.player.rect().bottom(), 640);
}

#[test]
fn test_hit_wears_off_away_from_fire() {
    let mut level = stock_level();
    let right = TickInput {
        move_right: true,
        ..Default::default()
    };
    // Fall onto the fire, then walk off it
    for _ in 0..100 {
        tick(&mut level, &TickInput::default());
    }
    assert!(level.player.is_hit());
    for _ in 0..60 {
        tick(&mut level, &right);
    }
    assert_eq!(level.player.rect().bottom(), 704);

    // Two seconds at 60 fps, plus a tick for the strict comparison
    for _ in 0..125 {
        tick(&mut level, &TickInput::default());
    }
    assert!(!level.player.is_hit());
    assert_ne!(level.player.state(), AnimState::Hit);
}

#[test]
fn test_camera_follows_long_run() {
    let mut level = stock_level();
    let right = TickInput {
        move_right: true,
        ..Default::default()
    };
    for _ in 0..250 {
        tick(&mut level, &right);
    }
    let rect = level.player.rect();
    assert!(rect.x > 1000, "player only reached {}", rect.x);
    assert!(level.camera.offset_x > 0);
    // The camera only moves while the player is pushing into the deadzone
    let screen_right = rect.right() - level.camera.offset_x;
    assert!(screen_right >= 800 - level.settings.player_vel, "screen right {screen_right}");
}

#[test]
fn test_layout_from_json() {
    let json = r#"{
        "spawn": [40, 0],
        "objects": [
            { "type": "block", "x": 0, "y": 200 },
            { "type": "fire", "x": 300, "y": 136, "on": false }
        ]
    }"#;
    let layout: LevelLayout = serde_json::from_str(json).unwrap();
    let settings = Settings::default();
    let assets = Assets::placeholder(settings.block_size).unwrap();
    let mut level = Level::new(settings, &layout, &assets).unwrap();
    assert_eq!(level.hazards().count(), 1);

    for _ in 0..120 {
        tick(&mut level, &TickInput::default());
    }
    // Landed on the block (top at 200); the unlit fire is far away
    assert_eq!(level.player.rect().bottom(), 200);
    assert!(!level.player.is_hit());
}

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), prop::bool::weighted(0.1)).prop_map(
        |(move_left, move_right, jump)| TickInput {
            move_left,
            move_right,
            jump,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_walled_course_contains_player(
        inputs in prop::collection::vec(input_strategy(), 1..400)
    ) {
        let mut level = walled_level();
        for input in &inputs {
            tick(&mut level, input);
            let rect = level.player.rect();
            prop_assert!(rect.bottom() <= 704, "sank into the floor: {:?}", rect);
            prop_assert!(rect.left() >= 96, "went through the left wall: {:?}", rect);
            prop_assert!(rect.right() <= 960, "went through the right wall: {:?}", rect);
            prop_assert!(level.player.jump_count() <= level.settings.max_jumps);
        }
    }

    #[test]
    fn prop_runs_are_reproducible(
        inputs in prop::collection::vec(input_strategy(), 1..200)
    ) {
        let mut a = walled_level();
        let mut b = walled_level();
        for input in &inputs {
            tick(&mut a, input);
            tick(&mut b, input);
        }
        prop_assert_eq!(a.player.rect(), b.player.rect());
        prop_assert_eq!(a.player.state(), b.player.state());
        prop_assert_eq!(a.last_contacts, b.last_contacts);
    }
}
