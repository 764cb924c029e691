//! Pixel Platformer headless runner
//!
//! Runs a course for a fixed number of ticks under a seeded autopilot and
//! logs where the player ended up. Useful for checking tuning changes
//! without a renderer.
//!
//! Usage: `pixel-platformer [TICKS] [SEED] [--settings FILE] [--layout FILE]
//! [--save-settings FILE] [--save-layout FILE]`
//!
//! The save options write the settings and layout actually used, which is
//! the easiest way to get an editable copy of the stock course.

use std::path::PathBuf;

use anyhow::{Context, bail};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use pixel_platformer::Settings;
use pixel_platformer::sim::{Assets, Collidable, Level, LevelLayout, TickInput, tick};

const DEFAULT_TICKS: u64 = 600;
const DEFAULT_SEED: u64 = 12345;

struct Args {
    ticks: u64,
    seed: u64,
    settings: Option<PathBuf>,
    layout: Option<PathBuf>,
    save_settings: Option<PathBuf>,
    save_layout: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        ticks: DEFAULT_TICKS,
        seed: DEFAULT_SEED,
        settings: None,
        layout: None,
        save_settings: None,
        save_layout: None,
    };
    let mut positional = 0;
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--settings" => {
                args.settings = Some(it.next().context("--settings needs a path")?.into());
            }
            "--layout" => {
                args.layout = Some(it.next().context("--layout needs a path")?.into());
            }
            "--save-settings" => {
                args.save_settings = Some(it.next().context("--save-settings needs a path")?.into());
            }
            "--save-layout" => {
                args.save_layout = Some(it.next().context("--save-layout needs a path")?.into());
            }
            _ if positional == 0 => {
                args.ticks = arg.parse().with_context(|| format!("bad tick count {arg:?}"))?;
                positional += 1;
            }
            _ if positional == 1 => {
                args.seed = arg.parse().with_context(|| format!("bad seed {arg:?}"))?;
                positional += 1;
            }
            _ => bail!("unexpected argument {arg:?}"),
        }
    }
    Ok(args)
}

/// Scripted player: mostly runs right, hops now and then, and
/// occasionally turns back for a short stretch
struct Autopilot {
    rng: Pcg32,
    backtrack: u32,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            backtrack: 0,
        }
    }

    fn next_input(&mut self) -> TickInput {
        if self.backtrack == 0 && self.rng.random_bool(0.01) {
            self.backtrack = self.rng.random_range(10..40);
        }
        let left = self.backtrack > 0;
        self.backtrack = self.backtrack.saturating_sub(1);

        TickInput {
            move_left: left,
            move_right: !left,
            jump: self.rng.random_bool(0.03),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = parse_args()?;

    let settings = match &args.settings {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let layout = match &args.layout {
        Some(path) => LevelLayout::load_from(path)
            .with_context(|| format!("loading layout from {}", path.display()))?,
        None => LevelLayout::stock_course(&settings),
    };

    if let Some(path) = &args.save_settings {
        settings
            .save_to(path)
            .with_context(|| format!("saving settings to {}", path.display()))?;
    }
    if let Some(path) = &args.save_layout {
        layout
            .save_to(path)
            .with_context(|| format!("saving layout to {}", path.display()))?;
        log::info!("Layout saved to {}", path.display());
    }

    let assets = Assets::placeholder(settings.block_size).context("building placeholder assets")?;
    let mut level = Level::new(settings, &layout, &assets).context("building level")?;

    log::info!(
        "Pixel Platformer (headless) running {} ticks, seed {}",
        args.ticks,
        args.seed
    );

    let mut pilot = Autopilot::new(args.seed);
    let mut hit_ticks = 0u64;
    let mut jumps = 0u64;
    for _ in 0..args.ticks {
        let input = pilot.next_input();
        let jumps_before = level.player.jump_count();
        tick(&mut level, &input);
        if level.player.jump_count() > jumps_before {
            jumps += 1;
        }
        if level.player.is_hit() {
            hit_ticks += 1;
        }
    }

    let rect = level.player.rect();
    log::info!(
        "After {} ticks: player at ({}, {}) {} facing {}, camera offset {}",
        level.time_ticks,
        rect.x,
        rect.y,
        level.player.state().as_str(),
        level.player.facing().as_str(),
        level.camera.offset_x
    );
    log::info!("{jumps} jumps, {hit_ticks} ticks spent hit");

    Ok(())
}
