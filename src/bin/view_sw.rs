use clap::Parser;
use glam::Vec2;
use minifb::{Key, Window, WindowOptions};
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use yacast_rs::{
    renderer::{RenderSettings, RendererExt, Software},
    world::{Camera, Grid, TextureBank},
};

const DEMO_MAP: &str = include_str!("../../maps/demo.grid");

/// Walk around a tile map with the software raycaster.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Window width in pixels
    #[arg(long, default_value_t = 640)]
    width: usize,

    /// Window height in pixels
    #[arg(long, default_value_t = 480)]
    height: usize,

    /// Trace one ray per this many columns
    #[arg(long, default_value_t = 1)]
    stride: usize,

    /// Map file (codes separated by whitespace or commas); built-in demo if omitted
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// Horizontal field of view in degrees
    #[arg(long, default_value_t = 66.0)]
    fov: f32,

    /// Render on the calling thread only
    #[arg(long)]
    serial: bool,

    /// Frame-rate cap
    #[arg(long, default_value_t = 60)]
    fps: usize,
}

/* units per second / radians per second */
const MOVE_SPEED: f32 = 3.0;
const TURN_SPEED: f32 = 2.0;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    let textures = TextureBank::demo();
    let text = match &opts.map {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEMO_MAP.to_owned(),
    };
    let grid = Grid::parse(&text, textures.len())?;

    let settings = RenderSettings {
        stride: opts.stride,
        parallel: !opts.serial,
        ..RenderSettings::default()
    };
    let mut renderer = Software::new(settings)?;

    let mut camera = Camera::from_yaw(Vec2::new(1.5, 1.5), 0.0, opts.fov.to_radians());

    let mut win = Window::new(
        "Grid Raycaster",
        opts.width,
        opts.height,
        WindowOptions::default(),
    )?;
    win.set_target_fps(opts.fps);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();
    let mut last_frame = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let dt = last_frame.elapsed().as_secs_f32();
        last_frame = Instant::now();

        /* turning: ←/→ or A/D ------------------------------------------- */
        let mut turn = 0.0;
        if win.is_key_down(Key::Left) || win.is_key_down(Key::A) {
            turn -= 1.0;
        }
        if win.is_key_down(Key::Right) || win.is_key_down(Key::D) {
            turn += 1.0;
        }
        camera.turn(turn * TURN_SPEED * dt);

        /* movement: ↑/↓ or W/S, blocked by solid tiles ----------------- */
        let mut forward = 0.0;
        if win.is_key_down(Key::Up) || win.is_key_down(Key::W) {
            forward += 1.0;
        }
        if win.is_key_down(Key::Down) || win.is_key_down(Key::S) {
            forward -= 1.0;
        }
        if forward != 0.0 {
            let target = camera.step(forward * MOVE_SPEED * dt, 0.0);
            // per axis, so the camera slides along walls
            if !grid.is_solid(Vec2::new(target.x, camera.pos.y).floor().as_ivec2()) {
                camera.pos.x = target.x;
            }
            if !grid.is_solid(Vec2::new(camera.pos.x, target.y).floor().as_ivec2()) {
                camera.pos.y = target.y;
            }
        }

        let (w, h) = win.get_size();
        if w == 0 || h == 0 {
            // minimised
            win.update();
            continue;
        }
        let t0 = Instant::now();
        let mut shown = Ok(());
        renderer.draw_frame(w, h, &camera, &grid, &textures, |fb, w, h| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            shown = win.update_with_buffer(fb, w, h);
        });
        shown?;

        if last_print.elapsed() >= Duration::from_secs(3) && acc_frames > 0 {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            log::info!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
