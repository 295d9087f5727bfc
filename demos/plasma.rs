//! Plasma Demo: A synthetic 320x200 framebuffer rendered as text.
//!
//! A plasma field stands in for a game's renderer: it writes packed ARGB
//! pixels every tick, including a 10-row "status bar" at the bottom that the
//! bridge leaves out of sampling. Runs at 35 ticks per second.
//!
//! Arrow keys pan the field, Space freezes it. Press 'q' or Escape to quit.
//!
//! Logs go to stderr; run with `2>plasma.log RUST_LOG=glyphcast=debug` to
//! watch the key queue at work.

use glyphcast::{
    key_channel, keys, Bridge, BridgeConfig, FramePacer, InputActor, InputConfig, KeyEvent, KeyId, PixelFrame,
    TerminalSession, TerminalSink,
};
use std::io;
use tracing_subscriber::EnvFilter;

const WIDTH: usize = 320;
const HEIGHT: usize = 200;
const STATUS_BAR_ROWS: usize = 10;

/// Pixel source: a scrolling sum-of-waves field.
struct Plasma {
    pixels: Vec<u32>,
    phase: u32,
    offset: (i32, i32),
    velocity: (i32, i32),
    frozen: bool,
}

impl Plasma {
    fn new() -> Self {
        Self {
            pixels: vec![0; WIDTH * HEIGHT],
            phase: 0,
            offset: (0, 0),
            velocity: (0, 0),
            frozen: false,
        }
    }

    fn handle(&mut self, event: KeyEvent) {
        let step = if event.pressed { 2 } else { 0 };
        match event.key {
            k if k == keys::LEFT_ARROW => self.velocity.0 = -step,
            k if k == keys::RIGHT_ARROW => self.velocity.0 = step,
            k if k == keys::UP_ARROW => self.velocity.1 = -step,
            k if k == keys::DOWN_ARROW => self.velocity.1 = step,
            k if k == keys::SPACE && event.pressed => self.frozen = !self.frozen,
            _ => {}
        }
    }

    fn step(&mut self) {
        if !self.frozen {
            self.phase = self.phase.wrapping_add(3);
        }
        self.offset.0 += self.velocity.0;
        self.offset.1 += self.velocity.1;

        let view_height = HEIGHT - STATUS_BAR_ROWS;
        for (y, row) in self.pixels.chunks_mut(WIDTH).enumerate() {
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = if y < view_height {
                    let fx = x as i32 + self.offset.0;
                    let fy = y as i32 + self.offset.1;
                    plasma_pixel(fx, fy, self.phase)
                } else {
                    // Status bar: bright ticks on a dark strip.
                    if x % 16 == 0 { 0xFFFF_FFFF } else { 0xFF20_2020 }
                };
            }
        }
    }
}

fn plasma_pixel(x: i32, y: i32, phase: u32) -> u32 {
    let t = phase as f32 * 0.02;
    let (xf, yf) = (x as f32 * 0.03, y as f32 * 0.05);
    let v = (xf + t).sin() + (yf - t * 0.7).sin() + ((xf + yf) * 0.5 + t).sin() + (xf.hypot(yf) - t).sin();
    // v in [-4, 4]
    let level = ((v + 4.0) * 31.875) as u32;
    let r = level;
    let g = (level * 3 / 4) & 0xFF;
    let b = 255 - level;
    0xFF00_0000 | (r << 16) | (g << 8) | b
}

fn init_tracing() {
    // RUST_LOG=glyphcast=debug
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_ids(true)
        .compact()
        .try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = BridgeConfig::default().with_status_bar_rows(STATUS_BAR_ROWS);
    let (grid_width, grid_height) = (config.grid_width, config.grid_height);
    let mut bridge = Bridge::new(config)?;
    bridge.set_window_title("glyphcast plasma");

    let session = TerminalSession::enter()?;
    let screen = TerminalSession::size()?;
    let mut sink = TerminalSink::centered(io::stdout(), (grid_width, grid_height), screen);

    let (tx, rx) = key_channel(256);
    bridge.attach_input(rx);
    let input = InputActor::spawn(tx, InputConfig::default())?;

    let quit = KeyId::ascii(b'q');
    let mut plasma = Plasma::new();
    let mut pacer = FramePacer::default();

    'running: loop {
        pacer.begin_frame(bridge.time());

        while let Some(event) = bridge.next_key() {
            if event.pressed && (event.key == keys::ESCAPE || Some(event.key) == quit) {
                break 'running;
            }
            plasma.handle(event);
        }

        plasma.step();
        let frame = PixelFrame::new(&plasma.pixels, WIDTH, HEIGHT)?;
        bridge.draw_frame(&frame, &mut sink)?;

        pacer.end_frame(bridge.time());
    }

    input.join();
    drop(session);

    println!(
        "{} frames in {:.1}s, {} key events dropped",
        bridge.frame_count(),
        bridge.elapsed_ms() as f64 / 1000.0,
        bridge.dropped_keys()
    );
    Ok(())
}
