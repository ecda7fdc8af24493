use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use minifb::{Key, Window, WindowOptions};

use rtweekend::camera::CameraParams;
use rtweekend::config;
use rtweekend::Renderer;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cfg = config::global();
    tracing::info!(?cfg, "configuration resolved");

    let camera_params = CameraParams {
        samples: cfg.effective_samples(),
        max_depth: cfg.max_ray_depth,
        ..CameraParams::default()
    };

    let renderer = Arc::new(
        Renderer::new(cfg.width, cfg.height, camera_params, cfg.seed, &cfg.output)
            .context("constructing renderer")?,
    );

    let render_handle = {
        let renderer = Arc::clone(&renderer);
        thread::spawn(move || renderer.render())
    };

    let mut window = Window::new(
        "rtweekend",
        cfg.width as usize,
        cfg.height as usize,
        WindowOptions::default(),
    )
    .context("opening display window")?;
    window.limit_update_rate(Some(Duration::from_micros(16_600)));

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let buffer = renderer.encode_0rgb();
        window
            .update_with_buffer(&buffer, cfg.width as usize, cfg.height as usize)
            .context("blitting framebuffer to window")?;

        if let Err(err) = renderer.write() {
            tracing::warn!(%err, "frame snapshot write failed; continuing render");
        }
        renderer.progress();

        if renderer.done() {
            break;
        }
    }

    render_handle.join().expect("render worker panicked");
    renderer.write().context("writing final render output")?;
    println!();
    tracing::info!("display host exiting");
    Ok(())
}
