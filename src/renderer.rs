use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use image::RgbImage;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::camera::{Camera, CameraParams};
use crate::hittable::Hittable;
use crate::scene;
use crate::{CrateRng, ResultExt};

/// Divides `total` pixels into `n` contiguous, gap-free spans. The last
/// span absorbs `total % n` so every pixel in the permutation is covered
/// exactly once, even when `total` doesn't divide evenly by `n`.
fn spans(total: usize, n: usize) -> Vec<Range<usize>> {
    if total == 0 || n == 0 {
        return Vec::new();
    }
    let base = total / n;
    let mut out = Vec::with_capacity(n);
    let mut start = 0;
    for i in 0..n {
        let len = if i + 1 == n { total - start } else { base };
        out.push(start..start + len);
        start += len;
    }
    out
}

/// Owns the framebuffer, the scene/camera, and the render-worker dispatch.
/// A single renderer instance is used for exactly one render.
pub struct Renderer {
    camera: Camera,
    world: Arc<dyn Hittable>,
    framebuffer: Arc<[AtomicU8]>,
    width: u32,
    height: u32,
    pixel_order: Vec<(u32, u32)>,
    progress: Arc<AtomicUsize>,
    done: Arc<AtomicBool>,
    output_path: PathBuf,
    seed: Option<u64>,
}

impl Renderer {
    /// Allocates the framebuffer, builds the book-cover scene fixture,
    /// initializes the camera, and writes an initial all-black snapshot so
    /// the display host always has a valid image to show.
    pub fn new(
        width: u32,
        height: u32,
        camera_params: CameraParams,
        seed: Option<u64>,
        output_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let mut scene_rng = match seed {
            Some(s) => CrateRng::seed_from_u64(s),
            None => CrateRng::from_entropy(),
        };
        let world = scene::book_cover(&mut scene_rng);
        tracing::info!(objects = "book_cover", "scene built");

        let camera = Camera::init(camera_params, width, height);

        let pixel_count = width as usize * height as usize;
        let mut pixel_order: Vec<(u32, u32)> = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .collect();
        pixel_order.shuffle(&mut scene_rng);

        let framebuffer: Arc<[AtomicU8]> = (0..pixel_count * 3).map(|_| AtomicU8::new(0)).collect();

        let renderer = Self {
            camera,
            world,
            framebuffer,
            width,
            height,
            pixel_order,
            progress: Arc::new(AtomicUsize::new(0)),
            done: Arc::new(AtomicBool::new(false)),
            output_path: output_path.as_ref().to_path_buf(),
            seed,
        };
        renderer.write().render_context("writing initial black snapshot")?;
        Ok(renderer)
    }

    /// Blocks the calling thread, spawning `max(1, available_parallelism -
    /// 2)` worker threads that each render a disjoint contiguous span of
    /// the shuffled pixel permutation. Sets `done` once every worker joins.
    pub fn render(&self) {
        let total = self.pixel_order.len();
        let workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .saturating_sub(2)
            .max(1);

        tracing::info!(workers, pixels = total, "render started");
        let started = Instant::now();

        thread::scope(|scope| {
            for (i, span) in spans(total, workers).into_iter().enumerate() {
                let order = &self.pixel_order[span];
                let camera = &self.camera;
                let world = &self.world;
                let framebuffer = &self.framebuffer;
                let progress = &self.progress;
                let seed = self.seed;

                scope.spawn(move || {
                    let mut rng = match seed {
                        Some(s) => CrateRng::seed_from_u64(s.wrapping_add(i as u64)),
                        None => CrateRng::from_entropy(),
                    };
                    for &(x, y) in order {
                        let rgb = camera.render_pixel(x, y, world, &mut rng);
                        let base = (y as usize * camera.image_width() as usize + x as usize) * 3;
                        framebuffer[base].store(rgb[0], Ordering::Relaxed);
                        framebuffer[base + 1].store(rgb[1], Ordering::Relaxed);
                        framebuffer[base + 2].store(rgb[2], Ordering::Relaxed);
                        // Deliberately relaxed and unsynchronized with the writes above:
                        // readers only use this for a textual progress estimate.
                        progress.fetch_add(1, Ordering::Relaxed);
                    }
                });
            }
        });

        self.done.store(true, Ordering::Relaxed);
        tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "render finished");
    }

    /// Encodes the current framebuffer contents (whatever fraction of the
    /// render has completed so far) to `output_path` as a JPEG.
    pub fn write(&self) -> Result<()> {
        let bytes: Vec<u8> = self.framebuffer.iter().map(|b| b.load(Ordering::Relaxed)).collect();
        let image = RgbImage::from_vec(self.width, self.height, bytes)
            .context("framebuffer length did not match width * height * 3")?;
        image.save(&self.output_path).render_context("encoding/writing render output")?;
        tracing::info!(path = %self.output_path.display(), "image written");
        Ok(())
    }

    /// Re-encodes the framebuffer into `minifb`'s native `0RGB` pixel format.
    pub fn encode_0rgb(&self) -> Vec<u32> {
        self.framebuffer
            .chunks_exact(3)
            .map(|rgb| {
                let r = rgb[0].load(Ordering::Relaxed) as u32;
                let g = rgb[1].load(Ordering::Relaxed) as u32;
                let b = rgb[2].load(Ordering::Relaxed) as u32;
                (r << 16) | (g << 8) | b
            })
            .collect()
    }

    /// Completed-pixel count and total, plus a printed textual progress bar.
    pub fn progress(&self) -> (usize, usize) {
        let done = self.progress.load(Ordering::Relaxed).min(self.pixel_order.len());
        let total = self.pixel_order.len();
        let pct = if total == 0 { 100. } else { 100. * done as f64 / total as f64 };
        print!("\r{:>3.0}% ({done}/{total})", pct);
        (done, total)
    }

    pub fn done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn spans_cover_every_index_exactly_once_when_divisible() {
        let s = spans(100, 4);
        assert_eq!(s.len(), 4);
        let covered: HashSet<usize> = s.iter().flat_map(|r| r.clone()).collect();
        assert_eq!(covered.len(), 100);
        assert_eq!(covered, (0..100).collect());
    }

    #[test]
    fn spans_extend_last_span_with_remainder() {
        // 101 pixels over 4 workers: base=25, last span must absorb the remainder.
        let s = spans(101, 4);
        assert_eq!(s[0].len(), 25);
        assert_eq!(s[1].len(), 25);
        assert_eq!(s[2].len(), 25);
        assert_eq!(s[3].len(), 26);
        let covered: HashSet<usize> = s.iter().flat_map(|r| r.clone()).collect();
        assert_eq!(covered, (0..101).collect());
    }

    #[test]
    fn spans_are_pairwise_disjoint() {
        for (total, n) in [(97, 5), (1000, 7), (3, 8)] {
            let s = spans(total, n);
            let mut seen = HashSet::new();
            for r in &s {
                for i in r.clone() {
                    assert!(seen.insert(i), "index {i} covered twice for total={total} n={n}");
                }
            }
        }
    }

    #[test]
    fn single_worker_gets_everything() {
        let s = spans(50, 1);
        assert_eq!(s, vec![0..50]);
    }
}
