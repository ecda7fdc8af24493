use once_cell::sync::OnceCell;
use structopt::StructOpt;

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Returns the process-wide `Config`, parsed from argv on first access.
pub fn global() -> &'static Config {
    CONFIG.get_or_init(Config::from_args)
}

#[derive(Clone, Debug, StructOpt)]
#[structopt(name = "rtweekend")]
pub struct Config {
    /// Width of the render, in pixels
    #[structopt(short, long, default_value = "1200", display_order = 0)]
    pub width: u32,

    /// Height of the render, in pixels
    #[structopt(short, long, default_value = "675", display_order = 1)]
    pub height: u32,

    /// Number of samples per pixel
    #[structopt(short, long = "samples", default_value = "50")]
    pub samples_per_pixel: u32,

    /// Maximum ray bounce depth
    #[structopt(short, long = "max-depth", default_value = "50")]
    pub max_ray_depth: u32,

    /// Collapse samples-per-pixel to 1, for fast iteration
    #[structopt(
        help = "Disable antialiasing",
        short = "n",
        long = "no-aa",
        parse(from_occurrences = invert_bool)
    )]
    pub antialias: bool,

    /// Seed the per-worker RNGs. Otherwise, each worker seeds from OS entropy.
    #[structopt(short = "r", long = "rng")]
    pub seed: Option<u64>,

    /// Path to write the rendered JPEG to
    #[structopt(short, long, default_value = "render.jpg")]
    pub output: String,
}

impl Config {
    /// Samples-per-pixel after applying `--no-aa`.
    pub fn effective_samples(&self) -> u32 {
        if self.antialias {
            self.samples_per_pixel
        } else {
            1
        }
    }
}

fn invert_bool(i: u64) -> bool {
    i == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_aa_collapses_samples_to_one() {
        let cfg = Config {
            width: 100,
            height: 100,
            samples_per_pixel: 50,
            max_ray_depth: 50,
            antialias: true,
            seed: None,
            output: "render.jpg".into(),
        };
        assert_eq!(cfg.effective_samples(), 50);

        let mut no_aa = cfg;
        no_aa.antialias = false;
        assert_eq!(no_aa.effective_samples(), 1);
    }
}
