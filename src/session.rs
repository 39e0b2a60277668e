use std::error::Error;
use std::fmt;
use std::io::{self, Write};
use std::thread;

use ndarray::ArrayViewMut2;

use crate::coord::Viewport;
use crate::painter::{Painter, ThresholdPainter};
use crate::progress::{ProgressReporter, ProgressTracker};
use crate::raster::{Band, Raster};
use crate::solver::EscapeSolver;

/// Everything a render needs, decided once up front.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    pub max_iterations: u16,
    pub threads: usize,
    pub viewport: Viewport,
}

impl RenderConfig {
    pub fn new(width: usize, height: usize, max_iterations: u16, threads: usize) -> Self {
        Self {
            width,
            height,
            max_iterations,
            threads,
            viewport: Viewport::default(),
        }
    }

    /// Rejects thread counts that cannot produce uniform bands. Checked
    /// before any thread is spawned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_thread_count(self.threads, self.height)
    }
}

/// The uniform banding constraint, shared by session validation and the
/// CLI prompt.
pub fn check_thread_count(threads: usize, height: usize) -> Result<(), ConfigError> {
    if threads == 0 {
        return Err(ConfigError::ZeroThreads);
    }
    if threads > height {
        return Err(ConfigError::TooManyThreads { threads, height });
    }
    if height % threads != 0 {
        return Err(ConfigError::UnevenBands { threads, height });
    }
    Ok(())
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(1920, 1200, 500, num_cpus::get())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    ZeroThreads,
    TooManyThreads { threads: usize, height: usize },
    UnevenBands { threads: usize, height: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroThreads => write!(f, "thread count must be at least 1"),
            Self::TooManyThreads { threads, height } => {
                write!(f, "{} threads exceed the image height {}", threads, height)
            }
            Self::UnevenBands { threads, height } => {
                write!(
                    f,
                    "{} threads cannot split {} rows into equal bands",
                    threads, height
                )
            }
        }
    }
}

impl Error for ConfigError {}

/// One worker's job: fill its band of the raster, then report completion.
/// `view` is the band's exclusive row slab, so row `y` of the raster is row
/// `y - band.begin` of the view.
fn render_band(
    view: &mut ArrayViewMut2<u32>,
    band: Band,
    config: &RenderConfig,
    solver: &EscapeSolver,
    painter: &ThresholdPainter,
) {
    for y in band.begin..band.end {
        for x in 0..config.width {
            let count = solver.pixel_count(x, y, &config.viewport, config.width, config.height);
            view[[y - band.begin, x]] = painter.color(count);
        }
    }
}

/// Orchestrates one render: band workers plus the progress reporter inside
/// a single scope, whose end is the join barrier that makes the finished
/// raster safe to read.
pub struct RenderSession {
    config: RenderConfig,
}

impl RenderSession {
    pub fn new(config: RenderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders with progress lines written to the given sink.
    pub fn render_to<W: Write + Send>(&self, progress_out: &mut W) -> Raster {
        let config = &self.config;
        let mut raster = Raster::new(config.width, config.height);
        let tracker = ProgressTracker::new(config.threads);
        let solver = EscapeSolver::new(config.max_iterations);
        let painter = ThresholdPainter::new(config.max_iterations);

        thread::scope(|scope| {
            let tracker = &tracker;
            scope.spawn(move || {
                // a failed sink write loses progress frames, not the render
                let _ = ProgressReporter::run(tracker, progress_out);
            });
            for (band, mut view) in raster.band_views(config.threads) {
                let solver = &solver;
                let painter = &painter;
                scope.spawn(move || {
                    render_band(&mut view, band, config, solver, painter);
                    tracker.complete_one();
                });
            }
        });

        raster
    }

    /// Renders with progress on stdout.
    pub fn render(&self) -> Raster {
        self.render_to(&mut io::stdout())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_validate_accepts_even_splits() {
        assert!(RenderConfig::new(4, 1200, 500, 8).validate().is_ok());
        assert!(RenderConfig::new(4, 1200, 500, 1).validate().is_ok());
        assert!(RenderConfig::new(4, 1200, 500, 1200).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_thread_counts() {
        assert_eq!(
            RenderConfig::new(4, 1200, 500, 0).validate(),
            Err(ConfigError::ZeroThreads)
        );
        assert_eq!(
            RenderConfig::new(4, 1200, 500, 1201).validate(),
            Err(ConfigError::TooManyThreads {
                threads: 1201,
                height: 1200
            })
        );
        assert_eq!(
            RenderConfig::new(4, 1200, 500, 7).validate(),
            Err(ConfigError::UnevenBands {
                threads: 7,
                height: 1200
            })
        );
    }

    #[test]
    fn test_render_small_mixed_region() {
        let session = RenderSession::new(RenderConfig::new(4, 2, 500, 2)).unwrap();
        let mut progress = Vec::new();
        let raster = session.render_to(&mut progress);
        assert_eq!(raster.width(), 4);
        assert_eq!(raster.height(), 2);
        // default window: the left edge escapes fast, the middle is in the set
        assert_ne!(raster.get(0, 0), 0x000000);
        assert_eq!(raster.get(2, 1), 0x000000);
    }

    #[test]
    fn test_thread_count_does_not_change_pixels() {
        let serial = RenderSession::new(RenderConfig::new(32, 24, 100, 1))
            .unwrap()
            .render_to(&mut Vec::new());
        for threads in [2, 4, 8, 24] {
            let banded = RenderSession::new(RenderConfig::new(32, 24, 100, threads))
                .unwrap()
                .render_to(&mut Vec::new());
            assert_eq!(banded, serial, "{} threads diverged", threads);
        }
    }
}
