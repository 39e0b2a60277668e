use num::complex::Complex;

use crate::coord::Viewport;

/// Escape-time iteration for one plane point. Pure arithmetic; all the
/// concurrency lives above this in the session.
#[derive(Clone, Debug)]
pub struct EscapeSolver {
    pub max_iterations: u16,
    threshold: f64,
}

impl EscapeSolver {
    pub fn new(max_iterations: u16) -> Self {
        Self {
            max_iterations,
            threshold: 2.0,
        }
    }

    /// Iterates z <- z^2 + c from z = 0, counting until |z| reaches the
    /// threshold or the iteration cap. A result equal to `max_iterations`
    /// means the point never escaped.
    pub fn escape_count(&self, c: Complex<f64>) -> u16 {
        let mut z = Complex::new(0.0, 0.0);
        let mut iterations = 0;
        while z.norm() < self.threshold && iterations < self.max_iterations {
            z = (z * z) + c;
            iterations += 1;
        }
        iterations
    }

    /// Escape count for pixel (px, py) of a width x height raster under the
    /// given viewport.
    pub fn pixel_count(
        &self,
        px: usize,
        py: usize,
        viewport: &Viewport,
        width: usize,
        height: usize,
    ) -> u16 {
        let c = Complex::new(viewport.re(px, width), viewport.im(py, height));
        self.escape_count(c)
    }
}

impl Default for EscapeSolver {
    fn default() -> Self {
        Self::new(500)
    }
}
