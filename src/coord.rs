use num::Num;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Axis<T> {
    pub min: T,
    pub max: T,
}

impl<T> Axis<T>
where
    T: Num + Copy,
{
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn length(&self) -> T {
        self.max - self.min
    }

    pub fn center(&self) -> T {
        (self.max + self.min) / (T::one() + T::one())
    }
}

/// Region of the complex plane mapped onto the raster. `x` runs left to
/// right; `y` runs top to bottom, so `y.min` is the bound at row zero.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub x: Axis<f64>,
    pub y: Axis<f64>,
}

impl Viewport {
    pub fn new(x: Axis<f64>, y: Axis<f64>) -> Self {
        Self { x, y }
    }

    /// Real part of the plane point for pixel column `px` of `width`.
    pub fn re(&self, px: usize, width: usize) -> f64 {
        self.x.min + (px as f64) * self.x.length() / (width as f64)
    }

    /// Imaginary part of the plane point for pixel row `py` of `height`.
    pub fn im(&self, py: usize, height: usize) -> f64 {
        self.y.min + (py as f64) * self.y.length() / (height as f64)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Axis::new(-2.0, 1.0), Axis::new(1.125, -1.125))
    }
}
