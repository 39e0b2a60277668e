use ndarray::{Array2, ArrayViewMut2, Axis};

/// Contiguous half-open row range [begin, end) owned by one worker.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Band {
    pub begin: usize,
    pub end: usize,
}

impl Band {
    pub fn new(begin: usize, end: usize) -> Self {
        assert!(begin < end, "empty band");
        Self { begin, end }
    }

    pub fn rows(&self) -> usize {
        self.end - self.begin
    }
}

/// Splits [0, height) into `count` equal bands. The union of the result
/// covers every row exactly once, which is what makes the per-band raster
/// views safe to write without locking.
pub fn partition(height: usize, count: usize) -> Vec<Band> {
    assert!(count > 0 && height % count == 0, "bands must divide height");
    let rows = height / count;
    (0..count)
        .map(|i| Band::new(i * rows, (i + 1) * rows))
        .collect()
}

/// Row-major pixel buffer; each cell is a packed 0xRRGGBB color.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    pixels: Array2<u32>,
}

impl Raster {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: Array2::zeros((height, width)),
        }
    }

    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.pixels[[y, x]]
    }

    pub fn set(&mut self, x: usize, y: usize, color: u32) {
        self.pixels[[y, x]] = color;
    }

    /// Hands out one exclusive mutable row-slab view per band. The views
    /// borrow disjoint regions, so each can move to its own thread.
    pub fn band_views(&mut self, count: usize) -> Vec<(Band, ArrayViewMut2<u32>)> {
        let bands = partition(self.height(), count);
        let rows = self.height() / count;
        bands
            .into_iter()
            .zip(self.pixels.axis_chunks_iter_mut(Axis(0), rows))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn check_partition(height: usize, count: usize) {
        let bands = partition(height, count);
        assert_eq!(bands.len(), count);
        let mut covered = vec![0usize; height];
        for band in &bands {
            for y in band.begin..band.end {
                covered[y] += 1;
            }
        }
        assert!(covered.iter().all(|&n| n == 1), "gap or overlap in bands");
    }

    #[test]
    fn test_partition_covers_exactly() {
        check_partition(1200, 1);
        check_partition(1200, 2);
        check_partition(1200, 8);
        check_partition(1200, 100);
        check_partition(1200, 1200);
        check_partition(2, 2);
    }

    #[test]
    fn test_partition_bands_are_uniform() {
        let bands = partition(1200, 8);
        assert!(bands.iter().all(|b| b.rows() == 150));
    }

    #[test]
    #[should_panic]
    fn test_partition_rejects_uneven_split() {
        partition(10, 3);
    }

    #[test]
    fn test_band_views_are_disjoint_slabs() {
        let mut raster = Raster::new(4, 6);
        let views = raster.band_views(3);
        assert_eq!(views.len(), 3);
        for (band, mut view) in views {
            assert_eq!(view.nrows(), band.rows());
            assert_eq!(view.ncols(), 4);
            for x in 0..4 {
                view[[0, x]] = band.begin as u32;
            }
        }
        for band in partition(6, 3) {
            assert_eq!(raster.get(0, band.begin), band.begin as u32);
        }
    }

    #[test]
    fn test_get_set_round_trip() {
        let mut raster = Raster::new(3, 2);
        raster.set(2, 1, 0xAABBCC);
        assert_eq!(raster.get(2, 1), 0xAABBCC);
        assert_eq!(raster.get(0, 0), 0);
    }
}
