/// Maps escape counts to packed 0xRRGGBB colors.
pub trait Painter {
    fn color(&self, escape_count: u16) -> u32;
}

pub const BLACK: u32 = 0x000000;

/// Ordered (limit, color) buckets; an escape count belongs to the first
/// bucket whose limit it is strictly below.
const BUCKETS: [(u16, u32); 6] = [
    (3, 0x6d5269),
    (5, 0x916d8c),
    (10, 0xB689B0),
    (15, 0xD5A4CF),
    (25, 0xF9BCDD),
    (50, 0xFCD9C2),
];

/// Color for every count past the last bucket limit.
const TERMINAL: u32 = 0xFFF1AC;

/// Threshold-bucket palette. Counts that reached `max_iterations` paint
/// black; everything else falls into a fixed bucket, with an explicit
/// terminal color past the last limit so no count is ever left unmapped.
#[derive(Clone, Debug)]
pub struct ThresholdPainter {
    max_iterations: u16,
}

impl ThresholdPainter {
    pub fn new(max_iterations: u16) -> Self {
        Self { max_iterations }
    }
}

impl Painter for ThresholdPainter {
    fn color(&self, escape_count: u16) -> u32 {
        if escape_count >= self.max_iterations {
            return BLACK;
        }
        for (limit, color) in BUCKETS {
            if escape_count < limit {
                return color;
            }
        }
        TERMINAL
    }
}
