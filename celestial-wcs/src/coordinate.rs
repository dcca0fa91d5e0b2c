/// Position on the 2D display, in 0-based pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelCoord {
    x: f64,
    y: f64,
}

impl PixelCoord {
    pub const ORIGIN: PixelCoord = PixelCoord { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Largest per-axis distance to `other`.
    #[inline]
    pub fn max_offset(&self, other: PixelCoord) -> f64 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// The two world values shown for one display position, in display-axis
/// order (horizontal axis first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldCoord {
    values: [f64; 2],
}

impl WorldCoord {
    #[inline]
    pub fn new(first: f64, second: f64) -> Self {
        Self {
            values: [first, second],
        }
    }

    #[inline]
    pub fn get(&self, axis: usize) -> f64 {
        self.values[axis]
    }

    #[inline]
    pub fn set(&mut self, axis: usize, value: f64) {
        self.values[axis] = value;
    }

    #[inline]
    pub fn values(&self) -> [f64; 2] {
        self.values
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }
}
