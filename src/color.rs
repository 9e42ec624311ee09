//! Density-to-color mapping.

/// One ramp entry: normalized density position and straight-alpha RGBA in
/// `[0, 1]` per channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub pos: f32,
    pub rgba: [f32; 4],
}

/// Ordered color stops, strictly increasing in position from 0.0 to 1.0.
#[derive(Debug, Clone)]
pub struct ColorRamp {
    stops: Vec<ColorStop>,
}

impl ColorRamp {
    /// Positions must start at 0, end at 1, and be strictly increasing.
    /// A violation is a programming error, so this panics rather than
    /// returning a degenerate ramp with zero-width spans.
    pub fn new(stops: Vec<ColorStop>) -> Self {
        assert!(stops.len() >= 2, "color ramp needs at least two stops");
        assert_eq!(stops[0].pos, 0.0, "first stop must sit at position 0");
        assert_eq!(
            stops[stops.len() - 1].pos,
            1.0,
            "last stop must sit at position 1"
        );
        for pair in stops.windows(2) {
            assert!(
                pair[0].pos < pair[1].pos,
                "stop positions must be strictly increasing"
            );
        }
        Self { stops }
    }

    /// The trail palette: translucent blue at low density up to boosted
    /// white at full density. Stop alphas are scaled by `intensity` and
    /// capped at 1; the driver regenerates the ramp before each draw.
    pub fn trail(intensity: f32) -> Self {
        let base = [
            (0.0, [0.10, 0.30, 1.00, 0.08]),
            (0.25, [0.15, 0.55, 1.00, 0.35]),
            (0.55, [0.35, 0.80, 1.00, 0.65]),
            (0.80, [0.70, 0.92, 1.00, 0.85]),
            (1.0, [1.00, 1.00, 1.00, 1.00]),
        ];
        Self::new(
            base.iter()
                .map(|&(pos, [r, g, b, a])| ColorStop {
                    pos,
                    rgba: [r, g, b, (a * intensity).min(1.0)],
                })
                .collect(),
        )
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Samples the ramp at `t` in `[0, 1]`. A `t` equal to a stop position
    /// returns that stop's color exactly.
    pub fn sample(&self, t: f32) -> [f32; 4] {
        let t = t.clamp(0.0, 1.0);
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.pos {
                let u = (t - a.pos) / (b.pos - a.pos);
                return [
                    a.rgba[0] * (1.0 - u) + b.rgba[0] * u,
                    a.rgba[1] * (1.0 - u) + b.rgba[1] * u,
                    a.rgba[2] * (1.0 - u) + b.rgba[2] * u,
                    a.rgba[3] * (1.0 - u) + b.rgba[3] * u,
                ];
            }
        }
        self.stops[self.stops.len() - 1].rgba
    }
}
