//! Bar colors.

use ratatui::style::Color;

/// Palette the bar groups are colored from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorPalette {
    /// Gruvbox accent colors, cycled.
    #[default]
    Gruvbox,
    /// Viridis colormap (perceptually uniform, colorblind-friendly).
    Viridis,
    /// Plasma colormap (perceptually uniform).
    Plasma,
    /// Rainbow/Spectral colormap (traditional, high contrast).
    Rainbow,
}

const GRUVBOX_ACCENTS: [Color; 7] = [
    Color::Rgb(131, 165, 152),
    Color::Rgb(250, 189, 47),
    Color::Rgb(211, 134, 155),
    Color::Rgb(184, 187, 38),
    Color::Rgb(254, 128, 25),
    Color::Rgb(142, 192, 124),
    Color::Rgb(251, 73, 52),
];

impl ColorPalette {
    /// Get the next palette in cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Gruvbox => Self::Viridis,
            Self::Viridis => Self::Plasma,
            Self::Plasma => Self::Rainbow,
            Self::Rainbow => Self::Gruvbox,
        }
    }

    /// Get palette name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Gruvbox => "Gruvbox",
            Self::Viridis => "Viridis",
            Self::Plasma => "Plasma",
            Self::Rainbow => "Rainbow",
        }
    }

    /// Color of bar group `bar` out of `bars`.
    ///
    /// Continuous palettes spread the bars evenly from one end to the other.
    pub fn bar_color(self, bar: usize, bars: usize) -> Color {
        if self == Self::Gruvbox {
            return GRUVBOX_ACCENTS[bar % GRUVBOX_ACCENTS.len()];
        }
        let t = if bars > 1 {
            bar as f64 / (bars - 1) as f64
        } else {
            0.5
        };
        self.color(t)
    }

    /// Map a normalized value (0.0 to 1.0) to an RGB color.
    pub fn color(self, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Gruvbox => {
                let last = GRUVBOX_ACCENTS.len() - 1;
                GRUVBOX_ACCENTS[(t * last as f64).round() as usize]
            },
            Self::Viridis => two_segment(t, (68.0, 1.0, 84.0), (33.0, 104.0, 109.0), (253.0, 231.0, 37.0)),
            Self::Plasma => two_segment(t, (13.0, 8.0, 135.0), (180.0, 54.0, 121.0), (240.0, 175.0, 12.0)),
            Self::Rainbow => rainbow_color(t),
        }
    }
}

/// Piecewise linear interpolation through three RGB stops.
fn two_segment(t: f64, start: (f64, f64, f64), mid: (f64, f64, f64), end: (f64, f64, f64)) -> Color {
    let (from, to, s) = if t < 0.5 {
        (start, mid, t * 2.0)
    } else {
        (mid, end, (t - 0.5) * 2.0)
    };
    let lerp = |a: f64, b: f64| (a + s * (b - a)) as u8;
    Color::Rgb(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

/// Rainbow/Spectral colormap.
fn rainbow_color(t: f64) -> Color {
    // HSV to RGB with H from 240° (blue) down to 0° (red)
    let h = (1.0 - t) * 240.0;
    let x = 1.0 - ((h / 60.0) % 2.0 - 1.0).abs();

    let (r, g, b) = if h < 60.0 {
        (1.0, x, 0.0)
    } else if h < 120.0 {
        (x, 1.0, 0.0)
    } else if h < 180.0 {
        (0.0, 1.0, x)
    } else {
        (0.0, x, 1.0)
    };

    Color::Rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycle_returns_to_start() {
        let mut p = ColorPalette::default();
        for _ in 0..4 {
            p = p.next();
        }
        assert_eq!(p, ColorPalette::default());
    }

    #[test]
    fn continuous_palettes_span_their_range() {
        assert_eq!(ColorPalette::Viridis.bar_color(0, 3), Color::Rgb(68, 1, 84));
        assert_eq!(ColorPalette::Viridis.bar_color(2, 3), Color::Rgb(253, 231, 37));
        assert_eq!(ColorPalette::Rainbow.color(0.0), Color::Rgb(0, 0, 255));
        assert_eq!(ColorPalette::Rainbow.color(1.0), Color::Rgb(255, 0, 0));
    }

    #[test]
    fn gruvbox_cycles_accents() {
        let p = ColorPalette::Gruvbox;
        assert_eq!(p.bar_color(0, 10), p.bar_color(GRUVBOX_ACCENTS.len(), 10));
        assert_ne!(p.bar_color(0, 10), p.bar_color(1, 10));
    }
}
