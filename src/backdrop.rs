//! Decorative floating shapes
//!
//! Each screen draws a handful of blurred discs that drift slowly behind the
//! content. They are generated randomly every time a screen is mounted and
//! have no effect on anything else.

use std::ops::Range;

use web_time::Duration;

/// Generation parameters for one screen's backdrop
#[derive(Debug, Clone, PartialEq)]
pub struct BackdropStyle {
    /// Number of shapes
    pub count: usize,
    /// Radius range in terminal cells
    pub radius: Range<f32>,
    /// Length of one drift cycle, in seconds
    pub period: Range<f32>,
    /// Largest offset from the resting position, in cells
    pub drift: f32,
}

impl BackdropStyle {
    /// Backdrop behind the entry form
    pub fn entry() -> Self {
        Self {
            count: crate::constants::presentation::ENTRY_SHAPES,
            radius: 2.0..8.0,
            period: 10.0..20.0,
            drift: 3.0,
        }
    }

    /// Backdrop behind the display grid
    pub fn display() -> Self {
        Self {
            count: crate::constants::presentation::DISPLAY_SHAPES,
            radius: 4.0..14.0,
            period: 15.0..30.0,
            drift: 5.0,
        }
    }
}

/// One drifting disc
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatingShape {
    /// Radius in cells
    pub radius: f32,
    /// Resting horizontal position as a fraction of the screen width
    pub x: f32,
    /// Resting vertical position as a fraction of the screen height
    pub y: f32,
    /// Length of one drift cycle
    pub period: Duration,
    /// Largest offset from the resting position, in cells
    pub drift: f32,
}

impl FloatingShape {
    /// Offset from the resting position after `elapsed`, in cells
    ///
    /// The shape follows the path `0 → (+d, -d) → (-d, +d) → 0` once per
    /// period, easing in and out of every leg.
    pub fn offset_at(&self, elapsed: Duration) -> (f32, f32) {
        const X_KEYFRAMES: [f32; 4] = [0.0, 1.0, -1.0, 0.0];
        const Y_KEYFRAMES: [f32; 4] = [0.0, -1.0, 1.0, 0.0];

        let period = self.period.as_secs_f32();
        if period <= 0.0 {
            return (0.0, 0.0);
        }

        let progress = (elapsed.as_secs_f32() % period) / period * 3.0;
        let leg = (progress as usize).min(2);
        let t = ease_in_out(progress - leg as f32);

        let lerp =
            |frames: &[f32; 4]| (frames[leg] + (frames[leg + 1] - frames[leg]) * t) * self.drift;
        (lerp(&X_KEYFRAMES), lerp(&Y_KEYFRAMES))
    }
}

fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// The set of shapes behind one screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Backdrop {
    shapes: Vec<FloatingShape>,
}

impl Backdrop {
    /// Generates a fresh random backdrop
    pub fn generate(style: &BackdropStyle, rng: &mut fastrand::Rng) -> Self {
        let mut sample = |range: &Range<f32>| range.start + rng.f32() * (range.end - range.start);

        let shapes = (0..style.count)
            .map(|_| FloatingShape {
                radius: sample(&style.radius),
                x: sample(&(0.0..1.0)),
                y: sample(&(0.0..1.0)),
                period: Duration::from_secs_f32(sample(&style.period)),
                drift: style.drift,
            })
            .collect();

        Self { shapes }
    }

    /// The generated shapes
    pub fn shapes(&self) -> &[FloatingShape] {
        &self.shapes
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn shape() -> FloatingShape {
        FloatingShape {
            radius: 3.0,
            x: 0.5,
            y: 0.5,
            period: Duration::from_secs(12),
            drift: 4.0,
        }
    }

    fn approx(a: (f32, f32), b: (f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-3 && (a.1 - b.1).abs() < 1e-3
    }

    #[test]
    fn test_generate_respects_style() {
        let style = BackdropStyle::entry();
        let backdrop = Backdrop::generate(&style, &mut fastrand::Rng::with_seed(7));

        assert_eq!(backdrop.shapes().len(), style.count);
        for shape in backdrop.shapes() {
            assert!(style.radius.contains(&shape.radius));
            assert!((0.0..1.0).contains(&shape.x));
            assert!((0.0..1.0).contains(&shape.y));
            let period = shape.period.as_secs_f32();
            assert!(period >= style.period.start && period <= style.period.end);
        }
    }

    #[test]
    fn test_display_style_has_eight_shapes() {
        let backdrop =
            Backdrop::generate(&BackdropStyle::display(), &mut fastrand::Rng::with_seed(1));

        assert_eq!(backdrop.shapes().len(), 8);
    }

    #[test]
    fn test_offset_follows_keyframes() {
        let shape = shape();

        assert!(approx(shape.offset_at(Duration::ZERO), (0.0, 0.0)));
        assert!(approx(shape.offset_at(Duration::from_secs(4)), (4.0, -4.0)));
        assert!(approx(shape.offset_at(Duration::from_secs(8)), (-4.0, 4.0)));
        assert!(approx(shape.offset_at(Duration::from_secs(12)), (0.0, 0.0)));
    }

    #[test]
    fn test_offset_stays_within_drift() {
        let shape = shape();

        for ms in (0..24_000).step_by(250) {
            let (dx, dy) = shape.offset_at(Duration::from_millis(ms));
            assert!(dx.abs() <= shape.drift + 1e-3);
            assert!(dy.abs() <= shape.drift + 1e-3);
        }
    }
}
