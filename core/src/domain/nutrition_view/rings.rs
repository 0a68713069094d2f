use std::f64::consts::PI;

use serde::Serialize;

const FULL_TURN_DEGREES: f64 = 360.0;

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Pixel geometry shared by every ring in a view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RingGeometry {
    pub size: f64,
    pub stroke_width: f64,
}

impl RingGeometry {
    pub fn new(size: f64, stroke_width: f64) -> Self {
        Self { size, stroke_width }
    }

    pub fn radius(&self) -> f64 {
        ((self.size - self.stroke_width) / 2.0).max(0.0)
    }

    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius()
    }

    pub fn center(&self) -> f64 {
        self.size / 2.0
    }
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self::new(50.0, 5.0)
    }
}

/// A partial arc whose swept fraction is a value clamped to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ring {
    pub value: f64,
    pub clamped: f64,
    pub geometry: RingGeometry,
}

impl Ring {
    pub fn new(value: f64, geometry: RingGeometry) -> Self {
        Self {
            value,
            clamped: clamp_percent(value),
            geometry,
        }
    }

    /// Swept fraction of the full circle, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        self.clamped / 100.0
    }

    pub fn swept_degrees(&self) -> f64 {
        self.clamped * FULL_TURN_DEGREES / 100.0
    }

    /// Stroke dash offset: the hidden share of the circumference.
    pub fn dash_offset(&self) -> f64 {
        (100.0 - self.clamped) / 100.0 * self.geometry.circumference()
    }

    pub fn dash_array(&self) -> f64 {
        self.geometry.circumference()
    }
}

/// One constituent of a [`MultiRing`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingSegment<L> {
    pub label: L,
    pub ring: Ring,
    /// Cumulative percentage of every earlier segment.
    pub start_percent: f64,
}

impl<L> RingSegment<L> {
    pub fn rotation_degrees(&self) -> f64 {
        self.start_percent * FULL_TURN_DEGREES / 100.0
    }

    pub fn rotation_turns(&self) -> f64 {
        self.start_percent / 100.0
    }
}

/// Concentric arcs laid end to end around one circle.
///
/// Each segment starts where the previous ones end. Rotation is fixed by
/// input order; [`MultiRing::draw_order`] only changes stacking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiRing<L> {
    pub segments: Vec<RingSegment<L>>,
    pub geometry: RingGeometry,
}

impl<L> MultiRing<L> {
    pub fn new(values: impl IntoIterator<Item = (L, f64)>, geometry: RingGeometry) -> Self {
        let mut accumulated = 0.0;
        let segments = values
            .into_iter()
            .map(|(label, value)| {
                let ring = Ring::new(value, geometry);
                let segment = RingSegment {
                    label,
                    ring,
                    start_percent: accumulated,
                };
                accumulated += ring.clamped;
                segment
            })
            .collect();

        Self { segments, geometry }
    }

    /// Segments last-first, so leading segments are painted on top.
    pub fn draw_order(&self) -> impl Iterator<Item = &RingSegment<L>> {
        self.segments.iter().rev()
    }

    pub fn total_percent(&self) -> f64 {
        self.segments.iter().map(|s| s.ring.clamped).sum()
    }
}

/// Reference scale for turning kcal into a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalorieScale {
    pub daily_target_kcal: f64,
}

impl CalorieScale {
    pub const DEFAULT_DAILY_TARGET_KCAL: f64 = 2000.0;

    pub fn new(daily_target_kcal: f64) -> Self {
        Self { daily_target_kcal }
    }

    /// Share of the daily target, unclamped. Zero when the target is unusable.
    pub fn share_percent(&self, kcal: f64) -> f64 {
        if !(self.daily_target_kcal.is_finite() && self.daily_target_kcal > 0.0) || kcal.is_nan() {
            return 0.0;
        }
        kcal.max(0.0) / self.daily_target_kcal * 100.0
    }
}

impl Default for CalorieScale {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DAILY_TARGET_KCAL)
    }
}
