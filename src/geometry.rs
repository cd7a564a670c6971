// filepath: src/geometry.rs
//! Safe-area geometry
//!
//! Turns a screen size and a platform safe rectangle into anchor fractions
//! for the safe root and for the four unsafe-margin cover panels.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Rectangle in screen (or parent) units, origin at the bottom-left
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn x_max(&self) -> f32 {
        self.x + self.width
    }

    pub fn y_max(&self) -> f32 {
        self.y + self.height
    }
}

/// Normalized edge positions of a node relative to its parent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchors {
    pub min: Vec2,
    pub max: Vec2,
}

impl Anchors {
    /// Fills the whole parent.
    pub const STRETCH: Self = Self {
        min: Vec2::ZERO,
        max: Vec2::ONE,
    };

    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// All components in `[0, 1]` and `min <= max` on both axes.
    pub fn is_valid(&self) -> bool {
        let unit = |v: f32| (0.0..=1.0).contains(&v);
        unit(self.min.x)
            && unit(self.min.y)
            && unit(self.max.x)
            && unit(self.max.y)
            && self.min.x <= self.max.x
            && self.min.y <= self.max.y
    }

    fn clamped(min: Vec2, max: Vec2) -> Self {
        let min = Vec2::new(unit_clamp(min.x), unit_clamp(min.y));
        let max = Vec2::new(
            unit_clamp(max.x).max(min.x),
            unit_clamp(max.y).max(min.y),
        );
        Self { min, max }
    }
}

impl Default for Anchors {
    fn default() -> Self {
        Self::STRETCH
    }
}

/// Which axes shrink to the safe area. A disabled axis spans the full screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisMask {
    pub safe_horizontal: bool,
    pub safe_vertical: bool,
}

impl Default for AxisMask {
    fn default() -> Self {
        Self {
            safe_horizontal: true,
            safe_vertical: true,
        }
    }
}

/// Screen size plus the platform-reported safe rectangle, in the same units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMetrics {
    pub width: f32,
    pub height: f32,
    pub safe_area: Rect,
}

impl ScreenMetrics {
    pub fn new(width: f32, height: f32, safe_area: Rect) -> Self {
        Self {
            width,
            height,
            safe_area,
        }
    }

    /// A screen without any unsafe margins.
    pub fn full(width: f32, height: f32) -> Self {
        Self::new(width, height, Rect::from_size(width, height))
    }

    /// Both dimensions are positive finite numbers and can be divided by.
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Safe-area edges as fractions of the screen: (left, bottom, right, top).
    fn fractions(&self) -> (f32, f32, f32, f32) {
        let safe = &self.safe_area;
        (
            safe.x / self.width,
            safe.y / self.height,
            safe.x_max() / self.width,
            safe.y_max() / self.height,
        )
    }
}

/// One of the four unsafe-margin panels of the cover template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoverPanel {
    Left,
    Right,
    Top,
    Bottom,
}

impl CoverPanel {
    pub const ALL: [CoverPanel; 4] = [
        CoverPanel::Left,
        CoverPanel::Right,
        CoverPanel::Top,
        CoverPanel::Bottom,
    ];

    /// Child name used by cover templates.
    pub fn name(self) -> &'static str {
        match self {
            CoverPanel::Left => "Left",
            CoverPanel::Right => "Right",
            CoverPanel::Top => "Top",
            CoverPanel::Bottom => "Bottom",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|panel| panel.name() == name)
    }
}

/// Anchors for each unsafe margin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverAnchors {
    pub left: Anchors,
    pub right: Anchors,
    pub top: Anchors,
    pub bottom: Anchors,
}

impl CoverAnchors {
    pub fn get(&self, panel: CoverPanel) -> Anchors {
        match panel {
            CoverPanel::Left => self.left,
            CoverPanel::Right => self.right,
            CoverPanel::Top => self.top,
            CoverPanel::Bottom => self.bottom,
        }
    }
}

/// Anchors of the safe root for the given screen.
///
/// Returns `None` when the screen has no usable size, in which case the
/// caller keeps whatever anchors it already had.
pub fn safe_anchors(metrics: &ScreenMetrics, mask: AxisMask) -> Option<Anchors> {
    if !metrics.is_usable() {
        return None;
    }
    let (left, bottom, right, top) = metrics.fractions();

    let (min_x, max_x) = if mask.safe_horizontal {
        (left, right)
    } else {
        (0.0, 1.0)
    };
    let (min_y, max_y) = if mask.safe_vertical {
        (bottom, top)
    } else {
        (0.0, 1.0)
    };

    Some(Anchors::clamped(
        Vec2::new(min_x, min_y),
        Vec2::new(max_x, max_y),
    ))
}

/// Anchors of the four cover panels, each masked by its own axis.
pub fn cover_anchors(metrics: &ScreenMetrics, mask: AxisMask) -> Option<CoverAnchors> {
    if !metrics.is_usable() {
        return None;
    }
    let (left, bottom, right, top) = metrics.fractions();
    let h = |safe: f32, fallback: f32| if mask.safe_horizontal { safe } else { fallback };
    let v = |safe: f32, fallback: f32| if mask.safe_vertical { safe } else { fallback };

    Some(CoverAnchors {
        left: Anchors::clamped(Vec2::ZERO, Vec2::new(h(left, 0.0), 1.0)),
        right: Anchors::clamped(Vec2::new(h(right, 1.0), 0.0), Vec2::ONE),
        top: Anchors::clamped(Vec2::new(0.0, v(top, 1.0)), Vec2::ONE),
        bottom: Anchors::clamped(Vec2::ZERO, Vec2::new(1.0, v(bottom, 0.0))),
    })
}

fn unit_clamp(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-4;

    fn phone() -> ScreenMetrics {
        ScreenMetrics::new(1080.0, 2220.0, Rect::new(0.0, 102.0, 1080.0, 2016.0))
    }

    #[test]
    fn portrait_phone_insets_vertical_axis() {
        let anchors = safe_anchors(&phone(), AxisMask::default()).unwrap();
        assert_eq!(anchors.min.x, 0.0);
        assert_eq!(anchors.max.x, 1.0);
        assert!((anchors.min.y - 102.0 / 2220.0).abs() < EPS);
        assert!((anchors.min.y - 0.04595).abs() < EPS);
        assert!((anchors.max.y - 0.9541).abs() < EPS);
    }

    #[test]
    fn horizontal_mask_leaves_vertical_values_alone() {
        let mask = AxisMask {
            safe_horizontal: false,
            safe_vertical: true,
        };
        let mut metrics = phone();
        metrics.safe_area.x = 40.0;
        metrics.safe_area.width = 1000.0;

        let anchors = safe_anchors(&metrics, mask).unwrap();
        let unmasked = safe_anchors(&phone(), AxisMask::default()).unwrap();
        assert_eq!((anchors.min.x, anchors.max.x), (0.0, 1.0));
        assert_eq!(anchors.min.y, unmasked.min.y);
        assert_eq!(anchors.max.y, unmasked.max.y);
    }

    #[test]
    fn full_safe_area_stretches_and_empties_cover() {
        let metrics = ScreenMetrics::full(800.0, 600.0);
        assert_eq!(
            safe_anchors(&metrics, AxisMask::default()),
            Some(Anchors::STRETCH)
        );

        let cover = cover_anchors(&metrics, AxisMask::default()).unwrap();
        assert_eq!(cover.left.max.x, 0.0);
        assert_eq!(cover.right.min.x, 1.0);
        assert_eq!(cover.top.min.y, 1.0);
        assert_eq!(cover.bottom.max.y, 0.0);
    }

    #[test]
    fn cover_panels_follow_safe_edges() {
        let metrics = ScreenMetrics::new(2000.0, 1000.0, Rect::new(100.0, 50.0, 1700.0, 900.0));
        let cover = cover_anchors(&metrics, AxisMask::default()).unwrap();

        assert_eq!(cover.left, Anchors::new(Vec2::ZERO, Vec2::new(0.05, 1.0)));
        assert_eq!(cover.right, Anchors::new(Vec2::new(0.9, 0.0), Vec2::ONE));
        assert_eq!(cover.top, Anchors::new(Vec2::new(0.0, 0.95), Vec2::ONE));
        assert_eq!(cover.bottom, Anchors::new(Vec2::ZERO, Vec2::new(1.0, 0.05)));
    }

    #[test]
    fn masked_cover_panels_collapse() {
        let metrics = ScreenMetrics::new(2000.0, 1000.0, Rect::new(100.0, 50.0, 1700.0, 900.0));
        let mask = AxisMask {
            safe_horizontal: false,
            safe_vertical: false,
        };
        let cover = cover_anchors(&metrics, mask).unwrap();

        assert_eq!(cover.left.max, Vec2::new(0.0, 1.0));
        assert_eq!(cover.right.min, Vec2::new(1.0, 0.0));
        assert_eq!(cover.top.min, Vec2::new(0.0, 1.0));
        assert_eq!(cover.bottom.max, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn zero_sized_screen_is_not_divided() {
        let metrics = ScreenMetrics::new(0.0, 2220.0, Rect::from_size(0.0, 2220.0));
        assert!(safe_anchors(&metrics, AxisMask::default()).is_none());
        assert!(cover_anchors(&metrics, AxisMask::default()).is_none());

        let metrics = ScreenMetrics::new(1080.0, -1.0, Rect::default());
        assert!(safe_anchors(&metrics, AxisMask::default()).is_none());
    }

    #[test]
    fn out_of_bounds_safe_area_is_clamped() {
        let metrics = ScreenMetrics::new(100.0, 100.0, Rect::new(-20.0, 150.0, 200.0, -80.0));
        let anchors = safe_anchors(&metrics, AxisMask::default()).unwrap();
        assert!(anchors.is_valid(), "{anchors:?}");
    }

    #[test]
    fn cover_panel_names_round_trip() {
        for panel in CoverPanel::ALL {
            assert_eq!(CoverPanel::from_name(panel.name()), Some(panel));
        }
        assert_eq!(CoverPanel::from_name("Middle"), None);
    }

    fn screen_and_safe_area() -> impl Strategy<Value = ScreenMetrics> {
        (1.0f32..4000.0, 1.0f32..4000.0, 0.0f32..1.0, 0.0f32..1.0, 0.0f32..1.0, 0.0f32..1.0)
            .prop_map(|(w, h, fx, fy, fw, fh)| {
                let x = w * fx;
                let y = h * fy;
                let width = (w - x) * fw;
                let height = (h - y) * fh;
                ScreenMetrics::new(w, h, Rect::new(x, y, width, height))
            })
    }

    fn masks() -> impl Strategy<Value = AxisMask> {
        (any::<bool>(), any::<bool>()).prop_map(|(safe_horizontal, safe_vertical)| AxisMask {
            safe_horizontal,
            safe_vertical,
        })
    }

    proptest! {
        #[test]
        fn anchors_stay_in_unit_range(metrics in screen_and_safe_area(), mask in masks()) {
            let anchors = safe_anchors(&metrics, mask).unwrap();
            prop_assert!(anchors.is_valid());

            let cover = cover_anchors(&metrics, mask).unwrap();
            for panel in CoverPanel::ALL {
                prop_assert!(cover.get(panel).is_valid());
            }
        }

        #[test]
        fn disabled_axis_spans_full_screen(metrics in screen_and_safe_area()) {
            let horizontal_off = AxisMask { safe_horizontal: false, safe_vertical: true };
            let anchors = safe_anchors(&metrics, horizontal_off).unwrap();
            prop_assert_eq!((anchors.min.x, anchors.max.x), (0.0, 1.0));

            let vertical_off = AxisMask { safe_horizontal: true, safe_vertical: false };
            let anchors = safe_anchors(&metrics, vertical_off).unwrap();
            prop_assert_eq!((anchors.min.y, anchors.max.y), (0.0, 1.0));
        }

        #[test]
        fn arbitrary_rectangles_never_escape_unit_range(
            w in -10.0f32..4000.0,
            h in -10.0f32..4000.0,
            x in -5000.0f32..5000.0,
            y in -5000.0f32..5000.0,
            sw in -5000.0f32..5000.0,
            sh in -5000.0f32..5000.0,
        ) {
            let metrics = ScreenMetrics::new(w, h, Rect::new(x, y, sw, sh));
            if let Some(anchors) = safe_anchors(&metrics, AxisMask::default()) {
                prop_assert!(anchors.is_valid());
            }
        }
    }
}
