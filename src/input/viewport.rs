//! Display collaborator and touch coordinate normalization
//!
//! Raw touch positions are converted into two signed 16-bit spaces: one relative to
//! the active render viewport and one relative to the full display surface. Both map
//! the covered range onto `-0x7fff..=0x7fff`; anything outside becomes [`NO_TOUCH`].

use serde::{Deserialize, Serialize};

use super::touch::{NO_TOUCH, TouchPoint};

/// Render viewport extents in native pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub full_width: u32,
    pub full_height: u32,
}

impl Viewport {
    /// A viewport covering the whole surface
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
            full_width: width,
            full_height: height,
        }
    }

    fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0 && self.full_width > 0 && self.full_height > 0
    }
}

/// Output of the viewport transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translated {
    pub fixed_x: i16,
    pub fixed_y: i16,
    pub full_x: i16,
    pub full_y: i16,
}

/// Platform display layer the engine consults during poll and screen-space queries
pub trait Display {
    /// Ratio between native pixels and logical points
    fn backing_scale_factor(&self) -> f32;

    /// Current viewport, or `None` when the video layer cannot report one
    fn viewport(&self) -> Option<Viewport>;
}

/// Whether raw positions still need the backing scale applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// Positions arrive in logical points and are multiplied by the backing scale
    #[default]
    Backing,
    /// Positions already arrive at native scale
    Native,
}

impl ScaleMode {
    /// Effective multiplier for raw positions under this mode
    pub fn factor(self, display: &dyn Display) -> f32 {
        match self {
            Self::Native => 1.0,
            Self::Backing => sanitize_scale(display.backing_scale_factor()),
        }
    }
}

/// Non-finite or non-positive factors are treated as 1.0
pub fn sanitize_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

fn scale_axis(pos: i64, extent: u32) -> i16 {
    let extent = i64::from(extent);
    if (0..=extent).contains(&pos) {
        ((2 * pos * 0x7fff) / extent - 0x7fff) as i16
    } else {
        NO_TOUCH
    }
}

/// Maps a native pixel position through the viewport
///
/// Returns `None` when the viewport has no area.
pub fn translate(viewport: &Viewport, x: f32, y: f32) -> Option<Translated> {
    if !viewport.has_area() {
        return None;
    }

    let x = x as i64;
    let y = y as i64;

    let full_x = scale_axis(x, viewport.full_width);
    let full_y = scale_axis(y, viewport.full_height);
    let fixed_x = scale_axis(x - i64::from(viewport.x), viewport.width);
    let fixed_y = scale_axis(y - i64::from(viewport.y), viewport.height);

    Some(Translated {
        fixed_x,
        fixed_y,
        full_x,
        full_y,
    })
}

/// Recomputes a touch point's native and transformed coordinates
///
/// The raw `screen_*` fields are left alone so repeated polls within a frame give
/// the same result. When the display has no usable viewport the previous
/// transformed coordinates are kept.
pub fn normalize_touch(point: &mut TouchPoint, scale: f32, display: &dyn Display) {
    point.native_x = point.screen_x * scale;
    point.native_y = point.screen_y * scale;

    let Some(viewport) = display.viewport() else {
        return;
    };

    if let Some(out) = translate(&viewport, point.native_x, point.native_y) {
        point.fixed_x = out.fixed_x;
        point.fixed_y = out.fixed_y;
        point.full_x = out.full_x;
        point.full_y = out.full_y;
    }
}

/// Display with a fixed scale factor and viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedDisplay {
    pub scale_factor: f32,
    pub viewport: Option<Viewport>,
}

impl FixedDisplay {
    pub fn new(scale_factor: f32, viewport: Viewport) -> Self {
        Self {
            scale_factor,
            viewport: Some(viewport),
        }
    }

    /// Display that cannot report a viewport
    pub fn without_viewport(scale_factor: f32) -> Self {
        Self {
            scale_factor,
            viewport: None,
        }
    }
}

impl Display for FixedDisplay {
    fn backing_scale_factor(&self) -> f32 {
        self.scale_factor
    }

    fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }
}
