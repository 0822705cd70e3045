//! Mapping a frame's dirty region onto the display surface
//!
//! Text subtitles are placed relative to the window, bitmap subtitles relative
//! to the video area. Bitmap formats authored wider than 720 pixels can be
//! fit with their aspect ratio preserved, then centred and pulled back inside
//! the window when they overflow it.

use crate::frame::FrameState;
use crate::geometry::{round_half_away, Point, Rect, Size};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Virtual texture width above which bitmap subtitles keep their aspect ratio
pub const SPECIAL_CASE_MIN_WIDTH: i32 = 720;

/// Aspect ratios closer than this are treated as equal
pub const ASPECT_EPSILON: f64 = 0.001;

/// Display geometry for one placement query
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementRequest {
    /// Output window in display coordinates
    pub window: Rect,
    /// Video content area in display coordinates
    pub video: Rect,
    /// Place text subtitles relative to the video instead of the window
    pub position_relative: bool,
    /// Manual nudge applied last (overscan compensation)
    pub shift: Point,
    /// Horizontal offset in frame pixels (stereoscopic rendering)
    pub x_offset: i32,
    /// Allow aspect-preserving placement for bitmap formats
    pub use_special_case: bool,
}

impl PlacementRequest {
    pub fn new(window: Rect, video: Rect) -> Self {
        Self {
            window,
            video,
            ..Self::default()
        }
    }

    /// Builder pattern: anchor text subtitles to the video area
    pub fn with_position_relative(mut self, relative: bool) -> Self {
        self.position_relative = relative;
        self
    }

    /// Builder pattern: set the final shift
    pub fn with_shift(mut self, shift: Point) -> Self {
        self.shift = shift;
        self
    }

    /// Builder pattern: set the horizontal frame offset
    pub fn with_x_offset(mut self, x_offset: i32) -> Self {
        self.x_offset = x_offset;
        self
    }

    /// Builder pattern: enable aspect-preserving bitmap placement
    pub fn with_special_case(mut self, enabled: bool) -> Self {
        self.use_special_case = enabled;
        self
    }
}

/// Source and destination rectangles for the current dirty region
///
/// Only valid for the geometry it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Dirty rectangle in the frame's own coordinates
    pub source: Rect,
    /// Where the source lands on the display surface
    pub dest: Rect,
}

struct Scale {
    x: f64,
    y: f64,
    /// Set when aspect-preserving placement left unused space
    letterboxed: bool,
}

fn choose_scale(state: &FrameState, target: Size, use_special_case: bool) -> Scale {
    let texture = state.virtual_texture_size;
    let special_case = use_special_case
        && state.kind.is_bitmap()
        && texture.width > SPECIAL_CASE_MIN_WIDTH;

    if !special_case {
        return Scale {
            x: f64::from(target.width) / f64::from(texture.width),
            y: f64::from(target.height) / f64::from(texture.height),
            letterboxed: false,
        };
    }

    let subtitle_aspect = f64::from(texture.width) / f64::from(texture.height);
    let target_aspect = f64::from(target.width) / f64::from(target.height);
    let matches_aspect = (target_aspect - subtitle_aspect).abs() < ASPECT_EPSILON;

    let uniform = if matches_aspect || target_aspect > subtitle_aspect {
        f64::from(target.width) / f64::from(texture.width)
    } else {
        f64::from(target.height) / f64::from(texture.height)
    };

    Scale {
        x: uniform,
        y: uniform,
        letterboxed: !matches_aspect,
    }
}

/// Compute where `state`'s dirty region lands on the display
pub fn map_source_and_dest(state: &FrameState, request: &PlacementRequest) -> Result<Placement> {
    if state.dirty_rect.is_empty() {
        return Err(Error::NothingToDisplay);
    }

    if state.size.is_empty() {
        return Err(Error::invalid_argument(format!(
            "frame size {}x{} has no area",
            state.size.width, state.size.height
        )));
    }

    if state.virtual_texture_size.is_empty() {
        return Err(Error::invalid_argument(format!(
            "virtual texture size {}x{} has no area",
            state.virtual_texture_size.width, state.virtual_texture_size.height
        )));
    }

    let target = if request.position_relative || !state.kind.is_text() {
        request.video
    } else {
        request.window
    };
    let target_size = target.size();
    let scale = choose_scale(state, target_size, request.use_special_case);

    let source = state.dirty_rect;
    let shifted = source.offset_by(state.virtual_texture_top_left + Point::new(request.x_offset, 0));
    let mut dest = Rect::new(
        round_half_away(f64::from(shifted.left) * scale.x),
        round_half_away(f64::from(shifted.top) * scale.y),
        round_half_away(f64::from(shifted.right) * scale.x),
        round_half_away(f64::from(shifted.bottom) * scale.y),
    );
    dest.offset(target.top_left());

    if scale.letterboxed {
        let texture = state.virtual_texture_size;
        let extra_width = f64::from(target_size.width) - f64::from(texture.width) * scale.x;
        let extra_height = f64::from(target_size.height) - f64::from(texture.height) * scale.y;
        if extra_width != 0.0 || extra_height != 0.0 {
            dest.offset(Point::new(
                round_half_away(extra_width / 2.0),
                round_half_away(extra_height / 2.0),
            ));
        }

        // Keep bitmaps inside whichever of video and window reaches further
        let crop_right = target.right.max(request.window.right);
        let crop_bottom = target.bottom.max(request.window.bottom);
        let pull_back = Point::new(
            -dest.right.saturating_sub(crop_right).max(0),
            -dest.bottom.saturating_sub(crop_bottom).max(0),
        );
        dest.offset(pull_back);
    }

    dest.offset(request.shift);

    Ok(Placement { source, dest })
}
