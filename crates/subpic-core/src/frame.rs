//! Subtitle frame state and the capability trait backends implement
//!
//! A frame carries its timing, dirty rectangle and its own coordinate space.
//! Backends own the pixel storage; everything geometric lives in
//! [`FrameState`] and is reached through [`SubtitleFrame`].

use crate::fit::fit_size;
use crate::geometry::{Point, Rect, Size};
use crate::kind::SubtitleKind;
use crate::mapper::{map_source_and_dest, Placement, PlacementRequest};
use crate::Result;
use tracing::debug;

/// Presentation timestamp in 100 ns units
pub type ReferenceTime = i64;

/// Geometry and timing shared by every frame backend
#[derive(Debug, Clone, PartialEq)]
pub struct FrameState {
    pub(crate) start: ReferenceTime,
    pub(crate) stop: ReferenceTime,
    pub(crate) segment_start: Option<ReferenceTime>,
    pub(crate) segment_stop: Option<ReferenceTime>,
    pub(crate) dirty_rect: Rect,
    pub(crate) size: Size,
    pub(crate) max_size: Size,
    pub(crate) video_rect: Rect,
    pub(crate) virtual_texture_size: Size,
    pub(crate) virtual_texture_top_left: Point,
    pub(crate) kind: SubtitleKind,
    pub(crate) inverse_alpha: bool,
}

impl FrameState {
    /// Create an empty frame state whose size can never exceed `max_size`
    pub fn new(max_size: Size) -> Self {
        Self {
            start: 0,
            stop: 0,
            segment_start: None,
            segment_stop: None,
            dirty_rect: Rect::default(),
            size: Size::default(),
            max_size,
            video_rect: Rect::default(),
            virtual_texture_size: Size::default(),
            virtual_texture_top_left: Point::default(),
            kind: SubtitleKind::default(),
            inverse_alpha: false,
        }
    }
}

/// Capability set of a subtitle frame
///
/// Implementors only provide access to their [`FrameState`]; timing, size
/// fitting and placement are shared default methods.
pub trait SubtitleFrame {
    fn state(&self) -> &FrameState;

    fn state_mut(&mut self) -> &mut FrameState;

    fn start(&self) -> ReferenceTime {
        self.state().start
    }

    fn set_start(&mut self, start: ReferenceTime) {
        self.state_mut().start = start;
    }

    fn stop(&self) -> ReferenceTime {
        self.state().stop
    }

    fn set_stop(&mut self, stop: ReferenceTime) {
        self.state_mut().stop = stop;
    }

    /// Segment start, falling back to [`start`](Self::start) when unset
    fn segment_start(&self) -> ReferenceTime {
        self.state().segment_start.unwrap_or(self.state().start)
    }

    fn set_segment_start(&mut self, start: Option<ReferenceTime>) {
        self.state_mut().segment_start = start;
    }

    /// Segment stop, falling back to [`stop`](Self::stop) when unset
    fn segment_stop(&self) -> ReferenceTime {
        self.state().segment_stop.unwrap_or(self.state().stop)
    }

    fn set_segment_stop(&mut self, stop: Option<ReferenceTime>) {
        self.state_mut().segment_stop = stop;
    }

    /// Set the segment start from a producer that marks "unset" with a negative value
    fn set_segment_start_raw(&mut self, start: ReferenceTime) {
        self.set_segment_start((start >= 0).then_some(start));
    }

    /// Set the segment stop from a producer that marks "unset" with a negative value
    fn set_segment_stop_raw(&mut self, stop: ReferenceTime) {
        self.set_segment_stop((stop >= 0).then_some(stop));
    }

    /// Region written since the last clear, in virtual texture coordinates
    fn dirty_rect(&self) -> Rect {
        self.state().dirty_rect
    }

    fn set_dirty_rect(&mut self, rect: Rect) {
        self.state_mut().dirty_rect = rect;
    }

    fn size(&self) -> Size {
        self.state().size
    }

    fn max_size(&self) -> Size {
        self.state().max_size
    }

    fn video_rect(&self) -> Rect {
        self.state().video_rect
    }

    /// Resize the frame, clamping to [`max_size`](Self::max_size).
    ///
    /// Resets the virtual texture size to the resulting size.
    fn set_size(&mut self, size: Size, video_rect: Rect) {
        let state = self.state_mut();
        let fitted = fit_size(size, video_rect, state.max_size);
        if fitted.clamped {
            debug!(
                "Clamped frame size {}x{} to {}x{}",
                size.width, size.height, fitted.size.width, fitted.size.height
            );
        }

        state.size = fitted.size;
        state.video_rect = fitted.video_rect;
        state.virtual_texture_size = fitted.size;
    }

    fn virtual_texture_size(&self) -> Size {
        self.state().virtual_texture_size
    }

    fn virtual_texture_top_left(&self) -> Point {
        self.state().virtual_texture_top_left
    }

    /// Declare the logical canvas the frame's coordinates refer to
    fn set_virtual_texture_size(&mut self, size: Size, top_left: Point) {
        let state = self.state_mut();
        state.virtual_texture_size = size;
        state.virtual_texture_top_left = top_left;
    }

    fn kind(&self) -> SubtitleKind {
        self.state().kind
    }

    fn set_kind(&mut self, kind: SubtitleKind) {
        self.state_mut().kind = kind;
    }

    fn inverse_alpha(&self) -> bool {
        self.state().inverse_alpha
    }

    fn set_inverse_alpha(&mut self, inverted: bool) {
        self.state_mut().inverse_alpha = inverted;
    }

    /// Copy timing, dirty rect, size, virtual texture geometry and alpha
    /// polarity onto `other`.
    ///
    /// The size goes through `other`'s own [`set_size`](Self::set_size), so
    /// its maximum applies. The subtitle kind is left untouched.
    fn copy_to(&self, other: &mut dyn SubtitleFrame) {
        let state = self.state();
        other.set_start(state.start);
        other.set_stop(state.stop);
        other.set_segment_start(state.segment_start);
        other.set_segment_stop(state.segment_stop);
        other.set_dirty_rect(state.dirty_rect);
        other.set_size(state.size, state.video_rect);
        other.set_virtual_texture_size(state.virtual_texture_size, state.virtual_texture_top_left);
        other.set_inverse_alpha(state.inverse_alpha);
    }

    /// Source rectangle in frame space and destination rectangle in display
    /// space for the current dirty region.
    ///
    /// Fails with [`Error::NothingToDisplay`](crate::Error::NothingToDisplay)
    /// when the dirty rectangle is empty.
    fn source_and_dest(&self, request: &PlacementRequest) -> Result<Placement> {
        map_source_and_dest(self.state(), request)
    }
}

/// Frame with no backing storage, used where only geometry matters
#[derive(Debug, Clone, PartialEq)]
pub struct SubPic {
    state: FrameState,
}

impl SubPic {
    pub fn new(max_size: Size) -> Self {
        Self {
            state: FrameState::new(max_size),
        }
    }
}

impl SubtitleFrame for SubPic {
    fn state(&self) -> &FrameState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FrameState {
        &mut self.state
    }
}
