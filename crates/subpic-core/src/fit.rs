//! Size fitting against an allocator-imposed maximum

use crate::geometry::{mul_div, Rect, Size};

/// Outcome of [`fit_size`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FittedSize {
    pub size: Size,
    pub video_rect: Rect,
    /// Whether the requested size exceeded the maximum
    pub clamped: bool,
}

/// Clamp `requested` to `max_size` keeping its aspect ratio, and rescale the
/// video rectangle when clamping happened.
///
/// The video rectangle's `top`/`bottom` follow the width ratio and
/// `left`/`right` follow the height ratio. Edges whose scale has a zero
/// denominator are kept as given.
pub fn fit_size(requested: Size, requested_video_rect: Rect, max_size: Size) -> FittedSize {
    let mut size = requested;
    let mut video_rect = requested_video_rect;

    if size.width > max_size.width {
        size.height = mul_div(size.height, max_size.width, size.width).unwrap_or(size.height);
        size.width = max_size.width;
    }

    if size.height > max_size.height {
        size.width = mul_div(size.width, max_size.height, size.height).unwrap_or(size.width);
        size.height = max_size.height;
    }

    let clamped = size != requested;
    if clamped {
        let by_width = |edge: i32| mul_div(edge, size.width, requested.width).unwrap_or(edge);
        let by_height = |edge: i32| mul_div(edge, size.height, requested.height).unwrap_or(edge);

        video_rect.top = by_width(video_rect.top);
        video_rect.bottom = by_width(video_rect.bottom);
        video_rect.left = by_height(video_rect.left);
        video_rect.right = by_height(video_rect.right);
    }

    FittedSize {
        size,
        video_rect,
        clamped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_within_max_is_passthrough() {
        let video = Rect::new(3, 7, 600, 400);
        let fitted = fit_size(Size::new(640, 480), video, Size::new(1920, 1080));
        assert!(!fitted.clamped);
        assert_eq!(fitted.size, Size::new(640, 480));
        assert_eq!(fitted.video_rect, video);

        let exact = fit_size(Size::new(1920, 1080), video, Size::new(1920, 1080));
        assert!(!exact.clamped);
        assert_eq!(exact.video_rect, video);
    }

    #[test]
    fn test_fit_width_bound() {
        let fitted = fit_size(
            Size::new(1920, 1080),
            Rect::new(0, 0, 1920, 1080),
            Size::new(1280, 720),
        );
        assert!(fitted.clamped);
        assert_eq!(fitted.size, Size::new(1280, 720));
        assert_eq!(fitted.video_rect, Rect::new(0, 0, 1280, 720));
    }

    #[test]
    fn test_fit_height_bound() {
        let fitted = fit_size(
            Size::new(720, 1280),
            Rect::new(0, 0, 720, 1280),
            Size::new(1920, 640),
        );
        assert_eq!(fitted.size, Size::new(360, 640));
    }

    #[test]
    fn test_fit_both_bounds() {
        // Width clamp leaves the height above its ceiling too
        let fitted = fit_size(
            Size::new(2000, 2000),
            Rect::new(0, 0, 2000, 2000),
            Size::new(1000, 500),
        );
        assert_eq!(fitted.size, Size::new(500, 500));
    }

    #[test]
    fn test_video_rect_axis_pairing() {
        // Width ratio 1/2, height ratio 2/3: bottom follows width, right follows height
        let fitted = fit_size(Size::new(1000, 3), Rect::new(0, 0, 1000, 3), Size::new(500, 10));
        assert_eq!(fitted.size, Size::new(500, 2));
        assert_eq!(fitted.video_rect, Rect::new(0, 0, 667, 2));
    }

    #[test]
    fn test_never_exceeds_max() {
        let max = Size::new(1280, 720);
        for (w, h) in [(4096, 100), (100, 4096), (1281, 721), (3840, 2160), (1, 5000)] {
            let fitted = fit_size(Size::new(w, h), Rect::from_size(Size::new(w, h)), max);
            assert!(fitted.size.width <= max.width, "width for {}x{}", w, h);
            assert!(fitted.size.height <= max.height, "height for {}x{}", w, h);
        }
    }

    #[test]
    fn test_zero_height_request_keeps_edges() {
        let fitted = fit_size(Size::new(4000, 0), Rect::new(10, 0, 20, 0), Size::new(2000, 100));
        assert_eq!(fitted.size, Size::new(2000, 0));
        // left/right scale by height, which has a zero denominator
        assert_eq!(fitted.video_rect, Rect::new(10, 0, 20, 0));
    }
}
