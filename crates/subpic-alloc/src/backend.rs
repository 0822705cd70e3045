//! Frame creation backends

use std::fmt;
use subpic_core::SubtitleFrame;

/// Creates frames for the allocator
///
/// Returning `None` signals that the surface could not be created; the
/// allocator reports it as out of memory.
pub trait FrameBackend {
    type Frame: SubtitleFrame + Send;

    /// Create a frame. `is_static` is set for the allocator's cached frame.
    fn alloc(&self, is_static: bool) -> Option<Self::Frame>;
}

impl<F, T> FrameBackend for F
where
    F: Fn(bool) -> Option<T>,
    T: SubtitleFrame + Send,
{
    type Frame = T;

    fn alloc(&self, is_static: bool) -> Option<T> {
        self(is_static)
    }
}

/// Opaque handle to the rendering device frames are created on
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceHandle(pub u64);

impl fmt::Debug for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeviceHandle({:#x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subpic_core::{Size, SubPic};

    #[test]
    fn test_closure_backend() {
        let backend = |is_static: bool| is_static.then(|| SubPic::new(Size::new(64, 64)));
        assert!(backend.alloc(true).is_some());
        assert!(backend.alloc(false).is_none());
    }

    #[test]
    fn test_device_handle_debug() {
        assert_eq!(format!("{:?}", DeviceHandle(255)), "DeviceHandle(0xff)");
    }
}
