//! Static and dynamic frame allocation
//!
//! The allocator caches one static frame that producers rewrite in place as
//! long as the current size does not change. Dynamic frames are created fresh
//! on every request and belong to the caller.

use crate::backend::{DeviceHandle, FrameBackend};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockWriteGuard};
use subpic_core::{fit_size, AllocatorConfig, Error, Rect, Result, Size, SubtitleFrame};
use tracing::{debug, warn};

/// A frame shared between the allocator and its users
///
/// Dropping the allocator's handle does not free the frame while another
/// holder still references it.
pub type SharedFrame<F> = Arc<Mutex<F>>;

/// Size and video rectangle applied to frames on their way out
#[derive(Debug, Clone, Copy)]
struct CurrentGeometry {
    size: Size,
    video_rect: Rect,
}

/// The cached static frame with the geometry last applied to it
///
/// Kept next to the handle so the slot lock never has to take the frame lock.
struct StaticSlot<F> {
    frame: SharedFrame<F>,
    size: Size,
    max_size: Size,
}

/// Frame allocator with a cached static frame
pub struct FrameAllocator<B: FrameBackend> {
    backend: B,
    current: RwLock<CurrentGeometry>,
    dynamic_write_only: bool,
    inverse_alpha: AtomicBool,
    /// Guards only the check-and-replace of the cached frame
    static_frame: Mutex<Option<StaticSlot<B::Frame>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(rwlock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    rwlock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<B: FrameBackend> FrameAllocator<B> {
    /// Create an allocator sized from `config`, with the video rectangle
    /// covering the whole frame.
    pub fn new(backend: B, config: &AllocatorConfig) -> Self {
        let size = config.cur_size();
        Self {
            backend,
            current: RwLock::new(CurrentGeometry {
                size,
                video_rect: Rect::from_size(size),
            }),
            dynamic_write_only: config.dynamic_write_only,
            inverse_alpha: AtomicBool::new(config.inverse_alpha),
            static_frame: Mutex::new(None),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn current(&self) -> CurrentGeometry {
        *self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Size new frames are created at
    pub fn cur_size(&self) -> Size {
        self.current().size
    }

    pub fn set_cur_size(&self, size: Size) {
        write(&self.current).size = size;
    }

    /// Video content rectangle applied to new frames
    pub fn cur_vid_rect(&self) -> Rect {
        self.current().video_rect
    }

    pub fn set_cur_vid_rect(&self, rect: Rect) {
        write(&self.current).video_rect = rect;
    }

    /// Whether dynamic frames are write-then-discard
    pub fn is_dynamic_write_only(&self) -> bool {
        self.dynamic_write_only
    }

    pub fn inverse_alpha(&self) -> bool {
        self.inverse_alpha.load(Ordering::Relaxed)
    }

    /// Alpha polarity given to frames allocated from now on
    pub fn set_inverse_alpha(&self, inverted: bool) {
        self.inverse_alpha.store(inverted, Ordering::Relaxed);
    }

    /// Whether a static frame is currently cached
    pub fn has_static(&self) -> bool {
        lock(&self.static_frame).is_some()
    }

    fn allocate(&self, is_static: bool) -> Result<B::Frame> {
        let Some(mut frame) = self.backend.alloc(is_static) else {
            warn!(
                "Backend failed to allocate {} frame",
                if is_static { "static" } else { "dynamic" }
            );
            return Err(Error::OutOfMemory);
        };
        frame.set_inverse_alpha(self.inverse_alpha());
        Ok(frame)
    }

    /// Return the cached static frame, replacing it when the current size
    /// changed, sized to the current geometry.
    pub fn get_static(&self) -> Result<SharedFrame<B::Frame>> {
        let current = self.current();

        let frame = {
            let mut slot = lock(&self.static_frame);

            let stale = slot.as_ref().is_some_and(|cached| {
                // Compare with what set_size would produce so clamped frames are kept
                let expected = fit_size(current.size, current.video_rect, cached.max_size).size;
                cached.size != expected
            });
            if stale {
                debug!(
                    "Discarding static frame, size changed to {}x{}",
                    current.size.width, current.size.height
                );
                *slot = None;
            }

            match slot.as_ref() {
                Some(cached) => Arc::clone(&cached.frame),
                None => {
                    let fresh = self.allocate(true)?;
                    let cached = StaticSlot {
                        size: fresh.size(),
                        max_size: fresh.max_size(),
                        frame: Arc::new(Mutex::new(fresh)),
                    };
                    let frame = Arc::clone(&cached.frame);
                    *slot = Some(cached);
                    frame
                }
            }
        };

        let applied = {
            let mut guard = lock(&frame);
            guard.set_size(current.size, current.video_rect);
            guard.size()
        };

        // The slot may have been reset or replaced while the frame was being sized
        if let Some(cached) = lock(&self.static_frame).as_mut() {
            if Arc::ptr_eq(&cached.frame, &frame) {
                cached.size = applied;
            }
        }

        Ok(frame)
    }

    /// Allocate a new frame owned by the caller, sized to the current geometry
    pub fn alloc_dynamic(&self) -> Result<B::Frame> {
        let current = self.current();
        let mut frame = self.allocate(false)?;
        frame.set_size(current.size, current.video_rect);
        Ok(frame)
    }

    /// Drop the cached static frame
    pub fn reset(&self) {
        let mut slot = lock(&self.static_frame);
        if slot.take().is_some() {
            debug!("Static frame released");
        }
    }

    /// Frames created on the previous device are unusable, so the cache is dropped
    pub fn change_device(&self, device: DeviceHandle) {
        debug!("Device changed to {:?}", device);
        self.reset();
    }
}

impl<B: FrameBackend> std::fmt::Debug for FrameAllocator<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let current = self.current();
        f.debug_struct("FrameAllocator")
            .field("cur_size", &current.size)
            .field("cur_vid_rect", &current.video_rect)
            .field("dynamic_write_only", &self.dynamic_write_only)
            .field("has_static", &self.has_static())
            .finish()
    }
}
