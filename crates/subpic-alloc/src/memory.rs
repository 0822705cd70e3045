//! Software frames backed by system memory

use crate::backend::FrameBackend;
use subpic_core::{FrameState, Size, SubtitleFrame};
use tracing::debug;

const BYTES_PER_PIXEL: usize = 4;

/// A subtitle frame with a BGRA pixel store sized to its maximum
pub struct MemorySubPic {
    state: FrameState,
    pixels: Vec<u8>,
    stride: usize,
    is_static: bool,
}

impl MemorySubPic {
    /// Allocate a frame able to hold `max_size` pixels.
    ///
    /// Returns `None` if the size is not representable or memory is exhausted.
    pub fn new(max_size: Size, is_static: bool) -> Option<Self> {
        let width = usize::try_from(max_size.width).ok()?;
        let height = usize::try_from(max_size.height).ok()?;
        let stride = width.checked_mul(BYTES_PER_PIXEL)?;
        let len = stride.checked_mul(height)?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).ok()?;
        pixels.resize(len, 0);

        Some(Self {
            state: FrameState::new(max_size),
            pixels,
            stride,
            is_static,
        })
    }

    /// Raw pixel data in BGRA format
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Bytes per row
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Whether this frame was created as the allocator's static frame
    pub fn is_static(&self) -> bool {
        self.is_static
    }
}

impl SubtitleFrame for MemorySubPic {
    fn state(&self) -> &FrameState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FrameState {
        &mut self.state
    }
}

impl std::fmt::Debug for MemorySubPic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySubPic")
            .field("size", &self.size())
            .field("max_size", &self.max_size())
            .field("is_static", &self.is_static)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// Creates [`MemorySubPic`] frames of a fixed maximum size
#[derive(Debug, Clone, Copy)]
pub struct MemoryBackend {
    max_size: Size,
}

impl MemoryBackend {
    pub fn new(max_size: Size) -> Self {
        Self { max_size }
    }

    pub fn max_size(&self) -> Size {
        self.max_size
    }
}

impl FrameBackend for MemoryBackend {
    type Frame = MemorySubPic;

    fn alloc(&self, is_static: bool) -> Option<MemorySubPic> {
        debug!(
            "Allocating {} memory frame {}x{}",
            if is_static { "static" } else { "dynamic" },
            self.max_size.width,
            self.max_size.height
        );
        MemorySubPic::new(self.max_size, is_static)
    }
}
