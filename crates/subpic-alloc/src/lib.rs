//! subpic alloc - Subtitle frame allocation
//!
//! This crate provides the frame allocator that caches a single reusable
//! static frame and hands out exclusively owned dynamic frames, plus the
//! backends that create the frames:
//! - `MemoryBackend` for software surfaces kept in system memory
//! - any closure `Fn(bool) -> Option<F>` for custom surface creation

pub mod allocator;
pub mod backend;
pub mod memory;

pub use allocator::{FrameAllocator, SharedFrame};
pub use backend::{DeviceHandle, FrameBackend};
pub use memory::{MemoryBackend, MemorySubPic};
