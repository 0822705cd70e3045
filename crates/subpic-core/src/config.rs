//! Configuration types for subpic

use crate::geometry::Size;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Frame allocator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Width new frames are sized to
    pub width: i32,
    /// Height new frames are sized to
    pub height: i32,
    /// Largest frame width the backend will hand out
    pub max_width: i32,
    /// Largest frame height the backend will hand out
    pub max_height: i32,
    /// Dynamic frames are written once and never read back
    pub dynamic_write_only: bool,
    /// Alpha polarity given to newly allocated frames
    pub inverse_alpha: bool,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            max_width: 1920,
            max_height: 1080,
            dynamic_write_only: true,
            inverse_alpha: false,
        }
    }
}

impl AllocatorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: set the current frame size
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Builder pattern: set the maximum frame size
    pub fn with_max_size(mut self, width: i32, height: i32) -> Self {
        self.max_width = width;
        self.max_height = height;
        self
    }

    /// Builder pattern: set the dynamic write-only policy
    pub fn with_dynamic_write_only(mut self, write_only: bool) -> Self {
        self.dynamic_write_only = write_only;
        self
    }

    /// Builder pattern: set alpha polarity
    pub fn with_inverse_alpha(mut self, inverted: bool) -> Self {
        self.inverse_alpha = inverted;
        self
    }

    pub fn cur_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn max_size(&self) -> Size {
        Size::new(self.max_width, self.max_height)
    }

    /// Reject sizes without area
    pub fn validate(&self) -> Result<()> {
        if self.cur_size().is_empty() {
            return Err(Error::Config(format!(
                "frame size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.max_size().is_empty() {
            return Err(Error::Config(format!(
                "maximum frame size must be positive, got {}x{}",
                self.max_width, self.max_height
            )));
        }
        Ok(())
    }
}
