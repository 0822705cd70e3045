//! JSON scenarios describing one frame placement

use serde::{Deserialize, Serialize};
use std::path::Path;
use subpic_alloc::{FrameAllocator, MemoryBackend, MemorySubPic, SharedFrame};
use subpic_core::{
    AllocatorConfig, Placement, PlacementRequest, Point, Rect, ReferenceTime, Result, Size,
    SubtitleFrame, SubtitleKind,
};
use tracing::{debug, info};

/// Virtual canvas declared by the subtitle renderer
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VirtualTexture {
    pub size: Size,
    #[serde(default)]
    pub top_left: Point,
}

/// What the producer wrote into the frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameContents {
    pub kind: SubtitleKind,
    pub start: ReferenceTime,
    pub stop: ReferenceTime,
    pub dirty_rect: Rect,
    /// Video rectangle within the frame; defaults to the whole frame
    pub video_rect: Option<Rect>,
    pub virtual_texture: Option<VirtualTexture>,
    pub inverse_alpha: bool,
}

/// A complete placement scenario
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub allocator: AllocatorConfig,
    pub frame: FrameContents,
    pub request: PlacementRequest,
    /// Render into a dynamic frame instead of the static one
    pub dynamic: bool,
}

/// Result printed for a scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutput {
    pub size: Size,
    pub video_rect: Rect,
    /// `None` when the frame has nothing to display
    pub placement: Option<Placement>,
}

impl Scenario {
    /// Load a scenario from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let scenario: Scenario = serde_json::from_str(&contents)?;
        scenario.allocator.validate()?;
        debug!("Loaded scenario from {:?}", path);
        Ok(scenario)
    }

    /// Allocate a frame, populate it and compute its placement
    pub fn run(&self) -> Result<ScenarioOutput> {
        let backend = MemoryBackend::new(self.allocator.max_size());
        let allocator = FrameAllocator::new(backend, &self.allocator);
        if let Some(video_rect) = self.frame.video_rect {
            allocator.set_cur_vid_rect(video_rect);
        }

        if self.dynamic {
            let mut frame = allocator.alloc_dynamic()?;
            self.populate(&mut frame);
            Self::place(&frame, &self.request)
        } else {
            let shared = allocator.get_static()?;
            self.place_shared(&shared)
        }
    }

    /// Populate and place a shared frame, recovering it if a previous holder panicked
    fn place_shared(&self, shared: &SharedFrame<MemorySubPic>) -> Result<ScenarioOutput> {
        let mut frame = shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.populate(&mut *frame);
        Self::place(&*frame, &self.request)
    }

    fn populate(&self, frame: &mut dyn SubtitleFrame) {
        let contents = &self.frame;
        frame.set_kind(contents.kind);
        frame.set_start(contents.start);
        frame.set_stop(contents.stop);
        frame.set_inverse_alpha(contents.inverse_alpha);
        if let Some(texture) = contents.virtual_texture {
            frame.set_virtual_texture_size(texture.size, texture.top_left);
        }
        frame.set_dirty_rect(contents.dirty_rect);
    }

    fn place(frame: &dyn SubtitleFrame, request: &PlacementRequest) -> Result<ScenarioOutput> {
        let placement = match frame.source_and_dest(request) {
            Ok(placement) => Some(placement),
            Err(e) if e.is_nothing_to_display() => {
                info!("Dirty rectangle is empty, skipping frame");
                None
            }
            Err(e) => return Err(e),
        };

        Ok(ScenarioOutput {
            size: frame.size(),
            video_rect: frame.video_rect(),
            placement,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use std::thread;
    use subpic_core::Error;
    use tempfile::NamedTempFile;

    const HDMV_SCENARIO: &str = r#"{
        "allocator": { "width": 1920, "height": 1080, "max_width": 1920, "max_height": 1080 },
        "frame": {
            "kind": "hdmv",
            "start": 10000000,
            "stop": 30000000,
            "dirty_rect": { "left": 760, "top": 900, "right": 1160, "bottom": 1000 }
        },
        "request": {
            "window": { "left": 0, "top": 0, "right": 1024, "bottom": 768 },
            "video": { "left": 0, "top": 0, "right": 1024, "bottom": 768 },
            "use_special_case": true
        }
    }"#;

    fn write_scenario(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_and_run_static() {
        let file = write_scenario(HDMV_SCENARIO);
        let scenario = Scenario::load(file.path()).unwrap();
        assert_eq!(scenario.frame.kind, SubtitleKind::Hdmv);

        let output = scenario.run().unwrap();
        assert_eq!(output.size, Size::new(1920, 1080));
        let placement = output.placement.unwrap();
        assert_eq!(placement.source, Rect::new(760, 900, 1160, 1000));
        assert_eq!(placement.dest, Rect::new(369, 640, 654, 711));
    }

    #[test]
    fn test_run_dynamic_matches_static() {
        let file = write_scenario(HDMV_SCENARIO);
        let mut scenario = Scenario::load(file.path()).unwrap();
        let from_static = scenario.run().unwrap();
        scenario.dynamic = true;
        let from_dynamic = scenario.run().unwrap();
        assert_eq!(from_static.placement, from_dynamic.placement);
    }

    #[test]
    fn test_empty_dirty_rect_yields_no_placement() {
        let scenario = Scenario::default();
        let output = scenario.run().unwrap();
        assert!(output.placement.is_none());
        assert_eq!(output.size, Size::new(1920, 1080));
    }

    #[test]
    fn test_oversized_request_is_clamped() {
        let mut scenario = Scenario::default();
        scenario.allocator = AllocatorConfig::new()
            .with_size(1920, 1080)
            .with_max_size(1280, 720);
        scenario.frame.dirty_rect = Rect::new(0, 0, 1280, 720);
        scenario.request = PlacementRequest::new(Rect::new(0, 0, 640, 360), Rect::default());

        let output = scenario.run().unwrap();
        assert_eq!(output.size, Size::new(1280, 720));
        assert_eq!(output.video_rect, Rect::new(0, 0, 1280, 720));
        assert_eq!(output.placement.unwrap().dest, Rect::new(0, 0, 640, 360));
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let file = write_scenario(r#"{ "allocator": { "width": 0 } }"#);
        assert!(matches!(Scenario::load(file.path()), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let file = write_scenario("{ not json");
        assert!(matches!(Scenario::load(file.path()), Err(Error::Json(_))));
    }

    #[test]
    fn test_poisoned_static_frame_is_recovered() {
        let file = write_scenario(HDMV_SCENARIO);
        let scenario = Scenario::load(file.path()).unwrap();

        let mut frame = MemorySubPic::new(Size::new(1920, 1080), true).unwrap();
        frame.set_size(Size::new(1920, 1080), Rect::new(0, 0, 1920, 1080));
        let shared = Arc::new(Mutex::new(frame));

        let holder = Arc::clone(&shared);
        let result = thread::spawn(move || {
            let _guard = holder.lock().unwrap();
            panic!("compositor died holding the frame");
        })
        .join();
        assert!(result.is_err());
        assert!(shared.is_poisoned());

        let output = scenario.place_shared(&shared).unwrap();
        assert_eq!(output.placement.unwrap().dest, Rect::new(369, 640, 654, 711));
    }
}
