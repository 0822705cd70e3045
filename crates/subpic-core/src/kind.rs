//! Subtitle origin formats

use serde::{Deserialize, Serialize};

/// Origin format of a subtitle frame
///
/// Bitmap formats authored at a fixed resolution get letterboxed placement
/// instead of an independent per-axis stretch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubtitleKind {
    /// Text subtitles rendered by the subtitle renderer (SRT, ASS, ...)
    #[default]
    Text,
    /// Blu-ray presentation graphics (PGS)
    Hdmv,
    /// DVB bitmap subtitles
    Dvb,
    /// Pre-rendered bitmap subpicture handed over by an external filter
    BitmapSubpic,
}

impl SubtitleKind {
    pub fn is_text(&self) -> bool {
        matches!(self, SubtitleKind::Text)
    }

    /// Formats eligible for aspect-preserving placement
    pub fn is_bitmap(&self) -> bool {
        matches!(
            self,
            SubtitleKind::Hdmv | SubtitleKind::Dvb | SubtitleKind::BitmapSubpic
        )
    }
}

impl std::str::FromStr for SubtitleKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(SubtitleKind::Text),
            "hdmv" | "pgs" => Ok(SubtitleKind::Hdmv),
            "dvb" => Ok(SubtitleKind::Dvb),
            "bitmap-subpic" | "xysubpic" => Ok(SubtitleKind::BitmapSubpic),
            _ => Err(format!(
                "Invalid subtitle kind: {}. Use: text, hdmv, dvb, bitmap-subpic",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("text".parse::<SubtitleKind>().unwrap(), SubtitleKind::Text);
        assert_eq!("PGS".parse::<SubtitleKind>().unwrap(), SubtitleKind::Hdmv);
        assert_eq!("dvb".parse::<SubtitleKind>().unwrap(), SubtitleKind::Dvb);
        assert_eq!(
            "xysubpic".parse::<SubtitleKind>().unwrap(),
            SubtitleKind::BitmapSubpic
        );
        assert!("vobsub2".parse::<SubtitleKind>().is_err());
    }

    #[test]
    fn test_kind_classes() {
        assert!(SubtitleKind::Text.is_text());
        assert!(!SubtitleKind::Text.is_bitmap());
        assert!(SubtitleKind::Hdmv.is_bitmap());
        assert!(SubtitleKind::Dvb.is_bitmap());
        assert!(SubtitleKind::BitmapSubpic.is_bitmap());
    }

    #[test]
    fn test_kind_serde_names() {
        let json = serde_json::to_string(&SubtitleKind::BitmapSubpic).unwrap();
        assert_eq!(json, "\"bitmap-subpic\"");
        let kind: SubtitleKind = serde_json::from_str("\"hdmv\"").unwrap();
        assert_eq!(kind, SubtitleKind::Hdmv);
    }
}
