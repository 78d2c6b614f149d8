//! Runtime settings.
//!
//! Settings are plain configuration values with no invariants beyond enum
//! membership; they load from an optional TOML file and fall back to
//! defaults field by field.

use std::path::Path;
use std::str::FromStr;

use anyhow::anyhow;
use serde::Deserialize;

use crate::types::{MediaKind, MediaSource};

/// Which stock media providers a search targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceSelection {
    Pixabay,
    Pexels,
    Both,
}

impl SourceSelection {
    pub fn includes(&self, source: MediaSource) -> bool {
        match self {
            SourceSelection::Pixabay => source == MediaSource::Pixabay,
            SourceSelection::Pexels => source == MediaSource::Pexels,
            SourceSelection::Both => true,
        }
    }

    /// Selected providers in the fixed concatenation order.
    pub fn sources(&self) -> Vec<MediaSource> {
        MediaSource::ALL
            .into_iter()
            .filter(|s| self.includes(*s))
            .collect()
    }
}

impl FromStr for SourceSelection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pixabay" => Ok(Self::Pixabay),
            "pexels" => Ok(Self::Pexels),
            "both" | "all" => Ok(Self::Both),
            other => Err(anyhow!(
                "unknown media source `{}` (expected pixabay, pexels, both)",
                other
            )),
        }
    }
}

/// Which media kinds a search requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindSelection {
    Images,
    Videos,
    Both,
}

impl KindSelection {
    pub fn includes(&self, kind: MediaKind) -> bool {
        match self {
            KindSelection::Images => kind == MediaKind::Image,
            KindSelection::Videos => kind == MediaKind::Video,
            KindSelection::Both => true,
        }
    }

    /// Selected kinds in the fixed concatenation order.
    pub fn kinds(&self) -> Vec<MediaKind> {
        MediaKind::ALL
            .into_iter()
            .filter(|k| self.includes(*k))
            .collect()
    }
}

impl FromStr for KindSelection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "images" | "image" => Ok(Self::Images),
            "videos" | "video" => Ok(Self::Videos),
            "both" | "all" => Ok(Self::Both),
            other => Err(anyhow!(
                "unknown media type `{}` (expected images, videos, both)",
                other
            )),
        }
    }
}

/// Output aspect for the planned video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoFormat {
    Portrait,
    Landscape,
}

impl VideoFormat {
    pub fn aspect(&self) -> &'static str {
        match self {
            VideoFormat::Portrait => "9:16",
            VideoFormat::Landscape => "16:9",
        }
    }
}

impl FromStr for VideoFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "portrait" | "9:16" => Ok(Self::Portrait),
            "landscape" | "16:9" => Ok(Self::Landscape),
            other => Err(anyhow!(
                "unknown video format `{}` (expected portrait, landscape)",
                other
            )),
        }
    }
}

/// Language model used for keyword refinement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LanguageModel {
    #[serde(rename = "gemini-1.5-pro")]
    Gemini15Pro,
    #[serde(rename = "gemini-1.5-flash")]
    Gemini15Flash,
}

impl LanguageModel {
    /// Wire identifier sent in the completion request.
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageModel::Gemini15Pro => "gemini-1.5-pro",
            LanguageModel::Gemini15Flash => "gemini-1.5-flash",
        }
    }
}

impl FromStr for LanguageModel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gemini-1.5-pro" | "pro" => Ok(Self::Gemini15Pro),
            "gemini-1.5-flash" | "flash" => Ok(Self::Gemini15Flash),
            other => Err(anyhow!("unknown model `{}`", other)),
        }
    }
}

/// Session settings, loadable from `clipscout.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub source: SourceSelection,
    pub media: KindSelection,
    /// Planned video length in seconds; always positive.
    pub duration_secs: u32,
    pub format: VideoFormat,
    pub model: LanguageModel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: SourceSelection::Both,
            media: KindSelection::Both,
            duration_secs: 30,
            format: VideoFormat::Portrait,
            model: LanguageModel::Gemini15Pro,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file; a missing or unreadable file falls
    /// back to defaults.
    pub fn load(path: &Path) -> Self {
        let mut settings: Settings = std::fs::read_to_string(path)
            .ok()
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default();
        // Zero-length videos make no sense; clamp rather than error.
        if settings.duration_secs == 0 {
            settings.duration_secs = Settings::default().duration_secs;
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_session_start() {
        let settings = Settings::default();
        assert_eq!(settings.source, SourceSelection::Both);
        assert_eq!(settings.media, KindSelection::Both);
        assert_eq!(settings.duration_secs, 30);
        assert_eq!(settings.format, VideoFormat::Portrait);
        assert_eq!(settings.model, LanguageModel::Gemini15Pro);
    }

    #[test]
    fn partial_toml_fills_remaining_fields_with_defaults() {
        let settings: Settings = toml::from_str("source = \"pixabay\"\nduration_secs = 60\n").unwrap();
        assert_eq!(settings.source, SourceSelection::Pixabay);
        assert_eq!(settings.duration_secs, 60);
        assert_eq!(settings.media, KindSelection::Both);
    }

    #[test]
    fn selections_expand_in_fixed_order() {
        use crate::types::{MediaKind, MediaSource};

        assert_eq!(
            SourceSelection::Both.sources(),
            vec![MediaSource::Pixabay, MediaSource::Pexels]
        );
        assert_eq!(SourceSelection::Pexels.sources(), vec![MediaSource::Pexels]);
        assert_eq!(
            KindSelection::Both.kinds(),
            vec![MediaKind::Image, MediaKind::Video]
        );
        assert_eq!(KindSelection::Videos.kinds(), vec![MediaKind::Video]);
    }

    #[test]
    fn from_str_accepts_cli_spellings() {
        assert_eq!(
            "PIXABAY".parse::<SourceSelection>().unwrap(),
            SourceSelection::Pixabay
        );
        assert_eq!("video".parse::<KindSelection>().unwrap(), KindSelection::Videos);
        assert_eq!("9:16".parse::<VideoFormat>().unwrap(), VideoFormat::Portrait);
        assert!("betamax".parse::<SourceSelection>().is_err());
    }

    #[test]
    fn zero_duration_is_clamped_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clipscout.toml");
        std::fs::write(&path, "duration_secs = 0\n").unwrap();
        assert_eq!(Settings::load(&path).duration_secs, 30);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/clipscout.toml"));
        assert_eq!(settings.duration_secs, 30);
    }
}
