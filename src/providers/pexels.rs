//! Pexels-style stock media client.
//!
//! Authenticates with the raw API key in the Authorization header. Photo
//! responses carry a rendition table per item; video responses carry a flat
//! file list with no resolution discrimination, so the first entry serves as
//! both thumbnail and full URL.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::{title_or_keyword, MediaProvider, PAGE_SIZE};
use crate::types::{ClipError, MediaItem, MediaKind, MediaSource};

const PHOTO_API_URL: &str = "https://api.pexels.com/v1/search";
const VIDEO_API_URL: &str = "https://api.pexels.com/videos/search";

pub struct PexelsProvider {
    api_key: String,
    client: Client,
}

impl PexelsProvider {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .user_agent(concat!("clipscout/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(15))
            .build()
            .expect("Failed to create HTTP client");
        Self { api_key, client }
    }
}

#[async_trait]
impl MediaProvider for PexelsProvider {
    async fn search(&self, keyword: &str, kind: MediaKind) -> Result<Vec<MediaItem>, ClipError> {
        let base = match kind {
            MediaKind::Image => PHOTO_API_URL,
            MediaKind::Video => VIDEO_API_URL,
        };
        let page = PAGE_SIZE.to_string();
        let response = self
            .client
            .get(base)
            .header("Authorization", &self.api_key)
            .query(&[("query", keyword), ("per_page", page.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClipError::Api {
                provider: "pexels",
                status: status.as_u16(),
            });
        }

        match kind {
            MediaKind::Image => {
                let data: PhotoResponse =
                    response.json().await.map_err(|e| ClipError::Malformed {
                        provider: "pexels",
                        reason: e.to_string(),
                    })?;
                Ok(data
                    .photos
                    .into_iter()
                    .map(|photo| item_from_photo(photo, keyword))
                    .collect())
            }
            MediaKind::Video => {
                let data: VideoResponse =
                    response.json().await.map_err(|e| ClipError::Malformed {
                        provider: "pexels",
                        reason: e.to_string(),
                    })?;
                Ok(data
                    .videos
                    .into_iter()
                    .filter_map(|video| item_from_video(video, keyword))
                    .collect())
            }
        }
    }

    fn source(&self) -> MediaSource {
        MediaSource::Pexels
    }

    fn is_available(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

fn item_from_photo(photo: Photo, keyword: &str) -> MediaItem {
    MediaItem {
        id: photo.id.to_string(),
        thumbnail: photo.src.medium,
        url: photo.src.original,
        title: title_or_keyword(photo.alt.as_deref().unwrap_or(""), keyword),
        source: MediaSource::Pexels,
        kind: MediaKind::Image,
    }
}

// A video with no files at all cannot be rendered; skip it.
fn item_from_video(video: Video, keyword: &str) -> Option<MediaItem> {
    let file = video.video_files.into_iter().next()?;
    Some(MediaItem {
        id: video.id.to_string(),
        thumbnail: file.link.clone(),
        url: file.link,
        title: keyword.to_string(),
        source: MediaSource::Pexels,
        kind: MediaKind::Video,
    })
}

#[derive(Debug, serde::Deserialize)]
struct PhotoResponse {
    photos: Vec<Photo>,
}

#[derive(Debug, serde::Deserialize)]
struct Photo {
    id: u64,
    #[serde(default)]
    alt: Option<String>,
    src: PhotoRenditions,
}

#[derive(Debug, serde::Deserialize)]
struct PhotoRenditions {
    medium: String,
    original: String,
}

#[derive(Debug, serde::Deserialize)]
struct VideoResponse {
    videos: Vec<Video>,
}

#[derive(Debug, serde::Deserialize)]
struct Video {
    id: u64,
    #[serde(default)]
    video_files: Vec<VideoFile>,
}

#[derive(Debug, serde::Deserialize)]
struct VideoFile {
    link: String,
}
