//! Pixabay-style stock media client.
//!
//! Image and video search live on separate endpoints; the API key travels as
//! a query parameter. Image hits expose direct rendition URLs, video hits a
//! nested rendition table.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use super::{title_or_keyword, MediaProvider, PAGE_SIZE};
use crate::types::{ClipError, MediaItem, MediaKind, MediaSource};

const IMAGE_API_URL: &str = "https://pixabay.com/api/";
const VIDEO_API_URL: &str = "https://pixabay.com/api/videos/";

pub struct PixabayProvider {
    api_key: String,
    client: Client,
}

impl PixabayProvider {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .user_agent(concat!("clipscout/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(15))
            .build()
            .expect("Failed to create HTTP client");
        Self { api_key, client }
    }

    fn endpoint(&self, kind: MediaKind, keyword: &str) -> Url {
        let base = match kind {
            MediaKind::Image => IMAGE_API_URL,
            MediaKind::Video => VIDEO_API_URL,
        };
        let page = PAGE_SIZE.to_string();
        Url::parse_with_params(
            base,
            [
                ("key", self.api_key.as_str()),
                ("q", keyword),
                ("per_page", page.as_str()),
            ],
        )
        .expect("static pixabay endpoint must parse")
    }
}

#[async_trait]
impl MediaProvider for PixabayProvider {
    async fn search(&self, keyword: &str, kind: MediaKind) -> Result<Vec<MediaItem>, ClipError> {
        let response = self.client.get(self.endpoint(kind, keyword)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClipError::Api {
                provider: "pixabay",
                status: status.as_u16(),
            });
        }

        match kind {
            MediaKind::Image => {
                let data: ImageResponse =
                    response.json().await.map_err(|e| ClipError::Malformed {
                        provider: "pixabay",
                        reason: e.to_string(),
                    })?;
                Ok(data
                    .hits
                    .into_iter()
                    .map(|hit| item_from_image_hit(hit, keyword))
                    .collect())
            }
            MediaKind::Video => {
                let data: VideoResponse =
                    response.json().await.map_err(|e| ClipError::Malformed {
                        provider: "pixabay",
                        reason: e.to_string(),
                    })?;
                Ok(data
                    .hits
                    .into_iter()
                    .map(|hit| item_from_video_hit(hit, keyword))
                    .collect())
            }
        }
    }

    fn source(&self) -> MediaSource {
        MediaSource::Pixabay
    }

    fn is_available(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

fn item_from_image_hit(hit: ImageHit, keyword: &str) -> MediaItem {
    MediaItem {
        id: hit.id.to_string(),
        thumbnail: hit.webformat_url,
        url: hit.large_image_url,
        title: title_or_keyword(&hit.tags, keyword),
        source: MediaSource::Pixabay,
        kind: MediaKind::Image,
    }
}

fn item_from_video_hit(hit: VideoHit, keyword: &str) -> MediaItem {
    MediaItem {
        id: hit.id.to_string(),
        thumbnail: hit.videos.tiny.url,
        url: hit.videos.large.url,
        title: title_or_keyword(&hit.tags, keyword),
        source: MediaSource::Pixabay,
        kind: MediaKind::Video,
    }
}

#[derive(Debug, serde::Deserialize)]
struct ImageResponse {
    hits: Vec<ImageHit>,
}

#[derive(Debug, serde::Deserialize)]
struct ImageHit {
    id: u64,
    #[serde(default)]
    tags: String,
    #[serde(rename = "webformatURL")]
    webformat_url: String,
    #[serde(rename = "largeImageURL")]
    large_image_url: String,
}

#[derive(Debug, serde::Deserialize)]
struct VideoResponse {
    hits: Vec<VideoHit>,
}

#[derive(Debug, serde::Deserialize)]
struct VideoHit {
    id: u64,
    #[serde(default)]
    tags: String,
    videos: VideoRenditions,
}

#[derive(Debug, serde::Deserialize)]
struct VideoRenditions {
    tiny: Rendition,
    large: Rendition,
}

#[derive(Debug, serde::Deserialize)]
struct Rendition {
    url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_availability_tracks_the_key() {
        assert!(PixabayProvider::new("px-key".to_string()).is_available());
        assert!(!PixabayProvider::new(String::new()).is_available());
    }

    #[test]
    fn endpoint_carries_key_query_and_page_size() {
        let provider = PixabayProvider::new("px-key".to_string());
        let url = provider.endpoint(MediaKind::Video, "city lights");
        assert!(url.as_str().starts_with(VIDEO_API_URL));
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert!(pairs.contains(&("key".to_string(), "px-key".to_string())));
        assert!(pairs.contains(&("q".to_string(), "city lights".to_string())));
        assert!(pairs.contains(&("per_page".to_string(), "3".to_string())));
    }

    #[test]
    fn image_hit_maps_webformat_and_large_image() {
        let json = r#"{
            "hits": [
                {
                    "id": 195893,
                    "tags": "blossom, bloom, flower",
                    "webformatURL": "https://pixabay.com/get/35bbf209e13e39d2_640.jpg",
                    "largeImageURL": "https://pixabay.com/get/ed6a99fd0a76647_1280.jpg"
                }
            ]
        }"#;

        let response: ImageResponse = serde_json::from_str(json).unwrap();
        let item = item_from_image_hit(response.hits.into_iter().next().unwrap(), "flowers");
        assert_eq!(item.id, "195893");
        assert_eq!(item.thumbnail, "https://pixabay.com/get/35bbf209e13e39d2_640.jpg");
        assert_eq!(item.url, "https://pixabay.com/get/ed6a99fd0a76647_1280.jpg");
        assert_eq!(item.title, "blossom, bloom, flower");
        assert_eq!(item.source, MediaSource::Pixabay);
        assert_eq!(item.kind, MediaKind::Image);
    }

    #[test]
    fn video_hit_maps_tiny_and_large_renditions() {
        let json = r#"{
            "hits": [
                {
                    "id": 125,
                    "tags": "",
                    "videos": {
                        "large": { "url": "https://cdn.pixabay.com/video/large.mp4" },
                        "tiny": { "url": "https://cdn.pixabay.com/video/tiny.mp4" }
                    }
                }
            ]
        }"#;

        let response: VideoResponse = serde_json::from_str(json).unwrap();
        let item = item_from_video_hit(response.hits.into_iter().next().unwrap(), "ocean");
        assert_eq!(item.thumbnail, "https://cdn.pixabay.com/video/tiny.mp4");
        assert_eq!(item.url, "https://cdn.pixabay.com/video/large.mp4");
        // Empty tags fall back to the keyword.
        assert_eq!(item.title, "ocean");
        assert_eq!(item.kind, MediaKind::Video);
    }

    #[test]
    fn missing_tags_field_defaults_to_empty() {
        let json = r#"{
            "hits": [
                {
                    "id": 1,
                    "webformatURL": "https://example.com/tn.jpg",
                    "largeImageURL": "https://example.com/full.jpg"
                }
            ]
        }"#;

        let response: ImageResponse = serde_json::from_str(json).unwrap();
        let item = item_from_image_hit(response.hits.into_iter().next().unwrap(), "fallback");
        assert_eq!(item.title, "fallback");
    }
}
