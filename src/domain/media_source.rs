//! テレビ表示用メディアの参照解決（ロゴ別名・相対パス・拡張子判定）。

use crate::domain::entities::TvContentType;
use crate::domain::value_objects::LOCAL_MEDIA_PREFIX;

const LOGO_FILE: &str = "logo-cabinet.svg";
const LOGO_ALIASES: [&str; 5] = [
    "logo",
    "logo-cabinet",
    "cabinet-logo",
    "logo-cabinet.svg",
    "/logo-cabinet.svg",
];

const VIDEO_EXTENSIONS: [&str; 3] = [".mp4", ".webm", ".mov"];
const AUDIO_EXTENSIONS: [&str; 6] = [".mp3", ".wav", ".ogg", ".m4a", ".aac", ".flac"];

pub fn is_absolute_source(value: &str) -> bool {
    ["http://", "https://", "blob:", "data:", LOCAL_MEDIA_PREFIX]
        .iter()
        .any(|prefix| value.starts_with(prefix))
}

/// `asset_root` は末尾 `/` 付きで渡す（`AppConfig` が正規化済み）
pub fn resolve_media_source(
    media: &str,
    content_type: Option<TvContentType>,
    title: Option<&str>,
    asset_root: &str,
) -> String {
    let trimmed = media.trim();
    let logo = format!("{asset_root}{LOGO_FILE}");

    if trimmed.is_empty() {
        let mentions_logo = title
            .map(|t| t.trim().to_lowercase().contains("logo"))
            .unwrap_or(false);
        if content_type == Some(TvContentType::Image) && mentions_logo {
            return logo;
        }
        return String::new();
    }

    if LOGO_ALIASES.contains(&trimmed.to_lowercase().as_str()) {
        return logo;
    }

    if is_absolute_source(trimmed) || trimmed.starts_with('/') {
        return trimmed.to_string();
    }

    format!("{asset_root}{trimmed}")
}

pub fn is_video_media(url: &str) -> bool {
    let lower = url.to_lowercase();
    VIDEO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) || lower.contains("video")
}

pub fn is_audio_media(url: &str) -> bool {
    let lower = url.to_lowercase();
    AUDIO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) || lower.contains("audio")
}
