use std::fmt;

pub const LOCAL_MEDIA_PREFIX: &str = "localmedia://";
const FALLBACK_MEDIA_NAME: &str = "media.bin";

/// `localmedia://<blobId>/<url-encoded name>` 形式のメディア参照
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaRef {
    id: String,
    name: String,
}

impl MediaRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn is_local(value: &str) -> bool {
        value.trim().starts_with(LOCAL_MEDIA_PREFIX)
    }

    pub fn parse(value: &str) -> Option<Self> {
        let raw = value.trim().strip_prefix(LOCAL_MEDIA_PREFIX)?;
        let slash = raw.find('/')?;
        if slash == 0 {
            return None;
        }
        let id = &raw[..slash];
        let encoded_name = &raw[slash + 1..];
        let name = if encoded_name.is_empty() {
            FALLBACK_MEDIA_NAME.to_string()
        } else {
            urlencoding::decode(encoded_name).ok()?.into_owned()
        };
        Some(Self {
            id: id.to_string(),
            name,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{LOCAL_MEDIA_PREFIX}{}/{}",
            self.id,
            urlencoding::encode(&self.name)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_encodes_file_name() {
        let reference = MediaRef::new("abc123", "salle d'attente.mp4");
        let text = reference.to_string();
        assert!(text.starts_with("localmedia://abc123/"));
        assert!(!text.contains(' '));
        assert_eq!(MediaRef::parse(&text), Some(reference));
    }

    #[test]
    fn parse_falls_back_to_default_name() {
        let parsed = MediaRef::parse("localmedia://blob-1/").unwrap();
        assert_eq!(parsed.id(), "blob-1");
        assert_eq!(parsed.name(), "media.bin");
    }

    #[test]
    fn parse_rejects_malformed_references() {
        assert!(MediaRef::parse("localmedia://no-slash").is_none());
        assert!(MediaRef::parse("localmedia:///name.png").is_none());
        assert!(MediaRef::parse("https://example.com/a.png").is_none());
    }

    #[test]
    fn is_local_ignores_surrounding_whitespace() {
        assert!(MediaRef::is_local("  localmedia://x/y.png"));
        assert!(!MediaRef::is_local("/logo-cabinet.svg"));
    }
}
