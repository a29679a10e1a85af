//! Image content-type tagging
//!
//! Magic-byte sniffing for image payloads. Only used to tag Image content;
//! not part of the crypto core's correctness surface.

const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];
const JPEG_MAGIC: &[u8] = &[0xff, 0xd8, 0xff];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    Png,
    Jpeg,
    Unknown,
}

impl ImageType {
    pub fn sniff(data: &[u8]) -> Self {
        if data.starts_with(PNG_MAGIC) {
            Self::Png
        } else if data.starts_with(JPEG_MAGIC) {
            Self::Jpeg
        } else {
            Self::Unknown
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Unknown => "application/octet-stream",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_png() {
        let data = [0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00];
        assert_eq!(ImageType::sniff(&data), ImageType::Png);
        assert_eq!(ImageType::sniff(&data).content_type(), "image/png");
    }

    #[test]
    fn sniffs_jpeg() {
        let data = [0xff, 0xd8, 0xff, 0xe0];
        assert_eq!(ImageType::sniff(&data), ImageType::Jpeg);
        assert_eq!(ImageType::sniff(&data).content_type(), "image/jpeg");
    }

    #[test]
    fn anything_else_is_unknown() {
        assert_eq!(ImageType::sniff(b"GIF89a"), ImageType::Unknown);
        assert_eq!(ImageType::sniff(&[]), ImageType::Unknown);
        assert_eq!(
            ImageType::sniff(b"x").content_type(),
            "application/octet-stream"
        );
    }
}
