use flate2::read::GzDecoder;
use reqwest::header::{HeaderMap, CONTENT_ENCODING};
use std::io::{BufRead, BufReader, Cursor};

/// Compression method the service applied to the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Gzip,
    Identity,
}

impl Compression {
    /// Marker recorded in response metadata.
    pub fn label(self) -> &'static str {
        match self {
            Compression::Gzip => "gzip",
            Compression::Identity => "(uncompressed)",
        }
    }
}

/// Reads the negotiated compression off the response headers. The
/// comparison is case-insensitive; anything but gzip passes through.
pub fn negotiated_compression(headers: &HeaderMap) -> Compression {
    match headers.get(CONTENT_ENCODING).and_then(|v| v.to_str().ok()) {
        Some(value) if value.eq_ignore_ascii_case("gzip") => Compression::Gzip,
        _ => Compression::Identity,
    }
}

/// Wraps the raw body in a decompressing reader when needed. This happens
/// before the XML parser sees a byte; read failures inside the wrapper
/// surface as I/O errors, not parse errors.
pub fn body_reader(
    body: impl AsRef<[u8]> + Send + 'static,
    compression: Compression,
) -> Box<dyn BufRead + Send> {
    match compression {
        Compression::Gzip => Box::new(BufReader::new(GzDecoder::new(Cursor::new(body)))),
        Compression::Identity => Box::new(Cursor::new(body)),
    }
}

/// Single-byte Western decode for diagnostic payloads. Total on arbitrary
/// bytes; every byte maps to the Unicode code point of the same value.
pub fn latin1_text(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use std::io::{Read, Write};

    fn headers_with_encoding(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_ENCODING, value.parse().unwrap());
        headers
    }

    #[test]
    fn sniff_is_case_insensitive() {
        assert_eq!(
            negotiated_compression(&headers_with_encoding("GZip")),
            Compression::Gzip
        );
        assert_eq!(
            negotiated_compression(&headers_with_encoding("identity")),
            Compression::Identity
        );
        assert_eq!(negotiated_compression(&HeaderMap::new()), Compression::Identity);
    }

    #[test]
    fn gzip_body_reads_back() {
        let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(b"<ResultSet/>").unwrap();
        let compressed = encoder.finish().unwrap();

        let mut text = String::new();
        body_reader(compressed, Compression::Gzip)
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "<ResultSet/>");
    }

    #[test]
    fn latin1_never_fails() {
        assert_eq!(latin1_text(b"ok"), "ok");
        assert_eq!(latin1_text(&[0x48, 0xFF, 0x00, 0x80]), "H\u{FF}\u{0}\u{80}");
    }
}
