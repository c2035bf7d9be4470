use chardetng::EncodingDetector;
use encoding_rs::{Encoding, BIG5, GB18030, GBK, UTF_8};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::DecodeError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A line ends at `\r\n`, `\r` or `\n`; the last line may have no terminator.
static LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\r\n]*(?:\r\n|\r|\n)|[^\r\n]+").unwrap());

/// Text decoded from raw bytes, together with the encoding that decoded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub encoding: &'static str,
    pub text: String,
}

impl Decoded {
    /// Splits into lines, each keeping its line terminator.
    pub fn lines(&self) -> Vec<String> {
        split_lines(&self.text)
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    label: &'static str,
    encoding: &'static Encoding,
    strip_bom: bool,
}

impl Candidate {
    /// Strict decode. Any malformed sequence fails the whole attempt.
    fn decode(&self, bytes: &[u8]) -> Option<String> {
        let bytes = if self.strip_bom {
            bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
        } else {
            bytes
        };
        self.encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned())
    }
}

fn fallbacks() -> [Candidate; 5] {
    [
        Candidate {
            label: "gbk",
            encoding: GBK,
            strip_bom: false,
        },
        Candidate {
            label: "gb18030",
            encoding: GB18030,
            strip_bom: false,
        },
        Candidate {
            label: "big5",
            encoding: BIG5,
            strip_bom: false,
        },
        Candidate {
            label: "utf-8-sig",
            encoding: UTF_8,
            strip_bom: true,
        },
        Candidate {
            label: "utf-8",
            encoding: UTF_8,
            strip_bom: false,
        },
    ]
}

pub fn detect(bytes: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

/// Decodes `bytes` with the detected encoding, falling back through a fixed
/// list of Chinese legacy encodings and UTF-8.
pub fn decode(bytes: &[u8]) -> Result<Decoded, DecodeError> {
    let guess = detect(bytes);
    log::info!("Detected encoding: {}", guess.name());
    decode_with_guess(bytes, guess)
}

fn decode_with_guess(bytes: &[u8], guess: &'static Encoding) -> Result<Decoded, DecodeError> {
    let guessed = Candidate {
        label: guess.name(),
        encoding: guess,
        strip_bom: guess == UTF_8,
    };
    if let Some(text) = guessed.decode(bytes) {
        return Ok(Decoded {
            encoding: guessed.label,
            text,
        });
    }
    log::warn!(
        "Decoding as detected encoding {} failed, trying other encodings...",
        guessed.label
    );

    let candidates = fallbacks();
    for candidate in &candidates {
        log::info!("Trying encoding {}...", candidate.label);
        if let Some(text) = candidate.decode(bytes) {
            log::info!("Decoded input as {}", candidate.label);
            return Ok(Decoded {
                encoding: candidate.label,
                text,
            });
        }
    }

    Err(DecodeError::NoMatchingEncoding {
        tried: std::iter::once(guessed.label)
            .chain(candidates.iter().map(|candidate| candidate.label))
            .collect::<Vec<_>>()
            .join(", "),
    })
}

pub fn split_lines(text: &str) -> Vec<String> {
    LINE.find_iter(text)
        .map(|line| line.as_str().to_owned())
        .collect()
}
