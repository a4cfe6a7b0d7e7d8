use thiserror::Error;

use crate::segment_mode::SegmentMode;

/// The error type for every fallible operation in the QR Code encoder core.
///
/// Ways to handle `CodeOverflow`/`SegmentTooLong` include:
///
/// - Decrease the error correction level if it was greater than `CodeEcc::Low`.
/// - If `encode_segments_advanced()` was called, increase the maxversion argument
///   if it was less than `Version::MAX`.
/// - Split the text data into better or optimal segments to reduce the bits required.
/// - Change the text or binary data to be shorter.
/// - Change the text to fit the character set of a particular segment mode.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum QrError {
    #[error("unknown error correction level")]
    BadErrorLevel,

    #[error("unknown encoding mode")]
    BadMode,

    #[error("character {0:?} at offset {1} is not valid for {2:?} mode")]
    BadCharacter(char, usize, SegmentMode),

    #[error("invalid kanji byte pair at offset {0}")]
    BadKanji(usize),

    #[error("data length = {bits} bits, max capacity = {capacity} bits")]
    CodeOverflow { bits: usize, capacity: usize },

    #[error("segment too long for its mode's length field")]
    SegmentTooLong,

    #[error("row or column coordinate out of range")]
    OutOfRange,

    #[error("make() has not been called yet")]
    NotReady,

    #[error("internal table lookup out of range for version/level")]
    Internal,
}
