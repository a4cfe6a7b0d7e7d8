use crate::bit_buffer::BitBuffer;
use crate::error::QrError;
use crate::segment_mode::SegmentMode;
use crate::version::Version;
use crate::ALPHANUMERIC_CHARSET;

/// A segment of character/binary/control data in a QR Code symbol.
///
/// Instances of this struct are immutable.
///
/// The mid-level way to create a segment is to take the payload data
/// and call a static factory function such as `Segment::make_numeric()`.
/// The low-level way to create a segment is to custom-make the bit buffer
/// and call the `Segment::new()` constructor with appropriate values.
///
/// This segment struct imposes no length restrictions, but QR Codes have restrictions.
/// Even in the most favorable conditions, a QR Code can only hold 7089 characters of data.
/// Any segment longer than this is meaningless for the purpose of generating QR Codes.
#[derive(Clone, PartialEq, Eq)]
pub struct Segment {
    // The mode indicator of this segment. Accessed through mode().
    pub mode: SegmentMode,

    // The length of this segment's unencoded data. Measured in characters for
    // numeric/alphanumeric mode, bytes for byte mode, bytes/2 for kanji mode,
    // and 0 for ECI mode. Not the same as the data's bit length. Accessed
    // through num_chars().
    pub numchars: usize,

    // The data bits of this segment. Accessed through data().
    pub data: Vec<bool>,
}

impl Segment {
    /*---- Static factory functions (mid level) ----*/

    /// Returns a segment representing the given binary data encoded in byte mode.
    ///
    /// All input byte slices are acceptable.
    ///
    /// Any text string can be converted to UTF-8 bytes and encoded as a byte mode segment.
    pub fn make_bytes(data: &[u8]) -> Self {
        let mut bb = BitBuffer(Vec::with_capacity(data.len() * 8));
        for &b in data {
            bb.append_bits(u32::from(b), 8);
        }
        Segment::new(SegmentMode::Byte, data.len(), bb.0)
    }

    /// Returns a segment representing the given string of decimal digits encoded in numeric mode.
    ///
    /// Fails with `QrError::BadCharacter` at the offset of the first non-digit character.
    pub fn make_numeric(text: &str) -> Result<Self, QrError> {
        let mut bb = BitBuffer(Vec::with_capacity(text.len() * 3 + (text.len() + 2) / 3));
        let mut accumdata: u32 = 0;
        let mut accumcount: u8 = 0;
        for (offset, c) in text.char_indices() {
            if !c.is_ascii_digit() {
                return Err(QrError::BadCharacter(c, offset, SegmentMode::Numeric));
            }
            accumdata = accumdata * 10 + u32::from(c as u8 - b'0');
            accumcount += 1;
            if accumcount == 3 {
                bb.append_bits(accumdata, 10);
                accumdata = 0;
                accumcount = 0;
            }
        }
        if accumcount > 0 {
            // 1 or 2 digits remaining
            bb.append_bits(accumdata, accumcount * 3 + 1);
        }
        Ok(Segment::new(SegmentMode::Numeric, text.chars().count(), bb.0))
    }

    /// Returns a segment representing the given text string encoded in alphanumeric mode.
    ///
    /// The characters allowed are: 0 to 9, A to Z (uppercase only), space,
    /// dollar, percent, asterisk, plus, hyphen, period, slash, colon.
    ///
    /// Fails with `QrError::BadCharacter` at the offset of the first unencodable character.
    pub fn make_alphanumeric(text: &str) -> Result<Self, QrError> {
        let mut bb = BitBuffer(Vec::with_capacity(text.len() * 5 + (text.len() + 1) / 2));
        let mut accumdata: u32 = 0;
        let mut accumcount: u32 = 0;
        for (offset, c) in text.char_indices() {
            let i = ALPHANUMERIC_CHARSET
                .find(c)
                .ok_or(QrError::BadCharacter(c, offset, SegmentMode::Alphanumeric))?;
            accumdata = accumdata * 45 + u32::try_from(i).unwrap();
            accumcount += 1;
            if accumcount == 2 {
                bb.append_bits(accumdata, 11);
                accumdata = 0;
                accumcount = 0;
            }
        }
        if accumcount > 0 {
            // 1 character remaining
            bb.append_bits(accumdata, 6);
        }
        Ok(Segment::new(
            SegmentMode::Alphanumeric,
            text.chars().count(),
            bb.0,
        ))
    }

    /// Returns a segment representing the given text string encoded in Kanji mode.
    ///
    /// The text is transcoded to Shift-JIS. Fails with `QrError::BadKanji` if the
    /// Shift-JIS byte length is odd, or if a 16-bit big-endian byte pair falls
    /// outside both of the two legal Shift-JIS double-byte ranges
    /// (`0x8140..=0x9FFC`, `0xE040..=0xEBBF`).
    pub fn make_kanji(text: &str) -> Result<Self, QrError> {
        let (sjis, _, had_errors) = encoding_rs::SHIFT_JIS.encode(text);
        if had_errors {
            return Err(QrError::BadKanji(0));
        }
        if sjis.len() % 2 != 0 {
            return Err(QrError::BadKanji(sjis.len() - 1));
        }

        let mut bb = BitBuffer(Vec::with_capacity(sjis.len() * 13 / 2));
        let mut numchars = 0usize;
        for (offset, pair) in sjis.chunks_exact(2).enumerate() {
            let p = (u16::from(pair[0]) << 8) | u16::from(pair[1]);
            let rebased = if (0x8140..=0x9FFC).contains(&p) {
                p - 0x8140
            } else if (0xE040..=0xEBBF).contains(&p) {
                p - 0xC140
            } else {
                return Err(QrError::BadKanji(offset * 2));
            };
            let hi = rebased >> 8;
            let lo = rebased & 0xFF;
            let combined = hi * 0xC0 + lo;
            bb.append_bits(u32::from(combined), 13);
            numchars += 1;
        }
        Ok(Segment::new(SegmentMode::Kanji, numchars, bb.0))
    }

    /// Returns a list of zero or more segments to represent the given Unicode text string.
    ///
    /// The result may use various segment modes and switch
    /// modes to optimize the length of the bit stream.
    pub fn make_segments(text: &str) -> Result<Vec<Self>, QrError> {
        if text.is_empty() {
            Ok(vec![])
        } else if Segment::is_numeric(text) {
            Ok(vec![Segment::make_numeric(text)?])
        } else if Segment::is_alphanumeric(text) {
            Ok(vec![Segment::make_alphanumeric(text)?])
        } else {
            Ok(vec![Segment::make_bytes(text.as_bytes())])
        }
    }

    /// Returns a segment representing an Extended Channel Interpretation
    /// (ECI) designator with the given assignment value.
    pub fn make_eci(assignval: u32) -> Self {
        let mut bb = BitBuffer(Vec::with_capacity(24));
        if assignval < (1 << 7) {
            bb.append_bits(assignval, 8);
        } else if assignval < (1 << 14) {
            bb.append_bits(0b10, 2);
            bb.append_bits(assignval, 14);
        } else if assignval < 1_000_000 {
            bb.append_bits(0b110, 3);
            bb.append_bits(assignval, 21);
        } else {
            panic!("ECI assignment value out of range");
        }
        Segment::new(SegmentMode::Eci, 0, bb.0)
    }

    /*---- Constructor (low level) ----*/

    /// Creates a new QR Code segment with the given attributes and data.
    ///
    /// The character count (numchars) must agree with the mode and
    /// the bit buffer length, but the constraint isn't checked.
    pub fn new(mode: SegmentMode, numchars: usize, data: Vec<bool>) -> Self {
        Self {
            mode,
            numchars,
            data,
        }
    }

    /*---- Instance field getters ----*/

    /// Returns the mode indicator of this segment.
    pub fn mode(&self) -> SegmentMode {
        self.mode
    }

    /// Returns the character count field of this segment.
    pub fn num_chars(&self) -> usize {
        self.numchars
    }

    /// Returns the data bits of this segment.
    pub fn data(&self) -> &Vec<bool> {
        &self.data
    }

    /*---- Other static functions ----*/

    // Calculates and returns the number of bits needed to encode the given
    // segments at the given version. The result is None if a segment has too many
    // characters to fit its length field, or the total bits exceeds usize::MAX.
    pub fn get_total_bits(segs: &[Self], version: Version) -> Option<usize> {
        let mut result: usize = 0;
        for seg in segs {
            let ccbits: u8 = seg.mode.num_char_count_bits(version);
            // ccbits can be as large as 16, but usize can be as small as 16
            if let Some(limit) = 1usize.checked_shl(ccbits.into()) {
                if seg.numchars >= limit {
                    return None; // The segment's length doesn't fit the field's bit width
                }
            }
            result = result.checked_add(4 + usize::from(ccbits))?;
            result = result.checked_add(seg.data.len())?;
        }
        Some(result)
    }

    /// Tests whether the given string can be encoded as a segment in numeric mode.
    ///
    /// A string is encodable iff each character is in the range 0 to 9.
    pub fn is_numeric(text: &str) -> bool {
        text.chars().all(|c| c.is_ascii_digit())
    }

    /// Tests whether the given string can be encoded as a segment in alphanumeric mode.
    ///
    /// A string is encodable iff each character is in the following set: 0 to 9, A to Z
    /// (uppercase only), space, dollar, percent, asterisk, plus, hyphen, period, slash, colon.
    pub fn is_alphanumeric(text: &str) -> bool {
        text.chars().all(|c| ALPHANUMERIC_CHARSET.contains(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_groups_of_three() {
        let seg = Segment::make_numeric("12345").unwrap();
        assert_eq!(seg.num_chars(), 5);
        // "123" -> 10 bits, "45" -> 7 bits => 17 bits total
        assert_eq!(seg.data().len(), 17);
    }

    #[test]
    fn numeric_rejects_non_digit() {
        let err = Segment::make_numeric("12a").unwrap_err();
        match err {
            QrError::BadCharacter(c, offset, mode) => {
                assert_eq!(c, 'a');
                assert_eq!(offset, 2);
                assert_eq!(mode, SegmentMode::Numeric);
            }
            _ => panic!("wrong error variant"),
        }
    }

    #[test]
    fn alphanumeric_pairs() {
        let seg = Segment::make_alphanumeric("AB").unwrap();
        assert_eq!(seg.data().len(), 11);
    }

    #[test]
    fn alphanumeric_rejects_lowercase() {
        assert!(Segment::make_alphanumeric("ab").is_err());
    }

    #[test]
    fn byte_mode_is_eight_bits_per_byte() {
        let seg = Segment::make_bytes(b"hi");
        assert_eq!(seg.data().len(), 16);
        assert_eq!(seg.num_chars(), 2);
    }

    #[test]
    fn kanji_rejects_ascii_text() {
        // Plain ASCII round-trips through Shift-JIS as single bytes, giving
        // an odd total length for an odd-length ASCII string.
        let err = Segment::make_kanji("abc").unwrap_err();
        assert!(matches!(err, QrError::BadKanji(_)));
    }
}
