use crate::code::QrCode;
use crate::code_ecc::CodeEcc;
use crate::error::QrError;
use crate::segment::Segment;
use crate::segment_mode::SegmentMode;
use crate::version::Version;

/// A segment name/mode pair waiting to be assembled into a `Segment` at
/// `make()` time. Kept as raw text rather than an assembled `Segment` so
/// that character validation happens during assembly, not at `add_data`.
#[derive(Debug, Clone)]
struct PendingSegment {
    mode: SegmentMode,
    text: String,
}

/// The mutable, incremental builder exposed as the high-level external
/// interface: construct with a version and level, append segments with
/// `add_data`, then call `make()` before reading modules.
///
/// Internally this wraps the immutable [`QrCode`] engine, rebuilding it from
/// scratch on every `make()` call. `QrCode` itself is assembled in a single
/// factory call and never mutated in place; `Symbol` is the stateful
/// lifecycle the rest of this crate's API deliberately avoids.
#[derive(Debug, Clone)]
pub struct Symbol {
    version: u8,
    level: CodeEcc,
    pending: Vec<PendingSegment>,
    code: Option<QrCode>,
}

impl Symbol {
    /// Creates a new symbol at the given version (0 selects the smallest
    /// version that fits the data once `make()` runs) and error correction
    /// level (`"L"`, `"M"`, `"Q"`, or `"H"`).
    pub fn create(version: u8, level: &str) -> Result<Self, QrError> {
        let level = CodeEcc::from_letter(level)?;
        Ok(Self {
            version,
            level,
            pending: Vec::new(),
            code: None,
        })
    }

    /// Appends a segment of `text` encoded in `mode` (`"Numeric"`,
    /// `"Alphanumeric"`, `"Byte"`, or `"Kanji"`). Only the mode name is
    /// validated here; characters that don't fit the mode (e.g. a letter in
    /// `"Numeric"`) are rejected later, during `make()`'s segment assembly,
    /// mirroring `QrCode::encode_segments_advanced`, which only calls the
    /// mode-specific `Segment::make_*` constructor once segments are
    /// actually assembled into the bit stream. Invalidates any grid built
    /// by a previous `make()` call.
    pub fn add_data(&mut self, text: &str, mode: &str) -> Result<(), QrError> {
        let mode = SegmentMode::from_name(mode)?;
        self.pending.push(PendingSegment {
            mode,
            text: text.to_string(),
        });
        self.code = None;
        Ok(())
    }

    /// Builds (or rebuilds) the module grid from the segments appended so
    /// far. Calling this twice with no intervening `add_data` is idempotent
    /// and produces a bit-identical grid. Leaves prior state untouched on
    /// failure.
    pub fn make(&mut self) -> Result<(), QrError> {
        let mut segments = Vec::with_capacity(self.pending.len());
        for pending in &self.pending {
            let seg = match pending.mode {
                SegmentMode::Numeric => Segment::make_numeric(&pending.text)?,
                SegmentMode::Alphanumeric => Segment::make_alphanumeric(&pending.text)?,
                SegmentMode::Byte => Segment::make_bytes(pending.text.as_bytes()),
                SegmentMode::Kanji => Segment::make_kanji(&pending.text)?,
                SegmentMode::Eci => unreachable!("from_name never returns Eci"),
            };
            segments.push(seg);
        }

        let (minversion, maxversion) = if self.version == 0 {
            (Version::MIN, Version::MAX)
        } else {
            let v = Version::new(self.version);
            (v, v)
        };
        let code = QrCode::encode_segments_advanced(
            &segments,
            self.level,
            minversion,
            maxversion,
            None,
        )?;
        self.code = Some(code);
        Ok(())
    }

    /// Returns the side length of the module grid. Fails with
    /// `QrError::NotReady` if `make()` has not been called yet.
    pub fn module_count(&self) -> Result<i32, QrError> {
        self.code.as_ref().map(QrCode::size).ok_or(QrError::NotReady)
    }

    /// Returns whether the module at `(row, col)` is dark. Fails with
    /// `QrError::NotReady` before `make()`, or `QrError::OutOfRange` for
    /// coordinates outside `[0, moduleCount)`.
    pub fn is_dark(&self, row: i32, col: i32) -> Result<bool, QrError> {
        let code = self.code.as_ref().ok_or(QrError::NotReady)?;
        code.get_module_checked(col, row)
    }

    /// Returns the version actually used to build the grid. Fails with
    /// `QrError::NotReady` before `make()`.
    pub fn version(&self) -> Result<Version, QrError> {
        self.code.as_ref().map(QrCode::version).ok_or(QrError::NotReady)
    }

    /// Returns the error correction level this symbol was created with.
    pub fn level(&self) -> CodeEcc {
        self.level
    }

    /// Returns the underlying low-level engine built by `make()`, for
    /// callers (such as renderers) that want direct `QrCode` access.
    /// Fails with `QrError::NotReady` before `make()`.
    pub fn as_code(&self) -> Result<&QrCode, QrError> {
        self.code.as_ref().ok_or(QrError::NotReady)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_hello_world_alphanumeric() {
        let mut sym = Symbol::create(1, "H").unwrap();
        sym.add_data("HELLO WORLD", "Alphanumeric").unwrap();
        sym.make().unwrap();
        assert_eq!(sym.module_count().unwrap(), 21);
    }

    #[test]
    fn auto_version_selects_smallest_fit() {
        let mut sym = Symbol::create(0, "L").unwrap();
        sym.add_data("https://neabyte.com/", "Byte").unwrap();
        sym.make().unwrap();
        assert!(sym.module_count().unwrap() >= 17 + 4 * 2);
    }

    #[test]
    fn overflow_reports_code_overflow() {
        let mut sym = Symbol::create(1, "H").unwrap();
        sym.add_data(&"x".repeat(100), "Byte").unwrap();
        let err = sym.make().unwrap_err();
        assert!(matches!(err, QrError::CodeOverflow { .. }));
    }

    #[test]
    fn bad_character_reports_offset() {
        let mut sym = Symbol::create(1, "L").unwrap();
        // add_data only validates the mode name; the bad character at
        // offset 2 is only caught when make() assembles the segment.
        sym.add_data("12a", "Numeric").unwrap();
        let err = sym.make().unwrap_err();
        match err {
            QrError::BadCharacter(c, offset, mode) => {
                assert_eq!(c, 'a');
                assert_eq!(offset, 2);
                assert_eq!(mode, SegmentMode::Numeric);
            }
            other => panic!("wrong error variant: {other:?}"),
        }
    }

    #[test]
    fn read_before_make_is_not_ready() {
        let sym = Symbol::create(1, "L").unwrap();
        assert!(matches!(sym.module_count(), Err(QrError::NotReady)));
        assert!(matches!(sym.is_dark(0, 0), Err(QrError::NotReady)));
    }

    #[test]
    fn bad_level_and_bad_mode_are_rejected() {
        assert!(matches!(Symbol::create(1, "Z"), Err(QrError::BadErrorLevel)));
        let mut sym = Symbol::create(1, "L").unwrap();
        assert!(matches!(
            sym.add_data("hi", "Weird"),
            Err(QrError::BadMode)
        ));
    }

    #[test]
    fn idempotent_make_produces_identical_grid() {
        let mut sym = Symbol::create(1, "Q").unwrap();
        sym.add_data("idempotence check", "Byte").unwrap();
        sym.make().unwrap();
        let first = sym.code.clone();
        sym.make().unwrap();
        assert_eq!(first, sym.code);
    }
}
