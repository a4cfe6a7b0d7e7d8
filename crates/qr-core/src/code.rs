use crate::bit_buffer::{get_bit, BitBuffer};
use crate::code_ecc::CodeEcc;
use crate::error::QrError;
use crate::finder_penalty::FinderPenalty;
use crate::gf256::Polynomial;
use crate::mask::Mask;
use crate::segment::Segment;
use crate::segment_mode::SegmentMode;
use crate::tables::{
    table_get, ECC_CODEWORDS_PER_BLOCK, NUM_ERROR_CORRECTION_BLOCKS, PENALTY_N1, PENALTY_N2,
    PENALTY_N3, PENALTY_N4,
};
use crate::version::Version;

/// Distinguishes a mask-evaluation pass from the pass whose output is kept.
///
/// In `Trial` mode the format and version bit positions are forced light so
/// that they never bias the penalty score of the mask being evaluated; in
/// `Final` mode they carry their real BCH-encoded values. Threading this
/// flag through the drawing routines means the matrix-construction code is
/// written once and run for both purposes, per the single-builder design
/// note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Trial,
    Final,
}

/// A QR Code symbol, which is a type of two-dimension barcode.
///
/// Invented by Denso Wave and described in the ISO/IEC 18004 standard.
///
/// Instances of this struct represent an immutable square grid of dark and light cells.
/// The impl provides static factory functions to create a QR Code from text or binary data.
/// The struct and impl cover the QR Code Model 2 specification, supporting all versions
/// (sizes) from 1 to 40, all 4 error correction levels, and the Numeric/Alphanumeric/Byte/
/// Kanji character encoding modes.
///
/// Ways to create a QR Code object:
///
/// - High level: Take the payload data and call `QrCode::encode_text()` or `QrCode::encode_binary()`.
/// - Mid level: Custom-make the list of segments and call
///   `QrCode::encode_segments()` or `QrCode::encode_segments_advanced()`.
/// - Low level: Custom-make the array of data codeword bytes (including segment
///   headers and final padding, excluding error correction codewords), supply the
///   appropriate version number, and call the `QrCode::encode_codewords()` constructor.
///
/// (Note that all ways require supplying the desired error correction level.)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCode {
    // Scalar parameters:

    // The version number of this QR Code, which is between 1 and 40 (inclusive).
    // This determines the size of this barcode.
    pub version: Version,

    // The width and height of this QR Code, measured in modules, between
    // 21 and 177 (inclusive). This is equal to version * 4 + 17.
    pub size: i32,

    // The error correction level used in this QR Code.
    pub errorcorrectionlevel: CodeEcc,

    // The index of the mask pattern used in this QR Code, which is between 0 and 7 (inclusive).
    pub mask: Mask,

    // Grids of modules/pixels, with dimensions of size*size:

    // The modules of this QR Code (false = light, true = dark).
    // Immutable after constructor finishes. Accessed through get_module().
    pub modules: Vec<bool>,

    // Indicates function modules that are not subjected to masking. Discarded when constructor finishes.
    pub isfunction: Vec<bool>,
}

impl QrCode {
    /*---- Static factory functions (high level) ----*/

    /// Returns a QR Code representing the given Unicode text string at the given error correction level.
    ///
    /// The smallest possible QR Code version is automatically chosen for the output.
    ///
    /// Returns a wrapped `QrCode` if successful, or `Err` if the
    /// data is too long to fit in any version at the given ECC level.
    pub fn encode_text(text: &str, ecl: CodeEcc) -> Result<Self, QrError> {
        let segs = Segment::make_segments(text)?;
        QrCode::encode_segments(&segs, ecl)
    }

    /// Returns a QR Code representing the given binary data at the given error correction level.
    ///
    /// This function always encodes using the binary segment mode, not any text mode. The
    /// smallest possible QR Code version is automatically chosen for the output.
    ///
    /// Returns a wrapped `QrCode` if successful, or `Err` if the
    /// data is too long to fit in any version at the given ECC level.
    pub fn encode_binary(data: &[u8], ecl: CodeEcc) -> Result<Self, QrError> {
        let segs: [Segment; 1] = [Segment::make_bytes(data)];
        QrCode::encode_segments(&segs, ecl)
    }

    /*---- Static factory functions (mid level) ----*/

    /// Returns a QR Code representing the given segments at the given error correction level.
    ///
    /// The smallest possible QR Code version is automatically chosen for the output. This
    /// function never boosts the requested error correction level; the result always uses
    /// exactly the level requested, matching the explicit level-selection contract of the
    /// high-level `Symbol` API.
    ///
    /// This function allows the user to create a custom sequence of segments that switches
    /// between modes (such as alphanumeric and byte) to encode text in less space.
    /// This is a mid-level API; the high-level API is `encode_text()` and `encode_binary()`.
    ///
    /// Returns a wrapped `QrCode` if successful, or `Err` if the
    /// data is too long to fit in any version at the given ECC level.
    pub fn encode_segments(segs: &[Segment], ecl: CodeEcc) -> Result<Self, QrError> {
        QrCode::encode_segments_advanced(segs, ecl, Version::MIN, Version::MAX, None)
    }

    /// Returns a QR Code representing the given segments with the given encoding parameters.
    ///
    /// The smallest possible QR Code version within the given range is automatically
    /// chosen for the output. The mask number is either between 0 to 7 (inclusive) to force
    /// that mask, or `None` to automatically choose the mask with the lowest penalty score
    /// (ties broken by the lowest mask index).
    ///
    /// This function allows the user to create a custom sequence of segments that switches
    /// between modes (such as alphanumeric and byte) to encode text in less space.
    /// This is a mid-level API; the high-level API is `encode_text()` and `encode_binary()`.
    ///
    /// Returns a wrapped `QrCode` if successful, or `Err` if the data is too
    /// long to fit in any version in the given range at the given ECC level.
    pub fn encode_segments_advanced(
        segs: &[Segment],
        ecl: CodeEcc,
        minversion: Version,
        maxversion: Version,
        mask: Option<Mask>,
    ) -> Result<Self, QrError> {
        assert!(minversion <= maxversion, "Invalid value");

        // Find the minimal version number to use
        let mut version: Version = minversion;
        let datausedbits: usize = loop {
            let datacapacitybits: usize = QrCode::get_num_data_codewords(version, ecl) * 8;
            let dataused: Option<usize> = Segment::get_total_bits(segs, version);
            if dataused.map_or(false, |n| n <= datacapacitybits) {
                break dataused.unwrap();
            } else if version >= maxversion {
                return Err(match dataused {
                    None => QrError::SegmentTooLong,
                    Some(n) => QrError::CodeOverflow {
                        bits: n,
                        capacity: datacapacitybits,
                    },
                });
            } else {
                version = Version::new(version.value() + 1);
            }
        };

        // Concatenate all segments to create the data bit string
        let mut bb = BitBuffer(Vec::new());
        for seg in segs {
            bb.append_bits(seg.mode.mode_bits(), 4);
            bb.append_bits(
                u32::try_from(seg.numchars).unwrap(),
                seg.mode.num_char_count_bits(version),
            );
            bb.0.extend_from_slice(&seg.data);
        }
        debug_assert_eq!(bb.0.len(), datausedbits);

        // Add terminator and pad up to a byte if applicable
        let datacapacitybits: usize = QrCode::get_num_data_codewords(version, ecl) * 8;
        debug_assert!(bb.0.len() <= datacapacitybits);
        let numzerobits: usize = std::cmp::min(4, datacapacitybits - bb.0.len());
        bb.append_bits(0, u8::try_from(numzerobits).unwrap());
        let numzerobits: usize = bb.0.len().wrapping_neg() & 7;
        bb.append_bits(0, u8::try_from(numzerobits).unwrap());
        debug_assert_eq!(bb.0.len() % 8, 0);

        // Pad with alternating bytes until data capacity is reached
        for &padbyte in [0xEC, 0x11].iter().cycle() {
            if bb.0.len() >= datacapacitybits {
                break;
            }
            bb.append_bits(padbyte, 8);
        }

        // Pack bits into bytes in big endian
        let mut datacodewords = vec![0u8; bb.0.len() / 8];
        for (i, &bit) in bb.0.iter().enumerate() {
            datacodewords[i >> 3] |= u8::from(bit) << (7 - (i & 7));
        }

        Ok(QrCode::encode_codewords(version, ecl, &datacodewords, mask))
    }

    /*---- Constructor (low level) ----*/

    /// Creates a new QR Code with the given version number,
    /// error correction level, data codeword bytes, and mask number.
    ///
    /// This is a low-level API that most users should not use directly.
    /// A mid-level API is the `encode_segments()` function.
    pub fn encode_codewords(
        ver: Version,
        ecl: CodeEcc,
        datacodewords: &[u8],
        mut msk: Option<Mask>,
    ) -> Self {
        let size = usize::from(ver.value()) * 4 + 17;
        let mut result = Self {
            version: ver,
            size: size as i32,
            mask: Mask::new(0), // Dummy value
            errorcorrectionlevel: ecl,
            modules: vec![false; size * size], // Initially all light
            isfunction: vec![false; size * size],
        };

        // Compute ECC, draw function patterns (format/version bits forced light)
        result.draw_function_patterns(BuildMode::Trial);
        let allcodewords: Vec<u8> = result.add_ecc_and_interleave(datacodewords);
        result.draw_codewords(&allcodewords);

        if msk.is_none() {
            // Automatically choose the mask with the lowest penalty score; function
            // modules (including the still-light format/version bit positions) are
            // identical across every trial, so the score differences come purely
            // from the data region.
            let mut minpenalty = std::i32::MAX;
            for i in 0u8..8 {
                let i = Mask::new(i);
                result.apply_mask(i);
                let penalty: i32 = result.get_penalty_score();
                if penalty < minpenalty {
                    msk = Some(i);
                    minpenalty = penalty;
                }
                result.apply_mask(i); // Undoes the mask due to XOR
            }
        }
        let msk: Mask = msk.unwrap();
        result.mask = msk;
        result.apply_mask(msk); // Apply the final choice of mask
        result.draw_format_bits(msk, BuildMode::Final);
        result.draw_version(BuildMode::Final);

        result.isfunction.clear();
        result.isfunction.shrink_to_fit();
        result
    }

    /*---- Public methods ----*/

    /// Returns this QR Code's version, in the range [1, 40].
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns this QR Code's size, in the range [21, 177].
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Returns this QR Code's error correction level.
    pub fn error_correction_level(&self) -> CodeEcc {
        self.errorcorrectionlevel
    }

    /// Returns this QR Code's mask, in the range [0, 7].
    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Returns the color of the module (pixel) at the given coordinates,
    /// which is `false` for light or `true` for dark.
    ///
    /// The top left corner has the coordinates (x=0, y=0). If the given
    /// coordinates are out of bounds, then `false` (light) is returned.
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        (0..self.size).contains(&x) && (0..self.size).contains(&y) && self.module(x, y)
    }

    /// Returns the color of the module at the given coordinates, failing with
    /// `QrError::OutOfRange` if the coordinates are outside `[0, size)`.
    pub fn get_module_checked(&self, x: i32, y: i32) -> Result<bool, QrError> {
        if (0..self.size).contains(&x) && (0..self.size).contains(&y) {
            Ok(self.module(x, y))
        } else {
            Err(QrError::OutOfRange)
        }
    }

    fn module(&self, x: i32, y: i32) -> bool {
        self.modules[(y * self.size + x) as usize]
    }

    fn module_mut(&mut self, x: i32, y: i32) -> &mut bool {
        &mut self.modules[(y * self.size + x) as usize]
    }

    /*---- Private helper methods for constructor: Drawing function modules ----*/

    fn draw_function_patterns(&mut self, mode: BuildMode) {
        let size: i32 = self.size;
        for i in 0..size {
            self.set_function_module(6, i, i % 2 == 0);
            self.set_function_module(i, 6, i % 2 == 0);
        }

        self.draw_finder_pattern(3, 3);
        self.draw_finder_pattern(size - 4, 3);
        self.draw_finder_pattern(3, size - 4);

        let alignpatpos: Vec<i32> = self.get_alignment_pattern_positions();
        let numalign: usize = alignpatpos.len();
        for i in 0..numalign {
            for j in 0..numalign {
                if !(i == 0 && j == 0 || i == 0 && j == numalign - 1 || i == numalign - 1 && j == 0)
                {
                    self.draw_alignment_pattern(alignpatpos[i], alignpatpos[j]);
                }
            }
        }

        // Dummy mask value; the real bits (or the trial light bits) are (re)drawn
        // by the caller once the final mask is known.
        self.draw_format_bits(Mask::new(0), mode);
        self.draw_version(mode);
    }

    /// Draws two copies of the format bits based on the given mask and this
    /// object's error correction level field. In `Trial` mode the 15 BCH-coded
    /// bit positions are written light instead of their real value, per the
    /// trial/final build-mode contract; the single mandatory dark module at
    /// (size-8, 8) is always drawn dark regardless of mode.
    fn draw_format_bits(&mut self, mask: Mask, mode: BuildMode) {
        let bits: u32 = match mode {
            BuildMode::Final => {
                let data: u32 =
                    u32::from(self.errorcorrectionlevel.format_bits() << 3 | mask.value());
                let mut rem: u32 = data;
                for _ in 0..10 {
                    rem = (rem << 1) ^ ((rem >> 9) * 0x537);
                }
                (data << 10 | rem) ^ 0x5412 // uint15
            }
            BuildMode::Trial => 0,
        };
        debug_assert_eq!(bits >> 15, 0);

        // Draw first copy
        for i in 0..6 {
            self.set_function_module(8, i, get_bit(bits, i));
        }
        self.set_function_module(8, 7, get_bit(bits, 6));
        self.set_function_module(8, 8, get_bit(bits, 7));
        self.set_function_module(7, 8, get_bit(bits, 8));
        for i in 9..15 {
            self.set_function_module(14 - i, 8, get_bit(bits, i));
        }

        // Draw second copy
        let size: i32 = self.size;
        for i in 0..8 {
            self.set_function_module(size - 1 - i, 8, get_bit(bits, i));
        }
        for i in 8..15 {
            self.set_function_module(8, size - 15 + i, get_bit(bits, i));
        }
        self.set_function_module(8, size - 8, true); // Always dark
    }

    /// Draws two copies of the version bits, iff 7 <= version <= 40. In
    /// `Trial` mode the bit positions are written light.
    fn draw_version(&mut self, mode: BuildMode) {
        if self.version.value() < 7 {
            return;
        }

        let bits: u32 = match mode {
            BuildMode::Final => {
                let data = u32::from(self.version.value());
                let mut rem: u32 = data;
                for _ in 0..12 {
                    rem = (rem << 1) ^ ((rem >> 11) * 0x1F25);
                }
                data << 12 | rem // uint18
            }
            BuildMode::Trial => 0,
        };
        debug_assert_eq!(bits >> 18, 0);

        for i in 0..18 {
            let bit: bool = get_bit(bits, i);
            let a: i32 = self.size - 11 + i % 3;
            let b: i32 = i / 3;
            self.set_function_module(a, b, bit);
            self.set_function_module(b, a, bit);
        }
    }

    fn draw_finder_pattern(&mut self, x: i32, y: i32) {
        for dy in -4..=4 {
            for dx in -4..=4 {
                let xx: i32 = x + dx;
                let yy: i32 = y + dy;
                if (0..self.size).contains(&xx) && (0..self.size).contains(&yy) {
                    let dist: i32 = std::cmp::max(dx.abs(), dy.abs());
                    self.set_function_module(xx, yy, dist != 2 && dist != 4);
                }
            }
        }
    }

    fn draw_alignment_pattern(&mut self, x: i32, y: i32) {
        for dy in -2..=2 {
            for dx in -2..=2 {
                self.set_function_module(x + dx, y + dy, std::cmp::max(dx.abs(), dy.abs()) != 1);
            }
        }
    }

    fn set_function_module(&mut self, x: i32, y: i32, isdark: bool) {
        *self.module_mut(x, y) = isdark;
        self.isfunction[(y * self.size + x) as usize] = true;
    }

    /*---- Private helper methods for constructor: Codewords and masking ----*/

    // Returns a new byte string representing the given data with the appropriate error correction
    // codewords appended to it, based on this object's version and error correction level.
    fn add_ecc_and_interleave(&self, data: &[u8]) -> Vec<u8> {
        let ver: Version = self.version;
        let ecl: CodeEcc = self.errorcorrectionlevel;
        assert_eq!(
            data.len(),
            QrCode::get_num_data_codewords(ver, ecl),
            "Illegal argument"
        );

        let numblocks: usize = table_get(&NUM_ERROR_CORRECTION_BLOCKS, ver, ecl);
        let blockecclen: usize = table_get(&ECC_CODEWORDS_PER_BLOCK, ver, ecl);
        let rawcodewords: usize = QrCode::get_num_raw_data_modules(ver) / 8;
        let numshortblocks: usize = numblocks - rawcodewords % numblocks;
        let shortblocklen: usize = rawcodewords / numblocks;

        let mut blocks = Vec::<Vec<u8>>::with_capacity(numblocks);
        let divisor = QrCode::reed_solomon_divisor(blockecclen);
        let mut k: usize = 0;
        for i in 0..numblocks {
            let datlen: usize = shortblocklen - blockecclen + usize::from(i >= numshortblocks);
            let mut dat = data[k..k + datlen].to_vec();
            k += datlen;
            let ecc: Vec<u8> = QrCode::reed_solomon_remainder(&dat, &divisor);
            if i < numshortblocks {
                dat.push(0);
            }
            dat.extend_from_slice(&ecc);
            blocks.push(dat);
        }

        // Interleave (not concatenate) the bytes from every block into a single sequence
        let mut result = Vec::<u8>::with_capacity(rawcodewords);
        for i in 0..=shortblocklen {
            for (j, block) in blocks.iter().enumerate() {
                if i != shortblocklen - blockecclen || j >= numshortblocks {
                    result.push(block[i]);
                }
            }
        }
        result
    }

    fn draw_codewords(&mut self, data: &[u8]) {
        assert_eq!(
            data.len(),
            QrCode::get_num_raw_data_modules(self.version) / 8,
            "Illegal argument"
        );

        let mut i: usize = 0;
        let mut right: i32 = self.size - 1;
        while right >= 1 {
            if right == 6 {
                right = 5;
            }
            for vert in 0..self.size {
                for j in 0..2 {
                    let x: i32 = right - j;
                    let upward: bool = (right + 1) & 2 == 0;
                    let y: i32 = if upward { self.size - 1 - vert } else { vert };
                    if !self.isfunction[(y * self.size + x) as usize] && i < data.len() * 8 {
                        *self.module_mut(x, y) =
                            get_bit(u32::from(data[i >> 3]), 7 - ((i as i32) & 7));
                        i += 1;
                    }
                }
            }
            right -= 2;
        }
        debug_assert_eq!(i, data.len() * 8);
    }

    /// XORs the codeword modules in this QR Code with the given mask pattern.
    /// Calling this twice with the same mask value undoes it (used during
    /// trial scoring).
    fn apply_mask(&mut self, mask: Mask) {
        for y in 0..self.size {
            for x in 0..self.size {
                let invert: bool = match mask.value() {
                    0 => (x + y) % 2 == 0,
                    1 => y % 2 == 0,
                    2 => x % 3 == 0,
                    3 => (x + y) % 3 == 0,
                    4 => (x / 3 + y / 2) % 2 == 0,
                    5 => x * y % 2 + x * y % 3 == 0,
                    6 => (x * y % 2 + x * y % 3) % 2 == 0,
                    7 => ((x + y) % 2 + x * y % 3) % 2 == 0,
                    _ => unreachable!(),
                };
                *self.module_mut(x, y) ^= invert & !self.isfunction[(y * self.size + x) as usize];
            }
        }
    }

    // Calculates and returns the penalty score based on state of this QR Code's current modules.
    fn get_penalty_score(&self) -> i32 {
        let mut result: i32 = 0;
        let size: i32 = self.size;

        for y in 0..size {
            let mut runcolor = false;
            let mut runx: i32 = 0;
            let mut runhistory = FinderPenalty::new(size);
            for x in 0..size {
                if self.module(x, y) == runcolor {
                    runx += 1;
                    if runx == 5 {
                        result += PENALTY_N1;
                    } else if runx > 5 {
                        result += 1;
                    }
                } else {
                    runhistory.add_history(runx);
                    if !runcolor {
                        result += runhistory.count_patterns() * PENALTY_N3;
                    }
                    runcolor = self.module(x, y);
                    runx = 1;
                }
            }
            result += runhistory.terminate_and_count(runcolor, runx) * PENALTY_N3;
        }
        for x in 0..size {
            let mut runcolor = false;
            let mut runy: i32 = 0;
            let mut runhistory = FinderPenalty::new(size);
            for y in 0..size {
                if self.module(x, y) == runcolor {
                    runy += 1;
                    if runy == 5 {
                        result += PENALTY_N1;
                    } else if runy > 5 {
                        result += 1;
                    }
                } else {
                    runhistory.add_history(runy);
                    if !runcolor {
                        result += runhistory.count_patterns() * PENALTY_N3;
                    }
                    runcolor = self.module(x, y);
                    runy = 1;
                }
            }
            result += runhistory.terminate_and_count(runcolor, runy) * PENALTY_N3;
        }

        for y in 0..size - 1 {
            for x in 0..size - 1 {
                let color: bool = self.module(x, y);
                if color == self.module(x + 1, y)
                    && color == self.module(x, y + 1)
                    && color == self.module(x + 1, y + 1)
                {
                    result += PENALTY_N2;
                }
            }
        }

        let dark: i32 = self.modules.iter().copied().map(i32::from).sum();
        let total: i32 = size * size;
        let k: i32 = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
        debug_assert!(0 <= k && k <= 9);
        result += k * PENALTY_N4;
        result
    }

    /*---- Private helper functions ----*/

    // Returns an ascending list of positions of alignment patterns for this version number.
    // Each position is in the range [0,177), and are used on both the x and y axes.
    fn get_alignment_pattern_positions(&self) -> Vec<i32> {
        let ver: u8 = self.version.value();
        if ver == 1 {
            vec![]
        } else {
            let numalign = i32::from(ver) / 7 + 2;
            let step: i32 = if ver == 32 {
                26
            } else {
                (i32::from(ver) * 4 + numalign * 2 + 1) / (numalign * 2 - 2) * 2
            };
            let mut result: Vec<i32> = (0..numalign - 1)
                .map(|i| self.size - 7 - i * step)
                .collect();
            result.push(6);
            result.reverse();
            result
        }
    }

    // Returns the number of data bits that can be stored in a QR Code of the given version number, after
    // all function modules are excluded. This includes remainder bits, so it might not be a multiple of 8.
    fn get_num_raw_data_modules(ver: Version) -> usize {
        let ver = usize::from(ver.value());
        let mut result: usize = (16 * ver + 128) * ver + 64;
        if ver >= 2 {
            let numalign: usize = ver / 7 + 2;
            result -= (25 * numalign - 10) * numalign - 55;
            if ver >= 7 {
                result -= 36;
            }
        }
        debug_assert!((208..=29648).contains(&result));
        result
    }

    /// Returns the number of 8-bit data (i.e. not error correction) codewords contained in any
    /// QR Code of the given version number and error correction level, with remainder bits discarded.
    pub fn get_num_data_codewords(ver: Version, ecl: CodeEcc) -> usize {
        QrCode::get_num_raw_data_modules(ver) / 8
            - table_get(&ECC_CODEWORDS_PER_BLOCK, ver, ecl) * table_get(&NUM_ERROR_CORRECTION_BLOCKS, ver, ecl)
    }

    /// Returns a Reed-Solomon ECC generator polynomial for the given degree,
    /// built as `(x - alpha^0)(x - alpha^1)...(x - alpha^{degree-1})` over
    /// GF(256), using the table-based `Polynomial` arithmetic in `gf256`.
    fn reed_solomon_divisor(degree: usize) -> Polynomial {
        assert!((1..=255).contains(&degree), "Degree out of range");
        let mut result = Polynomial::new(&[1], 0);
        for i in 0..degree {
            let factor = crate::gf256::gexp(i as i32);
            let term = Polynomial::new(&[1, factor], 0); // (x + alpha^i), + is XOR so same as -
            result = result.multiply(&term);
        }
        result
    }

    /// Returns the Reed-Solomon remainder of `data` shifted by `divisor`'s
    /// degree, divided by `divisor`.
    fn reed_solomon_remainder(data: &[u8], divisor: &Polynomial) -> Vec<u8> {
        let degree = divisor.degree();
        let dividend = Polynomial::new(data, degree);
        let remainder = dividend.modulo(divisor);
        let coeffs = remainder.coefficients();
        let mut out = vec![0u8; degree];
        let start = degree.saturating_sub(coeffs.len());
        for (i, &c) in coeffs.iter().enumerate() {
            if start + i < degree {
                out[start + i] = c;
            }
        }
        out
    }
}
