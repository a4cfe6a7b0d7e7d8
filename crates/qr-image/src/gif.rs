//! Hand-rolled GIF87a writer: a 2-color global palette, LZW-compressed
//! raster data, and sub-block framing, exactly as the GIF87a grammar
//! prescribes for a 1-bit indexed image.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use qr_core::QrCode;

const CLEAR_CODE: u16 = 2;
const END_CODE: u16 = 3;
const MIN_CODE_WIDTH: u8 = 3;

struct BitPacker {
    bytes: Vec<u8>,
    buffer: u32,
    bits: u32,
}

impl BitPacker {
    fn new() -> Self {
        Self {
            bytes: Vec::new(),
            buffer: 0,
            bits: 0,
        }
    }

    fn write_code(&mut self, code: u16, width: u8) {
        self.buffer |= u32::from(code) << self.bits;
        self.bits += u32::from(width);
        while self.bits >= 8 {
            self.bytes.push((self.buffer & 0xFF) as u8);
            self.buffer >>= 8;
            self.bits -= 8;
        }
    }

    fn finish(mut self) -> Vec<u8> {
        if self.bits > 0 {
            self.bytes.push((self.buffer & 0xFF) as u8);
        }
        self.bytes
    }
}

/// Encodes a row-major array of 1-bit pixel indices (0 or 1) as GIF LZW
/// codes, per the dictionary-growth rule: codes start 3 bits wide and
/// grow by 1 bit each time the dictionary size reaches `1 << width`,
/// clearing and restarting once it would exceed 4095 entries.
fn lzw_encode(pixels: &[u8]) -> Vec<u8> {
    let mut packer = BitPacker::new();
    let mut dict: HashMap<Vec<u8>, u16> = HashMap::new();
    let mut next_code: u16 = 4;
    let mut code_width: u8 = MIN_CODE_WIDTH;

    packer.write_code(CLEAR_CODE, code_width);

    let Some((&first, rest)) = pixels.split_first() else {
        packer.write_code(END_CODE, code_width);
        return packer.finish();
    };

    let mut prefix: Vec<u8> = vec![first];
    for &pixel in rest {
        let mut extended = prefix.clone();
        extended.push(pixel);
        if dict.contains_key(&extended) {
            prefix = extended;
            continue;
        }

        let code = if prefix.len() == 1 {
            u16::from(prefix[0])
        } else {
            dict[&prefix]
        };
        packer.write_code(code, code_width);

        dict.insert(extended, next_code);
        next_code += 1;
        if next_code == (1u16 << code_width) && code_width < 12 {
            code_width += 1;
        }
        if next_code == 4096 {
            packer.write_code(CLEAR_CODE, code_width);
            dict.clear();
            next_code = 4;
            code_width = MIN_CODE_WIDTH;
        }
        prefix = vec![pixel];
    }

    let code = if prefix.len() == 1 {
        u16::from(prefix[0])
    } else {
        dict[&prefix]
    };
    packer.write_code(code, code_width);
    packer.write_code(END_CODE, code_width);
    packer.finish()
}

fn to_sub_blocks(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + data.len() / 255 + 1);
    for block in data.chunks(255) {
        out.push(block.len() as u8);
        out.extend_from_slice(block);
    }
    out.push(0);
    out
}

/// Builds the raw GIF87a bytes for a symbol rendered at `cell_size`
/// pixels per module with `margin` modules of quiet zone on every side.
/// The palette is exactly `00 00 00 FF FF FF` (index 0 black, index 1
/// white).
pub fn gif_bytes(code: &QrCode, cell_size: i32, margin: i32) -> Vec<u8> {
    let n = code.size();
    let total = n + margin * 2;
    let width = u16::try_from(total * cell_size).unwrap_or(u16::MAX);
    let height = width;

    let mut pixels = Vec::with_capacity(usize::from(width) * usize::from(height));
    for y in 0..i32::from(height) {
        for x in 0..i32::from(width) {
            let row = y / cell_size - margin;
            let col = x / cell_size - margin;
            let dark = (0..n).contains(&row) && (0..n).contains(&col) && code.get_module(col, row);
            pixels.push(u8::from(!dark)); // palette index 0 = black (dark), 1 = white (light)
        }
    }

    let mut out = Vec::new();
    out.extend_from_slice(b"GIF87a");
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.push(0x80); // global color table present, 2-entry table
    out.push(0); // background color index
    out.push(0); // pixel aspect ratio
    out.extend_from_slice(&[0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF]);

    out.push(0x2C); // image separator
    out.extend_from_slice(&0u16.to_le_bytes()); // left
    out.extend_from_slice(&0u16.to_le_bytes()); // top
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.push(0); // no local color table, not interlaced

    out.push(2); // LZW minimum code size
    out.extend(to_sub_blocks(&lzw_encode(&pixels)));

    out.push(0x3B); // trailer
    out
}

/// Renders the symbol as a `data:image/gif;base64,…` URL.
pub fn gif_data_url(code: &QrCode, cell_size: Option<i32>, margin: Option<i32>) -> String {
    let cell_size = cell_size.unwrap_or(4).max(1);
    let margin = margin.unwrap_or(4).max(0);
    let bytes = gif_bytes(code, cell_size, margin);
    format!("data:image/gif;base64,{}", STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qr_core::CodeEcc;

    #[test]
    fn header_and_trailer_are_byte_exact() {
        let qr = QrCode::encode_text("gif round trip", CodeEcc::Low).unwrap();
        let bytes = gif_bytes(&qr, 4, 4);
        assert_eq!(&bytes[0..6], b"GIF87a");
        assert_eq!(*bytes.last().unwrap(), 0x3B);
    }

    #[test]
    fn palette_is_black_then_white() {
        let qr = QrCode::encode_text("palette", CodeEcc::Low).unwrap();
        let bytes = gif_bytes(&qr, 4, 4);
        assert_eq!(&bytes[13..19], &[0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn data_url_round_trips_through_base64() {
        let qr = QrCode::encode_text("small symbol", CodeEcc::Low).unwrap();
        let url = gif_data_url(&qr, Some(4), Some(4));
        let (prefix, b64) = url.split_once(',').unwrap();
        assert_eq!(prefix, "data:image/gif;base64");
        let decoded = STANDARD.decode(b64).unwrap();
        assert_eq!(&decoded[0..6], b"GIF87a");
        assert_eq!(*decoded.last().unwrap(), 0x3B);
    }

    #[test]
    fn lzw_round_trip_decodes_back_to_original_pixels() {
        // Minimal LZW decoder mirroring the encoder's dictionary growth,
        // to check the encoder produces a self-consistent stream.
        let pixels: Vec<u8> = (0..64).map(|i| u8::from(i % 3 == 0)).collect();
        let encoded = lzw_encode(&pixels);
        let decoded = lzw_decode(&encoded);
        assert_eq!(decoded, pixels);
    }

    fn lzw_decode(data: &[u8]) -> Vec<u8> {
        let mut bitpos = 0usize;
        let mut code_width = MIN_CODE_WIDTH;
        let mut dict: Vec<Vec<u8>> = (0u16..4).map(|c| vec![c as u8]).collect();
        let mut out = Vec::new();
        let mut prev: Option<Vec<u8>> = None;

        let read_code = |bitpos: &mut usize, width: u8| -> u16 {
            let mut value = 0u32;
            for i in 0..width {
                let byte = data[(*bitpos + usize::from(i)) / 8];
                let bit = (byte >> ((*bitpos + usize::from(i)) % 8)) & 1;
                value |= u32::from(bit) << i;
            }
            *bitpos += usize::from(width);
            value as u16
        };

        loop {
            let code = read_code(&mut bitpos, code_width);
            if code == CLEAR_CODE {
                dict = (0u16..4).map(|c| vec![c as u8]).collect();
                code_width = MIN_CODE_WIDTH;
                prev = None;
                continue;
            }
            if code == END_CODE {
                break;
            }
            let entry = if (code as usize) < dict.len() {
                dict[code as usize].clone()
            } else if let Some(p) = &prev {
                let mut e = p.clone();
                e.push(p[0]);
                e
            } else {
                panic!("invalid LZW stream");
            };
            out.extend_from_slice(&entry);
            if let Some(p) = prev {
                let mut new_entry = p;
                new_entry.push(entry[0]);
                dict.push(new_entry);
                if dict.len() == (1usize << code_width) && code_width < 12 {
                    code_width += 1;
                }
            }
            prev = Some(entry);
        }
        out
    }
}
