//! Hand-rolled PNG writer: IHDR/IDAT/IEND chunk framing, CRC-32, Adler-32,
//! and zlib-wrapped raw deflate over the module grid's pixel scanlines.
//! Pixel data is grayscale when no `fg`/`bg` pair is given, RGB otherwise.

use std::sync::OnceLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use qr_core::QrCode;

const SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

fn crc_table() -> &'static [u32; 256] {
    static TABLE: OnceLock<[u32; 256]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [0u32; 256];
        for (n, slot) in table.iter_mut().enumerate() {
            let mut c = n as u32;
            for _ in 0..8 {
                c = if c & 1 != 0 {
                    0xEDB8_8320 ^ (c >> 1)
                } else {
                    c >> 1
                };
            }
            *slot = c;
        }
        table
    })
}

fn crc32(data: &[u8]) -> u32 {
    let table = crc_table();
    let mut c = 0xFFFF_FFFFu32;
    for &b in data {
        c = table[((c ^ u32::from(b)) & 0xFF) as usize] ^ (c >> 8);
    }
    c ^ 0xFFFF_FFFF
}

fn adler32(data: &[u8]) -> u32 {
    const MODULUS: u32 = 65521;
    let mut a = 1u32;
    let mut b = 0u32;
    for &byte in data {
        a = (a + u32::from(byte)) % MODULUS;
        b = (b + a) % MODULUS;
    }
    (b << 16) | a
}

fn chunk(kind: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(4 + data.len());
    body.extend_from_slice(kind);
    body.extend_from_slice(data);

    let mut out = Vec::with_capacity(8 + body.len());
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(&body);
    out.extend_from_slice(&crc32(&body).to_be_bytes());
    out
}

/// Builds the raw PNG bytes for a symbol rendered at `cell_size` pixels
/// per module with `margin` modules of quiet zone on every side.
pub fn png_bytes(
    code: &QrCode,
    cell_size: i32,
    margin: i32,
    fg: Option<[u8; 3]>,
    bg: Option<[u8; 3]>,
) -> Vec<u8> {
    let n = code.size();
    let total = n + margin * 2;
    let width = total * cell_size;
    let height = width;

    let (channels, color_type) = if fg.is_none() && bg.is_none() {
        (1usize, 0u8)
    } else {
        (3usize, 2u8)
    };
    let fg = fg.unwrap_or([0, 0, 0]);
    let bg = bg.unwrap_or([255, 255, 255]);

    let dark_at = |px: i32, py: i32| -> bool {
        let row = py / cell_size - margin;
        let col = px / cell_size - margin;
        (0..n).contains(&row) && (0..n).contains(&col) && code.get_module(col, row)
    };

    let mut scanlines = Vec::with_capacity((height * (1 + width * channels as i32)) as usize);
    for y in 0..height {
        scanlines.push(0u8); // filter type: none
        for x in 0..width {
            let color = if dark_at(x, y) { fg } else { bg };
            if channels == 1 {
                scanlines.push(color[0]);
            } else {
                scanlines.extend_from_slice(&color);
            }
        }
    }

    let adler = adler32(&scanlines);
    let deflated = miniz_oxide::deflate::compress_to_vec(&scanlines, 6);
    let mut idat = Vec::with_capacity(2 + deflated.len() + 4);
    idat.extend_from_slice(&[0x78, 0x9C]);
    idat.extend_from_slice(&deflated);
    idat.extend_from_slice(&adler.to_be_bytes());

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr.push(8); // bit depth
    ihdr.push(color_type);
    ihdr.push(0); // compression method
    ihdr.push(0); // filter method
    ihdr.push(0); // interlace method

    let mut out = Vec::from(SIGNATURE);
    out.extend(chunk(b"IHDR", &ihdr));
    out.extend(chunk(b"IDAT", &idat));
    out.extend(chunk(b"IEND", &[]));
    out
}

/// Renders the symbol as a `data:image/png;base64,…` URL.
pub fn png_data_url(
    code: &QrCode,
    cell_size: Option<i32>,
    margin: Option<i32>,
    fg: Option<[u8; 3]>,
    bg: Option<[u8; 3]>,
) -> String {
    let cell_size = cell_size.unwrap_or(4).max(1);
    let margin = margin.unwrap_or(4).max(0);
    let bytes = png_bytes(code, cell_size, margin, fg, bg);
    format!("data:image/png;base64,{}", STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qr_core::CodeEcc;

    #[test]
    fn signature_and_chunk_order() {
        let qr = QrCode::encode_text("png test", CodeEcc::Low).unwrap();
        let bytes = png_bytes(&qr, 4, 4, None, None);
        assert_eq!(&bytes[0..8], &SIGNATURE);
        assert_eq!(&bytes[12..16], b"IHDR");
        let ihdr_len = u32::from_be_bytes(bytes[8..12].try_into().unwrap()) as usize;
        let idat_offset = 8 + 12 + ihdr_len + 4;
        assert_eq!(&bytes[idat_offset + 4..idat_offset + 8], b"IDAT");
        assert_eq!(&bytes[bytes.len() - 12..bytes.len() - 8], b"IEND");
    }

    #[test]
    fn zlib_header_is_78_9c() {
        let qr = QrCode::encode_text("zlib header", CodeEcc::Low).unwrap();
        let bytes = png_bytes(&qr, 4, 4, None, None);
        let ihdr_len = u32::from_be_bytes(bytes[8..12].try_into().unwrap()) as usize;
        let idat_data_offset = 8 + 12 + ihdr_len + 4 + 8;
        assert_eq!(&bytes[idat_data_offset..idat_data_offset + 2], &[0x78, 0x9C]);
    }

    #[test]
    fn crc_is_deterministic_and_matches_zlib_polynomial() {
        // Known CRC-32 (0xEDB88320 reflected polynomial) of the ASCII bytes "123456789".
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn adler32_known_vector() {
        assert_eq!(adler32(b"Wikipedia"), 0x11E6_0398);
    }

    #[test]
    fn data_url_has_expected_prefix() {
        let qr = QrCode::encode_text("https://neabyte.com/", CodeEcc::Low).unwrap();
        let url = png_data_url(&qr, Some(4), Some(4), None, None);
        assert!(url.starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn rgb_mode_used_when_colors_given() {
        let qr = QrCode::encode_text("rgb", CodeEcc::Low).unwrap();
        let gray = png_bytes(&qr, 4, 4, None, None);
        let rgb = png_bytes(&qr, 4, 4, Some([255, 0, 0]), Some([0, 255, 0]));
        assert_ne!(gray.len(), rgb.len());
    }
}
