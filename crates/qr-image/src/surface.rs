//! Text-surface renderers: ASCII art, an HTML `<table>`, and an SVG
//! path-d string. All three consume only a built [`QrCode`]'s module
//! count and `get_module` view.

use qr_core::QrCode;

fn dark_at(code: &QrCode, margin: i32, row: i32, col: i32) -> bool {
    let n = code.size();
    row >= margin
        && row < margin + n
        && col >= margin
        && col < margin + n
        && code.get_module(col - margin, row - margin)
}

/// Renders the symbol as text. At `cell_size >= 2`, each module is drawn
/// as `cell_size` lines of `"██"`/two spaces repeated `cell_size` times
/// horizontally. At `cell_size == 1` (the default, and what a `0` request
/// is coerced to), pairs of module rows are compressed into a single line
/// using half-block characters (`█ ▀ ▄ ' '`).
pub fn ascii_text(code: &QrCode, cell_size: Option<i32>, margin: Option<i32>) -> String {
    let cell_size = match cell_size {
        Some(n) if n >= 2 => n,
        _ => 1,
    };
    let margin = margin.unwrap_or(4).max(0);
    let total = code.size() + margin * 2;

    let mut out = String::new();
    if cell_size == 1 {
        let mut row = 0;
        while row < total {
            for col in 0..total {
                let top = dark_at(code, margin, row, col);
                let bottom = row + 1 < total && dark_at(code, margin, row + 1, col);
                out.push(match (top, bottom) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                });
            }
            out.push('\n');
            row += 2;
        }
    } else {
        for row in 0..total {
            let line: String = (0..total)
                .flat_map(|col| {
                    let unit = if dark_at(code, margin, row, col) {
                        "██"
                    } else {
                        "  "
                    };
                    std::iter::repeat(unit).take(cell_size as usize)
                })
                .collect();
            for _ in 0..cell_size {
                out.push_str(&line);
                out.push('\n');
            }
        }
    }
    out
}

/// Renders the symbol as an HTML `<table>` with one `<td>` per module,
/// colored via inline styles.
pub fn html_table(code: &QrCode, cell_size: Option<i32>, margin: Option<i32>) -> String {
    let cell_size = cell_size.unwrap_or(4).max(1);
    let margin = margin.unwrap_or(4).max(0);
    let total = code.size() + margin * 2;

    let mut out = String::from("<table style=\"border-collapse:collapse\">\n");
    for row in 0..total {
        out.push_str("<tr>");
        for col in 0..total {
            let color = if dark_at(code, margin, row, col) {
                "#000000"
            } else {
                "#ffffff"
            };
            out.push_str(&format!(
                "<td style=\"width:{cell_size}px;height:{cell_size}px;background:{color}\"></td>"
            ));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>");
    out
}

/// Returns the `d` attribute content for an SVG `<path>`: one
/// `M x,y l s,0 0,s -s,0 0,-s z` subpath per dark module, where `s` is
/// `cell_size`. The caller wraps this in `<path d="…">`.
pub fn svg_path(code: &QrCode, cell_size: Option<i32>, margin: Option<i32>) -> String {
    let s = cell_size.unwrap_or(4).max(1);
    let margin = margin.unwrap_or(4).max(0);
    let n = code.size();

    let mut d = String::new();
    for y in 0..n {
        for x in 0..n {
            if code.get_module(x, y) {
                let px = (x + margin) * s;
                let py = (y + margin) * s;
                d.push_str(&format!("M{px},{py} l{s},0 0,{s} -{s},0 0,-{s} z "));
            }
        }
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use qr_core::CodeEcc;

    #[test]
    fn ascii_half_block_at_cell_size_one() {
        let qr = QrCode::encode_text("ascii render test", CodeEcc::Low).unwrap();
        let art = ascii_text(&qr, Some(1), Some(0));
        assert!(art.chars().any(|c| "█▀▄ ".contains(c)));
        assert_eq!(art.lines().count() as i32, (qr.size() + 1) / 2);
    }

    #[test]
    fn ascii_cell_size_zero_defaults_to_half_block() {
        let qr = QrCode::encode_text("zero cell size", CodeEcc::Low).unwrap();
        let a = ascii_text(&qr, Some(0), Some(0));
        let b = ascii_text(&qr, Some(1), Some(0));
        assert_eq!(a, b);
    }

    #[test]
    fn ascii_two_chars_per_module_at_cell_size_two() {
        let qr = QrCode::encode_text("X", CodeEcc::Low).unwrap();
        let art = ascii_text(&qr, Some(2), Some(0));
        let first_line = art.lines().next().unwrap();
        assert_eq!(first_line.chars().count() as i32, qr.size() * 2 * 2);
    }

    #[test]
    fn html_table_has_one_td_per_module_plus_margin() {
        let qr = QrCode::encode_text("table", CodeEcc::Medium).unwrap();
        let html = html_table(&qr, Some(4), Some(1));
        let expected = ((qr.size() + 2) * (qr.size() + 2)) as usize;
        assert_eq!(html.matches("<td").count(), expected);
    }

    #[test]
    fn svg_path_emits_one_subpath_per_dark_module() {
        let qr = QrCode::encode_text("svg", CodeEcc::Low).unwrap();
        let path = svg_path(&qr, Some(4), Some(0));
        let mut dark_count = 0;
        for y in 0..qr.size() {
            for x in 0..qr.size() {
                if qr.get_module(x, y) {
                    dark_count += 1;
                }
            }
        }
        assert_eq!(path.matches('M').count(), dark_count as usize);
    }
}
