//! Byte-level image codecs and text-surface renderers for `qr-core`
//! symbols.
//!
//! Every renderer here consumes only a built [`qr_core::QrCode`]'s module
//! count and module-color view; none of them touch segments, codewords,
//! or masks directly.
//!
//! # Examples
//!
//! ```
//! use qr_core::{CodeEcc, QrCode};
//! use qr_image::{ascii_text, png_data_url};
//!
//! let qr = QrCode::encode_text("https://neabyte.com/", CodeEcc::Low).unwrap();
//! let _art = ascii_text(&qr, Some(1), Some(2));
//! let _url = png_data_url(&qr, Some(4), Some(4), None, None);
//! ```

mod gif;
mod png;
mod surface;

pub use gif::{gif_bytes, gif_data_url};
pub use png::{png_bytes, png_data_url};
pub use surface::{ascii_text, html_table, svg_path};
