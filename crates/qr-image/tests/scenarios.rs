use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use qr_core::Symbol;
use qr_image::{gif_data_url, png_data_url};

#[test]
fn scenario_2_auto_version_png_data_url() {
    let mut sym = Symbol::create(0, "L").unwrap();
    sym.add_data("https://neabyte.com/", "Byte").unwrap();
    sym.make().unwrap();

    let version = sym.version().unwrap();
    assert!(version.value() >= 2);

    let code = sym.as_code().unwrap();
    let url = png_data_url(code, None, None, None, None);
    assert!(url.starts_with("data:image/png;base64,iVBORw0KGgo"));

    let (_, b64) = url.split_once(',').unwrap();
    let bytes = STANDARD.decode(b64).unwrap();
    assert_eq!(&bytes[0..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
}

#[test]
fn scenario_6_gif_round_trip() {
    let mut sym = Symbol::create(1, "L").unwrap();
    sym.add_data("small symbol", "Byte").unwrap();
    sym.make().unwrap();
    let code = sym.as_code().unwrap();

    let url = gif_data_url(code, Some(4), None);
    let (_, b64) = url.split_once(',').unwrap();
    let bytes = STANDARD.decode(b64).unwrap();
    assert_eq!(&bytes[0..6], b"GIF87a");
    assert_eq!(*bytes.last().unwrap(), 0x3B);
}
