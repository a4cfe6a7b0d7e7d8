use qr_core::{BitBuffer, CodeEcc, QrCode, QrError, Segment, SegmentMode, Symbol};

#[test]
fn scenario_1_hello_world_alphanumeric() {
    let mut sym = Symbol::create(1, "H").unwrap();
    sym.add_data("HELLO WORLD", "Alphanumeric").unwrap();
    sym.make().unwrap();
    assert_eq!(sym.module_count().unwrap(), 21);

    // Finder pattern corners and timing alternation, as a proxy for a full
    // decode: a symbol a decoder can read has these in place regardless of
    // payload.
    let code = sym.as_code().unwrap();
    let n = code.size();
    assert!(code.get_module(0, 0));
    assert!(code.get_module(n - 7, 0));
    assert!(code.get_module(0, n - 7));
    for i in 0..n - 16 {
        assert_eq!(code.get_module(8, 8 + i), i % 2 == 0);
    }
}

#[test]
fn scenario_3_byte_mode_codeword_stream() {
    let ver = qr_core::Version::new(1);
    let seg = Segment::make_bytes(b"A");
    let mut bb = BitBuffer(Vec::new());
    bb.append_bits(seg.mode().mode_bits(), 4);
    bb.append_bits(
        u32::try_from(seg.num_chars()).unwrap(),
        seg.mode().num_char_count_bits(ver),
    );
    bb.0.extend_from_slice(seg.data());
    let first_byte: u8 = (0..8).fold(0u8, |acc, i| (acc << 1) | u8::from(bb.0[i]));
    assert_eq!(first_byte >> 4, 0b0100);

    let total_codewords = QrCode::get_num_data_codewords(ver, CodeEcc::Low)
        + qr_core::table_get(&qr_core::ECC_CODEWORDS_PER_BLOCK, ver, CodeEcc::Low)
            * qr_core::table_get(&qr_core::NUM_ERROR_CORRECTION_BLOCKS, ver, CodeEcc::Low);
    assert_eq!(total_codewords, 26);

    let qr = QrCode::encode_segments_advanced(&[seg], CodeEcc::Low, ver, ver, None).unwrap();
    assert_eq!(qr.size(), 21);
}

#[test]
fn scenario_4_overflow_reports_code_overflow() {
    let mut sym = Symbol::create(1, "H").unwrap();
    sym.add_data(&"x".repeat(100), "Byte").unwrap();
    let err = sym.make().unwrap_err();
    assert!(matches!(err, QrError::CodeOverflow { .. }));
}

#[test]
fn scenario_5_bad_character_reports_offset() {
    let mut sym = Symbol::create(1, "L").unwrap();
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
