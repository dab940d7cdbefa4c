use super::{hex, CORPUS};
use crate::ldisasm::lengths;
use crate::{decode, ldisasm, DecoderFlags, LdisasmFlags, Mode};

const MODES: [Mode; 3] = [Mode::Bits16, Mode::Bits32, Mode::Bits64];

fn agrees(bytes: &[u8], mode: Mode) {
    let len = ldisasm(bytes, mode, LdisasmFlags::MINIMAL);
    let decoded = decode(bytes, mode, DecoderFlags::MINIMAL).ok().map(|inst| inst.length as usize);
    assert_eq!(len, decoded, "ldisasm and decode disagree on {} in {:?}", hex(bytes), mode);
}

#[test]
fn corpus_lengths() {
    for &(mode, bytes) in CORPUS {
        assert_eq!(ldisasm(bytes, mode, LdisasmFlags::ALL), Some(bytes.len()), "{}", hex(bytes));
        agrees(bytes, mode);
    }
}

#[test]
fn agrees_on_one_byte() {
    for mode in MODES {
        for byte in 0..=u8::MAX {
            agrees(&[byte], mode);
        }
    }
}

#[test]
fn agrees_on_two_bytes() {
    let mut padded = [0u8; crate::MAX_LENGTH];
    for mode in MODES {
        for first in 0..=u8::MAX {
            for second in 0..=u8::MAX {
                agrees(&[first, second], mode);

                padded[0] = first;
                padded[1] = second;
                agrees(&padded, mode);
            }
        }
    }
}

#[test]
fn agrees_on_escapes() {
    let mut buf = [0u8; 8];
    for mode in MODES {
        for escape in [[0x0f, 0x38], [0x0f, 0x3a], [0xc5, 0xf8], [0x66, 0x0f]] {
            for op in 0..=u8::MAX {
                for modrm in [0x00, 0x05, 0x44, 0x84, 0xc1] {
                    buf[..2].copy_from_slice(&escape);
                    buf[2] = op;
                    buf[3] = modrm;
                    agrees(&buf, mode);
                }
            }
        }
    }
}

#[test]
fn validity_is_optional() {
    let bytes = [0x0f, 0x24, 0xc0];
    assert_eq!(ldisasm(&bytes, Mode::Bits64, LdisasmFlags::MINIMAL), None);
    assert_eq!(ldisasm(&bytes, Mode::Bits64, LdisasmFlags::VEX), Some(3));
}

#[test]
fn vex_is_optional() {
    let bytes = [0xc4, 0xe2, 0x7d, 0x58, 0xc1];
    assert_eq!(ldisasm(&bytes, Mode::Bits32, LdisasmFlags::MINIMAL), Some(5));
    assert_eq!(ldisasm(&bytes, Mode::Bits32, LdisasmFlags::empty()), Some(2));
    assert_eq!(ldisasm(&bytes, Mode::Bits32, LdisasmFlags::VALIDITY_CHECK), None);
}

#[test]
fn three_dnow_is_optional() {
    let bytes = [0x0f, 0x0f, 0xc1, 0x9e];
    assert_eq!(ldisasm(&bytes, Mode::Bits32, LdisasmFlags::MINIMAL), None);
    assert_eq!(ldisasm(&bytes, Mode::Bits32, LdisasmFlags::ALL), Some(4));
}

#[test]
fn walks_code() {
    // push rbp; mov rbp, rsp; (bad); ret
    let code = [0x55, 0x48, 0x89, 0xe5, 0x06, 0xc3];
    let walked: Vec<_> = lengths(&code, Mode::Bits64, LdisasmFlags::MINIMAL).collect();
    assert_eq!(walked, [(0, Some(1)), (1, Some(3)), (4, None), (5, Some(1))]);

    assert_eq!(lengths(&[], Mode::Bits64, LdisasmFlags::MINIMAL).count(), 0);
}
