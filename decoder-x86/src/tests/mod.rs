#![cfg(test)]

mod asm;
mod decode;
mod format;
mod ldisasm;

use std::fmt::Write;

use crate::decode::decode;
use crate::{format, DecoderFlags, FormatterFlags, Mode};

/// Well formed instructions across all three modes.
const CORPUS: &[(Mode, &[u8])] = &[
    (Mode::Bits32, &[0x90]),
    (Mode::Bits32, &[0xb8, 0x01, 0x00, 0x00, 0x00]),
    (Mode::Bits64, &[0x0f, 0x05]),
    (Mode::Bits64, &[0x48, 0x89, 0xe5]),
    (Mode::Bits64, &[0x48, 0x83, 0xec, 0x20]),
    (Mode::Bits64, &[0x48, 0x8b, 0x05, 0x10, 0x00, 0x00, 0x00]),
    (Mode::Bits64, &[0x64, 0x48, 0x8b, 0x04, 0x25, 0x28, 0x00, 0x00, 0x00]),
    (Mode::Bits64, &[0x48, 0xb8, 0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11]),
    (Mode::Bits64, &[0x41, 0x54]),
    (Mode::Bits64, &[0xe8, 0x00, 0x00, 0x00, 0x00]),
    (Mode::Bits64, &[0x0f, 0x84, 0x10, 0x00, 0x00, 0x00]),
    (Mode::Bits64, &[0xf3, 0x48, 0xab]),
    (Mode::Bits64, &[0xc5, 0xf8, 0x77]),
    (Mode::Bits64, &[0xc5, 0xf0, 0x58, 0xc2]),
    (Mode::Bits64, &[0x66, 0x0f, 0x3a, 0x0f, 0xc1, 0x08]),
    (Mode::Bits64, &[0x0f, 0x38, 0xf0, 0x06]),
    (Mode::Bits64, &[0xf0, 0x0f, 0xb1, 0x0a]),
    (Mode::Bits32, &[0x8b, 0x45, 0xf8]),
    (Mode::Bits32, &[0x8b, 0x04, 0x8d, 0x00, 0x10, 0x00, 0x00]),
    (Mode::Bits32, &[0x9a, 0x78, 0x56, 0x34, 0x12, 0x08, 0x00]),
    (Mode::Bits32, &[0xc4, 0xe2, 0x7d, 0x58, 0xc1]),
    (Mode::Bits32, &[0x81, 0x84, 0x88, 0x00, 0x01, 0x00, 0x00, 0x78, 0x56, 0x34, 0x12]),
    (Mode::Bits32, &[0xd9, 0xe8]),
    (Mode::Bits32, &[0xdb, 0xe3]),
    (Mode::Bits16, &[0x8b, 0x46, 0xfe]),
    (Mode::Bits16, &[0xb8, 0x34, 0x12]),
    (Mode::Bits16, &[0xe9, 0x00, 0x01]),
    (Mode::Bits16, &[0x66, 0x67, 0x8b, 0x04, 0x24]),
];

fn hex(data: &[u8]) -> String {
    let mut hex = String::new();
    for b in data {
        write!(hex, "{:02x}", b).unwrap();
    }
    hex
}

fn test_display(mode: Mode, data: &[u8], expected: &str) {
    test_display_under(mode, FormatterFlags::DEFAULT, 0, data, expected);
}

fn test_display_under(
    mode: Mode,
    flags: FormatterFlags,
    address: u64,
    data: &[u8],
    expected: &str,
) {
    match decode(data, mode, DecoderFlags::ALL) {
        Ok(inst) => {
            let text = format(&inst, address, flags);
            assert!(
                text == expected,
                "display error for {} in {:?}:\n displayed: {}\n  expected: {}\n",
                hex(data),
                mode,
                text,
                expected
            );
            assert_eq!(
                inst.length as usize,
                data.len(),
                "instruction length is incorrect, wanted instruction {}",
                expected
            );
        }
        Err(e) => {
            let data = hex(data);
            panic!("decode error ({e}) for {data} in {mode:?}:\n  expected: {expected}\n");
        }
    }
}

fn test_invalid(mode: Mode, data: &[u8]) {
    if let Ok(inst) = decode(data, mode, DecoderFlags::ALL) {
        panic!(
            "decoded {} in {:?} as {} of length {}, expected an error",
            hex(data),
            mode,
            format(&inst, 0, FormatterFlags::DEFAULT),
            inst.length
        );
    }
}
