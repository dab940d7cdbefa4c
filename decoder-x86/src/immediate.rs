//! Immediate widths per opcode map.

use decoder::Error;

use crate::decode::Cursor;
use crate::instruction::{Instruction, Mode, OpcodeMap, Prefixes, SimdPrefix};

/// One byte opcodes followed by an imm8.
const IMM8: [u8; 13] = [
    0x6a, 0x6b, 0x80, 0x82, 0x83, 0xa8, 0xc0, 0xc1, 0xc6, 0xcd, 0xd4, 0xd5, 0xeb,
];

/// One byte opcodes followed by an imm16 or imm32, depending on operand size.
const IMM32: [u8; 7] = [0x68, 0x69, 0x81, 0xa9, 0xc7, 0xe8, 0xe9];

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub(crate) struct Width {
    pub size: u8,
    /// Sign-extend the value to 64 bits.
    pub signed: bool,
}

impl Width {
    const NONE: Self = Self::unsigned(0);

    const fn unsigned(size: u8) -> Self {
        Self {
            size,
            signed: false,
        }
    }

    const fn signed(size: u8) -> Self {
        Self { size, signed: true }
    }
}

/// Immediate of an opcode in the one byte map.
///
/// Far pointers (`9A`, `EA`) have no encoding in 64-bit mode and are caught by the
/// caller before this is reached.
pub(crate) fn one_byte_size(inst: &Instruction) -> Width {
    let op = inst.opcode;
    let (row, col) = (op >> 4, op & 0xf);
    let reg = inst.modrm().reg();

    if IMM32.contains(&op)
        || (row < 4 && (col == 0x5 || col == 0xd))
        || (0xb8..=0xbf).contains(&op)
        || (op == 0xf7 && reg <= 1)
    {
        if (0xb8..=0xbf).contains(&op) {
            if inst.prefixes.contains(Prefixes::REX_W) {
                return Width::unsigned(8);
            }
            return Width::unsigned(if inst.operand_size() == 2 { 2 } else { 4 });
        }

        let size = if inst.operand_size() == 2 { 2 } else { 4 };
        let relative = op == 0xe8 || op == 0xe9;
        let pushed = op == 0x68 && inst.mode == Mode::Bits64;

        return Width {
            size,
            signed: relative || pushed || inst.operand_size() == 8,
        };
    }

    if row == 7
        || (row == 0xe && col < 8)
        || (row == 0xb && col < 8)
        || (row < 4 && (col == 0x4 || col == 0xc))
        || (op == 0xf6 && reg <= 1)
        || IMM8.contains(&op)
    {
        let signed =
            row == 7 || (0xe0..=0xe3).contains(&op) || matches!(op, 0x6a | 0x6b | 0x83 | 0xeb);
        return Width { size: 1, signed };
    }

    match op {
        0xa0..=0xa3 => Width::unsigned(inst.address_size()),
        0x9a | 0xea => Width::unsigned(if inst.operand_size() == 2 { 4 } else { 6 }),
        0xc2 | 0xca => Width::unsigned(2),
        0xc8 => Width::unsigned(3),
        _ => Width::NONE,
    }
}

/// Immediate of an opcode in the `0F` map.
pub(crate) fn two_byte_size(inst: &Instruction) -> Width {
    let op = inst.opcode;

    match op {
        0x80..=0x8f => {
            let size = if inst.mode != Mode::Bits64 && inst.operand_size() == 2 { 2 } else { 4 };
            Width::signed(size)
        }
        0x70..=0x73 | 0xa4 | 0xac | 0xba | 0xc2 | 0xc4..=0xc6 => Width::unsigned(1),
        0x78 if matches!(inst.simd_prefix, SimdPrefix::OperandSize | SimdPrefix::RepeatNotZero) => {
            Width::unsigned(2)
        }
        _ => Width::NONE,
    }
}

/// Immediate of a VEX encoded opcode.
pub(crate) fn vex_size(inst: &Instruction) -> Width {
    match inst.opcode_map {
        OpcodeMap::Map0F3A => Width::unsigned(1),
        OpcodeMap::Map0F => match inst.opcode {
            0x70..=0x73 | 0xc2 | 0xc4..=0xc6 => Width::unsigned(1),
            _ => Width::NONE,
        },
        _ => Width::NONE,
    }
}

/// Reads the immediate into `inst`, sign-extending it when `width` asks for it.
pub(crate) fn read(cursor: &mut Cursor, inst: &mut Instruction, width: Width) -> Result<(), Error> {
    let size = width.size as usize;
    let mut value = cursor.read_le(size)?;

    if width.signed && size > 0 && size < 8 {
        let shift = 64 - size as u32 * 8;
        value = (((value << shift) as i64) >> shift) as u64;
    }

    inst.immediate = value;
    inst.imm_mask = width.size;
    Ok(())
}
