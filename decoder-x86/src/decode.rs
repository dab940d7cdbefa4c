//! Opcode map dispatch, the grammar shared by [`decode`] and [`crate::ldisasm`].

use decoder::{Error, ErrorKind, Reader};

use crate::instruction::{Encoding, Instruction, Mode, OpcodeMap, SimdPrefix, Vex, MAX_LENGTH};
use crate::{cpu_flags, group, id, immediate, modrm, operands, prefix, validity, DecoderFlags};

/// Trailing opcode bytes of the 3DNow! map.
pub const THREE_DNOW_OPCODES: [u8; 24] = [
    0x0c, 0x0d, 0x1c, 0x1d, 0x8a, 0x8e, 0x90, 0x94, 0x96, 0x97, 0x9a, 0x9e, 0xa0, 0xa4, 0xa6, 0xa7,
    0xaa, 0xae, 0xb0, 0xb4, 0xb6, 0xb7, 0xbb, 0xbf,
];

/// One byte opcodes with a ModR/M byte outside of the regular rows.
const ONE_BYTE_MODRM: [u8; 18] = [
    0x62, 0x63, 0x69, 0x6b, 0xc0, 0xc1, 0xc4, 0xc5, 0xc6, 0xc7, 0xd0, 0xd1, 0xd2, 0xd3, 0xf6, 0xf7,
    0xfe, 0xff,
];

/// Input limited to [`MAX_LENGTH`] bytes, errors carry how much was consumed.
pub(crate) struct Cursor<'data> {
    reader: Reader<'data>,
}

impl<'data> Cursor<'data> {
    pub fn new(bytes: &'data [u8]) -> Self {
        let len = bytes.len().min(MAX_LENGTH);
        Self {
            reader: Reader::new(&bytes[..len]),
        }
    }

    pub fn consumed(&self) -> usize {
        self.reader.total_offset()
    }

    /// Error for running out of bytes at the current position.
    pub fn exhausted(&self) -> Error {
        let consumed = self.consumed();
        if consumed >= MAX_LENGTH {
            Error::new(ErrorKind::TooLong, consumed)
        } else {
            Error::new(ErrorKind::ExhaustedInput, consumed)
        }
    }

    pub fn error(&self, kind: ErrorKind) -> Error {
        Error::new(kind, self.consumed())
    }

    pub fn byte(&mut self) -> Result<u8, Error> {
        self.reader.next().ok_or_else(|| self.exhausted())
    }

    pub fn peek(&self) -> Option<u8> {
        self.reader.peek()
    }

    /// Little endian value of `n <= 8` bytes.
    pub fn read_le(&mut self, n: usize) -> Result<u64, Error> {
        let mut buf = [0u8; 8];
        let dst = buf.get_mut(..n).ok_or_else(|| self.error(ErrorKind::TooLong))?;

        match self.reader.next_n(dst) {
            Some(()) => Ok(u64::from_le_bytes(buf)),
            // what's left still counts towards the instruction
            None => {
                let _ = self.reader.skip(self.reader.remaining().len());
                Err(self.exhausted())
            }
        }
    }
}

/// Decodes a single instruction from the start of `bytes`.
///
/// At most [`MAX_LENGTH`] bytes are looked at. Annotations are only computed for
/// the requested `flags`.
pub fn decode(bytes: &[u8], mode: Mode, flags: DecoderFlags) -> Result<Instruction, Error> {
    let mut inst = parse(bytes, mode, flags)?;

    if flags.contains(DecoderFlags::INSTRUCTION_ID) {
        inst.id = id::identify(&inst);
    }

    if flags.contains(DecoderFlags::CPU_FLAGS) {
        inst.cpu_flags = cpu_flags::effects(&inst);
    }

    if flags.contains(DecoderFlags::OPERANDS) {
        operands::annotate(&mut inst);
    }

    if flags.contains(DecoderFlags::GROUP) {
        inst.group = group::classify(&inst);
    }

    inst.valid = true;
    Ok(inst)
}

/// Prefixes, opcode, ModR/M, validity and immediate of one instruction.
pub(crate) fn parse(bytes: &[u8], mode: Mode, flags: DecoderFlags) -> Result<Instruction, Error> {
    let mut cursor = Cursor::new(bytes);
    let mut inst = Instruction::empty(mode);
    let check = flags.contains(DecoderFlags::VALIDITY_CHECK);

    prefix::scan(&mut cursor, mode, &mut inst)?;
    inst.encoding = Encoding::Legacy;

    let op = cursor.byte()?;
    let vex_escape = op == 0xc4 || op == 0xc5;
    if op == 0x0f {
        escape_0f(&mut cursor, &mut inst, flags)?;
    } else if vex_escape && flags.contains(DecoderFlags::VEX) && is_vex(&cursor, mode) {
        vex(&mut cursor, &mut inst, op, check)?;
    } else if op == 0x62 && flags.contains(DecoderFlags::EVEX) && is_vex(&cursor, mode) {
        // detected, decoding its payload isn't supported
        return Err(cursor.error(ErrorKind::Unimplemented));
    } else {
        one_byte(&mut cursor, &mut inst, op, check)?;
    }

    let locked = inst.has_prefix(crate::instruction::Prefixes::LOCK);
    if check && locked && !validity::valid_lock(&inst) {
        return Err(cursor.error(ErrorKind::InvalidPrefixes));
    }

    let length = cursor.consumed();
    inst.length = length as u8;
    inst.bytes[..length].copy_from_slice(&bytes[..length]);
    Ok(inst)
}

/// `C4`, `C5` and `62` are VEX/EVEX in long mode, elsewhere only if the byte that
/// would be their ModR/M is a register form.
fn is_vex(cursor: &Cursor, mode: Mode) -> bool {
    mode == Mode::Bits64 || cursor.peek().is_some_and(|byte| byte >> 6 == 0b11)
}

fn one_byte(cursor: &mut Cursor, inst: &mut Instruction, op: u8, check: bool) -> Result<(), Error> {
    inst.opcode = op;
    inst.opcode_size = 1;
    inst.opcode_map = OpcodeMap::Default;

    let (row, col) = (op >> 4, op & 0xf);
    let has_modrm = row == 8
        || ONE_BYTE_MODRM.contains(&op)
        || (row < 4 && (col < 4 || (0x8..0xc).contains(&col)))
        || (row == 0xd && col >= 8);

    if has_modrm {
        modrm::parse(cursor, inst)?;
    }

    if check && !validity::valid_one_byte(inst) {
        return Err(cursor.error(ErrorKind::InvalidOpcode));
    }

    // far pointers have no encoding in long mode
    if (op == 0x9a || op == 0xea) && inst.mode == Mode::Bits64 {
        return Err(cursor.error(ErrorKind::InvalidOpcode));
    }

    immediate::read(cursor, inst, immediate::one_byte_size(inst))
}

fn escape_0f(
    cursor: &mut Cursor,
    inst: &mut Instruction,
    flags: DecoderFlags,
) -> Result<(), Error> {
    let check = flags.contains(DecoderFlags::VALIDITY_CHECK);
    let op = cursor.byte()?;

    match op {
        0x38 | 0x3a => {
            inst.opcode_size = 3;
            inst.opcode_map = if op == 0x38 { OpcodeMap::Map0F38 } else { OpcodeMap::Map0F3A };
            inst.opcode = cursor.byte()?;
            modrm::parse(cursor, inst)?;

            if inst.opcode_map == OpcodeMap::Map0F3A {
                immediate::read(cursor, inst, immediate::Width { size: 1, signed: false })?;
            }

            let valid = match inst.opcode_map {
                OpcodeMap::Map0F38 => validity::valid_0f38(inst),
                _ => validity::valid_0f3a(inst),
            };

            if check && !valid {
                return Err(cursor.error(ErrorKind::InvalidOpcode));
            }
        }
        0x0f => {
            if !flags.contains(DecoderFlags::THREE_DNOW) {
                return Err(cursor.error(ErrorKind::InvalidOpcode));
            }

            inst.opcode_size = 2;
            inst.opcode_map = OpcodeMap::Map0F0F;
            inst.encoding = Encoding::ThreeDNow;
            modrm::parse(cursor, inst)?;

            // the real opcode trails the operands
            inst.opcode = cursor.byte()?;
            if check && !THREE_DNOW_OPCODES.contains(&inst.opcode) {
                return Err(cursor.error(ErrorKind::InvalidOpcode));
            }
        }
        _ => {
            inst.opcode_size = 2;
            inst.opcode_map = OpcodeMap::Map0F;
            inst.opcode = op;

            if (0x20..=0x23).contains(&op) {
                modrm::parse_register_only(cursor, inst)?;
            } else if has_modrm_0f(op) {
                modrm::parse(cursor, inst)?;
            }

            if check && !validity::valid_0f(inst) {
                return Err(cursor.error(ErrorKind::InvalidOpcode));
            }

            immediate::read(cursor, inst, immediate::two_byte_size(inst))?;
        }
    }

    Ok(())
}

fn has_modrm_0f(op: u8) -> bool {
    let (row, col) = (op >> 4, op & 0xf);

    op < 4
        || (row != 3 && row > 0 && row < 7)
        || (op >= 0xd0 && op != 0xff)
        || (row == 7 && col != 7)
        || row == 9
        || row == 0xb
        || (row == 0xc && col < 8)
        || (row == 0xa && op % 8 >= 3)
        || matches!(op, 0xff | 0x00 | 0x0d)
}

fn vex(cursor: &mut Cursor, inst: &mut Instruction, escape: u8, check: bool) -> Result<(), Error> {
    let vex = if escape == 0xc4 {
        let byte1 = cursor.byte()?;
        let byte2 = cursor.byte()?;
        Vex::from_c4(byte1, byte2)
    } else {
        Vex::from_c5(cursor.byte()?)
    };

    inst.encoding = Encoding::Vex;
    inst.vex = Some(vex);
    inst.simd_prefix = SimdPrefix::from_pp(vex.pp);
    inst.rex_w = vex.w && inst.mode == Mode::Bits64;
    inst.opcode_map = match vex.m_mmmm {
        2 => OpcodeMap::Map0F38,
        3 => OpcodeMap::Map0F3A,
        _ => OpcodeMap::Map0F,
    };

    // only one opcode byte is physically present
    inst.opcode_size = 1;
    inst.opcode = cursor.byte()?;

    // vzeroupper and vzeroall
    let no_modrm = inst.opcode_map == OpcodeMap::Map0F && inst.opcode == 0x77;
    if !no_modrm {
        modrm::parse(cursor, inst)?;
    }

    if check && !validity::valid_vex(inst) {
        return Err(cursor.error(ErrorKind::InvalidOpcode));
    }

    immediate::read(cursor, inst, immediate::vex_size(inst))
}
