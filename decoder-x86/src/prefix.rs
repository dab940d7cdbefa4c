//! Legacy and REX prefixes.

use decoder::Error;

use crate::decode::Cursor;
use crate::instruction::{Instruction, Mode, Prefixes, Rex, Segment, SimdPrefix};

/// Consumes every prefix byte in front of the opcode.
///
/// Segment overrides and the SIMD slot (`66`, `F2`, `F3`) are last-one-wins, all of
/// them are still recorded in `prefixes`. A REX byte replaces the bits of any earlier
/// REX byte.
pub(crate) fn scan(cursor: &mut Cursor, mode: Mode, inst: &mut Instruction) -> Result<(), Error> {
    loop {
        let byte = cursor.peek().ok_or_else(|| cursor.exhausted())?;

        match byte {
            0xf0 => inst.prefixes |= Prefixes::LOCK,
            0xf2 => {
                inst.prefixes |= Prefixes::REPEAT_NOT_ZERO;
                inst.simd_prefix = SimdPrefix::RepeatNotZero;
                inst.repeat_prefix = false;
            }
            0xf3 => {
                inst.prefixes |= Prefixes::REPEAT;
                inst.simd_prefix = SimdPrefix::Repeat;
                inst.repeat_prefix = true;
            }
            0x2e => segment(inst, Segment::Cs),
            0x36 => segment(inst, Segment::Ss),
            0x3e => segment(inst, Segment::Ds),
            0x26 => segment(inst, Segment::Es),
            0x64 => segment(inst, Segment::Fs),
            0x65 => segment(inst, Segment::Gs),
            0x66 => {
                inst.prefixes |= Prefixes::OPERAND_SIZE_OVERRIDE;
                inst.simd_prefix = SimdPrefix::OperandSize;
                inst.rex_w = false;
            }
            0x67 => inst.prefixes |= Prefixes::ADDRESS_SIZE_OVERRIDE,
            0x40..=0x4f if mode == Mode::Bits64 => {
                let rex = Rex(byte);
                inst.prefixes.remove(Prefixes::REX);
                inst.prefixes.set(Prefixes::REX_W, rex.w());
                inst.prefixes.set(Prefixes::REX_R, rex.r());
                inst.prefixes.set(Prefixes::REX_X, rex.x());
                inst.prefixes.set(Prefixes::REX_B, rex.b());
                inst.rex = Some(rex);
                inst.rex_w = rex.w();
            }
            _ => return Ok(()),
        }

        cursor.byte()?;
        inst.num_prefixes += 1;
    }
}

fn segment(inst: &mut Instruction, segment: Segment) {
    inst.prefixes |= segment.prefix();
    inst.segment_override = Some(segment);
}
