//! Encodings the architecture leaves undefined.
//!
//! Every predicate looks only at the already parsed prefixes, opcode and ModR/M and
//! returns `false` for an encoding that must be rejected. None of them influence how
//! many bytes are consumed.

use crate::instruction::{Instruction, Mode, OpcodeMap, Prefixes, SimdPrefix, Vex};

/// One byte opcodes removed in long mode.
const INVALID_64: [u8; 21] = [
    0x06, 0x07, 0x0e, 0x16, 0x17, 0x1e, 0x1f, 0x27, 0x2f, 0x37, 0x3f, 0x60, 0x61, 0x62, 0x82,
    0x9a, 0xce, 0xd4, 0xd5, 0xd6, 0xea,
];

/// Reserved in the `0F` map regardless of prefixes.
const INVALID_0F: [u8; 8] = [0x04, 0x0a, 0x0c, 0x0f, 0x36, 0x39, 0x7a, 0x7b];

/// `0F` opcodes that accept LOCK (with a memory destination).
const LOCKABLE_0F: [u8; 6] = [0xb0, 0xb1, 0xb3, 0xbb, 0xc0, 0xc1];

pub(crate) fn valid_one_byte(inst: &Instruction) -> bool {
    let op = inst.opcode;
    let modrm = inst.modrm();
    let (reg, mem) = (modrm.reg(), !modrm.is_register());

    match op {
        0xc6 | 0xc7 => reg == 0 || modrm.0 == 0xf8,
        0x8f => reg == 0,
        0xfe => reg < 2,
        0xff => reg != 7 && (mem || (reg != 3 && reg != 5)),
        0x8c => reg < 6,
        0x8e => reg != 1 && reg < 6,
        0x62 => inst.mode != Mode::Bits64 && mem,
        0x8d => mem,
        // LES/LDS, the register forms are VEX
        0xc4 | 0xc5 => inst.mode != Mode::Bits64 && mem,
        0xd8..=0xdf => valid_x87(op, modrm.0),
        _ if inst.mode == Mode::Bits64 => !INVALID_64.contains(&op),
        _ => true,
    }
}

fn valid_x87(op: u8, modrm: u8) -> bool {
    let reg = (modrm >> 3) & 0b111;
    let mem = modrm < 0xc0;

    match op {
        0xd9 => {
            !((reg == 1 && mem)
                || (0xd1..=0xd7).contains(&modrm)
                || matches!(modrm, 0xe2 | 0xe3 | 0xe6 | 0xe7 | 0xef))
        }
        0xda => modrm < 0xe0 || modrm == 0xe9,
        0xdb => {
            !(((reg == 4 || reg == 6) && mem)
                || (0xe5..=0xe7).contains(&modrm)
                || modrm >= 0xf8)
        }
        0xdd => !((reg == 5 && mem) || modrm >= 0xf0),
        0xde => !(modrm == 0xd8 || (0xda..=0xdf).contains(&modrm)),
        0xdf => !((0xe1..=0xe7).contains(&modrm) || modrm >= 0xf8),
        _ => true,
    }
}

pub(crate) fn valid_0f(inst: &Instruction) -> bool {
    use SimdPrefix::*;

    let op = inst.opcode;
    let modrm = inst.modrm();
    let (reg, rm, mem) = (modrm.reg(), modrm.rm(), !modrm.is_register());
    let simd = inst.simd_prefix;
    let (row, col) = (op >> 4, op & 0xf);

    if INVALID_0F.contains(&op) {
        return false;
    }

    let valid = match op {
        0x00 => reg < 6,
        0x01 if mem => simd == Repeat || reg != 5,
        0x01 => {
            let prefixed = simd != None
                && matches!(
                    modrm.0,
                    0xc0..=0xc5
                        | 0xc8..=0xcb
                        | 0xcf..=0xd1
                        | 0xd4..=0xd7
                        | 0xee
                        | 0xef
                        | 0xfa
                        | 0xfb
                );

            !(prefixed
                || (reg == 0 && rm >= 6)
                || (reg == 1 && (4..=6).contains(&rm))
                || (reg == 2 && (rm == 2 || rm == 3))
                || (reg == 5 && rm < 6 && (simd != Repeat || (rm != 0 && rm != 2)))
                || (reg == 7 && (rm > 5 || (inst.mode != Mode::Bits64 && rm == 0))))
        }
        0x1a | 0x1b => mem,
        0x20 | 0x22 => reg != 1 && reg < 5,
        0x24..=0x27 | 0x3b..=0x3f => false,
        0x50..=0x5f => {
            !((op == 0x50 && mem)
                || (simd == OperandSize && (op == 0x52 || op == 0x53))
                || (simd == Repeat && (op == 0x50 || (0x54..=0x57).contains(&op)))
                || (simd == RepeatNotZero
                    && (op == 0x50 || (0x52..=0x57).contains(&op) || op == 0x5b)))
        }
        0x60..=0x6f => {
            !((simd == None && (op == 0x6c || op == 0x6d))
                || (simd == Repeat && op != 0x6f)
                || simd == RepeatNotZero)
        }
        0x71..=0x73 => {
            let shift_by_imm = !(simd.is_repeat()
                || modrm.0 <= 0xcf
                || (0xe8..=0xef).contains(&modrm.0));

            // only `66 0F 73` has the /3 and /7 byte shifts
            let byte_shift = (0xd8..=0xdf).contains(&modrm.0) || modrm.0 >= 0xf8;
            // and there's no arithmetic shift of quadwords
            let psraq = op == 0x73 && reg == 4;
            shift_by_imm && !psraq && !(byte_shift && !(op == 0x73 && simd == OperandSize))
        }
        0x78 | 0x79 => {
            !((simd == OperandSize && op == 0x78 && !(!mem && reg == 0))
                || ((simd == OperandSize || simd == RepeatNotZero) && mem)
                || simd == Repeat)
        }
        0x7c | 0x7d => simd == OperandSize || simd == RepeatNotZero,
        0x7e | 0x7f => simd != RepeatNotZero,
        0xa6 => matches!(modrm.0, 0xc0 | 0xc8 | 0xd0),
        0xa7 => !mem && reg <= 5 && rm == 0,
        0xae => match simd {
            None => mem || reg > 4,
            RepeatNotZero => !mem && reg == 6,
            OperandSize => reg >= 6 && !(!mem && reg == 7),
            // fsgsbase, ptwrite, incssp, umonitor, clrssbsy
            Repeat => reg == 4 || reg == 6 || (!mem && reg <= 3) || (!mem && reg == 5),
        },
        0xb8 => simd == Repeat,
        0xba => reg >= 4,
        0xc3..=0xc6 => {
            !((op == 0xc5 && mem) || simd.is_repeat() || (op == 0xc3 && simd == OperandSize))
        }
        0xc7 => !match simd {
            None if mem => reg == 0 || reg == 2,
            None => reg <= 5,
            RepeatNotZero => !mem || reg != 1,
            OperandSize if mem => reg != 1 && reg != 6,
            OperandSize => reg <= 5,
            Repeat if mem => reg != 1 && reg != 6,
            Repeat => reg <= 6,
        },
        0xd0 => simd == OperandSize || simd == RepeatNotZero,
        0xe0 => !simd.is_repeat(),
        0xf0 => simd == RepeatNotZero && mem,
        _ => true,
    };

    if !valid {
        return false;
    }

    // prefixed forms that don't exist
    if simd.is_repeat()
        && (((0x13..=0x17).contains(&op) && !(op == 0x16 && simd == Repeat))
            || matches!(op, 0x28 | 0x29 | 0x2e | 0x2f | 0x74..=0x76))
    {
        return false;
    }

    // packed integer rows where the SIMD prefix selects mmx or xmm registers
    if row >= 0xd && col != 0 && op != 0xff {
        let invalid = if col == 6 && row != 0xf {
            simd == None || (row == 0xd && simd.is_repeat() && mem)
        } else {
            simd.is_repeat() || (col == 7 && row != 0xe && mem)
        };

        if invalid {
            return false;
        }
    }

    // forms that only take a memory operand
    if !mem {
        let memory_only = matches!(op, 0xb2 | 0xb4 | 0xb5 | 0xc3 | 0xe7 | 0x2b)
            || (simd == OperandSize && (op == 0x12 || op == 0x16))
            || (!simd.is_repeat() && (op == 0x13 || op == 0x17));

        if memory_only {
            return false;
        }
    }

    true
}

pub(crate) fn valid_0f38(inst: &Instruction) -> bool {
    use SimdPrefix::*;

    let op = inst.opcode;
    let mem = !inst.modrm().is_register();
    let simd = inst.simd_prefix;

    match op {
        0x36 => false,
        0x00..=0x0b | 0x1c..=0x1e => !simd.is_repeat(),
        0xc8..=0xcd => simd == None,
        0x10 | 0x14 | 0x15 | 0x17 | 0x20..=0x25 | 0x28 | 0x29 | 0x2b | 0x30..=0x3f | 0x40
        | 0x41 | 0xcf | 0xdb..=0xdf => simd == OperandSize,
        0x2a | 0x80..=0x82 => simd == OperandSize && mem,
        0xf0 | 0xf1 => !((!mem && (simd == None || simd == OperandSize)) || simd == Repeat),
        0xf5 | 0xf8 => simd == OperandSize && mem,
        0xf6 => !((simd == None && !mem) || simd == RepeatNotZero),
        0xf9 => simd == None && mem,
        _ => false,
    }
}

pub(crate) fn valid_0f3a(inst: &Instruction) -> bool {
    let op = inst.opcode;
    let simd = inst.simd_prefix;

    match op {
        0x08..=0x0e | 0x14..=0x17 | 0x20..=0x22 | 0x40..=0x42 | 0x44 | 0x60..=0x63 | 0xce
        | 0xcf | 0xdf => simd == SimdPrefix::OperandSize,
        // palignr comes in mmx and xmm flavours
        0x0f => simd == SimdPrefix::None || simd == SimdPrefix::OperandSize,
        0xcc => simd == SimdPrefix::None,
        _ => false,
    }
}

/// A VEX prefix replaces the legacy SIMD and REX prefixes, those can't precede it.
/// Past that only the opcodes with a VEX form exist, each with its own prefix,
/// vector length and operand constraints.
pub(crate) fn valid_vex(inst: &Instruction) -> bool {
    let Some(vex) = inst.vex else {
        return false;
    };

    let conflicting = Prefixes::LOCK
        | Prefixes::OPERAND_SIZE_OVERRIDE
        | Prefixes::REPEAT
        | Prefixes::REPEAT_NOT_ZERO
        | Prefixes::REX;

    if inst.prefixes.intersects(conflicting) || inst.rex.is_some() {
        return false;
    }

    let form = match vex.m_mmmm {
        1 => vex_0f(inst),
        2 => vex_0f38(inst),
        3 => vex_0f3a(inst),
        _ => Form::NONE,
    };

    form.allows(inst, vex)
}

/// SIMD prefixes a VEX form accepts, bits indexed by [`SimdPrefix::index`].
const NP: u8 = 0b0001;
const P66: u8 = 0b0010;
const PF3: u8 = 0b0100;
const PF2: u8 = 0b1000;
const ANY: u8 = 0b1111;

/// Encoding constraints of a VEX form, `None` when either value is fine.
#[derive(Debug, Clone, Copy)]
struct Form {
    prefixes: u8,
    memory: Option<bool>,
    l: Option<bool>,
    w: Option<bool>,
    vsib: bool,
}

impl Form {
    const NONE: Self = Self::with(0);

    const fn with(prefixes: u8) -> Self {
        Self {
            prefixes,
            memory: None,
            l: None,
            w: None,
            vsib: false,
        }
    }

    const fn mem(mut self) -> Self {
        self.memory = Some(true);
        self
    }

    const fn reg(mut self) -> Self {
        self.memory = Some(false);
        self
    }

    const fn l0(mut self) -> Self {
        self.l = Some(false);
        self
    }

    const fn l1(mut self) -> Self {
        self.l = Some(true);
        self
    }

    const fn w0(mut self) -> Self {
        self.w = Some(false);
        self
    }

    const fn w1(mut self) -> Self {
        self.w = Some(true);
        self
    }

    /// Memory addressed through a vector index, which needs a SIB byte.
    const fn vsib(mut self) -> Self {
        self.memory = Some(true);
        self.vsib = true;
        self
    }

    fn allows(self, inst: &Instruction, vex: Vex) -> bool {
        let mem = inst.modrm.is_some_and(|modrm| !modrm.is_register());

        self.prefixes & (1 << inst.simd_prefix.index()) != 0
            && self.memory.map_or(true, |memory| memory == mem)
            && self.l.map_or(true, |l| l == vex.l)
            && self.w.map_or(true, |w| w == vex.w)
            && (!self.vsib || inst.sib.is_some())
    }
}

fn vex_0f(inst: &Instruction) -> Form {
    let reg = inst.modrm().reg();

    match inst.opcode {
        0x10 | 0x11 | 0x51 | 0x58 | 0x59 | 0x5a | 0x5c..=0x5f | 0xc2 => Form::with(ANY),
        0x12 | 0x16 => match inst.simd_prefix {
            SimdPrefix::None => Form::with(NP).l0(),
            SimdPrefix::OperandSize => Form::with(P66).mem().l0(),
            // vmovsldup, vmovddup and vmovshdup
            _ if inst.opcode == 0x12 => Form::with(PF3 | PF2),
            _ => Form::with(PF3),
        },
        0x13 | 0x17 => Form::with(NP | P66).mem().l0(),
        0x14 | 0x15 | 0x28 | 0x29 | 0x2e | 0x2f | 0x54..=0x57 | 0xc6 => Form::with(NP | P66),
        0x2a | 0x2c | 0x2d => Form::with(PF3 | PF2),
        0x2b => Form::with(NP | P66).mem(),
        0x50 => Form::with(NP | P66).reg(),
        0x52 | 0x53 => Form::with(NP | PF3),
        0x5b => Form::with(NP | P66 | PF3),
        0x60..=0x6d | 0x74..=0x76 => Form::with(P66),
        0x6e => Form::with(P66).l0(),
        0x6f | 0x7f => Form::with(P66 | PF3),
        0x70 | 0xe6 => Form::with(P66 | PF3 | PF2),
        0x71 | 0x72 if matches!(reg, 2 | 4 | 6) => Form::with(P66).reg(),
        0x73 if matches!(reg, 2 | 3 | 6 | 7) => Form::with(P66).reg(),
        0x77 => Form::with(NP),
        0x7c | 0x7d | 0xd0 => Form::with(P66 | PF2),
        0x7e => Form::with(P66 | PF3).l0(),
        // vldmxcsr and vstmxcsr
        0xae if reg == 2 || reg == 3 => Form::with(NP).mem().l0(),
        0xc4 | 0xd6 => Form::with(P66).l0(),
        0xc5 | 0xf7 => Form::with(P66).reg().l0(),
        0xd7 => Form::with(P66).reg(),
        0xe7 => Form::with(P66).mem(),
        0xf0 => Form::with(PF2).mem(),
        0xd1..=0xd5 | 0xd8..=0xdf | 0xe0..=0xe5 | 0xe8..=0xef | 0xf1..=0xf6 | 0xf8..=0xfe => {
            Form::with(P66)
        }
        _ => Form::NONE,
    }
}

fn vex_0f38(inst: &Instruction) -> Form {
    match inst.opcode {
        0x00..=0x0b | 0x17 | 0x1c..=0x1e | 0x20..=0x25 | 0x28 | 0x29 | 0x2b | 0x30..=0x35
        | 0x37..=0x40 | 0x45 | 0x47 | 0x96..=0x9f | 0xa6..=0xaf | 0xb6..=0xbf | 0xdc..=0xdf => {
            Form::with(P66)
        }
        0x0c..=0x0f | 0x13 | 0x18 | 0x46 | 0x58 | 0x59 | 0x78 | 0x79 => Form::with(P66).w0(),
        0x16 | 0x19 | 0x36 => Form::with(P66).w0().l1(),
        0x1a | 0x5a => Form::with(P66).w0().l1().mem(),
        0x2a | 0x8c | 0x8e => Form::with(P66).mem(),
        0x2c..=0x2f => Form::with(P66).w0().mem(),
        0x41 | 0xdb => Form::with(P66).l0(),
        0x90..=0x93 => Form::with(P66).vsib(),
        0xcf => Form::with(P66).w0(),
        0xf2 => Form::with(NP).l0(),
        0xf3 if matches!(inst.modrm().reg(), 1..=3) => Form::with(NP).l0(),
        0xf5 => Form::with(NP | PF3 | PF2).l0(),
        0xf6 => Form::with(PF2).l0(),
        0xf7 => Form::with(ANY).l0(),
        _ => Form::NONE,
    }
}

fn vex_0f3a(inst: &Instruction) -> Form {
    match inst.opcode {
        0x00 | 0x01 => Form::with(P66).w1().l1(),
        0x02 | 0x04 | 0x05 | 0x1d | 0x4a..=0x4c => Form::with(P66).w0(),
        0x06 | 0x18 | 0x19 | 0x38 | 0x39 | 0x46 => Form::with(P66).w0().l1(),
        0x08..=0x0f | 0x40 | 0x42 | 0x44 | 0xdf => Form::with(P66),
        0x14..=0x17 | 0x20..=0x22 | 0x41 | 0x60..=0x63 => Form::with(P66).l0(),
        0xce | 0xcf => Form::with(P66).w1(),
        0xf0 => Form::with(PF2).l0(),
        _ => Form::NONE,
    }
}

/// LOCK needs a read-modify-write instruction with a memory destination.
pub(crate) fn valid_lock(inst: &Instruction) -> bool {
    let op = inst.opcode;
    let modrm = match inst.modrm {
        Some(modrm) if !modrm.is_register() => modrm,
        _ => return false,
    };
    let reg = modrm.reg();

    match inst.opcode_map {
        OpcodeMap::Default => {
            matches!(op, 0x86 | 0x87)
                || (op < 0x38 && op % 8 < 2 && op >> 4 < 4)
                || ((0x80..=0x83).contains(&op) && reg != 7)
                || (op >= 0xfe && reg < 2)
                || ((op == 0xf6 || op == 0xf7) && (reg == 2 || reg == 3))
        }
        OpcodeMap::Map0F => {
            LOCKABLE_0F.contains(&op)
                || op == 0xab
                || (op == 0xba && reg != 4)
                || (op == 0xc7 && reg == 1)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::ModRm;

    fn inst(map: OpcodeMap, opcode: u8, modrm: u8) -> Instruction {
        Instruction {
            opcode_map: map,
            opcode,
            modrm: Some(ModRm(modrm)),
            mode: Mode::Bits64,
            ..Instruction::default()
        }
    }

    #[test]
    fn x87_escapes() {
        assert!(valid_x87(0xdb, 0xe3), "fninit");
        assert!(valid_x87(0xdb, 0xe2), "fnclex");
        assert!(!valid_x87(0xdb, 0xe5));
        assert!(valid_x87(0xda, 0xe9), "fucompp");
        assert!(!valid_x87(0xda, 0xea));
        assert!(valid_x87(0xde, 0xd9), "fcompp");
        assert!(!valid_x87(0xd9, 0x08));
    }

    #[test]
    fn lock() {
        assert!(valid_lock(&inst(OpcodeMap::Default, 0x01, 0x00)));
        assert!(!valid_lock(&inst(OpcodeMap::Default, 0x01, 0xc0)));
        assert!(!valid_lock(&inst(OpcodeMap::Default, 0x80, 0x38)), "cmp can't be locked");
        assert!(valid_lock(&inst(OpcodeMap::Map0F, 0xc7, 0x08)), "cmpxchg8b");
        assert!(!valid_lock(&inst(OpcodeMap::Map0F38, 0xf0, 0x00)));
    }

    #[test]
    fn two_byte_rows() {
        assert!(!valid_0f(&inst(OpcodeMap::Map0F, 0x24, 0xc0)));
        assert!(valid_0f(&inst(OpcodeMap::Map0F, 0x05, 0x00)));
        assert!(!valid_0f(&inst(OpcodeMap::Map0F, 0xc3, 0xc0)), "movnti needs memory");

        let mut movq2dq = inst(OpcodeMap::Map0F, 0xd6, 0xc1);
        movq2dq.simd_prefix = SimdPrefix::Repeat;
        assert!(valid_0f(&movq2dq));

        let mut rdfsbase = inst(OpcodeMap::Map0F, 0xae, 0xc0);
        rdfsbase.simd_prefix = SimdPrefix::Repeat;
        assert!(valid_0f(&rdfsbase));
    }
}
