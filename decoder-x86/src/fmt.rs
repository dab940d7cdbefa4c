//! Intel and AT&T syntax rendering.
//!
//! The [`Formatter`] walks the annotated operands of an [`Instruction`] and pushes
//! coloured tokens, implicit operands are never printed.

use bitflags::bitflags;
use decoder::{ToTokens, TokenStream};
use tokenizing::{Color, ColorScheme, Colors};

use crate::group::is_relative_branch;
use crate::id::{identify, is_vex_only};
use crate::instruction::{
    Encoding, Instruction, MemoryOperand, Mode, OpcodeMap, OperandKind, Prefixes,
};
use crate::mnemonic::Mnemonic;
use crate::operands;
use crate::register::Register;

bitflags! {
    #[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
    pub struct FormatterFlags: u32 {
        /// Numbers in base 16 rather than 10.
        const HEX = 1 << 0;
        /// `dword ptr` and friends before memory operands.
        const POINTER_SIZE = 1 << 1;
        /// Only print a segment when a prefix overrides it.
        const ONLY_SEGMENT_OVERRIDE = 1 << 2;
        const COMMA_SPACES = 1 << 3;
        const OPERATOR_SPACES = 1 << 4;
        const UPPERCASE = 1 << 5;
        const ZERO_X_PREFIX = 1 << 6;
        const H_SUFFIX = 1 << 7;
        /// Mark numbers below ten as hexadecimal too.
        const ENFORCE_HEX_ID = 1 << 8;
        const HEX_LOWERCASE = 1 << 9;
        /// Negative immediates as the bits stored in the instruction, e.g. `FFFFFFFFh`.
        const SIGNED_NUMBER_MEMORY_VIEW = 1 << 10;
        /// With the memory view, follow the number by its signed value in hex.
        const SIGNED_NUMBER_HINT_HEX = 1 << 11;
        /// With the memory view, follow the number by its signed value in decimal.
        const SIGNED_NUMBER_HINT_DEC = 1 << 12;
        /// Print a scale of one, `[eax+ecx*1]`.
        const SCALE_ONE = 1 << 13;
        /// Raw bytes before the instruction.
        const BYTES = 1 << 14;
        const ATT_SYNTAX = 1 << 15;

        const DEFAULT = Self::HEX.bits()
            | Self::H_SUFFIX.bits()
            | Self::ONLY_SEGMENT_OVERRIDE.bits()
            | Self::SIGNED_NUMBER_MEMORY_VIEW.bits()
            | Self::SIGNED_NUMBER_HINT_DEC.bits();
    }
}

impl Default for FormatterFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FormatterFlags {
    /// Flag by the name used in configuration files, e.g. `comma_spaces`.
    pub fn parse_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        Self::from_name(&name)
    }
}

/// Width the raw bytes are padded to with [`FormatterFlags::BYTES`].
const BYTES_COLUMN: usize = 30;

#[derive(Debug, Clone, Copy)]
pub struct Formatter<'inst> {
    inst: &'inst Instruction,
    pub flags: FormatterFlags,
    /// Address the instruction lives at, relative branches are resolved against it.
    pub runtime_address: u64,
}

impl<'inst> Formatter<'inst> {
    pub fn new(inst: &'inst Instruction, flags: FormatterFlags, runtime_address: u64) -> Self {
        Self {
            inst,
            flags,
            runtime_address,
        }
    }

    fn att(&self) -> bool {
        self.flags.contains(FormatterFlags::ATT_SYNTAX)
    }

    fn push(&self, stream: &mut TokenStream, text: &'static str, color: &'static Color) {
        if self.flags.contains(FormatterFlags::UPPERCASE) {
            stream.push_owned(text.to_ascii_uppercase(), color);
        } else {
            stream.push(text, color);
        }
    }

    fn push_owned(&self, stream: &mut TokenStream, text: String, color: &'static Color) {
        if self.flags.contains(FormatterFlags::UPPERCASE) {
            stream.push_owned(text.to_ascii_uppercase(), color);
        } else {
            stream.push_owned(text, color);
        }
    }

    fn number(&self, n: u64) -> String {
        self.number_in(n, self.flags.contains(FormatterFlags::HEX))
    }

    fn number_in(&self, n: u64, hex: bool) -> String {
        if !hex {
            return n.to_string();
        }

        let digits = if self.flags.contains(FormatterFlags::HEX_LOWERCASE) {
            format!("{n:x}")
        } else {
            format!("{n:X}")
        };

        let marked = n > 9 || self.flags.contains(FormatterFlags::ENFORCE_HEX_ID);
        let mut text = String::with_capacity(digits.len() + 3);
        if marked && self.flags.contains(FormatterFlags::ZERO_X_PREFIX) {
            text.push_str("0x");
        }
        text.push_str(&digits);
        if marked && self.flags.contains(FormatterFlags::H_SUFFIX) {
            text.push('h');
        }
        text
    }

    fn signed_in(&self, n: i64, hex: bool) -> String {
        let magnitude = self.number_in(n.unsigned_abs(), hex);
        if n < 0 {
            format!("-{magnitude}")
        } else {
            magnitude
        }
    }

    /// Immediate operand, `width` is the operand size it applies to in bytes.
    fn immediate(&self, imm: i64, width: u8) -> String {
        let hex = self.flags.contains(FormatterFlags::HEX);
        if imm >= 0 {
            return self.number(imm as u64);
        }

        if !self.flags.contains(FormatterFlags::SIGNED_NUMBER_MEMORY_VIEW) {
            return self.signed_in(imm, hex);
        }

        let mut text = self.number(imm as u64 & mask(width));
        if self.flags.contains(FormatterFlags::SIGNED_NUMBER_HINT_HEX) {
            text = format!("{text}({})", self.signed_in(imm, true));
        } else if self.flags.contains(FormatterFlags::SIGNED_NUMBER_HINT_DEC) {
            text = format!("{text}({})", self.signed_in(imm, false));
        }
        text
    }

    fn delimiter(&self, stream: &mut TokenStream) {
        if self.flags.contains(FormatterFlags::COMMA_SPACES) {
            stream.push(", ", Colors::delimiter());
        } else {
            stream.push(",", Colors::delimiter());
        }
    }

    fn operator(&self, stream: &mut TokenStream, negative: bool) {
        let text = match (negative, self.flags.contains(FormatterFlags::OPERATOR_SPACES)) {
            (false, false) => "+",
            (false, true) => " + ",
            (true, false) => "-",
            (true, true) => " - ",
        };
        stream.push(text, Colors::expr());
    }

    fn register(&self, stream: &mut TokenStream, reg: Register) {
        if self.att() {
            stream.push("%", Colors::register());
        }
        self.push(stream, reg.name(), Colors::register());
    }

    fn prefixes(&self, inst: &Instruction, stream: &mut TokenStream) {
        let lock = inst.has_prefix(Prefixes::LOCK);
        let repeat = inst.prefixes.intersects(Prefixes::REPEAT | Prefixes::REPEAT_NOT_ZERO);
        let xchg_memory = inst.opcode_map == OpcodeMap::Default
            && matches!(inst.opcode, 0x86 | 0x87)
            && !inst.modrm().is_register();

        if repeat && (lock || xchg_memory) {
            let hint = if inst.repeat_prefix { "xrelease " } else { "xacquire " };
            self.push(stream, hint, Colors::opcode());
        } else if inst.has_prefix(Prefixes::REPEAT_NOT_ZERO) && is_bnd_branch(inst) {
            self.push(stream, "bnd ", Colors::opcode());
        }

        if lock {
            self.push(stream, "lock ", Colors::opcode());
        }

        if repeat && is_string(inst) {
            let rep = match (inst.repeat_prefix, compares(inst)) {
                (true, true) => "repe ",
                (true, false) => "rep ",
                (false, _) => "repne ",
            };
            self.push(stream, rep, Colors::opcode());
        }
    }

    fn mnemonic(&self, inst: &Instruction, stream: &mut TokenStream) {
        if inst.encoding == Encoding::Vex && !is_vex_only(inst.id) {
            self.push_owned(stream, format!("v{}", inst.id.name()), Colors::opcode());
        } else {
            self.push(stream, inst.id.name(), Colors::opcode());
        }
    }

    fn bytes(&self, inst: &Instruction, stream: &mut TokenStream) {
        let mut bytes = decoder::encode_hex_bytes_truncated(inst.bytes(), BYTES_COLUMN);
        if !self.flags.contains(FormatterFlags::HEX_LOWERCASE) {
            bytes.make_ascii_uppercase();
        }
        stream.push_owned(bytes, Colors::comment());
    }

    fn operand(&self, inst: &Instruction, kind: &OperandKind, width: u8, stream: &mut TokenStream) {
        match *kind {
            OperandKind::None => {}
            OperandKind::Register(reg) => self.register(stream, reg),
            OperandKind::Memory(ref mem) if self.att() => self.memory_att(inst, mem, stream),
            OperandKind::Memory(ref mem) => self.memory_intel(inst, mem, stream),
            OperandKind::Immediate(_) if is_far_pointer(inst) => self.far_pointer(inst, stream),
            OperandKind::Immediate(imm) => {
                if self.att() {
                    stream.push("$", Colors::immediate());
                }

                let text = if is_relative_branch(inst) {
                    self.number(self.branch_target(inst, imm))
                } else {
                    self.immediate(imm, width)
                };
                self.push_owned(stream, text, Colors::immediate());
            }
        }
    }

    /// Absolute target of a relative branch.
    fn branch_target(&self, inst: &Instruction, disp: i64) -> u64 {
        let next = self.runtime_address.wrapping_add(inst.length as u64);
        let target = next.wrapping_add(disp as u64);
        match (inst.mode, inst.operand_size()) {
            (Mode::Bits64, _) => target,
            (_, 2) => target & 0xffff,
            _ => target & 0xffff_ffff,
        }
    }

    /// `selector:offset` of a direct far `call` or `jmp`.
    fn far_pointer(&self, inst: &Instruction, stream: &mut TokenStream) {
        let split = if inst.imm_mask == 4 { 16 } else { 32 };
        let offset = inst.immediate & mask(split / 8);
        let selector = (inst.immediate >> split) & 0xffff;

        if self.att() {
            stream.push("$", Colors::immediate());
            self.push_owned(stream, self.number(selector), Colors::immediate());
            self.delimiter(stream);
            stream.push("$", Colors::immediate());
        } else {
            self.push_owned(stream, self.number(selector), Colors::immediate());
            stream.push(":", Colors::expr());
        }
        self.push_owned(stream, self.number(offset), Colors::immediate());
    }

    fn segment(&self, inst: &Instruction, mem: &MemoryOperand, stream: &mut TokenStream) {
        let shown = inst.segment_override.is_some()
            || !self.flags.contains(FormatterFlags::ONLY_SEGMENT_OVERRIDE);

        if shown && mem.segment != Register::None {
            self.register(stream, mem.segment);
            stream.push(":", Colors::expr());
        }
    }

    /// Displacement without a base or index, it's an address.
    fn absolute(&self, inst: &Instruction, mem: &MemoryOperand) -> String {
        self.number(mem.disp as u64 & mask(inst.address_size()))
    }

    fn memory_intel(&self, inst: &Instruction, mem: &MemoryOperand, stream: &mut TokenStream) {
        if self.flags.contains(FormatterFlags::POINTER_SIZE) {
            if let Some(size) = pointer_size(mem.size) {
                self.push(stream, size, Colors::attribute());
                self.push(stream, " ptr ", Colors::attribute());
            }
        }

        self.segment(inst, mem, stream);
        stream.push("[", Colors::brackets());

        let mut empty = true;
        if mem.base != Register::None {
            self.register(stream, mem.base);
            empty = false;
        }

        if mem.index != Register::None {
            if !empty {
                self.operator(stream, false);
            }
            self.register(stream, mem.index);
            if mem.scale != 1 || self.flags.contains(FormatterFlags::SCALE_ONE) {
                stream.push("*", Colors::expr());
                stream.push_owned(mem.scale.to_string(), Colors::immediate());
            }
            empty = false;
        }

        if empty {
            self.push_owned(stream, self.absolute(inst, mem), Colors::immediate());
        } else if mem.disp != 0 {
            self.operator(stream, mem.disp < 0);
            self.push_owned(stream, self.number(mem.disp.unsigned_abs()), Colors::immediate());
        }

        stream.push("]", Colors::brackets());
    }

    fn memory_att(&self, inst: &Instruction, mem: &MemoryOperand, stream: &mut TokenStream) {
        self.segment(inst, mem, stream);

        if mem.base == Register::None && mem.index == Register::None {
            self.push_owned(stream, self.absolute(inst, mem), Colors::immediate());
            return;
        }

        if mem.disp != 0 {
            let disp = self.signed_in(mem.disp, self.flags.contains(FormatterFlags::HEX));
            self.push_owned(stream, disp, Colors::immediate());
        }

        stream.push("(", Colors::brackets());
        if mem.base != Register::None {
            self.register(stream, mem.base);
        }

        if mem.index != Register::None {
            stream.push(",", Colors::delimiter());
            self.register(stream, mem.index);
            if mem.scale != 1 || self.flags.contains(FormatterFlags::SCALE_ONE) {
                stream.push(",", Colors::delimiter());
                stream.push_owned(mem.scale.to_string(), Colors::immediate());
            }
        }
        stream.push(")", Colors::brackets());
    }
}

impl ToTokens for Formatter<'_> {
    fn tokenize(&self, stream: &mut TokenStream) {
        let mut inst = *self.inst;

        // instructions decoded without annotations are annotated on the fly
        if inst.valid && inst.id == Mnemonic::Invalid {
            inst.id = identify(&inst);
        }
        if inst.valid && inst.num_operands == 0 {
            operands::annotate(&mut inst);
        }

        if self.flags.contains(FormatterFlags::BYTES) {
            self.bytes(&inst, stream);
        }

        if !inst.valid || inst.id == Mnemonic::Invalid {
            stream.push("(bad)", Colors::special());
            return;
        }

        self.prefixes(&inst, stream);
        self.mnemonic(&inst, stream);

        let mut explicit: Vec<OperandKind> = inst
            .operands()
            .iter()
            .filter(|op| !op.is_implicit)
            .map(|op| op.kind)
            .collect();

        // the predicate is already part of the name
        if inst.id.is_compare_predicate() {
            if let Some(OperandKind::Immediate(_)) = explicit.last() {
                explicit.pop();
            }
        }

        let width = operand_width(&inst, &explicit);
        if self.att() {
            explicit.reverse();
        }

        for (idx, kind) in explicit.iter().enumerate() {
            if idx == 0 {
                stream.push(" ", Colors::spacing());
            } else {
                self.delimiter(stream);
            }
            self.operand(&inst, kind, width, stream);
        }
    }
}

/// Renders `inst` as text, relative branches are resolved against `address`.
pub fn format(inst: &Instruction, address: u64, flags: FormatterFlags) -> String {
    let mut stream = TokenStream::new();
    Formatter::new(inst, flags, address).tokenize(&mut stream);
    stream.to_string()
}

fn mask(bytes: u8) -> u64 {
    match bytes {
        1 => 0xff,
        2 => 0xffff,
        4 => 0xffff_ffff,
        _ => u64::MAX,
    }
}

fn pointer_size(size: u16) -> Option<&'static str> {
    Some(match size {
        1 => "byte",
        2 => "word",
        4 => "dword",
        6 => "fword",
        8 => "qword",
        10 => "tbyte",
        16 => "xmmword",
        32 => "ymmword",
        64 => "zmmword",
        _ => return None,
    })
}

/// Size of the operation an immediate takes part in.
fn operand_width(inst: &Instruction, explicit: &[OperandKind]) -> u8 {
    if inst.opcode_map == OpcodeMap::Default && matches!(inst.opcode, 0x68 | 0x6a) {
        return inst.stack_size();
    }

    explicit
        .iter()
        .find_map(|kind| match *kind {
            OperandKind::Register(reg) if reg.width() != 0 => Some(reg.width()),
            OperandKind::Memory(mem) if matches!(mem.size, 1 | 2 | 4 | 8) => Some(mem.size as u8),
            _ => None,
        })
        .unwrap_or_else(|| inst.operand_size())
}

fn is_far_pointer(inst: &Instruction) -> bool {
    inst.opcode_map == OpcodeMap::Default && matches!(inst.opcode, 0x9a | 0xea)
}

fn is_string(inst: &Instruction) -> bool {
    inst.opcode_map == OpcodeMap::Default
        && matches!(inst.opcode, 0x6c..=0x6f | 0xa4..=0xa7 | 0xaa..=0xaf)
}

/// `cmps` and `scas` repeat while equal rather than unconditionally.
fn compares(inst: &Instruction) -> bool {
    matches!(inst.opcode, 0xa6 | 0xa7 | 0xae | 0xaf)
}

/// Branches an `F2` turns into MPX bound-checked ones.
fn is_bnd_branch(inst: &Instruction) -> bool {
    match inst.opcode_map {
        OpcodeMap::Default => {
            matches!(inst.opcode, 0x70..=0x7f | 0xc2 | 0xc3 | 0xe8 | 0xe9)
                || (inst.opcode == 0xff && matches!(inst.modrm().reg(), 2 | 4))
        }
        OpcodeMap::Map0F => matches!(inst.opcode, 0x80..=0x8f),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        let inst = Instruction::default();
        let fmt = Formatter::new(&inst, FormatterFlags::DEFAULT, 0);
        assert_eq!(fmt.number(9), "9");
        assert_eq!(fmt.number(0x1f), "1Fh");

        let flags =
            FormatterFlags::HEX | FormatterFlags::ZERO_X_PREFIX | FormatterFlags::HEX_LOWERCASE;
        let fmt = Formatter::new(&inst, flags, 0);
        assert_eq!(fmt.number(0x1f), "0x1f");

        let flags = FormatterFlags::HEX | FormatterFlags::H_SUFFIX | FormatterFlags::ENFORCE_HEX_ID;
        let fmt = Formatter::new(&inst, flags, 0);
        assert_eq!(fmt.number(1), "1h");

        let fmt = Formatter::new(&inst, FormatterFlags::empty(), 0);
        assert_eq!(fmt.number(0x1f), "31");
    }

    #[test]
    fn signed_immediates() {
        let inst = Instruction::default();
        let fmt = Formatter::new(&inst, FormatterFlags::DEFAULT, 0);
        assert_eq!(fmt.immediate(-1, 4), "FFFFFFFFh(-1)");
        assert_eq!(fmt.immediate(-1, 1), "FFh(-1)");

        let flags = FormatterFlags::DEFAULT - FormatterFlags::SIGNED_NUMBER_HINT_DEC
            | FormatterFlags::SIGNED_NUMBER_HINT_HEX;
        let fmt = Formatter::new(&inst, flags, 0);
        assert_eq!(fmt.immediate(-16, 2), "FFF0h(-10h)");

        let fmt = Formatter::new(&inst, FormatterFlags::HEX | FormatterFlags::H_SUFFIX, 0);
        assert_eq!(fmt.immediate(-16, 4), "-10h");
    }

    #[test]
    fn flag_names() {
        assert_eq!(FormatterFlags::parse_name("comma_spaces"), Some(FormatterFlags::COMMA_SPACES));
        assert_eq!(FormatterFlags::parse_name("att-syntax"), Some(FormatterFlags::ATT_SYNTAX));
        assert_eq!(FormatterFlags::parse_name("pretty"), None);
    }
}
