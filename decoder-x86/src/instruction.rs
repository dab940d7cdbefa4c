//! Decoded instruction and everything hanging off of it.

use bitflags::bitflags;

use crate::mnemonic::Mnemonic;
use crate::register::Register;

/// Architectural limit on the length of a single instruction.
pub const MAX_LENGTH: usize = 15;

/// Maximum number of operands an instruction can be annotated with.
pub const MAX_OPERANDS: usize = 10;

/// Processor mode, the value is the default address width in bytes.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
#[repr(u8)]
pub enum Mode {
    Bits16 = 2,
    Bits32 = 4,
    #[default]
    Bits64 = 8,
}

impl Mode {
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            16 => Some(Self::Bits16),
            32 => Some(Self::Bits32),
            64 => Some(Self::Bits64),
            _ => None,
        }
    }

    pub const fn bits(self) -> u32 {
        self as u32 * 8
    }
}

bitflags! {
    #[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
    pub struct Prefixes: u16 {
        const ES = 1 << 0;
        const CS = 1 << 1;
        const SS = 1 << 2;
        const DS = 1 << 3;
        const FS = 1 << 4;
        const GS = 1 << 5;
        const LOCK = 1 << 6;
        const REPEAT = 1 << 7;
        const REPEAT_NOT_ZERO = 1 << 8;
        const OPERAND_SIZE_OVERRIDE = 1 << 9;
        const ADDRESS_SIZE_OVERRIDE = 1 << 10;
        const REX_W = 1 << 11;
        const REX_R = 1 << 12;
        const REX_X = 1 << 13;
        const REX_B = 1 << 14;

        const SEGMENTS = Self::ES.bits() | Self::CS.bits() | Self::SS.bits()
            | Self::DS.bits() | Self::FS.bits() | Self::GS.bits();
        const REX = Self::REX_W.bits() | Self::REX_R.bits()
            | Self::REX_X.bits() | Self::REX_B.bits();
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Segment {
    Es,
    Cs,
    Ss,
    Ds,
    Fs,
    Gs,
}

impl Segment {
    pub const fn register(self) -> Register {
        match self {
            Self::Es => Register::Es,
            Self::Cs => Register::Cs,
            Self::Ss => Register::Ss,
            Self::Ds => Register::Ds,
            Self::Fs => Register::Fs,
            Self::Gs => Register::Gs,
        }
    }

    pub const fn prefix(self) -> Prefixes {
        match self {
            Self::Es => Prefixes::ES,
            Self::Cs => Prefixes::CS,
            Self::Ss => Prefixes::SS,
            Self::Ds => Prefixes::DS,
            Self::Fs => Prefixes::FS,
            Self::Gs => Prefixes::GS,
        }
    }
}

/// Whichever of `66`, `F3` or `F2` appeared closest to the opcode.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub enum SimdPrefix {
    #[default]
    None,
    OperandSize,
    Repeat,
    RepeatNotZero,
}

impl SimdPrefix {
    /// Row used by tables indexed as none, 66, F3, F2.
    pub const fn index(self) -> usize {
        match self {
            Self::None => 0,
            Self::OperandSize => 1,
            Self::Repeat => 2,
            Self::RepeatNotZero => 3,
        }
    }

    /// Same as the two bit `pp` field of a VEX prefix.
    pub const fn from_pp(pp: u8) -> Self {
        match pp & 0b11 {
            0b01 => Self::OperandSize,
            0b10 => Self::Repeat,
            0b11 => Self::RepeatNotZero,
            _ => Self::None,
        }
    }

    pub const fn is_repeat(self) -> bool {
        matches!(self, Self::Repeat | Self::RepeatNotZero)
    }
}

/// Raw REX byte (`0x40..=0x4f`).
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct Rex(pub u8);

impl Rex {
    pub const fn w(self) -> bool {
        self.0 & 0b1000 != 0
    }

    pub const fn r(self) -> bool {
        self.0 & 0b0100 != 0
    }

    pub const fn x(self) -> bool {
        self.0 & 0b0010 != 0
    }

    pub const fn b(self) -> bool {
        self.0 & 0b0001 != 0
    }
}

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub enum OpcodeMap {
    #[default]
    None,
    Default,
    Map0F,
    Map0F38,
    Map0F3A,
    Map0F0F,
}

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Encoding {
    #[default]
    None,
    Legacy,
    Vex,
    Evex,
    ThreeDNow,
    Xop,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct ModRm(pub u8);

impl ModRm {
    pub const fn mod_(self) -> u8 {
        self.0 >> 6
    }

    pub const fn reg(self) -> u8 {
        (self.0 >> 3) & 0b111
    }

    pub const fn rm(self) -> u8 {
        self.0 & 0b111
    }

    pub const fn is_register(self) -> bool {
        self.mod_() == 0b11
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct Sib(pub u8);

impl Sib {
    pub const fn scale(self) -> u8 {
        self.0 >> 6
    }

    pub const fn index(self) -> u8 {
        (self.0 >> 3) & 0b111
    }

    pub const fn base(self) -> u8 {
        self.0 & 0b111
    }
}

/// Fields of a two (`C5`) or three (`C4`) byte VEX prefix.
///
/// `r`, `x`, `b` and `vvvv` are stored with the encoding's inversion undone.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub struct Vex {
    pub is_c4: bool,
    pub r: bool,
    pub x: bool,
    pub b: bool,
    pub w: bool,
    pub m_mmmm: u8,
    pub vvvv: u8,
    pub l: bool,
    pub pp: u8,
    pub bytes: [u8; 3],
}

impl Vex {
    pub fn from_c4(byte1: u8, byte2: u8) -> Self {
        Self {
            is_c4: true,
            r: byte1 & 0b1000_0000 == 0,
            x: byte1 & 0b0100_0000 == 0,
            b: byte1 & 0b0010_0000 == 0,
            m_mmmm: byte1 & 0b0001_1111,
            w: byte2 & 0b1000_0000 != 0,
            vvvv: !(byte2 >> 3) & 0b1111,
            l: byte2 & 0b0000_0100 != 0,
            pp: byte2 & 0b11,
            bytes: [0xc4, byte1, byte2],
        }
    }

    pub fn from_c5(byte1: u8) -> Self {
        Self {
            is_c4: false,
            r: byte1 & 0b1000_0000 == 0,
            x: false,
            b: false,
            w: false,
            m_mmmm: 1,
            vvvv: !(byte1 >> 3) & 0b1111,
            l: byte1 & 0b0000_0100 != 0,
            pp: byte1 & 0b11,
            bytes: [0xc5, byte1, 0],
        }
    }

    pub fn raw(&self) -> &[u8] {
        if self.is_c4 {
            &self.bytes
        } else {
            &self.bytes[..2]
        }
    }
}

/// Width of the displacement in bytes.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
#[repr(u8)]
pub enum DispSize {
    #[default]
    None = 0,
    Byte = 1,
    Word = 2,
    Dword = 4,
}

impl DispSize {
    pub const fn bytes(self) -> usize {
        self as usize
    }
}

bitflags! {
    #[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
    pub struct Action: u8 {
        const READ = 1;
        const WRITE = 2;
        const CONDREAD = 4;
        const CONDWRITE = 8;

        const READWRITE = Self::READ.bits() | Self::WRITE.bits();
    }
}

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub struct MemoryOperand {
    pub segment: Register,
    pub base: Register,
    pub index: Register,
    /// Multiplier applied to the index: 1, 2, 4 or 8.
    pub scale: u8,
    pub disp: i64,
    /// Width of the access in bytes, zero when it has none (`lea`, `invlpg`).
    pub size: u16,
}

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub enum OperandKind {
    #[default]
    None,
    Register(Register),
    Memory(MemoryOperand),
    Immediate(i64),
}

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub struct Operand {
    pub kind: OperandKind,
    /// The operand doesn't appear in the instruction's text.
    pub is_implicit: bool,
    pub action: Action,
}

impl Operand {
    pub const fn register(reg: Register, action: Action) -> Self {
        Self {
            kind: OperandKind::Register(reg),
            is_implicit: false,
            action,
        }
    }

    pub const fn memory(mem: MemoryOperand, action: Action) -> Self {
        Self {
            kind: OperandKind::Memory(mem),
            is_implicit: false,
            action,
        }
    }

    pub const fn immediate(imm: i64) -> Self {
        Self {
            kind: OperandKind::Immediate(imm),
            is_implicit: false,
            action: Action::READ,
        }
    }

    pub const fn implicit(mut self) -> Self {
        self.is_implicit = true;
        self
    }
}

bitflags! {
    #[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
    pub struct Group: u8 {
        const JUMP = 1;
        const CALL = 2;
        const RET = 4;
        const INT = 8;
        const PRIVILEGE = 16;
        const CONDITIONAL_BRANCH = 32;
        const UNCONDITIONAL_BRANCH = 64;
        const RELATIVE_ADDRESSING = 128;

        const BRANCH = Self::CONDITIONAL_BRANCH.bits() | Self::UNCONDITIONAL_BRANCH.bits();
    }
}

bitflags! {
    /// Bits of the EFLAGS register, at their architectural positions.
    #[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
    pub struct EFlags: u32 {
        const CF = 1 << 0;
        const PF = 1 << 2;
        const AF = 1 << 4;
        const ZF = 1 << 6;
        const SF = 1 << 7;
        const TF = 1 << 8;
        const IF = 1 << 9;
        const DF = 1 << 10;
        const OF = 1 << 11;
        const IOPL = 3 << 12;
        const NT = 1 << 14;
        const RF = 1 << 16;
        const VM = 1 << 17;
        const AC = 1 << 18;
        const VIF = 1 << 19;
        const VIP = 1 << 20;
        const ID = 1 << 21;

        /// The six arithmetic status flags.
        const STATUS = Self::CF.bits() | Self::PF.bits() | Self::AF.bits()
            | Self::ZF.bits() | Self::SF.bits() | Self::OF.bits();
    }
}

bitflags! {
    /// x87 condition code bits.
    #[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
    pub struct FpuFlags: u8 {
        const C0 = 1;
        const C1 = 2;
        const C2 = 4;
        const C3 = 8;

        const ALL = 0b1111;
    }
}

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub struct CpuFlagSet {
    pub eflags: EFlags,
    pub fpu: FpuFlags,
}

impl CpuFlagSet {
    pub const fn eflags(eflags: EFlags) -> Self {
        Self {
            eflags,
            fpu: FpuFlags::empty(),
        }
    }

    pub const fn fpu(fpu: FpuFlags) -> Self {
        Self {
            eflags: EFlags::empty(),
            fpu,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.eflags.is_empty() && self.fpu.is_empty()
    }
}

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub struct CpuFlags {
    pub modified: CpuFlagSet,
    pub tested: CpuFlagSet,
    pub set: CpuFlagSet,
    pub cleared: CpuFlagSet,
    pub undefined: CpuFlagSet,
}

/// A single decoded instruction.
///
/// Owns a copy of the bytes it was decoded from. The annotation fields (`id`,
/// `operands`, `group`, `cpu_flags`) are only filled in when the matching
/// [`crate::DecoderFlags`] were requested.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub struct Instruction {
    /// Set as the very last step of a successful decode.
    pub valid: bool,
    pub mode: Mode,
    pub length: u8,
    pub bytes: [u8; MAX_LENGTH],

    pub prefixes: Prefixes,
    pub num_prefixes: u8,
    pub segment_override: Option<Segment>,
    pub simd_prefix: SimdPrefix,
    /// `true` when `F3` is the last repeat prefix, `false` when it's `F2`.
    pub repeat_prefix: bool,
    pub rex: Option<Rex>,
    /// REX.W (or VEX.W in 64-bit mode) unless a later `66` cancelled it.
    pub rex_w: bool,

    pub opcode: u8,
    pub opcode_size: u8,
    pub opcode_map: OpcodeMap,
    pub encoding: Encoding,

    pub modrm: Option<ModRm>,
    pub sib: Option<Sib>,
    pub displacement: u64,
    pub disp_mask: DispSize,
    pub immediate: u64,
    /// Immediate width in bytes.
    pub imm_mask: u8,
    pub vex: Option<Vex>,

    pub id: Mnemonic,
    pub operands: [Operand; MAX_OPERANDS],
    pub num_operands: u8,
    pub group: Group,
    pub cpu_flags: CpuFlags,
}

impl Instruction {
    pub(crate) fn empty(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Raw bytes of the instruction.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..(self.length as usize).min(MAX_LENGTH)]
    }

    /// Annotated operands, in Intel order.
    pub fn operands(&self) -> &[Operand] {
        &self.operands[..(self.num_operands as usize).min(MAX_OPERANDS)]
    }

    pub fn has_prefix(&self, prefix: Prefixes) -> bool {
        self.prefixes.contains(prefix)
    }

    pub fn modrm(&self) -> ModRm {
        self.modrm.unwrap_or(ModRm(0))
    }

    /// Address width in bytes after applying `67`.
    pub fn address_size(&self) -> u8 {
        let override_ = self.prefixes.contains(Prefixes::ADDRESS_SIZE_OVERRIDE);
        match (self.mode, override_) {
            (Mode::Bits64, false) => 8,
            (Mode::Bits64, true) => 4,
            (Mode::Bits32, false) => 4,
            (Mode::Bits32, true) => 2,
            (Mode::Bits16, false) => 2,
            (Mode::Bits16, true) => 4,
        }
    }

    /// Operand width in bytes of the general purpose form of this instruction.
    pub fn operand_size(&self) -> u8 {
        if self.rex_w {
            return 8;
        }

        let override_ = self.prefixes.contains(Prefixes::OPERAND_SIZE_OVERRIDE);
        match (self.mode, override_) {
            (Mode::Bits16, false) | (Mode::Bits32 | Mode::Bits64, true) => 2,
            _ => 4,
        }
    }

    /// Stack operations default to 64-bit in long mode.
    pub fn stack_size(&self) -> u8 {
        let override_ = self.prefixes.contains(Prefixes::OPERAND_SIZE_OVERRIDE);
        match (self.mode, override_) {
            (Mode::Bits64, false) => 8,
            (Mode::Bits64, true) => 2,
            _ => self.operand_size(),
        }
    }

    /// Immediate as a signed value, it's already sign-extended where the encoding asks for it.
    pub fn imm(&self) -> i64 {
        self.immediate as i64
    }

    /// Displacement sign-extended from its encoded width.
    pub fn disp(&self) -> i64 {
        match self.disp_mask {
            DispSize::None => 0,
            DispSize::Byte => self.displacement as u8 as i8 as i64,
            DispSize::Word => self.displacement as u16 as i16 as i64,
            DispSize::Dword => self.displacement as u32 as i32 as i64,
        }
    }
}
