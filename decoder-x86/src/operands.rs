//! Explicit and implicit operands, in Intel order.

use crate::instruction::{
    Action, Encoding, Instruction, MemoryOperand, Mode, OpcodeMap, Operand, OperandKind, Prefixes,
    SimdPrefix, MAX_OPERANDS,
};
use crate::register::Register;

const R: Action = Action::READ;
const W: Action = Action::WRITE;
const RW: Action = Action::READWRITE;
const CW: Action = Action::CONDWRITE;

pub(crate) fn annotate(inst: &mut Instruction) {
    let view = *inst;
    let mut ops = Operands::new(&view);

    match view.opcode_map {
        OpcodeMap::Default => one_byte(&mut ops),
        OpcodeMap::Map0F if view.encoding == Encoding::Vex => vex(&mut ops),
        OpcodeMap::Map0F38 | OpcodeMap::Map0F3A if view.encoding == Encoding::Vex => vex(&mut ops),
        OpcodeMap::Map0F => two_byte(&mut ops),
        OpcodeMap::Map0F38 => map_0f38(&mut ops),
        OpcodeMap::Map0F3A => map_0f3a(&mut ops),
        OpcodeMap::Map0F0F => {
            ops.p(RW);
            ops.q(R);
        }
        OpcodeMap::None => {}
    }

    inst.operands = ops.list;
    inst.num_operands = ops.len as u8;
}

struct Operands<'i> {
    inst: &'i Instruction,
    list: [Operand; MAX_OPERANDS],
    len: usize,
}

impl<'i> Operands<'i> {
    fn new(inst: &'i Instruction) -> Self {
        Self {
            inst,
            list: [Operand::default(); MAX_OPERANDS],
            len: 0,
        }
    }

    fn push(&mut self, operand: Operand) {
        if let Some(slot) = self.list.get_mut(self.len) {
            *slot = operand;
            self.len += 1;
        }
    }

    fn insert(&mut self, idx: usize, operand: Operand) {
        if self.len >= MAX_OPERANDS || idx > self.len {
            return;
        }

        self.list.copy_within(idx..self.len, idx + 1);
        self.list[idx] = operand;
        self.len += 1;
    }

    fn reg(&mut self, reg: Register, action: Action) {
        self.push(Operand::register(reg, action));
    }

    fn implicit(&mut self, reg: Register, action: Action) {
        self.push(Operand::register(reg, action).implicit());
    }

    fn imm(&mut self) {
        self.push(Operand::immediate(self.inst.imm()));
    }

    fn mode64(&self) -> bool {
        self.inst.mode == Mode::Bits64
    }

    /// REX/VEX extension bits, VEX ones only mean something in long mode.
    fn ext(&self, rex: Prefixes, vex: impl Fn(&crate::instruction::Vex) -> bool) -> u8 {
        let set = self.inst.has_prefix(rex)
            || (self.mode64() && self.inst.vex.as_ref().is_some_and(vex));
        if set {
            8
        } else {
            0
        }
    }

    fn reg_field(&self) -> u8 {
        self.inst.modrm().reg() | self.ext(Prefixes::REX_R, |vex| vex.r)
    }

    fn rm_field(&self) -> u8 {
        self.inst.modrm().rm() | self.ext(Prefixes::REX_B, |vex| vex.b)
    }

    fn base_ext(&self) -> u8 {
        self.ext(Prefixes::REX_B, |vex| vex.b)
    }

    fn index_ext(&self) -> u8 {
        self.ext(Prefixes::REX_X, |vex| vex.x)
    }

    fn gpr(&self, width: u8, n: u8) -> Register {
        Register::gpr(width, n, self.inst.rex.is_some())
    }

    /// `dword` or `qword` depending on REX.W.
    fn y(&self) -> u8 {
        if self.inst.rex_w {
            8
        } else {
            4
        }
    }

    fn is_memory(&self) -> bool {
        !self.inst.modrm().is_register()
    }

    /// General purpose register selected by ModR/M.reg.
    fn g(&mut self, width: u8, action: Action) {
        let reg = self.gpr(width, self.reg_field());
        self.reg(reg, action);
    }

    /// General purpose register or memory selected by ModR/M.rm.
    fn e(&mut self, width: u8, action: Action) {
        if self.is_memory() {
            self.mem(width as u16, action);
        } else {
            let reg = self.gpr(width, self.rm_field());
            self.reg(reg, action);
        }
    }

    fn mem(&mut self, size: u16, action: Action) {
        let mem = self.memory(size);
        self.push(Operand::memory(mem, action));
    }

    /// Memory operand described by ModR/M, SIB and displacement.
    fn memory(&self, size: u16) -> MemoryOperand {
        let inst = self.inst;
        let modrm = inst.modrm();
        let addr = inst.address_size();

        let mut mem = MemoryOperand {
            scale: 1,
            disp: inst.disp(),
            size,
            ..MemoryOperand::default()
        };

        if addr == 2 {
            const PAIRS: [(Register, Register); 8] = [
                (Register::Bx, Register::Si),
                (Register::Bx, Register::Di),
                (Register::Bp, Register::Si),
                (Register::Bp, Register::Di),
                (Register::Si, Register::None),
                (Register::Di, Register::None),
                (Register::Bp, Register::None),
                (Register::Bx, Register::None),
            ];

            if !(modrm.mod_() == 0b00 && modrm.rm() == 0b110) {
                (mem.base, mem.index) = PAIRS[modrm.rm() as usize];
            }
        } else if let Some(sib) = inst.sib {
            if !(modrm.mod_() == 0b00 && sib.base() == 0b101) {
                mem.base = Register::gpr(addr, sib.base() | self.base_ext(), false);
            }

            let index = sib.index() | self.index_ext();
            if index != 0b100 {
                mem.index = Register::gpr(addr, index, false);
                mem.scale = 1 << sib.scale();
            }
        } else if modrm.mod_() == 0b00 && modrm.rm() == 0b101 {
            if self.mode64() {
                mem.base = Register::ip(addr);
            }
        } else {
            mem.base = Register::gpr(addr, modrm.rm() | self.base_ext(), false);
        }

        let stack_based = matches!(
            mem.base,
            Register::Sp
                | Register::Bp
                | Register::Esp
                | Register::Ebp
                | Register::Rsp
                | Register::Rbp
        );

        mem.segment = match inst.segment_override {
            Some(segment) => segment.register(),
            None if stack_based => Register::Ss,
            None => Register::Ds,
        };

        mem
    }

    /// `[rSI]`, the source of string instructions.
    fn string_src(&mut self, size: u8, action: Action) {
        let segment = self.inst.segment_override.map_or(Register::Ds, |seg| seg.register());
        self.string(segment, 6, size, action);
    }

    /// `es:[rDI]`, the destination of string instructions, can't be overridden.
    fn string_dst(&mut self, size: u8, action: Action) {
        self.string(Register::Es, 7, size, action);
    }

    fn string(&mut self, segment: Register, n: u8, size: u8, action: Action) {
        let mem = MemoryOperand {
            segment,
            base: Register::gpr(self.inst.address_size(), n, false),
            scale: 1,
            size: size as u16,
            ..MemoryOperand::default()
        };

        self.push(Operand::memory(mem, action).implicit());
    }

    /// `rSP` and the stack slot it points at.
    fn stack(&mut self, action: Action) {
        let sp = Register::gpr(self.inst.mode as u8, 4, false);
        let slot = MemoryOperand {
            segment: Register::Ss,
            base: sp,
            scale: 1,
            size: self.inst.stack_size() as u16,
            ..MemoryOperand::default()
        };

        self.implicit(sp, RW);
        self.push(Operand::memory(slot, action).implicit());
    }

    fn ip(&mut self, action: Action) {
        self.implicit(Register::ip(self.inst.mode as u8), action);
    }

    fn vex_long(&self) -> bool {
        self.inst.vex.is_some_and(|vex| vex.l)
    }

    fn vec_size(&self) -> u16 {
        if self.vex_long() {
            32
        } else {
            16
        }
    }

    /// Access width of an SSE operand that's scalar with `F3`/`F2`.
    fn sse_size(&self) -> u16 {
        match self.inst.simd_prefix {
            SimdPrefix::Repeat => 4,
            SimdPrefix::RepeatNotZero => 8,
            _ => self.vec_size(),
        }
    }

    /// `xmm` or, with VEX.L set, `ymm` register `n`.
    fn xmm(&self, n: u8) -> Register {
        let base = if self.vex_long() { Register::Ymm0 } else { Register::Xmm0 };
        Register::offset(base, n & 0b1111)
    }

    fn v(&mut self, action: Action) {
        let reg = self.xmm(self.reg_field());
        self.reg(reg, action);
    }

    /// Vector register or memory selected by ModR/M.rm.
    fn w(&mut self, action: Action, size: u16) {
        if self.is_memory() {
            self.mem(size, action);
        } else {
            let reg = self.xmm(self.rm_field());
            self.reg(reg, action);
        }
    }

    /// Like [`Self::w`] but always 128-bit wide.
    fn w128(&mut self, action: Action) {
        if self.is_memory() {
            self.mem(16, action);
        } else {
            self.reg(Register::offset(Register::Xmm0, self.rm_field()), action);
        }
    }

    /// Low half of a vector, an `xmm` register or half as much memory.
    fn half(&mut self, action: Action) {
        if self.is_memory() {
            self.mem(self.vec_size() / 2, action);
        } else {
            self.reg(Register::offset(Register::Xmm0, self.rm_field()), action);
        }
    }

    /// Memory indexed by a vector register, for gathers.
    fn vsib(&mut self, size: u16, wide_index: bool, action: Action) {
        let mut mem = self.memory(size);
        if let Some(sib) = self.inst.sib {
            let base = if wide_index { Register::Ymm0 } else { Register::Xmm0 };
            mem.index = Register::offset(base, sib.index() | self.index_ext());
            mem.scale = 1 << sib.scale();
        }
        self.push(Operand::memory(mem, action));
    }

    fn p(&mut self, action: Action) {
        self.reg(Register::offset(Register::Mm0, self.inst.modrm().reg()), action);
    }

    fn q(&mut self, action: Action) {
        if self.is_memory() {
            self.mem(8, action);
        } else {
            self.reg(Register::offset(Register::Mm0, self.inst.modrm().rm()), action);
        }
    }

    /// Integer SIMD rows use `xmm` registers with any SIMD prefix, `mm` without.
    fn wide(&self) -> bool {
        self.inst.simd_prefix != SimdPrefix::None || self.inst.encoding == Encoding::Vex
    }

    fn packed_reg(&mut self, action: Action) {
        if self.wide() {
            self.v(action);
        } else {
            self.p(action);
        }
    }

    fn packed_rm(&mut self, action: Action) {
        if self.wide() {
            let size = self.vec_size();
            self.w(action, size);
        } else {
            self.q(action);
        }
    }
}

fn one_byte(ops: &mut Operands) {
    let inst = ops.inst;
    let op = inst.opcode;
    let reg = inst.modrm().reg();
    let v = inst.operand_size();
    let b = ops.base_ext();
    let acc = |width: u8| Register::gpr(width, 0, false);
    let width = if op & 1 == 0 { 1 } else { v };
    let io = width.min(4);

    match op {
        0x00..=0x3f if op % 8 < 6 => {
            let dst = if op >> 3 == 7 { R } else { RW };
            match op % 8 {
                0 | 1 => {
                    ops.e(width, dst);
                    ops.g(width, R);
                }
                2 | 3 => {
                    ops.g(if op % 8 == 2 { 1 } else { v }, dst);
                    ops.e(if op % 8 == 2 { 1 } else { v }, R);
                }
                4 => {
                    ops.reg(Register::Al, dst);
                    ops.imm();
                }
                _ => {
                    ops.reg(acc(v), dst);
                    ops.imm();
                }
            }
        }
        0x06 | 0x0e | 0x16 | 0x1e => {
            ops.reg(Register::offset(Register::Es, op >> 3), R);
            ops.stack(W);
        }
        0x07 | 0x17 | 0x1f => {
            ops.reg(Register::offset(Register::Es, op >> 3), W);
            ops.stack(R);
        }
        0x27 | 0x2f => ops.implicit(Register::Al, RW),
        0x37 | 0x3f => ops.implicit(Register::Ax, RW),
        0x40..=0x4f => ops.reg(ops.gpr(v, op & 0b111), RW),
        0x50..=0x57 => {
            ops.reg(ops.gpr(inst.stack_size(), (op & 0b111) | b), R);
            ops.stack(W);
        }
        0x58..=0x5f => {
            ops.reg(ops.gpr(inst.stack_size(), (op & 0b111) | b), W);
            ops.stack(R);
        }
        0x60 | 0x9c => ops.stack(W),
        0x61 | 0x9d => ops.stack(R),
        0x62 => {
            ops.g(v, R);
            ops.mem(v as u16 * 2, R);
        }
        0x63 if inst.mode == Mode::Bits64 => {
            ops.g(v, W);
            ops.e(4, R);
        }
        0x63 => {
            ops.e(2, RW);
            ops.g(2, R);
        }
        0x68 | 0x6a => {
            ops.imm();
            ops.stack(W);
        }
        0x69 | 0x6b => {
            ops.g(v, W);
            ops.e(v, R);
            ops.imm();
        }
        0x6c | 0x6d => {
            ops.string_dst(io, W);
            ops.implicit(Register::Dx, R);
        }
        0x6e | 0x6f => {
            ops.implicit(Register::Dx, R);
            ops.string_src(io, R);
        }
        0x70..=0x7f | 0xe3 => {
            ops.imm();
            if op == 0xe3 {
                ops.implicit(Register::gpr(inst.address_size(), 1, false), R);
            }
            ops.ip(R | CW);
        }
        0x80..=0x83 => {
            let width = if op == 0x81 || op == 0x83 { v } else { 1 };
            ops.e(width, if reg == 7 { R } else { RW });
            ops.imm();
        }
        0x84 | 0x85 => {
            ops.e(width, R);
            ops.g(width, R);
        }
        0x86 | 0x87 => {
            ops.e(width, RW);
            ops.g(width, RW);
        }
        0x88 | 0x89 => {
            ops.e(width, W);
            ops.g(width, R);
        }
        0x8a | 0x8b => {
            ops.g(width, W);
            ops.e(width, R);
        }
        0x8c => {
            ops.e(if ops.is_memory() { 2 } else { v }, W);
            ops.reg(Register::offset(Register::Es, reg), R);
        }
        0x8d => {
            ops.g(v, W);
            ops.mem(0, Action::empty());
        }
        0x8e => {
            ops.reg(Register::offset(Register::Es, reg), W);
            ops.e(2, R);
        }
        0x8f => {
            ops.e(inst.stack_size(), W);
            ops.stack(R);
        }
        0x90 if !inst.has_prefix(Prefixes::REX_B) => {}
        0x90..=0x97 => {
            ops.reg(ops.gpr(v, (op & 0b111) | b), RW);
            ops.reg(acc(v), RW);
        }
        0x98 => ops.implicit(acc(v), W),
        0x99 => {
            ops.implicit(Register::gpr(v, 2, false), W);
            ops.implicit(acc(v), R);
        }
        0x9a => {
            ops.imm();
            ops.ip(W);
            ops.stack(W);
        }
        0xea => {
            ops.imm();
            ops.ip(W);
        }
        0x9e => ops.implicit(Register::Ah, R),
        0x9f => ops.implicit(Register::Ah, W),
        0xa0..=0xa3 => {
            let mem = MemoryOperand {
                segment: inst.segment_override.map_or(Register::Ds, |seg| seg.register()),
                scale: 1,
                disp: inst.immediate as i64,
                size: width as u16,
                ..MemoryOperand::default()
            };

            if op < 0xa2 {
                ops.reg(acc(width), W);
                ops.push(Operand::memory(mem, R));
            } else {
                ops.push(Operand::memory(mem, W));
                ops.reg(acc(width), R);
            }
        }
        0xa4 | 0xa5 => {
            ops.string_dst(width, W);
            ops.string_src(width, R);
        }
        0xa6 | 0xa7 => {
            ops.string_src(width, R);
            ops.string_dst(width, R);
        }
        0xa8 | 0xa9 => {
            ops.reg(acc(width), R);
            ops.imm();
        }
        0xaa | 0xab => {
            ops.string_dst(width, W);
            ops.implicit(acc(width), R);
        }
        0xac | 0xad => {
            ops.implicit(acc(width), W);
            ops.string_src(width, R);
        }
        0xae | 0xaf => {
            ops.implicit(acc(width), R);
            ops.string_dst(width, R);
        }
        0xb0..=0xbf => {
            let width = if op < 0xb8 { 1 } else { v };
            ops.reg(ops.gpr(width, (op & 0b111) | b), W);
            ops.imm();
        }
        0xc0 | 0xc1 => {
            ops.e(width, RW);
            ops.imm();
        }
        0xd0 | 0xd1 => {
            ops.e(width, RW);
            ops.push(Operand::immediate(1));
        }
        0xd2 | 0xd3 => {
            ops.e(width, RW);
            ops.reg(Register::Cl, R);
        }
        0xc2 | 0xca => {
            ops.imm();
            ops.ip(W);
            ops.stack(R);
        }
        0xc3 | 0xcb | 0xcf => {
            ops.ip(W);
            ops.stack(R);
        }
        0xc4 | 0xc5 => {
            ops.g(v, W);
            ops.mem(v as u16 + 2, R);
        }
        0xc6 if reg == 7 => ops.imm(),
        0xc7 if reg == 7 => {
            ops.imm();
            ops.ip(CW);
        }
        0xc6 | 0xc7 => {
            ops.e(width, W);
            ops.imm();
        }
        0xc8 => {
            ops.push(Operand::immediate(inst.imm() & 0xffff));
            ops.push(Operand::immediate((inst.imm() >> 16) & 0xff));
            ops.stack(W);
        }
        0xc9 => {
            ops.implicit(Register::gpr(inst.stack_size(), 5, false), RW);
            ops.stack(R);
        }
        0xcd | 0xd4 | 0xd5 => ops.imm(),
        0xd7 => ops.implicit(Register::Al, RW),
        0xd8..=0xdf => x87(ops),
        0xe0..=0xe2 => {
            ops.imm();
            ops.implicit(Register::gpr(inst.address_size(), 1, false), RW);
            ops.ip(R | CW);
        }
        0xe4 | 0xe5 => {
            ops.reg(acc(io), W);
            ops.imm();
        }
        0xe6 | 0xe7 => {
            ops.imm();
            ops.reg(acc(io), R);
        }
        0xec | 0xed => {
            ops.reg(acc(io), W);
            ops.reg(Register::Dx, R);
        }
        0xee | 0xef => {
            ops.reg(Register::Dx, R);
            ops.reg(acc(io), R);
        }
        0xe8 => {
            ops.imm();
            ops.ip(RW);
            ops.stack(W);
        }
        0xe9 | 0xeb => {
            ops.imm();
            ops.ip(W);
        }
        0xf6 | 0xf7 => match reg {
            0 | 1 => {
                ops.e(width, R);
                ops.imm();
            }
            2 | 3 => ops.e(width, RW),
            _ => {
                ops.e(width, R);
                if width == 1 {
                    ops.implicit(Register::Ax, RW);
                } else {
                    ops.implicit(acc(width), RW);
                    ops.implicit(Register::gpr(width, 2, false), RW);
                }
            }
        },
        0xfe => ops.e(1, RW),
        0xff => {
            let near = if inst.mode == Mode::Bits64 { 8 } else { v };
            match reg {
                0 | 1 => ops.e(v, RW),
                2 | 4 => {
                    ops.e(near, R);
                    ops.ip(W);
                    if reg == 2 {
                        ops.stack(W);
                    }
                }
                3 | 5 => {
                    ops.mem(v as u16 + 2, R);
                    ops.ip(W);
                    if reg == 3 {
                        ops.stack(W);
                    }
                }
                _ => {
                    ops.e(inst.stack_size(), R);
                    ops.stack(W);
                }
            }
        }
        _ => {}
    }
}

fn x87(ops: &mut Operands) {
    let inst = ops.inst;
    let op = inst.opcode;
    let modrm = inst.modrm();
    let reg = modrm.reg();

    if ops.is_memory() {
        let (size, action) = x87_memory(op, reg);
        ops.mem(size, action);
        return;
    }

    let st = Register::offset(Register::St0, modrm.rm());
    let compare = reg == 2 || reg == 3;

    match op {
        0xd8 => {
            ops.reg(Register::St0, if compare { R } else { RW });
            ops.reg(st, R);
        }
        0xd9 => match modrm.0 {
            0xc0..=0xc7 => ops.reg(st, R),
            0xc8..=0xcf => ops.reg(st, RW),
            0xd8..=0xdf => ops.reg(st, W),
            _ => {}
        },
        0xda | 0xdb if modrm.0 < 0xe0 => {
            ops.reg(Register::St0, CW);
            ops.reg(st, R);
        }
        0xdb | 0xdf if modrm.0 >= 0xe8 => {
            ops.reg(Register::St0, R);
            ops.reg(st, R);
        }
        0xdc => {
            ops.reg(st, if compare { R } else { RW });
            ops.reg(Register::St0, R);
        }
        0xdd if reg < 6 => ops.reg(st, if reg >= 4 { R } else { W }),
        0xde if modrm.0 != 0xd9 => {
            ops.reg(st, if compare { R } else { RW });
            ops.reg(Register::St0, R);
        }
        0xdf if modrm.0 == 0xe0 => ops.reg(Register::Ax, W),
        0xdf if modrm.0 < 0xe0 => ops.reg(st, W),
        _ => {}
    }
}

/// Access width and direction of the x87 memory forms.
fn x87_memory(op: u8, reg: u8) -> (u16, Action) {
    match (op, reg) {
        (0xd8 | 0xda, _) => (4, R),
        (0xdc, _) => (8, R),
        (0xde, _) => (2, R),
        (0xd9, 0) => (4, R),
        (0xd9, 2 | 3) => (4, W),
        (0xd9, 4) => (28, R),
        (0xd9, 5) => (2, R),
        (0xd9, 6) => (28, W),
        (0xd9, 7) => (2, W),
        (0xdb, 0) => (4, R),
        (0xdb, 1..=3) => (4, W),
        (0xdb, 5) => (10, R),
        (0xdb, 7) => (10, W),
        (0xdd, 0) => (8, R),
        (0xdd, 1..=3) => (8, W),
        (0xdd, 4) => (108, R),
        (0xdd, 6) => (108, W),
        (0xdd, 7) => (2, W),
        (0xdf, 0) => (2, R),
        (0xdf, 1..=3) => (2, W),
        (0xdf, 4) => (10, R),
        (0xdf, 5) => (8, R),
        (0xdf, 6) => (10, W),
        (0xdf, 7) => (8, W),
        _ => (0, R),
    }
}

fn two_byte(ops: &mut Operands) {
    use SimdPrefix::{OperandSize, Repeat, RepeatNotZero};

    let inst = ops.inst;
    let op = inst.opcode;
    let reg = inst.modrm().reg();
    let mem = ops.is_memory();
    let simd = inst.simd_prefix;
    let v = inst.operand_size();
    let y = ops.y();
    let vec = ops.vec_size();
    let scalar = simd.is_repeat();
    let control = if ops.mode64() { 8 } else { 4 };

    match op {
        0x00 => match reg {
            0 | 1 => ops.e(if mem { 2 } else { v }, W),
            2..=5 => ops.e(2, R),
            _ => {}
        },
        0x01 if mem => {
            let table = if ops.mode64() { 10 } else { 6 };
            match reg {
                0 | 1 => ops.mem(table, W),
                2 | 3 => ops.mem(table, R),
                4 => ops.mem(2, W),
                5 => ops.mem(8, R),
                6 => ops.mem(2, R),
                _ => ops.mem(0, Action::empty()),
            }
        }
        0x01 => match reg {
            4 => ops.e(v, W),
            6 => ops.e(2, R),
            _ => {}
        },
        0x02 | 0x03 => {
            ops.g(v, W);
            ops.e(2, R);
        }
        0x05 => {
            ops.ip(RW);
            ops.implicit(Register::Rcx, W);
            ops.implicit(Register::R11, W);
        }
        0x07 => {
            ops.ip(W);
            ops.implicit(Register::Rcx, R);
            ops.implicit(Register::R11, R);
        }
        0x0d | 0x18 if mem => ops.mem(0, Action::empty()),
        0x10 => {
            ops.v(if scalar && !mem { RW } else { W });
            ops.w(R, ops.sse_size());
        }
        0x11 => {
            ops.w(W, ops.sse_size());
            ops.v(R);
        }
        0x12 | 0x16 if scalar => {
            ops.v(W);
            ops.w(R, if simd == RepeatNotZero { 8 } else { vec });
        }
        0x12 | 0x16 => {
            ops.v(RW);
            ops.w(R, 8);
        }
        0x13 | 0x17 => {
            ops.mem(8, W);
            ops.v(R);
        }
        0x14 | 0x15 | 0x7c | 0x7d | 0xd0 => {
            ops.v(RW);
            ops.w(R, vec);
        }
        0x1a | 0x1b if mem => ops.mem(0, R),
        0x1e if simd == Repeat && !mem && reg == 1 => ops.e(y, W),
        0x19 | 0x1c..=0x1f if modrm_nop(inst) => ops.e(v, Action::empty()),
        0x20 | 0x21 => {
            let base = if op == 0x20 { Register::Cr0 } else { Register::Dr0 };
            ops.reg(Register::gpr(control, ops.rm_field(), false), W);
            ops.reg(Register::offset(base, ops.reg_field()), R);
        }
        0x22 | 0x23 => {
            let base = if op == 0x22 { Register::Cr0 } else { Register::Dr0 };
            ops.reg(Register::offset(base, ops.reg_field()), W);
            ops.reg(Register::gpr(control, ops.rm_field(), false), R);
        }
        0x28 => {
            ops.v(W);
            ops.w(R, vec);
        }
        0x29 => {
            ops.w(W, vec);
            ops.v(R);
        }
        0x2b => {
            // movntss and movntsd only store the low element
            ops.mem(ops.sse_size(), W);
            ops.v(R);
        }
        0xe7 if ops.wide() => {
            ops.mem(vec, W);
            ops.v(R);
        }
        0x2a if scalar => {
            ops.v(RW);
            ops.e(y, R);
        }
        0x2a => {
            ops.v(if simd == OperandSize { W } else { RW });
            ops.q(R);
        }
        0x2c | 0x2d if scalar => {
            ops.g(y, W);
            ops.w(R, ops.sse_size());
        }
        0x2c | 0x2d => {
            ops.p(W);
            ops.w(R, if simd == OperandSize { 16 } else { 8 });
        }
        0x2e | 0x2f => {
            ops.v(R);
            ops.w(R, if simd == OperandSize { 8 } else { 4 });
        }
        0x30 => {
            ops.implicit(Register::Ecx, R);
            ops.implicit(Register::Eax, R);
            ops.implicit(Register::Edx, R);
        }
        0x31 => {
            ops.implicit(Register::Eax, W);
            ops.implicit(Register::Edx, W);
        }
        0x32 | 0x33 => {
            ops.implicit(Register::Ecx, R);
            ops.implicit(Register::Eax, W);
            ops.implicit(Register::Edx, W);
        }
        0x34 => {
            ops.ip(W);
            ops.implicit(Register::gpr(inst.mode as u8, 4, false), W);
        }
        0x35 => {
            ops.ip(W);
            ops.implicit(Register::gpr(inst.mode as u8, 4, false), W);
            ops.implicit(Register::gpr(v, 1, false), R);
            ops.implicit(Register::gpr(v, 2, false), R);
        }
        0x37 => {
            ops.implicit(Register::Eax, RW);
            ops.implicit(Register::Ebx, R);
        }
        0x40..=0x4f => {
            ops.g(v, CW);
            ops.e(v, R);
        }
        0x50 => {
            ops.g(4, W);
            ops.w(R, vec);
        }
        0x51..=0x5f => {
            let moves = matches!(op, 0x51..=0x53 | 0x5a) && !scalar;
            ops.v(if moves || op == 0x5b { W } else { RW });
            ops.w(R, ops.sse_size());
        }
        0x6e => {
            ops.packed_reg(W);
            ops.e(y, R);
        }
        0x6f => {
            ops.packed_reg(W);
            ops.packed_rm(R);
        }
        0x7f => {
            ops.packed_rm(W);
            ops.packed_reg(R);
        }
        0x70 => {
            ops.packed_reg(W);
            ops.packed_rm(R);
            ops.imm();
        }
        0x71..=0x73 => {
            ops.packed_rm(RW);
            ops.imm();
        }
        0x78 | 0x79 if simd == SimdPrefix::None => {
            let width = if ops.mode64() { 8 } else { 4 };
            if op == 0x78 {
                ops.e(width, W);
                ops.g(width, R);
            } else {
                ops.g(width, W);
                ops.e(width, R);
            }
        }
        0x78 | 0x79 => {
            if op == 0x79 || simd == RepeatNotZero {
                ops.v(RW);
            }
            ops.w(if op == 0x78 && simd == OperandSize { RW } else { R }, 16);
            if inst.imm_mask == 2 {
                ops.push(Operand::immediate(inst.imm() & 0xff));
                ops.push(Operand::immediate((inst.imm() >> 8) & 0xff));
            }
        }
        0x7e if simd == Repeat => {
            ops.v(W);
            ops.w(R, 8);
        }
        0x7e => {
            ops.e(y, W);
            ops.packed_reg(R);
        }
        0x80..=0x8f => {
            ops.imm();
            ops.ip(R | CW);
        }
        0x90..=0x9f => ops.e(1, W),
        0xa0 | 0xa8 => {
            ops.reg(if op == 0xa0 { Register::Fs } else { Register::Gs }, R);
            ops.stack(W);
        }
        0xa1 | 0xa9 => {
            ops.reg(if op == 0xa1 { Register::Fs } else { Register::Gs }, W);
            ops.stack(R);
        }
        0xa2 => {
            ops.implicit(Register::Eax, RW);
            ops.implicit(Register::Ebx, W);
            ops.implicit(Register::Ecx, RW);
            ops.implicit(Register::Edx, W);
        }
        0xa3 | 0xab | 0xb3 | 0xbb => {
            ops.e(v, if op == 0xa3 { R } else { RW });
            ops.g(v, R);
        }
        0xa4 | 0xac => {
            ops.e(v, RW);
            ops.g(v, R);
            ops.imm();
        }
        0xa5 | 0xad => {
            ops.e(v, RW);
            ops.g(v, R);
            ops.reg(Register::Cl, R);
        }
        0xae => group15(ops),
        0xaf => {
            ops.g(v, RW);
            ops.e(v, R);
        }
        0xb0 | 0xb1 => {
            let width = if op == 0xb0 { 1 } else { v };
            ops.e(width, R | CW);
            ops.g(width, R);
            ops.implicit(Register::gpr(width, 0, false), RW);
        }
        0xb2 | 0xb4 | 0xb5 => {
            ops.g(v, W);
            ops.mem(v as u16 + 2, R);
        }
        0xb6 | 0xbe => {
            ops.g(v, W);
            ops.e(1, R);
        }
        0xb7 | 0xbf => {
            ops.g(v, W);
            ops.e(2, R);
        }
        0xb8 | 0xbc | 0xbd => {
            ops.g(v, W);
            ops.e(v, R);
        }
        0xb9 | 0xff => {
            ops.g(4, R);
            ops.e(4, R);
        }
        0xba => {
            ops.e(v, if reg == 4 { R } else { RW });
            ops.imm();
        }
        0xc0 | 0xc1 => {
            let width = if op == 0xc0 { 1 } else { v };
            ops.e(width, RW);
            ops.g(width, RW);
        }
        0xc2 => {
            ops.v(RW);
            ops.w(R, ops.sse_size());
            ops.imm();
        }
        0xc3 => {
            ops.mem(y as u16, W);
            ops.g(y, R);
        }
        0xc4 => {
            ops.packed_reg(RW);
            if mem {
                ops.mem(2, R);
            } else {
                ops.reg(ops.gpr(4, ops.rm_field()), R);
            }
            ops.imm();
        }
        0xc5 => {
            ops.g(4, W);
            ops.packed_rm(R);
            ops.imm();
        }
        0xc6 => {
            ops.v(RW);
            ops.w(R, vec);
            ops.imm();
        }
        0xc7 => match (reg, mem) {
            (1, true) => {
                let wide = inst.rex_w;
                ops.mem(if wide { 16 } else { 8 }, RW);
                ops.implicit(if wide { Register::Rdx } else { Register::Edx }, RW);
                ops.implicit(if wide { Register::Rax } else { Register::Eax }, RW);
            }
            (6 | 7, false) => ops.e(v, W),
            (_, true) => ops.mem(0, if reg == 7 { W } else { R }),
            _ => {}
        },
        0xc8..=0xcf => ops.reg(ops.gpr(v, (op & 0b111) | ops.base_ext()), RW),
        0xd6 => match simd {
            Repeat => {
                ops.v(W);
                ops.q(R);
            }
            RepeatNotZero => {
                ops.p(W);
                ops.reg(Register::offset(Register::Xmm0, ops.rm_field()), R);
            }
            _ => {
                ops.w(W, 8);
                ops.v(R);
            }
        },
        0xd7 => {
            ops.g(4, W);
            ops.packed_rm(R);
        }
        0xe6 => {
            ops.v(W);
            ops.w(R, vec);
        }
        0xe7 => {
            ops.mem(8, W);
            ops.p(R);
        }
        0xf0 => {
            ops.v(W);
            ops.mem(vec, R);
        }
        0xf7 => {
            ops.packed_reg(R);
            ops.packed_rm(R);
            let segment = inst.segment_override.map_or(Register::Ds, |seg| seg.register());
            ops.string(segment, 7, if ops.wide() { 16 } else { 8 }, W);
        }
        0x60..=0x6d | 0x74..=0x76 | 0xd1..=0xfe => {
            ops.packed_reg(RW);
            ops.packed_rm(R);
        }
        _ => {}
    }
}

/// The hint space `0F 19`..`0F 1F` decodes as a `nop` with an operand.
fn modrm_nop(inst: &Instruction) -> bool {
    !(inst.opcode == 0x1e && inst.simd_prefix == SimdPrefix::Repeat && inst.modrm().is_register())
}

/// `0F AE`, which forms exist is settled by validity checks.
fn group15(ops: &mut Operands) {
    use SimdPrefix::*;

    let inst = ops.inst;
    let reg = inst.modrm().reg();
    let y = ops.y();

    match (inst.simd_prefix, ops.is_memory()) {
        (None, true) => {
            let (size, action) = match reg {
                0 => (512, W),
                1 => (512, R),
                2 => (4, R),
                3 => (4, W),
                4 | 6 => (0, W),
                5 => (0, R),
                _ => (1, Action::empty()),
            };
            ops.mem(size, action);
        }
        (OperandSize, true) => ops.mem(1, Action::empty()),
        (OperandSize | RepeatNotZero, false) => ops.e(4, R),
        (Repeat, true) if reg == 6 => ops.mem(8, RW),
        (Repeat, _) if reg == 4 => ops.e(y, R),
        (Repeat, false) if reg < 2 => ops.e(y, W),
        (Repeat, false) if reg < 4 || reg == 5 => ops.e(y, R),
        (Repeat, false) if reg == 6 => ops.e(inst.address_size(), R),
        _ => {}
    }
}

fn map_0f38(ops: &mut Operands) {
    let inst = ops.inst;
    let op = inst.opcode;
    let v = inst.operand_size();
    let y = ops.y();
    let vec = ops.vec_size();

    match op {
        0x00..=0x0b | 0x1c..=0x1e => {
            ops.packed_reg(if op >= 0x1c { W } else { RW });
            ops.packed_rm(R);
        }
        0x10 | 0x14 | 0x15 => {
            ops.v(RW);
            ops.w(R, vec);
            ops.implicit(Register::Xmm0, R);
        }
        0x17 => {
            ops.v(R);
            ops.w(R, vec);
        }
        0x20..=0x25 | 0x30..=0x35 => {
            const SIZES: [u16; 6] = [8, 4, 2, 8, 4, 8];
            ops.v(W);
            ops.w(R, SIZES[(op & 0xf) as usize]);
        }
        0x2a => {
            ops.v(W);
            ops.mem(vec, R);
        }
        0x80..=0x82 => {
            ops.g(if ops.mode64() { 8 } else { 4 }, R);
            ops.mem(16, R);
        }
        0xf0 | 0xf1 if inst.has_prefix(Prefixes::REPEAT_NOT_ZERO) => {
            ops.g(y, RW);
            ops.e(if op == 0xf0 { 1 } else { v }, R);
        }
        0xf0 => {
            ops.g(v, W);
            ops.mem(v as u16, R);
        }
        0xf1 => {
            ops.mem(v as u16, W);
            ops.g(v, R);
        }
        0xf6 if inst.simd_prefix != SimdPrefix::None => {
            ops.g(y, RW);
            ops.e(y, R);
        }
        0xf5 | 0xf6 | 0xf9 => {
            ops.mem(y as u16, W);
            ops.g(y, R);
        }
        0xf8 => {
            ops.g(inst.address_size(), R);
            ops.mem(64, R);
        }
        _ => {
            ops.v(RW);
            ops.w(R, vec);
        }
    }
}

fn map_0f3a(ops: &mut Operands) {
    let inst = ops.inst;
    let op = inst.opcode;
    let y = ops.y();
    let vec = ops.vec_size();

    match op {
        0x0f if !ops.wide() => {
            ops.p(RW);
            ops.q(R);
        }
        0x08..=0x0b => {
            let size = match op {
                0x0a => 4,
                0x0b => 8,
                _ => vec,
            };
            ops.v(if op >= 0x0a { RW } else { W });
            ops.w(R, size);
        }
        0x14 | 0x15 | 0x17 => {
            let size = match op {
                0x14 => 1,
                0x15 => 2,
                _ => 4,
            };
            if ops.is_memory() {
                ops.mem(size, W);
            } else {
                ops.reg(ops.gpr(4, ops.rm_field()), W);
            }
            ops.v(R);
        }
        0x16 => {
            ops.e(y, W);
            ops.v(R);
        }
        0x20 => {
            ops.v(RW);
            if ops.is_memory() {
                ops.mem(1, R);
            } else {
                ops.reg(ops.gpr(4, ops.rm_field()), R);
            }
        }
        0x21 => {
            ops.v(RW);
            ops.w(R, 4);
        }
        0x22 => {
            ops.v(RW);
            ops.e(y, R);
        }
        0x60..=0x63 => {
            ops.v(R);
            ops.w(R, vec);
        }
        0xdf => {
            ops.v(W);
            ops.w(R, vec);
        }
        _ => {
            ops.v(RW);
            ops.w(R, vec);
        }
    }

    ops.imm();

    match op {
        0x60 | 0x62 => ops.implicit(Register::Xmm0, W),
        0x61 | 0x63 => ops.implicit(Register::Ecx, W),
        _ => {}
    }
}

/// VEX forms read a third register through `vvvv` instead of overwriting a source.
fn vex(ops: &mut Operands) {
    let inst = ops.inst;
    let Some(prefix) = inst.vex else {
        return;
    };

    let vvvv = if ops.mode64() { prefix.vvvv } else { prefix.vvvv & 0b111 };
    let nds = ops.xmm(vvvv);
    let vec = ops.vec_size();

    match (inst.opcode_map, inst.opcode) {
        (OpcodeMap::Map0F, 0x77) => {}
        (OpcodeMap::Map0F38, 0x18..=0x1a | 0x58 | 0x59 | 0x78 | 0x79) => {
            ops.v(W);
            ops.w128(R);
        }
        (OpcodeMap::Map0F3A, 0x06 | 0x46) => {
            ops.v(W);
            ops.reg(nds, R);
            ops.w(R, vec);
            ops.imm();
        }
        (OpcodeMap::Map0F3A, 0x18 | 0x38) => {
            ops.v(W);
            ops.reg(nds, R);
            ops.w128(R);
            ops.imm();
        }
        (OpcodeMap::Map0F3A, 0x19 | 0x39) => {
            ops.w128(W);
            ops.v(R);
            ops.imm();
        }
        (OpcodeMap::Map0F3A, 0x4a..=0x4c) => {
            ops.v(W);
            ops.reg(nds, R);
            ops.w(R, vec);
            ops.reg(ops.xmm((inst.immediate >> 4) as u8), R);
        }
        (OpcodeMap::Map0F38, 0x0e | 0x0f) => {
            ops.v(R);
            ops.w(R, vec);
        }
        (OpcodeMap::Map0F38, 0x13) => {
            ops.v(W);
            ops.half(R);
        }
        (OpcodeMap::Map0F38, 0x2c | 0x2d | 0x8c) => {
            ops.v(W);
            ops.reg(nds, R);
            ops.mem(vec, R);
        }
        (OpcodeMap::Map0F38, 0x2e | 0x2f | 0x8e) => {
            ops.mem(vec, W);
            ops.reg(nds, R);
            ops.v(R);
        }
        (OpcodeMap::Map0F38, 0x5a) => {
            ops.v(W);
            ops.mem(16, R);
        }
        (OpcodeMap::Map0F38, 0x90..=0x93) => {
            // dword indices fill a ymm register only with dword elements
            let qword_index = inst.opcode & 1 == 1;
            let wide_index = prefix.l && (qword_index || !prefix.w);
            ops.v(CW);
            ops.vsib(if prefix.w { 8 } else { 4 }, wide_index, R);
            ops.reg(nds, RW);
        }
        (OpcodeMap::Map0F38, 0x96..=0x9f | 0xa6..=0xaf | 0xb6..=0xbf) => {
            let col = inst.opcode & 0xf;
            let scalar = col >= 8 && col & 1 == 1;
            let size = match (scalar, prefix.w) {
                (true, true) => 8,
                (true, false) => 4,
                _ => vec,
            };
            ops.v(RW);
            ops.reg(nds, R);
            ops.w(R, size);
        }
        (OpcodeMap::Map0F38, 0xf2..=0xf7) => {
            let y = ops.y();
            let src = ops.gpr(y, vvvv);

            match inst.opcode {
                // blsr, blsmsk, blsi
                0xf3 => {
                    ops.reg(src, W);
                    ops.e(y, R);
                }
                0xf6 => {
                    ops.g(y, W);
                    ops.reg(src, W);
                    ops.e(y, R);
                    ops.implicit(ops.gpr(y, 2), R);
                }
                // pdep and pext take the mask last
                0xf5 if inst.simd_prefix.is_repeat() => {
                    ops.g(y, W);
                    ops.reg(src, R);
                    ops.e(y, R);
                }
                0xf2 => {
                    ops.g(y, W);
                    ops.reg(src, R);
                    ops.e(y, R);
                }
                _ => {
                    ops.g(y, W);
                    ops.e(y, R);
                    ops.reg(src, R);
                }
            }
        }
        (OpcodeMap::Map0F3A, 0x00 | 0x01 | 0x04 | 0x05) => {
            ops.v(W);
            ops.w(R, vec);
            ops.imm();
        }
        (OpcodeMap::Map0F3A, 0x1d) => {
            ops.half(W);
            ops.v(R);
            ops.imm();
        }
        (OpcodeMap::Map0F3A, 0xf0) => {
            let y = ops.y();
            ops.g(y, W);
            ops.e(y, R);
            ops.imm();
        }
        (OpcodeMap::Map0F, 0x71..=0x73) => {
            ops.reg(nds, W);
            ops.packed_rm(R);
            ops.imm();
        }
        (map, _) => {
            match map {
                OpcodeMap::Map0F38 => map_0f38(ops),
                OpcodeMap::Map0F3A => map_0f3a(ops),
                _ => two_byte(ops),
            }

            let first = ops.list[0];
            let vector = matches!(
                first.kind,
                OperandKind::Register(reg) if reg >= Register::Xmm0 && reg <= Register::Ymm31
            );
            if ops.len > 1 && vector && first.action == RW {
                ops.list[0].action = W;
                ops.insert(1, Operand::register(nds, R));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::parse;
    use crate::DecoderFlags;

    fn operands(bytes: &[u8], mode: Mode) -> Vec<Operand> {
        let mut inst = parse(bytes, mode, DecoderFlags::ALL).unwrap();
        annotate(&mut inst);
        inst.operands().to_vec()
    }

    fn explicit(bytes: &[u8], mode: Mode) -> Vec<OperandKind> {
        operands(bytes, mode)
            .into_iter()
            .filter(|op| !op.is_implicit)
            .map(|op| op.kind)
            .collect()
    }

    #[test]
    fn register_forms() {
        // add eax, ecx
        assert_eq!(
            explicit(&[0x01, 0xc8], Mode::Bits64),
            [OperandKind::Register(Register::Eax), OperandKind::Register(Register::Ecx)]
        );

        // mov r9, rax
        assert_eq!(
            explicit(&[0x49, 0x89, 0xc1], Mode::Bits64),
            [OperandKind::Register(Register::R9), OperandKind::Register(Register::Rax)]
        );

        // mov sil, 1
        assert_eq!(
            explicit(&[0x40, 0xb6, 0x01], Mode::Bits64),
            [OperandKind::Register(Register::Sil), OperandKind::Immediate(1)]
        );
    }

    #[test]
    fn memory_forms() {
        // mov eax, [rbp-8]
        let ops = operands(&[0x8b, 0x45, 0xf8], Mode::Bits64);
        let OperandKind::Memory(mem) = ops[1].kind else {
            panic!("expected memory operand");
        };
        assert_eq!(mem.base, Register::Rbp);
        assert_eq!(mem.segment, Register::Ss);
        assert_eq!(mem.disp, -8);
        assert_eq!(ops[1].action, R);

        // lea rax, [rip+0x10]
        let ops = operands(&[0x48, 0x8d, 0x05, 0x10, 0, 0, 0], Mode::Bits64);
        let OperandKind::Memory(mem) = ops[1].kind else {
            panic!("expected memory operand");
        };
        assert_eq!(mem.base, Register::Rip);
        assert_eq!(mem.disp, 0x10);

        // mov [r12+r13*4], eax
        let ops = operands(&[0x43, 0x89, 0x04, 0xac], Mode::Bits64);
        let OperandKind::Memory(mem) = ops[0].kind else {
            panic!("expected memory operand");
        };
        assert_eq!((mem.base, mem.index, mem.scale), (Register::R12, Register::R13, 4));
        assert_eq!(ops[0].action, W);
    }

    #[test]
    fn sixteen_bit_addressing() {
        // mov ax, [bx+si]
        let ops = operands(&[0x8b, 0x00], Mode::Bits16);
        let OperandKind::Memory(mem) = ops[1].kind else {
            panic!("expected memory operand");
        };
        assert_eq!((mem.base, mem.index), (Register::Bx, Register::Si));
        assert_eq!(ops[0].kind, OperandKind::Register(Register::Ax));

        // mov ax, [bp+2]
        let ops = operands(&[0x8b, 0x46, 0x02], Mode::Bits16);
        let OperandKind::Memory(mem) = ops[1].kind else {
            panic!("expected memory operand");
        };
        assert_eq!(mem.segment, Register::Ss);
    }

    #[test]
    fn implicit_operands() {
        // push rbx
        let ops = operands(&[0x53], Mode::Bits64);
        assert_eq!(ops[0].kind, OperandKind::Register(Register::Rbx));
        assert!(ops[1..].iter().all(|op| op.is_implicit));
        assert_eq!(ops[1].kind, OperandKind::Register(Register::Rsp));

        // ret
        let ops = operands(&[0xc3], Mode::Bits64);
        assert!(ops.iter().all(|op| op.is_implicit));
        assert_eq!(ops[0].kind, OperandKind::Register(Register::Rip));
    }

    #[test]
    fn vex_third_operand() {
        // vaddps ymm0, ymm1, ymm2
        assert_eq!(
            explicit(&[0xc5, 0xf4, 0x58, 0xc2], Mode::Bits64),
            [
                OperandKind::Register(Register::Ymm0),
                OperandKind::Register(Register::Ymm1),
                OperandKind::Register(Register::Ymm2),
            ]
        );

        // vmovaps xmm0, xmm1
        assert_eq!(
            explicit(&[0xc5, 0xf8, 0x28, 0xc1], Mode::Bits64),
            [OperandKind::Register(Register::Xmm0), OperandKind::Register(Register::Xmm1)]
        );
    }

    #[test]
    fn vex_general_purpose() {
        // andn eax, ecx, edx
        assert_eq!(
            explicit(&[0xc4, 0xe2, 0x70, 0xf2, 0xc2], Mode::Bits64),
            [
                OperandKind::Register(Register::Eax),
                OperandKind::Register(Register::Ecx),
                OperandKind::Register(Register::Edx),
            ]
        );

        // shlx rax, rcx, rdx
        assert_eq!(
            explicit(&[0xc4, 0xe2, 0xe9, 0xf7, 0xc1], Mode::Bits64),
            [
                OperandKind::Register(Register::Rax),
                OperandKind::Register(Register::Rcx),
                OperandKind::Register(Register::Rdx),
            ]
        );
    }

    #[test]
    fn gathers() {
        // vpgatherdd xmm0, [rax+xmm2*4], xmm1
        let ops = operands(&[0xc4, 0xe2, 0x71, 0x90, 0x04, 0x90], Mode::Bits64);
        assert_eq!(ops[0].kind, OperandKind::Register(Register::Xmm0));
        let OperandKind::Memory(mem) = ops[1].kind else {
            panic!("expected memory operand");
        };
        assert_eq!((mem.base, mem.index, mem.scale), (Register::Rax, Register::Xmm2, 4));
        assert_eq!(mem.size, 4);
        assert_eq!(ops[2].kind, OperandKind::Register(Register::Xmm1));
    }
}
