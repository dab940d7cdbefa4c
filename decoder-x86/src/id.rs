//! Mnemonic of an already parsed instruction.

use crate::decode::THREE_DNOW_OPCODES;
use crate::instruction::{Encoding, Instruction, Mode, OpcodeMap, Prefixes, SimdPrefix};
use crate::mnemonic::Mnemonic::{self, *};
use crate::mnemonic::*;

pub(crate) fn identify(inst: &Instruction) -> Mnemonic {
    if inst.encoding == Encoding::Vex {
        return vex(inst);
    }

    match inst.opcode_map {
        OpcodeMap::Default => one_byte(inst),
        OpcodeMap::Map0F => two_byte(inst),
        OpcodeMap::Map0F38 => map_0f38(inst),
        OpcodeMap::Map0F3A => map_0f3a(inst),
        OpcodeMap::Map0F0F => THREE_DNOW_OPCODES
            .iter()
            .position(|&op| op == inst.opcode)
            .map_or(Invalid, |idx| THREE_DNOW[idx]),
        OpcodeMap::None => Invalid,
    }
}

/// Entry of a table indexed by the SIMD prefix, prefixes past its end don't exist.
fn pick(table: &[Mnemonic], simd: SimdPrefix) -> Mnemonic {
    table.get(simd.index()).copied().unwrap_or(Invalid)
}

/// Index into the byte, word, dword, qword string tables.
fn width_index(operand_size: u8) -> usize {
    match operand_size {
        2 => 1,
        4 => 2,
        _ => 3,
    }
}

fn one_byte(inst: &Instruction) -> Mnemonic {
    let op = inst.opcode;
    let modrm = inst.modrm();
    let reg = modrm.reg() as usize;
    let opsize = inst.operand_size();
    let width = width_index(opsize);

    match op {
        0x00..=0x3f if op % 8 < 6 => GROUP1[(op >> 3) as usize],
        0x06 | 0x0e | 0x16 | 0x1e => Push,
        0x07 | 0x17 | 0x1f => Pop,
        0x27 => Daa,
        0x2f => Das,
        0x37 => Aaa,
        0x3f => Aas,
        0x40..=0x47 => Inc,
        0x48..=0x4f => Dec,
        0x50..=0x57 | 0x68 | 0x6a => Push,
        0x58..=0x5f | 0x8f => Pop,
        0x60 if opsize == 2 => Pusha,
        0x60 => Pushad,
        0x61 if opsize == 2 => Popa,
        0x61 => Popad,
        0x62 => Bound,
        0x63 if inst.mode == Mode::Bits64 => Movsxd,
        0x63 => Arpl,
        0x69 | 0x6b => Imul,
        0x6c => Insb,
        0x6d if opsize == 2 => Insw,
        0x6d => Insd,
        0x6e => Outsb,
        0x6f if opsize == 2 => Outsw,
        0x6f => Outsd,
        0x70..=0x7f => JCC[(op & 0xf) as usize],
        0x80..=0x83 => GROUP1[reg],
        0x84 | 0x85 | 0xa8 | 0xa9 => Test,
        0x86 | 0x87 | 0x91..=0x97 => Xchg,
        0x88..=0x8c | 0x8e | 0xa0..=0xa3 | 0xb0..=0xbf => Mov,
        0x8d => Lea,
        0x90 if inst.has_prefix(Prefixes::REPEAT) => Pause,
        0x90 if inst.has_prefix(Prefixes::REX_B) => Xchg,
        0x90 => Nop,
        0x98 => [Cbw, Cwde, Cdqe][width - 1],
        0x99 => [Cwd, Cdq, Cqo][width - 1],
        0x9a => Lcall,
        0x9b => Fwait,
        0x9c | 0x9d => {
            let size = inst.stack_size();
            match (op, size) {
                (0x9c, 2) => Pushf,
                (0x9c, 4) => Pushfd,
                (0x9c, _) => Pushfq,
                (_, 2) => Popf,
                (_, 4) => Popfd,
                _ => Popfq,
            }
        }
        0x9e => Sahf,
        0x9f => Lahf,
        0xa4 => Movsb,
        0xa5 => MOVS[width],
        0xa6 => Cmpsb,
        0xa7 => CMPS[width],
        0xaa => Stosb,
        0xab => STOS[width],
        0xac => Lodsb,
        0xad => LODS[width],
        0xae => Scasb,
        0xaf => SCAS[width],
        0xc0 | 0xc1 | 0xd0..=0xd3 => GROUP2[reg],
        0xc2 | 0xc3 => Ret,
        0xc4 => Les,
        0xc5 => Lds,
        0xc6 if reg == 7 => Xabort,
        0xc7 if reg == 7 => Xbegin,
        0xc6 | 0xc7 => Mov,
        0xc8 => Enter,
        0xc9 => Leave,
        0xca | 0xcb => Retf,
        0xcc => Int3,
        0xcd => Int,
        0xce => Into,
        0xcf => [Iret, Iretd, Iretq][width - 1],
        0xd4..=0xd7 => ASCII_ADJUST[(op - 0xd4) as usize],
        0xd8..=0xdf => x87(op, modrm.0),
        0xe0..=0xe2 => LOOPCC[(op - 0xe0) as usize],
        0xe3 => match inst.address_size() {
            2 => Jcxz,
            4 => Jecxz,
            _ => Jrcxz,
        },
        0xe4 | 0xe5 | 0xec | 0xed => In,
        0xe6 | 0xe7 | 0xee | 0xef => Out,
        0xe8 => Call,
        0xe9 | 0xeb => Jmp,
        0xea => Ljmp,
        0xf1 => Int1,
        0xf4 => Hlt,
        0xf5 => Cmc,
        0xf6 | 0xf7 => GROUP3[reg],
        0xf8..=0xfd => FLAG_OPS[(op - 0xf8) as usize],
        0xfe | 0xff => GROUP5[reg],
        _ => Invalid,
    }
}

fn x87(op: u8, modrm: u8) -> Mnemonic {
    let reg = ((modrm >> 3) & 0b111) as usize;

    if modrm < 0xc0 {
        return match op {
            0xd8 | 0xdc => FPU_ARITH[reg],
            0xd9 => FPU_D9_MEM[reg],
            0xda | 0xde => FPU_INT_ARITH[reg],
            0xdb => FPU_DB_MEM[reg],
            0xdd => FPU_DD_MEM[reg],
            _ => FPU_DF_MEM[reg],
        };
    }

    match op {
        0xd8 => FPU_ARITH[reg],
        0xd9 => match modrm {
            0xc0..=0xc7 => Fld,
            0xc8..=0xcf => Fxch,
            0xd0 => Fnop,
            0xd8..=0xdf => Fstp,
            0xe0..=0xff => FPU_D9_E0[(modrm - 0xe0) as usize],
            _ => Invalid,
        },
        0xda if modrm == 0xe9 => Fucompp,
        0xda => FPU_DA_REG.get(reg).copied().unwrap_or(Invalid),
        0xdb => match modrm {
            0xe0..=0xe4 => FPU_DB_E0[(modrm - 0xe0) as usize],
            _ => FPU_DB_REG[reg],
        },
        0xdc => FPU_ARITH_REVERSED[reg],
        0xdd => FPU_DD_REG[reg],
        0xde if modrm == 0xd9 => Fcompp,
        0xde => FPU_ARITH_POP[reg],
        0xdf if modrm == 0xe0 => Fnstsw,
        _ => FPU_DF_REG[reg],
    }
}

fn two_byte(inst: &Instruction) -> Mnemonic {
    use SimdPrefix::{OperandSize, Repeat, RepeatNotZero};

    let op = inst.opcode;
    let modrm = inst.modrm();
    let (reg, mem) = (modrm.reg() as usize, !modrm.is_register());
    let simd = inst.simd_prefix;
    let col = (op & 0xf) as usize;

    match op {
        0x00 => GROUP6[reg],
        0x01 => group7(inst),
        0x02 => Lar,
        0x03 => Lsl,
        0x05 => Syscall,
        0x06 => Clts,
        0x07 => Sysret,
        0x08 => Invd,
        0x09 => Wbinvd,
        0x0b => Ud2,
        0x0d if reg == 1 => Prefetchw,
        0x0d => Prefetch,
        0x0e => Femms,
        0x10 | 0x11 => pick(&[Movups, Movupd, Movss, Movsd], simd),
        0x12 if simd == SimdPrefix::None && !mem => Movhlps,
        0x12 => pick(&[Movlps, Movlpd, Movsldup, Movddup], simd),
        0x13 => pick(&[Movlps, Movlpd], simd),
        0x14 => pick(&[Unpcklps, Unpcklpd], simd),
        0x15 => pick(&[Unpckhps, Unpckhpd], simd),
        0x16 if simd == SimdPrefix::None && !mem => Movlhps,
        0x16 => pick(&[Movhps, Movhpd, Movshdup], simd),
        0x17 => pick(&[Movhps, Movhpd], simd),
        0x18 if mem && reg < 4 => PREFETCH_HINTS[reg],
        0x1a => pick(&[Bndldx, Bndmov, Bndcl, Bndcu], simd),
        0x1b => pick(&[Bndstx, Bndmov, Bndmk, Bndcn], simd),
        0x1e if simd == Repeat && modrm.0 == 0xfa => Endbr64,
        0x1e if simd == Repeat && modrm.0 == 0xfb => Endbr32,
        0x1e if simd == Repeat && !mem && reg == 1 => {
            if inst.rex_w {
                Rdsspq
            } else {
                Rdsspd
            }
        }
        0x18..=0x1f => Nop,
        0x20..=0x23 => Mov,
        0x28 | 0x29 => pick(&[Movaps, Movapd], simd),
        0x2a => pick(&[Cvtpi2ps, Cvtpi2pd, Cvtsi2ss, Cvtsi2sd], simd),
        0x2b => pick(&[Movntps, Movntpd, Movntss, Movntsd], simd),
        0x2c => pick(&[Cvttps2pi, Cvttpd2pi, Cvttss2si, Cvttsd2si], simd),
        0x2d => pick(&[Cvtps2pi, Cvtpd2pi, Cvtss2si, Cvtsd2si], simd),
        0x2e => pick(&[Ucomiss, Ucomisd], simd),
        0x2f => pick(&[Comiss, Comisd], simd),
        0x30 => Wrmsr,
        0x31 => Rdtsc,
        0x32 => Rdmsr,
        0x33 => Rdpmc,
        0x34 => Sysenter,
        0x35 => Sysexit,
        0x37 => Getsec,
        0x40..=0x4f => CMOVCC[col],
        0x50..=0x5f => SSE_ROW5[simd.index()][col],
        0x60..=0x6d => SSE_ROW6[(op - 0x60) as usize],
        0x6e if inst.rex_w => Movq,
        0x6e => Movd,
        0x6f | 0x7f => pick(&[Movq, Movdqa, Movdqu], simd),
        0x70 => pick(&[Pshufw, Pshufd, Pshufhw, Pshuflw], simd),
        0x71 => [Invalid, Invalid, Psrlw, Invalid, Psraw, Invalid, Psllw, Invalid][reg],
        0x72 => [Invalid, Invalid, Psrld, Invalid, Psrad, Invalid, Pslld, Invalid][reg],
        0x73 => [Invalid, Invalid, Psrlq, Psrldq, Invalid, Invalid, Psllq, Pslldq][reg],
        0x74..=0x76 => [Pcmpeqb, Pcmpeqw, Pcmpeqd][(op - 0x74) as usize],
        0x77 => Emms,
        0x78 => pick(&[Vmread, Extrq, Invalid, Insertq], simd),
        0x79 => pick(&[Vmwrite, Extrq, Invalid, Insertq], simd),
        0x7c => pick(&[Invalid, Haddpd, Invalid, Haddps], simd),
        0x7d => pick(&[Invalid, Hsubpd, Invalid, Hsubps], simd),
        0x7e if simd == Repeat || inst.rex_w => Movq,
        0x7e => Movd,
        0x80..=0x8f => JCC[col],
        0x90..=0x9f => SETCC[col],
        0xa0 | 0xa8 => Push,
        0xa1 | 0xa9 => Pop,
        0xa2 => Cpuid,
        0xa6 => PADLOCK_A6.get(reg).copied().unwrap_or(Invalid),
        0xa7 => PADLOCK_A7.get(reg).copied().unwrap_or(Invalid),
        0xa3 => Bt,
        0xa4 | 0xa5 => Shld,
        0xaa => Rsm,
        0xab => Bts,
        0xac | 0xad => Shrd,
        0xae => group15(inst),
        0xaf => Imul,
        0xb0 | 0xb1 => Cmpxchg,
        0xb2 => Lss,
        0xb3 => Btr,
        0xb4 => Lfs,
        0xb5 => Lgs,
        0xb6 | 0xb7 => Movzx,
        0xb8 => Popcnt,
        0xb9 => Ud1,
        0xba => [Invalid, Invalid, Invalid, Invalid, Bt, Bts, Btr, Btc][reg],
        0xbb => Btc,
        0xbc if simd == Repeat => Tzcnt,
        0xbc => Bsf,
        0xbd if simd == Repeat => Lzcnt,
        0xbd => Bsr,
        0xbe | 0xbf => Movsx,
        0xc0 | 0xc1 => Xadd,
        0xc2 => match CMP_PREDICATES[simd.index()].get(inst.immediate as usize) {
            Some(&predicate) => predicate,
            None => [Cmpps, Cmppd, Cmpss, Cmpsd][simd.index()],
        },
        0xc3 => Movnti,
        0xc4 => Pinsrw,
        0xc5 => Pextrw,
        0xc6 => pick(&[Shufps, Shufpd], simd),
        0xc7 => group9(inst),
        0xc8..=0xcf => Bswap,
        0xd0 => pick(&[Invalid, Addsubpd, Invalid, Addsubps], simd),
        0xd6 => pick(&[Invalid, Movq, Movq2dq, Movdq2q], simd),
        0xe6 => pick(&[Invalid, Cvttpd2dq, Cvtdq2pd, Cvtpd2dq], simd),
        0xe7 if simd == OperandSize => Movntdq,
        0xe7 => Movntq,
        0xf7 if simd == OperandSize => Maskmovdqu,
        0xf7 => Maskmovq,
        0xf0 if simd == RepeatNotZero => Lddqu,
        0xd0..=0xff => SSE_ROW_D[(op - 0xd0) as usize],
        _ => Invalid,
    }
}

/// `0F 01`, the register forms are selected by the full ModR/M byte.
fn group7(inst: &Instruction) -> Mnemonic {
    let modrm = inst.modrm();
    let (reg, rm) = (modrm.reg() as usize, modrm.rm() as usize);
    let repeat = inst.simd_prefix == SimdPrefix::Repeat;

    if !modrm.is_register() {
        return match reg {
            5 if repeat => Rstorssp,
            _ => GROUP7_MEM[reg],
        };
    }

    match reg {
        0 => GROUP7_REG0[rm],
        1 => GROUP7_REG1[rm],
        2 => GROUP7_REG2[rm],
        3 => GROUP7_REG3[rm],
        4 => Smsw,
        5 => match rm {
            0 if repeat => Setssbsy,
            2 if repeat => Saveprevssp,
            6 => Rdpkru,
            7 => Wrpkru,
            _ => Invalid,
        },
        6 => Lmsw,
        _ => GROUP7_REG7[rm],
    }
}

/// `0F AE`, fences and state management.
fn group15(inst: &Instruction) -> Mnemonic {
    use SimdPrefix::*;

    let modrm = inst.modrm();
    let (reg, mem) = (modrm.reg() as usize, !modrm.is_register());

    match (inst.simd_prefix, mem) {
        (None, true) => GROUP15_MEM[reg],
        (None, false) => [Invalid, Invalid, Invalid, Invalid, Invalid, Lfence, Mfence, Sfence][reg],
        (OperandSize, true) if reg == 6 => Clwb,
        (OperandSize, true) if reg == 7 => Clflushopt,
        (OperandSize, false) if reg == 6 => Tpause,
        (Repeat, _) if reg == 4 => Ptwrite,
        (Repeat, true) if reg == 6 => Clrssbsy,
        (Repeat, false) if reg < 4 => FSGSBASE[reg],
        (Repeat, false) if reg == 5 => Incssp,
        (Repeat, false) if reg == 6 => Umonitor,
        (RepeatNotZero, false) if reg == 6 => Umwait,
        _ => Invalid,
    }
}

/// `0F C7`.
fn group9(inst: &Instruction) -> Mnemonic {
    use SimdPrefix::*;

    let modrm = inst.modrm();
    let (reg, mem) = (modrm.reg(), !modrm.is_register());

    match (reg, mem) {
        (1, true) if inst.rex_w => Cmpxchg16b,
        (1, true) => Cmpxchg8b,
        (3, true) => Xrstors,
        (4, true) => Xsavec,
        (5, true) => Xsaves,
        (6, true) => match inst.simd_prefix {
            OperandSize => Vmclear,
            Repeat => Vmxon,
            _ => Vmptrld,
        },
        (7, true) => Vmptrst,
        (6, false) => Rdrand,
        (7, false) if inst.simd_prefix == Repeat => Rdpid,
        (7, false) => Rdseed,
        _ => Invalid,
    }
}

fn map_0f38(inst: &Instruction) -> Mnemonic {
    let op = inst.opcode;

    match op {
        0x00..=0x0b => SSSE3_ROW0[op as usize],
        0x10 => Pblendvb,
        0x14 => Blendvps,
        0x15 => Blendvpd,
        0x17 => Ptest,
        0x1c..=0x1e => PABS[(op - 0x1c) as usize],
        0x20..=0x2b => SSE41_ROW2[(op - 0x20) as usize],
        0x30..=0x3f => SSE41_ROW3[(op - 0x30) as usize],
        0x40 => Pmulld,
        0x41 => Phminposuw,
        0x80..=0x82 => INVALIDATE[(op - 0x80) as usize],
        0xc8..=0xcd => SHA[(op - 0xc8) as usize],
        0xcf => Gf2p8mulb,
        0xdb..=0xdf => AES[(op - 0xdb) as usize],
        0xf0 | 0xf1 if inst.has_prefix(Prefixes::REPEAT_NOT_ZERO) => Crc32,
        0xf0 | 0xf1 => Movbe,
        0xf5 if inst.rex_w => Wrussq,
        0xf5 => Wrussd,
        0xf6 => match inst.simd_prefix {
            SimdPrefix::OperandSize => Adcx,
            SimdPrefix::Repeat => Adox,
            _ if inst.rex_w => Wrssq,
            _ => Wrssd,
        },
        0xf8 => Movdir64b,
        0xf9 => Movdiri,
        _ => Invalid,
    }
}

fn map_0f3a(inst: &Instruction) -> Mnemonic {
    let op = inst.opcode;

    match op {
        0x08..=0x0f => SSE41_ROUND[(op - 0x08) as usize],
        0x14 => Pextrb,
        0x15 => Pextrw,
        0x16 if inst.rex_w => Pextrq,
        0x16 => Pextrd,
        0x17 => Extractps,
        0x20 => Pinsrb,
        0x21 => Insertps,
        0x22 if inst.rex_w => Pinsrq,
        0x22 => Pinsrd,
        0x40..=0x44 => SSE41_ROW4[(op - 0x40) as usize],
        0x60..=0x63 => SSE42_STRING[(op - 0x60) as usize],
        0xcc => Sha1rnds4,
        0xce => Gf2p8affineqb,
        0xcf => Gf2p8affineinvqb,
        0xdf => Aeskeygenassist,
        _ => Invalid,
    }
}

/// VEX only instructions, everything else shares the legacy identifier.
fn vex(inst: &Instruction) -> Mnemonic {
    let long = inst.vex.is_some_and(|vex| vex.l);
    let w = inst.vex.is_some_and(|vex| vex.w) as usize;
    let op = inst.opcode;

    match (inst.opcode_map, op) {
        (OpcodeMap::Map0F, 0x77) if long => Vzeroall,
        (OpcodeMap::Map0F, 0x77) => Vzeroupper,
        (OpcodeMap::Map0F38, 0x0c) => Vpermilps,
        (OpcodeMap::Map0F38, 0x0d) => Vpermilpd,
        (OpcodeMap::Map0F38, 0x0e) => Vtestps,
        (OpcodeMap::Map0F38, 0x0f) => Vtestpd,
        (OpcodeMap::Map0F38, 0x13) => Vcvtph2ps,
        (OpcodeMap::Map0F38, 0x16) => Vpermps,
        (OpcodeMap::Map0F38, 0x2c | 0x2e) => Vmaskmovps,
        (OpcodeMap::Map0F38, 0x2d | 0x2f) => Vmaskmovpd,
        (OpcodeMap::Map0F38, 0x36) => Vpermd,
        (OpcodeMap::Map0F38, 0x45) => [Vpsrlvd, Vpsrlvq][w],
        (OpcodeMap::Map0F38, 0x46) => Vpsravd,
        (OpcodeMap::Map0F38, 0x47) => [Vpsllvd, Vpsllvq][w],
        (OpcodeMap::Map0F38, 0x5a) => Vbroadcasti128,
        (OpcodeMap::Map0F38, 0x8c | 0x8e) => [Vpmaskmovd, Vpmaskmovq][w],
        (OpcodeMap::Map0F38, 0x90..=0x93) => GATHER[(op - 0x90) as usize * 2 + w],
        (OpcodeMap::Map0F38, 0x96..=0x9f | 0xa6..=0xaf | 0xb6..=0xbf) => {
            FMA[(op >> 4) as usize - 9][((op & 0xf) as usize - 6) * 2 + w]
        }
        (OpcodeMap::Map0F38, 0xf2) => Andn,
        (OpcodeMap::Map0F38, 0xf3) => GROUP17[inst.modrm().reg() as usize],
        (OpcodeMap::Map0F38, 0xf5) => pick(&[Bzhi, Invalid, Pext, Pdep], inst.simd_prefix),
        (OpcodeMap::Map0F38, 0xf6) => Mulx,
        (OpcodeMap::Map0F38, 0xf7) => pick(&[Bextr, Shlx, Sarx, Shrx], inst.simd_prefix),
        (OpcodeMap::Map0F38, 0x18) => Vbroadcastss,
        (OpcodeMap::Map0F38, 0x19) => Vbroadcastsd,
        (OpcodeMap::Map0F38, 0x1a) => Vbroadcastf128,
        (OpcodeMap::Map0F38, 0x58) => Vpbroadcastd,
        (OpcodeMap::Map0F38, 0x59) => Vpbroadcastq,
        (OpcodeMap::Map0F38, 0x78) => Vpbroadcastb,
        (OpcodeMap::Map0F38, 0x79) => Vpbroadcastw,
        (OpcodeMap::Map0F3A, 0x00) => Vpermq,
        (OpcodeMap::Map0F3A, 0x01) => Vpermpd,
        (OpcodeMap::Map0F3A, 0x02) => Vpblendd,
        (OpcodeMap::Map0F3A, 0x04) => Vpermilps,
        (OpcodeMap::Map0F3A, 0x05) => Vpermilpd,
        (OpcodeMap::Map0F3A, 0x06) => Vperm2f128,
        (OpcodeMap::Map0F3A, 0x1d) => Vcvtps2ph,
        (OpcodeMap::Map0F3A, 0xf0) => Rorx,
        (OpcodeMap::Map0F3A, 0x18) => Vinsertf128,
        (OpcodeMap::Map0F3A, 0x19) => Vextractf128,
        (OpcodeMap::Map0F3A, 0x38) => Vinserti128,
        (OpcodeMap::Map0F3A, 0x39) => Vextracti128,
        (OpcodeMap::Map0F3A, 0x46) => Vperm2i128,
        (OpcodeMap::Map0F3A, 0x4a) => Vblendvps,
        (OpcodeMap::Map0F3A, 0x4b) => Vblendvpd,
        (OpcodeMap::Map0F3A, 0x4c) => Vpblendvb,
        (OpcodeMap::Map0F38, _) => map_0f38(inst),
        (OpcodeMap::Map0F3A, _) => map_0f3a(inst),
        _ => two_byte(inst),
    }
}

/// Identifiers that already carry their `v`, the rest get one when VEX encoded.
pub(crate) fn is_vex_only(id: Mnemonic) -> bool {
    (id as u16) >= (Vbroadcastss as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::parse;
    use crate::DecoderFlags;

    fn id(bytes: &[u8], mode: Mode) -> Mnemonic {
        identify(&parse(bytes, mode, DecoderFlags::ALL).unwrap())
    }

    #[test]
    fn one_byte_map() {
        assert_eq!(id(&[0x90], Mode::Bits64), Nop);
        assert_eq!(id(&[0xf3, 0x90], Mode::Bits64), Pause);
        assert_eq!(id(&[0x41, 0x90], Mode::Bits64), Xchg);
        assert_eq!(id(&[0x48, 0x98], Mode::Bits64), Cdqe);
        assert_eq!(id(&[0x98], Mode::Bits16), Cbw);
        assert_eq!(id(&[0x48, 0xa5], Mode::Bits64), Movsq);
        assert_eq!(id(&[0x83, 0xf8, 0x01], Mode::Bits64), Cmp);
        assert_eq!(id(&[0xe3, 0x00], Mode::Bits32), Jecxz);
        assert_eq!(id(&[0x9c], Mode::Bits64), Pushfq);
    }

    #[test]
    fn x87() {
        assert_eq!(id(&[0xdb, 0xe3], Mode::Bits64), Fninit);
        assert_eq!(id(&[0xdb, 0xe0], Mode::Bits64), Fneni);
        assert_eq!(id(&[0xd9, 0xe8], Mode::Bits64), Fld1);
        assert_eq!(id(&[0xdc, 0xe9], Mode::Bits64), Fsub);
        assert_eq!(id(&[0xde, 0xd9], Mode::Bits64), Fcompp);
        assert_eq!(id(&[0xdf, 0xe0], Mode::Bits64), Fnstsw);
        assert_eq!(id(&[0xdd, 0x18], Mode::Bits32), Fstp);
    }

    #[test]
    fn two_byte_map() {
        assert_eq!(id(&[0x0f, 0x05], Mode::Bits64), Syscall);
        assert_eq!(id(&[0x0f, 0x2f, 0xc1], Mode::Bits64), Comiss);
        assert_eq!(id(&[0xf3, 0x0f, 0xbc, 0xc1], Mode::Bits64), Tzcnt);
        assert_eq!(id(&[0xf3, 0x0f, 0xbd, 0xc1], Mode::Bits64), Lzcnt);
        assert_eq!(id(&[0x0f, 0xc2, 0xc1, 0x01], Mode::Bits64), Cmpltps);
        assert_eq!(id(&[0xf2, 0x0f, 0xc2, 0xc1, 0x07], Mode::Bits64), Cmpordsd);
        assert_eq!(id(&[0x0f, 0x01, 0xf9], Mode::Bits64), Rdtscp);
        assert_eq!(id(&[0x0f, 0xae, 0xe8], Mode::Bits64), Lfence);
        assert_eq!(id(&[0xf3, 0x0f, 0x1e, 0xfa], Mode::Bits64), Endbr64);
        assert_eq!(id(&[0x48, 0x0f, 0xc7, 0x08], Mode::Bits64), Cmpxchg16b);
        assert_eq!(id(&[0xf3, 0x0f, 0x2b, 0x00], Mode::Bits64), Movntss);
        assert_eq!(id(&[0xf3, 0x0f, 0xa6, 0xd0], Mode::Bits64), Xsha256);
        assert_eq!(id(&[0xf3, 0x0f, 0xa7, 0xe8], Mode::Bits64), Xcryptofb);
    }

    #[test]
    fn three_byte_maps() {
        assert_eq!(id(&[0x66, 0x0f, 0x38, 0x00, 0xc1], Mode::Bits64), Pshufb);
        assert_eq!(id(&[0xf2, 0x0f, 0x38, 0xf1, 0xc1], Mode::Bits64), Crc32);
        assert_eq!(id(&[0x66, 0x0f, 0x3a, 0x0f, 0xc1, 0x08], Mode::Bits64), Palignr);
        assert_eq!(id(&[0x66, 0x48, 0x0f, 0x3a, 0x16, 0xc0, 0x01], Mode::Bits64), Pextrq);
    }

    #[test]
    fn vex_and_3dnow() {
        assert_eq!(id(&[0xc5, 0xf8, 0x77], Mode::Bits64), Vzeroupper);
        assert_eq!(id(&[0xc5, 0xfc, 0x77], Mode::Bits64), Vzeroall);
        assert_eq!(id(&[0xc4, 0xe2, 0x7d, 0x58, 0xc1], Mode::Bits32), Vpbroadcastd);
        assert_eq!(id(&[0xc5, 0xf0, 0x58, 0xc2], Mode::Bits64), Addps);
        assert_eq!(id(&[0x0f, 0x0f, 0xc1, 0x9e], Mode::Bits64), Pfadd);
        assert_eq!(id(&[0xc4, 0xe2, 0xf1, 0xa8, 0xc2], Mode::Bits64), Vfmadd213pd);
        assert_eq!(id(&[0xc4, 0xe2, 0x71, 0xb9, 0xc2], Mode::Bits64), Vfmadd231ss);
        assert_eq!(id(&[0xc4, 0xe2, 0x70, 0xf3, 0xc8], Mode::Bits64), Blsr);
        assert_eq!(id(&[0xc4, 0xe2, 0x73, 0xf5, 0xc2], Mode::Bits64), Pdep);
        assert_eq!(id(&[0xc4, 0xe2, 0x71, 0xf7, 0xc2], Mode::Bits64), Shlx);
        assert_eq!(id(&[0xc4, 0xe3, 0x7b, 0xf0, 0xc1, 0x07], Mode::Bits64), Rorx);
        assert_eq!(id(&[0xc4, 0xe2, 0x71, 0x90, 0x04, 0x88], Mode::Bits64), Vpgatherdd);
        assert!(is_vex_only(Vzeroupper));
        assert!(is_vex_only(Andn));
        assert!(!is_vex_only(Addps));
    }
}
