//! What an instruction does to EFLAGS and to the x87 condition codes.

use crate::id::identify;
use crate::instruction::{CpuFlags, EFlags, FpuFlags, Instruction, OpcodeMap};
use crate::mnemonic::Mnemonic::*;
use crate::mnemonic::{Mnemonic, CMOVCC, FPU_DA_REG, FPU_DB_REG, JCC, SETCC};

/// Flags read by each of the sixteen condition codes.
const CONDITIONS: [EFlags; 8] = [
    EFlags::OF,
    EFlags::CF,
    EFlags::ZF,
    EFlags::CF.union(EFlags::ZF),
    EFlags::SF,
    EFlags::PF,
    EFlags::SF.union(EFlags::OF),
    EFlags::ZF.union(EFlags::SF).union(EFlags::OF),
];

const LOGIC: EFlags = EFlags::SF.union(EFlags::ZF).union(EFlags::PF);
const COMPARE: EFlags = EFlags::ZF.union(EFlags::PF).union(EFlags::CF);
const LOW: EFlags = EFlags::SF
    .union(EFlags::ZF)
    .union(EFlags::AF)
    .union(EFlags::PF)
    .union(EFlags::CF);
const VMX_CLEARED: EFlags = EFlags::PF.union(EFlags::AF).union(EFlags::SF).union(EFlags::OF);

#[derive(Default)]
struct Effects(CpuFlags);

impl Effects {
    fn modifies(mut self, flags: EFlags) -> Self {
        self.0.modified.eflags |= flags;
        self
    }

    fn tests(mut self, flags: EFlags) -> Self {
        self.0.tested.eflags |= flags;
        self
    }

    fn sets(mut self, flags: EFlags) -> Self {
        self.0.set.eflags |= flags;
        self
    }

    fn clears(mut self, flags: EFlags) -> Self {
        self.0.cleared.eflags |= flags;
        self
    }

    fn undefines(mut self, flags: EFlags) -> Self {
        self.0.undefined.eflags |= flags;
        self
    }

    fn fpu_modifies(mut self, flags: FpuFlags) -> Self {
        self.0.modified.fpu |= flags;
        self
    }

    fn fpu_clears(mut self, flags: FpuFlags) -> Self {
        self.0.cleared.fpu |= flags;
        self
    }

    fn fpu_undefines(mut self, flags: FpuFlags) -> Self {
        self.0.undefined.fpu |= flags;
        self
    }
}

pub(crate) fn effects(inst: &Instruction) -> CpuFlags {
    let id = identify(inst);
    let fx = Effects::default();

    let fx = match id {
        Add | Sub | Cmp | Neg | Cmpxchg | Xadd => fx.modifies(EFlags::STATUS),
        Adc | Sbb => fx.modifies(EFlags::STATUS).tests(EFlags::CF),
        Inc | Dec => fx.modifies(EFlags::STATUS.difference(EFlags::CF)),
        And | Or | Xor | Test => fx
            .modifies(LOGIC)
            .clears(EFlags::OF | EFlags::CF)
            .undefines(EFlags::AF),
        Daa | Das => fx
            .modifies(EFlags::STATUS.difference(EFlags::OF))
            .tests(EFlags::AF | EFlags::CF)
            .undefines(EFlags::OF),
        Aaa | Aas => fx
            .modifies(EFlags::AF | EFlags::CF)
            .tests(EFlags::AF)
            .undefines(EFlags::OF | LOGIC),
        Aam | Aad => fx
            .modifies(LOGIC)
            .undefines(EFlags::OF | EFlags::AF | EFlags::CF),
        Rol | Ror => fx.modifies(EFlags::CF | EFlags::OF),
        Rcl | Rcr => fx.modifies(EFlags::CF | EFlags::OF).tests(EFlags::CF),
        Shl | Sal | Shr | Sar | Shld | Shrd => fx
            .modifies(EFlags::STATUS.difference(EFlags::AF))
            .undefines(EFlags::AF),
        Mul | Imul => fx
            .modifies(EFlags::CF | EFlags::OF)
            .undefines(LOGIC | EFlags::AF),
        Div | Idiv => fx.undefines(EFlags::STATUS),
        Bt | Bts | Btr | Btc => fx
            .modifies(EFlags::CF)
            .undefines(EFlags::OF | EFlags::SF | EFlags::AF | EFlags::PF),
        Bsf | Bsr => fx
            .modifies(EFlags::ZF)
            .undefines(EFlags::STATUS.difference(EFlags::ZF)),
        Tzcnt | Lzcnt => fx
            .modifies(EFlags::CF | EFlags::ZF)
            .undefines(EFlags::OF | EFlags::SF | EFlags::AF | EFlags::PF),
        Popcnt => fx
            .modifies(EFlags::ZF)
            .clears(EFlags::STATUS.difference(EFlags::ZF)),
        Cmpxchg8b | Cmpxchg16b | Verr | Verw | Lar | Lsl => fx.modifies(EFlags::ZF),
        Xtest => fx
            .modifies(EFlags::ZF)
            .clears(EFlags::STATUS.difference(EFlags::ZF)),
        Comiss | Comisd | Ucomiss | Ucomisd | Fcomi | Fcomip | Fucomi | Fucomip => fx
            .modifies(COMPARE)
            .clears(EFlags::OF | EFlags::SF | EFlags::AF),
        Ptest | Vtestps | Vtestpd => fx
            .modifies(EFlags::ZF | EFlags::CF)
            .clears(EFlags::OF | EFlags::AF | EFlags::PF | EFlags::SF),
        Pcmpestri | Pcmpestrm | Pcmpistri | Pcmpistrm => fx
            .modifies(EFlags::CF | EFlags::ZF | EFlags::SF | EFlags::OF)
            .clears(EFlags::AF | EFlags::PF),
        Rdrand | Rdseed => fx
            .modifies(EFlags::CF)
            .clears(EFlags::STATUS.difference(EFlags::CF)),
        Andn => fx
            .modifies(EFlags::SF | EFlags::ZF)
            .clears(EFlags::OF | EFlags::CF)
            .undefines(EFlags::AF | EFlags::PF),
        Bextr => fx
            .modifies(EFlags::ZF)
            .clears(EFlags::OF | EFlags::CF)
            .undefines(EFlags::AF | EFlags::SF | EFlags::PF),
        Blsr | Blsmsk | Blsi | Bzhi => fx
            .modifies(EFlags::ZF | EFlags::SF | EFlags::CF)
            .clears(EFlags::OF)
            .undefines(EFlags::AF | EFlags::PF),
        Adcx => fx.modifies(EFlags::CF).tests(EFlags::CF),
        Adox => fx.modifies(EFlags::OF).tests(EFlags::OF),
        Invept | Invvpid | Vmcall | Vmlaunch | Vmresume | Vmxoff | Vmxon | Vmread | Vmwrite
        | Vmptrld | Vmptrst | Vmclear | Vmfunc => fx
            .modifies(EFlags::CF | EFlags::ZF)
            .clears(VMX_CLEARED),
        Sahf => fx.modifies(LOW),
        Lahf => fx.tests(LOW),
        Popf | Popfd | Popfq | Iret | Iretd | Iretq | Rsm | Syscall | Sysret => {
            fx.modifies(EFlags::all())
        }
        Pushf | Pushfd | Pushfq => fx.tests(EFlags::all()),
        Sysenter => fx.clears(EFlags::IF | EFlags::RF | EFlags::VM),
        Cmc => fx.modifies(EFlags::CF).tests(EFlags::CF),
        Clc => fx.clears(EFlags::CF),
        Stc => fx.sets(EFlags::CF),
        Cli => fx.clears(EFlags::IF),
        Sti => fx.sets(EFlags::IF),
        Cld => fx.clears(EFlags::DF),
        Std => fx.sets(EFlags::DF),
        Clac => fx.clears(EFlags::AC),
        Stac => fx.sets(EFlags::AC),
        Salc => fx.tests(EFlags::CF),
        Int | Int1 | Int3 => fx.clears(EFlags::TF | EFlags::IF),
        Into => fx.tests(EFlags::OF).clears(EFlags::TF | EFlags::IF),
        Loope | Loopne => fx.tests(EFlags::ZF),
        Cmpsb | Cmpsw | Cmpsd | Cmpsq | Scasb | Scasw | Scasd | Scasq
            if inst.opcode_map == OpcodeMap::Default =>
        {
            fx.modifies(EFlags::STATUS).tests(EFlags::DF)
        }
        Movsb | Movsw | Movsd | Movsq | Stosb | Stosw | Stosd | Stosq | Lodsb | Lodsw | Lodsd
        | Lodsq | Insb | Insw | Insd | Outsb | Outsw | Outsd
            if inst.opcode_map == OpcodeMap::Default =>
        {
            fx.tests(EFlags::DF)
        }
        _ => match condition(id) {
            Some(flags) => fx.tests(flags),
            None => fx,
        },
    };

    let fx = if inst.opcode_map == OpcodeMap::Default && (0xd8..=0xdf).contains(&inst.opcode) {
        x87(fx, id)
    } else {
        fx
    };

    fx.0
}

/// Flags tested by conditional jumps, moves and sets, including the x87 moves.
fn condition(id: Mnemonic) -> Option<EFlags> {
    let cc = [JCC, CMOVCC, SETCC]
        .iter()
        .find_map(|table| table.iter().position(|&entry| entry == id));

    if let Some(cc) = cc {
        return Some(CONDITIONS[cc / 2]);
    }

    let fcmov = FPU_DA_REG
        .iter()
        .chain(&FPU_DB_REG[..4])
        .position(|&entry| entry == id)?;

    Some([EFlags::CF, EFlags::ZF, EFlags::CF | EFlags::ZF, EFlags::PF][fcmov % 4])
}

fn x87(fx: Effects, id: Mnemonic) -> Effects {
    match id {
        Fcom | Fcomp | Fcompp | Fucom | Fucomp | Fucompp | Ficom | Ficomp | Ftst | Fxam
        | Fprem | Fprem1 | Fldenv | Frstor => fx.fpu_modifies(FpuFlags::ALL),
        Fninit | Fnsave => fx.fpu_clears(FpuFlags::ALL),
        Fptan | Fsincos | Fsin | Fcos => fx
            .fpu_modifies(FpuFlags::C1 | FpuFlags::C2)
            .fpu_undefines(FpuFlags::C0 | FpuFlags::C3),
        Fcomi | Fcomip | Fucomi | Fucomip => fx
            .fpu_modifies(FpuFlags::C1)
            .fpu_undefines(FpuFlags::C0 | FpuFlags::C2 | FpuFlags::C3),
        Fnclex | Fnstsw | Fnstcw | Fnstenv | Fnop | Fwait | Fneni | Fndisi | Fnsetpm => {
            fx.fpu_undefines(FpuFlags::ALL)
        }
        Fcmovb | Fcmove | Fcmovbe | Fcmovu | Fcmovnb | Fcmovne | Fcmovnbe | Fcmovnu => fx
            .fpu_modifies(FpuFlags::C1)
            .fpu_undefines(FpuFlags::C0 | FpuFlags::C2 | FpuFlags::C3),
        _ => fx
            .fpu_modifies(FpuFlags::C1)
            .fpu_undefines(FpuFlags::C0 | FpuFlags::C2 | FpuFlags::C3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::parse;
    use crate::instruction::Mode;
    use crate::DecoderFlags;

    fn flags(bytes: &[u8]) -> CpuFlags {
        effects(&parse(bytes, Mode::Bits64, DecoderFlags::ALL).unwrap())
    }

    #[test]
    fn arithmetic() {
        let add = flags(&[0x01, 0xc8]);
        assert_eq!(add.modified.eflags, EFlags::STATUS);
        assert!(add.tested.is_empty());

        let adc = flags(&[0x11, 0xc8]);
        assert_eq!(adc.tested.eflags, EFlags::CF);

        let inc = flags(&[0xff, 0xc0]);
        assert!(!inc.modified.eflags.contains(EFlags::CF));

        let xor = flags(&[0x31, 0xc0]);
        assert_eq!(xor.cleared.eflags, EFlags::OF | EFlags::CF);
        assert_eq!(xor.undefined.eflags, EFlags::AF);
    }

    #[test]
    fn conditions() {
        assert_eq!(flags(&[0x74, 0x00]).tested.eflags, EFlags::ZF);
        assert_eq!(flags(&[0x0f, 0x46, 0xc1]).tested.eflags, EFlags::CF | EFlags::ZF);
        assert_eq!(flags(&[0x0f, 0x9c, 0xc0]).tested.eflags, EFlags::SF | EFlags::OF);
        assert_eq!(flags(&[0xda, 0xc1]).tested.eflags, EFlags::CF);
    }

    #[test]
    fn flag_instructions() {
        assert_eq!(flags(&[0xf8]).cleared.eflags, EFlags::CF);
        assert_eq!(flags(&[0xf9]).set.eflags, EFlags::CF);
        assert_eq!(flags(&[0xfd]).set.eflags, EFlags::DF);
        assert!(flags(&[0x90]).modified.is_empty());
    }

    #[test]
    fn bit_manipulation() {
        // andn eax, ecx, edx
        let andn = flags(&[0xc4, 0xe2, 0x70, 0xf2, 0xc2]);
        assert_eq!(andn.modified.eflags, EFlags::SF | EFlags::ZF);
        assert_eq!(andn.cleared.eflags, EFlags::OF | EFlags::CF);

        // blsr ecx, eax
        let blsr = flags(&[0xc4, 0xe2, 0x70, 0xf3, 0xc8]);
        assert_eq!(blsr.modified.eflags, EFlags::ZF | EFlags::SF | EFlags::CF);
        assert_eq!(blsr.undefined.eflags, EFlags::AF | EFlags::PF);

        // shlx leaves the flags alone
        assert!(flags(&[0xc4, 0xe2, 0xe9, 0xf7, 0xc1]).modified.is_empty());
    }

    #[test]
    fn fpu() {
        assert_eq!(flags(&[0xd8, 0xd1]).modified.fpu, FpuFlags::ALL);
        assert_eq!(flags(&[0xdb, 0xe3]).cleared.fpu, FpuFlags::ALL);
        assert_eq!(flags(&[0xd9, 0xe8]).modified.fpu, FpuFlags::C1);
    }
}
