//! Control flow and privilege classification.

use crate::id::identify;
use crate::instruction::{Group, Instruction, OpcodeMap};
use crate::mnemonic::Mnemonic::*;
use crate::mnemonic::{Mnemonic, JCC, LOOPCC};

/// Branches whose immediate is a displacement from the end of the instruction.
pub(crate) fn is_relative_branch(inst: &Instruction) -> bool {
    match inst.opcode_map {
        OpcodeMap::Default => {
            matches!(inst.opcode, 0x70..=0x7f | 0xe0..=0xe3 | 0xe8 | 0xe9 | 0xeb)
                || (inst.opcode == 0xc7 && inst.modrm().reg() == 7)
        }
        OpcodeMap::Map0F => matches!(inst.opcode, 0x80..=0x8f),
        _ => false,
    }
}

pub(crate) fn classify(inst: &Instruction) -> Group {
    let id = identify(inst);
    let mut group = match id {
        Jmp | Ljmp => Group::JUMP | Group::UNCONDITIONAL_BRANCH,
        Call | Lcall => Group::CALL | Group::UNCONDITIONAL_BRANCH,
        Ret | Retf => Group::RET,
        Iret | Iretd | Iretq => Group::RET | Group::INT,
        Int | Int1 | Int3 | Into | Syscall | Sysenter => Group::INT,
        Sysret | Sysexit => Group::RET | Group::PRIVILEGE,
        Jcxz | Jecxz | Jrcxz | Xbegin => Group::JUMP | Group::CONDITIONAL_BRANCH,
        _ if JCC.contains(&id) || LOOPCC.contains(&id) => Group::JUMP | Group::CONDITIONAL_BRANCH,
        _ if is_privileged(inst, id) => Group::PRIVILEGE,
        _ => Group::empty(),
    };

    if is_relative_branch(inst) {
        group |= Group::RELATIVE_ADDRESSING;
    }

    group
}

/// Needs CPL 0, or is sensitive to IOPL.
fn is_privileged(inst: &Instruction, id: Mnemonic) -> bool {
    // moves to and from control and debug registers
    if inst.opcode_map == OpcodeMap::Map0F && (0x20..=0x23).contains(&inst.opcode) {
        return true;
    }

    matches!(
        id,
        Hlt | Cli | Sti | In | Out | Insb | Insw | Insd | Outsb | Outsw | Outsd
            | Clts | Invd | Wbinvd | Invlpg | Invlpga | Invept | Invvpid | Invpcid
            | Lgdt | Lidt | Lldt | Ltr | Lmsw | Rdmsr | Wrmsr | Swapgs | Xsetbv
            | Clac | Stac | Rsm | Vmxon | Vmxoff | Vmlaunch | Vmresume | Vmptrld | Vmptrst
            | Vmclear | Vmread | Vmwrite | Vmrun | Vmload | Vmsave | Stgi | Clgi | Skinit
            | Monitor | Mwait | Xrstors | Xsaves | Encls | Pconfig | Wrussd | Wrussq
            | Setssbsy | Clrssbsy
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::parse;
    use crate::instruction::Mode;
    use crate::DecoderFlags;

    fn group(bytes: &[u8]) -> Group {
        classify(&parse(bytes, Mode::Bits64, DecoderFlags::ALL).unwrap())
    }

    #[test]
    fn branches() {
        assert_eq!(
            group(&[0x74, 0x02]),
            Group::JUMP | Group::CONDITIONAL_BRANCH | Group::RELATIVE_ADDRESSING
        );
        assert_eq!(
            group(&[0xe8, 0, 0, 0, 0]),
            Group::CALL | Group::UNCONDITIONAL_BRANCH | Group::RELATIVE_ADDRESSING
        );
        assert_eq!(group(&[0xff, 0xe0]), Group::JUMP | Group::UNCONDITIONAL_BRANCH);
        assert_eq!(group(&[0xc3]), Group::RET);
        assert_eq!(group(&[0xcc]), Group::INT);
    }

    #[test]
    fn privileged() {
        assert_eq!(group(&[0xf4]), Group::PRIVILEGE);
        assert_eq!(group(&[0x0f, 0x22, 0xd8]), Group::PRIVILEGE);
        assert_eq!(group(&[0x0f, 0x32]), Group::PRIVILEGE);
        assert_eq!(group(&[0x90]), Group::empty());
    }
}
