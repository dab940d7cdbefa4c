use decoder::ErrorKind;

use super::{hex, test_invalid, CORPUS};
use crate::instruction::{EFlags, Encoding, Group, OpcodeMap, OperandKind};
use crate::{decode, DecoderFlags, Mnemonic, Mode, Register, MAX_LENGTH};

const MODES: [Mode; 3] = [Mode::Bits16, Mode::Bits32, Mode::Bits64];

#[test]
fn nop() {
    let inst = decode(&[0x90], Mode::Bits32, DecoderFlags::ALL).unwrap();
    assert!(inst.valid);
    assert_eq!(inst.length, 1);
    assert_eq!(inst.opcode, 0x90);
    assert_eq!(inst.num_prefixes, 0);
    assert_eq!(inst.id, Mnemonic::Nop);
}

#[test]
fn mov_imm32() {
    let inst = decode(&[0xb8, 0x01, 0x00, 0x00, 0x00], Mode::Bits32, DecoderFlags::ALL).unwrap();
    assert_eq!(inst.length, 5);
    assert_eq!(inst.immediate, 1);
    assert_eq!(inst.id, Mnemonic::Mov);
    assert_eq!(inst.operands()[0].kind, OperandKind::Register(Register::Eax));
}

#[test]
fn syscall() {
    let inst = decode(&[0x0f, 0x05], Mode::Bits64, DecoderFlags::ALL).unwrap();
    assert_eq!(inst.length, 2);
    assert_eq!(inst.opcode_map, OpcodeMap::Map0F);
    assert_eq!(inst.id, Mnemonic::Syscall);
    assert_eq!(inst.group, Group::INT);
}

#[test]
fn truncated_modrm() {
    for mode in MODES {
        let err = decode(&[0xc7], mode, DecoderFlags::ALL).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExhaustedInput);
        assert!(decode(&[0xc7], mode, DecoderFlags::empty()).is_err());
    }
}

#[test]
fn reserved_two_byte_row() {
    for mode in MODES {
        let err = decode(&[0x0f, 0x24, 0xc0], mode, DecoderFlags::ALL).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidOpcode);

        let inst = decode(&[0x0f, 0x24, 0xc0], mode, DecoderFlags::empty()).unwrap();
        assert!(inst.valid);
        assert_eq!(inst.length, 3);

        // the row still takes a ModR/M byte
        assert!(decode(&[0x0f, 0x24], mode, DecoderFlags::empty()).is_err());
    }
}

#[test]
fn vex_or_les() {
    let bytes = [0xc4, 0xe2, 0x7d, 0x58, 0xc1];

    let inst = decode(&bytes, Mode::Bits32, DecoderFlags::ALL).unwrap();
    assert_eq!(inst.encoding, Encoding::Vex);
    assert_eq!(inst.length, 5);
    assert_eq!(inst.id, Mnemonic::Vpbroadcastd);
    assert_eq!(inst.opcode_map, OpcodeMap::Map0F38);

    let legacy = DecoderFlags::ALL - DecoderFlags::VEX - DecoderFlags::VALIDITY_CHECK;
    let inst = decode(&bytes, Mode::Bits32, legacy).unwrap();
    assert_eq!(inst.encoding, Encoding::Legacy);
    assert_eq!(inst.opcode, 0xc4);
    assert_eq!(inst.length, 2);
    assert_eq!(inst.id, Mnemonic::Les);

    // les can't take a register operand
    assert!(decode(&bytes, Mode::Bits32, DecoderFlags::ALL - DecoderFlags::VEX).is_err());
}

#[test]
fn evex_is_detected_only() {
    let evex = [0x62, 0xf1, 0x7c, 0x48, 0x58, 0xc2];
    let err = decode(&evex, Mode::Bits64, DecoderFlags::ALL).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unimplemented);

    // bound in legacy modes
    let inst = decode(&[0x62, 0x01], Mode::Bits32, DecoderFlags::ALL).unwrap();
    assert_eq!(inst.id, Mnemonic::Bound);
}

#[test]
fn too_long() {
    let err = decode(&[0x66; 16], Mode::Bits64, DecoderFlags::ALL).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TooLong);

    let mut bytes = [0x66; 14].to_vec();
    bytes.push(0x90);
    assert_eq!(decode(&bytes, Mode::Bits64, DecoderFlags::ALL).unwrap().length, 15);
}

#[test]
fn corpus_decodes() {
    for &(mode, bytes) in CORPUS {
        let inst = decode(bytes, mode, DecoderFlags::ALL)
            .unwrap_or_else(|e| panic!("{} failed to decode in {:?}: {}", hex(bytes), mode, e));
        assert_eq!(inst.length as usize, bytes.len(), "length of {}", hex(bytes));
        assert_eq!(inst.bytes(), bytes);
        assert!(inst.valid);
    }
}

#[test]
fn truncated_corpus_fails() {
    for &(mode, bytes) in CORPUS {
        for len in 0..bytes.len() {
            let truncated = &bytes[..len];
            assert!(
                decode(truncated, mode, DecoderFlags::ALL).is_err(),
                "{} decoded with only {} bytes",
                hex(bytes),
                len
            );
        }
    }
}

#[test]
fn bounded_length() {
    let mut buf = [0u8; 4];
    for mode in MODES {
        for first in 0..=u8::MAX {
            for second in 0..=u8::MAX {
                buf[0] = first;
                buf[1] = second;
                for size in 1..=buf.len() {
                    if let Ok(inst) = decode(&buf[..size], mode, DecoderFlags::ALL) {
                        assert!(inst.length >= 1);
                        assert!(inst.length as usize <= size.min(MAX_LENGTH));
                    }
                }
            }
        }
    }
}

#[test]
fn idempotent() {
    for &(mode, bytes) in CORPUS {
        let first = decode(bytes, mode, DecoderFlags::ALL);
        let second = decode(bytes, mode, DecoderFlags::ALL);
        assert_eq!(first, second, "{}", hex(bytes));
    }
}

#[test]
fn invalid_encodings() {
    // reserved in the 0F map
    test_invalid(Mode::Bits64, &[0x0f, 0x04]);
    // daa, aaa and friends are gone in long mode
    test_invalid(Mode::Bits64, &[0x27]);
    test_invalid(Mode::Bits64, &[0xd6]);
    // pop only has a /0 form
    test_invalid(Mode::Bits32, &[0x8f, 0xc8]);
    // lock on a register destination
    test_invalid(Mode::Bits64, &[0xf0, 0x01, 0xc0]);
    // lock on cmp
    test_invalid(Mode::Bits64, &[0xf0, 0x39, 0x00]);
    // far jumps need an operand in memory
    test_invalid(Mode::Bits64, &[0xff, 0xe8]);
    // direct far calls don't exist in long mode
    test_invalid(Mode::Bits64, &[0x9a, 0, 0, 0, 0, 0, 0]);
    // there's no arithmetic right shift of quadwords
    test_invalid(Mode::Bits64, &[0x0f, 0x73, 0xe0, 0x11]);
    test_invalid(Mode::Bits64, &[0x66, 0x0f, 0x73, 0xe0, 0x11]);
}

#[test]
fn bound_needs_memory() {
    let legacy = DecoderFlags::ALL - DecoderFlags::EVEX;
    assert!(decode(&[0x62, 0xc0], Mode::Bits32, legacy).is_err());
    assert!(decode(&[0x62, 0xc0], Mode::Bits16, legacy).is_err());

    let inst = decode(&[0x62, 0x01], Mode::Bits32, legacy).unwrap();
    assert_eq!(inst.id, Mnemonic::Bound);
}

#[test]
fn vex_without_a_form() {
    // legacy only opcodes can't be lifted into VEX
    test_invalid(Mode::Bits64, &[0xc5, 0xf8, 0x05, 0xc0]);
    test_invalid(Mode::Bits64, &[0xc5, 0xf8, 0x84, 0x00, 0x00, 0x00, 0x00]);
    test_invalid(Mode::Bits64, &[0xc5, 0xf8, 0xa2, 0xc0]);
    test_invalid(Mode::Bits64, &[0xc4, 0xe2, 0x78, 0xf0, 0x00]);
    test_invalid(Mode::Bits64, &[0xc4, 0xe3, 0x78, 0x00, 0xc1, 0x11]);
    // vpermq only has a 256 bit W1 form
    test_invalid(Mode::Bits64, &[0xc4, 0xe3, 0x79, 0x00, 0xc1, 0x11]);
    // gathers need a SIB byte
    test_invalid(Mode::Bits64, &[0xc4, 0xe2, 0x71, 0x90, 0x00]);
    // vmovdqa has no F2 form
    test_invalid(Mode::Bits64, &[0xc5, 0xfb, 0x6f, 0xc1]);

    let inst = decode(&[0xc4, 0xe3, 0xfd, 0x00, 0xc1, 0x11], Mode::Bits64, DecoderFlags::ALL);
    assert_eq!(inst.unwrap().id, Mnemonic::Vpermq);
}

#[test]
fn accepted_vex_forms_are_named() {
    for map in 1..=3u8 {
        for pp in 0..4u8 {
            for l in 0..2u8 {
                for w in 0..2u8 {
                    for op in 0..=u8::MAX {
                        // register, plain memory and SIB memory operands
                        for (modrm, sib) in [(0xc1, 0x00), (0x00, 0x00), (0x04, 0x88)] {
                            let payload = (w << 7) | 0x70 | (l << 2) | pp;
                            let bytes = [0xc4, 0xe0 | map, payload, op, modrm, sib, 0, 0, 0, 0];
                            if let Ok(inst) = decode(&bytes, Mode::Bits64, DecoderFlags::ALL) {
                                assert_ne!(
                                    inst.id,
                                    Mnemonic::Invalid,
                                    "{} was accepted without a mnemonic",
                                    hex(inst.bytes())
                                );
                            }
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn accepted_legacy_forms_are_named() {
    const PREFIXES: [&[u8]; 4] = [&[], &[0x66], &[0xf3], &[0xf2]];
    const MAPS: [&[u8]; 4] = [&[], &[0x0f], &[0x0f, 0x38], &[0x0f, 0x3a]];

    let mut bytes = Vec::with_capacity(16);
    for mode in [Mode::Bits32, Mode::Bits64] {
        for prefix in PREFIXES {
            for map in MAPS {
                for op in 0..=u8::MAX {
                    for reg in 0..8u8 {
                        // one memory form and every register for this reg field
                        let registers = (0..8).map(|rm| 0xc0 | reg << 3 | rm);
                        let forms = std::iter::once(reg << 3).chain(registers);
                        for modrm in forms {
                            bytes.clear();
                            bytes.extend_from_slice(prefix);
                            bytes.extend_from_slice(map);
                            bytes.extend_from_slice(&[op, modrm, 0, 0, 0, 0, 0, 0, 0, 0]);

                            if let Ok(inst) = decode(&bytes, mode, DecoderFlags::ALL) {
                                assert_ne!(
                                    inst.id,
                                    Mnemonic::Invalid,
                                    "{} was accepted in {:?} without a mnemonic",
                                    hex(inst.bytes()),
                                    mode
                                );
                            }
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn lock_prefix() {
    let inst = decode(&[0xf0, 0x0f, 0xb1, 0x0a], Mode::Bits64, DecoderFlags::ALL).unwrap();
    assert_eq!(inst.id, Mnemonic::Cmpxchg);

    let permissive = DecoderFlags::ALL - DecoderFlags::VALIDITY_CHECK;
    assert!(decode(&[0xf0, 0x01, 0xc0], Mode::Bits64, permissive).is_ok());
}

#[test]
fn annotations_follow_flags() {
    let bytes = [0x74, 0x02];

    let bare = decode(&bytes, Mode::Bits64, DecoderFlags::MINIMAL).unwrap();
    assert_eq!(bare.id, Mnemonic::Invalid);
    assert_eq!(bare.num_operands, 0);
    assert!(bare.group.is_empty());
    assert!(bare.cpu_flags.tested.is_empty());

    let full = decode(&bytes, Mode::Bits64, DecoderFlags::ALL).unwrap();
    assert_eq!(full.id, Mnemonic::Je);
    assert_eq!(
        full.group,
        Group::JUMP | Group::CONDITIONAL_BRANCH | Group::RELATIVE_ADDRESSING
    );
    assert!(full.cpu_flags.tested.eflags.contains(EFlags::ZF));
    assert_eq!(full.operands()[0].kind, OperandKind::Immediate(2));
    assert_eq!(full.operands()[1].kind, OperandKind::Register(Register::Rip));
}

#[test]
fn cpu_flags() {
    let cmp = decode(&[0x39, 0xc8], Mode::Bits64, DecoderFlags::ALL).unwrap();
    assert_eq!(cmp.cpu_flags.modified.eflags, EFlags::STATUS);

    let clc = decode(&[0xf8], Mode::Bits64, DecoderFlags::ALL).unwrap();
    assert_eq!(clc.cpu_flags.cleared.eflags, EFlags::CF);

    let adc = decode(&[0x11, 0xc8], Mode::Bits64, DecoderFlags::ALL).unwrap();
    assert!(adc.cpu_flags.tested.eflags.contains(EFlags::CF));

    let nop = decode(&[0x90], Mode::Bits64, DecoderFlags::ALL).unwrap();
    assert!(nop.cpu_flags.modified.is_empty());
}

#[test]
fn memory_operands() {
    // mov eax, [ecx*4+1000h]
    let bytes = [0x8b, 0x04, 0x8d, 0x00, 0x10, 0x00, 0x00];
    let inst = decode(&bytes, Mode::Bits32, DecoderFlags::ALL).unwrap();
    let OperandKind::Memory(mem) = inst.operands()[1].kind else {
        panic!("expected a memory operand, got {:?}", inst.operands()[1]);
    };
    assert_eq!(mem.base, Register::None);
    assert_eq!(mem.index, Register::Ecx);
    assert_eq!(mem.scale, 4);
    assert_eq!(mem.disp, 0x1000);
    assert_eq!(mem.size, 4);

    // mov ax, [bp-2]
    let inst = decode(&[0x8b, 0x46, 0xfe], Mode::Bits16, DecoderFlags::ALL).unwrap();
    let OperandKind::Memory(mem) = inst.operands()[1].kind else {
        panic!("expected a memory operand, got {:?}", inst.operands()[1]);
    };
    assert_eq!(mem.base, Register::Bp);
    assert_eq!(mem.segment, Register::Ss);
    assert_eq!(mem.disp, -2);
}

#[test]
fn fpu_escapes() {
    let fninit = decode(&[0xdb, 0xe3], Mode::Bits32, DecoderFlags::ALL).unwrap();
    assert_eq!(fninit.id, Mnemonic::Fninit);

    let fnclex = decode(&[0xdb, 0xe2], Mode::Bits32, DecoderFlags::ALL).unwrap();
    assert_eq!(fnclex.id, Mnemonic::Fnclex);

    let fld1 = decode(&[0xd9, 0xe8], Mode::Bits32, DecoderFlags::ALL).unwrap();
    assert_eq!(fld1.id, Mnemonic::Fld1);
}

#[test]
fn three_dnow() {
    // pfadd mm0, mm1
    let bytes = [0x0f, 0x0f, 0xc1, 0x9e];
    let inst = decode(&bytes, Mode::Bits32, DecoderFlags::ALL).unwrap();
    assert_eq!(inst.encoding, Encoding::ThreeDNow);
    assert_eq!(inst.length, 4);

    assert!(decode(&bytes, Mode::Bits32, DecoderFlags::ALL - DecoderFlags::THREE_DNOW).is_err());
    // not one of the defined suffixes
    assert!(decode(&[0x0f, 0x0f, 0xc1, 0x00], Mode::Bits32, DecoderFlags::ALL).is_err());
}
