use decoder::ErrorKind;

use super::hex;
use crate::{assemble, decode, format, DecoderFlags, FormatterFlags, Mode};

/// Assembles `text`, formats what it decodes to and assembles that again.
fn round_trip(mode: Mode, address: u64, text: &str, expected: &[u8]) {
    let bytes = assemble(text, mode, address)
        .unwrap_or_else(|e| panic!("failed to assemble {text:?} in {mode:?}: {e}"));
    assert_eq!(bytes, expected, "assembled {:?} to {}", text, hex(&bytes));

    let inst = decode(&bytes, mode, DecoderFlags::ALL)
        .unwrap_or_else(|e| panic!("failed to decode {} from {text:?}: {e}", hex(&bytes)));
    assert_eq!(inst.length as usize, bytes.len());

    let formatted = format(&inst, address, FormatterFlags::DEFAULT);
    let again = assemble(&formatted, mode, address)
        .unwrap_or_else(|e| panic!("failed to assemble {formatted:?} from {text:?}: {e}"));
    assert_eq!(again, bytes, "{text:?} was formatted as {formatted:?}");
}

#[test]
fn long_mode() {
    let mode = Mode::Bits64;
    round_trip(mode, 0, "nop", &[0x90]);
    round_trip(mode, 0, "ret", &[0xc3]);
    round_trip(mode, 0, "push rax", &[0x50]);
    round_trip(mode, 0, "push r12", &[0x41, 0x54]);
    round_trip(mode, 0, "pop rbp", &[0x5d]);
    round_trip(mode, 0, "push ax", &[0x66, 0x50]);
    round_trip(mode, 0, "push 10h", &[0x6a, 0x10]);
    round_trip(mode, 0, "push -1", &[0x6a, 0xff]);
    round_trip(mode, 0, "push 12345678h", &[0x68, 0x78, 0x56, 0x34, 0x12]);
    round_trip(mode, 0, "push fs", &[0x0f, 0xa0]);
    round_trip(mode, 0, "syscall", &[0x0f, 0x05]);
    round_trip(mode, 0, "cpuid", &[0x0f, 0xa2]);
    round_trip(mode, 0, "pushfq", &[0x9c]);
    round_trip(mode, 0, "cdqe", &[0x48, 0x98]);
    round_trip(mode, 0, "cqo", &[0x48, 0x99]);
    round_trip(mode, 0, "stosq", &[0x48, 0xab]);
    round_trip(mode, 0, "lodsq", &[0x48, 0xad]);
    round_trip(mode, 0, "scasq", &[0x48, 0xaf]);
    round_trip(mode, 0, "rep stosb", &[0xf3, 0xaa]);
    round_trip(mode, 0, "repe cmpsb", &[0xf3, 0xa6]);
    round_trip(mode, 0, "repne scasb", &[0xf2, 0xae]);
    round_trip(mode, 0, "pause", &[0xf3, 0x90]);
    round_trip(mode, 0, "int 80h", &[0xcd, 0x80]);
    round_trip(mode, 0, "int3", &[0xcc]);
}

#[test]
fn branches() {
    let mode = Mode::Bits64;
    round_trip(mode, 0x1000, "je 1010h", &[0x74, 0x0e]);
    round_trip(mode, 0x1000, "jne 0x900", &[0x0f, 0x85, 0xfa, 0xf8, 0xff, 0xff]);
    round_trip(mode, 0x1000, "jmp 1000h", &[0xeb, 0xfe]);
    round_trip(mode, 0x1000, "jmp 2000h", &[0xe9, 0xfb, 0x0f, 0x00, 0x00]);
    round_trip(mode, 0x1000, "call 1005h", &[0xe8, 0x00, 0x00, 0x00, 0x00]);

    // aliases of the same condition
    assert_eq!(assemble("jz 2", mode, 0), assemble("je 2", mode, 0));
    assert_eq!(assemble("jnae 2", mode, 0), assemble("jb 2", mode, 0));

    // 16-bit displacements wrap around the segment
    round_trip(Mode::Bits16, 0, "jmp 0xfff0", &[0xeb, 0xee]);
    round_trip(Mode::Bits16, 0, "jmp 0x8000", &[0xe9, 0xfd, 0x7f]);
}

#[test]
fn legacy_modes() {
    round_trip(Mode::Bits32, 0, "inc eax", &[0x40]);
    round_trip(Mode::Bits32, 0, "dec di", &[0x66, 0x4f]);
    round_trip(Mode::Bits32, 0, "pushad", &[0x60]);
    round_trip(Mode::Bits32, 0, "popa", &[0x66, 0x61]);
    round_trip(Mode::Bits32, 0, "daa", &[0x27]);
    round_trip(Mode::Bits32, 0, "push es", &[0x06]);
    round_trip(Mode::Bits16, 0, "push ax", &[0x50]);
    round_trip(Mode::Bits16, 0, "push eax", &[0x66, 0x50]);
    round_trip(Mode::Bits16, 0, "push 1234h", &[0x68, 0x34, 0x12]);
    round_trip(Mode::Bits16, 0, "cwd", &[0x99]);
}

#[test]
fn prefixes_and_emit() {
    let mode = Mode::Bits64;
    assert_eq!(assemble("lock emit 0x01 0x08", mode, 0).unwrap(), [0xf0, 0x01, 0x08]);
    assert_eq!(assemble("emit 0f, 0b", mode, 0).unwrap(), [0x0f, 0x0b]);
    assert_eq!(assemble("  PUSH   RBX ", mode, 0).unwrap(), [0x53]);
}

#[test]
fn sequences() {
    let code = assemble("push rbp; push 1\npop rbp\n\nje 0", Mode::Bits64, 0).unwrap();
    // the branch is relative to where it ends up
    assert_eq!(code, [0x55, 0x6a, 0x01, 0x5d, 0x74, 0xfa]);
}

#[test]
fn errors() {
    let mode = Mode::Bits64;
    let err = assemble("frobnicate", mode, 0).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidOpcode);

    let err = assemble("nop; push xyz", mode, 0).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidOperand);
    assert_eq!(err.size(), 1);

    assert_eq!(assemble("pusha", mode, 0).unwrap_err().kind, ErrorKind::InvalidOpcode);
    assert_eq!(assemble("inc eax", mode, 0).unwrap_err().kind, ErrorKind::InvalidOpcode);
    assert_eq!(assemble("push eax", mode, 0).unwrap_err().kind, ErrorKind::InvalidOperand);
    assert_eq!(assemble("push ds", mode, 0).unwrap_err().kind, ErrorKind::InvalidOperand);
    assert_eq!(assemble("push r8", Mode::Bits32, 0).unwrap_err().kind, ErrorKind::InvalidOperand);
    assert_eq!(assemble("int 100h", mode, 0).unwrap_err().kind, ErrorKind::InvalidOperand);
    assert_eq!(assemble("cdqe", Mode::Bits32, 0).unwrap_err().kind, ErrorKind::InvalidOpcode);
}
