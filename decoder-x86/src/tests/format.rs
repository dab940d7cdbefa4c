use super::{test_display, test_display_under};
use crate::{format, FormatterFlags, Instruction, Mode};

const ATT: FormatterFlags = FormatterFlags::ATT_SYNTAX
    .union(FormatterFlags::HEX)
    .union(FormatterFlags::ZERO_X_PREFIX)
    .union(FormatterFlags::HEX_LOWERCASE)
    .union(FormatterFlags::ONLY_SEGMENT_OVERRIDE);

#[test]
fn test_instructions() {
    test_display(Mode::Bits64, &[0x48, 0x89, 0xe5], "mov rbp,rsp");
    test_display(Mode::Bits32, &[0xb8, 0x01, 0x00, 0x00, 0x00], "mov eax,1");
    test_display(Mode::Bits64, &[0x48, 0x83, 0xec, 0x20], "sub rsp,20h");
    test_display(Mode::Bits32, &[0x83, 0xc0, 0xff], "add eax,FFFFFFFFh(-1)");
    test_display(Mode::Bits64, &[0x6a, 0xff], "push FFFFFFFFFFFFFFFFh(-1)");
    test_display(Mode::Bits64, &[0x41, 0x54], "push r12");
    test_display(Mode::Bits64, &[0x0f, 0x05], "syscall");
    test_display(Mode::Bits64, &[0xc3], "ret");
    test_display(Mode::Bits32, &[0xdb, 0xe3], "fninit");
}

#[test]
fn test_memory() {
    test_display(Mode::Bits32, &[0x8b, 0x45, 0xf8], "mov eax,[ebp-8]");
    test_display(
        Mode::Bits64,
        &[0x64, 0x48, 0x8b, 0x04, 0x25, 0x28, 0x00, 0x00, 0x00],
        "mov rax,fs:[28h]",
    );
    test_display(Mode::Bits64, &[0x48, 0x8b, 0x05, 0x10, 0x00, 0x00, 0x00], "mov rax,[rip+10h]");
    test_display(
        Mode::Bits32,
        &[0x8b, 0x04, 0x8d, 0x00, 0x10, 0x00, 0x00],
        "mov eax,[ecx*4+1000h]",
    );
    test_display(Mode::Bits16, &[0x8b, 0x46, 0xfe], "mov ax,[bp-2]");

    test_display_under(
        Mode::Bits32,
        FormatterFlags::DEFAULT | FormatterFlags::POINTER_SIZE,
        0,
        &[0x8b, 0x45, 0xf8],
        "mov eax,dword ptr [ebp-8]",
    );
    test_display_under(
        Mode::Bits32,
        FormatterFlags::DEFAULT - FormatterFlags::ONLY_SEGMENT_OVERRIDE,
        0,
        &[0x8b, 0x45, 0xf8],
        "mov eax,ss:[ebp-8]",
    );
}

#[test]
fn test_branches() {
    let call = [0xe8, 0, 0, 0, 0];
    test_display_under(Mode::Bits64, FormatterFlags::DEFAULT, 0x1000, &call, "call 1005h");
    test_display_under(Mode::Bits64, FormatterFlags::DEFAULT, 0x1000, &[0x74, 0xfe], "je 1000h");
    test_display_under(Mode::Bits16, FormatterFlags::DEFAULT, 0, &[0xe9, 0x00, 0x01], "jmp 103h");
    // the instruction pointer wraps at 16 bits
    test_display_under(Mode::Bits16, FormatterFlags::DEFAULT, 0xfff0, &[0xeb, 0x20], "jmp 12h");
    test_display(Mode::Bits32, &[0x9a, 0x78, 0x56, 0x34, 0x12, 0x08, 0x00], "lcall 8:12345678h");
}

#[test]
fn test_prefixes() {
    test_display(Mode::Bits32, &[0xf3, 0xab], "rep stosd");
    test_display(Mode::Bits32, &[0xf2, 0xae], "repne scasb");
    test_display(Mode::Bits32, &[0xf3, 0xa6], "repe cmpsb");
    test_display(Mode::Bits64, &[0xf3, 0x90], "pause");
    test_display(Mode::Bits64, &[0xf0, 0x0f, 0xb1, 0x0a], "lock cmpxchg [rdx],ecx");
}

#[test]
fn test_simd() {
    test_display(Mode::Bits64, &[0xc5, 0xf8, 0x77], "vzeroupper");
    test_display(Mode::Bits32, &[0xc4, 0xe2, 0x7d, 0x58, 0xc1], "vpbroadcastd ymm0,xmm1");
    test_display(Mode::Bits64, &[0xc5, 0xf0, 0x58, 0xc2], "vaddps xmm0,xmm1,xmm2");
    test_display(Mode::Bits64, &[0x0f, 0xc2, 0xc1, 0x01], "cmpltps xmm0,xmm1");
}

#[test]
fn test_flags() {
    test_display_under(
        Mode::Bits32,
        FormatterFlags::DEFAULT
            | FormatterFlags::UPPERCASE
            | FormatterFlags::COMMA_SPACES
            | FormatterFlags::OPERATOR_SPACES,
        0,
        &[0x8b, 0x44, 0x24, 0x08],
        "MOV EAX, [ESP + 8]",
    );

    test_display_under(
        Mode::Bits32,
        FormatterFlags::DEFAULT | FormatterFlags::BYTES,
        0,
        &[0x90],
        &format!("{:<30}nop", "90 "),
    );

    test_display_under(
        Mode::Bits32,
        FormatterFlags::empty(),
        0,
        &[0x83, 0xc0, 0xff],
        "add eax,-1",
    );
}

#[test]
fn test_att() {
    test_display_under(Mode::Bits64, ATT, 0, &[0x48, 0x89, 0xe5], "mov %rsp,%rbp");
    test_display_under(Mode::Bits32, ATT, 0, &[0x8b, 0x45, 0xf8], "mov -8(%ebp),%eax");
    test_display_under(Mode::Bits32, ATT, 0, &[0xb8, 0x01, 0x00, 0x00, 0x00], "mov $1,%eax");
    test_display_under(
        Mode::Bits32,
        ATT,
        0,
        &[0x8b, 0x04, 0x8d, 0x00, 0x10, 0x00, 0x00],
        "mov 0x1000(,%ecx,4),%eax",
    );
    test_display_under(
        Mode::Bits64,
        ATT,
        0,
        &[0x64, 0x48, 0x8b, 0x04, 0x25, 0x28, 0x00, 0x00, 0x00],
        "mov %fs:0x28,%rax",
    );
    let far = [0x9a, 0x78, 0x56, 0x34, 0x12, 0x08, 0x00];
    test_display_under(Mode::Bits32, ATT, 0, &far, "lcall $8,$0x12345678");
}

#[test]
fn test_unannotated() {
    assert_eq!(format(&Instruction::default(), 0, FormatterFlags::DEFAULT), "(bad)");

    // only the annotations are missing, they're filled in while formatting
    let bare =
        crate::decode(&[0x48, 0x89, 0xe5], Mode::Bits64, crate::DecoderFlags::MINIMAL).unwrap();
    assert_eq!(format(&bare, 0, FormatterFlags::DEFAULT), "mov rbp,rsp");
}
