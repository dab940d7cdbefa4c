//! Semantic instruction identifiers.
//!
//! Related instructions that sit next to each other in an opcode map are grouped
//! into tables indexed by the low opcode bits or by a ModR/M field.

macro_rules! mnemonics {
    ($($name:ident => $text:literal),* $(,)?) => {
        #[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
        #[repr(u16)]
        pub enum Mnemonic {
            #[default]
            Invalid = 0,
            $($name),*
        }

        impl Mnemonic {
            pub const fn name(self) -> &'static str {
                match self {
                    Self::Invalid => "(bad)",
                    $(Self::$name => $text,)*
                }
            }
        }
    };
}

mnemonics! {
    // integer
    Aaa => "aaa", Aad => "aad", Aam => "aam", Aas => "aas",
    Adc => "adc", Adcx => "adcx", Add => "add", Adox => "adox", And => "and",
    Arpl => "arpl", Bound => "bound", Bsf => "bsf", Bsr => "bsr", Bswap => "bswap",
    Bt => "bt", Btc => "btc", Btr => "btr", Bts => "bts",
    Call => "call", Lcall => "lcall", Cbw => "cbw", Cwde => "cwde", Cdqe => "cdqe",
    Cwd => "cwd", Cdq => "cdq", Cqo => "cqo",
    Clc => "clc", Cld => "cld", Cli => "cli", Cmc => "cmc", Stc => "stc", Std => "std", Sti => "sti",
    Cmp => "cmp", Cmpxchg => "cmpxchg", Cmpxchg8b => "cmpxchg8b", Cmpxchg16b => "cmpxchg16b",
    Crc32 => "crc32", Daa => "daa", Das => "das", Dec => "dec", Div => "div", Idiv => "idiv",
    Enter => "enter", Leave => "leave", Hlt => "hlt", Imul => "imul", Mul => "mul",
    In => "in", Out => "out", Inc => "inc",
    Insb => "insb", Insw => "insw", Insd => "insd", Outsb => "outsb", Outsw => "outsw", Outsd => "outsd",
    Int => "int", Int1 => "int1", Int3 => "int3", Into => "into",
    Iret => "iret", Iretd => "iretd", Iretq => "iretq",
    Jmp => "jmp", Ljmp => "ljmp",
    Jo => "jo", Jno => "jno", Jb => "jb", Jae => "jae", Je => "je", Jne => "jne", Jbe => "jbe", Ja => "ja",
    Js => "js", Jns => "jns", Jp => "jp", Jnp => "jnp", Jl => "jl", Jge => "jge", Jle => "jle", Jg => "jg",
    Jcxz => "jcxz", Jecxz => "jecxz", Jrcxz => "jrcxz",
    Loop => "loop", Loope => "loope", Loopne => "loopne",
    Lahf => "lahf", Sahf => "sahf", Lar => "lar", Lsl => "lsl", Lea => "lea",
    Lds => "lds", Les => "les", Lfs => "lfs", Lgs => "lgs", Lss => "lss",
    Lzcnt => "lzcnt", Tzcnt => "tzcnt", Popcnt => "popcnt",
    Mov => "mov", Movbe => "movbe", Movsx => "movsx", Movsxd => "movsxd", Movzx => "movzx",
    Neg => "neg", Nop => "nop", Not => "not", Or => "or", Pause => "pause",
    Pop => "pop", Popa => "popa", Popad => "popad", Popf => "popf", Popfd => "popfd", Popfq => "popfq",
    Push => "push", Pusha => "pusha", Pushad => "pushad", Pushf => "pushf", Pushfd => "pushfd", Pushfq => "pushfq",
    Rcl => "rcl", Rcr => "rcr", Rol => "rol", Ror => "ror", Sal => "sal", Sar => "sar", Shl => "shl", Shr => "shr",
    Shld => "shld", Shrd => "shrd",
    Ret => "ret", Retf => "retf", Salc => "salc", Sbb => "sbb", Sub => "sub", Test => "test",
    Xadd => "xadd", Xchg => "xchg", Xlat => "xlat", Xor => "xor",
    Xabort => "xabort", Xbegin => "xbegin", Xend => "xend", Xtest => "xtest",
    Movsb => "movsb", Movsw => "movsw", Movsd => "movsd", Movsq => "movsq",
    Cmpsb => "cmpsb", Cmpsw => "cmpsw", Cmpsd => "cmpsd", Cmpsq => "cmpsq",
    Stosb => "stosb", Stosw => "stosw", Stosd => "stosd", Stosq => "stosq",
    Lodsb => "lodsb", Lodsw => "lodsw", Lodsd => "lodsd", Lodsq => "lodsq",
    Scasb => "scasb", Scasw => "scasw", Scasd => "scasd", Scasq => "scasq",
    Cmovo => "cmovo", Cmovno => "cmovno", Cmovb => "cmovb", Cmovae => "cmovae",
    Cmove => "cmove", Cmovne => "cmovne", Cmovbe => "cmovbe", Cmova => "cmova",
    Cmovs => "cmovs", Cmovns => "cmovns", Cmovp => "cmovp", Cmovnp => "cmovnp",
    Cmovl => "cmovl", Cmovge => "cmovge", Cmovle => "cmovle", Cmovg => "cmovg",
    Seto => "seto", Setno => "setno", Setb => "setb", Setae => "setae",
    Sete => "sete", Setne => "setne", Setbe => "setbe", Seta => "seta",
    Sets => "sets", Setns => "setns", Setp => "setp", Setnp => "setnp",
    Setl => "setl", Setge => "setge", Setle => "setle", Setg => "setg",

    // system
    Clts => "clts", Cpuid => "cpuid", Emms => "emms", Femms => "femms", Getsec => "getsec",
    Invd => "invd", Invlpg => "invlpg", Invlpga => "invlpga", Invept => "invept", Invvpid => "invvpid",
    Invpcid => "invpcid", Lgdt => "lgdt", Lidt => "lidt", Lldt => "lldt", Lmsw => "lmsw", Ltr => "ltr",
    Sgdt => "sgdt", Sidt => "sidt", Sldt => "sldt", Smsw => "smsw", Str => "str", Verr => "verr", Verw => "verw",
    Rdmsr => "rdmsr", Wrmsr => "wrmsr", Rdpmc => "rdpmc", Rdtsc => "rdtsc", Rdtscp => "rdtscp",
    Rdpid => "rdpid", Rdrand => "rdrand", Rdseed => "rdseed", Rdpru => "rdpru", Rdpkru => "rdpkru", Wrpkru => "wrpkru",
    Rdfsbase => "rdfsbase", Rdgsbase => "rdgsbase", Wrfsbase => "wrfsbase", Wrgsbase => "wrgsbase",
    Rsm => "rsm", Swapgs => "swapgs", Syscall => "syscall", Sysenter => "sysenter", Sysexit => "sysexit", Sysret => "sysret",
    Ud0 => "ud0", Ud1 => "ud1", Ud2 => "ud2", Wbinvd => "wbinvd",
    Enclv => "enclv", Encls => "encls", Enclu => "enclu", Pconfig => "pconfig",
    Vmcall => "vmcall", Vmlaunch => "vmlaunch", Vmresume => "vmresume", Vmxoff => "vmxoff", Vmfunc => "vmfunc",
    Vmrun => "vmrun", Vmmcall => "vmmcall", Vmload => "vmload", Vmsave => "vmsave",
    Vmread => "vmread", Vmwrite => "vmwrite", Vmptrld => "vmptrld", Vmptrst => "vmptrst",
    Vmclear => "vmclear", Vmxon => "vmxon",
    Stgi => "stgi", Clgi => "clgi", Skinit => "skinit",
    Monitor => "monitor", Mwait => "mwait", Monitorx => "monitorx", Mwaitx => "mwaitx",
    Clac => "clac", Stac => "stac", Clzero => "clzero",
    Xgetbv => "xgetbv", Xsetbv => "xsetbv",
    Setssbsy => "setssbsy", Saveprevssp => "saveprevssp", Incssp => "incssp", Clrssbsy => "clrssbsy",
    Wrussd => "wrussd", Wrussq => "wrussq", Wrssd => "wrssd", Wrssq => "wrssq",
    Rdsspd => "rdsspd", Rdsspq => "rdsspq", Rstorssp => "rstorssp",
    Endbr32 => "endbr32", Endbr64 => "endbr64",
    Prefetch => "prefetch", Prefetchw => "prefetchw", Prefetchnta => "prefetchnta",
    Prefetcht0 => "prefetcht0", Prefetcht1 => "prefetcht1", Prefetcht2 => "prefetcht2",
    Fxsave => "fxsave", Fxrstor => "fxrstor", Ldmxcsr => "ldmxcsr", Stmxcsr => "stmxcsr",
    Xsave => "xsave", Xrstor => "xrstor", Xsaveopt => "xsaveopt", Clflush => "clflush",
    Xsavec => "xsavec", Xsaves => "xsaves", Xrstors => "xrstors",
    Clflushopt => "clflushopt", Clwb => "clwb", Lfence => "lfence", Mfence => "mfence", Sfence => "sfence",
    Ptwrite => "ptwrite", Umonitor => "umonitor", Umwait => "umwait", Tpause => "tpause",
    Movdiri => "movdiri", Movdir64b => "movdir64b",
    Bndmov => "bndmov", Bndcl => "bndcl", Bndcu => "bndcu", Bndcn => "bndcn",
    Bndldx => "bndldx", Bndstx => "bndstx", Bndmk => "bndmk",

    // x87
    F2xm1 => "f2xm1", Fabs => "fabs", Fadd => "fadd", Faddp => "faddp", Fbld => "fbld", Fbstp => "fbstp",
    Fchs => "fchs", Fcmovb => "fcmovb", Fcmove => "fcmove", Fcmovbe => "fcmovbe", Fcmovu => "fcmovu",
    Fcmovnb => "fcmovnb", Fcmovne => "fcmovne", Fcmovnbe => "fcmovnbe", Fcmovnu => "fcmovnu",
    Fcom => "fcom", Fcomp => "fcomp", Fcompp => "fcompp", Fcomi => "fcomi", Fcomip => "fcomip",
    Fcos => "fcos", Fdecstp => "fdecstp", Fdiv => "fdiv", Fdivp => "fdivp", Fdivr => "fdivr", Fdivrp => "fdivrp",
    Ffree => "ffree", Ffreep => "ffreep", Fiadd => "fiadd", Ficom => "ficom", Ficomp => "ficomp",
    Fidiv => "fidiv", Fidivr => "fidivr", Fild => "fild", Fimul => "fimul", Fincstp => "fincstp",
    Fist => "fist", Fistp => "fistp", Fisttp => "fisttp", Fisub => "fisub", Fisubr => "fisubr",
    Fld => "fld", Fld1 => "fld1", Fldcw => "fldcw", Fldenv => "fldenv", Fldl2e => "fldl2e", Fldl2t => "fldl2t",
    Fldlg2 => "fldlg2", Fldln2 => "fldln2", Fldpi => "fldpi", Fldz => "fldz",
    Fmul => "fmul", Fmulp => "fmulp", Fnclex => "fnclex", Fndisi => "fndisi", Fneni => "fneni",
    Fninit => "fninit", Fnop => "fnop", Fnsave => "fnsave", Fnsetpm => "fnsetpm",
    Fnstcw => "fnstcw", Fnstenv => "fnstenv", Fnstsw => "fnstsw",
    Fpatan => "fpatan", Fprem => "fprem", Fprem1 => "fprem1", Fptan => "fptan", Frndint => "frndint",
    Frstor => "frstor", Fscale => "fscale", Fsin => "fsin", Fsincos => "fsincos", Fsqrt => "fsqrt",
    Fst => "fst", Fstp => "fstp", Fsub => "fsub", Fsubp => "fsubp",
    Fsubr => "fsubr", Fsubrp => "fsubrp", Ftst => "ftst", Fucom => "fucom", Fucomi => "fucomi",
    Fucomip => "fucomip", Fucomp => "fucomp", Fucompp => "fucompp", Fwait => "fwait", Fxam => "fxam",
    Fxch => "fxch", Fxtract => "fxtract", Fyl2x => "fyl2x", Fyl2xp1 => "fyl2xp1",

    // mmx / sse
    Addps => "addps", Addpd => "addpd", Addss => "addss", Addsd => "addsd",
    Addsubps => "addsubps", Addsubpd => "addsubpd",
    Andps => "andps", Andpd => "andpd", Andnps => "andnps", Andnpd => "andnpd",
    Blendps => "blendps", Blendpd => "blendpd", Blendvps => "blendvps", Blendvpd => "blendvpd",
    Cmpps => "cmpps", Cmppd => "cmppd", Cmpss => "cmpss",
    Comiss => "comiss", Comisd => "comisd", Ucomiss => "ucomiss", Ucomisd => "ucomisd",
    Cvtdq2pd => "cvtdq2pd", Cvtdq2ps => "cvtdq2ps", Cvtpd2dq => "cvtpd2dq", Cvtpd2pi => "cvtpd2pi",
    Cvtpd2ps => "cvtpd2ps", Cvtpi2pd => "cvtpi2pd", Cvtpi2ps => "cvtpi2ps", Cvtps2dq => "cvtps2dq",
    Cvtps2pd => "cvtps2pd", Cvtps2pi => "cvtps2pi", Cvtsd2si => "cvtsd2si", Cvtsd2ss => "cvtsd2ss",
    Cvtsi2sd => "cvtsi2sd", Cvtsi2ss => "cvtsi2ss", Cvtss2sd => "cvtss2sd", Cvtss2si => "cvtss2si",
    Cvttpd2dq => "cvttpd2dq", Cvttpd2pi => "cvttpd2pi", Cvttps2dq => "cvttps2dq", Cvttps2pi => "cvttps2pi",
    Cvttsd2si => "cvttsd2si", Cvttss2si => "cvttss2si",
    Divps => "divps", Divpd => "divpd", Divss => "divss", Divsd => "divsd",
    Dpps => "dpps", Dppd => "dppd", Extractps => "extractps", Insertps => "insertps",
    Extrq => "extrq", Insertq => "insertq",
    Haddps => "haddps", Haddpd => "haddpd", Hsubps => "hsubps", Hsubpd => "hsubpd",
    Lddqu => "lddqu", Maskmovq => "maskmovq", Maskmovdqu => "maskmovdqu",
    Maxps => "maxps", Maxpd => "maxpd", Maxss => "maxss", Maxsd => "maxsd",
    Minps => "minps", Minpd => "minpd", Minss => "minss", Minsd => "minsd",
    Movaps => "movaps", Movapd => "movapd", Movd => "movd", Movq => "movq",
    Movddup => "movddup", Movdq2q => "movdq2q", Movq2dq => "movq2dq", Movdqa => "movdqa", Movdqu => "movdqu",
    Movhlps => "movhlps", Movlhps => "movlhps", Movhps => "movhps", Movhpd => "movhpd",
    Movlps => "movlps", Movlpd => "movlpd", Movmskps => "movmskps", Movmskpd => "movmskpd",
    Movntdq => "movntdq", Movntdqa => "movntdqa", Movnti => "movnti", Movntps => "movntps",
    Movntpd => "movntpd", Movntq => "movntq", Movntss => "movntss", Movntsd => "movntsd",
    Movshdup => "movshdup", Movsldup => "movsldup", Movss => "movss",
    Movups => "movups", Movupd => "movupd",
    Mpsadbw => "mpsadbw", Mulps => "mulps", Mulpd => "mulpd", Mulss => "mulss", Mulsd => "mulsd",
    Orps => "orps", Orpd => "orpd", Xorps => "xorps", Xorpd => "xorpd",
    Pabsb => "pabsb", Pabsw => "pabsw", Pabsd => "pabsd",
    Packssdw => "packssdw", Packsswb => "packsswb", Packusdw => "packusdw", Packuswb => "packuswb",
    Paddb => "paddb", Paddw => "paddw", Paddd => "paddd", Paddq => "paddq",
    Paddsb => "paddsb", Paddsw => "paddsw", Paddusb => "paddusb", Paddusw => "paddusw",
    Palignr => "palignr", Pand => "pand", Pandn => "pandn", Pavgb => "pavgb", Pavgw => "pavgw",
    Pblendvb => "pblendvb", Pblendw => "pblendw", Pclmulqdq => "pclmulqdq",
    Pcmpeqb => "pcmpeqb", Pcmpeqw => "pcmpeqw", Pcmpeqd => "pcmpeqd", Pcmpeqq => "pcmpeqq",
    Pcmpgtb => "pcmpgtb", Pcmpgtw => "pcmpgtw", Pcmpgtd => "pcmpgtd", Pcmpgtq => "pcmpgtq",
    Pcmpestrm => "pcmpestrm", Pcmpestri => "pcmpestri", Pcmpistrm => "pcmpistrm", Pcmpistri => "pcmpistri",
    Pextrb => "pextrb", Pextrw => "pextrw", Pextrd => "pextrd", Pextrq => "pextrq",
    Phaddw => "phaddw", Phaddd => "phaddd", Phaddsw => "phaddsw", Phminposuw => "phminposuw",
    Phsubw => "phsubw", Phsubd => "phsubd", Phsubsw => "phsubsw",
    Pinsrb => "pinsrb", Pinsrw => "pinsrw", Pinsrd => "pinsrd", Pinsrq => "pinsrq",
    Pmaddubsw => "pmaddubsw", Pmaddwd => "pmaddwd",
    Pmaxsb => "pmaxsb", Pmaxsw => "pmaxsw", Pmaxsd => "pmaxsd", Pmaxub => "pmaxub", Pmaxuw => "pmaxuw", Pmaxud => "pmaxud",
    Pminsb => "pminsb", Pminsw => "pminsw", Pminsd => "pminsd", Pminub => "pminub", Pminuw => "pminuw", Pminud => "pminud",
    Pmovmskb => "pmovmskb",
    Pmovsxbw => "pmovsxbw", Pmovsxbd => "pmovsxbd", Pmovsxbq => "pmovsxbq",
    Pmovsxwd => "pmovsxwd", Pmovsxwq => "pmovsxwq", Pmovsxdq => "pmovsxdq",
    Pmovzxbw => "pmovzxbw", Pmovzxbd => "pmovzxbd", Pmovzxbq => "pmovzxbq",
    Pmovzxwd => "pmovzxwd", Pmovzxwq => "pmovzxwq", Pmovzxdq => "pmovzxdq",
    Pmuldq => "pmuldq", Pmulhrsw => "pmulhrsw", Pmulhuw => "pmulhuw", Pmulhw => "pmulhw",
    Pmulld => "pmulld", Pmullw => "pmullw", Pmuludq => "pmuludq",
    Por => "por", Psadbw => "psadbw", Pshufb => "pshufb", Pshufd => "pshufd",
    Pshufhw => "pshufhw", Pshuflw => "pshuflw", Pshufw => "pshufw",
    Psignb => "psignb", Psignw => "psignw", Psignd => "psignd",
    Psllw => "psllw", Pslld => "pslld", Psllq => "psllq", Pslldq => "pslldq",
    Psraw => "psraw", Psrad => "psrad",
    Psrlw => "psrlw", Psrld => "psrld", Psrlq => "psrlq", Psrldq => "psrldq",
    Psubb => "psubb", Psubw => "psubw", Psubd => "psubd", Psubq => "psubq",
    Psubsb => "psubsb", Psubsw => "psubsw", Psubusb => "psubusb", Psubusw => "psubusw",
    Ptest => "ptest",
    Punpckhbw => "punpckhbw", Punpckhwd => "punpckhwd", Punpckhdq => "punpckhdq", Punpckhqdq => "punpckhqdq",
    Punpcklbw => "punpcklbw", Punpcklwd => "punpcklwd", Punpckldq => "punpckldq", Punpcklqdq => "punpcklqdq",
    Pxor => "pxor", Rcpps => "rcpps", Rcpss => "rcpss",
    Roundps => "roundps", Roundpd => "roundpd", Roundss => "roundss", Roundsd => "roundsd",
    Rsqrtps => "rsqrtps", Rsqrtss => "rsqrtss",
    Shufps => "shufps", Shufpd => "shufpd",
    Sqrtps => "sqrtps", Sqrtpd => "sqrtpd", Sqrtss => "sqrtss", Sqrtsd => "sqrtsd",
    Subps => "subps", Subpd => "subpd", Subss => "subss", Subsd => "subsd",
    Unpckhps => "unpckhps", Unpckhpd => "unpckhpd", Unpcklps => "unpcklps", Unpcklpd => "unpcklpd",

    // crypto
    Aesdec => "aesdec", Aesdeclast => "aesdeclast", Aesenc => "aesenc", Aesenclast => "aesenclast",
    Aesimc => "aesimc", Aeskeygenassist => "aeskeygenassist",
    Sha1nexte => "sha1nexte", Sha1msg1 => "sha1msg1", Sha1msg2 => "sha1msg2", Sha1rnds4 => "sha1rnds4",
    Sha256rnds2 => "sha256rnds2", Sha256msg1 => "sha256msg1", Sha256msg2 => "sha256msg2",
    Gf2p8mulb => "gf2p8mulb", Gf2p8affineqb => "gf2p8affineqb", Gf2p8affineinvqb => "gf2p8affineinvqb",

    // compare predicates folded into the mnemonic
    Cmpeqps => "cmpeqps", Cmpltps => "cmpltps", Cmpleps => "cmpleps", Cmpunordps => "cmpunordps",
    Cmpneqps => "cmpneqps", Cmpnltps => "cmpnltps", Cmpnleps => "cmpnleps", Cmpordps => "cmpordps",
    Cmpeqpd => "cmpeqpd", Cmpltpd => "cmpltpd", Cmplepd => "cmplepd", Cmpunordpd => "cmpunordpd",
    Cmpneqpd => "cmpneqpd", Cmpnltpd => "cmpnltpd", Cmpnlepd => "cmpnlepd", Cmpordpd => "cmpordpd",
    Cmpeqss => "cmpeqss", Cmpltss => "cmpltss", Cmpless => "cmpless", Cmpunordss => "cmpunordss",
    Cmpneqss => "cmpneqss", Cmpnltss => "cmpnltss", Cmpnless => "cmpnless", Cmpordss => "cmpordss",
    Cmpeqsd => "cmpeqsd", Cmpltsd => "cmpltsd", Cmplesd => "cmplesd", Cmpunordsd => "cmpunordsd",
    Cmpneqsd => "cmpneqsd", Cmpnltsd => "cmpnltsd", Cmpnlesd => "cmpnlesd", Cmpordsd => "cmpordsd",

    // 3DNow!
    Pi2fw => "pi2fw", Pi2fd => "pi2fd", Pf2iw => "pf2iw", Pf2id => "pf2id",
    Pfnacc => "pfnacc", Pfpnacc => "pfpnacc", Pfcmpge => "pfcmpge", Pfmin => "pfmin",
    Pfrcp => "pfrcp", Pfrsqrt => "pfrsqrt", Pfsub => "pfsub", Pfadd => "pfadd",
    Pfcmpgt => "pfcmpgt", Pfmax => "pfmax", Pfrcpit1 => "pfrcpit1", Pfrsqit1 => "pfrsqit1",
    Pfsubr => "pfsubr", Pfacc => "pfacc", Pfcmpeq => "pfcmpeq", Pfmul => "pfmul",
    Pfrcpit2 => "pfrcpit2", Pmulhrw => "pmulhrw", Pswapd => "pswapd", Pavgusb => "pavgusb",

    // VIA PadLock
    Montmul => "montmul", Xsha1 => "xsha1", Xsha256 => "xsha256", Xstore => "xstore",
    Xcryptecb => "xcryptecb", Xcryptcbc => "xcryptcbc", Xcryptctr => "xcryptctr",
    Xcryptcfb => "xcryptcfb", Xcryptofb => "xcryptofb",

    // only reachable through VEX
    Vbroadcastss => "vbroadcastss", Vbroadcastsd => "vbroadcastsd", Vbroadcastf128 => "vbroadcastf128",
    Vpbroadcastb => "vpbroadcastb", Vpbroadcastw => "vpbroadcastw",
    Vpbroadcastd => "vpbroadcastd", Vpbroadcastq => "vpbroadcastq",
    Vblendvps => "vblendvps", Vblendvpd => "vblendvpd", Vpblendvb => "vpblendvb",
    Vperm2f128 => "vperm2f128", Vperm2i128 => "vperm2i128",
    Vinsertf128 => "vinsertf128", Vextractf128 => "vextractf128",
    Vinserti128 => "vinserti128", Vextracti128 => "vextracti128",
    Vzeroupper => "vzeroupper", Vzeroall => "vzeroall",
    Vpermilps => "vpermilps", Vpermilpd => "vpermilpd", Vtestps => "vtestps", Vtestpd => "vtestpd",
    Vpermps => "vpermps", Vpermd => "vpermd", Vpermq => "vpermq", Vpermpd => "vpermpd",
    Vpblendd => "vpblendd", Vcvtph2ps => "vcvtph2ps", Vcvtps2ph => "vcvtps2ph",
    Vbroadcasti128 => "vbroadcasti128", Vmaskmovps => "vmaskmovps", Vmaskmovpd => "vmaskmovpd",
    Vpmaskmovd => "vpmaskmovd", Vpmaskmovq => "vpmaskmovq",
    Vpsrlvd => "vpsrlvd", Vpsrlvq => "vpsrlvq", Vpsravd => "vpsravd",
    Vpsllvd => "vpsllvd", Vpsllvq => "vpsllvq",
    Vpgatherdd => "vpgatherdd", Vpgatherdq => "vpgatherdq",
    Vpgatherqd => "vpgatherqd", Vpgatherqq => "vpgatherqq",
    Vgatherdps => "vgatherdps", Vgatherdpd => "vgatherdpd",
    Vgatherqps => "vgatherqps", Vgatherqpd => "vgatherqpd",

    // fused multiply-add
    Vfmaddsub132ps => "vfmaddsub132ps", Vfmaddsub132pd => "vfmaddsub132pd",
    Vfmsubadd132ps => "vfmsubadd132ps", Vfmsubadd132pd => "vfmsubadd132pd",
    Vfmadd132ps => "vfmadd132ps", Vfmadd132pd => "vfmadd132pd", Vfmadd132ss => "vfmadd132ss",
    Vfmadd132sd => "vfmadd132sd", Vfmsub132ps => "vfmsub132ps", Vfmsub132pd => "vfmsub132pd",
    Vfmsub132ss => "vfmsub132ss", Vfmsub132sd => "vfmsub132sd", Vfnmadd132ps => "vfnmadd132ps",
    Vfnmadd132pd => "vfnmadd132pd", Vfnmadd132ss => "vfnmadd132ss", Vfnmadd132sd => "vfnmadd132sd",
    Vfnmsub132ps => "vfnmsub132ps", Vfnmsub132pd => "vfnmsub132pd", Vfnmsub132ss => "vfnmsub132ss",
    Vfnmsub132sd => "vfnmsub132sd", Vfmaddsub213ps => "vfmaddsub213ps",
    Vfmaddsub213pd => "vfmaddsub213pd", Vfmsubadd213ps => "vfmsubadd213ps",
    Vfmsubadd213pd => "vfmsubadd213pd", Vfmadd213ps => "vfmadd213ps", Vfmadd213pd => "vfmadd213pd",
    Vfmadd213ss => "vfmadd213ss", Vfmadd213sd => "vfmadd213sd", Vfmsub213ps => "vfmsub213ps",
    Vfmsub213pd => "vfmsub213pd", Vfmsub213ss => "vfmsub213ss", Vfmsub213sd => "vfmsub213sd",
    Vfnmadd213ps => "vfnmadd213ps", Vfnmadd213pd => "vfnmadd213pd", Vfnmadd213ss => "vfnmadd213ss",
    Vfnmadd213sd => "vfnmadd213sd", Vfnmsub213ps => "vfnmsub213ps", Vfnmsub213pd => "vfnmsub213pd",
    Vfnmsub213ss => "vfnmsub213ss", Vfnmsub213sd => "vfnmsub213sd",
    Vfmaddsub231ps => "vfmaddsub231ps", Vfmaddsub231pd => "vfmaddsub231pd",
    Vfmsubadd231ps => "vfmsubadd231ps", Vfmsubadd231pd => "vfmsubadd231pd",
    Vfmadd231ps => "vfmadd231ps", Vfmadd231pd => "vfmadd231pd", Vfmadd231ss => "vfmadd231ss",
    Vfmadd231sd => "vfmadd231sd", Vfmsub231ps => "vfmsub231ps", Vfmsub231pd => "vfmsub231pd",
    Vfmsub231ss => "vfmsub231ss", Vfmsub231sd => "vfmsub231sd", Vfnmadd231ps => "vfnmadd231ps",
    Vfnmadd231pd => "vfnmadd231pd", Vfnmadd231ss => "vfnmadd231ss", Vfnmadd231sd => "vfnmadd231sd",
    Vfnmsub231ps => "vfnmsub231ps", Vfnmsub231pd => "vfnmsub231pd", Vfnmsub231ss => "vfnmsub231ss",
    Vfnmsub231sd => "vfnmsub231sd",

    // general purpose BMI1/BMI2
    Andn => "andn", Blsr => "blsr", Blsmsk => "blsmsk", Blsi => "blsi", Bzhi => "bzhi",
    Pdep => "pdep", Pext => "pext", Mulx => "mulx", Bextr => "bextr",
    Shlx => "shlx", Sarx => "sarx", Shrx => "shrx", Rorx => "rorx",
}

use Mnemonic::*;

impl Mnemonic {
    /// SSE compare with its predicate folded into the name, e.g. `cmpltss`.
    pub const fn is_compare_predicate(self) -> bool {
        (self as u16) >= (Cmpeqps as u16) && (self as u16) <= (Cmpordsd as u16)
    }
}

impl std::fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// ALU operations in opcode order, rows 0..4 of the one byte map and group 1.
pub const GROUP1: [Mnemonic; 8] = [Add, Or, Adc, Sbb, And, Sub, Xor, Cmp];

/// Shifts and rotates, group 2.
pub const GROUP2: [Mnemonic; 8] = [Rol, Ror, Rcl, Rcr, Shl, Shr, Sal, Sar];

/// Group 3, `F6`/`F7`.
pub const GROUP3: [Mnemonic; 8] = [Test, Test, Not, Neg, Mul, Imul, Div, Idiv];

/// Group 5, `FF`.
pub const GROUP5: [Mnemonic; 8] = [Inc, Dec, Call, Lcall, Jmp, Ljmp, Push, Invalid];

pub const JCC: [Mnemonic; 16] = [
    Jo, Jno, Jb, Jae, Je, Jne, Jbe, Ja, Js, Jns, Jp, Jnp, Jl, Jge, Jle, Jg,
];

pub const CMOVCC: [Mnemonic; 16] = [
    Cmovo, Cmovno, Cmovb, Cmovae, Cmove, Cmovne, Cmovbe, Cmova, Cmovs, Cmovns, Cmovp, Cmovnp,
    Cmovl, Cmovge, Cmovle, Cmovg,
];

pub const SETCC: [Mnemonic; 16] = [
    Seto, Setno, Setb, Setae, Sete, Setne, Setbe, Seta, Sets, Setns, Setp, Setnp, Setl, Setge,
    Setle, Setg,
];

/// `E0`..`E2`.
pub const LOOPCC: [Mnemonic; 3] = [Loopne, Loope, Loop];

/// `F8`..`FD`.
pub const FLAG_OPS: [Mnemonic; 6] = [Clc, Stc, Cli, Sti, Cld, Std];

/// `D4`..`D7`.
pub const ASCII_ADJUST: [Mnemonic; 4] = [Aam, Aad, Salc, Xlat];

/// String instructions indexed by operand width (byte, word, dword, qword).
pub const MOVS: [Mnemonic; 4] = [Movsb, Movsw, Movsd, Movsq];
pub const CMPS: [Mnemonic; 4] = [Cmpsb, Cmpsw, Cmpsd, Cmpsq];
pub const STOS: [Mnemonic; 4] = [Stosb, Stosw, Stosd, Stosq];
pub const LODS: [Mnemonic; 4] = [Lodsb, Lodsw, Lodsd, Lodsq];
pub const SCAS: [Mnemonic; 4] = [Scasb, Scasw, Scasd, Scasq];

// x87 escapes, memory forms indexed by ModR/M.reg
pub const FPU_ARITH: [Mnemonic; 8] = [Fadd, Fmul, Fcom, Fcomp, Fsub, Fsubr, Fdiv, Fdivr];
pub const FPU_ARITH_REVERSED: [Mnemonic; 8] = [Fadd, Fmul, Fcom, Fcomp, Fsubr, Fsub, Fdivr, Fdiv];
#[rustfmt::skip]
pub const FPU_ARITH_POP: [Mnemonic; 8] = [Faddp, Fmulp, Fcomp, Fcompp, Fsubrp, Fsubp, Fdivrp, Fdivp];
#[rustfmt::skip]
pub const FPU_INT_ARITH: [Mnemonic; 8] = [Fiadd, Fimul, Ficom, Ficomp, Fisub, Fisubr, Fidiv, Fidivr];
pub const FPU_D9_MEM: [Mnemonic; 8] = [Fld, Invalid, Fst, Fstp, Fldenv, Fldcw, Fnstenv, Fnstcw];
pub const FPU_DB_MEM: [Mnemonic; 8] = [Fild, Fisttp, Fist, Fistp, Invalid, Fld, Invalid, Fstp];
pub const FPU_DD_MEM: [Mnemonic; 8] = [Fld, Fisttp, Fst, Fstp, Frstor, Invalid, Fnsave, Fnstsw];
pub const FPU_DF_MEM: [Mnemonic; 8] = [Fild, Fisttp, Fist, Fistp, Fbld, Fild, Fbstp, Fistp];
pub const FPU_DA_REG: [Mnemonic; 4] = [Fcmovb, Fcmove, Fcmovbe, Fcmovu];
#[rustfmt::skip]
pub const FPU_DB_REG: [Mnemonic; 8] = [Fcmovnb, Fcmovne, Fcmovnbe, Fcmovnu, Invalid, Fucomi, Fcomi, Invalid];
pub const FPU_DD_REG: [Mnemonic; 8] = [Ffree, Fxch, Fst, Fstp, Fucom, Fucomp, Invalid, Invalid];
pub const FPU_DF_REG: [Mnemonic; 8] = [Ffreep, Fxch, Fstp, Fstp, Fnstsw, Fucomip, Fcomip, Invalid];

/// `D9 E0`..`D9 FF`.
pub const FPU_D9_E0: [Mnemonic; 32] = [
    Fchs, Fabs, Invalid, Invalid, Ftst, Fxam, Invalid, Invalid,
    Fld1, Fldl2t, Fldl2e, Fldpi, Fldlg2, Fldln2, Fldz, Invalid,
    F2xm1, Fyl2x, Fptan, Fpatan, Fxtract, Fprem1, Fdecstp, Fincstp,
    Fprem, Fyl2xp1, Fsqrt, Fsincos, Frndint, Fscale, Fsin, Fcos,
];

/// `DB E0`..`DB E4`.
pub const FPU_DB_E0: [Mnemonic; 5] = [Fneni, Fndisi, Fnclex, Fninit, Fnsetpm];

// two byte map
pub const GROUP6: [Mnemonic; 8] = [Sldt, Str, Lldt, Ltr, Verr, Verw, Invalid, Invalid];
pub const GROUP7_MEM: [Mnemonic; 8] = [Sgdt, Sidt, Lgdt, Lidt, Smsw, Invalid, Lmsw, Invlpg];
#[rustfmt::skip]
pub const GROUP7_REG0: [Mnemonic; 8] = [Enclv, Vmcall, Vmlaunch, Vmresume, Vmxoff, Pconfig, Invalid, Invalid];
#[rustfmt::skip]
pub const GROUP7_REG1: [Mnemonic; 8] = [Monitor, Mwait, Clac, Stac, Invalid, Invalid, Invalid, Encls];
#[rustfmt::skip]
pub const GROUP7_REG2: [Mnemonic; 8] = [Xgetbv, Xsetbv, Invalid, Invalid, Vmfunc, Xend, Xtest, Enclu];
#[rustfmt::skip]
pub const GROUP7_REG3: [Mnemonic; 8] = [Vmrun, Vmmcall, Vmload, Vmsave, Stgi, Clgi, Skinit, Invlpga];
#[rustfmt::skip]
pub const GROUP7_REG7: [Mnemonic; 8] = [Swapgs, Rdtscp, Monitorx, Mwaitx, Clzero, Rdpru, Invalid, Invalid];
#[rustfmt::skip]
pub const GROUP15_MEM: [Mnemonic; 8] = [Fxsave, Fxrstor, Ldmxcsr, Stmxcsr, Xsave, Xrstor, Xsaveopt, Clflush];
pub const FSGSBASE: [Mnemonic; 4] = [Rdfsbase, Rdgsbase, Wrfsbase, Wrgsbase];
/// `0F A6` and `0F A7` register forms by ModR/M.reg.
pub const PADLOCK_A6: [Mnemonic; 3] = [Montmul, Xsha1, Xsha256];
#[rustfmt::skip]
pub const PADLOCK_A7: [Mnemonic; 6] = [Xstore, Xcryptecb, Xcryptcbc, Xcryptctr, Xcryptcfb, Xcryptofb];
pub const PREFETCH_HINTS: [Mnemonic; 4] = [Prefetchnta, Prefetcht0, Prefetcht1, Prefetcht2];

/// `0F 50`..`0F 5F` indexed by the SIMD prefix: none, 66, F3, F2.
pub const SSE_ROW5: [[Mnemonic; 16]; 4] = [
    [
        Movmskps, Sqrtps, Rsqrtps, Rcpps, Andps, Andnps, Orps, Xorps,
        Addps, Mulps, Cvtps2pd, Cvtdq2ps, Subps, Minps, Divps, Maxps,
    ],
    [
        Movmskpd, Sqrtpd, Invalid, Invalid, Andpd, Andnpd, Orpd, Xorpd,
        Addpd, Mulpd, Cvtpd2ps, Cvtps2dq, Subpd, Minpd, Divpd, Maxpd,
    ],
    [
        Invalid, Sqrtss, Rsqrtss, Rcpss, Invalid, Invalid, Invalid, Invalid,
        Addss, Mulss, Cvtss2sd, Cvttps2dq, Subss, Minss, Divss, Maxss,
    ],
    [
        Invalid, Sqrtsd, Invalid, Invalid, Invalid, Invalid, Invalid, Invalid,
        Addsd, Mulsd, Cvtsd2ss, Invalid, Subsd, Minsd, Divsd, Maxsd,
    ],
];

/// `0F 60`..`0F 6D`.
pub const SSE_ROW6: [Mnemonic; 14] = [
    Punpcklbw, Punpcklwd, Punpckldq, Packsswb, Pcmpgtb, Pcmpgtw, Pcmpgtd, Packuswb,
    Punpckhbw, Punpckhwd, Punpckhdq, Packssdw, Punpcklqdq, Punpckhqdq,
];

/// `0F D0`..`0F FF`, where the SIMD prefix only selects the register file.
pub const SSE_ROW_D: [Mnemonic; 48] = [
    Invalid, Psrlw, Psrld, Psrlq, Paddq, Pmullw, Invalid, Pmovmskb,
    Psubusb, Psubusw, Pminub, Pand, Paddusb, Paddusw, Pmaxub, Pandn,
    Pavgb, Psraw, Psrad, Pavgw, Pmulhuw, Pmulhw, Invalid, Invalid,
    Psubsb, Psubsw, Pminsw, Por, Paddsb, Paddsw, Pmaxsw, Pxor,
    Lddqu, Psllw, Pslld, Psllq, Pmuludq, Pmaddwd, Psadbw, Invalid,
    Psubb, Psubw, Psubd, Psubq, Paddb, Paddw, Paddd, Ud0,
];

/// Predicate immediates 0..8 of `CMPPS`, `CMPPD`, `CMPSS` and `CMPSD`.
pub const CMP_PREDICATES: [[Mnemonic; 8]; 4] = [
    [Cmpeqps, Cmpltps, Cmpleps, Cmpunordps, Cmpneqps, Cmpnltps, Cmpnleps, Cmpordps],
    [Cmpeqpd, Cmpltpd, Cmplepd, Cmpunordpd, Cmpneqpd, Cmpnltpd, Cmpnlepd, Cmpordpd],
    [Cmpeqss, Cmpltss, Cmpless, Cmpunordss, Cmpneqss, Cmpnltss, Cmpnless, Cmpordss],
    [Cmpeqsd, Cmpltsd, Cmplesd, Cmpunordsd, Cmpneqsd, Cmpnltsd, Cmpnlesd, Cmpordsd],
];

// three byte maps
pub const SSSE3_ROW0: [Mnemonic; 12] = [
    Pshufb, Phaddw, Phaddd, Phaddsw, Pmaddubsw, Phsubw, Phsubd, Phsubsw,
    Psignb, Psignw, Psignd, Pmulhrsw,
];
pub const PABS: [Mnemonic; 3] = [Pabsb, Pabsw, Pabsd];
pub const SSE41_ROW2: [Mnemonic; 12] = [
    Pmovsxbw, Pmovsxbd, Pmovsxbq, Pmovsxwd, Pmovsxwq, Pmovsxdq, Invalid, Invalid,
    Pmuldq, Pcmpeqq, Movntdqa, Packusdw,
];
pub const SSE41_ROW3: [Mnemonic; 16] = [
    Pmovzxbw, Pmovzxbd, Pmovzxbq, Pmovzxwd, Pmovzxwq, Pmovzxdq, Invalid, Pcmpgtq,
    Pminsb, Pminsd, Pminuw, Pminud, Pmaxsb, Pmaxsd, Pmaxuw, Pmaxud,
];
pub const INVALIDATE: [Mnemonic; 3] = [Invept, Invvpid, Invpcid];
pub const SHA: [Mnemonic; 6] = [Sha1nexte, Sha1msg1, Sha1msg2, Sha256rnds2, Sha256msg1, Sha256msg2];
pub const AES: [Mnemonic; 5] = [Aesimc, Aesenc, Aesenclast, Aesdec, Aesdeclast];
pub const SSE41_ROUND: [Mnemonic; 8] = [
    Roundps, Roundpd, Roundss, Roundsd, Blendps, Blendpd, Pblendw, Palignr,
];
pub const SSE41_ROW4: [Mnemonic; 5] = [Dpps, Dppd, Mpsadbw, Invalid, Pclmulqdq];
pub const SSE42_STRING: [Mnemonic; 4] = [Pcmpestrm, Pcmpestri, Pcmpistrm, Pcmpistri];

/// VEX `0F38 96`..`9F` and the same columns of rows `A` and `B`, indexed by
/// `(opcode & 0xf) - 6` and VEX.W.
pub const FMA: [[Mnemonic; 20]; 3] = [
    [
        Vfmaddsub132ps, Vfmaddsub132pd, Vfmsubadd132ps, Vfmsubadd132pd,
        Vfmadd132ps, Vfmadd132pd, Vfmadd132ss, Vfmadd132sd,
        Vfmsub132ps, Vfmsub132pd, Vfmsub132ss, Vfmsub132sd,
        Vfnmadd132ps, Vfnmadd132pd, Vfnmadd132ss, Vfnmadd132sd,
        Vfnmsub132ps, Vfnmsub132pd, Vfnmsub132ss, Vfnmsub132sd,
    ],
    [
        Vfmaddsub213ps, Vfmaddsub213pd, Vfmsubadd213ps, Vfmsubadd213pd,
        Vfmadd213ps, Vfmadd213pd, Vfmadd213ss, Vfmadd213sd,
        Vfmsub213ps, Vfmsub213pd, Vfmsub213ss, Vfmsub213sd,
        Vfnmadd213ps, Vfnmadd213pd, Vfnmadd213ss, Vfnmadd213sd,
        Vfnmsub213ps, Vfnmsub213pd, Vfnmsub213ss, Vfnmsub213sd,
    ],
    [
        Vfmaddsub231ps, Vfmaddsub231pd, Vfmsubadd231ps, Vfmsubadd231pd,
        Vfmadd231ps, Vfmadd231pd, Vfmadd231ss, Vfmadd231sd,
        Vfmsub231ps, Vfmsub231pd, Vfmsub231ss, Vfmsub231sd,
        Vfnmadd231ps, Vfnmadd231pd, Vfnmadd231ss, Vfnmadd231sd,
        Vfnmsub231ps, Vfnmsub231pd, Vfnmsub231ss, Vfnmsub231sd,
    ],
];

/// VEX `0F38 90`..`93` by VEX.W.
pub const GATHER: [Mnemonic; 8] = [
    Vpgatherdd, Vpgatherdq, Vpgatherqd, Vpgatherqq, Vgatherdps, Vgatherdpd, Vgatherqps, Vgatherqpd,
];

/// BMI1 group 17, `VEX 0F38 F3` /1../3.
#[rustfmt::skip]
pub const GROUP17: [Mnemonic; 8] = [Invalid, Blsr, Blsmsk, Blsi, Invalid, Invalid, Invalid, Invalid];

/// 3DNow! suffix bytes, in the order of [`crate::decode::THREE_DNOW_OPCODES`].
pub const THREE_DNOW: [Mnemonic; 24] = [
    Pi2fw, Pi2fd, Pf2iw, Pf2id, Pfnacc, Pfpnacc, Pfcmpge, Pfmin, Pfrcp, Pfrsqrt, Pfsub, Pfadd,
    Pfcmpgt, Pfmax, Pfrcpit1, Pfrsqit1, Pfsubr, Pfacc, Pfcmpeq, Pfmul, Pfrcpit2, Pmulhrw,
    Pswapd, Pavgusb,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_names() {
        assert_eq!(JCC[0x4].name(), "je");
        assert_eq!(CMOVCC[0xf].name(), "cmovg");
        assert_eq!(SETCC[0x2].name(), "setb");
        assert_eq!(GROUP1[7].name(), "cmp");
        assert_eq!(Mnemonic::Invalid.name(), "(bad)");
    }

    #[test]
    fn compare_predicates() {
        assert!(Cmpltss.is_compare_predicate());
        assert!(Cmpordsd.is_compare_predicate());
        assert!(!Cmpss.is_compare_predicate());
        assert!(!Cmpsd.is_compare_predicate());
    }
}
