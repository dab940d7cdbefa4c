//! Register numbering.
//!
//! Families always start at a multiple of eight so that a ModR/M `reg` or `rm`
//! field can be added to the family's first register.

macro_rules! registers {
    ($($name:ident = $value:literal => $text:literal),* $(,)?) => {
        #[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Register {
            #[default]
            None = 0,
            $($name = $value),*
        }

        impl Register {
            pub const fn from_repr(value: u8) -> Option<Self> {
                match value {
                    0 => Some(Self::None),
                    $($value => Some(Self::$name),)*
                    _ => None,
                }
            }

            pub const fn name(self) -> &'static str {
                match self {
                    Self::None => "",
                    $(Self::$name => $text,)*
                }
            }
        }
    };
}

registers! {
    Ip = 8 => "ip", Eip = 9 => "eip", Rip = 10 => "rip",

    Al = 16 => "al", Cl = 17 => "cl", Dl = 18 => "dl", Bl = 19 => "bl",
    Ah = 20 => "ah", Ch = 21 => "ch", Dh = 22 => "dh", Bh = 23 => "bh",

    Ax = 24 => "ax", Cx = 25 => "cx", Dx = 26 => "dx", Bx = 27 => "bx",
    Sp = 28 => "sp", Bp = 29 => "bp", Si = 30 => "si", Di = 31 => "di",

    Eax = 32 => "eax", Ecx = 33 => "ecx", Edx = 34 => "edx", Ebx = 35 => "ebx",
    Esp = 36 => "esp", Ebp = 37 => "ebp", Esi = 38 => "esi", Edi = 39 => "edi",

    Rax = 40 => "rax", Rcx = 41 => "rcx", Rdx = 42 => "rdx", Rbx = 43 => "rbx",
    Rsp = 44 => "rsp", Rbp = 45 => "rbp", Rsi = 46 => "rsi", Rdi = 47 => "rdi",

    R8 = 48 => "r8", R9 = 49 => "r9", R10 = 50 => "r10", R11 = 51 => "r11",
    R12 = 52 => "r12", R13 = 53 => "r13", R14 = 54 => "r14", R15 = 55 => "r15",

    R8b = 56 => "r8b", R9b = 57 => "r9b", R10b = 58 => "r10b", R11b = 59 => "r11b",
    R12b = 60 => "r12b", R13b = 61 => "r13b", R14b = 62 => "r14b", R15b = 63 => "r15b",

    R8w = 64 => "r8w", R9w = 65 => "r9w", R10w = 66 => "r10w", R11w = 67 => "r11w",
    R12w = 68 => "r12w", R13w = 69 => "r13w", R14w = 70 => "r14w", R15w = 71 => "r15w",

    R8d = 72 => "r8d", R9d = 73 => "r9d", R10d = 74 => "r10d", R11d = 75 => "r11d",
    R12d = 76 => "r12d", R13d = 77 => "r13d", R14d = 78 => "r14d", R15d = 79 => "r15d",

    Es = 80 => "es", Cs = 81 => "cs", Ss = 82 => "ss", Ds = 83 => "ds",
    Fs = 84 => "fs", Gs = 85 => "gs",

    Cr0 = 88 => "cr0", Cr1 = 89 => "cr1", Cr2 = 90 => "cr2", Cr3 = 91 => "cr3",
    Cr4 = 92 => "cr4", Cr5 = 93 => "cr5", Cr6 = 94 => "cr6", Cr7 = 95 => "cr7",
    Cr8 = 96 => "cr8", Cr9 = 97 => "cr9", Cr10 = 98 => "cr10", Cr11 = 99 => "cr11",
    Cr12 = 100 => "cr12", Cr13 = 101 => "cr13", Cr14 = 102 => "cr14", Cr15 = 103 => "cr15",

    Dr0 = 104 => "dr0", Dr1 = 105 => "dr1", Dr2 = 106 => "dr2", Dr3 = 107 => "dr3",
    Dr4 = 108 => "dr4", Dr5 = 109 => "dr5", Dr6 = 110 => "dr6", Dr7 = 111 => "dr7",
    Dr8 = 112 => "dr8", Dr9 = 113 => "dr9", Dr10 = 114 => "dr10", Dr11 = 115 => "dr11",
    Dr12 = 116 => "dr12", Dr13 = 117 => "dr13", Dr14 = 118 => "dr14", Dr15 = 119 => "dr15",

    Mm0 = 120 => "mm0", Mm1 = 121 => "mm1", Mm2 = 122 => "mm2", Mm3 = 123 => "mm3",
    Mm4 = 124 => "mm4", Mm5 = 125 => "mm5", Mm6 = 126 => "mm6", Mm7 = 127 => "mm7",

    Xmm0 = 128 => "xmm0", Xmm1 = 129 => "xmm1", Xmm2 = 130 => "xmm2", Xmm3 = 131 => "xmm3",
    Xmm4 = 132 => "xmm4", Xmm5 = 133 => "xmm5", Xmm6 = 134 => "xmm6", Xmm7 = 135 => "xmm7",
    Xmm8 = 136 => "xmm8", Xmm9 = 137 => "xmm9", Xmm10 = 138 => "xmm10", Xmm11 = 139 => "xmm11",
    Xmm12 = 140 => "xmm12", Xmm13 = 141 => "xmm13", Xmm14 = 142 => "xmm14", Xmm15 = 143 => "xmm15",
    Xmm16 = 144 => "xmm16", Xmm17 = 145 => "xmm17", Xmm18 = 146 => "xmm18", Xmm19 = 147 => "xmm19",
    Xmm20 = 148 => "xmm20", Xmm21 = 149 => "xmm21", Xmm22 = 150 => "xmm22", Xmm23 = 151 => "xmm23",
    Xmm24 = 152 => "xmm24", Xmm25 = 153 => "xmm25", Xmm26 = 154 => "xmm26", Xmm27 = 155 => "xmm27",
    Xmm28 = 156 => "xmm28", Xmm29 = 157 => "xmm29", Xmm30 = 158 => "xmm30", Xmm31 = 159 => "xmm31",

    Ymm0 = 160 => "ymm0", Ymm1 = 161 => "ymm1", Ymm2 = 162 => "ymm2", Ymm3 = 163 => "ymm3",
    Ymm4 = 164 => "ymm4", Ymm5 = 165 => "ymm5", Ymm6 = 166 => "ymm6", Ymm7 = 167 => "ymm7",
    Ymm8 = 168 => "ymm8", Ymm9 = 169 => "ymm9", Ymm10 = 170 => "ymm10", Ymm11 = 171 => "ymm11",
    Ymm12 = 172 => "ymm12", Ymm13 = 173 => "ymm13", Ymm14 = 174 => "ymm14", Ymm15 = 175 => "ymm15",
    Ymm16 = 176 => "ymm16", Ymm17 = 177 => "ymm17", Ymm18 = 178 => "ymm18", Ymm19 = 179 => "ymm19",
    Ymm20 = 180 => "ymm20", Ymm21 = 181 => "ymm21", Ymm22 = 182 => "ymm22", Ymm23 = 183 => "ymm23",
    Ymm24 = 184 => "ymm24", Ymm25 = 185 => "ymm25", Ymm26 = 186 => "ymm26", Ymm27 = 187 => "ymm27",
    Ymm28 = 188 => "ymm28", Ymm29 = 189 => "ymm29", Ymm30 = 190 => "ymm30", Ymm31 = 191 => "ymm31",

    Zmm0 = 192 => "zmm0", Zmm1 = 193 => "zmm1", Zmm2 = 194 => "zmm2", Zmm3 = 195 => "zmm3",
    Zmm4 = 196 => "zmm4", Zmm5 = 197 => "zmm5", Zmm6 = 198 => "zmm6", Zmm7 = 199 => "zmm7",
    Zmm8 = 200 => "zmm8", Zmm9 = 201 => "zmm9", Zmm10 = 202 => "zmm10", Zmm11 = 203 => "zmm11",
    Zmm12 = 204 => "zmm12", Zmm13 = 205 => "zmm13", Zmm14 = 206 => "zmm14", Zmm15 = 207 => "zmm15",
    Zmm16 = 208 => "zmm16", Zmm17 = 209 => "zmm17", Zmm18 = 210 => "zmm18", Zmm19 = 211 => "zmm19",
    Zmm20 = 212 => "zmm20", Zmm21 = 213 => "zmm21", Zmm22 = 214 => "zmm22", Zmm23 = 215 => "zmm23",
    Zmm24 = 216 => "zmm24", Zmm25 = 217 => "zmm25", Zmm26 = 218 => "zmm26", Zmm27 = 219 => "zmm27",
    Zmm28 = 220 => "zmm28", Zmm29 = 221 => "zmm29", Zmm30 = 222 => "zmm30", Zmm31 = 223 => "zmm31",

    K0 = 224 => "k0", K1 = 225 => "k1", K2 = 226 => "k2", K3 = 227 => "k3",
    K4 = 228 => "k4", K5 = 229 => "k5", K6 = 230 => "k6", K7 = 231 => "k7",

    St0 = 232 => "st(0)", St1 = 233 => "st(1)", St2 = 234 => "st(2)", St3 = 235 => "st(3)",
    St4 = 236 => "st(4)", St5 = 237 => "st(5)", St6 = 238 => "st(6)", St7 = 239 => "st(7)",

    // byte registers reachable only with a REX prefix present
    Spl = 244 => "spl", Bpl = 245 => "bpl", Sil = 246 => "sil", Dil = 247 => "dil",
}

impl Register {
    /// The `n`th register of the family starting at `base`.
    ///
    /// Falls back to `Register::None` when `base + n` isn't a register, which only
    /// happens when a caller mixes families.
    pub const fn offset(base: Register, n: u8) -> Register {
        match Self::from_repr((base as u8).wrapping_add(n)) {
            Some(reg) => reg,
            None => Register::None,
        }
    }

    /// General purpose register by width in bytes (1, 2, 4, 8) and encoding number (0..16).
    ///
    /// `rex` selects the uniform byte registers (`spl`..`dil`) over `ah`..`bh`.
    pub const fn gpr(width: u8, n: u8, rex: bool) -> Register {
        let n = n & 0b1111;
        if n >= 8 {
            let base = match width {
                1 => Register::R8b,
                2 => Register::R8w,
                4 => Register::R8d,
                _ => Register::R8,
            };
            return Register::offset(base, n - 8);
        }

        match width {
            1 if rex && n >= 4 => Register::offset(Register::Spl, n - 4),
            1 => Register::offset(Register::Al, n),
            2 => Register::offset(Register::Ax, n),
            4 => Register::offset(Register::Eax, n),
            _ => Register::offset(Register::Rax, n),
        }
    }

    /// Instruction pointer of the given address width.
    pub const fn ip(width: u8) -> Register {
        match width {
            2 => Register::Ip,
            4 => Register::Eip,
            _ => Register::Rip,
        }
    }

    pub const fn is_gpr(self) -> bool {
        let value = self as u8;
        (value >= Register::Al as u8 && value <= Register::R15d as u8)
            || (value >= Register::Spl as u8 && value <= Register::Dil as u8)
    }

    pub const fn is_segment(self) -> bool {
        let value = self as u8;
        value >= Register::Es as u8 && value <= Register::Gs as u8
    }

    /// Width in bytes of a general purpose register, zero otherwise.
    pub const fn width(self) -> u8 {
        match self as u8 {
            16..=23 | 56..=63 | 244..=247 => 1,
            24..=31 | 64..=71 | 8 => 2,
            32..=39 | 72..=79 | 9 => 4,
            40..=55 | 10 => 8,
            _ => 0,
        }
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
