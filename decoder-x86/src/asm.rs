//! Assembler for a small subset of instructions.
//!
//! Covers instructions without operands, `push`/`pop`/`inc`/`dec` on general
//! purpose registers, `push imm`, `int imm` and direct branches. Anything else
//! can be spelled out with `emit`.

use decoder::{Error, ErrorKind};

use crate::instruction::Mode;
use crate::mnemonic::JCC;
use crate::register::Register;

/// Instructions without operands encoded as a single opcode byte.
///
/// The flag tells whether the opcode still exists in long mode.
const ONE_BYTE: [(&str, u8, bool); 32] = [
    ("int3", 0xcc, true),
    ("nop", 0x90, true),
    ("ret", 0xc3, true),
    ("retf", 0xcb, true),
    ("leave", 0xc9, true),
    ("int1", 0xf1, true),
    ("daa", 0x27, false),
    ("das", 0x2f, false),
    ("aaa", 0x37, false),
    ("aas", 0x3f, false),
    ("xlat", 0xd7, true),
    ("fwait", 0x9b, true),
    ("wait", 0x9b, true),
    ("hlt", 0xf4, true),
    ("cmc", 0xf5, true),
    ("sahf", 0x9e, true),
    ("lahf", 0x9f, true),
    ("into", 0xce, false),
    ("salc", 0xd6, false),
    ("clc", 0xf8, true),
    ("stc", 0xf9, true),
    ("cli", 0xfa, true),
    ("sti", 0xfb, true),
    ("cld", 0xfc, true),
    ("std", 0xfd, true),
    ("movsb", 0xa4, true),
    ("cmpsb", 0xa6, true),
    ("stosb", 0xaa, true),
    ("lodsb", 0xac, true),
    ("scasb", 0xae, true),
    ("insb", 0x6c, true),
    ("outsb", 0x6e, true),
];

/// Instructions without operands encoded as `0F` and one more byte.
const TWO_BYTE: [(&str, u8); 17] = [
    ("syscall", 0x05),
    ("clts", 0x06),
    ("sysret", 0x07),
    ("invd", 0x08),
    ("wbinvd", 0x09),
    ("ud2", 0x0b),
    ("femms", 0x0e),
    ("wrmsr", 0x30),
    ("rdtsc", 0x31),
    ("rdmsr", 0x32),
    ("rdpmc", 0x33),
    ("sysenter", 0x34),
    ("sysexit", 0x35),
    ("getsec", 0x37),
    ("emms", 0x77),
    ("cpuid", 0xa2),
    ("rsm", 0xaa),
];

/// How an instruction's operand size gets selected.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Form {
    /// `66` for 16-bit, `REX.W` for 64-bit.
    Sized,
    /// Stack operations default to 64-bit in long mode and have no 32-bit form there.
    Stack,
    /// Doesn't exist in long mode.
    Legacy,
}

/// Mnemonics naming one operand size of the same opcode.
const SIZED: [(&str, u8, u8, Form); 34] = [
    ("pushf", 0x9c, 2, Form::Stack),
    ("pushfd", 0x9c, 4, Form::Stack),
    ("pushfq", 0x9c, 8, Form::Stack),
    ("popf", 0x9d, 2, Form::Stack),
    ("popfd", 0x9d, 4, Form::Stack),
    ("popfq", 0x9d, 8, Form::Stack),
    ("pusha", 0x60, 2, Form::Legacy),
    ("pushad", 0x60, 4, Form::Legacy),
    ("popa", 0x61, 2, Form::Legacy),
    ("popad", 0x61, 4, Form::Legacy),
    ("cbw", 0x98, 2, Form::Sized),
    ("cwde", 0x98, 4, Form::Sized),
    ("cdqe", 0x98, 8, Form::Sized),
    ("cwd", 0x99, 2, Form::Sized),
    ("cdq", 0x99, 4, Form::Sized),
    ("cqo", 0x99, 8, Form::Sized),
    ("iret", 0xcf, 2, Form::Sized),
    ("iretd", 0xcf, 4, Form::Sized),
    ("iretq", 0xcf, 8, Form::Sized),
    ("movsw", 0xa5, 2, Form::Sized),
    ("movsd", 0xa5, 4, Form::Sized),
    ("movsq", 0xa5, 8, Form::Sized),
    ("cmpsw", 0xa7, 2, Form::Sized),
    ("cmpsd", 0xa7, 4, Form::Sized),
    ("cmpsq", 0xa7, 8, Form::Sized),
    ("stosw", 0xab, 2, Form::Sized),
    ("stosd", 0xab, 4, Form::Sized),
    ("stosq", 0xab, 8, Form::Sized),
    ("lodsw", 0xad, 2, Form::Sized),
    ("lodsd", 0xad, 4, Form::Sized),
    ("lodsq", 0xad, 8, Form::Sized),
    ("scasw", 0xaf, 2, Form::Sized),
    ("scasd", 0xaf, 4, Form::Sized),
    ("scasq", 0xaf, 8, Form::Sized),
];

/// Condition code aliases on top of the names in [`JCC`].
const JCC_ALIASES: [(&str, u8); 14] = [
    ("jc", 0x2),
    ("jnae", 0x2),
    ("jnb", 0x3),
    ("jnc", 0x3),
    ("jz", 0x4),
    ("jnz", 0x5),
    ("jna", 0x6),
    ("jnbe", 0x7),
    ("jpe", 0xa),
    ("jpo", 0xb),
    ("jnge", 0xc),
    ("jnl", 0xd),
    ("jng", 0xe),
    ("jnle", 0xf),
];

const PREFIXES: [(&str, u8); 6] = [
    ("lock", 0xf0),
    ("rep", 0xf3),
    ("repe", 0xf3),
    ("repz", 0xf3),
    ("repne", 0xf2),
    ("repnz", 0xf2),
];

/// Assembles `text` into machine code.
///
/// Instructions are separated by `;` or newlines, the first one is placed at
/// `runtime_address` which is what branch targets are relative to. Numbers are
/// decimal unless they're prefixed by `0x`, suffixed by `h` or contain hex letters.
pub fn assemble(text: &str, mode: Mode, runtime_address: u64) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();

    for line in text.split([';', '\n']) {
        let line = normalise(line);
        if line.is_empty() {
            continue;
        }

        let mut asm = Assembler {
            mode,
            address: runtime_address.wrapping_add(bytes.len() as u64),
            out: Vec::with_capacity(crate::MAX_LENGTH),
        };

        asm.instruction(&line)
            .map_err(|kind| Error::new(kind, bytes.len()))?;
        bytes.extend_from_slice(&asm.out);
    }

    Ok(bytes)
}

/// Lowercase with single spaces, none around commas.
fn normalise(line: &str) -> String {
    line.to_ascii_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(" ,", ",")
        .replace(", ", ",")
}

struct Assembler {
    mode: Mode,
    address: u64,
    out: Vec<u8>,
}

impl Assembler {
    fn instruction(&mut self, line: &str) -> Result<(), ErrorKind> {
        let mut line = line;
        while let Some((word, rest)) = line.split_once(' ') {
            match PREFIXES.iter().find(|(name, _)| *name == word) {
                Some(&(_, byte)) => {
                    self.out.push(byte);
                    line = rest;
                }
                None => break,
            }
        }

        match line.split_once(' ') {
            Some(("emit", bytes)) => self.emit(bytes),
            Some((name, operand)) => self.unary(name, operand),
            None => self.nullary(line),
        }
    }

    fn emit(&mut self, bytes: &str) -> Result<(), ErrorKind> {
        for byte in bytes.split([' ', ',']).filter(|byte| !byte.is_empty()) {
            let value = parse_number(byte).ok_or(ErrorKind::InvalidOperand)?;
            let byte = u8::try_from(value).map_err(|_| ErrorKind::InvalidOperand)?;
            self.out.push(byte);
        }
        Ok(())
    }

    fn long_mode(&self) -> bool {
        self.mode == Mode::Bits64
    }

    /// Width the mode uses without any prefix, 2 or 4.
    fn default_width(&self) -> u8 {
        if self.mode == Mode::Bits16 {
            2
        } else {
            4
        }
    }

    fn nullary(&mut self, name: &str) -> Result<(), ErrorKind> {
        if name == "pause" {
            self.out.extend_from_slice(&[0xf3, 0x90]);
            return Ok(());
        }

        if let Some(&(_, op, long_mode)) = ONE_BYTE.iter().find(|(text, ..)| *text == name) {
            if self.long_mode() && !long_mode {
                return Err(ErrorKind::InvalidOpcode);
            }
            self.out.push(op);
            return Ok(());
        }

        if let Some(&(_, op)) = TWO_BYTE.iter().find(|(text, _)| *text == name) {
            self.out.extend_from_slice(&[0x0f, op]);
            return Ok(());
        }

        if let Some(&(_, op, width, form)) = SIZED.iter().find(|(text, ..)| *text == name) {
            self.sized(width, form)?;
            self.out.push(op);
            return Ok(());
        }

        Err(ErrorKind::InvalidOpcode)
    }

    /// Operand size prefixes selecting `width` for an opcode of the given form.
    fn sized(&mut self, width: u8, form: Form) -> Result<(), ErrorKind> {
        let prefix = match (self.long_mode(), form, width) {
            (true, Form::Legacy, _) | (true, Form::Stack, 4) => {
                return Err(ErrorKind::InvalidOpcode)
            }
            (true, Form::Stack, 8) => None,
            (true, Form::Sized, 8) => Some(0x48),
            (false, _, 8) => return Err(ErrorKind::InvalidOpcode),
            _ if width == self.default_width() => None,
            _ => Some(0x66),
        };

        self.out.extend(prefix);
        Ok(())
    }

    fn unary(&mut self, name: &str, operand: &str) -> Result<(), ErrorKind> {
        match name {
            "push" => self.push(operand),
            "pop" => self.pop(operand),
            "inc" | "dec" => {
                if self.long_mode() {
                    return Err(ErrorKind::InvalidOpcode);
                }
                let base = if name == "inc" { 0x40 } else { 0x48 };
                self.register(base, operand)
            }
            "int" => {
                let vector = parse_number(operand).ok_or(ErrorKind::InvalidOperand)?;
                let vector = u8::try_from(vector).map_err(|_| ErrorKind::InvalidOperand)?;
                self.out.extend_from_slice(&[0xcd, vector]);
                Ok(())
            }
            "jmp" => self.branch(operand, Some(0xeb), &[0xe9]),
            "call" => self.branch(operand, None, &[0xe8]),
            _ => match condition(name) {
                Some(cc) => self.branch(operand, Some(0x70 + cc), &[0x0f, 0x80 + cc]),
                None => Err(ErrorKind::InvalidOpcode),
            },
        }
    }

    fn push(&mut self, operand: &str) -> Result<(), ErrorKind> {
        match operand {
            "es" | "cs" | "ss" | "ds" if self.long_mode() => Err(ErrorKind::InvalidOperand),
            "es" => Ok(self.out.push(0x06)),
            "cs" => Ok(self.out.push(0x0e)),
            "ss" => Ok(self.out.push(0x16)),
            "ds" => Ok(self.out.push(0x1e)),
            "fs" => Ok(self.out.extend_from_slice(&[0x0f, 0xa0])),
            "gs" => Ok(self.out.extend_from_slice(&[0x0f, 0xa8])),
            _ if parse_register(operand).is_some() => self.register(0x50, operand),
            _ => {
                let imm = parse_number(operand).ok_or(ErrorKind::InvalidOperand)?;
                self.push_immediate(imm)
            }
        }
    }

    fn pop(&mut self, operand: &str) -> Result<(), ErrorKind> {
        match operand {
            "es" | "ss" | "ds" if self.long_mode() => Err(ErrorKind::InvalidOperand),
            "es" => Ok(self.out.push(0x07)),
            "ss" => Ok(self.out.push(0x17)),
            "ds" => Ok(self.out.push(0x1f)),
            "fs" => Ok(self.out.extend_from_slice(&[0x0f, 0xa1])),
            "gs" => Ok(self.out.extend_from_slice(&[0x0f, 0xa9])),
            _ => self.register(0x58, operand),
        }
    }

    fn push_immediate(&mut self, imm: i64) -> Result<(), ErrorKind> {
        if let Ok(imm) = i8::try_from(imm) {
            self.out.extend_from_slice(&[0x6a, imm as u8]);
            return Ok(());
        }

        if self.mode == Mode::Bits16 {
            if let Ok(imm) = i16::try_from(imm) {
                self.out.push(0x68);
                self.out.extend_from_slice(&imm.to_le_bytes());
                return Ok(());
            }
            self.out.push(0x66);
        }

        let imm = i32::try_from(imm).map_err(|_| ErrorKind::InvalidOperand)?;
        self.out.push(0x68);
        self.out.extend_from_slice(&imm.to_le_bytes());
        Ok(())
    }

    /// Opcode with a general purpose register in its low three bits.
    fn register(&mut self, base: u8, operand: &str) -> Result<(), ErrorKind> {
        let (width, n) = parse_register(operand).ok_or(ErrorKind::InvalidOperand)?;

        let native = match self.mode {
            Mode::Bits64 if base >= 0x50 => 8,
            _ => self.default_width(),
        };

        match width {
            w if w == native => {}
            2 => self.out.push(0x66),
            4 if !self.long_mode() => self.out.push(0x66),
            _ => return Err(ErrorKind::InvalidOperand),
        }

        if n >= 8 {
            if !self.long_mode() {
                return Err(ErrorKind::InvalidOperand);
            }
            self.out.push(0x41);
        }

        self.out.push(base + (n & 0b111));
        Ok(())
    }

    /// Relative branch to an absolute target, the short form is used when it reaches.
    fn branch(&mut self, target: &str, short: Option<u8>, near: &[u8]) -> Result<(), ErrorKind> {
        let target = parse_number(target).ok_or(ErrorKind::InvalidOperand)? as u64;
        let start = self.address.wrapping_add(self.out.len() as u64);
        let delta = |len: u64| {
            let next = start.wrapping_add(len);
            target.wrapping_sub(next) as i64
        };

        if let Some(op) = short {
            if let Ok(rel) = i8::try_from(self.truncate(delta(2))) {
                self.out.extend_from_slice(&[op, rel as u8]);
                return Ok(());
            }
        }

        self.out.extend_from_slice(near);
        let len = near.len() as u64;
        if self.mode == Mode::Bits16 {
            let rel = delta(len + 2) as i16;
            self.out.extend_from_slice(&rel.to_le_bytes());
        } else {
            let rel = i32::try_from(self.truncate(delta(len + 4)))
                .map_err(|_| ErrorKind::InvalidOperand)?;
            self.out.extend_from_slice(&rel.to_le_bytes());
        }
        Ok(())
    }

    /// Displacements wrap around the instruction pointer outside of long mode.
    fn truncate(&self, delta: i64) -> i64 {
        match self.mode {
            Mode::Bits16 => delta as i16 as i64,
            Mode::Bits32 => delta as i32 as i64,
            Mode::Bits64 => delta,
        }
    }
}

fn condition(name: &str) -> Option<u8> {
    if let Some(cc) = JCC.iter().position(|mnemonic| mnemonic.name() == name) {
        return Some(cc as u8);
    }

    JCC_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|&(_, cc)| cc)
}

/// Width in bytes and number of a 16, 32 or 64-bit general purpose register.
fn parse_register(name: &str) -> Option<(u8, u8)> {
    [2, 4, 8].into_iter().find_map(|width| {
        (0..16)
            .find(|&n| Register::gpr(width, n, false).name() == name)
            .map(|n| (width, n))
    })
}

/// Parses a number the way the formatter prints them.
///
/// A value in parentheses, as in `FFh(-1)`, takes precedence over what precedes it.
fn parse_number(text: &str) -> Option<i64> {
    if let Some((_, hint)) = text.split_once('(') {
        return parse_number(hint.strip_suffix(')')?);
    }

    let (negative, text) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let value = if let Some(hex) = text.strip_prefix("0x") {
        u64::from_str_radix(hex.strip_suffix('h').unwrap_or(hex), 16).ok()?
    } else if let Some(bin) = text.strip_prefix("0b").filter(|bin| is_binary(bin)) {
        u64::from_str_radix(bin, 2).ok()?
    } else if let Some(hex) = text.strip_suffix('h') {
        u64::from_str_radix(hex, 16).ok()?
    } else if text.bytes().all(|c| c.is_ascii_digit()) {
        text.parse::<u64>().ok()?
    } else {
        u64::from_str_radix(text, 16).ok()?
    };

    let value = value as i64;
    Some(if negative { value.wrapping_neg() } else { value })
}

/// `0b` is also a hex byte, it's only a prefix when binary digits follow.
fn is_binary(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|c| c == b'0' || c == b'1')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(parse_number("10"), Some(10));
        assert_eq!(parse_number("10h"), Some(0x10));
        assert_eq!(parse_number("0x1f"), Some(0x1f));
        assert_eq!(parse_number("ff"), Some(0xff));
        assert_eq!(parse_number("-8"), Some(-8));
        assert_eq!(parse_number("0b101"), Some(5));
        assert_eq!(parse_number("ffffffffh(-1)"), Some(-1));
        assert_eq!(parse_number("rax"), None);
    }

    #[test]
    fn registers() {
        assert_eq!(parse_register("ax"), Some((2, 0)));
        assert_eq!(parse_register("edi"), Some((4, 7)));
        assert_eq!(parse_register("r12"), Some((8, 12)));
        assert_eq!(parse_register("r9w"), Some((2, 9)));
        assert_eq!(parse_register("al"), None);
    }

    #[test]
    fn normalising() {
        assert_eq!(normalise("  PUSH   RAX "), "push rax");
        assert_eq!(normalise("emit 0x90 ,0xC3"), "emit 0x90,0xc3");
    }

    #[test]
    fn conditions() {
        assert_eq!(condition("je"), Some(4));
        assert_eq!(condition("jz"), Some(4));
        assert_eq!(condition("jg"), Some(0xf));
        assert_eq!(condition("jmp"), None);
    }
}
