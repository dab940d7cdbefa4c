//! x86-16/32/64 instruction decoder, length disassembler, formatter and assembler.
//!
//! [`decode`] fully parses a single instruction and, depending on the [`DecoderFlags`],
//! annotates it with an instruction id, operands, a control-flow group and the
//! cpu flags it touches. [`ldisasm`] runs the same grammar without annotations and
//! only reports the length. Neither allocates or keeps any state between calls.

pub mod asm;
pub mod fmt;
pub mod instruction;
pub mod ldisasm;
pub mod mnemonic;
pub mod register;

mod cpu_flags;
mod decode;
mod group;
mod id;
mod immediate;
mod modrm;
mod operands;
mod prefix;
mod tests;
mod validity;

use bitflags::bitflags;
use decoder::{Decodable, Decoded, Error, ToTokens};

pub use asm::assemble;
pub use decode::decode;
pub use fmt::{format, Formatter, FormatterFlags};
pub use instruction::{Instruction, Mode, MAX_LENGTH};
pub use ldisasm::{ldisasm, LdisasmFlags};
pub use mnemonic::Mnemonic;
pub use register::Register;

bitflags! {
    #[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
    pub struct DecoderFlags: u32 {
        /// Reject encodings the architecture doesn't define.
        const VALIDITY_CHECK = 1;
        const INSTRUCTION_ID = 2;
        const CPU_FLAGS = 4;
        const OPERANDS = 8;
        const GROUP = 16;
        const VEX = 32;
        /// Detected only, decoding fails with [`decoder::ErrorKind::Unimplemented`].
        const EVEX = 64;
        const THREE_DNOW = 128;

        const MINIMAL = Self::VALIDITY_CHECK.bits() | Self::VEX.bits() | Self::EVEX.bits();
        const ALL = 0xff;
    }
}

impl Default for DecoderFlags {
    fn default() -> Self {
        Self::ALL
    }
}

impl DecoderFlags {
    /// Flag by the name used in configuration files, e.g. `validity_check`.
    pub fn parse_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        Self::from_name(&name)
    }
}

/// Decoder for one processor mode, usable through [`decoder::Decodable`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Decoder {
    pub mode: Mode,
    pub flags: DecoderFlags,
}

impl Decoder {
    pub fn new(mode: Mode, flags: DecoderFlags) -> Self {
        Self { mode, flags }
    }
}

impl Decodable for Decoder {
    type Instruction = Instruction;

    fn decode(&self, reader: &mut decoder::Reader) -> Result<Self::Instruction, Error> {
        let bytes = reader.remaining();
        if bytes.is_empty() {
            return Err(Error::new(decoder::ErrorKind::ExhaustedInput, 0));
        }

        match decode::decode(bytes, self.mode, self.flags) {
            Ok(inst) => {
                let _ = reader.skip(inst.length as usize);
                Ok(inst)
            }
            Err(err) => {
                let _ = reader.skip(err.size().max(1).min(bytes.len()));
                Err(err)
            }
        }
    }

    fn max_width(&self) -> usize {
        MAX_LENGTH
    }
}

impl ToTokens for Instruction {
    fn tokenize(&self, stream: &mut decoder::TokenStream) {
        Formatter::new(self, FormatterFlags::DEFAULT, 0).tokenize(stream);
    }
}

impl Decoded for Instruction {
    fn width(&self) -> usize {
        self.length as usize
    }
}
