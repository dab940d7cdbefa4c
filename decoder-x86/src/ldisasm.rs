//! Length disassembler.

use bitflags::bitflags;

use crate::decode::parse;
use crate::instruction::Mode;
use crate::DecoderFlags;

bitflags! {
    #[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
    pub struct LdisasmFlags: u32 {
        const VALIDITY_CHECK = 1;
        const VEX = 2;
        const THREE_DNOW = 4;

        const MINIMAL = Self::VALIDITY_CHECK.bits() | Self::VEX.bits();
        const ALL = Self::MINIMAL.bits() | Self::THREE_DNOW.bits();
    }
}

impl Default for LdisasmFlags {
    fn default() -> Self {
        Self::MINIMAL
    }
}

impl From<LdisasmFlags> for DecoderFlags {
    fn from(flags: LdisasmFlags) -> Self {
        // EVEX is always detected so lengths agree with `decode(.., DecoderFlags::MINIMAL)`
        let mut decoder = DecoderFlags::EVEX;
        decoder.set(DecoderFlags::VALIDITY_CHECK, flags.contains(LdisasmFlags::VALIDITY_CHECK));
        decoder.set(DecoderFlags::VEX, flags.contains(LdisasmFlags::VEX));
        decoder.set(DecoderFlags::THREE_DNOW, flags.contains(LdisasmFlags::THREE_DNOW));
        decoder
    }
}

/// Length of the instruction at the start of `bytes`, `None` if it doesn't decode.
pub fn ldisasm(bytes: &[u8], mode: Mode, flags: LdisasmFlags) -> Option<usize> {
    parse(bytes, mode, flags.into()).ok().map(|inst| inst.length as usize)
}

/// Walks `bytes` instruction by instruction.
///
/// Yields the offset of every instruction with its length, or `None` when nothing
/// decodes there in which case the walk moves on by a single byte.
pub fn lengths(bytes: &[u8], mode: Mode, flags: LdisasmFlags) -> Lengths<'_> {
    Lengths {
        bytes,
        offset: 0,
        mode,
        flags,
    }
}

#[derive(Debug, Clone)]
pub struct Lengths<'data> {
    bytes: &'data [u8],
    offset: usize,
    mode: Mode,
    flags: LdisasmFlags,
}

impl Iterator for Lengths<'_> {
    type Item = (usize, Option<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        let remaining = self.bytes.get(self.offset..).filter(|rest| !rest.is_empty())?;
        let offset = self.offset;
        let len = ldisasm(remaining, self.mode, self.flags);

        self.offset += len.unwrap_or(1);
        Some((offset, len))
    }
}
