//! Decodes the code sections of an object file.

mod blocks;
mod fmt;

pub use blocks::Block;

use decoder::Decodable;
use object::{Architecture, Object, ObjectSection, SectionKind};
use x86::{Decoder, DecoderFlags, Instruction, Mode};

use std::path::{Path, PathBuf};

pub enum Error {
    IO(std::io::Error),
    Object(object::Error),
    NotAnExecutable,
    DecompressionFailed(object::Error),
    UnknownArchitecture(object::Architecture),
}

/// Executable section and its decoded contents.
#[derive(Debug)]
pub struct Section {
    pub name: String,

    /// Virtual address of the first byte.
    pub addr: u64,

    pub bytes: Vec<u8>,

    /// Successfully decoded instructions, sorted by address.
    pub instructions: Vec<(u64, Instruction)>,

    /// Errors occurred in decoding instructions, sorted by address.
    pub errors: Vec<(u64, decoder::Error)>,
}

impl Section {
    /// Decodes `bytes` loaded at `addr` one instruction after the other.
    pub fn walk(name: String, addr: u64, bytes: Vec<u8>, decoder: &Decoder) -> Self {
        let mut reader = decoder::Reader::new(&bytes);
        let mut instructions = Vec::new();
        let mut errors = Vec::new();
        let mut ip = addr;

        loop {
            match decoder.decode(&mut reader) {
                Ok(instruction) => {
                    let width = instruction.length as u64;
                    instructions.push((ip, instruction));
                    ip += width;
                }
                Err(error) => {
                    if reader.is_empty()
                        && error.kind == decoder::ErrorKind::ExhaustedInput
                        && error.size() == 0
                    {
                        break;
                    }

                    let width = error.size().max(1) as u64;
                    errors.push((ip, error));
                    ip += width;
                }
            }

            if reader.is_empty() {
                break;
            }
        }

        Self {
            name,
            addr,
            bytes,
            instructions,
            errors,
        }
    }

    pub fn end(&self) -> u64 {
        self.addr + self.bytes.len() as u64
    }

    pub fn contains(&self, addr: u64) -> bool {
        (self.addr..self.end()).contains(&addr)
    }

    /// Up to `len` bytes starting at `addr`.
    pub fn bytes_by_addr(&self, addr: u64, len: usize) -> &[u8] {
        let Some(rva) = addr.checked_sub(self.addr) else {
            return &[];
        };

        let bytes = self.bytes.get(rva as usize..).unwrap_or_default();
        &bytes[..len.min(bytes.len())]
    }

    pub fn instruction_by_addr(&self, addr: u64) -> Option<&Instruction> {
        match self.instructions.binary_search_by(|k| k.0.cmp(&addr)) {
            Ok(idx) => Some(&self.instructions[idx].1),
            Err(..) => None,
        }
    }

    pub fn error_by_addr(&self, addr: u64) -> Option<&decoder::Error> {
        match self.errors.binary_search_by(|k| k.0.cmp(&addr)) {
            Ok(idx) => Some(&self.errors[idx].1),
            Err(..) => None,
        }
    }
}

/// Architecture agnostic view of an x86 object's code.
pub struct Processor {
    /// Where execution starts. Might be zero in case of libraries.
    pub entrypoint: u64,

    /// Where the binary is located.
    pub path: PathBuf,

    /// Mode the object's code runs in.
    pub mode: Mode,

    /// Code sections sorted by address.
    sections: Vec<Section>,
}

impl Processor {
    pub fn parse<P: AsRef<Path>>(path: P, flags: DecoderFlags) -> Result<Self, Error> {
        let file = std::fs::File::open(&path).map_err(Error::IO)?;
        // SAFETY: the mapping is read-only and dropped before this function returns
        let binary = unsafe { memmap2::Mmap::map(&file) }.map_err(Error::IO)?;
        let obj = object::File::parse(&binary[..]).map_err(Error::Object)?;
        let entrypoint = obj.entry();

        if entrypoint != 0 {
            log::notify!("[processor::parse] entrypoint {entrypoint:#X}.");
        }

        let path = path.as_ref().to_path_buf();
        let now = std::time::Instant::now();

        let mode = match obj.architecture() {
            Architecture::I386 => Mode::Bits32,
            Architecture::X86_64 | Architecture::X86_64_X32 => Mode::Bits64,
            arch => return Err(Error::UnknownArchitecture(arch)),
        };

        let decoder = Decoder::new(mode, flags);
        let mut sections = Vec::new();

        for section in obj.sections().filter(|s| s.kind() == SectionKind::Text) {
            let name = match section.name() {
                Ok(name) => name.to_string(),
                _ => "unnamed".to_string(),
            };

            let bytes = section.uncompressed_data().map_err(Error::DecompressionFailed)?;

            log::trace!(
                "[processor::parse] analyzing section {name} <{:x}..{:x}>.",
                section.address(),
                section.address() + bytes.len() as u64,
            );

            sections.push(Section::walk(name, section.address(), bytes.into_owned(), &decoder));
        }

        if sections.is_empty() {
            return Err(Error::NotAnExecutable);
        }

        sections.sort_unstable_by_key(|s| s.addr);

        log::notify!("[processor::parse] took {:#?} to parse {path:?}.", now.elapsed());

        Ok(Self {
            entrypoint,
            path,
            mode,
            sections,
        })
    }

    /// Wraps raw code loaded at `addr`, as if it were an object's only section.
    pub fn from_bytes(bytes: Vec<u8>, addr: u64, mode: Mode, flags: DecoderFlags) -> Self {
        let decoder = Decoder::new(mode, flags);
        let section = Section::walk("flat (generated)".to_string(), addr, bytes, &decoder);

        Self {
            entrypoint: addr,
            path: PathBuf::new(),
            mode,
            sections: vec![section],
        }
    }

    pub fn sections(&self) -> impl DoubleEndedIterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn section_name(&self, addr: u64) -> Option<&str> {
        self.sections.iter().find(|s| s.contains(addr)).map(|s| s.name.as_str())
    }

    pub fn instruction_count(&self) -> usize {
        self.sections.iter().map(|s| s.instructions.len()).sum()
    }

    pub fn error_count(&self) -> usize {
        self.sections.iter().map(|s| s.errors.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_flat_code() {
        // push rbp; mov rbp, rsp; (bad); ret
        let code = vec![0x55, 0x48, 0x89, 0xe5, 0x06, 0xc3];
        let processor = Processor::from_bytes(code, 0x1000, Mode::Bits64, DecoderFlags::ALL);
        let section = processor.sections().next().unwrap();

        let addrs: Vec<u64> = section.instructions.iter().map(|(addr, _)| *addr).collect();
        assert_eq!(addrs, [0x1000, 0x1001, 0x1005]);
        assert_eq!(section.errors.len(), 1);
        assert_eq!(section.errors[0].0, 0x1004);
        assert!(section.error_by_addr(0x1004).is_some());
        assert_eq!(section.instruction_by_addr(0x1001).map(|inst| inst.length), Some(3));
        assert_eq!(processor.section_name(0x1005), Some("flat (generated)"));
        assert_eq!(processor.section_name(0x1006), None);
    }

    #[test]
    fn truncated_tail() {
        // mov eax, imm32 cut short
        let processor =
            Processor::from_bytes(vec![0x90, 0xb8, 0x01], 0, Mode::Bits32, DecoderFlags::ALL);
        let section = processor.sections().next().unwrap();
        assert_eq!(section.instructions.len(), 1);
        assert_eq!(section.errors.len(), 1);
        assert_eq!(section.errors[0].1.kind, decoder::ErrorKind::ExhaustedInput);
        assert_eq!(processor.instruction_count() + processor.error_count(), 2);
    }

    #[test]
    fn missing_file() {
        let err = Processor::parse("/definitely/not/here", DecoderFlags::ALL).err().unwrap();
        assert!(matches!(err, Error::IO(_)));
    }
}
