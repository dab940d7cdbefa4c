/// ```text
/// <listing>  = <section-start> <real>*
/// <real>     = <instruction> | <error>
/// ```

use decoder::{encode_hex_bytes_truncated, ToTokens, TokenStream};
use tokenizing::{colors, ColorScheme, Colors, Token};
use x86::{Formatter, FormatterFlags, MAX_LENGTH};

use crate::{Processor, Section};

/// Width of the raw bytes column.
const BYTES_WIDTH: usize = MAX_LENGTH * 3 + 1;

#[derive(Debug)]
pub enum Block<'a> {
    SectionStart {
        section: &'a Section,
    },
    Instruction {
        addr: u64,
        inst: &'a x86::Instruction,
        bytes: String,
    },
    Error {
        addr: u64,
        err: decoder::ErrorKind,
        bytes: String,
    },
}

impl Block<'_> {
    pub fn tokenize(&self, stream: &mut TokenStream, flags: FormatterFlags) {
        match self {
            Self::SectionStart { section } => {
                stream.push("section", &colors::WHITE);
                stream.push_owned(format!(" {} ", section.name), &colors::BLUE);
                stream.push_owned(format!("{:x}", section.addr), &colors::GREEN);
                stream.push("-", Colors::expr());
                stream.push_owned(format!("{:x}", section.end()), &colors::GREEN);
            }
            Self::Instruction { addr, inst, bytes } => {
                stream.push_owned(format!("{addr:0>10X}  "), Colors::comment());
                stream.push_owned(bytes.clone(), &colors::GREEN);
                Formatter::new(inst, flags - FormatterFlags::BYTES, *addr).tokenize(stream);
            }
            Self::Error { addr, err, bytes } => {
                stream.push_owned(format!("{addr:0>10X}  "), Colors::comment());
                stream.push_owned(bytes.clone(), &colors::GREEN);
                stream.push("<", Colors::comment());
                stream.push_owned(format!("{err:?}"), Colors::special());
                stream.push(">", Colors::comment());
            }
        }
    }

    pub fn tokens(&self, flags: FormatterFlags) -> Vec<Token<'static>> {
        let mut stream = TokenStream::new();
        self.tokenize(&mut stream, flags);
        stream.into_tokens()
    }
}

impl Processor {
    /// Every section's header followed by its instructions and errors in address order.
    pub fn blocks(&self, show_bytes: bool) -> Vec<Block<'_>> {
        let mut blocks = Vec::new();

        for section in self.sections() {
            blocks.push(Block::SectionStart { section });

            let mut addr = section.addr;
            while addr < section.end() {
                let bytes = |len: usize| {
                    if show_bytes {
                        encode_hex_bytes_truncated(section.bytes_by_addr(addr, len), BYTES_WIDTH)
                    } else {
                        String::new()
                    }
                };

                if let Some(inst) = section.instruction_by_addr(addr) {
                    let len = inst.length as usize;
                    blocks.push(Block::Instruction {
                        addr,
                        inst,
                        bytes: bytes(len),
                    });
                    addr += len as u64;
                    continue;
                }

                match section.error_by_addr(addr) {
                    Some(err) => {
                        let len = err.size().max(1);
                        blocks.push(Block::Error {
                            addr,
                            err: err.kind,
                            bytes: bytes(len),
                        });
                        addr += len as u64;
                    }
                    // the walk covers every byte, this can't be reached
                    None => addr += 1,
                }
            }
        }

        blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use x86::{DecoderFlags, Mode};

    fn text(block: &Block, flags: FormatterFlags) -> String {
        let mut stream = TokenStream::new();
        block.tokenize(&mut stream, flags);
        stream.to_string()
    }

    #[test]
    fn listing() {
        // call 0x1005; (bad)
        let code = vec![0xe8, 0x00, 0x00, 0x00, 0x00, 0x06];
        let processor = Processor::from_bytes(code, 0x1000, Mode::Bits64, DecoderFlags::ALL);
        let blocks = processor.blocks(false);

        assert_eq!(blocks.len(), 3);
        assert_eq!(text(&blocks[0], FormatterFlags::DEFAULT), "section flat (generated) 1000-1006");
        assert_eq!(text(&blocks[1], FormatterFlags::DEFAULT), "0000001000  call 1005h");
        assert_eq!(text(&blocks[2], FormatterFlags::DEFAULT), "0000001005  <InvalidOpcode>");
    }

    #[test]
    fn raw_bytes() {
        let processor = Processor::from_bytes(vec![0x90], 0, Mode::Bits32, DecoderFlags::ALL);
        let blocks = processor.blocks(true);
        let expected = format!("0000000000  {:<46}nop", "90 ");
        assert_eq!(text(&blocks[1], FormatterFlags::DEFAULT), expected);
    }
}
