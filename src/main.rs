use std::io::IsTerminal;

use args::{Action, ARGS};
use config::CONFIG;
use processor::Processor;
use tokenizing::Token;
use x86::ldisasm::lengths;
use x86::{DecoderFlags, FormatterFlags, LdisasmFlags, Mode};

macro_rules! exit {
    ($code:expr => $($arg:tt)*) => {{
        eprintln!($($arg)*);
        std::process::exit($code);
    }};
}

fn mode() -> Mode {
    ARGS.mode.and_then(Mode::from_bits).unwrap_or(CONFIG.mode)
}

fn formatter_flags() -> FormatterFlags {
    let mut flags = CONFIG.formatter_flags();
    if ARGS.att {
        flags |= FormatterFlags::ATT_SYNTAX;
    }
    flags
}

fn ldisasm_flags(flags: DecoderFlags) -> LdisasmFlags {
    let mut ldisasm = LdisasmFlags::empty();
    ldisasm.set(LdisasmFlags::VALIDITY_CHECK, flags.contains(DecoderFlags::VALIDITY_CHECK));
    ldisasm.set(LdisasmFlags::VEX, flags.contains(DecoderFlags::VEX));
    ldisasm.set(LdisasmFlags::THREE_DNOW, flags.contains(DecoderFlags::THREE_DNOW));
    ldisasm
}

fn hex(text: &str) -> Vec<u8> {
    match decoder::decode_hex(text) {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => exit!(1 => "'{text}' isn't a sequence of hex encoded bytes."),
    }
}

fn print_tokens(tokens: &[Token], colored: bool) {
    let line: String = if colored {
        tokens.iter().map(Token::ansi).collect()
    } else {
        tokens.iter().map(|token| &*token.text).collect()
    };

    println!("{line}");
}

fn listing(processor: &Processor) {
    let colored = std::io::stdout().is_terminal();
    let flags = formatter_flags();

    for block in processor.blocks(CONFIG.bytes) {
        print_tokens(&block.tokens(flags), colored);
    }

    log::notify!(
        "[main] decoded {} instructions, {} errors.",
        processor.instruction_count(),
        processor.error_count()
    );
}

fn main() {
    let flags = CONFIG.decoder_flags();
    let mode = mode();

    match &ARGS.action {
        Action::Disassemble(path) => match Processor::parse(path, flags) {
            Ok(processor) => listing(&processor),
            Err(err) => exit!(1 => "{err}"),
        },
        Action::Hex(text) => {
            let processor = Processor::from_bytes(hex(text), 0, mode, flags);
            listing(&processor);
        }
        Action::Lengths(text) => {
            let bytes = hex(text);
            for (offset, len) in lengths(&bytes, mode, ldisasm_flags(flags)) {
                match len {
                    Some(len) => {
                        let encoded = decoder::encode_hex_bytes(&bytes[offset..][..len]);
                        println!("{offset:0>6X}  {len:>2}  {}", encoded.trim_end());
                    }
                    None => println!("{offset:0>6X}  (bad)"),
                }
            }
        }
        Action::Assemble(text) => match x86::assemble(text, mode, 0) {
            Ok(bytes) => println!("{}", decoder::encode_hex_bytes(&bytes).trim_end()),
            Err(err) => exit!(1 => "Failed to assemble '{text}': {err}."),
        },
    }

    if ARGS.debug {
        eprint!("{}", log::LOGGER.lock().unwrap().format());
    }
}
