//! Shared behaviour required between decoder crates.

use std::fmt::Debug;
use tokenizing::{Color, Token};

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Error {
    /// What kind of error happened in decoding an instruction.
    pub kind: ErrorKind,

    /// How many bytes in the stream did the invalid instruction consume.
    size: u8,
}

impl Error {
    pub fn new(kind: ErrorKind, size: usize) -> Self {
        Self {
            kind,
            size: size.min(u8::MAX as usize) as u8,
        }
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let msg = match self.kind {
            ErrorKind::InvalidOpcode => "invalid opcode",
            ErrorKind::InvalidOperand => "invalid operand",
            ErrorKind::InvalidPrefixes => "invalid prefixes",
            ErrorKind::InvalidRegister => "invalid register",
            ErrorKind::ExhaustedInput => "exhausted input",
            ErrorKind::TooLong => "instruction too long",
            ErrorKind::Unimplemented => "unimplemented encoding",
        };

        write!(f, "{msg} (after {} bytes)", self.size)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ErrorKind {
    /// Opcode in instruction is impossible/unknown.
    InvalidOpcode,

    /// Operand in instruction is impossible/unknown.
    InvalidOperand,

    /// Prefix in instruction is impossible/unknown.
    InvalidPrefixes,

    /// Register in instruction is impossible/unknown.
    InvalidRegister,

    /// There weren't any bytes left in the stream to decode.
    ExhaustedInput,

    /// Impossibly long instruction (x86/64 specific).
    TooLong,

    /// The encoding was recognised but isn't decoded.
    Unimplemented,
}

pub trait ToTokens {
    fn tokenize(&self, stream: &mut TokenStream);
}

pub trait Decoded: ToTokens {
    fn width(&self) -> usize;
    fn tokens(&self) -> Vec<Token<'static>> {
        let mut stream = TokenStream::new();
        self.tokenize(&mut stream);
        stream.into_tokens()
    }
}

pub trait Decodable {
    type Instruction: Decoded;

    fn decode(&self, reader: &mut Reader) -> Result<Self::Instruction, Error>;
    fn max_width(&self) -> usize;
}

#[derive(Debug, Default)]
pub struct TokenStream {
    inner: Vec<Token<'static>>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self {
            inner: Vec::with_capacity(25),
        }
    }

    pub fn push_token(&mut self, token: Token<'static>) {
        self.inner.push(token);
    }

    pub fn push(&mut self, text: &'static str, color: &'static Color) {
        self.push_token(Token::from_str(text, color));
    }

    pub fn push_owned(&mut self, text: String, color: &'static Color) {
        self.push_token(Token::from_string(text, color));
    }

    pub fn tokens(&self) -> &[Token<'static>] {
        &self.inner
    }

    pub fn into_tokens(self) -> Vec<Token<'static>> {
        self.inner
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl std::fmt::Display for TokenStream {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for token in self.inner.iter() {
            f.write_str(&token.text)?;
        }
        Ok(())
    }
}

/// Bounds checked cursor over a byte slice.
///
/// Every read either returns the requested bytes or nothing, the position never
/// moves past the end of the slice.
#[derive(Debug, Clone)]
pub struct Reader<'data> {
    data: &'data [u8],
    position: usize,
    mark: usize,
}

impl<'data> Reader<'data> {
    pub fn new(data: &'data [u8]) -> Self {
        Self {
            data,
            position: 0,
            mark: 0,
        }
    }

    #[inline]
    pub fn next(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.position)?;
        self.position += 1;
        Some(byte)
    }

    /// read `buf`-many items from this reader in bulk. if `Reader` cannot read `buf`-many items,
    /// nothing is consumed and `None` is returned.
    #[inline]
    pub fn next_n(&mut self, buf: &mut [u8]) -> Option<()> {
        let end = self.position.checked_add(buf.len())?;
        let src = self.data.get(self.position..end)?;
        buf.copy_from_slice(src);
        self.position = end;
        Some(())
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.position).copied()
    }

    /// look `n` bytes ahead of the current position without consuming anything.
    #[inline]
    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.data.get(self.position.checked_add(n)?).copied()
    }

    /// skip `n` bytes, failing without moving when fewer remain.
    #[inline]
    pub fn skip(&mut self, n: usize) -> Option<()> {
        if n > self.data.len() - self.position {
            return None;
        }
        self.position += n;
        Some(())
    }

    /// bytes that haven't been consumed yet.
    #[inline]
    pub fn remaining(&self) -> &'data [u8] {
        &self.data[self.position..]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.position == self.data.len()
    }

    /// mark the current position as where to measure `offset` against.
    #[inline]
    pub fn mark(&mut self) {
        self.mark = self.position;
    }

    /// the difference, between the current `Reader` position and its last `mark`.
    /// when created, a `Reader`'s initial position is `mark`ed, so creating a `Reader` and
    /// immediately calling `offset()` must return 0.
    #[inline]
    pub fn offset(&self) -> usize {
        self.position - self.mark
    }

    /// the difference, between the current `Reader` position and the initial offset
    /// when constructed.
    #[inline]
    pub fn total_offset(&self) -> usize {
        self.position
    }
}

const HEX_NUGGET: [u8; 16] = *b"0123456789abcdef";

/// Encode 64-bit number with a leading '0x' and in lowercase.
pub fn encode_hex(imm: i64) -> String {
    let mut buffer = String::with_capacity(19);
    let value = imm.unsigned_abs();

    if imm.is_negative() {
        buffer.push('-');
    }

    buffer.push_str("0x");

    if value == 0 {
        buffer.push('0');
        return buffer;
    }

    let len = value.ilog(16) as usize + 1;
    for idx in (0..len).rev() {
        let digit = (value >> (idx * 4)) & 0b1111;
        buffer.push(HEX_NUGGET[digit as usize] as char);
    }

    buffer
}

fn push_byte(buffer: &mut String, byte: u8) {
    buffer.push(HEX_NUGGET[(byte >> 4) as usize] as char);
    buffer.push(HEX_NUGGET[(byte & 0b1111) as usize] as char);
    buffer.push(' ');
}

/// Encode bytes as 2 digit hex numbers, each followed by a space.
pub fn encode_hex_bytes(bytes: &[u8]) -> String {
    let mut buffer = String::with_capacity(bytes.len() * 3);
    for &byte in bytes {
        push_byte(&mut buffer, byte);
    }
    buffer
}

/// Truncates string past the max width with a '..'.
pub fn encode_hex_bytes_truncated(bytes: &[u8], max_width: usize) -> String {
    let max_width = max_width.max(3);
    let pad = max_width.saturating_sub(bytes.len() * 3);
    let mut buffer = String::with_capacity(bytes.len() * 3 + pad);

    // truncation has to occur
    if bytes.len() * 3 > max_width {
        for &byte in &bytes[..max_width / 3 - 1] {
            push_byte(&mut buffer, byte);
        }

        buffer.push_str("..  ");
        return buffer;
    }

    for &byte in bytes {
        push_byte(&mut buffer, byte);
    }

    for _ in 0..pad {
        buffer.push(' ');
    }

    buffer
}

/// Parses a string of hex digits, ignoring whitespace and an optional '0x' per byte group.
pub fn decode_hex(text: &str) -> Option<Vec<u8>> {
    let digits: Vec<u8> = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(|group| group.trim_start_matches("0x").trim_start_matches("0X"))
        .flat_map(|group| group.bytes())
        .collect();

    if digits.len() % 2 != 0 {
        return None;
    }

    digits
        .chunks(2)
        .map(|pair| {
            let hi = (pair[0] as char).to_digit(16)?;
            let lo = (pair[1] as char).to_digit(16)?;
            Some((hi << 4 | lo) as u8)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_hex() {
        assert_eq!(super::encode_hex(0x123123), "0x123123");
        assert_eq!(super::encode_hex(-0x123123), "-0x123123");
        assert_eq!(super::encode_hex(-0x48848), "-0x48848");

        assert_eq!(super::encode_hex(0x0), "0x0");
        assert_eq!(super::encode_hex(-0x800000000000000), "-0x800000000000000");
        assert_eq!(super::encode_hex(0x7fffffffffffffff), "0x7fffffffffffffff");
        assert_eq!(super::encode_hex(i64::MIN), "-0x8000000000000000");
    }

    #[test]
    fn encode_hex_bytes() {
        assert_eq!(super::encode_hex_bytes(&[0x10, 0x12, 0x3]), "10 12 03 ");
        assert_eq!(super::encode_hex_bytes(&[0x10]), "10 ");
        assert_eq!(
            super::encode_hex_bytes(&[0xff, 0x1, 0x1, 0x1]),
            "ff 01 01 01 "
        );
    }

    #[test]
    fn encode_hex_bytes_truncted() {
        assert_eq!(
            super::encode_hex_bytes_truncated(&[0x10, 0x12, 0x3], 6),
            "10 ..  "
        );

        assert_eq!(
            super::encode_hex_bytes_truncated(&[0x10, 0x12, 0x3], 9),
            "10 12 03 "
        );

        assert_eq!(
            super::encode_hex_bytes_truncated(&[0x10, 0x12, 0x3], 10),
            "10 12 03  "
        );

        assert_eq!(
            super::encode_hex_bytes_truncated(&[0x10, 0x12, 0x3], 11),
            "10 12 03   "
        );
    }

    #[test]
    fn decode_hex() {
        assert_eq!(super::decode_hex("90"), Some(vec![0x90]));
        assert_eq!(super::decode_hex("0f 05"), Some(vec![0x0f, 0x05]));
        assert_eq!(super::decode_hex("0xb8,0x01"), Some(vec![0xb8, 0x01]));
        assert_eq!(super::decode_hex("c4e27d58c1").map(|b| b.len()), Some(5));
        assert_eq!(super::decode_hex("9"), None);
        assert_eq!(super::decode_hex("zz"), None);
    }

    #[test]
    fn reader_bounds() {
        let data = [1u8, 2, 3];
        let mut reader = Reader::new(&data);

        assert_eq!(reader.peek(), Some(1));
        assert_eq!(reader.next(), Some(1));

        let mut buf = [0u8; 4];
        assert_eq!(reader.next_n(&mut buf), None);
        assert_eq!(reader.total_offset(), 1, "failed bulk read must not move");

        let mut buf = [0u8; 2];
        assert_eq!(reader.next_n(&mut buf), Some(()));
        assert_eq!(buf, [2, 3]);
        assert!(reader.is_empty());
        assert_eq!(reader.next(), None);
        assert_eq!(reader.peek_at(0), None);
    }

    #[test]
    fn reader_mark() {
        let data = [0u8; 8];
        let mut reader = Reader::new(&data);

        assert_eq!(reader.offset(), 0);
        reader.skip(3).unwrap();
        reader.mark();
        reader.skip(2).unwrap();
        assert_eq!(reader.offset(), 2);
        assert_eq!(reader.total_offset(), 5);
        assert_eq!(reader.remaining().len(), 3);
        assert_eq!(reader.skip(4), None);
    }
}
