use std::sync::Mutex;

use once_cell::sync::Lazy;
use tokenizing::colors;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Color {
    Green,
    Red,
    Gold,
    Gray,
}

impl Color {
    fn rgb(self) -> &'static tokenizing::Color {
        match self {
            Color::Green => &colors::GREEN,
            Color::Red => &colors::RED,
            Color::Gold => &colors::GOLD,
            Color::Gray => &colors::GRAY99,
        }
    }
}

#[macro_export]
macro_rules! notify {
    () => {};

    ($($arg:tt)*) => {{
        let mut logger = $crate::LOGGER.lock().unwrap();

        logger.append(
            format!(
                $($arg)*
            ),
            $crate::Color::Green,
        );
    }};
}

#[macro_export]
macro_rules! strong {
    () => {};

    ($($arg:tt)*) => {{
        let mut logger = $crate::LOGGER.lock().unwrap();

        logger.append(
            format!(
                $($arg)*
            ),
            $crate::Color::Red,
        );
    }};
}

#[macro_export]
macro_rules! warn {
    () => {};

    ($($arg:tt)*) => {{
        let mut logger = $crate::LOGGER.lock().unwrap();

        logger.append(
            format!(
                $($arg)*
            ),
            $crate::Color::Gold,
        );
    }};
}

#[macro_export]
macro_rules! trace {
    () => {};

    ($($arg:tt)*) => {{
        let mut logger = $crate::LOGGER.lock().unwrap();

        logger.append(
            format!(
                $($arg)*
            ),
            $crate::Color::Gray,
        );
    }};
}

pub static LOGGER: Lazy<Mutex<Logger<300>>> = Lazy::new(|| Mutex::new(Logger::new()));

/// Keeps the last `N` lines.
pub struct Logger<const N: usize> {
    lines: [(String, Color); N],
    head: usize,
    len: usize,
}

impl<const N: usize> Logger<N> {
    fn new() -> Self {
        Self {
            lines: std::array::from_fn(|_| (String::new(), Color::Gray)),
            head: 0,
            len: 0,
        }
    }

    pub fn append(&mut self, line: String, color: Color) {
        self.lines[self.head] = (line + "\n", color);
        self.head = (self.head + 1) % N;
        self.len += 1;
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn lines(&self) -> (&[(String, Color)], &[(String, Color)]) {
        if self.len < N {
            (&self.lines[0..self.len], &[])
        } else {
            // wrapped around, so we need to return two slices
            let (a, b) = self.lines.split_at(self.head);

            (b, a)
        }
    }

    /// Oldest to newest, without colours.
    pub fn text(&self) -> String {
        let (old, new) = self.lines();
        old.iter().chain(new).map(|(line, _)| line.as_str()).collect()
    }

    /// Oldest to newest, coloured for a terminal.
    pub fn format(&self) -> String {
        let (old, new) = self.lines();
        old.iter()
            .chain(new)
            .map(|(line, color)| tokenizing::ansi(line, color.rgb()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_around() {
        let mut logger = Logger::<3>::new();
        for n in 0..5 {
            logger.append(n.to_string(), Color::Gray);
        }
        assert_eq!(logger.text(), "2\n3\n4\n");

        logger.clear();
        assert!(logger.is_empty());
        assert_eq!(logger.text(), "");
    }

    #[test]
    fn colours() {
        let mut logger = Logger::<2>::new();
        logger.append("ok".to_string(), Color::Green);
        assert_eq!(logger.format(), "\x1b[38;2;2;237;110mok\n\x1b[0m");
    }
}
