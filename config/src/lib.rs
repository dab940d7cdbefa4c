use once_cell::sync::Lazy;

pub static CONFIG: Lazy<Config> = Lazy::new(Config::parse);

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use x86::{DecoderFlags, FormatterFlags, Mode};

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::mode", deserialize_with = "mode")]
    pub mode: Mode,
    /// Names of [`DecoderFlags`], e.g. `validity_check`.
    #[serde(default = "defaults::decoder")]
    pub decoder: Vec<String>,
    /// Names of [`FormatterFlags`], e.g. `pointer_size`.
    #[serde(default = "defaults::formatter")]
    pub formatter: Vec<String>,
    #[serde(default)]
    pub syntax: Syntax,
    /// Print the raw bytes next to each instruction.
    #[serde(default)]
    pub bytes: bool,
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Syntax {
    #[default]
    Intel,
    #[serde(alias = "at&t")]
    Att,
}

/// Default values when one is missing in the config.yaml.
mod defaults {
    use x86::Mode;

    pub fn config() -> super::Config {
        super::Config {
            mode: mode(),
            decoder: decoder(),
            formatter: formatter(),
            syntax: super::Syntax::Intel,
            bytes: false,
        }
    }

    pub fn mode() -> Mode {
        Mode::Bits64
    }

    pub fn decoder() -> Vec<String> {
        vec!["all".to_string()]
    }

    pub fn formatter() -> Vec<String> {
        vec!["default".to_string()]
    }
}

impl Default for Config {
    fn default() -> Self {
        defaults::config()
    }
}

impl Config {
    pub fn path() -> Option<PathBuf> {
        let mut dir = dirs::config_dir()?;
        dir.push("opwalk");
        dir.push("config.yaml");
        Some(dir)
    }

    pub fn parse() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("No config directory, using the default config.");
            return defaults::config();
        };

        match std::fs::read_to_string(&path) {
            Ok(raw) => Self::from_yaml(&raw),
            Err(_) => {
                log::trace!("No config at {}.", path.display());
                defaults::config()
            }
        }
    }

    pub fn from_yaml(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return defaults::config();
        }

        match serde_yaml::from_str(raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                log::warn!("Failed to parse config.\nError: {err}.");

                // parse everything as default
                defaults::config()
            }
        }
    }

    pub fn decoder_flags(&self) -> DecoderFlags {
        flags(&self.decoder, DecoderFlags::parse_name)
    }

    pub fn formatter_flags(&self) -> FormatterFlags {
        let mut flags = flags(&self.formatter, FormatterFlags::parse_name);
        flags.set(FormatterFlags::ATT_SYNTAX, self.syntax == Syntax::Att);
        flags.set(FormatterFlags::BYTES, self.bytes);
        flags
    }
}

/// Union of the named flags, names that don't exist are skipped.
fn flags<F, P>(names: &[String], parse: P) -> F
where
    F: Default + std::ops::BitOrAssign + Copy,
    P: Fn(&str) -> Option<F>,
{
    let mut flags = None;
    for name in names {
        match parse(name) {
            Some(flag) => *flags.get_or_insert_with(|| flag) |= flag,
            None => log::warn!("Unknown flag '{name}' in config."),
        }
    }

    flags.unwrap_or_default()
}

fn mode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Mode, D::Error> {
    struct ModeParsing;
    impl<'de> Visitor<'de> for ModeParsing {
        type Value = Mode;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("expected 16, 32 or 64")
        }

        fn visit_u64<E: de::Error>(self, bits: u64) -> Result<Self::Value, E> {
            u32::try_from(bits)
                .ok()
                .and_then(Mode::from_bits)
                .ok_or_else(|| E::custom(format!("{bits} isn't a processor mode")))
        }

        fn visit_i64<E: de::Error>(self, bits: i64) -> Result<Self::Value, E> {
            let bits = u64::try_from(bits).map_err(|_| E::custom("negative processor mode"))?;
            self.visit_u64(bits)
        }
    }

    deserializer.deserialize_u64(ModeParsing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::from_yaml("");
        assert_eq!(config.mode, Mode::Bits64);
        assert_eq!(config.decoder_flags(), DecoderFlags::ALL);
        assert_eq!(config.formatter_flags(), FormatterFlags::DEFAULT);
    }

    #[test]
    fn fields() {
        let config = Config::from_yaml(
            "mode: 32\n\
             decoder: [validity_check, vex, instruction_id, operands]\n\
             formatter: [hex, zero_x_prefix, pointer_size]\n\
             syntax: att\n\
             bytes: true\n",
        );

        assert_eq!(config.mode, Mode::Bits32);
        assert_eq!(
            config.decoder_flags(),
            DecoderFlags::VALIDITY_CHECK
                | DecoderFlags::VEX
                | DecoderFlags::INSTRUCTION_ID
                | DecoderFlags::OPERANDS
        );
        assert_eq!(
            config.formatter_flags(),
            FormatterFlags::HEX
                | FormatterFlags::ZERO_X_PREFIX
                | FormatterFlags::POINTER_SIZE
                | FormatterFlags::ATT_SYNTAX
                | FormatterFlags::BYTES
        );
    }

    #[test]
    fn unknown_names_are_skipped() {
        let config = Config::from_yaml("decoder: [vex, sparkles]");
        assert_eq!(config.decoder_flags(), DecoderFlags::VEX);
    }

    #[test]
    fn malformed() {
        let config = Config::from_yaml("mode: 48");
        assert_eq!(config.mode, Mode::Bits64);
        assert_eq!(config.syntax, Syntax::Intel);
    }
}
