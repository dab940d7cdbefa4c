use once_cell::sync::Lazy;
use std::path::PathBuf;

macro_rules! exit {
    ($code:expr => $($arg:tt)*) => {{
        eprintln!($($arg)*);
        std::process::exit($code);
    }};
}

const HELP: &str = "OVERVIEW: x86 decoder, length disassembler and assembler

USAGE: opwalk [options] <INPUT>

OPTIONS:
  -H, --help          Print usage information
  -D, --disassemble   Path to object you're disassembling
  -X, --hex           Hex encoded bytes to decode
  -L, --lengths       Hex encoded bytes to split into instructions
  -A, --assemble      Instructions to assemble, separated by ';'
  -M, --mode          Processor mode: 16, 32 or 64
  -T, --att           Print AT&T syntax
  -B, --debug         Print the log when exiting";

const ABBRV: &[&str] = &["-H", "-D", "-X", "-L", "-A", "-M", "-T", "-B"];
const NAMES: &[&str] = &[
    "--help",
    "--disassemble",
    "--hex",
    "--lengths",
    "--assemble",
    "--mode",
    "--att",
    "--debug",
];

pub static ARGS: Lazy<Cli> = Lazy::new(|| match Cli::parse(std::env::args().skip(1)) {
    Ok(cli) => cli,
    Err(Exit::Help) => exit!(0 => "{HELP}"),
    Err(Exit::Usage(msg)) => exit!(1 => "{msg}"),
});

/// What to do with the input.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Action {
    /// Walk the code sections of an object file.
    Disassemble(PathBuf),
    /// Decode hex encoded bytes.
    Hex(String),
    /// Only split hex encoded bytes into instructions.
    Lengths(String),
    Assemble(String),
}

#[derive(Debug, Clone)]
pub struct Cli {
    pub action: Action,

    /// Processor mode in bits, the config's mode when not given.
    pub mode: Option<u32>,

    /// Print AT&T syntax instead of Intel.
    pub att: bool,

    /// Dump the log before exiting.
    pub debug: bool,
}

/// Reasons to stop before doing anything.
#[derive(Debug, PartialEq, Eq)]
pub enum Exit {
    Help,
    Usage(String),
}

impl Cli {
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self, Exit> {
        let mut action = None;
        let mut mode = None;
        let mut att = false;
        let mut debug = false;

        let mut args = args.into_iter().peekable();
        if args.peek().is_none() {
            return Err(Exit::Help);
        }

        while let Some(arg) = args.next() {
            let mut value = || match args.next() {
                Some(value)
                    if !NAMES.contains(&value.as_str()) && !ABBRV.contains(&value.as_str()) =>
                {
                    Ok(value)
                }
                _ => Err(Exit::Usage(format!("Missing value for '{arg}'."))),
            };

            let next = match arg.as_str() {
                "-H" | "--help" => return Err(Exit::Help),
                "-D" | "--disassemble" => Action::Disassemble(PathBuf::from(value()?)),
                "-X" | "--hex" => Action::Hex(value()?),
                "-L" | "--lengths" => Action::Lengths(value()?),
                "-A" | "--assemble" => Action::Assemble(value()?),
                "-M" | "--mode" => {
                    let bits = value()?;
                    match bits.parse::<u32>() {
                        Ok(bits @ (16 | 32 | 64)) => mode = Some(bits),
                        _ => {
                            let msg = format!("Invalid mode '{bits}', expected 16, 32 or 64.");
                            return Err(Exit::Usage(msg));
                        }
                    }
                    continue;
                }
                "-T" | "--att" => {
                    att = true;
                    continue;
                }
                "-B" | "--debug" => {
                    debug = true;
                    continue;
                }
                unknown => return Err(Exit::Usage(unknown_arg(unknown))),
            };

            if action.replace(next).is_some() {
                return Err(Exit::Usage(format!("Invalid combination of arguments.\n\n{HELP}")));
            }
        }

        match action {
            Some(action) => Ok(Self {
                action,
                mode,
                att,
                debug,
            }),
            None => Err(Exit::Usage(format!("Missing input.\n\n{HELP}"))),
        }
    }
}

fn unknown_arg(unknown: &str) -> String {
    let mut distance = u32::MAX;
    let mut best_guess = "";
    for name in NAMES {
        let d = triple_accel::levenshtein_exp(unknown.as_bytes(), name.as_bytes());
        if d < distance {
            distance = d;
            best_guess = name;
        }
    }

    // A guess that's less than 3 `steps` away from a correct arg.
    if distance < 4 {
        format!("Unknown cmd arg '{unknown}' did you mean '{best_guess}'?")
    } else {
        format!("Unknown cmd arg '{unknown}' was entered.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, Exit> {
        Cli::parse(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn actions() {
        let cli = parse(&["-X", "90 c3", "--mode", "32", "-T"]).unwrap();
        assert_eq!(cli.action, Action::Hex("90 c3".to_string()));
        assert_eq!(cli.mode, Some(32));
        assert!(cli.att);

        let cli = parse(&["--disassemble", "/bin/ls", "-B"]).unwrap();
        assert_eq!(cli.action, Action::Disassemble(PathBuf::from("/bin/ls")));
        assert!(cli.debug);
        assert_eq!(cli.mode, None);
    }

    #[test]
    fn usage_errors() {
        assert_eq!(parse(&[]).unwrap_err(), Exit::Help);
        assert_eq!(parse(&["-H"]).unwrap_err(), Exit::Help);
        assert!(matches!(parse(&["-X"]), Err(Exit::Usage(_))));
        assert!(matches!(parse(&["-X", "-T"]), Err(Exit::Usage(_))));
        assert!(matches!(parse(&["-M", "48", "-X", "90"]), Err(Exit::Usage(_))));
        assert!(matches!(parse(&["-X", "90", "-A", "nop"]), Err(Exit::Usage(_))));
        assert!(matches!(parse(&["-T"]), Err(Exit::Usage(_))));
    }

    #[test]
    fn suggestions() {
        assert_eq!(unknown_arg("--hx"), "Unknown cmd arg '--hx' did you mean '--hex'?");
        assert_eq!(unknown_arg("--frobnicate"), "Unknown cmd arg '--frobnicate' was entered.");
    }
}
