//! Command line handling

pub mod flags;

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::error::{Result, UcliError};
use flags::{parse_flags, FlagMap};

const CONFIG_FLAG: &str = "--config";
const DEBUG_FLAG: &str = "--ucli-debug";

/// ucli - generic REST client driven by configuration
#[derive(Parser, Debug)]
#[command(name = "ucli")]
#[command(version)]
#[command(
    about = "Generic REST CLI - maps <operation> <resource>... [--flag value]... to HTTP requests",
    long_about = None
)]
pub struct Cli {
    /// Configuration file (default: ./configuration.yaml)
    #[arg(long, env = "UCLI_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print endpoint, headers and bodies while running
    #[arg(
        long = "ucli-debug",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub debug: bool,

    /// <operation> <resource>... [--flag [value]]...
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

impl Cli {
    /// Parse the process arguments.
    ///
    /// `--config` and `--ucli-debug` may appear anywhere, so they are moved in
    /// front of the operation before clap sees them.
    pub fn from_env() -> Result<Self> {
        let argv: Vec<String> = std::env::args_os()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        Self::from_tokens(argv)
    }

    pub fn from_tokens<I, T>(argv: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut argv = argv.into_iter().map(Into::<String>::into);
        let program = argv.next().unwrap_or_else(|| "ucli".to_string());
        let rest: Vec<String> = argv.collect();

        let hoisted = hoist_global_args(&rest)?;
        let tokens = std::iter::once(program)
            .chain(hoisted)
            .map(OsString::from);

        Ok(Self::parse_from(tokens))
    }
}

/// Move the global flags to the front, normalised to `--flag=value`.
///
/// A repeated flag overrides the earlier one. `--ucli-debug=<v>` is on only
/// for `true` or `1`, and an empty config path means the default lookup.
fn hoist_global_args(args: &[String]) -> Result<Vec<String>> {
    let mut config: Option<&str> = None;
    let mut debug: Option<bool> = None;
    let mut rest = Vec::new();
    let mut args = args.iter();

    while let Some(arg) = args.next() {
        if arg == CONFIG_FLAG {
            let path = args.next().ok_or(UcliError::MissingConfigValue)?;
            config = Some(path);
        } else if let Some(path) = arg.strip_prefix("--config=") {
            config = Some(path);
        } else if arg == DEBUG_FLAG {
            debug = Some(true);
        } else if let Some(value) = arg.strip_prefix("--ucli-debug=") {
            debug = Some(value == "true" || value == "1");
        } else {
            rest.push(arg.clone());
        }
    }

    let mut hoisted = Vec::with_capacity(rest.len() + 2);
    if let Some(path) = config.filter(|path| !path.is_empty()) {
        hoisted.push(format!("{}={}", CONFIG_FLAG, path));
    }
    if let Some(enabled) = debug {
        hoisted.push(format!("{}={}", DEBUG_FLAG, enabled));
    }
    hoisted.extend(rest);
    Ok(hoisted)
}

/// An operation verb with its resource path and flags
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub operation: String,
    pub resources: Vec<String>,
    pub flags: FlagMap,
}

impl Invocation {
    /// Split positional arguments into verb, resource path and flags.
    ///
    /// The first token starting with `-` ends the resource path.
    pub fn from_args(args: Vec<String>) -> Result<Self> {
        let mut args = args.into_iter();
        let operation = args.next().ok_or(UcliError::MissingOperation)?;

        let rest: Vec<String> = args.collect();
        let split = rest
            .iter()
            .position(|arg| arg.starts_with('-'))
            .unwrap_or(rest.len());
        let (resources, flag_tokens) = rest.split_at(split);

        Ok(Self {
            operation,
            resources: resources.to_vec(),
            flags: parse_flags(flag_tokens),
        })
    }
}
