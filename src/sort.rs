// src/sort.rs - The :sort ex command: flag parsing and line-wise execution

use crate::buffer::Buffer;
use crate::config::VimshimConfig;
use crate::lines;
use crate::ordering::{Radix, SortPolicy, numeric_key};
use regex::Regex;
use std::collections::HashSet;
use thiserror::Error;

/// Failures surfaced by command construction or execution.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Rejected before any buffer access; the caller can re-prompt.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// More than one radix flag was given.
    #[error("Conflicting flags: pick one of n, b, o, x")]
    ConflictingFlags,
    /// Wraps the underlying cause. The buffer is left in its pre-command
    /// state: the replace step is the sole mutation and runs last.
    #[error("{command} failed: {message}")]
    Execution {
        command: &'static str,
        message: String,
    },
}

/// Recognized option flags, one character each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortFlag {
    Reversed,
    Numeric,
    IgnoreCase,
    Binary,
    Octal,
    Hex,
    Unique,
}

impl SortFlag {
    fn from_token(token: &str) -> Option<SortFlag> {
        match token {
            "!" => Some(SortFlag::Reversed),
            "n" => Some(SortFlag::Numeric),
            "i" => Some(SortFlag::IgnoreCase),
            "b" => Some(SortFlag::Binary),
            "o" => Some(SortFlag::Octal),
            "x" => Some(SortFlag::Hex),
            "u" => Some(SortFlag::Unique),
            _ => None,
        }
    }
}

/// Immutable flag set for one sort invocation, built from user-supplied
/// option tokens and discarded after use.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortOptions {
    pub reversed: bool,
    pub numeric: bool,
    pub ignore_case: bool,
    pub binary: bool,
    pub octal: bool,
    pub hex: bool,
    pub unique: bool,
    /// Skip pattern: ordering keys come from the text after the first match.
    pub pattern: Option<String>,
}

impl SortOptions {
    /// Parse an ordered list of option tokens. Blank tokens are skipped, a
    /// `/pat/` token supplies the skip pattern, and everything else must be
    /// a flag from the fixed table. At most one radix flag may be given.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<SortOptions, CommandError> {
        let mut options = SortOptions::default();
        for token in tokens {
            let token = token.as_ref().trim();
            if token.is_empty() {
                continue;
            }
            if token.len() >= 2 && token.starts_with('/') && token.ends_with('/') {
                let pattern = &token[1..token.len() - 1];
                // An empty pattern means "reuse the last search pattern",
                // which this core has no access to.
                if !pattern.is_empty() {
                    options.pattern = Some(pattern.to_string());
                }
                continue;
            }
            match SortFlag::from_token(token) {
                Some(SortFlag::Reversed) => options.reversed = true,
                Some(SortFlag::Numeric) => options.numeric = true,
                Some(SortFlag::IgnoreCase) => options.ignore_case = true,
                Some(SortFlag::Binary) => options.binary = true,
                Some(SortFlag::Octal) => options.octal = true,
                Some(SortFlag::Hex) => options.hex = true,
                Some(SortFlag::Unique) => options.unique = true,
                None => return Err(CommandError::InvalidArgument(token.to_string())),
            }
        }

        let radix_flags = [options.numeric, options.binary, options.octal, options.hex];
        if radix_flags.iter().filter(|&&set| set).count() > 1 {
            return Err(CommandError::ConflictingFlags);
        }
        Ok(options)
    }

    /// The radix selected by the flags, if any.
    pub fn radix(&self) -> Option<Radix> {
        if self.binary {
            Some(Radix::Binary)
        } else if self.octal {
            Some(Radix::Octal)
        } else if self.hex {
            Some(Radix::Hex)
        } else if self.numeric {
            Some(Radix::Decimal)
        } else {
            None
        }
    }
}

/// Line sorter in the shape of Vim's `:sort` command.
#[derive(Debug, Clone)]
pub struct SortCommand {
    options: SortOptions,
}

impl SortCommand {
    pub fn new(options: SortOptions) -> Self {
        Self { options }
    }

    /// Build the command straight from user-supplied option tokens.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<SortCommand, CommandError> {
        Ok(SortCommand {
            options: SortOptions::parse(tokens)?,
        })
    }

    pub fn options(&self) -> &SortOptions {
        &self.options
    }

    /// Sort the whole buffer and write the result back in a single replace.
    pub fn execute(
        &self,
        buffer: &mut Buffer,
        config: &VimshimConfig,
    ) -> Result<(), CommandError> {
        self.sort_buffer(buffer, config.newline)
            .map_err(|message| CommandError::Execution {
                command: "sort",
                message,
            })
    }

    fn sort_buffer(&self, buffer: &mut Buffer, nl: char) -> Result<(), String> {
        let length = buffer.len_chars();
        let text = buffer.read(0, length).map_err(|e| e.to_string())?;
        if text.is_empty() {
            return Ok(());
        }

        let pattern = match &self.options.pattern {
            Some(pattern) => Some(Regex::new(pattern).map_err(|e| e.to_string())?),
            None => None,
        };

        let policy = if let Some(radix) = self.options.radix() {
            SortPolicy::Numeric(radix)
        } else if self.options.ignore_case {
            SortPolicy::IgnoreCase
        } else {
            SortPolicy::Lexicographic
        };

        // Lines that yield no key under the active policy keep their
        // original relative order, placed ahead of the sorted block.
        let (mut keyed, unkeyed): (Vec<String>, Vec<String>) = lines::split(&text, nl)
            .into_iter()
            .partition(|line| has_key(line, &pattern, policy));

        // sort_by is stable: lines with equal keys keep their input order
        keyed.sort_by(|a, b| {
            let a = key_text(a, &pattern).unwrap_or(a);
            let b = key_text(b, &pattern).unwrap_or(b);
            policy.compare(a, b)
        });

        let unmatched = unkeyed.len();
        let mut sorted = unkeyed;
        sorted.extend(keyed);

        if self.options.unique {
            let mut seen = HashSet::new();
            sorted.retain(|line| {
                let key = if self.options.ignore_case {
                    line.to_uppercase()
                } else {
                    line.clone()
                };
                seen.insert(key)
            });
        }

        if self.options.reversed {
            sorted.reverse();
        }

        log::debug!("sorted {} lines ({} without a key)", sorted.len(), unmatched);

        let replacement = lines::join(&sorted, nl);
        buffer
            .replace(0, length, &replacement)
            .map_err(|e| e.to_string())
    }
}

/// The part of a line ordering keys are drawn from: the whole line, or what
/// follows the first pattern match. `None` when the pattern does not match.
fn key_text<'a>(line: &'a str, pattern: &Option<Regex>) -> Option<&'a str> {
    match pattern {
        Some(re) => re.find(line).map(|m| &line[m.end()..]),
        None => Some(line),
    }
}

fn has_key(line: &str, pattern: &Option<Regex>, policy: SortPolicy) -> bool {
    match key_text(line, pattern) {
        None => false,
        Some(key) => match policy {
            SortPolicy::Numeric(radix) => numeric_key(key, radix).is_some(),
            _ => true,
        },
    }
}
