use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Default, Parser)]
#[command(name = "vimshim")]
#[command(version = "0.1.0")]
#[command(about = "Vim-style :sort against a file, driven by the vimshim emulation core")]
pub struct CliArgs {
    /// File to sort; stdin is used when omitted
    pub file: Option<PathBuf>,

    /// Sort option flags combined into one string, e.g. "nu!"
    #[arg(long, short = 'f', default_value_t = String::new())]
    pub flags: String,

    /// Skip pattern: sort keys start after the first match
    #[arg(long, short = 'p')]
    pub pattern: Option<String>,

    /// Write the result back to FILE instead of stdout
    #[arg(long)]
    pub in_place: bool,

    /// Path to a vimshim.toml config file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// The option tokens in the shape the sort command accepts.
    pub fn sort_tokens(&self) -> Vec<String> {
        let mut tokens: Vec<String> = self.flags.chars().map(|c| c.to_string()).collect();
        if let Some(pattern) = &self.pattern {
            tokens.push(format!("/{}/", pattern));
        }
        tokens
    }

    /// Check if the provided path exists (following symlinks)
    pub fn exists(&self) -> bool {
        if let Some(path) = &self.file {
            std::fs::metadata(path).is_ok()
        } else {
            false
        }
    }
}

pub fn parse_args() -> Result<CliArgs, Box<dyn std::error::Error>> {
    Ok(CliArgs::parse())
}
