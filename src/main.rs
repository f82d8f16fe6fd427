use anyhow::Context;
use std::io::Read;
use vimshim::cli;
use vimshim::{command::Command, config::VimshimConfig, editor::Editor};

/// Demo host: load a file (or stdin) into the buffer, run the sort command
/// the CLI flags describe, and write the result to stdout or back in place.
fn main() -> anyhow::Result<()> {
    // Parse command-line arguments first
    let cli_args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error parsing arguments: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logger (set RUST_LOG env var to control verbosity)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = match &cli_args.config {
        Some(path) => VimshimConfig::from_file(path).map_err(|e| anyhow::anyhow!(e))?,
        None => VimshimConfig::default(),
    };

    let mut editor = Editor::new(config);

    match &cli_args.file {
        Some(path) => {
            editor
                .open_file(&path.to_string_lossy())
                .with_context(|| format!("opening {}", path.display()))?;
        }
        None => {
            if cli_args.in_place {
                anyhow::bail!("--in-place needs a file argument");
            }
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            editor.buffer.set_text(&text);
        }
    }

    editor.execute_command(Command::Sort(cli_args.sort_tokens()))?;

    if cli_args.in_place {
        editor.save_file().context("writing result back")?;
    } else {
        print!("{}", editor.buffer.text());
    }
    Ok(())
}
