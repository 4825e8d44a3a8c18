use clap::Parser as _;
use lox_front::{
    render, scan, scan_source, ExecutionState, Parser, ParserConfig, StartPolicy, Token,
};
use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Scan and parse expressions, printing their tree in prefix form.
#[derive(clap::Parser, Debug)]
#[command(name = "lox-front", version)]
struct Cli {
    /// Source file to parse as a single expression. Without one, read
    /// expressions line by line from standard input.
    script: Option<PathBuf>,

    /// Read from standard input even when a script is given.
    #[arg(long)]
    repl: bool,

    /// Print the scanned tokens before the tree.
    #[arg(long)]
    tokens: bool,

    /// Only refuse expressions starting with `==`, `+`, `.`, `/` or `;`.
    #[arg(long)]
    legacy_start_guard: bool,
}

impl Cli {
    fn parser_config(&self) -> ParserConfig {
        let start_policy = if self.legacy_start_guard {
            StartPolicy::Legacy
        } else {
            StartPolicy::Grammar
        };
        ParserConfig { start_policy }
    }
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let ok = match (&cli.script, cli.repl) {
        (Some(path), false) => run_file(&cli, path, &mut stdout, &mut stderr)?,
        _ => run_prompt(&cli, &mut stdout, &mut stderr)?,
    };

    if !ok {
        process::exit(65);
    }
    Ok(())
}

fn run_file(
    cli: &Cli,
    path: &Path,
    out: &mut impl Write,
    err_out: &mut impl Write,
) -> io::Result<bool> {
    let contents = std::fs::read_to_string(path)?;
    info!(path = %path.display(), "parsing file");
    let state = scan_source(&contents);
    run(cli, &state, out, err_out)
}

fn run_prompt(cli: &Cli, out: &mut impl Write, err_out: &mut impl Write) -> io::Result<bool> {
    let mut buffer = String::new();
    let stdin = io::stdin();
    let mut state = ExecutionState::new();
    let mut line_number = 0;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        buffer.clear();

        let num_bytes = stdin.read_line(&mut buffer)?;
        if num_bytes == 0 { break };
        line_number += 1;

        match buffer.trim() {
            "exit" | "q" => break,
            "" => continue,
            _ => {}
        }

        state.reset();
        scan(&buffer, line_number, &mut state);
        run(cli, &state, out, err_out)?;
    }

    Ok(true)
}

fn run(
    cli: &Cli,
    state: &ExecutionState,
    out: &mut impl Write,
    err_out: &mut impl Write,
) -> io::Result<bool> {
    if cli.tokens {
        print_tokens(state.tokens(), out)?;
    }

    if state.has_errors() {
        for e in state.errors() {
            writeln!(err_out, "{}", e)?;
        }
        return Ok(false);
    }

    debug!(tokens = state.tokens().len(), "scanned");
    let mut parser = Parser::with_config(state.token_stream(), cli.parser_config());
    match parser.parse() {
        Ok(e) => {
            writeln!(out, "{}", render(&e))?;
            Ok(true)
        }
        Err(e) => {
            writeln!(err_out, "{}", e)?;
            Ok(false)
        }
    }
}

fn print_tokens(tokens: &[Token], out: &mut impl Write) -> io::Result<()> {
    for token in tokens {
        writeln!(out, "{}", token)?;
    }
    Ok(())
}
