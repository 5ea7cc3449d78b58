use std::io::{IsTerminal as _, Read as _};
use std::{fs, io, process::ExitCode};

use clap::Parser as ClapParser;
use thiserror::Error;

use core::tokens::TokenList;
use core::{Allocator, BumpArena};
use objects::ObjectHeap;

mod ast_print;
mod config;
mod report;

use config::Config;

/// A small Lisp-family expression evaluator: tokenize, parse, compile to
/// bytecode, run on a stack VM.
#[derive(Debug, ClapParser)]
#[command(name = "parens", version)]
struct Cli {
    /// Source file to run, or `-` (or omitted) to read from stdin.
    source: Option<String>,

    /// Print the generated bytecode instead of running it.
    #[arg(long)]
    disassemble: bool,

    /// Print the parsed AST instead of running it.
    #[arg(long)]
    print_ast: bool,

    /// Raise tracing's verbosity; repeatable (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Arena page size in bytes.
    #[arg(long, default_value_t = Config::default().page_size)]
    page_size: usize,

    /// Number of arena pages to preallocate.
    #[arg(long, default_value_t = Config::default().initial_pages)]
    initial_pages: usize,
}

#[derive(Debug, Error)]
enum PipelineError {
    #[error(transparent)]
    Lex(#[from] lexer::LexError),
    #[error(transparent)]
    Parse(#[from] parser::ParseError),
    #[error(transparent)]
    Generate(#[from] compiler::GenError),
    #[error(transparent)]
    Runtime(#[from] virtual_machine::RuntimeError),
}

impl PipelineError {
    /// `sysexits.h`-style codes, matching the legacy binary's convention:
    /// 65 (`EX_DATAERR`) for anything that never reached the VM, 70
    /// (`EX_SOFTWARE`) for a failure during execution.
    fn exit_code(&self) -> u8 {
        match self {
            PipelineError::Lex(_) | PipelineError::Parse(_) | PipelineError::Generate(_) => 65,
            PipelineError::Runtime(_) => 70,
        }
    }
}

/// A pipeline failure with its position already resolved against the
/// token stream that produced it, so it can outlive that (locally owned)
/// stream on its way back out of `run`.
struct Reported {
    message: String,
    location: Option<(u32, u32)>,
    exit_code: u8,
}

impl Reported {
    fn new(err: PipelineError, list: Option<&TokenList>) -> Self {
        let location = match (&err, list) {
            (PipelineError::Lex(e), _) => Some((e.line, e.column)),
            (PipelineError::Parse(e), Some(list)) => report::token_location(list, e.token),
            (PipelineError::Generate(e), Some(list)) => report::token_location(list, e.token),
            _ => None,
        };
        Reported {
            message: err.to_string(),
            location,
            exit_code: err.exit_code(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config {
        page_size: cli.page_size,
        initial_pages: cli.initial_pages,
        color: io::stdout().is_terminal(),
        ..Config::default()
    };

    let source = match read_source(cli.source.as_deref()) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(66); // EX_NOINPUT
        }
    };

    match run(&source, &config, cli.disassemble, cli.print_ast) {
        Ok(()) => ExitCode::SUCCESS,
        Err(reported) => {
            report::report(&reported.message, reported.location, &source, config.color);
            ExitCode::from(reported.exit_code)
        }
    }
}

/// Runs the full pipeline, resolving any error's position against its
/// stage's token stream before returning (the stream itself is local to
/// this function and can't be returned alongside it).
fn run(source: &str, config: &Config, disassemble: bool, print_ast: bool) -> Result<(), Reported> {
    let tokens = lexer::Lexer::lex(source).map_err(|e| Reported::new(PipelineError::Lex(e), None))?;
    let list = TokenList::new(&tokens);

    let arena = BumpArena::new(config.page_size, config.initial_pages);
    let mut heap = ObjectHeap::new();

    let ast = parser::Parser::parse(list, &arena)
        .map_err(|e| Reported::new(PipelineError::Parse(e), Some(&list)))?;

    if print_ast {
        println!("{}", ast_print::print_ast(ast, &heap));
    }

    let chunk = compiler::Generator::generate(ast)
        .map_err(|e| Reported::new(PipelineError::Generate(e), Some(&list)))?;

    if disassemble {
        print!("{}", plv::disassemble(&chunk));
    }

    if disassemble || print_ast {
        return Ok(());
    }

    virtual_machine::Vm::new(&chunk, &mut heap)
        .with_iteration_guard(config.iteration_guard)
        .run()
        .map_err(|e| Reported::new(PipelineError::Runtime(e), Some(&list)))?;

    Ok(())
}

fn read_source(path: Option<&str>) -> io::Result<String> {
    match path {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => fs::read_to_string(path),
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
