mod diagnostics;
mod repl;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use ludu_interpreter::{Interpreter, Record};
use ludu_lexer::Lexer;
use ludu_parser::Parser as LuduParser;

use diagnostics::{render_error, render_failure};

const EXIT_SCRIPT_ERROR: i32 = 1;
const EXIT_READ_FAILED: i32 = 2;
const EXIT_WRITE_FAILED: i32 = 3;

#[derive(Parser, Debug)]
#[command(name = "ludu", version, about = "Run a LuduScript file and print the records it emits as JSON")]
struct Cli {
    /// Script to run. Starts an interactive session when omitted.
    script: Option<PathBuf>,

    /// Pretty-print the JSON output (also enabled by LUDU_PRETTY=1)
    #[arg(short = 'p', long = "pretty")]
    pretty: bool,

    /// Write the JSON output to FILE instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the token stream and exit
    #[arg(long = "tokens", conflicts_with_all = ["ast", "check"])]
    tokens: bool,

    /// Print the parsed syntax tree and exit
    #[arg(long = "ast", conflicts_with = "check")]
    ast: bool,

    /// Parse the script without running it
    #[arg(long = "check")]
    check: bool,
}

fn pretty_from_env() -> bool {
    match std::env::var("LUDU_PRETTY") {
        Ok(v) => !v.is_empty() && v != "0",
        Err(_) => false,
    }
}

fn to_json(records: &[Record], pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    }
}

fn read_source(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            render_failure(&format!("Failed to read {}: {}", path.display(), e));
            std::process::exit(EXIT_READ_FAILED);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let path = match &cli.script {
        Some(p) => p,
        None => {
            repl::start_repl();
            return;
        }
    };
    let src = read_source(path);

    let tokens = Lexer::new(&src).tokenize();
    if cli.tokens {
        for tok in &tokens {
            println!("{}:{} {:?} '{}'", tok.line, tok.col, tok.kind, tok.text);
        }
        return;
    }

    let mut parser = LuduParser::new(tokens);
    let program = match parser.parse_program() {
        Ok(p) => p,
        Err(e) => {
            render_error("Parse error", &src, &e);
            std::process::exit(EXIT_SCRIPT_ERROR);
        }
    };

    if cli.ast {
        println!("{:#?}", program);
        return;
    }
    if cli.check {
        println!("{}: ok", path.display());
        return;
    }

    let mut interp = Interpreter::new();
    if let Err(e) = interp.run(&program) {
        render_error("Runtime error", &src, &e);
        std::process::exit(EXIT_SCRIPT_ERROR);
    }

    let json = match to_json(interp.output(), cli.pretty || pretty_from_env()) {
        Ok(s) => s,
        Err(e) => {
            render_failure(&format!("Failed to serialize output: {}", e));
            std::process::exit(EXIT_WRITE_FAILED);
        }
    };

    match &cli.output {
        Some(out) => {
            if let Err(e) = fs::write(out, format!("{}\n", json)) {
                render_failure(&format!("Failed to write {}: {}", out.display(), e));
                std::process::exit(EXIT_WRITE_FAILED);
            }
            println!("Output saved to {}", out.display());
        }
        None => println!("{}", json),
    }
}
