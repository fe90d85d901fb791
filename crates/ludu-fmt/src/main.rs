mod printer;

use std::env;
use std::fs;
use std::path::PathBuf;

use ludu_lexer::Lexer;
use ludu_parser::Parser;

use printer::format_program;

fn usage() -> ! {
    eprintln!("Usage: ludu-fmt [--check|--write] <file.ludu>");
    std::process::exit(2);
}

fn main() {
    let mut args = env::args().skip(1).collect::<Vec<_>>();
    if args.is_empty() || args.iter().any(|a| a == "-h" || a == "--help") {
        usage();
    }
    let mut check = false;
    let mut write = false;
    let mut file = None;
    while let Some(a) = args.first().cloned() {
        if a == "--check" { check = true; args.remove(0); }
        else if a == "--write" { write = true; args.remove(0); }
        else { file = Some(PathBuf::from(a)); args.remove(0); break; }
    }
    let file = match file {
        Some(f) if !(check && write) => f,
        _ => usage(),
    };
    let src = fs::read_to_string(&file).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", file.display(), e);
        std::process::exit(2)
    });
    let tokens = Lexer::new(&src).tokenize();
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program().unwrap_or_else(|e| { eprintln!("Parse error: {}", e); std::process::exit(1) });

    let formatted = format_program(&program);

    if check {
        if normalize_newlines(&formatted) != normalize_newlines(&src) {
            eprintln!("{}: not formatted", file.display());
            std::process::exit(1);
        } else {
            println!("{}: ok", file.display());
        }
    } else if write {
        if let Err(e) = fs::write(&file, formatted) {
            eprintln!("Failed to write {}: {}", file.display(), e);
            std::process::exit(3);
        }
    } else {
        print!("{}", formatted);
    }
}

fn normalize_newlines(s: &str) -> String { s.replace("\r\n", "\n") }
