use std::io::{self, Write};

use owo_colors::OwoColorize;
use ludu_interpreter::{Interpreter, Record};
use ludu_lexer::Lexer;
use ludu_parser::Parser;
use ludu_syntax::token::TokenKind;

use crate::diagnostics::render_error;

pub fn start_repl() {
    println!("{}", "LuduScript REPL. Type :help for help, :quit to exit.".bold().green());

    let mut interpreter = Interpreter::new();

    let mut buffer = String::new();
    loop {
        let prompt = if buffer.is_empty() { "ludu> ".cyan().to_string() } else { "... > ".cyan().to_string() };
        print!("{}", prompt);
        let _ = io::stdout().flush();

        let mut line = String::new();
        let n = match io::stdin().read_line(&mut line) {
            Ok(n) => n,
            Err(_) => { println!("<input error>"); break; }
        };
        if n == 0 { // EOF
            println!("\nGoodbye.");
            break;
        }
        let trimmed = line.trim_end();

        if buffer.is_empty() && trimmed.starts_with(':') {
            match trimmed {
                ":quit" | ":q" | ":exit" => { println!("Goodbye."); break; }
                ":help" | ":h" => { print_help(); continue; }
                ":vars" => { print_vars(&interpreter); continue; }
                ":records" => { print_records(interpreter.output(), true); continue; }
                ":reset" => { interpreter.reset(); println!("{}", "State reset.".yellow()); continue; }
                _ => { println!("{}", "Unknown command. Type :help.".red()); continue; }
            }
        }

        buffer.push_str(&line);

        if !is_complete(&buffer) {
            continue;
        }

        let tokens = Lexer::new(&buffer).tokenize();
        let mut parser = Parser::new(tokens);
        match parser.parse_program() {
            Ok(program) => {
                let before = interpreter.output().len();
                let result = interpreter.run(&program);
                print_records(&interpreter.output()[before..], false);
                if let Err(e) = result {
                    render_error("Runtime error", &buffer, &e);
                }
            }
            Err(e) => render_error("Parse error", &buffer, &e),
        }

        buffer.clear();
    }
}

fn print_help() {
    println!("{}\n  {}  {}\n  {}  {}",
        "Commands:".bold(),
        ":help".yellow(), "Show this help",
        ":quit".yellow(), "Exit the REPL");
    println!("  {}  {}\n  {}  {}\n  {}  {}",
        ":vars".yellow(), "List global variables",
        ":records".yellow(), "Show every record emitted so far",
        ":reset".yellow(), "Start over with a fresh interpreter");
    println!("Type statements to run them. Input continues until braces and parentheses balance.");
}

fn print_vars(interpreter: &Interpreter) {
    let vars = interpreter.env().vars_snapshot();
    if vars.is_empty() { println!("{}", "<no vars>".dimmed()); return; }
    for (k, v) in vars {
        println!("{} = {} {}", k.yellow(), format!("{}", v).bright_blue(), format!("({})", v.type_name()).dimmed());
    }
}

fn print_records(records: &[Record], pretty: bool) {
    if pretty && records.is_empty() { println!("{}", "<no records>".dimmed()); return; }
    for record in records {
        let json = if pretty { serde_json::to_string_pretty(record) } else { serde_json::to_string(record) };
        match json {
            Ok(s) => println!("{}", s.bright_blue()),
            Err(e) => eprintln!("{}", format!("Failed to serialize record: {}", e).red()),
        }
    }
}

/// Input is complete once every opened brace and parenthesis is closed.
fn is_complete(input: &str) -> bool {
    let tokens = Lexer::new(input).tokenize();
    let mut depth = 0i32;
    for tk in tokens.iter() {
        match tk.kind {
            TokenKind::LParen | TokenKind::LBrace => depth += 1,
            TokenKind::RParen | TokenKind::RBrace => depth -= 1,
            _ => {}
        }
    }
    depth <= 0
}

#[cfg(test)]
mod tests {
    use super::is_complete;

    #[test]
    fn test_is_complete() {
        assert!(is_complete("x = 1\n"));
        assert!(is_complete("obj(\"A\", 1) { num(hp) { 10 } }\n"));
        assert!(!is_complete("for (i, 3) {\n"));
        assert!(!is_complete("obj(\"A\",\n"));
        assert!(is_complete("x = \"{\"\n"));
        assert!(is_complete("}\n"));
    }
}
