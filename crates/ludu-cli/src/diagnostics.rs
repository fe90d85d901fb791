use owo_colors::OwoColorize;

use ludu_syntax::error::Error;

/// Prints `err` to stderr with a pointer into `source` and, when one applies,
/// a one-line hint.
pub fn render_error(kind: &str, source: &str, err: &Error) {
    eprintln!("{}: {}", kind.red().bold(), err.msg.red());
    if let Some(line) = err.line {
        match err.col {
            Some(col) => eprintln!("  --> line {}, column {}", line, col),
            None => eprintln!("  --> line {}", line),
        }
        if let Some(src_line) = line.checked_sub(1).and_then(|i| source.lines().nth(i)) {
            let gutter = format!("{:3} | ", line);
            eprintln!("     |");
            eprintln!("{}{}", gutter.bright_black(), src_line);
            if let Some(col) = err.col {
                let mut marker = " ".repeat(gutter.len() + col.saturating_sub(1));
                marker.push('^');
                eprintln!("{}{}", marker.red(), " error here".red());
            }
            eprintln!("     |");
        }
    }
    if let Some(help) = hint(source, err) {
        eprintln!("{}", format!("Help: {}", help).yellow());
    }
}

/// Plain one-line error for failures outside the script itself.
pub fn render_failure(msg: &str) {
    eprintln!("{}: {}", "error".red().bold(), msg.red());
}

/// Source text from `line:col` to the end of the input.
fn rest_from(source: &str, line: usize, col: usize) -> Option<String> {
    let mut lines = source.lines().skip(line.checked_sub(1)?);
    let first: String = lines.next()?.chars().skip(col.saturating_sub(1)).collect();
    Some(lines.fold(first, |mut acc, l| {
        acc.push('\n');
        acc.push_str(l);
        acc
    }))
}

fn hint(source: &str, err: &Error) -> Option<&'static str> {
    let msg = err.msg.as_str();
    if msg.starts_with("Undefined variable") {
        return Some("Declare it first, e.g. num(x) { 0 }, or assign it with x = ...");
    }
    if msg == "Division by zero" || msg == "Modulo by zero" {
        return Some("Check the right-hand operand; strings that are not numbers count as 0.");
    }
    if msg == "Function calls are not supported" || msg == "Member access is not supported" {
        return Some("LuduScript has no functions or members; compute values with operators.");
    }
    if msg.starts_with("'break' outside") || msg.starts_with("'continue' outside") {
        return Some("break { ... } and continue { ... } only work inside a for loop.");
    }
    if msg == "Nested obj is not supported" {
        return Some("Close the current obj(...) { } before starting another one.");
    }

    let rest = rest_from(source, err.line?, err.col?)?;
    let mut chars = rest.chars();
    match chars.next()? {
        '"' if !chars.as_str().contains('"') => Some("This string is missing its closing quote."),
        '&' if !rest.starts_with("&&") => Some("Use '&&' for logical and."),
        '|' if !rest.starts_with("||") => Some("Use '||' for logical or."),
        '=' if msg.contains("Expected ')'") => Some("Use '==' to compare values."),
        c if !c.is_alphanumeric() && !c.is_whitespace() && !"(){},;.+-*/%=!<>\"_".contains(c) => {
            Some("This character is not part of LuduScript.")
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_hints() {
        let err = Error::new("Undefined variable 'x'").or_line(1);
        assert!(hint("y = x", &err).is_some());
        assert!(hint("", &Error::new("Modulo by zero")).is_some());
        assert!(hint("", &Error::new("something else")).is_none());
    }

    #[test]
    fn test_source_hints() {
        let err = Error::with_span("Expected expression, found 'abc'", 1, 5);
        assert_eq!(
            hint("x = \"abc", &err),
            Some("This string is missing its closing quote.")
        );
        let err = Error::with_span("Expected expression, found '@'", 1, 5);
        assert_eq!(hint("x = @", &err), Some("This character is not part of LuduScript."));
        let err = Error::with_span("Expected expression, found '&'", 1, 7);
        assert_eq!(hint("x = a & b", &err), Some("Use '&&' for logical and."));
        let err = Error::with_span("Expected expression, found 'x'", 1, 5);
        assert_eq!(hint("x = \"x\" y", &err), None);
    }

    #[test]
    fn test_rest_from() {
        assert_eq!(rest_from("ab\ncd", 1, 2).as_deref(), Some("b\ncd"));
        assert_eq!(rest_from("ab\ncd", 2, 1).as_deref(), Some("cd"));
        assert_eq!(rest_from("ab", 3, 1), None);
    }
}
