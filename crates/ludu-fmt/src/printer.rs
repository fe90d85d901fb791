//! Canonical source printer for LuduScript programs.
//!
//! Comments are not part of the syntax tree and are dropped.

use ludu_syntax::ast::*;

const INDENT: usize = 4;

pub fn format_program(p: &Program) -> String {
    let mut out = String::new();
    let mut prev_multiline = false;
    for (i, s) in p.stmts.iter().enumerate() {
        let text = format_stmt(s, 0);
        let multiline = text.trim_end().contains('\n');
        if i > 0 && (multiline || prev_multiline) {
            out.push('\n');
        }
        out.push_str(&text);
        prev_multiline = multiline;
    }
    out
}

fn format_body(body: &[Stmt], indent: usize) -> String {
    if body.is_empty() {
        return "{}".to_string();
    }
    let mut out = String::from("{\n");
    for st in body {
        out.push_str(&format_stmt(st, indent + INDENT));
    }
    out.push_str(&" ".repeat(indent));
    out.push('}');
    out
}

fn format_stmt(s: &Stmt, indent: usize) -> String {
    let mut out = " ".repeat(indent);
    match &s.kind {
        StmtKind::Expr(e) => {
            out.push_str(&format_expr(e));
            out.push(';');
        }
        StmtKind::Assign { name, expr } => {
            out.push_str(name);
            out.push_str(" = ");
            out.push_str(&format_expr(expr));
            out.push(';');
        }
        StmtKind::Decl { ty, name, init } => {
            out.push_str(&format!("{}({})", ty.keyword(), name));
            match init {
                Initializer::Default => out.push(';'),
                Initializer::Block(body) if body.is_empty() => out.push(';'),
                Initializer::Expr(e) => out.push_str(&format!(" {{ {} }};", format_expr(e))),
                Initializer::Block(body) => match body.as_slice() {
                    [Stmt {
                        kind: StmtKind::Expr(e),
                        ..
                    }] => out.push_str(&format!(" {{ {} }};", format_expr(e))),
                    _ => {
                        out.push(' ');
                        out.push_str(&format_body(body, indent));
                    }
                },
            }
        }
        StmtKind::If {
            cond,
            then_body,
            elifs,
            else_body,
        } => {
            out.push_str(&format!("if ({}) ", format_expr(cond)));
            out.push_str(&format_body(then_body, indent));
            for clause in elifs {
                out.push_str(&format!(" elif ({}) ", format_expr(&clause.cond)));
                out.push_str(&format_body(&clause.body, indent));
            }
            if let Some(body) = else_body {
                out.push_str(" else ");
                out.push_str(&format_body(body, indent));
            }
        }
        StmtKind::For { var, args, body } => {
            out.push_str("for (");
            out.push_str(var);
            for a in args {
                out.push_str(", ");
                out.push_str(&format_expr(a));
            }
            out.push_str(") ");
            out.push_str(&format_body(body, indent));
        }
        StmtKind::Obj { class, id, body } => {
            out.push_str(&format!("obj({}, {}) ", quote(class), format_expr(id)));
            out.push_str(&format_body(body, indent));
        }
        StmtKind::Break(body) => {
            out.push_str("break ");
            out.push_str(&format_body(body, indent));
        }
        StmtKind::Continue(body) => {
            out.push_str("continue ");
            out.push_str(&format_body(body, indent));
        }
    }
    out.push('\n');
    out
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn format_float(f: f64) -> String {
    let s = f.to_string();
    if s.contains('.') || !f.is_finite() {
        s
    } else {
        format!("{}.0", s)
    }
}

fn format_literal(lit: &Literal) -> String {
    match lit {
        Literal::Int(n) => n.to_string(),
        Literal::Float(f) => format_float(*f),
        Literal::Str(s) => quote(s),
        Literal::Bool(b) => b.to_string(),
    }
}

pub fn format_expr(e: &Expr) -> String {
    match &e.kind {
        ExprKind::Literal(lit) => format_literal(lit),
        ExprKind::Ident(s) => s.clone(),
        ExprKind::Unary { op, operand } => format!("{}{}", op.symbol(), wrap_operand(operand)),
        ExprKind::Binary { lhs, op, rhs } => {
            let p = op.precedence();
            let l = if needs_parens(lhs, p, false) {
                format!("({})", format_expr(lhs))
            } else {
                format_expr(lhs)
            };
            let r = if needs_parens(rhs, p, true) {
                format!("({})", format_expr(rhs))
            } else {
                format_expr(rhs)
            };
            format!("{} {} {}", l, op.symbol(), r)
        }
        ExprKind::Call { callee, args } => {
            let mut s = wrap_postfix_target(callee);
            s.push('(');
            for (i, a) in args.iter().enumerate() {
                if i > 0 {
                    s.push_str(", ");
                }
                s.push_str(&format_expr(a));
            }
            s.push(')');
            s
        }
        ExprKind::Member { target, name } => format!("{}.{}", wrap_postfix_target(target), name),
    }
}

/// Binary operands keep parentheses only when precedence demands them; a
/// right operand at the same level is parenthesized since operators group
/// to the left.
fn needs_parens(child: &Expr, parent_prec: u8, right: bool) -> bool {
    match &child.kind {
        ExprKind::Binary { op, .. } => {
            let p = op.precedence();
            p < parent_prec || (right && p == parent_prec)
        }
        _ => false,
    }
}

/// Operand of a unary operator.
fn wrap_operand(e: &Expr) -> String {
    match &e.kind {
        ExprKind::Binary { .. } => format!("({})", format_expr(e)),
        _ => format_expr(e),
    }
}

/// Callee or member target. Postfix binds tighter than prefix, so a unary
/// target needs parentheses too.
fn wrap_postfix_target(e: &Expr) -> String {
    match &e.kind {
        ExprKind::Binary { .. } | ExprKind::Unary { .. } => format!("({})", format_expr(e)),
        _ => format_expr(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ludu_lexer::Lexer;
    use ludu_parser::Parser;

    fn fmt(src: &str) -> String {
        let tokens = Lexer::new(src).tokenize();
        let program = Parser::new(tokens)
            .parse_program()
            .unwrap_or_else(|e| panic!("Parse error: {}\nInput: {}", e, src));
        format_program(&program)
    }

    fn expect_fmt(src: &str, expected: &str) {
        assert_eq!(fmt(src), expected, "Input: {}", src);
    }

    fn expect_idempotent(src: &str) {
        let once = fmt(src);
        let twice = fmt(&once);
        assert_eq!(once, twice, "Input: {}", src);
    }

    #[test]
    fn test_simple_statements() {
        expect_fmt("x=1", "x = 1;\n");
        expect_fmt("x = 1\ny = x", "x = 1;\ny = x;\n");
        expect_fmt("num(a)", "num(a);\n");
        expect_fmt("str(s){}", "str(s);\n");
        expect_fmt("bool(b) {true}", "bool(b) { true };\n");
        expect_fmt("1 + 2", "1 + 2;\n");
    }

    #[test]
    fn test_parentheses_are_minimal() {
        expect_fmt("x = (1 + 2) * 3", "x = (1 + 2) * 3;\n");
        expect_fmt("x = 1 + (2 * 3)", "x = 1 + 2 * 3;\n");
        expect_fmt("x = (a - b) - c", "x = a - b - c;\n");
        expect_fmt("x = a - (b - c)", "x = a - (b - c);\n");
        expect_fmt("x = a < b == (c > d)", "x = a < b == c > d;\n");
        expect_fmt("x = (a || b) && c", "x = (a || b) && c;\n");
        expect_fmt("x = -(a + b)", "x = -(a + b);\n");
        expect_fmt("x = !(a)", "x = !a;\n");
    }

    #[test]
    fn test_postfix_targets_keep_parentheses() {
        expect_fmt("x = (-a)(1)", "x = (-a)(1);\n");
        expect_fmt("x = (!a).b", "x = (!a).b;\n");
        expect_fmt("x = -a(1)", "x = -a(1);\n");
        expect_fmt("x = (a + b).c", "x = (a + b).c;\n");

        let reparsed = Parser::new(Lexer::new(&fmt("x = (-a)(1)")).tokenize())
            .parse_program()
            .unwrap();
        match &reparsed.stmts[0].kind {
            StmtKind::Assign { expr, .. } => match &expr.kind {
                ExprKind::Call { callee, .. } => {
                    assert!(matches!(callee.kind, ExprKind::Unary { .. }))
                }
                other => panic!("Expected call, got {:?}", other),
            },
            other => panic!("unexpected statement {:?}", other),
        }
    }

    #[test]
    fn test_literals() {
        expect_fmt("x = 2.50", "x = 2.5;\n");
        expect_fmt("x = 3.0", "x = 3.0;\n");
        expect_fmt("x = \"a\\\"b\\\\c\\nd\\te\"", "x = \"a\\\"b\\\\c\\nd\\te\";\n");
        expect_fmt("x = false", "x = false;\n");
    }

    #[test]
    fn test_blocks() {
        expect_fmt(
            "for(i,3){obj(\"P\",i){num(hp){i*10}}}",
            "for (i, 3) {\n    obj(\"P\", i) {\n        num(hp) { i * 10 };\n    }\n}\n",
        );
        expect_fmt(
            "if (a) { x = 1 } elif (b) { x = 2 } else { x = 3 }",
            "if (a) {\n    x = 1;\n} elif (b) {\n    x = 2;\n} else {\n    x = 3;\n}\n",
        );
        expect_fmt("for (i, 2) { break {} }", "for (i, 2) {\n    break {}\n}\n");
        expect_fmt(
            "num(x) { if (c) { 1 } else { 2 } }",
            "num(x) {\n    if (c) {\n        1;\n    } else {\n        2;\n    }\n}\n",
        );
    }

    #[test]
    fn test_blank_lines_around_blocks() {
        expect_fmt(
            "x = 1\ny = 2\nfor (i, 1) { z = i }\nw = 3",
            "x = 1;\ny = 2;\n\nfor (i, 1) {\n    z = i;\n}\n\nw = 3;\n",
        );
    }

    #[test]
    fn test_formatting_is_idempotent() {
        for src in [
            "num(seats){8}num(w){seats/4}for(s,seats){obj(\"Seat\",s){str(role){if(s<=w){\"wolf\"}else{\"villager\"}}team=villagers}}",
            "for (i, 10, 1, -1) { if (i % 3 == 0) { continue { skipped = skipped + 1 } } }",
            "num(x) { a = 2; a * 10 }",
            "num(x) { num(a) { 4 } num(b) { a + 1 } }",
            "x = a - (b - c) * -d + f(1, 2).g",
            "str(s) { \"tab\\there\" }",
        ] {
            expect_idempotent(src);
        }
    }

    #[test]
    fn test_formatted_output_keeps_meaning() {
        let src = "num(x) { a = 2; a * 10 }\nobj(\"P\", 1) { num(v) { 1 - (2 - 3) } }";
        let once = fmt(src);
        let reparsed = Parser::new(Lexer::new(&once).tokenize())
            .parse_program()
            .unwrap();
        assert_eq!(reparsed.stmts.len(), 2);
        match &reparsed.stmts[0].kind {
            StmtKind::Decl {
                init: Initializer::Block(body),
                ..
            } => assert_eq!(body.len(), 2),
            other => panic!("unexpected statement {:?}", other),
        }
    }
}
