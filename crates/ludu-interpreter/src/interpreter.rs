//! Main interpreter engine.

use crate::env::Env;
use crate::flow::Flow;
use crate::ops;
use crate::record::Record;
use crate::value::Value;
use ludu_syntax::ast::*;
use ludu_syntax::error::{error, Error, Result};

/// Result of running a block whose value is wanted.
enum Outcome {
    Done(Option<Value>),
    Signal(Flow),
}

fn default_value(ty: DeclType) -> Value {
    match ty {
        DeclType::Num => Value::float(0.0),
        DeclType::Str => Value::str(""),
        DeclType::Bool => Value::Bool(false),
    }
}

fn literal_value(lit: &Literal) -> Value {
    match lit {
        Literal::Int(n) => Value::int(*n),
        Literal::Float(f) => Value::float(*f),
        Literal::Str(s) => Value::str(s.as_str()),
        Literal::Bool(b) => Value::Bool(*b),
    }
}

/// Tree-walking interpreter. One instance owns the environment of one
/// program run; records accumulate across calls to [`Interpreter::run`].
#[derive(Debug, Default)]
pub struct Interpreter {
    env: Env,
}

impl Interpreter {
    pub fn new() -> Self {
        Self { env: Env::new() }
    }

    pub fn reset(&mut self) {
        self.env = Env::new();
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn output(&self) -> &[Record] {
        self.env.output()
    }

    pub fn into_output(mut self) -> Vec<Record> {
        self.env.take_output()
    }

    /// Runs every top-level statement in order. Stops at the first error;
    /// records emitted before the failing statement are kept.
    pub fn run(&mut self, program: &Program) -> Result<()> {
        for stmt in &program.stmts {
            let msg = match self.exec_stmt(stmt)? {
                Flow::Normal => continue,
                Flow::Break => "'break' outside of loop",
                Flow::Continue => "'continue' outside of loop",
            };
            return Err(Error::new(msg).or_line(stmt.line));
        }
        Ok(())
    }

    /// Runs `f` inside a fresh scope. The scope is popped on every exit path.
    fn scoped<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.env.push_scope();
        let result = f(self);
        self.env.pop_scope();
        result
    }

    fn exec_block(&mut self, body: &[Stmt]) -> Result<Flow> {
        self.scoped(|this| this.exec_stmts(body))
    }

    /// Runs statements in the current scope until one signals.
    fn exec_stmts(&mut self, body: &[Stmt]) -> Result<Flow> {
        for stmt in body {
            let flow = self.exec_stmt(stmt)?;
            if flow.is_signal() {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Flow> {
        self.exec_stmt_kind(stmt).map_err(|e| e.or_line(stmt.line))
    }

    fn exec_stmt_kind(&mut self, stmt: &Stmt) -> Result<Flow> {
        match &stmt.kind {
            StmtKind::Expr(expr) => {
                self.eval_expr(expr)?;
                Ok(Flow::Normal)
            }
            StmtKind::Assign { name, expr } => {
                let v = self.eval_expr(expr)?;
                if !self.env.in_object() {
                    self.env.set_var(name, v);
                } else if !self.env.assign_existing(name, v.clone()) {
                    self.env.write_field(name, v);
                }
                Ok(Flow::Normal)
            }
            StmtKind::Decl { ty, name, init } => {
                let v = match init {
                    Initializer::Default => default_value(*ty),
                    Initializer::Expr(expr) => self.eval_expr(expr)?,
                    Initializer::Block(body) => {
                        match self.scoped(|this| this.block_value(body))? {
                            Outcome::Done(v) => v.unwrap_or_else(|| default_value(*ty)),
                            Outcome::Signal(flow) => return Ok(flow),
                        }
                    }
                };
                self.bind(name, v);
                Ok(Flow::Normal)
            }
            StmtKind::If {
                cond,
                then_body,
                elifs,
                else_body,
            } => match self.choose_branch(cond, then_body, elifs, else_body.as_deref())? {
                Some(body) => self.exec_block(body),
                None => Ok(Flow::Normal),
            },
            StmtKind::For { var, args, body } => {
                let mut bounds = Vec::with_capacity(args.len());
                for arg in args {
                    bounds.push(self.eval_expr(arg)?.to_int());
                }
                let (start, end, step) = match bounds.as_slice() {
                    [end] => (1, *end, 1),
                    [start, end] => (*start, *end, 1),
                    [start, end, step] => (*start, *end, if *step == 0 { 1 } else { *step }),
                    _ => return error("for expects one to three range arguments"),
                };
                self.scoped(|this| this.run_loop(var, start, end, step, body))
            }
            StmtKind::Obj { class, id, body } => {
                self.env.begin_object(class)?;
                let result = self.eval_expr(id).and_then(|v| {
                    self.env.set_id(v);
                    self.exec_block(body)
                });
                match result {
                    Ok(flow) => {
                        self.env.finish_object();
                        Ok(flow)
                    }
                    Err(e) => {
                        self.env.discard_object();
                        Err(e)
                    }
                }
            }
            StmtKind::Break(body) => self.signal_after(body, Flow::Break),
            StmtKind::Continue(body) => self.signal_after(body, Flow::Continue),
        }
    }

    /// Declarations land on the active object when there is one, otherwise in
    /// the innermost scope.
    fn bind(&mut self, name: &str, v: Value) {
        if self.env.in_object() {
            self.env.write_field(name, v);
        } else {
            self.env.define(name, v);
        }
    }

    /// Runs a `break`/`continue` body in the current scope, then raises
    /// `signal`. A signal raised by the body itself wins.
    fn signal_after(&mut self, body: &[Stmt], signal: Flow) -> Result<Flow> {
        match self.exec_stmts(body)? {
            Flow::Normal => Ok(signal),
            inner => Ok(inner),
        }
    }

    fn run_loop(
        &mut self,
        var: &str,
        start: i64,
        end: i64,
        step: i64,
        body: &[Stmt],
    ) -> Result<Flow> {
        let mut it = start;
        loop {
            let in_range = if step > 0 { it <= end } else { it >= end };
            if !in_range {
                break;
            }
            self.env.define(var, Value::int(it));
            if self.exec_stmts(body)? == Flow::Break {
                break;
            }
            match it.checked_add(step) {
                Some(next) => it = next,
                None => break,
            }
        }
        Ok(Flow::Normal)
    }

    fn choose_branch<'a>(
        &mut self,
        cond: &Expr,
        then_body: &'a [Stmt],
        elifs: &'a [ElifClause],
        else_body: Option<&'a [Stmt]>,
    ) -> Result<Option<&'a [Stmt]>> {
        if self.eval_expr(cond)?.truthy() {
            return Ok(Some(then_body));
        }
        for clause in elifs {
            if self.eval_expr(&clause.cond)?.truthy() {
                return Ok(Some(&clause.body));
            }
        }
        Ok(else_body)
    }

    /// Value of a block initializer, evaluated in the caller's scope.
    ///
    /// The last expression statement wins; a trailing `if` contributes the
    /// value of its taken branch; otherwise the last declared name is read
    /// back before the scope closes.
    fn block_value(&mut self, body: &[Stmt]) -> Result<Outcome> {
        let mut last_expr = None;
        let mut last_decl: Option<&str> = None;
        for (i, stmt) in body.iter().enumerate() {
            let trailing = i + 1 == body.len();
            match &stmt.kind {
                StmtKind::Expr(expr) => {
                    let v = self.eval_expr(expr).map_err(|e| e.or_line(stmt.line))?;
                    last_expr = Some(v);
                }
                StmtKind::If { .. } if trailing => match self.if_value(stmt)? {
                    Outcome::Done(Some(v)) => last_expr = Some(v),
                    Outcome::Done(None) => {}
                    signal => return Ok(signal),
                },
                _ => {
                    let flow = self.exec_stmt(stmt)?;
                    if flow.is_signal() {
                        return Ok(Outcome::Signal(flow));
                    }
                    if let StmtKind::Decl { name, .. } = &stmt.kind {
                        last_decl = Some(name.as_str());
                    }
                }
            }
        }
        if last_expr.is_some() {
            return Ok(Outcome::Done(last_expr));
        }
        let v = last_decl.and_then(|name| {
            self.env
                .get_var(name)
                .cloned()
                .or_else(|| self.env.declared_field(name))
        });
        Ok(Outcome::Done(v))
    }

    /// Runs an `if` statement and yields the value its taken branch ends with.
    fn if_value(&mut self, stmt: &Stmt) -> Result<Outcome> {
        let StmtKind::If {
            cond,
            then_body,
            elifs,
            else_body,
        } = &stmt.kind
        else {
            return self.exec_stmt(stmt).map(Outcome::Signal);
        };
        let branch = self
            .choose_branch(cond, then_body, elifs, else_body.as_deref())
            .map_err(|e| e.or_line(stmt.line))?;
        match branch {
            Some(body) => self.scoped(|this| this.branch_value(body)),
            None => Ok(Outcome::Done(None)),
        }
    }

    /// A branch's value is its final expression statement, or the value of
    /// a final nested `if`.
    fn branch_value(&mut self, body: &[Stmt]) -> Result<Outcome> {
        let (last, rest) = match body.split_last() {
            Some(split) => split,
            None => return Ok(Outcome::Done(None)),
        };
        let flow = self.exec_stmts(rest)?;
        if flow.is_signal() {
            return Ok(Outcome::Signal(flow));
        }
        match &last.kind {
            StmtKind::Expr(expr) => {
                let v = self.eval_expr(expr).map_err(|e| e.or_line(last.line))?;
                Ok(Outcome::Done(Some(v)))
            }
            StmtKind::If { .. } => self.if_value(last),
            _ => match self.exec_stmt(last)? {
                Flow::Normal => Ok(Outcome::Done(None)),
                signal => Ok(Outcome::Signal(signal)),
            },
        }
    }

    fn eval_expr(&self, expr: &Expr) -> Result<Value> {
        let result = match &expr.kind {
            ExprKind::Literal(lit) => Ok(literal_value(lit)),
            ExprKind::Ident(name) => self.resolve(name),
            ExprKind::Unary { op, operand } => {
                let v = self.eval_expr(operand)?;
                Ok(ops::unary(*op, v))
            }
            ExprKind::Binary { lhs, op, rhs } => {
                let l = self.eval_expr(lhs)?;
                let r = self.eval_expr(rhs)?;
                ops::binary(*op, l, r)
            }
            ExprKind::Call { .. } => error("Function calls are not supported"),
            ExprKind::Member { .. } => error("Member access is not supported"),
        };
        result.map_err(|e| e.or_line(expr.line))
    }

    /// Variables first, then fields the active object has declared. Inside
    /// an object body any other name reads as its own spelling.
    fn resolve(&self, name: &str) -> Result<Value> {
        if let Some(v) = self.env.get_var(name) {
            return Ok(v.clone());
        }
        if let Some(v) = self.env.declared_field(name) {
            return Ok(v);
        }
        if self.env.in_object() {
            return Ok(Value::str(name));
        }
        error(format!("Undefined variable '{}'", name))
    }
}
