//! Variable substitution over the IR.
//!
//! [`substitute`] rebuilds an expression with every reference to a named
//! variable replaced by a given expression; [`substitute_stmt`] does the
//! same for statement trees. The rewrite is purely structural: no capture
//! avoidance is performed, and a `Let` that rebinds the target name does
//! not stop the replacement inside its body. Callers are responsible for
//! choosing fresh names.

use crate::ir::{Expr, Stmt};

/// Replace every occurrence of variable `name` in `expr` with `replacement`.
pub fn substitute(name: &str, replacement: &Expr, expr: &Expr) -> Expr {
    let subst = |e: &Expr| Box::new(substitute(name, replacement, e));
    match expr {
        Expr::Var(v) if v.as_str() == name => replacement.clone(),
        Expr::IntImm(_) | Expr::FloatImm(_) | Expr::Var(_) => expr.clone(),
        Expr::Cast(ty, e) => Expr::Cast(*ty, subst(e)),
        Expr::Add(a, b) => Expr::Add(subst(a), subst(b)),
        Expr::Sub(a, b) => Expr::Sub(subst(a), subst(b)),
        Expr::Mul(a, b) => Expr::Mul(subst(a), subst(b)),
        Expr::Div(a, b) => Expr::Div(subst(a), subst(b)),
        Expr::Mod(a, b) => Expr::Mod(subst(a), subst(b)),
        Expr::Min(a, b) => Expr::Min(subst(a), subst(b)),
        Expr::Max(a, b) => Expr::Max(subst(a), subst(b)),
        Expr::Eq(a, b) => Expr::Eq(subst(a), subst(b)),
        Expr::Ne(a, b) => Expr::Ne(subst(a), subst(b)),
        Expr::Lt(a, b) => Expr::Lt(subst(a), subst(b)),
        Expr::Le(a, b) => Expr::Le(subst(a), subst(b)),
        Expr::Gt(a, b) => Expr::Gt(subst(a), subst(b)),
        Expr::Ge(a, b) => Expr::Ge(subst(a), subst(b)),
        Expr::And(a, b) => Expr::And(subst(a), subst(b)),
        Expr::Or(a, b) => Expr::Or(subst(a), subst(b)),
        Expr::Not(a) => Expr::Not(subst(a)),
        Expr::Select(c, t, f) => Expr::Select(subst(c), subst(t), subst(f)),
        Expr::Load { name: buf, index } => Expr::Load {
            name: buf.clone(),
            index: subst(index),
        },
        Expr::Ramp { base, stride, lanes } => Expr::Ramp {
            base: subst(base),
            stride: subst(stride),
            lanes: *lanes,
        },
        Expr::Broadcast { value, lanes } => Expr::Broadcast {
            value: subst(value),
            lanes: *lanes,
        },
        Expr::Call { name: callee, args } => Expr::Call {
            name: callee.clone(),
            args: args.iter().map(|a| substitute(name, replacement, a)).collect(),
        },
        // Rebinding of `name` is deliberately not treated specially.
        Expr::Let { name: bound, value, body } => Expr::Let {
            name: bound.clone(),
            value: subst(value),
            body: subst(body),
        },
    }
}

/// Replace every occurrence of variable `name` in `stmt` with `replacement`.
pub fn substitute_stmt(name: &str, replacement: &Expr, stmt: &Stmt) -> Stmt {
    let subst = |e: &Expr| substitute(name, replacement, e);
    let subst_s = |s: &Stmt| Box::new(substitute_stmt(name, replacement, s));
    match stmt {
        Stmt::LetStmt { name: bound, value, body } => Stmt::LetStmt {
            name: bound.clone(),
            value: subst(value),
            body: subst_s(body),
        },
        Stmt::Print(args) => Stmt::Print(args.iter().map(|a| subst(a)).collect()),
        Stmt::AssertStmt { condition, message } => Stmt::AssertStmt {
            condition: subst(condition),
            message: message.clone(),
        },
        Stmt::Pipeline {
            name: stage,
            produce,
            update,
            consume,
        } => Stmt::Pipeline {
            name: stage.clone(),
            produce: subst_s(produce),
            update: update.as_deref().map(|s| subst_s(s)),
            consume: subst_s(consume),
        },
        Stmt::For {
            name: loop_var,
            min,
            extent,
            body,
        } => Stmt::For {
            name: loop_var.clone(),
            min: subst(min),
            extent: subst(extent),
            body: subst_s(body),
        },
        Stmt::Store { name: buf, value, index } => Stmt::Store {
            name: buf.clone(),
            value: subst(value),
            index: subst(index),
        },
        Stmt::Provide { name: func, values, args } => Stmt::Provide {
            name: func.clone(),
            values: values.iter().map(|v| subst(v)).collect(),
            args: args.iter().map(|a| subst(a)).collect(),
        },
        Stmt::Allocate { name: buf, size, body } => Stmt::Allocate {
            name: buf.clone(),
            size: subst(size),
            body: subst_s(body),
        },
        Stmt::Realize { name: func, bounds, body } => Stmt::Realize {
            name: func.clone(),
            bounds: bounds.iter().map(|(min, extent)| (subst(min), subst(extent))).collect(),
            body: subst_s(body),
        },
        Stmt::Block(first, rest) => Stmt::Block(subst_s(first), subst_s(rest)),
    }
}
