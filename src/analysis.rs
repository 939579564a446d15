//! Recursive congruence analysis over the expression IR.
//!
//! For an integer-typed scalar expression `e`, [`modulus_remainder`]
//! computes a [`ModulusRemainder`] `(m, r)` such that every value `e` may
//! take at runtime is congruent to `r` modulo `m`. The walk is a post-order
//! structural recursion: children first, then one transfer function per
//! node kind. Free variables contribute the trivial claim unless the caller
//! seeds a [`Scope`] with sharper ones.
//!
//! The analysis is sound but deliberately incomplete: `(1, 0)` may come
//! back where a sharper claim exists (and always does for `Div`, `Cast`,
//! `Load`, and `Call`).
//!
//! Float-, vector-, and boolean-typed expression kinds are outside the
//! domain and panic; statement nodes cannot reach the analyzer at all,
//! since [`crate::ir::Stmt`] is a separate type.

use log::{debug, trace};

use crate::arith::modulo;
use crate::congruence::ModulusRemainder;
use crate::ir::Expr;
use crate::scope::Scope;

/// Analyzer state: the binding environment for `Let` bodies.
///
/// One value per top-level call; nothing is cached across calls.
#[derive(Debug, Default)]
pub struct ComputeModulusRemainder {
    scope: Scope<ModulusRemainder>,
}

impl ComputeModulusRemainder {
    /// Analyzer with an empty environment.
    pub fn new() -> Self {
        Self { scope: Scope::new() }
    }

    /// Analyzer with a caller-provided environment.
    pub fn with_scope(scope: Scope<ModulusRemainder>) -> Self {
        Self { scope }
    }

    /// Compute the congruence claim for `e`.
    ///
    /// Panics on float-, vector-, or boolean-typed kinds: those are
    /// programmer errors, not analyzable inputs.
    pub fn analyze(&mut self, e: &Expr) -> ModulusRemainder {
        let result = match e {
            Expr::IntImm(v) => {
                // The only source of modulus == 0: an exact constant.
                ModulusRemainder::constant(*v)
            }
            Expr::FloatImm(_) => panic!("modulus_remainder of float"),
            // No assumption about sign-extension or truncation.
            Expr::Cast(_, _) => ModulusRemainder::trivial(),
            Expr::Var(name) => match self.scope.get(name) {
                Some(mr) => *mr,
                None => ModulusRemainder::trivial(),
            },
            Expr::Add(a, b) => self.analyze(a).add(self.analyze(b)),
            Expr::Sub(a, b) => self.analyze(a).sub(self.analyze(b)),
            Expr::Mul(a, b) => self.analyze(a).mul(self.analyze(b)),
            // Sharper division facts require provable divisibility, and
            // divisions with that structure belong to a simplifier.
            Expr::Div(_, _) => ModulusRemainder::trivial(),
            Expr::Mod(a, b) => self.analyze(a).modulo(self.analyze(b)),
            Expr::Min(a, b) | Expr::Max(a, b) => self.analyze(a).unify(self.analyze(b)),
            Expr::Eq(_, _)
            | Expr::Ne(_, _)
            | Expr::Lt(_, _)
            | Expr::Le(_, _)
            | Expr::Gt(_, _)
            | Expr::Ge(_, _)
            | Expr::And(_, _)
            | Expr::Or(_, _)
            | Expr::Not(_) => panic!("modulus_remainder of bool"),
            // The condition is boolean-typed; only the value branches count.
            Expr::Select(_, t, f) => self.analyze(t).unify(self.analyze(f)),
            Expr::Load { .. } => ModulusRemainder::trivial(),
            Expr::Ramp { .. } | Expr::Broadcast { .. } => panic!("modulus_remainder of vector"),
            Expr::Call { .. } => ModulusRemainder::trivial(),
            Expr::Let { name, value, body } => {
                let value = self.analyze(value);
                self.scope.push(name.clone(), value);
                let result = self.analyze(body);
                self.scope.pop(name);
                result
            }
        };
        trace!("analyze({}) -> {}", e, result);
        result
    }
}

/// Congruence claim for `e` with no free-variable information.
pub fn modulus_remainder(e: &Expr) -> ModulusRemainder {
    let mut analyzer = ComputeModulusRemainder::new();
    let result = analyzer.analyze(e);
    debug!("modulus_remainder({}) = {}", e, result);
    result
}

/// Congruence claim for `e` under a caller-provided scope snapshot.
///
/// The scope is copied in; the caller's copy is untouched.
pub fn modulus_remainder_with_scope(e: &Expr, scope: &Scope<ModulusRemainder>) -> ModulusRemainder {
    let mut analyzer = ComputeModulusRemainder::with_scope(scope.clone());
    let result = analyzer.analyze(e);
    debug!("modulus_remainder({}) = {} (seeded scope)", e, result);
    result
}

/// Reduce `e` modulo a known positive `modulus`, if the analysis permits.
///
/// With a claim `e = M·k + R`, the residue of `e` mod `modulus` is uniquely
/// determined exactly when `modulus` divides `M`: say the analysis claims
/// `e = 16·k + 13`; then `e mod 8` is always `5`, but `e mod 3` depends
/// on `k` and stays undetermined.
pub fn reduce_expr_modulo(e: &Expr, modulus: i64) -> Option<i64> {
    assert!(modulus > 0, "reduce_expr_modulo of non-positive modulus {}", modulus);
    let result = modulus_remainder(e);
    if result.modulus % modulus == 0 {
        Some(modulo(result.remainder, modulus))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Type;

    fn x() -> Expr {
        Expr::var("x")
    }

    fn y() -> Expr {
        Expr::var("y")
    }

    fn check(e: Expr, modulus: i64, remainder: i64) {
        let result = modulus_remainder(&e);
        assert_eq!(
            (result.modulus, result.remainder),
            (modulus, remainder),
            "for expression {}",
            e
        );
    }

    #[test]
    fn test_known_congruences() {
        // (30x + 3) + (40y + 2) = 10k + 5
        check(
            Expr::int(30).mul(x()).add(Expr::int(3)).add(Expr::int(40).mul(y()).add(Expr::int(2))),
            10,
            5,
        );
        // (6x + 3)(4y + 1) = 2k + 1
        check(
            Expr::int(6).mul(x()).add(Expr::int(3)).mul(Expr::int(4).mul(y()).add(Expr::int(1))),
            2,
            1,
        );
        // max(30x - 24, 40y + 31) = 5k + 1
        check(
            Expr::max(
                Expr::int(30).mul(x()).sub(Expr::int(24)),
                Expr::int(40).mul(y()).add(Expr::int(31)),
            ),
            5,
            1,
        );
        // 10x - 33y: gcd is 1, nothing known
        check(Expr::int(10).mul(x()).sub(Expr::int(33).mul(y())), 1, 0);
        // 10x - 35y = 5k
        check(Expr::int(10).mul(x()).sub(Expr::int(35).mul(y())), 5, 0);
        // A literal is an exact constant.
        check(Expr::int(123), 0, 123);
        // let y = x*3 + 4 in y*3 + 4 = 9k + 7
        check(
            Expr::let_in(
                "y",
                x().mul(Expr::int(3)).add(Expr::int(4)),
                y().mul(Expr::int(3)).add(Expr::int(4)),
            ),
            9,
            7,
        );
    }

    #[test]
    fn test_reduce_expr_modulo() {
        let e = Expr::int(30).mul(x()).add(Expr::int(3)).add(Expr::int(40).mul(y()).add(Expr::int(2)));
        // Claim is 10k + 5; 10 is a multiple of 5, so the residue mod 5 is fixed.
        assert_eq!(reduce_expr_modulo(&e, 5), Some(0));
        assert_eq!(reduce_expr_modulo(&e, 2), Some(1));
        // 10 is not a multiple of 3: undetermined.
        assert_eq!(reduce_expr_modulo(&e, 3), None);

        // A constant reduces by any positive modulus.
        assert_eq!(reduce_expr_modulo(&Expr::int(123), 8), Some(3));
        assert_eq!(reduce_expr_modulo(&Expr::int(-1), 8), Some(7));
    }

    #[test]
    #[should_panic(expected = "non-positive modulus")]
    fn test_reduce_expr_modulo_rejects_zero() {
        reduce_expr_modulo(&Expr::int(1), 0);
    }

    #[test]
    fn test_opaque_kinds_are_trivial() {
        check(x().div(Expr::int(2)), 1, 0);
        check(x().cast(Type::Int64), 1, 0);
        check(Expr::load("buf", x()), 1, 0);
        check(Expr::call("extern_fn", vec![Expr::int(8).mul(x())]), 1, 0);
        // Free variable with no scope entry.
        check(x(), 1, 0);
    }

    #[test]
    fn test_mod_and_select() {
        // (8x + 5) mod (6y + 2) = 2k + 1
        check(
            Expr::int(8)
                .mul(x())
                .add(Expr::int(5))
                .modulo(Expr::int(6).mul(y()).add(Expr::int(2))),
            2,
            1,
        );
        // select picks either branch; the condition is ignored.
        check(
            Expr::select(
                x().lt(y()),
                Expr::int(30).mul(x()).add(Expr::int(13)),
                Expr::int(40).mul(y()).add(Expr::int(27)),
            ),
            2,
            1,
        );
    }

    #[test]
    fn test_nested_lets_shadow() {
        // let x = 6a in (let x = 4b + x in x): inner x = 4b + 6a = 2k
        let e = Expr::let_in(
            "x",
            Expr::int(6).mul(Expr::var("a")),
            Expr::let_in("x", Expr::int(4).mul(Expr::var("b")).add(x()), x()),
        );
        check(e, 2, 0);

        // The value side of a let sees the outer binding, not its own.
        // let x = 4 in (let x = x + 1 in x) = 5
        let e = Expr::let_in(
            "x",
            Expr::int(4),
            Expr::let_in("x", x().add(Expr::int(1)), x()),
        );
        check(e, 0, 5);
    }

    #[test]
    fn test_scope_seeded_analysis() {
        let mut scope = Scope::new();
        scope.push("x", ModulusRemainder::new(8, 3));

        // x + 1 under x ≡ 3 (mod 8)
        let result = modulus_remainder_with_scope(&x().add(Expr::int(1)), &scope);
        assert_eq!(result, ModulusRemainder::new(8, 4));

        // The caller's scope is a snapshot: a let inside the expression
        // does not leak back out.
        let e = Expr::let_in("x", Expr::int(5), x());
        assert_eq!(modulus_remainder_with_scope(&e, &scope), ModulusRemainder::constant(5));
        assert_eq!(scope.get("x"), Some(&ModulusRemainder::new(8, 3)));
    }

    #[test]
    #[should_panic(expected = "modulus_remainder of float")]
    fn test_rejects_float() {
        modulus_remainder(&Expr::float(1.5));
    }

    #[test]
    #[should_panic(expected = "modulus_remainder of bool")]
    fn test_rejects_bool() {
        modulus_remainder(&x().lt(y()));
    }

    #[test]
    #[should_panic(expected = "modulus_remainder of vector")]
    fn test_rejects_vector() {
        modulus_remainder(&Expr::ramp(x(), Expr::int(1), 8));
    }
}
