//! # modulus-remainder: congruence analysis for an arithmetic IR
//!
//! This crate answers one question about an integer-typed expression:
//! *what do we know about its value modulo some constant?* For any
//! expression `e` in its domain it computes a pair `(m, r)` such that
//! every runtime value of `e` satisfies `e ≡ r (mod m)`.
//!
//! Two pairs are special:
//! - `(0, c)`: `e` is exactly the constant `c`;
//! - `(1, 0)`: nothing is known (and this answer is always sound).
//!
//! The analysis is a small abstract interpretation: a post-order walk over
//! the expression tree where each node kind has a transfer function over
//! [`ModulusRemainder`] values, built on gcd and modular-reduction
//! identities. It is sound but deliberately incomplete: a coarser answer
//! than necessary may come back, never a wrong one.
//!
//! ## Quick Start
//!
//! ```rust
//! use modulus_remainder::{modulus_remainder, reduce_expr_modulo, Expr};
//!
//! let x = Expr::var("x");
//! let y = Expr::var("y");
//!
//! // (30x + 3) + (40y + 2): both sides share stride gcd(30, 40) = 10
//! let e = Expr::int(30).mul(x).add(Expr::int(3))
//!     .add(Expr::int(40).mul(y).add(Expr::int(2)));
//!
//! let mr = modulus_remainder(&e);
//! assert_eq!((mr.modulus, mr.remainder), (10, 5));
//!
//! // 10 is a multiple of 5, so the residue mod 5 is determined...
//! assert_eq!(reduce_expr_modulo(&e, 5), Some(0));
//! // ...but mod 3 it is not.
//! assert_eq!(reduce_expr_modulo(&e, 3), None);
//! ```
//!
//! ## Core Components
//!
//! - **[`ir`]**: the expression/statement tree the analyses walk.
//! - **[`congruence`]**: the [`ModulusRemainder`] abstract value and its
//!   transfer algebra (`add`, `sub`, `mul`, `modulo`, `unify`).
//! - **[`analysis`]**: the recursive analyzer and the entry points
//!   [`modulus_remainder`], [`modulus_remainder_with_scope`], and
//!   [`reduce_expr_modulo`].
//! - **[`scope`]**: the binding stack consulted at variable references.
//! - **[`substitute`]**: variable-for-expression rewriting over the IR.
//!
//! Typical clients are compiler passes deciding vector-store alignment or
//! loop-stride facts: "is this index always a multiple of 8?" is
//! `reduce_expr_modulo(index, 8) == Some(0)`.

pub mod analysis;
pub mod arith;
pub mod congruence;
pub mod ir;
pub mod scope;
pub mod substitute;

pub use analysis::{modulus_remainder, modulus_remainder_with_scope, reduce_expr_modulo, ComputeModulusRemainder};
pub use congruence::ModulusRemainder;
pub use ir::{Expr, Stmt, Type};
pub use scope::Scope;
pub use substitute::{substitute, substitute_stmt};
