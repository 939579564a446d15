//! The modulus/remainder abstract value and its transfer algebra.
//!
//! A [`ModulusRemainder`] `(m, r)` is a sound claim about an integer
//! expression: every concrete value `v` the expression may take satisfies
//! `v ≡ r (mod m)`. Equivalently, `(m, r)` denotes the affine set
//! `{ m·k + r : k ∈ ℤ }`.
//!
//! # Encoding
//!
//! - `m = 0`: the expression is exactly the constant `r` (singleton).
//! - `m = 1`: no information; `r` is normalised to `0`.
//! - `m > 1`: proper congruence with `0 ≤ r < m`.
//!
//! # Lattice Structure
//!
//! ```text
//!          (1, 0)            ⊤ - any integer
//!         /   |   \
//!    (2, r) (3, r) ...       proper congruences, ordered by divisibility
//!         \   |   /
//!          (0, c)            singleton constants
//! ```
//!
//! There is no bottom element: the analysis never proves unreachability,
//! and `(1, 0)` is always a sound answer. [`ModulusRemainder::unify`] is
//! the join used wherever control may take either of two values.

use std::fmt;

use crate::arith::{gcd, modulo};

/// A congruence claim `value ≡ remainder (mod modulus)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModulusRemainder {
    /// Modulus of the claim; `0` encodes a constant, `1` encodes no information.
    pub modulus: i64,
    /// Remainder of the claim; in `[0, modulus)` whenever `modulus > 1`.
    pub remainder: i64,
}

impl ModulusRemainder {
    /// Canonicalise a raw `(modulus, remainder)` pair.
    ///
    /// Takes `|modulus|`, collapses a modulus of one to [`trivial`][Self::trivial],
    /// and reduces the remainder into `[0, modulus)`. Constants (`modulus == 0`)
    /// keep their remainder untouched.
    pub fn new(modulus: i64, remainder: i64) -> Self {
        if modulus == 0 {
            return Self { modulus: 0, remainder };
        }
        let modulus = match modulus.checked_abs() {
            Some(m) => m,
            None => return Self::trivial(),
        };
        if modulus == 1 {
            return Self::trivial();
        }
        Self {
            modulus,
            remainder: modulo(remainder, modulus),
        }
    }

    /// The exact claim "this expression is the constant `value`".
    pub const fn constant(value: i64) -> Self {
        Self {
            modulus: 0,
            remainder: value,
        }
    }

    /// The always-true claim `(1, 0)`: any integer at all.
    pub const fn trivial() -> Self {
        Self {
            modulus: 1,
            remainder: 0,
        }
    }

    /// Does this claim pin the expression to a single constant?
    pub fn is_constant(&self) -> bool {
        self.modulus == 0
    }

    /// Is this the no-information claim `(1, 0)`?
    pub fn is_trivial(&self) -> bool {
        self.modulus == 1
    }

    /// Transfer function for addition.
    ///
    /// `(a.m·k + a.r) + (b.m·j + b.r)` is a multiple of `gcd(a.m, b.m)`
    /// plus `a.r + b.r`.
    pub fn add(self, other: Self) -> Self {
        let m = gcd(self.modulus, other.modulus);
        match self.remainder.checked_add(other.remainder) {
            Some(r) => Self::new(m, modulo(r, m)),
            None => Self::trivial(),
        }
    }

    /// Transfer function for subtraction.
    pub fn sub(self, other: Self) -> Self {
        let m = gcd(self.modulus, other.modulus);
        match self.remainder.checked_sub(other.remainder) {
            Some(r) => Self::new(m, modulo(r, m)),
            None => Self::trivial(),
        }
    }

    /// Transfer function for multiplication.
    ///
    /// Case split, most precise first:
    /// 1. one side constant `c`: scale the other side, `(c·m, c·r)`;
    /// 2. both sides offset-free: `(a.m·b.m, 0)`;
    /// 3. one side offset-free: its modulus times the gcd of the other
    ///    side's modulus and remainder, offset-free;
    /// 4. otherwise reduce to the common modulus `gcd(a.m, b.m)` and
    ///    multiply the remainders there.
    pub fn mul(self, other: Self) -> Self {
        if self.modulus == 0 {
            // constant times congruence: scale both components
            let m = self.remainder.checked_mul(other.modulus);
            let r = self.remainder.checked_mul(other.remainder);
            return match (m, r) {
                (Some(m), Some(r)) => Self::new(m, r),
                _ => Self::trivial(),
            };
        }
        if other.modulus == 0 {
            return other.mul(self);
        }
        if self.remainder == 0 && other.remainder == 0 {
            // multiple times multiple
            return match self.modulus.checked_mul(other.modulus) {
                Some(m) => Self::new(m, 0),
                None => Self::trivial(),
            };
        }
        if self.remainder == 0 {
            let g = gcd(other.modulus, other.remainder);
            return match self.modulus.checked_mul(g) {
                Some(m) => Self::new(m, 0),
                None => Self::trivial(),
            };
        }
        if other.remainder == 0 {
            let g = gcd(self.modulus, self.remainder);
            return match other.modulus.checked_mul(g) {
                Some(m) => Self::new(m, 0),
                None => Self::trivial(),
            };
        }
        // No structure left to exploit: bring both sides to the common
        // modulus and multiply the remainders there.
        let m = gcd(self.modulus, other.modulus);
        match self.remainder.checked_mul(other.remainder) {
            Some(r) => Self::new(m, modulo(r, m)),
            None => Self::trivial(),
        }
    }

    /// Transfer function for modulo.
    ///
    /// `a mod b` equals `a + z·b` for some unknown integer `z`, so the
    /// result is congruent to `a.r` modulo `gcd(a.m, b.m, b.r)`.
    pub fn modulo(self, other: Self) -> Self {
        let m = gcd(gcd(self.modulus, other.modulus), other.remainder);
        Self::new(m, modulo(self.remainder, m))
    }

    /// Join of two alternatives: the coarsest congruence covering both.
    ///
    /// Used wherever control may produce either value (`min`, `max`,
    /// `select`). The common modulus is `gcd(a.m, b.m)` refined by the
    /// remainder difference, after which both remainders reduce to the
    /// same class:
    ///
    /// ```text
    /// unify(30k + 13, 40j + 27)
    ///   = unify(10k + 3, 10j + 7)
    ///   = 2i + 1
    /// ```
    ///
    /// Panics if the reduced remainders diverge; that would be a bug in
    /// the algebra itself, not bad input.
    pub fn unify(self, other: Self) -> Self {
        let m = gcd(self.modulus, other.modulus);
        let diff = self.remainder.checked_sub(other.remainder).and_then(i64::checked_abs);
        let m = match diff {
            Some(d) => gcd(m, d),
            None => return Self::trivial(),
        };
        let ra = modulo(self.remainder, m);
        let rb = modulo(other.remainder, m);
        assert_eq!(ra, rb, "congruence unification produced diverging remainders");
        Self::new(m, ra)
    }
}

impl fmt::Display for ModulusRemainder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modulus == 0 {
            write!(f, "{}", self.remainder)
        } else if self.modulus == 1 {
            write!(f, "⊤")
        } else {
            write!(f, "{} mod {}", self.remainder, self.modulus)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalisation() {
        // Negative modulus and out-of-range remainder both normalise.
        assert_eq!(ModulusRemainder::new(-10, 3), ModulusRemainder::new(10, 3));
        assert_eq!(ModulusRemainder::new(10, 23), ModulusRemainder::new(10, 3));
        assert_eq!(ModulusRemainder::new(10, -7), ModulusRemainder::new(10, 3));

        // Modulus one collapses to (1, 0).
        assert_eq!(ModulusRemainder::new(1, 5), ModulusRemainder::trivial());

        // Constants keep their remainder, sign included.
        assert_eq!(ModulusRemainder::new(0, -5).remainder, -5);
    }

    #[test]
    fn test_add_sub() {
        let a = ModulusRemainder::new(30, 3);
        let b = ModulusRemainder::new(40, 2);
        // gcd(30, 40) = 10, 3 + 2 = 5
        assert_eq!(a.add(b), ModulusRemainder::new(10, 5));

        // Constants fold exactly.
        let c = ModulusRemainder::constant(7);
        let d = ModulusRemainder::constant(-9);
        assert_eq!(c.add(d), ModulusRemainder::constant(-2));
        assert_eq!(c.sub(d), ModulusRemainder::constant(16));

        // (10k + 0) - (35j + 0): gcd(10, 35) = 5
        let e = ModulusRemainder::new(10, 0);
        let f = ModulusRemainder::new(35, 0);
        assert_eq!(e.sub(f), ModulusRemainder::new(5, 0));
    }

    #[test]
    fn test_mul_constant_scaling() {
        // 3 * (4j + 1) = 12j + 3
        let c = ModulusRemainder::constant(3);
        let b = ModulusRemainder::new(4, 1);
        assert_eq!(c.mul(b), ModulusRemainder::new(12, 3));
        assert_eq!(b.mul(c), ModulusRemainder::new(12, 3));

        // Negative constant: -3 * (4j + 1) = -12j - 3 ≡ 9 (mod 12)
        let n = ModulusRemainder::constant(-3);
        assert_eq!(n.mul(b), ModulusRemainder::new(12, 9));

        // Zero constant annihilates.
        assert_eq!(ModulusRemainder::constant(0).mul(b), ModulusRemainder::constant(0));
    }

    #[test]
    fn test_mul_offset_free() {
        // (6k) * (4j) = 24i
        let a = ModulusRemainder::new(6, 0);
        let b = ModulusRemainder::new(4, 0);
        assert_eq!(a.mul(b), ModulusRemainder::new(24, 0));

        // (6k) * (4j + 2): every factor of the right side is even,
        // so the product is a multiple of 6 * gcd(4, 2) = 12.
        let c = ModulusRemainder::new(4, 2);
        assert_eq!(a.mul(c), ModulusRemainder::new(12, 0));
    }

    #[test]
    fn test_mul_fallback() {
        // (6k + 3) * (4j + 1): gcd(6, 4) = 2, 3 * 1 ≡ 1 (mod 2)
        let a = ModulusRemainder::new(6, 3);
        let b = ModulusRemainder::new(4, 1);
        assert_eq!(a.mul(b), ModulusRemainder::new(2, 1));
    }

    #[test]
    fn test_mul_overflow_widens() {
        let big = ModulusRemainder::constant(i64::MAX);
        let b = ModulusRemainder::new(4, 1);
        assert_eq!(big.mul(b), ModulusRemainder::trivial());
    }

    #[test]
    fn test_modulo() {
        // (8k + 5) mod (6j + 2): gcd(8, 6, 2) = 2, 5 ≡ 1 (mod 2)
        let a = ModulusRemainder::new(8, 5);
        let b = ModulusRemainder::new(6, 2);
        assert_eq!(a.modulo(b), ModulusRemainder::new(2, 1));

        // x mod 0 passes x through: both constants.
        let c = ModulusRemainder::constant(13);
        let z = ModulusRemainder::constant(0);
        assert_eq!(c.modulo(z), ModulusRemainder::constant(13));
    }

    #[test]
    fn test_unify_idempotent() {
        for mr in [
            ModulusRemainder::new(10, 3),
            ModulusRemainder::constant(42),
            ModulusRemainder::trivial(),
        ] {
            assert_eq!(mr.unify(mr), mr);
        }
    }

    #[test]
    fn test_unify_alternatives() {
        // unify(30k + 6, 40j + 31): gcd(30, 40) = 10, |6 - 31| = 25,
        // gcd(10, 25) = 5, both remainders reduce to 1.
        let a = ModulusRemainder::new(30, 6);
        let b = ModulusRemainder::new(40, 31);
        assert_eq!(a.unify(b), ModulusRemainder::new(5, 1));
        assert_eq!(b.unify(a), ModulusRemainder::new(5, 1));

        // Two distinct constants collapse to their difference's congruence.
        let c5 = ModulusRemainder::constant(5);
        let c8 = ModulusRemainder::constant(8);
        assert_eq!(c5.unify(c8), ModulusRemainder::new(3, 2));

        // Equal constants stay exact.
        assert_eq!(c5.unify(c5), c5);
    }

    #[test]
    fn test_display() {
        assert_eq!(ModulusRemainder::constant(123).to_string(), "123");
        assert_eq!(ModulusRemainder::trivial().to_string(), "⊤");
        assert_eq!(ModulusRemainder::new(10, 3).to_string(), "3 mod 10");
    }
}
