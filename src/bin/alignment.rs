//! Alignment analysis walkthrough.
//!
//! Shows the congruence analysis answering the question a vectorizer asks
//! about store/load indices: is this index provably a multiple of the
//! vector width?

use modulus_remainder::{
    modulus_remainder, modulus_remainder_with_scope, reduce_expr_modulo, Expr, ModulusRemainder, Scope,
};
use simplelog::*;

fn main() {
    // Initialize logging
    TermLogger::init(LevelFilter::Info, Config::default(), TerminalMode::Mixed, ColorChoice::Auto).unwrap();

    println!("=== Congruence Analysis ===\n");

    let x = Expr::var("x");
    let y = Expr::var("y");

    // Example 1: strides combine through addition
    println!("Example 1: Sums of strided terms");
    let e1 = Expr::int(30)
        .mul(x.clone())
        .add(Expr::int(3))
        .add(Expr::int(40).mul(y.clone()).add(Expr::int(2)));
    println!("  {}  ~  {}", e1, modulus_remainder(&e1));

    let e2 = Expr::int(10).mul(x.clone()).sub(Expr::int(35).mul(y.clone()));
    println!("  {}  ~  {}\n", e2, modulus_remainder(&e2));

    // Example 2: joins at control merges
    println!("Example 2: min/max/select merge both alternatives");
    let e3 = Expr::max(
        Expr::int(30).mul(x.clone()).sub(Expr::int(24)),
        Expr::int(40).mul(y.clone()).add(Expr::int(31)),
    );
    println!("  {}  ~  {}\n", e3, modulus_remainder(&e3));

    // Example 3: alignment queries for a vector store
    println!("Example 3: Is the index 8-aligned?");
    let index = Expr::int(16).mul(x.clone()).add(Expr::int(8));
    for width in [8, 16, 3] {
        match reduce_expr_modulo(&index, width) {
            Some(0) => println!("  {} is always a multiple of {}", index, width),
            Some(r) => println!("  {} is {} plus a multiple of {}", index, r, width),
            None => println!("  {} mod {} is not determined", index, width),
        }
    }
    println!();

    // Example 4: a caller-known fact about a free variable
    println!("Example 4: Seeding the scope with x = 4k + 1");
    let mut scope = Scope::new();
    scope.push("x", ModulusRemainder::new(4, 1));
    let e4 = Expr::int(2).mul(x.clone()).add(Expr::int(1));
    let result = modulus_remainder_with_scope(&e4, &scope);
    println!("  {}  ~  {}", e4, result);
}
