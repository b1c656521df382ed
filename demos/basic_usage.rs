//! Constrained Values Example
//!
//! Walks through the alias types, the fallible `try_` operations, ULP
//! tolerances and bit-exact constants.
//!
//! Run with: cargo run --example basic_usage

use constrained_value::constant::{Bitwise, ConstF64, Int, One, Zero};
use constrained_value::policy::{Ignore, Reject};
use constrained_value::predicate::{self, bounded, from_fn, Absolute, Bounded, Predicate};
use constrained_value::ulp::{ulp_distance, UlpOffset, Ulps};
use constrained_value::ConstrainedValue;

fn main() {
    println!("=== Constrained Values Example ===\n");

    aliases();
    fallible_operations();
    runtime_predicates();
    ulp_tolerances();
    bitwise_constants();
}

/// Demonstrates the ready-made aliases with the default policy
fn aliases() {
    println!("--- Aliases ---\n");

    type Percent = constrained_value::Bounded<u8, Int<0>, Int<100>>;
    type Rate = constrained_value::Positive<f64>;

    let mut p = Percent::new(40);
    p.set(100);
    println!("Percent after set(100): {}", p);
    println!("Percent::is_valid(&101): {}", Percent::is_valid(&101));

    let rate = Rate::new(0.25);
    println!("Rate: {:?}", rate);
    println!("Rate::is_valid(&-0.0): {}", Rate::is_valid(&-0.0));

    println!();
}

/// Demonstrates the Reject policy and the try_ operations
fn fallible_operations() {
    println!("--- Fallible Operations ---\n");

    type Count = ConstrainedValue<i64, predicate::NonNegative, Reject>;

    let mut count = match Count::try_new(3) {
        Ok(count) => count,
        Err(e) => {
            println!("unexpected: {}", e);
            return;
        }
    };

    match count.try_set(-1) {
        Ok(()) => println!("set(-1) accepted"),
        Err(e) => println!("set(-1) rejected: {}", e),
    }
    println!("count is still {}", count);

    let doubled = count.try_map(|n| n * 2);
    println!("try_map(|n| n * 2): {:?}", doubled.map(|c| c.into_inner()));

    type Flag = ConstrainedValue<i32, predicate::EqualTo<One>, Ignore>;
    println!("Flag::try_new(0) with Ignore: {:?}", Flag::try_new(0).err());

    println!();
}

/// Demonstrates predicates chosen at run time
fn runtime_predicates() {
    println!("--- Run-time Predicates ---\n");

    type Gain = ConstrainedValue<f32, Bounded<f32, f32>, Reject>;

    let limits = bounded(-6.0_f32, 6.0_f32);
    println!("predicate: {}", Predicate::<f32>::description(&limits));

    if let Ok(mut gain) = Gain::try_with_predicate(limits, 1.5) {
        println!("set(9.0): {:?}", gain.try_set(9.0).is_ok());
        println!("admits(&-6.0): {}", gain.admits(&-6.0));
    }

    type Even = ConstrainedValue<u32, predicate::FromFn<fn(&u32) -> bool>, Reject>;

    let is_even: fn(&u32) -> bool = |n| n % 2 == 0;
    match Even::try_with_predicate(from_fn(is_even).named("even"), 7) {
        Ok(v) => println!("even: {}", v),
        Err(e) => println!("{}", e),
    }

    println!();
}

/// Demonstrates tolerances measured in representable steps
fn ulp_tolerances() {
    println!("--- ULP Tolerances ---\n");

    type Tiny = ConstrainedValue<f64, predicate::Near<Zero, Ulps<2>>, Reject>;
    type Half = ConstF64<{ 0.5_f64.to_bits() }>;
    type AboutHalf = ConstrainedValue<f64, predicate::Near<Half, Absolute<Zero>>, Reject>;

    println!("Tiny::is_valid(&-0.0): {}", Tiny::is_valid(&-0.0));
    println!(
        "Tiny::is_valid(&2 subnormal steps): {}",
        Tiny::is_valid(&f64::from_bits(2))
    );
    println!(
        "Tiny::is_valid(&3 subnormal steps): {}",
        Tiny::is_valid(&f64::from_bits(3))
    );
    println!("AboutHalf::is_valid(&0.5): {}", AboutHalf::is_valid(&0.5));

    let one = 1.0_f64;
    let shifted = one + UlpOffset::new(3);
    println!("1.0 + 3 ulp = {:e}", shifted);
    println!("ulp_distance(1.0, shifted) = {}", ulp_distance(one, shifted));
    println!("-0.0 vs 0.0: {} ulp", ulp_distance(-0.0_f64, 0.0_f64));

    println!();
}

/// Demonstrates bit-exact constants
fn bitwise_constants() {
    println!("--- Bitwise Constants ---\n");

    let neg_zero = Bitwise::new(-0.0_f64);
    println!("{:?} has bits {:#x}", neg_zero, neg_zero.bits());

    let doubled = Bitwise::new(1.5_f64) * Bitwise::new(2.0_f64);
    println!("1.5 * 2.0 = {}", doubled);

    type Threshold = ConstF64<{ 0.75_f64.to_bits() }>;
    println!("Threshold::VALUE = {}", Threshold::VALUE);

    println!();
}
