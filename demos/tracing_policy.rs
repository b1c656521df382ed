//! Demonstrates the tracing-backed violation policy
//!
//! Run with: cargo run --example tracing_policy --features tracing

use constrained_value::constant::{Int, Zero};
use constrained_value::policy::LogAndReject;
use constrained_value::predicate::{Bounded, Near};
use constrained_value::ulp::Ulps;
use constrained_value::ConstrainedValue;

type Volume = ConstrainedValue<u8, Bounded<Int<0>, Int<11>>, LogAndReject>;
type Residual = ConstrainedValue<f64, Near<Zero, Ulps<4>>, LogAndReject>;

fn main() {
    // Set up tracing subscriber
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    tracing::info!("Starting constrained value demo");

    let mut volume = match Volume::try_new(7) {
        Ok(volume) => volume,
        Err(e) => {
            tracing::error!("Unexpected violation: {}", e);
            return;
        }
    };
    tracing::info!("Volume set to {}", volume);

    // Rejected with a structured error event; the value stays at 7
    if volume.try_set(12).is_err() {
        tracing::warn!("Volume left at {}", volume);
    }

    for candidate in [0.0, f64::from_bits(4), f64::from_bits(5), -1e-300] {
        match Residual::try_new(candidate) {
            Ok(r) => tracing::info!("Residual {:e} accepted", *r),
            Err(e) => tracing::debug!(predicate = e.predicate(), "Residual rejected"),
        }
    }
}
