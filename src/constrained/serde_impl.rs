//! Serde support for constrained values (feature-gated)
//!
//! `Serialize` is transparent. `Deserialize` validates with the type-level
//! predicate and reports a violation as a deserialization error, whatever
//! the policy of the type: malformed input is an input error, not a broken
//! program.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde::{Deserialize, Serialize};
//! use constrained_value::constant::Int;
//! use constrained_value::{Bounded, Positive};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Mixer {
//!     channels: Positive<u32>,             // Validated on deserialize
//!     gain: Bounded<f64, Int<-1>, Int<1>>, // Validated on deserialize
//! }
//!
//! let mixer: Mixer = serde_json::from_str(r#"{"channels": 2, "gain": 0.5}"#).unwrap();
//!
//! let bad: Result<Mixer, _> = serde_json::from_str(r#"{"channels": 0, "gain": 0.5}"#);
//! assert!(bad.is_err());
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

use super::{enforce, ConstrainedValue};
use crate::policy::Reject;
use crate::predicate::Predicate;
use crate::source_location;

impl<T, P, V> Serialize for ConstrainedValue<T, P, V>
where
    T: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.get().serialize(serializer)
    }
}

impl<'de, T, P, V> Deserialize<'de> for ConstrainedValue<T, P, V>
where
    T: Deserialize<'de> + fmt::Display,
    P: Predicate<T> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = T::deserialize(deserializer)?;
        let predicate = P::default();
        enforce::<T, P, Reject>(
            &predicate,
            &value,
            "ConstrainedValue::deserialize",
            source_location!(),
        )
        .map_err(<D::Error as serde::de::Error>::custom)?;

        Ok(Self {
            value,
            predicate,
            _policy: PhantomData,
        })
    }
}
