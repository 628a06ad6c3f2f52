//! # Serde module for CardinalityEstimator
//!
//! This module provides serde-based (serialization and deserialization) features for
//! `CardinalityEstimator`, enabled with the `with_serde` feature.
//!
//! `CardinalityEstimator` is serialized as a tuple `(bucket_count, registers)`. The bucket count
//! is stored explicitly so that a truncated register list is detected on deserialization.
//! Deserialization validates the shape the same way `CardinalityEstimator::new` does and
//! recomputes all derived fields.
//!
//! Refer to the serde documentation for more details on custom serialization and deserialization:
//! - [Serialization](https://serde.rs/impl-serialize.html)
//! - [Deserialization](https://serde.rs/impl-deserialize.html)
use serde::de::Error;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize};
use sha2::Digest;

use crate::estimator::CardinalityEstimator;

impl<D: Digest> Serialize for CardinalityEstimator<D> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut tup = serializer.serialize_tuple(2)?;
        tup.serialize_element(&self.bucket_count())?;
        tup.serialize_element(self.registers())?;
        tup.end()
    }
}

impl<'de, D: Digest> Deserialize<'de> for CardinalityEstimator<D> {
    fn deserialize<De>(deserializer: De) -> Result<Self, De::Error>
    where
        De: serde::Deserializer<'de>,
    {
        let (bucket_count, registers): (usize, Vec<u8>) = Deserialize::deserialize(deserializer)?;
        if registers.len() != bucket_count {
            return Err(Error::custom(format!(
                "expected {} registers, found {}",
                bucket_count,
                registers.len()
            )));
        }
        CardinalityEstimator::from_registers(registers).map_err(Error::custom)
    }
}
