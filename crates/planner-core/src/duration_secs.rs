//! Serde adapters storing `chrono::Duration` as a number of seconds.
//!
//! Fractional seconds are kept down to millisecond precision.

use chrono::Duration;
use serde::{Deserialize, Deserializer, Serializer};

fn to_secs(duration: &Duration) -> f64 {
    duration.num_milliseconds() as f64 / 1000.0
}

/// Largest magnitude, in milliseconds, accepted from a document.
const MAX_MILLIS: f64 = i64::MAX as f64;

fn from_secs<E: serde::de::Error>(secs: f64) -> Result<Duration, E> {
    if !secs.is_finite() {
        return Err(E::custom("duration must be a finite number of seconds"));
    }
    let millis = (secs * 1000.0).round();
    if millis.abs() >= MAX_MILLIS {
        return Err(E::custom(format!("duration of {secs}s is out of range")));
    }
    Duration::try_milliseconds(millis as i64)
        .ok_or_else(|| E::custom(format!("duration of {secs}s is out of range")))
}

pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(to_secs(duration))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    from_secs(f64::deserialize(deserializer)?)
}

/// Same encoding for `Option<Duration>`; `None` maps to `null`.
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        duration: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match duration {
            Some(d) => serializer.serialize_some(&to_secs(d)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Option::<f64>::deserialize(deserializer)?
            .map(from_secs::<D::Error>)
            .transpose()
    }
}
