//! Snowflake ID - 64-bit, time-ordered identifier used for users, rooms
//! and character sheets.
//!
//! Layout, high to low: 42 bits of milliseconds since 2024-01-01 UTC,
//! 10 bits of worker id, 12 bits of per-millisecond sequence.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

const EPOCH_MILLIS: i64 = 1_704_067_200_000;
const WORKER_BITS: u32 = 10;
const SEQUENCE_BITS: u32 = 12;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;

/// Time-ordered 64-bit identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw value as stored in BIGINT columns
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

/// Error when parsing a Snowflake from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid snowflake format")]
    InvalidFormat,
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(Snowflake)
            .map_err(|_| SnowflakeParseError::InvalidFormat)
    }
}

// Serialized as a string so browser clients keep full precision
impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

struct SnowflakeVisitor;

impl de::Visitor<'_> for SnowflakeVisitor {
    type Value = Snowflake;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a snowflake id as a string or integer")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Snowflake, E> {
        Ok(Snowflake(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Snowflake, E> {
        i64::try_from(value)
            .map(Snowflake)
            .map_err(|_| E::custom("snowflake out of range"))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Snowflake, E> {
        value
            .parse()
            .map_err(|_| E::custom("invalid snowflake string"))
    }
}

// Clients may send ids back as strings or numbers
impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(SnowflakeVisitor)
    }
}

/// Lock-free Snowflake generator, up to 4096 ids per millisecond per worker.
///
/// Entity ids are assigned by the service layer before insert, so the
/// store never has to hand back generated keys.
pub struct SnowflakeGenerator {
    worker_bits: i64,
    /// Last issued `millis << SEQUENCE_BITS | sequence`
    state: AtomicI64,
}

impl SnowflakeGenerator {
    /// Largest accepted worker id
    pub const MAX_WORKER_ID: u16 = (1 << WORKER_BITS) - 1;

    /// Worker ids above `MAX_WORKER_ID` are truncated to their low 10 bits;
    /// configuration rejects them before they get here.
    pub fn new(worker_id: u16) -> Self {
        let worker_id = i64::from(worker_id & Self::MAX_WORKER_ID);
        Self {
            worker_bits: worker_id << SEQUENCE_BITS,
            state: AtomicI64::new(0),
        }
    }

    /// Next id, strictly greater than every id this generator issued before.
    ///
    /// If the clock steps back, ids keep counting from the last issued
    /// millisecond instead of waiting.
    pub fn generate(&self) -> Snowflake {
        loop {
            let now = Utc::now().timestamp_millis() - EPOCH_MILLIS;
            let prev = self.state.load(Ordering::Acquire);
            let last_millis = prev >> SEQUENCE_BITS;

            let next = if now > last_millis {
                now << SEQUENCE_BITS
            } else if prev & SEQUENCE_MASK < SEQUENCE_MASK {
                prev + 1
            } else {
                // sequence exhausted for this millisecond
                std::hint::spin_loop();
                continue;
            };

            if self
                .state
                .compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                let millis = next >> SEQUENCE_BITS;
                let sequence = next & SEQUENCE_MASK;
                return Snowflake(
                    (millis << (WORKER_BITS + SEQUENCE_BITS)) | self.worker_bits | sequence,
                );
            }
        }
    }
}
