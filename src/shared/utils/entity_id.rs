use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, OnceLock};

/// Crockford base32 alphabet used for the text form of entity ids
const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Length of the text form of an entity id
pub const ENTITY_ID_LENGTH: usize = 13;

/// 2020-01-01T00:00:00Z in milliseconds since the Unix epoch
const TSID_EPOCH_MILLIS: i64 = 1_577_836_800_000;

const RANDOM_BITS: u32 = 22;
const RANDOM_MASK: u64 = (1 << RANDOM_BITS) - 1;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityIdError {
    #[error("String should have at least 13 characters")]
    TooShort,

    #[error("String should have at most 13 characters")]
    TooLong,

    #[error("invalid character {0:?}")]
    InvalidCharacter(char),

    #[error("invalid string")]
    OutOfRange,
}

/// Time-sorted 64-bit identifier (TSID).
///
/// The upper 42 bits hold milliseconds since 2020-01-01 UTC and the lower
/// 22 bits are random, so ids sort by creation time. Only values that fit
/// a non-negative SQLite INTEGER are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(i64);

impl EntityId {
    /// Generate a new id from the process-wide generator
    pub fn generate() -> Self {
        static GENERATOR: OnceLock<TsidGenerator> = OnceLock::new();
        GENERATOR.get_or_init(TsidGenerator::new).next_id()
    }

    pub fn from_i64(value: i64) -> Result<Self, EntityIdError> {
        if value < 0 {
            return Err(EntityIdError::OutOfRange);
        }
        Ok(Self(value))
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Milliseconds since the Unix epoch encoded in the id
    pub fn timestamp_millis(&self) -> i64 {
        (self.0 >> RANDOM_BITS) + TSID_EPOCH_MILLIS
    }
}

impl FromStr for EntityId {
    type Err = EntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let length = s.chars().count();
        if length < ENTITY_ID_LENGTH {
            return Err(EntityIdError::TooShort);
        }
        if length > ENTITY_ID_LENGTH {
            return Err(EntityIdError::TooLong);
        }

        // 13 symbols carry 65 bits; accumulate in u128 and range-check at the end
        let mut number: u128 = 0;
        for c in s.chars() {
            let digit = decode_symbol(c).ok_or(EntityIdError::InvalidCharacter(c))?;
            number = (number << 5) | u128::from(digit);
        }

        let value = i64::try_from(number).map_err(|_| EntityIdError::OutOfRange)?;
        Ok(Self(value))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; ENTITY_ID_LENGTH];
        let mut number = self.0 as u64;
        for slot in buf.iter_mut().rev() {
            *slot = ALPHABET[(number & 0x1f) as usize];
            number >>= 5;
        }
        // ALPHABET is ASCII
        f.write_str(std::str::from_utf8(&buf).map_err(|_| fmt::Error)?)
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn decode_symbol(c: char) -> Option<u8> {
    let upper = c.to_ascii_uppercase();
    ALPHABET
        .iter()
        .position(|&symbol| symbol as char == upper)
        .map(|index| index as u8)
}

struct GeneratorState {
    last_millis: i64,
    last_random: u64,
}

/// Monotonic TSID source: ids created in the same millisecond increment the
/// random part, and a random-part overflow borrows the next millisecond.
struct TsidGenerator {
    state: Mutex<GeneratorState>,
}

impl TsidGenerator {
    fn new() -> Self {
        Self {
            state: Mutex::new(GeneratorState {
                last_millis: 0,
                last_random: 0,
            }),
        }
    }

    fn next_id(&self) -> EntityId {
        let now = chrono::Utc::now().timestamp_millis() - TSID_EPOCH_MILLIS;
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if now > state.last_millis {
            state.last_millis = now;
            state.last_random = rand::thread_rng().gen::<u64>() & RANDOM_MASK;
        } else {
            state.last_random = (state.last_random + 1) & RANDOM_MASK;
            if state.last_random == 0 {
                state.last_millis += 1;
            }
        }

        EntityId(((state.last_millis as u64) << RANDOM_BITS | state.last_random) as i64)
    }
}
