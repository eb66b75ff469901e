//! Identifiers
//!
//! List and item ids are opaque strings. Freshly generated ids combine a
//! millisecond timestamp, a per-generator counter and a random salt, so two
//! ids minted within the same clock tick still differ.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Identifier of a list, unique within the collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(String);

/// Identifier of an item, unique within its owning list
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(ListId);
string_id!(ItemId);

/// Mints ids for one session
pub struct IdGenerator {
    counter: u64,
    rng: StdRng,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            counter: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic salt sequence, for tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            counter: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn next_raw(&mut self) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        self.counter += 1;
        let salt: u32 = self.rng.gen();
        format!("{:x}-{:x}-{:08x}", millis, self.counter, salt)
    }

    /// Next id that `taken` does not already claim
    pub fn next_unique(&mut self, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let candidate = self.next_raw();
            if !taken(&candidate) {
                return candidate;
            }
        }
    }

    pub fn next_list_id(&mut self, taken: impl Fn(&str) -> bool) -> ListId {
        ListId(self.next_unique(taken))
    }

    pub fn next_item_id(&mut self, taken: impl Fn(&str) -> bool) -> ItemId {
        ItemId(self.next_unique(taken))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rapid_ids_are_distinct() {
        let mut ids = IdGenerator::seeded(1);
        let minted: HashSet<String> = (0..1000).map(|_| ids.next_unique(|_| false)).collect();
        assert_eq!(minted.len(), 1000);
    }

    #[test]
    fn test_skips_taken_ids() {
        let rejected = std::cell::RefCell::new(Vec::new());
        let mut ids = IdGenerator::seeded(9);
        let id = ids.next_unique(|candidate| {
            let mut rejected = rejected.borrow_mut();
            if rejected.len() < 3 {
                rejected.push(candidate.to_string());
                true
            } else {
                false
            }
        });

        let rejected = rejected.into_inner();
        assert_eq!(rejected.len(), 3);
        assert!(!rejected.contains(&id));
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ListId::new("normal");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"normal\"");
        assert_eq!(id.to_string(), "normal");
    }
}
