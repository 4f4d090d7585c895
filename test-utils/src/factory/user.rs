//! User record factory.
//!
//! Builds user records in the persisted JSON shape, starting from the default schema.

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

/// Factory for creating user records with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user::UserDocFactory;
///
/// let user = UserDocFactory::new()
///     .gold(250)
///     .streak(4)
///     .last_daily_claim(Utc::now() - Duration::days(1))
///     .build();
/// ```
pub struct UserDocFactory {
    fields: Map<String, Value>,
}

impl UserDocFactory {
    /// Creates a new factory holding the default user schema.
    ///
    /// # Returns
    /// - `UserDocFactory` - Factory with every field at its default value
    pub fn new() -> Self {
        let Value::Object(fields) = json!({
            "warnings": [],
            "tier": 1,
            "message_count": 0,
            "gold": 0,
            "roulette_wins": 0,
            "roulette_losses": 0,
            "blackjack_wins": 0,
            "blackjack_losses": 0,
            "slots_wins": 0,
            "slots_losses": 0,
            "last_daily_claim": null,
            "streak": 0,
            "mimic_expiry": null,
            "barrel_expiry": null,
        }) else {
            unreachable!("json! object literal always produces an object")
        };

        Self { fields }
    }

    /// Sets the gold balance.
    pub fn gold(self, gold: i64) -> Self {
        self.raw_field("gold", json!(gold))
    }

    /// Sets the activity tier.
    pub fn tier(self, tier: u8) -> Self {
        self.raw_field("tier", json!(tier))
    }

    /// Sets the message count.
    pub fn message_count(self, count: u64) -> Self {
        self.raw_field("message_count", json!(count))
    }

    /// Sets the daily streak.
    pub fn streak(self, streak: u64) -> Self {
        self.raw_field("streak", json!(streak))
    }

    /// Sets the last daily claim timestamp.
    pub fn last_daily_claim(self, at: DateTime<Utc>) -> Self {
        self.raw_field("last_daily_claim", json!(at.to_rfc3339()))
    }

    /// Sets the mimic expiry timestamp.
    pub fn mimic_expiry(self, at: DateTime<Utc>) -> Self {
        self.raw_field("mimic_expiry", json!(at.to_rfc3339()))
    }

    /// Sets the barrel expiry timestamp.
    pub fn barrel_expiry(self, at: DateTime<Utc>) -> Self {
        self.raw_field("barrel_expiry", json!(at.to_rfc3339()))
    }

    /// Appends a warning entry.
    ///
    /// The timestamp is written verbatim so tests can seed malformed values.
    ///
    /// # Arguments
    /// - `timestamp` - Timestamp string as it should appear on disk
    /// - `reason` - Warning reason
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn warning(mut self, timestamp: &str, reason: &str) -> Self {
        let entry = json!({ "timestamp": timestamp, "reason": reason });
        match self.fields.get_mut("warnings") {
            Some(Value::Array(warnings)) => warnings.push(entry),
            _ => {
                self.fields
                    .insert("warnings".to_string(), Value::Array(vec![entry]));
            }
        }
        self
    }

    /// Sets an arbitrary field to an arbitrary JSON value.
    ///
    /// # Arguments
    /// - `name` - Field name
    /// - `value` - JSON value to store, which need not match the schema type
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn raw_field(mut self, name: &str, value: Value) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    /// Removes a field so the record is missing it on disk.
    pub fn without(mut self, name: &str) -> Self {
        self.fields.remove(name);
        self
    }

    /// Builds the user record.
    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

impl Default for UserDocFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a user record with default values.
pub fn create_user_doc() -> Value {
    UserDocFactory::new().build()
}
