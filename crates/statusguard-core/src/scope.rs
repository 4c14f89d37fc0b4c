//! # Configuration Scopes
//!
//! Settings are stored per scope and resolved from the most specific scope
//! outwards:
//!
//! ```text
//! Store(3) ──► Website(owning website of store 3) ──► Default
//! ```
//!
//! The first scope holding a non-null value wins.

use serde::{Deserialize, Serialize};

/// Path of the flag that disables the state/status membership check.
pub const CONFIG_PATH_ALLOW_ANY_ORDER_STATUS_CHANGE: &str =
    "order_status_fix/general/allow_any_order_status_change";

/// Path of the store display name used in customer emails.
pub const CONFIG_PATH_STORE_NAME: &str = "general/store_information/name";

/// A configuration scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "scope", content = "id")]
pub enum ConfigScope {
    #[default]
    Default,
    Website(i64),
    Store(i64),
}

impl ConfigScope {
    /// Scope code as stored in the settings table.
    pub const fn code(&self) -> &'static str {
        match self {
            ConfigScope::Default => "default",
            ConfigScope::Website(_) => "websites",
            ConfigScope::Store(_) => "stores",
        }
    }

    /// Scope id as stored in the settings table. Default scope uses 0.
    pub const fn id(&self) -> i64 {
        match self {
            ConfigScope::Default => 0,
            ConfigScope::Website(id) | ConfigScope::Store(id) => *id,
        }
    }
}

/// Interprets a stored or submitted value as a flag.
///
/// Empty, `0`, `false`, `off` and `no` are unset; anything else is set.
pub fn is_flag_value(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty()
        || value == "0"
        || value.eq_ignore_ascii_case("false")
        || value.eq_ignore_ascii_case("off")
        || value.eq_ignore_ascii_case("no"))
}
