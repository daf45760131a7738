//! Session-related types.
//!
//! The original client kept token, username, and balance as three separate
//! browser-storage fields. Here they form one session object with a single
//! key, so login creates them together and logout clears them together.

use quickbasket_core::Price;
use serde::{Deserialize, Serialize};

/// Session-stored user identity and wallet state.
///
/// Created on successful login, destroyed (with the whole session) on
/// logout. The token is the only credential the storefront holds; it is
/// passed explicitly to every authenticated backend call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Username the user is logged in as.
    pub username: String,
    /// Wallet balance reported at login.
    pub balance: Price,
    /// Opaque bearer token for backend cart calls.
    pub token: String,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
