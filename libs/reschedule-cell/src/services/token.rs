// libs/reschedule-cell/src/services/token.rs
use uuid::Uuid;

pub const TOKEN_LEN: usize = 8;

/// Short session token: the first eight hex digits of a random UUID.
///
/// Known weakness: 32 bits of randomness and no collision check against live
/// tokens. A collision replaces the older session in the store.
pub fn generate_token() -> String {
    let mut token = Uuid::new_v4().simple().to_string();
    token.truncate(TOKEN_LEN);
    token
}
