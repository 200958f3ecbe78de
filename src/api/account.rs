//! Account, token and API metadata endpoints

use crate::endpoint::{Endpoint, UserRef};
use serde::Serialize;
use serde_json::Value;

/// Bytes in one terabyte (2^40)
pub const BYTES_PER_TB: u64 = 1_099_511_627_776;

/// API specification document (`GET /`)
pub fn specification() -> Endpoint {
    Endpoint::get("/")
}

/// Capabilities of a user
pub fn capabilities(user: &UserRef) -> Endpoint {
    Endpoint::get(format!("{}/capabilities", user.path()))
}

/// User profile
pub fn user(user: &UserRef) -> Endpoint {
    Endpoint::get(user.path())
}

/// Token introspection (`GET /oauth/verify`)
pub fn verify_token() -> Endpoint {
    Endpoint::get("/oauth/verify")
}

/// Revoke the current token; true on 204
pub fn delete_token() -> Endpoint {
    Endpoint::delete("/tokens").expect_status(204)
}

/// Upload quota (`free`, `max`, `used` in bytes)
pub fn storage_quota(user: &UserRef) -> Endpoint {
    Endpoint::get(user.path())
        .fields(["upload_quota.space"])
        .key("upload_quota.space")
        .only(["free", "max", "used"])
}

/// Upload quota of an account, in bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StorageQuota {
    /// Remaining space
    pub free: u64,
    /// Space used
    pub used: u64,
    /// Total space
    pub max: u64,
}

impl StorageQuota {
    /// Read the quota from a shaped `{free, max, used}` object
    ///
    /// Missing or non-numeric values count as zero.
    pub fn from_value(value: &Value) -> Self {
        let bytes = |key: &str| value.get(key).and_then(Value::as_u64).unwrap_or(0);
        Self {
            free: bytes("free"),
            used: bytes("used"),
            max: bytes("max"),
        }
    }

    /// Remaining space in terabytes, e.g. `"1.5 TB"`
    pub fn free_tb(&self) -> String {
        format_terabytes(self.free)
    }

    /// Used space in terabytes
    pub fn used_tb(&self) -> String {
        format_terabytes(self.used)
    }

    /// Total space in terabytes
    pub fn max_tb(&self) -> String {
        format_terabytes(self.max)
    }
}

/// Render a byte count as terabytes rounded to two decimals
pub fn format_terabytes(bytes: u64) -> String {
    let tb = bytes as f64 / BYTES_PER_TB as f64;
    let rounded = (tb * 100.0).round() / 100.0;
    format!("{rounded} TB")
}
