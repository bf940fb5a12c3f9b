//! The exported session row.

use serde::Serialize;

/// Port used when a session does not specify one.
pub const DEFAULT_PORT: u16 = 22;

/// Protocol used when a session does not specify one.
pub const DEFAULT_PROTOCOL: &str = "SSH2";

/// Separator between key names in a session path.
pub const PATH_SEPARATOR: &str = "/";

/// One connection endpoint found in the session tree.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRecord {
    /// Slash-joined key names from the root down to the session
    pub name: String,
    /// Host name or address, empty when not configured
    pub address: String,
    /// SSH port
    pub port: u16,
    /// Protocol name as SecureCRT spells it
    pub protocol: String,
}

impl SessionRecord {
    /// Build a record from a path, applying defaults for missing fields.
    #[must_use]
    pub fn new(
        path: &[String],
        address: Option<String>,
        port: Option<u16>,
        protocol: Option<String>,
    ) -> Self {
        Self {
            name: path.join(PATH_SEPARATOR),
            address: address.unwrap_or_default(),
            port: port.unwrap_or(DEFAULT_PORT),
            protocol: protocol.unwrap_or_else(|| DEFAULT_PROTOCOL.to_string()),
        }
    }
}
