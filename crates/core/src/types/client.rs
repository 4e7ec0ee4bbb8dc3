//! Client information captured on an estimate.

use serde::{Deserialize, Serialize};

/// Contact details for the client an estimate is addressed to.
///
/// The fields are free-form text and are rendered as-is on the PDF.
/// Only the name participates in the output filename, via
/// [`ClientInfo::filename_token`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientInfo {
    /// Client's name, as printed on the estimate.
    pub name: String,
    /// Postal address.
    pub address: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
}

impl ClientInfo {
    /// A filesystem-safe token derived from the client name.
    ///
    /// Every character outside `[A-Za-z0-9._-]` is replaced with `_`.
    /// An empty or all-unsafe name yields `"client"` so the output
    /// filename is never degenerate.
    #[must_use]
    pub fn filename_token(&self) -> String {
        let token: String = self
            .name
            .trim()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        if token.chars().all(|c| c == '_') {
            "client".to_owned()
        } else {
            token
        }
    }
}
