//! Build request inputs and validation.

use bytes::Bytes;

use super::error::{Error, Result};

/// Inputs to one pipeline invocation.
///
/// The HTTP boundary maps the multipart fields `appName`, `websiteURL` and
/// `icon` onto this struct; the pipeline never sees the raw request.
#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
    /// Human-readable application name, shown as the launcher label.
    pub app_name: String,

    /// Address loaded into the embedded WebView.
    ///
    /// Not validated for URL syntax; an unparseable value is logged as a
    /// warning and passed through unchanged.
    pub website_url: String,

    /// Optional launcher icon image bytes.
    pub icon: Option<Bytes>,
}

impl BuildRequest {
    /// Rejects requests with empty required fields.
    ///
    /// Must run before any directory or process side effect. The error
    /// message names every missing field so the caller can fix one
    /// resubmission.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.app_name.is_empty() {
            missing.push("appName");
        }
        if self.website_url.is_empty() {
            missing.push("websiteURL");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidRequest {
                reason: format!("missing required field(s): {}", missing.join(", ")),
            })
        }
    }
}
