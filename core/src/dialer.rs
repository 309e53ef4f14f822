/// Outbound call hand-off to the platform dialer
use crate::error::Result;
use tracing::{info, warn};

/// Request code attached to the outbound-call permission prompt
pub const CALL_PERMISSION_REQUEST_CODE: u32 = 1001;

/// Platform dialer and its permission gate
pub trait Dialer {
    fn has_call_permission(&self) -> bool;

    /// Start a call to `uri` (`tel:...`). Fire-and-forget.
    fn dial(&self, uri: &str) -> Result<()>;

    /// Ask the platform for the outbound-call permission
    fn request_call_permission(&self, request_code: u32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    Placed,
    /// The call was dropped; it is not retried once permission arrives
    PermissionRequested,
}

pub fn dial_uri(phone: &str) -> String {
    format!("tel:{}", phone)
}

pub fn place_call<D: Dialer + ?Sized>(dialer: &D, phone: &str) -> CallOutcome {
    if !dialer.has_call_permission() {
        info!("Call permission missing, requesting it");
        dialer.request_call_permission(CALL_PERMISSION_REQUEST_CODE);
        return CallOutcome::PermissionRequested;
    }

    let uri = dial_uri(phone);
    if let Err(e) = dialer.dial(&uri) {
        warn!("Dialer rejected {}: {}", uri, e);
    }
    CallOutcome::Placed
}
