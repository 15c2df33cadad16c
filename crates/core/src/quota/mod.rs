//! Rolling-window request quota.
//!
//! Computes how many auto-approved requests a user has left inside the
//! configured window and derives the approval decision. One store read,
//! no mutation; safe to call repeatedly.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ApprovalMethod, RequestSettings};
use crate::store::{MediaType, RequestStore, RequestStoreError};

/// A user on whose behalf requests are made.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Requester {
    /// User id as known to the request store.
    pub id: String,
    /// Administrators bypass every quota rule.
    pub is_admin: bool,
}

/// Derived quota snapshot for one evaluation. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuotaState {
    /// Requests the user may still make inside the window. Never negative.
    pub remaining: u32,
    /// The per-window maximum for this media kind.
    pub max_requests: u32,
    /// Window length in days.
    pub window_days: u32,
    /// Policy in effect when the snapshot was taken.
    pub approval_method: ApprovalMethod,
    /// Whether the limit is enforced at all.
    pub hard_limit: bool,
    /// The derived decision: can this request skip manual approval?
    pub auto_approved: bool,
}

impl QuotaState {
    /// User-facing summary of why the request will be auto-approved (or
    /// what the limit situation is). Rendered into the confirmation dialog.
    pub fn approval_summary(&self, user: &Requester) -> String {
        if user.is_admin {
            return "As an administrator, you can approve this download without any limitations."
                .to_string();
        }
        match self.approval_method {
            ApprovalMethod::AutoApprove => {
                "Your request will be automatically approved, and the media search will begin."
                    .to_string()
            }
            ApprovalMethod::PerQuota if self.remaining > 0 => format!(
                "You have {}/{} requests remaining that will be automatically approved. Requests reset every {} days.",
                self.remaining, self.max_requests, self.window_days
            ),
            ApprovalMethod::PerQuota => format!(
                "You have reached your limit of {} requests. Requests reset every {} days. Further requests will require admin approval.",
                self.max_requests, self.window_days
            ),
        }
    }
}

/// Evaluate the quota for one prospective request.
///
/// Reads the user's request count over the trailing window and derives the
/// auto-approval decision: administrators always pass, an always-approve
/// policy always passes, and the per-quota policy passes while quota
/// remains and the limit is actually enforced.
pub fn evaluate(
    media_type: MediaType,
    user: &Requester,
    settings: &RequestSettings,
    store: &dyn RequestStore,
) -> Result<QuotaState, RequestStoreError> {
    let window_days = settings.delay_in_days;
    let max_requests = settings.limit_for(media_type);

    let count = store.count_requests_in_period(&user.id, window_days)?;
    let remaining = max_requests.saturating_sub(count);

    let auto_approved = user.is_admin
        || settings.approval_method == ApprovalMethod::AutoApprove
        || (remaining > 0
            && settings.approval_method == ApprovalMethod::PerQuota
            && settings.set_limit);

    debug!(
        "Quota for user {}: {}/{} remaining over {} days, auto-approve: {}",
        user.id, remaining, max_requests, window_days, auto_approved
    );

    Ok(QuotaState {
        remaining,
        max_requests,
        window_days,
        approval_method: settings.approval_method,
        hard_limit: settings.set_limit,
        auto_approved,
    })
}
