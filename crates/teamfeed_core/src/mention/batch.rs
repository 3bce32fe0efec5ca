//! Mention-to-notification batch building and dispatch.
//!
//! # Responsibility
//! - Turn extracted mentions into deduplicated dispatch requests.
//! - Drive the notification port once per request with independent outcomes.
//!
//! # Invariants
//! - No two requests in a batch share `(recipient_id, post_id)`; first seen wins.
//! - Topic mentions and self-mentions never produce requests.
//! - One failed dispatch never prevents the remaining dispatches.

use crate::mention::extract::{MentionKind, MentionReference};
use crate::model::notification::{NotificationDispatchRequest, NotificationId, NotificationKind};
use crate::model::post::PostId;
use crate::repo::notification_repo::NotificationRepository;
use crate::repo::RepoError;
use log::{info, warn};
use std::collections::HashSet;

/// Builds the dispatch batch for one authoring action.
///
/// Output order follows the order of `mentions` (document order when fed
/// from the extractor).
pub fn build_notification_batch<I>(
    mentions: I,
    sender_id: &str,
    post_id: PostId,
    preview_text: &str,
) -> Vec<NotificationDispatchRequest>
where
    I: IntoIterator<Item = MentionReference>,
{
    let mut seen: HashSet<(String, PostId)> = HashSet::new();
    let mut batch = Vec::new();

    for mention in mentions {
        if mention.kind != MentionKind::User || mention.target_id == sender_id {
            continue;
        }
        if !seen.insert((mention.target_id.clone(), post_id)) {
            continue;
        }

        batch.push(NotificationDispatchRequest {
            recipient_id: mention.target_id,
            sender_id: sender_id.to_string(),
            post_id,
            message_body: preview_text.to_string(),
            kind: NotificationKind::Mention,
        });
    }

    batch
}

/// Result of one dispatch attempt.
#[derive(Debug)]
pub struct DispatchOutcome {
    pub request: NotificationDispatchRequest,
    pub result: Result<NotificationId, RepoError>,
}

impl DispatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Sends every request through `port`, in batch order.
///
/// Each request is attempted exactly once; failures are reported in the
/// returned outcome and never retried.
pub fn dispatch_batch<N: NotificationRepository + ?Sized>(
    port: &N,
    batch: Vec<NotificationDispatchRequest>,
) -> Vec<DispatchOutcome> {
    let total = batch.len();
    let outcomes: Vec<DispatchOutcome> = batch
        .into_iter()
        .map(|request| {
            let result = port.dispatch(&request);
            if let Err(err) = &result {
                warn!(
                    "event=notification_dispatch module=mention status=error post_id={} error={}",
                    request.post_id, err
                );
            }
            DispatchOutcome { request, result }
        })
        .collect();

    let failed = outcomes.iter().filter(|outcome| !outcome.is_ok()).count();
    info!(
        "event=notification_batch module=mention status={} total={} failed={}",
        if failed == 0 { "ok" } else { "partial" },
        total,
        failed
    );
    outcomes
}
