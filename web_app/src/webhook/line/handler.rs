//! # LINE Webhook Handler
//!
//! Splits a webhook batch into `(identity, text)` pairs, feeds them one by one
//! to the registration state machine and collects the replies to push.

use super::schemas::WebhookPayload;
use crate::{
    api::registration::{self, RegistrationMachine, Reply},
    metric, services,
};

/// A reply that should be pushed to a LINE user
#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    /// Recipient's LINE user id
    pub to: String,
    pub reply: Reply,
}

/// Extracts the text events of a webhook batch
///
/// Events without a sender or without non-blank text are dropped.
///
/// # Returns
///
/// `(user id, normalized text)` pairs in delivery order
pub fn extract_text_events(payload: &WebhookPayload) -> Vec<(&str, String)> {
    payload
        .events
        .iter()
        .filter_map(|event| {
            let user_id = event.user_id().filter(|id| !id.trim().is_empty())?;
            let text = registration::normalize(event.text()?)?;
            Some((user_id, text))
        })
        .collect::<Vec<_>>()
}

/// Main webhook processor
///
/// Events are handled sequentially so store mutations of one batch never race
/// with each other. A failing event is logged and skipped; it produces no reply.
///
/// # Arguments
///
/// * `payload` - The webhook payload from LINE
/// * `machine` - Registration state machine
///
/// # Returns
///
/// The replies to push, at most one per event
pub async fn process_webhook(
    payload: &WebhookPayload,
    machine: &RegistrationMachine,
) -> Vec<Outbound> {
    let events = extract_text_events(payload);
    let skipped = payload.events.len() - events.len();
    if skipped > 0 {
        logfire::debug!(
            "Skipped webhook events without sender or text: {skipped}",
            skipped = skipped
        );
    }

    let mut outbound = Vec::with_capacity(events.len());
    for (user_id, text) in events {
        match machine.handle(user_id, &text).await {
            Ok(reply) => outbound.push(Outbound {
                to: user_id.to_string(),
                reply,
            }),
            Err(e) => {
                metric::incr_webhook_statds("event_failed");
                logfire::error!(
                    "Failed to handle registration message: {error}",
                    error = format!("{e:#}")
                );
            }
        }
    }

    outbound
}

/// Pushes every reply, concurrently and best effort
///
/// Failures are logged and counted, never retried. The roster changes behind
/// these replies are already committed.
pub async fn deliver(outbound: Vec<Outbound>, notifier: &dyn services::Notifier) {
    let sends = outbound.iter().map(|outbound| async move {
        let text = outbound.reply.to_string();
        match notifier.send(&outbound.to, &text).await {
            Ok(_) => metric::incr_push_statds("sent"),
            Err(e) => {
                metric::incr_push_statds("failed");
                logfire::error!(
                    "Failed to push {reply} reply: {error}",
                    reply = outbound.reply.kind(),
                    error = format!("{e:#}")
                );
            }
        }
    });

    futures::future::join_all(sends).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        repo::{
            MockRosterRepo, RosterRepo,
            sqlite::test_utils::{insert_staff, setup_repo},
        },
        services::MockNotifier,
        webhook::line::{
            outgoing_schemas::PushMessageResponse,
            schemas::{Event, Message, Source},
        },
    };
    use mockall::predicate::*;

    fn text_event(user_id: Option<&str>, text: Option<&str>) -> Event {
        Event {
            event_type: "message".to_string(),
            source: Some(Source {
                source_type: "user".to_string(),
                user_id: user_id.map(Into::into),
                group_id: None,
            }),
            message: Some(Message {
                id: "1".to_string(),
                msg_type: (if text.is_some() { "text" } else { "sticker" }).to_string(),
                text: text.map(Into::into),
            }),
            reply_token: None,
            timestamp: 1_700_000_000_000,
            webhook_event_id: None,
        }
    }

    fn payload(events: Vec<Event>) -> WebhookPayload {
        WebhookPayload {
            destination: Some("Ubot".to_string()),
            events,
        }
    }

    #[test]
    fn test_extract_text_events() {
        let payload = payload(vec![
            text_event(Some("U1"), Some("  D123 ")),
            text_event(None, Some("D123")),
            text_event(Some("U2"), Some("   ")),
            text_event(Some("U3"), None),
            text_event(Some(""), Some("confirm")),
            Event {
                event_type: "follow".to_string(),
                source: Some(Source {
                    source_type: "user".to_string(),
                    user_id: Some("U4".to_string()),
                    group_id: None,
                }),
                ..Default::default()
            },
            text_event(Some("U5"), Some("CONFIRM")),
        ]);

        let events = extract_text_events(&payload);

        assert_eq!(
            events,
            vec![("U1", "d123".to_string()), ("U5", "confirm".to_string())]
        );
    }

    #[ntex::test]
    async fn test_process_webhook_replies_in_order() {
        let repo = setup_repo().await;
        insert_staff(&repo, "D123", "Somchai", "Cardiology").await;
        let machine = RegistrationMachine::new(Box::new(repo.clone()), None);

        let outbound = process_webhook(
            &payload(vec![
                text_event(Some("U1"), Some("D123")),
                text_event(Some("U1"), Some("confirm")),
                text_event(Some("U2"), Some("nope")),
                text_event(Some("U3"), None),
            ]),
            &machine,
        )
        .await;

        let kinds: Vec<_> = outbound
            .iter()
            .map(|o| (o.to.as_str(), o.reply.kind()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("U1", "confirm_prompt"),
                ("U1", "registered"),
                ("U2", "code_not_found"),
            ]
        );
        assert!(
            repo.get_staff_by_bound_identity("U1")
                .await
                .unwrap()
                .is_some()
        );
    }

    #[ntex::test]
    async fn test_failing_event_does_not_abort_batch() {
        let mut mock_repo = MockRosterRepo::new();
        mock_repo
            .expect_get_staff_by_bound_identity()
            .with(eq("U-broken"))
            .returning(|_| Err(anyhow::anyhow!("disk I/O error")));
        mock_repo
            .expect_get_staff_by_bound_identity()
            .with(eq("U-ok"))
            .returning(|_| Ok(None));
        mock_repo
            .expect_get_staff_by_pending_identity()
            .returning(|_| Ok(None));
        let machine = RegistrationMachine::new(Box::new(mock_repo), None);

        let outbound = process_webhook(
            &payload(vec![
                text_event(Some("U-broken"), Some("confirm")),
                text_event(Some("U-ok"), Some("confirm")),
            ]),
            &machine,
        )
        .await;

        assert_eq!(
            outbound,
            vec![Outbound {
                to: "U-ok".to_string(),
                reply: Reply::NothingToConfirm,
            }]
        );
    }

    #[ntex::test]
    async fn test_deliver_pushes_every_reply_despite_failures() {
        let mut mock_notifier = MockNotifier::new();
        mock_notifier
            .expect_send()
            .with(eq("U1"), always())
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("LINE API returned error status 429")));
        mock_notifier
            .expect_send()
            .with(eq("U2"), eq(Reply::CodeNotFound.to_string()))
            .times(1)
            .returning(|_, _| Ok(PushMessageResponse::default()));

        deliver(
            vec![
                Outbound {
                    to: "U1".to_string(),
                    reply: Reply::NothingToConfirm,
                },
                Outbound {
                    to: "U2".to_string(),
                    reply: Reply::CodeNotFound,
                },
            ],
            &mock_notifier,
        )
        .await;
    }
}
