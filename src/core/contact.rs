//! Form submission controller.
//!
//! Owns both page forms and the outcome of the most recent submission.  A
//! submission moves `Pending → Success` or `Pending → Failure` exactly once;
//! the ticket handed out by [`ContactDesk::submit`] is what completes it.

use thiserror::Error;

use super::form::{FieldError, FormKind, FormState};
use super::relay::{FormPayload, RelayError, RelayReply};

/// Shown when the relay accepts a submission.
pub const SUCCESS_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";

/// Used when the relay rejects a submission without saying why.
pub const REJECTED_FALLBACK: &str = "Submission was rejected.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    Pending,
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub status: SubmissionStatus,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// A submission that has been handed out for sending.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub ticket: Ticket,
    pub kind: FormKind,
    pub payload: FormPayload,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("please fix the form: {}", summarize(.0))]
    Invalid(Vec<FieldError>),
    #[error("a submission is already being sent")]
    Busy,
    #[error("the contact form is offline (no relay access key configured)")]
    RelayUnavailable,
    #[error("no submission is waiting for that reply")]
    StaleTicket,
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug)]
pub struct ContactDesk {
    project_request: FormState,
    contact: FormState,
    relay_available: bool,
    pending: Option<(Ticket, FormKind)>,
    result: Option<SubmissionResult>,
    next_ticket: u64,
}

impl ContactDesk {
    pub fn new(relay_available: bool) -> Self {
        Self {
            project_request: FormState::new(FormKind::ProjectRequest),
            contact: FormState::new(FormKind::Contact),
            relay_available,
            pending: None,
            result: None,
            next_ticket: 0,
        }
    }

    pub fn form(&self, kind: FormKind) -> &FormState {
        match kind {
            FormKind::ProjectRequest => &self.project_request,
            FormKind::Contact => &self.contact,
        }
    }

    pub fn form_mut(&mut self, kind: FormKind) -> &mut FormState {
        match kind {
            FormKind::ProjectRequest => &mut self.project_request,
            FormKind::Contact => &mut self.contact,
        }
    }

    pub fn relay_available(&self) -> bool {
        self.relay_available
    }

    /// Form currently being sent, if any.
    pub fn pending_kind(&self) -> Option<FormKind> {
        self.pending.map(|(_, kind)| kind)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Latest result.  `Pending` while a request is in flight; `None` when
    /// neutral.
    pub fn result(&self) -> Option<&SubmissionResult> {
        self.result.as_ref()
    }

    /// True once a submission has finished and its outcome is waiting to be
    /// acknowledged.
    pub fn has_outcome(&self) -> bool {
        matches!(
            self.result,
            Some(SubmissionResult {
                status: SubmissionStatus::Success | SubmissionStatus::Failure,
                ..
            })
        )
    }

    /// Validate `kind` and move to `Pending`.  The caller sends the returned
    /// payload and reports back through [`ContactDesk::complete`].
    pub fn submit(&mut self, kind: FormKind) -> Result<PendingSubmission, SubmitError> {
        if self.pending.is_some() {
            return Err(SubmitError::Busy);
        }
        if !self.relay_available {
            return Err(SubmitError::RelayUnavailable);
        }
        let validated = self.form(kind).validate().map_err(SubmitError::Invalid)?;

        let sender = validated.value("name").unwrap_or_default();
        let payload = FormPayload {
            subject: kind.subject(sender),
            fields: validated
                .fields
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        };

        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.pending = Some((ticket, kind));
        self.result = Some(SubmissionResult {
            status: SubmissionStatus::Pending,
            message: "Sending...".to_string(),
        });
        tracing::info!(?kind, ?ticket, "submission pending");

        Ok(PendingSubmission {
            ticket,
            kind,
            payload,
        })
    }

    /// Record the relay's answer for `ticket`.  Only the pending ticket is
    /// accepted, and only once.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<RelayReply, RelayError>,
    ) -> Result<&SubmissionResult, SubmitError> {
        let kind = match self.pending {
            Some((pending, kind)) if pending == ticket => kind,
            _ => {
                tracing::warn!(?ticket, "ignoring reply for a submission that is not pending");
                return Err(SubmitError::StaleTicket);
            }
        };
        self.pending = None;

        let result = match outcome {
            Ok(reply) if reply.success => {
                self.form_mut(kind).clear();
                SubmissionResult {
                    status: SubmissionStatus::Success,
                    message: SUCCESS_MESSAGE.to_string(),
                }
            }
            Ok(reply) => {
                let message = if reply.message.trim().is_empty() {
                    REJECTED_FALLBACK.to_string()
                } else {
                    reply.message
                };
                SubmissionResult {
                    status: SubmissionStatus::Failure,
                    message,
                }
            }
            Err(e) => SubmissionResult {
                status: SubmissionStatus::Failure,
                message: format!("Network error: {e}"),
            },
        };
        tracing::info!(?kind, status = ?result.status, "submission finished");
        Ok(self.result.insert(result))
    }

    /// Close the result overlay.  Ignored while a request is in flight.
    pub fn dismiss_result(&mut self) {
        if self.pending.is_none() {
            self.result = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::relay::FormRelay;
    use async_trait::async_trait;

    /// Relay stand-in answering every request the same way.
    enum MockRelay {
        Reply(RelayReply),
        Fault(&'static str),
    }

    #[async_trait]
    impl FormRelay for MockRelay {
        async fn send(&self, _payload: &FormPayload) -> Result<RelayReply, RelayError> {
            match self {
                MockRelay::Reply(r) => Ok(r.clone()),
                MockRelay::Fault(m) => Err(RelayError::Transport(m.to_string())),
            }
        }
    }

    fn desk_with_contact() -> ContactDesk {
        let mut desk = ContactDesk::new(true);
        let form = desk.form_mut(FormKind::Contact);
        form.set_value("name", "Ann");
        form.set_value("email", "a@b.com");
        form.set_value("message", "hi");
        desk
    }

    async fn run(desk: &mut ContactDesk, relay: &dyn FormRelay) -> SubmissionResult {
        let pending = desk.submit(FormKind::Contact).unwrap();
        assert_eq!(desk.result().unwrap().status, SubmissionStatus::Pending);
        let outcome = relay.send(&pending.payload).await;
        desk.complete(pending.ticket, outcome).unwrap().clone()
    }

    #[tokio::test]
    async fn success_clears_form_and_reports_fixed_message() {
        let mut desk = desk_with_contact();
        let relay = MockRelay::Reply(RelayReply {
            success: true,
            message: String::new(),
        });

        let result = run(&mut desk, &relay).await;
        assert_eq!(result.status, SubmissionStatus::Success);
        assert_eq!(result.message, SUCCESS_MESSAGE);
        assert!(desk.form(FormKind::Contact).is_pristine());
        assert!(desk.has_outcome());
    }

    #[tokio::test]
    async fn rejection_message_is_shown_verbatim() {
        let mut desk = desk_with_contact();
        let relay = MockRelay::Reply(RelayReply {
            success: false,
            message: "bad key".into(),
        });

        let result = run(&mut desk, &relay).await;
        assert_eq!(result.status, SubmissionStatus::Failure);
        assert_eq!(result.message, "bad key");
        assert_eq!(desk.form(FormKind::Contact).value("name"), Some("Ann"));
    }

    #[tokio::test]
    async fn transport_fault_keeps_fields() {
        let mut desk = desk_with_contact();
        let relay = MockRelay::Fault("connection refused");

        let result = run(&mut desk, &relay).await;
        assert_eq!(result.status, SubmissionStatus::Failure);
        assert!(result.message.starts_with("Network error"));
        assert!(result.message.contains("connection refused"));

        let form = desk.form(FormKind::Contact);
        assert_eq!(form.value("email"), Some("a@b.com"));
        assert_eq!(form.value("message"), Some("hi"));
    }

    #[test]
    fn empty_rejection_message_gets_fallback() {
        let mut desk = desk_with_contact();
        let pending = desk.submit(FormKind::Contact).unwrap();
        let result = desk
            .complete(
                pending.ticket,
                Ok(RelayReply {
                    success: false,
                    message: " ".into(),
                }),
            )
            .unwrap();
        assert_eq!(result.message, REJECTED_FALLBACK);
    }

    #[test]
    fn payload_carries_trimmed_fields_and_subject() {
        let mut desk = desk_with_contact();
        desk.form_mut(FormKind::Contact).set_value("name", "  Ann ");
        let pending = desk.submit(FormKind::Contact).unwrap();
        assert_eq!(pending.payload.subject, "New message from Ann");
        assert_eq!(pending.payload.fields[0], ("name".to_string(), "Ann".to_string()));
    }

    #[test]
    fn second_submit_while_pending_is_refused() {
        let mut desk = desk_with_contact();
        desk.submit(FormKind::Contact).unwrap();
        assert_eq!(desk.submit(FormKind::Contact).unwrap_err(), SubmitError::Busy);
        assert_eq!(desk.submit(FormKind::ProjectRequest).unwrap_err(), SubmitError::Busy);
    }

    #[test]
    fn each_submission_completes_exactly_once() {
        let mut desk = desk_with_contact();
        let pending = desk.submit(FormKind::Contact).unwrap();
        let ok = || {
            Ok(RelayReply {
                success: true,
                message: String::new(),
            })
        };
        assert!(desk.complete(pending.ticket, ok()).is_ok());
        assert_eq!(desk.complete(pending.ticket, ok()).unwrap_err(), SubmitError::StaleTicket);
    }

    #[test]
    fn invalid_form_never_goes_pending() {
        let mut desk = ContactDesk::new(true);
        let err = desk.submit(FormKind::Contact).unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(ref e) if e.len() == 3));
        assert!(!desk.is_pending());
        assert!(desk.result().is_none());
    }

    #[test]
    fn offline_desk_refuses_to_submit() {
        let mut desk = ContactDesk::new(false);
        assert_eq!(desk.submit(FormKind::Contact).unwrap_err(), SubmitError::RelayUnavailable);
    }

    #[test]
    fn dismiss_returns_to_neutral_but_not_while_pending() {
        let mut desk = desk_with_contact();
        let pending = desk.submit(FormKind::Contact).unwrap();
        desk.dismiss_result();
        assert!(desk.result().is_some());

        desk.complete(pending.ticket, Err(RelayError::Transport("reset".into())))
            .unwrap();
        desk.dismiss_result();
        assert!(desk.result().is_none());
        assert!(!desk.is_pending());
    }

    #[test]
    fn invalid_error_lists_every_problem() {
        let err = SubmitError::Invalid(vec![
            FieldError::Missing { field: "name", label: "Name" },
            FieldError::InvalidEmail { field: "email", label: "Email" },
        ]);
        assert_eq!(
            err.to_string(),
            "please fix the form: Name is required; Email must be a valid email address"
        );
    }
}
