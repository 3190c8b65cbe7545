//! Presentation state for the rental search form.
//!
//! [`RequestState`] owns the draft request and the current [`Outcome`].
//! [`spawn_session`] moves it onto a tokio task so every edit and submit is
//! applied in order from a single queue.

use crate::models::{Field, Outcome, RentalRequest};
use crate::search::{Clock, LinkBuilder, LocalClock, Validator};
use anyhow::{Context, Result};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Queue depth for pending form events
const EVENT_BUFFER: usize = 64;

/// Holds the draft request and the last outcome
pub struct RequestState<C: Clock = LocalClock> {
    draft: RentalRequest,
    validator: Validator<C>,
    links: LinkBuilder,
    tx: watch::Sender<Outcome>,
}

impl<C: Clock> RequestState<C> {
    pub fn new(validator: Validator<C>, links: LinkBuilder) -> Self {
        let (tx, _) = watch::channel(Outcome::default());
        Self {
            draft: RentalRequest::default(),
            validator,
            links,
            tx,
        }
    }

    /// Fields as last edited, regardless of the current outcome
    pub fn draft(&self) -> &RentalRequest {
        &self.draft
    }

    /// Whether the submit control should be enabled
    pub fn can_submit(&self) -> bool {
        self.draft.is_submittable()
    }

    pub fn outcome(&self) -> Outcome {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Outcome> {
        self.tx.subscribe()
    }

    /// Apply a trimmed field edit and return to editing.
    ///
    /// Editing after a rejection or a ready link keeps every other field, and
    /// the old URL is no longer offered for navigation.
    pub fn update_field(&mut self, field: Field, value: &str) {
        self.draft.set(field, value.trim());
        debug!("Updated {}", field);
        self.tx.send_replace(Outcome::Editing(self.draft.clone()));
    }

    /// Validate the draft and publish either a rejection or a link.
    ///
    /// Does nothing while the draft is not submittable.
    pub fn submit(&mut self) {
        if !self.draft.is_submittable() {
            debug!("Ignoring submit: draft is incomplete");
            return;
        }

        let outcome = match self.validator.validate(&self.draft) {
            Ok(validated) => {
                let url = self.links.build(&validated);
                info!("✅ Search link ready");
                Outcome::ReadyToNavigate(url)
            }
            Err(e) => {
                info!("Request rejected: {}", e);
                Outcome::Rejected(e.to_string())
            }
        };

        self.tx.send_replace(outcome);
    }
}

/// Event consumed by a running form session
#[derive(Debug)]
enum FormEvent {
    Update { field: Field, value: String },
    Submit { reply: oneshot::Sender<Outcome> },
    Snapshot { reply: oneshot::Sender<Outcome> },
}

/// Client side of a running form session
#[derive(Clone)]
pub struct FormHandle {
    events: mpsc::Sender<FormEvent>,
    outcome: watch::Receiver<Outcome>,
}

impl FormHandle {
    /// Queue a field edit
    pub async fn update(&self, field: Field, value: impl Into<String>) -> Result<()> {
        self.events
            .send(FormEvent::Update {
                field,
                value: value.into(),
            })
            .await
            .context("Form session has stopped")
    }

    /// Submit after every queued edit and return the resulting outcome
    pub async fn submit(&self) -> Result<Outcome> {
        self.request(|reply| FormEvent::Submit { reply }).await
    }

    /// Outcome after every queued event has been applied
    pub async fn snapshot(&self) -> Result<Outcome> {
        self.request(|reply| FormEvent::Snapshot { reply }).await
    }

    pub fn subscribe(&self) -> watch::Receiver<Outcome> {
        self.outcome.clone()
    }

    async fn request(
        &self,
        event: impl FnOnce(oneshot::Sender<Outcome>) -> FormEvent,
    ) -> Result<Outcome> {
        let (reply, rx) = oneshot::channel();
        self.events
            .send(event(reply))
            .await
            .context("Form session has stopped")?;
        rx.await.context("Form session dropped the reply")
    }
}

/// Run `state` on its own task. The task ends once every handle is dropped.
pub fn spawn_session<C: Clock + 'static>(
    mut state: RequestState<C>,
) -> (FormHandle, JoinHandle<()>) {
    let (events, mut rx) = mpsc::channel(EVENT_BUFFER);
    let handle = FormHandle {
        events,
        outcome: state.subscribe(),
    };

    let task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                FormEvent::Update { field, value } => state.update_field(field, &value),
                FormEvent::Submit { reply } => {
                    state.submit();
                    let _ = reply.send(state.outcome());
                }
                FormEvent::Snapshot { reply } => {
                    let _ = reply.send(state.outcome());
                }
            }
        }
        debug!("Form session closed");
    });

    (handle, task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::FixedClock;
    use chrono::NaiveDate;

    fn state() -> RequestState<FixedClock> {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        RequestState::new(Validator::new(FixedClock(today)), LinkBuilder::default())
    }

    fn fill(state: &mut RequestState<FixedClock>) {
        state.update_field(Field::PickupLocation, "  Los Angeles, CA ");
        state.update_field(Field::PickupDate, "2025-03-01");
        state.update_field(Field::DropOffDate, "2025-03-05 ");
    }

    #[test]
    fn starts_editing_an_empty_request() {
        let state = state();
        assert_eq!(state.outcome(), Outcome::Editing(RentalRequest::default()));
        assert!(!state.can_submit());
    }

    #[test]
    fn edits_are_trimmed() {
        let mut state = state();
        fill(&mut state);
        assert_eq!(state.draft().pickup_location, "Los Angeles, CA");
        assert_eq!(state.draft().drop_off_date, "2025-03-05");
        assert_eq!(state.outcome(), Outcome::Editing(state.draft().clone()));
    }

    #[test]
    fn incomplete_submit_is_ignored() {
        let mut state = state();
        state.update_field(Field::PickupLocation, "SFO");
        let before = state.outcome();
        state.submit();
        assert_eq!(state.outcome(), before);
    }

    #[test]
    fn successful_submit_offers_link() {
        let mut state = state();
        fill(&mut state);
        state.submit();
        assert_eq!(
            state.outcome().navigation_url(),
            Some("https://www.kayak.com/in?a=awesomecars&url=/cars/Los Angeles, CA/Los Angeles, CA/2025-03-01/2025-03-05")
        );
    }

    #[test]
    fn rejection_then_edit_returns_to_editing() {
        let mut state = state();
        fill(&mut state);
        state.update_field(Field::DropOffDate, "2025-02-27");
        state.submit();
        assert_eq!(
            state.outcome().rejection(),
            Some("Drop-off date must be after pickup date.")
        );

        state.update_field(Field::DropOffDate, "2025-03-02");
        match state.outcome() {
            Outcome::Editing(request) => {
                assert_eq!(request.pickup_location, "Los Angeles, CA");
                assert_eq!(request.drop_off_date, "2025-03-02");
            }
            other => panic!("expected editing, got {:?}", other),
        }
    }

    #[test]
    fn edit_after_ready_clears_the_link() {
        let mut state = state();
        fill(&mut state);
        state.submit();
        assert!(state.outcome().navigation_url().is_some());

        state.update_field(Field::DropOffLocation, "SFO");
        assert!(state.outcome().is_editing());
        assert!(state.outcome().navigation_url().is_none());
    }

    #[test]
    fn subscribers_see_changes() {
        let mut state = state();
        let mut rx = state.subscribe();
        fill(&mut state);
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        state.submit();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow().navigation_url().is_some());
    }

    #[tokio::test]
    async fn session_applies_events_in_order() {
        let (handle, task) = spawn_session(state());
        handle.update(Field::PickupLocation, "Los Angeles, CA").await.unwrap();
        handle.update(Field::DropOffLocation, "SFO").await.unwrap();
        handle.update(Field::PickupDate, "2025-03-01").await.unwrap();
        handle.update(Field::DropOffDate, "2025-03-05").await.unwrap();

        let outcome = handle.submit().await.unwrap();
        assert_eq!(
            outcome.navigation_url(),
            Some("https://www.kayak.com/in?a=awesomecars&url=/cars/Los Angeles, CA/SFO/2025-03-01/2025-03-05")
        );

        handle.update(Field::PickupDate, "2025-03-02").await.unwrap();
        assert!(handle.snapshot().await.unwrap().is_editing());
        assert!(handle.subscribe().borrow().is_editing());

        drop(handle);
        task.await.unwrap();
    }

    #[tokio::test]
    async fn session_submit_with_blank_fields_keeps_editing() {
        let (handle, _task) = spawn_session(state());
        let outcome = handle.submit().await.unwrap();
        assert_eq!(outcome, Outcome::Editing(RentalRequest::default()));
    }
}
