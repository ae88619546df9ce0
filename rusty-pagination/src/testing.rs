//! In-memory transport used by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::{TransportError, TransportOp};
use crate::transport::{ControlEvent, ControlSubscription, MessageHandle, MessagePayload, Transport};

pub const CHANNEL_ID: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Ephemeral { interaction_id: u64, content: String },
    FollowUp { interaction_id: u64, content: String },
}

#[derive(Default)]
pub struct RecordingTransport {
    next_message_id: AtomicU64,
    sent: Mutex<Vec<MessagePayload>>,
    edits: Mutex<Vec<MessagePayload>>,
    deleted: Mutex<Vec<u64>>,
    acknowledged: Mutex<Vec<u64>>,
    replies: Mutex<Vec<Reply>>,
    subscribers: Mutex<HashMap<u64, mpsc::UnboundedSender<ControlEvent>>>,
    unsubscribed: AtomicUsize,
    fail_sends: AtomicBool,
    fail_edits: AtomicBool,
    fail_subscriptions: AtomicBool,
    edit_delay: Mutex<Option<Duration>>,
    edits_in_flight: AtomicUsize,
    max_edits_in_flight: AtomicUsize,
}

impl RecordingTransport {
    pub fn fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    pub fn fail_edits(&self, fail: bool) {
        self.fail_edits.store(fail, Ordering::SeqCst);
    }

    pub fn fail_subscriptions(&self, fail: bool) {
        self.fail_subscriptions.store(fail, Ordering::SeqCst);
    }

    /// Make every edit take `delay` before it lands.
    pub fn delay_edits(&self, delay: Duration) {
        *self.edit_delay.lock().unwrap() = Some(delay);
    }

    /// Highest number of edits that were ever running at the same time.
    pub fn max_edits_in_flight(&self) -> usize {
        self.max_edits_in_flight.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<MessagePayload> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_sent(&self) -> Option<MessagePayload> {
        self.sent.lock().unwrap().last().cloned()
    }

    pub fn edits(&self) -> Vec<MessagePayload> {
        self.edits.lock().unwrap().clone()
    }

    pub fn last_edit(&self) -> Option<MessagePayload> {
        self.edits.lock().unwrap().last().cloned()
    }

    pub fn deleted(&self) -> Vec<u64> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn acknowledged(&self) -> Vec<u64> {
        self.acknowledged.lock().unwrap().clone()
    }

    pub fn replies(&self) -> Vec<Reply> {
        self.replies.lock().unwrap().clone()
    }

    pub fn unsubscribed(&self) -> usize {
        self.unsubscribed.load(Ordering::SeqCst)
    }

    /// Message id of the most recently sent message.
    pub fn last_message_id(&self) -> u64 {
        self.next_message_id.load(Ordering::SeqCst)
    }

    /// Push an event into the subscription of `message_id`, like the gateway would.
    pub fn deliver(&self, event: ControlEvent) -> bool {
        let subscribers = self.subscribers.lock().unwrap();
        subscribers
            .get(&event.message_id)
            .is_some_and(|sender| sender.send(event).is_ok())
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, payload: &MessagePayload) -> Result<MessageHandle, TransportError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(TransportError::new(TransportOp::Send, "send refused"));
        }
        self.sent.lock().unwrap().push(payload.clone());
        let message_id = self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(MessageHandle {
            channel_id: CHANNEL_ID,
            message_id,
        })
    }

    async fn edit(
        &self,
        _handle: &MessageHandle,
        payload: &MessagePayload,
    ) -> Result<(), TransportError> {
        let running = self.edits_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_edits_in_flight.fetch_max(running, Ordering::SeqCst);

        let delay = *self.edit_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.edits_in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_edits.load(Ordering::SeqCst) {
            return Err(TransportError::new(TransportOp::Edit, "edit refused"));
        }
        self.edits.lock().unwrap().push(payload.clone());
        Ok(())
    }

    async fn delete(&self, handle: &MessageHandle) -> Result<(), TransportError> {
        self.deleted.lock().unwrap().push(handle.message_id);
        Ok(())
    }

    async fn subscribe(&self, handle: &MessageHandle) -> Result<ControlSubscription, TransportError> {
        if self.fail_subscriptions.load(Ordering::SeqCst) {
            return Err(TransportError::new(TransportOp::Subscribe, "subscribe refused"));
        }
        let (sender, subscription) = ControlSubscription::channel();
        self.subscribers
            .lock()
            .unwrap()
            .insert(handle.message_id, sender);
        Ok(subscription)
    }

    async fn unsubscribe(&self, handle: &MessageHandle) {
        self.subscribers.lock().unwrap().remove(&handle.message_id);
        self.unsubscribed.fetch_add(1, Ordering::SeqCst);
    }

    async fn acknowledge(&self, event: &ControlEvent) -> Result<(), TransportError> {
        self.acknowledged.lock().unwrap().push(event.interaction_id);
        Ok(())
    }

    async fn reply_ephemeral(&self, event: &ControlEvent, content: &str) -> Result<(), TransportError> {
        self.replies.lock().unwrap().push(Reply::Ephemeral {
            interaction_id: event.interaction_id,
            content: content.to_owned(),
        });
        Ok(())
    }

    async fn follow_up_ephemeral(
        &self,
        event: &ControlEvent,
        content: &str,
    ) -> Result<(), TransportError> {
        self.replies.lock().unwrap().push(Reply::FollowUp {
            interaction_id: event.interaction_id,
            content: content.to_owned(),
        });
        Ok(())
    }
}

/// Event for `control_id` on `message_id`, activated by `actor_id`.
pub fn control_event(message_id: u64, actor_id: u64, control_id: impl Into<String>) -> ControlEvent {
    ControlEvent {
        application_id: 1,
        interaction_id: message_id * 1000 + actor_id,
        token: "token".to_owned(),
        message_id,
        actor_id,
        control_id: control_id.into(),
        values: Vec::new(),
    }
}
