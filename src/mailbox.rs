/*
 *  mailbox.rs
 *
 *  phatline - now playing, six characters at a time
 *  (c) 2025
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::sync::{Arc, Mutex};

use crate::meta::MetadataSnapshot;

/// Message carried by the update mailboxes. One mailbox per display session
/// carries metadata, a second carries volume; the `Shutdown` sentinel may
/// occupy either and terminates the render worker.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateMessage {
    Metadata(MetadataSnapshot),
    Volume(i32),
    Shutdown,
}

/// A coalescing, latest-value-wins, single-slot channel.
///
/// The display only ever needs the current truth, not a history of
/// transitions: a burst of sends before the consumer drains leaves exactly
/// the most recent value in the slot. `send` never blocks the producer and
/// is O(1); the consumer polls with `is_pending` / `drain_latest` between
/// its paced waits.
pub struct Mailbox<T> {
    slot: Arc<Mutex<Option<T>>>,
}

impl<T> Clone for Mailbox<T> {
    fn clone(&self) -> Self {
        Mailbox {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Mailbox<T> {
    pub fn new() -> Self {
        Mailbox {
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Deposits `value`, discarding any value not yet drained.
    pub fn send(&self, value: T) {
        let mut slot = self.slot.lock().expect("mailbox lock poisoned");
        *slot = Some(value);
    }

    /// Empties the mailbox, returning the most recently sent value.
    pub fn drain_latest(&self) -> Option<T> {
        let mut slot = self.slot.lock().expect("mailbox lock poisoned");
        slot.take()
    }

    /// Non-blocking peek: is there an undrained value?
    pub fn is_pending(&self) -> bool {
        let slot = self.slot.lock().expect("mailbox lock poisoned");
        slot.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::PlayerState;

    #[test]
    fn coalesces_to_latest_value() {
        let mb = Mailbox::new();
        mb.send(UpdateMessage::Volume(1));
        mb.send(UpdateMessage::Volume(2));
        mb.send(UpdateMessage::Volume(3));
        assert_eq!(mb.drain_latest(), Some(UpdateMessage::Volume(3)));
        assert_eq!(mb.drain_latest(), None);
    }

    #[test]
    fn pending_peek_does_not_drain() {
        let mb: Mailbox<UpdateMessage> = Mailbox::new();
        assert!(!mb.is_pending());
        mb.send(UpdateMessage::Volume(42));
        assert!(mb.is_pending());
        assert!(mb.is_pending());
        assert_eq!(mb.drain_latest(), Some(UpdateMessage::Volume(42)));
        assert!(!mb.is_pending());
    }

    #[test]
    fn shutdown_sentinel_is_observable() {
        let mb = Mailbox::new();
        mb.send(UpdateMessage::Metadata(MetadataSnapshot {
            player_name: Some("mpd".to_string()),
            artist: None,
            title: None,
            player_state: PlayerState::Playing,
        }));
        // Sentinel replaces data in flight, so it is observed in order
        // relative to the last real update.
        mb.send(UpdateMessage::Shutdown);
        assert_eq!(mb.drain_latest(), Some(UpdateMessage::Shutdown));
    }

    #[test]
    fn clones_share_the_slot() {
        let producer = Mailbox::new();
        let consumer = producer.clone();
        producer.send(UpdateMessage::Volume(7));
        assert_eq!(consumer.drain_latest(), Some(UpdateMessage::Volume(7)));
        assert!(!producer.is_pending());
    }
}
