// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Publish/subscribe registry for the drag lifecycle.
//!
//! A slider publishes three [`Topic`]s: [`Topic::Start`] when a drag begins,
//! [`Topic::Moving`] for every drag step and programmatic move, and [`Topic::Stop`] when the
//! drag ends. Listeners run in subscription order.
//!
//! ```
//! use core::cell::Cell;
//! use std::rc::Rc;
//! use understory_range_slider::topics::{Topic, Topics};
//!
//! let mut topics: Topics<u32> = Topics::new();
//! let seen = Rc::new(Cell::new(0));
//! let sink = seen.clone();
//! let sub = topics.subscribe(Topic::Moving, move |v| sink.set(*v));
//!
//! topics.publish(Topic::Moving, &7);
//! assert_eq!(seen.get(), 7);
//!
//! assert!(topics.unsubscribe(sub));
//! topics.publish(Topic::Moving, &9);
//! assert_eq!(seen.get(), 7);
//! ```
//!
//! Removing a listener drops it right away and keeps the others in order, so repeated
//! subscribe/unsubscribe cycles do not grow the registry. [`Subscription`] handles are keyed
//! by an id rather than a position, so removing one listener never invalidates another handle,
//! and removing the same handle twice is a harmless no-op. Ids are unique across all
//! registries, so a handle from one slider never removes a listener of another.

use alloc::boxed::Box;
use core::fmt;
use core::str::FromStr;
use core::sync::atomic::{AtomicU64, Ordering};

use smallvec::SmallVec;

use crate::error::SliderError;

/// A lifecycle topic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    /// A drag started.
    Start,
    /// A handle moved, by dragging or programmatically.
    Moving,
    /// A drag ended.
    Stop,
}

impl Topic {
    /// All topics, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Start, Self::Moving, Self::Stop];

    /// The topic's wire name: `start`, `moving` or `stop`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Moving => "moving",
            Self::Stop => "stop",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Start => 0,
            Self::Moving => 1,
            Self::Stop => 2,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = SliderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SliderError::UnknownTopic(s.into()))
    }
}

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// A boxed topic listener.
pub type Listener<T> = Box<dyn FnMut(&T)>;

/// Handle to one registered listener; pass it back to remove exactly that listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    topic: Topic,
    id: u64,
}

impl Subscription {
    /// The topic this subscription listens to.
    #[must_use]
    pub const fn topic(&self) -> Topic {
        self.topic
    }
}

struct Entry<T> {
    id: u64,
    listener: Listener<T>,
}

/// Listener lists for every [`Topic`].
pub struct Topics<T> {
    lists: [SmallVec<[Entry<T>; 2]>; 3],
}

impl<T> fmt::Debug for Topics<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Topics")
            .field("start", &self.len(Topic::Start))
            .field("moving", &self.len(Topic::Moving))
            .field("stop", &self.len(Topic::Stop))
            .finish_non_exhaustive()
    }
}

impl<T> Default for Topics<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Topics<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lists: [SmallVec::new(), SmallVec::new(), SmallVec::new()],
        }
    }

    /// Appends a listener to `topic`.
    pub fn subscribe(&mut self, topic: Topic, listener: impl FnMut(&T) + 'static) -> Subscription {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        self.lists[topic.index()].push(Entry {
            id,
            listener: Box::new(listener),
        });
        Subscription { topic, id }
    }

    /// Appends a listener to the topic called `name`.
    ///
    /// Unknown names are ignored and return `None`.
    pub fn subscribe_named(
        &mut self,
        name: &str,
        listener: impl FnMut(&T) + 'static,
    ) -> Option<Subscription> {
        let topic = name.parse().ok()?;
        Some(self.subscribe(topic, listener))
    }

    /// Removes the listener behind `subscription`.
    ///
    /// Returns `false` if it was already removed or belongs to another registry.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let list = &mut self.lists[subscription.topic.index()];
        // Ids only grow, so every list stays sorted by id.
        match list.binary_search_by_key(&subscription.id, |e| e.id) {
            Ok(pos) => {
                list.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Calls every listener of `topic` with `data`, in subscription order.
    ///
    /// A panicking listener propagates to the caller; listeners after it are not called for
    /// this publish.
    pub fn publish(&mut self, topic: Topic, data: &T) {
        for entry in &mut self.lists[topic.index()] {
            (entry.listener)(data);
        }
    }

    /// Publishes to the topic called `name`.
    ///
    /// Unknown names are ignored and return `false`.
    pub fn publish_named(&mut self, name: &str, data: &T) -> bool {
        match name.parse() {
            Ok(topic) => {
                self.publish(topic, data);
                true
            }
            Err(_) => false,
        }
    }

    /// Number of listeners registered for `topic`.
    #[must_use]
    pub fn len(&self, topic: Topic) -> usize {
        self.lists[topic.index()].len()
    }

    /// Whether `topic` has no listeners.
    #[must_use]
    pub fn is_empty(&self, topic: Topic) -> bool {
        self.lists[topic.index()].is_empty()
    }
}
