/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Transient user notices.
//!
//! Components hold a cloneable [`Notifier`] and never block on it;
//! the front end drains the receiving half into a short [`NoticeLog`]
//! for display.

use std::collections::VecDeque;

use tokio::sync::mpsc;

use crate::error::ConsoleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Sending half of the notification channel.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notice>,
}

/// Create a connected notifier and receiver.
pub fn channel() -> (Notifier, mpsc::UnboundedReceiver<Notice>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Notifier { tx }, rx)
}

impl Notifier {
    pub fn success(&self, message: impl Into<String>) {
        self.send(NoticeKind::Success, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.send(NoticeKind::Info, message.into());
    }

    pub fn error(&self, err: &ConsoleError) {
        self.send(NoticeKind::Error, err.to_string());
    }

    fn send(&self, kind: NoticeKind, message: String) {
        // A closed receiver means the UI is gone; dropping is fine.
        if self.tx.send(Notice { kind, message }).is_err() {
            tracing::debug!("notice dropped, receiver closed");
        }
    }
}

/// Bounded most-recent-last history of notices.
#[derive(Debug)]
pub struct NoticeLog {
    entries: VecDeque<Notice>,
    max: usize,
}

impl NoticeLog {
    pub fn new(max: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max),
            max: max.max(1),
        }
    }

    pub fn push(&mut self, notice: Notice) {
        if self.entries.len() == self.max {
            self.entries.pop_front();
        }
        self.entries.push_back(notice);
    }

    /// Move everything currently queued on `rx` into the log.
    pub fn drain_from(&mut self, rx: &mut mpsc::UnboundedReceiver<Notice>) {
        while let Ok(notice) = rx.try_recv() {
            self.push(notice);
        }
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
