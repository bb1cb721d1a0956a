use std::time::{Duration, Instant};

use crate::notify::{Notification, Notifier};

/// Lifetime of a single toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTimings {
    pub fade_in_delay: Duration,
    pub visible_for: Duration,
    pub fade_out: Duration,
}

impl Default for ToastTimings {
    fn default() -> Self {
        Self {
            fade_in_delay: Duration::from_millis(10),
            visible_for: Duration::from_millis(3000),
            fade_out: Duration::from_millis(300),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Pending,
    Shown,
    Fading,
}

#[derive(Debug, Clone)]
struct Toast {
    notification: Notification,
    created: Instant,
}

impl Toast {
    // None once the toast has been removed.
    fn phase(&self, timings: &ToastTimings, now: Instant) -> Option<ToastPhase> {
        let age = now.saturating_duration_since(self.created);
        if age < timings.fade_in_delay {
            Some(ToastPhase::Pending)
        } else if age < timings.visible_for {
            Some(ToastPhase::Shown)
        } else if age < timings.visible_for + timings.fade_out {
            Some(ToastPhase::Fading)
        } else {
            None
        }
    }
}

/// Independent, self-expiring toasts. Each one runs on its own clock.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    timings: ToastTimings,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn new(timings: ToastTimings) -> Self {
        Self {
            timings,
            toasts: Vec::new(),
        }
    }

    pub fn push_at(&mut self, notification: Notification, now: Instant) {
        self.toasts.push(Toast {
            notification,
            created: now,
        });
    }

    /// Drop every toast whose fade-out has finished.
    pub fn prune(&mut self, now: Instant) {
        let timings = self.timings;
        self.toasts
            .retain(|toast| toast.phase(&timings, now).is_some());
    }

    /// Toasts that should be on screen at `now`, oldest first.
    pub fn visible(&self, now: Instant) -> Vec<(&Notification, ToastPhase)> {
        self.toasts
            .iter()
            .filter_map(|toast| match toast.phase(&self.timings, now) {
                Some(ToastPhase::Pending) | None => None,
                Some(phase) => Some((&toast.notification, phase)),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }
}
