//! Notice sink that forwards user-facing notices to `tracing`.

use tracing::{info, warn};
use trtech_commerce::notify::{Notice, NoticeKind, NotificationSink};

/// Logs every notice. Success and info notices go out at `info`, errors
/// at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationSink for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Success => info!(kind = "success", "{}", notice.message),
            NoticeKind::Info => info!(kind = "info", "{}", notice.message),
            NoticeKind::Error => warn!(kind = "error", "{}", notice.message),
        }
    }
}

/// Fans a notice out to several sinks, e.g. the terminal and the log.
pub struct FanoutNotifier {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl FanoutNotifier {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl Default for FanoutNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for FanoutNotifier {
    fn notify(&self, notice: Notice) {
        for sink in &self.sinks {
            sink.notify(notice.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use trtech_commerce::notify::RecordingSink;

    struct Shared(Arc<RecordingSink>);

    impl NotificationSink for Shared {
        fn notify(&self, notice: Notice) {
            self.0.notify(notice);
        }
    }

    #[test]
    fn test_fanout_reaches_every_sink() {
        let a = Arc::new(RecordingSink::new());
        let b = Arc::new(RecordingSink::new());
        let fanout = FanoutNotifier::new()
            .with(TracingNotifier::new())
            .with(Shared(a.clone()))
            .with(Shared(b.clone()));
        assert_eq!(fanout.len(), 3);

        fanout.notify(Notice::success("Added to cart"));
        fanout.notify(Notice::error("Failed to submit order. Please try again."));

        assert_eq!(a.messages(), b.messages());
        assert_eq!(a.notices().len(), 2);
    }
}
