#![allow(dead_code)]

use std::cell::RefCell;

use zakat_widget::prelude::*;

/// Records every dialog and clipboard write.
#[derive(Default)]
pub struct RecordingHost {
    pub clipboard_blocked: bool,
    pub clipboard_deferred: bool,
    pub clipboard: RefCell<Vec<String>>,
    pub pending_notices: RefCell<Vec<CopyNotice>>,
    pub alerts: RefCell<Vec<String>>,
    pub prints: RefCell<usize>,
}

impl RecordingHost {
    pub fn blocked() -> Self {
        Self {
            clipboard_blocked: true,
            ..Self::default()
        }
    }

    /// Accepts writes but settles them later, like the async browser clipboard.
    pub fn deferred() -> Self {
        Self {
            clipboard_deferred: true,
            ..Self::default()
        }
    }

    pub fn last_alert(&self) -> Option<String> {
        self.alerts.borrow().last().cloned()
    }
}

impl Host for RecordingHost {
    fn write_clipboard(&self, text: &str, notice: &CopyNotice) -> Result<ClipboardWrite, HostError> {
        if self.clipboard_blocked {
            return Err(HostError::ClipboardUnavailable);
        }
        self.clipboard.borrow_mut().push(text.to_string());
        if self.clipboard_deferred {
            self.pending_notices.borrow_mut().push(notice.clone());
            return Ok(ClipboardWrite::Pending);
        }
        Ok(ClipboardWrite::Done)
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn print(&self) -> Result<(), HostError> {
        *self.prints.borrow_mut() += 1;
        Ok(())
    }
}

pub type TestWidget = ZakatWidget<MemoryStore, MemoryLocation>;

pub fn widget() -> TestWidget {
    widget_with(MemoryStore::new(), "https://ilmualam.example/zakat")
}

/// Routes widget diagnostics to the test output; `RUST_LOG=zakat_widget=debug`
/// shows storage and location fallbacks.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn widget_with(storage: MemoryStore, href: &str) -> TestWidget {
    init_tracing();
    ZakatWidget::new(WidgetConfig::default(), storage, MemoryLocation::new(href))
}

pub fn output(widget: &TestWidget, id: &str) -> Option<String> {
    widget
        .outputs()
        .into_iter()
        .find(|(output, _)| *output == id)
        .map(|(_, text)| text)
}

pub fn fill(widget: &mut TestWidget, values: &[(&str, &str)]) {
    for (id, value) in values {
        assert_eq!(widget.on_input(id, value), Effect::Refresh, "input {}", id);
    }
}
