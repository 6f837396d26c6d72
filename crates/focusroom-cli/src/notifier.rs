use focusroom_core::error::Result;
use focusroom_core::{CoreError, Notification, Notifier};
use notify_rust::Timeout;

/// Desktop notifications through the platform notification service.
pub struct DesktopNotifier {
    timeout_ms: u32,
}

impl DesktopNotifier {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, notification: &Notification) -> Result<()> {
        notify_rust::Notification::new()
            .appname("focusroom")
            .summary(&notification.title)
            .body(&notification.body)
            .timeout(Timeout::Milliseconds(self.timeout_ms))
            .show()
            .map(|_| ())
            .map_err(|e| CoreError::Notification(e.to_string()))
    }
}
