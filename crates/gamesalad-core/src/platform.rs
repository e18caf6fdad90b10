//! Capabilities provided by the host shell.
//!
//! The core never talks to a device directly. Hosts hand it implementations
//! of these traits; the no-op versions are used when a host has nothing to
//! offer.

/// Vibration feedback strength
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticPattern {
    /// A word was found
    Light,
    /// A selection was rejected
    Warning,
    /// The level was completed
    Success,
}

impl HapticPattern {
    /// Vibration pulses in milliseconds, alternating on and off
    pub fn pulses_ms(&self) -> &'static [u32] {
        match self {
            HapticPattern::Light => &[20],
            HapticPattern::Warning => &[40, 60, 40],
            HapticPattern::Success => &[30, 50, 30, 50, 80],
        }
    }
}

pub trait Haptics {
    fn vibrate(&mut self, pattern: HapticPattern);
}

pub trait NotificationSender {
    fn notify(&mut self, title: &str, body: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHaptics;

impl Haptics for NoopHaptics {
    fn vibrate(&mut self, _pattern: HapticPattern) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl NotificationSender for NoopNotifier {
    fn notify(&mut self, _title: &str, _body: &str) {}
}
