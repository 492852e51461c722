//! Message delivery port trait.

use crate::domain::report::ReportSummary;

/// An outgoing report. Channels pick the bodies they can carry.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub subject: String,
    pub text_body: String,
    pub html_body: Option<String>,
    pub sms_body: String,
}

impl Message {
    pub fn from_summary(summary: &ReportSummary, html_body: Option<String>) -> Self {
        Self {
            subject: summary.subject(),
            text_body: summary.text_body(),
            html_body,
            sms_body: summary.sms_body(),
        }
    }
}

/// Best-effort transport.
///
/// Implementations never panic and never return errors: missing
/// configuration or a transport failure is logged and reported as `false`.
/// There is no retry at this layer.
pub trait DeliveryPort {
    fn channel(&self) -> &'static str;
    fn deliver(&self, message: &Message) -> bool;
}

/// Outcome of [`deliver_with_fallback`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryOutcome {
    pub delivered_via: Option<&'static str>,
    pub attempted: Vec<&'static str>,
}

impl DeliveryOutcome {
    pub fn succeeded(&self) -> bool {
        self.delivered_via.is_some()
    }
}

/// Tries each channel in order and stops at the first success.
pub fn deliver_with_fallback(channels: &[&dyn DeliveryPort], message: &Message) -> DeliveryOutcome {
    let mut outcome = DeliveryOutcome::default();
    for channel in channels {
        outcome.attempted.push(channel.channel());
        if channel.deliver(message) {
            tracing::info!(channel = channel.channel(), "report delivered");
            outcome.delivered_via = Some(channel.channel());
            return outcome;
        }
        tracing::warn!(channel = channel.channel(), "delivery failed, trying next channel");
    }
    outcome
}
