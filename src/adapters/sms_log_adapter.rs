//! Best-effort SMS fallback: the message is written to the log only.

use crate::ports::config_port::ConfigPort;
use crate::ports::delivery_port::{DeliveryPort, Message};
use tracing::{info, warn};

/// Characters in a single GSM-7 segment.
pub const SMS_SEGMENT_LEN: usize = 160;

#[derive(Debug, Clone, Default)]
pub struct SmsLogAdapter {
    phone: Option<String>,
}

impl SmsLogAdapter {
    pub fn new(phone: Option<String>) -> Self {
        Self { phone }
    }

    pub fn from_config(config: &dyn ConfigPort) -> Self {
        Self::new(config.get_string("sms", "phone"))
    }
}

pub fn segment_count(body: &str) -> usize {
    body.chars().count().div_ceil(SMS_SEGMENT_LEN).max(1)
}

impl DeliveryPort for SmsLogAdapter {
    fn channel(&self) -> &'static str {
        "sms"
    }

    fn deliver(&self, message: &Message) -> bool {
        let Some(phone) = &self.phone else {
            warn!("sms delivery not configured: missing phone");
            return false;
        };
        if message.sms_body.trim().is_empty() {
            warn!(to = %phone, "refusing to send empty sms");
            return false;
        }
        info!(
            to = %phone,
            segments = segment_count(&message.sms_body),
            body = %message.sms_body,
            "sms logged"
        );
        true
    }
}
