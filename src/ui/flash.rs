use std::time::{Duration, Instant};

pub const FORM_SUCCESS_TTL: Duration = Duration::from_secs(3);
pub const FORM_ERROR_TTL: Duration = Duration::from_secs(5);
pub const CARD_MESSAGE_TTL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

/// A banner that clears itself once its time is up.
///
/// Time is passed in rather than read, so callers and tests decide what "now" is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub text: String,
    expires_at: Instant,
}

impl Flash {
    pub fn success(text: impl Into<String>, now: Instant, ttl: Duration) -> Self {
        Self {
            kind: FlashKind::Success,
            text: text.into(),
            expires_at: now + ttl,
        }
    }

    pub fn error(text: impl Into<String>, now: Instant, ttl: Duration) -> Self {
        Self {
            kind: FlashKind::Error,
            text: text.into(),
            expires_at: now + ttl,
        }
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Text of the flash if it is still showing at `now`.
pub fn visible(flash: &Option<Flash>, now: Instant) -> Option<&str> {
    flash
        .as_ref()
        .filter(|f| f.is_visible(now))
        .map(|f| f.text.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_ttl() {
        let start = Instant::now();
        let flash = Some(Flash::error("boom", start, CARD_MESSAGE_TTL));

        assert_eq!(visible(&flash, start), Some("boom"));
        assert_eq!(visible(&flash, start + Duration::from_millis(1999)), Some("boom"));
        assert_eq!(visible(&flash, start + CARD_MESSAGE_TTL), None);
        assert_eq!(visible(&None, start), None);
    }
}
