//! Per-request stream health.

/// Health of the most recent stream attempt.
///
/// Reset to `Healthy` when a request starts, set to `Degraded` by any
/// transport or decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Healthy,
    Degraded,
}

impl SessionStatus {
    pub fn from_healthy(is_healthy: bool) -> Self {
        if is_healthy {
            SessionStatus::Healthy
        } else {
            SessionStatus::Degraded
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, SessionStatus::Healthy)
    }

    /// Short label for status indicators.
    pub fn label(&self) -> &'static str {
        match self {
            SessionStatus::Healthy => "connected",
            SessionStatus::Degraded => "connection problem",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_healthy() {
        assert_eq!(SessionStatus::from_healthy(true), SessionStatus::Healthy);
        assert_eq!(SessionStatus::from_healthy(false), SessionStatus::Degraded);
        assert!(SessionStatus::default().is_healthy());
        assert!(!SessionStatus::Degraded.is_healthy());
    }
}
