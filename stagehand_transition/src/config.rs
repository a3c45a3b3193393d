// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timing configuration.

/// Timing configuration for a transition group.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TransitionConfig {
    /// Duration of the clone transform transition, in milliseconds. Carried
    /// through to [`Effect::SpawnClone`](crate::Effect::SpawnClone); the
    /// easing curve is the host's concern, the core never interpolates.
    pub duration_ms: u64,
    /// Force a stuck transition to settle if clone completion signals stop
    /// arriving (zero-duration or failed animations never fire one). `None`
    /// disables the fallback for hosts that guarantee delivery.
    pub stall_timeout_ms: Option<u64>,
}

impl TransitionConfig {
    /// Default transform and cross-fade duration.
    pub const DEFAULT_DURATION_MS: u64 = 300;

    /// A configuration with the given duration and a stall timeout of four
    /// times that duration.
    pub fn with_duration(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            stall_timeout_ms: Some(duration_ms.saturating_mul(4)),
        }
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self::with_duration(Self::DEFAULT_DURATION_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::TransitionConfig;

    #[test]
    fn default_carries_a_stall_fallback() {
        let config = TransitionConfig::default();
        assert_eq!(config.duration_ms, 300);
        assert_eq!(config.stall_timeout_ms, Some(1200));
    }

    #[test]
    fn stall_timeout_saturates() {
        let config = TransitionConfig::with_duration(u64::MAX);
        assert_eq!(config.stall_timeout_ms, Some(u64::MAX));
    }
}
