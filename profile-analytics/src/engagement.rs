//! Engagement-rate computation.
//!
//! The rate is a deterministic base plus bounded positive jitter. TikTok
//! profiles trend roughly double the rate of other platforms at the same
//! follower tier, and very large accounts are scaled down.

use rand::Rng;

/// The platform with elevated baseline engagement.
pub const HIGH_ENGAGEMENT_PLATFORM: &str = "TikTok";

/// Baseline engagement rate for most platforms.
pub const BASE_RATE: f64 = 3.0;

/// Baseline engagement rate for the high-engagement platform.
pub const HIGH_ENGAGEMENT_BASE_RATE: f64 = 6.0;

/// Follower count above which an account counts as large.
pub const LARGE_ACCOUNT_THRESHOLD: u64 = 1_000_000;

/// Scale factor applied to large accounts.
pub const LARGE_ACCOUNT_FACTOR: f64 = 0.5;

/// Upper bound (exclusive) of the uniform jitter added to every rate.
pub const JITTER_RANGE: f64 = 2.0;

/// Compute the engagement rate for a profile summary.
///
/// The result is always non-negative: the deterministic part is positive and
/// the jitter is drawn from `[0, JITTER_RANGE)`.
pub fn engagement_rate(platform: &str, followers: u64) -> f64 {
    let jitter = rand::thread_rng().gen_range(0.0..JITTER_RANGE);
    deterministic_rate(platform, followers) + jitter
}

/// The deterministic component of the engagement rate.
fn deterministic_rate(platform: &str, followers: u64) -> f64 {
    let base = if platform == HIGH_ENGAGEMENT_PLATFORM {
        HIGH_ENGAGEMENT_BASE_RATE
    } else {
        BASE_RATE
    };

    let follower_factor = if followers > LARGE_ACCOUNT_THRESHOLD {
        LARGE_ACCOUNT_FACTOR
    } else {
        1.0
    };

    base * follower_factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_is_non_negative() {
        for followers in [0, 10, 999_999, 1_000_001, u64::MAX] {
            assert!(engagement_rate("Instagram", followers) >= 0.0);
            assert!(engagement_rate("TikTok", followers) >= 0.0);
        }
    }

    #[test]
    fn test_rate_within_deterministic_plus_jitter_bounds() {
        for _ in 0..100 {
            let rate = engagement_rate("Instagram", 1_000);
            assert!(rate >= BASE_RATE);
            assert!(rate < BASE_RATE + JITTER_RANGE);
        }
    }

    #[test]
    fn test_high_engagement_platform_doubles_base() {
        assert_eq!(
            deterministic_rate("TikTok", 100),
            2.0 * deterministic_rate("Instagram", 100)
        );
    }

    #[test]
    fn test_large_accounts_are_scaled_down() {
        assert!(
            deterministic_rate("YouTube", LARGE_ACCOUNT_THRESHOLD + 1)
                < deterministic_rate("YouTube", LARGE_ACCOUNT_THRESHOLD)
        );
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // Exactly at the threshold still counts as a regular account.
        assert_eq!(
            deterministic_rate("Instagram", LARGE_ACCOUNT_THRESHOLD),
            BASE_RATE
        );
    }
}
