//! Aggregate health status shared by check results and repository results.

use serde::{Deserialize, Serialize};

/// Health status of a single check or an aggregated repository.
///
/// Ordered for "worst of" aggregation: `Critical > Warning > Healthy >
/// Unknown`. `Unknown` sorts below `Healthy` because it means "we never got
/// a verdict", which is worse than an affirmative pass but must not be
/// confused with an active warning/critical finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Unknown,
    Healthy,
    Warning,
    Critical,
}

impl Status {
    /// Rank used for "worst of" comparisons: higher is worse.
    const fn rank(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Healthy => 1,
            Self::Warning => 2,
            Self::Critical => 3,
        }
    }

    /// Return whichever of `self`/`other` is worse.
    #[must_use]
    pub fn worst(self, other: Self) -> Self {
        if other.rank() > self.rank() { other } else { self }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unknown => "unknown",
            Self::Healthy => "healthy",
            Self::Warning => "warning",
            Self::Critical => "critical",
        };
        write!(f, "{s}")
    }
}

impl PartialOrd for Status {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Status {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worst_picks_critical_over_everything() {
        assert_eq!(Status::Healthy.worst(Status::Critical), Status::Critical);
        assert_eq!(Status::Critical.worst(Status::Warning), Status::Critical);
    }

    #[test]
    fn unknown_ranks_below_healthy() {
        assert!(Status::Unknown < Status::Healthy);
        assert_eq!(Status::Unknown.worst(Status::Healthy), Status::Healthy);
    }

    #[test]
    fn ordering_matches_documented_ranks() {
        let mut ranks = vec![Status::Critical, Status::Unknown, Status::Healthy, Status::Warning];
        ranks.sort();
        assert_eq!(ranks, vec![Status::Unknown, Status::Healthy, Status::Warning, Status::Critical]);
    }
}
