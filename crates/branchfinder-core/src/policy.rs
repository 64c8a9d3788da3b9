// crates/branchfinder-core/src/policy.rs
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIDENT_ABOVE: f64 = 85.0;

/// Score bands used by [`Decision::decide`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Lowest score the matcher returns at all.
    pub threshold: f64,
    /// A top score strictly above this is accepted without asking.
    pub confident_above: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            threshold: crate::matcher::DEFAULT_THRESHOLD,
            confident_above: DEFAULT_CONFIDENT_ABOVE,
        }
    }
}

/// What to do with a query, judged from its best dataset score alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Nothing cleared the threshold: go to the remote service.
    NoMatch,
    /// Show the ranked candidates and wait for the user to pick one.
    Ambiguous,
    /// Take the top candidate as the query.
    Confident,
}

impl Decision {
    pub fn decide(top_score: Option<f64>, policy: &PolicyConfig) -> Self {
        match top_score {
            None => Decision::NoMatch,
            Some(s) if s < policy.threshold => Decision::NoMatch,
            Some(s) if s > policy.confident_above => Decision::Confident,
            Some(_) => Decision::Ambiguous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands() {
        let p = PolicyConfig::default();
        assert_eq!(Decision::decide(None, &p), Decision::NoMatch);
        assert_eq!(Decision::decide(Some(90.0), &p), Decision::Confident);
        assert_eq!(Decision::decide(Some(70.0), &p), Decision::Ambiguous);
        assert_eq!(Decision::decide(Some(100.0), &p), Decision::Confident);
    }

    #[test]
    fn boundaries() {
        let p = PolicyConfig::default();
        assert_eq!(Decision::decide(Some(85.0), &p), Decision::Ambiguous);
        assert_eq!(Decision::decide(Some(85.01), &p), Decision::Confident);
        assert_eq!(Decision::decide(Some(60.0), &p), Decision::Ambiguous);
        assert_eq!(Decision::decide(Some(59.9), &p), Decision::NoMatch);
    }

    #[test]
    fn bands_follow_configuration() {
        let p = PolicyConfig {
            threshold: 40.0,
            confident_above: 95.0,
        };
        assert_eq!(Decision::decide(Some(90.0), &p), Decision::Ambiguous);
        assert_eq!(Decision::decide(Some(45.0), &p), Decision::Ambiguous);
        assert_eq!(Decision::decide(Some(96.0), &p), Decision::Confident);
    }
}
