use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a batch of text items is reduced to one aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Join every item body with a single space and score the result once.
    WholeBatch,
    /// Score each item on its own and average the four score fields.
    PerItemMean,
}

impl std::fmt::Display for AggregationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregationPolicy::WholeBatch => write!(f, "whole"),
            AggregationPolicy::PerItemMean => write!(f, "mean"),
        }
    }
}

impl FromStr for AggregationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "whole" | "whole_batch" | "joined" => Ok(AggregationPolicy::WholeBatch),
            "mean" | "per_item_mean" | "average" => Ok(AggregationPolicy::PerItemMean),
            other => Err(format!(
                "unknown aggregation policy '{other}' (expected 'whole' or 'mean')"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_names() {
        assert_eq!(
            "whole".parse::<AggregationPolicy>().unwrap(),
            AggregationPolicy::WholeBatch
        );
        assert_eq!(
            "mean".parse::<AggregationPolicy>().unwrap(),
            AggregationPolicy::PerItemMean
        );
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            " MEAN ".parse::<AggregationPolicy>().unwrap(),
            AggregationPolicy::PerItemMean
        );
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let err = "median".parse::<AggregationPolicy>().unwrap_err();
        assert!(err.contains("median"), "unexpected error: {err}");
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for policy in [AggregationPolicy::WholeBatch, AggregationPolicy::PerItemMean] {
            assert_eq!(policy.to_string().parse::<AggregationPolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&AggregationPolicy::PerItemMean).unwrap();
        assert_eq!(json, "\"per_item_mean\"");
    }
}
