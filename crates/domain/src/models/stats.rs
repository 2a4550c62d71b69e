//! Creator dashboard statistics for one project.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectStatsEnvelope {
    #[serde(default)]
    pub cumulative: CumulativeStats,
    #[serde(default)]
    pub funding_distribution: Vec<FundingDateStats>,
    #[serde(default)]
    pub referral_distribution: Vec<ReferrerStats>,
    #[serde(default)]
    pub reward_distribution: Vec<RewardStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_stats: Option<VideoStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CumulativeStats {
    pub average_pledge: f64,
    pub backers_count: i64,
    pub goal: f64,
    pub percent_raised: f64,
    pub pledged: f64,
}

/// Pledges received on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingDateStats {
    pub date: i64,
    #[serde(default)]
    pub backers_count: i64,
    #[serde(default)]
    pub cumulative_backers_count: i64,
    #[serde(default)]
    pub cumulative_pledged: f64,
    #[serde(default)]
    pub pledged: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferrerStats {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub referrer_name: String,
    #[serde(default)]
    pub referrer_type: String,
    #[serde(default)]
    pub backers_count: i64,
    #[serde(default)]
    pub percentage_of_dollars: f64,
    #[serde(default)]
    pub pledged: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardStats {
    #[serde(alias = "reward_id")]
    pub id: i64,
    #[serde(default)]
    pub backers_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default)]
    pub pledged: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoStats {
    pub external_completions: i64,
    pub external_starts: i64,
    pub internal_completions: i64,
    pub internal_starts: i64,
}
