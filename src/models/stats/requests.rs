use serde::Deserialize;
use ts_rs::TS;

// 排行榜默认条数
pub const DEFAULT_LEADERBOARD_LIMIT: u64 = 10;
// 排行榜最大条数
pub const MAX_LEADERBOARD_LIMIT: u64 = 100;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/stats.ts")]
pub struct LeaderboardQuery {
    pub limit: Option<u64>,
}

impl LeaderboardQuery {
    pub fn limit(&self) -> u64 {
        self.limit
            .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
            .clamp(1, MAX_LEADERBOARD_LIMIT)
    }
}
