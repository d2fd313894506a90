use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 单页最大条数
pub const MAX_PAGE_SIZE: i64 = 100;

// 页码上限，保证 偏移量 = (页码 - 1) * 条数 不溢出
pub const MAX_PAGE: i64 = 1_000_000;

// 分页查询参数，query string 中的数字可能以字符串形式到达
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationQuery {
    #[serde(default = "default_page", deserialize_with = "lenient_i64")]
    pub page: i64,
    #[serde(default = "default_size", deserialize_with = "lenient_i64")]
    pub size: i64,
}

impl PaginationQuery {
    /// 规范化后的页码（从 1 开始）
    pub fn page(&self) -> u64 {
        self.page.clamp(1, MAX_PAGE) as u64
    }

    /// 规范化后的每页条数
    pub fn size(&self) -> u64 {
        self.size.clamp(1, MAX_PAGE_SIZE) as u64
    }
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_size(),
        }
    }
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationInfo {
    pub fn new(page: u64, page_size: u64, total: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total.div_ceil(page_size)
        };
        Self {
            page: page as i64,
            page_size: page_size as i64,
            total: total as i64,
            total_pages: total_pages as i64,
        }
    }
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E: Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(value)
        }

        fn visit_u64<E: Error>(self, value: u64) -> Result<Self::Value, E> {
            i64::try_from(value).map_err(|_| Error::invalid_value(Unexpected::Unsigned(value), &self))
        }

        fn visit_str<E: Error>(self, value: &str) -> Result<Self::Value, E> {
            value
                .trim()
                .parse()
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_info_rounds_up() {
        let info = PaginationInfo::new(2, 20, 41);
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.page, 2);
    }

    #[test]
    fn test_query_accepts_strings_and_clamps() {
        let q: PaginationQuery = serde_json::from_str(r#"{"page":"0","size":"500"}"#).unwrap();
        assert_eq!(q.page(), 1);
        assert_eq!(q.size(), MAX_PAGE_SIZE as u64);
    }

    #[test]
    fn test_huge_page_is_capped() {
        let q: PaginationQuery =
            serde_json::from_str(r#"{"page":"9223372036854775807","size":100}"#).unwrap();
        assert_eq!(q.page(), MAX_PAGE as u64);
        assert!((q.page() - 1).checked_mul(q.size()).is_some());
    }
}
