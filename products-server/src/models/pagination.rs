//! List window - offset/limit over ascending ids

/// Maximum rows per list call
pub const MAX_COUNT: i64 = 100;

/// Rows per list call when the caller's count is below 1
pub const DEFAULT_COUNT: i64 = 10;

/// Normalized list window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Rows to skip (>= 0)
    pub start: i64,
    /// Rows to return (1..=100)
    pub count: i64,
}

impl Page {
    /// Create a window with normalization.
    ///
    /// - Negative start becomes 0
    /// - Count below 1 becomes 10, above 100 becomes 100
    pub fn new(start: i64, count: i64) -> Self {
        let count = if count < 1 {
            DEFAULT_COUNT
        } else {
            count.min(MAX_COUNT)
        };

        Self {
            start: start.max(0),
            count,
        }
    }

    /// SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        self.start
    }

    /// SQL LIMIT value.
    pub fn limit(&self) -> i64 {
        self.count
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, DEFAULT_COUNT)
    }
}

/// Query parameters for `GET /products`.
///
/// Values are kept as text so a malformed number reads as 0 instead of
/// rejecting the request.
#[derive(Debug, Clone, Default)]
pub struct PageParams {
    pub start: Option<String>,
    pub count: Option<String>,
}

impl PageParams {
    /// Collect from raw query pairs. The first occurrence of a key wins;
    /// unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "start" => &mut params.start,
                "count" => &mut params.count,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

impl From<PageParams> for Page {
    fn from(params: PageParams) -> Self {
        let parse = |v: Option<String>| {
            v.and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(0)
        };
        Self::new(parse(params.start), parse(params.count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(start: Option<&str>, count: Option<&str>) -> PageParams {
        PageParams {
            start: start.map(str::to_owned),
            count: count.map(str::to_owned),
        }
    }

    #[test]
    fn keeps_valid_window() {
        let p = Page::new(20, 5);
        assert_eq!(p.offset(), 20);
        assert_eq!(p.limit(), 5);
    }

    #[test]
    fn clamps_start() {
        assert_eq!(Page::new(-3, 5).start, 0);
    }

    #[test]
    fn low_count_uses_default() {
        assert_eq!(Page::new(0, 0).count, DEFAULT_COUNT);
        assert_eq!(Page::new(0, -1).count, DEFAULT_COUNT);
        assert_eq!(Page::new(0, 1).count, 1);
    }

    #[test]
    fn high_count_clamps_to_max() {
        assert_eq!(Page::new(0, 100).count, 100);
        assert_eq!(Page::new(0, 101).count, MAX_COUNT);
        assert_eq!(Page::new(0, 150).count, MAX_COUNT);
    }

    #[test]
    fn first_repeated_key_wins() {
        let pairs = vec![
            ("count".to_string(), "5".to_string()),
            ("sort".to_string(), "name".to_string()),
            ("count".to_string(), "6".to_string()),
            ("start".to_string(), "2".to_string()),
            ("start".to_string(), "9".to_string()),
        ];
        let page = Page::from(PageParams::from_pairs(pairs));
        assert_eq!(page, Page::new(2, 5));
    }

    #[test]
    fn params_default_when_absent() {
        assert_eq!(Page::from(params(None, None)), Page::new(0, DEFAULT_COUNT));
    }

    #[test]
    fn params_parse_numbers() {
        assert_eq!(Page::from(params(Some("5"), Some("25"))), Page::new(5, 25));
    }

    #[test]
    fn malformed_params_read_as_zero() {
        let page = Page::from(params(Some("abc"), Some("x1")));
        assert_eq!(page.start, 0);
        assert_eq!(page.count, DEFAULT_COUNT);
    }
}
