/// Largest page the history endpoint will return
pub const MAX_HISTORY_LIMIT: i64 = 1000;

/// Query parameters for `GET /api/markets/{id}/history`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryQuery {
    pub limit: i64,
    pub hours: Option<i64>,
}

impl HistoryQuery {
    /// `limit` is clamped to `1..=1000`; a non-positive `hours` means no window
    pub fn new(limit: i64, hours: Option<i64>) -> Self {
        Self {
            limit: limit.clamp(1, MAX_HISTORY_LIMIT),
            hours: hours.filter(|h| *h > 0),
        }
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("limit", self.limit.to_string())];
        if let Some(hours) = self.hours {
            params.push(("hours", hours.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_with_and_without_hours() {
        assert_eq!(
            HistoryQuery::new(100, None).to_params(),
            vec![("limit", "100".to_string())]
        );
        assert_eq!(
            HistoryQuery::new(1000, Some(24)).to_params(),
            vec![("limit", "1000".to_string()), ("hours", "24".to_string())]
        );
    }

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(HistoryQuery::new(5000, None).limit, MAX_HISTORY_LIMIT);
        assert_eq!(HistoryQuery::new(0, None).limit, 1);
    }

    #[test]
    fn test_zero_hours_means_no_window() {
        assert_eq!(HistoryQuery::new(10, Some(0)).hours, None);
        assert_eq!(HistoryQuery::new(10, Some(-3)).hours, None);
    }
}
