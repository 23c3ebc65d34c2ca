use serde::Serialize;

/// Shown for any estimate that could not be read.
pub const PLACEHOLDER: &str = "-";

/// Download and revenue estimates as display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorTowerInfo {
    pub downloads: String,
    pub revenue: String,
}

impl Default for SensorTowerInfo {
    fn default() -> Self {
        Self {
            downloads: PLACEHOLDER.to_string(),
            revenue: PLACEHOLDER.to_string(),
        }
    }
}

impl SensorTowerInfo {
    /// Empty or missing values become [`PLACEHOLDER`].
    pub fn new(downloads: Option<String>, revenue: Option<String>) -> Self {
        let or_placeholder = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| PLACEHOLDER.to_string())
        };

        Self {
            downloads: or_placeholder(downloads),
            revenue: or_placeholder(revenue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_placeholder() {
        let info = SensorTowerInfo::default();
        assert_eq!(info.downloads, "-");
        assert_eq!(info.revenue, "-");
    }

    #[test]
    fn test_new_replaces_empty() {
        let info = SensorTowerInfo::new(Some("  ".into()), None);
        assert_eq!(info, SensorTowerInfo::default());

        let info = SensorTowerInfo::new(Some("5M".into()), Some("$100k".into()));
        assert_eq!(info.downloads, "5M");
        assert_eq!(info.revenue, "$100k");
    }
}
