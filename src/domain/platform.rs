use serde::Serialize;

/// Storefront an app id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Platform {
    AppStore,
    PlayStore,
}

impl Platform {
    /// Numeric ids longer than five digits are App Store ids; anything else
    /// is taken as a Play Store package name.
    pub fn classify(app_id: &str) -> Self {
        if app_id.len() > 5 && app_id.chars().all(|c| c.is_ascii_digit()) {
            Platform::AppStore
        } else {
            Platform::PlayStore
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::AppStore => "App Store",
            Platform::PlayStore => "Google Play",
        }
    }

    /// Prefix used for report file names.
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Platform::AppStore => "ios",
            Platform::PlayStore => "android",
        }
    }

    pub fn store_url(&self, app_id: &str) -> String {
        match self {
            Platform::AppStore => format!("https://apps.apple.com/app/id{}", app_id),
            Platform::PlayStore => {
                format!("https://play.google.com/store/apps/details?id={}", app_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_numeric_id() {
        assert_eq!(Platform::classify("1620725834"), Platform::AppStore);
        assert_eq!(Platform::classify("1448868559"), Platform::AppStore);
    }

    #[test]
    fn test_classify_package_name() {
        assert_eq!(Platform::classify("com.whatsapp"), Platform::PlayStore);
        assert_eq!(
            Platform::classify("com.smilesolutionteam.engquiz"),
            Platform::PlayStore
        );
    }

    #[test]
    fn test_classify_short_numeric_is_play() {
        assert_eq!(Platform::classify("12345"), Platform::PlayStore);
        assert_eq!(Platform::classify("123456"), Platform::AppStore);
    }

    #[test]
    fn test_classify_mixed_is_play() {
        assert_eq!(Platform::classify("12345678a"), Platform::PlayStore);
        assert_eq!(Platform::classify(""), Platform::PlayStore);
    }

    #[test]
    fn test_store_url() {
        assert_eq!(
            Platform::AppStore.store_url("1620725834"),
            "https://apps.apple.com/app/id1620725834"
        );
        assert!(Platform::PlayStore
            .store_url("com.whatsapp")
            .ends_with("details?id=com.whatsapp"));
    }
}
