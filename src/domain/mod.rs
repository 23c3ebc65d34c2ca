pub mod analysis;
pub mod app_info;
pub mod market;
pub mod platform;
pub mod review;

pub use analysis::AnalysisResult;
pub use app_info::AppInfo;
pub use market::SensorTowerInfo;
pub use platform::Platform;
pub use review::{Review, StrippedReview};
