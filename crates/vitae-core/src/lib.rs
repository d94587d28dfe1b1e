pub mod app_config;
pub mod config;
pub mod error;
pub mod outcome;
pub mod profile;
pub mod targets;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use outcome::{FailureKind, ScrapeOutcome, ScrapeStatus};
pub use profile::{
    BasicInfo, DateRange, ExperienceRecord, LocationInfo, PartialDate, ProfileRecord,
};
pub use targets::{load_targets, normalize_username, ProfileTarget, TargetsFile};
