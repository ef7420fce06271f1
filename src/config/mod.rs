mod loader;

pub use loader::{
    AssetConfig, CleanupConfig, Config, DetectorConfig, ExternalDetectorConfig, ReportConfig,
    SourceConfig,
};
