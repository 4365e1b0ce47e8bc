pub mod batch;

pub use self::batch::{load_config, BatchConfig, BatchStep};
