pub mod classifier;
pub mod clock;
pub mod etl;
pub mod loader;
pub mod parser;
pub mod pipeline;
pub mod writer;

pub use crate::domain::model::{
    BanFormat, BanRecord, BanStatus, ClassifiedBans, LineWarning, LoadedBans, RunSummary,
};
pub use crate::domain::ports::{Clock, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
