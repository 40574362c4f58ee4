pub mod job_extractor;

pub use job_extractor::{matches_keywords, JobExtractor};
