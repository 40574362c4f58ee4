pub mod diff;
pub mod fetcher;
pub mod http;
pub mod notifier;
pub mod processor;

pub use fetcher::PageFetcher;
pub use notifier::TelegramNotifier;
pub use processor::JobPipeline;
