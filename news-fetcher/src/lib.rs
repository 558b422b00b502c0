pub mod types;
pub mod query;
pub mod fetcher;
pub mod parser;
pub mod aligner;
pub mod traits;
pub mod store;
pub mod pipeline;
pub mod server;
pub mod config;
pub mod utils;

pub use types::*;
pub use fetcher::Fetcher;
pub use parser::{decode_document, extract, CompiledRule, FeedDocument};
pub use aligner::assemble;
pub use traits::NewsRepository;
pub use store::NewsStore;
pub use pipeline::IngestionPipeline;
pub use server::{create_router, AppState};
