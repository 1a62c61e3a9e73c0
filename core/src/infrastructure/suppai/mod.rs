pub mod suppai_client;

pub use suppai_client::SuppAiClient;
