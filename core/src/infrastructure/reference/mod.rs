pub mod reference_sources;
pub mod webmd_client;
pub mod wikipedia_client;

pub use reference_sources::ReferenceSources;
pub use webmd_client::WebMdClient;
pub use wikipedia_client::WikipediaClient;
