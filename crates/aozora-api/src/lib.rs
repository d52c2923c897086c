//! Upstream HTTP clients for the aozora aggregation service.
//!
//! Each external collaborator gets its own client: the GraphQL metadata
//! provider, the image-mapping service, the mapper service (standard
//! episode lists) and the stream service (remapped episode lists, servers,
//! embed links). All of them route outbound calls through the shared
//! retry/timeout wrapper in [`fetch`].

pub mod artwork;
pub mod fetch;
pub mod mapper;
pub mod metadata;
pub mod resolver;
pub mod stream;

pub use artwork::ArtworkClient;
pub use fetch::{FetchClient, FetchError};
pub use mapper::MapperClient;
pub use metadata::{MetadataClient, MetadataError};
pub use resolver::EpisodeResolver;
pub use stream::StreamClient;
