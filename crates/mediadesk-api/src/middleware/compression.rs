//! Response compression layer.

use tower_http::compression::CompressionLayer;
use tower_http::compression::predicate::{And, DefaultPredicate, NotForContentType, Predicate};

/// When to compress a response.
pub type MediaPredicate = And<And<DefaultPredicate, NotForContentType>, NotForContentType>;

/// Builds a gzip layer that leaves already-compressed media alone.
pub fn build_compression_layer() -> CompressionLayer<MediaPredicate> {
    let predicate = DefaultPredicate::new()
        .and(NotForContentType::const_new("video/"))
        .and(NotForContentType::const_new("application/zip"));
    CompressionLayer::new().compress_when(predicate)
}
