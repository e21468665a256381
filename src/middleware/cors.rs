use tower_http::cors::{Any, CorsLayer};

/// Referrals are read and written from any origin, with any method or header.
pub fn any_origin_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
