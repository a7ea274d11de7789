//! HTTP surface of the record service.
//!
//! | Method | Path            | Success                     |
//! |--------|-----------------|-----------------------------|
//! | POST   | `/records`      | 201 + created record        |
//! | GET    | `/records`      | 200 + array of records      |
//! | GET    | `/records/{id}` | 200 + record                |
//! | PUT    | `/records/{id}` | 200 + updated record        |
//! | DELETE | `/records/{id}` | 204                         |
//! | GET    | `/health`       | 200 + `{status, timestamp}` |
//! | GET    | `/`             | `index.html` or greeting    |

pub mod dto;
pub mod error;
pub mod handlers;

use crate::config::HttpConfig;
use axum::{Router, routing::get};
use handlers::{
    RecordApiState, create_record, delete_record, get_record, health, list_records,
    update_record, welcome,
};
use mockable::Clock;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Builds the application router around a record service.
///
/// `GET /` serves `index.html` from the static directory when the file
/// exists at startup and a JSON greeting otherwise; `/static` is mounted
/// only when the directory exists.
#[must_use]
pub fn build_router<C>(service: RecordApiState<C>, config: &HttpConfig) -> Router
where
    C: Clock + Send + Sync + 'static,
{
    let mut router = Router::new()
        .route("/records", get(list_records::<C>).post(create_record::<C>))
        .route(
            "/records/{id}",
            get(get_record::<C>)
                .put(update_record::<C>)
                .delete(delete_record::<C>),
        )
        .route("/health", get(health::<C>));

    let index = config.static_dir.join("index.html");
    router = if index.is_file() {
        router.route_service("/", ServeFile::new(index))
    } else {
        router.route("/", get(welcome))
    };

    if config.static_dir.is_dir() {
        router = router.nest_service("/static", ServeDir::new(&config.static_dir));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins))
        .with_state(service)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<_> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        if parsed.len() < origins.len() {
            tracing::warn!(?origins, "ignoring unparsable CORS origins");
        }
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
