pub mod bucket;
pub mod buckets;
pub mod health;
pub mod objects;

use axum::response::Redirect;

pub async fn root_redirect() -> Redirect {
    Redirect::permanent("/buckets")
}
