// Application layer: helpers that combine core functions with the ports.

pub mod email;
pub mod embed;
pub mod web;

pub use email::EmailValidator;
pub use embed::EmbedProvider;
pub use web::WebRecipes;

use crate::domain::model::FetchRequest;
use crate::domain::ports::Fetcher;

/// Body of a GET to `url`, or `None` (logged) when the request fails or the
/// server answers with a non-2xx status.
pub(crate) async fn successful_contents<F: Fetcher + ?Sized>(
    fetcher: &F,
    url: &str,
) -> Option<String> {
    match fetcher.fetch(&FetchRequest::get(url)).await {
        Ok(response) if response.info.is_success() => Some(response.contents),
        Ok(response) => {
            tracing::warn!("request to {} returned HTTP {}", url, response.info.status);
            None
        }
        Err(e) => {
            tracing::warn!("request to {} failed: {}", url, e);
            None
        }
    }
}
