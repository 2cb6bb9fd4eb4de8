pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::RecipeConfig;

pub use adapters::{CurlClient, DnsMxResolver};
pub use app::{EmailValidator, EmbedProvider, WebRecipes};
pub use domain::model::{Attributes, BrowserInfo, FetchRequest, FetchResponse, ServerVars, WikiEntry};
pub use domain::ports::{Fetcher, MxResolver, RequestContext};
pub use utils::error::{RecipeError, Result};
