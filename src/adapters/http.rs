use crate::config::HttpConfig;
use crate::domain::model::{FetchRequest, FetchResponse, Method, RequestData, TransferInfo};
use crate::domain::ports::Fetcher;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect, Client};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// reqwest-backed [`Fetcher`].
///
/// Keeps two clients because the redirect policy is fixed per client.
#[derive(Debug, Clone)]
pub struct CurlClient {
    client: Client,
    no_redirect: Client,
}

impl CurlClient {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let policy = match config.max_redirects {
            0 => redirect::Policy::none(),
            n => redirect::Policy::limited(n),
        };

        Ok(Self {
            client: Self::builder(config).redirect(policy).build()?,
            no_redirect: Self::builder(config)
                .redirect(redirect::Policy::none())
                .build()?,
        })
    }

    fn builder(config: &HttpConfig) -> reqwest::ClientBuilder {
        let mut builder = Client::builder().timeout(Duration::from_secs(config.timeout_seconds));
        if let Some(agent) = config.user_agent.as_deref().filter(|a| !a.is_empty()) {
            builder = builder.user_agent(agent);
        }
        builder
    }
}

#[async_trait]
impl Fetcher for CurlClient {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse> {
        let url = request.target_url();
        let client = if request.follow_redirects {
            &self.client
        } else {
            &self.no_redirect
        };

        let mut builder = match request.method {
            Method::Get => client.get(&url),
            Method::Post => {
                let post = client.post(&url);
                match &request.data {
                    Some(RequestData::Form(pairs)) => post
                        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                        .body(
                            url::form_urlencoded::Serializer::new(String::new())
                                .extend_pairs(pairs.iter())
                                .finish(),
                        ),
                    Some(RequestData::Raw(body)) => post.body(body.clone()),
                    None => post,
                }
            }
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(auth) = &request.auth {
            if !auth.username.is_empty() && !auth.password.is_empty() {
                builder = builder.basic_auth(&auth.username, Some(&auth.password));
            }
        }

        tracing::debug!("📡 {:?} {}", request.method, url);
        let started = Instant::now();
        let response = builder.send().await?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let content_type = headers.get("content-type").cloned();

        let contents = response.text().await?;
        let total_time = started.elapsed();
        tracing::debug!(
            "📡 {} answered {} with {} bytes in {:?}",
            final_url,
            status,
            contents.len(),
            total_time
        );

        Ok(FetchResponse {
            contents,
            info: TransferInfo {
                url: final_url,
                status,
                content_type,
                headers,
                total_time,
            },
        })
    }
}
