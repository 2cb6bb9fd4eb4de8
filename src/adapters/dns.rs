use crate::domain::ports::MxResolver;
use crate::utils::error::Result;
use async_trait::async_trait;
use hickory_resolver::config::ResolverConfig;
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::Resolver;

/// MX lookups through hickory, against the default public upstreams.
pub struct DnsMxResolver {
    resolver: Resolver<TokioConnectionProvider>,
}

impl DnsMxResolver {
    pub fn new() -> Self {
        Self::with_config(ResolverConfig::default())
    }

    pub fn with_config(config: ResolverConfig) -> Self {
        let resolver =
            Resolver::builder_with_config(config, TokioConnectionProvider::default()).build();
        Self { resolver }
    }
}

impl Default for DnsMxResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MxResolver for DnsMxResolver {
    async fn has_mx(&self, domain: &str) -> Result<bool> {
        let fqdn = format!("{}.", domain.trim_end_matches('.'));
        match self.resolver.mx_lookup(fqdn.as_str()).await {
            Ok(lookup) => {
                let found = lookup.iter().next().is_some();
                tracing::debug!("MX lookup for {}: {}", domain, found);
                Ok(found)
            }
            Err(e) if e.is_no_records_found() || e.is_nx_domain() => {
                tracing::debug!("no MX records for {}", domain);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}
