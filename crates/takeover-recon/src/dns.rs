//! In-process CNAME lookups via hickory.

use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::lookup::Lookup;
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::{ResolveError, TokioResolver};
use tracing::debug;

use crate::error::{ReconError, ReconResult};
use crate::resolver::{RawAnswer, Resolver};

/// Resolver backed by a hickory [`TokioResolver`]
#[derive(Clone)]
pub struct HickoryResolver {
    inner: TokioResolver,
}

impl HickoryResolver {
    /// Build from the system resolver configuration
    pub fn from_system_conf() -> ReconResult<Self> {
        let inner = TokioResolver::builder_tokio()
            .map_err(|e| ReconError::Dns(format!("failed to create resolver: {e}")))?
            .build();
        Ok(Self { inner })
    }

    /// Build with explicit nameservers and options
    #[must_use]
    pub fn with_config(config: ResolverConfig, opts: ResolverOpts) -> Self {
        let inner =
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
                .with_options(opts)
                .build();
        Self { inner }
    }
}

impl std::fmt::Debug for HickoryResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HickoryResolver").finish_non_exhaustive()
    }
}

#[async_trait]
impl Resolver for HickoryResolver {
    async fn resolve(&self, hostname: &str) -> RawAnswer {
        let result = self.inner.lookup(hostname, RecordType::CNAME).await;
        if let Err(e) = &result {
            debug!(hostname, error = %e, "CNAME lookup failed");
        }
        answer_from(result)
    }

    fn name(&self) -> &'static str {
        "hickory"
    }
}

/// Map a hickory lookup result onto the resolver contract.
///
/// NXDOMAIN is a failure carrying the status marker, an empty NOERROR
/// answer is a successful empty answer, and any other error keeps its text.
fn answer_from(result: Result<Lookup, ResolveError>) -> RawAnswer {
    match result {
        Ok(lookup) => {
            let target = lookup
                .iter()
                .find_map(|rdata| match rdata {
                    RData::CNAME(cname) => Some(cname.to_string()),
                    _ => None,
                })
                .unwrap_or_default();
            RawAnswer::answer(target)
        }
        Err(e) if e.is_nx_domain() => RawAnswer::nxdomain(),
        Err(e) if e.is_no_records_found() => RawAnswer::empty(),
        Err(e) => RawAnswer::failure(e.to_string()),
    }
}
