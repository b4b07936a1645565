//! The `PeerFinder` - orchestration of one `find_peers` request

use crate::assemble::assemble;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::matching::{match_candidate, MatchContext};
use crate::patterns::extract_patterns;
use crate::policy::qualifies;
use crate::scan::scan_candidates;
use crate::types::{FindPeersRequest, FindPeersResponse};
use peermatch_directory::ContactDirectory;
use peermatch_domain::{Contact, MatchedRelationship, PeerResult};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

/// The peer-contact matching engine.
///
/// Stateless between requests: every call builds its working set fresh
/// from the directory and discards it with the response.
pub struct PeerFinder<D> {
    directory: Arc<D>,
    config: EngineConfig,
}

impl<D: ContactDirectory + 'static> PeerFinder<D> {
    /// Create a finder with the default configuration.
    pub fn new(directory: D) -> Self {
        Self {
            directory: Arc::new(directory),
            config: EngineConfig::default(),
        }
    }

    /// Create a finder with an explicit, validated configuration.
    pub fn with_config(directory: D, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::InvalidRequest)?;
        Ok(Self {
            directory: Arc::new(directory),
            config,
        })
    }

    /// Discover the anchor's peers: contacts exhibiting the same
    /// relationship patterns, under the request's inclusion rules.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for malformed input (rejected before any remote
    /// call); `Directory` when a top-level directory operation fails.
    /// A returned error means no partial results were produced.
    pub async fn find_peers(
        &self,
        request: FindPeersRequest,
    ) -> Result<FindPeersResponse, EngineError> {
        request.validate()?;
        let span = info_span!(
            "find_peers",
            request_id = %Uuid::now_v7(),
            anchor = %request.anchor,
        );
        self.run(request).instrument(span).await
    }

    async fn run(&self, request: FindPeersRequest) -> Result<FindPeersResponse, EngineError> {
        let call_timeout = self.config.call_timeout();

        // Patterns must be fully extracted before any candidate is
        // scanned: an empty set short-circuits without touching the
        // candidate directory at all.
        let patterns =
            extract_patterns(self.directory.as_ref(), &request, call_timeout).await?;
        if patterns.is_empty() {
            info!("anchor holds no matching relationship patterns");
            return Ok(FindPeersResponse::default());
        }

        let scan = scan_candidates(self.directory.as_ref(), &request, &self.config).await?;

        let ctx = MatchContext {
            directory: Arc::clone(&self.directory),
            patterns: Arc::new(patterns),
            type_ids: Arc::new(request.relationship_type_ids.clone()),
            include_inactive: request.include_inactive,
            match_roles: request.match_roles,
            call_timeout,
        };

        let evaluated = self.match_all(&ctx, scan.candidates.clone()).await;

        let accepted: Vec<PeerResult> = evaluated
            .into_iter()
            .filter(|(_, _, matched)| {
                qualifies(matched, &ctx.patterns, request.require_all_patterns)
            })
            .map(|(_, contact, matched)| PeerResult { contact, matched })
            .collect();

        info!(
            peers = accepted.len(),
            scanned = scan.candidates.len(),
            "peer matching complete"
        );
        Ok(assemble(accepted, &scan))
    }

    /// Match every candidate on a bounded worker pool, then restore the
    /// scan order the pool interleaved.
    async fn match_all(
        &self,
        ctx: &MatchContext<D>,
        candidates: Vec<Contact>,
    ) -> Vec<(usize, Contact, BTreeMap<String, MatchedRelationship>)> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency));
        let mut workers = JoinSet::new();

        for (index, candidate) in candidates.into_iter().enumerate() {
            let ctx = ctx.clone();
            let semaphore = Arc::clone(&semaphore);
            workers.spawn(
                async move {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .expect("semaphore is never closed");
                    let matched = match_candidate(&ctx, &candidate).await;
                    (index, candidate, matched)
                }
                .in_current_span(),
            );
        }

        let mut evaluated = Vec::new();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(entry) => evaluated.push(entry),
                // One candidate's failure never aborts its siblings.
                Err(error) => warn!(%error, "candidate matching task failed, skipping"),
            }
        }
        // Sort order is a correctness requirement: pagination offsets
        // depend on it, not just presentation.
        evaluated.sort_by_key(|(index, _, _)| *index);
        evaluated
    }
}
