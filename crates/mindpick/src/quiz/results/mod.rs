//! Result catalogs and the resolver that maps a scored outcome to a result.

pub mod catalog;
pub mod identity;
pub mod mbti_profiles;
mod spec;
mod view;

pub use spec::ResultSpec;
pub use view::ResultView;

use super::document::format_number;
use super::engine::{EngineKind, ScoredOutcome};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where a resolved result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    Prior,
    Catalog,
    Band,
    BuiltInMbti,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedResult {
    pub spec: ResultSpec,
    pub source: ResolutionSource,
}

impl ResolvedResult {
    fn new(spec: ResultSpec, source: ResolutionSource) -> Self {
        Self { spec, source }
    }

    pub fn view(&self) -> ResultView {
        ResultView::from_spec(&self.spec)
    }
}

/// Resolves outcomes against a normalized catalog. Never mutates the catalog.
#[derive(Debug, Clone, Copy)]
pub struct ResultResolver<'a> {
    catalog: &'a [ResultSpec],
}

impl<'a> ResultResolver<'a> {
    pub fn new(catalog: &'a [ResultSpec]) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a [ResultSpec] {
        self.catalog
    }

    /// First catalog entry whose identity matches `outcome_type`.
    pub fn find(&self, outcome_type: &str) -> Option<&'a ResultSpec> {
        if outcome_type.is_empty() {
            return None;
        }
        self.catalog
            .iter()
            .find(|entry| identity::matches(entry, outcome_type))
    }

    /// Resolves the outcome's own type. `None` means there is nothing to show.
    pub fn resolve(
        &self,
        outcome: &ScoredOutcome,
        prior: Option<&ResultSpec>,
    ) -> Option<ResolvedResult> {
        let target = outcome.outcome_type.as_deref().unwrap_or_default();
        self.resolve_type(target, Some(outcome), prior)
    }

    /// Resolves `target`, typically taken from a deep link, with the scored
    /// outcome (when known) supplying a band to fall back on.
    pub fn resolve_type(
        &self,
        target: &str,
        outcome: Option<&ScoredOutcome>,
        prior: Option<&ResultSpec>,
    ) -> Option<ResolvedResult> {
        if let Some(prior) = prior {
            return Some(ResolvedResult::new(prior.clone(), ResolutionSource::Prior));
        }

        if let Some(entry) = self.find(target) {
            return Some(ResolvedResult::new(entry.clone(), ResolutionSource::Catalog));
        }

        if let Some(synthesized) = outcome.and_then(synthesize_from_band) {
            return Some(ResolvedResult::new(synthesized, ResolutionSource::Band));
        }

        if identity::is_mbti_code(target) {
            return Some(ResolvedResult::new(
                mbti_profiles::synthesize(target),
                ResolutionSource::BuiltInMbti,
            ));
        }

        debug!(target, catalog = self.catalog.len(), "no result for outcome");
        None
    }
}

/// `{ id, title, summary, desc }` built from the outcome's band. MCQ titles
/// carry the score as `label (score/max)`.
pub fn synthesize_from_band(outcome: &ScoredOutcome) -> Option<ResultSpec> {
    let band = outcome.band.as_ref()?;
    if !outcome.engine.uses_bands() {
        return None;
    }

    let label = band
        .label()
        .or_else(|| band.title())
        .or_else(|| band.id())
        .unwrap_or_default()
        .to_string();
    let desc = band.text("desc").unwrap_or_default();

    let title = match outcome.engine {
        EngineKind::Mcq => format!(
            "{label} ({}/{})",
            format_number(outcome.score.unwrap_or(0.0)),
            format_number(outcome.max.unwrap_or(0.0))
        ),
        _ => label.clone(),
    };

    Some(
        ResultSpec::default()
            .with("id", label.as_str())
            .with("title", title)
            .with("summary", label.as_str())
            .with("desc", desc),
    )
}
