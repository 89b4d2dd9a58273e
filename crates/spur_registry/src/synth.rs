//! The code-emission contract and the build step that drives it.

use spur_access::PropertyAccessPlan;
use spur_cache::{ArtifactCache, ArtifactLookup, ArtifactSink};
use spur_common::{ArtifactName, TypeName};
use tracing::{debug, info};

use crate::error::SynthesisError;
use crate::naming::ArtifactNaming;

/// What one synthesizer run emitted for a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesized {
    /// The type the artifacts were synthesized for.
    pub type_name: TypeName,
    /// The instantiation artifact.
    pub instantiator: ArtifactName,
    /// The accessor artifact, if one was emitted.
    pub accessor: Option<ArtifactName>,
}

/// Emits specialized optimizer code for a property-access plan.
///
/// Implementations write every artifact through `cache`, under the names
/// given by `naming`. The accessor must address properties positionally in
/// plan order.
pub trait OptimizerSynthesizer {
    /// Synthesizes the artifacts for one plan.
    fn synthesize<S: ArtifactSink>(
        &self,
        plan: &PropertyAccessPlan,
        naming: &ArtifactNaming,
        cache: &ArtifactCache<S>,
    ) -> Result<Synthesized, SynthesisError>;
}

/// Runs `synthesizer` over every plan, stopping at the first failure.
///
/// A run that reports success without having written its instantiation
/// artifact is treated as a failure, so the defect surfaces here rather than
/// when the registry is built.
pub fn synthesize_all<Y, S>(
    plans: &[PropertyAccessPlan],
    synthesizer: &Y,
    naming: &ArtifactNaming,
    cache: &ArtifactCache<S>,
) -> Result<Vec<Synthesized>, SynthesisError>
where
    Y: OptimizerSynthesizer,
    S: ArtifactSink,
{
    let mut emitted = Vec::with_capacity(plans.len());
    for plan in plans {
        let synthesized = synthesizer.synthesize(plan, naming, cache)?;
        if !cache.contains(synthesized.instantiator.as_str()) {
            return Err(SynthesisError::Failed {
                type_name: plan.type_name().clone(),
                reason: format!("{} was not written", synthesized.instantiator),
            });
        }
        debug!(
            ty = %synthesized.type_name,
            accessor = synthesized.accessor.is_some(),
            "synthesized optimizer"
        );
        emitted.push(synthesized);
    }
    info!(types = emitted.len(), artifacts = cache.len(), "synthesis complete");
    Ok(emitted)
}
