use crate::animation::digits::DigitSequence;
use crate::config::SceneOverride;
use crate::foundation::error::{FrameloomError, FrameloomResult};
use crate::scene::{SceneSource, SceneSpec};
use crate::scenes::agent_flow::AgentCollaborationFlow;
use crate::scenes::big_bang::BigBangUniverse;
use crate::scenes::fireflies::Fireflies;
use crate::scenes::fractal_tree::FractalTree;
use crate::scenes::reranking_flow::RerankingFlow;
use crate::scenes::rolling_ball::RollingBall;

type BuildFn = fn(SceneSpec, DigitSequence) -> FrameloomResult<Box<dyn SceneSource>>;

/// A registered scene: id, default registration and constructor.
#[derive(Clone, Copy)]
pub struct SceneEntry {
    /// Registry id.
    pub id: &'static str,
    default_spec: fn() -> SceneSpec,
    build: BuildFn,
}

impl std::fmt::Debug for SceneEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneEntry").field("id", &self.id).finish()
    }
}

impl SceneEntry {
    /// Registration data without overrides.
    pub fn default_spec(&self) -> SceneSpec {
        (self.default_spec)()
    }
}

/// Scenes available by id.
#[derive(Clone, Debug)]
pub struct SceneRegistry {
    entries: Vec<SceneEntry>,
    seq: DigitSequence,
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SceneRegistry {
    /// Every built-in scene, using π digits for randomness.
    pub fn builtin() -> Self {
        Self::with_digits(DigitSequence::PI)
    }

    /// Every built-in scene, drawing randomness from `seq`.
    pub fn with_digits(seq: DigitSequence) -> Self {
        let entries = vec![
            SceneEntry {
                id: crate::scenes::fireflies::ID,
                default_spec: Fireflies::default_spec,
                build: |spec, seq| Ok(Box::new(Fireflies::new(spec, seq)?)),
            },
            SceneEntry {
                id: crate::scenes::big_bang::ID,
                default_spec: BigBangUniverse::default_spec,
                build: |spec, seq| Ok(Box::new(BigBangUniverse::new(spec, seq)?)),
            },
            SceneEntry {
                id: crate::scenes::agent_flow::ID,
                default_spec: AgentCollaborationFlow::default_spec,
                build: |spec, _| Ok(Box::new(AgentCollaborationFlow::new(spec)?)),
            },
            SceneEntry {
                id: crate::scenes::reranking_flow::ID,
                default_spec: RerankingFlow::default_spec,
                build: |spec, _| Ok(Box::new(RerankingFlow::new(spec)?)),
            },
            SceneEntry {
                id: crate::scenes::fractal_tree::ID,
                default_spec: FractalTree::default_spec,
                build: |spec, _| Ok(Box::new(FractalTree::new(spec)?)),
            },
            SceneEntry {
                id: crate::scenes::rolling_ball::ID,
                default_spec: RollingBall::default_spec,
                build: |spec, _| Ok(Box::new(RollingBall::new(spec)?)),
            },
        ];
        Self { entries, seq }
    }

    /// Registered entries in registration order.
    pub fn entries(&self) -> &[SceneEntry] {
        &self.entries
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    fn entry(&self, id: &str) -> FrameloomResult<&SceneEntry> {
        self.entries.iter().find(|e| e.id == id).ok_or_else(|| {
            let known = self.ids().collect::<Vec<_>>().join(", ");
            FrameloomError::scene(format!("unknown scene '{id}' (known: {known})"))
        })
    }

    /// Default registration of `id`.
    pub fn default_spec(&self, id: &str) -> FrameloomResult<SceneSpec> {
        Ok(self.entry(id)?.default_spec())
    }

    /// Construct scene `id` with `overrides` applied to its registration.
    #[tracing::instrument(skip(self, overrides))]
    pub fn build(
        &self,
        id: &str,
        overrides: &SceneOverride,
    ) -> FrameloomResult<Box<dyn SceneSource>> {
        let entry = self.entry(id)?;
        let spec = overrides.apply(entry.default_spec())?;
        tracing::debug!(
            frames = spec.duration_frames,
            width = spec.canvas.width,
            height = spec.canvas.height,
            overridden = !overrides.is_empty(),
            "building scene"
        );
        (entry.build)(spec, self.seq)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/registry.rs"]
mod tests;
