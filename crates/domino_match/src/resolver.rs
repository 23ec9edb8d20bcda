//! Mocked move resolution.
//!
//! There is no rules engine here: a move never fails, tile adjacency is not
//! checked, and there is no shared board. A resolved move adds a random
//! score and plays one tile.

use crate::{Actor, ActorId};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::Duration;
use tracing::{debug, instrument};

/// Effect of one resolved move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Who moved.
    pub actor: ActorId,
    /// Points gained by the move.
    pub score_delta: u32,
    /// Score after the move.
    pub score: u32,
    /// Tiles left after the move.
    pub tiles_remaining: u8,
}

/// Computes score and tile effects of turns from an injected random source.
pub struct MoveResolver {
    rng: Box<dyn RngCore + Send>,
    human_range: RangeInclusive<u32>,
    automated_range: RangeInclusive<u32>,
    delay_ms: RangeInclusive<u64>,
}

impl std::fmt::Debug for MoveResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveResolver")
            .field("human_range", &self.human_range)
            .field("automated_range", &self.automated_range)
            .field("delay_ms", &self.delay_ms)
            .finish_non_exhaustive()
    }
}

impl MoveResolver {
    /// Creates a resolver drawing from `rng`.
    pub fn new(
        rng: Box<dyn RngCore + Send>,
        human_range: RangeInclusive<u32>,
        automated_range: RangeInclusive<u32>,
        delay_ms: RangeInclusive<u64>,
    ) -> Self {
        Self {
            rng,
            human_range,
            automated_range,
            delay_ms,
        }
    }

    /// Builds the random source: seeded when a seed is given, OS entropy otherwise.
    pub fn rng_from_seed(seed: Option<u64>) -> Box<dyn RngCore + Send> {
        match seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_entropy()),
        }
    }

    /// Resolves the human's confirmed move.
    #[instrument(skip(self, actor), fields(actor_id = %actor.id()))]
    pub fn resolve_human_move(&mut self, actor: &mut Actor) -> MoveOutcome {
        let delta = self.rng.gen_range(self.human_range.clone());
        Self::apply(actor, delta)
    }

    /// Resolves an automated actor's move.
    #[instrument(skip(self, actor), fields(actor_id = %actor.id()))]
    pub fn resolve_automated_move(&mut self, actor: &mut Actor) -> MoveOutcome {
        let delta = self.rng.gen_range(self.automated_range.clone());
        Self::apply(actor, delta)
    }

    /// Draws how long an automated actor waits before moving.
    pub fn automated_delay(&mut self) -> Duration {
        Duration::from_millis(self.rng.gen_range(self.delay_ms.clone()))
    }

    fn apply(actor: &mut Actor, delta: u32) -> MoveOutcome {
        actor.apply_move(delta);
        debug!(
            score_delta = delta,
            score = *actor.score(),
            tiles_remaining = *actor.tiles_remaining(),
            "Move resolved"
        );
        MoveOutcome {
            actor: actor.id().clone(),
            score_delta: delta,
            score: *actor.score(),
            tiles_remaining: *actor.tiles_remaining(),
        }
    }
}
