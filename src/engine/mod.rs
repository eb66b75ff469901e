//! Selection Engine
//!
//! Two-state spin protocol. A spin is accepted only from `Idle` with at
//! least one item; the winner is drawn up front and the rotation target is
//! derived from it, so the shell's animation and the reported winner always
//! agree. Callers must not mutate the list while a spin is in progress.

mod wheel;

pub use wheel::WheelGeometry;

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::FoodItem;

/// Matches the wheel's CSS transition
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(4500);

/// Landing offsets inside the winning slice stay away from its edges
const OFFSET_RANGE: std::ops::Range<f64> = 0.15..0.85;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinSettings {
    pub settle: Duration,
    pub geometry: WheelGeometry,
}

impl Default for SpinSettings {
    fn default() -> Self {
        Self {
            settle: DEFAULT_SETTLE,
            geometry: WheelGeometry::default(),
        }
    }
}

/// Everything the shell needs to animate an accepted spin
#[derive(Debug, Clone, PartialEq)]
pub struct SpinPlan {
    pub winning_index: usize,
    pub winner: FoodItem,
    pub slice_count: usize,
    /// Cumulative rotation target in degrees
    pub rotation: f64,
    pub settle: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpinRejection {
    AlreadySpinning,
    NoItems,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpinRequest {
    Accepted(SpinPlan),
    Rejected(SpinRejection),
}

impl SpinRequest {
    pub fn is_rejected(&self) -> bool {
        matches!(self, SpinRequest::Rejected(_))
    }

    pub fn plan(&self) -> Option<&SpinPlan> {
        match self {
            SpinRequest::Accepted(plan) => Some(plan),
            SpinRequest::Rejected(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpinState {
    Idle,
    Spinning(SpinPlan),
}

pub struct SpinEngine {
    settings: SpinSettings,
    rotation: f64,
    state: SpinState,
    rng: StdRng,
}

impl SpinEngine {
    pub fn new(settings: SpinSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Reproducible draws, for tests
    pub fn seeded(settings: SpinSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: SpinSettings, rng: StdRng) -> Self {
        Self {
            settings,
            rotation: 0.0,
            state: SpinState::Idle,
            rng,
        }
    }

    pub fn settings(&self) -> &SpinSettings {
        &self.settings
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.state, SpinState::Spinning(_))
    }

    /// Current cumulative rotation in degrees
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn request_spin(&mut self, items: &[FoodItem]) -> SpinRequest {
        if self.is_spinning() {
            return SpinRequest::Rejected(SpinRejection::AlreadySpinning);
        }
        if items.is_empty() {
            return SpinRequest::Rejected(SpinRejection::NoItems);
        }

        let slice_count = items.len();
        let winning_index = self.rng.gen_range(0..slice_count);
        let offset = self.rng.gen_range(OFFSET_RANGE);
        let rotation = self
            .settings
            .geometry
            .rotation_for(self.rotation, winning_index, slice_count, offset);

        let plan = SpinPlan {
            winning_index,
            winner: items[winning_index].clone(),
            slice_count,
            rotation,
            settle: self.settings.settle,
        };
        self.rotation = rotation;
        self.state = SpinState::Spinning(plan.clone());
        debug!(winning_index, slice_count, rotation, "spin accepted");
        SpinRequest::Accepted(plan)
    }

    /// Settle the current spin. `None` when idle.
    pub fn complete(&mut self) -> Option<FoodItem> {
        match std::mem::replace(&mut self.state, SpinState::Idle) {
            SpinState::Spinning(plan) => Some(plan.winner),
            SpinState::Idle => None,
        }
    }
}
