use crate::scoring::{ScoringModel, StrengthModel};
use crate::{GameSite, Team};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::fmt;

/// No matchup is ever treated as a lock.
pub const MIN_PROBABILITY: f64 = 5.0;
pub const MAX_PROBABILITY: f64 = 95.0;
/// Score points per logistic unit. Larger values flatten the curve.
pub const LOGISTIC_SCALE: f64 = 5.0;
/// Net rating gap at which jitter fades out completely.
pub const JITTER_NET_RATING_SPAN: f64 = 25.0;
pub const MAX_JITTER_FACTOR: f64 = 0.03;

/// Source of the optional upset noise added to a win probability.
pub trait Jitter {
    /// Percentage points to add to team 1's probability.
    fn sample(&self, team1: &Team, team2: &Team) -> f64;
}

/// Deterministic: never perturbs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl Jitter for NoJitter {
    fn sample(&self, _team1: &Team, _team2: &Team) -> f64 {
        0.0
    }
}

/// Uniform noise scaled by how evenly matched the two net ratings are.
pub struct RandomJitter<R = StdRng> {
    rng: RefCell<R>,
}

impl RandomJitter<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomJitter<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng: RefCell::new(rng) }
    }
}

impl<R: Rng> Jitter for RandomJitter<R> {
    fn sample(&self, team1: &Team, team2: &Team) -> f64 {
        let factor = randomness_factor(team1.net_rtg, team2.net_rtg);
        if factor == 0.0 {
            return 0.0;
        }
        let uniform: f64 = self.rng.borrow_mut().r#gen();
        (uniform - 0.5) * factor * 100.0
    }
}

/// 0.03 for identical net ratings, falling linearly to 0 at a 25-point gap.
pub fn randomness_factor(net_rtg1: f64, net_rtg2: f64) -> f64 {
    let closeness = (1.0 - (net_rtg1 - net_rtg2).abs() / JITTER_NET_RATING_SPAN).max(0.0);
    closeness * MAX_JITTER_FACTOR
}

/// Logistic curve centered on 50%: `100 / (1 + e^(-diff/5))`.
pub fn logistic_probability(score_diff: f64) -> f64 {
    100.0 / (1.0 + (-score_diff / LOGISTIC_SCALE).exp())
}

pub fn clamp_probability(probability: f64) -> f64 {
    probability.clamp(MIN_PROBABILITY, MAX_PROBABILITY)
}

/// Converts the score gap between two teams into team 1's win percentage.
pub struct WinProbability<M = ScoringModel> {
    model: M,
    jitter: Option<Box<dyn Jitter>>,
}

impl Default for WinProbability {
    fn default() -> Self {
        Self::new()
    }
}

impl WinProbability {
    pub fn new() -> Self {
        Self::with_model(ScoringModel::new())
    }
}

impl<M> fmt::Debug for WinProbability<M>
where
    M: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WinProbability")
            .field("model", &self.model)
            .field("jitter", &self.jitter.is_some())
            .finish()
    }
}

impl<M: StrengthModel> WinProbability<M> {
    pub fn with_model(model: M) -> Self {
        Self { model, jitter: None }
    }

    pub fn jitter(mut self, jitter: impl Jitter + 'static) -> Self {
        self.jitter = Some(Box::new(jitter));
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn is_deterministic(&self) -> bool {
        self.jitter.is_none()
    }

    /// Team 1's chance of winning, in percent, always within [5, 95].
    ///
    /// Only one side can hold home court: team 2 is scored as home exactly
    /// when team 1 is not.
    pub fn win_probability(
        &self,
        team1: &Team,
        team2: &Team,
        site: GameSite,
        is_team1_home: bool,
    ) -> f64 {
        let score1 = self.model.score(team1, site, is_team1_home);
        let score2 = self.model.score(team2, site, !is_team1_home);
        let mut probability = logistic_probability(score1 - score2);
        if let Some(jitter) = &self.jitter {
            probability += jitter.sample(team1, team2);
        }
        clamp_probability(probability)
    }
}
