use crate::random::RandomSource;
use crate::welfare::catalog::{AnswerOption, OptionLetter, Question};

/// Latent per-animal probability biasing simulated answers towards the top tiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthProfile(f64);

impl HealthProfile {
    pub const MIN: f64 = 0.6;
    pub const MAX: f64 = 1.0;

    /// `h ~ Uniform(0.6, 1.0)`.
    pub fn draw<R>(random: &mut R) -> Self
    where
        R: RandomSource + ?Sized,
    {
        Self(Self::MIN + random.uniform() * (Self::MAX - Self::MIN))
    }

    pub fn new(value: f64) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Maps one `Uniform(0, 1)` roll onto a tier. Rolls past `h` but below 0.9 land in
    /// the third tier; everything from 0.9 up lands in the worst.
    pub fn tier_for(self, roll: f64) -> AnswerTier {
        if roll < self.0 * 0.7 {
            AnswerTier::Best
        } else if roll < self.0 {
            AnswerTier::Good
        } else if roll < 0.9 {
            AnswerTier::Fair
        } else {
            AnswerTier::Poor
        }
    }
}

/// Discrete point level a simulated answer aims for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AnswerTier {
    Best,
    Good,
    Fair,
    Poor,
}

impl AnswerTier {
    pub const fn target_points(self) -> u8 {
        match self {
            Self::Best => 5,
            Self::Good => 4,
            Self::Fair => 3,
            Self::Poor => 2,
        }
    }
}

/// Resolves a tier against the options a question actually offers: the option with the
/// most points not above the target, otherwise the lowest-scoring option.
pub fn select_option(
    question: &Question,
    tier: AnswerTier,
) -> Option<(OptionLetter, &AnswerOption)> {
    let ranked = question.options_by_points();
    let target = tier.target_points();

    ranked
        .iter()
        .copied()
        .find(|(_, option)| option.points <= target)
        .or_else(|| ranked.last().copied())
}
