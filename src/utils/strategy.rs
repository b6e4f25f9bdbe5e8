use crate::error::ConfigError;
use crate::models::{Match, Tip};
use crate::utils::tip_calculator::{
    calculate_tips_by_betting_odds, create_random_tips, create_static_tips,
    create_tips_by_favoring_the_underdog,
};
use rand::Rng;
use std::fmt;

/// Strategy flags as given on the command line
#[derive(Debug, Clone, Default)]
pub struct StrategyOptions {
    pub random: bool,
    pub anti: bool,
    pub static_tip: Option<String>,
}

/// How the tips of a matchday are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipStrategy {
    Random,
    Underdog,
    Static(Tip),
    Odds,
}

impl TipStrategy {
    /// Pick one strategy. When several flags are set, random wins over anti,
    /// anti wins over static, and the odds calculation is the fallback.
    pub fn select(options: &StrategyOptions) -> Result<Self, ConfigError> {
        let strategy = if options.random {
            TipStrategy::Random
        } else if options.anti {
            TipStrategy::Underdog
        } else if let Some(raw) = options.static_tip.as_deref() {
            TipStrategy::Static(parse_static_tip(raw)?)
        } else {
            TipStrategy::Odds
        };

        tracing::debug!("Selected tip strategy: {}", strategy);
        Ok(strategy)
    }

    pub fn apply(&self, matches: &mut [Match]) {
        self.apply_with_rng(matches, &mut rand::thread_rng());
    }

    pub fn apply_with_rng<R: Rng + ?Sized>(&self, matches: &mut [Match], rng: &mut R) {
        match self {
            TipStrategy::Random => create_random_tips(matches, rng),
            TipStrategy::Underdog => create_tips_by_favoring_the_underdog(matches),
            TipStrategy::Static(tip) => create_static_tips(matches, *tip),
            TipStrategy::Odds => calculate_tips_by_betting_odds(matches),
        }
    }
}

impl fmt::Display for TipStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TipStrategy::Random => write!(f, "random"),
            TipStrategy::Underdog => write!(f, "underdog"),
            TipStrategy::Static(tip) => write!(f, "static {}:{}", tip.home, tip.guest),
            TipStrategy::Odds => write!(f, "betting odds"),
        }
    }
}

/// Parse a tip given as "H:G"
pub fn parse_static_tip(raw: &str) -> Result<Tip, ConfigError> {
    let invalid = || ConfigError::InvalidStaticTip(raw.to_string());

    let parts: Vec<&str> = raw.split(':').collect();
    if parts.len() != 2 {
        return Err(invalid());
    }

    let home = parts[0].trim().parse::<u32>().map_err(|_| invalid())?;
    let guest = parts[1].trim().parse::<u32>().map_err(|_| invalid())?;
    Ok(Tip::new(home, guest))
}
