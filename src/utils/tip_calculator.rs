use crate::models::{Match, Odds, Tip};
use rand::Rng;

/// Logarithm base mapping typical odds (1.1 - 10.0) onto goal counts (0 - 5)
pub const ODDS_LOG_BASE: f64 = 1.75;

/// Highest goal count the random strategy produces
pub const MAX_RANDOM_GOALS: u32 = 4;

/// Goals for one side derived from the opponent's odds
/// The higher the opponent's odds, the more goals we expect.
/// Returns None for odds <= 1.0 where the logarithm is undefined.
fn goals_from_opponent_odds(opponent_odds: f64) -> Option<u32> {
    let x = opponent_odds - 1.0;
    if !x.is_finite() || x <= 0.0 {
        return None;
    }

    // Round half to even, clamp negatives to zero
    let goals = (x.ln() / ODDS_LOG_BASE.ln()).round_ties_even();
    Some(goals.max(0.0) as u32)
}

/// Predict a score from decimal betting odds
pub fn tip_from_odds(odds: &Odds) -> Option<Tip> {
    let home = goals_from_opponent_odds(odds.guest)?;
    let guest = goals_from_opponent_odds(odds.home)?;
    Some(Tip::new(home, guest))
}

/// Predict a narrow win for the side with the higher odds
/// Equal odds go to the home side.
pub fn underdog_tip(odds: &Odds) -> Tip {
    if odds.home < odds.guest {
        Tip::new(0, 1)
    } else {
        Tip::new(1, 0)
    }
}

pub fn random_tip<R: Rng + ?Sized>(rng: &mut R) -> Tip {
    Tip::new(
        rng.gen_range(0..=MAX_RANDOM_GOALS),
        rng.gen_range(0..=MAX_RANDOM_GOALS),
    )
}

/// Fill tips for every match from its betting odds; matches without usable odds get no tip
pub fn calculate_tips_by_betting_odds(matches: &mut [Match]) {
    for m in matches.iter_mut() {
        let tip = m.odds.as_ref().and_then(tip_from_odds);
        m.set_tip(tip);
    }
}

pub fn create_tips_by_favoring_the_underdog(matches: &mut [Match]) {
    for m in matches.iter_mut() {
        let tip = m.odds.as_ref().map(underdog_tip);
        m.set_tip(tip);
    }
}

pub fn create_random_tips<R: Rng + ?Sized>(matches: &mut [Match], rng: &mut R) {
    for m in matches.iter_mut() {
        m.set_tip(Some(random_tip(rng)));
    }
}

pub fn create_static_tips(matches: &mut [Match], tip: Tip) {
    for m in matches.iter_mut() {
        m.set_tip(Some(tip));
    }
}
