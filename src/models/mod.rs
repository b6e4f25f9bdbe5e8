use serde::{Deserialize, Serialize};

/// Decimal betting odds for the three outcomes of a fixture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Odds {
    pub home: f64,
    pub draw: f64,
    pub guest: f64,
}

/// Predicted final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    pub home: u32,
    pub guest: u32,
}

impl Tip {
    pub fn new(home: u32, guest: u32) -> Self {
        Self { home, guest }
    }
}

/// One fixture of a matchday as listed on the tipping form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub home_team: String,
    pub guest_team: String,
    pub odds: Option<Odds>,  // None when the odds columns could not be parsed
    tip: Option<Tip>,
}

impl Match {
    pub fn new(home_team: impl Into<String>, guest_team: impl Into<String>, odds: Option<Odds>) -> Self {
        Self {
            home_team: home_team.into(),
            guest_team: guest_team.into(),
            odds,
            tip: None,
        }
    }

    pub fn tip(&self) -> Option<Tip> {
        self.tip
    }

    /// Store the outcome of a tip strategy
    pub fn set_tip(&mut self, tip: Option<Tip>) {
        self.tip = tip;
    }

    pub fn odds_home(&self) -> Option<f64> {
        self.odds.map(|o| o.home)
    }

    pub fn odds_draw(&self) -> Option<f64> {
        self.odds.map(|o| o.draw)
    }

    pub fn odds_guest(&self) -> Option<f64> {
        self.odds.map(|o| o.guest)
    }

    pub fn tip_home(&self) -> Option<u32> {
        self.tip.map(|t| t.home)
    }

    pub fn tip_guest(&self) -> Option<u32> {
        self.tip.map(|t| t.guest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_match_has_no_tip() {
        let m = Match::new("Bayern", "Dortmund", None);
        assert_eq!(m.tip(), None);
        assert_eq!(m.odds_home(), None);
        assert_eq!(m.odds_draw(), None);
        assert_eq!(m.odds_guest(), None);
    }

    #[test]
    fn test_accessors_expose_both_halves() {
        let mut m = Match::new(
            "Bayern",
            "Dortmund",
            Some(Odds { home: 1.5, draw: 4.2, guest: 6.0 }),
        );
        m.set_tip(Some(Tip::new(3, 1)));
        assert_eq!(m.odds_draw(), Some(4.2));
        assert_eq!(m.tip_home(), Some(3));
        assert_eq!(m.tip_guest(), Some(1));

        m.set_tip(None);
        assert_eq!(m.tip_home(), None);
        assert_eq!(m.tip_guest(), None);
    }
}
