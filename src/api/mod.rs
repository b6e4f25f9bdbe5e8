pub mod kicktipp_api;

use crate::models::Match;
use anyhow::Result;

/// The website the tips are collected from and submitted to
#[allow(async_fn_in_trait)]
pub trait TippingSite {
    /// Fixtures of a matchday with odds filled in where they could be parsed
    async fn retrieve_matches(&mut self, community: &str, matchday: u32) -> Result<Vec<Match>>;

    /// Enter the tips of `matches`; matches without a tip are left out
    async fn submit_tips(&mut self, community: &str, matchday: u32, matches: &[Match]) -> Result<()>;
}
