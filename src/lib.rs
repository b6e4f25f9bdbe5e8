pub mod api;
pub mod error;
pub mod models;
pub mod scrapers;
pub mod utils;

pub use api::*;
pub use error::*;
pub use models::*;
pub use scrapers::*;
pub use utils::*;

use anyhow::{Context, Result};
use utils::report::{format_json, format_matchday};
use utils::strategy::TipStrategy;

/// What to do with the computed tips
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Compute and display, never submit
    pub dryrun: bool,
    pub verbose: u8,
    /// Print the report as JSON instead of text
    pub json: bool,
    pub colored: bool,
}

impl RunOptions {
    pub fn show_report(&self) -> bool {
        self.dryrun || self.verbose >= 1
    }
}

/// Retrieve one matchday, fill in tips, report and submit them
pub async fn handle_matchday<S: TippingSite>(
    site: &mut S,
    community: &str,
    matchday: u32,
    strategy: &TipStrategy,
    options: &RunOptions,
) -> Result<Vec<Match>> {
    let mut matches = site
        .retrieve_matches(community, matchday)
        .await
        .with_context(|| format!("Failed to retrieve matches of matchday {}", matchday))?;

    strategy.apply(&mut matches);

    let missing = matches.iter().filter(|m| m.tip().is_none()).count();
    if missing > 0 {
        tracing::warn!(
            "No tip for {} of {} matches on matchday {}",
            missing,
            matches.len(),
            matchday
        );
    }

    if options.show_report() {
        if options.json {
            println!("{}", format_json(&matches)?);
        } else {
            println!("{}", format_matchday(matchday, &matches, options.colored));
        }
    }

    if options.dryrun {
        tracing::info!("Dry run, not submitting matchday {}", matchday);
    } else {
        site.submit_tips(community, matchday, &matches)
            .await
            .with_context(|| format!("Failed to submit tips of matchday {}", matchday))?;
    }

    Ok(matches)
}

/// Process matchdays one after another
pub async fn run<S: TippingSite>(
    site: &mut S,
    community: &str,
    matchdays: &[u32],
    strategy: &TipStrategy,
    options: &RunOptions,
) -> Result<()> {
    for &matchday in matchdays {
        handle_matchday(site, community, matchday, strategy, options).await?;
    }
    Ok(())
}
