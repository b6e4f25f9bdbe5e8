use crate::models::{Match, Odds, Tip};
use anyhow::{Context, Result};
use crossterm::style::{Color, Stylize};

const NO_TIP_MESSAGE: &str = "Could not calculate prediction. Maybe no betting odds were present?";

fn paint(text: String, color: Color, colored: bool) -> String {
    if colored {
        text.with(color).to_string()
    } else {
        text
    }
}

/// Green for the lowest odds of a match, red for the highest, yellow otherwise
fn odds_colors(odds: &Odds) -> [Color; 3] {
    let values = [odds.home, odds.draw, odds.guest];
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    values.map(|v| {
        if v == min {
            Color::Green
        } else if v == max {
            Color::Red
        } else {
            Color::Yellow
        }
    })
}

fn format_teams(m: &Match) -> String {
    format!("{:>15} - {:<15}\t", m.home_team, m.guest_team)
}

fn format_tip(tip: &Tip, colored: bool) -> String {
    paint(
        format!("[{:>2} :{:>2} ]", tip.home, tip.guest),
        Color::Blue,
        colored,
    )
}

/// One report line for a match
pub fn format_match(m: &Match, colored: bool) -> String {
    match (m.odds.as_ref(), m.tip()) {
        (Some(odds), Some(tip)) => {
            let colors = odds_colors(odds);
            let columns: Vec<String> = [odds.home, odds.draw, odds.guest]
                .iter()
                .zip(colors)
                .map(|(value, color)| paint(format!("{:7.2}", value), color, colored))
                .collect();
            format!(
                "{}{}\t\t{}",
                format_teams(m),
                columns.join(" "),
                format_tip(&tip, colored)
            )
        }
        (None, Some(tip)) => format!("{}{}", format_teams(m), format_tip(&tip, colored)),
        (_, None) => format!(
            "{}{}",
            format_teams(m),
            paint(NO_TIP_MESSAGE.to_string(), Color::Magenta, colored)
        ),
    }
}

/// Human readable report of a matchday's tips
pub fn format_matchday(matchday: u32, matches: &[Match], colored: bool) -> String {
    let header = format!("### MATCHDAY {:>2} {}", matchday, "#".repeat(75));
    let mut out = if colored {
        header.bold().to_string()
    } else {
        header
    };
    out.push('\n');

    for m in matches {
        out.push('\n');
        out.push_str(&format_match(m, colored));
        out.push('\n');
    }

    out
}

/// The same matchday as pretty printed JSON
pub fn format_json(matches: &[Match]) -> Result<String> {
    serde_json::to_string_pretty(matches).context("Failed to serialize matches")
}
