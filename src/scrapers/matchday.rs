use crate::error::SiteError;
use crate::models::{Match, Odds};
use scraper::{ElementRef, Html, Selector};

const MATCH_TABLE: &str = "table#tippabgabeSpiele";
const MATCH_ROW: &str = "tr.datarow";
const HOME_TEAM_CELL: &str = "td.col1";
const GUEST_TEAM_CELL: &str = "td.col2";
const ODDS_CELL: &str = "td.kicktipp-wettquote";

pub const LOGIN_FORM: &str = "form#loginFormular";
pub const TIP_FORM: &str = "form#tippabgabeForm";
const LOGIN_USERNAME_FIELD: &str = "kennung";
const LOGIN_PASSWORD_FIELD: &str = "passwort";

/// An HTML form reduced to what is needed to post it back
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlForm {
    pub action: String,
    pub fields: Vec<(String, String)>,
}

impl HtmlForm {
    /// Replace the value of a field, adding it if the form did not have it
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Tip form with the tips filled in
#[derive(Debug, Clone, PartialEq)]
pub struct TipSubmission {
    pub form: HtmlForm,
    /// Zero based positions of matches that had a tip but no input fields
    pub skipped: Vec<usize>,
}

fn selector(css: &str) -> Result<Selector, SiteError> {
    Selector::parse(css).map_err(|_| SiteError::MissingElement(format!("invalid selector {}", css)))
}

fn cell_text(row: &ElementRef, sel: &Selector) -> Option<String> {
    row.select(sel)
        .next()
        .map(|cell| cell.text().collect::<String>().trim().to_string())
}

/// Parse the three odds columns of a match row
/// Any missing or malformed value discards all three.
pub fn parse_odds(columns: &[String]) -> Option<Odds> {
    if columns.len() < 3 {
        return None;
    }

    let parse = |s: &str| s.trim().replace(',', ".").parse::<f64>().ok();
    Some(Odds {
        home: parse(columns[0].as_str())?,
        draw: parse(columns[1].as_str())?,
        guest: parse(columns[2].as_str())?,
    })
}

/// Rows of the tipping table that hold a fixture
/// The first data row is not a fixture, and rows without both team cells are left out.
/// Parsing and form filling both pair matches with these rows by position.
fn fixture_rows(document: &Html) -> Result<Vec<ElementRef<'_>>, SiteError> {
    let table_selector = selector(MATCH_TABLE)?;
    let row_selector = selector(MATCH_ROW)?;
    let home_selector = selector(HOME_TEAM_CELL)?;
    let guest_selector = selector(GUEST_TEAM_CELL)?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| SiteError::MissingElement(MATCH_TABLE.to_string()))?;

    let mut rows = Vec::new();
    for row in table.select(&row_selector).skip(1) {
        if row.select(&home_selector).next().is_none()
            || row.select(&guest_selector).next().is_none()
        {
            tracing::warn!("Skipping match row without team names");
            continue;
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Parse the fixtures and their betting odds from a matchday page
pub fn parse_matches(html: &str) -> Result<Vec<Match>, SiteError> {
    let document = Html::parse_document(html);
    let home_selector = selector(HOME_TEAM_CELL)?;
    let guest_selector = selector(GUEST_TEAM_CELL)?;
    let odds_selector = selector(ODDS_CELL)?;

    let mut matches = Vec::new();

    for row in fixture_rows(&document)? {
        let home_team = cell_text(&row, &home_selector).unwrap_or_default();
        let guest_team = cell_text(&row, &guest_selector).unwrap_or_default();

        let odds_columns: Vec<String> = row
            .select(&odds_selector)
            .map(|cell| cell.text().collect::<String>())
            .collect();

        let odds = parse_odds(&odds_columns);
        if odds.is_none() && !odds_columns.is_empty() {
            tracing::debug!(
                "Could not parse odds {:?} for {} - {}",
                odds_columns,
                home_team,
                guest_team
            );
        }

        matches.push(Match::new(home_team, guest_team, odds));
    }

    Ok(matches)
}

/// Collect the action and all named inputs of the first form matching `form_css`
pub fn parse_form(html: &str, form_css: &str) -> Result<HtmlForm, SiteError> {
    let document = Html::parse_document(html);
    let form_selector = selector(form_css)?;
    let input_selector = selector("input[name]")?;

    let form = document
        .select(&form_selector)
        .next()
        .ok_or_else(|| SiteError::MissingElement(form_css.to_string()))?;

    let action = form.value().attr("action").unwrap_or("").to_string();
    let fields = form
        .select(&input_selector)
        .filter_map(|input| {
            let el = input.value();
            let name = el.attr("name")?;
            // Unchecked boxes are not part of a browser's submission
            if matches!(el.attr("type"), Some("checkbox") | Some("radio"))
                && el.attr("checked").is_none()
            {
                return None;
            }
            Some((name.to_string(), el.attr("value").unwrap_or("").to_string()))
        })
        .collect();

    Ok(HtmlForm { action, fields })
}

/// A page shows the login form until the session is authenticated
pub fn is_login_page(html: &str) -> bool {
    match parse_form(html, LOGIN_FORM) {
        Ok(form) => {
            form.get(LOGIN_USERNAME_FIELD).is_some() && form.get(LOGIN_PASSWORD_FIELD).is_some()
        }
        Err(_) => false,
    }
}

/// Fill credentials into the login form of `html`
pub fn build_login_form(html: &str, username: &str, password: &str) -> Result<HtmlForm, SiteError> {
    let mut form = parse_form(html, LOGIN_FORM)?;
    form.set(LOGIN_USERNAME_FIELD, username);
    form.set(LOGIN_PASSWORD_FIELD, password);
    Ok(form)
}

/// Fill tips into the tipping form of a matchday page
/// Matches are paired with table rows by position.
pub fn build_tip_form(html: &str, matches: &[Match]) -> Result<TipSubmission, SiteError> {
    let mut form = parse_form(html, TIP_FORM)?;
    let document = Html::parse_document(html);
    let input_selector = selector("input")?;
    let rows = fixture_rows(&document)?;

    let mut skipped = Vec::new();

    for (i, m) in matches.iter().enumerate() {
        let Some(tip) = m.tip() else {
            continue;
        };

        let inputs: Vec<ElementRef> = match rows.get(i) {
            Some(row) => row.select(&input_selector).collect(),
            None => Vec::new(),
        };

        // The first input of a row is the hidden match id, then home and guest goals
        let names: Vec<&str> = inputs
            .iter()
            .filter_map(|input| input.value().attr("name"))
            .collect();
        if names.len() < 3 {
            skipped.push(i);
            continue;
        }

        form.set(names[1], tip.home.to_string());
        form.set(names[2], tip.guest.to_string());
    }

    Ok(TipSubmission { form, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tip;

    const MATCHDAY_PAGE: &str = r#"
        <html><body>
        <form id="tippabgabeForm" action="/testliga/tippabgabe" method="post">
          <input type="hidden" name="_charset_" value="UTF-8">
          <input type="hidden" name="spieltagIndex" value="3">
          <table id="tippabgabeSpiele">
            <tr class="datarow"><th>Termin</th><th>Heim</th><th>Gast</th></tr>
            <tr class="datarow">
              <td class="col1">Bayern</td><td class="col2">Dortmund</td>
              <td><input type="hidden" name="spieltippForms[1].id" value="1">
                  <input type="text" name="spieltippForms[1].heimTipp" value="">
                  <input type="text" name="spieltippForms[1].gastTipp" value=""></td>
              <td class="kicktipp-wettquote">1,50</td>
              <td class="kicktipp-wettquote">4,20</td>
              <td class="kicktipp-wettquote">6,00</td>
            </tr>
            <tr class="datarow">
              <td class="col1">Leipzig</td><td class="col2">Bremen</td>
              <td><input type="hidden" name="spieltippForms[2].id" value="2">
                  <input type="text" name="spieltippForms[2].heimTipp" value="1">
                  <input type="text" name="spieltippForms[2].gastTipp" value="1"></td>
              <td class="kicktipp-wettquote">2,10</td>
              <td class="kicktipp-wettquote">-</td>
              <td class="kicktipp-wettquote">3,40</td>
            </tr>
            <tr class="datarow">
              <td class="col1">Mainz</td><td class="col2">Freiburg</td>
              <td>Spiel beendet</td>
            </tr>
          </table>
          <input type="submit" name="submitbutton" value="Tipps speichern">
        </form>
        </body></html>
    "#;

    const LOGIN_PAGE: &str = r#"
        <html><body>
        <form id="loginFormular" action="/info/profil/loginaction" method="post">
          <input type="hidden" name="_charset_" value="UTF-8">
          <input type="text" id="kennung" name="kennung" value="">
          <input type="password" id="passwort" name="passwort" value="">
          <input type="checkbox" name="dauerhaft" value="true">
          <input type="submit" name="submitbutton" value="Anmelden">
        </form>
        </body></html>
    "#;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_odds() {
        assert_eq!(
            parse_odds(&strings(&["1,50", " 4,20 ", "6.00"])),
            Some(Odds { home: 1.5, draw: 4.2, guest: 6.0 })
        );
        assert_eq!(parse_odds(&strings(&["1,50", "-", "6,00"])), None);
        assert_eq!(parse_odds(&strings(&["1,50", "4,20"])), None);
        assert_eq!(parse_odds(&[]), None);
    }

    #[test]
    fn test_parse_matches() {
        let matches = parse_matches(MATCHDAY_PAGE).unwrap();
        assert_eq!(matches.len(), 3);

        assert_eq!(matches[0].home_team, "Bayern");
        assert_eq!(matches[0].guest_team, "Dortmund");
        assert_eq!(matches[0].odds_home(), Some(1.5));
        assert_eq!(matches[0].odds_guest(), Some(6.0));

        // Partial odds are dropped entirely
        assert_eq!(matches[1].home_team, "Leipzig");
        assert_eq!(matches[1].odds, None);

        assert_eq!(matches[2].odds, None);
        assert!(matches.iter().all(|m| m.tip().is_none()));
    }

    #[test]
    fn test_parse_matches_without_table() {
        let result = parse_matches("<html><body><p>Keine Spiele</p></body></html>");
        assert!(matches!(result, Err(SiteError::MissingElement(_))));
    }

    #[test]
    fn test_login_page_detection() {
        assert!(is_login_page(LOGIN_PAGE));
        assert!(!is_login_page(MATCHDAY_PAGE));
    }

    #[test]
    fn test_build_login_form() {
        let form = build_login_form(LOGIN_PAGE, "user@example.com", "secret").unwrap();
        assert_eq!(form.action, "/info/profil/loginaction");
        assert_eq!(form.get("kennung"), Some("user@example.com"));
        assert_eq!(form.get("passwort"), Some("secret"));
        assert_eq!(form.get("_charset_"), Some("UTF-8"));
        assert_eq!(form.get("dauerhaft"), None);
    }

    #[test]
    fn test_build_tip_form() {
        let mut matches = parse_matches(MATCHDAY_PAGE).unwrap();
        matches[0].set_tip(Some(Tip::new(3, 0)));
        matches[2].set_tip(Some(Tip::new(2, 2)));

        let submission = build_tip_form(MATCHDAY_PAGE, &matches).unwrap();
        let form = &submission.form;

        assert_eq!(form.action, "/testliga/tippabgabe");
        assert_eq!(form.get("spieltippForms[1].heimTipp"), Some("3"));
        assert_eq!(form.get("spieltippForms[1].gastTipp"), Some("0"));
        // No tip, existing values are left alone
        assert_eq!(form.get("spieltippForms[2].heimTipp"), Some("1"));
        assert_eq!(form.get("submitbutton"), Some("Tipps speichern"));
        // Finished match has no input fields
        assert_eq!(submission.skipped, vec![2]);
    }

    #[test]
    fn test_tips_go_to_the_right_row_after_a_row_without_teams() {
        let page = r#"
            <form id="tippabgabeForm" action="tippabgabe" method="post">
              <table id="tippabgabeSpiele">
                <tr class="datarow"><th>Heim</th><th>Gast</th></tr>
                <tr class="datarow">
                  <td>Spielfrei</td>
                  <td><input type="hidden" name="f[0].id" value="0">
                      <input type="text" name="f[0].heimTipp" value="">
                      <input type="text" name="f[0].gastTipp" value=""></td>
                </tr>
                <tr class="datarow">
                  <td class="col1">Bayern</td><td class="col2">Dortmund</td>
                  <td><input type="hidden" name="f[1].id" value="1">
                      <input type="text" name="f[1].heimTipp" value="">
                      <input type="text" name="f[1].gastTipp" value=""></td>
                </tr>
              </table>
            </form>
        "#;

        let mut matches = parse_matches(page).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].home_team, "Bayern");

        matches[0].set_tip(Some(Tip::new(3, 0)));
        let submission = build_tip_form(page, &matches).unwrap();
        let form = &submission.form;

        assert_eq!(form.get("f[1].heimTipp"), Some("3"));
        assert_eq!(form.get("f[1].gastTipp"), Some("0"));
        assert_eq!(form.get("f[0].heimTipp"), Some(""));
        assert!(submission.skipped.is_empty());
    }
}
