use crate::api::TippingSite;
use crate::error::SiteError;
use crate::models::Match;
use crate::scrapers::matchday::{
    build_login_form, build_tip_form, is_login_page, parse_matches, HtmlForm,
};
use anyhow::{Context, Result};
use reqwest::Url;
use std::time::Duration;

const KICKTIPP_BASE_URL: &str = "https://www.kicktipp.de";
const LOGIN_PATH: &str = "/info/profil/login";
const LOGIN_ATTEMPTS: usize = 3;

/// HTTP session against kicktipp.de
pub struct KicktippClient {
    base_url: Url,
    client: reqwest::Client,
}

impl KicktippClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(KICKTIPP_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).context("Invalid Kicktipp base URL")?;
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .cookie_store(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { base_url, client })
    }

    fn url(&self, path: &str) -> Result<Url, SiteError> {
        self.base_url
            .join(path)
            .map_err(|e| SiteError::InvalidUrl(format!("{}: {}", path, e)))
    }

    fn matchday_url(&self, community: &str, matchday: u32) -> Result<Url, SiteError> {
        let mut url = self.url(&format!("/{}/tippabgabe", community))?;
        url.query_pairs_mut()
            .append_pair("spieltagIndex", &matchday.to_string());
        Ok(url)
    }

    /// Fetch a page, returning its final URL after redirects along with the body
    async fn get_page(&self, url: Url) -> Result<(Url, String), SiteError> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(SiteError::Status {
                status: response.status(),
                url: url.to_string(),
            });
        }
        let page_url = response.url().clone();
        Ok((page_url, response.text().await?))
    }

    /// Post a form scraped from the page at `page_url`
    async fn post_form(&self, page_url: &Url, form: &HtmlForm) -> Result<String, SiteError> {
        let url = form_url(page_url, &form.action)?;
        tracing::debug!("POST {} ({} fields)", url, form.fields.len());
        let response = self
            .client
            .post(url.clone())
            .form(&form.fields)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SiteError::Status {
                status: response.status(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }

    /// Log in, retrying with a growing pause between attempts
    pub async fn login(&self, username: &str, password: &str) -> Result<(), SiteError> {
        let login_url = self.url(LOGIN_PATH)?;

        for attempt in 1..=LOGIN_ATTEMPTS {
            let (page_url, page) = self.get_page(login_url.clone()).await?;
            if !is_login_page(&page) {
                tracing::info!("Already logged in");
                return Ok(());
            }

            let form = build_login_form(&page, username, password)?;
            match self.post_form(&page_url, &form).await {
                Ok(response) if !is_login_page(&response) => {
                    tracing::info!("Logged in as {}", username);
                    return Ok(());
                }
                Ok(_) => tracing::warn!("Login attempt {} was rejected", attempt),
                Err(e) => tracing::warn!("Login attempt {} failed: {}", attempt, e),
            }

            if attempt < LOGIN_ATTEMPTS {
                tokio::time::sleep(Duration::from_secs(attempt as u64)).await;
            }
        }

        Err(SiteError::LoginFailed(LOGIN_ATTEMPTS))
    }
}

/// Resolve a form action the way a browser does, relative to the page holding the form
fn form_url(page_url: &Url, action: &str) -> Result<Url, SiteError> {
    page_url
        .join(action)
        .map_err(|e| SiteError::InvalidUrl(format!("{}: {}", action, e)))
}

impl TippingSite for KicktippClient {
    async fn retrieve_matches(&mut self, community: &str, matchday: u32) -> Result<Vec<Match>> {
        let url = self.matchday_url(community, matchday)?;
        let (_, page) = self
            .get_page(url)
            .await
            .with_context(|| format!("Failed to load matchday {}", matchday))?;

        let matches = parse_matches(&page)
            .with_context(|| format!("Failed to parse matchday {}", matchday))?;
        tracing::info!("Found {} matches on matchday {}", matches.len(), matchday);
        Ok(matches)
    }

    async fn submit_tips(&mut self, community: &str, matchday: u32, matches: &[Match]) -> Result<()> {
        let url = self.matchday_url(community, matchday)?;
        let (page_url, page) = self
            .get_page(url)
            .await
            .with_context(|| format!("Failed to load matchday {}", matchday))?;

        let submission = build_tip_form(&page, matches)?;
        for index in &submission.skipped {
            tracing::warn!(
                "Could not enter tip for game {} - no input fields present",
                index + 1
            );
        }

        self.post_form(&page_url, &submission.form)
            .await
            .with_context(|| format!("Failed to submit tips for matchday {}", matchday))?;

        let entered = matches.iter().filter(|m| m.tip().is_some()).count() - submission.skipped.len();
        tracing::info!("Submitted {} tips for matchday {}", entered, matchday);
        Ok(())
    }
}
