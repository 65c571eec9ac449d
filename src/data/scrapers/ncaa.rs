//! NCAA.com D1Baseball.com Top-25 page
//!
//! The poll is published as a plain HTML table: rank in the first cell, school in
//! the second.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::{http_client, RankingsSource};
use crate::{Config, DataSource, Result, WatchlistError};

/// Scraper for the weekly rankings page
pub struct RankingsScraper {
    client: reqwest::blocking::Client,
    url: String,
}

impl RankingsScraper {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(RankingsScraper {
            client: http_client(config)?,
            url: config.rankings_url.clone(),
        })
    }

    /// Pull (rank, school) pairs out of every table row that has them.
    ///
    /// Header rows and rows without a numeric rank are skipped. Range checking is
    /// left to the rankings table.
    pub fn parse_page(html: &str) -> Result<Vec<(i64, String)>> {
        let document = Html::parse_document(html);
        let row_selector = Selector::parse("table tr")
            .map_err(|e| WatchlistError::Parse(format!("Bad row selector: {:?}", e)))?;
        let cell_selector = Selector::parse("th, td")
            .map_err(|e| WatchlistError::Parse(format!("Bad cell selector: {:?}", e)))?;

        // "7" or a tie marker like "T-7"
        let rank_pattern = Regex::new(r"^(?:T-?)?(\d{1,3})$")
            .map_err(|e| WatchlistError::Parse(e.to_string()))?;

        let mut entries = Vec::new();

        for row in document.select(&row_selector) {
            let cells: Vec<String> = row.select(&cell_selector).map(cell_text).collect();
            if cells.len() < 2 {
                continue;
            }

            let Some(rank) = rank_pattern
                .captures(&cells[0])
                .and_then(|c| c[1].parse::<i64>().ok())
            else {
                continue;
            };

            entries.push((rank, cells[1].clone()));
        }

        log::info!("Parsed {} ranked teams", entries.len());
        Ok(entries)
    }
}

impl RankingsSource for RankingsScraper {
    fn source(&self) -> DataSource {
        DataSource::NcaaRankings
    }

    fn fetch_rankings(&self) -> Result<Vec<(i64, String)>> {
        log::info!("Fetching rankings from {}", self.url);

        let response = self.client.get(&self.url).send()?;
        if !response.status().is_success() {
            return Err(WatchlistError::Source {
                data_source: DataSource::NcaaRankings,
                message: format!("HTTP {}: {}", response.status(), self.url),
            });
        }

        let html = response.text()?;
        Self::parse_page(&html)
    }
}

/// Cell text with each fragment trimmed and joined by single spaces
fn cell_text(cell: ElementRef) -> String {
    cell.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <table>
          <thead><tr><th>RANK</th><th>SCHOOL</th><th>RECORD</th><th>PREVIOUS</th></tr></thead>
          <tbody>
            <tr><td>1</td><td><img src="lsu.svg"/> LSU</td><td>10-1</td><td>1</td></tr>
            <tr><td>2</td><td>
                <a href="/schools/virginia">Virginia</a>
            </td><td>9-2</td><td>4</td></tr>
            <tr><td>T-3</td><td>Ole Miss</td><td>8-3</td><td>2</td></tr>
            <tr><td>26</td><td>Out Of Range</td><td>5-5</td><td>-</td></tr>
            <tr><td>NR</td><td>Not Ranked</td></tr>
            <tr><td>5</td></tr>
          </tbody>
        </table>
        </body></html>
    "#;

    #[test]
    fn test_parse_rankings_page() {
        let entries = RankingsScraper::parse_page(PAGE).unwrap();
        assert_eq!(
            entries,
            vec![
                (1, "LSU".to_string()),
                (2, "Virginia".to_string()),
                (3, "Ole Miss".to_string()),
                (26, "Out Of Range".to_string()),
            ]
        );
    }

    #[test]
    fn test_page_without_table() {
        let entries = RankingsScraper::parse_page("<html><p>Maintenance</p></html>").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_feeds_rankings_table() {
        let entries = RankingsScraper::parse_page(PAGE).unwrap();
        let table = crate::rankings::RankingsTable::from_entries(entries);
        assert_eq!(table.len(), 3);
        assert_eq!(table.rank_of("UVA"), Some(2));
        assert_eq!(table.rank_of("Mississippi"), Some(3));
    }
}
