use scraper::Html;
use tracing::{error, info};

use crate::domain::Organism;
use crate::fetch::PageFetcher;
use crate::html::{elements_named, stripped_text};

/// Reads the category listing page into organism code / name pairs.
pub struct OrganismLister<F: PageFetcher> {
    fetcher: F,
}

impl<F: PageFetcher> OrganismLister<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// One attempt, no retries. Failures are logged and come back as an empty list.
    pub fn list(&self, url: &str) -> Vec<Organism> {
        let body = match self.fetcher.fetch(url) {
            Ok(body) => body,
            Err(err) => {
                error!("error fetching organism list: {err}");
                return Vec::new();
            }
        };

        let organisms = parse_organism_list(&body);
        if !organisms.is_empty() {
            info!("found {} organisms", organisms.len());
        }
        organisms
    }
}

/// Takes cell 2 as the code and cell 3 as the name of every `tr` that has at
/// least three `td`s. Header and short rows are skipped.
pub fn parse_organism_list(html: &str) -> Vec<Organism> {
    let document = Html::parse_document(html);
    let mut rows = elements_named(document.root_element(), "tr").peekable();
    if rows.peek().is_none() {
        error!("could not find any table rows (<tr>) on the organism listing page");
        return Vec::new();
    }

    rows.filter_map(|row| {
        let cells = elements_named(row, "td").collect::<Vec<_>>();
        if cells.len() < 3 {
            return None;
        }
        Some(Organism::new(stripped_text(cells[1]), stripped_text(cells[2])))
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_without_rows_is_empty() {
        assert!(parse_organism_list("<html><body><p>maintenance</p></body></html>").is_empty());
    }

    #[test]
    fn nested_cells_count_toward_the_row() {
        let html = "<table><tr><td>T1</td><td><table><tr><td>ath</td></tr></table></td>\
                    <td>x</td></tr></table>";
        let organisms = parse_organism_list(html);
        // outer row: T1, <td><table>..</table></td>, inner ath, x
        assert_eq!(organisms, vec![Organism::new("ath", "ath")]);
    }
}
