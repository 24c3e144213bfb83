use std::thread;
use std::time::Duration;

use scraper::node::Node;
use scraper::{ElementRef, Html};
use tracing::{debug, error, warn};

use crate::app::{ProgressEvent, ProgressSink};
use crate::config::CrawlConfig;
use crate::domain::{Organism, PathwayRecord, pathway_id};
use crate::fetch::PageFetcher;
use crate::html::{elements_named, next_sibling_element, preceding_text, stripped_text};

/// Fixed attempt count with a constant pause between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &CrawlConfig) -> Self {
        Self {
            attempts: config.retry_count.max(1),
            delay: config.retry_delay,
        }
    }
}

pub struct PathwayExtractor<'c, F: PageFetcher> {
    fetcher: F,
    policy: RetryPolicy,
    config: &'c CrawlConfig,
}

impl<'c, F: PageFetcher> PathwayExtractor<'c, F> {
    pub fn new(fetcher: F, config: &'c CrawlConfig) -> Self {
        Self {
            fetcher,
            policy: RetryPolicy::from_config(config),
            config,
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fetches and parses one organism's pathway page. Exhausted retries yield
    /// an empty list; nothing is returned as an error.
    pub fn extract(&self, organism: &Organism, sink: &dyn ProgressSink) -> Vec<PathwayRecord> {
        let url = self.config.pathway_url(&organism.code);
        let attempts = self.policy.attempts.max(1);

        for attempt in 1..=attempts {
            match self.fetcher.fetch(&url) {
                Ok(body) => {
                    let records =
                        parse_pathway_page(&body, &organism.display_name, &self.config.base_url);
                    debug!(
                        "parsed {} pathways for {} on attempt {attempt}",
                        records.len(),
                        organism.code
                    );
                    return records;
                }
                Err(err) if attempt < attempts => {
                    warn!(
                        "error for {} (attempt {attempt}/{attempts}): {err}. retrying in {:.1}s",
                        organism.code,
                        self.policy.delay.as_secs_f64()
                    );
                    sink.event(ProgressEvent::Retrying {
                        code: organism.code.clone(),
                        attempt: attempt + 1,
                        attempts,
                    });
                    thread::sleep(self.policy.delay);
                }
                Err(err) => {
                    warn!(
                        "error for {} (attempt {attempt}/{attempts}): {err}",
                        organism.code
                    );
                    error!(
                        "failed to fetch data for {} after {attempts} attempts",
                        organism.code
                    );
                }
            }
        }

        Vec::new()
    }
}

/// Turns a pathway page into records.
///
/// Every `<b>` is a level-1 header whose entries live in the first `<ul>`
/// sibling after it. Inside that list, bare text children set the running
/// level-2 label and nested `<ul>` children hold the pathway links. The id of
/// each link is the text node right before it.
pub fn parse_pathway_page(html: &str, organism_name: &str, base_url: &str) -> Vec<PathwayRecord> {
    let document = Html::parse_document(html);
    let mut records = Vec::new();

    for header in elements_named(document.root_element(), "b") {
        let level1 = stripped_text(header);
        if level1.is_empty() {
            continue;
        }
        let Some(outer) = next_sibling_element(header, "ul") else {
            continue;
        };

        let mut level2 = String::new();
        for child in outer.children() {
            match child.value() {
                Node::Text(text) if !text.trim().is_empty() => {
                    level2 = text.trim().to_string();
                }
                Node::Element(element) if element.name() == "ul" => {
                    let Some(inner) = ElementRef::wrap(child) else {
                        continue;
                    };
                    for link in elements_named(inner, "a") {
                        records.push(record_for_link(
                            link,
                            organism_name,
                            &level1,
                            &level2,
                            base_url,
                        ));
                    }
                }
                _ => {}
            }
        }
    }

    records
}

fn record_for_link(
    link: ElementRef<'_>,
    organism_name: &str,
    level1: &str,
    level2: &str,
    base_url: &str,
) -> PathwayRecord {
    let href = link.value().attr("href").unwrap_or_default();
    PathwayRecord {
        organism_name: organism_name.to_string(),
        level1: level1.to_string(),
        level2: level2.to_string(),
        pathway_id: pathway_id(preceding_text(link).as_deref()),
        pathway_name: stripped_text(link),
        url: format!("{base_url}{href}"),
    }
}
