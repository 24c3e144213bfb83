use std::thread;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::CrawlConfig;
use crate::domain::{PathwayRecord, summarize};
use crate::error::CrawlError;
use crate::fetch::PageFetcher;
use crate::organisms::OrganismLister;
use crate::output::RecordSink;
use crate::pathways::PathwayExtractor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    ListingStarted { url: String },
    OrganismsListed { count: usize },
    OrganismStarted { index: usize, total: usize, code: String },
    Retrying { code: String, attempt: u32, attempts: u32 },
    OrganismFinished { code: String, records: usize },
    WritingOutput { path: String, records: usize },
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlOutcome {
    /// The listing page produced no organisms; nothing else was fetched.
    NoOrganisms,
    /// Every organism came back empty; no file was written.
    NoRecords,
    Written,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub outcome: CrawlOutcome,
    pub organisms_listed: usize,
    pub organisms_with_records: usize,
    pub records: usize,
    pub output_path: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Drives one crawl: list organisms, extract each in order, hand the rows to the sink.
pub struct Crawler<F: PageFetcher, S: RecordSink> {
    config: CrawlConfig,
    fetcher: F,
    output: S,
}

impl<F: PageFetcher, S: RecordSink> Crawler<F, S> {
    pub fn new(config: CrawlConfig, fetcher: F, output: S) -> Self {
        Self {
            config,
            fetcher,
            output,
        }
    }

    /// Only output failures surface as errors; fetch problems are absorbed by
    /// the lister and the extractor.
    pub fn run(&self, sink: &dyn ProgressSink) -> Result<CrawlReport, CrawlError> {
        let started_at = Utc::now();
        let listing_url = self.config.listing_url();

        sink.event(ProgressEvent::ListingStarted {
            url: listing_url.clone(),
        });
        let organisms = OrganismLister::new(&self.fetcher).list(&listing_url);
        sink.event(ProgressEvent::OrganismsListed {
            count: organisms.len(),
        });

        if organisms.is_empty() {
            warn!("could not retrieve organism list from {listing_url}");
            return Ok(CrawlReport {
                outcome: CrawlOutcome::NoOrganisms,
                organisms_listed: 0,
                organisms_with_records: 0,
                records: 0,
                output_path: None,
                started_at,
                finished_at: Utc::now(),
            });
        }

        let extractor = PathwayExtractor::new(&self.fetcher, &self.config);
        let total = organisms.len();
        let mut records: Vec<PathwayRecord> = Vec::new();

        for (index, organism) in organisms.iter().enumerate() {
            sink.event(ProgressEvent::OrganismStarted {
                index: index + 1,
                total,
                code: organism.code.clone(),
            });
            let extracted = extractor.extract(organism, sink);
            sink.event(ProgressEvent::OrganismFinished {
                code: organism.code.clone(),
                records: extracted.len(),
            });
            records.extend(extracted);

            thread::sleep(self.config.request_delay);
        }

        if records.is_empty() {
            warn!(
                "no pathway data was collected; this might be due to network issues \
                 or all target organisms lacking pathway maps"
            );
            return Ok(CrawlReport {
                outcome: CrawlOutcome::NoRecords,
                organisms_listed: total,
                organisms_with_records: 0,
                records: 0,
                output_path: None,
                started_at,
                finished_at: Utc::now(),
            });
        }

        let output_path = self.config.output_path.to_string();
        sink.event(ProgressEvent::WritingOutput {
            path: output_path.clone(),
            records: records.len(),
        });
        self.output.write(&records)?;

        let summary = summarize(&records);
        info!(
            "saved {} pathways for {} organisms to {output_path}",
            summary.records, summary.organisms
        );

        Ok(CrawlReport {
            outcome: CrawlOutcome::Written,
            organisms_listed: total,
            organisms_with_records: summary.organisms,
            records: summary.records,
            output_path: Some(output_path),
            started_at,
            finished_at: Utc::now(),
        })
    }
}
