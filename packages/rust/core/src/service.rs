//! Page → record extraction with a single-slot last-result cache.

use chrono::{DateTime, Local};
use scraper::Html;
use tracing::{debug, instrument};

use jobnote_shared::{AppConfig, Result, VacancyRecord};
use jobnote_sources::{AdapterRegistry, detect_source};

use crate::assembler::RecordAssembler;

/// Most recent successfully assembled record. Each `set` overwrites the last.
#[derive(Debug, Clone, Default)]
pub struct LastResult {
    slot: Option<VacancyRecord>,
}

impl LastResult {
    pub fn get(&self) -> Option<&VacancyRecord> {
        self.slot.as_ref()
    }

    pub fn set(&mut self, record: VacancyRecord) {
        self.slot = Some(record);
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}

/// Adapter registry + assembler + last result. One per session.
#[derive(Default)]
pub struct ExtractionService {
    registry: AdapterRegistry,
    assembler: RecordAssembler,
    last: LastResult,
}

impl ExtractionService {
    pub fn new(registry: AdapterRegistry, assembler: RecordAssembler) -> Self {
        Self {
            registry,
            assembler,
            last: LastResult::default(),
        }
    }

    /// Service with all built-in adapters and a config-driven assembler.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(
            AdapterRegistry::new(),
            RecordAssembler::from_config(config)?,
        ))
    }

    pub fn registry_mut(&mut self) -> &mut AdapterRegistry {
        &mut self.registry
    }

    pub fn assembler(&self) -> &RecordAssembler {
        &self.assembler
    }

    /// Parse one vacancy page and remember the result.
    #[instrument(skip(self, html), fields(bytes = html.len()))]
    pub fn parse_page(
        &mut self,
        html: &str,
        page_url: &str,
        now: DateTime<Local>,
    ) -> Result<VacancyRecord> {
        let source = detect_source(page_url);
        let doc = Html::parse_document(html);
        let partial = self.registry.parse(source, &doc);
        debug!(%source, role = %partial.role, "adapter finished");

        let record = self.assembler.assemble(Some(&partial), page_url, now)?;
        self.last.set(record.clone());
        Ok(record)
    }

    pub fn last_result(&self) -> Option<&VacancyRecord> {
        self.last.get()
    }

    pub fn clear_last_result(&mut self) {
        self.last.clear();
    }
}
