//! The three operations of the deck service.

use crate::api::models::{RequestModel, TemplateDetails, TemplateRequest, TemplateResponse};
use crate::config::Config;
use crate::error::Result;
use crate::store::{TemplateFile, TemplateStore};
use crate::template::{FieldExtractor, PlaceholderRule, SubstitutionEngine, SubstitutionStats};
use crate::tree;
use chrono::Utc;
use rayon::prelude::*;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Template details and deck generation over one template store.
///
/// Every call opens its own copy of each template it needs and drops it
/// before returning, so one service can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct DeckService {
    store: TemplateStore,
    rule: PlaceholderRule,
}

impl DeckService {
    pub fn new(store: TemplateStore, rule: PlaceholderRule) -> Self {
        Self { store, rule }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(TemplateStore::new(&config.templates_dir), config.placeholder_rule)
    }

    /// Describe every template in the store.
    ///
    /// Templates are scanned in parallel, each from its own freshly loaded
    /// presentation; the response keeps store order. One unreadable template
    /// fails the whole request.
    pub fn template_details(&self, request: TemplateRequest) -> Result<TemplateResponse> {
        let started = Instant::now();
        info!(request = %request.name, "GetTemplateDetails processed a request");

        let templates = self
            .store
            .list()?
            .par_iter()
            .map(|template| self.describe(template))
            .collect::<Result<Vec<_>>>()?;

        info!(
            templates = templates.len(),
            transaction_time_ms = elapsed_ms(started),
            "GetTemplateDetails finished"
        );

        Ok(TemplateResponse {
            request,
            generated: Utc::now(),
            templates,
        })
    }

    fn describe(&self, template: &TemplateFile) -> Result<TemplateDetails> {
        let presentation = TemplateStore::load(&template.path)?;
        let fields = FieldExtractor::new(self.rule).extract(&presentation);
        debug!(template = %template.filename, fields = fields.len(), "extracted template fields");

        Ok(TemplateDetails {
            name: template.name.clone(),
            filename: template.filename.clone(),
            fields,
        })
    }

    /// Fill a template and return the `.pptx` bytes.
    pub fn generate_deck(&self, request: &RequestModel) -> Result<(Vec<u8>, SubstitutionStats)> {
        let started = Instant::now();
        info!(request = %request.name, template = %request.template_details.filename, "GenerateDeck processed a request");

        let mut presentation = self.store.open(&request.template_details.filename)?;
        let stats = SubstitutionEngine::new(self.rule).apply(&mut presentation, &request.substitutions);
        let bytes = presentation.to_bytes()?;

        info!(
            containers = stats.containers,
            replacements = stats.replacements,
            unresolved = stats.unresolved,
            unlocated = stats.unlocated,
            bytes = bytes.len(),
            transaction_time_ms = elapsed_ms(started),
            "GenerateDeck finished"
        );
        Ok((bytes, stats))
    }

    /// Fill a template and write the `.pptx` to `out`.
    ///
    /// Nothing is written unless substitution and serialization succeed.
    pub fn generate_deck_to<W: Write>(&self, request: &RequestModel, mut out: W) -> Result<SubstitutionStats> {
        let (bytes, stats) = self.generate_deck(request)?;
        out.write_all(&bytes)?;
        out.flush()?;
        Ok(stats)
    }
}

/// List every file under `root`, one line each. Returns the file count.
pub fn list_tree<W: Write>(root: &Path, out: W) -> Result<usize> {
    info!(root = %root.display(), "ListTree processed a request");
    tree::write_tree(root, out)
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
