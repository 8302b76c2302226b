//! Rendering many invoices at once.
//!
//! Each job is independent; with the `parallel` feature the jobs are spread
//! across the rayon thread pool. Results keep the input order.

use crate::error::Result;
use crate::model::{AccountSettings, Invoice};
use crate::render::{InvoiceRenderModel, RenderOptions};
use serde::{Deserialize, Serialize};

/// One invoice together with the settings of its account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchJob {
    pub invoice: Invoice,

    #[serde(default)]
    pub settings: AccountSettings,
}

impl BatchJob {
    pub fn new(invoice: Invoice, settings: AccountSettings) -> Self {
        Self { invoice, settings }
    }
}

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Options applied to every invoice
    pub render: RenderOptions,

    /// Whether to use parallel processing
    pub parallel: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            parallel: true,
        }
    }
}

impl BatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Outcome of one batch job.
#[derive(Debug)]
pub struct BatchOutput {
    pub invoice_id: String,
    pub result: Result<Vec<u8>>,
}

impl BatchOutput {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

fn render_job(job: &BatchJob, options: &RenderOptions) -> BatchOutput {
    let model = InvoiceRenderModel::new(&job.invoice, &job.settings, options.clone());
    BatchOutput {
        invoice_id: job.invoice.id.clone(),
        result: model.to_pdf(),
    }
}

/// Render every job; one failing job does not affect the others.
pub fn render_batch(jobs: &[BatchJob], options: &BatchOptions) -> Vec<BatchOutput> {
    log::debug!(
        "Rendering batch of {} invoices (parallel: {})",
        jobs.len(),
        options.parallel
    );

    if options.parallel {
        render_parallel(jobs, &options.render)
    } else {
        render_sequential(jobs, &options.render)
    }
}

fn render_sequential(jobs: &[BatchJob], options: &RenderOptions) -> Vec<BatchOutput> {
    jobs.iter().map(|job| render_job(job, options)).collect()
}

#[cfg(feature = "parallel")]
fn render_parallel(jobs: &[BatchJob], options: &RenderOptions) -> Vec<BatchOutput> {
    use rayon::prelude::*;

    jobs.par_iter().map(|job| render_job(job, options)).collect()
}

#[cfg(not(feature = "parallel"))]
fn render_parallel(jobs: &[BatchJob], options: &RenderOptions) -> Vec<BatchOutput> {
    render_sequential(jobs, options)
}
