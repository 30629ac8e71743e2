//! Run orchestration.
//!
//! A run validates the session once, provisions the bucket once, then probes
//! every target in input order against that one bucket.

use std::io::Write;

use tracing::info;

use crate::api::StorageApi;
use crate::error::{ProbeError, ProbeResult};
use crate::prober::{Verdict, probe};
use crate::provisioner::{BucketStatus, ensure_bucket};
use crate::report::Reporter;
use crate::session::validate_session;
use crate::types::{BucketHandle, BucketName, ProbeTarget};

/// Counts of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// How the bucket was provisioned.
    pub status: BucketStatus,
    /// Emails with an account.
    pub found: usize,
    /// Emails without an account.
    pub absent: usize,
    /// Emails that could not be classified.
    pub indeterminate: usize,
}

impl RunSummary {
    fn new(status: BucketStatus) -> Self {
        Self {
            status,
            found: 0,
            absent: 0,
            indeterminate: 0,
        }
    }

    fn record(&mut self, verdict: &Verdict) {
        match verdict {
            Verdict::AccountExists => self.found += 1,
            Verdict::NoAccount => self.absent += 1,
            Verdict::Indeterminate(_) => self.indeterminate += 1,
        }
    }

    /// Number of emails probed.
    #[must_use]
    pub fn probed(&self) -> usize {
        self.found + self.absent + self.indeterminate
    }
}

/// Drives one probe run.
pub struct Runner<'a, O, E> {
    api: &'a dyn StorageApi,
    reporter: &'a mut Reporter<O, E>,
}

impl<O, E> std::fmt::Debug for Runner<'_, O, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("region", &self.api.region())
            .finish_non_exhaustive()
    }
}

impl<'a, O: Write, E: Write> Runner<'a, O, E> {
    /// Create a runner over `api` that writes to `reporter`.
    pub fn new(api: &'a dyn StorageApi, reporter: &'a mut Reporter<O, E>) -> Self {
        Self { api, reporter }
    }

    /// Probe `targets` against `bucket`.
    ///
    /// Targets are probed strictly one after another; a failed probe never
    /// stops the run.
    ///
    /// # Errors
    ///
    /// - [`ProbeError::InvalidSession`] when the credentials are unusable.
    /// - [`ProbeError::BucketCreation`] when the bucket cannot be created.
    /// - [`ProbeError::Io`] when output cannot be written.
    pub async fn run(
        &mut self,
        bucket: BucketName,
        targets: &[ProbeTarget],
    ) -> ProbeResult<RunSummary> {
        if !validate_session(self.api).await {
            return Err(ProbeError::InvalidSession);
        }

        let bucket = BucketHandle::new(bucket, self.api.region());
        let status = ensure_bucket(self.api, &bucket).await?;
        if let Some(warning) = status.warning(&bucket) {
            self.reporter.warning(&warning)?;
        }

        let mut summary = RunSummary::new(status);
        self.reporter.begin()?;
        for target in targets {
            let verdict = probe(self.api, &bucket, target).await;
            self.reporter.verdict(target, &verdict)?;
            summary.record(&verdict);
        }
        self.reporter.finish()?;

        info!(
            bucket = %bucket.name,
            region = %bucket.region,
            probed = summary.probed(),
            found = summary.found,
            absent = summary.absent,
            indeterminate = summary.indeterminate,
            "run complete"
        );
        Ok(summary)
    }
}
