//! Layer job scheduling.
//!
//! The region list is split by filter into at most three jobs. Jobs run in
//! parallel and every one of them settles: a failing job is reported in its
//! outcome and never stops its siblings. Outcomes come back in job order,
//! which is the layer stacking order, whatever order the jobs finish in.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Result, StrataError};
use crate::filter;
use crate::render::write_layer;
use crate::types::{FilterMode, GreyImage, Region};

/// One layer to extract.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub mode: FilterMode,
    pub regions: Vec<Region>,
    /// Where the layer file is written.
    pub output: PathBuf,
}

impl Job {
    /// Filter the source and write the layer file.
    pub fn run(&self, source: &GreyImage) -> Result<PathBuf> {
        let layer = filter::apply(source, &self.regions, self.mode);
        write_layer(&layer, &self.output, self.mode.is_overlay()).map_err(|e| StrataError::Job {
            mode: self.mode,
            path: self.output.clone(),
            message: e.to_string(),
        })?;
        Ok(self.output.clone())
    }
}

/// A settled job.
#[derive(Debug)]
pub struct JobOutcome {
    pub mode: FilterMode,
    pub output: PathBuf,
    pub result: Result<PathBuf>,
}

impl JobOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Group regions by filter, in stacking order, dropping empty groups.
pub fn partition(regions: &[Region]) -> Vec<(FilterMode, Vec<Region>)> {
    FilterMode::ALL
        .iter()
        .map(|&mode| {
            let group: Vec<Region> = regions.iter().filter(|r| r.filter == mode).copied().collect();
            (mode, group)
        })
        .filter(|(_, group)| !group.is_empty())
        .collect()
}

/// Path of the layer file for a filter mode: `<dir>/<stem>.<tag>.png`.
pub fn layer_path(dir: &Path, stem: &str, mode: FilterMode) -> PathBuf {
    dir.join(format!("{}.{}.png", stem, mode.tag()))
}

/// Build one job per non-empty filter group.
pub fn plan(regions: &[Region], dir: &Path, stem: &str) -> Vec<Job> {
    partition(regions)
        .into_iter()
        .map(|(mode, regions)| Job {
            mode,
            regions,
            output: layer_path(dir, stem, mode),
        })
        .collect()
}

/// Run every job and wait for all of them.
pub fn run_all(source: &GreyImage, jobs: &[Job]) -> Vec<JobOutcome> {
    jobs.par_iter()
        .map(|job| {
            let result = job.run(source);
            match &result {
                Ok(path) => tracing::debug!(mode = %job.mode, layer = %path.display(), "layer written"),
                Err(e) => tracing::warn!(mode = %job.mode, error = %e, "layer job failed"),
            }
            JobOutcome {
                mode: job.mode,
                output: job.output.clone(),
                result,
            }
        })
        .collect()
}
