//! Writes rendered pages into the output directory.
//!
//! Page writes are best-effort: a failure is logged and the remaining pages
//! are still attempted. A manifest failure stops before the detail pages.

use crate::error::{GenError, Result};
use crate::group::Grouped;
use crate::model::EventRecord;
use crate::naming;
use crate::render::{manifest, markdown};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub struct Writer {
    out_dir: PathBuf,
    generated_on: String,
}

/// Outcome of a [`Writer::write_all`] run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub written: usize,
    pub failed: usize,
}

impl Writer {
    /// Prepare `out_dir`, creating it if needed.
    pub fn create(out_dir: &Path, generated_on: &str) -> Result<Self> {
        fs::create_dir_all(out_dir).map_err(|source| GenError::CreateDir {
            path: out_dir.to_path_buf(),
            source,
        })?;
        Ok(Self {
            out_dir: out_dir.to_path_buf(),
            generated_on: generated_on.to_string(),
        })
    }

    /// Write event pages, scope pages, the manifest and function detail pages.
    pub fn write_all(
        &self,
        grouped: &Grouped,
        events: &[EventRecord],
        manifest_path: &Path,
    ) -> Result<WriteStats> {
        let mut stats = WriteStats::default();

        if !grouped.event_index.is_empty() {
            let body = markdown::render_event_index(&grouped.event_index, &self.generated_on);
            self.write_page(&naming::events_index_page(), &body, &mut stats);
        }

        for event in events {
            let body = markdown::render_event_page(event, &self.generated_on);
            self.write_page(&naming::event_page(&event.name), &body, &mut stats);
        }

        for (scope, lines) in &grouped.scope_pages {
            if scope.is_empty() {
                continue;
            }
            let body = markdown::render_scope_page(lines, &self.generated_on);
            self.write_page(&naming::scope_page(scope), &body, &mut stats);
        }

        let yaml = manifest::render_manifest(&grouped.catalog)?;
        fs::write(manifest_path, yaml).map_err(|source| GenError::Manifest {
            path: manifest_path.to_path_buf(),
            source,
        })?;

        info!("Found {} scopes", grouped.catalog.scopes.len());
        for scope in &grouped.catalog.scopes {
            info!("Found {} functions in {}", scope.functions.len(), scope.name);
            for entry in &scope.functions {
                let body = markdown::render_function_page(entry, &self.generated_on);
                self.write_page(
                    &naming::function_page(&scope.name, &entry.name),
                    &body,
                    &mut stats,
                );
            }
        }

        Ok(stats)
    }

    fn write_page(&self, name: &str, body: &str, stats: &mut WriteStats) {
        let path = self.out_dir.join(name);
        match fs::write(&path, body) {
            Ok(()) => {
                debug!("wrote {}", path.display());
                stats.written += 1;
            }
            Err(e) => {
                warn!("failed to write {}: {}", path.display(), e);
                stats.failed += 1;
            }
        }
    }
}
