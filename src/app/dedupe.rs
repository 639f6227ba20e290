use std::collections::HashSet;

use tracing::warn;

use crate::scrape::ImageTask;

/// Drops tasks whose filename was already claimed by an earlier task.
///
/// Two tasks writing the same path would race between the existence check
/// and the write. The first task in listing order keeps the name; every
/// dropped task is logged.
#[must_use]
pub fn dedupe_by_filename(tasks: Vec<ImageTask>) -> Vec<ImageTask> {
    let mut seen = HashSet::with_capacity(tasks.len());
    tasks
        .into_iter()
        .filter(|task| {
            let first = seen.insert(task.filename().to_string());
            if !first {
                warn!(
                    filename = task.filename(),
                    url = %task.source_url(),
                    "dropping task with duplicate filename"
                );
            }
            first
        })
        .collect()
}
