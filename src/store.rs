//! JSON files on disk: innovation sets in, generation results out.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::{IdeaForgeError, Result};
use crate::model::{IdeaGenerationResult, InnovationSet};

/// Suffix of innovation set files produced by the extraction stage
pub const INNOVATIONS_SUFFIX: &str = "_innovations.json";

pub fn load_innovation_set(path: &Path) -> Result<InnovationSet> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| IdeaForgeError::Serialization {
        message: format!("{}: {}", path.display(), e),
    })
}

/// Load every `*_innovations.json` file in `dir`, in file name order.
///
/// Files that cannot be read or decoded are logged and skipped.
pub fn load_innovation_sets(dir: &Path) -> Result<Vec<InnovationSet>> {
    if !dir.is_dir() {
        return Err(IdeaForgeError::NotFound {
            message: format!("input directory {} does not exist", dir.display()),
        });
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(INNOVATIONS_SUFFIX))
        })
        .collect();
    paths.sort();

    tracing::info!(files = paths.len(), dir = %dir.display(), "loading innovation sets");

    let mut sets = Vec::with_capacity(paths.len());
    for path in &paths {
        let set = match load_innovation_set(path) {
            Ok(set) => set,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "skipping unreadable innovation set");
                continue;
            }
        };
        tracing::debug!(
            file = %path.display(),
            innovations = set.innovations.len(),
            "loaded innovation set"
        );
        sets.push(set);
    }
    Ok(sets)
}

/// Lowercase alphanumeric slug used in result file names
pub fn topic_slug(topic: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for c in topic.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        slug.push_str("untitled");
    }
    slug.chars().take(60).collect()
}

fn write_json(result: &IdeaGenerationResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(result)?;
    fs::write(path, json)?;
    tracing::info!(path = %path.display(), "generation result saved");
    Ok(())
}

/// Save under `ideas_<slug>_<timestamp>.json` and return the written path
pub fn save_result(result: &IdeaGenerationResult, dir: &Path) -> Result<PathBuf> {
    let file = format!(
        "ideas_{}_{}.json",
        topic_slug(&result.topic),
        Utc::now().format("%Y%m%d_%H%M%S")
    );
    let path = dir.join(file);
    write_json(result, &path)?;
    Ok(path)
}

fn session_path(dir: &Path, session_id: &str) -> Result<PathBuf> {
    let valid = !session_id.is_empty()
        && session_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !valid {
        return Err(IdeaForgeError::Validation {
            message: format!("invalid session id '{}'", session_id),
        });
    }
    Ok(dir.join(format!("{}.json", session_id)))
}

pub fn save_session(result: &IdeaGenerationResult, dir: &Path, session_id: &str) -> Result<PathBuf> {
    let path = session_path(dir, session_id)?;
    write_json(result, &path)?;
    Ok(path)
}

pub fn load_session(dir: &Path, session_id: &str) -> Result<IdeaGenerationResult> {
    let path = session_path(dir, session_id)?;
    let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => IdeaForgeError::NotFound {
            message: format!("no results for session {}", session_id),
        },
        _ => e.into(),
    })?;
    Ok(serde_json::from_str(&content)?)
}
