use crate::config::WalkOptions;
use crate::error::{EngineError, Result};
use crate::routing::PathFilter;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// A file accepted by the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedFile {
    pub root: PathBuf,
    pub path: PathBuf,
}

impl WalkedFile {
    /// Path relative to its scan root. A root that is itself a file is
    /// reported by its own path.
    #[must_use]
    pub fn relative(&self) -> &Path {
        match self.path.strip_prefix(&self.root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel,
            _ => &self.path,
        }
    }
}

/// Receives walk results in depth-first, file-name order.
pub trait FileVisitor {
    /// # Errors
    ///
    /// An error stops the walk.
    fn visit_file(&mut self, file: WalkedFile) -> Result<()>;

    /// Called for entries the walker could not read. Logs and continues by default.
    ///
    /// # Errors
    ///
    /// An error stops the walk.
    fn walk_error(&mut self, error: EngineError) -> Result<()> {
        log::warn!("{error}");
        Ok(())
    }
}

/// Sequential recursive directory walk.
///
/// Ignored folders are pruned before descent and ignored files never reach
/// the visitor. Scan roots themselves are never pruned.
///
/// # Errors
///
/// Returns the first error the visitor returns.
pub fn walk<V: FileVisitor + ?Sized>(
    options: &WalkOptions,
    filter: &PathFilter,
    visitor: &mut V,
) -> Result<()> {
    for root in &options.roots {
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(!options.hidden)
            .git_ignore(options.git_ignore)
            .follow_links(options.follow_links)
            .max_depth(options.max_depth)
            .sort_by_file_name(|a, b| a.cmp(b));

        let filter = filter.clone();
        builder.filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                let pruned = entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| filter.is_ignored_dir(name));
                if pruned {
                    log::debug!("Pruned {}", entry.path().display());
                }
                return !pruned;
            }
            !filter.is_ignored_file(entry.path())
        });

        for entry in builder.build() {
            match entry {
                Ok(entry) if entry.file_type().is_some_and(|ft| ft.is_file()) => {
                    visitor.visit_file(WalkedFile {
                        root: root.clone(),
                        path: entry.into_path(),
                    })?;
                }
                Ok(_) => {}
                Err(e) => visitor.walk_error(EngineError::Walk(e))?,
            }
        }
    }
    Ok(())
}
