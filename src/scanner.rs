use crate::classifier::Classifier;
use crate::extractor::extract;
use crate::models::Tag;
use crate::patterns::{relative_path, IgnoreSet};
use crate::syntax::{CommentSyntax, LineType, SyntaxRegistry};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Version-control metadata directory, never descended into
pub const VCS_DIR: &str = ".git";

/// An entry reported by [`FileSystem::walk_dir`]
///
/// Entries that are neither (symlinks, sockets, FIFOs) have both flags unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub path: PathBuf,
    pub is_dir: bool,
    /// Regular file; the only kind of entry ever opened
    pub is_file: bool,
    /// 0 for the walk root itself
    pub depth: usize,
}

/// What the walk should do after visiting an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkAction {
    Continue,
    /// Do not descend into this directory
    SkipDir,
}

/// Filesystem access used by the walker
///
/// `walk_dir` must report the root first, then entries in a deterministic
/// order, and must not report anything below a directory whose visit
/// returned [`WalkAction::SkipDir`].
pub trait FileSystem: Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn BufRead + '_>>;

    fn walk_dir(
        &self,
        root: &Path,
        visit: &mut dyn FnMut(&WalkEntry) -> Result<WalkAction>,
    ) -> Result<()>;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn open(&self, path: &Path) -> Result<Box<dyn BufRead + '_>> {
        let file =
            File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn walk_dir(
        &self,
        root: &Path,
        visit: &mut dyn FnMut(&WalkEntry) -> Result<WalkAction>,
    ) -> Result<()> {
        let mut entries = WalkDir::new(root).sort_by_file_name().into_iter();

        while let Some(entry) = entries.next() {
            let entry =
                entry.with_context(|| format!("Failed to walk directory: {}", root.display()))?;

            let walk_entry = WalkEntry {
                path: entry.path().to_path_buf(),
                is_dir: entry.file_type().is_dir(),
                is_file: entry.file_type().is_file(),
                depth: entry.depth(),
            };

            if visit(&walk_entry)? == WalkAction::SkipDir && walk_entry.is_dir {
                entries.skip_current_dir();
            }
        }

        Ok(())
    }
}

/// Scan a directory on disk for tags
pub fn scan_directory(
    root: &Path,
    annotation: &str,
    patterns: &IgnoreSet,
    registry: &SyntaxRegistry,
) -> Result<Vec<Tag>> {
    walk(&LocalFs, root, annotation, patterns, registry)
}

/// Walk `root`, pruning ignored paths, and collect the tags of every kept file
///
/// Traversal is sequential; the kept files are then scanned in parallel and
/// their tags concatenated in traversal order. Any I/O error fails the walk
/// with no partial result. Files after the failing one may still have been
/// read, but the error reported is the earliest in traversal order.
pub fn walk<F: FileSystem + ?Sized>(
    fs: &F,
    root: &Path,
    annotation: &str,
    patterns: &IgnoreSet,
    registry: &SyntaxRegistry,
) -> Result<Vec<Tag>> {
    let files = collect_files(fs, root, patterns)?;

    let per_file: Vec<Result<Vec<Tag>>> = files
        .par_iter()
        .map(|path| scan_file(fs, path, annotation, registry))
        .collect();

    let mut tags = Vec::new();
    for file_tags in per_file {
        tags.extend(file_tags?);
    }
    Ok(tags)
}

/// Regular files under `root` that survive pruning, in traversal order
pub fn collect_files<F: FileSystem + ?Sized>(
    fs: &F,
    root: &Path,
    patterns: &IgnoreSet,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    fs.walk_dir(root, &mut |entry: &WalkEntry| {
        if entry.depth == 0 {
            if entry.is_file {
                files.push(entry.path.clone());
            }
            return Ok(WalkAction::Continue);
        }

        let relative = relative_path(root, &entry.path);

        if entry.is_dir {
            let is_vcs_dir = entry.path.file_name().is_some_and(|name| name == VCS_DIR);
            if is_vcs_dir || patterns.is_ignored(&relative, true) {
                return Ok(WalkAction::SkipDir);
            }
            return Ok(WalkAction::Continue);
        }

        if entry.is_file && !patterns.is_ignored(&relative, false) {
            files.push(entry.path.clone());
        }
        Ok(WalkAction::Continue)
    })?;

    Ok(files)
}

/// Scan a single file, choosing its comment syntax by extension
pub fn scan_file<F: FileSystem + ?Sized>(
    fs: &F,
    path: &Path,
    annotation: &str,
    registry: &SyntaxRegistry,
) -> Result<Vec<Tag>> {
    let reader = fs.open(path)?;
    let syntax = registry.syntax_for_path(path);
    scan_lines(reader, path, annotation, syntax)
}

/// Assemble tags from the lines of one file
///
/// A line carrying the annotation starts a tag. Inside an open block comment,
/// the following lines without the annotation become its description until
/// the block closes; single-line and one-line-block tags have no description.
pub fn scan_lines<R: BufRead>(
    mut reader: R,
    path: &Path,
    annotation: &str,
    syntax: &CommentSyntax,
) -> Result<Vec<Tag>> {
    let mut classifier = Classifier::new(syntax);
    let mut tags = Vec::new();
    let mut current: Option<Tag> = None;

    let mut buf = Vec::new();
    let mut line_number = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        if read == 0 {
            break;
        }
        line_number += 1;

        // Binary or mis-encoded files just produce no tags.
        let decoded = String::from_utf8_lossy(&buf);
        let line = decoded.trim_end_matches(['\n', '\r']);

        let (line_type, prefix) = classifier.classify(line);
        if line_type == LineType::SrcCode {
            finish(&mut current, &mut tags);
            continue;
        }

        let (content, found) = extract(line, annotation, line_type, prefix);
        let in_block = classifier.state().in_block();

        if found {
            finish(&mut current, &mut tags);
            let tag = Tag::new(annotation, content, path.to_path_buf(), line_number);
            if in_block {
                current = Some(tag);
            } else {
                push_valid(tag, &mut tags);
            }
        } else if let Some(tag) = current.as_mut() {
            tag.push_description(&content);
            if !in_block {
                finish(&mut current, &mut tags);
            }
        }
    }

    finish(&mut current, &mut tags);
    Ok(tags)
}

fn finish(current: &mut Option<Tag>, tags: &mut Vec<Tag>) {
    if let Some(tag) = current.take() {
        push_valid(tag, tags);
    }
}

fn push_valid(tag: Tag, tags: &mut Vec<Tag>) {
    if tag.is_valid() {
        tags.push(tag);
    }
}
