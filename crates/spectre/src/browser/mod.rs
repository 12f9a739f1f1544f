//! File browser pane model.
//!
//! Lists one directory at a time: `..` first (except at `/`), then
//! subdirectories, then files, each group sorted by name. Moving the
//! selection onto a file marks it for preview; entering a directory
//! lists it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::probes::read_preview;

/// Lines read when a file is marked for preview.
pub const PREVIEW_LINES: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Parent,
    Dir,
    File,
    /// Placeholder shown when the directory cannot be read.
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserEntry {
    pub kind: EntryKind,
    pub name: String,
}

impl BrowserEntry {
    pub fn icon(&self) -> &'static str {
        match self.kind {
            EntryKind::Parent => "📁",
            EntryKind::Dir => "📂",
            EntryKind::File => "📄",
            EntryKind::Denied => "❌",
        }
    }

    /// Name as listed; directories carry a trailing slash.
    pub fn label(&self) -> String {
        match self.kind {
            EntryKind::Dir => format!("{}/", self.name),
            _ => self.name.clone(),
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Parent | EntryKind::Dir)
    }
}

#[derive(Debug, Clone)]
pub struct Preview {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

impl Preview {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[derive(Debug)]
pub struct FileBrowser {
    path: PathBuf,
    items: Vec<BrowserEntry>,
    selected: usize,
    scroll: usize,
    preview: Option<Preview>,
}

impl FileBrowser {
    pub fn new(path: PathBuf) -> Self {
        let mut browser = Self {
            path,
            items: Vec::new(),
            selected: 0,
            scroll: 0,
            preview: None,
        };
        browser.refresh();
        browser
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn items(&self) -> &[BrowserEntry] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Re-list the current directory and drop any preview.
    pub fn refresh(&mut self) {
        self.items = list_dir(&self.path);
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
        self.preview = None;
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.sync_preview();
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
            self.sync_preview();
        }
    }

    /// Open the selected entry. Returns the new directory when the
    /// listing changed.
    pub fn enter(&mut self) -> Option<PathBuf> {
        let entry = self.items.get(self.selected)?.clone();
        match entry.kind {
            EntryKind::Parent => {
                let parent = self.path.parent()?.to_path_buf();
                Some(self.change_to(parent))
            }
            EntryKind::Dir => {
                let target = self.path.join(&entry.name);
                if fs::read_dir(&target).is_err() {
                    tracing::debug!(path = %target.display(), "directory not readable");
                    return None;
                }
                Some(self.change_to(target))
            }
            EntryKind::File => {
                self.mark(self.path.join(&entry.name));
                None
            }
            EntryKind::Denied => None,
        }
    }

    /// Keep the selection inside a window `visible` rows tall.
    pub fn ensure_visible(&mut self, visible: usize) {
        let visible = visible.max(1);
        if self.selected >= self.scroll + visible {
            self.scroll = self.selected + 1 - visible;
        }
        if self.selected < self.scroll {
            self.scroll = self.selected;
        }
    }

    fn change_to(&mut self, path: PathBuf) -> PathBuf {
        self.path = path;
        self.selected = 0;
        self.scroll = 0;
        self.refresh();
        self.path.clone()
    }

    fn sync_preview(&mut self) {
        match self.items.get(self.selected) {
            Some(entry) if entry.kind == EntryKind::File => {
                let path = self.path.join(&entry.name);
                self.mark(path);
            }
            _ => self.preview = None,
        }
    }

    fn mark(&mut self, path: PathBuf) {
        if self.preview.as_ref().is_some_and(|preview| preview.path == path) {
            return;
        }
        let lines = read_preview(&path, PREVIEW_LINES);
        self.preview = Some(Preview { path, lines });
    }
}

fn list_dir(path: &Path) -> Vec<BrowserEntry> {
    let read = match fs::read_dir(path) {
        Ok(read) => read,
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "cannot list directory");
            return vec![BrowserEntry {
                kind: EntryKind::Denied,
                name: "Permission denied".to_string(),
            }];
        }
    };

    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in read.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        // Follows symlinks, so a link to a directory lists as a directory.
        let Ok(meta) = fs::metadata(entry.path()) else {
            continue;
        };
        if meta.is_dir() {
            dirs.push(name);
        } else if meta.is_file() {
            files.push(name);
        }
    }
    dirs.sort();
    files.sort();

    let mut items = Vec::with_capacity(dirs.len() + files.len() + 1);
    if path.parent().is_some() {
        items.push(BrowserEntry {
            kind: EntryKind::Parent,
            name: "..".to_string(),
        });
    }
    items.extend(dirs.into_iter().map(|name| BrowserEntry {
        kind: EntryKind::Dir,
        name,
    }));
    items.extend(files.into_iter().map(|name| BrowserEntry {
        kind: EntryKind::File,
        name,
    }));
    items
}
