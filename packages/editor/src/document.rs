//! # Document Handle
//!
//! Core abstraction for editing a template document.
//!
//! A handle wraps the model tree together with its editing state. Handles
//! can be:
//! - **Memory-backed**: temporary, for testing or in-memory composition
//! - **File-backed**: persisted as the document's serde_json schema
//!
//! Lifecycle: load, migrate, edit through [`Mutation`]s, save. Every
//! successful mutation bumps the version counter, marks file-backed
//! storage dirty, and refreshes the markup caches of the touched variant
//! so `part.html` never trails the tree.

use std::path::{Path, PathBuf};

use mailcraft_compiler_html::compile_part;
use mailcraft_model::{Document as Template, IdGenerator, VariantKind};

use crate::migrate::migrate;
use crate::{EditorError, Mutation};

/// Editable template document
#[derive(Debug)]
pub struct Document {
    /// Path to the persisted document (if any)
    pub path: PathBuf,

    /// Current version number (increments on each mutation)
    pub version: u64,

    ids: IdGenerator,
    storage: DocumentStorage,
}

/// Storage backend for a document handle
#[derive(Debug)]
pub enum DocumentStorage {
    /// In-memory only (for testing, temp documents)
    Memory { template: Template },

    /// File-backed (persisted on save)
    File { template: Template, dirty: bool },
}

impl Document {
    /// Create a fresh memory-backed document
    pub fn new(name: &str, form: bool) -> Self {
        let mut doc = Self {
            path: PathBuf::new(),
            version: 0,
            ids: IdGenerator::new(name),
            storage: DocumentStorage::Memory {
                template: Template::new(form),
            },
        };
        doc.refresh_caches(VariantKind::Desktop);
        doc.refresh_caches(VariantKind::Mobile);
        doc
    }

    /// Wrap an existing template (memory-backed), migrating it first
    pub fn from_template(name: &str, mut template: Template) -> Self {
        migrate(&mut template);
        let mut ids = IdGenerator::new(name);
        skip_existing_ids(&mut ids, &template);

        let mut doc = Self {
            path: PathBuf::new(),
            version: 0,
            ids,
            storage: DocumentStorage::Memory { template },
        };
        doc.refresh_caches(VariantKind::Desktop);
        doc.refresh_caches(VariantKind::Mobile);
        doc
    }

    /// Load a document from disk (file-backed)
    ///
    /// Runs the schema migrator before the document is editable, so every
    /// in-memory tree is at the current version.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EditorError> {
        let path = path.as_ref().to_path_buf();
        let source = std::fs::read_to_string(&path)?;
        let mut template: Template = serde_json::from_str(&source)?;
        migrate(&mut template);

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut ids = IdGenerator::new(&name);
        skip_existing_ids(&mut ids, &template);

        let mut doc = Self {
            path,
            version: 0,
            ids,
            storage: DocumentStorage::File {
                template,
                dirty: false,
            },
        };
        doc.refresh_caches(VariantKind::Desktop);
        doc.refresh_caches(VariantKind::Mobile);
        Ok(doc)
    }

    pub fn template(&self) -> &Template {
        match &self.storage {
            DocumentStorage::Memory { template } => template,
            DocumentStorage::File { template, .. } => template,
        }
    }

    pub fn is_dirty(&self) -> bool {
        matches!(self.storage, DocumentStorage::File { dirty: true, .. })
    }

    /// Validate and apply a mutation
    ///
    /// On success the version increments and the affected variant's markup
    /// caches are recompiled. On failure the document is untouched.
    pub fn apply(&mut self, mutation: &Mutation) -> Result<(), EditorError> {
        let (template, ids) = match &mut self.storage {
            DocumentStorage::Memory { template } => (template, &mut self.ids),
            DocumentStorage::File { template, .. } => (template, &mut self.ids),
        };

        let kind = mutation.apply(template, ids)?;

        self.version += 1;
        if let DocumentStorage::File { dirty, .. } = &mut self.storage {
            *dirty = true;
        }
        self.refresh_caches(kind);
        Ok(())
    }

    /// Persist the document to its backing file
    pub fn save(&mut self) -> Result<(), EditorError> {
        match &mut self.storage {
            DocumentStorage::Memory { .. } => Err(EditorError::NotFileBacked),
            DocumentStorage::File { template, dirty } => {
                let json = serde_json::to_string_pretty(template)?;
                std::fs::write(&self.path, json)?;
                *dirty = false;
                Ok(())
            }
        }
    }

    /// Hand out fresh part ids from the document's generator
    pub fn next_id(&mut self) -> String {
        self.ids.next_id()
    }

    fn refresh_caches(&mut self, kind: VariantKind) {
        let template = match &mut self.storage {
            DocumentStorage::Memory { template } => template,
            DocumentStorage::File { template, .. } => template,
        };
        let form = template.form;
        let variant = template.variant_mut(kind);
        let root = variant.root.clone();
        for part in &mut variant.parts {
            part.walk_mut(&mut |p| {
                p.html = Some(compile_part(p, &root, form));
            });
        }
    }
}

fn skip_existing_ids(ids: &mut IdGenerator, template: &Template) {
    let desktop = template.desktop.all_ids();
    let mobile = template.mobile.all_ids();
    ids.skip_past(desktop.iter().chain(mobile.iter()).map(|s| s.as_str()));
}
