//! Integration patch engine
//!
//! Every integration command follows the same shape: locate an anchor file,
//! check an idempotency marker, apply text mutations, persist, and merge
//! project-level artifacts (auxiliary files, env vars, package.json entries,
//! README sections). `Recipe` captures the parts that vary per integration;
//! `Patcher::apply` runs the shared shape.
//!
//! Re-running a recipe against an already-patched project is a no-op: the
//! marker short-circuits anchor mutation, and every other merge is keyed on
//! presence of what it would add.

pub mod recipes;

use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::PatchError;

/// Candidate locations for the root layout of a generated app
pub const LAYOUT_CANDIDATES: &[&str] = &[
    "src/app/layout.tsx",
    "src/app/layout.js",
    "app/layout.tsx",
    "app/layout.js",
];

#[derive(Debug, Clone)]
pub enum AuxFileMode {
    /// Skip when the target already exists
    CreateIfMissing,
    /// Rewrite unless the marker substring is already present
    ReplaceUnlessMarked(&'static str),
}

#[derive(Debug, Clone)]
pub struct AuxFile {
    pub path: &'static str,
    pub contents: String,
    pub mode: AuxFileMode,
}

impl AuxFile {
    pub fn new(path: &'static str, contents: impl Into<String>) -> Self {
        Self {
            path,
            contents: contents.into(),
            mode: AuxFileMode::CreateIfMissing,
        }
    }

    pub fn replace_unless_marked(
        path: &'static str,
        contents: impl Into<String>,
        marker: &'static str,
    ) -> Self {
        Self {
            path,
            contents: contents.into(),
            mode: AuxFileMode::ReplaceUnlessMarked(marker),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnvVar {
    pub name: &'static str,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct Dependency {
    pub name: &'static str,
    pub version: &'static str,
    pub dev: bool,
}

/// A `window` interface augmentation merged into `src/types/global.d.ts`
#[derive(Debug, Clone)]
pub struct WindowGlobal {
    pub name: &'static str,
    pub ty: &'static str,
}

#[derive(Debug, Clone)]
pub struct ReadmeSection {
    pub heading: String,
    pub body: String,
}

/// How the anchor file is mutated, beyond import insertion
#[derive(Debug, Clone)]
pub enum AnchorEdit {
    /// Insert before `</head>`, else right after the `<body ...>` opening tag
    Tag(String),
    /// Insert immediately after the first occurrence of a token
    AfterToken {
        token: &'static str,
        snippet: String,
    },
    /// Wrap the `{children}` expression inside `<body>` with open/close tags
    WrapChildren {
        open: &'static str,
        close: &'static str,
    },
    /// Replace the whole file
    Replace(String),
    /// No anchor mutation beyond imports
    None,
}

#[derive(Debug, Clone)]
pub struct Recipe {
    pub name: &'static str,
    /// Idempotency marker; present in the anchor means already applied
    pub marker: &'static str,
    pub anchor_candidates: &'static [&'static str],
    /// Missing anchor downgrades to a warning instead of an error
    pub anchor_optional: bool,
    /// Import lines inserted before the first existing import
    pub imports: Vec<String>,
    pub edit: AnchorEdit,
    pub aux_files: Vec<AuxFile>,
    pub env_vars: Vec<EnvVar>,
    pub dependencies: Vec<Dependency>,
    pub window_globals: Vec<WindowGlobal>,
    pub scripts: Vec<(&'static str, &'static str)>,
    pub readme: Option<ReadmeSection>,
    /// Run a dependency install pass when package.json changed
    pub run_install: bool,
}

impl Recipe {
    pub fn new(name: &'static str, marker: &'static str) -> Self {
        Self {
            name,
            marker,
            anchor_candidates: LAYOUT_CANDIDATES,
            anchor_optional: false,
            imports: Vec::new(),
            edit: AnchorEdit::None,
            aux_files: Vec::new(),
            env_vars: Vec::new(),
            dependencies: Vec::new(),
            window_globals: Vec::new(),
            scripts: Vec::new(),
            readme: None,
            run_install: false,
        }
    }

    fn has_anchor_work(&self) -> bool {
        !self.imports.is_empty() || !matches!(self.edit, AnchorEdit::None)
    }
}

/// What a patch run did, for reporting
#[derive(Debug, Default)]
pub struct PatchOutcome {
    pub anchor: Option<PathBuf>,
    pub anchor_modified: bool,
    pub already_configured: bool,
    pub created: Vec<String>,
    pub skipped: Vec<String>,
    pub warnings: Vec<String>,
    pub notes: Vec<String>,
    pub manifest_changed: bool,
}

pub struct Patcher {
    root: PathBuf,
}

impl Patcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn apply(&self, recipe: &Recipe) -> Result<PatchOutcome, PatchError> {
        let mut outcome = PatchOutcome::default();

        if recipe.has_anchor_work() {
            match self.locate_anchor(recipe.anchor_candidates) {
                Some(anchor) => self.patch_anchor(recipe, &anchor, &mut outcome)?,
                None if recipe.anchor_optional => outcome.warnings.push(format!(
                    "none of {} exist, complete the {} setup manually",
                    recipe.anchor_candidates.join(", "),
                    recipe.name
                )),
                None => {
                    return Err(PatchError::AnchorNotFound {
                        integration: recipe.name,
                        candidates: recipe.anchor_candidates.join(", "),
                    })
                }
            }
        }

        for aux in &recipe.aux_files {
            self.write_aux_file(aux, &mut outcome)?;
        }
        if !recipe.env_vars.is_empty() {
            self.merge_env_vars(&recipe.env_vars, &mut outcome)?;
        }
        if !recipe.window_globals.is_empty() {
            self.merge_window_globals(&recipe.window_globals, &mut outcome)?;
        }
        if !recipe.dependencies.is_empty() || !recipe.scripts.is_empty() {
            self.merge_manifest(recipe, &mut outcome)?;
        }
        if let Some(section) = &recipe.readme {
            self.append_readme(section, &mut outcome)?;
        }

        Ok(outcome)
    }

    fn locate_anchor(&self, candidates: &[&str]) -> Option<PathBuf> {
        candidates
            .iter()
            .map(|candidate| self.root.join(candidate))
            .find(|path| path.exists())
    }

    fn patch_anchor(
        &self,
        recipe: &Recipe,
        anchor: &Path,
        outcome: &mut PatchOutcome,
    ) -> Result<(), PatchError> {
        let original = fs::read_to_string(anchor)?;
        outcome.anchor = Some(anchor.to_path_buf());

        if original.contains(recipe.marker) {
            outcome.already_configured = true;
            return Ok(());
        }

        let mut content = original.clone();
        match &recipe.edit {
            AnchorEdit::Replace(new_contents) => {
                content = new_contents.clone();
            }
            AnchorEdit::Tag(snippet) => match insert_tag(&content, snippet) {
                Some(updated) => content = updated,
                None => outcome.warnings.push(format!(
                    "no </head> or <body> tag found in {}, add the {} snippet manually",
                    anchor.display(),
                    recipe.name
                )),
            },
            AnchorEdit::AfterToken { token, snippet } => {
                match insert_after_token(&content, token, snippet) {
                    Some(updated) => content = updated,
                    None => outcome.warnings.push(format!(
                        "'{}' not found in {}, add the {} snippet manually",
                        token,
                        anchor.display(),
                        recipe.name
                    )),
                }
            }
            AnchorEdit::WrapChildren { open, close } => {
                match wrap_children(&content, open, close) {
                    Some(updated) => content = updated,
                    None => outcome.warnings.push(format!(
                        "could not find {{children}} inside <body> in {}, wrap it manually",
                        anchor.display()
                    )),
                }
            }
            AnchorEdit::None => {}
        }

        if !recipe.imports.is_empty() && !matches!(recipe.edit, AnchorEdit::Replace(_)) {
            content = insert_imports(&content, &recipe.imports);
        }

        if content != original {
            fs::write(anchor, &content)?;
            outcome.anchor_modified = true;
        }
        Ok(())
    }

    fn write_aux_file(&self, aux: &AuxFile, outcome: &mut PatchOutcome) -> Result<(), PatchError> {
        let path = self.root.join(aux.path);
        match &aux.mode {
            AuxFileMode::CreateIfMissing if path.exists() => {
                outcome.skipped.push(aux.path.to_string());
                return Ok(());
            }
            AuxFileMode::ReplaceUnlessMarked(marker) if path.exists() => {
                let existing = fs::read_to_string(&path)?;
                if existing.contains(marker) {
                    outcome.skipped.push(aux.path.to_string());
                    return Ok(());
                }
            }
            _ => {}
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &aux.contents)?;
        outcome.created.push(aux.path.to_string());
        Ok(())
    }

    fn merge_env_vars(
        &self,
        vars: &[EnvVar],
        outcome: &mut PatchOutcome,
    ) -> Result<(), PatchError> {
        let path = self.root.join(".env.local");
        let mut content = if path.exists() {
            fs::read_to_string(&path)?
        } else {
            String::new()
        };

        let mut updated = false;
        for var in vars {
            let prefix = format!("{}=", var.name);
            if content
                .lines()
                .any(|line| line.trim_start().starts_with(&prefix))
            {
                continue;
            }
            if !content.is_empty() && !content.ends_with('\n') {
                content.push('\n');
            }
            content.push_str(&prefix);
            content.push_str(&var.value);
            content.push('\n');
            updated = true;
        }

        if updated {
            fs::write(&path, &content)?;
            outcome.created.push(".env.local".to_string());
        } else {
            outcome.skipped.push(".env.local".to_string());
        }
        Ok(())
    }

    fn merge_window_globals(
        &self,
        globals: &[WindowGlobal],
        outcome: &mut PatchOutcome,
    ) -> Result<(), PatchError> {
        let path = self.root.join("src/types/global.d.ts");
        let mut content = if path.exists() {
            fs::read_to_string(&path)?
        } else {
            String::new()
        };

        let mut changed = false;
        for global in globals {
            if content.contains(&format!("{}:", global.name)) {
                continue;
            }
            let decl = format!("{}: {};", global.name, global.ty);
            if let Some(idx) = content.find("interface Window {") {
                let at = idx + "interface Window {".len();
                content.insert_str(at, &format!("\n  {decl}"));
            } else {
                if !content.is_empty() && !content.ends_with('\n') {
                    content.push('\n');
                }
                content.push_str(&format!("\ninterface Window {{\n  {decl}\n}}\n"));
            }
            changed = true;
        }

        if changed {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &content)?;
            outcome.created.push("src/types/global.d.ts".to_string());
        } else {
            outcome.skipped.push("src/types/global.d.ts".to_string());
        }
        Ok(())
    }

    fn merge_manifest(
        &self,
        recipe: &Recipe,
        outcome: &mut PatchOutcome,
    ) -> Result<(), PatchError> {
        let path = self.root.join("package.json");
        let raw = fs::read_to_string(&path).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                PatchError::ManifestNotFound(path.clone())
            } else {
                PatchError::Io(err)
            }
        })?;
        let mut manifest: Value = serde_json::from_str(&raw)?;
        let Some(root_map) = manifest.as_object_mut() else {
            return Err(PatchError::ManifestShape);
        };

        let mut changed = false;
        for dep in &recipe.dependencies {
            let section_name = if dep.dev {
                "devDependencies"
            } else {
                "dependencies"
            };
            let section = root_map
                .entry(section_name)
                .or_insert_with(|| Value::Object(Map::new()));
            let Some(section_map) = section.as_object_mut() else {
                return Err(PatchError::ManifestShape);
            };
            if section_map.contains_key(dep.name) {
                outcome
                    .notes
                    .push(format!("{} already in {}", dep.name, section_name));
            } else {
                section_map.insert(dep.name.to_string(), Value::String(dep.version.to_string()));
                outcome.notes.push(format!(
                    "added {} {} to {}",
                    dep.name, dep.version, section_name
                ));
                changed = true;
            }
        }

        for (name, command) in &recipe.scripts {
            let section = root_map
                .entry("scripts")
                .or_insert_with(|| Value::Object(Map::new()));
            let Some(section_map) = section.as_object_mut() else {
                return Err(PatchError::ManifestShape);
            };
            if section_map.get(*name).and_then(|v| v.as_str()) == Some(*command) {
                continue;
            }
            section_map.insert(name.to_string(), Value::String(command.to_string()));
            outcome.notes.push(format!("set scripts.{name}"));
            changed = true;
        }

        if changed {
            let payload = serde_json::to_string_pretty(&manifest)?;
            fs::write(&path, format!("{payload}\n"))?;
            outcome.manifest_changed = true;
        }
        Ok(())
    }

    fn append_readme(
        &self,
        section: &ReadmeSection,
        outcome: &mut PatchOutcome,
    ) -> Result<(), PatchError> {
        let path = self.root.join("README.md");
        // projects without a README just skip the usage notes
        if !path.exists() {
            return Ok(());
        }
        let content = fs::read_to_string(&path)?;
        if content.contains(&section.heading) {
            outcome.skipped.push("README.md".to_string());
            return Ok(());
        }
        let mut updated = content;
        if !updated.ends_with('\n') {
            updated.push('\n');
        }
        updated.push_str(&format!("\n{}\n\n{}\n", section.heading, section.body));
        fs::write(&path, updated)?;
        outcome.created.push("README.md".to_string());
        Ok(())
    }
}

/// Insert missing import lines immediately before the first existing import
pub fn insert_imports(content: &str, imports: &[String]) -> String {
    let missing: Vec<&str> = imports
        .iter()
        .map(String::as_str)
        .filter(|line| !content.contains(line))
        .collect();
    if missing.is_empty() {
        return content.to_string();
    }
    let block = format!("{}\n", missing.join("\n"));
    let insert_at = first_import_offset(content).unwrap_or(0);

    let mut updated = String::with_capacity(content.len() + block.len());
    updated.push_str(&content[..insert_at]);
    updated.push_str(&block);
    updated.push_str(&content[insert_at..]);
    updated
}

fn first_import_offset(content: &str) -> Option<usize> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        if line.trim_start().starts_with("import ") {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

/// Insert a tag before `</head>`, else right after the `<body ...>` opening tag
pub fn insert_tag(content: &str, snippet: &str) -> Option<String> {
    if let Some(idx) = content.find("</head>") {
        let mut updated = String::with_capacity(content.len() + snippet.len() + 1);
        updated.push_str(&content[..idx]);
        updated.push_str(snippet);
        updated.push('\n');
        updated.push_str(&content[idx..]);
        return Some(updated);
    }

    let body = content.find("<body")?;
    let close = body + content[body..].find('>')? + 1;
    let mut updated = String::with_capacity(content.len() + snippet.len() + 1);
    updated.push_str(&content[..close]);
    updated.push('\n');
    updated.push_str(snippet);
    updated.push_str(&content[close..]);
    Some(updated)
}

/// Insert a snippet immediately after the first occurrence of `token`
pub fn insert_after_token(content: &str, token: &str, snippet: &str) -> Option<String> {
    let idx = content.find(token)? + token.len();
    Some(format!("{}{}{}", &content[..idx], snippet, &content[idx..]))
}

/// Wrap the `{children}` expression inside `<body>` with open/close tags
pub fn wrap_children(content: &str, open: &str, close: &str) -> Option<String> {
    let body_open = content.find("<body")?;
    let body_close = content.find("</body>")?;
    let children = body_open + content[body_open..body_close].find("{children}")?;
    let end = children + "{children}".len();
    Some(format!(
        "{}{}{}{}{}",
        &content[..children],
        open,
        &content[children..end],
        close,
        &content[end..]
    ))
}
