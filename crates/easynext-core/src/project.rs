//! Project directory helpers: name validation, root assertion, conflict checks

use std::fs;
use std::io;
use std::path::Path;

/// Entries tolerated in a target directory during materialization
pub const ALLOWED_ENTRIES: &[&str] = &[
    ".DS_Store",
    ".git",
    ".gitattributes",
    ".gitignore",
    ".gitlab-ci.yml",
    ".hg",
    ".hgcheck",
    ".hgignore",
    ".idea",
    ".npmignore",
    ".travis.yml",
    "LICENSE",
    "Thumbs.db",
    "docs",
    "mkdocs.yml",
    "npm-debug.log",
    "yarn-debug.log",
    "yarn-error.log",
    "yarnrc.yml",
    ".yarn",
];

#[derive(Debug)]
pub struct NameValidation {
    pub problems: Vec<String>,
}

impl NameValidation {
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Validate a project name against npm package naming restrictions
pub fn validate_project_name(name: &str) -> NameValidation {
    let mut problems = Vec::new();

    if name.is_empty() {
        problems.push("name length must be greater than zero".to_string());
        return NameValidation { problems };
    }
    if name.trim() != name {
        problems.push("name cannot contain leading or trailing spaces".to_string());
    }
    if name.starts_with('.') {
        problems.push("name cannot start with a period".to_string());
    }
    if name.starts_with('_') {
        problems.push("name cannot start with an underscore".to_string());
    }
    if name.len() > 214 {
        problems.push("name cannot contain more than 214 characters".to_string());
    }
    if name.chars().any(|c| c.is_ascii_uppercase()) {
        problems.push("name cannot contain capital letters".to_string());
    }
    let url_friendly = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || "-._".contains(c);
    // scoped names (@scope/name) allow one extra `@` and `/`
    let stripped: String = name
        .strip_prefix('@')
        .and_then(|rest| rest.split_once('/'))
        .map(|(scope, pkg)| format!("{scope}{pkg}"))
        .unwrap_or_else(|| name.to_string());
    if !stripped
        .chars()
        .all(|c| url_friendly(c) || c.is_ascii_uppercase())
    {
        problems.push("name can only contain URL-friendly characters".to_string());
    }

    NameValidation { problems }
}

/// Whether `cwd` is a project root (contains a `package.json`)
pub fn is_project_root(cwd: &Path) -> bool {
    cwd.join("package.json").exists()
}

/// Whether files can be created in `dir`
pub fn is_writeable(dir: &Path) -> bool {
    tempfile::tempfile_in(dir).is_ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub name: String,
    pub is_dir: bool,
}

/// Entries in `root` that are neither allow-listed nor editor metadata
pub fn folder_conflicts(root: &Path) -> io::Result<Vec<Conflict>> {
    let mut conflicts = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        // IntelliJ IDEA-based editors drop .iml files
        if ALLOWED_ENTRIES.contains(&name.as_str()) || name.ends_with(".iml") {
            continue;
        }
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        conflicts.push(Conflict { name, is_dir });
    }
    conflicts.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(conflicts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_names() {
        assert!(validate_project_name("my-app").is_valid());
        assert!(validate_project_name("app2").is_valid());
        assert!(validate_project_name("@scope/my-app").is_valid());
    }

    #[test]
    fn rejects_bad_names() {
        assert!(!validate_project_name("").is_valid());
        assert!(!validate_project_name(".hidden").is_valid());
        assert!(!validate_project_name("_private").is_valid());
        assert!(!validate_project_name("My-App").is_valid());
        assert!(!validate_project_name("my app").is_valid());
        assert!(!validate_project_name("what!").is_valid());
    }

    #[test]
    fn capital_letters_are_named_as_the_problem() {
        let validation = validate_project_name("MyApp");
        assert!(validation
            .problems
            .iter()
            .any(|p| p.contains("capital letters")));
    }

    #[test]
    fn allow_listed_entries_are_not_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join("LICENSE"), "MIT").unwrap();
        fs::write(dir.path().join("project.iml"), "").unwrap();
        assert!(folder_conflicts(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn extra_entries_are_reported_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        let conflicts = folder_conflicts(dir.path()).unwrap();
        assert_eq!(
            conflicts,
            vec![Conflict {
                name: "src".to_string(),
                is_dir: true
            }]
        );
    }

    #[test]
    fn project_root_requires_package_json() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_project_root(dir.path()));
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        assert!(is_project_root(dir.path()));
    }
}
