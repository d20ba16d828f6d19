//! package.json synthesis for generated projects
//!
//! All versions are fixed range strings baked into the tool; there is no
//! resolution step. Key order is the order blocks are inserted below, which
//! `serde_json`'s `preserve_order` feature keeps stable through serialization.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// Feature toggles collected from CLI flags, consumed once per `create`
#[derive(Debug, Clone, Copy)]
pub struct FeatureFlags {
    pub typescript: bool,
    pub tailwind: bool,
    pub eslint: bool,
    pub skip_install: bool,
    pub turbopack: bool,
    pub disable_git: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            typescript: true,
            tailwind: true,
            eslint: true,
            skip_install: false,
            turbopack: true,
            disable_git: false,
        }
    }
}

pub const NEXT_VERSION: &str = "15.1.0";
pub const REACT_PEER_VERSION: &str = "^19.0.0";

/// Compose the package.json for a new project
pub fn build_package_manifest(app_name: &str, flags: &FeatureFlags) -> Value {
    let mut scripts = Map::new();
    let dev_script = if flags.turbopack {
        "next dev --turbopack"
    } else {
        "next dev"
    };
    scripts.insert("dev".to_string(), dev_script.into());
    scripts.insert("build".to_string(), "next build".into());
    scripts.insert("start".to_string(), "next start".into());
    scripts.insert("lint".to_string(), "next lint".into());

    let mut dependencies = Map::new();
    dependencies.insert("react".to_string(), REACT_PEER_VERSION.into());
    dependencies.insert("react-dom".to_string(), REACT_PEER_VERSION.into());
    dependencies.insert("next".to_string(), NEXT_VERSION.into());

    let mut dev_dependencies = Map::new();
    if flags.typescript {
        dev_dependencies.insert("typescript".to_string(), "^5".into());
        dev_dependencies.insert("@types/node".to_string(), "^20".into());
        dev_dependencies.insert("@types/react".to_string(), "^19".into());
        dev_dependencies.insert("@types/react-dom".to_string(), "^19".into());
    }
    if flags.tailwind {
        dev_dependencies.insert("postcss".to_string(), "^8".into());
        dev_dependencies.insert("tailwindcss".to_string(), "^3.4.1".into());
    }
    if flags.eslint {
        dev_dependencies.insert("eslint".to_string(), "^9".into());
        dev_dependencies.insert("eslint-config-next".to_string(), NEXT_VERSION.into());
        dev_dependencies.insert("@eslint/eslintrc".to_string(), "^3".into());
    }

    let mut manifest = Map::new();
    manifest.insert("name".to_string(), app_name.into());
    manifest.insert("version".to_string(), "0.1.0".into());
    manifest.insert("private".to_string(), true.into());
    manifest.insert("scripts".to_string(), Value::Object(scripts));
    manifest.insert("dependencies".to_string(), Value::Object(dependencies));
    // an empty devDependencies block is omitted entirely, not serialized as {}
    if !dev_dependencies.is_empty() {
        manifest.insert("devDependencies".to_string(), Value::Object(dev_dependencies));
    }

    Value::Object(manifest)
}

/// Write the manifest to `<root>/package.json`
pub fn write_package_manifest(root: &Path, manifest: &Value) -> Result<()> {
    let path = root.join("package.json");
    let payload = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&path, format!("{payload}\n"))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_off() -> FeatureFlags {
        FeatureFlags {
            typescript: false,
            tailwind: false,
            eslint: false,
            skip_install: true,
            turbopack: false,
            disable_git: true,
        }
    }

    #[test]
    fn default_flags_include_every_dev_dependency_group() {
        let manifest = build_package_manifest("my-app", &FeatureFlags::default());
        let dev = manifest["devDependencies"].as_object().unwrap();
        for key in [
            "typescript",
            "@types/node",
            "@types/react",
            "@types/react-dom",
            "postcss",
            "tailwindcss",
            "eslint",
            "eslint-config-next",
            "@eslint/eslintrc",
        ] {
            assert!(dev.contains_key(key), "missing {key}");
        }
        assert_eq!(manifest["dependencies"]["next"], NEXT_VERSION);
        assert_eq!(manifest["dependencies"]["react"], REACT_PEER_VERSION);
        assert_eq!(manifest["name"], "my-app");
    }

    #[test]
    fn disabled_flags_leave_no_trace() {
        let manifest = build_package_manifest("my-app", &all_off());
        assert!(manifest.get("devDependencies").is_none());
        assert_eq!(manifest["scripts"]["dev"], "next dev");
    }

    #[test]
    fn single_group_contributes_only_its_keys() {
        let flags = FeatureFlags {
            tailwind: true,
            ..all_off()
        };
        let manifest = build_package_manifest("my-app", &flags);
        let dev = manifest["devDependencies"].as_object().unwrap();
        assert_eq!(dev.len(), 2);
        assert!(dev.contains_key("postcss"));
        assert!(dev.contains_key("tailwindcss"));
    }

    #[test]
    fn turbopack_flag_shapes_the_dev_script() {
        let manifest = build_package_manifest("my-app", &FeatureFlags::default());
        assert_eq!(manifest["scripts"]["dev"], "next dev --turbopack");
    }

    #[test]
    fn serialization_keeps_section_order() {
        let manifest = build_package_manifest("my-app", &FeatureFlags::default());
        let raw = serde_json::to_string_pretty(&manifest).unwrap();
        let deps = raw.find("\"dependencies\"").unwrap();
        let dev_deps = raw.find("\"devDependencies\"").unwrap();
        let scripts = raw.find("\"scripts\"").unwrap();
        assert!(scripts < deps);
        assert!(deps < dev_deps);
    }
}
