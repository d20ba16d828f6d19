//! next-sitemap configuration

use crate::patch::{AuxFile, Dependency, ReadmeSection, Recipe};

pub fn sitemap(site_url: &str) -> Recipe {
    let mut recipe = Recipe::new("sitemap", "next-sitemap");
    recipe.aux_files = vec![AuxFile::new(
        "next-sitemap.config.js",
        SITEMAP_CONFIG.replace("__SITE_URL__", site_url),
    )];
    recipe.dependencies = vec![Dependency {
        name: "next-sitemap",
        version: "^4.2.3",
        dev: true,
    }];
    recipe.scripts = vec![("postbuild", "next-sitemap")];
    recipe.readme = Some(ReadmeSection {
        heading: "## Sitemap".to_string(),
        body: SITEMAP_README.to_string(),
    });
    recipe.run_install = true;
    recipe
}

const SITEMAP_CONFIG: &str = r##"/** @type {import('next-sitemap').IConfig} */
module.exports = {
  siteUrl: '__SITE_URL__',
  generateRobotsTxt: true,
  robotsTxtOptions: {
    policies: [
      {
        userAgent: '*',
        allow: '/',
      },
    ],
  },
  outDir: './public',
  // uncomment to customize
  // changefreq: 'daily',
  // priority: 0.7,
  // sitemapSize: 5000,
  // exclude: ['/protected-page', '/private-page'],
};
"##;

const SITEMAP_README: &str = r##"next-sitemap generates `sitemap.xml` and `robots.txt` into `public/` after
every `next build` (via the `postbuild` script). Adjust
`next-sitemap.config.js` to customize; see the
[next-sitemap documentation](https://github.com/iamvishnusankar/next-sitemap)."##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::Patcher;

    #[test]
    fn configures_postbuild_and_dev_dependency() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            "{\n  \"name\": \"app\",\n  \"scripts\": {\n    \"build\": \"next build\"\n  }\n}\n",
        )
        .unwrap();
        let patcher = Patcher::new(dir.path());

        patcher.apply(&sitemap("https://example.com")).unwrap();

        let config =
            std::fs::read_to_string(dir.path().join("next-sitemap.config.js")).unwrap();
        assert!(config.contains("siteUrl: 'https://example.com'"));

        let manifest: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("package.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(manifest["scripts"]["postbuild"], "next-sitemap");
        assert_eq!(manifest["scripts"]["build"], "next build");
        assert_eq!(manifest["devDependencies"]["next-sitemap"], "^4.2.3");
    }
}
