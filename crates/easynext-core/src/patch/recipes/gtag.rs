//! Google Analytics (GA4) integration

use crate::patch::{AnchorEdit, AuxFile, Dependency, ReadmeSection, Recipe};

pub fn gtag(measurement_id: &str) -> Recipe {
    let mut recipe = Recipe::new("gtag", "@next/third-parties/google");
    recipe.imports = vec![
        "import { GoogleAnalytics } from '@next/third-parties/google';".to_string(),
        "import { GA_MEASUREMENT_ID } from './gtag';".to_string(),
    ];
    recipe.edit = AnchorEdit::Tag(
        "        <GoogleAnalytics gaId={GA_MEASUREMENT_ID} />".to_string(),
    );
    recipe.aux_files = vec![AuxFile::new(
        "src/app/gtag.ts",
        GTAG_MODULE.replace("__MEASUREMENT_ID__", measurement_id),
    )];
    recipe.dependencies = vec![Dependency {
        name: "@next/third-parties",
        version: "15.2.0",
        dev: false,
    }];
    recipe.readme = Some(ReadmeSection {
        heading: "## Google Analytics".to_string(),
        body: GTAG_README.replace("__MEASUREMENT_ID__", measurement_id),
    });
    recipe.run_install = true;
    recipe
}

const GTAG_MODULE: &str = r##"'use client';

export const GA_MEASUREMENT_ID = '__MEASUREMENT_ID__';

// Page view tracking
export const pageview = (url: string) => {
  if (typeof window.gtag !== 'undefined') {
    window.gtag('config', GA_MEASUREMENT_ID, {
      page_path: url,
    });
  }
};

// Custom event tracking
export const event = ({
  action,
  category,
  label,
  value,
}: {
  action: string;
  category: string;
  label: string;
  value: number;
}) => {
  if (typeof window.gtag !== 'undefined') {
    window.gtag('event', action, {
      event_category: category,
      event_label: label,
      value: value,
    });
  }
};
"##;

const GTAG_README: &str = r##"Google Analytics (GA4) is configured with measurement ID `__MEASUREMENT_ID__`.

Page views are tracked automatically. To track custom events:

```javascript
import { event } from './app/gtag';

event({
  action: 'button_click',
  category: 'engagement',
  label: 'login_button',
  value: 1,
});
```"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurement_id_lands_in_the_module_and_readme() {
        let recipe = gtag("G-TEST123");
        assert!(recipe.aux_files[0].contents.contains("'G-TEST123'"));
        assert!(recipe.readme.as_ref().unwrap().body.contains("G-TEST123"));
        assert!(recipe.run_install);
    }
}
