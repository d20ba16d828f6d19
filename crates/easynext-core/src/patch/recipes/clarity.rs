//! Microsoft Clarity integration

use crate::patch::{AnchorEdit, AuxFile, ReadmeSection, Recipe, WindowGlobal};

pub fn clarity(project_id: &str) -> Recipe {
    let mut recipe = Recipe::new("clarity", "@/third-parties/Clarity");
    recipe.imports = vec!["import Clarity from '@/third-parties/Clarity';".to_string()];
    recipe.edit = AnchorEdit::Tag("        <Clarity />".to_string());
    recipe.aux_files = vec![AuxFile::new(
        "src/third-parties/Clarity.tsx",
        CLARITY_COMPONENT.replace("__CLARITY_ID__", project_id),
    )];
    recipe.window_globals = vec![WindowGlobal {
        name: "clarity",
        ty: "any",
    }];
    recipe.readme = Some(ReadmeSection {
        heading: "## Microsoft Clarity".to_string(),
        body: CLARITY_README.replace("__CLARITY_ID__", project_id),
    });
    recipe
}

const CLARITY_COMPONENT: &str = r##"'use client';

import Script from 'next/script';

export const CLARITY_PROJECT_ID = '__CLARITY_ID__';

export default function Clarity() {
  return (
    <Script
      id="clarity-init"
      strategy="afterInteractive"
      dangerouslySetInnerHTML={{
        __html: `
          (function(c,l,a,r,i,t,y){
            c[a]=c[a]||function(){(c[a].q=c[a].q||[]).push(arguments)};
            t=l.createElement(r);t.async=1;t.src="https://www.clarity.ms/tag/"+i;
            y=l.getElementsByTagName(r)[0];y.parentNode.insertBefore(t,y);
          })(window, document, "clarity", "script", "__CLARITY_ID__");
        `,
      }}
    />
  );
}
"##;

const CLARITY_README: &str = r##"Microsoft Clarity is configured with project ID `__CLARITY_ID__`.

Clarity records user sessions automatically and provides heatmaps and session
replay with no further code. The component lives in
`src/third-parties/Clarity.tsx` and is loaded from the root layout.

See the [Clarity documentation](https://docs.microsoft.com/en-us/clarity/setup-and-installation/clarity-setup) for details."##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_id_lands_in_component() {
        let recipe = clarity("abc123");
        assert_eq!(recipe.aux_files[0].path, "src/third-parties/Clarity.tsx");
        assert!(recipe.aux_files[0].contents.contains("\"abc123\""));
        assert_eq!(recipe.window_globals[0].name, "clarity");
    }
}
