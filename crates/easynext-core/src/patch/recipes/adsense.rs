//! Google AdSense integration

use crate::patch::{AnchorEdit, AuxFile, ReadmeSection, Recipe, WindowGlobal};

pub fn adsense(client_id: &str) -> Recipe {
    let mut recipe = Recipe::new("adsense", "@/third-parties/AdSense");
    recipe.imports = vec!["import AdSense from '@/third-parties/AdSense';".to_string()];
    recipe.edit = AnchorEdit::Tag("        <AdSense />".to_string());
    recipe.aux_files = vec![AuxFile::new(
        "src/third-parties/AdSense.tsx",
        ADSENSE_COMPONENT.replace("__ADSENSE_CLIENT_ID__", client_id),
    )];
    recipe.window_globals = vec![WindowGlobal {
        name: "adsbygoogle",
        ty: "any[]",
    }];
    recipe.readme = Some(ReadmeSection {
        heading: "## Google AdSense".to_string(),
        body: ADSENSE_README.replace("__ADSENSE_CLIENT_ID__", client_id),
    });
    recipe
}

const ADSENSE_COMPONENT: &str = r##"'use client';

import Script from 'next/script';
import type { CSSProperties } from 'react';

export const ADSENSE_CLIENT_ID = '__ADSENSE_CLIENT_ID__';

export default function AdSense() {
  // scripts load in production only
  if (process.env.NODE_ENV !== 'production') {
    return null;
  }

  return (
    <Script
      async
      src={`https://pagead2.googlesyndication.com/pagead/js/adsbygoogle.js?client=${ADSENSE_CLIENT_ID}`}
      crossOrigin="anonymous"
      strategy="afterInteractive"
    />
  );
}

export function AdSenseAd({ slot, style = {} }: { slot: string; style?: CSSProperties }) {
  if (process.env.NODE_ENV !== 'production') {
    return null;
  }

  return (
    <div style={{ display: 'block', textAlign: 'center', ...style }}>
      <ins
        className="adsbygoogle"
        style={{ display: 'block' }}
        data-ad-client={ADSENSE_CLIENT_ID}
        data-ad-slot={slot}
        data-ad-format="auto"
        data-full-width-responsive="true"
      />
      <Script id={`adsense-ad-${slot}`} strategy="afterInteractive">
        {`(adsbygoogle = window.adsbygoogle || []).push({});`}
      </Script>
    </div>
  );
}
"##;

const ADSENSE_README: &str = r##"Google AdSense is configured with client ID `__ADSENSE_CLIENT_ID__`.

Ads load in production builds only. To place an ad unit:

```tsx
import { AdSenseAd } from '@/third-parties/AdSense';

<AdSenseAd slot="1234567890" />
```"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_id_lands_in_component() {
        let recipe = adsense("ca-pub-1234567890123456");
        assert!(recipe.aux_files[0]
            .contents
            .contains("'ca-pub-1234567890123456'"));
        assert_eq!(recipe.window_globals[0].name, "adsbygoogle");
    }
}
