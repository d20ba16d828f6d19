//! ChannelIO (Channel Talk) messenger widget integration

use crate::patch::{AnchorEdit, AuxFile, Recipe};

pub fn channelio(plugin_key: &str) -> Recipe {
    let mut recipe = Recipe::new("channelio", "@/third-parties/Channelio");
    recipe.imports = vec!["import { ChannelIO } from '@/third-parties/Channelio';".to_string()];
    // the widget renders outside <head>, right at the top of the layout tree
    recipe.edit = AnchorEdit::AfterToken {
        token: "return (",
        snippet: "\n      <ChannelIO />".to_string(),
    };
    recipe.aux_files = vec![AuxFile::new(
        "src/third-parties/Channelio.tsx",
        CHANNELIO_COMPONENT.replace("__PLUGIN_KEY__", plugin_key),
    )];
    recipe
}

const CHANNELIO_COMPONENT: &str = r##"'use client';

import Script from 'next/script';

export function ChannelIO() {
  return (
    <Script
      id="channel-io"
      strategy="afterInteractive"
      dangerouslySetInnerHTML={{
        __html: `
  (function(){var w=window;if(w.ChannelIO){return w.console.error("ChannelIO script included twice.");}var ch=function(){ch.c(arguments);};ch.q=[];ch.c=function(args){ch.q.push(args);};w.ChannelIO=ch;function l(){if(w.ChannelIOInitialized){return;}w.ChannelIOInitialized=true;var s=document.createElement("script");s.type="text/javascript";s.async=true;s.src="https://cdn.channel.io/plugin/ch-plugin-web.js";var x=document.getElementsByTagName("script")[0];if(x.parentNode){x.parentNode.insertBefore(s,x);}}if(document.readyState==="complete"){l();}else{w.addEventListener("DOMContentLoaded",l);w.addEventListener("load",l);}})();

  ChannelIO('boot', {
    "pluginKey": "__PLUGIN_KEY__"
  });
        `,
      }}
    ></Script>
  );
}
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_key_lands_in_boot_call() {
        let recipe = channelio("key-1234");
        assert!(recipe.aux_files[0].contents.contains("\"key-1234\""));
        assert!(matches!(recipe.edit, AnchorEdit::AfterToken { token: "return (", .. }));
    }
}
