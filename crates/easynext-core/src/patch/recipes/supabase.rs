//! Supabase client scaffolding

use crate::patch::{AuxFile, Dependency, EnvVar, Recipe};

pub fn supabase_init() -> Recipe {
    // no anchor work: everything is auxiliary files and merges
    let mut recipe = Recipe::new("supabase", "@supabase/ssr");
    recipe.aux_files = vec![
        AuxFile::new("src/lib/supabase/client.ts", SUPABASE_CLIENT),
        AuxFile::new("src/lib/supabase/server.ts", SUPABASE_SERVER),
    ];
    recipe.env_vars = vec![
        EnvVar {
            name: "NEXT_PUBLIC_SUPABASE_URL",
            value: "your-supabase-url".to_string(),
        },
        EnvVar {
            name: "NEXT_PUBLIC_SUPABASE_ANON_KEY",
            value: "your-supabase-anon-key".to_string(),
        },
    ];
    recipe.dependencies = vec![Dependency {
        name: "@supabase/ssr",
        version: "^0.0.10",
        dev: false,
    }];
    recipe
}

const SUPABASE_CLIENT: &str = r##"import { createBrowserClient } from '@supabase/ssr';

export function createClient() {
  return createBrowserClient(
    process.env.NEXT_PUBLIC_SUPABASE_URL!,
    process.env.NEXT_PUBLIC_SUPABASE_ANON_KEY!
  );
}
"##;

const SUPABASE_SERVER: &str = r##"import { createServerClient } from '@supabase/ssr';
import { cookies } from 'next/headers';

export function createClient() {
  const cookieStore = cookies();

  return createServerClient(
    process.env.NEXT_PUBLIC_SUPABASE_URL!,
    process.env.NEXT_PUBLIC_SUPABASE_ANON_KEY!,
    {
      cookies: {
        get(name: string) {
          return cookieStore.get(name)?.value;
        },
        set(name: string, value: string, options: any) {
          cookieStore.set({ name, value, ...options });
        },
        remove(name: string, options: any) {
          cookieStore.set({ name, value: '', ...options });
        },
      },
    }
  );
}
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::Patcher;

    #[test]
    fn init_creates_both_clients_and_env_vars() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        let patcher = Patcher::new(dir.path());

        let outcome = patcher.apply(&supabase_init()).unwrap();
        assert!(outcome.manifest_changed);
        assert!(dir.path().join("src/lib/supabase/client.ts").exists());
        assert!(dir.path().join("src/lib/supabase/server.ts").exists());

        let env = std::fs::read_to_string(dir.path().join(".env.local")).unwrap();
        assert!(env.contains("NEXT_PUBLIC_SUPABASE_URL="));
        assert!(env.contains("NEXT_PUBLIC_SUPABASE_ANON_KEY="));

        // the install pass is left to the user
        assert!(!supabase_init().run_install);
    }
}
