//! Next-Auth scaffolding: base setup plus credential and Kakao providers

use crate::patch::{AnchorEdit, AuxFile, Dependency, EnvVar, Recipe};

/// Anchor for the provider actions: the auth options module created by `init`
const AUTH_LIB_CANDIDATES: &[&str] = &["src/lib/auth.ts"];

pub fn auth_init() -> Recipe {
    let mut recipe = Recipe::new("auth", "AuthProvider");
    // missing layout is survivable: the provider can be wired by hand
    recipe.anchor_optional = true;
    recipe.imports =
        vec!["import { AuthProvider } from '@/components/auth/auth-provider';".to_string()];
    recipe.edit = AnchorEdit::WrapChildren {
        open: "<AuthProvider>",
        close: "</AuthProvider>",
    };
    recipe.aux_files = vec![
        AuxFile::new("src/app/api/auth/[...nextauth]/route.ts", AUTH_ROUTE),
        AuxFile::new("src/lib/auth.ts", AUTH_OPTIONS),
        AuxFile::new("src/components/auth/auth-provider.tsx", AUTH_PROVIDER),
    ];
    recipe.env_vars = vec![
        EnvVar {
            name: "NEXTAUTH_URL",
            value: "http://localhost:3000".to_string(),
        },
        EnvVar {
            name: "NEXTAUTH_SECRET",
            value: "your-nextauth-secret".to_string(),
        },
    ];
    recipe.dependencies = vec![Dependency {
        name: "next-auth",
        version: "^4.24.5",
        dev: false,
    }];
    recipe.run_install = true;
    recipe
}

pub fn auth_idpw() -> Recipe {
    let mut recipe = Recipe::new("auth idpw", "CredentialsProvider");
    recipe.anchor_candidates = AUTH_LIB_CANDIDATES;
    recipe.imports =
        vec!["import CredentialsProvider from \"next-auth/providers/credentials\";".to_string()];
    recipe.edit = AnchorEdit::AfterToken {
        token: "providers: [",
        snippet: CREDENTIALS_PROVIDER.to_string(),
    };
    recipe.aux_files = vec![AuxFile::new("src/app/auth/login-idpw/page.tsx", IDPW_PAGE)];
    recipe
}

pub fn auth_kakao() -> Recipe {
    let mut recipe = Recipe::new("auth kakao", "KakaoProvider");
    recipe.anchor_candidates = AUTH_LIB_CANDIDATES;
    recipe.imports = vec!["import KakaoProvider from \"next-auth/providers/kakao\";".to_string()];
    recipe.edit = AnchorEdit::AfterToken {
        token: "providers: [",
        snippet: KAKAO_PROVIDER.to_string(),
    };
    recipe.env_vars = vec![
        EnvVar {
            name: "KAKAO_CLIENT_ID",
            value: "your-kakao-client-id".to_string(),
        },
        EnvVar {
            name: "KAKAO_CLIENT_SECRET",
            value: "your-kakao-client-secret".to_string(),
        },
    ];
    recipe
}

const AUTH_ROUTE: &str = r##"import NextAuth from "next-auth";
import { authOptions } from "@/lib/auth";

const handler = NextAuth(authOptions);

export { handler as GET, handler as POST };
"##;

const AUTH_OPTIONS: &str = r##"import { NextAuthOptions } from "next-auth";

export const authOptions: NextAuthOptions = {
  providers: [
    // add providers here
  ],
  pages: {
    signIn: "/auth/signin",
  },
  callbacks: {
    async session({ session, token }) {
      if (token) {
        session.user.id = token.sub as string;
      }
      return session;
    },
    async jwt({ token, user }) {
      if (user) {
        token.sub = user.id;
      }
      return token;
    },
  },
  session: {
    strategy: "jwt",
  },
  secret: process.env.NEXTAUTH_SECRET,
};

declare module "next-auth" {
  interface Session {
    user: {
      id: string;
      name?: string | null;
      email?: string | null;
      image?: string | null;
    };
  }
}
"##;

const AUTH_PROVIDER: &str = r##""use client";

import { SessionProvider } from "next-auth/react";
import { ReactNode } from "react";

export function AuthProvider({ children }: { children: ReactNode }) {
  return <SessionProvider>{children}</SessionProvider>;
}
"##;

const CREDENTIALS_PROVIDER: &str = r##"
    CredentialsProvider({
      name: "Credentials",
      credentials: {
        id: { label: "ID", type: "text" },
        password: { label: "Password", type: "password" },
      },
      async authorize(credentials) {
        // replace with a real user lookup
        const users = [
          { id: "admin", password: "admin1234", name: "Admin", email: "admin@example.com" },
          { id: "user", password: "user1234", name: "User", email: "user@example.com" },
        ];

        const user = users.find(
          (user) => user.id === credentials?.id && user.password === credentials?.password
        );

        if (user) {
          return {
            id: user.id,
            name: user.name,
            email: user.email,
          };
        }

        return null;
      },
    }),"##;

const KAKAO_PROVIDER: &str = r##"
    KakaoProvider({
      clientId: process.env.KAKAO_CLIENT_ID!,
      clientSecret: process.env.KAKAO_CLIENT_SECRET!,
    }),"##;

const IDPW_PAGE: &str = r##"'use client';

import { useState } from 'react';
import { signIn } from 'next-auth/react';
import { useRouter } from 'next/navigation';

export default function LoginPage() {
  const router = useRouter();
  const [id, setId] = useState('');
  const [password, setPassword] = useState('');
  const [error, setError] = useState('');
  const [loading, setLoading] = useState(false);

  const handleSubmit = async (e: React.FormEvent) => {
    e.preventDefault();
    setLoading(true);
    setError('');

    try {
      const result = await signIn('credentials', {
        redirect: false,
        id,
        password,
      });

      if (result?.error) {
        setError('Invalid ID or password.');
      } else {
        router.push('/');
        router.refresh();
      }
    } catch (error) {
      setError('An error occurred while signing in.');
      console.error(error);
    } finally {
      setLoading(false);
    }
  };

  return (
    <main className="flex min-h-screen items-center justify-center p-8">
      <form onSubmit={handleSubmit} className="flex w-full max-w-sm flex-col gap-4">
        <h1 className="text-2xl font-bold">Sign in</h1>
        {error && <p className="text-sm text-red-500">{error}</p>}
        <input
          className="rounded border p-2"
          placeholder="ID"
          value={id}
          onChange={(e) => setId(e.target.value)}
        />
        <input
          className="rounded border p-2"
          type="password"
          placeholder="Password"
          value={password}
          onChange={(e) => setPassword(e.target.value)}
        />
        <button
          className="rounded bg-black p-2 text-white disabled:opacity-50"
          type="submit"
          disabled={loading}
        >
          {loading ? 'Signing in...' : 'Sign in'}
        </button>
      </form>
    </main>
  );
}
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::Patcher;

    #[test]
    fn init_scaffolds_route_options_and_provider() {
        let recipe = auth_init();
        let paths: Vec<&str> = recipe.aux_files.iter().map(|f| f.path).collect();
        assert!(paths.contains(&"src/app/api/auth/[...nextauth]/route.ts"));
        assert!(paths.contains(&"src/lib/auth.ts"));
        assert!(paths.contains(&"src/components/auth/auth-provider.tsx"));
        assert!(recipe.anchor_optional);
    }

    #[test]
    fn idpw_extends_the_providers_array() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        let patcher = Patcher::new(dir.path());

        patcher.apply(&auth_init()).unwrap();
        patcher.apply(&auth_idpw()).unwrap();

        let options = std::fs::read_to_string(dir.path().join("src/lib/auth.ts")).unwrap();
        assert!(options.contains("import CredentialsProvider"));
        assert!(options.contains("providers: [\n    CredentialsProvider({"));
        assert!(dir.path().join("src/app/auth/login-idpw/page.tsx").exists());

        // applying again changes nothing
        let before = options.clone();
        patcher.apply(&auth_idpw()).unwrap();
        let after = std::fs::read_to_string(dir.path().join("src/lib/auth.ts")).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn kakao_adds_env_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        let patcher = Patcher::new(dir.path());

        patcher.apply(&auth_init()).unwrap();
        patcher.apply(&auth_kakao()).unwrap();

        let env = std::fs::read_to_string(dir.path().join(".env.local")).unwrap();
        assert!(env.contains("KAKAO_CLIENT_ID="));
        assert!(env.contains("KAKAO_CLIENT_SECRET="));

        let options = std::fs::read_to_string(dir.path().join("src/lib/auth.ts")).unwrap();
        assert!(options.contains("KakaoProvider({"));
    }
}
