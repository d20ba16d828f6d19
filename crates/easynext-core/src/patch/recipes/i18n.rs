//! i18n scaffolding: locale routing config, message files, language switcher

use crate::patch::{AnchorEdit, AuxFile, Recipe};

/// Candidate locations for the home page
const PAGE_CANDIDATES: &[&str] = &["src/app/page.tsx", "app/page.tsx"];

pub fn i18n() -> Recipe {
    let mut recipe = Recipe::new("i18n", "locales/en/common.json");
    recipe.anchor_candidates = PAGE_CANDIDATES;
    recipe.edit = AnchorEdit::Replace(I18N_PAGE.to_string());
    recipe.aux_files = vec![
        AuxFile::replace_unless_marked("next.config.js", NEXT_CONFIG, "i18n:"),
        AuxFile::new("locales/ko/common.json", KO_COMMON),
        AuxFile::new("locales/en/common.json", EN_COMMON),
    ];
    recipe
}

const NEXT_CONFIG: &str = r##"/** @type {import('next').NextConfig} */
const nextConfig = {
  i18n: {
    locales: ['ko', 'en'],
    defaultLocale: 'ko',
  },
};

module.exports = nextConfig;
"##;

const KO_COMMON: &str = r##"{
  "welcome": "환영합니다",
  "hello": "안녕하세요",
  "change_language": "언어 변경",
  "description": "Next.js 다국어 지원 예시입니다",
  "current_locale": "현재 언어"
}
"##;

const EN_COMMON: &str = r##"{
  "welcome": "Welcome",
  "hello": "Hello",
  "change_language": "Change Language",
  "description": "Next.js i18n example",
  "current_locale": "Current locale"
}
"##;

const I18N_PAGE: &str = r##"'use client';

import { useRouter } from 'next/navigation';
import { useEffect, useState } from 'react';

import en from '../../locales/en/common.json';
import ko from '../../locales/ko/common.json';

const messages = { en, ko } as const;
type Locale = keyof typeof messages;

export default function Home() {
  const router = useRouter();
  const [locale, setLocale] = useState<Locale>('ko');

  useEffect(() => {
    const fromPath = window.location.pathname.split('/')[1];
    if (fromPath === 'en' || fromPath === 'ko') {
      setLocale(fromPath);
    }
  }, []);

  const t = messages[locale];

  const changeLanguage = (next: Locale) => {
    setLocale(next);
    const rest = window.location.pathname.split('/').slice(2).join('/');
    router.push(`/${next}/${rest}`);
  };

  return (
    <main className="flex min-h-screen flex-col items-center justify-between p-24">
      <div className="z-10 w-full max-w-5xl items-center justify-between font-mono text-sm">
        <h1 className="mb-6 text-4xl font-bold">{t.welcome}</h1>
        <p className="mb-4">{t.hello}</p>
        <p className="mb-4">{t.description}</p>
        <p className="mb-8">
          {t.current_locale}: {locale}
        </p>
        <div className="flex gap-2">
          <button
            className="rounded border px-4 py-2"
            onClick={() => changeLanguage('ko')}
          >
            한국어
          </button>
          <button
            className="rounded border px-4 py-2"
            onClick={() => changeLanguage('en')}
          >
            English
          </button>
        </div>
      </div>
    </main>
  );
}
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::Patcher;

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        std::fs::create_dir_all(dir.path().join("src/app")).unwrap();
        std::fs::write(
            dir.path().join("src/app/page.tsx"),
            "export default function Home() { return <main />; }\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn replaces_home_page_and_writes_locales() {
        let dir = project();
        let patcher = Patcher::new(dir.path());

        patcher.apply(&i18n()).unwrap();

        let page = std::fs::read_to_string(dir.path().join("src/app/page.tsx")).unwrap();
        assert!(page.contains("locales/en/common.json"));
        assert!(dir.path().join("locales/ko/common.json").exists());
        assert!(dir.path().join("locales/en/common.json").exists());
        let config = std::fs::read_to_string(dir.path().join("next.config.js")).unwrap();
        assert!(config.contains("defaultLocale: 'ko'"));
    }

    #[test]
    fn second_run_leaves_everything_untouched() {
        let dir = project();
        let patcher = Patcher::new(dir.path());

        patcher.apply(&i18n()).unwrap();
        let page_first = std::fs::read_to_string(dir.path().join("src/app/page.tsx")).unwrap();

        let outcome = patcher.apply(&i18n()).unwrap();
        assert!(outcome.already_configured);
        let page_second = std::fs::read_to_string(dir.path().join("src/app/page.tsx")).unwrap();
        assert_eq!(page_first, page_second);
    }
}
