//! User-facing message catalog
//!
//! The CLI language is resolved once from the global config at startup and
//! threaded into commands as an explicit value. Lookups fall back to English,
//! then to the key itself, so a missing translation never panics.

use crate::config::Lang;

#[derive(Debug, Clone, Copy)]
pub struct Messages {
    lang: Lang,
}

impl Messages {
    pub fn new(lang: Lang) -> Self {
        Self { lang }
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    /// Look up a message by key
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        let table = match self.lang {
            Lang::En => EN,
            Lang::Ko => KO,
        };
        lookup(table, key)
            .or_else(|| lookup(EN, key))
            .unwrap_or(key)
    }

    /// Look up a message and substitute `{0}` with `arg`
    pub fn t_with(&self, key: &str, arg: &str) -> String {
        self.t(key).replacen("{0}", arg, 1)
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

const EN: &[(&str, &str)] = &[
    // create
    ("create.creating_app", "Creating a new Next.js app in"),
    ("create.success", "Project created successfully"),
    ("create.template_success", "Template has been successfully installed"),
    ("create.login_required", "Error: Login required. Please login."),
    ("create.login_usage", "Usage: easynext login <token>"),
    ("create.template_error", "Error: An error occurred while downloading the template."),
    ("create.template_guide", "Guide: https://easynext.org/premium/guide"),
    ("create.downloading", "Downloading template from"),
    ("create.installing", "Installing dependencies..."),
    ("create.naming_error", "Could not create a project called"),
    ("create.naming_restrictions", "because of npm naming restrictions:"),
    ("create.not_writable", "The application path is not writable, please check folder permissions and try again."),
    ("create.no_permissions", "It is likely you do not have write permissions for this folder."),
    ("create.skip_git", "Skipping git initialization."),
    ("create.git_initialized", "Initialized a git repository."),
    ("create.folder_conflict", "The directory {0} contains files that could conflict:"),
    ("create.folder_conflict_solution", "Either try using a new directory name, or remove the files listed above."),
    // login
    ("login.token_required", "Token is required"),
    ("login.usage", "Usage: easynext login <token>"),
    ("login.checking", "Checking login credentials..."),
    ("login.failed", "Login failed"),
    ("login.success", "Login successful!"),
    ("login.premium_activated", "Premium access activated!"),
    ("login.token_saved", "Credentials saved to"),
    // lang
    ("lang.current", "Current lang:"),
    ("lang.already_set", "Lang is already set to"),
    ("lang.set_to", "Lang is set to"),
    ("lang.invalid_code", "Invalid language code:"),
    // doctor
    ("doctor.checking", "Checking your system..."),
    // integrations
    ("patch.no_project", "package.json not found. Run this command in your project root directory."),
    ("patch.already_configured", "Already configured - nothing to do."),
    ("gtag.prompt", "Google Analytics (GA4) measurement ID (e.g. G-XXXXXXXXXX)"),
    ("gtag.id_required", "Google Analytics ID is required (must start with G-)"),
    ("gtag.success", "Google Analytics (gtag) installed successfully"),
    ("clarity.prompt", "Microsoft Clarity project ID"),
    ("clarity.id_required", "Microsoft Clarity ID is required"),
    ("clarity.success", "Microsoft Clarity installed successfully"),
    ("channeltalk.prompt", "ChannelIO plugin key"),
    ("channeltalk.id_required", "ChannelIO plugin key is required"),
    ("channeltalk.success", "ChannelIO installed successfully"),
    ("adsense.prompt", "Google AdSense client ID (e.g. ca-pub-1234567890123456)"),
    ("adsense.id_required", "Google AdSense client ID is required"),
    ("adsense.success", "Google AdSense installed successfully"),
    ("sitemap.prompt", "Production URL (e.g. https://example.com)"),
    ("sitemap.url_required", "Production URL is required"),
    ("sitemap.success", "next-sitemap configured successfully"),
    ("sentry.hint", "To add Sentry, copy and run the following command:"),
    ("auth.not_initialized", "Next-Auth is not initialized. Run `easynext auth init` first."),
    ("auth.unknown_action", "Unknown action:"),
    ("auth.available_actions", "Available actions: init, idpw, kakao"),
    ("auth.success", "Next-Auth is set up! Review .env.local and update your credentials."),
    ("supabase.unknown_action", "Unknown action:"),
    ("supabase.available_actions", "Available actions: init"),
    ("supabase.success", "Supabase is set up!"),
    ("supabase.install_hint", "Install dependencies with: npm install (or yarn / pnpm)"),
    ("supabase.env_hint", "Then set the Supabase URL and anon key in .env.local."),
    ("i18n.setup_start", "Setting up i18n for Next.js..."),
    ("i18n.setup_complete", "i18n setup completed successfully"),
];

const KO: &[(&str, &str)] = &[
    // create
    ("create.creating_app", "새로운 Next.js 앱을 생성합니다:"),
    ("create.success", "프로젝트가 성공적으로 생성되었습니다"),
    ("create.template_success", "템플릿이 성공적으로 설치되었습니다"),
    ("create.login_required", "Error: 로그인이 필요합니다. 로그인해주세요."),
    ("create.login_usage", "사용법: easynext login <token>"),
    ("create.template_error", "Error: 템플릿 다운로드 중 오류가 발생했습니다."),
    ("create.template_guide", "안내: https://easynext.org/premium/guide"),
    ("create.downloading", "템플릿 다운로드:"),
    ("create.installing", "의존성 패키지 설치 중..."),
    ("create.naming_error", "프로젝트를 생성할 수 없습니다:"),
    ("create.naming_restrictions", "npm 이름 규칙에 맞지 않습니다:"),
    ("create.not_writable", "대상 경로에 쓸 수 없습니다. 폴더 권한을 확인하고 다시 시도해주세요."),
    ("create.no_permissions", "이 폴더에 대한 쓰기 권한이 없는 것 같습니다."),
    ("create.skip_git", "git 초기화를 건너뜁니다."),
    ("create.git_initialized", "git 저장소를 초기화했습니다."),
    ("create.folder_conflict", "{0} 디렉토리에 충돌할 수 있는 파일이 있습니다:"),
    ("create.folder_conflict_solution", "다른 디렉토리 이름을 사용하거나, 위 파일들을 제거해주세요."),
    // login
    ("login.token_required", "토큰 정보를 입력해주세요."),
    ("login.usage", "사용법: easynext login <token>"),
    ("login.checking", "로그인 정보 확인중..."),
    ("login.failed", "로그인 실패"),
    ("login.success", "로그인 성공!"),
    ("login.premium_activated", "프리미엄 이용권 활성화 완료!"),
    ("login.token_saved", "인증 정보 저장 위치:"),
    // lang
    ("lang.current", "현재 언어:"),
    ("lang.already_set", "이미 설정된 언어입니다:"),
    ("lang.set_to", "언어가 설정되었습니다:"),
    ("lang.invalid_code", "잘못된 언어 코드입니다:"),
    // doctor
    ("doctor.checking", "시스템을 확인하는 중..."),
    // integrations
    ("patch.no_project", "package.json을 찾을 수 없습니다. 프로젝트 루트 디렉토리에서 실행해주세요."),
    ("patch.already_configured", "이미 설정되어 있습니다 - 변경 사항이 없습니다."),
    ("gtag.prompt", "Google Analytics(GA4) 측정 ID (예: G-XXXXXXXXXX)"),
    ("gtag.id_required", "Google Analytics ID가 필요합니다 (G-로 시작해야 합니다)"),
    ("gtag.success", "Google Analytics(gtag) 설정이 완료되었습니다"),
    ("clarity.prompt", "Microsoft Clarity 프로젝트 ID"),
    ("clarity.id_required", "Microsoft Clarity ID가 필요합니다"),
    ("clarity.success", "Microsoft Clarity 설정이 완료되었습니다"),
    ("channeltalk.prompt", "채널톡 플러그인 키"),
    ("channeltalk.id_required", "채널톡 플러그인 키가 필요합니다"),
    ("channeltalk.success", "채널톡 설정이 완료되었습니다"),
    ("adsense.prompt", "Google AdSense 클라이언트 ID (예: ca-pub-1234567890123456)"),
    ("adsense.id_required", "Google AdSense 클라이언트 ID가 필요합니다"),
    ("adsense.success", "Google AdSense 설정이 완료되었습니다"),
    ("sitemap.prompt", "배포할 URL (예: https://example.com)"),
    ("sitemap.url_required", "배포 URL이 필요합니다"),
    ("sitemap.success", "next-sitemap 설정이 완료되었습니다"),
    ("sentry.hint", "Sentry 설정을 추가하려면 다음 명령어를 복사하여 실행하세요:"),
    ("auth.not_initialized", "Next-Auth가 초기화되지 않았습니다. 먼저 `easynext auth init`을 실행하세요."),
    ("auth.unknown_action", "알 수 없는 액션:"),
    ("auth.available_actions", "사용 가능한 액션: init, idpw, kakao"),
    ("auth.success", "Next-Auth 설정이 완료되었습니다! .env.local 파일을 확인하고 인증 정보를 업데이트해주세요."),
    ("supabase.unknown_action", "알 수 없는 액션:"),
    ("supabase.available_actions", "사용 가능한 액션: init"),
    ("supabase.success", "Supabase 설정이 완료되었습니다!"),
    ("supabase.install_hint", "다음 명령어로 패키지를 설치하세요: npm install (또는 yarn / pnpm)"),
    ("supabase.env_hint", "그리고 .env.local 파일에서 Supabase URL과 Anon Key를 설정하세요."),
    ("i18n.setup_start", "Next.js i18n을 설정하는 중..."),
    ("i18n.setup_complete", "i18n 설정이 완료되었습니다"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_selected_language() {
        let en = Messages::new(Lang::En);
        let ko = Messages::new(Lang::Ko);
        assert_eq!(en.t("login.success"), "Login successful!");
        assert_eq!(ko.t("login.success"), "로그인 성공!");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        let messages = Messages::new(Lang::Ko);
        assert_eq!(messages.t("nope.missing"), "nope.missing");
    }

    #[test]
    fn substitutes_placeholder() {
        let messages = Messages::new(Lang::En);
        assert_eq!(
            messages.t_with("create.folder_conflict", "my-app"),
            "The directory my-app contains files that could conflict:"
        );
    }

    #[test]
    fn every_korean_key_exists_in_english() {
        for (key, _) in KO {
            assert!(
                EN.iter().any(|(k, _)| k == key),
                "missing English entry for {key}"
            );
        }
    }
}
