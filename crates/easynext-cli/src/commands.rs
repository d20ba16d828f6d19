//! Subcommand implementations: thin wiring from CLI arguments to core operations

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};

use easynext_core::api::ApiClient;
use easynext_core::config::humanize;
use easynext_core::create::{self, CreateOptions};
use easynext_core::doctor::{self, CheckStatus};
use easynext_core::patch::{recipes, PatchOutcome, Patcher, Recipe};
use easynext_core::{
    fetch, install, project, AuthConfig, ConfigStore, FeatureFlags, GlobalConfig, Lang, Messages,
};

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Project directory to create
    pub directory: PathBuf,

    /// Premium template name (requires login)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Generate a JavaScript project instead of TypeScript
    #[arg(long)]
    pub javascript: bool,

    /// Skip Tailwind CSS configuration
    #[arg(long = "no-tailwind")]
    pub no_tailwind: bool,

    /// Skip ESLint configuration
    #[arg(long = "no-eslint")]
    pub no_eslint: bool,

    /// Skip installing dependencies
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Disable Turbopack for `next dev`
    #[arg(long = "no-turbopack")]
    pub no_turbopack: bool,

    /// Skip git repository initialization
    #[arg(long = "disable-git")]
    pub disable_git: bool,
}

pub async fn create(args: CreateArgs, auth: &AuthConfig, messages: &Messages) -> Result<()> {
    let app_path = absolutize(&args.directory)?;
    let app_name = app_path
        .file_name()
        .and_then(|name| name.to_str())
        .context("invalid project directory")?
        .to_string();

    let validation = project::validate_project_name(&app_name);
    if !validation.is_valid() {
        eprintln!(
            "{} {} {}",
            messages.t("create.naming_error"),
            format!("\"{app_name}\"").red(),
            messages.t("create.naming_restrictions")
        );
        for problem in &validation.problems {
            eprintln!("    {} {}", "*".red().bold(), problem);
        }
        bail!("invalid project name");
    }

    match &args.template {
        None => {
            let flags = FeatureFlags {
                typescript: !args.javascript,
                tailwind: !args.no_tailwind,
                eslint: !args.no_eslint,
                skip_install: args.skip_install,
                turbopack: !args.no_turbopack,
                disable_git: args.disable_git,
            };
            let opts = CreateOptions {
                app_path,
                flags,
                template_dir: None,
            };
            create::create_app(&opts, messages).await?;
            println!("{}", messages.t("create.success").green());
        }
        Some(template) => {
            let Some(token) = auth.token.as_deref() else {
                eprintln!("{}", messages.t("create.login_required").red());
                eprintln!("{}", messages.t("create.login_usage").yellow());
                bail!("not logged in");
            };

            let api = ApiClient::from_env()?;
            let download_url = match api.template_url(token, template).await {
                Ok(url) => url,
                Err(err) => {
                    eprintln!("{}", messages.t("create.template_error").red());
                    eprintln!("{}", messages.t("create.template_guide").yellow());
                    return Err(err.into());
                }
            };

            println!("{} {}", messages.t("create.downloading"), download_url);
            install_premium_template(&download_url, &app_path, &app_name, messages).await?;
            println!("{}", messages.t("create.template_success").green());
        }
    }
    Ok(())
}

async fn install_premium_template(
    url: &str,
    app_path: &Path,
    app_name: &str,
    messages: &Messages,
) -> Result<()> {
    std::fs::create_dir_all(app_path)
        .with_context(|| format!("Failed to create {}", app_path.display()))?;
    create::ensure_empty_target(app_path, app_name, messages)?;

    fetch::install_remote_template(url, app_path).await?;

    println!("{}", messages.t("create.installing"));
    install::install_in(app_path).await?;
    Ok(())
}

pub async fn login(
    token: Option<String>,
    store: &ConfigStore,
    auth: &AuthConfig,
    messages: &Messages,
) -> Result<()> {
    let Some(token) = token else {
        eprintln!("{}", messages.t("login.token_required").red());
        eprintln!("{}", messages.t("login.usage").yellow());
        bail!("token required");
    };

    println!("{}", messages.t("login.checking").blue());
    let api = ApiClient::from_env()?;
    let access_token = api
        .cli_login(&token)
        .await
        .context(messages.t("login.failed").to_string())?;

    let mut updated = auth.clone();
    updated.token = Some(access_token);
    store.write_auth(&updated)?;

    println!("{}", messages.t("login.success").green());
    println!("{}", messages.t("login.premium_activated").green());
    println!(
        "{} {}",
        messages.t("login.token_saved"),
        humanize(&store.auth_path()).dimmed()
    );
    Ok(())
}

pub fn lang(
    code: Option<String>,
    store: &ConfigStore,
    mut global: GlobalConfig,
    messages: &Messages,
) -> Result<()> {
    match code {
        None => println!("{} {}", messages.t("lang.current"), global.lang().code()),
        Some(code) => match Lang::parse(&code) {
            Some(lang) if lang == global.lang() => {
                println!("{} {}", messages.t("lang.already_set"), lang.code());
            }
            Some(lang) => {
                global.lang = Some(lang);
                store.write_global(&global)?;
                println!("{} {}", messages.t("lang.set_to"), lang.code());
            }
            None => {
                eprintln!("{} {}", messages.t("lang.invalid_code").red(), code);
                bail!("invalid language code");
            }
        },
    }
    Ok(())
}

pub fn doctor(messages: &Messages) -> Result<()> {
    println!("{}", messages.t("doctor.checking"));
    // report-only: doctor never turns findings into a failing exit
    for check in doctor::run_checks() {
        match check.status {
            CheckStatus::Pass(detail) => println!("  {} {}", "✓".green(), detail),
            CheckStatus::Warn(detail) => println!("  {} {}", "!".yellow(), detail),
            CheckStatus::Fail(detail) => println!("  {} {}", "✗".red(), detail),
        }
    }
    Ok(())
}

pub async fn auth(action: &str, messages: &Messages) -> Result<()> {
    let cwd = assert_project_root(messages)?;
    match action {
        "init" => {
            run_recipe(recipes::auth_init(), messages).await?;
            println!("{}", messages.t("auth.success").green());
        }
        "idpw" | "kakao" => {
            if !cwd.join("src/lib/auth.ts").exists() {
                eprintln!("{}", messages.t("auth.not_initialized").red());
                bail!("auth not initialized");
            }
            let recipe = if action == "idpw" {
                recipes::auth_idpw()
            } else {
                recipes::auth_kakao()
            };
            run_recipe(recipe, messages).await?;
            println!("{}", messages.t("auth.success").green());
        }
        other => {
            eprintln!("{} {}", messages.t("auth.unknown_action").red(), other);
            eprintln!("{}", messages.t("auth.available_actions"));
            bail!("unknown action");
        }
    }
    Ok(())
}

pub async fn supabase(action: &str, messages: &Messages) -> Result<()> {
    assert_project_root(messages)?;
    match action {
        "init" => {
            run_recipe(recipes::supabase_init(), messages).await?;
            println!("{}", messages.t("supabase.success").green());
            println!("{}", messages.t("supabase.install_hint"));
            println!("{}", messages.t("supabase.env_hint"));
        }
        other => {
            eprintln!("{} {}", messages.t("supabase.unknown_action").red(), other);
            eprintln!("{}", messages.t("supabase.available_actions"));
            bail!("unknown action");
        }
    }
    Ok(())
}

pub async fn gtag(id: Option<String>, messages: &Messages) -> Result<()> {
    assert_project_root(messages)?;
    let id = prompt_or(id, messages.t("gtag.prompt"))?;
    if id.is_empty() || !id.starts_with("G-") {
        eprintln!("{}", messages.t("gtag.id_required").red());
        bail!("invalid measurement id");
    }
    run_recipe(recipes::gtag(&id), messages).await?;
    println!("{}", messages.t("gtag.success").green());
    Ok(())
}

pub async fn clarity(id: Option<String>, messages: &Messages) -> Result<()> {
    assert_project_root(messages)?;
    let id = prompt_or(id, messages.t("clarity.prompt"))?;
    if id.is_empty() {
        eprintln!("{}", messages.t("clarity.id_required").red());
        bail!("missing project id");
    }
    run_recipe(recipes::clarity(&id), messages).await?;
    println!("{}", messages.t("clarity.success").green());
    Ok(())
}

pub async fn channelio(key: Option<String>, messages: &Messages) -> Result<()> {
    assert_project_root(messages)?;
    let key = prompt_or(key, messages.t("channeltalk.prompt"))?;
    if key.is_empty() {
        eprintln!("{}", messages.t("channeltalk.id_required").red());
        bail!("missing plugin key");
    }
    run_recipe(recipes::channelio(&key), messages).await?;
    println!("{}", messages.t("channeltalk.success").green());
    Ok(())
}

pub async fn adsense(client_id: Option<String>, messages: &Messages) -> Result<()> {
    assert_project_root(messages)?;
    let client_id = prompt_or(client_id, messages.t("adsense.prompt"))?;
    if client_id.is_empty() {
        eprintln!("{}", messages.t("adsense.id_required").red());
        bail!("missing client id");
    }
    run_recipe(recipes::adsense(&client_id), messages).await?;
    println!("{}", messages.t("adsense.success").green());
    Ok(())
}

pub fn sentry(messages: &Messages) -> Result<()> {
    println!("{}", messages.t("sentry.hint"));
    println!("{}", "npx @sentry/wizard@latest -i nextjs".cyan());
    Ok(())
}

pub async fn sitemap(url: Option<String>, messages: &Messages) -> Result<()> {
    assert_project_root(messages)?;
    let url = prompt_or(url, messages.t("sitemap.prompt"))?;
    if url.is_empty() {
        eprintln!("{}", messages.t("sitemap.url_required").red());
        bail!("missing production url");
    }
    run_recipe(recipes::sitemap(&url), messages).await?;
    println!("{}", messages.t("sitemap.success").green());
    Ok(())
}

pub async fn i18n(messages: &Messages) -> Result<()> {
    assert_project_root(messages)?;
    println!("{}", messages.t("i18n.setup_start"));
    run_recipe(recipes::i18n(), messages).await?;
    println!("{}", messages.t("i18n.setup_complete").green());
    Ok(())
}

fn assert_project_root(messages: &Messages) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    if !project::is_project_root(&cwd) {
        eprintln!("{}", messages.t("patch.no_project").red());
        bail!("not a project root");
    }
    Ok(cwd)
}

async fn run_recipe(recipe: Recipe, messages: &Messages) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let run_install = recipe.run_install;

    let outcome = Patcher::new(&cwd).apply(&recipe)?;
    report_outcome(&outcome, messages);

    if outcome.manifest_changed && run_install {
        println!("{}", messages.t("create.installing"));
        install::install_in(&cwd).await?;
    }
    Ok(())
}

fn report_outcome(outcome: &PatchOutcome, messages: &Messages) {
    if outcome.already_configured {
        println!("{}", messages.t("patch.already_configured").dimmed());
    }
    if let Some(anchor) = &outcome.anchor {
        if outcome.anchor_modified {
            println!("  {} {} updated", "~".cyan(), anchor.display());
        }
    }
    for created in &outcome.created {
        println!("  {} {}", "+".green(), created);
    }
    for skipped in &outcome.skipped {
        println!("  {} {} (already exists)", "=".dimmed(), skipped);
    }
    for note in &outcome.notes {
        println!("  {}", note.dimmed());
    }
    for warning in &outcome.warnings {
        eprintln!("  {} {}", "!".yellow(), warning);
    }
}

fn prompt_or(value: Option<String>, prompt: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value.trim().to_string());
    }
    let input: String = cliclack::input(prompt).interact()?;
    Ok(input.trim().to_string())
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    Ok(cwd.join(path))
}
