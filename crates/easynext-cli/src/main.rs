//! easynext - Next.js project generator and integration toolkit

mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use easynext_core::{ConfigStore, Messages};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "easynext")]
#[command(about = "Generate Next.js projects and wire in third-party integrations")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new Next.js project
    Create(commands::CreateArgs),
    /// Store a premium access token
    Login {
        /// Token issued on easynext.org
        token: Option<String>,
    },
    /// Show or set the CLI language
    Lang {
        /// Language code (en or ko)
        code: Option<String>,
    },
    /// Check the development environment
    Doctor,
    /// Set up Next-Auth in the current project
    Auth {
        /// Action to run: init, idpw, or kakao
        #[arg(default_value = "init")]
        action: String,
    },
    /// Set up the Supabase client in the current project
    Supabase {
        /// Action to run: init
        #[arg(default_value = "init")]
        action: String,
    },
    /// Add Google Analytics (GA4) to the current project
    #[command(aliases = ["analytics", "ga"])]
    Gtag {
        /// GA4 measurement ID (e.g. G-XXXXXXXXXX)
        #[arg(long)]
        id: Option<String>,
    },
    /// Add Microsoft Clarity to the current project
    #[command(alias = "ms-clarity")]
    Clarity {
        /// Clarity project ID
        #[arg(long)]
        id: Option<String>,
    },
    /// Add the ChannelIO messenger widget to the current project
    #[command(aliases = ["channel", "channeltalk"])]
    Channelio {
        /// ChannelIO plugin key
        #[arg(long)]
        key: Option<String>,
    },
    /// Add Google AdSense to the current project
    Adsense {
        /// AdSense client ID (e.g. ca-pub-1234567890123456)
        #[arg(long = "client-id")]
        client_id: Option<String>,
    },
    /// Print Sentry wizard instructions
    Sentry,
    /// Configure next-sitemap in the current project
    Sitemap {
        /// Production URL (e.g. https://example.com)
        #[arg(long)]
        url: Option<String>,
    },
    /// Scaffold i18n routing and locale files in the current project
    I18n,
    /// Print the CLI version
    Version,
}

#[tokio::main]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let store = ConfigStore::from_default_location();
    let (global, auth) = match store.load_or_init() {
        Ok(pair) => pair,
        Err(err) => {
            eprintln!("{} {}", "Error:".red(), err);
            std::process::exit(1);
        }
    };
    let messages = Messages::new(global.lang());

    let result = match args.command {
        Command::Create(create_args) => commands::create(create_args, &auth, &messages).await,
        Command::Login { token } => commands::login(token, &store, &auth, &messages).await,
        Command::Lang { code } => commands::lang(code, &store, global, &messages),
        Command::Doctor => commands::doctor(&messages),
        Command::Auth { action } => commands::auth(&action, &messages).await,
        Command::Supabase { action } => commands::supabase(&action, &messages).await,
        Command::Gtag { id } => commands::gtag(id, &messages).await,
        Command::Clarity { id } => commands::clarity(id, &messages).await,
        Command::Channelio { key } => commands::channelio(key, &messages).await,
        Command::Adsense { client_id } => commands::adsense(client_id, &messages).await,
        Command::Sentry => commands::sentry(&messages),
        Command::Sitemap { url } => commands::sitemap(url, &messages).await,
        Command::I18n => commands::i18n(&messages).await,
        Command::Version => {
            println!("EasyNext CLI v{CLI_VERSION}");
            Ok(())
        }
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(err) = result {
        eprintln!("{} {:#}", "Error:".red(), err);
        std::process::exit(1);
    }
}
