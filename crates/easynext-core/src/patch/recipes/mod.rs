//! Per-integration patch recipes
//!
//! Each function builds the `Recipe` for one integration command. The anchor
//! strings, auxiliary file contents, and dependency pins live here; the
//! mechanics of applying them live in the engine.

mod adsense;
mod auth;
mod channelio;
mod clarity;
mod gtag;
mod i18n;
mod sitemap;
mod supabase;

pub use adsense::adsense;
pub use auth::{auth_idpw, auth_init, auth_kakao};
pub use channelio::channelio;
pub use clarity::clarity;
pub use gtag::gtag;
pub use i18n::i18n;
pub use sitemap::sitemap;
pub use supabase::supabase_init;
