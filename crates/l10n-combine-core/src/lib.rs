pub mod checkout;
pub mod config;
pub mod logging;
pub mod orchestrator;
pub mod release;

pub use checkout::{Checkout, TranslationFile};
pub use config::{Branding, BrandingVersion, FileSpec, FilesConfig};
pub use orchestrator::{FileVersions, Releases, combine_versions};
pub use release::ReleaseBranch;
