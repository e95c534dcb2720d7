//! Manifest schemas for the generated native-shell project
//!
//! Two files land in every workspace root: `package.json` declaring the
//! Capacitor framework dependencies, and `capacitor.config.json` describing
//! the shell behavior. Both are pure functions of the build request so that
//! identical requests produce byte-identical manifests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PACKAGE_VERSION: &str = "1.0.0";
pub const CAPACITOR_VERSION_REQ: &str = "^5.0.0";

/// Splash screen show duration, fixed by the shell template.
pub const SPLASH_DURATION_MS: u32 = 3000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    pub dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    /// Descriptor pinning the core and per-platform shell modules to a
    /// compatible major version range.
    pub fn for_package(package_name: &str) -> Self {
        let dependencies = ["@capacitor/core", "@capacitor/android", "@capacitor/ios"]
            .into_iter()
            .map(|module| (module.to_string(), CAPACITOR_VERSION_REQ.to_string()))
            .collect();

        Self {
            name: package_name.to_string(),
            version: PACKAGE_VERSION.to_string(),
            dependencies,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellConfig {
    pub app_id: String,
    pub app_name: String,
    /// Relative path to the web assets inside the project.
    pub web_dir: String,
    /// False: the shell must serve the provided assets verbatim.
    pub bundled_web_runtime: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    pub plugins: PluginConfig,
}

/// Live-reload preview pointing the shell at the original remote site.
/// Cleartext transport is a local-development opt-in, never a production
/// default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub url: String,
    pub cleartext: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    #[serde(rename = "SplashScreen")]
    pub splash_screen: SplashScreenConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplashScreenConfig {
    pub launch_show_duration: u32,
    pub background_color: String,
    pub android_scale_type: String,
    pub show_spinner: bool,
}

impl SplashScreenConfig {
    pub fn with_background(color: &str) -> Self {
        Self {
            launch_show_duration: SPLASH_DURATION_MS,
            background_color: color.to_string(),
            android_scale_type: "CENTER_CROP".to_string(),
            show_spinner: true,
        }
    }
}
