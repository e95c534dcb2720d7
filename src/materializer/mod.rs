//! Manifest materialization
//!
//! Writes the package descriptor and native-shell configuration into the
//! workspace root. Both are pure functions of the build request.

use crate::models::error::BuildError;
use crate::models::manifest::{
    PackageManifest, PluginConfig, ServerConfig, ShellConfig, SplashScreenConfig,
};
use crate::models::request::{AssetSource, BuildRequest};
use crate::resolver::html::resolve_url;
use crate::workspace::{BuildWorkspace, WEB_DIR};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// Lower-case the app name and collapse whitespace runs to single hyphens,
/// per package-naming rules. Pure and idempotent.
pub fn derive_package_name(app_name: &str) -> String {
    WHITESPACE_RE
        .replace_all(app_name.trim().to_lowercase().as_str(), "-")
        .into_owned()
}

/// Build the shell configuration for a request.
///
/// The `server` block exists only for URL-backed builds: it points the shell
/// at the live site for development previews, with cleartext explicitly
/// opted in.
pub fn shell_config(request: &BuildRequest) -> ShellConfig {
    let server = match &request.source {
        AssetSource::Url(url) => Some(ServerConfig {
            url: resolve_url(url),
            cleartext: true,
        }),
        _ => None,
    };

    ShellConfig {
        app_id: request.app_id.clone(),
        app_name: request.app_name.clone(),
        web_dir: WEB_DIR.to_string(),
        bundled_web_runtime: false,
        server,
        plugins: PluginConfig {
            splash_screen: SplashScreenConfig::with_background(&request.primary_color),
        },
    }
}

/// Write `package.json` and `capacitor.config.json` into the workspace root.
pub fn write_manifests(request: &BuildRequest, workspace: &BuildWorkspace) -> Result<(), BuildError> {
    let package = PackageManifest::for_package(&derive_package_name(&request.app_name));
    write_json(&workspace.root().join("package.json"), &package)?;

    let config = shell_config(request);
    write_json(&workspace.root().join("capacitor.config.json"), &config)?;

    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), BuildError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        BuildError::packaging(
            format!("failed to serialize {}", path.display()),
            io::Error::new(io::ErrorKind::InvalidData, e),
        )
    })?;
    fs::write(path, json)
        .map_err(|e| BuildError::packaging(format!("failed to write {}", path.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::WorkspaceRoot;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use test_case::test_case;

    #[test_case("Demo App", "demo-app"; "single space")]
    #[test_case("DEMO  APP", "demo-app"; "casing and double space")]
    #[test_case(" Demo\tApp ", "demo-app"; "surrounding and tab whitespace")]
    #[test_case("demo-app", "demo-app"; "already derived")]
    fn derives_package_names(input: &str, expected: &str) {
        assert_eq!(derive_package_name(input), expected);
    }

    #[test]
    fn derivation_is_idempotent() {
        let once = derive_package_name("My Great App");
        assert_eq!(derive_package_name(&once), once);
    }

    #[test]
    fn server_block_present_iff_url_supplied() {
        let with_url = BuildRequest::new(
            "Demo App",
            "com.demo.app",
            AssetSource::Url("example.com".into()),
        );
        let config = shell_config(&with_url);
        let server = config.server.expect("server block for URL build");
        assert_eq!(server.url, "https://example.com");
        assert!(server.cleartext);

        let with_archive = BuildRequest::new(
            "Demo App",
            "com.demo.app",
            AssetSource::Archive(vec![0u8; 4]),
        );
        assert!(shell_config(&with_archive).server.is_none());

        let with_nothing = BuildRequest::new("Demo App", "com.demo.app", AssetSource::None);
        assert!(shell_config(&with_nothing).server.is_none());
    }

    #[test]
    fn writes_both_manifests_into_workspace_root() {
        let temp = TempDir::new().unwrap();
        let workspace = WorkspaceRoot::new(temp.path())
            .acquire("com.demo.app-20-0")
            .unwrap();
        let request = BuildRequest::new(
            "Demo App",
            "com.demo.app",
            AssetSource::Url("example.com".into()),
        )
        .with_primary_color("#112233");

        write_manifests(&request, &workspace).unwrap();

        let package: serde_json::Value = serde_json::from_slice(
            &fs::read(workspace.root().join("package.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(package["name"], "demo-app");
        assert_eq!(package["version"], "1.0.0");
        assert_eq!(package["dependencies"]["@capacitor/core"], "^5.0.0");

        let config: serde_json::Value = serde_json::from_slice(
            &fs::read(workspace.root().join("capacitor.config.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(config["appId"], "com.demo.app");
        assert_eq!(config["appName"], "Demo App");
        assert_eq!(config["webDir"], "www");
        assert_eq!(config["bundledWebRuntime"], false);
        assert_eq!(config["server"]["url"], "https://example.com");
        assert_eq!(config["server"]["cleartext"], true);
        assert_eq!(config["plugins"]["SplashScreen"]["backgroundColor"], "#112233");
        assert_eq!(config["plugins"]["SplashScreen"]["launchShowDuration"], 3000);
        assert_eq!(config["plugins"]["SplashScreen"]["showSpinner"], true);
    }

    #[test]
    fn identical_requests_produce_byte_identical_manifests() {
        let temp = TempDir::new().unwrap();
        let root = WorkspaceRoot::new(temp.path());
        let request = BuildRequest::new(
            "Demo App",
            "com.demo.app",
            AssetSource::Url("example.com".into()),
        );

        let a = root.acquire("com.demo.app-20-1").unwrap();
        let b = root.acquire("com.demo.app-20-2").unwrap();
        write_manifests(&request, &a).unwrap();
        write_manifests(&request, &b).unwrap();

        for name in ["package.json", "capacitor.config.json"] {
            assert_eq!(
                fs::read(a.root().join(name)).unwrap(),
                fs::read(b.root().join(name)).unwrap()
            );
        }
    }
}
