//! Provider extraction from `terraform init` output.

use serde::{Deserialize, Serialize};

/// Line prefix terraform prints for every provider it downloads.
pub const DOWNLOAD_PREFIX: &str = "- Downloading plugin for provider";

/// A provider reported by `terraform init`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Provider name, e.g. `azurerm`
    pub name: String,
    /// Registry path, e.g. `hashicorp/azurerm`
    pub path: String,
    /// Downloaded version, e.g. `2.2.0`
    pub version: String,
}

/// Collect the providers downloaded during `terraform init`, in output order.
///
/// Lines that carry the download prefix but not the expected
/// `"<name>" (<path>) <version>...` layout still yield a record, with the
/// fields that could not be read left empty.
pub fn extract_providers(output: &[u8]) -> Vec<Provider> {
    String::from_utf8_lossy(output)
        .lines()
        .filter_map(|line| line.strip_prefix(DOWNLOAD_PREFIX))
        .map(parse_download_line)
        .collect()
}

/// Parse the part of a download line after the prefix.
fn parse_download_line(rest: &str) -> Provider {
    let mut provider = Provider::default();

    let Some((name, remainder)) = take_quoted(rest.trim_start()) else {
        return provider;
    };
    provider.name = name.to_string();

    let mut tokens = remainder.split_whitespace();
    if let Some(path) = tokens.next() {
        provider.path = path.trim_matches(|c| c == '(' || c == ')').to_string();
    }
    if let Some(version) = tokens.next() {
        provider.version = version.strip_suffix("...").unwrap_or(version).to_string();
    }

    provider
}

/// Split `"quoted" rest` into (`quoted`, ` rest`).
fn take_quoted(s: &str) -> Option<(&str, &str)> {
    let inner = s.strip_prefix('"')?;
    let end = inner.find('"')?;
    Some((&inner[..end], &inner[end + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUCCESS_WITH_PROVIDERS: &str = r#"
Initializing the backend...

Initializing provider plugins...
- Checking for available provider plugins...
- Downloading plugin for provider "azurerm" (hashicorp/azurerm) 2.2.0...
- Downloading plugin for provider "random" (hashicorp/random) 2.2.1...

The following providers do not have any version constraints in configuration,
so the latest version was installed.

* provider.random: version = "~> 2.2"

Terraform has been successfully initialized!
"#;

    fn provider(name: &str, path: &str, version: &str) -> Provider {
        Provider {
            name: name.to_string(),
            path: path.to_string(),
            version: version.to_string(),
        }
    }

    #[test]
    fn test_extracts_providers_in_order() {
        let providers = extract_providers(SUCCESS_WITH_PROVIDERS.as_bytes());
        assert_eq!(
            providers,
            vec![
                provider("azurerm", "hashicorp/azurerm", "2.2.0"),
                provider("random", "hashicorp/random", "2.2.1"),
            ]
        );
    }

    #[test]
    fn test_ignores_other_lines() {
        let output = "- Checking for available provider plugins...\n\
                      Downloading plugin for provider \"AWS\" (hashicorp/aws) 2.31.0...\n";
        assert!(extract_providers(output.as_bytes()).is_empty());
    }

    #[test]
    fn test_handles_crlf_line_endings() {
        let output = "- Downloading plugin for provider \"aws\" (hashicorp/aws) 2.31.0...\r\n";
        assert_eq!(
            extract_providers(output.as_bytes()),
            vec![provider("aws", "hashicorp/aws", "2.31.0")]
        );
    }

    #[test]
    fn test_malformed_line_degrades_to_empty_fields() {
        let output = "- Downloading plugin for provider azurerm\n\
                      - Downloading plugin for provider \"random\"\n\
                      - Downloading plugin for provider \"null\" (hashicorp/null)\n";
        assert_eq!(
            extract_providers(output.as_bytes()),
            vec![
                Provider::default(),
                provider("random", "", ""),
                provider("null", "hashicorp/null", ""),
            ]
        );
    }

    #[test]
    fn test_version_without_ellipsis_is_kept() {
        let output = "- Downloading plugin for provider \"random\" (hashicorp/random) 2.2.1\n";
        assert_eq!(
            extract_providers(output.as_bytes()),
            vec![provider("random", "hashicorp/random", "2.2.1")]
        );
    }
}
