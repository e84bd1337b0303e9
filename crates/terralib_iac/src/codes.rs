//! Terraform verbs and the closed set of error codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A terraform subcommand supported by terralib.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Init,
    Plan,
    Apply,
    Show,
}

impl Verb {
    pub const ALL: [Verb; 4] = [Verb::Init, Verb::Plan, Verb::Apply, Verb::Show];

    /// Token passed to the terraform binary.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Plan => "plan",
            Self::Apply => "apply",
            Self::Show => "show",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verb::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("unknown verb '{}' (expected init, plan, apply or show)", s))
    }
}

/// Label attached to a classified terraform failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCode {
    // init
    CopyNotEmpty,
    ProviderNotFound,
    DiscoveryUnreachable,
    ProviderVersionsUnsuitable,
    ProviderIncompatible,
    ProviderInstallError,
    MissingProvidersNoInstall,
    ChecksumVerification,
    SignatureVerification,

    // plan / apply
    InvalidResourceType,
    CouldNotSatisfyPluginRequirements,

    /// Generic `Error: ...` line that no signature recognized.
    Default,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CopyNotEmpty => "copy-not-empty",
            Self::ProviderNotFound => "provider-not-found",
            Self::DiscoveryUnreachable => "discovery-unreachable",
            Self::ProviderVersionsUnsuitable => "provider-versions-unsuitable",
            Self::ProviderIncompatible => "provider-incompatible",
            Self::ProviderInstallError => "provider-install-error",
            Self::MissingProvidersNoInstall => "missing-providers-no-install",
            Self::ChecksumVerification => "checksum-verification",
            Self::SignatureVerification => "signature-verification",
            Self::InvalidResourceType => "invalid-resource-type",
            Self::CouldNotSatisfyPluginRequirements => "could-not-satisfy-plugin-requirements",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_round_trips_through_str() {
        for verb in Verb::ALL {
            assert_eq!(verb.as_str().parse::<Verb>().unwrap(), verb);
        }
        assert!("destroy".parse::<Verb>().is_err());
    }

    #[test]
    fn test_error_code_serde_uses_label() {
        let json = serde_json::to_string(&ErrorCode::CouldNotSatisfyPluginRequirements).unwrap();
        assert_eq!(json, "\"could-not-satisfy-plugin-requirements\"");

        let code: ErrorCode = serde_json::from_str("\"provider-not-found\"").unwrap();
        assert_eq!(code, ErrorCode::ProviderNotFound);
        assert_eq!(code.to_string(), "provider-not-found");
    }
}
