//! Terraform output classification.
//!
//! Each verb has an ordered list of signatures, regular expressions tuned to
//! one of terraform's English failure messages. Output is checked against the
//! list in order and the first signature that matches wins. When none do, a
//! generic `Error: ...` line is reported with [`ErrorCode::Default`].

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::bytes::Regex;
use tracing::debug;

use crate::codes::{ErrorCode, Verb};
use crate::error::CommandError;

/// Signatures for `terraform init`, in match order.
const INIT_SIGNATURES: &[(ErrorCode, &str)] = &[
    (
        ErrorCode::CopyNotEmpty,
        r"The working directory already contains files",
    ),
    (
        ErrorCode::ProviderNotFound,
        r#"Provider "(.*)" not available for installation"#,
    ),
    (
        ErrorCode::DiscoveryUnreachable,
        r"Registry service unreachable",
    ),
    (
        ErrorCode::ProviderVersionsUnsuitable,
        r#"No provider "(.*)" plugins meet the constraint "(.*)""#,
    ),
    (
        ErrorCode::ProviderIncompatible,
        r#"Provider "(.*)" (.*) is not compatible with Terraform (.*)"#,
    ),
    (
        ErrorCode::ProviderInstallError,
        r#"Error installing provider "(.*)": (.*)"#,
    ),
    (
        ErrorCode::MissingProvidersNoInstall,
        "The following provider constraints are not met by the currently-installed\n\
         provider plugins:\n\
         \n\
         (.*)",
    ),
    (
        ErrorCode::ChecksumVerification,
        r#"Error verifying checksum for provider "(.*)""#,
    ),
    (
        ErrorCode::SignatureVerification,
        r#"Error verifying GPG signature for provider "(.*)""#,
    ),
];

/// Signatures for `terraform plan` and `terraform apply`, in match order.
const PLAN_SIGNATURES: &[(ErrorCode, &str)] = &[
    (
        ErrorCode::InvalidResourceType,
        "The provider (.*) does not support resource type\n\"(.*)\"\\.",
    ),
    (
        ErrorCode::CouldNotSatisfyPluginRequirements,
        "provider\\.(.*): no suitable version installed\n  \
         version requirements: \"(.*)\"\n  \
         versions installed: (.*)",
    ),
];

const SHOW_SIGNATURES: &[(ErrorCode, &str)] = &[];

const FALLBACK_SIGNATURE: &str = r"(?-u)Error: (.*)";

type SignatureTable = Vec<(ErrorCode, Regex)>;

// Signatures are compiled with Unicode off so `.` also steps over bytes that
// are not valid UTF-8.
fn compile(signatures: &[(ErrorCode, &str)]) -> SignatureTable {
    signatures
        .iter()
        .map(|(code, pattern)| {
            let regex = Regex::new(&format!("(?-u){}", pattern))
                .unwrap_or_else(|e| panic!("invalid signature for {}: {}", code, e));
            (*code, regex)
        })
        .collect()
}

fn init_table() -> &'static SignatureTable {
    static TABLE: OnceLock<SignatureTable> = OnceLock::new();
    TABLE.get_or_init(|| compile(INIT_SIGNATURES))
}

fn plan_table() -> &'static SignatureTable {
    static TABLE: OnceLock<SignatureTable> = OnceLock::new();
    TABLE.get_or_init(|| compile(PLAN_SIGNATURES))
}

fn show_table() -> &'static SignatureTable {
    static TABLE: OnceLock<SignatureTable> = OnceLock::new();
    TABLE.get_or_init(|| compile(SHOW_SIGNATURES))
}

fn fallback_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(FALLBACK_SIGNATURE).expect("Invalid fallback error regex"))
}

/// Ordered signature table for a verb. Apply shares the plan table.
pub fn signatures(verb: Verb) -> &'static [(ErrorCode, Regex)] {
    match verb {
        Verb::Init => init_table(),
        Verb::Plan | Verb::Apply => plan_table(),
        Verb::Show => show_table(),
    }
}

/// Drop one trailing `.` from a matched message, ignoring a CRLF `\r`.
fn strip_period(text: Cow<'_, str>) -> String {
    let line = text.strip_suffix('\r').unwrap_or(&text);
    line.strip_suffix('.').unwrap_or(line).to_string()
}

/// Classify raw terraform output for `verb`.
///
/// Returns `None` when the output carries no recognizable error, which
/// includes failures phrased in a way no signature knows about.
pub fn classify(output: &[u8], verb: Verb) -> Option<CommandError> {
    for (code, regex) in signatures(verb) {
        if let Some(m) = regex.find(output) {
            debug!("terraform {} output matched signature {}", verb, code);
            let reason = strip_period(String::from_utf8_lossy(m.as_bytes()));
            return Some(CommandError::new(verb, *code, reason));
        }
    }

    let captures = fallback_regex().captures(output)?;
    let reason = captures
        .get(1)
        .map(|m| strip_period(String::from_utf8_lossy(m.as_bytes())))
        .unwrap_or_default();
    debug!("terraform {} output fell back to default error", verb);
    Some(CommandError::new(verb, ErrorCode::Default, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason_and_code(output: &str, verb: Verb) -> Option<(String, ErrorCode)> {
        classify(output.as_bytes(), verb).map(|e| (e.reason, e.code))
    }

    #[test]
    fn test_all_tables_compile() {
        for verb in Verb::ALL {
            let _ = signatures(verb);
        }
        assert_eq!(signatures(Verb::Init).len(), 9);
        assert_eq!(signatures(Verb::Apply).len(), 2);
        assert!(signatures(Verb::Show).is_empty());
    }

    #[test]
    fn test_no_error_markers() {
        let output = "Terraform has been successfully initialized!\n";
        for verb in Verb::ALL {
            assert_eq!(classify(output.as_bytes(), verb), None);
        }
    }

    #[test]
    fn test_strips_only_one_period() {
        assert_eq!(
            reason_and_code("Error: wait for it...\n", Verb::Plan),
            Some(("wait for it..".to_string(), ErrorCode::Default))
        );
    }

    #[test]
    fn test_fallback_without_trailing_period() {
        assert_eq!(
            reason_and_code("\nError: no suitable version is available\n", Verb::Show),
            Some(("no suitable version is available".to_string(), ErrorCode::Default))
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(
            reason_and_code("Error: something wrong happened.\r\n", Verb::Plan),
            Some(("something wrong happened".to_string(), ErrorCode::Default))
        );
        assert_eq!(
            reason_and_code(
                "Error installing provider \"aws\": checksum mismatch.\r\n",
                Verb::Init
            ),
            Some((
                "Error installing provider \"aws\": checksum mismatch".to_string(),
                ErrorCode::ProviderInstallError
            ))
        );
    }

    #[test]
    fn test_fallback_takes_first_error_line() {
        let output = "Error: first problem.\n\nError: second problem.\n";
        assert_eq!(
            reason_and_code(output, Verb::Apply),
            Some(("first problem".to_string(), ErrorCode::Default))
        );
    }

    #[test]
    fn test_table_order_breaks_ties() {
        // Matches both provider-not-found and the generic fallback.
        let output = "Error: boom.\nProvider \"x\" not available for installation.\n";
        let err = classify(output.as_bytes(), Verb::Init).unwrap();
        assert_eq!(err.code, ErrorCode::ProviderNotFound);
    }

    #[test]
    fn test_verb_is_recorded() {
        let err = classify(b"Error: oops.", Verb::Apply).unwrap();
        assert_eq!(err.verb, Verb::Apply);
    }

    #[test]
    fn test_invalid_utf8_is_tolerated() {
        let err = classify(b"Error: bad \xff byte.\n", Verb::Plan).unwrap();
        assert_eq!(err.reason, "bad \u{fffd} byte");
    }
}
