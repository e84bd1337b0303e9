//! Typed results of the terraform verbs.

use serde::{Deserialize, Serialize};

use crate::error::{CommandError, IacError, IacResult};
use crate::providers::Provider;

/// Output of `terraform init`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitOutput {
    pub raw: String,
    pub exit_code: i32,
    pub providers: Vec<Provider>,
    pub error: Option<CommandError>,
}

/// Output of `terraform plan`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanOutput {
    pub raw: String,
    pub exit_code: i32,
    pub error: Option<CommandError>,
}

/// Output of `terraform apply`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyOutput {
    pub raw: String,
    pub exit_code: i32,
    pub error: Option<CommandError>,
}

/// Output of `terraform show`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowOutput {
    pub raw: String,
    pub exit_code: i32,
    /// Decoded JSON plan, when the output was JSON
    pub plan: Option<ShowPlan>,
    pub error: Option<CommandError>,
}

/// The parts of `terraform show -json` that terralib decodes.
///
/// The nested documents are kept opaque.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShowPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terraform_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_values: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_changes: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<serde_json::Value>,
}

/// Behavior shared by every verb's output.
pub trait CommandOutput: Sized {
    /// Raw combined output of the command.
    fn raw(&self) -> &str;

    /// Exit code of the terraform process.
    fn exit_code(&self) -> i32;

    /// Error recognized in the output, if any.
    fn error(&self) -> Option<&CommandError>;

    fn take_error(&mut self) -> Option<CommandError>;

    /// True when no error was recognized.
    ///
    /// A non-zero exit with unfamiliar wording also counts as success here;
    /// check [`CommandOutput::exit_code`] or enable strict exit checking to
    /// catch those.
    fn is_success(&self) -> bool {
        self.error().is_none()
    }

    /// Turn a recognized error into `Err`.
    fn into_result(mut self) -> IacResult<Self> {
        match self.take_error() {
            Some(err) => Err(IacError::Command(err)),
            None => Ok(self),
        }
    }
}

macro_rules! impl_command_output {
    ($($ty:ty),+) => {
        $(
            impl CommandOutput for $ty {
                fn raw(&self) -> &str {
                    &self.raw
                }

                fn exit_code(&self) -> i32 {
                    self.exit_code
                }

                fn error(&self) -> Option<&CommandError> {
                    self.error.as_ref()
                }

                fn take_error(&mut self) -> Option<CommandError> {
                    self.error.take()
                }
            }
        )+
    };
}

impl_command_output!(InitOutput, PlanOutput, ApplyOutput, ShowOutput);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::{ErrorCode, Verb};

    #[test]
    fn test_into_result_splits_on_error() {
        let ok = PlanOutput {
            raw: "No changes.".to_string(),
            exit_code: 0,
            error: None,
        };
        assert!(ok.is_success());
        assert!(ok.into_result().is_ok());

        let failed = PlanOutput {
            raw: "Error: boom.".to_string(),
            exit_code: 1,
            error: Some(CommandError::new(Verb::Plan, ErrorCode::Default, "boom")),
        };
        assert!(!failed.is_success());
        match failed.into_result() {
            Err(IacError::Command(err)) => assert_eq!(err.reason, "boom"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_show_plan_ignores_unknown_fields() {
        let plan: ShowPlan = serde_json::from_str(
            r#"{"format_version":"0.1","terraform_version":"0.12.24","variables":{},"planned_values":{"root_module":{}}}"#,
        )
        .unwrap();

        assert_eq!(plan.format_version.as_deref(), Some("0.1"));
        assert_eq!(plan.terraform_version.as_deref(), Some("0.12.24"));
        assert!(plan.planned_values.is_some());
        assert!(plan.resource_changes.is_none());
    }
}
