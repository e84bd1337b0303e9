//! Command line construction.

use crate::codes::Verb;

/// Build `<binary> <verb> <options...>` joined by single spaces.
///
/// Options are passed through as-is: the line is interpreted by a shell, so
/// quoting is the caller's responsibility.
pub fn format_command<S: AsRef<str>>(binary: &str, verb: Verb, options: &[S]) -> String {
    let options: Vec<&str> = options.iter().map(AsRef::as_ref).collect();
    format!("{} {} {}", binary, verb.as_str(), options.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_command() {
        let options = ["-verify-plugins=true", "-no-color"];
        assert_eq!(
            format_command("terraform", Verb::Init, &options),
            "terraform init -verify-plugins=true -no-color"
        );
    }

    #[test]
    fn test_format_command_without_options_keeps_separator() {
        let options: [&str; 0] = [];
        assert_eq!(format_command("terraform", Verb::Plan, &options), "terraform plan ");
    }

    #[test]
    fn test_format_command_custom_binary() {
        let options = vec!["-no-color".to_string(), "-json".to_string(), "plan.out".to_string()];
        assert_eq!(
            format_command("/opt/tf/terraform", Verb::Show, &options),
            "/opt/tf/terraform show -no-color -json plan.out"
        );
    }
}
