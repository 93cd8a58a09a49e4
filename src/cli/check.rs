//! Configuration check command.
//!
//! Loading the config already ran field validation, so this builds the
//! registry to surface conflicts that only appear at registration time.

use anyhow::{Context, Result};

use crate::{config::AssetlineConfig, log, registry, utils::plural_count_with};

pub fn run(config: &AssetlineConfig) -> Result<()> {
    let registry = registry::builtin(config).context("Capability registration failed")?;

    let source = config
        .config_path
        .as_ref()
        .map_or_else(|| "defaults".to_string(), |p| p.display().to_string());
    log!("ok"; "{} registered from {}", registration_summary(registry.len()), source);
    Ok(())
}

fn registration_summary(count: usize) -> String {
    plural_count_with(count, "capability", "capabilities")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_check_defaults() {
        run(&test_parse_config("")).unwrap();
    }

    #[test]
    fn test_registration_summary() {
        assert_eq!(registration_summary(1), "1 capability");
        assert_eq!(registration_summary(4), "4 capabilities");
    }

    #[test]
    fn test_check_reports_duplicate() {
        let config = test_parse_config(
            r#"
[[converter]]
name = "dart-sass"
extension = ".scss"
target = ".css"
command = ["sass", "--stdin"]
"#,
        );
        let err = run(&config).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("Capability registration failed"));
        assert!(message.contains("`dart-sass` conflicts with `scss`"));
    }
}
