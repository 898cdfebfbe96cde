use super::schema::Config;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref pattern) = config.pattern {
        if pattern.trim().is_empty() {
            errors.push("pattern: must not be empty".to_string());
        } else if let Err(e) = glob::Pattern::new(pattern) {
            errors.push(format!("pattern: invalid '{}' - {}", pattern, e));
        } else if pattern.contains('/') {
            errors.push(format!(
                "pattern: '{}' must be a file name pattern; use input_dir for the directory",
                pattern
            ));
        }
    }

    if let Some(ref aliases) = config.division_aliases {
        for (from, to) in aliases {
            if from.trim().is_empty() {
                errors.push("division_aliases: alias key must not be empty".to_string());
            }
            if to.trim().is_empty() {
                errors.push(format!("division_aliases.{}: target must not be empty", from));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
