//! Tab completion over static and slash commands.

use super::session::is_command_query;
use crate::command::Command;
use crate::constants::COMMAND_PREFIX;

/// Resolve the text a Tab press should put into the query field.
///
/// A highlighted value that exactly matches a command label (static
/// commands first, then slash commands) wins. Otherwise the first label that
/// starts with the query is used, looked up among slash commands in command
/// mode and among static commands otherwise. In command mode the leading `/`
/// is not part of the prefix, so `/cre` completes `Create Project`.
/// Comparisons ignore case.
pub fn resolve_completion(
    query: &str,
    active_value: &str,
    static_commands: &[Command],
    slash_commands: &[Command],
) -> Option<String> {
    if !active_value.is_empty() {
        let active = active_value.to_lowercase();
        let exact = static_commands
            .iter()
            .chain(slash_commands.iter())
            .find(|command| command.label.to_lowercase() == active);
        if let Some(command) = exact {
            return Some(command.label.clone());
        }
    }

    if query.is_empty() {
        return None;
    }

    let raw = query.to_lowercase();
    let (pool, prefix) = if is_command_query(query) {
        (slash_commands, raw.trim_start_matches(COMMAND_PREFIX).to_string())
    } else {
        (static_commands, raw.clone())
    };
    if prefix.is_empty() {
        return None;
    }

    pool.iter()
        .find(|command| {
            let label = command.label.to_lowercase();
            label.starts_with(&prefix) || label.starts_with(&raw)
        })
        .map(|command| command.label.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands(labels: &[&str]) -> Vec<Command> {
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| Command::new(format!("cmd-{i}"), *label, || {}))
            .collect()
    }

    #[test]
    fn test_active_value_exact_match() {
        let statics = commands(&["Open Settings", "Open Profile"]);
        let completed = resolve_completion("op", "open settings", &statics, &[]);
        assert_eq!(completed.as_deref(), Some("Open Settings"));
    }

    #[test]
    fn test_static_wins_over_slash_for_active_value() {
        let statics = commands(&["Deploy"]);
        let slash = commands(&["deploy"]);
        assert_eq!(resolve_completion("", "DEPLOY", &statics, &slash).as_deref(), Some("Deploy"));
    }

    #[test]
    fn test_prefix_lookup_uses_static_commands_outside_command_mode() {
        let statics = commands(&["Dashboard", "Documents"]);
        let slash = commands(&["Do Something"]);
        assert_eq!(resolve_completion("doc", "", &statics, &slash).as_deref(), Some("Documents"));
    }

    #[test]
    fn test_unmatched_active_value_falls_back_to_prefix() {
        let statics = commands(&["Reports"]);
        assert_eq!(resolve_completion("rep", "Algebra", &statics, &[]).as_deref(), Some("Reports"));
    }

    #[test]
    fn test_command_mode_prefix_ignores_slash() {
        let statics = commands(&["Create Invoice"]);
        let slash = commands(&["Clear Cache", "Create Project"]);
        assert_eq!(resolve_completion("/cre", "", &statics, &slash).as_deref(), Some("Create Project"));
        assert_eq!(resolve_completion("/", "", &statics, &slash), None);
    }

    #[test]
    fn test_no_completion() {
        let statics = commands(&["Reports"]);
        assert_eq!(resolve_completion("", "", &statics, &[]), None);
        assert_eq!(resolve_completion("zzz", "", &statics, &[]), None);
    }
}
