//! Configuration -> Copilot CLI argv

use super::ClientConfig;

/// Build the CLI arguments for one prompt.
///
/// Deterministic for a given config; the prompt is always the final `-p <prompt>` pair.
pub fn build_cli_args(config: &ClientConfig, prompt: &str) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();

    if let Some(model) = config.model.as_deref() {
        push_pair(&mut args, "--model", model);
    }

    if let Some(session_id) = config.session_id.as_deref() {
        push_pair(&mut args, "--resume", session_id);
    } else if config.continue_last_session {
        args.push("--continue".to_string());
    }

    // --allow-all already covers the individual permission flags
    if config.allow_all {
        args.push("--allow-all".to_string());
    } else {
        if config.allow_all_tools {
            args.push("--allow-all-tools".to_string());
        }
        if config.allow_all_paths {
            args.push("--allow-all-paths".to_string());
        }
        if config.allow_all_urls {
            args.push("--allow-all-urls".to_string());
        }
    }

    push_each(&mut args, "--allow-tool", &config.allowed_tools);
    push_each(&mut args, "--deny-tool", &config.denied_tools);
    push_each(&mut args, "--allow-url", &config.allowed_urls);
    push_each(&mut args, "--deny-url", &config.denied_urls);
    push_each(&mut args, "--add-dir", &config.additional_dirs);

    if let Some(mcp) = config.additional_mcp_config.as_ref() {
        let value = match mcp {
            serde_json::Value::String(raw) => raw.clone(),
            other => other.to_string(),
        };
        push_pair(&mut args, "--additional-mcp-config", &value);
    }
    if config.disable_builtin_mcps {
        args.push("--disable-builtin-mcps".to_string());
    }
    push_each(&mut args, "--disable-mcp-server", &config.disabled_mcp_servers);

    if config.no_ask_user {
        args.push("--no-ask-user".to_string());
    }
    if config.no_custom_instructions {
        args.push("--no-custom-instructions".to_string());
    }
    if let Some(streaming) = config.streaming {
        push_pair(&mut args, "--stream", if streaming { "on" } else { "off" });
    }
    if config.silent {
        args.push("--silent".to_string());
    }
    if config.no_color {
        args.push("--no-color".to_string());
    }
    if let Some(level) = config.log_level {
        push_pair(&mut args, "--log-level", level.as_str());
    }
    if let Some(log_dir) = config.log_dir.as_deref() {
        push_pair(&mut args, "--log-dir", log_dir);
    }
    if let Some(agent) = config.agent.as_deref() {
        push_pair(&mut args, "--agent", agent);
    }

    push_pair(&mut args, "-p", prompt);
    args
}

fn push_pair(args: &mut Vec<String>, flag: &str, value: &str) {
    args.push(flag.to_string());
    args.push(value.to_string());
}

fn push_each(args: &mut Vec<String>, flag: &str, values: &[String]) {
    for value in values {
        push_pair(args, flag, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    const PROMPT: &str = "Test prompt";

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_prompt_only() {
        let args = build_cli_args(&ClientConfig::default(), PROMPT);
        assert_eq!(args, strings(&["-p", PROMPT]));
    }

    #[test]
    fn test_model_and_resume() {
        let config = ClientConfig {
            model: Some("gpt-5-mini".to_string()),
            session_id: Some("test-session-123".to_string()),
            ..Default::default()
        };
        let args = build_cli_args(&config, PROMPT);
        assert_eq!(
            args,
            strings(&[
                "--model",
                "gpt-5-mini",
                "--resume",
                "test-session-123",
                "-p",
                PROMPT
            ])
        );
    }

    #[test]
    fn test_continue_flag() {
        let config = ClientConfig {
            continue_last_session: true,
            ..Default::default()
        };
        let args = build_cli_args(&config, PROMPT);
        assert_eq!(args[0], "--continue");
    }

    #[test]
    fn test_allow_all_supersedes_individual_flags() {
        let config = ClientConfig {
            allow_all: true,
            allow_all_tools: true,
            allow_all_paths: true,
            ..Default::default()
        };
        let args = build_cli_args(&config, PROMPT);
        assert!(args.contains(&"--allow-all".to_string()));
        assert!(!args.contains(&"--allow-all-tools".to_string()));
        assert!(!args.contains(&"--allow-all-paths".to_string()));
    }

    #[test]
    fn test_individual_permission_flags() {
        let config = ClientConfig {
            allow_all_tools: true,
            allow_all_paths: true,
            allow_all_urls: true,
            ..Default::default()
        };
        let args = build_cli_args(&config, PROMPT);
        assert_eq!(
            &args[..3],
            &strings(&["--allow-all-tools", "--allow-all-paths", "--allow-all-urls"])[..]
        );
    }

    #[test]
    fn test_repeated_flags() {
        let config = ClientConfig {
            allowed_tools: strings(&["shell(git:*)", "write"]),
            denied_tools: strings(&["shell(rm)"]),
            additional_dirs: strings(&["/home/user/projects", "/tmp"]),
            ..Default::default()
        };
        let args = build_cli_args(&config, PROMPT);
        assert_eq!(
            args,
            strings(&[
                "--allow-tool",
                "shell(git:*)",
                "--allow-tool",
                "write",
                "--deny-tool",
                "shell(rm)",
                "--add-dir",
                "/home/user/projects",
                "--add-dir",
                "/tmp",
                "-p",
                PROMPT,
            ])
        );
    }

    #[test]
    fn test_mcp_config_serialization() {
        let object = serde_json::json!({ "server": { "command": "test" } });
        let config = ClientConfig {
            additional_mcp_config: Some(object.clone()),
            ..Default::default()
        };
        let args = build_cli_args(&config, PROMPT);
        let idx = args
            .iter()
            .position(|a| a == "--additional-mcp-config")
            .unwrap();
        assert_eq!(args[idx + 1], object.to_string());

        let config = ClientConfig {
            additional_mcp_config: Some(serde_json::Value::String("{\"raw\":1}".to_string())),
            ..Default::default()
        };
        let args = build_cli_args(&config, PROMPT);
        assert_eq!(args[1], "{\"raw\":1}");
    }

    #[test]
    fn test_behavior_flags() {
        let config = ClientConfig {
            no_ask_user: true,
            no_custom_instructions: true,
            streaming: Some(false),
            silent: true,
            no_color: true,
            log_level: Some(LogLevel::Debug),
            log_dir: Some("/tmp/logs".to_string()),
            agent: Some("reviewer".to_string()),
            ..Default::default()
        };
        let args = build_cli_args(&config, PROMPT);
        assert_eq!(
            args,
            strings(&[
                "--no-ask-user",
                "--no-custom-instructions",
                "--stream",
                "off",
                "--silent",
                "--no-color",
                "--log-level",
                "debug",
                "--log-dir",
                "/tmp/logs",
                "--agent",
                "reviewer",
                "-p",
                PROMPT,
            ])
        );
    }

    #[test]
    fn test_prompt_always_last() {
        let config = ClientConfig {
            model: Some("gpt-5-mini".to_string()),
            allow_all: true,
            disabled_mcp_servers: strings(&["github"]),
            ..Default::default()
        };
        let args = build_cli_args(&config, PROMPT);
        assert_eq!(args[args.len() - 2], "-p");
        assert_eq!(args[args.len() - 1], PROMPT);
    }
}
