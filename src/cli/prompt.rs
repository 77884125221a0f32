//! Prompt command implementation

use anyhow::Result;
use futures::StreamExt;
use std::io::Write;

use copilot_agent::agent::ReconcilePolicy;
use copilot_agent::config::{ClientConfig, Settings, models};
use copilot_agent::{CopilotClient, CopilotResponse, StreamChunkKind};

/// Flags of `copilot-agent prompt`
pub struct PromptArgs {
    pub text: String,
    pub model: Option<String>,
    pub resume: Option<String>,
    pub continue_last: bool,
    pub allow_all: bool,
    pub stream: bool,
    pub json: bool,
}

/// Settings file defaults with command-line flags applied on top
fn client_config(settings: &Settings, args: &PromptArgs) -> ClientConfig {
    let mut config = settings.client.clone();

    if let Some(model) = args.model.as_ref() {
        config.model = Some(model.clone());
    }
    if let Some(session_id) = args.resume.as_ref() {
        config.session_id = Some(session_id.clone());
        config.continue_last_session = false;
    } else if args.continue_last {
        config.session_id = None;
        config.continue_last_session = true;
    }
    if args.allow_all {
        config.allow_all = true;
    }
    config.session_dir = settings.session_store();

    config
}

/// Send one prompt and print the result
pub async fn prompt_command(settings: &Settings, args: PromptArgs) -> Result<()> {
    let config = client_config(settings, &args);

    if let Some(model) = config.model.as_deref() {
        if !models::is_known(model) {
            tracing::warn!("Unknown model '{}', passing it through to the CLI", model);
        }
    }

    let mut client =
        CopilotClient::new(config)?.with_reconcile_policy(ReconcilePolicy::from(&settings.session));

    if args.stream {
        let mut stream = client.prompt_stream(&args.text)?;
        while let Some(chunk) = stream.next().await {
            match chunk.kind {
                StreamChunkKind::Stdout => {
                    print!("{}", chunk.data);
                    std::io::stdout().flush()?;
                }
                StreamChunkKind::Stderr => eprint!("{}", chunk.data),
            }
        }
        let response = stream.finish().await?;
        println!();
        print_footer(&response);
        return Ok(());
    }

    let response = client.prompt(&args.text).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("{}", response.output);
    print_footer(&response);

    Ok(())
}

/// Session and usage summary, on stderr so stdout stays the answer
fn print_footer(response: &CopilotResponse) {
    eprintln!();
    if response.session_id.is_empty() {
        eprintln!("Session: (unknown)");
    } else {
        eprintln!("Session: {}", response.session_id);
    }

    let usage = &response.usage;
    if !usage.model.is_empty() {
        eprintln!(
            "Model: {} | {} in, {} out, {} cached | {} premium request(s)",
            usage.model,
            usage.input_tokens,
            usage.output_tokens,
            usage.cache_read_tokens,
            usage.premium_requests
        );
    }
    if response.duration.wall_seconds > 0.0 {
        eprintln!(
            "Duration: {:.1}s wall, {:.1}s API",
            response.duration.wall_seconds, response.duration.api_seconds
        );
    }
    let changes = &response.code_changes;
    if changes.lines_added > 0 || changes.lines_removed > 0 {
        eprintln!(
            "Changes: +{} -{}",
            changes.lines_added, changes.lines_removed
        );
    }
}
