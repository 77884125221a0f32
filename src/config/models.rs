//! Model ids accepted by `copilot --model`

// Claude models
pub const CLAUDE_SONNET_4_5: &str = "claude-sonnet-4.5";
pub const CLAUDE_HAIKU_4_5: &str = "claude-haiku-4.5";
pub const CLAUDE_OPUS_4_5: &str = "claude-opus-4.5";
pub const CLAUDE_SONNET_4: &str = "claude-sonnet-4";

// GPT Codex models
pub const GPT_5_2_CODEX: &str = "gpt-5.2-codex";
pub const GPT_5_1_CODEX_MAX: &str = "gpt-5.1-codex-max";
pub const GPT_5_1_CODEX: &str = "gpt-5.1-codex";
pub const GPT_5_1_CODEX_MINI: &str = "gpt-5.1-codex-mini";

// GPT models
pub const GPT_5_2: &str = "gpt-5.2";
pub const GPT_5_1: &str = "gpt-5.1";
pub const GPT_5: &str = "gpt-5";
pub const GPT_5_MINI: &str = "gpt-5-mini";
pub const GPT_4_1: &str = "gpt-4.1";

// Gemini models
pub const GEMINI_3_PRO_PREVIEW: &str = "gemini-3-pro-preview";

/// Every known model id
pub const ALL: &[&str] = &[
    CLAUDE_SONNET_4_5,
    CLAUDE_HAIKU_4_5,
    CLAUDE_OPUS_4_5,
    CLAUDE_SONNET_4,
    GPT_5_2_CODEX,
    GPT_5_1_CODEX_MAX,
    GPT_5_1_CODEX,
    GPT_5_1_CODEX_MINI,
    GPT_5_2,
    GPT_5_1,
    GPT_5,
    GPT_5_MINI,
    GPT_4_1,
    GEMINI_3_PRO_PREVIEW,
];

/// Whether `model` is one of the ids above. The CLI may accept others.
pub fn is_known(model: &str) -> bool {
    ALL.contains(&model)
}
