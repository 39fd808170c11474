use crossterm::tty::IsTty;
use inquire::error::{InquireError, InquireResult};
use inquire::ui::{Attributes, RenderConfig, StyleSheet, Styled};

use super::TERMINAL_STDERR;

/// Set to `1` to never prompt, e.g. in scripts that run under a terminal.
const NO_PROMPT_VAR: &str = "_SHOPCTL_NO_PROMPT";

#[derive(Debug, Clone)]
pub struct Confirm {
    pub default: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Dialog<'a, Type> {
    pub message: &'a str,
    pub help_message: Option<&'a str>,
    pub typed: Type,
}

impl Dialog<'_, Confirm> {
    pub async fn prompt(self) -> InquireResult<bool> {
        let message = self.message.to_owned();
        let help_message: Option<String> = self.help_message.map(ToOwned::to_owned);
        let default = self.typed.default;

        tokio::task::spawn_blocking(move || {
            let _stderr_lock = TERMINAL_STDERR.lock();

            let mut dialog = inquire::Confirm::new(&message).with_render_config(shopctl_theme());

            if let Some(default) = default {
                dialog = dialog.with_default(default);
            }

            if let Some(ref help_message) = help_message {
                dialog = dialog.with_help_message(help_message);
            }

            dialog.prompt()
        })
        .await
        .map_err(|err| InquireError::Custom(Box::new(err)))?
    }
}

impl Dialog<'_, ()> {
    /// True if stderr, stdin and stdout are ttys
    pub fn can_prompt() -> bool {
        if std::env::var(NO_PROMPT_VAR).is_ok_and(|v| v == "1") {
            return false;
        }
        std::io::stderr().is_tty() && std::io::stdin().is_tty() && std::io::stdout().is_tty()
    }
}

pub fn shopctl_theme() -> RenderConfig<'static> {
    let mut render_config = RenderConfig::default_colored();
    render_config.answered_prompt_prefix = Styled::new(">");
    render_config.prompt_prefix = Styled::new("!");
    render_config.prompt = StyleSheet::new().with_attr(Attributes::BOLD);
    render_config
}
