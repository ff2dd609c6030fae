use dialoguer::Input;
use planview_core::select::{parse_choice, Selector};
use std::io::IsTerminal;

/// Numbered menu on stderr, answer typed on stdin.
///
/// On a terminal the answer goes through a dialoguer prompt; when stdin is
/// piped a single line is read instead so scripted runs still work.
pub struct PromptSelector;

impl Selector for PromptSelector {
    fn choose(&self, prompt: &str, options: &[String]) -> planview_core::Result<usize> {
        eprintln!("{prompt} options:");
        for (i, option) in options.iter().enumerate() {
            eprintln!("{}. {}", i + 1, option);
        }

        let question = format!(
            "Choose a {} by entering the corresponding number",
            prompt.to_lowercase()
        );
        let answer = if std::io::stdin().is_terminal() {
            Input::<String>::new()
                .with_prompt(question)
                .interact_text()
                .map_err(|e| std::io::Error::other(e.to_string()))?
        } else {
            eprint!("{question}: ");
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            eprintln!();
            line
        };
        parse_choice(&answer, options.len())
    }
}
