use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    stagekit completions bash > ~/.bash_completion.d/stagekit\n\n\
                  Generate zsh completions:\n    stagekit completions zsh > ~/.zfunc/_stagekit\n\n\
                  Generate fish completions:\n    stagekit completions fish > ~/.config/fish/completions/stagekit.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
