//! Shell completions command

use clap::{CommandFactory, ValueEnum};
use clap_complete::Shell;

use crate::cli::CompletionsArgs;
use crate::error::{Result, config};

fn parse_shell(name: &str) -> Result<Shell> {
    if name.eq_ignore_ascii_case("pwsh") {
        return Ok(Shell::PowerShell);
    }
    Shell::from_str(name, true).map_err(|_| {
        config::invalid(format!(
            "Unknown shell '{name}'. Supported shells: bash, elvish, fish, powershell, zsh"
        ))
    })
}

/// Generate shell completions
pub fn run(args: CompletionsArgs) -> Result<()> {
    let shell = parse_shell(&args.shell)?;
    let mut cmd = <crate::cli::Cli as CommandFactory>::command();
    clap_complete::generate(shell, &mut cmd, "stagekit", &mut std::io::stdout().lock());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shell_names() {
        assert_eq!(parse_shell("bash").unwrap(), Shell::Bash);
        assert_eq!(parse_shell("Zsh").unwrap(), Shell::Zsh);
        assert_eq!(parse_shell("pwsh").unwrap(), Shell::PowerShell);
        assert_eq!(parse_shell("POWERSHELL").unwrap(), Shell::PowerShell);
    }

    #[test]
    fn test_unknown_shell() {
        assert!(parse_shell("tcsh").is_err());
    }

    #[test]
    fn test_completions_fish() {
        let args = CompletionsArgs {
            shell: "fish".to_string(),
        };
        assert!(run(args).is_ok());
    }
}
