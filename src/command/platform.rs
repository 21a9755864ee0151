//! Platform families and the commands each one uses

use std::fmt;

use crate::command::classifier::{AppKind, PowerAction};

/// Host operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    MacOs,
    /// Linux, the BSDs and anything else Unix-like
    Unix,
}

impl Platform {
    /// Family of the machine we were compiled for
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Unix
        }
    }

    /// Command that starts `kind`
    ///
    /// `None` for the browser, which is opened through its home page
    /// rather than by name.
    pub fn app_command(self, kind: AppKind) -> Option<LaunchCommand> {
        let (windows, macos, unix) = match kind {
            AppKind::Browser => return None,
            AppKind::TextEditor => ("notepad", "TextEdit", "gedit"),
            AppKind::Calculator => ("calc", "Calculator", "gnome-calculator"),
            AppKind::MusicPlayer => ("wmplayer", "Music", "rhythmbox"),
        };

        // Started directly, not through a shell, so a missing program is a spawn error
        Some(match self {
            Platform::Windows => LaunchCommand::new(windows, Vec::<String>::new()),
            Platform::MacOs => LaunchCommand::new("open", ["-a", macos]),
            Platform::Unix => LaunchCommand::new(unix, Vec::<String>::new()),
        })
    }

    /// Command that powers the machine off or reboots it
    ///
    /// Windows honours `delay_secs`; other families act immediately.
    pub fn power_command(self, action: PowerAction, delay_secs: u32) -> LaunchCommand {
        let line = match (self, action) {
            (Platform::Windows, PowerAction::Shutdown) => format!("shutdown /s /t {}", delay_secs),
            (Platform::Windows, PowerAction::Restart) => format!("shutdown /r /t {}", delay_secs),
            (_, PowerAction::Shutdown) => "sudo shutdown -h now".to_string(),
            (_, PowerAction::Restart) => "sudo reboot".to_string(),
        };
        LaunchCommand::shell(self, &line)
    }
}

/// A program plus arguments, ready for `std::process::Command`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl LaunchCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Run `line` through the platform's command shell
    pub fn shell(platform: Platform, line: &str) -> Self {
        match platform {
            Platform::Windows => Self::new("cmd", ["/C", line]),
            Platform::MacOs | Platform::Unix => Self::new("sh", ["-c", line]),
        }
    }
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_commands_per_family() {
        assert_eq!(
            Platform::Windows.app_command(AppKind::TextEditor),
            Some(LaunchCommand::new("notepad", Vec::<String>::new()))
        );
        assert_eq!(
            Platform::MacOs.app_command(AppKind::Calculator),
            Some(LaunchCommand::new("open", ["-a", "Calculator"]))
        );
        assert_eq!(
            Platform::Unix.app_command(AppKind::MusicPlayer),
            Some(LaunchCommand::new("rhythmbox", Vec::<String>::new()))
        );
    }

    #[test]
    fn test_app_commands_bypass_the_shell() {
        let kinds = [AppKind::TextEditor, AppKind::Calculator, AppKind::MusicPlayer];
        for platform in [Platform::Windows, Platform::MacOs, Platform::Unix] {
            for kind in kinds {
                let command = platform.app_command(kind).unwrap();
                assert!(
                    command.program != "sh" && command.program != "cmd",
                    "{:?} {:?} -> {}",
                    platform,
                    kind,
                    command
                );
            }
        }
    }

    #[test]
    fn test_browser_has_no_app_command() {
        for platform in [Platform::Windows, Platform::MacOs, Platform::Unix] {
            assert_eq!(platform.app_command(AppKind::Browser), None);
        }
    }

    #[test]
    fn test_power_commands() {
        assert_eq!(
            Platform::Windows.power_command(PowerAction::Shutdown, 5).to_string(),
            "cmd /C shutdown /s /t 5"
        );
        assert_eq!(
            Platform::Windows.power_command(PowerAction::Restart, 30).to_string(),
            "cmd /C shutdown /r /t 30"
        );
        assert_eq!(
            Platform::Unix.power_command(PowerAction::Shutdown, 5).to_string(),
            "sh -c sudo shutdown -h now"
        );
        assert_eq!(
            Platform::MacOs.power_command(PowerAction::Restart, 5).to_string(),
            "sh -c sudo reboot"
        );
    }
}
