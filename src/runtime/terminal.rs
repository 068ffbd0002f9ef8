use crate::executor::CommandBuilder;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
enum Launcher {
    /// `<terminal> <args...> <program> <argv...>`
    Argv(&'static [&'static str]),
    /// `<terminal> <args...> "<program> <argv...>"`
    Line(&'static [&'static str]),
}

lazy_static! {
    static ref TERMINALS: HashMap<&'static str, Launcher> = HashMap::from([
        ("xterm", Launcher::Argv(&["-e"])),
        ("konsole", Launcher::Argv(&["-e"])),
        ("kitty", Launcher::Argv(&[])),
        ("gnome-terminal", Launcher::Argv(&["--"])),
        ("xfce4-terminal", Launcher::Line(&["--command"])),
        ("mate-terminal", Launcher::Line(&["--command"])),
    ]);
}

pub fn is_known_terminal(terminal: &str) -> bool {
    lookup(terminal).is_some()
}

fn lookup(terminal: &str) -> Option<Launcher> {
    let name = Path::new(terminal).file_name()?.to_str()?;
    TERMINALS.get(name).copied()
}

/// Run `command` inside `terminal`. Unknown terminals leave the command
/// untouched and return `false`.
pub fn wrap_in_terminal(command: &mut CommandBuilder, terminal: &str) -> bool {
    match lookup(terminal) {
        Some(Launcher::Argv(args)) => {
            command.wrap(terminal, args);
            true
        }
        Some(Launcher::Line(args)) => {
            command.wrap_as_line(terminal, args);
            true
        }
        None => {
            log::debug!("Unknown terminal {terminal}, running without it");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("xterm", "xterm -e /opt/wine/bin/wine cmd")]
    #[case("/usr/bin/konsole", "/usr/bin/konsole -e /opt/wine/bin/wine cmd")]
    #[case("gnome-terminal", "gnome-terminal -- /opt/wine/bin/wine cmd")]
    #[case("kitty", "kitty /opt/wine/bin/wine cmd")]
    #[case("xfce4-terminal", "xfce4-terminal --command '/opt/wine/bin/wine cmd'")]
    fn test_known_terminals(#[case] terminal: &str, #[case] expected: &str) {
        let mut command = CommandBuilder::new("/opt/wine/bin/wine");
        command.arg("cmd");
        assert!(wrap_in_terminal(&mut command, terminal));
        assert_eq!(command.as_command_line(), expected);
    }

    #[test]
    fn test_unknown_terminal_passes_through() {
        let mut command = CommandBuilder::new("/opt/wine/bin/wine");
        command.arg("cmd");
        assert!(!wrap_in_terminal(&mut command, "not-a-terminal"));
        assert_eq!(command.as_command_line(), "/opt/wine/bin/wine cmd");
        assert!(!is_known_terminal("not-a-terminal"));
    }
}
