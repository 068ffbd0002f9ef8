use std::{
    collections::BTreeMap,
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    process::Command,
};

/// Everything needed to launch one subprocess.
///
/// The environment held here is the complete environment of the child: the
/// built command starts from an empty environment, so callers fill it with
/// [`super::env::merge_env`] first.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandBuilder {
    program: OsString,
    argv: Vec<OsString>,
    envs: BTreeMap<String, String>,
    cwd: Option<PathBuf>,
    stdin: Option<String>,
}

impl CommandBuilder {
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            argv: Vec::new(),
            envs: BTreeMap::new(),
            cwd: None,
            stdin: None,
        }
    }

    pub fn build(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.argv);
        command.env_clear();
        command.envs(&self.envs);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        command
    }

    pub fn arg<S: AsRef<OsStr>>(&mut self, arg: S) -> &mut Self {
        self.argv.push(arg.as_ref().to_owned());
        self
    }

    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self.arg(arg.as_ref());
        }
        self
    }

    /// Replace the environment of the child with `envs`.
    pub fn envs(&mut self, envs: BTreeMap<String, String>) -> &mut Self {
        self.envs = envs;
        self
    }

    pub fn current_dir<D: AsRef<Path>>(&mut self, dir: D) -> &mut Self {
        self.cwd = Some(dir.as_ref().to_owned());
        self
    }

    /// Text written to the child's stdin once it is started.
    pub fn stdin<S: Into<String>>(&mut self, script: S) -> &mut Self {
        self.stdin = Some(script.into());
        self
    }

    pub fn get_program(&self) -> &OsStr {
        &self.program
    }

    pub fn get_args(&self) -> impl Iterator<Item = &OsStr> {
        self.argv.iter().map(OsString::as_os_str)
    }

    pub fn get_env(&self, key: &str) -> Option<&str> {
        self.envs.get(key).map(String::as_str)
    }

    pub fn get_envs(&self) -> &BTreeMap<String, String> {
        &self.envs
    }

    pub fn get_current_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    pub fn get_stdin(&self) -> Option<&str> {
        self.stdin.as_deref()
    }

    pub fn wrap<S, I, T>(&mut self, wrapper: S, wrapper_args: I) -> &mut Self
    where
        S: AsRef<OsStr>,
        I: IntoIterator<Item = T>,
        T: AsRef<OsStr>,
    {
        let mut new_argv = Vec::new();

        // Add wrapper arguments first
        for arg in wrapper_args {
            new_argv.push(arg.as_ref().to_owned());
        }

        // Add the current program
        new_argv.push(self.program.clone());

        // Add the current arguments
        new_argv.extend(self.argv.iter().cloned());

        // Update program to wrapper and argv to the new argument list
        self.program = wrapper.as_ref().to_owned();
        self.argv = new_argv;
        self
    }

    /// Make the whole current command line a single argument of `wrapper`,
    /// for launchers that take the command as one string.
    pub fn wrap_as_line<S, I, T>(&mut self, wrapper: S, wrapper_args: I) -> &mut Self
    where
        S: AsRef<OsStr>,
        I: IntoIterator<Item = T>,
        T: AsRef<OsStr>,
    {
        let line = self.as_command_line();
        self.program = wrapper.as_ref().to_owned();
        self.argv = wrapper_args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .collect();
        self.argv.push(line.into());
        self
    }

    /// Returns the command line as a string for debugging/testing purposes
    pub fn as_command_line(&self) -> String {
        let mut parts: Vec<String> = vec![self.program.to_string_lossy().into_owned()];
        parts.extend(
            self.argv
                .iter()
                .map(|arg| arg.to_string_lossy().into_owned()),
        );
        shell_words::join(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_with_args() {
        let mut builder = CommandBuilder::new("wine");
        builder.arg("winecfg").wrap("xterm", ["-e"]);
        assert_eq!(builder.as_command_line(), "xterm -e wine winecfg");
    }

    #[test]
    fn test_wrap_without_args() {
        let mut builder = CommandBuilder::new("wine");
        builder.arg("cmd").wrap("time", [] as [&str; 0]);
        assert_eq!(builder.as_command_line(), "time wine cmd");
    }

    #[test]
    fn test_wrap_as_line_quotes_arguments() {
        let mut builder = CommandBuilder::new("/opt/wine/bin/wine");
        builder
            .args(["reg", "add", "HKEY_CURRENT_USER\\Software\\Wine"])
            .wrap_as_line("xfce4-terminal", ["--command"]);

        let cmd = builder.build();
        assert_eq!(cmd.get_program(), "xfce4-terminal");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(
            args,
            vec![
                "--command",
                "/opt/wine/bin/wine reg add 'HKEY_CURRENT_USER\\Software\\Wine'"
            ]
        );
    }

    #[test]
    fn test_build_uses_exact_environment() {
        let mut builder = CommandBuilder::new("wine");
        builder
            .envs(BTreeMap::from([("WINEPREFIX".to_string(), "/x".to_string())]))
            .current_dir("/tmp");

        let cmd = builder.build();
        let envs: Vec<_> = cmd.get_envs().collect();
        assert_eq!(envs, vec![(OsStr::new("WINEPREFIX"), Some(OsStr::new("/x")))]);
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/tmp")));
    }

    #[test]
    fn test_stdin_is_kept() {
        let mut builder = CommandBuilder::new("wine");
        builder.arg("winedbg").stdin("attach 0x20\nkill\nquit\n");
        assert_eq!(builder.get_stdin(), Some("attach 0x20\nkill\nquit\n"));
    }
}
