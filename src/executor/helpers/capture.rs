use crate::executor::EXECUTOR_TARGET;
use crate::prelude::*;
use std::io::{PipeReader, PipeWriter, Read, Write};
use std::process::{Child, ExitStatus, Stdio};
use std::thread;

/// One anonymous pipe shared by the child's stdout and stderr, so the
/// combined output keeps the order the child wrote it in.
pub struct CombinedOutput {
    reader: PipeReader,
    stdout: PipeWriter,
    stderr: PipeWriter,
}

impl CombinedOutput {
    pub fn new() -> std::io::Result<Self> {
        let (reader, stdout) = std::io::pipe()?;
        let stderr = stdout.try_clone()?;
        Ok(Self {
            reader,
            stdout,
            stderr,
        })
    }

    /// Split into the reading end and the two `Stdio` for the child. The
    /// caller must drop the `Command` holding the writers once the child is
    /// spawned, or the reader never sees EOF.
    pub fn into_parts(self) -> (PipeReader, Stdio, Stdio) {
        (self.reader, self.stdout.into(), self.stderr.into())
    }
}

/// Copy `reader` into a buffer, tracing each complete line as it arrives.
fn line_tee(mut reader: impl Read) -> std::io::Result<Vec<u8>> {
    let mut output = Vec::new();
    let mut buffer = [0; 1024];
    let mut line_start = 0;

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            if line_start < output.len() {
                trace!(target: EXECUTOR_TARGET, "{}", String::from_utf8_lossy(&output[line_start..]));
            }
            break;
        }

        output.extend_from_slice(&buffer[..bytes_read]);

        if let Some(last_newline_pos) = output[line_start..].iter().rposition(|&b| b == b'\n') {
            let end = line_start + last_newline_pos;
            for line in output[line_start..end].split(|&b| b == b'\n') {
                trace!(target: EXECUTOR_TARGET, "{}", String::from_utf8_lossy(line));
            }
            line_start = end + 1;
        }
    }
    Ok(output)
}

/// Feed `stdin` to the child, then read the combined output from `reader`
/// until every writer is closed and wait for the child to exit.
pub fn collect_output(
    child: &mut Child,
    reader: PipeReader,
    stdin: Option<&str>,
) -> std::io::Result<(ExitStatus, String)> {
    // Read on a side thread so a chatty child cannot block on a full pipe
    // while the script is still being written
    let handle = thread::spawn(move || line_tee(reader));

    if let Some(mut input) = child.stdin.take() {
        if let Some(script) = stdin {
            if let Err(e) = input.write_all(script.as_bytes()) {
                warn!("Failed to write the input script: {e}");
            }
        }
        // Dropping the handle closes the pipe so the child sees EOF
    }

    let bytes = match handle.join() {
        Ok(result) => result?,
        Err(_) => {
            warn!("Output reader thread panicked");
            Vec::new()
        }
    };

    let status = child.wait()?;
    Ok((status, String::from_utf8_lossy(&bytes).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    fn run(cmd: &mut Command, stdin: Option<&str>) -> (ExitStatus, String) {
        let (reader, stdout, stderr) = CombinedOutput::new().unwrap().into_parts();
        cmd.stdin(Stdio::piped()).stdout(stdout).stderr(stderr);
        let mut child = cmd.spawn().unwrap();
        // Release the parent's copies of the writers
        drop(std::mem::replace(cmd, Command::new("true")));
        collect_output(&mut child, reader, stdin).unwrap()
    }

    #[test]
    fn test_collects_stdout_and_stderr() {
        let (status, output) = run(Command::new("sh").args(["-c", "echo out; echo err 1>&2"]), None);
        assert!(status.success());
        assert_eq!(output, "out\nerr\n");
    }

    #[test]
    fn test_interleaved_streams_keep_their_order() {
        for _ in 0..100 {
            let (_, output) = run(
                Command::new("sh").args(["-c", "echo 1; echo 2 1>&2; echo 3; echo 4 1>&2; echo 5"]),
                None,
            );
            assert_eq!(output, "1\n2\n3\n4\n5\n");
        }
    }

    #[test]
    fn test_feeds_stdin() {
        let (_, output) = run(&mut Command::new("cat"), Some("attach 0x20\nkill\nquit\n"));
        assert_eq!(output, "attach 0x20\nkill\nquit\n");
    }

    #[test]
    fn test_unterminated_last_line() {
        let (_, output) = run(Command::new("printf").arg("no newline"), None);
        assert_eq!(output, "no newline");
    }
}
