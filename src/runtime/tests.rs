use super::*;
use crate::error::WineError;
use crate::executor::testing::RecordingRunner;
use rstest::rstest;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const INFO_PROC: &str = " pid      threads  executable (all id:s are in hex)
 0000000e 2        'explorer.exe'
 00000020 4        'services.exe'
 \\_ 00000038 5        'plugplay.exe'
 \\_ 00000044 3        'svchost.exe'
 00000070 1        'notepad.exe'
 \\_ 00000074 1        'conhost.exe'
";

struct Fixture {
    root: TempDir,
    runner: Arc<RecordingRunner>,
    runtime: Runtime,
}

fn fixture(runner: RecordingRunner) -> Fixture {
    let root = TempDir::new().unwrap();
    for dir in REQUIRED_DIRS {
        fs::create_dir_all(root.path().join(dir)).unwrap();
    }
    let runner = Arc::new(runner);
    let runtime = Runtime::new(Distribution::Wine, root.path(), "/home/user/.wine")
        .unwrap()
        .with_runner(runner.clone());
    Fixture {
        root,
        runner,
        runtime,
    }
}

fn wine(fixture: &Fixture) -> String {
    fixture.root.path().join("bin/wine").display().to_string()
}

#[test]
fn test_construction_validates_layout() {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("bin")).unwrap();

    let result = Runtime::new(Distribution::Wine, root.path(), "/tmp/prefix");
    assert!(matches!(
        result,
        Err(WineError::InvalidInstallation { ref missing, .. }) if missing == &["lib64", "share", "lib"]
    ));
}

#[test]
fn test_default_verbosity_is_silent() {
    let fixture = fixture(RecordingRunner::default());
    assert_eq!(fixture.runtime.verbosity(), Verbosity::Silent);
}

#[test]
fn test_request_injects_prefix_and_debug() {
    let fixture = fixture(RecordingRunner::default());
    let runtime = fixture.runtime.clone().with_verbosity(Verbosity::NoFixme);

    let request = runtime.request(
        ["winecfg"],
        ExecOptions::default().env("WINEPREFIX", "/elsewhere").env("LANG", "C"),
    );
    assert_eq!(
        request.command.as_command_line(),
        format!("{} winecfg", wine(&fixture))
    );
    assert_eq!(request.env["WINEPREFIX"], "/home/user/.wine");
    assert_eq!(request.env["WINEDEBUG"], "fixme-all");
    assert_eq!(request.env["LANG"], "C");
}

#[test]
fn test_request_with_terminal() {
    let fixture = fixture(RecordingRunner::default());

    let wrapped = fixture
        .runtime
        .request(["cmd"], ExecOptions::default().terminal(Some("xterm")));
    assert_eq!(
        wrapped.command.as_command_line(),
        format!("xterm -e {} cmd", wine(&fixture))
    );

    let unknown = fixture
        .runtime
        .request(["cmd"], ExecOptions::default().terminal(Some("teletype")));
    assert_eq!(
        unknown.command.as_command_line(),
        format!("{} cmd", wine(&fixture))
    );
}

#[test]
fn test_request_working_dir() {
    let fixture = fixture(RecordingRunner::default());

    let request = fixture.runtime.request(
        ["game.exe"],
        ExecOptions::default().working_dir("/games/app"),
    );
    assert_eq!(request.working_dir.as_deref(), Some(Path::new("/games/app")));

    let default = fixture.runtime.request(["game.exe"], ExecOptions::default());
    assert_eq!(default.working_dir, None);
}

#[test]
fn test_processes() {
    let fixture = fixture(RecordingRunner::with_output(INFO_PROC));

    let processes = fixture.runtime.processes().unwrap();
    assert_eq!(
        fixture.runner.command_lines(),
        vec![format!("{} winedbg --command 'info proc'", wine(&fixture))]
    );

    let names: Vec<_> = processes.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "explorer.exe",
            "services.exe",
            "plugplay.exe",
            "svchost.exe",
            "notepad.exe",
            "conhost.exe"
        ]
    );
    assert_eq!(processes[3].parent, Some(processes[1].pid));
    assert_eq!(processes[5].parent, Some(processes[4].pid));
}

#[test]
fn test_processes_are_not_cached() {
    let fixture = fixture(RecordingRunner::with_output(INFO_PROC));

    let first = fixture.runtime.process_records().unwrap();
    let second = fixture.runtime.process_records().unwrap();
    assert_eq!(first, second);
    assert_eq!(fixture.runner.requests().len(), 2);
}

#[test]
fn test_processes_after_failed_launch() {
    let fixture = fixture(RecordingRunner::default());
    assert!(fixture.runtime.processes().unwrap().is_empty());
}

#[test]
fn test_process_accessors() {
    let fixture = fixture(RecordingRunner::with_output(INFO_PROC));

    let records = fixture.runtime.process_records().unwrap();
    let processes = fixture.runtime.processes().unwrap();
    assert_eq!(processes[4].record(), &records[4]);

    let protected = processes.iter().map(|p| p.is_protected()).collect::<Vec<_>>();
    assert_eq!(protected, vec![true, true, true, true, false, true]);
}

#[rstest]
#[case("explorer.exe")]
#[case("services.exe")]
#[case("rpcss.exe")]
#[case("svchost.exe")]
#[case("winedevice.exe")]
#[case("plugplay.exe")]
#[case("winedbg.exe")]
#[case("conhost.exe")]
fn test_terminate_protected(#[case] name: &str) {
    let output = format!("header\n 0000002a 1        '{name}'\n");
    let fixture = fixture(RecordingRunner::with_output(output));
    let processes = fixture.runtime.processes().unwrap();
    let before = fixture.runner.requests().len();

    let err = processes[0].terminate().unwrap_err();
    assert!(matches!(&err, WineError::ProtectedProcess(found) if found == name));
    assert_eq!(
        err.to_string(),
        format!("Cannot kill the protected process: {name}")
    );
    assert_eq!(fixture.runner.requests().len(), before);
}

#[rstest]
#[case("notepad.exe")]
#[case("Explorer.exe")]
#[case("explorer.exe.bak")]
fn test_terminate_unprotected(#[case] name: &str) {
    let output = format!("header\n 0000002a 1        '{name}'\n");
    let fixture = fixture(RecordingRunner::with_output(output));
    let processes = fixture.runtime.processes().unwrap();
    let before = fixture.runner.requests().len();

    processes[0].terminate().unwrap();

    let requests = fixture.runner.requests();
    assert_eq!(requests.len(), before + 1);
    let kill = requests.last().unwrap();
    assert_eq!(
        kill.command.as_command_line(),
        format!("{} winedbg", wine(&fixture))
    );
    assert_eq!(kill.command.get_stdin(), Some("attach 0x2a\nkill\nquit\n"));
}

#[rstest]
#[case(BootStatus::Kill, "-k")]
#[case(BootStatus::Restart, "-r")]
#[case(BootStatus::Shutdown, "-s")]
#[case(BootStatus::Update, "-u")]
fn test_boot(#[case] status: BootStatus, #[case] flag: &str) {
    let fixture = fixture(RecordingRunner::default());

    fixture.runtime.boot(status, false).unwrap();
    fixture.runtime.boot(status, true).unwrap();

    let requests = fixture.runner.requests();
    assert_eq!(
        requests[0].command.as_command_line(),
        format!("{} wineboot {flag}", wine(&fixture))
    );
    assert!(!requests[0].env.contains_key("DISPLAY"));
    assert_eq!(requests[1].env["DISPLAY"], ":0.0");
}

#[test]
fn test_boot_status_from_number() {
    assert_eq!(BootStatus::try_from(3).unwrap(), BootStatus::Update);
    assert!(matches!(
        BootStatus::try_from(4),
        Err(WineError::UnsupportedBootStatus(4))
    ));
}

#[test]
fn test_override_dll() {
    let fixture = fixture(RecordingRunner::default());

    let mode = DllOverride::try_from(2).unwrap();
    fixture.runtime.override_dll("d3d9", mode).unwrap();
    fixture.runtime.restore_dll("d3d9").unwrap();

    let wine = wine(&fixture);
    assert_eq!(
        fixture.runner.command_lines(),
        vec![
            format!("{wine} reg add 'HKEY_CURRENT_USER\\Software\\Wine\\DllOverrides' /v d3d9 /d builtin,native /f"),
            format!("{wine} reg delete 'HKEY_CURRENT_USER\\Software\\Wine\\DllOverrides' /v d3d9 /f"),
        ]
    );
}

#[test]
fn test_override_mode_out_of_range() {
    assert!(matches!(
        DllOverride::try_from(7),
        Err(WineError::UnsupportedOverride(7))
    ));
}

#[test]
fn test_override_dll_list() {
    let output = "
HKEY_CURRENT_USER\\Software\\Wine\\DllOverrides
    (Default)    REG_SZ
    test123    REG_SZ    builtin,native
    test321    REG_SZ    native
    d3dx9_43    REG_SZ
    odd    REG_SZ    whatever
";
    let fixture = fixture(RecordingRunner::with_output(output));

    let overrides = fixture.runtime.override_dll_list().unwrap();
    assert_eq!(
        overrides,
        vec![
            ("test123".to_string(), DllOverride::BuiltinNative),
            ("test321".to_string(), DllOverride::Native),
            ("d3dx9_43".to_string(), DllOverride::Disabled),
        ]
    );
}

#[test]
fn test_set_app_default() {
    let fixture = fixture(RecordingRunner::default());
    fixture
        .runtime
        .set_app_default("wmplayer.exe", WindowsVersion::Win7)
        .unwrap();
    fixture
        .runtime
        .set_windows_version(WindowsVersion::Win10)
        .unwrap();

    let requests = fixture.runner.requests();
    let args: Vec<Vec<String>> = requests
        .iter()
        .map(|r| {
            r.command
                .get_args()
                .map(|a| a.to_string_lossy().into_owned())
                .collect()
        })
        .collect();
    assert_eq!(
        args[0],
        vec![
            "reg",
            "add",
            "HKEY_CURRENT_USER\\Software\\Wine\\AppDefaults\\wmplayer.exe",
            "/v",
            "Version",
            "/d",
            "win7",
            "/f"
        ]
    );
    assert_eq!(args[1][2], "HKEY_CURRENT_USER\\Software\\Wine");
    assert_eq!(args[1][6], "win10");
}

#[test]
fn test_launch_tool_terminal_only_for_console_tools() {
    let fixture = fixture(RecordingRunner::default());

    fixture.runtime.cmd(Some("konsole")).unwrap();
    fixture.runtime.launch_tool(Tool::Winecfg, Some("konsole")).unwrap();

    let wine = wine(&fixture);
    assert_eq!(
        fixture.runner.command_lines(),
        vec![format!("konsole -e {wine} cmd"), format!("{wine} winecfg")]
    );
}

#[test]
fn test_install_msi() {
    let fixture = fixture(RecordingRunner::default());
    let package = Path::new("/downloads/setup tool.msi");

    assert!(fixture.runtime.install_msi(package).unwrap().is_none());

    let requests = fixture.runner.requests();
    assert_eq!(requests.len(), 1);
    let args: Vec<_> = requests[0].command.get_args().collect();
    assert_eq!(args, vec!["msiexec", "/i", "/downloads/setup tool.msi"]);
    assert_eq!(requests[0].env["WINEPREFIX"], "/home/user/.wine");
}
