use std::collections::BTreeMap;

/// Search paths put in front of the inherited `PATH` of every child.
pub const PRIVILEGED_PATH_PREFIX: &str = "/usr/sbin:/sbin:";

/// Build the full environment of a child process.
///
/// Starts from `base`, prepends [`PRIVILEGED_PATH_PREFIX`] to `PATH`, then
/// overlays `overlay`. Keys are unique and overlay values win.
pub fn merge_env<I, K, V>(base: I, overlay: &BTreeMap<String, String>) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut env: BTreeMap<String, String> = base
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();

    let path = match env.get("PATH") {
        Some(path) if !path.is_empty() => format!("{PRIVILEGED_PATH_PREFIX}{path}"),
        _ => PRIVILEGED_PATH_PREFIX.trim_end_matches(':').to_string(),
    };
    env.insert("PATH".into(), path);

    env.extend(overlay.iter().map(|(k, v)| (k.clone(), v.clone())));
    env
}

/// Environment of the calling process, skipping entries that are not valid
/// unicode.
pub fn current_env() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os().filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
}

pub fn is_debug_enabled() -> bool {
    std::env::var("WINECTL_LOG")
        .ok()
        .and_then(|log_level| {
            log_level
                .parse::<log::LevelFilter>()
                .map(|level| level >= log::LevelFilter::Debug)
                .ok()
        })
        .unwrap_or_default()
}
