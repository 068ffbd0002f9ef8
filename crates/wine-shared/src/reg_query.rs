use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegEntry {
    pub name: String,
    /// Registry value type as printed by `reg`, e.g. `REG_SZ`.
    pub kind: String,
    pub data: String,
}

impl RegEntry {
    fn parse(line: &str) -> Option<RegEntry> {
        lazy_static! {
            static ref VALUE_REGEX: Regex = Regex::new(
                r"^\s{2,}(?P<name>\S.*?)\s{2,}(?P<kind>REG_[A-Z_]+)(?:\s+(?P<data>.*))?$"
            )
            .unwrap();
        }

        let captures = VALUE_REGEX.captures(line.trim_end_matches(['\r', '\n']))?;
        Some(RegEntry {
            name: captures["name"].to_string(),
            kind: captures["kind"].to_string(),
            data: captures
                .name("data")
                .map(|data| data.as_str().trim_end().to_string())
                .unwrap_or_default(),
        })
    }
}

/// Parse the values printed by `reg query <key>`.
///
/// Key headers, subkey listings and blank lines are ignored, only the
/// indented `name  REG_TYPE  data` lines are returned.
pub fn parse_reg_query(output: &str) -> Vec<RegEntry> {
    output.lines().filter_map(RegEntry::parse).collect()
}
