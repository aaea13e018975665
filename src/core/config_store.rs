//! Profile configuration store.
//!
//! Loading is split in two stages: `parse_config_content` turns the INI-style
//! text into raw sections with line numbers, and `validate_sections` turns
//! those into strongly typed [`Profile`] records. Every problem from both
//! stages is collected so the user can fix the whole file in one pass.
//!
//! Format:
//! ```text
//! # comment
//! [Name]
//! volume = /v/foo.img
//! tryemptypass = yes
//! ```

use crate::constants;
use crate::error::{ConfigIssue, MounterError};
use crate::models::profile::{Profile, ProfileName};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// A `key = value` pair as written in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub key: String,
    pub value: String,
    pub line_number: usize,
}

/// A `[section]` and the entries under it, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSection {
    pub name: String,
    pub line_number: usize,
    pub entries: Vec<RawEntry>,
}

impl RawSection {
    fn get(&self, key: &str) -> Option<&RawEntry> {
        self.entries.iter().find(|e| e.key == key)
    }
}

/// Validated profiles in configuration order. Names are unique.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    profiles: Vec<Profile>,
}

impl ProfileStore {
    pub fn from_profiles(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name.as_str() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Read and validate the configuration file. Never writes to it.
pub fn load(path: &Path) -> Result<ProfileStore> {
    if !path.is_file() {
        return Err(MounterError::ConfigMissing {
            path: path.to_path_buf(),
        }
        .into());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("read configuration {}", path.display()))?;
    let store = load_from_str(&content)?;
    info!(
        path = %path.display(),
        profiles = store.len(),
        "loaded configuration"
    );
    Ok(store)
}

/// Parse and validate configuration content (testable without filesystem).
pub fn load_from_str(content: &str) -> std::result::Result<ProfileStore, MounterError> {
    let (sections, mut issues) = parse_config_content(content);
    let (profiles, validation_issues) = validate_sections(&sections);
    issues.extend(validation_issues);
    if !issues.is_empty() {
        return Err(MounterError::ConfigInvalid(issues));
    }
    Ok(ProfileStore::from_profiles(profiles))
}

/// Stage one: split the text into raw sections.
///
/// Structural problems (orphan keys, unparsable lines, duplicates) are
/// reported as issues; parsing continues past them.
pub fn parse_config_content(content: &str) -> (Vec<RawSection>, Vec<ConfigIssue>) {
    let mut sections: Vec<RawSection> = Vec::new();
    let mut issues = Vec::new();

    for (idx, raw_line) in content.lines().enumerate() {
        let line_num = idx + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        if trimmed.starts_with('[') {
            let name = match trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                Some(name) => name.trim(),
                None => {
                    issues.push(
                        ConfigIssue::new(format!("malformed section header: {}", trimmed))
                            .at_line(line_num),
                    );
                    continue;
                }
            };
            if let Some(first) = sections.iter().find(|s| s.name == name) {
                issues.push(
                    ConfigIssue::new(format!(
                        "duplicate section (first defined on line {})",
                        first.line_number
                    ))
                    .in_section(name)
                    .at_line(line_num),
                );
            }
            sections.push(RawSection {
                name: name.to_string(),
                line_number: line_num,
                entries: Vec::new(),
            });
            continue;
        }

        let Some((key, value)) = split_entry(trimmed) else {
            issues.push(
                ConfigIssue::new(format!("expected `key = value`, found: {}", trimmed))
                    .at_line(line_num),
            );
            continue;
        };

        let Some(section) = sections.last_mut() else {
            issues.push(
                ConfigIssue::new("option defined before any [section]")
                    .on_field(&key)
                    .at_line(line_num),
            );
            continue;
        };

        if let Some(first) = section.get(&key) {
            issues.push(
                ConfigIssue::new(format!(
                    "duplicate option (first defined on line {})",
                    first.line_number
                ))
                .in_section(&section.name)
                .on_field(&key)
                .at_line(line_num),
            );
            continue;
        }

        section.entries.push(RawEntry {
            key,
            value,
            line_number: line_num,
        });
    }

    debug!(sections = sections.len(), issues = issues.len(), "parsed configuration");
    (sections, issues)
}

/// Split on the first `=` or `:`, whichever comes first. Keys are lowercased.
fn split_entry(line: &str) -> Option<(String, String)> {
    let pos = line.find(['=', ':'])?;
    let key = line[..pos].trim();
    if key.is_empty() {
        return None;
    }
    let value = line[pos + 1..].trim();
    Some((key.to_ascii_lowercase(), value.to_string()))
}

/// Stage two: turn raw sections into profiles.
///
/// Sections with any issue are left out of the returned profiles; the caller
/// treats a non-empty issue list as fatal.
pub fn validate_sections(sections: &[RawSection]) -> (Vec<Profile>, Vec<ConfigIssue>) {
    let mut profiles = Vec::new();
    let mut issues = Vec::new();
    let mut seen: Vec<&str> = Vec::new();

    for section in sections {
        // Duplicates were already reported by the parser.
        if seen.contains(&section.name.as_str()) {
            continue;
        }
        seen.push(&section.name);

        match validate_section(section) {
            Ok(profile) => profiles.push(profile),
            Err(section_issues) => issues.extend(section_issues),
        }
    }

    (profiles, issues)
}

fn validate_section(section: &RawSection) -> std::result::Result<Profile, Vec<ConfigIssue>> {
    let mut issues = Vec::new();
    let sec = section.name.as_str();

    let name = match ProfileName::parse(sec) {
        Ok(name) => Some(name),
        Err(msg) => {
            issues.push(ConfigIssue::new(msg).in_section(sec).at_line(section.line_number));
            None
        }
    };

    for entry in &section.entries {
        if !constants::PROFILE_KEYS.contains(&entry.key.as_str()) {
            issues.push(
                ConfigIssue::new(format!(
                    "unknown option (accepted: {})",
                    constants::PROFILE_KEYS.join(", ")
                ))
                .in_section(sec)
                .on_field(&entry.key)
                .at_line(entry.line_number),
            );
        }
    }

    let volume = required(section, constants::KEY_VOLUME, &mut issues).and_then(|e| {
        if e.value.is_empty() {
            issues.push(
                ConfigIssue::new("is empty, please provide the container path")
                    .in_section(sec)
                    .on_field(&e.key)
                    .at_line(e.line_number),
            );
            None
        } else {
            Some(e.value.clone())
        }
    });
    let try_empty = flag(section, constants::KEY_TRY_EMPTY_PASS, &mut issues);
    let keyfiles = required(section, constants::KEY_KEYFILES, &mut issues).map(|e| e.value.clone());
    let letter = required(section, constants::KEY_DRIVE_LETTER, &mut issues)
        .and_then(|e| parse_drive_letter(sec, e, &mut issues));
    let no_wait = flag(section, constants::KEY_NO_WAIT_DLG, &mut issues);
    let history = flag(section, constants::KEY_SAVE_HISTORY, &mut issues);
    let secure = flag(section, constants::KEY_SECURE_DESKTOP, &mut issues);

    match (name, volume, try_empty, keyfiles, letter, no_wait, history, secure) {
        (
            Some(name),
            Some(volume_path),
            Some(try_empty_password),
            Some(keyfiles_path),
            Some(drive_letter),
            Some(no_wait_dialog),
            Some(save_history),
            Some(secure_desktop),
        ) if issues.is_empty() => Ok(Profile {
            name,
            volume_path,
            try_empty_password,
            keyfiles_path,
            drive_letter,
            no_wait_dialog,
            save_history,
            secure_desktop,
        }),
        _ => Err(issues),
    }
}

fn required<'a>(
    section: &'a RawSection,
    key: &str,
    issues: &mut Vec<ConfigIssue>,
) -> Option<&'a RawEntry> {
    let entry = section.get(key);
    if entry.is_none() {
        issues.push(
            ConfigIssue::new("missing option")
                .in_section(&section.name)
                .on_field(key)
                .at_line(section.line_number),
        );
    }
    entry
}

fn flag(section: &RawSection, key: &str, issues: &mut Vec<ConfigIssue>) -> Option<bool> {
    let entry = required(section, key, issues)?;
    let parsed = parse_yes_no(&entry.value);
    if parsed.is_none() {
        issues.push(
            ConfigIssue::new(format!("expected yes or no, found \"{}\"", entry.value))
                .in_section(&section.name)
                .on_field(key)
                .at_line(entry.line_number),
        );
    }
    parsed
}

/// Only the literal tokens `yes`/`no` (any case) are booleans.
pub fn parse_yes_no(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if value.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}

fn parse_drive_letter(
    section: &str,
    entry: &RawEntry,
    issues: &mut Vec<ConfigIssue>,
) -> Option<char> {
    let mut chars = entry.value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphanumeric() => Some(c),
        _ => {
            issues.push(
                ConfigIssue::new(format!(
                    "expected a single drive letter, found \"{}\"",
                    entry.value
                ))
                .in_section(section)
                .on_field(&entry.key)
                .at_line(entry.line_number),
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FOO: &str = "\
[Foo]
volume = /v/foo.img
tryemptypass = yes
keyfiles = /v/foo.key
driveletter = f
nowaitdlg = yes
savehistory = no
securedesktop = no
";

    fn section(name: &str, body: &[(&str, &str)]) -> String {
        let mut out = format!("[{}]\n", name);
        for (k, v) in body {
            out.push_str(&format!("{} = {}\n", k, v));
        }
        out
    }

    fn full(name: &str) -> String {
        section(
            name,
            &[
                ("volume", "/v/x.img"),
                ("tryemptypass", "no"),
                ("keyfiles", ""),
                ("driveletter", "x"),
                ("nowaitdlg", "no"),
                ("savehistory", "no"),
                ("securedesktop", "no"),
            ],
        )
    }

    fn issues_of(content: &str) -> Vec<ConfigIssue> {
        match load_from_str(content) {
            Err(MounterError::ConfigInvalid(issues)) => issues,
            other => panic!("expected ConfigInvalid, got {:?}", other),
        }
    }

    #[test]
    fn test_load_valid_profile() {
        let store = load_from_str(FOO).unwrap();
        assert_eq!(store.len(), 1);
        let foo = store.get("Foo").unwrap();
        assert_eq!(foo.volume_path, "/v/foo.img");
        assert!(foo.try_empty_password);
        assert_eq!(foo.keyfiles_path, "/v/foo.key");
        assert_eq!(foo.drive_letter, 'f');
        assert!(foo.no_wait_dialog);
        assert!(!foo.save_history);
        assert!(!foo.secure_desktop);
    }

    #[test]
    fn test_booleans_case_insensitive() {
        let content = FOO.replace("tryemptypass = yes", "tryemptypass = YeS");
        let store = load_from_str(&content).unwrap();
        assert!(store.get("Foo").unwrap().try_empty_password);
    }

    #[test]
    fn test_boolean_rejects_other_tokens() {
        let content = FOO.replace("savehistory = no", "savehistory = true");
        let issues = issues_of(&content);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].section.as_deref(), Some("Foo"));
        assert_eq!(issues[0].field.as_deref(), Some("savehistory"));
    }

    #[test]
    fn test_missing_field_names_section_and_field() {
        let content = FOO.replace("driveletter = f\n", "");
        let issues = issues_of(&content);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].section.as_deref(), Some("Foo"));
        assert_eq!(issues[0].field.as_deref(), Some("driveletter"));
    }

    #[test]
    fn test_every_invalid_section_reported() {
        let content = format!(
            "{}{}{}",
            FOO.replace("volume = /v/foo.img\n", ""),
            full("Good"),
            full("Bad").replace("nowaitdlg = no", "nowaitdlg = maybe"),
        );
        let err = load_from_str(&content).unwrap_err();
        assert_eq!(err.invalid_sections(), vec!["Foo", "Bad"]);
    }

    #[test]
    fn test_empty_keyfiles_allowed() {
        let content = FOO.replace("keyfiles = /v/foo.key", "keyfiles =   ");
        let store = load_from_str(&content).unwrap();
        assert!(!store.get("Foo").unwrap().has_keyfiles());
    }

    #[test]
    fn test_empty_volume_rejected() {
        let content = FOO.replace("volume = /v/foo.img", "volume =");
        let issues = issues_of(&content);
        assert_eq!(issues[0].field.as_deref(), Some("volume"));
    }

    #[test]
    fn test_drive_letter_must_be_single_char() {
        let content = FOO.replace("driveletter = f", "driveletter = ff");
        let issues = issues_of(&content);
        assert_eq!(issues[0].field.as_deref(), Some("driveletter"));
    }

    #[test]
    fn test_unknown_option_rejected() {
        let content = format!("{}mountoption = ro\n", FOO);
        let issues = issues_of(&content);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field.as_deref(), Some("mountoption"));
    }

    #[test]
    fn test_reserved_section_name_rejected() {
        let issues = issues_of(&full("all"));
        assert_eq!(issues[0].section.as_deref(), Some("all"));
    }

    #[test]
    fn test_duplicate_section_rejected() {
        let content = format!("{}{}", full("Twice"), full("Twice"));
        let issues = issues_of(&content);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("duplicate section"));
    }

    #[test]
    fn test_duplicate_option_rejected() {
        let content = format!("{}volume = /other\n", FOO);
        let issues = issues_of(&content);
        assert!(issues[0].message.contains("duplicate option"));
        assert_eq!(issues[0].line, Some(9));
    }

    #[test]
    fn test_option_before_section_rejected() {
        let content = format!("volume = /v\n{}", FOO);
        let issues = issues_of(&content);
        assert_eq!(issues[0].line, Some(1));
        assert!(issues[0].section.is_none());
    }

    #[test]
    fn test_comments_colons_and_key_case() {
        let content = "\
# header comment
; another
[Foo]
VOLUME: C:\\vault\\foo.hc
tryemptypass = no
keyfiles =
driveletter = F
nowaitdlg = no
savehistory = yes
securedesktop = yes
";
        let store = load_from_str(content).unwrap();
        let foo = store.get("Foo").unwrap();
        // First separator wins, so the drive prefix stays part of the value.
        assert_eq!(foo.volume_path, "C:\\vault\\foo.hc");
        assert_eq!(foo.drive_letter, 'F');
    }

    #[test]
    fn test_insertion_order_preserved() {
        let content = format!("{}{}{}", full("Zeta"), full("Alpha"), full("Mid"));
        let store = load_from_str(&content).unwrap();
        assert_eq!(store.names(), vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_empty_file_is_empty_store() {
        let store = load_from_str("# nothing yet\n").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join("mount.ini")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MounterError>(),
            Some(MounterError::ConfigMissing { .. })
        ));
    }

    #[test]
    fn test_load_does_not_modify_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mount.ini");
        fs::write(&path, FOO).unwrap();
        load(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), FOO);
    }
}
