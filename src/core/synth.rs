//! Argument synthesis for the external volume tool.
//!
//! Pure functions of a [`Profile`]: the same profile always yields the same
//! argument list. The standard `/q /b` prefix is part of every list, so a
//! dry-run detail is exactly what would follow the program name.

use crate::constants;
use crate::models::profile::Profile;
use crate::models::request::Mode;

/// How the mount command supplies the volume password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordForm {
    /// Pass an explicit empty password, silently.
    Empty,
    /// Pass nothing; the tool prompts the user.
    Interactive,
}

/// Mount arguments for the given password form.
pub fn synthesize_mount(profile: &Profile, password: PasswordForm) -> Vec<String> {
    let mut args = standard_args();
    args.push(constants::FLAG_VOLUME.to_string());
    args.push(profile.volume_path.clone());
    args.push(constants::FLAG_LETTER.to_string());
    args.push(profile.drive_letter.to_string());
    if profile.has_keyfiles() {
        args.push(constants::FLAG_KEYFILES.to_string());
        args.push(profile.keyfiles_path.clone());
    }
    push_switch(&mut args, constants::FLAG_NO_WAIT_DLG, profile.no_wait_dialog);
    push_switch(&mut args, constants::FLAG_SAVE_HISTORY, profile.save_history);
    push_switch(&mut args, constants::FLAG_SECURE_DESKTOP, profile.secure_desktop);
    if password == PasswordForm::Empty {
        args.push(constants::FLAG_SILENT.to_string());
        args.push(constants::FLAG_PASSWORD.to_string());
        args.push(String::new());
    }
    args
}

/// Dismount arguments. Keyfiles and passwords never appear here.
pub fn synthesize_dismount(profile: &Profile) -> Vec<String> {
    let mut args = standard_args();
    args.push(constants::FLAG_DISMOUNT.to_string());
    args.push(profile.drive_letter.to_string());
    push_switch(&mut args, constants::FLAG_NO_WAIT_DLG, profile.no_wait_dialog);
    args
}

/// The first argument list the dispatcher tries for this profile and mode.
pub fn synthesize_primary(profile: &Profile, mode: Mode) -> Vec<String> {
    match mode {
        Mode::Mount => synthesize_mount(profile, initial_password_form(profile)),
        Mode::Dismount => synthesize_dismount(profile),
    }
}

pub fn initial_password_form(profile: &Profile) -> PasswordForm {
    if profile.try_empty_password {
        PasswordForm::Empty
    } else {
        PasswordForm::Interactive
    }
}

/// Render an argument list for display, quoting empty and spaced values.
pub fn render_command(program: &str, args: &[String]) -> String {
    std::iter::once(program.to_string())
        .chain(args.iter().map(|a| {
            if a.is_empty() || a.contains(char::is_whitespace) {
                format!("\"{}\"", a)
            } else {
                a.clone()
            }
        }))
        .collect::<Vec<_>>()
        .join(" ")
}

fn standard_args() -> Vec<String> {
    constants::STANDARD_ARGS.iter().map(|s| s.to_string()).collect()
}

fn push_switch(args: &mut Vec<String>, flag: &str, on: bool) {
    args.push(flag.to_string());
    args.push(if on { "yes" } else { "no" }.to_string());
}
