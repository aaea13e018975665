//! Centralized constants for file names, external tool flags, and exit codes.

/// Default configuration file name, relative to the tool root.
pub const CONFIG_FILE: &str = "mount.ini";

/// Indirection file holding the path of the configuration file.
pub const PATH_CONFIG_FILE: &str = "path.conf";

/// Section written into a freshly bootstrapped configuration.
pub const TEMPLATE_SECTION: &str = "MyContainerName";

/// Default external tool binary, looked up on PATH.
pub const DEFAULT_VERACRYPT_BIN: &str = "veracrypt";

/// Arguments preceding every synthesized argument list (quit after run, beep).
pub const STANDARD_ARGS: &[&str] = &["/q", "/b"];

/// Request words that can never be profile names.
pub const RESERVED_NAMES: &[&str] = &[REQUEST_ALL, REQUEST_SHOW];

pub const REQUEST_ALL: &str = "all";
pub const REQUEST_SHOW: &str = "show";

// Configuration keys, in the order they are documented and templated.
pub const KEY_VOLUME: &str = "volume";
pub const KEY_TRY_EMPTY_PASS: &str = "tryemptypass";
pub const KEY_KEYFILES: &str = "keyfiles";
pub const KEY_DRIVE_LETTER: &str = "driveletter";
pub const KEY_NO_WAIT_DLG: &str = "nowaitdlg";
pub const KEY_SAVE_HISTORY: &str = "savehistory";
pub const KEY_SECURE_DESKTOP: &str = "securedesktop";

/// Every key a profile section must carry, no more and no less.
pub const PROFILE_KEYS: &[&str] = &[
    KEY_VOLUME,
    KEY_TRY_EMPTY_PASS,
    KEY_KEYFILES,
    KEY_DRIVE_LETTER,
    KEY_NO_WAIT_DLG,
    KEY_SAVE_HISTORY,
    KEY_SECURE_DESKTOP,
];

// External tool flags.
pub const FLAG_VOLUME: &str = "/v";
pub const FLAG_LETTER: &str = "/l";
pub const FLAG_KEYFILES: &str = "/k";
pub const FLAG_NO_WAIT_DLG: &str = "/nowaitdlg";
pub const FLAG_SAVE_HISTORY: &str = "/h";
pub const FLAG_SECURE_DESKTOP: &str = "/secureDesktop";
pub const FLAG_SILENT: &str = "/s";
pub const FLAG_PASSWORD: &str = "/p";
pub const FLAG_DISMOUNT: &str = "/d";

/// Every profile resolved and every invocation succeeded.
pub const EXIT_OK: u8 = 0;

/// At least one profile's final attempt failed.
pub const EXIT_EXECUTION_FAILED: u8 = 1;

/// Configuration file missing or invalid.
pub const EXIT_CONFIG_ERROR: u8 = 3;

/// Unknown profile names or a malformed request.
pub const EXIT_REQUEST_ERROR: u8 = 4;
