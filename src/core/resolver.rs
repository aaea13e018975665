//! Turns the positional arguments into concrete profiles.

use crate::constants;
use crate::core::config_store::ProfileStore;
use crate::error::MounterError;
use crate::models::profile::Profile;
use crate::models::request::RequestKind;
use tracing::debug;

/// Result of resolving a request against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The caller should list these names instead of dispatching.
    Show(Vec<String>),
    Profiles(Vec<Profile>),
}

/// Classify the positional arguments.
///
/// `all` and `show` are only meaningful on their own; mixing them with
/// other names is rejected rather than guessing which one wins.
pub fn parse_request(names: &[String]) -> Result<RequestKind, MounterError> {
    if names.is_empty() {
        return Err(MounterError::InvalidRequest(
            "no profile names given".to_string(),
        ));
    }

    let reserved: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|n| constants::RESERVED_NAMES.contains(n))
        .collect();

    match (names.len(), reserved.first()) {
        (1, Some(&constants::REQUEST_SHOW)) => Ok(RequestKind::Show),
        (1, Some(&constants::REQUEST_ALL)) => Ok(RequestKind::All),
        (_, None) => Ok(RequestKind::Named(names.to_vec())),
        (_, Some(_)) => Err(MounterError::InvalidRequest(format!(
            "\"{}\" cannot be combined with other names",
            reserved.join("\", \"")
        ))),
    }
}

/// Resolve a request. All-or-nothing: every unknown name is collected
/// before failing, and no profile is returned if any name is unknown.
pub fn resolve(request: &RequestKind, store: &ProfileStore) -> Result<Resolution, MounterError> {
    match request {
        RequestKind::Show => Ok(Resolution::Show(
            store.names().into_iter().map(str::to_string).collect(),
        )),
        RequestKind::All => Ok(Resolution::Profiles(store.profiles().to_vec())),
        RequestKind::Named(names) => {
            let mut unknown: Vec<String> = Vec::new();
            let mut resolved = Vec::with_capacity(names.len());
            for name in names {
                match store.get(name) {
                    Some(profile) => resolved.push(profile.clone()),
                    None => {
                        if !unknown.contains(name) {
                            unknown.push(name.clone());
                        }
                    }
                }
            }
            if !unknown.is_empty() {
                return Err(MounterError::UnknownProfile(unknown));
            }
            debug!(count = resolved.len(), "resolved profiles");
            Ok(Resolution::Profiles(resolved))
        }
    }
}
