//! INI parsing logic for converting `Ini` → `ConfigFile`.

use ini::Ini;

use super::file::ConfigFileError;
use super::keys::{ConfigKey, ConfigKeyError};
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the
/// INI. Unknown sections and keys are ignored.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    for key in ConfigKey::all() {
        let Some(value) = ini
            .section(Some(key.section()))
            .and_then(|section| section.get(key.key_name()))
        else {
            continue;
        };

        key.set(&mut config, value).map_err(|e| {
            let reason = match e {
                ConfigKeyError::ValidationFailed { reason, .. } => reason,
                other => other.to_string(),
            };
            ConfigFileError::InvalidValue {
                section: key.section().to_string(),
                key: key.key_name().to_string(),
                value: value.to_string(),
                reason,
            }
        })?;
    }

    Ok(config)
}
