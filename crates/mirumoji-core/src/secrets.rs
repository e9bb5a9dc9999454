//! `.env` secrets validation.

use std::collections::BTreeMap;
use std::path::Path;

/// Parsed `KEY=VALUE` pairs from a secrets file. Later duplicates win.
pub type SecretMap = BTreeMap<String, String>;

/// Check that `path` exists and defines every name in `required` with a
/// non-empty value, then merge its entries into the process environment.
///
/// Variables that are already set in the environment keep their value.
/// The file itself is never modified.
pub fn check(required: &[&str], path: &Path) -> crate::Result<SecretMap> {
    let secrets = load(required, path)?;

    let missing = missing_names(required, &secrets);
    if !missing.is_empty() {
        return Err(crate::Error::MissingVariables {
            path: path.to_path_buf(),
            names: missing,
        });
    }

    for (key, value) in &secrets {
        if std::env::var_os(key).is_none() {
            export(key, value);
        }
    }
    tracing::debug!(count = secrets.len(), path = %path.display(), "secrets merged into environment");
    Ok(secrets)
}

/// Read and parse the secrets file without validating it.
pub fn load(required: &[&str], path: &Path) -> crate::Result<SecretMap> {
    if !path.is_file() {
        return Err(crate::Error::SecretsFileMissing {
            path: path.to_path_buf(),
            required: required.iter().map(|s| (*s).to_owned()).collect(),
        });
    }

    let parse_err = |source| crate::Error::SecretsParse {
        path: path.to_path_buf(),
        source,
    };

    let mut secrets = SecretMap::new();
    for item in dotenvy::from_path_iter(path).map_err(parse_err)? {
        let (key, value) = item.map_err(parse_err)?;
        secrets.insert(key, value);
    }
    Ok(secrets)
}

/// Required names that are absent or empty, in the order they were required.
pub fn missing_names(required: &[&str], secrets: &SecretMap) -> Vec<String> {
    required
        .iter()
        .filter(|name| secrets.get(**name).is_none_or(|value| value.is_empty()))
        .map(|name| (*name).to_owned())
        .collect()
}

/// Set a variable in the process environment, overwriting any previous value.
pub fn export(key: &str, value: &str) {
    // SAFETY: the launcher is single-threaded and exports happen between
    // child processes, so no other thread reads the environment concurrently.
    unsafe { std::env::set_var(key, value) }
}
