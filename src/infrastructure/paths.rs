//! Path utilities for locating the data directory.
//!
//! The data directory holds the key-value store (`store.json`), the optional
//! `config.toml` and the log file. It is chosen from the environment in this
//! order:
//!
//! 1. `WHOSNEXT_DATA_DIR`
//! 2. `$XDG_DATA_HOME/whosnext`
//! 3. `~/.local/share/whosnext`
//! 4. `./.whosnext` when no home directory is known

use std::path::PathBuf;

const APP_DIR: &str = "whosnext";

/// Returns the data directory resolved from the process environment.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    resolve_data_dir(|key| std::env::var(key).ok())
}

/// Resolves the data directory using `lookup` for environment variables.
///
/// Empty values are treated as unset.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use whosnext::infrastructure::resolve_data_dir;
///
/// let dir = resolve_data_dir(|key| match key {
///     "HOME" => Some("/home/ann".to_string()),
///     _ => None,
/// });
/// assert_eq!(dir, PathBuf::from("/home/ann/.local/share/whosnext"));
/// ```
pub fn resolve_data_dir<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(dir) = var("WHOSNEXT_DATA_DIR") {
        return PathBuf::from(expand_tilde_with(&dir, var("HOME").as_deref()));
    }
    if let Some(xdg) = var("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join(APP_DIR);
    }
    match var("HOME") {
        Some(home) => PathBuf::from(home).join(".local").join("share").join(APP_DIR),
        None => PathBuf::from(".").join(format!(".{APP_DIR}")),
    }
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a tilde, and tildes when `HOME` is unset, are returned as-is.
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    expand_tilde_with(path, std::env::var("HOME").ok().as_deref())
}

fn expand_tilde_with(path: &str, home: Option<&str>) -> String {
    let Some(home) = home else {
        return path.to_string();
    };
    if path == "~" {
        home.to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("{}/{rest}", home.trim_end_matches('/'))
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn explicit_dir_wins() {
        let dir = resolve_data_dir(env(&[
            ("WHOSNEXT_DATA_DIR", "/srv/draws"),
            ("XDG_DATA_HOME", "/xdg"),
            ("HOME", "/home/ann"),
        ]));
        assert_eq!(dir, PathBuf::from("/srv/draws"));
    }

    #[test]
    fn explicit_dir_expands_tilde() {
        let dir = resolve_data_dir(env(&[("WHOSNEXT_DATA_DIR", "~/draws"), ("HOME", "/home/ann")]));
        assert_eq!(dir, PathBuf::from("/home/ann/draws"));
    }

    #[test]
    fn xdg_before_home() {
        let dir = resolve_data_dir(env(&[("XDG_DATA_HOME", "/xdg"), ("HOME", "/home/ann")]));
        assert_eq!(dir, PathBuf::from("/xdg/whosnext"));
    }

    #[test]
    fn empty_values_are_ignored() {
        let dir = resolve_data_dir(env(&[("WHOSNEXT_DATA_DIR", "  "), ("HOME", "/home/ann")]));
        assert_eq!(dir, PathBuf::from("/home/ann/.local/share/whosnext"));
    }

    #[test]
    fn no_home_falls_back_to_cwd() {
        let dir = resolve_data_dir(env(&[]));
        assert_eq!(dir, PathBuf::from("./.whosnext"));
    }

    #[test]
    fn tilde_expansion() {
        assert_eq!(expand_tilde_with("~/x", Some("/h/")), "/h/x");
        assert_eq!(expand_tilde_with("~", Some("/h")), "/h");
        assert_eq!(expand_tilde_with("/abs", Some("/h")), "/abs");
        assert_eq!(expand_tilde_with("~/x", None), "~/x");
    }
}
