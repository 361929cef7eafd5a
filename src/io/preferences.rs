//! Player identity and theme preferences

use crate::io::configuration::DEFAULT_PLAYER_NAME;
use crate::io::error::Result;
use crate::io::storage::{KeyValueStore, PLAYER_NAME_KEY, THEME_KEY};
use std::fmt;
use std::str::FromStr;

/// UI color theme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    /// Light background
    #[default]
    Light,
    /// Dark background
    Dark,
}

impl Theme {
    /// The other theme
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

impl FromStr for Theme {
    type Err = crate::io::error::PuzzleError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(crate::io::error::invalid_parameter(
                "theme",
                &value,
                &"expected 'light' or 'dark'",
            )),
        }
    }
}

/// Stored player name, or the default when none (or a blank one) is stored
///
/// # Errors
///
/// Returns an error if the store cannot be read
pub fn player_name(store: &impl KeyValueStore) -> Result<String> {
    Ok(store
        .get(PLAYER_NAME_KEY)?
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string()))
}

/// Store the player name
///
/// # Errors
///
/// Returns an error if the name is blank or the store cannot be written
pub fn set_player_name(store: &mut impl KeyValueStore, name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(crate::io::error::invalid_parameter(
            "player",
            &name,
            &"name must not be blank",
        ));
    }
    store.set(PLAYER_NAME_KEY, trimmed.to_string())
}

/// Stored theme; unknown values read as the default
///
/// # Errors
///
/// Returns an error if the store cannot be read
pub fn theme(store: &impl KeyValueStore) -> Result<Theme> {
    Ok(store
        .get(THEME_KEY)?
        .and_then(|value| value.parse().ok())
        .unwrap_or_default())
}

/// Store the theme
///
/// # Errors
///
/// Returns an error if the store cannot be written
pub fn set_theme(store: &mut impl KeyValueStore, theme: Theme) -> Result<()> {
    store.set(THEME_KEY, theme.to_string())
}

/// Switch to the other theme and store it
///
/// # Errors
///
/// Returns an error if the store cannot be read or written
pub fn toggle_theme(store: &mut impl KeyValueStore) -> Result<Theme> {
    let next = theme(&*store)?.toggled();
    set_theme(store, next)?;
    Ok(next)
}
