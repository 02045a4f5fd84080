#![cfg(feature = "persist")]

use ratatui_kit::file_store::FILE_NAME;
use ratatui_kit::file_store::FileStore;
use ratatui_kit::preference::FixedAppearance;
use ratatui_kit::preference::KeyValueStore;
use ratatui_kit::preference::THEME_KEY;
use ratatui_kit::preference::ThemePreference;
use ratatui_kit::theme::ThemeMode;
use std::fs;

#[test]
fn missing_file_falls_back_to_system_then_persists_toggle() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join(FILE_NAME);

    let pref = ThemePreference::load(FileStore::open(&path)?, &FixedAppearance(true));
    assert_eq!(pref.mode(), ThemeMode::Dark);
    assert!(!path.exists());

    pref.toggle();
    let written = fs::read_to_string(&path)?;
    assert_eq!(written.trim(), r#"theme = "light""#);

    let reopened = ThemePreference::load(FileStore::open(&path)?, &FixedAppearance(true));
    assert_eq!(reopened.mode(), ThemeMode::Light);
    Ok(())
}

#[test]
fn unknown_keys_are_kept_on_write() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(FILE_NAME);
    fs::write(&path, "density = \"compact\"\ntheme = \"dark\"\n")?;

    let mut store = FileStore::open(&path)?;
    assert_eq!(store.get(THEME_KEY)?.as_deref(), Some("dark"));
    store.set(THEME_KEY, "light")?;

    let reopened = FileStore::open(&path)?;
    assert_eq!(reopened.get("density")?.as_deref(), Some("compact"));
    assert_eq!(reopened.get(THEME_KEY)?.as_deref(), Some("light"));
    Ok(())
}

#[test]
fn unrecognised_stored_value_means_light() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(FILE_NAME);
    fs::write(&path, "theme = \"sepia\"\n")?;
    let pref = ThemePreference::load(FileStore::open(&path)?, &FixedAppearance(true));
    assert_eq!(pref.mode(), ThemeMode::Light);
    Ok(())
}

#[test]
fn corrupt_file_reports_its_path() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(FILE_NAME);
    fs::write(&path, "theme = [")?;
    let Err(err) = FileStore::open(&path) else {
        panic!("expected a parse error");
    };
    assert!(err.to_string().contains(&path.display().to_string()));
    Ok(())
}
