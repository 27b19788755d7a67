use serde_json::json;

use crate::{ConfigError, DEFAULT_TAB_WIDTH, Language, Preferences};

#[test]
fn defaults_enable_every_assist() {
    let prefs = Preferences::default();
    assert_eq!(prefs.tab_width, DEFAULT_TAB_WIDTH);
    assert!(prefs.inline_suggest && prefs.dot_complete && prefs.constant_complete);
    assert_eq!(prefs.tab(), "    ");
}

#[test]
fn from_json_reads_editor_section_and_fills_defaults() {
    let prefs = Preferences::from_json(r#"{"spinEditor": {"tabWidth": 2, "dotComplete": false}}"#)
        .expect("valid settings");
    assert_eq!(
        prefs,
        Preferences {
            tab_width: 2,
            dot_complete: false,
            ..Preferences::default()
        }
    );

    let flat = Preferences::from_json(r#"{"inlineSuggest": false}"#).expect("valid settings");
    assert!(!flat.inline_suggest);
    assert_eq!(flat.tab_width, DEFAULT_TAB_WIDTH);
}

#[test]
fn from_json_rejects_bad_documents() {
    assert!(matches!(
        Preferences::from_json(r#"{"tabWidth": 0}"#),
        Err(ConfigError::InvalidTabWidth)
    ));
    assert!(matches!(
        Preferences::from_json("{ not json"),
        Err(ConfigError::Json(_))
    ));
    assert!(matches!(
        Preferences::from_json(r#"{"tabWidth": "wide"}"#),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn apply_settings_merges_and_ignores_bad_values() {
    let mut prefs = Preferences::default();
    prefs.apply_settings(&json!({
        "spinEditor": {
            "tabWidth": 0,
            "constantComplete": false,
            "inlineSuggest": "yes"
        }
    }));
    assert_eq!(prefs.tab_width, DEFAULT_TAB_WIDTH);
    assert!(!prefs.constant_complete);
    assert!(prefs.inline_suggest);

    prefs.apply_settings(&json!({ "tabWidth": 8 }));
    assert_eq!(prefs.tab_width, 8);
}

#[test]
fn language_follows_file_extension() {
    assert_eq!(Language::from_file_name("top.spin"), Language::Spin);
    assert_eq!(Language::from_file_name("LIB.SPIN"), Language::Spin);
    assert_eq!(Language::from_file_name("readme.txt"), Language::Plain);
    assert_eq!(Language::from_file_name("Makefile"), Language::Plain);
}
