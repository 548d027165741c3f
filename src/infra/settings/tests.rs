use super::*;
use crate::shared::fs::test_support::unique_tmp_dir;

fn store_with(content: Option<&str>) -> (SettingsStore, PathBuf) {
    let dir = unique_tmp_dir("settings");
    let path = dir.join("config.ini");
    if let Some(content) = content {
        std::fs::write(&path, content).expect("seed config.ini");
    }
    (SettingsStore::new(&path), dir)
}

fn load_from(content: &str) -> SettingsRecord {
    let (store, dir) = store_with(Some(content));
    let record = store.load().expect("load");
    let _ = std::fs::remove_dir_all(&dir);
    record
}

fn canonical_record() -> SettingsRecord {
    SettingsRecord {
        window_state: WindowState {
            width: 640,
            height: 120,
            x: Some(-30),
            y: Some(80),
            input_enabled: false,
            always_on_top: true,
        },
        appearance: Appearance {
            transparency: 0.01,
            background_color: "rgba(10, 20, 30, 0.5)".to_string(),
            border_radius: 0.0,
        },
    }
}

#[test]
fn first_run_creates_file_with_defaults() {
    let (store, dir) = store_with(None);

    let record = store.load().expect("load");
    assert_eq!(record, SettingsRecord::default());

    let written = std::fs::read_to_string(store.path()).expect("file created");
    assert_eq!(written, to_ini_string(&SettingsRecord::default()));
    assert_eq!(
        written,
        "[windowState]\n\
         width=400\n\
         height=100\n\
         inputEnabled=true\n\
         alwaysOnTop=true\n\
         \n\
         [appearance]\n\
         transparency=50\n\
         backgroundColor=#000000\n\
         borderRadius=15\n"
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn non_numeric_width_falls_back_to_default() {
    let record = load_from("[windowState]\nwidth=abc\nheight=90\n");
    assert_eq!(record.window_state.width, 400);
    assert_eq!(record.window_state.height, 90);
}

#[test]
fn missing_or_invalid_numbers_use_documented_defaults() {
    let record = load_from(
        "[windowState]\n\
         height=\n\
         [appearance]\n\
         transparency=lots\n\
         borderRadius=round\n",
    );
    assert_eq!(record.window_state.width, DEFAULT_WIDTH);
    assert_eq!(record.window_state.height, DEFAULT_HEIGHT);
    assert_eq!(record.appearance.transparency, DEFAULT_TRANSPARENCY);
    assert_eq!(record.appearance.border_radius, DEFAULT_BORDER_RADIUS);
    assert_eq!(record.appearance.background_color, DEFAULT_BACKGROUND_COLOR);
}

#[test]
fn non_positive_dimensions_fall_back() {
    let record = load_from("[windowState]\nwidth=0\nheight=-20\n");
    assert_eq!(record.window_state.width, DEFAULT_WIDTH);
    assert_eq!(record.window_state.height, DEFAULT_HEIGHT);
}

#[test]
fn empty_file_normalizes_every_field() {
    let record = load_from("");
    assert_eq!(record.window_state.width, DEFAULT_WIDTH);
    assert_eq!(record.window_state.position(), None);
    // Absent booleans compare unequal to "true".
    assert!(!record.window_state.input_enabled);
    assert!(!record.window_state.always_on_top);
    assert_eq!(record.appearance, Appearance::default());
}

#[test]
fn transparency_is_clamped_into_range() {
    let cases = [
        ("-5", MIN_TRANSPARENCY),
        ("0", MIN_TRANSPARENCY),
        ("0.001", MIN_TRANSPARENCY),
        ("0.01", 0.01),
        ("42.5", 42.5),
        ("100", 100.0),
        ("250", MAX_TRANSPARENCY),
        ("1e400", MAX_TRANSPARENCY),
        ("-1e400", MIN_TRANSPARENCY),
        ("Infinity", MAX_TRANSPARENCY),
        ("-inf", MIN_TRANSPARENCY),
    ];
    for (raw, expected) in cases {
        let record = load_from(&format!("[appearance]\ntransparency={raw}\n"));
        assert_eq!(record.appearance.transparency, expected, "transparency={raw}");
    }

    let record = load_from("[appearance]\ntransparency=NaN\n");
    assert_eq!(record.appearance.transparency, DEFAULT_TRANSPARENCY);
}

#[test]
fn flags_match_true_case_insensitively() {
    for raw in ["true", "True", "TRUE", " tRuE "] {
        let record = load_from(&format!(
            "[windowState]\ninputEnabled={raw}\nalwaysOnTop={raw}\n"
        ));
        assert!(record.window_state.input_enabled, "inputEnabled={raw}");
        assert!(record.window_state.always_on_top, "alwaysOnTop={raw}");
    }

    for raw in ["false", "1", "yes", "", "truee"] {
        let record = load_from(&format!(
            "[windowState]\ninputEnabled={raw}\nalwaysOnTop={raw}\n"
        ));
        assert!(!record.window_state.input_enabled, "inputEnabled={raw}");
        assert!(!record.window_state.always_on_top, "alwaysOnTop={raw}");
    }
}

#[test]
fn position_is_kept_only_when_both_coordinates_parse() {
    let both = load_from("[windowState]\nx=120\ny=80\n");
    assert_eq!(both.window_state.position(), Some((120, 80)));

    let negative = load_from("[windowState]\nx=-1920\ny=0\n");
    assert_eq!(negative.window_state.position(), Some((-1920, 0)));

    let only_x = load_from("[windowState]\nx=120\n");
    assert_eq!(only_x.window_state.x, None);
    assert_eq!(only_x.window_state.y, None);

    let bad_y = load_from("[windowState]\nx=120\ny=top\n");
    assert_eq!(bad_y.window_state.x, None);
    assert_eq!(bad_y.window_state.y, None);
}

#[test]
fn zero_border_radius_is_preserved() {
    let record = load_from("[appearance]\nborderRadius=0\n");
    assert_eq!(record.appearance.border_radius, 0.0);

    let negative = load_from("[appearance]\nborderRadius=-3\n");
    assert_eq!(negative.appearance.border_radius, DEFAULT_BORDER_RADIUS);
}

#[test]
fn hand_edited_file_with_comments_quotes_and_unknown_keys() {
    let record = load_from(
        "; edited by hand\n\
         stray=1\n\
         [windowState]\n\
         # a comment line\n\
         width = 512\n\
         height=\"128\"\n\
         alwaysOnTop='TRUE'\n\
         legacyKey=whatever\n\
         \n\
         [appearance]\n\
         backgroundColor = #1e1e1e\n\
         [unknown]\n\
         width=1\n",
    );
    assert_eq!(record.window_state.width, 512);
    assert_eq!(record.window_state.height, 128);
    assert!(record.window_state.always_on_top);
    assert!(!record.window_state.input_enabled);
    assert_eq!(record.appearance.background_color, "#1e1e1e");
}

#[test]
fn blank_background_color_falls_back() {
    let record = load_from("[appearance]\nbackgroundColor=   \n");
    assert_eq!(record.appearance.background_color, DEFAULT_BACKGROUND_COLOR);
}

#[test]
fn fractional_dimensions_round_to_nearest_pixel() {
    let record = load_from("[windowState]\nwidth=400.6\nheight=99.2\n");
    assert_eq!(record.window_state.width, 401);
    assert_eq!(record.window_state.height, 99);
}

#[test]
fn save_then_load_is_stable_for_canonical_records() {
    let (store, dir) = store_with(None);

    for record in [SettingsRecord::default(), canonical_record()] {
        store.save(&record).expect("save");
        let first_text = std::fs::read_to_string(store.path()).expect("read");

        let loaded = store.load().expect("load");
        assert_eq!(loaded, record);

        store.save(&loaded).expect("save again");
        let second_text = std::fs::read_to_string(store.path()).expect("read");
        assert_eq!(first_text, second_text);
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn save_is_a_full_overwrite() {
    let (store, dir) = store_with(Some(
        "[windowState]\nwidth=10\nx=1\ny=2\nextra=keep?\n[plugins]\nfoo=bar\n",
    ));

    store.save(&SettingsRecord::default()).expect("save");
    let written = std::fs::read_to_string(store.path()).expect("read");
    assert!(!written.contains("extra"));
    assert!(!written.contains("[plugins]"));
    assert!(!written.contains("x="));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unreadable_settings_path_propagates_error() {
    let dir = unique_tmp_dir("settings");
    // A directory where the file should be cannot be read as text.
    let path = dir.join("config.ini");
    std::fs::create_dir_all(&path).expect("create dir in place of file");

    let err = SettingsStore::new(&path).load().expect_err("must fail");
    assert!(err.contains("failed to read settings"), "{err}");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn appearance_serializes_camel_case_for_the_content_view() {
    let value = serde_json::to_value(Appearance::default()).expect("serialize");
    assert_eq!(
        value,
        serde_json::json!({
            "transparency": 50.0,
            "backgroundColor": "#000000",
            "borderRadius": 15.0
        })
    );
}
