use super::*;

#[test]
fn name_variants_try_bold_first() {
    let v = name_variants("Helvetica Neue");
    assert_eq!(v[0], "Helvetica Neue-Bold");
    assert_eq!(v[1], "Helvetica Neue Bold");
    assert_eq!(v[2], "Helvetica Neue");
    assert_eq!(v[3], "HelveticaNeue");
    assert_eq!(v[4], "HelveticaNeue-Regular");
}

#[test]
fn empty_database_reports_font_error() {
    let resolver = FontResolver::from_dirs(&[]);
    assert_eq!(resolver.face_count(), 0);
    assert!(resolver.faces().is_empty());
    assert!(matches!(
        resolver.resolve("Arial"),
        Err(PosterError::Font(_))
    ));
}

#[test]
fn blank_family_is_config_error() {
    let resolver = FontResolver::from_dirs(&[]);
    assert!(matches!(resolver.resolve("  "), Err(PosterError::Config(_))));
}

#[test]
fn missing_font_dir_is_ignored() {
    let dir = std::env::temp_dir().join("postergrid_no_such_font_dir");
    let resolver = FontResolver::from_dirs(&[dir]);
    assert_eq!(resolver.face_count(), 0);
}

#[test]
fn loaded_font_debug_hides_bytes() {
    let font = LoadedFont {
        family: "Test".to_string(),
        bytes: Arc::new(vec![0u8; 16]),
        index: 0,
        weight: 700,
    };
    let dbg = format!("{font:?}");
    assert!(dbg.contains("bytes_len: 16"));
}
