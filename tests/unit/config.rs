use super::*;

#[test]
fn defaults_follow_the_poster_tool() {
    let cfg = PosterConfig::default();
    assert_eq!(cfg.grid.images_per_row, 1);
    assert_eq!((cfg.grid.spacing_x, cfg.grid.spacing_y), (0, 0));
    assert_eq!(cfg.background, Rgba8::new(250, 250, 250, 255));
    assert_eq!(cfg.cell_background(), cfg.background);
    assert!(cfg.labels.enabled);
    assert_eq!(cfg.labels.font_size, 40.0);
    assert_eq!((cfg.labels.padding_top, cfg.labels.padding_bottom), (10, 15));
    assert_eq!(cfg.margins, Margins::default());
    cfg.validate().unwrap();
}

#[test]
fn json_fields_are_all_optional() {
    let cfg: PosterConfig = serde_json::from_str(
        r##"{
            "grid": { "images_per_row": 7, "spacing_x": 20 },
            "labels": { "font_family": "Helvetica", "font_size": 35 },
            "background": "#ffffff",
            "title": { "text": "Passports of the World" },
            "footer": { "text": "(c) 2026", "height": 60 }
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.grid.images_per_row, 7);
    assert_eq!(cfg.grid.spacing_x, 20);
    assert_eq!(cfg.grid.spacing_y, 0);
    assert_eq!(cfg.labels.font_family, "Helvetica");
    assert_eq!(cfg.labels.padding_top, 10);
    let title = cfg.title.as_ref().unwrap();
    assert_eq!(title.height, 200);
    assert_eq!(title.font_family, "Helvetica-Bold");
    let footer = cfg.footer.as_ref().unwrap();
    assert_eq!((footer.height, footer.inset), (60, 40));
    cfg.validate().unwrap();
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(serde_json::from_str::<PosterConfig>(r#"{ "colums": 3 }"#).is_err());
}

#[test]
fn validate_names_the_offending_field() {
    let mut cfg = PosterConfig::default();
    cfg.grid.images_per_row = 0;
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("images_per_row"));

    let mut cfg = PosterConfig::default();
    cfg.labels.font_size = -1.0;
    assert!(cfg.validate().unwrap_err().to_string().contains("labels.font_size"));

    let mut cfg = PosterConfig::default();
    cfg.threads = Some(0);
    assert!(cfg.validate().unwrap_err().to_string().contains("threads"));

    let mut cfg = PosterConfig::default();
    cfg.title = Some(TitleConfig::default());
    assert!(cfg.validate().unwrap_err().to_string().contains("title.text"));

    let mut cfg = PosterConfig::default();
    cfg.cell_size = Some(Size {
        width: 100,
        height: 50,
    });
    cfg.labels.band_height = Some(50);
    assert!(cfg.validate().unwrap_err().to_string().contains("band_height"));
}

#[test]
fn zero_label_band_is_rejected_only_with_labels_on() {
    let mut cfg = PosterConfig::default();
    cfg.labels.band_height = Some(0);
    let err = cfg.validate().unwrap_err();
    assert!(matches!(err, PosterError::Config(_)));
    assert!(err.to_string().contains("labels.band_height"));

    cfg.labels.enabled = false;
    cfg.validate().unwrap();
}

#[test]
fn disabled_labels_skip_font_checks() {
    let mut cfg = PosterConfig::default();
    cfg.labels.enabled = false;
    cfg.labels.font_family.clear();
    cfg.validate().unwrap();
}

#[test]
fn config_round_trips_through_json_file() {
    let path = std::env::temp_dir().join(format!(
        "postergrid_config_{}_{}.json",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let mut cfg = PosterConfig::default();
    cfg.grid.images_per_row = 5;
    cfg.preprocess = Preprocess::passport_cover();
    std::fs::write(&path, serde_json::to_string_pretty(&cfg).unwrap()).unwrap();
    let back = PosterConfig::from_json_file(&path).unwrap();
    assert_eq!(back, cfg);
    std::fs::remove_file(&path).ok();
}
