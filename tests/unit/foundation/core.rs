use super::*;

#[test]
fn rgba8_parses_all_hex_forms() {
    assert_eq!("#fff".parse::<Rgba8>().unwrap(), Rgba8::WHITE);
    assert_eq!(
        "#fafafa".parse::<Rgba8>().unwrap(),
        Rgba8::new(250, 250, 250, 255)
    );
    assert_eq!(
        "11223380".parse::<Rgba8>().unwrap(),
        Rgba8::new(0x11, 0x22, 0x33, 0x80)
    );
}

#[test]
fn rgba8_rejects_bad_hex() {
    assert!(matches!(
        "#12345".parse::<Rgba8>(),
        Err(PosterError::Config(_))
    ));
    assert!("#gg0000".parse::<Rgba8>().is_err());
    assert!("#ééé".parse::<Rgba8>().is_err());
}

#[test]
fn rgba8_serde_accepts_hex_and_arrays() {
    let c: Rgba8 = serde_json::from_str("\"#000000\"").unwrap();
    assert_eq!(c, Rgba8::BLACK);
    let c: Rgba8 = serde_json::from_str("[1,2,3]").unwrap();
    assert_eq!(c, Rgba8::new(1, 2, 3, 255));
    let c: Rgba8 = serde_json::from_str("[1,2,3,4]").unwrap();
    assert_eq!(c, Rgba8::new(1, 2, 3, 4));
    assert!(serde_json::from_str::<Rgba8>("[1,2]").is_err());

    let s = serde_json::to_string(&Rgba8::new(250, 250, 250, 255)).unwrap();
    assert_eq!(s, "\"#fafafaff\"");
}

#[test]
fn size_rejects_zero() {
    assert!(Size::new(0, 10).is_err());
    assert!(Size::new(10, 0).is_err());
    assert_eq!(Size::new(3, 4).unwrap().to_string(), "3x4");
}
