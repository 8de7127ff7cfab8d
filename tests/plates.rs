use plate_engine::{
    plates::write_plate,
    render::{text::FontBook, Rasterizer},
    FontConfig, PlateError, PlateKind, RenderConfig,
};

fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("plate-engine-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_plates_compose() {
    for kind in PlateKind::all() {
        let scene = kind.plate().compose();
        assert!(!scene.is_empty(), "{:?} is empty", kind);
        assert_eq!(scene.bounds().width(), 14.0);
        assert_eq!(scene.bounds().height(), 10.0);
    }
}

#[test]
fn test_plates_render() {
    let rasterizer = Rasterizer::with_fonts(10.0, FontBook::empty());
    for kind in PlateKind::all() {
        let scene = kind.plate().compose();
        let pixmap = rasterizer.render(&scene).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (140, 100));

        let background = scene.background();
        let drawn = pixmap
            .pixels()
            .iter()
            .filter(|pixel| {
                let pixel = pixel.demultiply();
                (pixel.red(), pixel.green(), pixel.blue())
                    != (background.r, background.g, background.b)
            })
            .count();
        assert!(drawn > 100, "{:?} drew only {} pixels", kind, drawn);
    }
}

#[test]
fn test_write_plate() {
    let dir = scratch_dir("write");
    let config = RenderConfig::default()
        .set_dpi(8.0)
        .set_output_dir(&dir)
        .set_fonts(FontConfig::none());
    let rasterizer = Rasterizer::new(&config);

    let path = write_plate(PlateKind::Blended.plate(), &rasterizer, &config).unwrap();
    assert_eq!(path, dir.join("blended-mode.png"));

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_output_dir_is_a_file() {
    let dir = scratch_dir("file");
    std::fs::create_dir_all(&dir).unwrap();
    let blocker = dir.join("not-a-dir");
    std::fs::write(&blocker, b"").unwrap();

    let config = RenderConfig::default()
        .set_dpi(4.0)
        .set_output_dir(&blocker)
        .set_fonts(FontConfig::none());
    let result = plate_engine::render_plate(PlateKind::Laboratory, &config);
    assert!(matches!(result, Err(PlateError::Io { path, .. }) if path == blocker));
    let _ = std::fs::remove_dir_all(&dir);
}
