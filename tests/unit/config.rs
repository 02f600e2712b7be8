use super::*;

fn parse(json: &str) -> FrameloomResult<RenderConfig> {
    RenderConfig::from_reader(json.as_bytes())
}

#[test]
fn empty_object_is_all_defaults() {
    let cfg = parse("{}").unwrap();
    assert_eq!(cfg, RenderConfig::default());
    assert!(cfg.validate(&SceneRegistry::builtin()).is_ok());
    assert_eq!(cfg.background_rgba().unwrap(), [0, 0, 0, 255]);
}

#[test]
fn full_config_round_trips_fields() {
    let cfg = parse(
        r##"{
            "scenes": { "RollingBall": { "fps": 60, "width": 640, "duration_frames": 10 } },
            "background": "#FF8000",
            "render": { "parallel": true, "threads": 2, "chunk_size": 8 }
        }"##,
    )
    .unwrap();
    cfg.validate(&SceneRegistry::builtin()).unwrap();

    assert!(cfg.render.parallel);
    assert_eq!(cfg.render.threads, Some(2));
    assert_eq!(cfg.render.chunk_size, 8);
    assert!(!cfg.render.static_frame_elision);
    assert_eq!(cfg.background_rgba().unwrap(), [255, 128, 0, 255]);

    let o = cfg.override_for("RollingBall");
    let spec = o
        .apply(SceneSpec::hd30("RollingBall", 120))
        .unwrap();
    assert_eq!(spec.fps, Fps::whole(60));
    assert_eq!(spec.canvas.width, 640);
    assert_eq!(spec.canvas.height, 720);
    assert_eq!(spec.duration_frames, 10);

    assert!(cfg.override_for("Fireflies").is_empty());
}

#[test]
fn unknown_fields_are_rejected() {
    let err = parse(r#"{ "scene": {} }"#).unwrap_err();
    assert!(matches!(err, FrameloomError::Serde(_)), "{err}");

    let err = parse(r#"{ "scenes": { "Fireflies": { "speed": 2 } } }"#).unwrap_err();
    assert!(matches!(err, FrameloomError::Serde(_)), "{err}");
}

#[test]
fn validate_rejects_bad_values() {
    let reg = SceneRegistry::builtin();

    let unknown = parse(r#"{ "scenes": { "Nope": {} } }"#).unwrap();
    assert!(unknown.validate(&reg).is_err());

    let zero_fps = parse(r#"{ "scenes": { "Fireflies": { "fps": 0 } } }"#).unwrap();
    assert!(zero_fps.validate(&reg).is_err());

    let zero_len = parse(r#"{ "scenes": { "FractalTree": { "duration_frames": 0 } } }"#).unwrap();
    assert!(zero_len.validate(&reg).is_err());

    let zero_width = parse(r#"{ "scenes": { "FractalTree": { "width": 0 } } }"#).unwrap();
    assert!(zero_width.validate(&reg).is_err());

    let bad_bg = parse(r#"{ "background": "orange" }"#).unwrap();
    assert!(bad_bg.validate(&reg).is_err());

    let zero_threads = parse(r#"{ "render": { "threads": 0 } }"#).unwrap();
    assert!(zero_threads.validate(&reg).is_err());

    let zero_chunk = parse(r#"{ "render": { "chunk_size": 0 } }"#).unwrap();
    assert!(zero_chunk.validate(&reg).is_err());
}

#[test]
fn from_path_reports_missing_file() {
    let err = RenderConfig::from_path("/definitely/not/here/frameloom.json").unwrap_err();
    assert!(err.to_string().contains("open render config"));
}
