use super::*;
use crate::foundation::core::{Fps, FrameIndex};

#[test]
fn builtin_registers_every_scene_in_order() {
    let reg = SceneRegistry::builtin();
    let ids: Vec<_> = reg.ids().collect();
    assert_eq!(
        ids,
        [
            "Fireflies",
            "BigBangUniverse",
            "AgentCollaborationFlow",
            "RerankingFlow",
            "FractalTree",
            "RollingBall"
        ]
    );
}

#[test]
fn default_specs_match_registration_table() {
    let reg = SceneRegistry::builtin();
    let frames = [
        ("Fireflies", 54_000),
        ("BigBangUniverse", 300),
        ("AgentCollaborationFlow", 600),
        ("RerankingFlow", 600),
        ("FractalTree", 300),
        ("RollingBall", 120),
    ];
    for (id, n) in frames {
        let spec = reg.default_spec(id).unwrap();
        assert_eq!(spec.id, id);
        assert_eq!(spec.duration_frames, n, "{id}");
        assert_eq!(spec.fps, Fps::whole(30));
        assert_eq!((spec.canvas.width, spec.canvas.height), (1280, 720));
    }
}

#[test]
fn unknown_id_is_a_scene_error() {
    let reg = SceneRegistry::builtin();
    let err = reg.build("Nope", &SceneOverride::default()).err().unwrap();
    assert!(matches!(err, FrameloomError::Scene(_)));
    assert!(err.to_string().contains("RollingBall"));
    assert!(reg.default_spec("fireflies").is_err());
}

#[test]
fn build_applies_overrides() {
    let reg = SceneRegistry::builtin();
    let o = SceneOverride {
        width: Some(320),
        height: Some(180),
        duration_frames: Some(5),
        ..SceneOverride::default()
    };
    for id in reg.ids() {
        let scene = reg.build(id, &o).unwrap();
        assert_eq!(scene.spec().duration_frames, 5);
        let sampled = scene.sample(FrameIndex(0)).unwrap();
        assert_eq!((sampled.width, sampled.height), (320, 180), "{id}");
    }
}

#[test]
fn invalid_override_fails_build() {
    let reg = SceneRegistry::builtin();
    let o = SceneOverride {
        fps: Some(0),
        ..SceneOverride::default()
    };
    assert!(reg.build("RollingBall", &o).is_err());
}
