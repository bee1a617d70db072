mod common;

use accentid::{AccentError, AccentId, Format, RawAudio, ReferenceStore};
use common::{fbank_config, make_clips, write_silent_wav, write_tone_wav};

fn seeded(tmp: &std::path::Path) -> (AccentId, common::Clips) {
    let clips = make_clips(tmp);
    let id = AccentId::from_config(&fbank_config(&tmp.join("refs"))).unwrap();
    id.build_reference_wav(&clips.american, "american").unwrap();
    id.build_reference_wav(&clips.australian, "australian").unwrap();
    id.build_reference_wav(&clips.british, "british").unwrap();
    (id, clips)
}

#[test]
fn reference_clip_classifies_as_its_own_class() {
    let tmp = tempfile::tempdir().unwrap();
    let (id, clips) = seeded(tmp.path());

    for (path, class) in [
        (&clips.american, "american"),
        (&clips.australian, "australian"),
        (&clips.british, "british"),
    ] {
        let r = id.classify_wav(path).unwrap();
        assert_eq!(r.best.as_str(), class);
        assert_eq!(r.confidence, 100.0);
        assert_eq!(r.scores.len(), 3);
        for (other, score) in &r.scores {
            if other.as_str() == class {
                assert_eq!(*score, 1.0);
            } else {
                assert!(*score < 1.0, "{other}: {score}");
            }
        }
    }
}

#[test]
fn result_serializes() {
    let tmp = tempfile::tempdir().unwrap();
    let (id, clips) = seeded(tmp.path());
    let r = id.classify_wav(&clips.british).unwrap();
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["best"], "british");
    assert!(json["scores"]["american"].is_number());
    assert!(json["confidence"].as_f64().unwrap() > 99.9);
}

#[test]
fn missing_reference_stops_classification() {
    let tmp = tempfile::tempdir().unwrap();
    let clips = make_clips(tmp.path());
    let id = AccentId::from_config(&fbank_config(&tmp.path().join("refs"))).unwrap();
    id.build_reference_wav(&clips.american, "american").unwrap();
    id.build_reference_wav(&clips.british, "british").unwrap();

    match id.classify_wav(&clips.american) {
        Err(AccentError::MissingReference(class)) => assert_eq!(class, "australian"),
        other => panic!("expected MissingReference, got {other:?}"),
    }
}

#[test]
fn empty_store_reports_first_class() {
    let tmp = tempfile::tempdir().unwrap();
    let clips = make_clips(tmp.path());
    let id = AccentId::from_config(&fbank_config(&tmp.path().join("refs"))).unwrap();
    match id.classify_wav(&clips.british) {
        Err(AccentError::MissingReference(class)) => assert_eq!(class, "american"),
        other => panic!("expected MissingReference, got {other:?}"),
    }
}

#[test]
fn silent_query_is_invalid_audio() {
    let tmp = tempfile::tempdir().unwrap();
    let (id, _) = seeded(tmp.path());
    let silent = tmp.path().join("silent.wav");
    write_silent_wav(&silent, 1.0);
    let err = id.classify_wav(&silent).unwrap_err();
    assert_eq!(err.kind(), "InvalidAudio");
}

#[test]
fn cancelling_stereo_reference_is_invalid_audio() {
    let tmp = tempfile::tempdir().unwrap();
    let (id, _) = seeded(tmp.path());
    let samples: Vec<f32> = (0..16000)
        .flat_map(|i| {
            let s = 0.3 * (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 16000.0).sin();
            [s, -s]
        })
        .collect();
    let raw = RawAudio::new(samples, Format::stereo(16000));
    let err = id.build_reference(&raw, "british").unwrap_err();
    assert_eq!(err.kind(), "InvalidAudio");
}

#[test]
fn too_short_query_is_feature_extraction_error() {
    let tmp = tempfile::tempdir().unwrap();
    let (id, _) = seeded(tmp.path());
    let raw = RawAudio::new(vec![0.2; 100], Format::MONO_16K);
    let err = id.classify(&raw).unwrap_err();
    assert_eq!(err.kind(), "FeatureExtraction");
}

#[test]
fn classification_is_deterministic_across_instances() {
    let tmp = tempfile::tempdir().unwrap();
    let (_, _) = seeded(tmp.path());
    let query = tmp.path().join("query.wav");
    write_tone_wav(&query, &[400.0, 1650.0], 22050, 1, 1.5);

    let cfg = fbank_config(&tmp.path().join("refs"));
    let a = AccentId::from_config(&cfg).unwrap().classify_wav(&query).unwrap();
    let b = AccentId::from_config(&cfg).unwrap().classify_wav(&query).unwrap();
    assert_eq!(a, b);
    assert!(a.confidence <= 100.0);
}

#[test]
fn rebuilding_a_reference_replaces_it() {
    let tmp = tempfile::tempdir().unwrap();
    let (id, clips) = seeded(tmp.path());
    let before = id.store().get("british").unwrap().unwrap();

    let other = tmp.path().join("other.wav");
    write_tone_wav(&other, &[300.0, 3300.0], 16000, 1, 1.0);
    let rebuilt = id.build_reference_wav(&other, "british").unwrap();

    let after = id.store().get("british").unwrap().unwrap();
    assert_ne!(before, after);
    assert_eq!(after, rebuilt);

    let r = id.classify_wav(&other).unwrap();
    assert_eq!(r.best.as_str(), "british");
    assert_eq!(r.confidence, 100.0);
    assert!(id.classify_wav(&clips.british).unwrap().confidence < 100.0);
}

#[test]
fn references_from_another_model_are_incompatible() {
    let tmp = tempfile::tempdir().unwrap();
    let (_, clips) = seeded(tmp.path());

    let mut cfg = fbank_config(&tmp.path().join("refs"));
    cfg.model.num_mels = 40;
    let id = AccentId::from_config(&cfg).unwrap();
    let err = id.classify_wav(&clips.british).unwrap_err();
    assert_eq!(err.kind(), "IncompatibleReference");
}
