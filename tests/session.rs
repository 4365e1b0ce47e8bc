mod common;

use common::synthetic_image::{gradient, scratch_dir};
use raster_edit::config::batch::parse_config;
use raster_edit::config::BatchStep;
use raster_edit::message::{LogSink, MessageSink, RecordingSink};
use raster_edit::ppm::{read_ppm, write_ppm};
use raster_edit::{EditError, HistogramChannel, Operation, Pixel, Session, TransmissionError};

/// Sink that accepts a fixed number of messages and then fails.
struct FlakySink {
    remaining: usize,
}

impl MessageSink for FlakySink {
    fn render_message(&mut self, message: &str) -> Result<(), TransmissionError> {
        if self.remaining == 0 {
            return Err(TransmissionError {
                message: message.to_string(),
                cause: "display detached".to_string(),
            });
        }
        self.remaining -= 1;
        Ok(())
    }
}

#[test]
fn bad_parameters_store_the_unmodified_input() {
    let mut session = Session::with_seed(RecordingSink::default(), 1);
    session.insert("g", gradient(4, 4));

    let step = BatchStep::Apply {
        operation: "brighten".into(),
        args: vec!["ten".into()],
        source: "g".into(),
        dest: "b".into(),
        mask: None,
    };
    session.run_step(&step).unwrap();
    assert_eq!(session.get("b"), session.get("g"));

    let too_big = Operation::Downsize {
        width: 9,
        height: 2,
    };
    session.apply(&too_big, "g", "d", None).unwrap();
    assert_eq!(session.get("d"), session.get("g"));

    let messages = &session.sink().messages;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0], "Specified value must be an integer");
    assert!(messages[1].starts_with("Width and height numbers"));
}

#[test]
fn missing_names_are_reported_and_nothing_is_stored() {
    let mut session = Session::with_seed(RecordingSink::default(), 1);
    session.insert("g", gradient(3, 3));
    session
        .apply(&Operation::blur(), "nope", "out", None)
        .unwrap();
    session
        .apply(&Operation::blur(), "g", "out", Some("nope"))
        .unwrap();
    session.save("nope", "never.ppm").unwrap();
    assert!(session.get("out").is_none());
    assert_eq!(session.sink().messages.len(), 3);
    assert_eq!(
        session.sink().messages[1],
        "Unable to locate the specified masked image"
    );
}

#[test]
fn masked_apply_uses_the_named_stencil() {
    let mut session = Session::with_seed(RecordingSink::default(), 1);
    let target = gradient(2, 1);
    let stencil = raster_edit::Raster::new(2, 1, vec![Pixel::BLACK, Pixel::WHITE], "s.ppm").unwrap();
    session.insert("t", target.clone());
    session.insert("s", stencil);
    session
        .apply(&Operation::Brightness(255), "t", "out", Some("s"))
        .unwrap();

    let out = session.get("out").unwrap();
    assert_eq!(out.get(0, 0), Pixel::WHITE);
    assert_eq!(out.get(0, 1), target.get(0, 1));
    assert!(session.sink().messages.is_empty());
}

#[test]
fn mask_command_stores_a_greyscale_stencil() {
    let mut session = Session::with_seed(RecordingSink::default(), 1);
    session.insert("g", gradient(5, 5));
    session.mask("g", "m").unwrap();
    let m = session.get("m").unwrap();
    assert!(m.pixels().iter().all(|p| p.r == p.g && p.g == p.b));
}

#[test]
fn batch_continues_past_bad_steps() {
    let scratch = scratch_dir("batch");
    let dir = scratch.path();
    let input = dir.join("in.ppm");
    write_ppm(&gradient(6, 4), &input).unwrap();
    let output = dir.join("out.ppm");

    let json = format!(
        r#"{{
            "seed": 3,
            "steps": [
                {{ "command": "load", "path": {input:?}, "name": "img" }},
                {{ "command": "load", "path": "missing.ppm", "name": "ghost" }},
                {{ "command": "apply", "operation": "mosaic", "args": ["-2"], "source": "img", "dest": "bad" }},
                {{ "command": "apply", "operation": "emboss", "source": "img", "dest": "worse" }},
                {{ "command": "apply", "operation": "vertical-flip", "source": "img", "dest": "flipped" }},
                {{ "command": "save", "name": "flipped", "path": {output:?} }},
                {{ "command": "save", "name": "flipped", "path": "x.webp" }}
            ]
        }}"#
    );
    let config = parse_config(&json).unwrap();
    let mut session = Session::with_seed(RecordingSink::default(), config.seed.unwrap());
    session.run_batch(&config.steps).unwrap();

    let expected = Operation::FlipVertical
        .apply(session.get("img").unwrap())
        .unwrap();
    assert_eq!(read_ppm(&output).unwrap().pixels(), expected.pixels());
    assert_eq!(session.get("bad"), session.get("img"));
    assert!(session.get("worse").is_none());
    assert!(session.get("ghost").is_none());
    // missing file, bad seed count, unknown command, unsupported format
    assert_eq!(session.sink().messages.len(), 4);
}

#[test]
fn transmission_failure_aborts_the_batch() {
    let steps = vec![
        BatchStep::Load {
            path: "missing-one.ppm".into(),
            name: "a".into(),
        },
        BatchStep::Load {
            path: "missing-two.ppm".into(),
            name: "b".into(),
        },
        BatchStep::Mask {
            source: "never".into(),
            dest: "reached".into(),
        },
    ];
    let mut session = Session::with_seed(FlakySink { remaining: 1 }, 1);
    let err = session.run_batch(&steps).unwrap_err();
    assert!(!err.is_recoverable());
    assert!(matches!(err, EditError::Transmission(_)));
}

#[test]
fn histogram_of_a_stored_raster() {
    let mut session = Session::with_seed(RecordingSink::default(), 1);
    session.insert("g", gradient(4, 5));
    let h = session.histogram("g").unwrap().unwrap();
    assert_eq!(h.pixel_count(), 20);
    let total: u32 = h.bins(HistogramChannel::Intensity).iter().sum();
    assert_eq!(total, 20);
    assert!(session.histogram("none").unwrap().is_none());
    assert_eq!(session.sink().messages.len(), 1);
}

#[test]
fn histogram_step_writes_json() {
    let scratch = scratch_dir("histogram");
    let dir = scratch.path();
    let path = dir.join("hist.json");
    let mut session = Session::with_seed(RecordingSink::default(), 1);
    session.insert("g", gradient(3, 2));
    session
        .run_step(&BatchStep::Histogram {
            name: "g".into(),
            path: path.clone(),
        })
        .unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["pixelCount"], 6);
    assert_eq!(json["red"].as_array().unwrap().len(), 256);
    assert!(session.sink().messages.is_empty());
}

#[test]
fn log_sink_session_hands_back_its_store() {
    let mut session = Session::with_seed(LogSink, 5);
    session.insert("g", gradient(3, 3));
    session.load("missing.ppm", "ghost").unwrap();
    session
        .apply(&Operation::FlipHorizontal, "g", "flipped", None)
        .unwrap();

    let (store, LogSink) = session.into_parts();
    assert!(store.contains("flipped"));
    assert!(!store.contains("ghost"));
    assert_eq!(store.names(), vec!["flipped", "g"]);
}
