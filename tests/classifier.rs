//! Integration tests for the delay classifier lifecycle: fit, predict,
//! persistence round trips, and the documented failure guards.

use std::path::PathBuf;

use flight_delay::config::ModelConfig;
use flight_delay::error::DelayError;
use flight_delay::flights::FlightRecord;
use flight_delay::model::DelayClassifier;
use flight_delay::preprocessing::{encode, preprocess_training};

fn temp_model_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "flight_delay_clf_{}_{}.json",
        tag,
        std::process::id()
    ))
}

/// A separable fixture: international flights leave 45 minutes late,
/// national flights leave on time.
fn training_batch() -> Vec<FlightRecord> {
    let airlines = ["Grupo LATAM", "Sky Airline", "Copa Air"];
    let mut records = Vec::new();
    for i in 0..30 {
        let airline = airlines[i % airlines.len()];
        let month = (i % 12) as i32 + 1;
        records.push(
            FlightRecord::new(airline, month, "I")
                .with_departures("2023-01-01 10:00:00", "2023-01-01 10:45:00"),
        );
        records.push(
            FlightRecord::new(airline, month, "N")
                .with_departures("2023-01-01 10:00:00", "2023-01-01 10:00:00"),
        );
    }
    records
}

fn fitted_classifier(path: &PathBuf) -> DelayClassifier {
    let (x, y) = preprocess_training(&training_batch()).unwrap();
    let mut classifier = DelayClassifier::new(ModelConfig::with_model_path(path)).unwrap();
    classifier.fit(&x, &y).unwrap();
    classifier
}

// ---------------------------------------------------------------------------
// Guards
// ---------------------------------------------------------------------------

#[test]
fn predict_without_model_is_not_ready() {
    let path = temp_model_path("not_ready");
    let _ = std::fs::remove_file(&path);
    let mut classifier = DelayClassifier::new(ModelConfig::with_model_path(&path)).unwrap();
    assert!(!classifier.is_fitted());

    let x = encode(&[FlightRecord::new("Grupo LATAM", 3, "I")]);
    match classifier.predict(&x) {
        Err(DelayError::ModelNotReady) => {}
        other => panic!("expected ModelNotReady, got {:?}", other),
    }
}

#[test]
fn fit_with_no_positive_labels_is_imbalance() {
    let path = temp_model_path("imbalance");
    let mut classifier = DelayClassifier::new(ModelConfig::with_model_path(&path)).unwrap();

    let records: Vec<FlightRecord> = (0..10)
        .map(|i| {
            FlightRecord::new("Sky Airline", (i % 12) as i32 + 1, "N")
                .with_departures("2023-01-01 10:00:00", "2023-01-01 10:05:00")
        })
        .collect();
    let (x, y) = preprocess_training(&records).unwrap();
    assert!(y.iter().all(|&v| v == 0));

    match classifier.fit(&x, &y) {
        Err(DelayError::Imbalance) => {}
        other => panic!("expected Imbalance, got {:?}", other),
    }
    // Failed fit must not advance the lifecycle.
    assert!(!classifier.is_fitted());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn failed_fit_keeps_previous_model() {
    let path = temp_model_path("atomic");
    let mut classifier = fitted_classifier(&path);

    let all_negative = encode(&[FlightRecord::new("Sky Airline", 2, "N")]);
    assert!(classifier.fit(&all_negative, &[0]).is_err());

    // Prior state survives: still fitted and still predicting.
    assert!(classifier.is_fitted());
    let x = encode(&[FlightRecord::new("Grupo LATAM", 3, "I")]);
    assert_eq!(classifier.predict(&x).unwrap().len(), 1);
    let _ = std::fs::remove_file(&path);
}

// ---------------------------------------------------------------------------
// Fit / predict
// ---------------------------------------------------------------------------

#[test]
fn predict_preserves_batch_order_and_length() {
    let path = temp_model_path("order");
    let mut classifier = fitted_classifier(&path);

    let batch = vec![
        FlightRecord::new("Grupo LATAM", 3, "I"),
        FlightRecord::new("Sky Airline", 8, "N"),
        FlightRecord::new("Copa Air", 12, "I"),
        FlightRecord::new("Aerolineas Argentinas", 5, "N"),
    ];
    let predictions = classifier.predict(&encode(&batch)).unwrap();
    assert_eq!(predictions.len(), batch.len());

    // The fixture ties delay to the flight type, which sits inside the
    // frozen schema, so the learned signal survives encoding.
    assert_eq!(predictions[0], 1, "international flight should be delayed");
    assert_eq!(predictions[1], 0, "national flight should be on time");
    assert_eq!(predictions[2], 1);
    assert_eq!(predictions[3], 0);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn refit_replaces_model_wholesale() {
    let path = temp_model_path("refit");
    let mut classifier = fitted_classifier(&path);

    // Second fit on the same data succeeds from the FITTED state too.
    let (x, y) = preprocess_training(&training_batch()).unwrap();
    classifier.fit(&x, &y).unwrap();
    assert!(classifier.is_fitted());
    let _ = std::fs::remove_file(&path);
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn round_trip_survives_restart() {
    let path = temp_model_path("round_trip");
    let batch = vec![
        FlightRecord::new("Grupo LATAM", 3, "I"),
        FlightRecord::new("Sky Airline", 8, "N"),
        FlightRecord::new("Latin American Wings", 7, "I"),
    ];
    let x = encode(&batch);

    let before = fitted_classifier(&path).predict(&x).unwrap();

    // Simulated restart: a fresh instance constructed against the same
    // storage location loads the persisted booster eagerly.
    let mut reloaded = DelayClassifier::new(ModelConfig::with_model_path(&path)).unwrap();
    assert!(reloaded.is_fitted());
    assert_eq!(reloaded.predict(&x).unwrap(), before);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn lazy_reload_on_first_predict() {
    let path = temp_model_path("lazy");
    let expected = {
        let mut classifier = fitted_classifier(&path);
        classifier
            .predict(&encode(&[FlightRecord::new("Copa Air", 10, "I")]))
            .unwrap()
    };

    // Construct while the file exists, then exercise the reload path by
    // starting from an instance built before any model existed.
    let missing = temp_model_path("lazy_missing");
    let _ = std::fs::remove_file(&missing);
    let mut cold = DelayClassifier::new(ModelConfig::with_model_path(&missing)).unwrap();
    assert!(!cold.is_fitted());
    std::fs::copy(&path, &missing).unwrap();

    let got = cold
        .predict(&encode(&[FlightRecord::new("Copa Air", 10, "I")]))
        .unwrap();
    assert_eq!(got, expected);
    assert!(cold.is_fitted());

    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(&missing);
}

#[test]
fn corrupt_persisted_state_is_a_persistence_error() {
    let path = temp_model_path("corrupt");
    std::fs::write(&path, b"not a model").unwrap();
    match DelayClassifier::new(ModelConfig::with_model_path(&path)) {
        Err(DelayError::Persistence(_)) => {}
        other => panic!("expected Persistence error, got {:?}", other.map(|_| ())),
    }
    let _ = std::fs::remove_file(&path);
}
