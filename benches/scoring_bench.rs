use criterion::{criterion_group, criterion_main, Criterion};
use scoutforge::aggregate::Aggregator;
use scoutforge::schema::Schema;
use scoutforge::scorer::Scorer;
use scoutforge::transform::{ActionEvent, RawObservation, Transformer};
use serde_json::json;
use std::hint::black_box;
use std::sync::Arc;

const TYPES: [&str; 6] = ["action1", "action2", "action3", "action4", "teleopSpecial", "bogus"];

fn setup_observations(n: usize) -> Vec<RawObservation> {
    (0..n)
        .map(|i| {
            let mut raw = RawObservation {
                auto_actions: (0..(i % 7)).map(|j| ActionEvent::new(TYPES[j % 4])).collect(),
                teleop_actions: (0..(i % 23)).map(|j| ActionEvent::new(TYPES[(i + j) % 6])).collect(),
                start_position: vec![false, i % 3 == 0, true],
                ..Default::default()
            };
            raw.endgame_robot_status
                .insert(format!("option{}", i % 3 + 1), i % 2 == 0);
            raw.extra.insert("teamNumber".to_string(), json!(100 + i % 40));
            raw
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let schema = Arc::new(Schema::default());
    let transformer = Transformer::new(schema.clone());
    let scorer = Scorer::new(schema.clone());
    let aggregator = Aggregator::new(schema);
    let observations = setup_observations(2_000);
    let single = observations[17].clone();

    c.bench_function("transform_and_score_one", |b| {
        b.iter(|| {
            let record = transformer.transform(black_box(single.clone()));
            black_box(scorer.score(&record))
        })
    });

    let scored = aggregator.score_all(observations.clone());
    c.bench_function("aggregate_2000_matches", |b| {
        b.iter(|| black_box(aggregator.aggregate_scored(black_box(&scored))))
    });

    c.bench_function("score_all_2000_matches", |b| {
        b.iter(|| black_box(aggregator.score_all(black_box(observations.clone()))))
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
