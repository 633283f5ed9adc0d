use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mockexam_core::answers::AnswerStore;
use mockexam_core::model::{Question, TestDefinition};
use mockexam_core::palette::palette;
use mockexam_core::scoring::score;

fn make_definition(questions: usize) -> TestDefinition {
    TestDefinition {
        id: "bench".into(),
        title: "Bench".into(),
        duration_seconds: 3600,
        passing_marks: None,
        questions: (0..questions)
            .map(|i| Question {
                text: format!("question {i}"),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                correct_option_index: i % 4,
                marks: 1 + (i % 3) as u32,
                explanation: None,
            })
            .collect(),
    }
}

fn make_answers(questions: usize) -> AnswerStore {
    let mut store = AnswerStore::new();
    // Answer two of every three questions, half of them correctly.
    for i in (0..questions).step_by(3) {
        store.set(i, i % 4);
    }
    for i in (1..questions).step_by(3) {
        store.set(i, (i + 1) % 4);
    }
    store
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");

    for size in [10usize, 100, 1000] {
        let definition = make_definition(size);
        let snapshot = make_answers(size).snapshot();
        group.bench_function(format!("questions={size}"), |b| {
            b.iter(|| score(black_box(&definition), black_box(&snapshot)))
        });
    }

    group.finish();
}

fn bench_palette(c: &mut Criterion) {
    let mut group = c.benchmark_group("palette");

    for size in [10usize, 100, 1000] {
        let store = make_answers(size);
        group.bench_function(format!("questions={size}"), |b| {
            b.iter(|| palette(black_box(size), |i| store.is_answered(i), Some(0)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_score, bench_palette);
criterion_main!(benches);
