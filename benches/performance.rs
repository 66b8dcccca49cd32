use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::{Duration, Instant};

use flick_keys::emphasis::{EmphasisController, EmphasisTiming, KeySide};
use flick_keys::flick::{classify, FlickRecognizer};
use flick_keys::keymap::KANA_ROWS;
use flick_keys::text_buffer::TextBuffer;

fn benchmark_classify(c: &mut Criterion) {
    c.bench_function("classify_grid", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for dx in -40..=40 {
                for dy in -40..=40 {
                    hits += classify(black_box(dx as f32), black_box(dy as f32), 20.0).index();
                }
            }
            black_box(hits)
        })
    });
}

fn benchmark_gesture(c: &mut Criterion) {
    let key = KANA_ROWS[0][0];
    c.bench_function("flick_gesture_60_moves", |b| {
        b.iter(|| {
            let mut recognizer = FlickRecognizer::default();
            recognizer.pointer_down(30.0, 30.0);
            for step in 0..60 {
                recognizer.pointer_move(30.0 + step as f32, 30.0 - step as f32 * 0.5);
            }
            black_box(recognizer.pointer_up(&key))
        })
    });
}

fn benchmark_emphasis_tick(c: &mut Criterion) {
    c.bench_function("emphasis_full_cycle", |b| {
        b.iter(|| {
            let start = Instant::now();
            let mut controller =
                EmphasisController::new(KeySide::Left, EmphasisTiming::default(), start);
            controller.on_tilt(-0.5, start);
            // One frame every 16ms through grow, dwell and revert
            for frame in 0..170u64 {
                controller.tick(start + Duration::from_millis(frame * 16));
            }
            black_box(controller.state(start + Duration::from_millis(2720)))
        })
    });
}

fn benchmark_typing(c: &mut Criterion) {
    c.bench_function("type_and_erase_1000_kana", |b| {
        b.iter(|| {
            let mut buffer = TextBuffer::new();
            for _ in 0..1000 {
                buffer.push('あ');
            }
            while buffer.backspace().is_some() {}
            black_box(buffer)
        })
    });
}

criterion_group!(
    benches,
    benchmark_classify,
    benchmark_gesture,
    benchmark_emphasis_tick,
    benchmark_typing
);
criterion_main!(benches);
