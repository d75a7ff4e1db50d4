use std::io;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use board_render::{ChatRenderer, DEFAULT_BUFFER_SIZE, MIN_BUFFER_SIZE};
use board_types::{Author, Chat, ChatId, ChatText, Field, Reaction, ReactionText, Timestamp};

fn history(count: u64) -> Vec<Chat> {
    let at = Timestamp::from_ymd_hms(2024, 5, 1, 10, 30, 0).expect("valid timestamp");
    (1..=count)
        .map(|i| {
            let mut chat = Chat::new(
                ChatId::new(i),
                Author::new(Field::Author, "bench").expect("short author"),
                ChatText::new(Field::ChatText, "the quick brown fox jumps over the lazy dog")
                    .expect("short text"),
                at,
            );
            if i % 4 == 0 {
                let reaction = Reaction::new(
                    Author::new(Field::Author, "fan").expect("short author"),
                    ReactionText::new(Field::ReactionText, "+1").expect("short text"),
                );
                let _ = chat.push_reaction(reaction);
            }
            chat
        })
        .collect()
}

fn bench_render(c: &mut Criterion) {
    let chats = history(100_000);
    let mut group = c.benchmark_group("render_100k");
    for capacity in [MIN_BUFFER_SIZE, DEFAULT_BUFFER_SIZE, 64 * 1024] {
        let renderer = ChatRenderer::new(capacity).expect("capacity above minimum");
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &renderer, |b, r| {
            b.iter(|| r.render(black_box(&chats), &mut io::sink()).expect("sink never fails"));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
