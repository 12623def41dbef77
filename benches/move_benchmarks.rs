use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use sokoban_engine::console_interface::parse_level;
use sokoban_engine::core::{parse_action_list, replay, step, Direction, GameUpdate, UserAction};

const PUZZLES: &[(&str, &str, &str)] = &[
    ("corridor", r#"
#######
#@ $ .#
#######
"#, "rrrrrllll"),
    ("two_boxes", r#"
######
#.   #
# $$ #
#  @.#
######
"#, "ludrruullrdldr"),
    ("open_room", r#"
#######
#     #
# $ $ #
#  #  #
# .@. #
#######
"#, "lluuurddrruuurrddlllluuurrrrddddll"),
];

pub fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for &(name, puzzle, _) in PUZZLES {
        let level = parse_level(puzzle).expect("benchmark level parses");
        let start = level.initial_state();
        group.throughput(Throughput::Elements(Direction::all().len() as u64));
        group.bench_with_input(BenchmarkId::new("all_directions", name), &start, |b, start| {
            b.iter(|| {
                for dir in Direction::all() {
                    black_box(step(&level, black_box(start), UserAction::Move(dir)));
                }
            })
        });
    }

    group.finish();
}

pub fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("replay");

    for &(name, puzzle, moves) in PUZZLES {
        let level = parse_level(puzzle).expect("benchmark level parses");
        // keep only the prefix that is legal so every iteration replays cleanly
        let mut game = level.initial_state();
        let mut legal = Vec::new();
        for dir in parse_action_list(moves).expect("benchmark moves parse") {
            if let GameUpdate::NextState(next, _) = step(&level, &game, UserAction::Move(dir)) {
                game = next;
                legal.push(dir);
            }
        }

        group.throughput(Throughput::Elements(legal.len() as u64));
        group.bench_with_input(BenchmarkId::new("history", name), &legal, |b, legal| {
            b.iter(|| black_box(replay(&level, legal.iter().copied())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_step, bench_replay);
criterion_main!(benches);
