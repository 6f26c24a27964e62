use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use plum_arena::engines::engine_trait::Difficulty;
use plum_arena::engines::move_selector::MoveSelector;
use plum_arena::move_generation::board::Board;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
    legal_moves: usize,
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        legal_moves: 20,
    },
    BenchCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        legal_moves: 48,
    },
    BenchCase {
        name: "italian_middlegame",
        fen: "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        legal_moves: 46,
    },
];

fn bench_legal_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("legal_moves_san");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for case in CASES {
        let board = Board::from_fen(case.fen).expect("benchmark FEN should parse");
        assert_eq!(
            board.legal_moves().len(),
            case.legal_moves,
            "legal move count mismatch for {}",
            case.name
        );

        group.throughput(Throughput::Elements(case.legal_moves as u64));
        group.bench_with_input(BenchmarkId::from_parameter(case.name), &board, |b, board| {
            b.iter(|| black_box(board.legal_moves()));
        });
    }

    group.finish();
}

fn bench_select_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_move");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in CASES {
        let board = Board::from_fen(case.fen).expect("benchmark FEN should parse");

        for difficulty in Difficulty::ALL {
            let mut selector = MoveSelector::seeded(difficulty, 0x5EED);
            assert!(
                selector.select_move(&board).is_some(),
                "{} should find a move in {}",
                difficulty,
                case.name
            );

            group.bench_with_input(
                BenchmarkId::new(difficulty.as_str(), case.name),
                &board,
                |b, board| {
                    b.iter(|| black_box(selector.select_move(black_box(board))));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(move_selector_benches, bench_legal_moves, bench_select_move);
criterion_main!(move_selector_benches);
