use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use quince_chess::board::board::{Board, STANDARD_POSITION};
use quince_chess::board::piece::Color;
use quince_chess::rules::check::{is_check, is_checkmate};
use quince_chess::rules::valid_moves::valid_moves;

#[derive(Clone, Copy)]
struct EnumerationCase {
    name: &'static str,
    position: &'static str,
    color: Color,
    expected_destinations: usize,
}

#[derive(Clone, Copy)]
struct MateCase {
    name: &'static str,
    position: &'static str,
    color: Color,
    expected_mate: bool,
}

const ENUMERATION_CASES: &[EnumerationCase] = &[
    EnumerationCase {
        name: "startpos_white",
        position: STANDARD_POSITION,
        color: Color::White,
        expected_destinations: 20,
    },
    EnumerationCase {
        name: "knight_endgame_white",
        position: "4k3/8/8/4N3/8/8/8/4K3",
        color: Color::White,
        expected_destinations: 13,
    },
];

const MATE_CASES: &[MateCase] = &[
    MateCase {
        name: "scholars_mate",
        position: "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR",
        color: Color::Black,
        expected_mate: true,
    },
    MateCase {
        name: "two_rook_mate",
        position: "R3k3/1R6/8/8/8/8/8/4K3",
        color: Color::Black,
        expected_mate: true,
    },
    MateCase {
        name: "escapable_check",
        position: "rnb1kbnr/ppp1pppp/8/8/4P3/8/PPP2PPP/RNBqKBNR",
        color: Color::White,
        expected_mate: false,
    },
];

fn count_destinations(board: &Board, color: Color) -> usize {
    board
        .squares_of_color(color)
        .into_iter()
        .map(|square| valid_moves(board, square).len())
        .sum()
}

fn bench_move_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_enumeration");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));

    for case in ENUMERATION_CASES {
        let board =
            Board::from_position_string(case.position).expect("benchmark position should parse");

        // Correctness guard before benchmarking.
        let warmup = count_destinations(&board, case.color);
        assert_eq!(
            warmup, case.expected_destinations,
            "destination count mismatch in warmup for {}",
            case.name
        );

        group.bench_with_input(
            BenchmarkId::from_parameter(case.name),
            &board,
            |b, board| {
                b.iter(|| {
                    let count = count_destinations(black_box(board), black_box(case.color));
                    assert_eq!(count, case.expected_destinations);
                    black_box(count)
                });
            },
        );
    }

    group.finish();
}

fn bench_mate_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("mate_detection");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));

    for case in MATE_CASES {
        let board =
            Board::from_position_string(case.position).expect("benchmark position should parse");

        let warmup = is_check(&board, case.color) && is_checkmate(&board, case.color);
        assert_eq!(
            warmup, case.expected_mate,
            "mate verdict mismatch in warmup for {}",
            case.name
        );

        group.bench_with_input(
            BenchmarkId::from_parameter(case.name),
            &board,
            |b, board| {
                b.iter(|| {
                    let board = black_box(board);
                    let verdict =
                        is_check(board, case.color) && is_checkmate(board, case.color);
                    assert_eq!(verdict, case.expected_mate);
                    black_box(verdict)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(rules_benches, bench_move_enumeration, bench_mate_detection);
criterion_main!(rules_benches);
