use floorplan_core::{GenerationTuning, PlotSize, RoomId, RoomSpec};
use floorplan_system_generation::{build_attempt, generate_layouts};

fn sample_rooms() -> Vec<RoomSpec> {
    vec![
        RoomSpec::new(RoomId::new(1), 10, 12),
        RoomSpec::new(RoomId::new(2), 15, 8),
        RoomSpec::new(RoomId::new(3), 7, 14),
        RoomSpec::new(RoomId::new(4), 20, 10),
        RoomSpec::new(RoomId::new(5), 12, 12),
    ]
}

#[test]
fn deterministic_replay_produces_identical_sequences() {
    let rooms = sample_rooms();
    let plot = PlotSize::new(20, 20);

    let first = generate_layouts(&rooms, plot, 20, 500).expect("replay run one");
    let second = generate_layouts(&rooms, plot, 20, 500).expect("replay run two");

    assert_eq!(first, second, "replay diverged between runs");
}

#[test]
fn attempts_are_reproducible_per_seed() {
    let rooms = sample_rooms();
    let plot = PlotSize::new(40, 40);
    let tuning = GenerationTuning::default();

    for seed in 0..25 {
        let first = build_attempt(&rooms, plot, &tuning, seed);
        let second = build_attempt(&rooms, plot, &tuning, seed);
        assert_eq!(first, second, "attempt {seed} diverged");
    }
}

#[test]
fn attempt_seeds_are_independent_of_each_other() {
    // Running attempt 7 alone must match attempt 7 inside a loop over many
    // seeds; a shared random source would break this.
    let rooms = sample_rooms();
    let plot = PlotSize::new(40, 40);
    let tuning = GenerationTuning::default();

    let isolated = build_attempt(&rooms, plot, &tuning, 7);
    let mut from_sequence = None;
    for seed in 0..10 {
        let attempt = build_attempt(&rooms, plot, &tuning, seed);
        if seed == 7 {
            from_sequence = attempt;
        }
    }

    assert_eq!(isolated, from_sequence);
}
