//! Property tests for the session controller.
//!
//! Random command/tick interleavings are applied to every workout format and
//! the controller's invariants are checked after each step.

use fitcoach_core::notes::{AmrapSettings, EmomSettings, TabataSettings};
use fitcoach_core::timer::{AmrapPlan, EmomPlan, ForTimePlan, PhasePlan, TabataBlock, TabataPlan};
use fitcoach_core::{Caller, Phase, SessionConfig, SessionController, WorkoutPlan};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Tick,
    Start,
    Pause,
    Resume,
    Reset,
    Increment,
    Decrement,
    CompleteStep(usize),
    UncompleteStep(usize),
    MemberSkip,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        8 => Just(Op::Tick),
        2 => Just(Op::Start),
        1 => Just(Op::Pause),
        1 => Just(Op::Resume),
        1 => Just(Op::Reset),
        1 => Just(Op::Increment),
        2 => Just(Op::Decrement),
        1 => (0usize..5).prop_map(Op::CompleteStep),
        1 => (0usize..5).prop_map(Op::UncompleteStep),
        1 => Just(Op::MemberSkip),
    ]
}

fn plan() -> impl Strategy<Value = WorkoutPlan> {
    prop_oneof![
        (1u32..30, 1u32..3, 0u32..5).prop_map(|(total_seconds, rounds, round_rest_seconds)| {
            WorkoutPlan::Amrap(AmrapPlan::new(AmrapSettings {
                total_seconds,
                rounds,
                round_rest_seconds,
            }))
        }),
        (1u32..4, 1u32..3, 0usize..4).prop_map(|(minutes, rotate_every, count)| {
            WorkoutPlan::Emom(EmomPlan::new(
                EmomSettings {
                    minutes,
                    rotate_every,
                },
                count,
            ))
        }),
        prop::collection::vec((1u32..6, 0u32..4, 1u32..4, 0u32..4), 1..3).prop_map(|blocks| {
            WorkoutPlan::Tabata(TabataPlan::new(
                blocks
                    .into_iter()
                    .map(|(work_seconds, rest_seconds, sets, block_rest_seconds)| TabataBlock {
                        settings: TabataSettings {
                            work_seconds,
                            rest_seconds,
                            sets,
                            block_rest_seconds,
                        },
                        exercise_count: 2,
                    })
                    .collect(),
            ))
        }),
        (1usize..5).prop_map(|steps| WorkoutPlan::ForTime(ForTimePlan::new(steps))),
    ]
}

fn phase_length(ctl: &SessionController, preparation: u32) -> u32 {
    let session = ctl.session();
    match session.phase {
        Phase::Preparation => preparation,
        phase => ctl.plan().phase_seconds(phase, &session.progress),
    }
}

proptest! {
    #[test]
    fn controller_invariants_hold(
        plan in plan(),
        preparation in 0u32..4,
        ops in prop::collection::vec(op(), 1..400),
    ) {
        let counts_up = plan.counts_up();
        let mut ctl = SessionController::new(
            plan,
            Vec::new(),
            SessionConfig { preparation_seconds: preparation, start_sound_delay_ms: 0 },
        );

        for op in ops {
            let before = ctl.session().clone();
            let was_running = ctl.is_running();
            let events = match op {
                Op::Tick => ctl.tick(),
                Op::Start => ctl.start(),
                Op::Pause => ctl.pause(),
                Op::Resume => ctl.resume(),
                Op::Reset => ctl.reset(),
                Op::Increment => ctl.increment_round_counter(),
                Op::Decrement => ctl.decrement_round_counter(),
                Op::CompleteStep(i) => ctl.complete_step(i),
                Op::UncompleteStep(i) => ctl.uncomplete_step(i),
                Op::MemberSkip => ctl.skip_phase(&Caller::MEMBER),
            };
            let after = ctl.session();

            // Ticks only move a running session.
            if matches!(op, Op::Tick) && !was_running {
                prop_assert!(events.is_empty());
                prop_assert_eq!(&before, after);
            }

            // A running countdown loses exactly one second per tick unless
            // the phase changed.
            if matches!(op, Op::Tick) && was_running && !counts_up && after.phase == before.phase
                && after.progress == before.progress
            {
                prop_assert_eq!(after.remaining_seconds + 1, before.remaining_seconds);
            }

            // The lead-in does not count toward elapsed time.
            if matches!(op, Op::Tick) && was_running {
                let step = u32::from(before.phase != Phase::Preparation);
                prop_assert_eq!(after.elapsed_seconds, before.elapsed_seconds + step);
            }

            if matches!(op, Op::MemberSkip) {
                prop_assert!(events.is_empty());
            }

            // Complete is absorbing for everything but reset.
            if before.phase == Phase::Complete && !matches!(op, Op::Reset) {
                prop_assert_eq!(after.phase, Phase::Complete);
            }

            if after.phase.is_active() && !counts_up {
                prop_assert!(after.remaining_seconds <= phase_length(&ctl, preparation));
            }

            prop_assert!(after.completed_steps.iter().all(|s| *s < ctl.plan().step_count()));
            prop_assert!(events.iter().filter(|e| e.is_completion()).count() <= 1);
        }
    }

    #[test]
    fn round_counter_never_underflows(decrements in 0usize..10, increments in 0u32..10) {
        let mut ctl = SessionController::new(
            WorkoutPlan::Amrap(AmrapPlan::new(AmrapSettings {
                total_seconds: 60,
                rounds: 1,
                round_rest_seconds: 0,
            })),
            Vec::new(),
            SessionConfig::default(),
        );
        for _ in 0..increments {
            ctl.increment_round_counter();
        }
        for _ in 0..decrements {
            ctl.decrement_round_counter();
        }
        let expected = increments.saturating_sub(decrements as u32);
        prop_assert_eq!(ctl.session().rounds_completed_manually, expected);
    }
}
