//! Objective state machine and run accumulator tests.
//!
//! A moment is driven the way a host loop drives it: start, feed events,
//! tick the timer, then hand the finished state to the run.

use std::sync::Arc;

use rogue_pitch::run::RewardCategory;
use rogue_pitch::{
    EffectCatalog, EffectDefinition, EffectId, Engine, EngineConfig, EventContext, EventKind,
    GameTime, ObjectiveDefinition, ObjectiveKind, ObjectivePhase, ObjectiveState, RewardConfig,
    RunAccumulator, Stat,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn started(def: &ObjectiveDefinition) -> ObjectiveState {
    init_tracing();
    let mut state = ObjectiveState::new(def);
    state.start();
    state
}

/// Tick in 16 ms frames until completion or `limit_ms` elapses.
fn run_clock(state: &mut ObjectiveState, limit_ms: u64) {
    let mut elapsed = 0;
    while elapsed < limit_ms && !state.is_completed() {
        state.tick(16);
        elapsed += 16;
    }
}

#[test]
fn test_survive_single_goal_against_loses_immediately() {
    let def = ObjectiveDefinition::new(ObjectiveKind::Survive, 45_000);
    let mut state = started(&def);
    run_clock(&mut state, 10_000);
    assert_eq!(state.phase(), ObjectivePhase::Running);

    state.apply(EventKind::GoalAgainst, &EventContext::new());

    let snapshot = state.snapshot();
    assert!(snapshot.completed);
    assert!(!snapshot.won);
    assert!(snapshot.time_remaining_ms > 30_000);
}

#[test]
fn test_defend_level_scores_lose() {
    // Open 1-0 up, concede once: level, which loses on the spot.
    let def = ObjectiveDefinition::new(ObjectiveKind::Defend, 20_000).with_starting_score(1, 0);
    let mut state = started(&def);
    state.apply(EventKind::GoalAgainst, &EventContext::new());
    assert_eq!(state.outcome(), Some(false));

    // From 2-1, conceding levels the score.
    let def = ObjectiveDefinition::new(ObjectiveKind::Defend, 20_000).with_starting_score(2, 1);
    let mut state = started(&def);
    state.apply(EventKind::GoalAgainst, &EventContext::new());
    assert_eq!(state.snapshot().score_for, state.snapshot().score_against);
    assert_eq!(state.outcome(), Some(false));
}

#[test]
fn test_defend_strict_lead_at_timeout_wins() {
    let def = ObjectiveDefinition::new(ObjectiveKind::Defend, 20_000).with_starting_score(2, 0);
    let mut state = started(&def);
    state.apply(EventKind::GoalAgainst, &EventContext::new());
    assert_eq!(state.phase(), ObjectivePhase::Running);

    run_clock(&mut state, 25_000);
    assert_eq!(state.outcome(), Some(true));
    assert_eq!(state.snapshot().time_remaining_ms, 0);
}

#[test]
fn test_turnover_first_steal_wins() {
    let def = ObjectiveDefinition::new(ObjectiveKind::Turnover, 15_000);
    let mut state = started(&def);
    state.apply(EventKind::Steal, &EventContext::new().succeeded(false));
    assert!(!state.is_completed());
    state.apply(EventKind::Steal, &EventContext::new().succeeded(true));
    assert_eq!(state.outcome(), Some(true));
}

#[test]
fn test_completed_moment_ignores_everything() {
    let def = ObjectiveDefinition::new(ObjectiveKind::Score, 15_000);
    let mut state = started(&def);
    state.apply(EventKind::GoalFor, &EventContext::new());
    let done = state.snapshot();

    for _ in 0..3 {
        state.apply(EventKind::GoalAgainst, &EventContext::new());
        state.apply(EventKind::GoalFor, &EventContext::new());
    }
    run_clock(&mut state, 20_000);
    assert_eq!(state.snapshot(), done);
}

#[test]
fn test_full_run_reward() {
    init_tracing();
    let moments = ObjectiveDefinition::list_from_json(
        r#"[
            { "name": "Kick-off", "kind": "score", "durationMs": 30000 },
            { "name": "Park the bus", "kind": "survive", "durationMs": 20000 },
            { "name": "Derby", "kind": "reboundGoal", "durationMs": 40000, "boss": true }
        ]"#,
    )
    .unwrap();

    let mut run = RunAccumulator::new();

    let mut kickoff = started(&moments[0]);
    kickoff.apply(EventKind::GoalFor, &EventContext::new().assisted());
    assert!(run.record_moment(&moments[0], &kickoff));

    let mut bus = started(&moments[1]);
    assert!(!run.record_moment(&moments[1], &bus), "still running");
    run_clock(&mut bus, 20_000);
    assert!(run.record_moment(&moments[1], &bus));

    let mut derby = started(&moments[2]);
    derby.apply(EventKind::GoalAgainst, &EventContext::new());
    derby.apply(EventKind::GoalFor, &EventContext::new());
    derby.apply(EventKind::GoalFor, &EventContext::new().rebound());
    assert!(run.record_moment(&moments[2], &derby));

    let summary = run.finish(&RewardConfig::default());
    let totals = &summary.totals;
    assert_eq!(totals.moments_won, 3);
    assert_eq!(totals.moments_lost, 0);
    assert_eq!(totals.goals_for, 3);
    assert_eq!(totals.goals_against, 1);
    assert_eq!(totals.boss_wins, 1);
    assert_eq!(totals.clean_sheets, 2);
    assert_eq!(totals.rebound_goals, 1);

    let reward = &summary.reward;
    assert_eq!(reward.amount(RewardCategory::MomentsWon), 150);
    assert_eq!(reward.amount(RewardCategory::BossWins), 150);
    assert_eq!(reward.amount(RewardCategory::CleanSheets), 50);
    assert_eq!(reward.amount(RewardCategory::ReboundGoals), 10);
    assert_eq!(reward.amount(RewardCategory::GoalDifference), 10);
    assert_eq!(reward.amount(RewardCategory::Flawless), 200);
    assert_eq!(reward.total, 100 + 150 + 150 + 50 + 10 + 10 + 200);
}

#[test]
fn test_events_drive_engine_and_objective_together() {
    init_tracing();
    let mut catalog = EffectCatalog::new();
    catalog
        .register(
            EffectDefinition::new(EffectId::new(1), "Celebration")
                .on(EventKind::GoalFor)
                .with_behavior(rogue_pitch::EffectBehavior::buff(Stat::Stamina, 25.0, 5_000)),
        )
        .unwrap();
    let mut engine = Engine::new(Arc::new(catalog), EngineConfig::default()).unwrap();
    engine.pick_effect(EffectId::new(1), &mut ()).unwrap();

    let def = ObjectiveDefinition::new(ObjectiveKind::MultiGoal, 60_000).with_target(2);
    let mut moment = started(&def);
    engine.begin_moment();

    let mut now = GameTime::ZERO;
    for _ in 0..2 {
        now = now.after(1_000);
        let ctx = EventContext::new();
        engine.emit(EventKind::GoalFor, &ctx, now, &mut ());
        moment.apply(EventKind::GoalFor, &ctx);
        moment.tick(1_000);
    }

    assert_eq!(moment.outcome(), Some(true));
    assert_eq!(engine.proc_count(EffectId::new(1)), 2);
    assert_eq!(engine.modified_stat(20.0, Stat::Stamina, now), 25.0);
}
