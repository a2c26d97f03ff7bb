use std::sync::{Arc, Mutex};

use focus_engine::components::abilities::AbilityActivationRequest;
use focus_engine::components::agent::{AgentId, CombatStats, ProfessionSkills};
use focus_engine::components::focus::{BreakdownRisk, FocusPool, Incapacitated};
use focus_engine::components::growth::{Motivation, MotivationContext};
use focus_engine::core::world::EngineError;
use focus_engine::rules::activation::RejectReason;
use focus_engine::rules::catalog::{AbilityId, Archetype};
use focus_engine::rules::drain::ExpiryReason;
use focus_engine::{AgentSpec, FocusConfigs, FocusEngine, FocusEvent, FocusEventKind};

fn engine() -> FocusEngine {
    FocusEngine::new(FocusConfigs::default())
}

fn pool(max: f32, current: f32, regen: f32, primary: Archetype) -> FocusPool {
    let mut pool = FocusPool::new(max, regen, primary);
    pool.set_focus(current);
    pool
}

fn rejections(events: &[FocusEvent]) -> Vec<(AgentId, RejectReason)> {
    events
        .iter()
        .filter_map(|event| match event.kind {
            FocusEventKind::Rejected { reason, .. } => Some((event.agent_id, reason)),
            _ => None,
        })
        .collect()
}

#[test]
fn resting_toggle_drains_past_the_regen_clamp() {
    // Drain caps resting regen at the combat rate (3/s * 0.5), so a 6/s
    // toggle costs 0.2 upkeep plus 0.15 net per tick.
    let mut engine = engine();
    let id = engine.spawn_agent(
        AgentSpec::new(Archetype::Finesse)
            .with_stats(CombatStats {
                finesse: 80.0,
                ..Default::default()
            })
            .with_pool(pool(100.0, 100.0, 3.0, Archetype::Finesse)),
    );
    engine.set_resting(id, true).unwrap();
    engine.activate(id, AbilityId::BladeDance).unwrap();
    engine.run_ticks(150);

    let pool = engine.pool(id).unwrap();
    assert!((pool.current_focus - 47.5).abs() < 0.05, "{}", pool.current_focus);
    assert_eq!(pool.current_regen_rate, 1.5);
    assert_eq!(pool.total_drain_rate, 6.0);
    assert_eq!(pool.exhaustion_level, 0.0);
    assert!(engine.has_active(id, AbilityId::BladeDance));
}

#[test]
fn resting_without_drain_regenerates_double() {
    let mut engine = engine();
    let id = engine.spawn_agent(
        AgentSpec::new(Archetype::Physique).with_pool(pool(100.0, 50.0, 3.0, Archetype::Physique)),
    );
    engine.set_resting(id, true).unwrap();
    engine.run_ticks(30);
    assert!((engine.pool(id).unwrap().current_focus - 56.0).abs() < 1e-3);

    engine.set_resting(id, false).unwrap();
    engine.run_ticks(30);
    assert!((engine.pool(id).unwrap().current_focus - 59.0).abs() < 1e-3);
}

#[test]
fn low_focus_builds_exhaustion() {
    let mut engine = engine();
    let id = engine.spawn_agent(
        AgentSpec::new(Archetype::Physique).with_pool(pool(50.0, 5.0, 0.0, Archetype::Physique)),
    );
    engine.run_ticks(120);
    let pool = engine.pool(id).unwrap();
    assert!((pool.exhaustion_level - 10.0).abs() < 1e-3);
    assert_eq!(pool.current_focus, 5.0);
    assert!(!pool.is_breakdown_risk);
}

#[test]
fn unaffordable_burst_changes_nothing() {
    let mut engine = engine();
    let id = engine.spawn_agent(
        AgentSpec::new(Archetype::Finesse).with_pool(pool(40.0, 10.0, 0.0, Archetype::Finesse)),
    );
    let before = engine.snapshot(id).unwrap();
    engine.activate(id, AbilityId::Lunge).unwrap();
    let events = engine.tick().to_vec();

    assert_eq!(rejections(&events), vec![(id, RejectReason::NotEnoughFocus)]);
    let after = engine.snapshot(id).unwrap();
    assert_eq!(after.current_focus, 10.0);
    assert_eq!(after.exhaustion_level, before.exhaustion_level);
    assert!(after.active_abilities.is_empty());
    assert!(!engine.has_component::<AbilityActivationRequest>(id));
}

#[test]
fn burst_with_exact_focus_empties_the_pool() {
    let mut engine = engine();
    let id = engine.spawn_agent(
        AgentSpec::new(Archetype::Finesse).with_pool(pool(100.0, 15.0, 0.0, Archetype::Finesse)),
    );
    engine.activate(id, AbilityId::Lunge).unwrap();
    let events = engine.tick().to_vec();
    assert!(events.iter().any(|event| matches!(
        event.kind,
        FocusEventKind::Activated {
            ability_id: AbilityId::Lunge,
            ..
        }
    )));
    assert_eq!(engine.pool(id).unwrap().current_focus, 0.0);
    assert_eq!(engine.growth(id).unwrap().total_focus_spent, 15.0);
    assert!((engine.combat_modifiers(id).unwrap().attack_speed - 1.3).abs() < 1e-6);
}

#[test]
fn toggles_are_idempotent_and_cancel() {
    let mut engine = engine();
    let id = engine.spawn_agent(AgentSpec::new(Archetype::Physique));
    engine.activate(id, AbilityId::IronSkin).unwrap();
    engine.tick();
    engine.activate(id, AbilityId::IronSkin).unwrap();
    let events = engine.tick().to_vec();

    assert_eq!(rejections(&events), vec![(id, RejectReason::AlreadyActive)]);
    let ledger = engine.ledger(id).unwrap();
    assert_eq!(ledger.len(), 1);
    assert!((engine.magnitude(id, AbilityId::IronSkin) - 0.2).abs() < 1e-6);
    assert!((engine.combat_modifiers(id).unwrap().damage_reduction - 0.2).abs() < 1e-6);

    engine.toggle_off(id, AbilityId::IronSkin).unwrap();
    let events = engine.tick().to_vec();
    assert!(events
        .iter()
        .any(|event| event.kind == FocusEventKind::ToggledOff {
            ability_id: AbilityId::IronSkin
        }));
    assert!(!engine.has_active(id, AbilityId::IronSkin));
    assert_eq!(engine.pool(id).unwrap().total_drain_rate, 0.0);

    // Cancelling an inactive toggle is a silent no-op.
    engine.toggle_off(id, AbilityId::IronSkin).unwrap();
    assert!(engine.tick().is_empty());
}

#[test]
fn timed_burst_expires() {
    let mut engine = engine();
    let id = engine.spawn_agent(AgentSpec::new(Archetype::Finesse));
    engine.activate(id, AbilityId::Lunge).unwrap();
    let events = engine.run_ticks(4 * 30 + 2);
    let expiries: Vec<_> = events
        .iter()
        .filter(|event| {
            event.kind
                == FocusEventKind::Expired {
                    ability_id: AbilityId::Lunge,
                    reason: ExpiryReason::DurationElapsed,
                }
        })
        .collect();
    assert_eq!(expiries.len(), 1);
    assert!(!engine.has_active(id, AbilityId::Lunge));
}

#[test]
fn locked_ability_is_reported_to_diagnostics() {
    let seen: Arc<Mutex<Vec<FocusEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let mut engine = engine();
    engine.set_diagnostic_hook(Box::new(move |event: &FocusEvent| {
        sink.lock().unwrap().push(event.clone());
    }));
    let id = engine.spawn_agent(
        AgentSpec::new(Archetype::Finesse).with_pool(pool(100.0, 100.0, 0.0, Archetype::Finesse)),
    );
    engine.activate(id, AbilityId::ShadowStep).unwrap();
    engine.tick();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0].kind,
        FocusEventKind::Rejected {
            ability_id: AbilityId::ShadowStep,
            reason: RejectReason::Locked
        }
    );
    assert_eq!(engine.pool(id).unwrap().current_focus, 100.0);
}

#[test]
fn events_are_merged_in_agent_order() {
    let mut engine = engine();
    let ids: Vec<_> = (0..6)
        .map(|_| {
            engine.spawn_agent(
                AgentSpec::new(Archetype::Finesse)
                    .with_pool(pool(100.0, 1.0, 0.0, Archetype::Finesse)),
            )
        })
        .collect();
    for id in ids.iter().rev() {
        engine.activate(*id, AbilityId::Lunge).unwrap();
    }
    let events = engine.tick().to_vec();
    let order: Vec<AgentId> = events.iter().map(|event| event.agent_id).collect();
    assert_eq!(order, ids);
}

#[test]
fn empty_exhausted_agent_is_incapacitated_then_recovers() {
    let mut engine = engine();
    let id = engine.spawn_agent(
        AgentSpec::new(Archetype::Physique)
            .with_stats(CombatStats {
                physique: 80.0,
                ..Default::default()
            })
            .with_pool(pool(100.0, 100.0, 6.0, Archetype::Physique)),
    );
    engine.activate(id, AbilityId::Berserk).unwrap();
    engine.tick();
    assert!(engine.has_active(id, AbilityId::Berserk));

    {
        let mut pool = engine.pool_mut(id).unwrap();
        pool.set_focus(0.3);
        pool.exhaustion_level = 100.0;
    }
    let events = engine.tick().to_vec();
    let entry_tick = engine.clock().tick - 1;
    assert!(events.contains(&FocusEvent {
        agent_id: id,
        tick: entry_tick,
        kind: FocusEventKind::Expired {
            ability_id: AbilityId::Berserk,
            reason: ExpiryReason::Incapacitated,
        },
    }));
    assert!(events
        .iter()
        .any(|event| event.kind == FocusEventKind::Incapacitated));
    assert!(engine.pool(id).unwrap().is_incapacitated);
    assert!(engine.has_component::<Incapacitated>(id));
    assert!(engine.ledger(id).unwrap().is_empty());

    engine.activate(id, AbilityId::IronSkin).unwrap();
    let events = engine.tick().to_vec();
    assert_eq!(rejections(&events), vec![(id, RejectReason::Incapacitated)]);

    // 10% of 6/s refills half the pool in ~2500 ticks; exhaustion drops
    // under 50 long before that.
    let mut recovered_at = None;
    for _ in 0..3_000 {
        let events = engine.tick().to_vec();
        let pool = engine.pool(id).unwrap();
        assert!(pool.current_focus >= 0.0 && pool.current_focus <= pool.max_focus);
        if events.iter().any(|event| event.kind == FocusEventKind::Recovered) {
            recovered_at = Some(engine.clock().tick - 1);
            break;
        }
        assert!(pool.is_incapacitated);
    }
    let recovered_at = recovered_at.expect("agent never recovered");
    let served = recovered_at - entry_tick;
    assert!(served >= 2_490 && served <= 2_510, "served {}", served);

    let pool = engine.pool(id).unwrap();
    assert!(!pool.is_incapacitated);
    assert_eq!(pool.exhaustion_level, 50.0);
    assert!(pool.focus_percent() >= 0.5);
    assert!(!engine.has_component::<Incapacitated>(id));
}

#[test]
fn per_use_abilities_charge_on_action() {
    let mut engine = engine();
    let id = engine.spawn_agent(
        AgentSpec::new(Archetype::Crafting)
            .with_skills(ProfessionSkills {
                crafting: 30.0,
                ..Default::default()
            })
            .with_pool(pool(100.0, 100.0, 0.0, Archetype::Crafting)),
    );
    engine.activate(id, AbilityId::BatchCraft).unwrap();
    engine.tick();

    let modifiers = *engine.profession_modifiers(id).unwrap();
    assert_eq!(modifiers.targets(), 3);
    assert!(modifiers.speed > 1.0);
    assert!(modifiers.quality < 1.0);
    assert_eq!(engine.pool(id).unwrap().current_focus, 100.0);

    let outcome = engine
        .perform_profession_action(id, Archetype::Crafting, 60.0)
        .unwrap();
    // 4 * (1 - 0.05 * 3)
    assert!((outcome.focus_spent - 3.4).abs() < 1e-5);
    assert!((engine.pool(id).unwrap().current_focus - 96.6).abs() < 1e-4);
    assert!((engine.growth(id).unwrap().total_focus_spent - 3.4).abs() < 1e-5);
    // (10 + 3.4 * 0.02 * 10) on a low-effort day.
    assert!((outcome.experience - 10.68 * 0.75).abs() < 1e-3);
    assert!(outcome.expired.is_empty());
    assert!(outcome.modifiers.quality < 1.0);
    assert!((outcome.quality - 60.0 * outcome.modifiers.quality).abs() < 1e-4);

    let other = engine
        .perform_profession_action(id, Archetype::Healing, 60.0)
        .unwrap();
    assert_eq!(other.focus_spent, 0.0);

    assert_eq!(
        engine.perform_profession_action(id, Archetype::Finesse, 60.0),
        Err(EngineError::NotAProfession(Archetype::Finesse))
    );
}

#[test]
fn action_quality_is_held_within_configured_bounds() {
    let mut configs = FocusConfigs::default();
    configs.profession.min_quality = 20.0;
    configs.profession.max_quality = 80.0;
    let mut engine = FocusEngine::new(configs);
    let id = engine.spawn_agent(AgentSpec::new(Archetype::Crafting));

    let plain = |engine: &mut FocusEngine, base: f32| {
        engine
            .perform_profession_action(id, Archetype::Crafting, base)
            .unwrap()
            .quality
    };
    assert_eq!(plain(&mut engine, 50.0), 50.0);
    assert_eq!(plain(&mut engine, 5.0), 20.0);
    assert_eq!(plain(&mut engine, 150.0), 80.0);
}

#[test]
fn incapacitated_agents_earn_nothing_from_actions() {
    let mut engine = engine();
    let id = engine.spawn_agent(
        AgentSpec::new(Archetype::Crafting)
            .with_skills(ProfessionSkills {
                crafting: 30.0,
                ..Default::default()
            })
            .with_pool(pool(100.0, 0.0, 0.0, Archetype::Crafting)),
    );
    engine.pool_mut(id).unwrap().exhaustion_level = 100.0;
    engine.tick();
    assert!(engine.pool(id).unwrap().is_incapacitated);

    let outcome = engine
        .perform_profession_action(id, Archetype::Crafting, 60.0)
        .unwrap();
    assert_eq!(outcome.focus_spent, 0.0);
    assert_eq!(outcome.experience, 0.0);
    assert_eq!(outcome.quality, 60.0);
    assert!(outcome.expired.is_empty());
    assert_eq!(engine.growth(id).unwrap().total_focus_spent, 0.0);
}

#[test]
fn breakdown_risk_tags_rolls_and_clears() {
    let mut engine = engine();
    let id = engine.spawn_agent(
        AgentSpec::new(Archetype::Physique).with_pool(pool(100.0, 10.0, 0.0, Archetype::Physique)),
    );
    engine.pool_mut(id).unwrap().exhaustion_level = 95.0;

    let events = engine.tick().to_vec();
    let entered = events
        .iter()
        .find(|event| event.kind == FocusEventKind::BreakdownRiskEntered)
        .map(|event| event.tick)
        .expect("risk was not entered");
    assert!(engine.has_component::<BreakdownRisk>(id));
    assert!(engine.pool(id).unwrap().is_breakdown_risk);

    let events = engine.run_ticks(3_000);
    let breakdowns: Vec<u64> = events
        .iter()
        .filter(|event| matches!(event.kind, FocusEventKind::Breakdown { .. }))
        .map(|event| event.tick)
        .collect();
    assert!(!breakdowns.is_empty());
    assert!(breakdowns
        .iter()
        .all(|tick| (tick - entered) % 60 == 0 && *tick > entered));
    assert!(engine.has_component::<BreakdownRisk>(id));
    assert!(!engine.pool(id).unwrap().is_incapacitated);

    {
        let mut pool = engine.pool_mut(id).unwrap();
        pool.exhaustion_level = 10.0;
        pool.set_focus(100.0);
    }
    let events = engine.tick().to_vec();
    assert!(events
        .iter()
        .any(|event| event.kind == FocusEventKind::BreakdownRiskCleared));
    assert!(!engine.has_component::<BreakdownRisk>(id));
    assert!(!engine.pool(id).unwrap().is_breakdown_risk);
}

#[test]
fn day_close_rates_effort_and_resets() {
    let mut engine = engine();
    let id = engine.spawn_agent(
        AgentSpec::new(Archetype::Finesse).with_pool(pool(100.0, 100.0, 0.0, Archetype::Finesse)),
    );
    for ability in [AbilityId::Lunge, AbilityId::SecondWind, AbilityId::Quicken] {
        engine.activate(id, ability).unwrap();
        engine.tick();
    }
    assert_eq!(engine.growth(id).unwrap().daily_focus_spent, 50.0);

    engine.end_day();
    engine.tick();
    let growth = engine.growth(id).unwrap();
    assert_eq!(growth.high_effort_days, 1);
    assert_eq!(growth.daily_focus_spent, 0.0);
    assert_eq!(growth.total_focus_spent, 50.0);
    assert_eq!(engine.clock().day, 2);

    engine.end_day();
    engine.tick();
    assert_eq!(engine.growth(id).unwrap().low_effort_days, 1);
    assert!((engine.attribute_bonus(id).unwrap() - 0.05).abs() < 1e-6);
}

#[test]
fn motivation_follows_drive_and_pressure() {
    let mut engine = engine();
    let id = engine.spawn_agent(AgentSpec::new(Archetype::Arcane).with_drive(0.9));
    engine.tick();
    assert_eq!(engine.growth(id).unwrap().motivation, Motivation::Passionate);

    engine
        .set_motivation_context(
            id,
            MotivationContext {
                survival: true,
                desperate: false,
            },
        )
        .unwrap();
    engine.run_ticks(299);
    assert_eq!(engine.growth(id).unwrap().motivation, Motivation::Passionate);
    engine.tick();
    let growth = engine.growth(id).unwrap();
    assert_eq!(growth.motivation, Motivation::Survival);
    assert_eq!(growth.target_usage_percent, 1.0);
}

#[test]
fn unknown_agents_are_errors() {
    let mut engine = engine();
    assert_eq!(
        engine.activate(AgentId(99), AbilityId::Lunge),
        Err(EngineError::UnknownAgent(AgentId(99)))
    );
    assert!(engine.snapshot(AgentId(99)).is_none());
}

fn scripted_run(ticks: u64) -> (Vec<FocusEvent>, Vec<focus_engine::AgentFocusSnapshot>) {
    let mut engine = engine();
    let ids: Vec<_> = (0..12u32)
        .map(|index| {
            let spread = (index * 13 % 40) as f32;
            let primary = Archetype::ALL[index as usize % Archetype::ALL.len()];
            engine.spawn_agent(
                AgentSpec::new(primary)
                    .with_stats(CombatStats {
                        finesse: 50.0 + spread,
                        physique: 90.0 - spread,
                        arcane: 60.0 + spread / 2.0,
                    })
                    .with_skills(ProfessionSkills {
                        crafting: 30.0 + spread,
                        gathering: 60.0,
                        healing: 40.0 + spread,
                        teaching: 80.0 - spread,
                        refining: 50.0,
                    })
                    .with_drive(index as f32 / 12.0)
                    .with_pool(pool(60.0 + spread, 20.0, 0.5 + spread / 40.0, primary)),
            )
        })
        .collect();

    let mut events = Vec::new();
    for tick in 0..ticks {
        for (index, id) in ids.iter().enumerate() {
            let index = index as u64;
            if (tick + index * 7) % 45 == 0 {
                let ability = AbilityId::ALL[((tick / 45 + index) % 36) as usize];
                engine.activate(*id, ability).unwrap();
            }
            if (tick + index * 11) % 200 == 0 {
                let archetype = Archetype::ALL[(index as usize + 3) % Archetype::ALL.len()];
                if archetype.is_profession() {
                    engine.perform_profession_action(*id, archetype, 50.0).unwrap();
                }
            }
        }
        if tick % 900 == 899 {
            engine.end_day();
        }
        events.extend_from_slice(engine.tick());

        for id in &ids {
            let pool = engine.pool(*id).unwrap();
            assert!(pool.current_focus >= 0.0 && pool.current_focus <= pool.max_focus);
            assert!(pool.exhaustion_level >= 0.0 && pool.exhaustion_level <= 100.0);
            let ledger = engine.ledger(*id).unwrap();
            assert!(ledger.len() <= 8);
            if pool.is_incapacitated {
                assert!(ledger.is_empty());
            }
        }
    }
    (events, engine.snapshots())
}

#[test]
fn long_runs_hold_bounds_and_replay_identically() {
    let (first_events, first_snapshots) = scripted_run(2_400);
    let (second_events, second_snapshots) = scripted_run(2_400);
    assert!(!first_events.is_empty());
    assert_eq!(first_events, second_events);
    assert_eq!(first_snapshots, second_snapshots);
}
