use std::env;
use std::path::PathBuf;

use bevy_utils::tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use focus_engine::components::agent::{CombatStats, ProfessionSkills};
use focus_engine::rules::catalog::{AbilityId, Archetype};
use focus_engine::{AgentSpec, FocusConfigs, FocusEngine, FocusEventKind};

struct DemoArgs {
    config: Option<PathBuf>,
    agents: u32,
    seconds: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = parse_args(env::args().collect());
    let configs = match &args.config {
        Some(path) => FocusConfigs::load_from_path(path)?,
        None => match FocusConfigs::load_default() {
            Ok(configs) => configs,
            Err(err) => {
                warn!("{}; using built-in defaults", err);
                FocusConfigs::default()
            }
        },
    };

    let mut engine = FocusEngine::new(configs);
    let agents: Vec<_> = (0..args.agents)
        .map(|index| engine.spawn_agent(demo_agent(index)))
        .collect();
    info!("spawned {} agents", agents.len());
    let repertoires: Vec<Vec<AbilityId>> = (0..args.agents)
        .map(|index| engine.catalog().abilities_for(primary_for(index)))
        .collect();

    let ticks_per_second = u64::from(engine.clock().ticks_per_second);
    let total_ticks = u64::from(args.seconds) * ticks_per_second;
    let mut breakdowns = 0;
    let mut incapacitations = 0;

    for tick in 0..total_ticks {
        if tick % ticks_per_second == 0 {
            let second = tick / ticks_per_second;
            for (index, id) in agents.iter().enumerate() {
                if let Some(ability) = scripted_ability(&repertoires[index], index as u64, second) {
                    engine.activate(*id, ability)?;
                }
                engine.set_resting(*id, (second + index as u64) % 20 >= 15)?;
            }
        }
        for event in engine.tick() {
            match event.kind {
                FocusEventKind::Breakdown { .. } => breakdowns += 1,
                FocusEventKind::Incapacitated => incapacitations += 1,
                _ => {}
            }
        }
    }
    engine.end_day();
    engine.tick();

    println!(
        "{} ticks, {} breakdowns, {} incapacitations",
        engine.clock().tick,
        breakdowns,
        incapacitations
    );
    for snapshot in engine.snapshots() {
        println!(
            "agent {:>3}: focus {:>6.1}/{:<6.1} exhaustion {:>5.1} spent {:>8.1} motivation {:?} active {:?}",
            snapshot.agent_id.0,
            snapshot.current_focus,
            snapshot.max_focus,
            snapshot.exhaustion_level,
            snapshot.total_focus_spent,
            snapshot.motivation,
            snapshot.active_abilities,
        );
    }
    Ok(())
}

fn primary_for(index: u32) -> Archetype {
    Archetype::ALL[index as usize % Archetype::ALL.len()]
}

fn demo_agent(index: u32) -> AgentSpec {
    let primary = primary_for(index);
    let spread = (index * 17 % 50) as f32;
    AgentSpec::new(primary)
        .with_stats(CombatStats {
            finesse: 40.0 + spread,
            physique: 90.0 - spread,
            arcane: 50.0 + spread / 2.0,
        })
        .with_skills(ProfessionSkills {
            crafting: 20.0 + spread,
            gathering: 70.0 - spread,
            healing: 30.0 + spread,
            teaching: 25.0 + spread / 2.0,
            refining: 60.0 - spread / 2.0,
        })
        .with_drive((index % 10) as f32 / 10.0)
}

/// Deterministic request script: every few seconds each agent tries one of
/// its primary archetype's abilities.
fn scripted_ability(candidates: &[AbilityId], index: u64, second: u64) -> Option<AbilityId> {
    if (second + index) % 3 != 0 || candidates.is_empty() {
        return None;
    }
    Some(candidates[((second / 3) + index) as usize % candidates.len()])
}

fn parse_args(args: Vec<String>) -> DemoArgs {
    let mut iter = args.iter();
    let mut parsed = DemoArgs {
        config: None,
        agents: 16,
        seconds: 120,
    };
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                if let Some(value) = iter.next() {
                    parsed.config = Some(PathBuf::from(value));
                }
            }
            "--agents" => {
                if let Some(value) = iter.next().and_then(|v| v.parse().ok()) {
                    parsed.agents = value;
                }
            }
            "--seconds" => {
                if let Some(value) = iter.next().and_then(|v| v.parse().ok()) {
                    parsed.seconds = value;
                }
            }
            _ => {}
        }
    }
    parsed
}
