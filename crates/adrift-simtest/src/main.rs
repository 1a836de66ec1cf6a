//! Adrift Headless Playthrough Harness
//!
//! Validates the bundled scenario and plays scripted sessions against it.
//! Runs entirely in-process with no terminal and no stdin.
//!
//! Usage:
//!   cargo run -p adrift-simtest
//!   cargo run -p adrift-simtest -- --verbose

use std::collections::HashSet;

use adrift_logic::events::GameEvent;
use adrift_logic::object::ObjectKind;
use adrift_logic::oxygen::{self, OxygenStatus};
use adrift_logic::scenario::{ScenarioSpec, ToolSpec};
use adrift_logic::session::{Ending, GameSession};
use adrift_logic::tool::ToolKind;

// ── Scripted routes ─────────────────────────────────────────────────────

/// Lab computer → key-1 → control room cabinet → ship.
const ROUTE_VIA_COMPUTER: &[&str] = &[
    "pick cylinder-1",
    "go north",
    "pick cylinder-2",
    "go west",
    "pick cylinder-3",
    "go west",
    "go north",
    "pick access-card",
    "use access-card computer",
    "go south",
    "go east",
    "use key-1 locked-cabinet",
    "go east",
    "go south",
    "use star-tracker ship",
];

const ROUTE_SUFFOCATE: &[&str] = &["go north", "go west", "inventory"];

const ROUTE_POISONED: &[&str] = &[
    "pick cylinder-1",
    "go north",
    "pick cylinder-2",
    "go west",
    "go west",
    "go north",
    "go west",
    "pick cylinder-5",
    "use cylinder-5",
];

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Adrift Playthrough Harness ===\n");

    let mut results = Vec::new();

    // 1. Scenario data validation
    let spec = match ScenarioSpec::station() {
        Ok(spec) => spec,
        Err(e) => {
            println!("  ✗ scenario_parse: {}", e);
            println!("\n=== RESULT: 0/1 passed, 1 failed ===");
            std::process::exit(1);
        }
    };
    results.extend(validate_scenario_data(&spec, verbose));

    // 2. World graph
    results.extend(validate_world_graph(&spec, verbose));

    // 3. Oxygen rules
    results.extend(validate_oxygen_rules(verbose));

    // 4. Scripted playthroughs
    results.extend(validate_playthroughs(&spec, verbose));

    // 5. Input robustness
    results.extend(validate_input_robustness(&spec, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

/// Every tool in the scenario, on the floor or hidden in an object.
fn all_tools(spec: &ScenarioSpec) -> Vec<&ToolSpec> {
    spec.rooms
        .iter()
        .flat_map(|room| {
            room.tools
                .iter()
                .chain(room.objects.iter().flat_map(|o| o.hidden.iter()))
        })
        .collect()
}

fn start(spec: &ScenarioSpec) -> Option<GameSession> {
    spec.start_session().ok()
}

fn play(session: &mut GameSession, lines: &[&str]) -> Vec<GameEvent> {
    lines
        .iter()
        .flat_map(|line| session.play_turn(line))
        .collect()
}

// ── 1. Scenario Data ────────────────────────────────────────────────────

fn validate_scenario_data(spec: &ScenarioSpec, verbose: bool) -> Vec<TestResult> {
    println!("--- Scenario Data ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "scenario_room_count".into(),
        passed: spec.rooms.len() == 9,
        detail: format!("{} rooms loaded", spec.rooms.len()),
    });

    // Tool names are unique across the whole station
    let tools = all_tools(spec);
    let mut seen = HashSet::new();
    let dupes: Vec<&str> = tools
        .iter()
        .filter(|t| !seen.insert(t.name.as_str()))
        .map(|t| t.name.as_str())
        .collect();
    results.push(TestResult {
        name: "scenario_unique_tool_names".into(),
        passed: dupes.is_empty(),
        detail: if dupes.is_empty() {
            format!("{} tools, all names unique", tools.len())
        } else {
            format!("duplicate tool names: {}", dupes.join(", "))
        },
    });

    // Tool names survive the lowercasing command parser
    let unreachable_names: Vec<&str> = tools
        .iter()
        .map(|t| t.name.as_str())
        .filter(|n| *n != n.to_lowercase() || n.contains(char::is_whitespace))
        .collect();
    results.push(TestResult {
        name: "scenario_typable_tool_names".into(),
        passed: unreachable_names.is_empty(),
        detail: if unreachable_names.is_empty() {
            "every tool name can be typed".into()
        } else {
            format!("untypable: {}", unreachable_names.join(", "))
        },
    });

    // Every keyed door has a matching key somewhere
    let keys: HashSet<&str> = tools
        .iter()
        .filter(|t| t.kind == ToolKind::Key)
        .map(|t| t.name.as_str())
        .collect();
    let mut orphan_locks = Vec::new();
    for room in &spec.rooms {
        for key in room.doors.iter().filter_map(|d| d.key.as_deref()) {
            if !keys.contains(key) {
                orphan_locks.push(format!("{}: {}", room.name, key));
            }
        }
    }
    results.push(TestResult {
        name: "scenario_keys_exist".into(),
        passed: orphan_locks.is_empty(),
        detail: if orphan_locks.is_empty() {
            format!("{} keys for keyed doors", keys.len())
        } else {
            format!("missing keys: {}", orphan_locks.join(", "))
        },
    });

    let has_ship = spec
        .rooms
        .iter()
        .any(|r| r.objects.iter().any(|o| o.kind == ObjectKind::Ship));
    let has_tracker = tools.iter().any(|t| t.kind == ToolKind::StarTracker);
    results.push(TestResult {
        name: "scenario_win_items".into(),
        passed: has_ship && has_tracker,
        detail: format!("ship={} star_tracker={}", has_ship, has_tracker),
    });

    if verbose {
        let cylinders: Vec<&str> = tools
            .iter()
            .filter(|t| matches!(t.kind, ToolKind::OxygenCylinder { .. }))
            .map(|t| t.name.as_str())
            .collect();
        println!("  Oxygen cylinders: {}", cylinders.join(", "));
        let total_air: f32 = spec.rooms.iter().map(|r| r.oxygen).sum();
        println!("  Initial air across rooms: {:.1}", total_air);
    }

    results
}

// ── 2. World Graph ──────────────────────────────────────────────────────

fn validate_world_graph(spec: &ScenarioSpec, verbose: bool) -> Vec<TestResult> {
    println!("--- World Graph ---");
    let mut results = Vec::new();

    let (world, start) = match spec.build() {
        Ok(built) => built,
        Err(e) => {
            results.push(TestResult {
                name: "world_build".into(),
                passed: false,
                detail: format!("construction error: {}", e),
            });
            return results;
        }
    };
    results.push(TestResult {
        name: "world_build".into(),
        passed: true,
        detail: format!("{} rooms built", world.room_count()),
    });

    let reachable = world.reachable_from(start);
    results.push(TestResult {
        name: "world_all_rooms_reachable".into(),
        passed: reachable.len() == world.room_count(),
        detail: format!("{}/{} rooms reachable", reachable.len(), world.room_count()),
    });

    // Every door has a way back
    let mut one_way = Vec::new();
    for id in world.room_ids() {
        let Some(room) = world.room(id) else { continue };
        for door in room.doors() {
            let back = world
                .room(door.destination)
                .is_some_and(|dest| dest.doors().iter().any(|d| d.destination == id));
            if !back {
                one_way.push(format!("{} {}", room.name(), door.direction));
            }
        }
    }
    results.push(TestResult {
        name: "world_doors_two_way".into(),
        passed: one_way.is_empty(),
        detail: if one_way.is_empty() {
            "every door has a return door".into()
        } else {
            format!("one-way doors: {}", one_way.join(", "))
        },
    });

    let start_air = world.room(start).map(|r| r.oxygen()).unwrap_or_default();
    results.push(TestResult {
        name: "world_start_has_surplus".into(),
        passed: start_air >= oxygen::SURPLUS,
        detail: format!("start room holds {:.1}", start_air),
    });

    if verbose {
        for id in world.room_ids() {
            if let Some(view) = world.room_view(id) {
                let doors: Vec<String> = view
                    .open_doors
                    .iter()
                    .map(|(dir, to)| format!("{}→{}", dir, to))
                    .collect();
                println!(
                    "  {:15} doors=[{}] locked=[{}]",
                    view.name,
                    doors.join(", "),
                    view.locked_doors.join(", ")
                );
            }
        }
    }

    results
}

// ── 3. Oxygen Rules ─────────────────────────────────────────────────────

fn validate_oxygen_rules(_verbose: bool) -> Vec<TestResult> {
    println!("--- Oxygen Rules ---");
    let mut results = Vec::new();

    let statuses = [
        (0.0, OxygenStatus::Exhausted),
        (0.5, OxygenStatus::Low),
        (1.0, OxygenStatus::Safe),
        (1.5, OxygenStatus::Safe),
    ];
    let all_match = statuses
        .iter()
        .all(|&(reserve, expected)| oxygen::assess(reserve) == expected);
    results.push(TestResult {
        name: "oxygen_assess_thresholds".into(),
        passed: all_match,
        detail: "0 exhausted, 0.5 low, 1.0+ safe".into(),
    });

    // Leaving never creates air and never goes negative
    let mut conserved = true;
    for step in 0..=8 {
        let reserve = step as f32 * 0.25;
        let (left, carried) = oxygen::split_on_exit(reserve);
        if left < 0.0 || carried < 0.0 || left + carried > reserve.max(0.0) + f32::EPSILON {
            conserved = false;
        }
    }
    results.push(TestResult {
        name: "oxygen_exit_conserves".into(),
        passed: conserved,
        detail: "split_on_exit never creates air or goes below zero".into(),
    });

    let (left, carried) = oxygen::split_on_exit(oxygen::SURPLUS);
    results.push(TestResult {
        name: "oxygen_surplus_carryover".into(),
        passed: left == 1.0 && carried == oxygen::CARRYOVER,
        detail: format!("1.5 → left {} carried {}", left, carried),
    });

    results
}

// ── 4. Playthroughs ─────────────────────────────────────────────────────

fn validate_playthroughs(spec: &ScenarioSpec, verbose: bool) -> Vec<TestResult> {
    println!("--- Scripted Playthroughs ---");
    let mut results = Vec::new();

    let routes: [(&str, &[&str], Ending); 3] = [
        ("play_win_via_computer", ROUTE_VIA_COMPUTER, Ending::Won),
        ("play_suffocate", ROUTE_SUFFOCATE, Ending::Suffocated),
        ("play_poisoned", ROUTE_POISONED, Ending::Poisoned),
    ];

    for (name, route, expected) in routes {
        let Some(mut session) = start(spec) else {
            results.push(TestResult {
                name: name.into(),
                passed: false,
                detail: "session could not start".into(),
            });
            continue;
        };
        let events = play(&mut session, route);
        if verbose {
            println!("  {}:", name);
            for event in &events {
                println!("    {}", event);
            }
        }
        let turns_after_end = session.play_turn("inventory").len();
        results.push(TestResult {
            name: name.into(),
            passed: session.ending() == Some(expected) && turns_after_end == 0,
            detail: format!(
                "ending={:?} after {} commands, {} events",
                session.ending(),
                route.len(),
                events.len()
            ),
        });
    }

    results
}

// ── 5. Input Robustness ─────────────────────────────────────────────────

fn validate_input_robustness(spec: &ScenarioSpec, _verbose: bool) -> Vec<TestResult> {
    println!("--- Input Robustness ---");
    let mut results = Vec::new();

    let Some(mut session) = start(spec) else {
        return results;
    };
    let junk = [
        "",
        "   ",
        "dance",
        "go",
        "pick",
        "use",
        "go nowhere",
        "pick ghost",
        "use ghost",
        "use ghost ship",
        "GO EAST",
        "inventory extra words here",
        "help me",
    ];
    let air_before = session.current_oxygen();
    let room_before = session.current_room();
    for line in junk {
        session.play_turn(line);
    }
    results.push(TestResult {
        name: "input_junk_is_harmless".into(),
        passed: session.is_playing()
            && session.current_room() == room_before
            && session.current_oxygen() == air_before
            && session.backpack().is_empty(),
        detail: format!("{} malformed commands, session unchanged", junk.len()),
    });

    results
}
