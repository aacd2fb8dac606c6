use std::collections::HashMap;
use std::io::{self, Write};

use team_planner::{
    AnalysisPolicy, CandidateMember, DropOutcome, FileRoster, ProjectConstraints, Role,
    RosterFilter, RosterSnapshot, SelectionChange, TeamPlanner, fetch_or_empty, load_policy,
    telemetry,
};

fn render_members_table(members: &[CandidateMember]) -> String {
    let headers = ["id", "name", "role", "tier", "rate", "avail", "perf", "skills"];
    let rows: Vec<[String; 8]> = members
        .iter()
        .map(|m| {
            [
                m.id.clone(),
                m.name.clone(),
                m.role.to_string(),
                m.experience_tier.to_string(),
                format!("{:.2}", m.hourly_rate),
                format!("{:.0}", m.availability_percent),
                m.performance_score
                    .map(|s| format!("{s:.0}"))
                    .unwrap_or_default(),
                m.skills.iter().cloned().collect::<Vec<_>>().join(","),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.len());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_row = |cells: &[&str]| {
        let mut line = String::from("|");
        for (ci, cell) in cells.iter().enumerate() {
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(widths[ci].saturating_sub(cell.len())));
            line.push_str(" |");
        }
        line
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&headers));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&render_row(&cells));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                       Show this help\n  roster [role]              List roster candidates, optionally by role\n  load <path>                Load roster from a .json or .csv file\n  add <id>                   Add a roster member to the team (click)\n  remove <id>                Remove a member from the team\n  drag <id>                  Start dragging a roster member\n  hover                      Pointer enters the team drop area\n  leave                      Pointer leaves the team drop area\n  drop                       Release the drag at the pointer\n  cancel                     Abort the current drag\n  show                       Show the selected team\n  report                     Show analysis and recommendations\n  inspect <id>               Show a member profile\n  budget <amount|none>       Set the project budget\n  duration <days|none>       Set the project duration in days\n  policy <path>              Load analysis policy (.json or .toml)\n  quit|exit                  Exit"
    );
}

async fn load_roster(path: &str) -> RosterSnapshot {
    let provider = FileRoster::from_path(path);
    fetch_or_empty(&provider, None).await
}

fn print_roster_status(roster: &RosterSnapshot, path: &str) {
    if roster.is_available() {
        println!("Loaded {} candidates from {path}.", roster.members.len());
    } else {
        println!("Roster unavailable (no data).");
    }
}

fn print_detail(planner: &TeamPlanner, roster: &RosterSnapshot) {
    match planner.detail(&roster.members, &HashMap::new()) {
        Some(detail) => {
            let m = &detail.member;
            println!("Id          : {}", m.id);
            println!("Name        : {}", m.name);
            println!("Role        : {}", m.role);
            println!("Department  : {}", m.department);
            println!("Experience  : {}", m.experience_tier);
            println!("Hourly rate : {:.2}", m.hourly_rate);
            println!("Availability: {:.0}%", m.availability_percent);
            match m.performance_score {
                Some(score) => println!("Performance : {score:.0}"),
                None => println!("Performance : not scored"),
            }
            println!("Team lead   : {}", m.team_lead());
            println!(
                "Skills      : {}",
                m.skills.iter().cloned().collect::<Vec<_>>().join(", ")
            );
            println!("Selected    : {}", detail.selected);
        }
        None => println!("Member not found."),
    }
}

fn parse_optional<T: std::str::FromStr>(input: &str) -> Result<Option<T>, ()> {
    if input.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    input.parse::<T>().map(Some).map_err(|_| ())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    telemetry::init_telemetry_with_level("warn");

    let policy = match std::env::var("TEAM_PLANNER_POLICY") {
        Ok(path) => match load_policy(&path) {
            Ok(policy) => policy,
            Err(e) => {
                println!("Ignoring policy {path}: {e}");
                AnalysisPolicy::default()
            }
        },
        Err(_) => AnalysisPolicy::default(),
    };
    let mut planner = TeamPlanner::with_policy("cli", ProjectConstraints::default(), policy);
    let mut roster = RosterSnapshot::loaded(Vec::new());
    if let Some(path) = std::env::args().nth(1) {
        roster = load_roster(&path).await;
        print_roster_status(&roster, &path);
    }

    println!("Team Planner (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "roster" => {
                let filter = match parts.next() {
                    Some(role_s) => match role_s.parse::<Role>() {
                        Ok(role) => RosterFilter {
                            role: Some(role),
                            ..RosterFilter::default()
                        },
                        Err(e) => {
                            println!("{e}");
                            continue;
                        }
                    },
                    None => RosterFilter::default(),
                };
                if roster.no_data() {
                    println!("No roster data.");
                } else {
                    println!("{}", render_members_table(&filter.apply(&roster.members)));
                }
            }
            "load" => match parts.next() {
                Some(path) => {
                    roster = load_roster(path).await;
                    print_roster_status(&roster, path);
                }
                None => println!("Usage: load <path>"),
            },
            "add" | "drag" => {
                let Some(id) = parts.next() else {
                    println!("Usage: {cmd} <id>");
                    continue;
                };
                let Some(member) = roster.find(id).cloned() else {
                    println!("Member {id} not in roster.");
                    continue;
                };
                if cmd == "add" {
                    match planner.click(member) {
                        SelectionChange::Added(m) => println!("Added {} ({}).", m.id, m.role),
                        _ => println!("Member {id} already selected."),
                    }
                } else {
                    if let Some(previous) = planner.start_drag(member) {
                        println!("Cancelled drag of {}.", previous.id);
                    }
                    println!("Dragging {id}.");
                }
            }
            "remove" => match parts.next() {
                Some(id) => match planner.remove(id) {
                    SelectionChange::Removed(m) => println!("Removed {}.", m.id),
                    _ => println!("Member {id} not selected."),
                },
                None => println!("Usage: remove <id>"),
            },
            "hover" => {
                planner.enter_drop_target();
                println!("Drag state: {}", planner.coordinator().state().as_str());
            }
            "leave" => {
                planner.leave_drop_target();
                println!("Drag state: {}", planner.coordinator().state().as_str());
            }
            "drop" => match planner.drop_at_pointer() {
                DropOutcome::Added(m) => println!("Dropped {} onto the team.", m.id),
                DropOutcome::AlreadySelected(id) => println!("Member {id} already selected."),
                DropOutcome::Cancelled(m) => {
                    println!("Drag of {} cancelled outside the team area.", m.id)
                }
                DropOutcome::NoActiveDrag => println!("Nothing is being dragged."),
            },
            "cancel" => match planner.cancel_drag() {
                Some(m) => println!("Cancelled drag of {}.", m.id),
                None => println!("Nothing is being dragged."),
            },
            "show" => {
                if planner.selection().is_empty() {
                    println!("No members selected.");
                } else {
                    println!("{}", render_members_table(planner.selection().list()));
                }
            }
            "report" => print!("{}", planner.report().to_cli_summary()),
            "inspect" => match parts.next() {
                Some(id) => {
                    planner.open_detail(id);
                    print_detail(&planner, &roster);
                    planner.close_detail();
                }
                None => println!("Usage: inspect <id>"),
            },
            "budget" => match parts.next().map(parse_optional::<f64>) {
                Some(Ok(budget)) => {
                    let candidate = ProjectConstraints::new(budget, planner.constraints().duration_days);
                    match candidate.validate() {
                        Ok(()) => {
                            planner.set_constraints(candidate);
                            println!("Budget updated.");
                        }
                        Err(e) => println!("Error: {e}"),
                    }
                }
                _ => println!("Usage: budget <amount|none>"),
            },
            "duration" => match parts.next().map(parse_optional::<u32>) {
                Some(Ok(days)) => {
                    let candidate = ProjectConstraints::new(planner.constraints().budget, days);
                    match candidate.validate() {
                        Ok(()) => {
                            planner.set_constraints(candidate);
                            println!("Duration updated.");
                        }
                        Err(e) => println!("Error: {e}"),
                    }
                }
                _ => println!("Usage: duration <days|none>"),
            },
            "policy" => match parts.next() {
                Some(path) => match load_policy(path) {
                    Ok(policy) => {
                        planner.set_policy(policy);
                        println!("Policy loaded from {path}.");
                    }
                    Err(e) => println!("Error: {e}"),
                },
                None => println!("Usage: policy <path>"),
            },
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
