//! Line-oriented front end for the dashboard.
//!
//! Reads commands from stdin, turns them into screen events and prints the
//! resulting records and notifications. Configuration comes from the file
//! named by `HEALTHDESK_CONFIG`, or the defaults.
//!
//! # Commands
//!
//! - `doctors [term]`, `patients [term]`, `appointments [term]`: list records,
//!   optionally filtered
//! - `delete <section> <id>`: delete a record
//! - `stats`: headline figures
//! - `chat <message>`: talk to the assistant
//! - `quick`: list suggested assistant prompts
//! - `help`, `quit`

#![allow(clippy::multiple_crate_versions)]

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use healthdesk::chatbot::QUICK_REPLIES;
use healthdesk::domain::{Entity, RecordId};
use healthdesk::observability::init_tracing;
use healthdesk::screen::{Action, ScreenController, ScreenEvent, Severity};
use healthdesk::{initialize, Config, Dashboard, Section};

const HELP: &str = "\
commands:
  doctors [term]          list doctors
  patients [term]         list patients
  appointments [term]     list appointments
  delete <section> <id>   delete a record
  stats                   headline figures
  chat <message>          ask the assistant
  quick                   suggested prompts
  quit";

fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("healthdesk: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);

    let mut dashboard = match initialize(&config) {
        Ok(dashboard) => dashboard,
        Err(e) => {
            eprintln!("healthdesk: {e}");
            return ExitCode::FAILURE;
        }
    };
    print_actions(&dashboard.load_all());

    if let Some(welcome) = dashboard.assistant.messages().first() {
        println!("{}\n", welcome.content);
    }
    println!("{HELP}");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("healthdesk: {e}");
                return ExitCode::FAILURE;
            }
        }

        if !run_command(&mut dashboard, line.trim()) {
            break;
        }
    }

    tracing::debug!("healthdesk exiting");
    ExitCode::SUCCESS
}

/// Executes one command. Returns `false` when the user asked to quit.
fn run_command(dashboard: &mut Dashboard, line: &str) -> bool {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match command {
        "" => {}
        "quit" | "exit" => return false,
        "help" => println!("{HELP}"),
        "stats" => {
            let overview = dashboard.overview();
            println!(
                "doctors: {} ({} with open slots)",
                overview.doctors.total, overview.doctors.available
            );
            println!(
                "patients: {} ({} male, {} female, {} with allergies)",
                overview.patients.total,
                overview.patients.male,
                overview.patients.female,
                overview.patients.with_allergies
            );
            let a = overview.appointments;
            println!(
                "appointments: {} ({} open: {} scheduled, {} confirmed; {} completed, {} cancelled)",
                a.total, a.open, a.scheduled, a.confirmed, a.completed, a.cancelled
            );
        }
        "chat" => match dashboard.assistant.send(rest) {
            Some(reply) => println!("{}", reply.content),
            None => println!("(empty message ignored)"),
        },
        "quick" => {
            for prompt in QUICK_REPLIES {
                println!("  {prompt}");
            }
        }
        "delete" => {
            let Some((section, id)) = rest.split_once(' ') else {
                println!("usage: delete <section> <id>");
                return true;
            };
            let event = ScreenEvent::DeleteRecord(RecordId::new(id.trim()));
            let actions = match parse_section(section) {
                Some(Section::Doctors) => dashboard.doctors.handle_event(event),
                Some(Section::Patients) => dashboard.patients.handle_event(event),
                Some(Section::Appointments) => dashboard.appointments.handle_event(event),
                _ => {
                    println!("unknown section: {section}");
                    return true;
                }
            };
            print_actions(&actions);
        }
        other => match parse_section(other) {
            Some(Section::Doctors) => list(&mut dashboard.doctors, rest),
            Some(Section::Patients) => list(&mut dashboard.patients, rest),
            Some(Section::Appointments) => list(&mut dashboard.appointments, rest),
            _ => println!("unknown command: {other} (try `help`)"),
        },
    }
    true
}

fn parse_section(name: &str) -> Option<Section> {
    match name {
        "doctors" | "doctor" => Some(Section::Doctors),
        "patients" | "patient" => Some(Section::Patients),
        "appointments" | "appointment" => Some(Section::Appointments),
        "chat" | "assistant" => Some(Section::Assistant),
        _ => None,
    }
}

fn list<E: Entity>(screen: &mut ScreenController<E>, term: &str) {
    screen.handle_event(ScreenEvent::SetSearchTerm(term.to_string()));
    let visible = screen.visible();
    if visible.is_empty() {
        println!("(no {} found)", E::KIND.plural());
        return;
    }
    for record in visible {
        let id = record.id().map_or("-", RecordId::as_str);
        println!("  [{id}] {}", record.searchable_fields().join(" | "));
    }
}

fn print_actions(actions: &[Action]) {
    for action in actions {
        if let Action::Notify(notification) = action {
            let marker = match notification.severity {
                Severity::Success => "ok",
                Severity::Warning => "warn",
                Severity::Error => "error",
            };
            println!("[{marker}] {}: {}", notification.title, notification.message);
        }
    }
}
