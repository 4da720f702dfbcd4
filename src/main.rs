//! MediConnect terminal front-end.
//!
//! Thin presentation over the view models in `mediconnect::views`. All
//! session, validation, and workflow logic lives in the library; this
//! binary only renders state and dispatches input.

use std::io::{self, Write};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use mediconnect::api::{ApiClient, BookingApi};
use mediconnect::app_state::AppState;
use mediconnect::config;
use mediconnect::models::AppointmentStatus;
use mediconnect::session::FileSessionStore;
use mediconnect::views::{
    AdminView, AuthGate, BookingView, FormMode, HistoryView, PatientTab, ViewMode,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} client starting v{}", config::APP_NAME, config::APP_VERSION);

    let store = FileSessionStore::new(config::session_file());
    let state = Arc::new(AppState::new(Box::new(store)));
    let api: Arc<dyn BookingApi> =
        Arc::new(ApiClient::new(&config::api_base_url(), Arc::clone(&state)));
    let mut gate = AuthGate::new(state, Arc::clone(&api));

    println!("=== {} ===", config::APP_NAME);
    loop {
        let quit = match gate.view_mode() {
            ViewMode::AnonymousLogin => login_screen(&mut gate).await,
            ViewMode::AnonymousSignup => signup_screen(&mut gate).await,
            ViewMode::Patient => patient_screen(&mut gate, &api).await,
            ViewMode::Admin => admin_screen(&mut gate, &api).await,
        };
        if quit {
            break;
        }
    }
}

fn prompt(label: &str) -> String {
    print!("{label} ");
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return "q".to_string();
    }
    line.trim().to_string()
}

fn show_messages(error: Option<&str>, info: Option<&str>) {
    if let Some(error) = error {
        println!("! {error}");
    }
    if let Some(info) = info {
        println!("* {info}");
    }
}

// ── Anonymous screens ───────────────────────────────────────

async fn login_screen(gate: &mut AuthGate) -> bool {
    println!("\n── Login ──");
    show_messages(gate.error(), gate.info());
    println!("Default admin: admin / admin123");

    let username = prompt("Username ('s' to sign up, 'q' to quit):");
    match username.as_str() {
        "q" => return true,
        "s" => {
            gate.toggle(FormMode::Signup);
            return false;
        }
        _ => {}
    }
    gate.set_username(&username);
    gate.set_password(&prompt("Password:"));
    gate.submit_login().await;
    false
}

async fn signup_screen(gate: &mut AuthGate) -> bool {
    println!("\n── Sign up ──");
    show_messages(gate.error(), gate.info());

    let full_name = prompt("Full name ('b' for back to login):");
    if full_name == "b" {
        gate.toggle(FormMode::Login);
        return false;
    }
    gate.set_full_name(&full_name);
    gate.set_username(&prompt("Username:"));
    gate.set_password(&prompt("Password:"));
    gate.submit_signup().await;
    false
}

// ── Patient screens ─────────────────────────────────────────

async fn patient_screen(gate: &mut AuthGate, api: &Arc<dyn BookingApi>) -> bool {
    println!("\nLogged in as PATIENT");
    match gate.patient_tab() {
        PatientTab::Book => booking_screen(gate, api).await,
        PatientTab::MyAppointments => history_screen(gate, api).await,
    }
}

async fn booking_screen(gate: &mut AuthGate, api: &Arc<dyn BookingApi>) -> bool {
    let mut view = BookingView::mount(Arc::clone(api));
    view.resolve().await;

    loop {
        println!("\n── Available Doctors ──");
        if let Some(message) = view.message() {
            println!("* {message}");
        }
        if view.visible_doctors().is_empty() {
            println!("(no doctors match)");
        }
        for doctor in view.visible_doctors() {
            println!("  {:>3}  {}  ({})", doctor.id, doctor.name, doctor.specialization);
        }
        let selected = if view.selected_time().is_empty() {
            "-"
        } else {
            view.selected_time()
        };
        println!("Selected time: {selected}  (earliest {})", view.min_datetime());
        println!(
            "[/text] search  [t YYYY-MM-DDTHH:MM] pick time  [b id] book  \
             [m] my appointments  [l] logout  [q] quit"
        );

        let line = prompt(">");
        match line.as_str() {
            "q" => return true,
            "l" => {
                gate.logout();
                return false;
            }
            "m" => {
                gate.select_patient_tab(PatientTab::MyAppointments);
                return false;
            }
            "" => continue,
            _ => {}
        }
        if let Some(term) = line.strip_prefix('/') {
            view.set_search(term);
        } else if let Some(raw) = line.strip_prefix("t ") {
            view.set_selected_time(raw.trim());
        } else if let Some(raw) = line.strip_prefix("b ") {
            match raw.trim().parse::<i64>() {
                Ok(id) => view.book(id).await,
                Err(_) => println!("Not a doctor id: {raw}"),
            }
        } else {
            println!("Unknown command: {line}");
        }
    }
}

async fn history_screen(gate: &mut AuthGate, api: &Arc<dyn BookingApi>) -> bool {
    let mut view = HistoryView::mount(Arc::clone(api));
    view.resolve().await;

    println!("\n── My Appointments ──");
    if view.appointments().is_empty() {
        println!("No appointments yet.");
    }
    for a in view.appointments() {
        println!(
            "  {:>3}  {}  {}  {}  {}",
            a.id,
            a.doctor_name,
            a.specialization,
            a.appointment_time.format("%Y-%m-%d %H:%M"),
            a.status.as_str()
        );
    }

    loop {
        let line = prompt("[b] book  [l] logout  [q] quit >");
        match line.as_str() {
            "q" => return true,
            "l" => {
                gate.logout();
                return false;
            }
            "b" => {
                gate.select_patient_tab(PatientTab::Book);
                return false;
            }
            _ => println!("Unknown command: {line}"),
        }
    }
}

// ── Admin screen ────────────────────────────────────────────

async fn admin_screen(gate: &mut AuthGate, api: &Arc<dyn BookingApi>) -> bool {
    let mut view = AdminView::mount(Arc::clone(api));
    view.resolve().await;

    loop {
        println!("\n── Admin Dashboard ──");
        if let Some(message) = view.message() {
            println!("* {message}");
        }
        if let Some(stats) = view.stats() {
            println!(
                "Patients: {}  Doctors: {}  Appointments: {}  Today: {}",
                stats.total_patients,
                stats.total_doctors,
                stats.total_appointments,
                stats.appointments_today
            );
        }
        if view.appointments().is_empty() {
            println!("No appointments yet.");
        }
        for a in view.appointments() {
            println!(
                "  {:>3}  {}  {}  {}  {}",
                a.id,
                a.doctor_name,
                a.patient_name,
                a.appointment_time.format("%Y-%m-%d %H:%M"),
                a.status.as_str()
            );
        }
        println!("[d] add doctor  [c id] confirm  [x id] cancel  [l] logout  [q] quit");

        let line = prompt(">");
        match line.as_str() {
            "q" => return true,
            "l" => {
                gate.logout();
                return false;
            }
            "d" => {
                view.set_doctor_name(&prompt("Doctor name:"));
                view.set_specialization(&prompt("Specialization:"));
                view.create_doctor().await;
                continue;
            }
            "" => continue,
            _ => {}
        }
        if let Some(raw) = line.strip_prefix("c ") {
            set_status(&mut view, raw, AppointmentStatus::Confirmed).await;
        } else if let Some(raw) = line.strip_prefix("x ") {
            set_status(&mut view, raw, AppointmentStatus::Cancelled).await;
        } else {
            println!("Unknown command: {line}");
        }
    }
}

async fn set_status(view: &mut AdminView, raw: &str, target: AppointmentStatus) {
    match raw.trim().parse::<i64>() {
        Ok(id) => view.set_status(id, target).await,
        Err(_) => println!("Not an appointment id: {raw}"),
    }
}
