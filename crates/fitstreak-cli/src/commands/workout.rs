use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use clap::Subcommand;
use fitstreak_core::storage::{Config, Database};
use fitstreak_core::timer::{SessionTimer, TickDriver};
use fitstreak_core::{
    Difficulty, Event, IdentityProvider, KvIdentity, RemoteStore, SessionRecorder,
};

#[derive(Subcommand)]
pub enum WorkoutAction {
    /// Run a session to completion and record it with a streak
    Run {
        /// Session length in minutes
        #[arg(long)]
        minutes: Option<u64>,
        /// Session length in seconds (overrides --minutes)
        #[arg(long, conflicts_with = "minutes")]
        seconds: Option<u64>,
        /// Workout title stored on the record
        #[arg(long)]
        title: Option<String>,
        /// beginner, intermediate or advanced
        #[arg(long)]
        difficulty: Option<String>,
        /// Skip recording to the remote store
        #[arg(long)]
        no_record: bool,
    },
}

pub fn run(action: WorkoutAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        WorkoutAction::Run {
            minutes,
            seconds,
            title,
            difficulty,
            no_record,
        } => {
            let config = Config::load_or_default();
            let total_secs = match seconds {
                Some(secs) => secs,
                None => minutes.unwrap_or(config.workout.default_duration_min) * 60,
            };
            let title = title.unwrap_or_else(|| config.workout.default_title.clone());
            let difficulty = match difficulty {
                Some(s) => s.parse::<Difficulty>()?,
                None => config.workout.default_difficulty,
            };

            let timer = SessionTimer::new(total_secs)?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_session(
                config, timer, title, difficulty, total_secs, no_record,
            ))
        }
    }
}

/// Drive the countdown to its end, then hand the completion to the
/// recorder. Recording failures degrade to warnings; the completed
/// session is always reported.
async fn run_session(
    config: Config,
    mut timer: SessionTimer,
    title: String,
    difficulty: Difficulty,
    total_secs: u64,
    no_record: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let started = timer.start()?;
    println!("{}", serde_json::to_string(&started)?);

    let timer = Arc::new(Mutex::new(timer));
    let (_driver, mut events) = TickDriver::spawn(Arc::clone(&timer));

    let mut completed_at: Option<DateTime<Utc>> = None;
    while let Some(event) = events.recv().await {
        println!("{}", serde_json::to_string(&event)?);
        if let Event::SessionCompleted { at, .. } = event {
            completed_at = Some(at);
            break;
        }
    }
    let Some(completed_at) = completed_at else {
        return Ok(());
    };
    if no_record {
        return Ok(());
    }

    record_completion(&config, &title, difficulty, total_secs, completed_at).await
}

async fn record_completion(
    config: &Config,
    title: &str,
    difficulty: Difficulty,
    total_secs: u64,
    completed_at: DateTime<Utc>,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let user_id = match KvIdentity::new(&db).current_user() {
        Ok(id) => id,
        Err(e) => {
            eprintln!("warning: completion not recorded: {e}");
            return Ok(());
        }
    };

    let recorder = SessionRecorder::new(RemoteStore::new(&config.store));
    let outcome = recorder
        .record_completion(
            &user_id,
            title,
            difficulty,
            total_secs.div_ceil(60),
            completed_at,
        )
        .await;

    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }
    println!("{}", serde_json::to_string_pretty(&outcome.record)?);
    if let Some(id) = &outcome.record_id {
        eprintln!("recorded as {id}");
    }
    Ok(())
}
