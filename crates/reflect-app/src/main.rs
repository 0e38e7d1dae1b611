//! Reflect application binary - composition root.
//!
//! Ties the editor crates into a single executable:
//! 1. Parse CLI args and load configuration from TOML
//! 2. Initialize tracing
//! 3. Seed an in-memory store with one reflection record
//! 4. Run a line-oriented editing session on stdin
//!
//! Session commands:
//! - a plain line replaces the draft
//! - `:voice <text>` simulates a transcribed voice increment
//! - `:voice-err` simulates a voice widget failure
//! - `:save` saves, `:cancel` cancels, `:quit` exits

mod cli;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use tokio::io::AsyncBufReadExt;
use tokio::sync::broadcast;

use reflect_core::config::ReflectConfig;
use reflect_core::error::ReflectError;
use reflect_core::types::Reflection;
use reflect_editor::{MemoryStore, ReflectionEditor, ReflectionStore};

use cli::CliArgs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let config = ReflectConfig::load_or_default(&config_file);

    // Tracing.
    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&log_level)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting Reflect v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Store, seeded with the record under edit.
    let store = Arc::new(MemoryStore::new());
    let reflection = if args.transient {
        Reflection::transient(args.body.clone())
    } else {
        let record = Reflection::new(uuid::Uuid::new_v4().to_string(), args.body.clone());
        store.insert(record.clone());
        record
    };

    // The session ends when either callback fires.
    let done = Arc::new(AtomicBool::new(false));

    let on_save = {
        let done = Arc::clone(&done);
        Box::new(move |record: Reflection| {
            match serde_json::to_string_pretty(&record) {
                Ok(json) => println!("Saved:\n{}", json),
                Err(e) => tracing::warn!(error = %e, "Failed to render saved record"),
            }
            done.store(true, Ordering::SeqCst);
        })
    };
    let on_cancel = {
        let done = Arc::clone(&done);
        Box::new(move || {
            println!("Cancelled.");
            done.store(true, Ordering::SeqCst);
        })
    };

    let editor = Arc::new(ReflectionEditor::new(
        reflection,
        Arc::clone(&store) as Arc<dyn ReflectionStore>,
        on_save,
        on_cancel,
    ));

    // Log editor events in the background.
    let mut events = editor.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => tracing::debug!(event = ?event, "Editor event"),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Editor event listener lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    println!("Editing reflection. Commands: :voice <text>, :voice-err, :save, :cancel, :quit");
    print_snapshot(&editor, &config.editor.placeholder);

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while !done.load(Ordering::SeqCst) {
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim_end();

        if input == ":quit" {
            break;
        } else if input == ":save" {
            if let Err(e) = editor.save().await {
                println!("Save rejected: {}", e);
            }
        } else if input == ":cancel" {
            if let Err(e) = editor.cancel() {
                println!("Cancel rejected: {}", e);
            }
        } else if input == ":voice-err" {
            if config.editor.voice_enabled {
                editor.handle_voice_error(&ReflectError::Voice(
                    "simulated transcription failure".to_string(),
                ));
            } else {
                println!("Voice input is disabled in config.");
            }
        } else if let Some(text) = input.strip_prefix(":voice ") {
            if config.editor.voice_enabled {
                editor.handle_transcript(text);
            } else {
                println!("Voice input is disabled in config.");
            }
        } else if let Err(e) = editor.set_draft(input) {
            println!("Edit rejected: {}", e);
        }

        print_snapshot(&editor, &config.editor.placeholder);
    }

    tracing::info!("Reflect session ended");
    Ok(())
}

/// Print a one-line summary of the editor state.
fn print_snapshot(editor: &ReflectionEditor, placeholder: &str) {
    let snapshot = editor.snapshot();
    if let Some(ref error) = snapshot.error {
        println!("! {}", error);
    }
    let draft = if snapshot.draft.is_empty() {
        format!("<{}>", placeholder)
    } else {
        snapshot.draft.clone()
    };
    println!(
        "[{}] {} (save {})",
        snapshot.phase,
        draft,
        if snapshot.can_save() {
            "enabled"
        } else {
            "disabled"
        }
    );
}
