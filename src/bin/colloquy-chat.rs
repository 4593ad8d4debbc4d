//! Interactive chat client for the colloquy backend.
//!
//! This binary provides a REPL interface for chatting through the colloquy
//! backend, with thread management and a token-by-token reveal of replies.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage against the default backend
//! colloquy-chat
//!
//! # Point at a different backend
//! colloquy-chat --base-url http://chat.example.com/api/
//!
//! # Disable colors (useful for piping output)
//! colloquy-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/new` - Start a new conversation
//! - `/threads` - List conversations
//! - `/open <id|index>` - Open a conversation
//! - `/delete <id|index>` - Delete a conversation
//! - `/search <text>` - Filter conversations by title
//! - `/theme dark|light` - Set the persisted theme
//! - `/retry` - Resend the last failed prompt
//! - `/quit` - Exit the application

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use time::OffsetDateTime;

use colloquy::chat::{
    ActiveSession, ChatArgs, ChatCommand, ChatConfig, ExchangeController, SubmitOutcome,
    ThreadRegistry, format_recency, help_text, load_theme, parse_command, save_theme,
};
use colloquy::{
    Backend, ChatApi, MessageRole, PlainTextRenderer, Renderer, RevealRenderer, ThreadId,
    ThreadSummary, word_count,
};

/// Main entry point for the colloquy-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("colloquy-chat [OPTIONS]");
    let config = ChatConfig::from(args);

    let theme = load_theme(&config.prefs_path);

    let backend =
        Backend::with_options(Some(config.base_url.clone()), Some(config.request_timeout))?;
    let backend: Arc<dyn ChatApi> = Arc::new(backend);
    let controller = ExchangeController::new(backend.clone());
    let mut registry = ThreadRegistry::new(backend);
    let mut session = ActiveSession::new();
    let mut renderer = PlainTextRenderer::with_color(config.use_color);
    let mut reveal = RevealRenderer::with_cadence(config.reveal_cadence);
    let mut rl = DefaultEditor::new()?;

    // Flag for skipping the reveal mid-flight.
    let interrupted = Arc::new(AtomicBool::new(false));

    // Set up Ctrl+C handler
    let interrupted_clone = interrupted.clone();
    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::Relaxed);
    })?;

    // Startup is a session-boundary event: populate the thread list.
    registry.refresh().await;

    println!(
        "colloquy chat (backend: {}, theme: {})",
        config.base_url, theme
    );
    print_welcome();
    println!("Type /help for commands, /quit to exit\n");

    loop {
        // Reset interrupt flag before each input
        interrupted.store(false, Ordering::Relaxed);

        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::New => {
                            reveal.cancel();
                            registry.create_thread(&mut session).await;
                            renderer.print_info("Started a new conversation.");
                        }
                        ChatCommand::Threads => {
                            print_threads(registry.threads(), &session);
                        }
                        ChatCommand::Search(query) => {
                            let matches: Vec<ThreadSummary> =
                                registry.search(&query).cloned().collect();
                            if matches.is_empty() && !query.is_empty() {
                                renderer.print_info("No conversations found.");
                            } else {
                                print_threads(&matches, &session);
                            }
                        }
                        ChatCommand::Open(target) => match resolve_thread(&registry, &target) {
                            Some(thread_id) => {
                                reveal.cancel();
                                registry.select_thread(&mut session, &thread_id).await;
                                if session.thread_id() == &thread_id {
                                    print_history(&session);
                                }
                            }
                            None => {
                                renderer.print_error(&format!("No such thread: {target}"));
                            }
                        },
                        ChatCommand::Delete(target) => match resolve_thread(&registry, &target) {
                            Some(thread_id) => {
                                let confirm =
                                    rl.readline("Delete this conversation? [y/N] ");
                                let confirmed = matches!(
                                    confirm.as_deref().map(str::trim),
                                    Ok("y") | Ok("Y") | Ok("yes") | Ok("Yes")
                                );
                                if !confirmed {
                                    renderer.print_info("Not deleted.");
                                    continue;
                                }
                                if session.thread_id() == &thread_id {
                                    reveal.cancel();
                                }
                                match registry.delete_thread(&mut session, &thread_id).await {
                                    Ok(()) => renderer.print_info("Conversation deleted."),
                                    Err(_) => renderer.print_error(
                                        "Failed to delete conversation. Please try again.",
                                    ),
                                }
                            }
                            None => {
                                renderer.print_error(&format!("No such thread: {target}"));
                            }
                        },
                        ChatCommand::Theme(theme) => match save_theme(&config.prefs_path, theme) {
                            Ok(()) => renderer.print_info(&format!("Theme set to {theme}.")),
                            Err(err) => {
                                renderer.print_error(&format!("Failed to save theme: {err}"))
                            }
                        },
                        ChatCommand::Retry => {
                            let prompt = session.pending_prompt().to_string();
                            if prompt.is_empty() {
                                renderer.print_info("Nothing to retry.");
                            } else {
                                run_exchange(
                                    &controller,
                                    &mut registry,
                                    &mut session,
                                    &mut reveal,
                                    &mut renderer,
                                    &interrupted,
                                    &prompt,
                                )
                                .await;
                            }
                        }
                        ChatCommand::Stats => {
                            print_stats(&session, &registry);
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular message - submit to the backend
                run_exchange(
                    &controller,
                    &mut registry,
                    &mut session,
                    &mut reveal,
                    &mut renderer,
                    &interrupted,
                    line,
                )
                .await;
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

/// Submits one prompt and drives the reveal of the reply.
#[allow(clippy::too_many_arguments)]
async fn run_exchange(
    controller: &ExchangeController,
    registry: &mut ThreadRegistry,
    session: &mut ActiveSession,
    reveal: &mut RevealRenderer,
    renderer: &mut PlainTextRenderer,
    interrupted: &AtomicBool,
    prompt: &str,
) {
    let was_new = session.is_new_thread();

    renderer.print_status("Thinking...");
    let outcome = controller.submit(session, prompt).await;
    renderer.clear_status();

    match outcome {
        SubmitOutcome::Rejected => {}
        SubmitOutcome::Failed => {
            if let Some(error) = session.last_error() {
                renderer.print_error(error);
            }
            renderer.print_info("Use /retry to resend the prompt.");
        }
        SubmitOutcome::Completed { reply } => {
            println!("Assistant:");
            reveal.start(&reply);
            drive_reveal(reveal, renderer, interrupted, &reply).await;
            if !reply.is_empty() {
                renderer.print_info(&format!("({} words)", word_count(&reply)));
            }
            // The first completed exchange turns a new thread into a
            // persisted one; that identity change refreshes the list so a
            // backend-assigned title shows up right away.
            if was_new {
                registry.refresh().await;
            }
        }
    }
}

/// Prints reveal frames as they arrive, skipping to the end on interrupt.
async fn drive_reveal(
    reveal: &mut RevealRenderer,
    renderer: &mut PlainTextRenderer,
    interrupted: &AtomicBool,
    full: &str,
) {
    let mut printed = 0;
    loop {
        if interrupted.load(Ordering::Relaxed) {
            reveal.cancel();
            renderer.print_text(&full[printed..]);
            break;
        }
        let frame = reveal.frame();
        if frame.text.len() > printed {
            // Frames carry growing prefixes of the reply, so only the newly
            // revealed suffix is printed.
            renderer.print_text(&frame.text[printed..]);
            printed = frame.text.len();
        }
        if frame.complete {
            break;
        }
        if !reveal.changed().await {
            break;
        }
    }
    renderer.finish_response();
}

/// Resolves a thread argument as a 1-based list index or an identifier.
fn resolve_thread(registry: &ThreadRegistry, target: &str) -> Option<ThreadId> {
    if let Ok(index) = target.parse::<usize>()
        && index >= 1
        && index <= registry.len()
    {
        return Some(registry.threads()[index - 1].thread_id.clone());
    }
    registry
        .threads()
        .iter()
        .find(|thread| thread.thread_id.as_str() == target)
        .map(|thread| thread.thread_id.clone())
}

fn print_welcome() {
    println!("Ask me anything: debug code, brainstorm ideas, learn something new.");
}

fn print_threads(threads: &[ThreadSummary], session: &ActiveSession) {
    if threads.is_empty() {
        println!("    (no conversations yet)");
        return;
    }
    let now = OffsetDateTime::now_utc();
    for (index, thread) in threads.iter().enumerate() {
        let marker = if &thread.thread_id == session.thread_id() {
            '*'
        } else {
            ' '
        };
        println!(
            "  {marker} {:>2}. {:<40} {}",
            index + 1,
            thread.title,
            format_recency(thread.updated_at, now)
        );
    }
}

fn print_history(session: &ActiveSession) {
    println!();
    for message in session.messages() {
        match message.role {
            MessageRole::User => println!("You: {}", message.content),
            MessageRole::Assistant => println!("Assistant: {}\n", message.content),
        }
    }
}

fn print_stats(session: &ActiveSession, registry: &ThreadRegistry) {
    println!("    Session Statistics:");
    println!("      Thread: {}", session.thread_id());
    println!("      Messages: {}", session.message_count());
    println!("      New thread: {}", session.is_new_thread());
    println!("      Known threads: {}", registry.len());
    match session.last_error() {
        Some(error) => println!("      Last error: {error}"),
        None => println!("      Last error: (none)"),
    }
}
