mod command;

pub use command::Command;

use crate::agent::ChatAgent;
use crate::catalog;
use crate::error::ChatError;
use crate::models::chat::{ MessageId, Role };
use crate::surface::{ Header, Mount, Overlay, Surface, SurfaceKind, SurfaceView };

use log::{ info, warn };
use std::io::{ self, Write };
use std::sync::{ Arc, Mutex, PoisonError };
use tokio::io::{ AsyncBufReadExt, BufReader };

struct Cursor {
    last_printed: MessageId,
    typing_shown: bool,
}

/// Prints a surface as plain lines, emitting only what has not been printed
/// yet so every store notification adds at most a few lines.
pub struct TerminalMount<W: Write + Send> {
    label: &'static str,
    out: Mutex<W>,
    cursor: Mutex<Cursor>,
}

impl TerminalMount<io::Stdout> {
    pub fn stdout(label: &'static str) -> Self {
        Self::new(label, io::stdout())
    }
}

impl<W: Write + Send> TerminalMount<W> {
    pub fn new(label: &'static str, out: W) -> Self {
        Self {
            label,
            out: Mutex::new(out),
            cursor: Mutex::new(Cursor { last_printed: 0, typing_shown: false }),
        }
    }

    fn lines_for(&self, view: &SurfaceView) -> Vec<String> {
        let mut cursor = self.cursor.lock().unwrap_or_else(PoisonError::into_inner);
        let mut lines = Vec::new();

        if cursor.last_printed == 0 {
            lines.push(
                format!("[{}] == {} ({}) ==", self.label, view.header.assistant_name, view.header.status)
            );
        }
        let already = cursor.last_printed;
        for message in view.messages.iter().filter(|m| m.id > already) {
            let speaker = match message.role {
                Role::User => "You",
                Role::Assistant => view.header.assistant_name.as_str(),
            };
            lines.push(format!("[{}] {} {}: {}", self.label, message.time, speaker, message.text));
            cursor.last_printed = message.id;
        }
        if view.typing && !cursor.typing_shown {
            lines.push(format!("[{}] {} is typing...", self.label, view.header.assistant_name));
        }
        cursor.typing_shown = view.typing;
        lines
    }

    fn write_lines(&self, lines: &[String]) {
        if lines.is_empty() {
            return;
        }
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        for line in lines {
            if let Err(e) = writeln!(out, "{}", line) {
                warn!("Failed to write to {} surface: {}", self.label, e);
                return;
            }
        }
        let _ = out.flush();
    }
}

impl<W: Write + Send> Mount for TerminalMount<W> {
    fn render(&self, view: &SurfaceView) {
        let lines = self.lines_for(view);
        self.write_lines(&lines);
    }

    fn unmounted(&self) {
        let mut cursor = self.cursor.lock().unwrap_or_else(PoisonError::into_inner);
        cursor.last_printed = 0;
        cursor.typing_shown = false;
    }
}

fn print_line(text: &str) {
    println!("{}", text);
}

fn print_help() {
    print_line("Type a message and press Enter to send it.");
    print_line("  /actions      list quick actions");
    print_line("  /quick <n>    put quick action <n> into the draft");
    print_line("  /draft        show the current draft");
    print_line("  /send         send the current draft");
    print_line("  /open /close  show or hide the overlay");
    print_line("  /quit         exit");
}

fn print_actions() {
    for (i, action) in catalog::quick_actions().iter().enumerate() {
        print_line(&format!("  {}. {} - {}", i + 1, action.label, action.prompt));
    }
}

/// The overlay takes input while it is open, the inline panel otherwise.
fn active<'a>(inline: &'a Surface, overlay: &'a Overlay) -> &'a Surface {
    overlay.surface().unwrap_or(inline)
}

async fn send(surface: &Surface) {
    match surface.submit().await {
        Ok(Some(_)) => {}
        Ok(None) => print_line("Nothing to send."),
        Err(ChatError::DispatchInFlight) => print_line("Still waiting for the previous reply."),
        Err(e) => warn!("Submit from {} surface failed: {}", surface.kind(), e),
    }
}

/// Drives both surfaces from stdin until `/quit` or end of input.
pub async fn run_repl(agent: Arc<ChatAgent>, header: Header, open_overlay: bool) -> Result<(), ChatError> {
    let inline = Surface::mount(
        SurfaceKind::Inline,
        Arc::clone(&agent),
        header.clone(),
        Arc::new(TerminalMount::stdout("inline"))
    );
    let mut overlay = Overlay::new(Arc::clone(&agent), header, Arc::new(TerminalMount::stdout("overlay")));
    if open_overlay {
        overlay.open();
    }
    print_line("Type /help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Say(text) => {
                let surface = active(&inline, &overlay);
                surface.type_text(&text);
                send(surface).await;
            }
            Command::Send => send(active(&inline, &overlay)).await,
            Command::Draft => {
                let draft = active(&inline, &overlay).view().draft;
                print_line(&format!("Draft: {:?}", draft));
            }
            Command::Actions => print_actions(),
            Command::Quick(n) => {
                // 1-based on the command line
                match active(&inline, &overlay).pick_quick_action(n - 1) {
                    Ok(action) => print_line(&format!("Draft: {:?} (use /send)", action.prompt)),
                    Err(_) => print_line(&format!("No quick action {}. Type /actions.", n)),
                }
            }
            Command::Open => {
                overlay.open();
            }
            Command::Close => overlay.close(),
            Command::Help => print_help(),
            Command::Quit => {
                break;
            }
            Command::Empty => {}
            Command::Unknown(word) => print_line(&format!("Unknown command '{}'. Type /help.", word)),
        }
    }

    info!("Chat session ended with {} messages", agent.store().transcript().len());
    Ok(())
}
