use crate::app::SosApp;
use crate::config::Config;
use crate::contact_store::{ContactId, ContactStore};
use crate::dialer::Dialer;
use crate::dispatcher::{CardInput, SwipeDirection};
use crate::error::Result;
use crate::persistence::JsonFileGateway;
use colored::*;
use std::io::{BufRead, Write};

/// Terminal stand-in for the platform dialer
pub struct ConsoleDialer {
    granted: bool,
}

impl ConsoleDialer {
    pub fn new(granted: bool) -> Self {
        Self { granted }
    }
}

impl Dialer for ConsoleDialer {
    fn has_call_permission(&self) -> bool {
        self.granted
    }

    fn dial(&self, uri: &str) -> Result<()> {
        println!("{} Dialing {}", "☎".green().bold(), uri.cyan());
        Ok(())
    }

    fn request_call_permission(&self, request_code: u32) {
        eprintln!(
            "{} Call permission required (request {}). Call not placed.",
            "✗".yellow().bold(),
            request_code
        );
    }
}

/// Shared CLI implementation for the `sos` binary.
pub fn run(args: Vec<String>) -> anyhow::Result<()> {
    let bin = args
        .first()
        .map(|s| s.as_str())
        .unwrap_or("sos")
        .to_string();

    let parsed = Config::from_args(&args)?;
    let config = parsed.config;
    let command = parsed.command;

    let Some(verb) = command.first() else {
        print_usage(&bin);
        return Ok(());
    };

    if verb == "path" {
        println!("{}", config.contacts_path().display());
        return Ok(());
    }

    let store = ContactStore::initialize(JsonFileGateway::new(config.contacts_path()));
    let mut app = SosApp::new(store, ConsoleDialer::new(config.call_permission));

    match verb.as_str() {
        "list" => list_contacts(&app),
        "add" => {
            if command.len() < 3 {
                eprintln!("{}", format!("Usage: {} add <name> <phone> [icon]", bin).yellow());
                return Ok(());
            }
            app.open_new_form();
            if let Some(form) = app.form_mut() {
                form.name = command[1].clone();
                form.phone = command[2].clone();
                form.icon = command.get(3).cloned().unwrap_or_default();
            }
            submit(&mut app)?;
        }
        "edit" => {
            let Some(id) = parse_id(&bin, "edit <id> [--name N] [--phone P] [--icon I]", &command)
            else {
                return Ok(());
            };
            edit_contact(&mut app, id, &command[2..])?;
        }
        "call" => {
            let Some(id) = parse_id(&bin, "call <id>", &command) else {
                return Ok(());
            };
            if app
                .gesture(id, CardInput::Swipe(SwipeDirection::EndToStart))
                .is_none()
            {
                not_found(id);
            }
        }
        "delete" => {
            let Some(id) = parse_id(&bin, "delete <id> [--yes]", &command) else {
                return Ok(());
            };
            let assume_yes = command[2..].iter().any(|a| a == "--yes" || a == "-y");
            delete_contact(&mut app, id, assume_yes)?;
        }
        _ => {
            eprintln!("{} Unknown command: {}", "✗".red().bold(), verb.red());
            print_usage(&bin);
        }
    }

    Ok(())
}

fn print_usage(bin: &str) {
    println!("{}", "🆘 SOS Contacts".bright_cyan().bold());
    println!();
    println!("{}", "Usage:".bright_white().bold());
    println!("  {} [--data-dir <path>] [--no-call-permission] <command> [args]", bin.cyan());
    println!();
    println!("{}", "Commands:".bright_white().bold());
    println!("  {}                              List contacts", "list".cyan());
    println!(
        "  {} <name> <phone> [icon]          Add a contact",
        "add".cyan()
    );
    println!(
        "  {} <id> [--name|--phone|--icon V] Edit a contact",
        "edit".cyan()
    );
    println!("  {} <id>                          Call a contact", "call".cyan());
    println!(
        "  {} <id> [--yes]                 Delete a contact",
        "delete".cyan()
    );
    println!(
        "  {}                              Show the contacts file path",
        "path".cyan()
    );
}

fn parse_id(bin: &str, usage: &str, command: &[String]) -> Option<ContactId> {
    match command.get(1).map(|s| s.parse::<ContactId>()) {
        Some(Ok(id)) => Some(id),
        _ => {
            eprintln!("{}", format!("Usage: {} {}", bin, usage).yellow());
            None
        }
    }
}

fn not_found(id: ContactId) {
    eprintln!("{} No contact with id {}", "✗".red().bold(), id.to_string().red());
}

fn list_contacts<D: Dialer>(app: &SosApp<D>) {
    if app.store().is_empty() {
        println!("{}", "No contacts yet".yellow());
        return;
    }

    let contacts = app.contacts();

    println!(
        "{}",
        format!("SOS Contacts ({})", contacts.len()).bright_cyan().bold()
    );
    println!("{}", "─".repeat(48).dimmed());
    for c in contacts {
        let icon = if c.icon.is_empty() { " " } else { c.icon.as_str() };
        println!(
            "  {:>3}  {}  {}  {}",
            c.id.to_string().dimmed(),
            icon,
            c.name.to_uppercase().bright_white().bold(),
            c.phone.green()
        );
    }
}

fn edit_contact<D: Dialer>(app: &mut SosApp<D>, id: ContactId, flags: &[String]) -> anyhow::Result<()> {
    if app
        .gesture(id, CardInput::Swipe(SwipeDirection::StartToEnd))
        .is_none()
    {
        not_found(id);
        return Ok(());
    }

    if let Some(form) = app.form_mut() {
        let mut i = 0;
        while i < flags.len() {
            let value = flags.get(i + 1).cloned();
            match (flags[i].as_str(), value) {
                ("--name", Some(v)) => form.name = v,
                ("--phone", Some(v)) => form.phone = v,
                ("--icon", Some(v)) => form.icon = v,
                (other, _) => {
                    anyhow::bail!("unexpected edit argument: {}", other);
                }
            }
            i += 2;
        }
    }
    submit(app)
}

fn submit<D: Dialer>(app: &mut SosApp<D>) -> anyhow::Result<()> {
    match app.submit_form() {
        Ok(Some(c)) => {
            println!(
                "{} Saved {} {} ({})",
                "✓".green().bold(),
                c.icon,
                c.name.cyan(),
                format!("id {}", c.id).dimmed()
            );
        }
        Ok(None) => {
            eprintln!("{} Contact no longer exists, nothing saved", "✗".yellow().bold());
        }
        Err(e) => {
            app.cancel_form();
            eprintln!("{} {}", "✗".red().bold(), e.to_string().red());
        }
    }
    Ok(())
}

fn delete_contact<D: Dialer>(app: &mut SosApp<D>, id: ContactId, assume_yes: bool) -> anyhow::Result<()> {
    let Some(contact) = app.store().get(id) else {
        not_found(id);
        return Ok(());
    };
    app.gesture(id, CardInput::LongPress);

    let confirmed = if assume_yes {
        true
    } else {
        print!("Delete contact {}? [y/N] ", contact.name.bright_white().bold());
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    };

    if confirmed {
        app.gesture(id, CardInput::Confirm);
        println!("{} Deleted {}", "✓".green().bold(), contact.name.cyan());
    } else {
        app.gesture(id, CardInput::Decline);
        println!("{}", "Kept".dimmed());
    }
    Ok(())
}
