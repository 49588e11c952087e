//! Handler and shed registry commands

use super::render;
use super::shared::{load_configuration, print_json};
use crate::app::models::{Handler, HandlerChanges, Shed, ShedChanges};
use crate::app::services::ledger;
use crate::cli::args::{
    GlobalArgs, HandlerAction, HandlersArgs, OutputFormat, ShedAction, ShedsArgs,
};
use anyhow::Result;
use colored::*;
use serde_json::json;

fn print_names(global: &GlobalArgs, title: &str, names: &[String]) -> Result<()> {
    match global.output_format {
        OutputFormat::Json => print_json(names),
        OutputFormat::Human => {
            render::print_names(title, names);
            Ok(())
        }
    }
}

fn report_handler(global: &GlobalArgs, handler: &Handler, verb: Option<&str>) -> Result<()> {
    match global.output_format {
        OutputFormat::Json => print_json(handler),
        OutputFormat::Human => {
            render::print_handler(handler);
            if let Some(verb) = verb {
                println!("\n{}", format!("Handler {}", verb).bright_green().bold());
            }
            Ok(())
        }
    }
}

fn report_shed(global: &GlobalArgs, shed: &Shed, verb: Option<&str>) -> Result<()> {
    match global.output_format {
        OutputFormat::Json => print_json(shed),
        OutputFormat::Human => {
            render::print_shed(shed);
            if let Some(verb) = verb {
                println!("\n{}", format!("Shed {}", verb).bright_green().bold());
            }
            Ok(())
        }
    }
}

fn report_removed(global: &GlobalArgs, kind: &str, key: &str) -> Result<()> {
    match global.output_format {
        OutputFormat::Json => print_json(&json!({ "removed": key })),
        OutputFormat::Human => {
            println!(
                "{} {}",
                format!("Removed {}", kind).bright_green().bold(),
                key.bright_white().bold()
            );
            Ok(())
        }
    }
}

pub async fn run_handlers(global: &GlobalArgs, args: &HandlersArgs) -> Result<()> {
    let config = load_configuration(global)?;
    let (store, mut ledger) = ledger::open(&config).await?;

    let Some(action) = &args.action else {
        return print_names(global, "Handlers", &ledger.handler_names());
    };

    match action {
        HandlerAction::Show { name } => report_handler(global, ledger.get_handler(name)?, None),
        HandlerAction::Add { name, contact } => {
            let mut handler = Handler::new(name.as_str());
            handler.email = contact.email.clone();
            handler.phone = contact.phone.clone();
            handler.notes = contact.notes.clone();

            let handler = ledger.register_handler(handler)?.clone();
            store.save(&ledger).await?;
            report_handler(global, &handler, Some("registered"))
        }
        HandlerAction::Update {
            name,
            rename,
            contact,
        } => {
            let changes = HandlerChanges {
                name: rename.clone(),
                email: contact.email.clone(),
                phone: contact.phone.clone(),
                notes: contact.notes.clone(),
            };
            let handler = ledger.update_handler(name, changes)?.clone();
            store.save(&ledger).await?;
            report_handler(global, &handler, Some("updated"))
        }
        HandlerAction::Remove { name } => {
            let handler = ledger.remove_handler(name)?;
            store.save(&ledger).await?;
            report_removed(global, "handler", &handler.name)
        }
    }
}

pub async fn run_sheds(global: &GlobalArgs, args: &ShedsArgs) -> Result<()> {
    let config = load_configuration(global)?;
    let (store, mut ledger) = ledger::open(&config).await?;

    let Some(action) = &args.action else {
        return print_names(global, "Sheds", &ledger.shed_numbers());
    };

    match action {
        ShedAction::Show { number } => report_shed(global, ledger.get_shed(number)?, None),
        ShedAction::Add { number, details } => {
            let mut shed = Shed::new(number.as_str());
            shed.capacity = details.capacity;
            shed.location = details.location.clone();
            shed.status = details.status.unwrap_or_default();
            shed.notes = details.notes.clone();

            let shed = ledger.register_shed(shed)?.clone();
            store.save(&ledger).await?;
            report_shed(global, &shed, Some("registered"))
        }
        ShedAction::Update {
            number,
            renumber,
            details,
        } => {
            let changes = ShedChanges {
                number: renumber.clone(),
                capacity: details.capacity,
                location: details.location.clone(),
                status: details.status,
                notes: details.notes.clone(),
            };
            let shed = ledger.update_shed(number, changes)?.clone();
            store.save(&ledger).await?;
            report_shed(global, &shed, Some("updated"))
        }
        ShedAction::Remove { number } => {
            let shed = ledger.remove_shed(number)?;
            store.save(&ledger).await?;
            report_removed(global, "shed", &shed.number)
        }
    }
}
