use std::sync::Arc;

use clap::ArgMatches;
use serde::Serialize;
use tracing::{error, info};

use pomo_core::config::Config;
use pomo_core::errors::PomoError;
use pomo_core::{FileStore, TodoError, TodoItem, TodoList};

/// `todo list --json` entry; positions match the plain listing.
#[derive(Serialize)]
struct TodoOutput<'a> {
    position: usize,
    text: &'a str,
    completed: bool,
}

pub(crate) fn handle_todo_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let paths = Config::new();
    let mut list = TodoList::load(Arc::new(FileStore::new(paths.data_dir())));

    match matches.subcommand() {
        Some(("add", sub_matches)) => {
            let text = sub_matches
                .get_many::<String>("text")
                .ok_or("Todo text is required")?
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" ");

            let item = list.add(&text).map_err(report)?;
            println!("Added: {}", item.text);
            Ok(())
        }
        Some(("list", sub_matches)) => {
            if let Some(reason) = list.load_error() {
                eprintln!("Warning: Could not read the todo list: {}", reason);
            }
            print_list(list.items(), sub_matches.get_flag("json"))?;
            Ok(())
        }
        Some(("toggle", sub_matches)) => {
            let position = *sub_matches
                .get_one::<usize>("position")
                .ok_or("Position is required")?;

            let item = list.toggle(position).map_err(report)?;
            println!(
                "{} {}",
                if item.completed { "Done:" } else { "Reopened:" },
                item.text
            );
            Ok(())
        }
        Some(("delete", sub_matches)) => {
            let position = *sub_matches
                .get_one::<usize>("position")
                .ok_or("Position is required")?;

            let removed = list.delete(position).map_err(report)?;
            println!("Deleted: {}", removed.text);
            Ok(())
        }
        _ => {
            error!(event = "cli.todo.command_unknown");
            Err("Unknown todo command".into())
        }
    }
}

fn print_list(items: &[TodoItem], json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.todo.list_completed", count = items.len());

    if json_output {
        let output: Vec<TodoOutput> = items
            .iter()
            .enumerate()
            .map(|(index, item)| TodoOutput {
                position: index + 1,
                text: &item.text,
                completed: item.completed,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("No todos yet. Add one with: pomo todo add <text>");
        return Ok(());
    }

    for (index, item) in items.iter().enumerate() {
        println!("{}", format_item(index + 1, item));
    }
    Ok(())
}

fn format_item(position: usize, item: &TodoItem) -> String {
    let mark = if item.completed { "x" } else { " " };
    format!("{:>3}. [{}] {}", position, mark, item.text)
}

/// Print a todo failure for the user and convert it for `?`.
fn report(e: TodoError) -> Box<dyn std::error::Error> {
    if e.is_user_error() {
        eprintln!("{}", e);
    } else {
        eprintln!("Warning: {}", e);
        error!(
            event = "cli.todo.persist_failed",
            error = %e,
            error_code = e.error_code(),
        );
    }
    Box::new(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_item() {
        let mut item = TodoItem::new("write report");
        assert_eq!(format_item(1, &item), "  1. [ ] write report");

        item.completed = true;
        assert_eq!(format_item(12, &item), " 12. [x] write report");
    }
}
