//! Library CLI commands
//!
//! Show and edit the preset lists (developers, servers, environments).

use clap::Subcommand;

use crate::error::ChklstResult;
use crate::models::{Library, LibraryList};
use crate::services::LibraryService;
use crate::storage::Storage;

/// Library subcommands
#[derive(Subcommand)]
pub enum LibraryCommands {
    /// Show all preset lists
    Show,

    /// Add a value to a list
    Add {
        /// developers, build-servers, deploy-servers or environments
        list: LibraryList,
        /// Value to add
        value: String,
    },

    /// Remove a value from a list
    Remove {
        /// developers, build-servers, deploy-servers or environments
        list: LibraryList,
        /// Value to remove
        value: String,
    },
}

/// Handle a library command
pub fn handle_library_command(storage: &Storage, cmd: LibraryCommands) -> ChklstResult<()> {
    let store = storage.library_store();
    let service = LibraryService::new(store.as_ref());

    match cmd {
        LibraryCommands::Show => {
            let library = service.get()?;
            print!("{}", format_library(&library));
        }
        LibraryCommands::Add { list, value } => {
            service.add(list, &value)?;
            println!("Added '{}' to {}", value.trim(), list);
        }
        LibraryCommands::Remove { list, value } => {
            service.remove(list, &value)?;
            println!("Removed '{}' from {}", value, list);
        }
    }

    Ok(())
}

/// Format the library record for terminal output
pub fn format_library(library: &Library) -> String {
    let mut output = String::new();

    for list in LibraryList::all() {
        let values = library.list(list);
        output.push_str(&format!("{}:\n", list));
        if values.is_empty() {
            output.push_str("  (none)\n");
        }
        for value in values {
            output.push_str(&format!("  - {}\n", value));
        }
    }

    output
}
