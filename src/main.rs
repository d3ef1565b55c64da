use anyhow::Result;
use clap::{Parser, Subcommand};

use chklst::cli::{handle_backup_command, handle_library_command, BackupCommands, LibraryCommands};
use chklst::config::{paths::ChklstPaths, settings::Settings};
use chklst::storage::Storage;

#[derive(Parser)]
#[command(
    name = "chklst",
    version,
    about = "Deployment checklist backend utilities",
    long_about = "chklst keeps the deployment tracker's database safe: it takes \
                  byte-for-byte database backups, restores them, exports and \
                  imports the library presets, and prunes old backups."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Database backup, restore and settings export/import
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Library preset management
    #[command(subcommand, alias = "lib")]
    Library(LibraryCommands),

    /// Write default settings and seed the library
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ChklstPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    if let Err(e) = chklst::logging::init(&settings.log_level) {
        eprintln!("Warning: {}", e);
    }

    let storage = Storage::new(paths.clone())?;
    storage.initialize()?;

    match cli.command {
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&paths, &settings, &storage, cmd)?;
        }
        Some(Commands::Library(cmd)) => {
            handle_library_command(&storage, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing chklst at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'chklst library show' to see the preset lists.");
        }
        Some(Commands::Config) => {
            println!("chklst Configuration");
            println!("====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Library file:     {}", paths.library_file().display());
            println!("Database file:    {}", settings.database_path(&paths).display());
            println!("Backup directory: {}", settings.backup_dir(&paths).display());
            println!();
            println!("Settings:");
            println!("  Retention days:        {}", settings.retention_days);
            println!("  Auto-backup interval:  {}h", settings.auto_backup.interval_hours);
            println!("  Log level:             {}", settings.log_level);
        }
        None => {
            println!("chklst - deployment checklist backend utilities");
            println!();
            println!("Run 'chklst --help' for usage information.");
        }
    }

    Ok(())
}
