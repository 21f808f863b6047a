use crate::cli::{DataArgs, DataCommands};
use crate::data::DataManager;
use crate::error::{CliError, Result};
use std::path::Path;
use tracing::info;

pub fn run(args: DataArgs) -> Result<()> {
    match args.command {
        DataCommands::Path => handle_path(),
        DataCommands::SetPath { path } => handle_set_path(&path),
        DataCommands::ResetPath => handle_reset_path(),
    }
}

fn handle_path() -> Result<()> {
    let manager = DataManager::new()?;
    println!("{}", manager.get_data_path().display());
    Ok(())
}

fn handle_set_path(path: &Path) -> Result<()> {
    if !path.is_absolute() {
        return Err(CliError::Argument(format!(
            "Data path must be absolute: {}",
            path.display()
        )));
    }
    DataManager::set_custom_path(path)?;
    info!("Data path set to {:?}", path);
    println!("✓ Data path set to: {}", path.display());
    Ok(())
}

fn handle_reset_path() -> Result<()> {
    DataManager::reset_path()?;
    let manager = DataManager::new()?;
    info!("Data path reset to {:?}", manager.get_data_path());
    println!("✓ Data path reset to: {}", manager.get_data_path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_are_rejected_before_touching_config() {
        let err = handle_set_path(Path::new("relative/dir")).unwrap_err();
        assert!(matches!(err, CliError::Argument(_)));
    }
}
