use robonav_core::MapError;
use robonav_search::SearchError;
use thiserror::Error;

/// Everything that can stop a command-line run before it prints a result.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Map file `{name}` not found.")]
    MapNotFound { name: String, available: Vec<String> },

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl CliError {
    /// A follow-up line pointing the user at valid choices, if there is one.
    pub fn hint(&self) -> Option<String> {
        match self {
            CliError::MapNotFound { available, .. } if available.is_empty() => {
                Some("No maps found in the maps directory.".into())
            }
            CliError::MapNotFound { available, .. } => {
                Some(format!("Available maps are: {}", available.join(", ")))
            }
            CliError::Search(SearchError::InvalidConfig(_)) => {
                Some(format!("Example: {}", crate::cli::EXAMPLE))
            }
            CliError::Map(MapError::Syntax { .. } | MapError::Missing(_)) => Some(
                "A map lists the grid size, the start, the goals, then one wall per line.".into(),
            ),
            _ => None,
        }
    }
}
