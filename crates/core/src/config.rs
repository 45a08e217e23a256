use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Knobs for cursor resolution, read from the client's initialization options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoreConfig {
    /// Visual width of a tab when measuring indentation.
    pub tab_width: usize,
    /// Extra columns a node's start is widened by when matching the cursor.
    pub position_leeway: usize,
    pub indent_recovery: bool,
    pub schema_fallback: bool,
    /// Rejects recovery parents whose block a later, shallower line has already closed.
    pub dedent_closes_blocks: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            tab_width: 4,
            position_leeway: 1,
            indent_recovery: true,
            schema_fallback: true,
            dedent_closes_blocks: false,
        }
    }
}

impl CoreConfig {
    pub fn from_json(value: Option<serde_json::Value>) -> Result<Self> {
        match value {
            None | Some(serde_json::Value::Null) => Ok(Self::default()),
            Some(value) => {
                let config: CoreConfig = serde_json::from_value(value)
                    .map_err(|e| CoreError::Config(e.to_string()))?;
                if config.tab_width == 0 {
                    return Err(CoreError::Config("tabWidth must be at least 1".into()));
                }
                Ok(config)
            }
        }
    }
}
