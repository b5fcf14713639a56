use crate::constants::{DEFAULT_IMAGES_PER_PAGE, MAX_IMAGES_PER_PAGE};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings for one conversion run
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConversionOptions {
    /// Images per physical page; the grid itself is always 3x3
    pub images_per_page: usize,
    pub page_size: PageSize,
    /// Compress the output and allow bounded enlargement of small drawings
    pub high_quality: bool,
    pub layout: LayoutStyle,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            images_per_page: DEFAULT_IMAGES_PER_PAGE,
            page_size: PageSize::A4,
            high_quality: true,
            layout: LayoutStyle::Borderless,
        }
    }
}

impl ConversionOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| ConvertError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConvertError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.images_per_page == 0 {
            return Err(ConvertError::Config(
                "Images per page must be at least 1".to_string(),
            ));
        }

        if self.images_per_page > MAX_IMAGES_PER_PAGE {
            return Err(ConvertError::Config(format!(
                "Images per page must not exceed {}",
                MAX_IMAGES_PER_PAGE
            )));
        }

        Ok(())
    }
}
