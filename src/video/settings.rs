//! Functions for loading the settings of video device.

use crate::errors::*;

/// A structure containing configuration data for the `GraphicsDevice`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSettings {
    /// Checks the native error state after every state-mutating call, and logs the
    /// name of the call if something goes wrong. It's expensive, and enabled in debug
    /// builds by default.
    pub check_errors: bool,
    /// Sorts the unsorted command lists before dispatching them in `submit`.
    pub sort_on_submit: bool,
    /// The number of texture units available for a single draw. Texture parameters
    /// beyond this limit are skipped.
    pub max_texture_units: u32,
    /// The initial capacity of command buffers in a new `CommandList`.
    pub command_buffer_capacity: usize,
}

impl Default for VideoSettings {
    fn default() -> Self {
        VideoSettings {
            check_errors: cfg!(debug_assertions),
            sort_on_submit: true,
            max_texture_units: 16,
            command_buffer_capacity: 64,
        }
    }
}

impl VideoSettings {
    /// Parses settings from json. Missing fields fall back to the default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings = serde_json::from_str(json)?;
        Ok(settings)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_json() {
        let settings = VideoSettings::from_json(r#"{ "max_texture_units": 8 }"#).unwrap();
        assert_eq!(settings.max_texture_units, 8);
        assert_eq!(settings.sort_on_submit, true);
        assert_eq!(settings.check_errors, cfg!(debug_assertions));

        assert!(VideoSettings::from_json("{ max_texture_units }").is_err());
    }
}
