//! Parsing the informational JSON blob passed to the plugin at launch.
//!
//! The host describes itself, the plugin and the attached devices. The
//! runtime only logs it, so every field is optional and unknown fields
//! are ignored.

use deckhand_core::DeviceId;
use serde::Deserialize;

/// Raw `-info` launch argument.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationInfo {
    #[serde(default)]
    pub application: Option<RawApplication>,
    #[serde(default)]
    pub plugin: Option<RawPlugin>,
    #[serde(default)]
    pub device_pixel_ratio: Option<u32>,
    #[serde(default)]
    pub devices: Vec<RawDevice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawApplication {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub platform_version: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlugin {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDevice {
    pub id: DeviceId,
    #[serde(default)]
    pub name: Option<String>,
    /// Device model discriminant as reported by the host
    #[serde(default, rename = "type")]
    pub device_type: Option<u32>,
    #[serde(default)]
    pub size: Option<RawDeviceSize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RawDeviceSize {
    #[serde(default)]
    pub columns: u32,
    #[serde(default)]
    pub rows: u32,
}

impl RegistrationInfo {
    /// Parses the launch blob.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Host application version, if reported.
    pub fn application_version(&self) -> Option<&str> {
        self.application.as_ref()?.version.as_deref()
    }

    /// Host platform ("mac", "windows"), if reported.
    pub fn platform(&self) -> Option<&str> {
        self.application.as_ref()?.platform.as_deref()
    }

    /// Plugin version from the manifest, if reported.
    pub fn plugin_version(&self) -> Option<&str> {
        self.plugin.as_ref()?.version.as_deref()
    }

    /// Total number of keys across all attached devices.
    pub fn total_keys(&self) -> u32 {
        self.devices
            .iter()
            .filter_map(|d| d.size)
            .map(|s| s.columns.saturating_mul(s.rows))
            .fold(0u32, u32::saturating_add)
    }
}
