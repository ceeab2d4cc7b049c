use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use json::{JsonValue, object};

use crate::{
    color_palette::ReductionType,
    dithering::ErrorDiffusionType,
    error::{DitherError, Result},
};

/// Settings for a dithering run of the command line driver.
///
/// Stored as JSON:
///
/// ```json
/// { "kernels": ["floyd", "atkinson"], "reduction": "web_safe", "output_base": "dither" }
/// ```
///
/// `kernels` may also be the string `"all"`. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct DitherConfig {
    pub kernels: Vec<ErrorDiffusionType>,
    pub reduction: ReductionType,
    pub output_base: String,
}

impl Default for DitherConfig {
    fn default() -> Self {
        Self {
            kernels: ErrorDiffusionType::ALL.to_vec(),
            reduction: ReductionType::default(),
            output_base: String::from("dither"),
        }
    }
}

impl DitherConfig {
    pub fn from_json(json_string: &str) -> Result<DitherConfig> {
        let json = json::parse(json_string)?;
        if !json.is_object() {
            return config_error("expected a JSON object");
        }
        let mut config = DitherConfig::default();

        let kernels = &json["kernels"];
        if let Some(key) = kernels.as_str() {
            config.kernels = match key.trim().to_lowercase().as_str() {
                "all" => ErrorDiffusionType::ALL.to_vec(),
                other => vec![other.parse()?],
            };
        } else if kernels.is_array() {
            config.kernels = kernels
                .members()
                .map(|member| match member.as_str() {
                    Some(key) => key.parse(),
                    None => config_error("kernels entries must be strings"),
                })
                .collect::<Result<_>>()?;
            if config.kernels.is_empty() {
                return config_error("kernels must name at least one method");
            }
        } else if !kernels.is_null() {
            return config_error("Couldn't parse kernels");
        }

        let reduction = &json["reduction"];
        if !reduction.is_null() {
            config.reduction = match reduction.as_str() {
                Some(key) => key.parse()?,
                None => return config_error("Couldn't parse reduction"),
            };
        }

        let output_base = &json["output_base"];
        if !output_base.is_null() {
            config.output_base = match output_base.as_str() {
                Some(base) if !base.is_empty() => base.to_string(),
                _ => return config_error("Couldn't parse output_base"),
            };
        }

        Ok(config)
    }

    pub fn to_json(&self) -> String {
        let kernels: Vec<JsonValue> = self.kernels.iter().map(|&kind| kind.into()).collect();
        let reduction = self.reduction.key();
        let output_base = self.output_base.as_str();
        let data = object! { kernels: kernels, reduction: reduction, output_base: output_base };
        data.pretty(2)
    }

    pub fn read_config<P: AsRef<Path>>(path: P) -> Result<DitherConfig> {
        let mut file = File::open(path.as_ref())?;
        let mut json_string = String::new();
        file.read_to_string(&mut json_string)?;
        log::debug!("read config from {}", path.as_ref().display());

        DitherConfig::from_json(&json_string)
    }

    pub fn write_config<P: AsRef<Path>>(&self, path: P) -> Result {
        let mut file = File::create(path)?;
        file.write_all(self.to_json().as_bytes())?;
        Ok(())
    }
}

impl From<ErrorDiffusionType> for JsonValue {
    fn from(kind: ErrorDiffusionType) -> Self {
        JsonValue::String(kind.key().to_string())
    }
}

fn config_error<T>(msg: &str) -> Result<T> {
    Err(DitherError::Config(msg.to_string()))
}
