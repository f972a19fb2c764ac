use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Conf {
    pub version: u8,
    /// Capture device index; 0 is the first enumerated camera.
    pub device: i32,
    /// Path to the pretrained frontal-face Haar cascade model.
    pub cascade: String,
}

impl ::std::default::Default for Conf {
    fn default() -> Self {
        Self {
            version: 0,
            device: 0,
            cascade: "haarcascade_frontalface_default.xml".into(),
        }
    }
}

pub fn load_config() -> Result<Conf> {
    let cfg: Conf = confy::load("mira", None).context("Failed to load configuration")?;
    debug!("Loaded config: {:?}", cfg);
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_first_camera_and_bundled_cascade() {
        let cfg = Conf::default();
        assert_eq!(cfg.device, 0);
        assert_eq!(cfg.cascade, "haarcascade_frontalface_default.xml");
    }
}
