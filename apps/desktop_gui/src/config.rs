use std::{collections::HashMap, fs};

use shared::domain::FormProfile;

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_url: String,
    pub profile: FormProfile,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            profile: FormProfile::Full,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("avaliador.toml") {
        apply_file_settings(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("AVALIADOR_SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = std::env::var("AVALIADOR_PROFILE") {
        apply_profile(&mut settings, &v);
    }

    settings
}

fn apply_file_settings(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("server_url") {
            settings.server_url = v.clone();
        }
        if let Some(v) = file_cfg.get("profile") {
            apply_profile(settings, v);
        }
    }
}

fn apply_profile(settings: &mut Settings, value: &str) {
    match FormProfile::parse(value) {
        Some(profile) => settings.profile = profile,
        None => tracing::warn!(value, "unknown profile in settings; keeping current one"),
    }
}
