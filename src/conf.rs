use config::{Config, ConfigError, Environment};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub listen_port: String,
    //speech-to-text
    pub assemblyai_api_key: String,
    pub assemblyai_base_url: String,
    //extraction
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
    //sheets
    pub sheets_credentials_path: String,
    pub spreadsheet_id: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .set_default("listen_port", "5000")?
            .set_default("assemblyai_api_key", "")?
            .set_default("assemblyai_base_url", "https://api.assemblyai.com")?
            .set_default("gemini_api_key", "")?
            .set_default(
                "gemini_base_url",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("gemini_model", "gemini-1.5-flash")?
            .set_default("sheets_credentials_path", "credentials.json")?
            .set_default("spreadsheet_id", "")?
            .add_source(Environment::default())
            .build()?;
        let s: Settings = conf.try_deserialize()?;
        Ok(s)
    }
}

lazy_static! {
    pub static ref settings: Settings = Settings::new().expect("improperly configured");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_fall_back_to_defaults() {
        // the builder reads the process environment; scrub our keys so an
        // ambient override cannot skew the assertions
        for key in [
            "LISTEN_PORT",
            "ASSEMBLYAI_API_KEY",
            "ASSEMBLYAI_BASE_URL",
            "GEMINI_API_KEY",
            "GEMINI_BASE_URL",
            "GEMINI_MODEL",
            "SHEETS_CREDENTIALS_PATH",
            "SPREADSHEET_ID",
        ] {
            std::env::remove_var(key);
        }

        let s = Settings::new().expect("settings should build without env");
        assert_eq!(s.listen_port, "5000");
        assert_eq!(s.assemblyai_base_url, "https://api.assemblyai.com");
        assert_eq!(
            s.gemini_base_url,
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(s.gemini_model, "gemini-1.5-flash");
        assert_eq!(s.sheets_credentials_path, "credentials.json");
    }
}
