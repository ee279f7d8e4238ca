use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};
use tokio::task::spawn_blocking;

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FormSettings {
    pub follow_up_delay_ms: u64,
    pub bookings_path: String,
    pub date_format: String,
}

impl FormSettings {
    pub fn follow_up_delay(&self) -> Duration {
        Duration::from_millis(self.follow_up_delay_ms)
    }

    ///The delay in whole seconds, rounded up so a browser never moves on before the form would.
    pub fn follow_up_delay_secs(&self) -> u64 {
        self.follow_up_delay_ms.div_ceil(1000)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrandSettings {
    pub instance_name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub form: FormSettings,
    pub brand: BrandSettings,
    pub server: ServerSettings,
}

impl Settings {
    pub async fn new() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("api.base_url", "http://127.0.0.1:3000/api")?
            .set_default("api.timeout_secs", 10)?
            .set_default("form.follow_up_delay_ms", 2000)?
            .set_default("form.bookings_path", "/gestion-reservas")?
            .set_default("form.date_format", "%d/%m/%Y")?
            .set_default("brand.instance_name", "Reservas")?
            .set_default("server.bind", "127.0.0.1:8080")?;

        spawn_blocking(move || {
            builder
                .add_source(File::from(PathBuf::from("config.toml")).required(false))
                .add_source(Environment::with_prefix("BOOKING").separator("__"))
                .build()
                .and_then(Config::try_deserialize)
        })
        .await
        .map_err(|e| ConfigError::Message(format!("unable to join config loading thread: {e}")))?
    }
}

#[cfg(test)]
impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiSettings {
                base_url: "http://127.0.0.1:3000/api".into(),
                timeout_secs: 10,
            },
            form: FormSettings {
                follow_up_delay_ms: 2000,
                bookings_path: "/gestion-reservas".into(),
                date_format: "%d/%m/%Y".into(),
            },
            brand: BrandSettings {
                instance_name: "Reservas".into(),
            },
            server: ServerSettings {
                bind: "127.0.0.1:8080".into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_is_read_in_milliseconds() {
        let settings = Settings::default();
        assert_eq!(settings.form.follow_up_delay(), Duration::from_secs(2));
    }

    #[test]
    fn partial_seconds_round_up() {
        let mut form = Settings::default().form;
        assert_eq!(form.follow_up_delay_secs(), 2);

        form.follow_up_delay_ms = 1500;
        assert_eq!(form.follow_up_delay_secs(), 2);

        form.follow_up_delay_ms = 200;
        assert_eq!(form.follow_up_delay_secs(), 1);

        form.follow_up_delay_ms = 0;
        assert_eq!(form.follow_up_delay_secs(), 0);
    }
}
