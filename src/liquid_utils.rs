use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub mod partials;

pub trait CustomFormat {
    fn to_env_string(&self, format: &str) -> String;
}

///Dates arrive as whatever the backend stored - usually RFC 3339, sometimes a bare day.
///
///Anything unreadable is shown exactly as it came in.
impl CustomFormat for str {
    fn to_env_string(&self, format: &str) -> String {
        let raw = self.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return dt.format(format).to_string();
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return dt.format(format).to_string();
        }
        if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return d.format(format).to_string();
        }

        raw.to_string()
    }
}
