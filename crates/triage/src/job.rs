use serde::{Deserialize, Serialize};

/// Metadata about the failed job, carried through for display only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMetadata {
    pub job_name: String,
    pub step_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

impl JobMetadata {
    pub fn new(job_name: impl Into<String>, step_name: impl Into<String>) -> Self {
        Self {
            job_name: job_name.into(),
            step_name: step_name.into(),
            ..Default::default()
        }
    }

    /// Duration as `45s`, `2m 34s` or `1h 2m 3s`; `N/A` when unknown
    #[must_use]
    pub fn duration_display(&self) -> String {
        self.duration_seconds
            .map_or_else(|| "N/A".to_string(), format_duration)
    }
}

#[must_use]
pub fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{seconds}s");
    }

    let minutes = seconds / 60;
    let secs = seconds % 60;
    if minutes < 60 {
        return format!("{minutes}m {secs}s");
    }

    format!("{}h {}m {secs}s", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(60), "1m 0s");
        assert_eq!(format_duration(154), "2m 34s");
        assert_eq!(format_duration(3723), "1h 2m 3s");
    }

    #[test]
    fn test_duration_display() {
        let mut job = JobMetadata::new("test", "Run pytest");
        assert_eq!(job.duration_display(), "N/A");
        job.duration_seconds = Some(75);
        assert_eq!(job.duration_display(), "1m 15s");
    }
}
