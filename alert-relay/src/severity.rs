/// Alert criticality derived from Rollbar's numeric level codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Error,
    Warning,
    Info,
    Debug,
    Unknown,
}

impl Severity {
    pub fn from_level(level: i64) -> Self {
        match level {
            50 => Severity::Critical,
            40 => Severity::Error,
            30 => Severity::Warning,
            20 => Severity::Info,
            10 => Severity::Debug,
            _ => Severity::Unknown,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
            Severity::Unknown => "UNKNOWN",
        }
    }

    // Critical and Error render distinctly so the glyph alone tells them apart.
    pub const fn glyph(&self) -> &'static str {
        match self {
            Severity::Critical => "🚨",
            Severity::Error => "🔴",
            Severity::Warning => "🟡",
            Severity::Info => "🔵",
            Severity::Debug => "⚪",
            Severity::Unknown => "⚫",
        }
    }
}
