use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid config value {name} = {value}")]
    InvalidValue { name: &'static str, value: i64 },
}

/// Construction parameters for a session, supplied once as plain
/// integers. There is no runtime configuration beyond this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Universe extent in cells
    pub cols: i64,
    pub rows: i64,

    /// Initial cell pixel footprint (the starting zoom)
    pub cell_w: i64,
    pub cell_h: i64,

    /// Screen size in pixels
    pub screen_w: i64,
    pub screen_h: i64,

    /// Target ticks per second for the frame clock
    pub tick_rate: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cols: 200,
            rows: 200,
            cell_w: 5,
            cell_h: 5,
            screen_w: 640,
            screen_h: 480,
            tick_rate: 60,
        }
    }
}

impl Config {
    /// A non-positive dimension refuses to start.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("cols", self.cols),
            ("rows", self.rows),
            ("cell_w", self.cell_w),
            ("cell_h", self.cell_h),
            ("screen_w", self.screen_w),
            ("screen_h", self.screen_h),
            ("tick_rate", self.tick_rate as i64),
        ];

        for (name, value) in checks {
            if value <= 0 {
                return Err(ConfigError::InvalidValue { name, value });
            }
        }

        Ok(())
    }
}
