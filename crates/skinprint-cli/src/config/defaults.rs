use super::models::OutputFormat;
use skinprint::core::models::routine::RoutineSlot;

pub struct DefaultsConfig {
    pub output_format: OutputFormat,
    pub default_time: RoutineSlot,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Text,
            default_time: RoutineSlot::Both,
        }
    }
}
